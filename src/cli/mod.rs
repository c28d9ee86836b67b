//! Command-line interface for circos-mag.
//!
//! Available commands:
//!
//! - **plot**: Build the Circos inputs for a MAG and render the plot
//! - **style**: Write the default plot style as a TOML file to customize
//!
//! ## Usage
//!
//! ```text
//! # Plot with an existing annotation and read coverage
//! circos-mag plot --genome-file mag.fna.gz --gff-file mag.gff \
//!     --coverage-file mag.depth.tsv --completeness 92.4 -o out/
//!
//! # Annotate with Prokka first, only write the Circos inputs
//! circos-mag plot --genome-file mag.fna -o out/ --no-render
//!
//! # Start from the default style
//! circos-mag style -o my_style.toml
//! ```

use clap::{Parser, Subcommand};

pub mod plot;
pub mod style;

#[derive(Parser)]
#[command(name = "circos-mag")]
#[command(version)]
#[command(about = "Create a Circos plot of a metagenome-assembled genome")]
#[command(
    long_about = "circos-mag prepares the data and configuration files for a Circos plot of a MAG and runs Circos.\n\nThe plot shows:\n- Contigs, longest first, with filtered and missing DNA as grey and red blocks\n- GC deviation from the genome mean\n- Positions of 5S, 16S and 23S rRNA and tRNA genes\n- Read coverage deviation from the genome mean (optional)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a Circos plot for a MAG
    Plot(plot::PlotArgs),

    /// Write the default plot style
    Style(style::StyleArgs),
}
