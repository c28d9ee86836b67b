//! # circos-mag
//!
//! Create a Circos plot summarizing a metagenome-assembled genome (MAG).
//!
//! `circos-mag` turns a MAG's FASTA, its gene annotations (GFF3, or a Prokka
//! run) and optional per-base read coverage into the data and configuration
//! files the Circos plotting tool consumes, then runs Circos.
//!
//! ## Features
//!
//! - **Karyotype**: contigs drawn longest first; short or surplus contigs are
//!   pooled, and DNA missing from an incomplete genome is shown as its own block
//! - **GC deviation**: windowed GC content relative to the genome mean
//! - **Gene markers**: 5S, 16S and 23S rRNA and tRNA genes drawn as glyphs
//! - **Coverage deviation**: windowed read depth relative to the genome mean
//! - **Styling**: colors, symbols and track ranges from a TOML file
//! - **Summary**: assembly, rRNA and tRNA statistics as text and JSON
//!
//! ## Example
//!
//! ```rust,no_run
//! use circos_mag::parsing::fasta::parse_fasta_file;
//! use circos_mag::style::PlotStyle;
//! use circos_mag::tracks::gc::GcTrack;
//! use circos_mag::tracks::karyotype::{Karyotype, KaryotypeParams};
//! use std::path::Path;
//!
//! let genome = parse_fasta_file(Path::new("mag.fna.gz")).unwrap();
//! let style = PlotStyle::default();
//!
//! let params = KaryotypeParams { completeness: 95.0, min_contig_len: 1000, max_contigs: 100 };
//! let karyotype = Karyotype::build(&genome, params, &style.contigs);
//! let gc = GcTrack::build(&genome, &karyotype, &style.gc).unwrap();
//!
//! println!("{} contigs, mean GC {:.1}%", genome.len(), gc.mean_gc);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Contigs, genomes and gene features
//! - [`parsing`]: Parsers for FASTA, GFF3 and coverage files
//! - [`tracks`]: Karyotype and per-track Circos data
//! - [`style`]: Plot style loaded from TOML
//! - [`circos`]: Circos configuration and external tool execution
//! - [`summary`]: Genome statistics output
//! - [`cli`]: Command-line interface implementation

pub mod circos;
pub mod cli;
pub mod core;
pub mod parsing;
pub mod style;
pub mod summary;
pub mod tracks;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::contig::Contig;
pub use core::feature::{Feature, FeatureKind, RrnaType};
pub use core::genome::Genome;
pub use style::PlotStyle;
pub use tracks::karyotype::Karyotype;
