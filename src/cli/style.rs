//! Style command - write the default plot style as a starting point.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use tracing::info;

use crate::style::PlotStyle;

const HEADER: &str = "\
# circos-mag plot style
#
# Every section and key is optional; missing values take the defaults below.
# Colors are Circos color names (e.g. dorange, vdgreen) and symbols are glyphs
# from the Circos symbol font. show_background is one of yes, no or data.
#
# Use with: circos-mag plot --plot-style <this file> ...

";

#[derive(Args)]
pub struct StyleArgs {
    /// Output file (stdout if not given)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

/// Render the default style with its header comment
///
/// # Errors
///
/// Returns an error if the style cannot be serialized.
pub fn default_style_text() -> anyhow::Result<String> {
    let body = PlotStyle::default().to_toml()?;
    Ok(format!("{HEADER}{body}"))
}

/// Execute the style command
///
/// # Errors
///
/// Returns an error if the output exists (without `--force`) or cannot be written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: StyleArgs) -> anyhow::Result<()> {
    let text = default_style_text()?;

    match &args.output {
        Some(path) => {
            if path.exists() && !args.force {
                bail!(
                    "Output file already exists: {} (use --force to overwrite)",
                    path.display()
                );
            }
            std::fs::write(path, &text)
                .with_context(|| format!("Failed to write plot style to {}", path.display()))?;
            info!("Wrote default plot style to {}", path.display());
        }
        None => {
            std::io::stdout().write_all(text.as_bytes())?;
        }
    }

    Ok(())
}
