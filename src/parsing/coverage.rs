//! Parser for per-base coverage tables.
//!
//! Expected columns: `contig`, `position`, `depth`, whitespace separated, as
//! produced by `samtools depth -a` or `bedtools genomecov -d`. Positions are
//! 1-based. Zero-depth positions must be present for window means to be right.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use tracing::{debug, warn};

use crate::core::genome::Genome;
use crate::parsing::{open_text, ParseError};

/// Per-base depth for each genome contig
#[derive(Debug, Clone, Default)]
pub struct CoverageProfile {
    /// Index: contig name -> depth per 0-based position
    depths: HashMap<String, Vec<f64>>,

    /// Sum of all depths read
    pub total_depth: f64,

    /// Number of rows that contributed a depth
    pub observed_positions: u64,

    /// Rows for contigs that are not part of the genome
    pub skipped_rows: u64,
}

impl CoverageProfile {
    /// Depths for a contig, indexed by 0-based position.
    /// Positions without a row hold zero.
    pub fn depths(&self, contig: &str) -> Option<&[f64]> {
        self.depths.get(contig).map(Vec::as_slice)
    }

    /// Mean depth over all observed positions
    pub fn mean_depth(&self) -> Option<f64> {
        if self.observed_positions == 0 {
            None
        } else {
            #[allow(clippy::cast_precision_loss)]
            Some(self.total_depth / self.observed_positions as f64)
        }
    }

    /// Mean depth of a single contig over its full length
    pub fn contig_mean_depth(&self, contig: &str) -> Option<f64> {
        let depths = self.depths(contig)?;
        if depths.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        Some(depths.iter().sum::<f64>() / depths.len() as f64)
    }
}

/// Parse a coverage file (optionally gzipped) against the contigs of `genome`
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` for malformed rows.
pub fn parse_coverage_file(path: &Path, genome: &Genome) -> Result<CoverageProfile, ParseError> {
    let profile = parse_coverage_reader(open_text(path)?, genome)?;
    debug!(
        "Read depth for {} positions from {} ({} rows on other contigs)",
        profile.observed_positions,
        path.display(),
        profile.skipped_rows
    );
    Ok(profile)
}

/// Parse coverage rows from any buffered reader
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a row has fewer than 3 fields, a
/// non-positive position, or an invalid or negative depth.
pub fn parse_coverage_reader<R: BufRead>(
    reader: R,
    genome: &Genome,
) -> Result<CoverageProfile, ParseError> {
    let mut profile = CoverageProfile::default();
    let mut out_of_range = 0u64;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = i + 1;

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Coverage line {line_num} has fewer than 3 fields"
            )));
        }

        let contig = fields[0];
        let Some(contig_len) = genome.contig_length(contig) else {
            profile.skipped_rows += 1;
            continue;
        };

        let position: u64 = match fields[1].parse() {
            Ok(p) if p > 0 => p,
            _ => {
                return Err(ParseError::InvalidFormat(format!(
                    "Invalid position on coverage line {line_num}: '{}' (positions are 1-based)",
                    fields[1]
                )))
            }
        };

        let depth: f64 = match fields[2].parse::<f64>() {
            Ok(d) if d.is_finite() && d >= 0.0 => d,
            _ => {
                return Err(ParseError::InvalidFormat(format!(
                    "Invalid depth on coverage line {line_num}: '{}'",
                    fields[2]
                )))
            }
        };

        if position > contig_len {
            out_of_range += 1;
            continue;
        }

        let depths = profile.depths.entry(contig.to_string()).or_insert_with(|| {
            #[allow(clippy::cast_possible_truncation)]
            vec![0.0; contig_len as usize]
        });

        #[allow(clippy::cast_possible_truncation)]
        {
            depths[(position - 1) as usize] += depth;
        }
        profile.total_depth += depth;
        profile.observed_positions += 1;
    }

    if out_of_range > 0 {
        warn!("Skipped {out_of_range} coverage rows with positions past the end of their contig");
    }

    Ok(profile)
}
