use std::path::Path;

use tracing::debug;

use crate::core::genome::{count_to_f64, Genome};
use crate::parsing::coverage::CoverageProfile;
use crate::style::DeviationStyle;
use crate::tracks::karyotype::Karyotype;
use crate::tracks::{window_spans, write_records, DeviationRecord, TrackError};
use crate::utils::validation::validate_window_size;

/// Coverage deviation per window, in percent of the genome-wide mean depth
#[derive(Debug, Clone)]
pub struct CoverageTrack {
    pub mean_depth: f64,

    /// Mean depth of every contig with coverage rows, in genome order
    pub contig_depths: Vec<(String, f64)>,

    pub records: Vec<DeviationRecord>,
}

impl CoverageTrack {
    /// # Errors
    ///
    /// Returns `TrackError::NoCoverage` if no coverage row fell on the genome,
    /// `TrackError::ZeroMeanDepth` if the mean depth is zero, or
    /// `TrackError::Invalid` for a zero window size.
    pub fn build(
        genome: &Genome,
        profile: &CoverageProfile,
        karyotype: &Karyotype,
        style: &DeviationStyle,
    ) -> Result<Self, TrackError> {
        let window_size = validate_window_size("coverage", style.window_size)?;
        let mean_depth = profile.mean_depth().ok_or(TrackError::NoCoverage)?;
        if mean_depth <= 0.0 {
            return Err(TrackError::ZeroMeanDepth);
        }

        let contig_depths = genome
            .contigs
            .iter()
            .filter_map(|c| {
                profile
                    .contig_mean_depth(&c.name)
                    .map(|d| (c.name.clone(), d))
            })
            .collect();

        let mut records = Vec::new();
        for contig in genome.contigs.iter().filter(|c| karyotype.is_displayed(&c.name)) {
            let Some(depths) = profile.depths(&contig.name) else {
                debug!("No coverage rows for contig {}", contig.name);
                continue;
            };

            for (start, end) in window_spans(contig.length(), window_size) {
                #[allow(clippy::cast_possible_truncation)]
                let window = &depths[start as usize..end as usize];
                let window_mean = window.iter().sum::<f64>() / count_to_f64(end - start);

                let delta = 100.0 * (window_mean - mean_depth) / mean_depth;
                records.push(DeviationRecord {
                    contig: contig.name.clone(),
                    start,
                    end,
                    delta,
                    color: style.color_for(delta).to_string(),
                });
            }
        }

        Ok(Self {
            mean_depth,
            contig_depths,
            records,
        })
    }

    /// # Errors
    ///
    /// Returns an IO error if the file cannot be written.
    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        write_records(path, &self.records)
    }
}
