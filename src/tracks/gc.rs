use std::path::Path;

use tracing::debug;

use crate::core::contig::NucleotideCounts;
use crate::core::genome::Genome;
use crate::style::DeviationStyle;
use crate::tracks::karyotype::Karyotype;
use crate::tracks::{window_spans, write_records, DeviationRecord, TrackError};
use crate::utils::validation::validate_window_size;

/// GC deviation per window, in percentage points from the genome mean
#[derive(Debug, Clone)]
pub struct GcTrack {
    /// Genome-wide GC content, in percent
    pub mean_gc: f64,
    pub records: Vec<DeviationRecord>,
}

impl GcTrack {
    /// # Errors
    ///
    /// Returns `TrackError::Invalid` for a zero window size.
    pub fn build(
        genome: &Genome,
        karyotype: &Karyotype,
        style: &DeviationStyle,
    ) -> Result<Self, TrackError> {
        let window_size = validate_window_size("gc", style.window_size)?;
        let mean_gc = genome.gc_percent();

        let mut records = Vec::new();
        let mut uncalled = 0usize;

        for contig in genome.contigs.iter().filter(|c| karyotype.is_displayed(&c.name)) {
            for (start, end) in window_spans(contig.length(), window_size) {
                #[allow(clippy::cast_possible_truncation)]
                let window = &contig.sequence[start as usize..end as usize];

                // Windows of only N carry no GC signal
                let Some(gc) = NucleotideCounts::from_sequence(window).gc_fraction() else {
                    uncalled += 1;
                    continue;
                };

                let delta = 100.0 * gc - mean_gc;
                records.push(DeviationRecord {
                    contig: contig.name.clone(),
                    start,
                    end,
                    delta,
                    color: style.color_for(delta).to_string(),
                });
            }
        }

        if uncalled > 0 {
            debug!("Skipped {uncalled} GC windows without called bases");
        }

        Ok(Self { mean_gc, records })
    }

    /// # Errors
    ///
    /// Returns an IO error if the file cannot be written.
    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        write_records(path, &self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contig::Contig;
    use crate::style::plot_style::ContigStyle;
    use crate::tracks::karyotype::KaryotypeParams;

    fn karyotype(genome: &Genome, min_contig_len: u64) -> Karyotype {
        Karyotype::build(
            genome,
            KaryotypeParams {
                completeness: 100.0,
                min_contig_len,
                max_contigs: 100,
            },
            &ContigStyle::default(),
        )
    }

    fn style(window_size: u64) -> DeviationStyle {
        DeviationStyle {
            window_size,
            ..DeviationStyle::gc()
        }
    }

    #[test]
    fn test_gc_deviation_per_window() {
        // 4 GC-rich bases then 4 AT bases; mean 50%
        let genome = Genome::new(vec![Contig::new("c1", b"GGCCAATT".to_vec())]);
        let track = GcTrack::build(&genome, &karyotype(&genome, 1), &style(4)).unwrap();

        assert!((track.mean_gc - 50.0).abs() < 1e-9);
        assert_eq!(track.records.len(), 2);

        assert_eq!((track.records[0].start, track.records[0].end), (0, 4));
        assert!((track.records[0].delta - 50.0).abs() < 1e-9);
        assert_eq!(track.records[0].color, "dorange");

        assert!((track.records[1].delta + 50.0).abs() < 1e-9);
        assert_eq!(track.records[1].color, "dblue");
    }

    #[test]
    fn test_all_n_window_skipped() {
        let genome = Genome::new(vec![Contig::new("c1", b"GCGCNNNN".to_vec())]);
        let track = GcTrack::build(&genome, &karyotype(&genome, 1), &style(4)).unwrap();
        assert_eq!(track.records.len(), 1);
        assert!((track.mean_gc - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_filtered_contigs_have_no_windows() {
        let genome = Genome::new(vec![
            Contig::new("big", b"GCGCGCGC".to_vec()),
            Contig::new("tiny", b"AT".to_vec()),
        ]);
        let track = GcTrack::build(&genome, &karyotype(&genome, 5), &style(4)).unwrap();

        assert!(track.records.iter().all(|r| r.contig == "big"));
        // mean still covers every contig: 8 GC of 10 called
        assert!((track.mean_gc - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_window_rejected() {
        let genome = Genome::new(vec![Contig::new("c1", b"ACGT".to_vec())]);
        assert!(GcTrack::build(&genome, &karyotype(&genome, 1), &style(0)).is_err());
    }
}
