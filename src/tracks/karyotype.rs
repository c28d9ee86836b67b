//! Karyotype: the ideograms making up the circle.
//!
//! Contigs are ranked longest first. A contig gets its own ideogram when its
//! rank is within `max_contigs` and it is at least `min_contig_len` long. The
//! rest are pooled into one `other` ideogram. For an incomplete genome a
//! `missing_dna` ideogram sized from the completeness estimate is appended.

use std::collections::HashSet;
use std::path::Path;

use crate::core::genome::{count_to_f64, Genome};
use crate::style::plot_style::ContigStyle;
use crate::tracks::write_records;

/// Ideogram id for pooled, filtered contigs
pub const OTHER_ID: &str = "other";

/// Ideogram id for DNA missing from an incomplete genome
pub const MISSING_ID: &str = "missing_dna";

/// Ideogram ids no contig may use
pub const RESERVED_IDS: [&str; 2] = [OTHER_ID, MISSING_ID];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdeogramKind {
    Contig,
    Filtered,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ideogram {
    pub id: String,
    pub label: String,
    pub length: u64,
    pub color: String,
    pub kind: IdeogramKind,
}

impl std::fmt::Display for Ideogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "chr - {} {} 0 {} {}",
            self.id, self.label, self.length, self.color
        )
    }
}

/// Contig selection parameters
#[derive(Debug, Clone, Copy)]
pub struct KaryotypeParams {
    /// Completeness estimate in percent, (0, 100]
    pub completeness: f64,
    pub min_contig_len: u64,
    pub max_contigs: usize,
}

#[derive(Debug, Clone)]
pub struct Karyotype {
    pub ideograms: Vec<Ideogram>,

    /// Names of contigs drawn as their own ideogram
    displayed: HashSet<String>,

    /// Number of contigs pooled into `other`
    pub filtered_contigs: usize,

    /// Size of the `missing_dna` ideogram (0 when complete)
    pub missing_bases: u64,
}

/// Bases missing from a genome of `genome_size` given its completeness in percent
pub fn missing_bases(genome_size: u64, completeness: f64) -> u64 {
    let size = count_to_f64(genome_size);
    let estimated = size / (completeness / 100.0);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (estimated - size).max(0.0).floor() as u64
    }
}

impl Karyotype {
    #[must_use]
    pub fn build(genome: &Genome, params: KaryotypeParams, style: &ContigStyle) -> Self {
        let mut ideograms = Vec::new();
        let mut displayed = HashSet::new();
        let mut filtered_contigs = 0;
        let mut filtered_bases = 0;

        for (rank, contig) in genome.sorted_by_length().into_iter().enumerate() {
            if rank < params.max_contigs && contig.length() >= params.min_contig_len {
                displayed.insert(contig.name.clone());
                ideograms.push(Ideogram {
                    id: contig.name.clone(),
                    label: (rank + 1).to_string(),
                    length: contig.length(),
                    color: style.color.clone(),
                    kind: IdeogramKind::Contig,
                });
            } else {
                filtered_contigs += 1;
                filtered_bases += contig.length();
            }
        }

        if filtered_bases > 0 {
            ideograms.push(Ideogram {
                id: OTHER_ID.to_string(),
                label: OTHER_ID.to_string(),
                length: filtered_bases,
                color: style.filtered_color.clone(),
                kind: IdeogramKind::Filtered,
            });
        }

        let missing = missing_bases(genome.size(), params.completeness);
        if missing > 0 {
            ideograms.push(Ideogram {
                id: MISSING_ID.to_string(),
                label: "missing".to_string(),
                length: missing,
                color: style.missing_color.clone(),
                kind: IdeogramKind::Missing,
            });
        }

        Self {
            ideograms,
            displayed,
            filtered_contigs,
            missing_bases: missing,
        }
    }

    /// Is the contig drawn as its own ideogram (and so receives track data)?
    pub fn is_displayed(&self, contig: &str) -> bool {
        self.displayed.contains(contig)
    }

    /// Ideogram ids shorter than `min_len`, in karyotype order
    pub fn shorter_than(&self, min_len: u64) -> Vec<&str> {
        self.ideograms
            .iter()
            .filter(|i| i.length < min_len)
            .map(|i| i.id.as_str())
            .collect()
    }

    /// # Errors
    ///
    /// Returns an IO error if the file cannot be written.
    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        write_records(path, &self.ideograms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contig::Contig;

    fn genome() -> Genome {
        Genome::new(vec![
            Contig::new("small", vec![b'A'; 100]),
            Contig::new("large", vec![b'A'; 5000]),
            Contig::new("medium", vec![b'A'; 900]),
        ])
    }

    fn params(completeness: f64, min_contig_len: u64, max_contigs: usize) -> KaryotypeParams {
        KaryotypeParams {
            completeness,
            min_contig_len,
            max_contigs,
        }
    }

    #[test]
    fn test_all_contigs_displayed_longest_first() {
        let karyotype = Karyotype::build(&genome(), params(100.0, 1, 10), &ContigStyle::default());

        let ids: Vec<&str> = karyotype.ideograms.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["large", "medium", "small"]);
        assert_eq!(karyotype.ideograms[0].to_string(), "chr - large 1 0 5000 green");
        assert_eq!(karyotype.filtered_contigs, 0);
        assert_eq!(karyotype.missing_bases, 0);
    }

    #[test]
    fn test_filtered_contigs_pooled() {
        // min length drops "small"; max_contigs = 1 drops "medium"
        let karyotype = Karyotype::build(&genome(), params(100.0, 500, 1), &ContigStyle::default());

        assert_eq!(karyotype.ideograms.len(), 2);
        assert!(karyotype.is_displayed("large"));
        assert!(!karyotype.is_displayed("medium"));
        assert_eq!(karyotype.filtered_contigs, 2);

        let other = &karyotype.ideograms[1];
        assert_eq!(other.kind, IdeogramKind::Filtered);
        assert_eq!(other.length, 1000);
        assert_eq!(other.color, "grey");
    }

    #[test]
    fn test_missing_dna_ideogram() {
        // 6000 bp at 75% complete -> 8000 estimated, 2000 missing
        let karyotype = Karyotype::build(&genome(), params(75.0, 1, 10), &ContigStyle::default());

        let missing = karyotype.ideograms.last().unwrap();
        assert_eq!(missing.id, MISSING_ID);
        assert_eq!(missing.length, 2000);
        assert_eq!(missing.color, "red");
        assert_eq!(karyotype.missing_bases, 2000);
    }

    #[test]
    fn test_missing_bases() {
        assert_eq!(missing_bases(1_000_000, 100.0), 0);
        assert_eq!(missing_bases(900, 50.0), 900);
        assert_eq!(missing_bases(1000, 30.0), 2333);
    }

    #[test]
    fn test_shorter_than() {
        let karyotype = Karyotype::build(&genome(), params(100.0, 1, 10), &ContigStyle::default());
        assert_eq!(karyotype.shorter_than(1000), vec!["medium", "small"]);
    }
}
