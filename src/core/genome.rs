use std::collections::HashMap;

use crate::core::contig::{Contig, NucleotideCounts};

/// Helper function to convert u64 count to f64 with explicit precision loss allowance
#[inline]
pub(crate) fn count_to_f64(count: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// A genome assembly: its contigs in file order
#[derive(Debug, Clone, Default)]
pub struct Genome {
    /// Source file path (if known)
    pub source: Option<String>,

    pub contigs: Vec<Contig>,

    /// Index: contig name -> position in `contigs`
    name_to_index: HashMap<String, usize>,
}

impl Genome {
    /// Build a genome from contigs. Later duplicates of a name shadow earlier
    /// ones in the name index; parsers reject duplicates before this point.
    #[must_use]
    pub fn new(contigs: Vec<Contig>) -> Self {
        let name_to_index = contigs
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();

        Self {
            source: None,
            contigs,
            name_to_index,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Contig> {
        self.name_to_index.get(name).map(|&i| &self.contigs[i])
    }

    /// Length of the named contig, if it is part of the genome
    pub fn contig_length(&self, name: &str) -> Option<u64> {
        self.get(name).map(Contig::length)
    }

    /// Total number of bases across all contigs
    pub fn size(&self) -> u64 {
        self.contigs.iter().map(Contig::length).sum()
    }

    #[must_use]
    pub fn nucleotide_counts(&self) -> NucleotideCounts {
        let mut total = NucleotideCounts::default();
        for contig in &self.contigs {
            total += contig.nucleotide_counts();
        }
        total
    }

    /// Genome-wide GC content as a percentage of called bases.
    /// Returns 0 when the genome has no called bases.
    pub fn gc_percent(&self) -> f64 {
        self.nucleotide_counts()
            .gc_fraction()
            .map_or(0.0, |f| 100.0 * f)
    }

    /// Contigs ordered from longest to shortest; ties keep file order
    pub fn sorted_by_length(&self) -> Vec<&Contig> {
        let mut sorted: Vec<&Contig> = self.contigs.iter().collect();
        sorted.sort_by(|a, b| b.length().cmp(&a.length()));
        sorted
    }

    /// N50 and L50 of the contigs.
    ///
    /// N50 is the length of the longest contig L for which at least half of
    /// all bases are in contigs of length >= L. L50 is the number of contigs
    /// needed to reach that half. Returns `None` for an empty genome.
    pub fn n50_l50(&self) -> Option<(u64, usize)> {
        if self.contigs.is_empty() {
            return None;
        }

        let mut lengths: Vec<u64> = self.contigs.iter().map(Contig::length).collect();
        lengths.sort_unstable_by(|a, b| b.cmp(a));

        let total: u64 = lengths.iter().sum();
        let mut running = 0u64;
        for (i, len) in lengths.iter().enumerate() {
            running += len;
            // running >= total / 2, kept in integers
            if 2 * running >= total {
                return Some((*len, i + 1));
            }
        }

        // Unreachable for non-empty input, but keep the answer well-defined
        lengths.last().map(|&len| (len, lengths.len()))
    }
}
