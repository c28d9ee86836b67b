use serde::{Deserialize, Serialize};

/// Counts of the unambiguous nucleotides in a sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NucleotideCounts {
    pub a: u64,
    pub c: u64,
    pub g: u64,
    /// Thymine, with uracil folded in
    pub t: u64,
}

impl NucleotideCounts {
    /// Count A, C, G and T/U in a sequence, ignoring case.
    ///
    /// Ambiguous and degenerate bases (N, R, Y, ...) and gap characters are
    /// not counted.
    #[must_use]
    pub fn from_sequence(sequence: &[u8]) -> Self {
        let mut counts = Self::default();
        for base in sequence {
            match base.to_ascii_uppercase() {
                b'A' => counts.a += 1,
                b'C' => counts.c += 1,
                b'G' => counts.g += 1,
                b'T' | b'U' => counts.t += 1,
                _ => {}
            }
        }
        counts
    }

    /// Number of called (unambiguous) bases
    #[must_use]
    pub fn called(&self) -> u64 {
        self.a + self.c + self.g + self.t
    }

    /// Fraction of called bases that are G or C, or `None` when nothing was called
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn gc_fraction(&self) -> Option<f64> {
        match self.called() {
            0 => None,
            called => Some((self.g + self.c) as f64 / called as f64),
        }
    }
}

impl std::ops::AddAssign for NucleotideCounts {
    fn add_assign(&mut self, other: Self) {
        self.a += other.a;
        self.c += other.c;
        self.g += other.g;
        self.t += other.t;
    }
}

/// A single contig of a genome assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contig {
    /// Sequence name (first token of the FASTA header)
    pub name: String,

    /// Raw bases as read from the FASTA file
    pub sequence: Vec<u8>,
}

impl Contig {
    pub fn new(name: impl Into<String>, sequence: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into(),
        }
    }

    pub fn length(&self) -> u64 {
        self.sequence.len() as u64
    }

    #[must_use]
    pub fn nucleotide_counts(&self) -> NucleotideCounts {
        NucleotideCounts::from_sequence(&self.sequence)
    }
}
