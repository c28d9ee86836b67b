//! Core data types for describing a genome and its annotations.
//!
//! - [`Contig`]: a named sequence from the genome FASTA
//! - [`Genome`]: all contigs of an assembly, with size, GC and N50/L50 helpers
//! - [`Feature`]: a gene annotation (CDS, rRNA, tRNA) read from GFF
//! - [`NucleotideCounts`]: A/C/G/T tallies used for GC content
//!
//! Everything here is loaded once per run and never mutated afterwards.
//!
//! [`Contig`]: contig::Contig
//! [`Genome`]: genome::Genome
//! [`Feature`]: feature::Feature
//! [`NucleotideCounts`]: contig::NucleotideCounts

pub mod contig;
pub mod feature;
pub mod genome;
