//! Parsers for the genome, annotation and coverage inputs.
//!
//! This module provides parsers for:
//!
//! - **FASTA files**: genome contigs, read with noodles
//! - **GFF3 files**: gene annotations as written by Prokka (stops at `##FASTA`)
//! - **Coverage TSV files**: per-base depth as written by `samtools depth -a`
//!
//! Every parser accepts gzip-compressed input (`.gz` / `.bgz`).
//!
//! ## Example
//!
//! ```rust,no_run
//! use circos_mag::parsing::{fasta, gff};
//! use std::path::Path;
//!
//! let genome = fasta::parse_fasta_file(Path::new("mag.fna")).unwrap();
//! let features = gff::parse_gff_file(Path::new("mag.gff")).unwrap();
//! println!("{} contigs, {} features", genome.len(), features.len());
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

use crate::utils::validation::is_gzipped;

pub mod coverage;
pub mod fasta;
pub mod gff;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Duplicate contig name: {0}")]
    DuplicateContig(String),

    #[error("Contig name {0:?} is reserved for a plot ideogram")]
    ReservedContigName(String),

    #[error("Too many contigs: {0} exceeds maximum allowed (100000)")]
    TooManyContigs(usize),
}

/// Open a text file for buffered reading, transparently decompressing gzip/bgzip.
///
/// bgzip files are multi-member gzip streams, so a multi-member decoder is used.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_text(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    let file = File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
