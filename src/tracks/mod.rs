//! Circos data tracks computed from the genome, annotations and coverage.
//!
//! - [`karyotype`]: which contigs are drawn, plus synthetic `other` and
//!   `missing_dna` ideograms
//! - [`gc`]: GC deviation per window from the genome-wide mean
//! - [`coverage`]: percent deviation of window depth from the mean depth
//! - [`rrna`] / [`trna`]: gene positions drawn as symbols
//! - [`cds`]: annotated vs hypothetical protein counts (summary only)
//!
//! All tracks are written in the Circos data format: one record per line,
//! `chr start end value [options]`, space separated.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::utils::validation::ValidationError;

pub mod cds;
pub mod coverage;
pub mod gc;
pub mod karyotype;
pub mod rrna;
pub mod trna;

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("Coverage file has no positions on genome contigs")]
    NoCoverage,

    #[error("Mean coverage of the genome is zero; coverage deviation is undefined")]
    ZeroMeanDepth,
}

/// Window spans `[start, end)` over a contig of length `len`.
///
/// Windows step by `window_size` from 0. When the last window would run past
/// the contig end it is anchored to the end instead, so every window covers
/// exactly `window_size` bases. A contig no longer than one window yields a
/// single span over the whole contig.
pub fn window_spans(len: u64, window_size: u64) -> Vec<(u64, u64)> {
    if len == 0 || window_size == 0 {
        return Vec::new();
    }
    if len <= window_size {
        return vec![(0, len)];
    }

    let mut spans = Vec::with_capacity(len.div_ceil(window_size).try_into().unwrap_or(0));
    let mut start = 0;
    while start < len {
        let end = start + window_size;
        if end > len {
            spans.push((len - window_size, len));
        } else {
            spans.push((start, end));
        }
        start += window_size;
    }
    spans
}

/// A windowed deviation value with its fill color
#[derive(Debug, Clone, PartialEq)]
pub struct DeviationRecord {
    pub contig: String,
    pub start: u64,
    pub end: u64,
    pub delta: f64,
    pub color: String,
}

impl std::fmt::Display for DeviationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {:.4} fill_color={}",
            self.contig, self.start, self.end, self.delta, self.color
        )
    }
}

/// A symbol drawn at a gene position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRecord {
    pub contig: String,
    pub start: u64,
    pub end: u64,
    pub symbol: String,
    pub color: String,
}

impl std::fmt::Display for MarkerRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} color={}",
            self.contig, self.start, self.end, self.symbol, self.color
        )
    }
}

/// Write one record per line
///
/// # Errors
///
/// Returns an IO error if the file cannot be created or written.
pub fn write_records<T: std::fmt::Display>(path: &Path, records: &[T]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        writeln!(writer, "{record}")?;
    }
    writer.flush()
}
