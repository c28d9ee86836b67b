//! Parser for genome FASTA files using noodles.
//!
//! Reads every contig (name and bases) into memory.
//! Supports both uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna`, `.fas` (uncompressed)
//! - any of the above with `.gz` or `.bgz` appended

use std::collections::HashSet;
use std::ffi::OsStr;
use std::io::{BufRead, Write};
use std::path::Path;

use noodles::fasta;
use tracing::debug;

use crate::core::contig::Contig;
use crate::core::genome::Genome;
use crate::parsing::{open_text, ParseError};
use crate::tracks::karyotype::RESERVED_IDS;
use crate::utils::validation::check_contig_limit;

/// Bases per line when writing FASTA
const LINE_WIDTH: usize = 80;

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    let trimmed = path_str
        .strip_suffix(".gz")
        .or_else(|| path_str.strip_suffix(".bgz"))
        .unwrap_or(&path_str);

    matches!(
        Path::new(trimmed).extension().and_then(OsStr::to_str),
        Some("fa" | "fasta" | "fna" | "fas")
    )
}

/// Parse a FASTA file into a [`Genome`].
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, `ParseError::InvalidFormat` if no contigs are found,
/// `ParseError::DuplicateContig` if a name repeats,
/// `ParseError::ReservedContigName` if a contig is named like a pooled
/// ideogram, or `ParseError::TooManyContigs` if the limit is exceeded.
pub fn parse_fasta_file(path: &Path) -> Result<Genome, ParseError> {
    let reader = open_text(path)?;
    let mut fasta_reader = fasta::io::Reader::new(reader);

    let genome = parse_fasta_reader(&mut fasta_reader)?;
    debug!(
        "Read {} contigs ({} bp) from {}",
        genome.len(),
        genome.size(),
        path.display()
    );

    Ok(genome.with_source(path.display().to_string()))
}

/// Parse from a noodles FASTA reader
pub fn parse_fasta_reader<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Genome, ParseError> {
    let mut contigs = Vec::new();
    let mut seen = HashSet::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        // Check contig limit for memory protection
        if check_contig_limit(contigs.len()).is_some() {
            return Err(ParseError::TooManyContigs(contigs.len()));
        }

        let name = String::from_utf8_lossy(record.name()).to_string();
        if RESERVED_IDS.contains(&name.as_str()) {
            return Err(ParseError::ReservedContigName(name));
        }
        if !seen.insert(name.clone()) {
            return Err(ParseError::DuplicateContig(name));
        }

        let sequence = record.sequence().as_ref().to_vec();
        contigs.push(Contig::new(name, sequence));
    }

    if contigs.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(Genome::new(contigs))
}

/// Write the genome as uncompressed FASTA, wrapping sequences at 80 bases.
///
/// Used to hand a plain FASTA to tools that cannot read gzip input.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be written.
pub fn write_fasta_file(genome: &Genome, path: &Path) -> Result<(), ParseError> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);

    for contig in &genome.contigs {
        writeln!(writer, ">{}", contig.name)?;
        for chunk in contig.sequence.chunks(LINE_WIDTH) {
            writer.write_all(chunk)?;
            writer.write_all(b"\n")?;
        }
    }

    writer.flush()?;
    Ok(())
}
