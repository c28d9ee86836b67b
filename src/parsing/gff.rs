//! Parser for GFF3 gene annotations.
//!
//! Only the columns needed for plotting are kept: seqid, type, start, end,
//! strand and the `product` attribute. Prokka appends the genome sequence after
//! a `##FASTA` directive; parsing stops there.

use std::io::BufRead;
use std::path::Path;

use crate::core::feature::{Feature, FeatureKind, Strand};
use crate::parsing::{open_text, ParseError};

/// Number of tab-separated columns in a GFF3 data line
const GFF_COLUMNS: usize = 9;

/// Parse a GFF3 file (optionally gzipped) into features
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` if a data line is malformed.
pub fn parse_gff_file(path: &Path) -> Result<Vec<Feature>, ParseError> {
    parse_gff_reader(open_text(path)?)
}

/// Parse GFF3 from any buffered reader
///
/// # Errors
///
/// Returns `ParseError::Io` on read failure, or `ParseError::InvalidFormat`
/// if a data line has the wrong number of columns or invalid coordinates.
pub fn parse_gff_reader<R: BufRead>(reader: R) -> Result<Vec<Feature>, ParseError> {
    let mut features = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if line.starts_with("##FASTA") {
            break;
        }

        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        features.push(parse_gff_line(line, line_num)?);
    }

    Ok(features)
}

fn parse_gff_line(line: &str, line_num: usize) -> Result<Feature, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != GFF_COLUMNS {
        return Err(ParseError::InvalidFormat(format!(
            "GFF line {line_num} has {} columns, expected {GFF_COLUMNS}",
            fields.len()
        )));
    }

    let start = parse_coordinate(fields[3], "start", line_num)?;
    let end = parse_coordinate(fields[4], "end", line_num)?;
    if end < start {
        return Err(ParseError::InvalidFormat(format!(
            "GFF line {line_num} has end ({end}) before start ({start})"
        )));
    }

    let mut feature = Feature::new(fields[0], start, end, FeatureKind::parse(fields[2]));
    feature.strand = Strand::parse(fields[6]);
    feature.product = attribute(fields[8], "product");

    Ok(feature)
}

fn parse_coordinate(field: &str, column: &str, line_num: usize) -> Result<u64, ParseError> {
    match field.trim().parse::<u64>() {
        Ok(pos) if pos > 0 => Ok(pos),
        _ => Err(ParseError::InvalidFormat(format!(
            "Invalid {column} on GFF line {line_num}: '{field}'"
        ))),
    }
}

/// Look up an attribute value in a GFF3 column 9 string and percent-decode it
fn attribute(attributes: &str, key: &str) -> Option<String> {
    attributes
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| percent_decode(v))
}

/// Decode `%XX` escapes as used by GFF3 for reserved characters.
/// Malformed escapes are kept verbatim.
fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                decoded.push(byte);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}
