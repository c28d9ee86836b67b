//! Centralized validation and helper functions.

use std::path::{Path, PathBuf};

/// Maximum number of contigs allowed in a single genome (memory guard)
pub const MAX_CONTIGS: usize = 100_000;

/// Validation error types for user-supplied parameters
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Completeness must be in (0, 100], got {0}")]
    InvalidCompleteness(f64),
    #[error("Window size for {0} must be greater than zero")]
    ZeroWindowSize(&'static str),
    #[error("Track range for {track} is empty: min ({min}) must be less than max ({max})")]
    EmptyRange { track: &'static str, min: f64, max: f64 },
    #[error("Input file not found: {0}")]
    MissingInput(PathBuf),
}

/// Check if adding another contig would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new contig.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```ignore
/// if check_contig_limit(contigs.len()).is_some() {
///     return Err(...);
/// }
/// contigs.push(new_contig); // Safe to add
/// ```
#[must_use]
pub fn check_contig_limit(count: usize) -> Option<String> {
    if count >= MAX_CONTIGS {
        Some(format!(
            "Too many contigs: adding another would exceed maximum of {MAX_CONTIGS}"
        ))
    } else {
        None
    }
}

/// Validate a genome completeness estimate given as a percentage.
///
/// # Examples
///
/// ```
/// use circos_mag::utils::validation::validate_completeness;
///
/// assert!(validate_completeness(92.5).is_ok());
/// assert!(validate_completeness(100.0).is_ok());
/// assert!(validate_completeness(0.0).is_err());
/// assert!(validate_completeness(101.0).is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::InvalidCompleteness` when the value is not in (0, 100].
pub fn validate_completeness(completeness: f64) -> Result<f64, ValidationError> {
    if completeness.is_finite() && completeness > 0.0 && completeness <= 100.0 {
        Ok(completeness)
    } else {
        Err(ValidationError::InvalidCompleteness(completeness))
    }
}

/// # Errors
///
/// Returns `ValidationError::ZeroWindowSize` for a zero window.
pub fn validate_window_size(track: &'static str, size: u64) -> Result<u64, ValidationError> {
    if size == 0 {
        Err(ValidationError::ZeroWindowSize(track))
    } else {
        Ok(size)
    }
}

/// # Errors
///
/// Returns `ValidationError::EmptyRange` when `min >= max`.
pub fn validate_range(track: &'static str, min: f64, max: f64) -> Result<(), ValidationError> {
    if min < max {
        Ok(())
    } else {
        Err(ValidationError::EmptyRange { track, min, max })
    }
}

/// # Errors
///
/// Returns `ValidationError::MissingInput` if the path is not an existing file.
pub fn validate_input_file(path: &Path) -> Result<(), ValidationError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ValidationError::MissingInput(path.to_path_buf()))
    }
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
#[must_use]
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_contig_limit() {
        assert!(check_contig_limit(0).is_none());
        assert!(check_contig_limit(MAX_CONTIGS - 1).is_none());
        assert!(check_contig_limit(MAX_CONTIGS).is_some());
    }

    #[test]
    fn test_validate_completeness() {
        assert!(validate_completeness(50.0).is_ok());
        assert!(validate_completeness(-1.0).is_err());
        assert!(validate_completeness(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_window_size() {
        assert_eq!(validate_window_size("gc", 500).unwrap(), 500);
        assert!(matches!(
            validate_window_size("coverage", 0),
            Err(ValidationError::ZeroWindowSize("coverage"))
        ));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("gc", -15.0, 15.0).is_ok());
        assert!(validate_range("gc", 5.0, 5.0).is_err());
    }

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("genome.fna.gz")));
        assert!(is_gzipped(Path::new("depth.TSV.GZ")));
        assert!(is_gzipped(Path::new("genome.fa.bgz")));
        assert!(!is_gzipped(Path::new("genome.fna")));
    }
}
