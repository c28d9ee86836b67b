use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::feature::RrnaType;
use crate::utils::validation::{validate_range, validate_window_size, ValidationError};

/// Default window size, in bases, for the GC and coverage tracks
pub const DEFAULT_WINDOW_SIZE: u64 = 1000;

#[derive(Error, Debug)]
pub enum StyleError {
    #[error("Failed to read plot style: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse plot style: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write plot style: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid plot style: {0}")]
    Invalid(#[from] ValidationError),
}

/// Which ideograms get a background band behind a track (Circos `show`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    /// Every ideogram
    Yes,
    /// None
    No,
    /// Only ideograms that carry data for the track
    #[default]
    Data,
}

impl std::fmt::Display for BackgroundMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "yes"),
            Self::No => write!(f, "no"),
            Self::Data => write!(f, "data"),
        }
    }
}

/// Colors of the ideograms in the karyotype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContigStyle {
    /// Displayed contigs
    pub color: String,
    /// The ideogram collecting contigs that were filtered out
    pub filtered_color: String,
    /// The ideogram standing in for DNA missing from an incomplete genome
    pub missing_color: String,
}

impl Default for ContigStyle {
    fn default() -> Self {
        Self {
            color: "green".to_string(),
            filtered_color: "grey".to_string(),
            missing_color: "red".to_string(),
        }
    }
}

/// Style of a histogram track showing deviation from a genome-wide mean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationStyle {
    pub pos_deviation_color: String,
    pub neg_deviation_color: String,
    pub thickness: String,
    pub min: f64,
    pub max: f64,
    pub show_background: BackgroundMode,
    pub window_size: u64,
}

impl DeviationStyle {
    /// Defaults for the GC track (deviation in percentage points)
    pub fn gc() -> Self {
        Self {
            pos_deviation_color: "dorange".to_string(),
            neg_deviation_color: "dblue".to_string(),
            thickness: "1p".to_string(),
            min: -15.0,
            max: 15.0,
            show_background: BackgroundMode::Data,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }

    /// Defaults for the coverage track (deviation in percent of the mean)
    pub fn coverage() -> Self {
        Self {
            min: -300.0,
            max: 300.0,
            ..Self::gc()
        }
    }

    /// Color for a deviation value: positive (or zero) vs negative
    pub fn color_for(&self, delta: f64) -> &str {
        if delta < 0.0 {
            &self.neg_deviation_color
        } else {
            &self.pos_deviation_color
        }
    }
}

/// Partially specified deviation section as it appears in a style file.
/// The GC and coverage sections share keys but not defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DeviationOverrides {
    pos_deviation_color: Option<String>,
    neg_deviation_color: Option<String>,
    thickness: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    show_background: Option<BackgroundMode>,
    window_size: Option<u64>,
}

impl DeviationOverrides {
    fn apply(self, base: DeviationStyle) -> DeviationStyle {
        DeviationStyle {
            pos_deviation_color: self.pos_deviation_color.unwrap_or(base.pos_deviation_color),
            neg_deviation_color: self.neg_deviation_color.unwrap_or(base.neg_deviation_color),
            thickness: self.thickness.unwrap_or(base.thickness),
            min: self.min.unwrap_or(base.min),
            max: self.max.unwrap_or(base.max),
            show_background: self.show_background.unwrap_or(base.show_background),
            window_size: self.window_size.unwrap_or(base.window_size),
        }
    }
}

/// Symbols marking 5S, 16S and 23S rRNA genes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RrnaStyle {
    /// Symbol (label) size
    pub size: String,
    #[serde(rename = "5S_symbol")]
    pub symbol_5s: String,
    #[serde(rename = "5S_color")]
    pub color_5s: String,
    #[serde(rename = "16S_symbol")]
    pub symbol_16s: String,
    #[serde(rename = "16S_color")]
    pub color_16s: String,
    #[serde(rename = "23S_symbol")]
    pub symbol_23s: String,
    #[serde(rename = "23S_color")]
    pub color_23s: String,
    pub show_background: BackgroundMode,
}

impl Default for RrnaStyle {
    fn default() -> Self {
        Self {
            size: "32p".to_string(),
            symbol_5s: "C".to_string(),
            color_5s: "dgrey".to_string(),
            symbol_16s: "I".to_string(),
            color_16s: "dgrey".to_string(),
            symbol_23s: "O".to_string(),
            color_23s: "dgrey".to_string(),
            show_background: BackgroundMode::Yes,
        }
    }
}

impl RrnaStyle {
    /// Symbol and color for an rRNA subunit
    pub fn marker(&self, rrna: RrnaType) -> (&str, &str) {
        match rrna {
            RrnaType::FiveS => (&self.symbol_5s, &self.color_5s),
            RrnaType::SixteenS => (&self.symbol_16s, &self.color_16s),
            RrnaType::TwentyThreeS => (&self.symbol_23s, &self.color_23s),
        }
    }
}

/// Symbol marking tRNA genes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrnaStyle {
    pub size: String,
    pub color: String,
    pub symbol: String,
    pub show_background: BackgroundMode,
}

impl Default for TrnaStyle {
    fn default() -> Self {
        Self {
            size: "32p".to_string(),
            color: "dred".to_string(),
            symbol: "F".to_string(),
            show_background: BackgroundMode::Yes,
        }
    }
}

/// Complete plot style
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotStyle {
    pub contigs: ContigStyle,
    pub gc: DeviationStyle,
    pub rrna: RrnaStyle,
    pub trna: TrnaStyle,
    pub coverage: DeviationStyle,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            contigs: ContigStyle::default(),
            gc: DeviationStyle::gc(),
            rrna: RrnaStyle::default(),
            trna: TrnaStyle::default(),
            coverage: DeviationStyle::coverage(),
        }
    }
}

/// On-disk layout of a style file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct StyleFile {
    contigs: ContigStyle,
    gc: DeviationOverrides,
    rrna: RrnaStyle,
    trna: TrnaStyle,
    coverage: DeviationOverrides,
}

impl From<StyleFile> for PlotStyle {
    fn from(file: StyleFile) -> Self {
        Self {
            contigs: file.contigs,
            gc: file.gc.apply(DeviationStyle::gc()),
            rrna: file.rrna,
            trna: file.trna,
            coverage: file.coverage.apply(DeviationStyle::coverage()),
        }
    }
}

impl PlotStyle {
    /// Load a style from a TOML file, filling absent keys with defaults
    ///
    /// # Errors
    ///
    /// Returns `StyleError::Io` if the file cannot be read, `StyleError::Parse`
    /// for invalid TOML or unknown keys, or `StyleError::Invalid` if a value is
    /// out of range.
    pub fn load_from_file(path: &Path) -> Result<Self, StyleError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a style from TOML text
    ///
    /// # Errors
    ///
    /// Returns `StyleError::Parse` or `StyleError::Invalid`.
    pub fn from_toml(text: &str) -> Result<Self, StyleError> {
        let file: StyleFile = toml::from_str(text)?;
        let style = Self::from(file);
        style.validate()?;
        Ok(style)
    }

    /// Render the style as TOML
    ///
    /// # Errors
    ///
    /// Returns `StyleError::Serialize` if serialization fails.
    pub fn to_toml(&self) -> Result<String, StyleError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// # Errors
    ///
    /// Returns `ValidationError` for an empty track range or a zero window size.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_range("gc", self.gc.min, self.gc.max)?;
        validate_range("coverage", self.coverage.min, self.coverage.max)?;
        validate_window_size("gc", self.gc.window_size)?;
        validate_window_size("coverage", self.coverage.window_size)?;
        Ok(())
    }
}
