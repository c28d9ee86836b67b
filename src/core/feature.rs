use serde::{Deserialize, Serialize};

/// Strand of a gene feature (GFF column 7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Strand {
    Forward,
    Reverse,
    #[default]
    Unknown,
}

impl Strand {
    pub fn parse(s: &str) -> Self {
        match s {
            "+" => Strand::Forward,
            "-" => Strand::Reverse,
            _ => Strand::Unknown,
        }
    }
}

/// Feature type (GFF column 3), restricted to the types that are plotted or counted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    Cds,
    Rrna,
    Trna,
    Other(String),
}

impl FeatureKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "CDS" => FeatureKind::Cds,
            "rRNA" => FeatureKind::Rrna,
            "tRNA" => FeatureKind::Trna,
            other => FeatureKind::Other(other.to_string()),
        }
    }
}

/// Ribosomal RNA subunit, classified from a product string such as
/// "16S ribosomal RNA"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RrnaType {
    #[serde(rename = "5S")]
    FiveS,
    #[serde(rename = "16S")]
    SixteenS,
    #[serde(rename = "23S")]
    TwentyThreeS,
}

impl RrnaType {
    /// Classify a product by its prefix. Returns `None` for anything other than
    /// 5S, 16S or 23S (e.g. 18S from a eukaryotic annotation).
    pub fn from_product(product: &str) -> Option<Self> {
        if product.starts_with("5S") {
            Some(RrnaType::FiveS)
        } else if product.starts_with("16S") {
            Some(RrnaType::SixteenS)
        } else if product.starts_with("23S") {
            Some(RrnaType::TwentyThreeS)
        } else {
            None
        }
    }
}

impl std::fmt::Display for RrnaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FiveS => write!(f, "5S"),
            Self::SixteenS => write!(f, "16S"),
            Self::TwentyThreeS => write!(f, "23S"),
        }
    }
}

/// A gene annotation from a GFF file.
///
/// Coordinates are kept as given: 1-based, inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    /// Contig the feature lies on (GFF column 1)
    pub contig: String,
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
    pub kind: FeatureKind,

    /// Value of the `product` attribute, percent-decoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
}

impl Feature {
    pub fn new(contig: impl Into<String>, start: u64, end: u64, kind: FeatureKind) -> Self {
        Self {
            contig: contig.into(),
            start,
            end,
            strand: Strand::Unknown,
            kind,
            product: None,
        }
    }

    #[must_use]
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rrna_from_product() {
        assert_eq!(
            RrnaType::from_product("16S ribosomal RNA"),
            Some(RrnaType::SixteenS)
        );
        assert_eq!(
            RrnaType::from_product("23S ribosomal RNA (partial)"),
            Some(RrnaType::TwentyThreeS)
        );
        assert_eq!(
            RrnaType::from_product("5S ribosomal RNA"),
            Some(RrnaType::FiveS)
        );
        assert_eq!(RrnaType::from_product("18S ribosomal RNA"), None);
        assert_eq!(RrnaType::from_product("ribosomal RNA"), None);
    }

    #[test]
    fn test_feature_kind_parse() {
        assert_eq!(FeatureKind::parse("CDS"), FeatureKind::Cds);
        assert_eq!(FeatureKind::parse("rRNA"), FeatureKind::Rrna);
        assert_eq!(FeatureKind::parse("tRNA"), FeatureKind::Trna);
        assert_eq!(
            FeatureKind::parse("tmRNA"),
            FeatureKind::Other("tmRNA".to_string())
        );
    }

    #[test]
    fn test_strand_parse() {
        assert_eq!(Strand::parse("-"), Strand::Reverse);
        assert_eq!(Strand::parse("."), Strand::Unknown);
    }
}
