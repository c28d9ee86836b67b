use serde::Serialize;
use tracing::warn;

use crate::core::feature::{Feature, FeatureKind};

/// Products used for proteins without a functional annotation
pub const HYPOTHETICAL_PROTEINS: &[&str] = &["hypothetical protein"];

/// CDS tallies by annotation status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProteinCounts {
    pub annotated: usize,
    pub hypothetical: usize,
}

impl ProteinCounts {
    #[must_use]
    pub fn from_features(features: &[Feature]) -> Self {
        let mut counts = Self::default();

        for feature in features.iter().filter(|f| f.kind == FeatureKind::Cds) {
            match feature.product.as_deref() {
                None => warn!(
                    "CDS without product on {} at {}-{}",
                    feature.contig, feature.start, feature.end
                ),
                Some(product) if HYPOTHETICAL_PROTEINS.contains(&product) => {
                    counts.hypothetical += 1;
                }
                Some(_) => counts.annotated += 1,
            }
        }

        counts
    }

    /// Coding sequences with a product
    pub fn total(&self) -> usize {
        self.annotated + self.hypothetical
    }
}
