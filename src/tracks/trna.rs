use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::core::feature::{Feature, FeatureKind};
use crate::style::plot_style::TrnaStyle;
use crate::tracks::karyotype::Karyotype;
use crate::tracks::{write_records, MarkerRecord};

/// Positions of tRNA genes
#[derive(Debug, Clone, Default)]
pub struct TrnaTrack {
    /// Number of tRNA genes per product (e.g. `tRNA-Lys(ttt)`), sorted by product
    pub counts: BTreeMap<String, usize>,

    pub markers: Vec<MarkerRecord>,
}

impl TrnaTrack {
    #[must_use]
    pub fn build(features: &[Feature], karyotype: &Karyotype, style: &TrnaStyle) -> Self {
        let mut track = Self::default();

        for feature in features.iter().filter(|f| f.kind == FeatureKind::Trna) {
            if let Some(product) = &feature.product {
                *track.counts.entry(product.clone()).or_default() += 1;
            }

            if karyotype.is_displayed(&feature.contig) {
                track.markers.push(MarkerRecord {
                    contig: feature.contig.clone(),
                    start: feature.start,
                    end: feature.end,
                    symbol: style.symbol.clone(),
                    color: style.color.clone(),
                });
            }
        }

        track
    }

    /// Total tRNA genes with a product
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Distinct tRNA types, i.e. the product without its anticodon
    /// (`tRNA-Lys(ttt)` and `tRNA-Lys(ctt)` are both `tRNA-Lys`)
    pub fn amino_acids(&self) -> BTreeSet<&str> {
        self.counts
            .keys()
            .map(|product| product.split('(').next().unwrap_or(product).trim())
            .collect()
    }

    /// # Errors
    ///
    /// Returns an IO error if the file cannot be written.
    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        write_records(path, &self.markers)
    }
}
