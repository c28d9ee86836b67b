use std::collections::BTreeMap;
use std::path::Path;

use tracing::warn;

use crate::core::feature::{Feature, FeatureKind, RrnaType};
use crate::style::plot_style::RrnaStyle;
use crate::tracks::karyotype::Karyotype;
use crate::tracks::{write_records, MarkerRecord};

/// Positions of 5S, 16S and 23S rRNA genes
#[derive(Debug, Clone, Default)]
pub struct RrnaTrack {
    /// Number of rRNA genes per product, sorted by product
    pub counts: BTreeMap<String, usize>,

    pub markers: Vec<MarkerRecord>,
}

impl RrnaTrack {
    #[must_use]
    pub fn build(features: &[Feature], karyotype: &Karyotype, style: &RrnaStyle) -> Self {
        let mut track = Self::default();

        for feature in features.iter().filter(|f| f.kind == FeatureKind::Rrna) {
            let Some(product) = &feature.product else {
                warn!(
                    "rRNA without product on {} at {}-{}",
                    feature.contig, feature.start, feature.end
                );
                continue;
            };

            *track.counts.entry(product.clone()).or_default() += 1;

            let Some(rrna) = RrnaType::from_product(product) else {
                warn!("Unknown rRNA product: {product}");
                continue;
            };

            if karyotype.is_displayed(&feature.contig) {
                let (symbol, color) = style.marker(rrna);
                track.markers.push(MarkerRecord {
                    contig: feature.contig.clone(),
                    start: feature.start,
                    end: feature.end,
                    symbol: symbol.to_string(),
                    color: color.to_string(),
                });
            }
        }

        track
    }

    /// Number of genes of each subunit, in 5S, 16S, 23S order
    pub fn subunit_counts(&self) -> [(RrnaType, usize); 3] {
        let mut counts = [
            (RrnaType::FiveS, 0),
            (RrnaType::SixteenS, 0),
            (RrnaType::TwentyThreeS, 0),
        ];
        for (product, count) in &self.counts {
            if let Some(rrna) = RrnaType::from_product(product) {
                if let Some(slot) = counts.iter_mut().find(|(t, _)| *t == rrna) {
                    slot.1 += count;
                }
            }
        }
        counts
    }

    /// # Errors
    ///
    /// Returns an IO error if the file cannot be written.
    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        write_records(path, &self.markers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contig::Contig;
    use crate::core::genome::Genome;
    use crate::style::plot_style::ContigStyle;
    use crate::tracks::karyotype::KaryotypeParams;

    fn karyotype() -> Karyotype {
        let genome = Genome::new(vec![
            Contig::new("c1", vec![b'A'; 5000]),
            Contig::new("c2", vec![b'A'; 10]),
        ]);
        Karyotype::build(
            &genome,
            KaryotypeParams {
                completeness: 100.0,
                min_contig_len: 100,
                max_contigs: 100,
            },
            &ContigStyle::default(),
        )
    }

    fn rrna(contig: &str, start: u64, end: u64, product: Option<&str>) -> Feature {
        let feature = Feature::new(contig, start, end, FeatureKind::Rrna);
        match product {
            Some(p) => feature.with_product(p),
            None => feature,
        }
    }

    #[test]
    fn test_rrna_markers_and_counts() {
        let features = vec![
            rrna("c1", 10, 1500, Some("16S ribosomal RNA")),
            rrna("c1", 1600, 4500, Some("23S ribosomal RNA")),
            rrna("c1", 4600, 4710, Some("5S ribosomal RNA")),
            Feature::new("c1", 1, 300, FeatureKind::Cds).with_product("16S not an rRNA"),
        ];
        let track = RrnaTrack::build(&features, &karyotype(), &RrnaStyle::default());

        assert_eq!(track.markers.len(), 3);
        assert_eq!(track.markers[0].to_string(), "c1 10 1500 I color=dgrey");
        assert_eq!(track.markers[1].symbol, "O");
        assert_eq!(track.markers[2].symbol, "C");
        assert_eq!(track.counts.len(), 3);
        assert_eq!(
            track.subunit_counts(),
            [
                (RrnaType::FiveS, 1),
                (RrnaType::SixteenS, 1),
                (RrnaType::TwentyThreeS, 1)
            ]
        );
    }

    #[test]
    fn test_unknown_and_missing_products() {
        let features = vec![
            rrna("c1", 10, 1500, Some("18S ribosomal RNA")),
            rrna("c1", 2000, 3000, None),
        ];
        let track = RrnaTrack::build(&features, &karyotype(), &RrnaStyle::default());

        // unknown products are counted but not drawn; missing products neither
        assert!(track.markers.is_empty());
        assert_eq!(track.counts.get("18S ribosomal RNA"), Some(&1));
        assert_eq!(track.counts.len(), 1);
    }

    #[test]
    fn test_hidden_contig_counted_not_drawn() {
        let features = vec![rrna("c2", 1, 10, Some("5S ribosomal RNA"))];
        let track = RrnaTrack::build(&features, &karyotype(), &RrnaStyle::default());

        assert!(track.markers.is_empty());
        assert_eq!(track.subunit_counts()[0], (RrnaType::FiveS, 1));
    }
}
