//! Genome summary statistics written next to the plot.
//!
//! Two renderings of the same [`GenomeStats`]:
//!
//! - `genome_stats.tsv`: sectioned `key = value` text
//!   (`[Assembly Statistics]`, `[rRNA Statistics]`, `[tRNA Statistics]`)
//! - `genome_stats.json`: the same values as JSON, with a creation timestamp

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::tracks::cds::ProteinCounts;

pub const STATS_TSV: &str = "genome_stats.tsv";
pub const STATS_JSON: &str = "genome_stats.json";

#[derive(Debug, Clone, Serialize)]
pub struct AssemblyStats {
    pub genome_size: u64,
    pub num_contigs: usize,
    pub n50: u64,
    pub l50: usize,
    /// Mean GC content, in percent
    pub gc: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_coverage: Option<f64>,
    pub proteins: ProteinCounts,
    pub num_filtered_contigs: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrnaStats {
    pub total: usize,
    pub unique: usize,
    pub counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenomeStats {
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genome_file: Option<String>,
    pub assembly: AssemblyStats,
    pub rrna: BTreeMap<String, usize>,
    pub trna: TrnaStats,
}

impl GenomeStats {
    #[must_use]
    pub fn new(
        genome_file: Option<String>,
        assembly: AssemblyStats,
        rrna: BTreeMap<String, usize>,
        trna: TrnaStats,
    ) -> Self {
        Self {
            created_at: chrono::Utc::now().to_rfc3339(),
            genome_file,
            assembly,
            rrna,
            trna,
        }
    }

    /// Sectioned text form
    pub fn to_tsv(&self) -> String {
        let a = &self.assembly;
        let mut lines = vec![
            "[Assembly Statistics]".to_string(),
            format!("Genome size = {}", a.genome_size),
            format!("No. contigs = {}", a.num_contigs),
            format!("N50 (contigs) = {}", a.n50),
            format!("L50 (contigs) = {}", a.l50),
            format!("GC = {:.3}", a.gc),
        ];
        if let Some(coverage) = a.mean_coverage {
            lines.push(format!("Coverage = {coverage:.3}"));
        }
        lines.push(format!("No. CDS = {}", a.proteins.total()));
        lines.push(format!("No. annotated proteins = {}", a.proteins.annotated));
        lines.push(format!("No. hypothetical proteins = {}", a.proteins.hypothetical));
        if a.num_filtered_contigs > 0 {
            lines.push(format!("No. filtered contigs = {}", a.num_filtered_contigs));
        }

        lines.push(String::new());
        lines.push("[rRNA Statistics]".to_string());
        lines.extend(self.rrna.iter().map(|(product, count)| format!("{product} = {count}")));

        lines.push(String::new());
        lines.push("[tRNA Statistics]".to_string());
        lines.push(format!("No. tRNAs = {}", self.trna.total));
        lines.push(format!("No. unique tRNAs = {}", self.trna.unique));
        lines.extend(
            self.trna
                .counts
                .iter()
                .map(|(product, count)| format!("{product} = {count}")),
        );

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Write `genome_stats.tsv` and `genome_stats.json` into `output_dir`
    ///
    /// # Errors
    ///
    /// Returns an IO error if either file cannot be written.
    pub fn write(&self, output_dir: &Path) -> std::io::Result<()> {
        std::fs::write(output_dir.join(STATS_TSV), self.to_tsv())?;

        let file = std::fs::File::create(output_dir.join(STATS_JSON))?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
