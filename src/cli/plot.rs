//! Plot command - build the Circos inputs for a MAG and render the plot.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::{debug, info, warn};

use crate::circos::config::{
    CircosConfig, COVERAGE_DATA, GC_DATA, KARYOTYPE_DATA, RRNA_DATA, TRNA_DATA,
};
use crate::circos::runner::{find_executable, run_circos, run_prokka};
use crate::core::genome::Genome;
use crate::parsing::coverage::parse_coverage_file;
use crate::parsing::fasta::{is_fasta_file, parse_fasta_file, write_fasta_file};
use crate::parsing::gff::parse_gff_file;
use crate::style::PlotStyle;
use crate::summary::{AssemblyStats, GenomeStats, TrnaStats};
use crate::tracks::cds::ProteinCounts;
use crate::tracks::coverage::CoverageTrack;
use crate::tracks::gc::GcTrack;
use crate::tracks::karyotype::{Karyotype, KaryotypeParams};
use crate::tracks::rrna::RrnaTrack;
use crate::tracks::trna::TrnaTrack;
use crate::utils::validation::{is_gzipped, validate_completeness, validate_input_file};

/// Arguments for the plot command
#[derive(Args)]
pub struct PlotArgs {
    /// Genome to plot in FASTA format (may be gzipped)
    #[arg(long, required = true)]
    pub genome_file: PathBuf,

    /// Gene annotations in GFF3 format; genes are called with Prokka if not given
    #[arg(long)]
    pub gff_file: Option<PathBuf>,

    /// Per-base read coverage (contig, position, depth) as from `samtools depth -a`
    #[arg(long)]
    pub coverage_file: Option<PathBuf>,

    /// TOML file with plot style settings (see the `style` command)
    #[arg(long)]
    pub plot_style: Option<PathBuf>,

    /// Estimated completeness of the genome, in percent; missing DNA is drawn in red
    #[arg(long, default_value = "100")]
    pub completeness: f64,

    /// Minimum length of contigs drawn individually
    #[arg(long, default_value = "1")]
    pub min_contig_len: u64,

    /// Maximum number of contigs drawn individually
    #[arg(long, default_value = "10000")]
    pub max_contigs: usize,

    /// Window size for the GC track (overrides the plot style)
    #[arg(long)]
    pub gc_window_size: Option<u64>,

    /// Window size for the coverage track (overrides the plot style)
    #[arg(long)]
    pub cov_window_size: Option<u64>,

    /// Output directory
    #[arg(short, long, required = true)]
    pub output_dir: PathBuf,

    /// Circos executable
    #[arg(long, default_value = "circos")]
    pub circos_bin: String,

    /// Prokka executable
    #[arg(long, default_value = "prokka")]
    pub prokka_bin: String,

    /// CPUs for Prokka
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u16).range(1..))]
    pub cpus: u16,

    /// Write the Circos inputs but do not run Circos
    #[arg(long)]
    pub no_render: bool,

    /// Open the SVG plot when done
    #[arg(long)]
    pub open: bool,
}

/// Execute the plot command
///
/// # Errors
///
/// Returns an error if an input is missing or invalid, an output cannot be
/// written, or Circos or Prokka fails.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: PlotArgs) -> anyhow::Result<()> {
    let completeness = validate_completeness(args.completeness)?;
    validate_input_file(&args.genome_file)?;
    for path in [&args.gff_file, &args.coverage_file, &args.plot_style]
        .into_iter()
        .flatten()
    {
        validate_input_file(path)?;
    }

    let style = load_style(&args)?;

    // Fail before any work if Circos is needed but absent
    let circos = if args.no_render {
        None
    } else {
        Some(find_executable(&args.circos_bin)?)
    };

    let circos_dir = args.output_dir.join("circos");
    std::fs::create_dir_all(&circos_dir)
        .with_context(|| format!("Failed to create {}", circos_dir.display()))?;

    if !is_fasta_file(&args.genome_file) {
        warn!(
            "Genome file does not have a FASTA extension: {}",
            args.genome_file.display()
        );
    }
    let genome = parse_fasta_file(&args.genome_file)
        .with_context(|| format!("Failed to read genome {}", args.genome_file.display()))?;

    let gff_file = match &args.gff_file {
        Some(path) => path.clone(),
        None => annotate(&args, &genome)?,
    };
    let features = parse_gff_file(&gff_file)
        .with_context(|| format!("Failed to read annotations {}", gff_file.display()))?;

    let (n50, l50) = genome.n50_l50().context("Genome has no contigs")?;

    info!("Creating karyotype for MAG:");
    let karyotype = Karyotype::build(
        &genome,
        KaryotypeParams {
            completeness,
            min_contig_len: args.min_contig_len,
            max_contigs: args.max_contigs,
        },
        &style.contigs,
    );
    let proteins = ProteinCounts::from_features(&features);
    info!(" - genome size = {}", genome.size());
    info!(" - contigs = {}", genome.len());
    info!(" - N50 = {n50}");
    info!(" - L50 = {l50}");
    info!(" - annotated proteins = {}", proteins.annotated);
    info!(" - hypothetical proteins = {}", proteins.hypothetical);
    if karyotype.filtered_contigs > 0 {
        info!(" - number filtered contigs = {}", karyotype.filtered_contigs);
    }
    if karyotype.missing_bases > 0 {
        info!(" - missing DNA = {} bp", karyotype.missing_bases);
    }
    karyotype.write(&circos_dir.join(KARYOTYPE_DATA))?;

    info!("Calculating GC content across contigs:");
    let gc = GcTrack::build(&genome, &karyotype, &style.gc)?;
    info!(" - mean GC = {:.1}%", gc.mean_gc);
    gc.write(&circos_dir.join(GC_DATA))?;

    info!("Determining position of rRNA genes:");
    let rrna = RrnaTrack::build(&features, &karyotype, &style.rrna);
    for (product, count) in &rrna.counts {
        info!(" - {product} = {count}");
    }
    for (subunit, count) in rrna.subunit_counts() {
        debug!(" - {subunit} rRNA genes = {count}");
    }
    rrna.write(&circos_dir.join(RRNA_DATA))?;

    info!("Determining position of tRNA genes:");
    let trna = TrnaTrack::build(&features, &karyotype, &style.trna);
    for (product, count) in &trna.counts {
        info!(" - {product} = {count}");
    }
    let amino_acids = trna.amino_acids().len();
    info!(
        " - identified {} tRNAs for {} amino acids",
        trna.total(),
        amino_acids
    );
    trna.write(&circos_dir.join(TRNA_DATA))?;

    let coverage = match &args.coverage_file {
        Some(path) => {
            info!("Calculating coverage across contigs:");
            let profile = parse_coverage_file(path, &genome)
                .with_context(|| format!("Failed to read coverage {}", path.display()))?;
            let track = CoverageTrack::build(&genome, &profile, &karyotype, &style.coverage)?;
            info!(" - mean coverage = {:.1}", track.mean_depth);
            for (contig, depth) in &track.contig_depths {
                debug!(" - {contig}: mean coverage = {depth:.1}");
            }
            track.write(&circos_dir.join(COVERAGE_DATA))?;
            Some(track)
        }
        None => None,
    };

    info!("Writing Circos configuration files.");
    CircosConfig::new(&style, &karyotype, coverage.is_some()).write(&circos_dir)?;

    let stats = GenomeStats::new(
        genome.source.clone(),
        AssemblyStats {
            genome_size: genome.size(),
            num_contigs: genome.len(),
            n50,
            l50,
            gc: gc.mean_gc,
            mean_coverage: coverage.as_ref().map(|c| c.mean_depth),
            proteins,
            num_filtered_contigs: karyotype.filtered_contigs,
        },
        rrna.counts,
        TrnaStats {
            total: trna.total(),
            unique: amino_acids,
            counts: trna.counts,
        },
    );
    stats.write(&args.output_dir).with_context(|| {
        format!(
            "Failed to write genome statistics to {}",
            args.output_dir.display()
        )
    })?;

    let Some(circos) = circos else {
        info!("Circos inputs written to {}", circos_dir.display());
        return Ok(());
    };

    info!("Creating Circos plot.");
    let images = run_circos(&circos, &circos_dir, &args.output_dir)?;
    for image in &images {
        info!("Wrote {}", image.display());
    }

    if args.open {
        if let Some(svg) = images.iter().find(|p| p.extension().is_some_and(|e| e == "svg")) {
            if let Err(e) = open::that(svg) {
                warn!("Could not open {}: {e}", svg.display());
            }
        }
    }

    Ok(())
}

fn load_style(args: &PlotArgs) -> anyhow::Result<PlotStyle> {
    let mut style = match &args.plot_style {
        Some(path) => PlotStyle::load_from_file(path)
            .with_context(|| format!("Failed to load plot style {}", path.display()))?,
        None => PlotStyle::default(),
    };

    if let Some(size) = args.gc_window_size {
        style.gc.window_size = size;
    }
    if let Some(size) = args.cov_window_size {
        style.coverage.window_size = size;
    }
    style.validate()?;

    Ok(style)
}

/// Call genes with Prokka and return the GFF it produced
fn annotate(args: &PlotArgs, genome: &Genome) -> anyhow::Result<PathBuf> {
    let prokka = find_executable(&args.prokka_bin)?;
    let prokka_dir = args.output_dir.join("prokka");

    info!("Annotating genome with Prokka.");
    let input = if is_gzipped(&args.genome_file) {
        let plain = args.output_dir.join("prokka_input.fna");
        write_fasta_file(genome, &plain)
            .with_context(|| format!("Failed to write {}", plain.display()))?;
        plain
    } else {
        args.genome_file.clone()
    };

    let gff = run_prokka(&prokka, &input, &prokka_dir, usize::from(args.cpus))?;
    info!(" - annotations written to {}", display_relative(&gff, &args.output_dir));
    Ok(gff)
}

fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
