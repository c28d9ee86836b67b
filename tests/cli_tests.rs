//! End-to-end tests driving the `circos-mag` binary.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use tempfile::TempDir;

const GFF: &str = "##gff-version 3
c1\tbarrnap\trRNA\t100\t1600\t.\t+\t.\tID=r1;product=16S ribosomal RNA
c1\tbarrnap\trRNA\t1700\t1815\t.\t+\t.\tID=r2;product=5S ribosomal RNA
c1\tAragorn\ttRNA\t2000\t2075\t.\t-\t.\tID=t1;product=tRNA-Lys(ttt)
c2\tAragorn\ttRNA\t10\t85\t.\t+\t.\tID=t2;product=tRNA-Gly(gcc)
c1\tProdigal\tCDS\t3000\t3900\t.\t+\t0\tID=p1;product=hypothetical protein
c1\tProdigal\tCDS\t4000\t4900\t.\t-\t0\tID=p2;product=DNA gyrase subunit B
##FASTA
>c1
ACGT
";

/// Input files for a two-contig MAG: c1 (6000 bp) and c2 (300 bp)
struct Inputs {
    dir: TempDir,
    genome: PathBuf,
    gff: PathBuf,
    coverage: PathBuf,
}

impl Inputs {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();

        let genome = dir.path().join("mag.fna");
        let c1 = "GGCCAATT".repeat(750);
        let c2 = "GCAT".repeat(75);
        fs::write(&genome, format!(">c1 first contig\n{c1}\n>c2\n{c2}\n")).unwrap();

        let gff = dir.path().join("mag.gff");
        fs::write(&gff, GFF).unwrap();

        let coverage = dir.path().join("mag.depth.tsv");
        let mut depth = String::new();
        for pos in 1..=6000 {
            depth.push_str(&format!("c1\t{pos}\t10\n"));
        }
        for pos in 1..=300 {
            depth.push_str(&format!("c2\t{pos}\t20\n"));
        }
        fs::write(&coverage, depth).unwrap();

        Self {
            dir,
            genome,
            gff,
            coverage,
        }
    }

    fn out(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    fn plot(&self) -> Command {
        let mut cmd = Command::cargo_bin("circos-mag").unwrap();
        cmd.arg("plot")
            .arg("--genome-file")
            .arg(&self.genome)
            .arg("-o")
            .arg(self.out());
        cmd
    }
}

#[cfg(unix)]
fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Write a gzipped copy of `path` next to it, with `.gz` appended
fn gzip(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap().to_os_string();
    name.push(".gz");
    let gz = path.with_file_name(name);

    let mut encoder = GzEncoder::new(fs::File::create(&gz).unwrap(), Compression::default());
    encoder.write_all(&fs::read(path).unwrap()).unwrap();
    encoder.finish().unwrap();
    gz
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

#[test]
fn test_plot_no_render_writes_inputs() {
    let inputs = Inputs::new();
    inputs
        .plot()
        .arg("--gff-file")
        .arg(&inputs.gff)
        .arg("--coverage-file")
        .arg(&inputs.coverage)
        .arg("--no-render")
        .assert()
        .success()
        .stderr(predicate::str::contains("mean GC = 50.0%"))
        .stderr(predicate::str::contains("identified 2 tRNAs for 2 amino acids"));

    let circos = inputs.out().join("circos");
    assert_eq!(
        read(&circos.join("karyotype.tsv")),
        "chr - c1 1 0 6000 green\nchr - c2 2 0 300 green\n"
    );

    let gc = read(&circos.join("gc.tsv"));
    assert_eq!(gc.lines().count(), 7);
    assert!(gc.starts_with("c1 0 1000 0.0000 fill_color=dorange\n"));

    let coverage = read(&circos.join("coverage.tsv"));
    assert!(coverage.contains("c2 0 300 "));

    assert_eq!(
        read(&circos.join("rrna.tsv")),
        "c1 100 1600 I color=dgrey\nc1 1700 1815 C color=dgrey\n"
    );
    assert_eq!(read(&circos.join("trna.tsv")).lines().count(), 2);

    for conf in [
        "circos.conf",
        "ideogram.conf",
        "ticks.conf",
        "gc.conf",
        "coverage.conf",
        "rrna.conf",
        "trna.conf",
    ] {
        assert!(circos.join(conf).exists(), "{conf} missing");
    }
    assert!(read(&circos.join("ticks.conf")).contains("chromosomes = -c2\n"));
    assert!(!inputs.out().join("circos.png").exists());

    let stats = read(&inputs.out().join("genome_stats.tsv"));
    assert!(stats.contains("Genome size = 6300\n"));
    assert!(stats.contains("No. contigs = 2\n"));
    assert!(stats.contains("N50 (contigs) = 6000\n"));
    assert!(stats.contains("Coverage = "));
    assert!(stats.contains("No. CDS = 2\n"));
    assert!(stats.contains("16S ribosomal RNA = 1\n"));
    assert!(stats.contains("No. unique tRNAs = 2\n"));

    let json: serde_json::Value =
        serde_json::from_str(&read(&inputs.out().join("genome_stats.json"))).unwrap();
    assert_eq!(json["assembly"]["num_contigs"], 2);
}

#[test]
fn test_plot_filters_and_missing_dna() {
    let inputs = Inputs::new();
    inputs
        .plot()
        .arg("--gff-file")
        .arg(&inputs.gff)
        .arg("--min-contig-len")
        .arg("500")
        .arg("--completeness")
        .arg("50")
        .arg("--no-render")
        .assert()
        .success();

    let circos = inputs.out().join("circos");
    assert_eq!(
        read(&circos.join("karyotype.tsv")),
        "chr - c1 1 0 6000 green\nchr - other other 0 300 grey\nchr - missing_dna missing 0 6300 red\n"
    );
    // tRNA on the filtered contig is counted but not drawn
    assert_eq!(read(&circos.join("trna.tsv")).lines().count(), 1);
    assert!(!circos.join("coverage.tsv").exists());
    assert!(!circos.join("coverage.conf").exists());

    let stats = read(&inputs.out().join("genome_stats.tsv"));
    assert!(stats.contains("No. filtered contigs = 1\n"));
    assert!(!stats.contains("Coverage"));
}

#[test]
fn test_plot_window_size_and_style() {
    let inputs = Inputs::new();
    let style = inputs.dir.path().join("style.toml");
    fs::write(&style, "[gc]\npos_deviation_color = \"vdgreen\"\nmin = -25\n").unwrap();

    inputs
        .plot()
        .arg("--gff-file")
        .arg(&inputs.gff)
        .arg("--plot-style")
        .arg(&style)
        .arg("--gc-window-size")
        .arg("3000")
        .arg("--no-render")
        .assert()
        .success();

    let circos = inputs.out().join("circos");
    let gc = read(&circos.join("gc.tsv"));
    // c1: two windows of 3000; c2: one window over the whole contig
    assert_eq!(gc.lines().count(), 3);
    assert!(gc.contains("fill_color=vdgreen"));
    assert!(read(&circos.join("gc.conf")).contains("min = -25\n"));
}

#[test]
fn test_invalid_completeness() {
    let inputs = Inputs::new();
    inputs
        .plot()
        .arg("--gff-file")
        .arg(&inputs.gff)
        .arg("--completeness")
        .arg("0")
        .arg("--no-render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Completeness must be in (0, 100]"));
}

#[test]
fn test_missing_genome_file() {
    let inputs = Inputs::new();
    Command::cargo_bin("circos-mag")
        .unwrap()
        .arg("plot")
        .arg("--genome-file")
        .arg(inputs.dir.path().join("absent.fna"))
        .arg("-o")
        .arg(inputs.out())
        .arg("--no-render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_invalid_plot_style() {
    let inputs = Inputs::new();
    let style = inputs.dir.path().join("style.toml");
    fs::write(&style, "[gc]\ncolour = \"red\"\n").unwrap();

    inputs
        .plot()
        .arg("--gff-file")
        .arg(&inputs.gff)
        .arg("--plot-style")
        .arg(&style)
        .arg("--no-render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load plot style"));
}

#[test]
fn test_circos_not_found() {
    let inputs = Inputs::new();
    inputs
        .plot()
        .arg("--gff-file")
        .arg(&inputs.gff)
        .arg("--circos-bin")
        .arg("circos-mag-test-no-such-circos")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not on the system path"));

    // nothing is written when Circos is missing
    assert!(!inputs.out().exists());
}

#[cfg(unix)]
#[test]
fn test_plot_with_circos() {
    let inputs = Inputs::new();
    let circos = script(
        inputs.dir.path(),
        "fake-circos",
        "test -f karyotype.tsv || exit 2\necho rendering plot\ntouch circos.png circos.svg",
    );

    inputs
        .plot()
        .arg("--gff-file")
        .arg(&inputs.gff)
        .arg("--circos-bin")
        .arg(&circos)
        .assert()
        .success()
        .stderr(predicate::str::contains("[Circos] rendering plot"));

    assert!(inputs.out().join("circos.png").exists());
    assert!(inputs.out().join("circos.svg").exists());
    assert!(!inputs.out().join("circos").join("circos.png").exists());
}

#[cfg(unix)]
#[test]
fn test_circos_failure() {
    let inputs = Inputs::new();
    let circos = script(inputs.dir.path(), "fake-circos", "echo bad config >&2\nexit 1");

    inputs
        .plot()
        .arg("--gff-file")
        .arg(&inputs.gff)
        .arg("--circos-bin")
        .arg(&circos)
        .assert()
        .failure()
        .stderr(predicate::str::contains("[Circos] bad config"))
        .stderr(predicate::str::contains("Circos exited with"));
}

#[cfg(unix)]
#[test]
fn test_prokka_when_no_gff() {
    let inputs = Inputs::new();
    // $2 is the --outdir value, the genome is the last argument
    let prokka = script(
        inputs.dir.path(),
        "fake-prokka",
        &format!(
            "mkdir -p \"$2\"\nfor last; do :; done\ntest -f \"$last\" || exit 2\ncp {} \"$2/prokka.gff\"",
            inputs.gff.display()
        ),
    );

    inputs
        .plot()
        .arg("--prokka-bin")
        .arg(&prokka)
        .arg("--no-render")
        .assert()
        .success();

    assert!(inputs.out().join("prokka").join("prokka.gff").exists());
    assert_eq!(
        read(&inputs.out().join("circos").join("rrna.tsv")).lines().count(),
        2
    );
}

#[test]
fn test_gzipped_annotations_and_coverage() {
    let inputs = Inputs::new();
    inputs
        .plot()
        .arg("--gff-file")
        .arg(gzip(&inputs.gff))
        .arg("--coverage-file")
        .arg(gzip(&inputs.coverage))
        .arg("--no-render")
        .assert()
        .success();

    let circos = inputs.out().join("circos");
    assert_eq!(read(&circos.join("rrna.tsv")).lines().count(), 2);
    assert_eq!(read(&circos.join("trna.tsv")).lines().count(), 2);
    assert!(read(&circos.join("coverage.tsv")).contains("c2 0 300 "));
    assert!(read(&inputs.out().join("genome_stats.tsv")).contains("Coverage = "));
}

#[test]
fn test_reserved_contig_name_rejected() {
    let inputs = Inputs::new();
    fs::write(&inputs.genome, ">other\nACGT\n>c2\nGGCC\n").unwrap();

    inputs
        .plot()
        .arg("--gff-file")
        .arg(&inputs.gff)
        .arg("--no-render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is reserved"));
}

#[cfg(unix)]
#[test]
fn test_prokka_gets_plain_copy_of_gzipped_genome() {
    let inputs = Inputs::new();
    let genome = gzip(&inputs.genome);
    let prokka = script(
        inputs.dir.path(),
        "fake-prokka",
        &format!(
            "mkdir -p \"$2\"\nfor last; do :; done\ncase \"$last\" in */prokka_input.fna) ;; *) exit 3;; esac\ngrep -q '^>c2$' \"$last\" || exit 2\ncp {} \"$2/prokka.gff\"",
            inputs.gff.display()
        ),
    );

    Command::cargo_bin("circos-mag")
        .unwrap()
        .arg("plot")
        .arg("--genome-file")
        .arg(&genome)
        .arg("-o")
        .arg(inputs.out())
        .arg("--prokka-bin")
        .arg(&prokka)
        .arg("--no-render")
        .assert()
        .success();

    assert!(inputs.out().join("prokka_input.fna").exists());
    assert_eq!(
        read(&inputs.out().join("circos").join("trna.tsv")).lines().count(),
        2
    );
}

#[cfg(unix)]
#[test]
fn test_relative_circos_bin() {
    let inputs = Inputs::new();
    fs::create_dir(inputs.dir.path().join("bin")).unwrap();
    script(
        &inputs.dir.path().join("bin"),
        "circos",
        "echo rendering plot\ntouch circos.png circos.svg",
    );

    inputs
        .plot()
        .current_dir(inputs.dir.path())
        .arg("--gff-file")
        .arg(&inputs.gff)
        .arg("--circos-bin")
        .arg("./bin/circos")
        .assert()
        .success()
        .stderr(predicate::str::contains("[Circos] rendering plot"));

    assert!(inputs.out().join("circos.svg").exists());
}

#[test]
fn test_style_to_stdout() {
    Command::cargo_bin("circos-mag")
        .unwrap()
        .arg("style")
        .assert()
        .success()
        .stdout(predicate::str::contains("[gc]"))
        .stdout(predicate::str::contains("5S_symbol = \"C\""))
        .stdout(predicate::str::contains("show_background = \"data\""));
}

#[test]
fn test_style_output_is_usable() {
    let inputs = Inputs::new();
    let style = inputs.dir.path().join("default.toml");

    Command::cargo_bin("circos-mag")
        .unwrap()
        .arg("style")
        .arg("-o")
        .arg(&style)
        .assert()
        .success();

    inputs
        .plot()
        .arg("--gff-file")
        .arg(&inputs.gff)
        .arg("--plot-style")
        .arg(&style)
        .arg("--no-render")
        .assert()
        .success();
}
