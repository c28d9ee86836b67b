//! Running the external Circos and Prokka executables.

use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::{debug, info};

/// Images Circos writes into its working directory
pub const CIRCOS_IMAGES: [&str; 2] = ["circos.png", "circos.svg"];

/// Prefix of the files Prokka writes
const PROKKA_PREFIX: &str = "prokka";

#[derive(Error, Debug)]
pub enum ExternalError {
    #[error("{0} is not on the system path")]
    NotOnPath(String),

    #[error("{0} is not an executable file")]
    NotExecutable(PathBuf),

    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Failed { program: String, status: ExitStatus },

    #[error("{program} did not produce {path}")]
    MissingOutput { program: String, path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }
    #[cfg(not(unix))]
    {
        path.is_file()
    }
}

/// Anchor a relative path at the current directory. Programs run with a
/// different working directory, so relative paths would not resolve there.
fn absolute(path: &Path) -> Result<PathBuf, ExternalError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Resolve a program to an absolute executable path.
///
/// A program containing a path separator is checked as given; a bare name is
/// looked up in each directory of `PATH`.
///
/// # Errors
///
/// Returns `ExternalError::NotExecutable` for a path that is not an executable
/// file, or `ExternalError::NotOnPath` if a bare name is not found.
pub fn find_executable(program: &str) -> Result<PathBuf, ExternalError> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return if is_executable(candidate) {
            absolute(candidate)
        } else {
            Err(ExternalError::NotExecutable(candidate.to_path_buf()))
        };
    }

    let found = std::env::var_os("PATH")
        .iter()
        .flat_map(std::env::split_paths)
        .map(|dir| dir.join(program))
        .find(|path| is_executable(path))
        .ok_or_else(|| ExternalError::NotOnPath(program.to_string()))?;
    absolute(&found)
}

/// Log each non-empty line of `stream` as `[name] line`
fn log_lines(name: &str, stream: impl Read) {
    for line in BufReader::new(stream).lines().map_while(Result::ok) {
        let line = line.trim_end();
        if !line.is_empty() {
            info!("[{name}] {line}");
        }
    }
}

/// Run a command to completion, logging each line it prints as `[name] line`
/// while it runs. stdout and stderr are read concurrently.
///
/// # Errors
///
/// Returns `ExternalError::Spawn` if the command cannot be started or
/// `ExternalError::Failed` on a non-zero exit.
pub fn execute(name: &str, cmd: &mut Command) -> Result<(), ExternalError> {
    let args: Vec<&OsStr> = std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .collect();
    info!(
        "Executing: {}",
        args.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ExternalError::Spawn {
            program: name.to_string(),
            source,
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    std::thread::scope(|scope| {
        if let Some(stderr) = stderr {
            scope.spawn(|| log_lines(name, stderr));
        }
        if let Some(stdout) = stdout {
            log_lines(name, stdout);
        }
    });

    let status = child.wait()?;
    if !status.success() {
        return Err(ExternalError::Failed {
            program: name.to_string(),
            status,
        });
    }

    Ok(())
}

/// Render the plot described by `circos.conf` in `circos_dir` and move the
/// images into `output_dir`. Returns the paths of the moved images.
///
/// # Errors
///
/// Returns an `ExternalError` if Circos fails or an image is missing.
pub fn run_circos(
    circos: &Path,
    circos_dir: &Path,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, ExternalError> {
    let mut cmd = Command::new(circos);
    cmd.arg("-conf")
        .arg(crate::circos::config::CIRCOS_CONF)
        .current_dir(circos_dir);
    execute("Circos", &mut cmd)?;

    let mut images = Vec::with_capacity(CIRCOS_IMAGES.len());
    for image in CIRCOS_IMAGES {
        let produced = circos_dir.join(image);
        if !produced.exists() {
            return Err(ExternalError::MissingOutput {
                program: "Circos".to_string(),
                path: produced,
            });
        }

        let dest = output_dir.join(image);
        std::fs::rename(&produced, &dest)?;
        debug!("Moved {} to {}", produced.display(), dest.display());
        images.push(dest);
    }

    Ok(images)
}

/// Annotate `genome` with Prokka into `prokka_dir`. Returns the GFF path.
///
/// # Errors
///
/// Returns an `ExternalError` if Prokka fails or writes no GFF.
pub fn run_prokka(
    prokka: &Path,
    genome: &Path,
    prokka_dir: &Path,
    cpus: usize,
) -> Result<PathBuf, ExternalError> {
    let mut cmd = Command::new(prokka);
    cmd.arg("--outdir")
        .arg(prokka_dir)
        .arg("--prefix")
        .arg(PROKKA_PREFIX)
        .arg("--cpus")
        .arg(cpus.to_string())
        .arg("--force")
        .arg(genome);
    execute("Prokka", &mut cmd)?;

    let gff = prokka_dir.join(format!("{PROKKA_PREFIX}.gff"));
    if !gff.exists() {
        return Err(ExternalError::MissingOutput {
            program: "Prokka".to_string(),
            path: gff,
        });
    }
    Ok(gff)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_find_executable_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let exe = script(dir.path(), "tool", "exit 0");
        assert_eq!(find_executable(exe.to_str().unwrap()).unwrap(), exe);

        let plain = dir.path().join("plain.txt");
        std::fs::write(&plain, "x").unwrap();
        assert!(matches!(
            find_executable(plain.to_str().unwrap()),
            Err(ExternalError::NotExecutable(_))
        ));
    }

    #[test]
    fn test_relative_program_runs_from_other_directory() {
        // a directory under the current one, named relative to it
        let bin = tempfile::tempdir_in(".").unwrap();
        let name = bin.path().file_name().unwrap().to_str().unwrap();
        script(bin.path(), "circos", "touch circos.png circos.svg");

        let circos = find_executable(&format!("./{name}/circos")).unwrap();
        assert!(circos.is_absolute());

        let circos_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        let images = run_circos(&circos, circos_dir.path(), output_dir.path()).unwrap();
        assert_eq!(images.len(), 2);
    }

    #[test]
    fn test_execute_streams_both_outputs() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo out; echo err >&2; exit 0");
        assert!(execute("Test", &mut cmd).is_ok());
    }

    #[test]
    fn test_find_executable_missing_from_path() {
        assert!(matches!(
            find_executable("circos-mag-no-such-program"),
            Err(ExternalError::NotOnPath(_))
        ));
    }

    #[test]
    fn test_find_executable_on_path() {
        // `sh` is on PATH on every unix system
        assert!(find_executable("sh").unwrap().is_absolute());
    }

    #[test]
    fn test_run_circos_moves_images() {
        let bin = tempfile::tempdir().unwrap();
        let circos_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        let circos = script(
            bin.path(),
            "circos",
            "test -f circos.conf || exit 2\necho drawing\ntouch circos.png circos.svg",
        );
        std::fs::write(circos_dir.path().join("circos.conf"), "").unwrap();

        let images = run_circos(&circos, circos_dir.path(), output_dir.path()).unwrap();
        assert_eq!(images.len(), 2);
        assert!(output_dir.path().join("circos.png").exists());
        assert!(output_dir.path().join("circos.svg").exists());
        assert!(!circos_dir.path().join("circos.png").exists());
    }

    #[test]
    fn test_run_circos_failure_status() {
        let bin = tempfile::tempdir().unwrap();
        let circos_dir = tempfile::tempdir().unwrap();
        let circos = script(bin.path(), "circos", "echo broken >&2\nexit 3");

        let err = run_circos(&circos, circos_dir.path(), circos_dir.path()).unwrap_err();
        assert!(matches!(err, ExternalError::Failed { .. }));
        assert!(err.to_string().contains("Circos exited with"));
    }

    #[test]
    fn test_run_circos_missing_image() {
        let bin = tempfile::tempdir().unwrap();
        let circos_dir = tempfile::tempdir().unwrap();
        let circos = script(bin.path(), "circos", "touch circos.png");

        assert!(matches!(
            run_circos(&circos, circos_dir.path(), circos_dir.path()),
            Err(ExternalError::MissingOutput { .. })
        ));
    }

    #[test]
    fn test_run_prokka_returns_gff() {
        let bin = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        // $2 is the --outdir value
        let prokka = script(bin.path(), "prokka", "mkdir -p \"$2\"\ntouch \"$2/prokka.gff\"");

        let gff = run_prokka(&prokka, Path::new("genome.fna"), &out.path().join("prokka"), 2).unwrap();
        assert!(gff.ends_with("prokka/prokka.gff"));
        assert!(gff.exists());
    }
}
