//! External feature-extraction tool invocation.
//!
//! The extractor is a file-in/file-out collaborator: it receives a FASTA
//! file, writes one or more CSV files with descriptor columns into an
//! output directory, and exits. Oncoprobe never re-implements the
//! descriptor algorithms; it only runs the tool and collects its output.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// Argv template for the extractor. `{fasta}` and `{outdir}` placeholders
/// are substituted per invocation.
#[derive(Debug, Clone)]
pub struct ExtractorCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Wrapper around the external feature-extraction executable.
pub struct FeatureExtractor {
    command: ExtractorCommand,
}

impl FeatureExtractor {
    pub fn new(command: ExtractorCommand) -> Self {
        Self { command }
    }

    /// Run the extractor on `fasta` with CSV output into `outdir`.
    /// Returns the CSV files produced, sorted by file name so the merge
    /// order is deterministic.
    pub async fn run(&self, fasta: &Path, outdir: &Path) -> Result<Vec<PathBuf>> {
        info!(?fasta, "Running feature extractor");

        let args: Vec<String> = self
            .command
            .args
            .iter()
            .map(|a| {
                a.replace("{fasta}", &fasta.to_string_lossy())
                    .replace("{outdir}", &outdir.to_string_lossy())
            })
            .collect();

        let output = Command::new(&self.command.program)
            .args(&args)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("feature extractor failed: {}", stderr);
        }

        let mut csvs = Vec::new();
        let mut entries = tokio::fs::read_dir(outdir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "csv") {
                csvs.push(path);
            }
        }
        csvs.sort();

        if csvs.is_empty() {
            anyhow::bail!("feature extractor produced no CSV output in {:?}", outdir);
        }

        debug!(n = csvs.len(), "Extractor CSV files collected");
        Ok(csvs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // A shell stub standing in for the real extractor binary.
    fn write_stub(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("extract.sh");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "#!/bin/sh\n{}", body).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        use std::os::unix::fs::PermissionsExt;
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[tokio::test]
    async fn test_run_collects_csvs_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let outdir = tempfile::tempdir().unwrap();
        let fasta = dir.path().join("in.fasta");
        std::fs::write(&fasta, ">P1\nMKTV\n").unwrap();

        let stub = write_stub(
            dir.path(),
            "printf 'A\\n1\\n' > \"$2\"/b_dpc.csv; printf 'B\\n2\\n' > \"$2\"/a_aac.csv",
        );
        let extractor = FeatureExtractor::new(ExtractorCommand {
            program: stub,
            args: vec!["{fasta}".to_string(), "{outdir}".to_string()],
        });

        let csvs = extractor.run(&fasta, outdir.path()).await.unwrap();
        assert_eq!(csvs.len(), 2);
        assert!(csvs[0].ends_with("a_aac.csv"));
        assert!(csvs[1].ends_with("b_dpc.csv"));
    }

    #[tokio::test]
    async fn test_run_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let outdir = tempfile::tempdir().unwrap();
        let fasta = dir.path().join("in.fasta");
        std::fs::write(&fasta, ">P1\nMKTV\n").unwrap();

        let stub = write_stub(dir.path(), "true");
        let extractor = FeatureExtractor::new(ExtractorCommand {
            program: stub,
            args: vec!["{fasta}".to_string(), "{outdir}".to_string()],
        });

        let err = extractor.run(&fasta, outdir.path()).await.unwrap_err();
        assert!(err.to_string().contains("no CSV output"));
    }

    #[tokio::test]
    async fn test_run_surfaces_tool_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let outdir = tempfile::tempdir().unwrap();
        let fasta = dir.path().join("in.fasta");
        std::fs::write(&fasta, ">P1\nMKTV\n").unwrap();

        let stub = write_stub(dir.path(), "echo 'bad fasta' >&2; exit 3");
        let extractor = FeatureExtractor::new(ExtractorCommand {
            program: stub,
            args: vec!["{fasta}".to_string(), "{outdir}".to_string()],
        });

        let err = extractor.run(&fasta, outdir.path()).await.unwrap_err();
        assert!(err.to_string().contains("bad fasta"));
    }
}
