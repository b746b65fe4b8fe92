//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A scratch project directory
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Create an empty project directory
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Create a project with `content` written to `file`
  pub fn with_file(file: &str, content: &str) -> Result<Self> {
    let project = Self::new()?;
    project.write_file(file, content)?;
    Ok(project)
  }

  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let full = self.path.join(path);
    if let Some(parent) = full.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(full, content)?;
    Ok(())
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run relconf and return its output whatever the exit status
pub fn run_relconf_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let relconf_bin = env!("CARGO_BIN_EXE_relconf");

  Command::new(relconf_bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RELCONF_LOG")
    .output()
    .context("Failed to run relconf")
}

/// Run relconf, failing when it exits non-zero
pub fn run_relconf(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_relconf_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "relconf command failed: relconf {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
