//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A test repository with a librarian.toml
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create an empty workspace (no git, no config)
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Create a workspace with a git repository and one initial commit
  pub fn with_git() -> Result<Self> {
    let ws = Self::new()?;
    git(&ws.path, &["init", "--initial-branch=main"])?;
    git(&ws.path, &["config", "user.name", "Test User"])?;
    git(&ws.path, &["config", "user.email", "test@example.com"])?;
    git(&ws.path, &["config", "commit.gpgsign", "false"])?;

    std::fs::write(ws.path.join("README.md"), "# client libraries\n")?;
    ws.commit("chore: initial commit")?;
    Ok(ws)
  }

  /// Write librarian.toml
  pub fn write_config(&self, content: &str) -> Result<()> {
    std::fs::write(self.path.join("librarian.toml"), content)?;
    Ok(())
  }

  /// Write a file relative to the workspace root, creating parent directories
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let file_path = self.path.join(path);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
  }

  /// Commit current changes
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the librarian CLI and return its output, whatever the exit status
pub fn run_librarian_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  Command::new(env!("CARGO_BIN_EXE_librarian"))
    .current_dir(cwd)
    .env_remove("LIBRARIAN_LOG")
    .args(args)
    .output()
    .context("Failed to run librarian")
}

/// Run the librarian CLI, failing unless it succeeds
pub fn run_librarian(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_librarian_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "librarian command failed: librarian {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run the librarian CLI and return trimmed stdout
pub fn librarian_stdout(cwd: &Path, args: &[&str]) -> Result<String> {
  let output = run_librarian(cwd, args)?;
  Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
