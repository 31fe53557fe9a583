//! Commit history through the system git binary
//!
//! Only two read operations are needed: the messages of the commits since the
//! last release and the current HEAD sha.

use crate::core::error::{GitError, LibrarianResult};
use crate::utils::path_to_git_format;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Read-only view of a git work tree
pub struct History {
  repo_path: PathBuf,
}

impl History {
  pub fn new(repo_path: &Path) -> Self {
    Self {
      repo_path: repo_path.to_path_buf(),
    }
  }

  /// Full messages of commits touching `path`, newest first
  ///
  /// With `since`, only commits in `since..HEAD` are returned; otherwise the
  /// whole history is read.
  pub fn commits_since(&self, since: Option<&str>, path: &Path) -> LibrarianResult<Vec<String>> {
    let mut args = vec!["log".to_string(), "-z".to_string(), "--format=%B".to_string()];
    if let Some(sha) = since {
      args.push(format!("{}..HEAD", sha));
    }
    args.push("--".to_string());
    args.push(path_to_git_format(path));

    let stdout = self.run(&args)?;
    let messages: Vec<String> = stdout
      .split('\0')
      .map(str::trim)
      .filter(|m| !m.is_empty())
      .map(String::from)
      .collect();

    tracing::debug!(
      since = since.unwrap_or("<root>"),
      path = %path.display(),
      commits = messages.len(),
      "read commit history"
    );
    Ok(messages)
  }

  /// SHA of the current HEAD commit
  pub fn head_sha(&self) -> LibrarianResult<String> {
    Ok(self.run(&["rev-parse".to_string(), "HEAD".to_string()])?.trim().to_string())
  }

  fn run(&self, args: &[String]) -> LibrarianResult<String> {
    let output = self.git_cmd().args(args).output().map_err(|e| GitError::Unavailable {
      reason: e.to_string(),
    })?;

    if !output.status.success() {
      return Err(
        GitError::CommandFailed {
          command: format!("git {}", args.join(" ")),
          stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into(),
      );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
  }

  /// Git command with an isolated environment
  ///
  /// Only PATH and HOME are passed through, and pathnames are never quoted.
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(&self.repo_path);

    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("core.quotePath=false");
    cmd
  }
}
