//! Change-level classification from commit messages

use crate::semver::ChangeLevel;
use serde::{Deserialize, Serialize};

/// Turns commit history into a [`ChangeLevel`]
pub trait ChangeClassifier {
  /// Size of the combined change described by `messages`
  fn classify(&self, messages: &[String]) -> ChangeLevel;
}

/// Conventional commit type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
  Feat,
  Fix,
  Perf,
  Docs,
  Style,
  Refactor,
  Test,
  Build,
  Ci,
  Chore,
  Revert,
  Other,
}

impl CommitType {
  fn from_name(name: &str) -> Self {
    match name.to_ascii_lowercase().as_str() {
      "feat" => CommitType::Feat,
      "fix" => CommitType::Fix,
      "perf" => CommitType::Perf,
      "docs" => CommitType::Docs,
      "style" => CommitType::Style,
      "refactor" => CommitType::Refactor,
      "test" => CommitType::Test,
      "build" => CommitType::Build,
      "ci" => CommitType::Ci,
      "chore" => CommitType::Chore,
      "revert" => CommitType::Revert,
      _ => CommitType::Other,
    }
  }
}

/// Header of a conventional commit (`type(scope)!: description`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionalCommit {
  pub commit_type: CommitType,
  pub scope: Option<String>,
  pub description: String,
  pub is_breaking: bool,
}

impl ConventionalCommit {
  /// Parse a full commit message; `None` if the header is not conventional
  pub fn parse(message: &str) -> Option<Self> {
    let header = message.lines().next()?.trim();
    let (prefix, description) = header.split_once(':')?;

    let (prefix, bang) = match prefix.strip_suffix('!') {
      Some(prefix) => (prefix, true),
      None => (prefix, false),
    };
    let (name, scope) = match prefix.split_once('(') {
      Some((name, rest)) => (name, Some(rest.strip_suffix(')')?.to_string())),
      None => (prefix, None),
    };
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
      return None;
    }

    let body = message.lines().skip(1);
    let breaking_footer = body
      .map(str::trim_start)
      .any(|line| line.starts_with("BREAKING CHANGE:") || line.starts_with("BREAKING-CHANGE:"));

    Some(Self {
      commit_type: CommitType::from_name(name),
      scope,
      description: description.trim().to_string(),
      is_breaking: bang || breaking_footer,
    })
  }

  /// Change level implied by this commit alone
  pub fn change_level(&self) -> ChangeLevel {
    if self.is_breaking {
      return ChangeLevel::Major;
    }
    match self.commit_type {
      CommitType::Feat => ChangeLevel::Minor,
      CommitType::Fix | CommitType::Perf => ChangeLevel::Patch,
      _ => ChangeLevel::None,
    }
  }
}

/// Classifier following the Conventional Commits convention
///
/// Breaking changes are major, `feat` is minor, `fix` and `perf` are patches.
/// Anything else, including non-conventional messages, does not warrant a
/// release.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalCommits;

impl ChangeClassifier for ConventionalCommits {
  fn classify(&self, messages: &[String]) -> ChangeLevel {
    messages
      .iter()
      .filter_map(|m| ConventionalCommit::parse(m))
      .map(|c| c.change_level())
      .max()
      .unwrap_or(ChangeLevel::None)
  }
}
