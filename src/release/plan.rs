//! Release planning: classify changes and propose the next versions
//!
//! A plan covers the stable version of a library and, if the library has one,
//! its preview track. The preview is derived against the *proposed* stable
//! version so it stays ahead of the release being planned.

use crate::core::config::LibraryConfig;
use crate::core::error::{LibrarianResult, ResultExt};
use crate::release::changes::ChangeClassifier;
use crate::release::history::History;
use crate::semver::{ChangeLevel, DeriveOptions, derive_next, derive_next_preview};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Release plan for a single library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleasePlan {
  pub name: String,
  pub path: PathBuf,
  pub change_level: ChangeLevel,
  pub current_version: String,
  pub proposed_version: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub current_preview: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub proposed_preview: Option<String>,
  /// First lines of the commits that were classified
  pub commits: Vec<String>,
  pub has_changes: bool,
  pub is_first_release: bool,
}

impl ReleasePlan {
  /// Plan a release from the commits since the library's last release
  pub fn analyze(
    workspace_root: &Path,
    library: &LibraryConfig,
    classifier: &dyn ChangeClassifier,
    options: &DeriveOptions,
  ) -> LibrarianResult<Self> {
    let history = History::new(workspace_root);
    let messages = history
      .commits_since(library.last_sha.as_deref(), &library.path)
      .with_context(|| format!("Failed to read commits for library '{}'", library.name))?;
    let level = classifier.classify(&messages);
    Self::for_library(library, level, messages, options)
  }

  /// Plan a release for a known change level
  pub fn for_library(
    library: &LibraryConfig,
    level: ChangeLevel,
    commits: Vec<String>,
    options: &DeriveOptions,
  ) -> LibrarianResult<Self> {
    let proposed_version = derive_next(level, &library.version, options)
      .with_context(|| format!("Cannot derive the next version of library '{}'", library.name))?;

    let proposed_preview = match &library.preview_version {
      Some(preview) if level != ChangeLevel::None => Some(
        derive_next_preview(preview, &proposed_version, options)
          .with_context(|| format!("Cannot derive the next preview of library '{}'", library.name))?,
      ),
      other => other.clone(),
    };

    tracing::info!(
      library = %library.name,
      %level,
      current = %library.version,
      proposed = %proposed_version,
      "planned release"
    );

    Ok(Self {
      name: library.name.clone(),
      path: library.path.clone(),
      change_level: level,
      current_version: library.version.clone(),
      proposed_version,
      current_preview: library.preview_version.clone(),
      proposed_preview,
      commits: commits
        .iter()
        .map(|m| m.lines().next().unwrap_or("").to_string())
        .collect(),
      has_changes: level != ChangeLevel::None,
      is_first_release: library.is_first_release(),
    })
  }
}
