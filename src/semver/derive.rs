//! Next-version derivation
//!
//! Two entry points:
//!
//! - [`derive_next`]: advance a version for a given [`ChangeLevel`]
//! - [`derive_next_preview`]: advance a preview track so it stays ahead of the
//!   stable line
//!
//! Policy for [`derive_next`], in order:
//!
//! 1. `None` changes return the input untouched
//! 2. A prerelease only advances its number unless `bump_version_core` is set
//! 3. Otherwise the prerelease number resets to 1 and the core is bumped, with
//!    pre-1.0 downgrades applied first

use super::error::{SemverError, SemverResult};
use super::version::{Version, parse};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Size of a change, as classified from commit history
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeLevel {
  /// Nothing that warrants a release
  #[default]
  None,
  /// Bug fixes
  Patch,
  /// New features
  Minor,
  /// Breaking changes
  Major,
}

impl fmt::Display for ChangeLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ChangeLevel::None => "none",
      ChangeLevel::Patch => "patch",
      ChangeLevel::Minor => "minor",
      ChangeLevel::Major => "major",
    };
    f.write_str(name)
  }
}

impl FromStr for ChangeLevel {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "none" => Ok(ChangeLevel::None),
      "patch" => Ok(ChangeLevel::Patch),
      "minor" => Ok(ChangeLevel::Minor),
      "major" => Ok(ChangeLevel::Major),
      _ => Err(format!("Unknown change level '{}'. Expected none, patch, minor or major", s)),
    }
  }
}

/// Policy switches for version derivation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeriveOptions {
  /// Bump the version core even when the version is a prerelease; the
  /// prerelease number restarts at 1
  #[serde(default)]
  pub bump_version_core: bool,

  /// Before 1.0, treat minor changes as patches
  ///
  /// Major changes before 1.0 always become minor changes.
  #[serde(default)]
  pub downgrade_pre_ga_changes: bool,
}

/// Compute the next version for a change of size `level`
pub fn derive_next(level: ChangeLevel, current: &str, options: &DeriveOptions) -> SemverResult<String> {
  if level == ChangeLevel::None {
    return Ok(current.to_string());
  }

  let version = parse(current)?;
  let next = advance(version, level, options)?;
  tracing::debug!(%level, current, next = %next, "derived next version");
  Ok(next.to_string())
}

/// Compute the next version of a preview track
///
/// Every change counts as a minor change: a preview only has to stay ahead of
/// `stable`, not mirror the size of the change.
pub fn derive_next_preview(preview: &str, stable: &str, options: &DeriveOptions) -> SemverResult<String> {
  let mut preview_version = parse(preview).map_err(|e| SemverError::InvalidPreviewVersion { source: Box::new(e) })?;
  let stable_version = parse(stable).map_err(|e| SemverError::InvalidStableVersion { source: Box::new(e) })?;

  if !preview_version.is_prerelease() {
    return Err(SemverError::PreviewMissingPrerelease {
      version: preview.to_string(),
    });
  }

  let bump_core = DeriveOptions {
    bump_version_core: true,
    ..*options
  };
  let next = match preview_version.core().cmp(&stable_version.core()) {
    Ordering::Greater => {
      let prerelease_only = DeriveOptions {
        bump_version_core: false,
        ..*options
      };
      advance(preview_version, ChangeLevel::Minor, &prerelease_only)?
    }
    Ordering::Equal => advance(preview_version, ChangeLevel::Minor, &bump_core)?,
    Ordering::Less => {
      preview_version.major = stable_version.major;
      preview_version.minor = stable_version.minor;
      preview_version.patch = stable_version.patch;
      advance(preview_version, ChangeLevel::Minor, &bump_core)?
    }
  };

  tracing::debug!(preview, stable, next = %next, "derived next preview version");
  Ok(next.to_string())
}

/// Apply the derivation policy to a parsed version; `level` is never `None`
fn advance(mut version: Version, level: ChangeLevel, options: &DeriveOptions) -> SemverResult<Version> {
  if version.is_prerelease() && !options.bump_version_core {
    version.increment_prerelease()?;
    return Ok(version);
  }

  match effective_level(&version, level, options) {
    ChangeLevel::Major => {
      version.major = version.bumped(version.major)?;
      version.minor = 0;
      version.patch = 0;
    }
    ChangeLevel::Minor => {
      version.minor = version.bumped(version.minor)?;
      version.patch = 0;
    }
    ChangeLevel::Patch => version.patch = version.bumped(version.patch)?,
    ChangeLevel::None => {}
  }

  if version.prerelease_number.is_some() {
    version.prerelease_number = Some(1);
  }
  Ok(version)
}

/// Apply the pre-1.0 downgrades
fn effective_level(version: &Version, level: ChangeLevel, options: &DeriveOptions) -> ChangeLevel {
  if version.major != 0 {
    return level;
  }
  match level {
    ChangeLevel::Major => ChangeLevel::Minor,
    ChangeLevel::Minor if options.downgrade_pre_ga_changes => ChangeLevel::Patch,
    other => other,
  }
}
