//! SemVer precedence between version strings

use super::error::{SemverError, SemverResult};
use super::version::canonicalize;
use std::cmp::Ordering;

/// Compare two versions by SemVer precedence
///
/// Shorthand versions compare as their zero-filled form and build metadata is
/// ignored, so `1.2` equals `1.2.0+build`.
pub fn compare(a: &str, b: &str) -> SemverResult<Ordering> {
  Ok(precedence_key(a)?.cmp(&precedence_key(b)?))
}

/// Return the highest version in `versions`
///
/// Invalid entries (including `v`-prefixed ones) are skipped. The winning entry
/// is returned as written; ties keep the first occurrence. Returns an empty
/// string when no entry is valid.
pub fn max_version<S: AsRef<str>>(versions: &[S]) -> String {
  let mut best: Option<(&str, ::semver::Version)> = None;

  for candidate in versions {
    let candidate = candidate.as_ref();
    let key = match precedence_key(candidate) {
      Ok(key) => key,
      Err(e) => {
        tracing::debug!(candidate, error = %e, "skipping invalid version");
        continue;
      }
    };
    if best.as_ref().is_none_or(|(_, best_key)| key > *best_key) {
      best = Some((candidate, key));
    }
  }

  best.map(|(version, _)| version.to_string()).unwrap_or_default()
}

fn precedence_key(version: &str) -> SemverResult<::semver::Version> {
  let canonical = canonicalize(version)?;
  ::semver::Version::parse(&canonical).map_err(|e| SemverError::invalid_format(version, e.to_string()))
}
