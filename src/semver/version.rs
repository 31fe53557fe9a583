//! Version parsing and formatting
//!
//! Versions are written without a leading `v` and may carry a prerelease in one
//! of two notations:
//!
//! - dotted (SemVer 2.0.0): `1.2.3-rc.3`
//! - concatenated (SemVer 1.0.0): `1.2.3-rc03`
//!
//! The notation is remembered so that a derived version is written back in the
//! style it was read in.

use super::error::{SemverError, SemverResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Trailing run of digits after a non-empty label, e.g. `beta21`
static CONCATENATED_PRERELEASE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^(.*?)(\d+)$").expect("concatenated prerelease pattern is valid"));

/// Separator used by the dotted prerelease notation
pub const DOTTED_SEPARATOR: &str = ".";

/// Which SemVer notation a prerelease was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpecVersion {
  /// Concatenated numbers, zero-padded to two digits (`rc03`)
  #[serde(rename = "1.0.0")]
  V1,
  /// Dotted numbers, written verbatim (`rc.3`)
  #[default]
  #[serde(rename = "2.0.0")]
  V2,
}

impl fmt::Display for SpecVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SpecVersion::V1 => f.write_str("1.0.0"),
      SpecVersion::V2 => f.write_str("2.0.0"),
    }
  }
}

/// Formatting switches for [`Version::format`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
  /// Prefix the output with `v`
  pub v_prefix: bool,
  /// Write only `MAJOR.MINOR.PATCH`
  pub core_only: bool,
}

/// A parsed version
///
/// Only [`parse`] builds a `Version`. A release has an empty prerelease label,
/// no separator and no number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Version {
  pub(crate) major: u64,
  pub(crate) minor: u64,
  pub(crate) patch: u64,
  pub(crate) prerelease: String,
  pub(crate) prerelease_separator: String,
  pub(crate) prerelease_number: Option<u64>,
  pub(crate) spec: SpecVersion,
}

impl Version {
  pub fn major(&self) -> u64 {
    self.major
  }

  pub fn minor(&self) -> u64 {
    self.minor
  }

  pub fn patch(&self) -> u64 {
    self.patch
  }

  /// Prerelease label without its number (`"rc"` for `1.2.3-rc.3`)
  pub fn prerelease(&self) -> &str {
    &self.prerelease
  }

  /// `"."` for dotted prereleases, empty otherwise
  pub fn prerelease_separator(&self) -> &str {
    &self.prerelease_separator
  }

  pub fn prerelease_number(&self) -> Option<u64> {
    self.prerelease_number
  }

  pub fn spec(&self) -> SpecVersion {
    self.spec
  }

  pub fn is_prerelease(&self) -> bool {
    !self.prerelease.is_empty()
  }

  /// The `(major, minor, patch)` triple, ignoring any prerelease
  pub fn core(&self) -> (u64, u64, u64) {
    (self.major, self.minor, self.patch)
  }

  /// Write the version back to text
  pub fn format(&self, options: &FormatOptions) -> String {
    let mut out = String::new();
    if options.v_prefix {
      out.push('v');
    }
    out.push_str(&format!("{}.{}.{}", self.major, self.minor, self.patch));

    if options.core_only || self.prerelease.is_empty() {
      return out;
    }

    out.push('-');
    out.push_str(&self.prerelease);
    if let Some(number) = self.prerelease_number {
      out.push_str(&self.prerelease_separator);
      match self.spec {
        SpecVersion::V1 => out.push_str(&format!("{:02}", number)),
        SpecVersion::V2 => out.push_str(&number.to_string()),
      }
    }
    out
  }

  /// Advance the prerelease number, starting a missing one at 1
  ///
  /// A bare SemVer 2.0.0 label gains the dotted separator (`beta` -> `beta.1`).
  pub(crate) fn increment_prerelease(&mut self) -> SemverResult<()> {
    match self.prerelease_number {
      Some(number) => self.prerelease_number = Some(self.bumped(number)?),
      None => {
        if self.spec == SpecVersion::V2 {
          self.prerelease_separator = DOTTED_SEPARATOR.to_string();
        }
        self.prerelease_number = Some(1);
      }
    }
    Ok(())
  }

  /// `value + 1`, or an overflow error naming this version
  pub(crate) fn bumped(&self, value: u64) -> SemverResult<u64> {
    value.checked_add(1).ok_or_else(|| SemverError::VersionOverflow {
      version: self.to_string(),
    })
  }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.format(&FormatOptions::default()))
  }
}

impl std::str::FromStr for Version {
  type Err = SemverError;

  fn from_str(s: &str) -> SemverResult<Self> {
    parse(s)
  }
}

/// Parse a version string
///
/// Missing minor and patch segments are zero-filled and build metadata is
/// dropped. A leading `v` is rejected.
pub fn parse(input: &str) -> SemverResult<Version> {
  let canonical = canonicalize(input)?;
  let (core, prerelease) = match canonical.split_once('-') {
    Some((core, prerelease)) => (core, Some(prerelease)),
    None => (canonical.as_str(), None),
  };

  let numbers = core
    .split('.')
    .map(|segment| {
      segment
        .parse::<u64>()
        .map_err(|_| SemverError::invalid_format(input, format!("non-numeric segment '{}'", segment)))
    })
    .collect::<SemverResult<Vec<u64>>>()?;
  let &[major, minor, patch] = numbers.as_slice() else {
    return Err(SemverError::invalid_format(input, "expected MAJOR.MINOR.PATCH"));
  };

  let mut version = Version {
    major,
    minor,
    patch,
    prerelease: String::new(),
    prerelease_separator: String::new(),
    prerelease_number: None,
    spec: SpecVersion::V2,
  };

  let Some(prerelease) = prerelease else {
    return Ok(version);
  };

  let parts = split_dotted(prerelease)
    .or_else(|| split_concatenated(prerelease))
    .unwrap_or_else(|| bare_label(prerelease));

  version.prerelease_number = parts
    .number
    .map(|number| {
      number.parse::<u64>().map_err(|_| SemverError::InvalidPrereleaseNumber {
        version: input.to_string(),
        number: number.to_string(),
      })
    })
    .transpose()?;
  version.prerelease = parts.label.to_string();
  version.prerelease_separator = parts.separator.to_string();
  version.spec = parts.spec;

  tracing::trace!(input, version = %version, spec = %version.spec, "parsed version");
  Ok(version)
}

/// Validate `input` and return its canonical text
///
/// The result always has three core segments, keeps the prerelease and has no
/// build metadata.
pub(crate) fn canonicalize(input: &str) -> SemverResult<String> {
  if input.starts_with('v') {
    return Err(SemverError::invalid_format(input, "leading 'v' is not allowed"));
  }

  let (without_build, build) = match input.split_once('+') {
    Some((version, build)) => (version, Some(build)),
    None => (input, None),
  };
  let (core, prerelease) = match without_build.split_once('-') {
    Some((core, prerelease)) => (core, Some(prerelease)),
    None => (without_build, None),
  };

  let segments: Vec<&str> = core.split('.').collect();
  if segments.len() > 3 {
    return Err(SemverError::invalid_format(input, "too many version segments"));
  }
  if segments.len() < 3 && (prerelease.is_some() || build.is_some()) {
    return Err(SemverError::invalid_format(
      input,
      "shorthand versions cannot carry a prerelease or build metadata",
    ));
  }

  let mut canonical = segments.join(".");
  for _ in segments.len()..3 {
    canonical.push_str(".0");
  }
  if let Some(prerelease) = prerelease {
    canonical.push('-');
    canonical.push_str(prerelease);
  }

  // Identifier charset, empty identifiers and leading zeros
  let mut full = canonical.clone();
  if let Some(build) = build {
    full.push('+');
    full.push_str(build);
  }
  ::semver::Version::parse(&full).map_err(|e| SemverError::invalid_format(input, e.to_string()))?;

  Ok(canonical)
}

/// A prerelease split into label and optional number
#[derive(Debug, PartialEq, Eq)]
struct PrereleaseParts<'a> {
  label: &'a str,
  separator: &'static str,
  number: Option<&'a str>,
  spec: SpecVersion,
}

/// `rc.3`: everything after the last dot is the number
fn split_dotted(prerelease: &str) -> Option<PrereleaseParts<'_>> {
  let (label, number) = prerelease.rsplit_once('.')?;
  Some(PrereleaseParts {
    label,
    separator: DOTTED_SEPARATOR,
    number: Some(number),
    spec: SpecVersion::V2,
  })
}

/// `rc3`: trailing digits after a non-empty label are the number
fn split_concatenated(prerelease: &str) -> Option<PrereleaseParts<'_>> {
  let captures = CONCATENATED_PRERELEASE.captures(prerelease)?;
  let label = captures.get(1)?.as_str();
  if label.is_empty() {
    return None;
  }
  Some(PrereleaseParts {
    label,
    separator: "",
    number: Some(captures.get(2)?.as_str()),
    spec: SpecVersion::V1,
  })
}

/// `beta`: the whole prerelease is the label
fn bare_label(prerelease: &str) -> PrereleaseParts<'_> {
  PrereleaseParts {
    label: prerelease,
    separator: "",
    number: None,
    spec: SpecVersion::V2,
  }
}
