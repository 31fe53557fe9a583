//! Errors produced while parsing and deriving versions

use thiserror::Error;

/// Result type alias for version operations
pub type SemverResult<T> = Result<T, SemverError>;

/// Errors returned by the version engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemverError {
  /// The input is not a valid semantic version
  #[error("invalid version format '{version}': {reason}")]
  InvalidVersionFormat { version: String, reason: String },

  /// A dotted prerelease ends in something other than a number
  #[error("invalid prerelease number '{number}' in version '{version}'")]
  InvalidPrereleaseNumber { version: String, number: String },

  /// The preview argument of a preview derivation failed to parse
  #[error("invalid preview version: {source}")]
  InvalidPreviewVersion {
    #[source]
    source: Box<SemverError>,
  },

  /// The stable argument of a preview derivation failed to parse
  #[error("invalid stable version: {source}")]
  InvalidStableVersion {
    #[source]
    source: Box<SemverError>,
  },

  /// Preview tracks are always prereleases
  #[error("preview version '{version}' has no prerelease segment")]
  PreviewMissingPrerelease { version: String },

  /// Advancing the version would overflow a numeric component
  #[error("version '{version}' cannot be advanced: a numeric component is at its maximum")]
  VersionOverflow { version: String },
}

impl SemverError {
  pub(crate) fn invalid_format(version: &str, reason: impl Into<String>) -> Self {
    SemverError::InvalidVersionFormat {
      version: version.to_string(),
      reason: reason.into(),
    }
  }
}
