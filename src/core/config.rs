use crate::core::error::{ConfigError, LibrarianError, LibrarianResult, ResultExt};
use crate::semver::{self, DeriveOptions};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use toml_edit::DocumentMut;

/// Configuration for librarian
/// Searched in order: librarian.toml, .librarian.toml, .config/librarian.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibrarianConfig {
  #[serde(default)]
  pub release: ReleasePolicy,
  #[serde(default)]
  pub libraries: Vec<LibraryConfig>,
}

/// Version derivation policy shared by all libraries
///
/// ```toml
/// [release]
/// downgrade_pre_ga_changes = true
/// bump_version_core = false
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleasePolicy {
  /// Before 1.0, release features as patches
  #[serde(default)]
  pub downgrade_pre_ga_changes: bool,

  /// Bump the version core of prerelease libraries instead of only their
  /// prerelease number
  #[serde(default)]
  pub bump_version_core: bool,
}

impl ReleasePolicy {
  /// Derivation options for this policy
  pub fn derive_options(&self) -> DeriveOptions {
    DeriveOptions {
      bump_version_core: self.bump_version_core,
      downgrade_pre_ga_changes: self.downgrade_pre_ga_changes,
    }
  }
}

/// A released library
///
/// # Example
///
/// ```toml
/// [[libraries]]
/// name = "google-cloud-storage"
/// path = "src/storage"
/// version = "1.2.3"
/// preview_version = "1.3.0-rc.1"  # optional preview track
/// last_sha = "abc123..."
/// last_date = "2025-01-15T10:00:00Z"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
  /// Unique name of the library
  pub name: String,

  /// Directory of the library, relative to the repository root
  #[serde(default = "default_library_path")]
  pub path: PathBuf,

  /// Current stable version
  pub version: String,

  /// Current version of the preview track, always a prerelease
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub preview_version: Option<String>,

  /// Git SHA of the last release (anchor point for commit analysis)
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_sha: Option<String>,

  /// Date of the last release (RFC 3339)
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_date: Option<String>,
}

fn default_library_path() -> PathBuf {
  PathBuf::from(".")
}

impl LibraryConfig {
  /// Check if this library has never been released by librarian
  pub fn is_first_release(&self) -> bool {
    self.last_sha.is_none()
  }

  /// Check if this library publishes a preview track
  pub fn has_preview(&self) -> bool {
    self.preview_version.is_some()
  }

  /// Validate the versions of this library
  pub fn validate(&self) -> LibrarianResult<()> {
    if self.name.trim().is_empty() {
      return Err(
        ConfigError::InvalidField {
          field: "libraries.name".to_string(),
          reason: "must not be empty".to_string(),
        }
        .into(),
      );
    }

    semver::parse(&self.version).with_context(|| format!("Invalid version for library '{}'", self.name))?;

    if let Some(preview) = &self.preview_version {
      let parsed =
        semver::parse(preview).with_context(|| format!("Invalid preview_version for library '{}'", self.name))?;
      if !parsed.is_prerelease() {
        return Err(LibrarianError::with_help(
          format!(
            "preview_version '{}' of library '{}' is not a prerelease",
            preview, self.name
          ),
          "Preview tracks are prereleases, e.g. preview_version = \"1.3.0-preview.1\"",
        ));
      }
    }

    Ok(())
  }
}

impl LibrarianConfig {
  /// Find config file in search order: librarian.toml, .librarian.toml, .config/librarian.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("librarian.toml"),
      path.join(".librarian.toml"),
      path.join(".config").join("librarian.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from librarian.toml (searches multiple locations)
  pub fn load(path: &Path) -> LibrarianResult<(Self, PathBuf)> {
    let (config, _, config_path) = Self::load_document(path)?;
    Ok((config, config_path))
  }

  /// Load config along with the editable document it was read from
  ///
  /// The document keeps comments, formatting and keys librarian does not
  /// model, so edits written back through it leave the rest of the file as is.
  pub fn load_document(path: &Path) -> LibrarianResult<(Self, DocumentMut, PathBuf)> {
    let config_path = Self::find_config_path(path).ok_or_else(|| {
      LibrarianError::Config(ConfigError::NotFound {
        workspace_root: path.to_path_buf(),
      })
    })?;

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content).with_context(|| format!("Invalid config in {}", config_path.display()))?;
    let document = content
      .parse::<DocumentMut>()
      .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    tracing::debug!(
      path = %config_path.display(),
      libraries = config.libraries.len(),
      "loaded configuration"
    );
    Ok((config, document, config_path))
  }

  /// Parse and validate config text
  pub fn parse(content: &str) -> LibrarianResult<Self> {
    let config: LibrarianConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Validate every library and check that names are unique
  pub fn validate(&self) -> LibrarianResult<()> {
    let mut seen = HashSet::new();
    for library in &self.libraries {
      library.validate()?;
      if !seen.insert(library.name.as_str()) {
        return Err(ConfigError::DuplicateLibrary {
          name: library.name.clone(),
        }
        .into());
      }
    }
    Ok(())
  }

  /// Find a library by name
  pub fn library(&self, name: &str) -> Option<&LibraryConfig> {
    self.libraries.iter().find(|l| l.name == name)
  }
}
