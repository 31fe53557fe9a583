//! Release tracking in librarian.toml
//!
//! Each library records its current version, its preview version and the
//! commit it was last released from. Recording a release edits those keys in
//! place; comments and unrelated keys in the file are left alone.

use crate::core::config::{LibrarianConfig, LibraryConfig};
use crate::core::error::{ConfigError, LibrarianResult, ResultExt};
use crate::release::plan::ReleasePlan;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use toml_edit::{DocumentMut, Item, Table, Value};

/// Release tracker
///
/// Reads, updates and persists the `[[libraries]]` sections of librarian.toml.
pub struct ReleaseTracker {
  config: LibrarianConfig,
  document: DocumentMut,
  config_path: PathBuf,
}

impl ReleaseTracker {
  /// Load release tracker from workspace
  pub fn load(workspace_root: &Path) -> LibrarianResult<Self> {
    let (config, document, config_path) = LibrarianConfig::load_document(workspace_root)?;
    Ok(Self {
      config,
      document,
      config_path,
    })
  }

  /// Loaded configuration
  pub fn config(&self) -> &LibrarianConfig {
    &self.config
  }

  /// Get all configured libraries
  pub fn libraries(&self) -> &[LibraryConfig] {
    &self.config.libraries
  }

  /// Find a library by name
  pub fn find_library(&self, name: &str) -> LibrarianResult<&LibraryConfig> {
    self.config.library(name).ok_or_else(|| {
      ConfigError::LibraryNotFound {
        name: name.to_string(),
      }
      .into()
    })
  }

  /// Record a planned release as done at `sha`
  pub fn record_release(&mut self, plan: &ReleasePlan, sha: &str) -> LibrarianResult<()> {
    let library = self
      .config
      .libraries
      .iter_mut()
      .find(|l| l.name == plan.name)
      .ok_or_else(|| ConfigError::LibraryNotFound {
        name: plan.name.clone(),
      })?;

    library.version = plan.proposed_version.clone();
    library.preview_version = plan.proposed_preview.clone();
    library.last_sha = Some(sha.to_string());
    library.last_date = Some(Utc::now().to_rfc3339());

    let entry = library_table(&mut self.document, &plan.name)?;
    set_string(entry, "version", &library.version);
    if let Some(preview) = &library.preview_version {
      set_string(entry, "preview_version", preview);
    }
    set_string(entry, "last_sha", sha);
    if let Some(date) = &library.last_date {
      set_string(entry, "last_date", date);
    }

    tracing::info!(library = %plan.name, version = %library.version, sha, "recorded release");
    Ok(())
  }

  /// Save updated configuration back to the file it was loaded from
  pub fn save(&self) -> LibrarianResult<()> {
    fs::write(&self.config_path, self.document.to_string())
      .with_context(|| format!("Failed to write config to {}", self.config_path.display()))
  }
}

/// The `[[libraries]]` table named `name`
fn library_table<'a>(document: &'a mut DocumentMut, name: &str) -> LibrarianResult<&'a mut Table> {
  document
    .get_mut("libraries")
    .and_then(Item::as_array_of_tables_mut)
    .and_then(|tables| {
      tables
        .iter_mut()
        .find(|t| t.get("name").and_then(Item::as_str) == Some(name))
    })
    .ok_or_else(|| {
      ConfigError::InvalidField {
        field: "libraries".to_string(),
        reason: format!("no [[libraries]] table named '{}' to update", name),
      }
      .into()
    })
}

/// Set a string key, keeping the comments around an existing value
fn set_string(table: &mut Table, key: &str, new_value: &str) {
  match table.get_mut(key).and_then(Item::as_value_mut) {
    Some(existing) => {
      let decor = existing.decor().clone();
      *existing = Value::from(new_value);
      *existing.decor_mut() = decor;
    }
    None => {
      table.insert(key, toml_edit::value(new_value));
    }
  }
}
