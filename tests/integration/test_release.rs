//! Integration tests for `librarian release` commands

use crate::helpers::{TestWorkspace, run_librarian, run_librarian_raw};
use anyhow::Result;

const TWO_LIBRARIES: &str = r#"
[release]
downgrade_pre_ga_changes = true

[[libraries]]
name = "storage"
path = "src/storage"
version = "1.2.3"
preview_version = "1.3.0-rc.1"

[[libraries]]
name = "pubsub"
path = "src/pubsub"
version = "0.4.2"
"#;

#[test]
fn test_release_plan_with_explicit_level() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_config(TWO_LIBRARIES)?;

  let output = run_librarian(&ws.path, &["release", "plan", "--all", "--level", "minor", "--json"])?;
  let plans: serde_json::Value = serde_json::from_str(&String::from_utf8_lossy(&output.stdout))?;
  let plans = plans.as_array().expect("plan output is an array");
  assert_eq!(plans.len(), 2);

  assert_eq!(plans[0]["name"], "storage");
  assert_eq!(plans[0]["proposed_version"], "1.3.0");
  assert_eq!(plans[0]["proposed_preview"], "1.4.0-rc.1");

  // downgrade_pre_ga_changes from librarian.toml
  assert_eq!(plans[1]["name"], "pubsub");
  assert_eq!(plans[1]["proposed_version"], "0.4.3");
  assert!(plans[1].get("proposed_preview").is_none());

  Ok(())
}

#[test]
fn test_release_plan_text_output() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_config(TWO_LIBRARIES)?;

  let output = run_librarian(&ws.path, &["release", "plan", "storage", "--level", "patch"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("storage"), "got: {}", stdout);
  assert!(stdout.contains("1.2.4"), "got: {}", stdout);
  assert!(stdout.contains("1.3.0-rc.2"), "got: {}", stdout);
  assert!(stdout.contains("librarian release apply storage"), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_release_plan_classifies_commits() -> Result<()> {
  let ws = TestWorkspace::with_git()?;
  ws.write_file("src/storage/lib.rs", "// storage\n")?;
  ws.write_file("src/pubsub/lib.rs", "// pubsub\n")?;
  let anchor = ws.commit("chore: add libraries")?;

  ws.write_config(&format!(
    r#"
[[libraries]]
name = "storage"
path = "src/storage"
version = "1.2.3"
last_sha = "{anchor}"

[[libraries]]
name = "pubsub"
path = "src/pubsub"
version = "2.0.0"
last_sha = "{anchor}"
"#
  ))?;

  ws.write_file("src/storage/lib.rs", "// storage\npub fn upload() {}\n")?;
  ws.commit("feat(storage): add upload")?;
  ws.write_file("src/pubsub/lib.rs", "// pubsub\n// docs\n")?;
  ws.commit("docs(pubsub): clarify")?;

  let output = run_librarian(&ws.path, &["release", "plan", "--all", "--json"])?;
  let plans: serde_json::Value = serde_json::from_str(&String::from_utf8_lossy(&output.stdout))?;

  assert_eq!(plans[0]["change_level"], "minor");
  assert_eq!(plans[0]["proposed_version"], "1.3.0");
  assert_eq!(plans[0]["commits"][0], "feat(storage): add upload");

  assert_eq!(plans[1]["change_level"], "none");
  assert_eq!(plans[1]["proposed_version"], "2.0.0");
  assert_eq!(plans[1]["has_changes"], false);

  Ok(())
}

#[test]
fn test_release_apply_records_versions() -> Result<()> {
  let ws = TestWorkspace::with_git()?;
  ws.write_config(TWO_LIBRARIES)?;
  let head = ws.commit("chore: add librarian config")?;

  let output = run_librarian(&ws.path, &["release", "apply", "storage", "--level", "patch"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("1.2.4"), "got: {}", stdout);

  let config = ws.read_file("librarian.toml")?;
  assert!(config.contains("version = \"1.2.4\""), "got: {}", config);
  assert!(config.contains("preview_version = \"1.3.0-rc.2\""), "got: {}", config);
  assert!(config.contains(&format!("last_sha = \"{}\"", head)), "got: {}", config);
  assert!(config.contains("version = \"0.4.2\""), "pubsub must be untouched: {}", config);

  Ok(())
}

#[test]
fn test_release_apply_keeps_comments_and_unknown_keys() -> Result<()> {
  let ws = TestWorkspace::with_git()?;
  let config = r#"# Owned by the storage team
[[libraries]]
name = "storage" # the GCS client
version = "1.0.0"
owner = "storage-team"
"#;
  ws.write_config(config)?;
  ws.commit("chore: add librarian config")?;

  run_librarian(&ws.path, &["release", "apply", "storage", "--level", "patch"])?;

  let updated = ws.read_file("librarian.toml")?;
  assert!(updated.starts_with("# Owned by the storage team\n"), "got: {}", updated);
  assert!(updated.contains("name = \"storage\" # the GCS client"), "got: {}", updated);
  assert!(updated.contains("owner = \"storage-team\""), "got: {}", updated);
  assert!(updated.contains("version = \"1.0.1\""), "got: {}", updated);
  assert!(!updated.contains("[release]"), "got: {}", updated);

  Ok(())
}

#[test]
fn test_release_apply_dry_run() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_config(TWO_LIBRARIES)?;

  let output = run_librarian(&ws.path, &["release", "apply", "pubsub", "--level", "major", "--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Dry-run"), "got: {}", stdout);
  assert!(stdout.contains("0.5.0"), "got: {}", stdout);

  assert_eq!(ws.read_file("librarian.toml")?, TWO_LIBRARIES);

  Ok(())
}

#[test]
fn test_release_unknown_library() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_config(TWO_LIBRARIES)?;

  let output = run_librarian_raw(&ws.path, &["release", "plan", "bigtable", "--level", "patch"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Library 'bigtable' not found"));

  Ok(())
}

#[test]
fn test_release_invalid_config() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_config("[[libraries]]\nname = \"storage\"\nversion = \"v1.2.3\"\n")?;

  let output = run_librarian_raw(&ws.path, &["release", "plan", "--all", "--level", "patch"])?;
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Invalid version for library 'storage'"), "got: {}", stderr);

  Ok(())
}

#[test]
fn test_release_missing_config() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_librarian_raw(&ws.path, &["release", "plan", "--all"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("No librarian configuration found"));

  Ok(())
}
