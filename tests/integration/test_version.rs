//! Integration tests for `librarian version` commands

use crate::helpers::{TestWorkspace, librarian_stdout, run_librarian_raw};
use anyhow::Result;

#[test]
fn test_version_next() -> Result<()> {
  let ws = TestWorkspace::new()?;

  assert_eq!(librarian_stdout(&ws.path, &["version", "next", "1.2.3", "--level", "minor"])?, "1.3.0");
  assert_eq!(librarian_stdout(&ws.path, &["version", "next", "0.2.3", "--level", "major"])?, "0.3.0");
  assert_eq!(
    librarian_stdout(&ws.path, &["version", "next", "0.2.3", "--level", "minor", "--downgrade-pre-ga"])?,
    "0.2.4"
  );
  assert_eq!(
    librarian_stdout(&ws.path, &["version", "next", "1.2.3-beta21", "--level", "major"])?,
    "1.2.3-beta22"
  );
  assert_eq!(
    librarian_stdout(
      &ws.path,
      &["version", "next", "1.2.3-rc.3", "--level", "minor", "--bump-version-core"]
    )?,
    "1.3.0-rc.1"
  );
  assert_eq!(librarian_stdout(&ws.path, &["version", "next", "1.2", "--level", "none"])?, "1.2");

  Ok(())
}

#[test]
fn test_version_preview() -> Result<()> {
  let ws = TestWorkspace::new()?;

  assert_eq!(
    librarian_stdout(&ws.path, &["version", "preview", "1.2.3-rc.3", "1.2.3"])?,
    "1.3.0-rc.1"
  );
  assert_eq!(
    librarian_stdout(&ws.path, &["version", "preview", "1.2.3-rc.3", "1.3.0"])?,
    "1.4.0-rc.1"
  );
  assert_eq!(
    librarian_stdout(&ws.path, &["version", "preview", "1.2.4-rc.1", "1.2.3"])?,
    "1.2.4-rc.2"
  );

  Ok(())
}

#[test]
fn test_version_max() -> Result<()> {
  let ws = TestWorkspace::new()?;

  assert_eq!(
    librarian_stdout(&ws.path, &["version", "max", "1.2.3", "1.2.4", "1.2.2"])?,
    "1.2.4"
  );
  assert_eq!(
    librarian_stdout(&ws.path, &["version", "max", "v3.0.0", "1.0.0", "junk"])?,
    "1.0.0"
  );
  assert_eq!(librarian_stdout(&ws.path, &["version", "max"])?, "");

  Ok(())
}

#[test]
fn test_version_parse_json() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let stdout = librarian_stdout(&ws.path, &["version", "parse", "1.2.3-beta21", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout)?;
  assert_eq!(json["major"], 1);
  assert_eq!(json["minor"], 2);
  assert_eq!(json["patch"], 3);
  assert_eq!(json["prerelease"], "beta");
  assert_eq!(json["prerelease_separator"], "");
  assert_eq!(json["prerelease_number"], 21);
  assert_eq!(json["spec"], "1.0.0");

  let stdout = librarian_stdout(&ws.path, &["version", "parse", "1.2.3-beta", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout)?;
  assert!(json["prerelease_number"].is_null());
  assert_eq!(json["spec"], "2.0.0");

  Ok(())
}

#[test]
fn test_version_parse_text() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let stdout = librarian_stdout(&ws.path, &["version", "parse", "1.2.3-alpha.1"])?;
  assert!(stdout.contains("1.2.3-alpha.1"), "got: {}", stdout);
  assert!(stdout.contains("dotted"), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_invalid_versions_exit_with_user_error() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_librarian_raw(&ws.path, &["version", "parse", "v1.2.3"])?;
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("leading 'v'"), "got: {}", stderr);
  assert!(stderr.contains("Help"), "got: {}", stderr);

  let output = run_librarian_raw(&ws.path, &["version", "next", "1.2.3-rc.abc", "--level", "patch"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("invalid prerelease number"));

  let output = run_librarian_raw(&ws.path, &["version", "preview", "0.1.3", "0.1.2"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("has no prerelease segment"));

  Ok(())
}

#[test]
fn test_unknown_level_is_rejected_by_cli() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_librarian_raw(&ws.path, &["version", "next", "1.0.0", "--level", "huge"])?;
  assert!(!output.status.success());
  assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown change level"));

  Ok(())
}
