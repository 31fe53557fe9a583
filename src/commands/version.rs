//! `librarian version` commands
//!
//! Thin wrappers over the version engine. Results are printed alone on stdout
//! so they can be captured by scripts.

use crate::core::error::LibrarianResult;
use crate::semver::{self, ChangeLevel, DeriveOptions, SpecVersion, Version};

/// Run the version parse command
pub fn run_version_parse(version: String, json: bool) -> LibrarianResult<()> {
  let parsed = semver::parse(&version)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&parsed)?);
  } else {
    print!("{}", render_version(&parsed));
  }
  Ok(())
}

/// Run the version next command
pub fn run_version_next(version: String, level: ChangeLevel, options: DeriveOptions) -> LibrarianResult<()> {
  println!("{}", semver::derive_next(level, &version, &options)?);
  Ok(())
}

/// Run the version preview command
pub fn run_version_preview(preview: String, stable: String, options: DeriveOptions) -> LibrarianResult<()> {
  println!("{}", semver::derive_next_preview(&preview, &stable, &options)?);
  Ok(())
}

/// Run the version max command
pub fn run_version_max(versions: Vec<String>) -> LibrarianResult<()> {
  println!("{}", semver::max_version(&versions));
  Ok(())
}

fn render_version(version: &Version) -> String {
  let mut out = format!("📦 {}\n", version);
  out.push_str(&format!(
    "   Core:       {}.{}.{}\n",
    version.major(),
    version.minor(),
    version.patch()
  ));

  if !version.is_prerelease() {
    out.push_str("   Prerelease: none\n");
    return out;
  }

  out.push_str(&format!("   Prerelease: {}\n", version.prerelease()));
  match version.prerelease_number() {
    Some(number) => out.push_str(&format!("   Number:     {}\n", number)),
    None => out.push_str("   Number:     none\n"),
  }
  let notation = match (version.spec(), version.prerelease_separator()) {
    (SpecVersion::V1, _) => "concatenated",
    (SpecVersion::V2, ".") => "dotted",
    (SpecVersion::V2, _) => "label only",
  };
  out.push_str(&format!("   Notation:   SemVer {} ({})\n", version.spec(), notation));
  out
}
