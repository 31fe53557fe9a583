//! Release command implementation
//!
//! `plan` shows what the next release of one or all libraries would be;
//! `apply` records it in librarian.toml.

use crate::core::error::{LibrarianError, LibrarianResult};
use crate::release::{ConventionalCommits, History, ReleasePlan, ReleaseTracker};
use crate::semver::{ChangeLevel, DeriveOptions};
use std::env;

/// Run the release plan command
pub fn run_release_plan(
  name: Option<String>,
  all: bool,
  level: Option<ChangeLevel>,
  flags: DeriveOptions,
  json: bool,
) -> LibrarianResult<()> {
  let workspace_root = env::current_dir()?;
  let tracker = ReleaseTracker::load(&workspace_root)?;
  let options = merge_options(tracker.config().release.derive_options(), flags);

  let libraries: Vec<_> = if all {
    tracker.libraries().to_vec()
  } else if let Some(name) = name {
    vec![tracker.find_library(&name)?.clone()]
  } else {
    return Err(LibrarianError::message("Must specify a library name or use --all flag"));
  };

  if libraries.is_empty() {
    if json {
      println!("[]");
    } else {
      println!("⚠️  No libraries configured in librarian.toml");
      println!();
      println!("Add a library:");
      println!("  [[libraries]]");
      println!("  name = \"my-library\"");
      println!("  version = \"0.1.0\"");
    }
    return Ok(());
  }

  let mut plans = Vec::new();
  for library in &libraries {
    let plan = match level {
      Some(level) => ReleasePlan::for_library(library, level, Vec::new(), &options)?,
      None => ReleasePlan::analyze(&workspace_root, library, &ConventionalCommits, &options)?,
    };
    plans.push(plan);
  }

  if json {
    println!("{}", serde_json::to_string_pretty(&plans)?);
  } else {
    print_release_plans(&plans);
  }

  Ok(())
}

/// Run the release apply command
pub fn run_release_apply(
  name: String,
  level: Option<ChangeLevel>,
  flags: DeriveOptions,
  dry_run: bool,
) -> LibrarianResult<()> {
  let workspace_root = env::current_dir()?;
  let mut tracker = ReleaseTracker::load(&workspace_root)?;
  let options = merge_options(tracker.config().release.derive_options(), flags);
  let library = tracker.find_library(&name)?.clone();

  let plan = match level {
    Some(level) => ReleasePlan::for_library(&library, level, Vec::new(), &options)?,
    None => ReleasePlan::analyze(&workspace_root, &library, &ConventionalCommits, &options)?,
  };

  if !plan.has_changes {
    println!("⚠️  No releasable changes for '{}'", name);
    println!("   Current version: {}", plan.current_version);
    return Ok(());
  }

  println!("📦 Release Plan for '{}'", name);
  println!();
  print_versions(&plan);
  println!();

  if dry_run {
    println!("🔍 Dry-run mode (no changes applied)");
    return Ok(());
  }

  let head_sha = History::new(&workspace_root).head_sha()?;
  tracker.record_release(&plan, &head_sha)?;
  tracker.save()?;

  println!("✅ Release {} recorded in librarian.toml", plan.proposed_version);
  Ok(())
}

/// Command-line flags can only switch policies on
fn merge_options(policy: DeriveOptions, flags: DeriveOptions) -> DeriveOptions {
  DeriveOptions {
    bump_version_core: policy.bump_version_core || flags.bump_version_core,
    downgrade_pre_ga_changes: policy.downgrade_pre_ga_changes || flags.downgrade_pre_ga_changes,
  }
}

fn print_versions(plan: &ReleasePlan) {
  println!("  Current:  {}", plan.current_version);
  println!("  Proposed: {} ({})", plan.proposed_version, plan.change_level);
  if let (Some(current), Some(proposed)) = (&plan.current_preview, &plan.proposed_preview) {
    println!("  Preview:  {} -> {}", current, proposed);
  }
}

fn print_release_plans(plans: &[ReleasePlan]) {
  println!("📋 Release Plans");
  println!();

  for plan in plans {
    let status_icon = match plan.change_level {
      ChangeLevel::Major => "🔴",
      ChangeLevel::Minor => "🟡",
      ChangeLevel::Patch => "🟢",
      ChangeLevel::None => "✅",
    };

    println!("{} {}", status_icon, plan.name);
    if plan.has_changes {
      print_versions(plan);
    } else {
      println!("  Current:  {}", plan.current_version);
      println!("  Status:   No releasable changes");
    }
    if !plan.commits.is_empty() {
      println!("  Commits:  {}", plan.commits.len());
      for subject in &plan.commits {
        println!("    {}", subject);
      }
    }
    println!();
  }

  let needs_release: Vec<_> = plans.iter().filter(|p| p.has_changes).collect();
  if needs_release.is_empty() {
    println!("✅ All libraries are up to date");
  } else {
    println!("To release:");
    for plan in needs_release {
      println!("  librarian release apply {}", plan.name);
    }
  }
}
