//! CLI commands for librarian
//!
//! ## Versions
//! - **version**: parse, derive and compare version strings directly
//!
//! ## Releases
//! - **release**: plan and record library releases from librarian.toml

pub mod release;
pub mod version;

pub use release::{run_release_apply, run_release_plan};
pub use version::{run_version_max, run_version_next, run_version_parse, run_version_preview};
