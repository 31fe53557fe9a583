//! Release planning and tracking
//!
//! # Flow
//!
//! 1. **Classify**: commits since `last_sha` that touch the library path are
//!    turned into a [`ChangeLevel`](crate::semver::ChangeLevel), unless the
//!    caller supplies one
//! 2. **Plan**: the stable version and the optional preview track are advanced
//!    with the configured [`ReleasePolicy`](crate::core::config::ReleasePolicy)
//! 3. **Record**: the new versions and the release anchor are written back to
//!    librarian.toml
//!
//! Package manifests are never touched; other tooling reads the versions from
//! librarian.toml.

pub mod changes;
pub mod history;
pub mod plan;
pub mod tracker;

pub use changes::{ChangeClassifier, ConventionalCommits};
pub use history::History;
pub use plan::ReleasePlan;
pub use tracker::ReleaseTracker;
