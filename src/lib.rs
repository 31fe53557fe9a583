//! Release tooling for client-library repositories
//!
//! - [`semver`]: version parsing, formatting and next-version derivation,
//!   including preview tracks
//! - [`release`]: change classification, release planning and tracking
//! - [`core`]: configuration and error types
//! - [`commands`]: the `librarian` CLI commands

pub mod commands;
pub mod core;
pub mod release;
pub mod semver;
mod utils;
