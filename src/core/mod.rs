//! Core building blocks shared by all librarian commands
//!
//! - **config**: librarian.toml parsing, validation and persistence
//! - **error**: Error types with contextual help messages and exit codes

pub mod config;
pub mod error;
