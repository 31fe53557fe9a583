//! Semantic version engine
//!
//! Parses SemVer 1.0.0 and 2.0.0 version strings, writes them back in their
//! original notation and derives the next version of a stable or preview
//! release track.
//!
//! ```
//! use librarian::semver::{ChangeLevel, DeriveOptions, derive_next, derive_next_preview};
//!
//! let options = DeriveOptions::default();
//! assert_eq!(derive_next(ChangeLevel::Minor, "1.2.3", &options).unwrap(), "1.3.0");
//! assert_eq!(derive_next(ChangeLevel::Major, "1.2.3-beta21", &options).unwrap(), "1.2.3-beta22");
//! assert_eq!(derive_next_preview("1.2.3-rc.3", "1.2.3", &options).unwrap(), "1.3.0-rc.1");
//! ```

pub mod derive;
pub mod error;
pub mod ordering;
pub mod version;

pub use derive::{ChangeLevel, DeriveOptions, derive_next, derive_next_preview};
pub use error::{SemverError, SemverResult};
pub use ordering::{compare, max_version};
pub use version::{FormatOptions, SpecVersion, Version, parse};
