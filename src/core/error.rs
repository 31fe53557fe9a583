//! Error types for librarian with contextual messages and exit codes
//!
//! Every error is categorized so the CLI can pick an exit code, and most carry a
//! suggestion that is printed below the message.

use crate::semver::SemverError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for librarian
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, malformed versions)
  User = 1,
  /// System error (git, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for librarian
#[derive(Debug)]
pub enum LibrarianError {
  /// Configuration errors
  Config(ConfigError),

  /// Version parsing or derivation errors
  Version(SemverError),

  /// Git operation errors
  Git(GitError),

  /// I/O errors
  Io(io::Error),

  /// Error whose category is kept, with a description of what failed
  Context {
    context: String,
    source: Box<LibrarianError>,
  },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl LibrarianError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    LibrarianError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    LibrarianError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// Categorized errors are turned into messages so the context is not lost;
  /// their help text is kept.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      LibrarianError::Message { message, context, help } => LibrarianError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      // I/O and git errors keep their category and exit code
      err @ (LibrarianError::Io(_) | LibrarianError::Git(_) | LibrarianError::Context { .. }) => {
        LibrarianError::Context {
          context: ctx_str,
          source: Box::new(err),
        }
      }
      other => {
        let help = other.help_message();
        LibrarianError::Message {
          message: ctx_str,
          context: Some(other.to_string()),
          help,
        }
      }
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      LibrarianError::Config(_) => ExitCode::User,
      LibrarianError::Version(_) => ExitCode::User,
      LibrarianError::Git(_) => ExitCode::System,
      LibrarianError::Io(_) => ExitCode::System,
      LibrarianError::Context { source, .. } => source.exit_code(),
      LibrarianError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      LibrarianError::Config(e) => e.help_message(),
      LibrarianError::Version(e) => version_help(e),
      LibrarianError::Git(e) => e.help_message(),
      LibrarianError::Message { help, .. } => help.clone(),
      LibrarianError::Io(_) => None,
      LibrarianError::Context { source, .. } => source.help_message(),
    }
  }
}

fn version_help(error: &SemverError) -> Option<String> {
  match error {
    SemverError::InvalidVersionFormat { version, .. } if version.starts_with('v') => {
      Some(format!("Drop the leading 'v': use '{}'.", &version[1..]))
    }
    SemverError::InvalidVersionFormat { .. } => {
      Some("Versions look like MAJOR.MINOR.PATCH with an optional prerelease, e.g. 1.2.3 or 1.2.3-rc.1".to_string())
    }
    SemverError::InvalidPrereleaseNumber { .. } => {
      Some("A dotted prerelease must end in a number, e.g. 1.2.3-rc.1".to_string())
    }
    SemverError::PreviewMissingPrerelease { .. } => {
      Some("Preview tracks are prereleases; give the preview version a suffix such as -preview.1".to_string())
    }
    SemverError::VersionOverflow { .. } => {
      Some("Version components and prerelease numbers must stay below 18446744073709551615".to_string())
    }
    SemverError::InvalidPreviewVersion { source } | SemverError::InvalidStableVersion { source } => version_help(source),
  }
}

impl fmt::Display for LibrarianError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LibrarianError::Config(e) => write!(f, "{}", e),
      LibrarianError::Version(e) => write!(f, "{}", e),
      LibrarianError::Git(e) => write!(f, "{}", e),
      LibrarianError::Io(e) => write!(f, "I/O error: {}", e),
      LibrarianError::Context { context, source } => write!(f, "{}\n{}", context, source),
      LibrarianError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for LibrarianError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      LibrarianError::Io(e) => Some(e),
      LibrarianError::Version(e) => Some(e),
      LibrarianError::Context { source, .. } => Some(source.as_ref()),
      _ => None,
    }
  }
}

impl From<io::Error> for LibrarianError {
  fn from(err: io::Error) -> Self {
    LibrarianError::Io(err)
  }
}

impl From<SemverError> for LibrarianError {
  fn from(err: SemverError) -> Self {
    LibrarianError::Version(err)
  }
}

impl From<ConfigError> for LibrarianError {
  fn from(err: ConfigError) -> Self {
    LibrarianError::Config(err)
  }
}

impl From<GitError> for LibrarianError {
  fn from(err: GitError) -> Self {
    LibrarianError::Git(err)
  }
}

impl From<String> for LibrarianError {
  fn from(msg: String) -> Self {
    LibrarianError::message(msg)
  }
}

impl From<&str> for LibrarianError {
  fn from(msg: &str) -> Self {
    LibrarianError::message(msg)
  }
}

impl From<toml_edit::de::Error> for LibrarianError {
  fn from(err: toml_edit::de::Error) -> Self {
    LibrarianError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::TomlError> for LibrarianError {
  fn from(err: toml_edit::TomlError) -> Self {
    LibrarianError::message(format!("TOML parse error: {}", err))
  }
}

impl From<serde_json::Error> for LibrarianError {
  fn from(err: serde_json::Error) -> Self {
    LibrarianError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// librarian.toml not found
  NotFound { workspace_root: PathBuf },

  /// Library not found in configuration
  LibraryNotFound { name: String },

  /// Two libraries share a name
  DuplicateLibrary { name: String },

  /// A field holds an unusable value
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some(
        "Create librarian.toml with a [[libraries]] entry, e.g.\n  [[libraries]]\n  name = \"my-lib\"\n  version = \"0.1.0\""
          .to_string(),
      ),
      ConfigError::LibraryNotFound { .. } => {
        Some("Run `librarian release plan --all` to list the configured libraries.".to_string())
      }
      ConfigError::DuplicateLibrary { .. } => Some("Library names in librarian.toml must be unique.".to_string()),
      ConfigError::InvalidField { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { workspace_root } => {
        write!(
          f,
          "No librarian configuration found.\nExpected file: {}/librarian.toml",
          workspace_root.display()
        )
      }
      ConfigError::LibraryNotFound { name } => {
        write!(f, "Library '{}' not found in configuration", name)
      }
      ConfigError::DuplicateLibrary { name } => {
        write!(f, "Library '{}' is configured more than once", name)
      }
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid value for {}: {}", field, reason)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// The git binary could not be started
  Unavailable { reason: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::CommandFailed { stderr, .. } if stderr.contains("not a git repository") => {
        Some("Run librarian inside a git repository, or pass --level to skip commit analysis.".to_string())
      }
      GitError::CommandFailed { stderr, .. } if stderr.contains("unknown revision") => {
        Some("Check the last_sha recorded for this library in librarian.toml.".to_string())
      }
      GitError::Unavailable { .. } => Some("Install git and make sure it is on PATH.".to_string()),
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::Unavailable { reason } => write!(f, "Could not run git: {}", reason),
    }
  }
}

/// Result type alias for librarian
pub type LibrarianResult<T> = Result<T, LibrarianError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> LibrarianResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> LibrarianResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<LibrarianError>,
{
  fn context(self, ctx: impl Into<String>) -> LibrarianResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> LibrarianResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &LibrarianError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
