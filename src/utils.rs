//! Utility functions for cross-platform path handling

use std::path::Path;

/// Convert a path to Git format (always forward slashes)
///
/// Git pathspecs use forward slashes, even on Windows. An empty path becomes
/// `.` so it still limits the pathspec to the repository.
pub fn path_to_git_format(path: &Path) -> String {
  #[cfg(target_os = "windows")]
  let formatted = path.to_string_lossy().replace('\\', "/");
  #[cfg(not(target_os = "windows"))]
  let formatted = path.to_string_lossy().to_string();

  if formatted.is_empty() { ".".to_string() } else { formatted }
}
