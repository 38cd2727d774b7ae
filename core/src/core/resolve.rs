// pipex/src/core/resolve.rs

//! Command resolution: turns a bare command token into an executable path by
//! walking a colon-separated search path, the way `execvp` would.

use nix::unistd::{access, AccessFlags};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{event, instrument, Level};

/// Result of resolving a command token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
  /// A path that passed the executability check.
  Executable(PathBuf),
  /// No candidate qualified. Only fatal to the stage that asked.
  NotFound,
}

impl Resolution {
  pub fn is_found(&self) -> bool {
    matches!(self, Resolution::Executable(_))
  }

  pub fn path(&self) -> Option<&Path> {
    match self {
      Resolution::Executable(path) => Some(path),
      Resolution::NotFound => None,
    }
  }
}

/// Resolves `token` against `search_path` (the value of `PATH`).
///
/// - A token containing `/` is checked as-is and returned verbatim; the search
///   path is not consulted.
/// - Otherwise each non-empty directory of the search path is tried in order
///   and the first executable `dir/token` wins.
/// - An empty token or a missing search path resolves to `NotFound`.
#[instrument(level = "debug", skip(search_path), fields(has_search_path = search_path.is_some()))]
pub fn resolve(token: &str, search_path: Option<&OsStr>) -> Resolution {
  if token.is_empty() {
    return Resolution::NotFound;
  }

  if token.contains('/') {
    let candidate = PathBuf::from(token);
    return if is_executable(&candidate) {
      Resolution::Executable(candidate)
    } else {
      event!(Level::DEBUG, "Explicit path is not executable.");
      Resolution::NotFound
    };
  }

  let Some(search_path) = search_path else {
    event!(Level::DEBUG, "No search path available.");
    return Resolution::NotFound;
  };

  for dir in std::env::split_paths(search_path) {
    // Empty entries are skipped rather than read as the working directory.
    if dir.as_os_str().is_empty() {
      continue;
    }
    let candidate = dir.join(token);
    if is_executable(&candidate) {
      event!(Level::TRACE, candidate = %candidate.display(), "Resolved.");
      return Resolution::Executable(candidate);
    }
  }

  event!(Level::DEBUG, "No search path entry holds an executable with this name.");
  Resolution::NotFound
}

/// Executable means: exists, is not a directory, and passes `access(X_OK)`.
pub fn is_executable(path: &Path) -> bool {
  match std::fs::metadata(path) {
    Ok(meta) if !meta.is_dir() => access(path, AccessFlags::X_OK).is_ok(),
    _ => false,
  }
}
