// pipex/src/config.rs

use crate::error::{PipexError, PipexResult};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Default name of the here-document temp file, created in the working directory.
pub const DEFAULT_HEREDOC_FILE: &str = ".here_doc_tmp";
/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "warn";
/// Default here-document prompt.
pub const DEFAULT_PROMPT: &str = "> ";

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct PipexConfig {
  /// Value of `PATH`, if set.
  pub search_path: Option<OsString>,
  /// Where the here-document front-end collects its lines (`PIPEX_HEREDOC_FILE`).
  pub heredoc_file: PathBuf,
  /// Tracing filter directive (`PIPEX_LOG`).
  pub log_filter: String,
  /// Prompt written before each here-document line (`PIPEX_PROMPT`).
  pub prompt: String,
}

impl PipexConfig {
  pub fn from_env() -> PipexResult<Self> {
    let search_path = env::var_os("PATH");

    let heredoc_file = match env::var_os("PIPEX_HEREDOC_FILE") {
      Some(value) if value.is_empty() => {
        return Err(PipexError::Config {
          message: "PIPEX_HEREDOC_FILE is set but empty".to_string(),
        })
      }
      Some(value) => PathBuf::from(value),
      None => PathBuf::from(DEFAULT_HEREDOC_FILE),
    };

    let log_filter = env::var("PIPEX_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
    let prompt = env::var("PIPEX_PROMPT").unwrap_or_else(|_| DEFAULT_PROMPT.to_string());

    Ok(Self {
      search_path,
      heredoc_file,
      log_filter,
      prompt,
    })
  }
}

impl Default for PipexConfig {
  fn default() -> Self {
    Self {
      search_path: env::var_os("PATH"),
      heredoc_file: PathBuf::from(DEFAULT_HEREDOC_FILE),
      log_filter: DEFAULT_LOG_FILTER.to_string(),
      prompt: DEFAULT_PROMPT.to_string(),
    }
  }
}
