// pipex/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::core::status::EXIT_FAILURE;

/// Errors that abort a whole pipeline run (or never let it start).
///
/// Failures that happen inside a forked stage never show up here; they are
/// only ever observed as that stage's exit status at reap time.
#[derive(Debug, Error)]
pub enum PipexError {
  #[error("{usage}")]
  Usage { usage: &'static str },

  #[error("Configuration error: {message}")]
  Config { message: String },

  #[error("Invalid pipeline: {message}")]
  InvalidPipeline { message: String },

  #[error("cannot open input file '{}': {source}", .path.display())]
  OpenInput {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("cannot open output file '{}': {source}", .path.display())]
  OpenOutput {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("pipe error while creating channel {index}: {source}")]
  Pipe {
    index: usize,
    #[source]
    source: nix::Error,
  },

  #[error("fork error while launching stage {index}: {source}")]
  Fork {
    index: usize,
    #[source]
    source: nix::Error,
  },

  #[error("here_doc file '{}': {source}", .path.display())]
  Heredoc {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl PipexError {
  /// Process exit status the binary reports for this error.
  ///
  /// Usage errors and every kind of setup failure share the generic failure code.
  pub fn exit_code(&self) -> u8 {
    EXIT_FAILURE as u8
  }

  /// `true` when the argument vector itself was malformed.
  pub fn is_usage(&self) -> bool {
    matches!(self, PipexError::Usage { .. })
  }
}

pub type PipexResult<T, E = PipexError> = std::result::Result<T, E>;
