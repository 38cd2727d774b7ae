// pipex/src/core/spec.rs

//! Defines the immutable description of one pipeline run.

use crate::error::{PipexError, PipexResult};
use std::path::{Path, PathBuf};

/// Ordered command strings plus the two boundary files.
///
/// Command strings are split on whitespace when their stage runs; there is no
/// quoting, globbing or redirection syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSpec {
  commands: Vec<String>,
  input: PathBuf,
  output: PathBuf,
}

impl PipelineSpec {
  /// Creates a spec. At least one command is required.
  pub fn new<I, S>(input: impl Into<PathBuf>, commands: I, output: impl Into<PathBuf>) -> PipexResult<Self>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let commands: Vec<String> = commands.into_iter().map(Into::into).collect();
    if commands.is_empty() {
      return Err(PipexError::InvalidPipeline {
        message: "a pipeline needs at least one command".to_string(),
      });
    }
    Ok(Self {
      commands,
      input: input.into(),
      output: output.into(),
    })
  }

  pub fn commands(&self) -> &[String] {
    &self.commands
  }

  /// Number of stages (one per command).
  pub fn stage_count(&self) -> usize {
    self.commands.len()
  }

  /// Number of channels needed to connect the stages.
  pub fn channel_count(&self) -> usize {
    self.commands.len().saturating_sub(1)
  }

  pub fn input(&self) -> &Path {
    &self.input
  }

  pub fn output(&self) -> &Path {
    &self.output
  }
}

/// Splits a command string into its argument vector (command token first).
///
/// Runs of whitespace act as a single separator; an empty or blank string
/// yields an empty vector.
pub fn split_command(command: &str) -> Vec<&str> {
  command.split_whitespace().collect()
}
