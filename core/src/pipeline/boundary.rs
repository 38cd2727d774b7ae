// pipex/src/pipeline/boundary.rs

//! The two boundary files of a run: the input read by stage 0 and the output
//! written by the last stage.

use crate::core::spec::PipelineSpec;
use crate::error::{PipexError, PipexResult};
use std::fs::{File, OpenOptions};
use std::os::fd::{AsRawFd, RawFd};
use std::os::unix::fs::OpenOptionsExt;
use tracing::{event, instrument, Level};

/// Mode for a newly created output file (before the umask).
pub const OUTPUT_FILE_MODE: u32 = 0o644;

/// Opened boundary files. Dropping (or [`Boundaries::close`]) closes both.
#[derive(Debug)]
pub struct Boundaries {
  input: Option<File>,
  output: Option<File>,
}

impl Boundaries {
  /// Opens the input read-only, then the output write/create/truncate.
  ///
  /// The input is opened first, so a missing input leaves the output file
  /// untouched.
  #[instrument(
    name = "Boundaries::open",
    skip_all,
    fields(input = %spec.input().display(), output = %spec.output().display()),
    err(level = "debug")
  )]
  pub fn open(spec: &PipelineSpec) -> PipexResult<Self> {
    let input = File::open(spec.input()).map_err(|source| PipexError::OpenInput {
      path: spec.input().to_path_buf(),
      source,
    })?;

    let output = OpenOptions::new()
      .write(true)
      .create(true)
      .truncate(true)
      .mode(OUTPUT_FILE_MODE)
      .open(spec.output())
      .map_err(|source| PipexError::OpenOutput {
        path: spec.output().to_path_buf(),
        source,
      })?;

    event!(Level::DEBUG, "Boundary files opened.");
    Ok(Self {
      input: Some(input),
      output: Some(output),
    })
  }

  pub fn input_fd(&self) -> Option<RawFd> {
    self.input.as_ref().map(AsRawFd::as_raw_fd)
  }

  pub fn output_fd(&self) -> Option<RawFd> {
    self.output.as_ref().map(AsRawFd::as_raw_fd)
  }

  /// Closes whichever boundary files are still open and returns how many were.
  pub fn close(&mut self) -> usize {
    usize::from(self.input.take().is_some()) + usize::from(self.output.take().is_some())
  }
}
