// pipex/src/pipeline/stage.rs

//! The stage executor. Runs inside a freshly forked child and never returns:
//! every path ends in `execve` or `process::exit`.

use crate::channel::plan::{stage_wiring, CloseScope, Endpoint};
use crate::channel::set::ChannelSet;
use crate::core::resolve::{resolve, Resolution};
use crate::core::spec::split_command;
use crate::core::status::{EXIT_COMMAND_NOT_FOUND, EXIT_FAILURE};
use crate::pipeline::boundary::Boundaries;
use nix::libc::{STDIN_FILENO, STDOUT_FILENO};
use nix::sys::signal::{signal, SigHandler, Signal};
use nix::unistd::{dup2, execve};
use std::convert::Infallible;
use std::ffi::{CString, NulError, OsStr};
use std::os::fd::RawFd;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};
use std::process;
use thiserror::Error;
use tracing::{event, Level};

/// A child's view of the run: its position plus the inherited descriptor table.
#[derive(Debug)]
pub(crate) struct StageContext<'a> {
  pub index: usize,
  pub count: usize,
  pub channels: &'a mut ChannelSet,
  pub boundaries: &'a mut Boundaries,
}

#[derive(Debug, Error)]
enum StageError {
  #[error("no open descriptor for stage {index} {stream}")]
  MissingDescriptor { index: usize, stream: &'static str },

  #[error("cannot redirect {stream}: {source}")]
  Redirect {
    stream: &'static str,
    #[source]
    source: nix::Error,
  },

  #[error("cannot restore default SIGPIPE handling: {source}")]
  Signal {
    #[source]
    source: nix::Error,
  },

  #[error("{}: argument contains a NUL byte", .path.display())]
  NulByte {
    path: PathBuf,
    #[source]
    source: NulError,
  },

  #[error("{}: {source}", .path.display())]
  Exec {
    path: PathBuf,
    #[source]
    source: nix::Error,
  },
}

/// Wires the stage's stdio, sheds every descriptor it does not need, resolves
/// the command and replaces the process image.
///
/// Exit statuses when the image is not replaced: 127 if the command token is
/// not found, 1 for redirect, signal setup or `execve` failures.
pub(crate) fn run_stage(ctx: StageContext<'_>, command: &str, search_path: Option<&OsStr>) -> ! {
  let StageContext {
    index,
    count,
    channels,
    boundaries,
  } = ctx;
  event!(Level::DEBUG, stage_index = index, stage_count = count, "Stage starting.");

  if let Err(err) = redirect(index, count, channels, boundaries) {
    eprintln!("pipex: {err}");
    process::exit(EXIT_FAILURE);
  }

  channels.close_for(CloseScope::Stage(index));
  boundaries.close();

  let argv = split_command(command);
  let token = argv.first().copied().unwrap_or_default();

  let path = match resolve(token, search_path) {
    Resolution::Executable(path) => path,
    Resolution::NotFound => {
      eprintln!("pipex: command not found: {token}");
      channels.close_for(CloseScope::All);
      process::exit(EXIT_COMMAND_NOT_FOUND);
    }
  };

  if let Err(err) = restore_default_sigpipe() {
    eprintln!("pipex: {err}");
    process::exit(EXIT_FAILURE);
  }

  let err = match exec(&path, &argv) {
    Err(err) => err,
    Ok(never) => match never {},
  };
  eprintln!("pipex: {err}");
  process::exit(EXIT_FAILURE);
}

fn redirect(index: usize, count: usize, channels: &ChannelSet, boundaries: &Boundaries) -> Result<(), StageError> {
  let wiring = stage_wiring(index, count);

  let input = match wiring.input {
    Endpoint::Boundary => boundaries.input_fd(),
    Endpoint::Channel(channel) => channels.channel(channel).and_then(|c| c.read_fd()),
  };
  let output = match wiring.output {
    Endpoint::Boundary => boundaries.output_fd(),
    Endpoint::Channel(channel) => channels.channel(channel).and_then(|c| c.write_fd()),
  };

  dup_onto(index, input, STDIN_FILENO, "stdin")?;
  dup_onto(index, output, STDOUT_FILENO, "stdout")
}

fn dup_onto(index: usize, fd: Option<RawFd>, target: RawFd, stream: &'static str) -> Result<(), StageError> {
  let fd = fd.ok_or(StageError::MissingDescriptor { index, stream })?;
  dup2(fd, target).map_err(|source| StageError::Redirect { stream, source })?;
  Ok(())
}

/// The Rust runtime ignores SIGPIPE and an ignored disposition survives
/// `execve`, so writers behind a closed reader would see EPIPE instead of dying.
fn restore_default_sigpipe() -> Result<(), StageError> {
  // SAFETY: installs the default disposition; no handler code runs in this process.
  unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) }
    .map(drop)
    .map_err(|source| StageError::Signal { source })
}

/// `execve` with the split arguments and the inherited environment.
fn exec(path: &Path, argv: &[&str]) -> Result<Infallible, StageError> {
  let nul = |source| StageError::NulByte {
    path: path.to_path_buf(),
    source,
  };

  let program = CString::new(path.as_os_str().as_bytes()).map_err(nul)?;
  let args = argv
    .iter()
    .map(|arg| CString::new(*arg))
    .collect::<Result<Vec<_>, _>>()
    .map_err(nul)?;
  let env = std::env::vars_os()
    .map(|(key, value)| {
      let mut entry = key.into_vec();
      entry.push(b'=');
      entry.extend(value.into_vec());
      CString::new(entry)
    })
    .collect::<Result<Vec<_>, _>>()
    .map_err(nul)?;

  execve(&program, &args, &env).map_err(|source| StageError::Exec {
    path: path.to_path_buf(),
    source,
  })
}
