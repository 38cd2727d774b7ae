// src/lib.rs

//! pipex: runs `cmd1 | cmd2 | ... | cmdN` the way a shell does, reading the first
//! command's input from a file and writing the last command's output to a file.
//!
//! Each stage is its own process:
//!  - The orchestrator opens both boundary files and allocates `N - 1` pipes.
//!  - It forks one child per stage, in order.
//!  - Each child wires stdin/stdout, closes every descriptor it does not need,
//!    resolves its command on `PATH` and execs it.
//!  - The parent closes its own copies of everything and reaps all `N` children.
//!  - The run's exit code is the last stage's.
//!
//! An interactive here-document mode collects typed lines into a temp file and
//! uses it as the input boundary.

// Declare modules according to the planned structure
pub mod channel;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod heredoc;
pub mod pipeline;

// --- Re-exports for the Public API ---

pub use crate::core::resolve::{resolve, Resolution};
pub use crate::core::spec::{split_command, PipelineSpec};
pub use crate::core::status::{
  PipelineOutcome, StageStatus, EXIT_COMMAND_NOT_FOUND, EXIT_FAILURE, EXIT_SUCCESS,
};

pub use crate::channel::{retained_ends, stage_wiring, ChannelSet, CloseScope, Endpoint, RetainedEnds};

pub use crate::pipeline::Pipeline;

pub use crate::heredoc::{run_heredoc, HeredocFile, HeredocRequest};

pub use crate::cli::{parse_args, Invocation};
pub use crate::config::PipexConfig;

pub use crate::error::{PipexError, PipexResult};

/// Runs whatever the command line asked for.
pub fn run_invocation(invocation: &Invocation, config: &PipexConfig) -> PipexResult<PipelineOutcome> {
  match invocation {
    Invocation::Pipeline(spec) => Pipeline::from_config(spec.clone(), config).run(),
    Invocation::Heredoc(request) => run_heredoc(request, config),
  }
}
