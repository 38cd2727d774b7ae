// pipex/src/core/status.rs

//! Exit-status conventions for stages and for a whole pipeline run.

use nix::sys::wait::WaitStatus;

/// Everything went fine.
pub const EXIT_SUCCESS: i32 = 0;
/// Usage errors, fatal setup errors and failed `execve` calls.
pub const EXIT_FAILURE: i32 = 1;
/// A stage's command token could not be resolved to an executable.
pub const EXIT_COMMAND_NOT_FOUND: i32 = 127;
/// Offset added to the signal number of a stage killed by a signal.
pub const SIGNAL_EXIT_BASE: i32 = 128;

/// How a single reaped stage terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
  /// The stage called `exit` (or returned from `main`) with this code.
  Exited(i32),
  /// The stage was terminated by this signal number.
  Signaled(i32),
}

impl StageStatus {
  /// Shell-style exit code: the code itself, or `128 + signal`.
  pub fn code(&self) -> i32 {
    match *self {
      StageStatus::Exited(code) => code,
      StageStatus::Signaled(signal) => SIGNAL_EXIT_BASE + signal,
    }
  }

  pub fn success(&self) -> bool {
    matches!(self, StageStatus::Exited(EXIT_SUCCESS))
  }

  /// Converts a terminal `WaitStatus`. Stop/continue notifications are not terminal
  /// and yield `None`.
  pub(crate) fn from_wait_status(status: WaitStatus) -> Option<Self> {
    match status {
      WaitStatus::Exited(_, code) => Some(StageStatus::Exited(code)),
      WaitStatus::Signaled(_, signal, _) => Some(StageStatus::Signaled(signal as i32)),
      _ => None,
    }
  }
}

/// Outcome of a full pipeline run: one slot per stage, in stage order.
///
/// A slot stays `None` only if its child could not be reaped (the wait loop ended
/// early on `ECHILD`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
  pub(crate) statuses: Vec<Option<StageStatus>>,
}

impl PipelineOutcome {
  pub(crate) fn new(stage_count: usize) -> Self {
    Self {
      statuses: vec![None; stage_count],
    }
  }

  pub(crate) fn record(&mut self, stage_index: usize, status: StageStatus) {
    if let Some(slot) = self.statuses.get_mut(stage_index) {
      *slot = Some(status);
    }
  }

  /// Per-stage statuses, indexed by stage.
  pub fn statuses(&self) -> &[Option<StageStatus>] {
    &self.statuses
  }

  /// Status of the last stage, if it was reaped.
  pub fn last_status(&self) -> Option<StageStatus> {
    self.statuses.last().copied().flatten()
  }

  /// The pipeline's exit code: the last stage's code, like a shell reports it.
  /// An unreaped last stage counts as a generic failure.
  pub fn exit_code(&self) -> i32 {
    self.last_status().map_or(EXIT_FAILURE, |status| status.code())
  }
}
