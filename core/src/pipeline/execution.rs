// pipex/src/pipeline/execution.rs

//! Contains the `Pipeline::run()` method: opens the boundaries, allocates the
//! channels, forks one child per stage and reaps them all.

use crate::channel::plan::CloseScope;
use crate::channel::set::ChannelSet;
use crate::core::status::{PipelineOutcome, StageStatus};
use crate::error::{PipexError, PipexResult};
use crate::pipeline::boundary::Boundaries;
use crate::pipeline::definition::Pipeline;
use crate::pipeline::stage::{run_stage, StageContext};
use nix::errno::Errno;
use nix::sys::wait::wait;
use nix::unistd::{fork, ForkResult, Pid};
use std::io::Write;
use tracing::{event, instrument, span, Level};

impl Pipeline {
  /// Executes the pipeline and waits for every stage.
  ///
  /// Setup failures (boundary files, pipes, fork) abort the run with an error;
  /// nothing is forked when the boundaries or channels cannot be set up.
  /// Stage failures are not errors: they show up as statuses in the returned
  /// [`PipelineOutcome`], whose exit code is the last stage's.
  ///
  /// If a fork fails part way, the stages already launched are left to run
  /// against the closed chain and are reaped before the error is returned.
  ///
  /// Forks the calling process; call it from a single-threaded program.
  #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(
            num_stages = self.spec.stage_count(),
            input = %self.spec.input().display(),
            output = %self.spec.output().display(),
        ),
        err(level = "debug")
    )]
  pub fn run(&self) -> PipexResult<PipelineOutcome> {
    let stage_count = self.spec.stage_count();
    event!(Level::DEBUG, "Pipeline execution starting.");

    let mut boundaries = Boundaries::open(&self.spec)?;
    let mut channels = ChannelSet::allocate(stage_count)?;

    // Anything still buffered would be written once per child as well.
    let _ = std::io::stdout().flush();

    let mut children: Vec<Pid> = Vec::with_capacity(stage_count);
    for (stage_index, command) in self.spec.commands().iter().enumerate() {
      let stage_span = span!(Level::DEBUG, "pipeline_stage_launch", stage_index, command = command.as_str());
      let _stage_span_guard = stage_span.enter();

      // SAFETY: the child only touches its own copies of the descriptor table and
      // then execs or exits. Callers keep the process single-threaded.
      match unsafe { fork() } {
        Ok(ForkResult::Child) => run_stage(
          StageContext {
            index: stage_index,
            count: stage_count,
            channels: &mut channels,
            boundaries: &mut boundaries,
          },
          command,
          self.search_path(),
        ),
        Ok(ForkResult::Parent { child }) => {
          event!(Level::TRACE, pid = child.as_raw(), "Stage forked.");
          children.push(child);
        }
        Err(source) => {
          event!(Level::WARN, error = %source, launched = children.len(), "Fork failed; closing the chain and reaping launched stages.");
          channels.close_for(CloseScope::All);
          boundaries.close();
          reap(&children, stage_count);
          return Err(PipexError::Fork {
            index: stage_index,
            source,
          });
        }
      }
    }

    let closed = channels.close_for(CloseScope::All) + boundaries.close();
    event!(Level::TRACE, closed, "Parent descriptors closed.");

    let outcome = reap(&children, stage_count);
    drop(channels);

    event!(Level::DEBUG, exit_code = outcome.exit_code(), "Pipeline execution completed.");
    Ok(outcome)
  }
}

/// Waits, in whatever order they finish, for every pid in `children`.
fn reap(children: &[Pid], stage_count: usize) -> PipelineOutcome {
  let mut outcome = PipelineOutcome::new(stage_count);
  let mut remaining = children.len();

  while remaining > 0 {
    match wait() {
      Ok(status) => {
        let (Some(pid), Some(stage_status)) = (status.pid(), StageStatus::from_wait_status(status)) else {
          continue;
        };
        match children.iter().position(|child| *child == pid) {
          Some(stage_index) => {
            event!(Level::DEBUG, stage_index, status = ?stage_status, "Stage reaped.");
            outcome.record(stage_index, stage_status);
            remaining -= 1;
          }
          None => event!(Level::DEBUG, pid = pid.as_raw(), "Reaped a process that is not a stage."),
        }
      }
      Err(Errno::EINTR) => continue,
      Err(err) => {
        event!(Level::WARN, error = %err, remaining, "Wait loop ended early.");
        break;
      }
    }
  }

  outcome
}
