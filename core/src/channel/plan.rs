// pipex/src/channel/plan.rs

//! Pure descriptor bookkeeping for a chain of `n` stages joined by `n - 1` channels.
//!
//! Nothing here touches a real descriptor. `ChannelSet::close_for` and the stage
//! executor both follow these functions, so the rules can be checked without
//! forking anything.

/// Which process is shedding descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseScope {
  /// The parent after every stage has been forked: nothing is kept.
  All,
  /// The child running the stage with this 0-based index.
  Stage(usize),
}

/// Channel ends a process keeps open for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetainedEnds {
  pub read: bool,
  pub write: bool,
}

impl RetainedEnds {
  pub const NONE: RetainedEnds = RetainedEnds {
    read: false,
    write: false,
  };

  pub fn any(&self) -> bool {
    self.read || self.write
  }
}

/// Ends of channel `channel_index` that survive `close_for(scope)` in a chain of
/// `stage_count` stages.
///
/// Stage 0 keeps channel 0's write end and the last stage keeps the read end of
/// the channel feeding it; every other end is closed. Stages redirect their
/// standard streams before closing, so the ends they keep are duplicates of
/// what already sits on fd 0/1.
pub fn retained_ends(scope: CloseScope, stage_count: usize, channel_index: usize) -> RetainedEnds {
  let stage = match scope {
    CloseScope::All => return RetainedEnds::NONE,
    CloseScope::Stage(stage) => stage,
  };
  if stage_count < 2 || channel_index + 1 >= stage_count {
    return RetainedEnds::NONE;
  }

  let last = stage_count - 1;
  RetainedEnds {
    write: stage == 0 && channel_index == 0,
    read: stage == last && channel_index + 1 == stage,
  }
}

/// Where a stage's standard input comes from or its standard output goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
  /// The pipeline's input file (for stdin) or output file (for stdout).
  Boundary,
  /// The read end (for stdin) or write end (for stdout) of this channel.
  Channel(usize),
}

/// Stdin/stdout wiring of one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageWiring {
  pub input: Endpoint,
  pub output: Endpoint,
}

/// Channel `s - 1` feeds stage `s`; stage `s` feeds channel `s`. The first stage
/// reads the input boundary and the last writes the output boundary.
pub fn stage_wiring(stage: usize, stage_count: usize) -> StageWiring {
  let input = if stage == 0 {
    Endpoint::Boundary
  } else {
    Endpoint::Channel(stage - 1)
  };
  let output = if stage + 1 >= stage_count {
    Endpoint::Boundary
  } else {
    Endpoint::Channel(stage)
  };
  StageWiring { input, output }
}
