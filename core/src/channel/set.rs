// pipex/src/channel/set.rs

//! Defines `ChannelSet`, the `n - 1` pipes joining `n` stages.

use crate::channel::plan::{retained_ends, CloseScope, RetainedEnds};
use crate::error::{PipexError, PipexResult};
use nix::unistd::pipe;
use std::os::fd::{AsRawFd, OwnedFd, RawFd};
use tracing::{event, instrument, Level};

/// One pipe. An end is `None` once this process has closed it, so no end can
/// be closed twice.
#[derive(Debug)]
pub struct Channel {
  read: Option<OwnedFd>,
  write: Option<OwnedFd>,
}

impl Channel {
  pub fn read_fd(&self) -> Option<RawFd> {
    self.read.as_ref().map(AsRawFd::as_raw_fd)
  }

  pub fn write_fd(&self) -> Option<RawFd> {
    self.write.as_ref().map(AsRawFd::as_raw_fd)
  }

  pub fn open_ends(&self) -> RetainedEnds {
    RetainedEnds {
      read: self.read.is_some(),
      write: self.write.is_some(),
    }
  }
}

/// Channel `i` carries stage `i`'s output to stage `i + 1`'s input.
///
/// Owned by the orchestrator. After `fork` every child holds a copy of the whole
/// table and must shed what it does not need via [`ChannelSet::close_for`].
#[derive(Debug)]
pub struct ChannelSet {
  channels: Vec<Channel>,
  stage_count: usize,
}

impl ChannelSet {
  /// Creates the `stage_count - 1` pipes for a chain of `stage_count` stages.
  ///
  /// Any pipe failure is fatal; pipes created before the failure are closed when
  /// the partial set is dropped.
  #[instrument(name = "ChannelSet::allocate", err(level = "debug"))]
  pub fn allocate(stage_count: usize) -> PipexResult<Self> {
    let wanted = stage_count.saturating_sub(1);
    let mut channels = Vec::with_capacity(wanted);
    for index in 0..wanted {
      let (read, write) = pipe().map_err(|source| PipexError::Pipe { index, source })?;
      event!(Level::TRACE, index, read = read.as_raw_fd(), write = write.as_raw_fd(), "Channel created.");
      channels.push(Channel {
        read: Some(read),
        write: Some(write),
      });
    }
    event!(Level::DEBUG, channels = channels.len(), "Channel set allocated.");
    Ok(Self { channels, stage_count })
  }

  /// Number of channels.
  pub fn len(&self) -> usize {
    self.channels.len()
  }

  pub fn is_empty(&self) -> bool {
    self.channels.is_empty()
  }

  pub fn stage_count(&self) -> usize {
    self.stage_count
  }

  pub fn channel(&self, index: usize) -> Option<&Channel> {
    self.channels.get(index)
  }

  /// Closes every end that `scope` does not retain, returning how many
  /// descriptors were closed by this call.
  pub fn close_for(&mut self, scope: CloseScope) -> usize {
    let stage_count = self.stage_count;
    let mut closed = 0;
    for (index, channel) in self.channels.iter_mut().enumerate() {
      let keep = retained_ends(scope, stage_count, index);
      if !keep.write && channel.write.take().is_some() {
        closed += 1;
      }
      if !keep.read && channel.read.take().is_some() {
        closed += 1;
      }
    }
    closed
  }

  /// Raw descriptors this process still holds, read end before write end, in
  /// channel order.
  pub fn open_descriptors(&self) -> Vec<RawFd> {
    self
      .channels
      .iter()
      .flat_map(|channel| [channel.read_fd(), channel.write_fd()])
      .flatten()
      .collect()
  }
}
