// pipex/src/channel/mod.rs

//! Inter-stage channels: allocation, per-process closing rules, and the pure
//! plan those rules come from.

pub mod plan;
pub mod set;

pub use plan::{retained_ends, stage_wiring, CloseScope, Endpoint, RetainedEnds, StageWiring};
pub use set::{Channel, ChannelSet};
