// pipex/src/pipeline/mod.rs

//! Defines the `Pipeline` struct and its execution: boundary files, the stage
//! executor that runs in each child, and the orchestrating `run` loop.

pub mod boundary;
pub mod definition;
pub mod execution;
pub(crate) mod stage;

// Re-export the main Pipeline struct
pub use boundary::Boundaries;
pub use definition::Pipeline;
