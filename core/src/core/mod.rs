pub mod resolve;
pub mod spec;
pub mod status;

// Re-export key types for easier access from other pipex modules (and lib.rs)
pub use resolve::{resolve, Resolution};
pub use spec::{split_command, PipelineSpec};
pub use status::{PipelineOutcome, StageStatus};
