// pipex/src/pipeline/definition.rs

//! Contains the `Pipeline` struct: a `PipelineSpec` bound to the search path its
//! stages resolve commands against.

use crate::config::PipexConfig;
use crate::core::spec::PipelineSpec;
use std::ffi::{OsStr, OsString};

/// A runnable pipeline. See [`Pipeline::run`] for execution.
#[derive(Debug, Clone)]
pub struct Pipeline {
  pub(crate) spec: PipelineSpec,
  pub(crate) search_path: Option<OsString>,
}

impl Pipeline {
  /// Creates a pipeline resolving commands against the current `PATH`.
  pub fn new(spec: PipelineSpec) -> Self {
    Self {
      spec,
      search_path: std::env::var_os("PATH"),
    }
  }

  /// Creates a pipeline using the search path captured in `config`.
  pub fn from_config(spec: PipelineSpec, config: &PipexConfig) -> Self {
    Self::new(spec).with_search_path(config.search_path.clone())
  }

  /// Replaces the search path. `None` makes every bare command token unresolvable.
  pub fn with_search_path(mut self, search_path: Option<OsString>) -> Self {
    self.search_path = search_path;
    self
  }

  pub fn spec(&self) -> &PipelineSpec {
    &self.spec
  }

  pub fn search_path(&self) -> Option<&OsStr> {
    self.search_path.as_deref()
  }
}
