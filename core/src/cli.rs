// pipex/src/cli.rs

//! Turns the raw argument vector into an [`Invocation`].

use crate::core::spec::PipelineSpec;
use crate::error::{PipexError, PipexResult};
use crate::heredoc::HeredocRequest;
use std::ffi::OsString;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: pipex infile cmd1 cmd2 ... cmdN outfile";
pub const HEREDOC_USAGE: &str = "Usage: pipex here_doc LIMITER cmd1 cmd2 ... cmdN outfile";

/// First argument that switches to here-document mode.
pub const HEREDOC_KEYWORD: &str = "here_doc";

/// Minimum argument counts, program name included.
pub const MIN_ARGS: usize = 5;
pub const MIN_HEREDOC_ARGS: usize = 6;

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
  /// `pipex infile cmd1 ... cmdN outfile`
  Pipeline(PipelineSpec),
  /// `pipex here_doc LIMITER cmd1 ... cmdN outfile`
  Heredoc(HeredocRequest),
}

/// Parses a full argument vector (program name first).
pub fn parse_args<I, S>(args: I) -> PipexResult<Invocation>
where
  I: IntoIterator<Item = S>,
  S: Into<OsString>,
{
  let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

  if args.get(1).is_some_and(|first| first == HEREDOC_KEYWORD) {
    if args.len() < MIN_HEREDOC_ARGS {
      return Err(PipexError::Usage { usage: HEREDOC_USAGE });
    }
    let last = args.len() - 1;
    return Ok(Invocation::Heredoc(HeredocRequest {
      limiter: utf8(&args[2])?,
      commands: commands(&args[3..last])?,
      output: PathBuf::from(&args[last]),
    }));
  }

  if args.len() < MIN_ARGS {
    return Err(PipexError::Usage { usage: USAGE });
  }
  let last = args.len() - 1;
  let spec = PipelineSpec::new(PathBuf::from(&args[1]), commands(&args[2..last])?, PathBuf::from(&args[last]))?;
  Ok(Invocation::Pipeline(spec))
}

fn commands(args: &[OsString]) -> PipexResult<Vec<String>> {
  args.iter().map(utf8).collect()
}

fn utf8(arg: &OsString) -> PipexResult<String> {
  arg.to_str().map(str::to_owned).ok_or_else(|| PipexError::InvalidPipeline {
    message: format!("argument {:?} is not valid UTF-8", arg),
  })
}
