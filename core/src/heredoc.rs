// pipex/src/heredoc.rs

//! The here-document front-end: collects typed lines into a temp file until a
//! limiter line shows up, then runs the pipeline with that file as its input.

use crate::config::PipexConfig;
use crate::core::spec::PipelineSpec;
use crate::core::status::PipelineOutcome;
use crate::error::{PipexError, PipexResult};
use crate::pipeline::boundary::OUTPUT_FILE_MODE;
use crate::pipeline::Pipeline;
use std::fs::OpenOptions;
use std::io::{self, BufRead, BufWriter, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use tracing::{event, instrument, Level};

/// A here-document invocation: `here_doc LIMITER cmd1 ... cmdN outfile`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeredocRequest {
  pub limiter: String,
  pub commands: Vec<String>,
  pub output: PathBuf,
}

/// Copies lines from `input` to `sink` until a line equal to `limiter` (ignoring
/// its trailing newline) or end of input. The limiter line is not copied.
///
/// `prompt` is written and flushed to `prompt_out` before every read. Returns the
/// number of lines copied.
pub fn collect_lines<R, P, W>(input: &mut R, prompt: &str, prompt_out: &mut P, sink: &mut W, limiter: &str) -> io::Result<usize>
where
  R: BufRead,
  P: Write,
  W: Write,
{
  let mut line = Vec::new();
  let mut copied = 0;
  loop {
    prompt_out.write_all(prompt.as_bytes())?;
    prompt_out.flush()?;

    line.clear();
    if input.read_until(b'\n', &mut line)? == 0 {
      event!(Level::DEBUG, copied, "End of input before the limiter.");
      break;
    }
    let content = line.strip_suffix(b"\n").unwrap_or(&line[..]);
    if content == limiter.as_bytes() {
      break;
    }
    sink.write_all(&line)?;
    copied += 1;
  }
  Ok(copied)
}

/// The collected temp file. Removed from disk when dropped.
#[derive(Debug)]
pub struct HeredocFile {
  path: PathBuf,
}

impl HeredocFile {
  /// Creates (or truncates) the file at `path` and fills it from `input`.
  #[instrument(name = "HeredocFile::collect", skip(input, prompt_out), fields(path = %path.display()), err(level = "debug"))]
  pub fn collect<R, P>(path: &Path, limiter: &str, input: &mut R, prompt: &str, prompt_out: &mut P) -> PipexResult<Self>
  where
    R: BufRead,
    P: Write,
  {
    let heredoc_err = |source| PipexError::Heredoc {
      path: path.to_path_buf(),
      source,
    };

    let file = OpenOptions::new()
      .write(true)
      .create(true)
      .truncate(true)
      .mode(OUTPUT_FILE_MODE)
      .open(path)
      .map_err(heredoc_err)?;
    // From here on the guard owns the file on disk, whatever happens next.
    let guard = Self {
      path: path.to_path_buf(),
    };

    let mut sink = BufWriter::new(file);
    let copied = collect_lines(input, prompt, prompt_out, &mut sink, limiter).map_err(heredoc_err)?;
    sink.flush().map_err(heredoc_err)?;

    event!(Level::DEBUG, copied, "Here-document collected.");
    Ok(guard)
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl Drop for HeredocFile {
  fn drop(&mut self) {
    match std::fs::remove_file(&self.path) {
      Ok(()) => event!(Level::TRACE, path = %self.path.display(), "Here-document file removed."),
      Err(err) if err.kind() == io::ErrorKind::NotFound => {}
      Err(err) => event!(Level::WARN, path = %self.path.display(), error = %err, "Could not remove here-document file."),
    }
  }
}

/// Collects the here-document from stdin, then runs the pipeline reading it.
/// The temp file is removed afterwards whether or not the run succeeded.
pub fn run_heredoc(request: &HeredocRequest, config: &PipexConfig) -> PipexResult<PipelineOutcome> {
  let file = {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    HeredocFile::collect(&config.heredoc_file, &request.limiter, &mut input, &config.prompt, &mut stdout)?
  };

  let spec = PipelineSpec::new(file.path(), request.commands.iter().cloned(), &request.output)?;
  Pipeline::from_config(spec, config).run()
}
