// pipex/src/main.rs

use anyhow::Context;
use pipex::{parse_args, run_invocation, PipexConfig, PipexError};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
  match run() {
    Ok(code) => code,
    Err(err) => match err.downcast_ref::<PipexError>() {
      Some(pipex_err) if pipex_err.is_usage() => {
        eprintln!("{pipex_err}");
        ExitCode::from(pipex_err.exit_code())
      }
      Some(pipex_err) => {
        eprintln!("pipex: {pipex_err}");
        ExitCode::from(pipex_err.exit_code())
      }
      None => {
        eprintln!("pipex: {err:#}");
        ExitCode::FAILURE
      }
    },
  }
}

fn run() -> anyhow::Result<ExitCode> {
  let config = PipexConfig::from_env()?;
  init_tracing(&config.log_filter);
  tracing::debug!(
    heredoc_file = %config.heredoc_file.display(),
    has_search_path = config.search_path.is_some(),
    "Configuration loaded."
  );

  let invocation = parse_args(std::env::args_os())?;
  tracing::debug!(?invocation, "Arguments parsed.");

  let outcome = run_invocation(&invocation, &config)?;
  tracing::debug!(statuses = ?outcome.statuses(), "Pipeline finished.");

  let code = u8::try_from(outcome.exit_code()).context("stage exit code out of range")?;
  Ok(ExitCode::from(code))
}

fn init_tracing(filter: &str) {
  // Log events go to stderr so they never mix with pipeline data.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(pipex::config::DEFAULT_LOG_FILTER)))
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}
