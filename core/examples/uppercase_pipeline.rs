// pipex/examples/uppercase_pipeline.rs

use anyhow::Context;
use pipex::{Pipeline, PipelineSpec, StageStatus};
use std::fs;
use tracing::info;

fn main() -> anyhow::Result<()> {
  // Initialize tracing (optional, for demonstration). Stages log after their
  // stdout is redirected, so events must go to stderr.
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .with_writer(std::io::stderr)
    .init();

  info!("--- Uppercase Pipeline Example ---");

  // 1. Prepare an input boundary file
  let dir = std::env::temp_dir().join(format!("pipex-example-{}", std::process::id()));
  fs::create_dir_all(&dir).context("creating the example directory")?;
  let input = dir.join("in.txt");
  let output = dir.join("out.txt");
  fs::write(&input, "a\nb\nc\n").context("writing the input file")?;

  // 2. Describe `cat < in.txt | tr a-z A-Z | cat -n > out.txt`
  let spec = PipelineSpec::new(&input, ["cat", "tr a-z A-Z", "cat -n"], &output)?;

  // 3. Run it; commands resolve against the current PATH
  let outcome = Pipeline::new(spec).run()?;

  // 4. Inspect the results
  for (stage_index, status) in outcome.statuses().iter().enumerate() {
    info!(stage_index, ?status, "Stage finished.");
  }
  assert_eq!(outcome.last_status(), Some(StageStatus::Exited(0)));

  let produced = fs::read_to_string(&output).context("reading the output file")?;
  info!("Output file:\n{}", produced);

  let _ = fs::remove_dir_all(&dir);
  Ok(())
}
