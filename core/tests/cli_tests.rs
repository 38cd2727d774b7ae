// tests/cli_tests.rs
mod common;
use common::*;
use pipex::cli::{HEREDOC_USAGE, USAGE};
use pipex::config::{DEFAULT_HEREDOC_FILE, DEFAULT_LOG_FILTER, DEFAULT_PROMPT};
use pipex::{parse_args, HeredocRequest, Invocation, PipexConfig, PipexError};
use serial_test::serial;
use std::path::{Path, PathBuf};

#[test]
#[serial]
fn test_parses_plain_pipeline() {
  setup_tracing();
  let invocation = parse_args(["pipex", "in.txt", "cat", "grep -v x", "wc -l", "out.txt"]).unwrap();
  match invocation {
    Invocation::Pipeline(spec) => {
      assert_eq!(spec.input(), Path::new("in.txt"));
      assert_eq!(spec.output(), Path::new("out.txt"));
      assert_eq!(spec.commands(), ["cat", "grep -v x", "wc -l"]);
      assert_eq!(spec.stage_count(), 3);
      assert_eq!(spec.channel_count(), 2);
    }
    other => panic!("Expected Invocation::Pipeline, got {:?}", other),
  }
}

#[test]
#[serial]
fn test_parses_heredoc() {
  setup_tracing();
  let invocation = parse_args(["pipex", "here_doc", "EOF", "cat", "tr a-z A-Z", "out.txt"]).unwrap();
  assert_eq!(
    invocation,
    Invocation::Heredoc(HeredocRequest {
      limiter: "EOF".to_string(),
      commands: vec!["cat".to_string(), "tr a-z A-Z".to_string()],
      output: PathBuf::from("out.txt"),
    })
  );
}

#[test]
#[serial]
fn test_too_few_arguments_is_usage_error() {
  setup_tracing();
  for args in [
    vec!["pipex"],
    vec!["pipex", "in.txt"],
    vec!["pipex", "in.txt", "cat", "out.txt"],
  ] {
    match parse_args(args.clone()) {
      Err(PipexError::Usage { usage }) => assert_eq!(usage, USAGE),
      other => panic!("Expected usage error for {:?}, got {:?}", args, other),
    }
  }
}

#[test]
#[serial]
fn test_too_few_heredoc_arguments_is_heredoc_usage_error() {
  setup_tracing();
  for args in [
    vec!["pipex", "here_doc"],
    vec!["pipex", "here_doc", "EOF", "cat", "out.txt"],
  ] {
    match parse_args(args.clone()) {
      Err(PipexError::Usage { usage }) => assert_eq!(usage, HEREDOC_USAGE),
      other => panic!("Expected heredoc usage error for {:?}, got {:?}", args, other),
    }
  }
}

#[test]
#[serial]
fn test_here_doc_keyword_only_counts_in_first_position() {
  setup_tracing();
  let invocation = parse_args(["pipex", "in.txt", "here_doc", "cat", "out.txt"]).unwrap();
  match invocation {
    Invocation::Pipeline(spec) => assert_eq!(spec.commands(), ["here_doc", "cat"]),
    other => panic!("Expected Invocation::Pipeline, got {:?}", other),
  }
}

#[test]
#[serial]
fn test_config_defaults() {
  setup_tracing();
  let config = PipexConfig::default();
  assert_eq!(config.heredoc_file, PathBuf::from(DEFAULT_HEREDOC_FILE));
  assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
  assert_eq!(config.prompt, DEFAULT_PROMPT);
  assert_eq!(config.search_path, std::env::var_os("PATH"));
}

#[test]
#[serial]
fn test_config_rejects_empty_heredoc_file() {
  setup_tracing();
  let scratch = Scratch::new();
  let output = scratch.run_with(
    &["here_doc", "END", "cat", "cat", "out.txt"],
    "END\n",
    &[("PIPEX_HEREDOC_FILE", "")],
  );
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr_of(&output).contains("PIPEX_HEREDOC_FILE"));
}
