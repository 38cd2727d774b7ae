// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use std::fs;
use std::io::{self, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// Path of the compiled `pipex` binary.
pub fn pipex_bin() -> &'static str {
  env!("CARGO_BIN_EXE_pipex")
}

// --- Scratch workspace ---

/// A temp directory acting as the working directory of one pipex run.
pub struct Scratch {
  pub dir: TempDir,
}

impl Scratch {
  pub fn new() -> Self {
    Self {
      dir: tempfile::tempdir().expect("failed to create scratch dir"),
    }
  }

  pub fn path(&self, name: &str) -> PathBuf {
    self.dir.path().join(name)
  }

  pub fn write(&self, name: &str, contents: &str) -> PathBuf {
    let path = self.path(name);
    fs::write(&path, contents).expect("failed to write scratch file");
    path
  }

  pub fn read(&self, name: &str) -> String {
    fs::read_to_string(self.path(name)).expect("failed to read scratch file")
  }

  pub fn exists(&self, name: &str) -> bool {
    self.path(name).exists()
  }

  /// Writes an executable shell script into `bin/` and returns that directory.
  pub fn script(&self, name: &str, body: &str) -> PathBuf {
    let bin = self.path("bin");
    fs::create_dir_all(&bin).expect("failed to create bin dir");
    let path = bin.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("failed to write script");
    set_mode(&path, 0o755);
    bin
  }

  /// Runs pipex with `args` inside the scratch dir.
  pub fn run(&self, args: &[&str]) -> Output {
    self.run_with_stdin(args, "")
  }

  /// Runs pipex with `args` inside the scratch dir, feeding `stdin`.
  pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> Output {
    self.run_with(args, stdin, &[])
  }

  /// Runs pipex with extra environment variables.
  pub fn run_with(&self, args: &[&str], stdin: &str, envs: &[(&str, &str)]) -> Output {
    let mut command = Command::new(pipex_bin());
    command
      .args(args)
      .current_dir(self.dir.path())
      .env_remove("PIPEX_HEREDOC_FILE")
      .env_remove("PIPEX_PROMPT")
      .env("PIPEX_LOG", "off")
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped());
    for (key, value) in envs {
      command.env(key, value);
    }

    let mut child = command.spawn().expect("failed to spawn pipex");
    let mut child_stdin = child.stdin.take().expect("stdin was piped");
    // pipex may exit before reading stdin (setup errors).
    match child_stdin.write_all(stdin.as_bytes()) {
      Ok(()) => {}
      Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {}
      Err(err) => panic!("failed to write stdin: {err}"),
    }
    drop(child_stdin);
    child.wait_with_output().expect("failed to wait for pipex")
  }
}

pub fn set_mode(path: &Path, mode: u32) {
  let mut perms = fs::metadata(path).expect("missing file").permissions();
  perms.set_mode(mode);
  fs::set_permissions(path, perms).expect("failed to set permissions");
}

pub fn stderr_of(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn stdout_of(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

/// `PATH` of the test process with `dir` prepended.
pub fn path_with(dir: &Path) -> String {
  match std::env::var("PATH") {
    Ok(path) => format!("{}:{}", dir.display(), path),
    Err(_) => dir.display().to_string(),
  }
}
