// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External test harness.
//!
//! Each test file runs as its own child process. The exit status decides
//! pass/fail; stdout and stderr are captured for reporting. When coverage is
//! active the child receives the profile output path in `RETEST_PROFILE`.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

/// Environment variable naming the coverage profile output path.
pub const PROFILE_ENV: &str = "RETEST_PROFILE";

/// Result of executing one test file.
#[derive(Debug, Clone)]
pub struct TestOutcome {
    pub path: PathBuf,
    pub passed: bool,
    pub duration: Duration,
    pub stdout: String,
    pub stderr: String,

    /// Set when the file could not be executed at all (spawn failure).
    /// Such a file counts as failed but never aborts the remaining run.
    pub error: Option<String>,
}

/// Executes a single test file and reports its outcome.
pub trait Harness: Sync {
    fn run(&self, file: &Path, profile: Option<&Path>) -> TestOutcome;
}

/// Harness that runs test files as child processes.
pub struct ProcessHarness {
    /// Interpreter prefix, e.g. `["sh"]`. Empty = execute the file directly.
    command: Vec<String>,
}

impl ProcessHarness {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    fn build_command(&self, file: &Path) -> Command {
        match self.command.split_first() {
            Some((program, args)) => {
                let mut cmd = Command::new(program);
                cmd.args(args).arg(file);
                cmd
            }
            None => Command::new(file),
        }
    }
}

impl Harness for ProcessHarness {
    fn run(&self, file: &Path, profile: Option<&Path>) -> TestOutcome {
        let mut cmd = self.build_command(file);
        if let Some(profile) = profile {
            cmd.env(PROFILE_ENV, profile);
        }

        let start = Instant::now();
        match cmd.output() {
            Ok(output) => TestOutcome {
                path: file.to_path_buf(),
                passed: output.status.success(),
                duration: start.elapsed(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                error: None,
            },
            Err(err) => TestOutcome {
                path: file.to_path_buf(),
                passed: false,
                duration: start.elapsed(),
                stdout: String::new(),
                stderr: String::new(),
                error: Some(format!("failed to execute {}: {}", file.display(), err)),
            },
        }
    }
}

#[cfg(test)]
#[path = "harness_tests.rs"]
mod tests;
