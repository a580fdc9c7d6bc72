//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for setting up throwaway projects and invoking the
//! retest binary against them.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)] // helpers are shared across spec modules unevenly

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Returns a Command configured to run the retest binary.
pub fn retest_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("retest"))
}

/// Creates a temp project: retest.toml running tests through sh, plus an
/// empty tests/ directory.
pub fn temp_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("retest.toml"),
        "[runner]\ncommand = [\"sh\"]\n",
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("tests")).unwrap();
    dir
}

/// Writes a test script under tests/, creating subdirectories as needed.
pub fn write_test(root: &Path, name: &str, body: &str) {
    let path = root.join("tests").join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, body).unwrap();
}

/// A test script that always passes.
pub fn passing_test(root: &Path, name: &str) {
    write_test(root, name, "exit 0\n");
}

/// A test script that always fails.
pub fn failing_test(root: &Path, name: &str) {
    write_test(root, name, "echo assertion failed >&2\nexit 1\n");
}

/// Path of the failure status file inside a temp project.
pub fn status_file(root: &Path) -> PathBuf {
    root.join(".retest/last-failed.json")
}

/// Parses the status file into the list of recorded file names.
pub fn recorded_failures(root: &Path) -> Vec<String> {
    let content = fs::read_to_string(status_file(root)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    value["failed"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry.as_str().unwrap().to_string())
        .collect()
}
