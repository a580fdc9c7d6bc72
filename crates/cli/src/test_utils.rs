//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the cli crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates a temp directory with a minimal retest.toml and a tests/ dir.
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

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// Shell script body that exits with the given code.
pub fn exit_script(code: i32) -> String {
    format!("exit {code}\n")
}
