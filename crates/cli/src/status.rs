// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Failure status persistence.
//!
//! `.retest/last-failed.json` records the test files that failed on the most
//! recent run. A later `retest run --only-failed` restricts selection to that
//! list. The file is written atomically (temp file in the same directory,
//! then rename) so a crash mid-write never leaves a truncated status that a
//! later load would accept.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StatusError;

/// File name of the status file inside the cache directory.
pub const STATUS_FILE_NAME: &str = "last-failed.json";

/// Ordered list of test files that failed on the last run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureStatus {
    pub failed: Vec<PathBuf>,
}

impl FailureStatus {
    /// Load the recorded status, returning None when there is none.
    ///
    /// Unreadable or corrupt data also reads as None: a broken status file
    /// must never make a run fail, it only forces a full scan. An empty list
    /// is treated the same way, since a run with zero selected tests would
    /// pass vacuously.
    pub fn load(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!("status file {} unreadable: {}", path.display(), err);
                }
                return None;
            }
        };
        match serde_json::from_str::<Self>(&content) {
            Ok(status) if status.failed.is_empty() => None,
            Ok(status) => Some(status),
            Err(err) => {
                tracing::debug!("status file {} corrupt: {}", path.display(), err);
                None
            }
        }
    }

    /// Atomically overwrite the status file with this failure list.
    pub fn save(&self, path: &Path) -> Result<(), StatusError> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let write_err = |source| StatusError::Write { path: path.to_path_buf(), source };

        let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        temp.write_all(content.as_bytes()).map_err(write_err)?;
        temp.flush().map_err(write_err)?;

        temp.persist(path).map_err(|err| StatusError::Rename {
            path: path.to_path_buf(),
            source: err.error,
        })?;
        Ok(())
    }

    /// Remove the status file. Missing file is not an error.
    pub fn clear(path: &Path) -> Result<(), StatusError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StatusError::Clear { path: path.to_path_buf(), source }),
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
