// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage file filtering.
//!
//! Decides which files of a raw coverage sample are kept before merging.
//! A file survives iff the optional scope folder appears in its path and the
//! ignore pattern does not match it.

use regex::Regex;

/// Compiled ignore rule: a regex plus an optional scope-folder substring.
#[derive(Debug, Clone)]
pub struct CoverageFilter {
    ignore: Regex,
    folder: Option<String>,
}

impl CoverageFilter {
    pub fn new(ignore: &str, folder: Option<String>) -> Result<Self, regex::Error> {
        Ok(Self { ignore: Regex::new(ignore)?, folder })
    }

    /// True when coverage data for `path` should be kept.
    pub fn keep(&self, path: &str) -> bool {
        let path = normalize(path);
        if let Some(folder) = &self.folder
            && !folder.is_empty()
            && !path.contains(folder.as_str())
        {
            return false;
        }
        !self.ignore.is_match(&path)
    }
}

/// Normalize separators so the rule behaves identically on Windows paths.
fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
