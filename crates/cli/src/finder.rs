// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test file discovery.
//!
//! Walks the test directory in parallel, following symlinks, and collects
//! every regular file whose name matches the configured glob. Unreadable
//! entries are logged and skipped; a single bad subtree never aborts the scan.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use ignore::WalkBuilder;

/// Finder settings.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// File-name glob, matched against the file name only.
    pub pattern: String,

    /// Follow symbolic links while walking.
    pub follow_links: bool,

    /// Maximum directory depth (None = unlimited).
    pub max_depth: Option<usize>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            pattern: crate::config::ProjectConfig::default_pattern(),
            follow_links: true,
            max_depth: None,
        }
    }
}

/// Counters reported alongside the discovered files.
#[derive(Debug, Default, Clone, Copy)]
pub struct FindStats {
    /// Regular files seen during the walk, matching or not.
    pub files_seen: usize,

    /// Unreadable entries (permission denied, broken links, cycles).
    pub errors: usize,
}

enum WalkMessage {
    File { path: PathBuf, matched: bool },
    Error,
}

/// Discovers test files under a root directory.
pub struct TestFinder {
    matcher: GlobMatcher,
    config: FinderConfig,
}

impl TestFinder {
    pub fn new(config: FinderConfig) -> Result<Self, globset::Error> {
        let matcher = Glob::new(&config.pattern)?.compile_matcher();
        Ok(Self { matcher, config })
    }

    /// Walk `root` and return the matching files, sorted and deduplicated.
    ///
    /// The underlying walk is parallel and unordered; sorting here gives
    /// callers a deterministic selection order for free.
    pub fn find(&self, root: &Path) -> (Vec<PathBuf>, FindStats) {
        let (tx, rx) = crossbeam_channel::unbounded();

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(self.config.follow_links)
            .max_depth(self.config.max_depth)
            .build_parallel();

        walker.run(|| {
            let tx = tx.clone();
            let matcher = self.matcher.clone();
            Box::new(move |entry| {
                match entry {
                    Ok(entry) => {
                        if entry.file_type().is_some_and(|t| t.is_file()) {
                            let matched = matcher.is_match(entry.file_name());
                            let _ = tx.send(WalkMessage::File {
                                path: entry.into_path(),
                                matched,
                            });
                        }
                    }
                    Err(err) => {
                        tracing::warn!("skipping unreadable entry: {}", err);
                        let _ = tx.send(WalkMessage::Error);
                    }
                }
                ignore::WalkState::Continue
            })
        });
        drop(tx);

        let mut stats = FindStats::default();
        let mut matched = BTreeSet::new();
        for message in rx {
            match message {
                WalkMessage::File { path, matched: is_match } => {
                    stats.files_seen += 1;
                    if is_match {
                        matched.insert(path);
                    }
                }
                WalkMessage::Error => stats.errors += 1,
            }
        }

        (matched.into_iter().collect(), stats)
    }
}

#[cfg(test)]
#[path = "finder_tests.rs"]
mod tests;
