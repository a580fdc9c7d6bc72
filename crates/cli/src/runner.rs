// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test run orchestration.
//!
//! Selects the test set (full discovery or the memoized failure list), runs
//! every selected file exactly once through the harness, records new failures
//! back into the status store, and drives coverage aggregation. The run never
//! short-circuits on a failing test; only pre-flight errors abort it.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use crate::coverage::profile::parse_profile;
use crate::coverage::{AggregatedCoverage, CoverageAggregator, CoverageFilter};
use crate::error::{ExitCode, RunError, StatusError};
use crate::finder::{FindStats, FinderConfig, TestFinder};
use crate::harness::{Harness, TestOutcome};
use crate::status::FailureStatus;

/// Coverage settings for one run.
#[derive(Debug, Clone)]
pub struct CoveragePlan {
    /// Regex for files to drop from coverage data.
    pub ignore: String,

    /// Optional path substring restricting which files are kept.
    pub folder: Option<String>,
}

/// Everything the orchestrator needs for one invocation.
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// Directory scanned for test files (absolute).
    pub test_dir: PathBuf,

    /// Location of the failure status file.
    pub status_path: PathBuf,

    /// File-name glob for discovery.
    pub pattern: String,

    /// Maximum discovery depth.
    pub max_depth: Option<usize>,

    /// Restrict selection to previously-failing tests when a status exists.
    pub only_failed: bool,

    /// Path-substring filters applied to a fully discovered set.
    pub filters: Vec<String>,

    /// Coverage session settings; None = no collection.
    pub coverage: Option<CoveragePlan>,

    /// Worker threads (0 = one per core, 1 = sequential).
    pub jobs: usize,
}

/// How the run set was selected.
#[derive(Debug, Clone, Copy)]
pub enum Selection {
    /// Full discovery through the finder.
    Discovered(FindStats),

    /// Memoized failure list from the status store.
    Memoized,
}

/// Result of one orchestrated run.
#[derive(Debug)]
pub struct RunSummary {
    /// Per-file outcomes, in selection order.
    pub outcomes: Vec<TestOutcome>,

    /// Paths of failing files, in selection order.
    pub failed: Vec<PathBuf>,

    /// Aggregated, filtered coverage when a session was active.
    pub coverage: Option<AggregatedCoverage>,

    pub selection: Selection,
    pub started: DateTime<Utc>,
    pub elapsed: std::time::Duration,

    /// Bookkeeping failure after tests ran. Reported to the caller but never
    /// suppresses the computed exit code.
    pub status_error: Option<StatusError>,
}

impl RunSummary {
    pub fn exit_code(&self) -> ExitCode {
        if self.failed.is_empty() { ExitCode::Success } else { ExitCode::TestsFailed }
    }
}

/// Run every selected test file once and record the results.
pub fn execute(plan: &RunPlan, harness: &dyn Harness) -> Result<RunSummary, RunError> {
    let started = Utc::now();
    let timer = Instant::now();

    let (selected, selection) = select(plan)?;

    // The bookkeeping guarantee requires a writable cache location; verify
    // before any test executes.
    if let Some(parent) = plan.status_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| RunError::CacheDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let session = match &plan.coverage {
        Some(coverage) => {
            let filter = CoverageFilter::new(&coverage.ignore, coverage.folder.clone())?;
            let dir = tempfile::tempdir().map_err(RunError::CoverageDir)?;
            Some((dir, Mutex::new(CoverageAggregator::new(filter))))
        }
        None => None,
    };

    let pool = rayon::ThreadPoolBuilder::new().num_threads(plan.jobs).build()?;
    let outcomes: Vec<TestOutcome> = pool.install(|| {
        selected
            .par_iter()
            .enumerate()
            .map(|(index, file)| {
                let profile_path = session
                    .as_ref()
                    .map(|(dir, _)| dir.path().join(format!("{index}.json")));
                let outcome = harness.run(file, profile_path.as_deref());
                if let (Some((_, aggregator)), Some(profile_path)) = (&session, &profile_path) {
                    collect_profile(aggregator, profile_path, file);
                }
                outcome
            })
            .collect()
    });

    let failed: Vec<PathBuf> = outcomes
        .iter()
        .filter(|outcome| !outcome.passed)
        .map(|outcome| outcome.path.clone())
        .collect();

    let status_error = if failed.is_empty() {
        FailureStatus::clear(&plan.status_path).err()
    } else {
        FailureStatus { failed: failed.clone() }.save(&plan.status_path).err()
    };
    if let Some(err) = &status_error {
        tracing::error!("failure bookkeeping incomplete: {}", err);
    }

    let coverage = session.map(|(_dir, aggregator)| {
        aggregator
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .snapshot()
    });

    Ok(RunSummary {
        outcomes,
        failed,
        coverage,
        selection,
        started,
        elapsed: timer.elapsed(),
        status_error,
    })
}

/// Pick the run set: the memoized failure list when requested and present,
/// full discovery otherwise. Only-failed never silently runs zero tests.
fn select(plan: &RunPlan) -> Result<(Vec<PathBuf>, Selection), RunError> {
    if plan.only_failed
        && let Some(status) = FailureStatus::load(&plan.status_path)
    {
        return Ok((status.failed, Selection::Memoized));
    }

    if !plan.test_dir.is_dir() {
        return Err(RunError::MissingTestDir { path: plan.test_dir.clone() });
    }

    let finder = TestFinder::new(FinderConfig {
        pattern: plan.pattern.clone(),
        follow_links: true,
        max_depth: plan.max_depth,
    })?;
    let (mut files, stats) = finder.find(&plan.test_dir);

    if !plan.filters.is_empty() {
        let root = plan.test_dir.clone();
        files.retain(|path| {
            let relative = path.strip_prefix(&root).unwrap_or(path);
            let text = relative.to_string_lossy();
            plan.filters.iter().any(|filter| text.contains(filter.as_str()))
        });
    }

    Ok((files, Selection::Discovered(stats)))
}

/// Parse and merge one test's coverage profile.
///
/// A missing or unparseable profile is a warning for that file, never a run
/// failure; instrumentation is an external collaborator.
fn collect_profile(aggregator: &Mutex<CoverageAggregator>, profile_path: &Path, file: &Path) {
    let text = match std::fs::read_to_string(profile_path) {
        Ok(text) => text,
        Err(err) => {
            if err.kind() == std::io::ErrorKind::NotFound {
                tracing::debug!("no coverage profile from {}", file.display());
            } else {
                tracing::warn!(
                    "cannot read coverage profile from {}: {}",
                    file.display(),
                    err
                );
            }
            return;
        }
    };
    match parse_profile(&text) {
        Ok(sample) => aggregator
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .merge(sample),
        Err(err) => {
            tracing::warn!("bad coverage profile from {}: {}", file.display(), err);
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
