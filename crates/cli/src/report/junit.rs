// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JUnit compatible XML log output.
//!
//! One testsuite per run, one testcase per executed test file. Captured
//! output is attached to non-passing cases only.

use std::path::Path;

use quick_junit::{NonSuccessKind, Report, TestCase, TestCaseStatus, TestSuite};

use crate::runner::RunSummary;

/// Build the JUnit report for a run.
///
/// Test case names are paths relative to `test_root` where possible, so logs
/// stay stable across checkouts.
pub fn build_report(summary: &RunSummary, test_root: &Path) -> Report {
    let mut report = Report::new("retest");
    report.set_timestamp(summary.started).set_time(summary.elapsed);

    let mut suite = TestSuite::new("retest");
    for outcome in &summary.outcomes {
        let name = display_path(&outcome.path, test_root);

        let status = if outcome.passed {
            TestCaseStatus::success()
        } else if let Some(error) = &outcome.error {
            let mut status = TestCaseStatus::non_success(NonSuccessKind::Error);
            status.set_type("execution failure");
            status.set_message(error.as_str());
            status
        } else {
            let mut status = TestCaseStatus::non_success(NonSuccessKind::Failure);
            status.set_type("test failure");
            status.set_message(format!("{} failed", name));
            status
        };

        let mut case = TestCase::new(name, status);
        case.set_time(outcome.duration);
        if let Some(classname) = classname(&outcome.path, test_root) {
            case.set_classname(classname);
        }
        if !outcome.passed {
            if !outcome.stdout.is_empty() {
                case.set_system_out(outcome.stdout.as_str());
            }
            if !outcome.stderr.is_empty() {
                case.set_system_err(outcome.stderr.as_str());
            }
        }
        suite.add_test_case(case);
    }
    report.add_test_suite(suite);
    report
}

/// Serialize the report to an XML string.
pub fn to_xml(summary: &RunSummary, test_root: &Path) -> anyhow::Result<String> {
    let mut buffer = Vec::new();
    build_report(summary, test_root).serialize(&mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Write the XML log, creating parent directories as needed.
pub fn write(path: &Path, summary: &RunSummary, test_root: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    build_report(summary, test_root).serialize(file)?;
    Ok(())
}

fn display_path(path: &Path, test_root: &Path) -> String {
    path.strip_prefix(test_root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

fn classname(path: &Path, test_root: &Path) -> Option<String> {
    let relative = path.strip_prefix(test_root).unwrap_or(path);
    let parent = relative.parent()?;
    if parent.as_os_str().is_empty() {
        None
    } else {
        Some(parent.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
#[path = "junit_tests.rs"]
mod tests;
