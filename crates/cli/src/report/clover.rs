// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Clover format coverage report output.
//!
//! Emits the subset of the Clover schema coverage consumers read: per-file
//! `<line>` elements plus statement metrics. Lines the instrumentation marks
//! not executable are omitted, they are not statements.

use std::fmt::Write as _;
use std::path::Path;

use crate::coverage::{AggregatedCoverage, LineCount};

use super::xml_escape;

/// Render the Clover XML document.
pub fn render(coverage: &AggregatedCoverage, generated: i64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(out, r#"<coverage generated="{generated}">"#);
    let _ = writeln!(out, r#"  <project timestamp="{generated}">"#);

    for (file, lines) in &coverage.files {
        let totals = AggregatedCoverage::file_totals(lines);
        let _ = writeln!(out, r#"    <file name="{}">"#, xml_escape(file));
        for (number, count) in lines {
            if let LineCount::Hit(hits) = count {
                let _ = writeln!(
                    out,
                    r#"      <line num="{number}" type="stmt" count="{hits}"/>"#
                );
            }
        }
        let _ = writeln!(
            out,
            r#"      <metrics statements="{}" coveredstatements="{}"/>"#,
            totals.statements, totals.covered
        );
        let _ = writeln!(out, "    </file>");
    }

    let totals = coverage.totals();
    let _ = writeln!(
        out,
        r#"    <metrics files="{}" statements="{}" coveredstatements="{}"/>"#,
        coverage.files.len(),
        totals.statements,
        totals.covered
    );
    let _ = writeln!(out, "  </project>");
    let _ = writeln!(out, "</coverage>");
    out
}

/// Write the Clover report, creating parent directories as needed.
pub fn write(path: &Path, coverage: &AggregatedCoverage) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let generated = chrono::Utc::now().timestamp();
    std::fs::write(path, render(coverage, generated))?;
    Ok(())
}

#[cfg(test)]
#[path = "clover_tests.rs"]
mod tests;
