// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTML coverage report output.
//!
//! A single summary page: one total-coverage card plus a per-file table.
//! No per-line source rendering.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::coverage::AggregatedCoverage;

use super::xml_escape;

/// CSS styles for the report.
const CSS: &str = r#":root {
      --bg: #1a1a2e;
      --card-bg: #16213e;
      --text: #eef;
      --muted: #8892b0;
      --accent: #64ffda;
      --warn: #f59e0b;
    }
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      background: var(--bg);
      color: var(--text);
      padding: 2rem;
      line-height: 1.6;
    }
    .container { max-width: 1000px; margin: 0 auto; }
    header {
      margin-bottom: 2rem;
      padding-bottom: 1rem;
      border-bottom: 1px solid var(--card-bg);
    }
    h1 { color: var(--accent); font-size: 1.5rem; }
    .meta { color: var(--muted); font-size: 0.875rem; margin-top: 0.5rem; }
    .card {
      background: var(--card-bg);
      padding: 1.5rem;
      border-radius: 8px;
      border-left: 4px solid var(--accent);
      margin-bottom: 2rem;
      max-width: 260px;
    }
    .card.low { border-color: var(--warn); }
    .card-title { color: var(--muted); font-size: 0.75rem; text-transform: uppercase; }
    .card-value { font-size: 2rem; font-weight: 600; margin-top: 0.5rem; }
    table {
      width: 100%;
      border-collapse: collapse;
      background: var(--card-bg);
      border-radius: 8px;
      overflow: hidden;
    }
    th, td { padding: 0.75rem 1rem; text-align: left; }
    th { background: rgba(0,0,0,0.2); color: var(--muted); font-size: 0.75rem; text-transform: uppercase; }
    tr:not(:last-child) td { border-bottom: 1px solid var(--bg); }
    td:not(:first-child) { text-align: right; font-family: monospace; }"#;

/// Render the coverage summary page.
pub fn render(coverage: &AggregatedCoverage, generated: DateTime<Utc>) -> String {
    let totals = coverage.totals();
    let card_class = if totals.percent() < 80.0 { "card low" } else { "card" };

    let mut out = String::new();
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, r#"<html lang="en">"#);
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, r#"  <meta charset="utf-8">"#);
    let _ = writeln!(out, "  <title>Coverage Report</title>");
    let _ = writeln!(out, "  <style>{CSS}</style>");
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");
    let _ = writeln!(out, r#"  <div class="container">"#);
    let _ = writeln!(out, "    <header>");
    let _ = writeln!(out, "      <h1>Coverage Report</h1>");
    let _ = writeln!(
        out,
        r#"      <div class="meta">Generated {}</div>"#,
        generated.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out, "    </header>");
    let _ = writeln!(out, r#"    <div class="{card_class}">"#);
    let _ = writeln!(out, r#"      <div class="card-title">Total coverage</div>"#);
    let _ = writeln!(
        out,
        r#"      <div class="card-value">{:.1}%</div>"#,
        totals.percent()
    );
    let _ = writeln!(out, "    </div>");
    let _ = writeln!(out, "    <table>");
    let _ = writeln!(
        out,
        "      <tr><th>File</th><th>Covered</th><th>Statements</th><th>Percent</th></tr>"
    );
    for (file, lines) in &coverage.files {
        let file_totals = AggregatedCoverage::file_totals(lines);
        let _ = writeln!(
            out,
            "      <tr><td>{}</td><td>{}</td><td>{}</td><td>{:.1}%</td></tr>",
            xml_escape(file),
            file_totals.covered,
            file_totals.statements,
            file_totals.percent()
        );
    }
    let _ = writeln!(out, "    </table>");
    let _ = writeln!(out, "  </div>");
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}

/// Write `index.html` into the report directory, creating it as needed.
pub fn write(dir: &Path, coverage: &AggregatedCoverage) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)?;
    let page = render(coverage, Utc::now());
    std::fs::write(dir.join("index.html"), page)?;
    Ok(())
}

#[cfg(test)]
#[path = "html_tests.rs"]
mod tests;
