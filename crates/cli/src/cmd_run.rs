// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `retest run` command implementation.
//!
//! Resolves the project, builds the run plan, executes it, prints the
//! per-file results and summary, and writes any requested reports.

use std::io::Write;
use std::path::Path;

use termcolor::{ColorChoice, StandardStream, WriteColor};

use retest::cli::{Cli, RunArgs};
use retest::color::{resolve_color, scheme};
use retest::config::Project;
use retest::error::ExitCode;
use retest::harness::{ProcessHarness, TestOutcome};
use retest::report;
use retest::runner::{self, CoveragePlan, RunPlan, RunSummary, Selection};
use retest::verbose::VerboseLogger;

/// Run the `retest run` command.
pub fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let project = Project::resolve(&cwd, cli.config.as_deref())?;
    let verbose = VerboseLogger::new(args.verbose);

    let coverage = args.coverage_enabled().then(|| CoveragePlan {
        ignore: project.config.coverage.ignore.clone(),
        folder: args
            .coverage_folder
            .clone()
            .or_else(|| project.config.coverage.folder.clone()),
    });

    let plan = RunPlan {
        test_dir: project.test_dir(),
        status_path: project.status_path(),
        pattern: project.config.project.pattern.clone(),
        max_depth: Some(args.max_depth),
        only_failed: args.only_failed,
        filters: args.filters.clone(),
        coverage,
        jobs: args.jobs,
    };

    log_plan(&verbose, &project, &plan);

    let harness = ProcessHarness::new(project.config.runner.command.clone());
    let summary = runner::execute(&plan, &harness)?;

    log_selection(&verbose, args, &summary);

    let color = resolve_color(args.color, args.no_color);
    print_results(color, &plan.test_dir, &summary)?;

    if let Some(xml_path) = &args.xml {
        report::junit::write(xml_path, &summary, &plan.test_dir)?;
    }
    if let Some(coverage) = &summary.coverage {
        if let Some(clover_path) = &args.coverage_clover {
            report::clover::write(clover_path, coverage)?;
        }
        if let Some(html_dir) = &args.coverage_html {
            report::html::write(html_dir, coverage)?;
        }
    }

    Ok(summary.exit_code())
}

fn log_plan(verbose: &VerboseLogger, project: &Project, plan: &RunPlan) {
    if !verbose.is_enabled() {
        return;
    }
    verbose.section("Configuration");
    verbose.log(&format!("Root: {}", project.root.display()));
    verbose.log(&format!("Test dir: {}", plan.test_dir.display()));
    verbose.log(&format!("Pattern: {}", plan.pattern));
    verbose.log(&format!("Status file: {}", plan.status_path.display()));
    if let Some(coverage) = &plan.coverage {
        verbose.log(&format!("Coverage ignore: {}", coverage.ignore));
        match &coverage.folder {
            Some(folder) => verbose.log(&format!("Coverage folder: {}", folder)),
            None => verbose.log("Coverage folder: (unset)"),
        }
    }
}

fn log_selection(verbose: &VerboseLogger, args: &RunArgs, summary: &RunSummary) {
    if !verbose.is_enabled() {
        return;
    }
    verbose.section("Selection");
    match summary.selection {
        Selection::Memoized => {
            verbose.log(&format!(
                "Re-running {} previously failed test file(s)",
                summary.outcomes.len()
            ));
        }
        Selection::Discovered(stats) => {
            if args.only_failed {
                verbose.log("No stored failures, falling back to a full scan");
            }
            verbose.log(&format!(
                "Scanned {} files ({} errors), selected {}",
                stats.files_seen,
                stats.errors,
                summary.outcomes.len()
            ));
        }
    }
}

fn print_results(
    color: ColorChoice,
    test_dir: &Path,
    summary: &RunSummary,
) -> anyhow::Result<()> {
    let mut stdout = StandardStream::stdout(color);

    if summary.outcomes.is_empty() {
        writeln!(stdout, "No test files found.")?;
        return Ok(());
    }

    for outcome in &summary.outcomes {
        print_outcome(&mut stdout, test_dir, outcome)?;
    }

    let passed = summary.outcomes.len() - summary.failed.len();
    writeln!(stdout)?;
    if summary.failed.is_empty() {
        writeln!(
            stdout,
            "{} test file(s) run: {} passed ({:.2}s)",
            summary.outcomes.len(),
            passed,
            summary.elapsed.as_secs_f64()
        )?;
    } else {
        writeln!(
            stdout,
            "{} test file(s) run: {} passed, {} failed ({:.2}s)",
            summary.outcomes.len(),
            passed,
            summary.failed.len(),
            summary.elapsed.as_secs_f64()
        )?;
    }
    Ok(())
}

fn print_outcome(
    stdout: &mut StandardStream,
    test_dir: &Path,
    outcome: &TestOutcome,
) -> anyhow::Result<()> {
    let relative = outcome.path.strip_prefix(test_dir).unwrap_or(&outcome.path);

    if outcome.passed {
        stdout.set_color(&scheme::pass())?;
        write!(stdout, "ok  ")?;
    } else {
        stdout.set_color(&scheme::fail())?;
        write!(stdout, "FAIL")?;
    }
    stdout.reset()?;
    write!(stdout, " ")?;
    stdout.set_color(&scheme::path())?;
    write!(stdout, "{}", relative.display())?;
    stdout.reset()?;
    writeln!(stdout, " ({:.2}s)", outcome.duration.as_secs_f64())?;

    if !outcome.passed {
        if let Some(error) = &outcome.error {
            writeln!(stdout, "     {}", error)?;
        } else {
            for line in outcome.stderr.lines() {
                writeln!(stdout, "     {}", line)?;
            }
        }
    }
    Ok(())
}
