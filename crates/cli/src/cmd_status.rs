// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `retest status` command implementation.
//!
//! Shows (or clears) the failure list recorded by the last run.

use retest::cli::{Cli, StatusArgs};
use retest::config::Project;
use retest::error::ExitCode;
use retest::status::FailureStatus;

/// Run the `retest status` command.
pub fn run(cli: &Cli, args: &StatusArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let project = Project::resolve(&cwd, cli.config.as_deref())?;
    let status_path = project.status_path();

    if args.clear {
        FailureStatus::clear(&status_path)?;
        println!("Cleared stored failures.");
        return Ok(ExitCode::Success);
    }

    match FailureStatus::load(&status_path) {
        Some(status) => {
            println!("{} test file(s) failed on the last run:", status.failed.len());
            for path in &status.failed {
                println!("  {}", path.display());
            }
        }
        None => println!("No stored failures."),
    }
    Ok(ExitCode::Success)
}
