//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::color::ColorMode;

/// A test-file runner with failure memoization and coverage reports
#[derive(Parser)]
#[command(name = "retest")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "RETEST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Discover and run test files
    Run(RunArgs),
    /// Show test files recorded as failing on the last run
    Status(StatusArgs),
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Restrict discovery to test files whose path contains FILTER
    #[arg(value_name = "FILTER")]
    pub filters: Vec<String>,

    /// Only run tests that failed last time
    #[arg(short = 'f', long)]
    pub only_failed: bool,

    /// Write a JUnit compatible XML log to FILE
    #[arg(long, value_name = "FILE")]
    pub xml: Option<PathBuf>,

    /// Write an HTML coverage report into DIR
    #[arg(long, value_name = "DIR")]
    pub coverage_html: Option<PathBuf>,

    /// Write a Clover format coverage report to FILE
    #[arg(long, value_name = "FILE")]
    pub coverage_clover: Option<PathBuf>,

    /// Only keep coverage data for paths containing PATH
    #[arg(long, value_name = "PATH")]
    pub coverage_folder: Option<String>,

    /// Number of worker threads (0 = one per core)
    #[arg(short = 'j', long, default_value_t = 0)]
    pub jobs: usize,

    /// Maximum directory depth to traverse during discovery
    #[arg(long, default_value_t = 100)]
    pub max_depth: usize,

    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,

    /// Disable color output (shorthand for --color=never)
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl RunArgs {
    /// True when any coverage report output was requested.
    pub fn coverage_enabled(&self) -> bool {
        self.coverage_html.is_some() || self.coverage_clover.is_some()
    }
}

#[derive(clap::Args)]
pub struct StatusArgs {
    /// Forget the recorded failures
    #[arg(long)]
    pub clear: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
