//! retest binary entry point.

mod cmd_run;
mod cmd_status;

use clap::Parser;
use retest::cli::{Cli, Command};
use retest::error::ExitCode;

fn main() -> std::process::ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Run(args) => cmd_run::run(&cli, args),
        Command::Status(args) => cmd_status::run(&cli, args),
    };

    match result {
        Ok(code) => code.into(),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::Fatal.into()
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("RETEST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
