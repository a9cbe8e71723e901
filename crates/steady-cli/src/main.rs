//! Steady CLI application
//!
//! Thin front end over `steady-core`: builds a client from the config file,
//! `STEADY_*` environment variables and flags (in increasing precedence),
//! then issues one logical call.
//!
//! Set `RUST_LOG=steady_core=debug` (or pass `--verbose`) to trace attempts,
//! retries and circuit breaker transitions.

mod args;
mod commands;
mod console;
mod router;

use args::Cli;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let console = console::CliConsole::new(cli.verbose);
    match router::route(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            console.report(&error);
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with environment-based filtering
fn init_tracing(verbose: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if verbose {
        if let Ok(directive) = "steady_core=debug".parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
