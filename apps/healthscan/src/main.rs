//! # Healthscan
//!
//! Business health scan: thirteen questions, one recommendation.
//!
//! Usage:
//!   healthscan                      # same as `healthscan run`
//!   healthscan run                  # interactive wizard, resumes saved progress
//!   healthscan score --json         # score the saved answers
//!   healthscan score --answers a.json --explain
//!   healthscan questions
//!   healthscan status
//!   healthscan reset

use clap::Parser;
use healthscan::cli::{self, Cli};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "healthscan=debug,healthscan_core=debug"
    } else {
        "healthscan=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.verbose);

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
