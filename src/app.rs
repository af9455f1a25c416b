//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - resolves report options (file + flags)
//! - runs the report pipeline
//! - prints the run summary

use std::fs::File;
use std::path::Path;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::Cli;
use crate::domain::ReportOptions;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `sales-report` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(&cli);

    let options = report_options_from_args(&cli)?;
    let summary = pipeline::generate_report(&cli.input, &cli.output, &options)?;

    println!("{}", crate::report::format_report_summary(&summary));
    Ok(())
}

fn init_logging(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so the summary on stdout stays clean.
    let _ = fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Options file (if any) overridden by the `--no-*` flags.
pub fn report_options_from_args(cli: &Cli) -> Result<ReportOptions, AppError> {
    let mut options = match &cli.options {
        Some(path) => read_options_file(path)?,
        None => ReportOptions::default(),
    };

    if cli.no_pivot {
        options.include_pivot = false;
    }
    if cli.no_charts {
        options.include_charts = false;
    }
    if cli.no_stats {
        options.include_stats = false;
    }

    Ok(options)
}

fn read_options_file(path: &Path) -> Result<ReportOptions, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open options file '{}': {e}", path.display())))?;
    serde_json::from_reader(file)
        .map_err(|e| AppError::input(format!("Invalid options file '{}': {e}", path.display())))
}
