//! Command-line parsing for the sales report generator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! loading/aggregation/rendering code.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "sales-report",
    version,
    about = "Turn a sales CSV into a formatted Excel report"
)]
pub struct Cli {
    /// Sales CSV with Date, Category, Product, Sales and Quantity columns.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Workbook to write (`.xlsx` is appended when missing).
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Skip the "Category Sales" and "Daily Sales" pivot sheets.
    #[arg(long)]
    pub no_pivot: bool,

    /// Skip the "Charts" sheet.
    #[arg(long)]
    pub no_charts: bool,

    /// Skip the "Summary Stats" sheet.
    #[arg(long)]
    pub no_stats: bool,

    /// JSON file with report options, e.g. `{"includeCharts": false}`.
    ///
    /// `--no-*` flags take precedence over the file.
    #[arg(long, value_name = "JSON")]
    pub options: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
