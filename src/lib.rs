//! `sales-report` library crate.
//!
//! The binary (`sales-report`) is a thin wrapper around this library so that:
//!
//! - the pipeline is testable without spawning processes
//! - other front-ends (GUI, scripts) can call `generate_report` directly
//! - loading, aggregation, charts and workbook output stay separate

pub mod aggregate;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;

pub use app::pipeline::{ReportSummary, generate_report, generate_report_in};
pub use domain::ReportOptions;
pub use error::{AppError, ErrorKind};
