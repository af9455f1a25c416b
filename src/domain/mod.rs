//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the cleaned input table (`SalesTable`, `SalesRecord`)
//! - aggregate views (`CategoryTotals`, `DailyCategoryMatrix`, `SummaryStats`)
//! - report configuration (`ReportOptions`)

pub mod types;

pub use types::*;
