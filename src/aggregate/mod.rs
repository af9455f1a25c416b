//! Aggregations over a loaded `SalesTable`.
//!
//! Everything here is a pure function of the table: no I/O, no logging.
//! The loader guarantees the table is non-empty.

pub mod pivot;
pub mod stats;

pub use pivot::*;
pub use stats::*;
