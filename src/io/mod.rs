//! Input helpers.
//!
//! - encoding fallbacks (`encoding`)
//! - CSV ingest + cleaning (`ingest`)

pub mod encoding;
pub mod ingest;

pub use encoding::*;
pub use ingest::*;
