//! Report assembly and output.
//!
//! - library-independent sheet model (`sheet`)
//! - header/column styling rules (`style`)
//! - xlsx serialization + atomic save (`workbook`)
//! - currency and summary text (`format`)

pub mod format;
pub mod sheet;
pub mod style;
pub mod workbook;

pub use format::*;
pub use sheet::*;
pub use style::*;
pub use workbook::*;
