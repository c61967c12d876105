//! Input readers.
//!
//! - [`csv`]: header-keyed CSV rows via [`read_records`]

pub mod csv;

pub use self::csv::{read_records, read_records_from_reader};
