//! Output writers.
//!
//! - [`csv`]: enhanced movies CSV with the `genre_count` column

pub mod csv;

pub use self::csv::{write_records, write_records_to_writer};
