//! CSV record source.

use std::path::Path;

use crate::error::{EtlError, EtlResult};
use crate::types::Row;

/// Read a CSV file into rows keyed by the header line.
///
/// Rules:
///
/// - The first line is the header; every later line becomes one [`Row`], in file order.
/// - Values are kept verbatim (no trimming).
/// - A data line whose field count differs from the header's is a [`EtlError::Format`] error.
pub fn read_records(path: impl AsRef<Path>) -> EtlResult<Vec<Row>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    tracing::debug!(path = %path.display(), "reading records");
    let mut rdr = reader_builder().from_reader(file);
    read_records_from_reader(&mut rdr)
}

/// Read rows from an existing CSV reader.
///
/// The reader should be configured with headers and `flexible(true)` so that ragged lines reach
/// the field-count check here instead of failing inside the csv crate.
pub fn read_records_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> EtlResult<Vec<Row>> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let mut rows = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        let record = result?;
        if record.len() != headers.len() {
            // Fall back to header-relative numbering if the reader did not track positions.
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(row_idx0 as u64 + 2);
            return Err(EtlError::Format {
                line,
                expected: headers.len(),
                found: record.len(),
            });
        }

        rows.push(headers.iter().zip(record.iter()).collect::<Row>());
    }

    Ok(rows)
}

/// Reader configuration used by [`read_records`].
pub fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}
