//! CSV record sink.

use std::path::Path;

use crate::error::EtlResult;
use crate::types::{Row, OUTPUT_COLUMNS};

/// Write rows to `path` with the fixed header `movieId,title,genres,genre_count`.
///
/// Rules:
///
/// - One header line, then one line per row in input order, `\n` terminated.
/// - Fields outside [`OUTPUT_COLUMNS`] are dropped; missing fields are written empty.
///
/// The file is created or truncated before writing, so a failure part-way through can leave a
/// partial file behind.
pub fn write_records(rows: &[Row], path: impl AsRef<Path>) -> EtlResult<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "writing records");
    write_records_to_writer(rows, file)
}

/// Write rows to any [`std::io::Write`] using the same rules as [`write_records`].
pub fn write_records_to_writer<W: std::io::Write>(rows: &[Row], writer: W) -> EtlResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(OUTPUT_COLUMNS)?;
    for row in rows {
        wtr.write_record(OUTPUT_COLUMNS.iter().map(|col| row.get(col).unwrap_or("")))?;
    }
    wtr.flush()?;
    Ok(())
}
