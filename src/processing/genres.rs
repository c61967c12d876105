//! Per-row genre counting and frequency aggregation.

use crate::error::{EtlError, EtlResult};
use crate::types::{GenreFrequencies, Row, GENRES, GENRE_COUNT};

/// Separator between genre segments in the `genres` field.
pub const GENRE_SEPARATOR: char = '|';

/// Value used by the source data for movies without any genre.
pub const NO_GENRES_LISTED: &str = "(no genres listed)";

/// Count the genres in a `|`-separated genre field.
///
/// Segments are neither trimmed nor deduplicated, so `"comedy | drama"` counts 2. If the first
/// segment is [`NO_GENRES_LISTED`] the count is 0 whatever follows it.
///
/// Returns [`EtlError::InvalidInput`] for an empty field.
pub fn count_genres(genre_field: &str) -> EtlResult<u64> {
    if genre_field.is_empty() {
        return Err(EtlError::invalid_input("genres field is empty"));
    }

    let mut segments = genre_field.split(GENRE_SEPARATOR);
    if segments.next() == Some(NO_GENRES_LISTED) {
        return Ok(0);
    }
    Ok(1 + segments.count() as u64)
}

/// Add one occurrence per segment of `genre_field` to `frequencies`.
///
/// The sentinel [`NO_GENRES_LISTED`] is recorded as a key like any other segment.
pub fn record_genres(genre_field: &str, frequencies: &mut GenreFrequencies) {
    for genre in genre_field.split(GENRE_SEPARATOR) {
        frequencies.increment(genre);
    }
}

/// Result of [`aggregate`]: the annotated rows plus raw totals.
///
/// The average is left to the caller (see [`super::GenreSummary`]) so that an empty input never
/// divides by zero here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenreAggregate {
    /// Input rows, in input order, each with a `genre_count` field.
    pub rows: Vec<Row>,
    /// Occurrences of every genre segment seen.
    pub frequencies: GenreFrequencies,
    /// Number of rows processed.
    pub row_count: usize,
    /// Sum of the per-row genre counts.
    pub total_count: u64,
}

/// Annotate every row with its genre count and accumulate genre frequencies.
///
/// Rows are consumed and returned in the same order with a `genre_count` field set.
///
/// Returns [`EtlError::InvalidInput`] if a row has no `genres` field or an empty one.
pub fn aggregate(rows: Vec<Row>) -> EtlResult<GenreAggregate> {
    let mut frequencies = GenreFrequencies::new();
    let mut total_count = 0u64;
    let mut annotated = rows;

    for (idx, row) in annotated.iter_mut().enumerate() {
        let genres = row.get(GENRES).ok_or_else(|| {
            EtlError::invalid_input(format!(
                "row {} has no '{GENRES}' field. fields={:?}",
                idx + 1,
                row.field_names().collect::<Vec<_>>()
            ))
        })?;

        let count = count_genres(genres).map_err(|_| {
            EtlError::invalid_input(format!("row {} has an empty '{GENRES}' field", idx + 1))
        })?;
        record_genres(genres, &mut frequencies);

        row.set(GENRE_COUNT, count.to_string());
        total_count += count;
    }

    tracing::debug!(
        rows = annotated.len(),
        distinct_genres = frequencies.len(),
        total_count,
        "aggregated genre counts"
    );

    Ok(GenreAggregate {
        row_count: annotated.len(),
        rows: annotated,
        frequencies,
        total_count,
    })
}
