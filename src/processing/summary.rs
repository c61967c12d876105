//! Summary selection over an aggregated run.

use serde::Serialize;

use crate::types::{GenreFrequencies, TopGenre};

use super::genres::GenreAggregate;

/// Return the genre with the highest count.
///
/// Scans in first-seen order and only replaces the current maximum on a strictly greater count,
/// so the first genre to reach the maximum wins ties. An empty map yields `("", 0)`.
pub fn find_max(frequencies: &GenreFrequencies) -> TopGenre {
    let mut top = TopGenre::default();
    for (genre, count) in frequencies.iter() {
        if top.count < count {
            top = TopGenre::new(genre, count);
        }
    }
    top
}

/// The two values reported after each run: average genre count and most common genre.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreSummary {
    /// Rows processed.
    pub row_count: usize,
    /// Sum of per-row genre counts.
    pub total_count: u64,
    /// `total_count / row_count`, or `None` when no rows were processed.
    pub average: Option<f64>,
    /// Most frequent genre.
    pub top_genre: TopGenre,
}

impl GenreSummary {
    /// Derive the summary from an aggregation result.
    pub fn from_aggregate(aggregate: &GenreAggregate) -> Self {
        Self {
            row_count: aggregate.row_count,
            total_count: aggregate.total_count,
            average: average(aggregate.total_count, aggregate.row_count),
            top_genre: find_max(&aggregate.frequencies),
        }
    }
}

fn average(total: u64, rows: usize) -> Option<f64> {
    if rows == 0 {
        None
    } else {
        Some(total as f64 / rows as f64)
    }
}
