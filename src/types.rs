//! Core data model types for the pipeline.
//!
//! Rows are read into an ordered list of named string fields ([`Row`]); the aggregator appends a
//! computed `genre_count` field and accumulates a [`GenreFrequencies`] map alongside.

use indexmap::IndexMap;
use serde::Serialize;

/// Column holding the movie id.
pub const MOVIE_ID: &str = "movieId";
/// Column holding the movie title.
pub const TITLE: &str = "title";
/// Column holding the `|`-separated genre list.
pub const GENRES: &str = "genres";
/// Column added by the aggregator.
pub const GENRE_COUNT: &str = "genre_count";

/// Fixed column order of the enhanced output file.
pub const OUTPUT_COLUMNS: [&str; 4] = [MOVIE_ID, TITLE, GENRES, GENRE_COUNT];

/// A single record: an ordered mapping of field name to string value.
///
/// Equality is order-sensitive: two rows with the same fields in a different order differ.
#[derive(Debug, Clone, Default)]
pub struct Row {
    fields: IndexMap<String, String>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields in the row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the value of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Set `name` to `value`.
    ///
    /// An existing field keeps its position; a new field is appended.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Builder-style [`Row::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The computed genre count, if the row has been annotated.
    pub fn genre_count(&self) -> Option<u64> {
        self.get(GENRE_COUNT).and_then(|v| v.parse().ok())
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.fields.iter().eq(other.fields.iter())
    }
}

impl Eq for Row {}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.set(k, v);
        }
        row
    }
}

/// Genre name → occurrence count, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreFrequencies {
    counts: IndexMap<String, u64>,
}

impl GenreFrequencies {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `genre`, inserting it with a count of 1 if unseen.
    pub fn increment(&mut self, genre: &str) {
        *self.counts.entry(genre.to_owned()).or_insert(0) += 1;
    }

    /// Set the count for `genre`. A new genre is appended to the iteration order.
    pub fn insert(&mut self, genre: impl Into<String>, count: u64) {
        self.counts.insert(genre.into(), count);
    }

    /// Count for `genre`, if seen.
    pub fn get(&self, genre: &str) -> Option<u64> {
        self.counts.get(genre).copied()
    }

    /// Number of distinct genres.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no genre has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(genre, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for GenreFrequencies {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut map = GenreFrequencies::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// The most frequent genre and its count. Empty name and zero count when nothing was seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopGenre {
    /// Genre name.
    pub name: String,
    /// Occurrence count.
    pub count: u64,
}

impl TopGenre {
    /// Create a new top-genre pair.
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}
