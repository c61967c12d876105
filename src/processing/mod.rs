//! In-memory transformations over the rows produced by ingestion.
//!
//! - [`count_genres()`]: genre count of a single `|`-separated field
//! - [`aggregate()`]: annotate rows with `genre_count` and build the genre frequency map
//! - [`find_max()`]: most frequent genre, first-seen wins ties
//! - [`GenreSummary`]: average genre count plus top genre, ready for reporting
//!
//! ## Example: aggregate → summarize
//!
//! ```rust
//! use movie_genre_etl::processing::{aggregate, GenreSummary};
//! use movie_genre_etl::types::Row;
//!
//! let rows = vec![
//!     Row::new().with("movieId", "1").with("genres", "Adventure|Comedy"),
//!     Row::new().with("movieId", "2").with("genres", "Comedy"),
//! ];
//!
//! let agg = aggregate(rows).unwrap();
//! assert_eq!(agg.rows[0].get("genre_count"), Some("2"));
//!
//! let summary = GenreSummary::from_aggregate(&agg);
//! assert_eq!(summary.average, Some(1.5));
//! assert_eq!(summary.top_genre.name, "Comedy");
//! ```

pub mod genres;
pub mod summary;

pub use genres::{aggregate, count_genres, record_genres, GenreAggregate, NO_GENRES_LISTED};
pub use summary::{find_max, GenreSummary};
