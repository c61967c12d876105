//! `movie-genre-etl` reads a movies CSV whose `genres` column holds `|`-separated genre names,
//! annotates every row with a `genre_count`, and writes an enhanced CSV with the fixed header
//! `movieId,title,genres,genre_count`.
//!
//! Along the way it computes the average genre count per row and the most common genre, which the
//! caller reports (the bundled binary logs them through `tracing`).
//!
//! ## Genre counting rules
//!
//! - A genre field is split on `|`; segments are neither trimmed nor deduplicated.
//! - A field whose first segment is `(no genres listed)` counts as 0 genres, but the sentinel is
//!   still recorded in the frequency map as its own key.
//! - An empty genre field is rejected as invalid input.
//! - The most common genre is the first one (in first-seen order) to reach the highest count.
//!
//! ## Quick example: run the whole pipeline
//!
//! ```no_run
//! use movie_genre_etl::pipeline::{run_pipeline, PipelineOptions};
//!
//! # fn main() -> Result<(), movie_genre_etl::EtlError> {
//! let summary = run_pipeline("movies.csv", "movie_enhanced.csv", &PipelineOptions::default())?;
//! if let Some(avg) = summary.average {
//!     println!("Average is: {avg}");
//! }
//! println!(
//!     "most common genre is {} with {} count.",
//!     summary.top_genre.name, summary.top_genre.count
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Stage by stage
//!
//! ```rust
//! use movie_genre_etl::export::write_records_to_writer;
//! use movie_genre_etl::ingestion::csv::{read_records_from_reader, reader_builder};
//! use movie_genre_etl::processing::{aggregate, find_max};
//!
//! let input = "movieId,title,genres\n1,Toy Story (1995),Animation|Children|Comedy\n";
//! let mut rdr = reader_builder().from_reader(input.as_bytes());
//! let rows = read_records_from_reader(&mut rdr).unwrap();
//!
//! let agg = aggregate(rows).unwrap();
//! assert_eq!(agg.total_count, 3);
//! assert_eq!(find_max(&agg.frequencies).name, "Animation");
//!
//! let mut out = Vec::new();
//! write_records_to_writer(&agg.rows, &mut out).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "movieId,title,genres,genre_count\n1,Toy Story (1995),Animation|Children|Comedy,3\n"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV record source
//! - [`processing`]: genre counting, aggregation and summary selection
//! - [`export`]: CSV record sink
//! - [`pipeline`]: sequential driver with observer hooks
//! - [`config`]: run parameters loaded from TOML
//! - [`types`]: rows and the genre frequency map
//! - [`error`]: error types used across the crate

pub mod config;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod types;

pub use error::{ErrorKind, EtlError, EtlResult};
