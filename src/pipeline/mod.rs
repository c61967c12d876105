//! Read → transform → write driver.
//!
//! [`run_pipeline`] runs the three stages strictly in order, fully in memory:
//!
//! 1. [`crate::ingestion::read_records`]
//! 2. [`crate::processing::aggregate`] (plus [`crate::processing::GenreSummary`])
//! 3. [`crate::export::write_records`]
//!
//! The first failing stage stops the run and its error is returned unchanged. If a
//! [`PipelineObserver`] is configured, stage outcomes and the final [`RunSummary`] are reported to
//! it.

mod observability;

use std::fmt;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::error::{EtlError, EtlResult};
use crate::export::write_records;
use crate::ingestion::read_records;
use crate::processing::{aggregate, GenreSummary};
use crate::types::TopGenre;

pub use observability::{
    CompositeObserver, FileObserver, PipelineObserver, Severity, Stage, StageContext, StageStats,
    TracingObserver,
};

/// Options controlling a pipeline run.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct PipelineOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn PipelineObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Outcome of a successful run: the values a caller logs or exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Input CSV.
    pub input: PathBuf,
    /// Enhanced output CSV.
    pub output: PathBuf,
    /// Rows read and written.
    pub row_count: usize,
    /// Sum of per-row genre counts.
    pub total_count: u64,
    /// Average genre count per row, `None` for an empty input.
    pub average: Option<f64>,
    /// Most common genre.
    pub top_genre: TopGenre,
}

impl RunSummary {
    fn new(input: &Path, output: &Path, summary: GenreSummary) -> Self {
        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            row_count: summary.row_count,
            total_count: summary.total_count,
            average: summary.average,
            top_genre: summary.top_genre,
        }
    }

    /// Write this summary as pretty-printed JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> EtlResult<()> {
        let file = std::fs::File::create(path)?;
        let mut w = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut w, self)?;
        w.flush()?;
        Ok(())
    }
}

/// Run read → aggregate → write for `input` and `output`.
///
/// # Examples
///
/// ```no_run
/// use movie_genre_etl::pipeline::{run_pipeline, PipelineOptions};
///
/// # fn main() -> Result<(), movie_genre_etl::EtlError> {
/// let summary = run_pipeline("movies.csv", "movie_enhanced.csv", &PipelineOptions::default())?;
/// println!("rows={} top={}", summary.row_count, summary.top_genre.name);
/// # Ok(())
/// # }
/// ```
///
/// ## Observability (tracing events + alert threshold)
///
/// ```no_run
/// use std::sync::Arc;
///
/// use movie_genre_etl::pipeline::{run_pipeline, PipelineOptions, Severity, TracingObserver};
///
/// let opts = PipelineOptions {
///     observer: Some(Arc::new(TracingObserver)),
///     alert_at_or_above: Severity::Critical,
/// };
///
/// // A missing input is an I/O failure, which is Critical and triggers `on_alert`.
/// let _err = run_pipeline("does_not_exist.csv", "out.csv", &opts).unwrap_err();
/// ```
pub fn run_pipeline(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &PipelineOptions,
) -> EtlResult<RunSummary> {
    let input = input.as_ref();
    let output = output.as_ref();
    let reporter = Reporter { options };

    let read_ctx = StageContext {
        stage: Stage::Read,
        path: Some(input.to_path_buf()),
    };
    let rows = reporter.report(&read_ctx, read_records(input), |rows| rows.len())?;

    let transform_ctx = StageContext {
        stage: Stage::Transform,
        path: None,
    };
    let agg = reporter.report(&transform_ctx, aggregate(rows), |agg| agg.row_count)?;
    let summary = GenreSummary::from_aggregate(&agg);

    let write_ctx = StageContext {
        stage: Stage::Write,
        path: Some(output.to_path_buf()),
    };
    reporter.report(&write_ctx, write_records(&agg.rows, output), |_| agg.rows.len())?;

    let summary = RunSummary::new(input, output, summary);
    if let Some(obs) = options.observer.as_ref() {
        obs.on_summary(&summary);
    }
    Ok(summary)
}

struct Reporter<'a> {
    options: &'a PipelineOptions,
}

impl Reporter<'_> {
    fn report<T>(
        &self,
        ctx: &StageContext,
        result: EtlResult<T>,
        rows: impl FnOnce(&T) -> usize,
    ) -> EtlResult<T> {
        let Some(obs) = self.options.observer.as_ref() else {
            return result;
        };

        match &result {
            Ok(value) => obs.on_stage_success(ctx, StageStats { rows: rows(value) }),
            Err(e) => self.report_failure(obs.as_ref(), ctx, e),
        }
        result
    }

    fn report_failure(&self, obs: &dyn PipelineObserver, ctx: &StageContext, e: &EtlError) {
        let sev = Severity::for_error(e);
        obs.on_failure(ctx, sev, e);
        if sev >= self.options.alert_at_or_above {
            obs.on_alert(ctx, sev, e);
        }
    }
}
