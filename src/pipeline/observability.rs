use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{EtlError, ErrorKind};

use super::RunSummary;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Error-level event (stage failed).
    Error,
    /// Critical error (I/O failures).
    Critical,
}

impl Severity {
    /// Severity assigned to a failed stage.
    pub fn for_error(error: &EtlError) -> Self {
        match error.kind() {
            ErrorKind::Io => Severity::Critical,
            ErrorKind::InvalidInput | ErrorKind::Format => Severity::Error,
        }
    }
}

/// The three pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the input CSV.
    Read,
    /// Counting genres and aggregating frequencies.
    Transform,
    /// Writing the enhanced CSV.
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Read => "read",
            Stage::Transform => "transform",
            Stage::Write => "write",
        };
        f.write_str(name)
    }
}

/// Context about a stage execution.
#[derive(Debug, Clone)]
pub struct StageContext {
    /// Stage being reported.
    pub stage: Stage,
    /// File the stage reads or writes; `None` for the in-memory transform.
    pub path: Option<PathBuf>,
}

impl StageContext {
    fn path_display(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Minimal stats reported when a stage succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageStats {
    /// Rows read, transformed or written.
    pub rows: usize,
}

/// Observer interface for pipeline outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait PipelineObserver: Send + Sync {
    /// Called after each stage succeeds.
    fn on_stage_success(&self, _ctx: &StageContext, _stats: StageStats) {}

    /// Called when a stage fails. No later stage runs.
    fn on_failure(&self, _ctx: &StageContext, _severity: Severity, _error: &EtlError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &StageContext, severity: Severity, error: &EtlError) {
        self.on_failure(ctx, severity, error)
    }

    /// Called once after all stages succeed.
    fn on_summary(&self, _summary: &RunSummary) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_stage_success(&self, ctx: &StageContext, stats: StageStats) {
        for o in &self.observers {
            o.on_stage_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &StageContext, severity: Severity, error: &EtlError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &StageContext, severity: Severity, error: &EtlError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }

    fn on_summary(&self, summary: &RunSummary) {
        for o in &self.observers {
            o.on_summary(summary);
        }
    }
}

/// Emits pipeline events through `tracing`.
///
/// Failures log at `warn`; only alerts log at `error`.
///
/// Nothing is printed unless the caller installed a subscriber.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_stage_success(&self, ctx: &StageContext, stats: StageStats) {
        tracing::info!(
            stage = %ctx.stage,
            path = %ctx.path_display(),
            rows = stats.rows,
            "stage complete"
        );
    }

    fn on_failure(&self, ctx: &StageContext, severity: Severity, error: &EtlError) {
        tracing::warn!(
            stage = %ctx.stage,
            path = %ctx.path_display(),
            ?severity,
            %error,
            "stage failed"
        );
    }

    fn on_alert(&self, ctx: &StageContext, severity: Severity, error: &EtlError) {
        tracing::error!(
            stage = %ctx.stage,
            path = %ctx.path_display(),
            ?severity,
            %error,
            "ALERT"
        );
    }

    fn on_summary(&self, summary: &RunSummary) {
        tracing::debug!(
            rows = summary.row_count,
            total_count = summary.total_count,
            top_genre = %summary.top_genre.name,
            "run complete"
        );
    }
}

/// Appends pipeline events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_stage_success(&self, ctx: &StageContext, stats: StageStats) {
        self.append_line(&format!(
            "{} ok stage={} path={} rows={}",
            unix_ts(),
            ctx.stage,
            ctx.path_display(),
            stats.rows
        ));
    }

    fn on_failure(&self, ctx: &StageContext, severity: Severity, error: &EtlError) {
        self.append_line(&format!(
            "{} fail severity={:?} stage={} path={} err={}",
            unix_ts(),
            severity,
            ctx.stage,
            ctx.path_display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &StageContext, severity: Severity, error: &EtlError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} stage={} path={} err={}",
            unix_ts(),
            severity,
            ctx.stage,
            ctx.path_display(),
            error
        ));
    }

    fn on_summary(&self, summary: &RunSummary) {
        let average = summary
            .average
            .map(|a| a.to_string())
            .unwrap_or_else(|| "none".to_string());
        self.append_line(&format!(
            "{} summary rows={} average={} top_genre={} top_count={}",
            unix_ts(),
            summary.row_count,
            average,
            summary.top_genre.name,
            summary.top_genre.count
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
