use std::sync::{Arc, Mutex};

use movie_genre_etl::pipeline::{
    run_pipeline, CompositeObserver, FileObserver, PipelineObserver, PipelineOptions, RunSummary,
    Severity, Stage, StageContext, StageStats,
};

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<(Stage, usize)>>,
    failures: Mutex<Vec<(Stage, Severity)>>,
    alerts: Mutex<Vec<Severity>>,
    summaries: Mutex<Vec<RunSummary>>,
}

impl PipelineObserver for RecordingObserver {
    fn on_stage_success(&self, ctx: &StageContext, stats: StageStats) {
        self.successes.lock().unwrap().push((ctx.stage, stats.rows));
    }

    fn on_failure(
        &self,
        ctx: &StageContext,
        severity: Severity,
        _error: &movie_genre_etl::EtlError,
    ) {
        self.failures.lock().unwrap().push((ctx.stage, severity));
    }

    fn on_alert(
        &self,
        _ctx: &StageContext,
        severity: Severity,
        _error: &movie_genre_etl::EtlError,
    ) {
        self.alerts.lock().unwrap().push(severity);
    }

    fn on_summary(&self, summary: &RunSummary) {
        self.summaries.lock().unwrap().push(summary.clone());
    }
}

fn options(obs: Arc<RecordingObserver>) -> PipelineOptions {
    PipelineOptions {
        observer: Some(obs),
        alert_at_or_above: Severity::Critical,
    }
}

#[test]
fn observer_sees_every_stage_and_the_summary() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.csv");
    let obs = Arc::new(RecordingObserver::default());

    run_pipeline("tests/fixtures/movies.csv", &out, &options(obs.clone())).unwrap();

    assert_eq!(
        obs.successes.lock().unwrap().clone(),
        vec![(Stage::Read, 7), (Stage::Transform, 7), (Stage::Write, 7)]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
    let summaries = obs.summaries.lock().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].top_genre.name, "Comedy");
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let obs = Arc::new(RecordingObserver::default());

    // Missing file -> Io error -> Critical
    let _ = run_pipeline(
        "tests/fixtures/does_not_exist.csv",
        dir.path().join("out.csv"),
        &options(obs.clone()),
    )
    .unwrap_err();

    assert_eq!(
        obs.failures.lock().unwrap().clone(),
        vec![(Stage::Read, Severity::Critical)]
    );
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![Severity::Critical]);
    assert!(obs.successes.lock().unwrap().is_empty());
    assert!(obs.summaries.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_without_alert_for_non_critical_error() {
    let dir = tempfile::tempdir().unwrap();
    let obs = Arc::new(RecordingObserver::default());

    // Ragged line -> Format error -> Error severity (not Critical) -> no alert
    let _ = run_pipeline(
        "tests/fixtures/ragged.csv",
        dir.path().join("out.csv"),
        &options(obs.clone()),
    )
    .unwrap_err();

    assert_eq!(
        obs.failures.lock().unwrap().clone(),
        vec![(Stage::Read, Severity::Error)]
    );
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn lowering_the_threshold_alerts_on_non_critical_errors() {
    let dir = tempfile::tempdir().unwrap();
    let obs = Arc::new(RecordingObserver::default());
    let opts = PipelineOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: Severity::Error,
    };

    let _ = run_pipeline("tests/fixtures/ragged.csv", dir.path().join("out.csv"), &opts).unwrap_err();

    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![Severity::Error]);
}

#[test]
fn transform_failure_is_reported_after_successful_read() {
    let dir = tempfile::tempdir().unwrap();
    let obs = Arc::new(RecordingObserver::default());

    let _ = run_pipeline(
        "tests/fixtures/no_genres_column.csv",
        dir.path().join("out.csv"),
        &options(obs.clone()),
    )
    .unwrap_err();

    assert_eq!(obs.successes.lock().unwrap().clone(), vec![(Stage::Read, 1)]);
    assert_eq!(
        obs.failures.lock().unwrap().clone(),
        vec![(Stage::Transform, Severity::Error)]
    );
}

#[test]
fn file_observer_appends_events_through_composite() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("etl.log");
    let recording = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn PipelineObserver>> = vec![
        recording.clone() as Arc<dyn PipelineObserver>,
        Arc::new(FileObserver::new(&log)),
    ];
    let composite = CompositeObserver::new(observers);
    let opts = PipelineOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    run_pipeline("tests/fixtures/movies.csv", dir.path().join("out.csv"), &opts).unwrap();

    let text = std::fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("ok stage=read"));
    assert!(lines[1].contains("ok stage=transform path=- rows=7"));
    assert!(lines[2].contains("ok stage=write"));
    assert!(lines[3].contains("summary rows=7"));
    assert!(lines[3].contains("top_genre=Comedy top_count=5"));
    assert_eq!(recording.successes.lock().unwrap().len(), 3);
}
