use std::sync::{Arc, Mutex};

use data_sweeper::IngestionError;
use data_sweeper::ingestion::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionOptions, IngestionSeverity, IngestionStats,
    TracingObserver, ingest_bytes, ingest_from_path,
};
use data_sweeper::types::TabularFormat;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<(String, IngestionStats)>>,
    failures: Mutex<Vec<IngestionSeverity>>,
    alerts: Mutex<Vec<IngestionSeverity>>,
}

impl IngestionObserver for RecordingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.successes.lock().unwrap().push((ctx.file_name.clone(), stats));
    }

    fn on_failure(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &IngestionError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &IngestionError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = IngestionOptions {
        format: Some(TabularFormat::Csv),
        observer: Some(obs.clone()),
        alert_at_or_above: IngestionSeverity::Critical,
        ..Default::default()
    };

    // Missing file -> I/O error -> Critical
    let _ = ingest_from_path("tests/fixtures/does_not_exist.csv", &opts).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![IngestionSeverity::Critical]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![IngestionSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_non_critical_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = IngestionOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: IngestionSeverity::Critical,
        ..Default::default()
    };

    // Ragged row -> Error severity, below the alert threshold
    let _ = ingest_bytes("bad.csv", b"a\n1,2\n", &opts).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![IngestionSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn unsupported_extension_is_a_warning() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = IngestionOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: IngestionSeverity::Warning,
        ..Default::default()
    };

    let err = ingest_from_path("tests/fixtures/notes.txt", &opts).unwrap_err();
    assert!(matches!(err, IngestionError::UnsupportedFormat { .. }));
    assert_eq!(*obs.failures.lock().unwrap(), vec![IngestionSeverity::Warning]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![IngestionSeverity::Warning]);
}

#[test]
fn observer_receives_success_stats() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = IngestionOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };

    ingest_from_path("tests/fixtures/people.csv", &opts).unwrap();

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(successes.len(), 1);
    assert!(successes[0].0.ends_with("people.csv"));
    assert_eq!(successes[0].1, IngestionStats { rows: 4, columns: 5 });
}

#[test]
fn composite_observer_fans_out() {
    let a = Arc::new(RecordingObserver::default());
    let b = Arc::new(RecordingObserver::default());
    let composite = CompositeObserver::new(vec![
        a.clone() as Arc<dyn IngestionObserver>,
        b.clone() as Arc<dyn IngestionObserver>,
        Arc::new(TracingObserver) as Arc<dyn IngestionObserver>,
    ]);
    let opts = IngestionOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    let _ = ingest_bytes("notes.txt", b"hello", &opts).unwrap_err();

    assert_eq!(*a.failures.lock().unwrap(), vec![IngestionSeverity::Warning]);
    assert_eq!(*b.failures.lock().unwrap(), vec![IngestionSeverity::Warning]);
}
