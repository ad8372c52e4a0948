use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use vacancy_analytics::ingestion::{
    load_vacancies, FileObserver, IngestionContext, IngestionObserver, IngestionOptions, IngestionSeverity,
    IngestionStats,
};
use vacancy_analytics::ReportError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<IngestionStats>>,
    failures: Mutex<Vec<IngestionSeverity>>,
    alerts: Mutex<Vec<IngestionSeverity>>,
}

impl IngestionObserver for RecordingObserver {
    fn on_success(&self, _ctx: &IngestionContext, stats: IngestionStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &ReportError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &ReportError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("vacancy-analytics-{name}-{nanos}.log"))
}

fn options_with(obs: Arc<dyn IngestionObserver>) -> IngestionOptions {
    IngestionOptions {
        observer: Some(obs),
        alert_at_or_above: IngestionSeverity::Critical,
        ..Default::default()
    }
}

#[test]
fn observer_receives_counts_on_success() {
    let obs = Arc::new(RecordingObserver::default());
    let loaded = load_vacancies("tests/fixtures/vacancies.csv", &options_with(obs.clone())).unwrap();

    assert_eq!(loaded.vacancies.len(), 6);
    assert_eq!(loaded.dropped_rows, 1);
    assert_eq!(
        obs.successes.lock().unwrap().clone(),
        vec![IngestionStats {
            rows: 6,
            dropped_rows: 1,
            vacancies: 6,
        }]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_missing_file() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = load_vacancies("tests/fixtures/does_not_exist.csv", &options_with(obs.clone())).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![IngestionSeverity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![IngestionSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_bad_record() {
    let obs = Arc::new(RecordingObserver::default());
    let err = load_vacancies("tests/fixtures/bad_currency.csv", &options_with(obs.clone())).unwrap_err();

    assert!(err.to_string().contains("row 3"));
    assert_eq!(obs.failures.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
    assert!(obs.successes.lock().unwrap().is_empty());
}

#[test]
fn file_observer_appends_json_lines() {
    let path = tmp_file("events");
    let opts = options_with(Arc::new(FileObserver::new(&path)));

    load_vacancies("tests/fixtures/vacancies.csv", &opts).unwrap();
    let _ = load_vacancies("tests/fixtures/does_not_exist.csv", &opts).unwrap_err();

    let content = std::fs::read_to_string(&path).unwrap();
    let events: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(events.len(), 3);

    assert_eq!(events[0]["event"], "loaded");
    assert_eq!(events[0]["rows"], 6);
    assert_eq!(events[0]["dropped_rows"], 1);
    assert_eq!(events[0]["vacancies"], 6);
    assert_eq!(events[1]["event"], "failed");
    assert_eq!(events[1]["severity"], "critical");
    assert_eq!(events[2]["event"], "alert");
    assert!(events[2]["error"].as_str().unwrap().contains("does_not_exist.csv"));

    std::fs::remove_file(&path).unwrap();
}
