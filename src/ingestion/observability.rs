use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::ReportError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestionSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the run is aborted).
    Error,
    /// Critical error (the input could not be read at all).
    Critical,
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// The input path used for loading.
    pub path: PathBuf,
}

/// Counters reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IngestionStats {
    /// Rows whose shape matched the header.
    pub rows: usize,
    /// Rows skipped for a field-count mismatch.
    pub dropped_rows: usize,
    /// Vacancies built from the accepted rows.
    pub vacancies: usize,
}

/// Observer interface for load outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait IngestionObserver: Send + Sync {
    /// Called when loading succeeds.
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Called when loading fails.
    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &ReportError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &ReportError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
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

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &ReportError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &ReportError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Emits load events through `tracing`.
///
/// Dropped rows are reported at `warn` so that a silently shrinking input stays visible. Each
/// failure is logged once at `error`, whether or not it crosses the alert threshold.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl IngestionObserver for TracingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        info!(
            path = %ctx.path.display(),
            rows = stats.rows,
            vacancies = stats.vacancies,
            "loaded vacancies"
        );
        if stats.dropped_rows > 0 {
            warn!(
                path = %ctx.path.display(),
                dropped = stats.dropped_rows,
                "dropped rows with a field count different from the header"
            );
        }
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &ReportError) {
        error!(path = %ctx.path.display(), ?severity, %error, "failed to load vacancies");
    }

    /// `on_failure` has already logged the error; an alert adds nothing to the log.
    fn on_alert(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &ReportError) {}
}

/// One line of a [`FileObserver`] log.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum LoadEvent<'a> {
    Loaded {
        ts: u64,
        path: String,
        #[serde(flatten)]
        stats: IngestionStats,
    },
    Failed {
        ts: u64,
        path: String,
        severity: IngestionSeverity,
        error: &'a str,
    },
    Alert {
        ts: u64,
        path: String,
        severity: IngestionSeverity,
        error: &'a str,
    },
}

/// Appends load events to a file as JSON lines.
///
/// Each line is an object with an `event` tag of `loaded`, `failed` or `alert`.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Log to `path`, creating it on the first event.
    ///
    /// Write failures are ignored; the event log never aborts a run.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append(&self, event: &LoadEvent<'_>) {
        let Ok(line) = serde_json::to_string(event) else {
            return;
        };
        let _guard = self.lock.lock().ok();
        match OpenOptions::new().create(true).append(true).open(&self.path) {
            Ok(mut f) => {
                if let Err(e) = writeln!(f, "{line}") {
                    warn!(log = %self.path.display(), error = %e, "event log write failed");
                }
            }
            Err(e) => warn!(log = %self.path.display(), error = %e, "event log unavailable"),
        }
    }
}

impl IngestionObserver for FileObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.append(&LoadEvent::Loaded {
            ts: unix_ts(),
            path: ctx.path.display().to_string(),
            stats,
        });
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &ReportError) {
        let error = error.to_string();
        self.append(&LoadEvent::Failed {
            ts: unix_ts(),
            path: ctx.path.display().to_string(),
            severity,
            error: &error,
        });
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &ReportError) {
        let error = error.to_string();
        self.append(&LoadEvent::Alert {
            ts: unix_ts(),
            path: ctx.path.display().to_string(),
            severity,
            error: &error,
        });
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
