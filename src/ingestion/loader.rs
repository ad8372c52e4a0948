//! Path-based loading entrypoint.
//!
//! Most callers should use [`load_vacancies`], which parses a CSV file, builds a [`Vacancy`] per
//! accepted row and reports the outcome to an optional [`IngestionObserver`].

use std::error::Error as StdError;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::currency::ExchangeRateTable;
use crate::error::{ReportError, ReportResult};
use crate::types::Vacancy;

use super::csv::{read_rows_from_path, ParsedRows};
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};

/// Options controlling how vacancies are loaded.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// Currency multipliers used to normalize salaries.
    pub rates: ExchangeRateTable,
    /// Pass `name` and `area_name` through [`crate::processing::clean_text`].
    pub clean_text: bool,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("currencies", &self.rates.len())
            .field("clean_text", &self.clean_text)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            rates: ExchangeRateTable::default(),
            clean_text: false,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Vacancies loaded from one file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadedVacancies {
    pub vacancies: Vec<Vacancy>,
    /// Rows skipped for a field-count mismatch.
    pub dropped_rows: usize,
}

/// Load every vacancy from a CSV file.
///
/// The first invalid vacancy aborts the load: there is no skip-and-continue for bad salaries,
/// currencies or dates. Rows with the wrong shape are dropped and counted instead.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/drop/vacancy counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
///
/// use vacancy_analytics::ingestion::{load_vacancies, IngestionOptions, TracingObserver};
///
/// # fn main() -> Result<(), vacancy_analytics::ReportError> {
/// let opts = IngestionOptions {
///     observer: Some(Arc::new(TracingObserver)),
///     ..Default::default()
/// };
/// let loaded = load_vacancies("vacancies.csv", &opts)?;
/// println!("vacancies={} dropped={}", loaded.vacancies.len(), loaded.dropped_rows);
/// # Ok(())
/// # }
/// ```
pub fn load_vacancies(path: impl AsRef<Path>, options: &IngestionOptions) -> ReportResult<LoadedVacancies> {
    let path = path.as_ref();
    let ctx = IngestionContext {
        path: path.to_path_buf(),
    };

    let result = read_rows_from_path(path).and_then(|parsed| build_vacancies(parsed, options));

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok((loaded, rows)) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: *rows,
                    dropped_rows: loaded.dropped_rows,
                    vacancies: loaded.vacancies.len(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result.map(|(loaded, _)| loaded)
}

fn build_vacancies(parsed: ParsedRows, options: &IngestionOptions) -> ReportResult<(LoadedVacancies, usize)> {
    let rows = parsed.rows.len();
    let vacancies = parsed
        .rows
        .iter()
        .map(|raw| -> ReportResult<Vacancy> {
            let vacancy = Vacancy::from_raw(raw, &options.rates)?;
            Ok(if options.clean_text {
                vacancy.with_clean_text()
            } else {
                vacancy
            })
        })
        .collect::<ReportResult<Vec<_>>>()?;

    Ok((
        LoadedVacancies {
            vacancies,
            dropped_rows: parsed.dropped_rows,
        },
        rows,
    ))
}

fn severity_for_error(e: &ReportError) -> IngestionSeverity {
    match e {
        ReportError::SourceUnreadable { .. } | ReportError::Io(_) => IngestionSeverity::Critical,
        ReportError::Csv(err) => {
            if error_chain_contains_io(err) {
                IngestionSeverity::Critical
            } else {
                IngestionSeverity::Error
            }
        }
        _ => IngestionSeverity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{load_vacancies, severity_for_error, IngestionOptions};
    use crate::error::ReportError;
    use crate::ingestion::IngestionSeverity;

    fn fixture() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/vacancies.csv")
    }

    #[test]
    fn loads_fixture_with_default_options() {
        let loaded = load_vacancies(fixture(), &IngestionOptions::default()).unwrap();

        assert_eq!(loaded.vacancies.len(), 6);
        assert_eq!(loaded.dropped_rows, 1);
        assert_eq!(loaded.vacancies[2].salary(), 90_990.0);
    }

    #[test]
    fn clean_text_option_is_applied() {
        let dir = std::env::temp_dir().join(format!("vacancy-analytics-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tagged.csv");
        std::fs::write(
            &path,
            "name,salary_from,salary_to,salary_currency,area_name,published_at\n\
             <b>Rust</b>   developer,100,200,RUR, Москва ,2021-01-01\n",
        )
        .unwrap();

        let opts = IngestionOptions {
            clean_text: true,
            ..Default::default()
        };
        let loaded = load_vacancies(&path, &opts).unwrap();
        assert_eq!(loaded.vacancies[0].name(), "Rust developer");
        assert_eq!(loaded.vacancies[0].area_name(), "Москва");

        let raw = load_vacancies(&path, &IngestionOptions::default()).unwrap();
        assert_eq!(raw.vacancies[0].name(), "<b>Rust</b>   developer");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unreadable_source_is_critical() {
        let missing = ReportError::SourceUnreadable {
            path: PathBuf::from("x.csv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(severity_for_error(&missing), IngestionSeverity::Critical);

        let bad = ReportError::UnknownCurrency { code: "GBP".into() };
        assert_eq!(severity_for_error(&bad.at_row(4)), IngestionSeverity::Error);
    }
}
