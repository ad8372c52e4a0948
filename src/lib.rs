//! `vacancy-analytics` turns a CSV export of job vacancies into salary and demand statistics and
//! renders them as a chart image or a spreadsheet.
//!
//! A run is a single synchronous pass: load → aggregate → render.
//!
//! ## Input
//!
//! A comma-delimited UTF-8 file whose first row names the columns. The columns used are
//! `name`, `salary_from`, `salary_to`, `salary_currency`, `area_name` and `published_at`.
//!
//! - Rows are matched to the header after removing empty fields; a row whose remaining field
//!   count differs from the header count is dropped (and counted, see
//!   [`ingestion::IngestionStats::dropped_rows`]).
//! - Salaries are the midpoint of `salary_from`/`salary_to` (fractions cut off) converted to
//!   roubles through an [`currency::ExchangeRateTable`]. Unknown currencies, non-numeric bounds
//!   and unparseable years abort the run.
//!
//! ## Quick example: load, aggregate, render
//!
//! ```no_run
//! use vacancy_analytics::ingestion::{load_vacancies, IngestionOptions};
//! use vacancy_analytics::report::{render_report, ReportBundle, ReportConfig, ReportKind};
//!
//! # fn main() -> Result<(), vacancy_analytics::ReportError> {
//! let loaded = load_vacancies("vacancies.csv", &IngestionOptions::default())?;
//! let bundle = ReportBundle::from_vacancies(&loaded.vacancies, "Программист", &ReportConfig::default());
//! println!("{bundle}");
//! render_report(&bundle, ReportKind::Spreadsheet, "report.xlsx")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Statistics
//!
//! - Mean salary and vacancy count per year, for all vacancies and for vacancies whose name
//!   contains the chosen profession substring (years without matches get `0`).
//! - Cities holding at least 1% of all vacancies; the ten best-paid and the ten with the largest
//!   share. Ties are broken alphabetically.
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV parsing and vacancy loading, with observer hooks
//! - [`types`]: raw rows, vacancies and ordered series
//! - [`currency`]: exchange-rate table and salary normalization
//! - [`processing`]: grouping and statistics
//! - [`report`]: the assembled bundle and its renderers
//! - [`error`]: error type used across the crate
//!
//! ## Features
//!
//! - `chart` (default): PNG renderer via `plotters`
//! - `spreadsheet` (default): XLSX renderer via `rust_xlsxwriter`

pub mod currency;
pub mod error;
pub mod ingestion;
pub mod processing;
pub mod report;
pub mod types;

pub use error::{ReportError, ReportResult};
