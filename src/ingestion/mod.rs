//! Loading vacancies from CSV.
//!
//! Most callers should use [`load_vacancies`] (from [`loader`]) which:
//!
//! - parses the file into header-keyed rows, dropping rows of the wrong shape
//! - builds one [`crate::types::Vacancy`] per accepted row, aborting on the first invalid one
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! The row parser alone is available under [`csv`].

pub mod csv;
pub mod loader;
pub mod observability;

pub use loader::{load_vacancies, IngestionOptions, LoadedVacancies};
pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    TracingObserver,
};
