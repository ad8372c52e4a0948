use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type used across ingestion, aggregation and rendering.
pub type ReportResult<T> = Result<T, ReportError>;

/// Error type returned by every fallible operation in this crate.
///
/// All variants are fatal for a run: there is no partial report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The input file could not be opened.
    #[error("source unreadable: {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Underlying I/O error while writing output.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A row does not carry a column the vacancy model needs.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A salary bound is not an integer once its fractional part is cut off.
    #[error("malformed number '{raw}': {message}")]
    MalformedNumber { raw: String, message: String },

    /// The currency code is absent from the exchange-rate table.
    #[error("unknown currency '{code}'")]
    UnknownCurrency { code: String },

    /// The first four characters of the publication date are not a year.
    #[error("invalid date '{raw}'")]
    InvalidDate { raw: String },

    /// A model error, annotated with the 1-based source row (header is row 1).
    #[error("invalid record at row {row}: {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: Box<ReportError>,
    },

    /// A grouped chart got a different number of labels and series,
    /// or a series of the wrong length.
    #[error("series length mismatch in '{chart}': {labels} labels for {series} series")]
    SeriesLengthMismatch {
        chart: String,
        labels: usize,
        series: usize,
    },

    /// Bundle serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested renderer was compiled out.
    #[error("renderer '{renderer}' not enabled (enable cargo feature '{renderer}')")]
    RendererDisabled { renderer: &'static str },

    /// There is nothing to draw.
    #[error("report has no years to plot")]
    EmptyReport,

    #[cfg(feature = "chart")]
    /// Chart backend failure (feature-gated behind `chart`).
    #[error("chart error: {0}")]
    Chart(String),

    #[cfg(feature = "spreadsheet")]
    /// Workbook writer failure (feature-gated behind `spreadsheet`).
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

impl ReportError {
    /// Attach a source row number to a model error.
    pub(crate) fn at_row(self, row: usize) -> Self {
        match self {
            already @ ReportError::InvalidRecord { .. } => already,
            other => ReportError::InvalidRecord {
                row,
                source: Box::new(other),
            },
        }
    }
}
