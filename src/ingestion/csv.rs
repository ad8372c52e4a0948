//! CSV record parsing.
//!
//! The first record names the columns. Every later record is accepted only if, once its empty
//! fields are removed, it has exactly as many fields as there are headers; otherwise it is
//! dropped without error and counted in [`ParsedRows::dropped_rows`].

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::types::RawRow;

/// Output of the record parser.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedRows {
    /// Header names, in file order.
    pub headers: Vec<String>,
    /// Accepted rows, in file order.
    pub rows: Vec<RawRow>,
    /// Rows skipped because their non-empty field count did not match the header count.
    pub dropped_rows: usize,
}

/// Parse a CSV file into [`RawRow`]s.
///
/// Fails with [`ReportError::SourceUnreadable`] if the file cannot be opened.
pub fn read_rows_from_path(path: impl AsRef<Path>) -> ReportResult<ParsedRows> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| ReportError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = reader_builder().from_reader(file);
    read_rows_from_reader(&mut rdr)
}

/// Parse CSV data from an existing reader.
///
/// The reader should be built with `has_headers(true)` and `flexible(true)`; see
/// [`reader_builder`].
pub fn read_rows_from_reader<R: Read>(rdr: &mut csv::Reader<R>) -> ReportResult<ParsedRows> {
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();

    let mut rows = Vec::new();
    let mut dropped_rows = 0usize;
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based, +1 again because the header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
        if fields.len() != headers.len() {
            dropped_rows += 1;
            continue;
        }
        rows.push(RawRow::from_fields(user_row, &headers, fields));
    }

    debug!(accepted = rows.len(), dropped = dropped_rows, "parsed csv rows");
    Ok(ParsedRows {
        headers,
        rows,
        dropped_rows,
    })
}

/// Reader settings the parser expects: comma-delimited, header row, ragged rows allowed.
pub fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.delimiter(b',').has_headers(true).flexible(true);
    builder
}
