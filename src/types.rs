//! Core data model types.
//!
//! Ingestion produces [`RawRow`]s (header name → raw cell), which are turned into immutable
//! [`Vacancy`] values. Aggregations emit ordered [`Series`].

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::currency::ExchangeRateTable;
use crate::error::{ReportError, ReportResult};
use crate::processing::text::clean_text;

/// Columns a row must provide to become a [`Vacancy`].
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "name",
    "salary_from",
    "salary_to",
    "salary_currency",
    "area_name",
    "published_at",
];

/// One accepted CSV row: header name → raw string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    row: usize,
    values: HashMap<String, String>,
}

impl RawRow {
    /// Create a row from an explicit column map. `row` is the 1-based source line (header = 1).
    pub fn new(row: usize, values: HashMap<String, String>) -> Self {
        Self { row, values }
    }

    /// Pair header names with field values positionally.
    ///
    /// Surplus headers or fields are ignored; callers check the shape beforehand.
    pub fn from_fields<I, S>(row: usize, headers: &[String], fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = headers
            .iter()
            .cloned()
            .zip(fields.into_iter().map(Into::into))
            .collect();
        Self { row, values }
    }

    /// Source row number (1-based, header row is 1).
    pub fn row(&self) -> usize {
        self.row
    }

    /// Raw value for `column`, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Number of columns carried by the row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn required(&self, column: &str) -> ReportResult<&str> {
        self.get(column).ok_or_else(|| ReportError::SchemaMismatch {
            message: format!("row {} is missing required column '{column}'", self.row),
        })
    }
}

/// One cleaned job posting, the unit of aggregation.
///
/// Fields are private; a vacancy never changes after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vacancy {
    name: String,
    salary: f64,
    area_name: String,
    year: i32,
}

impl Vacancy {
    /// Create a vacancy from already-normalized parts.
    pub fn new(name: impl Into<String>, salary: f64, area_name: impl Into<String>, year: i32) -> Self {
        Self {
            name: name.into(),
            salary,
            area_name: area_name.into(),
            year,
        }
    }

    /// Build a vacancy from a raw row, normalizing the salary through `rates`.
    ///
    /// Errors carry the row number via [`ReportError::InvalidRecord`].
    pub fn from_raw(raw: &RawRow, rates: &ExchangeRateTable) -> ReportResult<Self> {
        Self::try_from_raw(raw, rates).map_err(|e| e.at_row(raw.row()))
    }

    fn try_from_raw(raw: &RawRow, rates: &ExchangeRateTable) -> ReportResult<Self> {
        let name = raw.required("name")?;
        let salary = rates.normalize(
            raw.required("salary_from")?,
            raw.required("salary_to")?,
            raw.required("salary_currency")?,
        )?;
        let area_name = raw.required("area_name")?;
        let year = parse_year(raw.required("published_at")?)?;
        Ok(Self::new(name, salary, area_name, year))
    }

    /// Same vacancy with `name` and `area_name` passed through [`clean_text`].
    pub fn with_clean_text(self) -> Self {
        Self {
            name: clean_text(&self.name),
            area_name: clean_text(&self.area_name),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Salary in the common currency unit.
    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn area_name(&self) -> &str {
        &self.area_name
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

/// Year from the first four characters of a date string such as `2019-05-01T00:00:00+0300`.
pub fn parse_year(published_at: &str) -> ReportResult<i32> {
    let invalid = || ReportError::InvalidDate {
        raw: published_at.to_owned(),
    };
    let end = published_at
        .char_indices()
        .nth(4)
        .map(|(idx, _)| idx)
        .unwrap_or(published_at.len());
    published_at[..end]
        .trim()
        .parse::<i32>()
        .map_err(|_| invalid())
}

/// Ordered key → value series.
///
/// Order is meaningful (it is the axis order of every chart and table), so this is a plain
/// vector of pairs rather than a map. Lookups are linear; series hold a handful of years or at
/// most a few cities.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Series<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, key: K, value: V) {
        self.entries.push((key, value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Keep only the first `n` entries.
    pub fn truncated(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }
}

impl<K: PartialEq, V> Series<K, V> {
    /// Value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

impl<K, V> Default for Series<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for Series<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Series<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, (k, v)) in self.entries.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}
