//! Currency normalization.
//!
//! Salaries arrive as a `(salary_from, salary_to, currency)` triple. [`ExchangeRateTable::normalize`]
//! collapses that into one value expressed in roubles, the common unit for every statistic.

use std::collections::BTreeMap;

use crate::error::{ReportError, ReportResult};

/// Built-in multipliers to roubles.
const RUB_RATES: &[(&str, f64)] = &[
    ("AZN", 35.68),
    ("BYR", 23.91),
    ("EUR", 59.90),
    ("GEL", 21.74),
    ("KGS", 0.76),
    ("KZT", 0.13),
    ("RUR", 1.0),
    ("UAH", 1.64),
    ("USD", 60.66),
    ("UZS", 0.0055),
];

/// Immutable mapping from currency code to its multiplier into the common unit.
///
/// Build it once (usually via [`Default`]) and pass it to whatever constructs vacancies.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRateTable {
    rates: BTreeMap<String, f64>,
}

impl ExchangeRateTable {
    /// Create a table from `(code, multiplier)` pairs.
    pub fn new<I, S>(rates: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            rates: rates.into_iter().map(|(code, rate)| (code.into(), rate)).collect(),
        }
    }

    /// Multiplier for `code`, if known.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// Known currency codes in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Midpoint of the two salary bounds, scaled by the rate of `code`.
    ///
    /// Each bound is cut at its first `.` before integer parsing; the fraction is discarded, never
    /// rounded, so `("100.9", "200.1")` is treated as `(100, 200)`.
    pub fn normalize(&self, low: &str, high: &str, code: &str) -> ReportResult<f64> {
        let low = parse_truncated(low)?;
        let high = parse_truncated(high)?;
        let rate = self.rate(code).ok_or_else(|| ReportError::UnknownCurrency {
            code: code.to_owned(),
        })?;
        let midpoint = (i128::from(low) + i128::from(high)) as f64 / 2.0;
        Ok(midpoint * rate)
    }
}

impl Default for ExchangeRateTable {
    fn default() -> Self {
        Self::new(RUB_RATES.iter().copied())
    }
}

fn parse_truncated(raw: &str) -> ReportResult<i64> {
    let integral = raw.split('.').next().unwrap_or_default().trim();
    integral
        .parse::<i64>()
        .map_err(|e| ReportError::MalformedNumber {
            raw: raw.to_owned(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::ExchangeRateTable;
    use crate::error::ReportError;

    #[test]
    fn default_table_has_ten_codes() {
        let table = ExchangeRateTable::default();
        assert_eq!(table.len(), 10);
        assert_eq!(table.rate("RUR"), Some(1.0));
        assert_eq!(table.rate("USD"), Some(60.66));
        assert_eq!(table.rate("XYZ"), None);
    }

    #[test]
    fn equal_bounds_collapse_to_a_plain_scale() {
        let table = ExchangeRateTable::default();
        let codes: Vec<String> = table.codes().map(str::to_owned).collect();
        for code in codes {
            let rate = table.rate(&code).unwrap();
            assert_eq!(table.normalize("1000", "1000", &code).unwrap(), 1000.0 * rate);
        }
    }

    #[test]
    fn fractions_are_truncated_not_rounded() {
        let table = ExchangeRateTable::default();
        assert_eq!(table.normalize("100.9", "200.1", "RUR").unwrap(), 150.0);
        assert_eq!(table.normalize("99.99", "99.99", "RUR").unwrap(), 99.0);
    }

    #[test]
    fn midpoint_keeps_half_units() {
        let table = ExchangeRateTable::default();
        assert_eq!(table.normalize("100", "201", "RUR").unwrap(), 150.5);
        assert_eq!(table.normalize("10", "30", "EUR").unwrap(), 20.0 * 59.90);
    }

    #[test]
    fn widest_bounds_do_not_overflow() {
        let table = ExchangeRateTable::default();
        let max = i64::MAX.to_string();
        let salary = table.normalize(&max, &max, "RUR").unwrap();
        assert_eq!(salary, i64::MAX as f64);
        assert!(salary > 0.0);

        let min = i64::MIN.to_string();
        assert_eq!(table.normalize(&min, &min, "RUR").unwrap(), i64::MIN as f64);
    }

    #[test]
    fn unknown_currency_is_an_error() {
        let table = ExchangeRateTable::default();
        let err = table.normalize("10", "20", "GBP").unwrap_err();
        assert!(matches!(err, ReportError::UnknownCurrency { ref code } if code == "GBP"));
    }

    #[test]
    fn non_numeric_bound_is_an_error() {
        let table = ExchangeRateTable::default();
        let err = table.normalize("abc", "20", "RUR").unwrap_err();
        assert!(matches!(err, ReportError::MalformedNumber { ref raw, .. } if raw == "abc"));
        assert!(table.normalize("", "20", "RUR").is_err());
    }

    #[test]
    fn custom_table_is_injectable() {
        let table = ExchangeRateTable::new([("XTS", 2.0)]);
        assert_eq!(table.normalize("10", "20", "XTS").unwrap(), 30.0);
        assert!(table.normalize("10", "20", "RUR").is_err());
    }
}
