//! Report assembly and rendering.
//!
//! [`ReportBundle`] is the renderer-agnostic result of a run: the year axis, four year-keyed
//! series and two top-N city series. It is built once and handed to exactly one
//! [`ReportRenderer`] (chart image or spreadsheet), chosen by [`ReportKind`].
//!
//! ## Example
//!
//! ```rust
//! use vacancy_analytics::report::{ReportBundle, ReportConfig};
//! use vacancy_analytics::types::Vacancy;
//!
//! let vacancies = vec![
//!     Vacancy::new("Программист", 100.0, "Москва", 2018),
//!     Vacancy::new("Аналитик", 200.0, "Москва", 2018),
//!     Vacancy::new("Программист", 300.0, "Казань", 2019),
//! ];
//! let bundle = ReportBundle::from_vacancies(&vacancies, "Программист", &ReportConfig::default());
//!
//! assert_eq!(bundle.years(), &[2018, 2019]);
//! assert_eq!(bundle.salary_by_year().get(&2018), Some(&150));
//! assert_eq!(bundle.profession_salary_by_year().get(&2018), Some(&100));
//! assert_eq!(bundle.salary_by_city().keys().next().map(String::as_str), Some("Казань"));
//! ```

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::ReportResult;
use crate::processing::{
    city_stats, count_by_group, group_by_city, group_by_year, group_by_year_filtered, salary_by_group,
    top_cities_by_salary, top_cities_by_share, CityStats, Grouping,
};
use crate::types::{Series, Vacancy};

#[cfg(feature = "chart")]
pub mod chart;
pub mod render;
#[cfg(feature = "spreadsheet")]
pub mod spreadsheet;

pub use render::{render_report, ReportKind, ReportRenderer};

/// Knobs for city filtering and ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Length of both top-N city lists.
    pub top_cities: usize,
    /// Cities below this fraction of all vacancies are left out of city statistics.
    pub min_city_share: f64,
    /// Decimal places kept in city shares.
    pub share_precision: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_cities: 10,
            min_city_share: 0.01,
            share_precision: 4,
        }
    }
}

/// Finalized, renderer-agnostic set of computed series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportBundle {
    profession: String,
    years: Vec<i32>,
    salary_by_year: Series<i32, i64>,
    profession_salary_by_year: Series<i32, i64>,
    count_by_year: Series<i32, usize>,
    profession_count_by_year: Series<i32, usize>,
    salary_by_city: Series<String, i64>,
    share_by_city: Series<String, f64>,
}

impl ReportBundle {
    /// Assemble a bundle from already-computed groupings and city statistics.
    ///
    /// The year axis is the key order of `by_year`; the profession series are reindexed
    /// against it, with `0` for years the profession never appears in.
    pub fn assemble(
        profession: &str,
        by_year: &Grouping<'_, i32>,
        profession_by_year: &Grouping<'_, i32>,
        cities: &[CityStats],
        config: &ReportConfig,
    ) -> Self {
        let years = by_year.keys().to_vec();
        Self {
            profession: profession.to_owned(),
            salary_by_year: salary_by_group(by_year, &years),
            profession_salary_by_year: salary_by_group(profession_by_year, &years),
            count_by_year: count_by_group(by_year, &years),
            profession_count_by_year: count_by_group(profession_by_year, &years),
            salary_by_city: top_cities_by_salary(cities, config.top_cities),
            share_by_city: top_cities_by_share(cities, config.top_cities),
            years,
        }
    }

    /// Run every grouping over `vacancies` and assemble the result.
    pub fn from_vacancies(vacancies: &[Vacancy], profession: &str, config: &ReportConfig) -> Self {
        let by_year = group_by_year(vacancies);
        let profession_by_year = group_by_year_filtered(vacancies, profession);
        let cities = group_by_city(vacancies, config.min_city_share, config.share_precision);
        let stats = city_stats(&cities);
        debug!(
            vacancies = vacancies.len(),
            years = by_year.len(),
            profession_vacancies = profession_by_year.total(),
            cities = stats.len(),
            "aggregated vacancies"
        );
        Self::assemble(profession, &by_year, &profession_by_year, &stats, config)
    }

    /// Profession substring the bundle was built for.
    pub fn profession(&self) -> &str {
        &self.profession
    }

    /// Year axis, in first-seen order.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn salary_by_year(&self) -> &Series<i32, i64> {
        &self.salary_by_year
    }

    pub fn profession_salary_by_year(&self) -> &Series<i32, i64> {
        &self.profession_salary_by_year
    }

    pub fn count_by_year(&self) -> &Series<i32, usize> {
        &self.count_by_year
    }

    pub fn profession_count_by_year(&self) -> &Series<i32, usize> {
        &self.profession_count_by_year
    }

    /// Top cities by mean salary, highest first.
    pub fn salary_by_city(&self) -> &Series<String, i64> {
        &self.salary_by_city
    }

    /// Top cities by vacancy share, largest first.
    pub fn share_by_city(&self) -> &Series<String, f64> {
        &self.share_by_city
    }

    /// Pretty-printed JSON form of the bundle.
    pub fn to_json(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ReportBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Salary by year: {}", self.salary_by_year)?;
        writeln!(f, "Vacancies by year: {}", self.count_by_year)?;
        writeln!(
            f,
            "Salary by year for '{}': {}",
            self.profession, self.profession_salary_by_year
        )?;
        writeln!(
            f,
            "Vacancies by year for '{}': {}",
            self.profession, self.profession_count_by_year
        )?;
        writeln!(f, "Salary by city (descending): {}", self.salary_by_city)?;
        write!(f, "Vacancy share by city (descending): {}", self.share_by_city)
    }
}

#[cfg(test)]
mod tests {
    use super::{ReportBundle, ReportConfig};
    use crate::types::Vacancy;

    fn vacancies() -> Vec<Vacancy> {
        vec![
            Vacancy::new("Программист", 100.0, "Москва", 2018),
            Vacancy::new("Аналитик", 200.0, "Казань", 2018),
            Vacancy::new("Аналитик", 300.0, "Москва", 2019),
            Vacancy::new("Программист", 500.0, "Омск", 2020),
        ]
    }

    #[test]
    fn profession_series_are_backfilled_against_the_year_axis() {
        let vacancies = vacancies();
        let bundle = ReportBundle::from_vacancies(&vacancies, "Программист", &ReportConfig::default());

        assert_eq!(bundle.years(), &[2018, 2019, 2020]);
        assert_eq!(bundle.profession_count_by_year().get(&2019), Some(&0));
        assert_eq!(bundle.profession_salary_by_year().get(&2019), Some(&0));
        assert_eq!(bundle.profession_salary_by_year().get(&2020), Some(&500));
        assert_eq!(bundle.count_by_year().get(&2018), Some(&2));
    }

    #[test]
    fn city_lists_are_ranked_and_limited() {
        let vacancies = vacancies();
        let config = ReportConfig {
            top_cities: 2,
            ..Default::default()
        };
        let bundle = ReportBundle::from_vacancies(&vacancies, "x", &config);

        assert_eq!(bundle.salary_by_city().keys().cloned().collect::<Vec<_>>(), vec!["Омск", "Казань"]);
        assert_eq!(bundle.share_by_city().keys().cloned().collect::<Vec<_>>(), vec!["Москва", "Казань"]);
        assert_eq!(bundle.share_by_city().get(&"Москва".to_string()), Some(&0.5));
    }

    #[test]
    fn summary_lists_every_series() {
        let vacancies = vacancies();
        let bundle = ReportBundle::from_vacancies(&vacancies, "Программист", &ReportConfig::default());
        let summary = bundle.to_string();

        assert_eq!(summary.lines().count(), 6);
        assert!(summary.starts_with("Salary by year: {2018: 150, 2019: 300, 2020: 500}"));
        assert!(summary.contains("Vacancies by year for 'Программист': {2018: 1, 2019: 0, 2020: 1}"));
    }

    #[test]
    fn json_form_is_stable() {
        let vacancies = vacancies();
        let a = ReportBundle::from_vacancies(&vacancies, "Аналитик", &ReportConfig::default());
        let b = ReportBundle::from_vacancies(&vacancies, "Аналитик", &ReportConfig::default());
        assert_eq!(a, b);
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());

        let json: serde_json::Value = serde_json::from_str(&a.to_json().unwrap()).unwrap();
        assert_eq!(json["years"], serde_json::json!([2018, 2019, 2020]));
        assert_eq!(json["salary_by_year"][0], serde_json::json!([2018, 150]));
    }

    #[test]
    fn empty_input_gives_empty_bundle() {
        let bundle = ReportBundle::from_vacancies(&[], "x", &ReportConfig::default());
        assert!(bundle.years().is_empty());
        assert!(bundle.salary_by_city().is_empty());
        assert!(bundle.share_by_city().is_empty());
    }
}
