//! City statistics and top-N ranking.

use serde::Serialize;

use crate::processing::group::CityGrouping;
use crate::processing::reduce::mean_salary;
use crate::types::Series;

/// Derived statistics for one retained city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityStats {
    pub city: String,
    /// Truncated mean salary.
    pub mean_salary: i64,
    /// Rounded fraction of all vacancies located in the city.
    pub share: f64,
    pub vacancies: usize,
}

/// Statistics for every retained city, in first-seen order.
pub fn city_stats(cities: &CityGrouping<'_>) -> Vec<CityStats> {
    cities
        .groups()
        .iter()
        .map(|(city, group)| CityStats {
            city: (*city).to_owned(),
            mean_salary: mean_salary(group),
            share: cities.share(city).unwrap_or_default(),
            vacancies: group.len(),
        })
        .collect()
}

/// The `n` best-paid cities, highest first. Ties go to the alphabetically first city.
pub fn top_cities_by_salary(stats: &[CityStats], n: usize) -> Series<String, i64> {
    let mut ranked: Vec<&CityStats> = stats.iter().collect();
    ranked.sort_by(|a, b| {
        b.mean_salary
            .cmp(&a.mean_salary)
            .then_with(|| a.city.cmp(&b.city))
    });
    ranked
        .into_iter()
        .take(n)
        .map(|s| (s.city.clone(), s.mean_salary))
        .collect()
}

/// The `n` cities with the largest share of vacancies, largest first. Ties go to the
/// alphabetically first city.
pub fn top_cities_by_share(stats: &[CityStats], n: usize) -> Series<String, f64> {
    let mut ranked: Vec<&CityStats> = stats.iter().collect();
    ranked.sort_by(|a, b| b.share.total_cmp(&a.share).then_with(|| a.city.cmp(&b.city)));
    ranked
        .into_iter()
        .take(n)
        .map(|s| (s.city.clone(), s.share))
        .collect()
}
