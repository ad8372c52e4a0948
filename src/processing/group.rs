//! Partitioning vacancies into keyed groups.
//!
//! A [`Grouping`] borrows the vacancies it partitions and remembers the order in which keys were
//! first seen; that order is the year axis for every year-based series.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::types::Vacancy;

/// Vacancies partitioned by key, keys kept in first-seen order.
#[derive(Debug, Clone)]
pub struct Grouping<'a, K> {
    order: Vec<K>,
    groups: HashMap<K, Vec<&'a Vacancy>>,
}

impl<'a, K> Grouping<'a, K>
where
    K: Eq + Hash + Clone,
{
    /// Partition `vacancies` by `key`. Within a group, input order is preserved.
    pub fn by_key<I, F>(vacancies: I, mut key: F) -> Self
    where
        I: IntoIterator<Item = &'a Vacancy>,
        F: FnMut(&'a Vacancy) -> K,
    {
        let mut order = Vec::new();
        let mut groups: HashMap<K, Vec<&'a Vacancy>> = HashMap::new();
        for vacancy in vacancies {
            let k = key(vacancy);
            match groups.get_mut(&k) {
                Some(group) => group.push(vacancy),
                None => {
                    order.push(k.clone());
                    groups.insert(k, vec![vacancy]);
                }
            }
        }
        Self { order, groups }
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> &[K] {
        &self.order
    }

    /// Vacancies stored under `key`.
    pub fn get(&self, key: &K) -> Option<&[&'a Vacancy]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Groups in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[&'a Vacancy])> {
        self.order
            .iter()
            .filter_map(|k| self.groups.get(k).map(|g| (k, g.as_slice())))
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of vacancies across all groups.
    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &[&'a Vacancy]) -> bool,
    {
        let groups = &mut self.groups;
        self.order.retain(|k| {
            let kept = groups.get(k).is_some_and(|g| keep(k, g.as_slice()));
            if !kept {
                groups.remove(k);
            }
            kept
        });
    }
}

/// Partition by publication year.
pub fn group_by_year(vacancies: &[Vacancy]) -> Grouping<'_, i32> {
    Grouping::by_key(vacancies, Vacancy::year)
}

/// Partition by year, keeping only vacancies whose name contains `substring`.
///
/// Matching is a literal, case-sensitive substring test.
pub fn group_by_year_filtered<'a>(vacancies: &'a [Vacancy], substring: &str) -> Grouping<'a, i32> {
    Grouping::by_key(
        vacancies.iter().filter(|v| v.name().contains(substring)),
        Vacancy::year,
    )
}

/// Cities holding at least a minimum share of all vacancies, with their rounded shares.
#[derive(Debug, Clone)]
pub struct CityGrouping<'a> {
    groups: Grouping<'a, &'a str>,
    shares: HashMap<&'a str, f64>,
}

impl<'a> CityGrouping<'a> {
    /// Retained cities and their vacancies, in first-seen order.
    pub fn groups(&self) -> &Grouping<'a, &'a str> {
        &self.groups
    }

    /// Rounded population share of a retained city.
    pub fn share(&self, city: &str) -> Option<f64> {
        self.shares.get(city).copied()
    }
}

/// Partition by `area_name` and drop cities below `min_share` of all vacancies.
///
/// Retained shares are rounded to `precision` decimal places. Dropped cities take no further
/// part in city statistics.
pub fn group_by_city(vacancies: &[Vacancy], min_share: f64, precision: u32) -> CityGrouping<'_> {
    let total = vacancies.len();
    let mut groups = Grouping::by_key(vacancies, Vacancy::area_name);
    let seen = groups.len();

    let mut shares = HashMap::new();
    groups.retain(|city, group| {
        let share = group.len() as f64 / total as f64;
        // Percent comparison keeps 10/1000 exactly on the 1% boundary.
        let kept = share * 100.0 >= min_share * 100.0;
        if kept {
            shares.insert(*city, round_to(share, precision));
        }
        kept
    });

    debug!(cities = seen, retained = groups.len(), "grouped vacancies by city");
    CityGrouping { groups, shares }
}

/// Round to `precision` decimals, ties to even on the exact binary value.
///
/// Float formatting is exact, so `0.03125` becomes `0.0312` rather than `0.0313`.
pub(crate) fn round_to(value: f64, precision: u32) -> f64 {
    let digits = precision as usize;
    format!("{value:.digits$}").parse().unwrap_or(value)
}
