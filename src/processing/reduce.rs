//! Per-group reductions over a [`Grouping`].
//!
//! Both reductions walk an explicit key order rather than the grouping's own keys, so a series
//! can be reindexed against another grouping's axis. Keys absent from the grouping yield `0`.

use std::hash::Hash;

use crate::processing::group::Grouping;
use crate::types::{Series, Vacancy};

/// Mean salary of a group, truncated toward zero. An empty group yields `0`.
pub fn mean_salary(group: &[&Vacancy]) -> i64 {
    if group.is_empty() {
        return 0;
    }
    let sum: f64 = group.iter().map(|v| v.salary()).sum();
    (sum / group.len() as f64) as i64
}

/// Truncated mean salary for every key in `key_order`.
pub fn salary_by_group<K>(grouping: &Grouping<'_, K>, key_order: &[K]) -> Series<K, i64>
where
    K: Eq + Hash + Clone,
{
    key_order
        .iter()
        .map(|k| (k.clone(), grouping.get(k).map(mean_salary).unwrap_or(0)))
        .collect()
}

/// Group size for every key in `key_order`.
pub fn count_by_group<K>(grouping: &Grouping<'_, K>, key_order: &[K]) -> Series<K, usize>
where
    K: Eq + Hash + Clone,
{
    key_order
        .iter()
        .map(|k| (k.clone(), grouping.get(k).map(<[_]>::len).unwrap_or(0)))
        .collect()
}
