//! Aggregation over in-memory vacancies.
//!
//! The processing layer works on the `Vec<Vacancy>` produced by ingestion and never fails: every
//! vacancy is already valid by the time it gets here.
//!
//! - [`group`]: partition by year, by year for a profession substring, and by city
//! - [`reduce`]: truncated mean salary and count per group, reindexed against a key order
//! - [`rank`]: per-city statistics and top-N ranking
//! - [`text`]: free-text cleanup
//!
//! ## Example: salary by year
//!
//! ```rust
//! use vacancy_analytics::processing::{group_by_year, salary_by_group};
//! use vacancy_analytics::types::Vacancy;
//!
//! let vacancies = vec![
//!     Vacancy::new("Developer", 100.0, "Москва", 2018),
//!     Vacancy::new("Developer", 200.0, "Москва", 2018),
//!     Vacancy::new("Analyst", 300.0, "Казань", 2019),
//! ];
//! let by_year = group_by_year(&vacancies);
//! let years = by_year.keys().to_vec();
//! let salary = salary_by_group(&by_year, &years);
//!
//! assert_eq!(salary.get(&2018), Some(&150));
//! assert_eq!(salary.get(&2019), Some(&300));
//! ```

pub mod group;
pub mod rank;
pub mod reduce;
pub mod text;

pub use group::{group_by_city, group_by_year, group_by_year_filtered, CityGrouping, Grouping};
pub use rank::{city_stats, top_cities_by_salary, top_cities_by_share, CityStats};
pub use reduce::{count_by_group, mean_salary, salary_by_group};
pub use text::clean_text;
