//! Reshaping helpers for aggregate rows
//!
//! Year filtering, ranking and name normalization applied to aggregate
//! datasets before they are charted, tabulated or mapped.

use std::collections::BTreeSet;

use crate::app::models::{Measured, Quantity};
use crate::constants::ATLAS_COUNTRY_NAMES;

/// Rows whose bucket date falls in `year`; unparsable dates are dropped
pub fn filter_year<T: Measured + Clone>(rows: &[T], year: i32) -> Vec<T> {
    rows.iter()
        .filter(|row| row.year() == Some(year))
        .cloned()
        .collect()
}

/// Distinct years present in `rows`, ascending
pub fn available_years<T: Measured>(rows: &[T]) -> Vec<i32> {
    rows.iter()
        .filter_map(Measured::year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Most recent year present in `rows`
pub fn latest_year<T: Measured>(rows: &[T]) -> Option<i32> {
    rows.iter().filter_map(Measured::year).max()
}

/// Sort descending by `quantity` and keep at most `limit` rows
///
/// Ties keep their input order.
pub fn rank_by_quantity<T: Measured>(mut rows: Vec<T>, quantity: Quantity, limit: usize) -> Vec<T> {
    rows.sort_by(|a, b| b.quantity(quantity).total_cmp(&a.quantity(quantity)));
    rows.truncate(limit);
    rows
}

/// Geography name of a dataset country in the world atlas
pub fn atlas_country_name(country: &str) -> &str {
    ATLAS_COUNTRY_NAMES
        .iter()
        .find(|(dataset, _)| *dataset == country)
        .map(|(_, atlas)| *atlas)
        .unwrap_or(country)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::DimensionAggregate;

    fn row(date: &str, key: &str, co2: f64) -> DimensionAggregate {
        DimensionAggregate {
            date: date.to_string(),
            key: key.to_string(),
            number_of_aircrafts: 1.0,
            number_of_legs: 1.0,
            time_flown: 1.0,
            co2_emitted: co2,
            km_flown: 1.0,
            km_travelled: 1.0,
        }
    }

    #[test]
    fn test_filter_year() {
        let rows = vec![
            row("2022-01-01", "France", 1.0),
            row("2023-01-01", "France", 2.0),
            row("not a date", "Malta", 3.0),
        ];

        let filtered = filter_year(&rows, 2023);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].co2_emitted, 2.0);
    }

    #[test]
    fn test_available_and_latest_years() {
        let rows = vec![
            row("2023-01-01", "a", 0.0),
            row("2021-01-01", "b", 0.0),
            row("2023-01-01", "c", 0.0),
        ];

        assert_eq!(available_years(&rows), vec![2021, 2023]);
        assert_eq!(latest_year(&rows), Some(2023));
        assert_eq!(latest_year::<DimensionAggregate>(&[]), None);
    }

    #[test]
    fn test_rank_by_quantity_descending_and_stable() {
        let rows = vec![
            row("2023-01-01", "low", 1.0),
            row("2023-01-01", "high", 9.0),
            row("2023-01-01", "tie-first", 5.0),
            row("2023-01-01", "tie-second", 5.0),
        ];

        let ranked = rank_by_quantity(rows, Quantity::Co2Emitted, 3);
        let keys: Vec<&str> = ranked.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["high", "tie-first", "tie-second"]);
    }

    #[test]
    fn test_atlas_country_name() {
        assert_eq!(atlas_country_name("United States"), "United States of America");
        assert_eq!(atlas_country_name("Viet Nam"), "Vietnam");
        assert_eq!(atlas_country_name("France"), "France");
    }
}
