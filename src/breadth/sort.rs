//! Table ordering.

use std::cmp::Ordering;

use super::constant::SortDirection;
use super::object::{BreadthRow, SortKey, SortState};

/// Numeric sort value of a row; missing values sort as negative infinity
fn sort_value(row: &BreadthRow, key: &SortKey) -> f64 {
    let value = match key {
        SortKey::Date => None,
        SortKey::Metric(metric) => row.value(*metric),
        SortKey::Extra(name) => row.column_value(name),
    };
    value.unwrap_or(f64::NEG_INFINITY)
}

/// Ascending comparison of two rows under a key
fn compare(a: &BreadthRow, b: &BreadthRow, key: &SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        _ => sort_value(a, key).total_cmp(&sort_value(b, key)),
    }
}

/// Return the rows ordered by `key`; ties keep their input order
pub fn sort_rows(rows: &[BreadthRow], key: &SortKey, direction: SortDirection) -> Vec<BreadthRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}

/// Sort by the active view sort
pub fn sort_by_state(rows: &[BreadthRow], state: &SortState) -> Vec<BreadthRow> {
    sort_rows(rows, &state.key, state.direction)
}
