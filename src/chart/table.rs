//! Heatmap table assembly.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::base::{table_date_label, Rgb};
use super::scale::{build_scales, ColorScale};
use crate::breadth::constant::SortDirection;
use crate::breadth::normalize::normalize_cell;
use crate::breadth::object::{BreadthRow, SortKey, SortState, ViewState};
use crate::breadth::registry::Metric;
use crate::breadth::sort::sort_by_state;

/// A column header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapColumn {
    pub key: SortKey,
    pub name: String,
    /// Set on the column the table is sorted by
    pub sort_indicator: Option<SortDirection>,
}

impl HeatmapColumn {
    fn new(key: SortKey, sort: &SortState) -> Self {
        let sort_indicator = (sort.key == key).then_some(sort.direction);
        Self {
            name: key.to_string(),
            key,
            sort_indicator,
        }
    }

    /// Header text with the sort arrow, if any
    pub fn label(&self) -> String {
        match self.sort_indicator {
            Some(direction) => format!("{} {}", self.name, direction.arrow()),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub display: String,
    /// `None` for missing values
    pub background: Option<Rgb>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapRow {
    pub date: NaiveDate,
    pub date_label: String,
    /// One cell per visible metric column
    pub cells: Vec<HeatmapCell>,
}

/// The rendered heatmap: headers, ordered rows and the record count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapTable {
    /// Date column first, then the visible metrics in registry order
    pub columns: Vec<HeatmapColumn>,
    pub rows: Vec<HeatmapRow>,
    pub record_count: usize,
    pub sort: SortState,
}

impl HeatmapTable {
    /// Build from the rows inside the view range.
    ///
    /// Colors come from raw values with scales over `visible_rows`; display
    /// text follows the view's display mode.
    pub fn build(visible_rows: &[BreadthRow], view: &ViewState) -> Self {
        let scales = build_scales(visible_rows);
        Self::build_with_scales(visible_rows, view, &scales)
    }

    pub fn build_with_scales(
        visible_rows: &[BreadthRow],
        view: &ViewState,
        scales: &BTreeMap<Metric, ColorScale>,
    ) -> Self {
        let mut columns = vec![HeatmapColumn::new(SortKey::Date, &view.sort)];
        columns.extend(
            view.visible
                .iter()
                .map(|metric| HeatmapColumn::new(SortKey::Metric(*metric), &view.sort)),
        );

        let rows: Vec<HeatmapRow> = sort_by_state(visible_rows, &view.sort)
            .iter()
            .map(|row| HeatmapRow {
                date: row.date,
                date_label: table_date_label(row.date),
                cells: view
                    .visible
                    .iter()
                    .map(|metric| cell(row, *metric, view, scales))
                    .collect(),
            })
            .collect();

        Self {
            columns,
            record_count: rows.len(),
            rows,
            sort: view.sort.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Status line under the controls
    pub fn summary(&self) -> String {
        format!("Showing {} records", self.record_count)
    }
}

fn cell(
    row: &BreadthRow,
    metric: Metric,
    view: &ViewState,
    scales: &BTreeMap<Metric, ColorScale>,
) -> HeatmapCell {
    let background = row
        .value(metric)
        .and_then(|value| scales.get(&metric).map(|scale| scale.color(value)));
    HeatmapCell {
        display: normalize_cell(row, metric, view.mode),
        background,
    }
}

impl fmt::Display for HeatmapTable {
    /// Plain-text rendering, one line per row
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = self.columns.iter().map(|c| c.label()).collect();
        writeln!(f, "{}", header.join(" | "))?;
        for row in &self.rows {
            let cells: Vec<&str> = row.cells.iter().map(|c| c.display.as_str()).collect();
            writeln!(f, "{} | {}", row.date_label, cells.join(" | "))?;
        }
        write!(f, "{}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breadth::constant::DisplayMode;
    use crate::breadth::object::RangeDefaults;
    use crate::chart::base::{BRIGHT_GREEN, DARK_GREEN};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn view(mode: DisplayMode) -> ViewState {
        let defaults = RangeDefaults {
            min_date: day(1),
            max_date: day(2),
            initial_start: day(1),
            initial_end: day(2),
        };
        ViewState::new(&defaults, mode)
    }

    fn rows() -> Vec<BreadthRow> {
        vec![
            BreadthRow::new(day(1)).with(Metric::Positive, 50.0).with_total(200.0),
            BreadthRow::new(day(2)).with(Metric::Positive, 100.0).with_total(200.0),
        ]
    }

    #[test]
    fn test_table_percent_mode() {
        let table = HeatmapTable::build(&rows(), &view(DisplayMode::PercentOfTotal));
        assert_eq!(table.record_count, 2);
        assert_eq!(table.columns.len(), 14);
        assert_eq!(table.columns[0].label(), "Date ↓");

        let positive_ix = Metric::Positive as usize;
        // newest first by default
        assert_eq!(table.rows[0].date_label, "02 Jan 24");
        assert_eq!(table.rows[0].cells[positive_ix].display, "50.0%");
        assert_eq!(table.rows[1].cells[positive_ix].display, "25.0%");
        assert_eq!(table.rows[0].cells[positive_ix].background, Some(BRIGHT_GREEN));
        assert_eq!(table.rows[1].cells[positive_ix].background, Some(DARK_GREEN));

        let missing = &table.rows[0].cells[Metric::Negative as usize];
        assert_eq!(missing.display, "-");
        assert_eq!(missing.background, None);
    }

    #[test]
    fn test_table_sort_and_columns() {
        let view = view(DisplayMode::Raw)
            .toggle_sort(SortKey::Metric(Metric::Positive))
            .toggle_sort(SortKey::Metric(Metric::Positive))
            .toggle_column(Metric::Negative);
        let table = HeatmapTable::build(&rows(), &view);
        assert_eq!(table.columns.len(), 13);
        assert_eq!(table.rows[0].date, day(1));
        assert_eq!(table.rows[0].cells.len(), 12);
        let header = table
            .columns
            .iter()
            .find(|c| c.key == SortKey::Metric(Metric::Positive))
            .unwrap();
        assert_eq!(header.sort_indicator, Some(SortDirection::Ascending));
        assert_eq!(table.columns[0].sort_indicator, None);
    }

    #[test]
    fn test_empty_table() {
        let table = HeatmapTable::build(&[], &view(DisplayMode::Raw));
        assert!(table.is_empty());
        assert_eq!(table.summary(), "Showing 0 records");
        assert_eq!(table.to_string().lines().count(), 2);
    }
}
