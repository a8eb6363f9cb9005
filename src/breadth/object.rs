//! Basic data structures used by the breadth dashboard.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use super::constant::{DisplayMode, SortDirection};
use super::error::{BreadthError, Result};
use super::registry::{Metric, METRICS, METRIC_COUNT};

/// JSON key of the row date
pub const DATE_KEY: &str = "Date";
/// JSON key of the normalization denominator
pub const TOTAL_TRADED_KEY: &str = "TotalTraded";

/// One trading day's breadth snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct BreadthRow {
    pub date: NaiveDate,
    /// Number of stocks traded that day
    pub total_traded: Option<f64>,
    /// One slot per registry metric, indexed by `Metric as usize`
    values: [Option<f64>; METRIC_COUNT],
    /// Numeric fields not in the registry
    pub extra: BTreeMap<String, f64>,
}

impl BreadthRow {
    /// Create an empty row for a date
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            total_traded: None,
            values: [None; METRIC_COUNT],
            extra: BTreeMap::new(),
        }
    }

    /// Builder-style setter for a metric value
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, Some(value));
        self
    }

    /// Builder-style setter for the total traded count
    pub fn with_total(mut self, total: f64) -> Self {
        self.total_traded = Some(total);
        self
    }

    /// Get a metric value; non-finite values count as missing
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.values[metric as usize].filter(|v| v.is_finite())
    }

    /// Set or clear a metric value
    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        self.values[metric as usize] = value.filter(|v| v.is_finite());
    }

    /// Look up a column by display name: registry metric first, then extras
    pub fn column_value(&self, name: &str) -> Option<f64> {
        match Metric::from_name(name) {
            Some(metric) => self.value(metric),
            None => self.extra.get(name).copied().filter(|v| v.is_finite()),
        }
    }

    /// Build a row from one JSON object
    pub fn from_json(obj: &Map<String, Value>) -> Result<Self> {
        let date = obj
            .get(DATE_KEY)
            .ok_or_else(|| BreadthError::Date(format!("missing {DATE_KEY} field")))
            .and_then(parse_date)?;

        let mut row = BreadthRow::new(date);
        for (key, value) in obj {
            if key == DATE_KEY {
                continue;
            }
            if key == TOTAL_TRADED_KEY {
                row.total_traded = numeric(value);
                continue;
            }
            match Metric::from_name(key) {
                // Canonical name wins over an alias carrying the same metric
                Some(metric) if row.values[metric as usize].is_none() || key == metric.name() => {
                    row.set(metric, numeric(value));
                }
                Some(_) => {}
                None => {
                    if let Some(v) = numeric(value) {
                        row.extra.insert(key.clone(), v);
                    }
                }
            }
        }
        Ok(row)
    }
}

/// Numeric JSON value, or `None` for null/non-numeric/non-finite
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Parse a row date from `YYYY-MM-DD`, a datetime string starting with it,
/// or epoch milliseconds
pub fn parse_date(value: &Value) -> Result<NaiveDate> {
    match value {
        Value::String(s) => {
            let head = s.get(..10).unwrap_or(s.as_str());
            NaiveDate::parse_from_str(head, "%Y-%m-%d")
                .map_err(|e| BreadthError::Date(format!("{s}: {e}")))
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| BreadthError::Date(format!("bad timestamp {n}"))),
        other => Err(BreadthError::Date(format!("unsupported date value {other}"))),
    }
}

impl Serialize for BreadthRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(DATE_KEY, &self.date.format("%Y-%m-%d").to_string())?;
        for desc in &METRICS {
            map.serialize_entry(desc.name, &self.value(desc.metric))?;
        }
        map.serialize_entry(TOTAL_TRADED_KEY, &self.total_traded)?;
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BreadthRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let obj = Map::deserialize(deserializer)?;
        BreadthRow::from_json(&obj).map_err(de::Error::custom)
    }
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Bounds ordered as (min, max)
    pub fn normalized(self) -> Self {
        Self {
            start: self.start.min(self.end),
            end: self.start.max(self.end),
        }
    }

    /// Normalize and clamp both bounds into [min, max]
    pub fn clamped(self, min: NaiveDate, max: NaiveDate) -> Self {
        let (lo, hi) = (min.min(max), min.max(max));
        let range = self.normalized();
        Self {
            start: range.start.clamp(lo, hi),
            end: range.end.clamp(lo, hi),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let range = self.normalized();
        range.start <= date && date <= range.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Column a table can be sorted by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Date,
    Metric(Metric),
    /// Numeric field outside the registry
    Extra(String),
}

impl SortKey {
    /// Resolve a column name as shown in a header
    pub fn from_column(name: &str) -> Self {
        if name == DATE_KEY {
            SortKey::Date
        } else if let Some(metric) = Metric::from_name(name) {
            SortKey::Metric(metric)
        } else {
            SortKey::Extra(name.to_string())
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Date => write!(f, "{DATE_KEY}"),
            SortKey::Metric(metric) => write!(f, "{metric}"),
            SortKey::Extra(name) => write!(f, "{name}"),
        }
    }
}

/// Active table sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Header click: same column flips direction, a new column starts descending
    pub fn toggled(&self, key: SortKey) -> Self {
        if self.key == key {
            Self::new(key, self.direction.reversed())
        } else {
            Self::new(key, SortDirection::Descending)
        }
    }
}

/// Initial values derived from the loaded rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeDefaults {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    pub initial_start: NaiveDate,
    pub initial_end: NaiveDate,
}

impl RangeDefaults {
    pub fn initial_range(&self) -> DateRange {
        DateRange::new(self.initial_start, self.initial_end)
    }
}

/// Everything the user can change, threaded through each transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub range: DateRange,
    pub sort: SortState,
    pub mode: DisplayMode,
    /// Visible metric columns, always in registry order
    pub visible: Vec<Metric>,
}

impl ViewState {
    /// Initial view for the derived defaults
    pub fn new(defaults: &RangeDefaults, mode: DisplayMode) -> Self {
        Self {
            range: defaults.initial_range(),
            sort: SortState::default(),
            mode,
            visible: Metric::all().collect(),
        }
    }

    /// Date picker change; bounds are clamped to the data extent
    pub fn with_range(&self, start: NaiveDate, end: NaiveDate, defaults: &RangeDefaults) -> Self {
        Self {
            range: DateRange::new(start, end).clamped(defaults.min_date, defaults.max_date),
            ..self.clone()
        }
    }

    /// Column header click
    pub fn toggle_sort(&self, key: SortKey) -> Self {
        Self {
            sort: self.sort.toggled(key),
            ..self.clone()
        }
    }

    pub fn with_mode(&self, mode: DisplayMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    /// Column checkbox
    pub fn toggle_column(&self, metric: Metric) -> Self {
        let visible = Metric::all()
            .filter(|m| {
                if *m == metric {
                    !self.visible.contains(m)
                } else {
                    self.visible.contains(m)
                }
            })
            .collect();
        Self {
            visible,
            ..self.clone()
        }
    }

    pub fn is_visible(&self, metric: Metric) -> bool {
        self.visible.contains(&metric)
    }

    /// Restore the derived range and all columns
    pub fn reset(&self, defaults: &RangeDefaults) -> Self {
        Self {
            range: defaults.initial_range(),
            visible: Metric::all().collect(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn defaults() -> RangeDefaults {
        RangeDefaults {
            min_date: date("2024-01-01"),
            max_date: date("2024-03-31"),
            initial_start: date("2024-02-01"),
            initial_end: date("2024-03-31"),
        }
    }

    #[test]
    fn test_row_from_json() {
        let value = json!({
            "Date": "2024-01-02",
            "Advance/Decline Ratio": 1.25,
            "No of stocks above 200 day simple moving average": 900,
            "Net New Highs": null,
            "No of stocks which are positive": "n/a",
            "TotalTraded": 2000,
            "Breadth Thrust": 0.61,
            "Comment": "ignored"
        });
        let row: BreadthRow = serde_json::from_value(value).unwrap();

        assert_eq!(row.date, date("2024-01-02"));
        assert_eq!(row.value(Metric::AdvanceDeclineRatio), Some(1.25));
        assert_eq!(row.value(Metric::Above200Sma), Some(900.0));
        assert_eq!(row.value(Metric::NetNewHighs), None);
        assert_eq!(row.value(Metric::Positive), None);
        assert_eq!(row.total_traded, Some(2000.0));
        assert_eq!(row.column_value("Breadth Thrust"), Some(0.61));
        assert!(!row.extra.contains_key("Comment"));
    }

    #[test]
    fn test_row_date_formats() {
        assert_eq!(parse_date(&json!("2024-05-06T00:00:00.000")).unwrap(), date("2024-05-06"));
        assert_eq!(parse_date(&json!(1704153600000_i64)).unwrap(), date("2024-01-02"));
        assert!(parse_date(&json!("06/05/2024")).is_err());
        assert!(parse_date(&json!(true)).is_err());
    }

    #[test]
    fn test_row_missing_date() {
        let result: std::result::Result<BreadthRow, _> =
            serde_json::from_value(json!({"Net New Highs": 3}));
        assert!(result.is_err());
    }

    #[test]
    fn test_row_serialize_uses_display_names() {
        let row = BreadthRow::new(date("2024-01-02"))
            .with(Metric::NetNewHighs, -4.0)
            .with_total(100.0);
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["Date"], "2024-01-02");
        assert_eq!(value["Net New Highs"], -4.0);
        assert_eq!(value["TotalTraded"], 100.0);
        assert!(value["Advance/Decline Ratio"].is_null());
    }

    #[test]
    fn test_date_range_normalize_and_clamp() {
        let range = DateRange::new(date("2024-05-01"), date("2023-12-01"));
        let normalized = range.normalized();
        assert_eq!(normalized.start, date("2023-12-01"));
        assert_eq!(normalized.end, date("2024-05-01"));

        let clamped = range.clamped(date("2024-01-01"), date("2024-03-31"));
        assert_eq!(clamped, DateRange::new(date("2024-01-01"), date("2024-03-31")));
        assert!(range.contains(date("2024-02-29")));
    }

    #[test]
    fn test_sort_toggle() {
        let state = SortState::default();
        assert_eq!(state.key, SortKey::Date);
        assert_eq!(state.direction, SortDirection::Descending);

        let flipped = state.toggled(SortKey::Date);
        assert_eq!(flipped.direction, SortDirection::Ascending);

        let other = flipped.toggled(SortKey::Metric(Metric::NetNewHighs));
        assert_eq!(other.key, SortKey::Metric(Metric::NetNewHighs));
        assert_eq!(other.direction, SortDirection::Descending);
    }

    #[test]
    fn test_sort_key_from_column() {
        assert_eq!(SortKey::from_column("Date"), SortKey::Date);
        assert_eq!(
            SortKey::from_column("Net New Highs"),
            SortKey::Metric(Metric::NetNewHighs)
        );
        assert_eq!(SortKey::from_column("Thrust"), SortKey::Extra("Thrust".into()));
    }

    #[test]
    fn test_view_state_transitions() {
        let defaults = defaults();
        let view = ViewState::new(&defaults, DisplayMode::Raw);
        assert_eq!(view.visible.len(), 13);

        let narrowed = view
            .with_range(date("2025-01-01"), date("2024-01-15"), &defaults)
            .toggle_column(Metric::Positive)
            .with_mode(DisplayMode::PercentOfTotal);
        assert_eq!(narrowed.range, DateRange::new(date("2024-01-15"), date("2024-03-31")));
        assert!(!narrowed.is_visible(Metric::Positive));
        assert_eq!(narrowed.visible.len(), 12);

        let restored = narrowed.toggle_column(Metric::Positive);
        assert_eq!(restored.visible, Metric::all().collect::<Vec<_>>());

        let reset = narrowed.toggle_sort(SortKey::Metric(Metric::Negative)).reset(&defaults);
        assert_eq!(reset.range, defaults.initial_range());
        assert_eq!(reset.visible.len(), 13);
        assert_eq!(reset.mode, DisplayMode::PercentOfTotal);
        assert_eq!(reset.sort.key, SortKey::Metric(Metric::Negative));
    }
}
