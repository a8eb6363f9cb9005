//! Date-range filtering and default range derivation.

use chrono::{Days, Local, NaiveDate};
use tracing::{debug, warn};

use super::constant::ViewKind;
use super::object::{BreadthRow, DateRange, RangeDefaults};
use super::setting::Settings;

/// Default lookback of the summary view
pub const DEFAULT_LOOKBACK_DAYS: u64 = 60;

/// Earliest date assumed when there is no data
pub const FALLBACK_MIN_DATE: &str = "2022-01-01";

/// Parameters of the default range derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeConfig {
    pub lookback_days: u64,
    pub fallback_min_date: NaiveDate,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            fallback_min_date: fallback_min_date(),
        }
    }
}

impl RangeConfig {
    /// Read `view.lookback_days` and `view.fallback_min_date`, falling back to defaults
    pub fn from_settings(settings: &Settings) -> Self {
        let default = Self::default();
        let lookback_days = settings
            .require_non_negative("view.lookback_days")
            .unwrap_or_else(|e| {
                warn!("{}, using {} days", e, default.lookback_days);
                default.lookback_days
            });
        let fallback_min_date = settings
            .get_string("view.fallback_min_date")
            .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
            .unwrap_or(default.fallback_min_date);
        Self {
            lookback_days,
            fallback_min_date,
        }
    }
}

fn fallback_min_date() -> NaiveDate {
    NaiveDate::parse_from_str(FALLBACK_MIN_DATE, "%Y-%m-%d").unwrap_or(NaiveDate::MIN)
}

/// Rows whose date lies in the inclusive range; bounds may be given in either order
pub fn filter_rows(rows: &[BreadthRow], start: NaiveDate, end: NaiveDate) -> Vec<BreadthRow> {
    let range = DateRange::new(start, end).normalized();
    let filtered: Vec<BreadthRow> = rows
        .iter()
        .filter(|row| range.contains(row.date))
        .cloned()
        .collect();
    debug!(
        "filtered {} of {} rows to {}",
        filtered.len(),
        rows.len(),
        range
    );
    filtered
}

/// Earliest and latest date present, if any
pub fn date_extent(rows: &[BreadthRow]) -> Option<(NaiveDate, NaiveDate)> {
    let first = rows.first()?.date;
    Some(rows.iter().fold((first, first), |(lo, hi), row| {
        (lo.min(row.date), hi.max(row.date))
    }))
}

/// Derive the data extent and initial range with the default configuration
pub fn derive_defaults(rows: &[BreadthRow], kind: ViewKind) -> RangeDefaults {
    derive_defaults_with(rows, kind, &RangeConfig::default(), Local::now().date_naive())
}

/// Derive the data extent and initial range.
///
/// With no rows the extent is `[config.fallback_min_date, today]`. The summary
/// view starts `lookback_days` before the latest date, clamped to the extent;
/// the time-series view starts at the earliest date.
pub fn derive_defaults_with(
    rows: &[BreadthRow],
    kind: ViewKind,
    config: &RangeConfig,
    today: NaiveDate,
) -> RangeDefaults {
    let (min_date, max_date) = date_extent(rows).unwrap_or_else(|| {
        let lo = config.fallback_min_date.min(today);
        (lo, today)
    });

    let initial_start = match kind {
        ViewKind::Summary => max_date
            .checked_sub_days(Days::new(config.lookback_days))
            .unwrap_or(min_date)
            .max(min_date),
        ViewKind::TimeSeries => min_date,
    };

    RangeDefaults {
        min_date,
        max_date,
        initial_start,
        initial_end: max_date,
    }
}
