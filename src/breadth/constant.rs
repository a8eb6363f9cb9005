//! General constant enums used by the breadth dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether high values of a metric are favourable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// High is good (e.g. stocks above a moving average)
    Good,
    /// High is bad (e.g. stocks down 4.5%+)
    Bad,
    /// Sign or distance from a midpoint matters (e.g. net new highs)
    Diverging,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Good => write!(f, "good"),
            Polarity::Bad => write!(f, "bad"),
            Polarity::Diverging => write!(f, "diverging"),
        }
    }
}

/// Numeric display format of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricFormat {
    /// Whole-number count, shown with grouping separators
    Integer,
    /// Fractional value, two decimals
    Float,
    /// Already a percentage, one decimal and a trailing `%`
    Percent,
}

impl fmt::Display for MetricFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricFormat::Integer => write!(f, "integer"),
            MetricFormat::Float => write!(f, "float"),
            MetricFormat::Percent => write!(f, "percent"),
        }
    }
}

/// Value display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Values as supplied
    #[default]
    Raw,
    /// Counts divided by the day's total traded stocks
    PercentOfTotal,
}

impl DisplayMode {
    /// Flip between raw and percent-of-total
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Raw => DisplayMode::PercentOfTotal,
            DisplayMode::PercentOfTotal => DisplayMode::Raw,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Raw => write!(f, "raw"),
            DisplayMode::PercentOfTotal => write!(f, "% of total"),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow used in column headers
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

/// Extreme-band policy of a metric's chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandPolicy {
    /// [80, 100] and [0, 20] on a percent scale
    Percent,
    /// [4, +inf) and [0, 0.25] on the advance/decline ratio scale
    Ratio,
    /// Metric is already an extreme-event count
    None,
}

/// Which page the date range defaults are derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    /// Heatmap table with a recent lookback window
    #[default]
    Summary,
    /// Charts over the whole history
    TimeSeries,
}
