//! Value normalization shared by the heatmap table and the chart series.
//!
//! A raw metric value is first scaled ([`scale_value`]) and then formatted
//! ([`format_scaled`]). Both consumers go through [`scale_value`], so a cell
//! and the matching chart point always agree on the number.

use serde::Serialize;

use super::constant::{DisplayMode, MetricFormat};
use super::object::BreadthRow;
use super::registry::{Metric, MetricDescriptor};
use super::utility::{format_fixed, group_thousands, round_dp};

/// Display text of a missing value
pub const MISSING: &str = "-";

/// Unit of a scaled value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueUnit {
    /// Share of the day's total traded stocks, in percent
    PercentOfTotal,
    /// The metric's own format
    Native(MetricFormat),
}

impl ValueUnit {
    /// Whether values of this unit are percentages
    pub fn is_percent(self) -> bool {
        matches!(
            self,
            ValueUnit::PercentOfTotal | ValueUnit::Native(MetricFormat::Percent)
        )
    }
}

/// A metric value after mode scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaledValue {
    pub value: f64,
    pub unit: ValueUnit,
}

/// Unit a metric is shown in under a display mode
pub fn unit_for(desc: &MetricDescriptor, mode: DisplayMode) -> ValueUnit {
    let convertible =
        desc.format == MetricFormat::Integer && !desc.excluded_from_percent_of_total;
    match mode {
        DisplayMode::PercentOfTotal if convertible => ValueUnit::PercentOfTotal,
        _ => ValueUnit::Native(desc.format),
    }
}

/// Scale a raw value under a display mode.
///
/// Returns `None` for a missing value. In percent-of-total mode a zero or
/// absent total yields `0.0` instead of a non-finite quotient.
pub fn scale_value(
    value: Option<f64>,
    total: Option<f64>,
    desc: &MetricDescriptor,
    mode: DisplayMode,
) -> Option<ScaledValue> {
    let value = value.filter(|v| v.is_finite())?;
    let unit = unit_for(desc, mode);
    let value = match unit {
        ValueUnit::PercentOfTotal => total
            .filter(|t| t.is_finite() && *t != 0.0)
            .map(|total| value / total * 100.0)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        ValueUnit::Native(_) => value,
    };
    Some(ScaledValue { value, unit })
}

/// Text for a scaled value
pub fn format_scaled(scaled: &ScaledValue) -> String {
    match scaled.unit {
        ValueUnit::PercentOfTotal | ValueUnit::Native(MetricFormat::Percent) => {
            format!("{}%", format_fixed(scaled.value, 1))
        }
        ValueUnit::Native(MetricFormat::Float) => format_fixed(scaled.value, 2),
        ValueUnit::Native(MetricFormat::Integer) => {
            group_thousands(round_dp(scaled.value, 0) as i64)
        }
    }
}

/// Display text of a raw value; missing values render as [`MISSING`]
pub fn normalize(
    value: Option<f64>,
    total: Option<f64>,
    metric: Metric,
    mode: DisplayMode,
) -> String {
    scale_value(value, total, metric.descriptor(), mode)
        .map(|scaled| format_scaled(&scaled))
        .unwrap_or_else(|| MISSING.to_string())
}

/// Display text of one row's metric
pub fn normalize_cell(row: &BreadthRow, metric: Metric, mode: DisplayMode) -> String {
    normalize(row.value(metric), row.total_traded, metric, mode)
}
