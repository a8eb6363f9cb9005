//! Chart series projection.
//!
//! A series is always in chronological order, independent of the table
//! sort. Values go through the same normalization as table cells; a missing
//! value is drawn as zero while the point keeps `original_value: None`.

use chrono::NaiveDate;
use serde::Serialize;

use super::base::{
    axis_date_label, calculate_axis_ticks_with_min_step, format_axis_value, format_tooltip, Rgb,
    BAND_OPACITY, FAVOURABLE_COLOR, MAX_AXIS_TICKS, RATIO_BAND_DRAW_LIMIT, REFERENCE_LINE_COLOR,
    UNFAVOURABLE_COLOR,
};
use crate::breadth::constant::{BandPolicy, DisplayMode, MetricFormat, Polarity};
use crate::breadth::normalize::{scale_value, unit_for, ValueUnit};
use crate::breadth::object::BreadthRow;
use crate::breadth::registry::{Metric, MetricDescriptor};

/// Percent-scale extreme bands
pub const PERCENT_HIGH_BAND: (f64, f64) = (80.0, 100.0);
pub const PERCENT_LOW_BAND: (f64, f64) = (0.0, 20.0);

/// Advance/decline ratio extremes: 4 is about 80% advancers, 0.25 about 20%
pub const RATIO_HIGH_THRESHOLD: f64 = 4.0;
pub const RATIO_LOW_BAND: (f64, f64) = (0.0, 0.25);

/// One plotted day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub original_value: Option<f64>,
    pub total: Option<f64>,
}

/// Project a metric onto chronologically ascending points
pub fn project(rows: &[BreadthRow], metric: Metric, mode: DisplayMode) -> Vec<SeriesPoint> {
    let desc = metric.descriptor();
    let mut ordered: Vec<&BreadthRow> = rows.iter().collect();
    ordered.sort_by(|a, b| a.date.cmp(&b.date));

    ordered
        .into_iter()
        .map(|row| {
            let original_value = row.value(metric);
            let value = scale_value(original_value, row.total_traded, desc, mode)
                .map(|scaled| scaled.value)
                .unwrap_or(0.0);
            SeriesPoint {
                date: row.date,
                value,
                original_value,
                total: row.total_traded,
            }
        })
        .collect()
}

/// Fraction of the plot height, from the top, where the tint turns from
/// positive to negative. `None` for an empty series.
pub fn gradient_split(points: &[SeriesPoint]) -> Option<f64> {
    let first = points.first()?.value;
    let (min, max) = points
        .iter()
        .fold((first, first), |(lo, hi), p| (lo.min(p.value), hi.max(p.value)));

    let split = if max <= 0.0 {
        0.0
    } else if min >= 0.0 {
        1.0
    } else {
        max / (max - min)
    };
    Some(split)
}

/// Whether a band marks a favourable or unfavourable extreme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BandKind {
    Favourable,
    Unfavourable,
}

impl BandKind {
    pub fn color(self) -> Rgb {
        match self {
            BandKind::Favourable => FAVOURABLE_COLOR,
            BandKind::Unfavourable => UNFAVOURABLE_COLOR,
        }
    }
}

/// A shaded horizontal band. `upper: None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub kind: BandKind,
    pub lower: f64,
    pub upper: Option<f64>,
    pub color: Rgb,
    pub opacity: f32,
}

impl Band {
    fn new(kind: BandKind, lower: f64, upper: Option<f64>) -> Self {
        Self {
            kind,
            lower,
            upper,
            color: kind.color(),
            opacity: BAND_OPACITY,
        }
    }

    /// Upper edge to draw; open bands stop at a fixed limit
    pub fn draw_upper(&self) -> f64 {
        self.upper.unwrap_or(RATIO_BAND_DRAW_LIMIT.max(self.lower))
    }

    /// Inclusive at both edges
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && self.upper.map_or(true, |upper| value <= upper)
    }
}

/// Extreme bands of a series.
///
/// Percent bands apply only once the series is on a percent scale; for
/// `bad` metrics the high band is the unfavourable one.
pub fn bands_for(desc: &MetricDescriptor, unit: ValueUnit) -> Vec<Band> {
    match desc.band {
        BandPolicy::None => Vec::new(),
        BandPolicy::Ratio => vec![
            Band::new(BandKind::Favourable, RATIO_HIGH_THRESHOLD, None),
            Band::new(BandKind::Unfavourable, RATIO_LOW_BAND.0, Some(RATIO_LOW_BAND.1)),
        ],
        BandPolicy::Percent if unit.is_percent() => {
            let (high, low) = match desc.polarity {
                Polarity::Bad => (BandKind::Unfavourable, BandKind::Favourable),
                _ => (BandKind::Favourable, BandKind::Unfavourable),
            };
            vec![
                Band::new(high, PERCENT_HIGH_BAND.0, Some(PERCENT_HIGH_BAND.1)),
                Band::new(low, PERCENT_LOW_BAND.0, Some(PERCENT_LOW_BAND.1)),
            ]
        }
        BandPolicy::Percent => Vec::new(),
    }
}

/// Band a single value falls in, if any
pub fn classify(value: f64, bands: &[Band]) -> Option<BandKind> {
    bands.iter().find(|band| band.contains(value)).map(|band| band.kind)
}

/// Everything a line chart of one metric needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub metric: Metric,
    pub title: String,
    pub polarity: Polarity,
    pub unit: ValueUnit,
    pub line_color: Rgb,
    pub points: Vec<SeriesPoint>,
    /// Only for metrics that cross zero
    pub gradient_split: Option<f64>,
    pub bands: Vec<Band>,
    pub reference_line: Option<f64>,
    pub reference_line_color: Rgb,
    pub y_ticks: Vec<f64>,
    pub tooltip_label: &'static str,
}

impl ChartSeries {
    pub fn build(rows: &[BreadthRow], metric: Metric, mode: DisplayMode) -> Self {
        let desc = metric.descriptor();
        let unit = unit_for(desc, mode);
        let points = project(rows, metric, mode);

        let title = match unit {
            ValueUnit::PercentOfTotal => format!("{} (%)", desc.name),
            ValueUnit::Native(_) => desc.name.to_string(),
        };
        let line_color = match desc.polarity {
            Polarity::Bad => UNFAVOURABLE_COLOR,
            _ => FAVOURABLE_COLOR,
        };
        let tooltip_label = if unit.is_percent() {
            "Percentage"
        } else if desc.is_ratio {
            "Ratio"
        } else {
            "Value"
        };
        let gradient_split = if desc.crosses_zero {
            gradient_split(&points)
        } else {
            None
        };
        // Whole counts never get fractional ticks
        let min_step = match unit {
            ValueUnit::Native(MetricFormat::Integer) => 1.0,
            _ => 0.0,
        };
        let y_ticks = match value_extent(&points) {
            Some((min, max)) => {
                calculate_axis_ticks_with_min_step(min, max, MAX_AXIS_TICKS, min_step)
            }
            None => Vec::new(),
        };

        Self {
            metric,
            title,
            polarity: desc.polarity,
            unit,
            line_color,
            gradient_split,
            bands: bands_for(desc, unit),
            reference_line: desc.reference_line,
            reference_line_color: REFERENCE_LINE_COLOR,
            y_ticks,
            tooltip_label,
            points,
        }
    }

    /// Decimals shown on the y axis
    fn axis_decimals(&self) -> u32 {
        match self.unit {
            ValueUnit::PercentOfTotal | ValueUnit::Native(MetricFormat::Percent) => 1,
            ValueUnit::Native(MetricFormat::Float) => 2,
            ValueUnit::Native(MetricFormat::Integer) => 0,
        }
    }

    pub fn y_tick_labels(&self) -> Vec<String> {
        let percent = self.unit.is_percent();
        let decimals = self.axis_decimals();
        self.y_ticks
            .iter()
            .map(|tick| format_axis_value(*tick, percent, decimals))
            .collect()
    }

    pub fn x_labels(&self) -> Vec<String> {
        self.points.iter().map(|p| axis_date_label(p.date)).collect()
    }

    /// Tooltip text of one point, e.g. `Percentage: 42.00%`
    pub fn tooltip(&self, point: &SeriesPoint) -> String {
        format!(
            "{}: {}",
            self.tooltip_label,
            format_tooltip(point.value, self.unit.is_percent())
        )
    }

    /// Band of each point, in point order
    pub fn point_bands(&self) -> Vec<Option<BandKind>> {
        self.points.iter().map(|p| classify(p.value, &self.bands)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn value_extent(points: &[SeriesPoint]) -> Option<(f64, f64)> {
    let first = points.first()?.value;
    Some(
        points
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(p.value), hi.max(p.value))),
    )
}
