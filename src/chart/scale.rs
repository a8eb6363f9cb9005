//! Per-metric heatmap color scales.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use super::base::{Rgb, BRIGHT_GREEN, BRIGHT_RED, DARK_GREEN, SLATE};
use crate::breadth::constant::Polarity;
use crate::breadth::object::BreadthRow;
use crate::breadth::registry::{Metric, METRICS};

/// Domain used when a metric has no values in view
pub const FALLBACK_DOMAIN: (f64, f64) = (0.0, 100.0);

/// Piecewise-linear mapping from a value to a color.
///
/// `domain` and `range` have the same length (two or three stops) and the
/// domain is non-decreasing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScale {
    domain: Vec<f64>,
    range: Vec<Rgb>,
}

impl ColorScale {
    /// Two-stop scale over [min, max]
    pub fn linear(min: f64, max: f64, low: Rgb, high: Rgb) -> Self {
        Self {
            domain: vec![min, max],
            range: vec![low, high],
        }
    }

    /// Three-stop scale over [min, (min + max) / 2, max]
    pub fn diverging(min: f64, max: f64, low: Rgb, mid: Rgb, high: Rgb) -> Self {
        Self {
            domain: vec![min, (min + max) / 2.0, max],
            range: vec![low, mid, high],
        }
    }

    /// Scale for a metric's polarity over [min, max]
    pub fn for_polarity(polarity: Polarity, min: f64, max: f64) -> Self {
        match polarity {
            Polarity::Good => Self::linear(min, max, DARK_GREEN, BRIGHT_GREEN),
            Polarity::Bad => Self::linear(min, max, DARK_GREEN, BRIGHT_RED),
            Polarity::Diverging => Self::diverging(min, max, BRIGHT_RED, SLATE, BRIGHT_GREEN),
        }
    }

    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    pub fn range(&self) -> &[Rgb] {
        &self.range
    }

    /// Map a value to a color; values outside the domain clamp to the end colors
    pub fn color(&self, value: f64) -> Rgb {
        let (Some(&lo), Some(&hi)) = (self.domain.first(), self.domain.last()) else {
            return SLATE;
        };
        let first = self.range[0];
        let last = self.range[self.range.len() - 1];

        if value.is_nan() || value <= lo {
            return first;
        }
        if value >= hi {
            return last;
        }

        for ix in 1..self.domain.len() {
            let (d0, d1) = (self.domain[ix - 1], self.domain[ix]);
            if value <= d1 {
                let span = d1 - d0;
                let t = if span > 0.0 { (value - d0) / span } else { 1.0 };
                return self.range[ix - 1].lerp(self.range[ix], t);
            }
        }
        last
    }
}

/// Extremes of a metric over the rows, ignoring missing values
pub fn value_extent(rows: &[BreadthRow], metric: Metric) -> Option<(f64, f64)> {
    rows.iter()
        .filter_map(|row| row.value(metric))
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })
}

/// Build one color scale per registry metric from the visible rows.
///
/// Only which values are present matters, not row order.
pub fn build_scales(rows: &[BreadthRow]) -> BTreeMap<Metric, ColorScale> {
    let scales: BTreeMap<Metric, ColorScale> = METRICS
        .iter()
        .map(|desc| {
            let (min, max) = value_extent(rows, desc.metric).unwrap_or(FALLBACK_DOMAIN);
            (desc.metric, ColorScale::for_polarity(desc.polarity, min, max))
        })
        .collect();
    debug!("built {} color scales from {} rows", scales.len(), rows.len());
    scales
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(day: u32, metric: Metric, value: f64) -> BreadthRow {
        BreadthRow::new(NaiveDate::from_ymd_opt(2024, 3, day).unwrap()).with(metric, value)
    }

    #[test]
    fn test_endpoints_are_exact() {
        let rows = vec![
            row(1, Metric::Positive, 120.0),
            row(2, Metric::Positive, 900.0),
            row(3, Metric::Positive, 450.0),
        ];
        let scales = build_scales(&rows);
        let scale = &scales[&Metric::Positive];
        assert_eq!(scale.color(120.0), DARK_GREEN);
        assert_eq!(scale.color(900.0), BRIGHT_GREEN);
    }

    #[test]
    fn test_polarity_ranges() {
        let bad = ColorScale::for_polarity(Polarity::Bad, 0.0, 10.0);
        assert_eq!(bad.range(), &[DARK_GREEN, BRIGHT_RED]);

        let diverging = ColorScale::for_polarity(Polarity::Diverging, -10.0, 30.0);
        assert_eq!(diverging.domain(), &[-10.0, 10.0, 30.0]);
        assert_eq!(diverging.color(-10.0), BRIGHT_RED);
        assert_eq!(diverging.color(10.0), SLATE);
        assert_eq!(diverging.color(30.0), BRIGHT_GREEN);
    }

    #[test]
    fn test_out_of_domain_clamps() {
        let scale = ColorScale::linear(0.0, 10.0, DARK_GREEN, BRIGHT_GREEN);
        assert_eq!(scale.color(-5.0), DARK_GREEN);
        assert_eq!(scale.color(50.0), BRIGHT_GREEN);
        assert_eq!(scale.color(f64::NAN), DARK_GREEN);
    }

    #[test]
    fn test_interpolates_between_stops() {
        let end = Rgb::from_rgb(200, 100, 50);
        let scale = ColorScale::linear(0.0, 2.0, Rgb::from_rgb(0, 0, 0), end);
        assert_eq!(scale.color(1.0), Rgb::from_rgb(100, 50, 25));
    }

    #[test]
    fn test_degenerate_domain() {
        let rows = vec![row(1, Metric::AdvanceDeclineRatio, 1.2)];
        let scale = &build_scales(&rows)[&Metric::AdvanceDeclineRatio];
        assert_eq!(scale.domain(), &[1.2, 1.2, 1.2]);
        assert_eq!(scale.color(1.2), BRIGHT_RED);
        assert_eq!(scale.color(1.5), BRIGHT_GREEN);
    }

    #[test]
    fn test_fallback_domain_and_order_independence() {
        let rows = vec![
            row(1, Metric::NetNewHighs, -4.0),
            row(2, Metric::NetNewHighs, 7.0),
        ];
        let mut reversed = rows.clone();
        reversed.reverse();
        assert_eq!(build_scales(&rows), build_scales(&reversed));

        let scales = build_scales(&rows);
        assert_eq!(scales.len(), METRICS.len());
        assert_eq!(scales[&Metric::Above50Sma].domain(), &[0.0, 100.0]);
        assert_eq!(build_scales(&[])[&Metric::Negative].domain(), &[0.0, 100.0]);
    }
}
