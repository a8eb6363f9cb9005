//! Static registry of the tracked breadth indicators.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::constant::{BandPolicy, MetricFormat, Polarity};

/// A tracked market breadth indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Up4_5PctDay,
    Down4_5PctDay,
    Up20Pct5Days,
    Down20Pct5Days,
    Above200Sma,
    PctAbove200Sma,
    Above50Sma,
    Above20Sma,
    Positive,
    Negative,
    AdvanceDeclineRatio,
    NetNewHighs,
    NetNew52WeekHighsPct,
}

/// Static description of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDescriptor {
    pub metric: Metric,
    /// Display name, also the key in the JSON snapshot
    pub name: &'static str,
    /// Alternative keys accepted when loading
    pub aliases: &'static [&'static str],
    pub polarity: Polarity,
    pub format: MetricFormat,
    /// Never divided by the total traded count
    pub excluded_from_percent_of_total: bool,
    /// Pure ratio, charted on its native scale
    pub is_ratio: bool,
    /// Series can change sign and needs a gradient split
    pub crosses_zero: bool,
    pub band: BandPolicy,
    /// Parity/zero line drawn on the chart
    pub reference_line: Option<f64>,
}

const fn count(
    metric: Metric,
    name: &'static str,
    aliases: &'static [&'static str],
    polarity: Polarity,
    band: BandPolicy,
) -> MetricDescriptor {
    MetricDescriptor {
        metric,
        name,
        aliases,
        polarity,
        format: MetricFormat::Integer,
        excluded_from_percent_of_total: false,
        is_ratio: false,
        crosses_zero: false,
        band,
        reference_line: None,
    }
}

/// Number of registry metrics
pub const METRIC_COUNT: usize = 13;

/// All metrics in display order.
pub static METRICS: [MetricDescriptor; METRIC_COUNT] = [
    count(
        Metric::Up4_5PctDay,
        "No. of stocks up 4.5%+ in the current day",
        &[],
        Polarity::Good,
        BandPolicy::None,
    ),
    count(
        Metric::Down4_5PctDay,
        "No. of stocs down 4.5%+ in the current day",
        &["No. of stocks down 4.5%+ in the current day"],
        Polarity::Bad,
        BandPolicy::None,
    ),
    count(
        Metric::Up20Pct5Days,
        "No. of stocks up 20%+ in 5 days",
        &[],
        Polarity::Good,
        BandPolicy::Percent,
    ),
    count(
        Metric::Down20Pct5Days,
        "No. of stocks down 20%+ in 5 days",
        &[],
        Polarity::Bad,
        BandPolicy::Percent,
    ),
    count(
        Metric::Above200Sma,
        "No of stocks above 200 day SMA",
        &["No of stocks above 200 day simple moving average"],
        Polarity::Good,
        BandPolicy::Percent,
    ),
    MetricDescriptor {
        metric: Metric::PctAbove200Sma,
        name: "% Stocks > 200 SMA",
        aliases: &[],
        polarity: Polarity::Good,
        format: MetricFormat::Percent,
        excluded_from_percent_of_total: true,
        is_ratio: false,
        crosses_zero: false,
        band: BandPolicy::Percent,
        reference_line: None,
    },
    count(
        Metric::Above50Sma,
        "No of stocks above 50 day SMA",
        &["No of stocks above 50 day simple moving average"],
        Polarity::Good,
        BandPolicy::Percent,
    ),
    count(
        Metric::Above20Sma,
        "No of stocks above 20 day SMA",
        &["No of stocks above 20 day simple moving average"],
        Polarity::Good,
        BandPolicy::Percent,
    ),
    count(
        Metric::Positive,
        "No of stocks which are positive",
        &[],
        Polarity::Good,
        BandPolicy::Percent,
    ),
    count(
        Metric::Negative,
        "No of stocks which are negative",
        &[],
        Polarity::Bad,
        BandPolicy::Percent,
    ),
    MetricDescriptor {
        metric: Metric::AdvanceDeclineRatio,
        name: "Advance/Decline Ratio",
        aliases: &[],
        polarity: Polarity::Diverging,
        format: MetricFormat::Float,
        excluded_from_percent_of_total: true,
        is_ratio: true,
        crosses_zero: false,
        band: BandPolicy::Ratio,
        reference_line: Some(1.0),
    },
    MetricDescriptor {
        metric: Metric::NetNewHighs,
        name: "Net New Highs",
        aliases: &[],
        polarity: Polarity::Diverging,
        format: MetricFormat::Integer,
        excluded_from_percent_of_total: false,
        is_ratio: false,
        crosses_zero: true,
        band: BandPolicy::Percent,
        reference_line: Some(0.0),
    },
    MetricDescriptor {
        metric: Metric::NetNew52WeekHighsPct,
        name: "Net New 52-Week Highs as % of Total Stocks",
        aliases: &[],
        polarity: Polarity::Diverging,
        format: MetricFormat::Percent,
        excluded_from_percent_of_total: true,
        is_ratio: false,
        crosses_zero: true,
        band: BandPolicy::Percent,
        reference_line: Some(0.0),
    },
];

impl Metric {
    /// All metrics in display order
    pub fn all() -> impl Iterator<Item = Metric> {
        METRICS.iter().map(|d| d.metric)
    }

    /// Descriptor for this metric
    pub fn descriptor(self) -> &'static MetricDescriptor {
        // METRICS is declared in enum order
        &METRICS[self as usize]
    }

    /// Display name / JSON key
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Resolve a display name or alias
    pub fn from_name(name: &str) -> Option<Metric> {
        METRICS
            .iter()
            .find(|d| d.name == name || d.aliases.contains(&name))
            .map(|d| d.metric)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_order_matches_enum() {
        for (ix, desc) in METRICS.iter().enumerate() {
            assert_eq!(desc.metric as usize, ix, "{} out of order", desc.name);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut seen = HashSet::new();
        for desc in &METRICS {
            assert!(seen.insert(desc.name));
            for alias in desc.aliases {
                assert!(seen.insert(*alias));
            }
        }
    }

    #[test]
    fn test_from_name_and_alias() {
        assert_eq!(
            Metric::from_name("Advance/Decline Ratio"),
            Some(Metric::AdvanceDeclineRatio)
        );
        assert_eq!(
            Metric::from_name("No of stocks above 200 day simple moving average"),
            Some(Metric::Above200Sma)
        );
        assert_eq!(Metric::from_name("Date"), None);
    }

    #[test]
    fn test_flags() {
        let ratio = Metric::AdvanceDeclineRatio.descriptor();
        assert!(ratio.is_ratio);
        assert!(ratio.excluded_from_percent_of_total);
        assert_eq!(ratio.band, BandPolicy::Ratio);

        assert!(Metric::NetNewHighs.descriptor().crosses_zero);
        assert_eq!(Metric::Up4_5PctDay.descriptor().band, BandPolicy::None);
        assert_eq!(Metric::Down4_5PctDay.descriptor().band, BandPolicy::None);
        assert_eq!(Metric::all().count(), 13);
    }
}
