//! Headline KPI cards shown above the heatmap.

use serde::Serialize;
use std::fmt;

use super::object::BreadthRow;
use super::registry::Metric;
use super::utility::{format_fixed, group_thousands, round_dp};

/// Direction of a card's day-over-day change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    /// Trend of a delta as displayed, so a change that rounds to zero is flat
    fn from_delta(delta: f64, dp: u32) -> Self {
        let shown = round_dp(delta, dp);
        if shown > 0.0 {
            Trend::Up
        } else if shown < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Flat => "−",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.icon())
    }
}

/// One headline figure with its change against the previous session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub metric: Metric,
    pub label: &'static str,
    pub value: f64,
    pub display: String,
    pub sub_display: Option<String>,
    pub delta: f64,
    pub delta_display: String,
    pub trend: Trend,
    /// Whether the current level is tinted as favourable
    pub is_good: bool,
}

impl KpiCard {
    fn new(
        metric: Metric,
        label: &'static str,
        latest: f64,
        previous: f64,
        dp: u32,
        percent: bool,
    ) -> Self {
        let suffix = if percent { "%" } else { "" };
        let delta = latest - previous;
        Self {
            metric,
            label,
            value: latest,
            display: format!("{}{}", format_fixed(latest, dp), suffix),
            sub_display: None,
            delta,
            delta_display: format!("{}{}", format_fixed(delta, dp), suffix),
            trend: Trend::from_delta(delta, dp),
            is_good: true,
        }
    }
}

impl fmt::Display for KpiCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {} {}", self.label, self.display, self.trend, self.delta_display)?;
        if let Some(sub) = &self.sub_display {
            write!(f, " {sub}")?;
        }
        Ok(())
    }
}

/// Share of stocks above their 200 day average, in percent
fn above_200_share(row: &BreadthRow) -> Option<f64> {
    let count = row.value(Metric::Above200Sma)?;
    let total = row.total_traded.filter(|t| t.is_finite() && *t != 0.0)?;
    Some(count / total * 100.0).filter(|share| share.is_finite())
}

/// Build the KPI strip from rows in any order.
///
/// The newest row is compared against the one before it; with a single row
/// both are the same and every delta is zero. A card whose latest input is
/// missing is left out, and a missing previous input counts as no change.
pub fn compute_kpis(rows: &[BreadthRow]) -> Vec<KpiCard> {
    let mut ordered: Vec<&BreadthRow> = rows.iter().collect();
    ordered.sort_by(|a, b| b.date.cmp(&a.date));
    let Some(latest) = ordered.first().copied() else {
        return Vec::new();
    };
    let previous = ordered.get(1).copied().unwrap_or(latest);

    let mut cards = Vec::with_capacity(3);

    if let Some(share) = above_200_share(latest) {
        let prev = above_200_share(previous).unwrap_or(share);
        let mut card = KpiCard::new(Metric::Above200Sma, "Stocks > 200 SMA", share, prev, 1, true);
        let count = latest.value(Metric::Above200Sma);
        if let (Some(count), Some(total)) = (count, latest.total_traded) {
            card.sub_display = Some(format!(
                "({} / {})",
                group_thousands(round_dp(count, 0) as i64),
                group_thousands(round_dp(total, 0) as i64)
            ));
        }
        cards.push(card);
    }

    if let Some(ratio) = latest.value(Metric::AdvanceDeclineRatio) {
        let prev = previous.value(Metric::AdvanceDeclineRatio).unwrap_or(ratio);
        let mut card = KpiCard::new(
            Metric::AdvanceDeclineRatio,
            "Advance/Decline Ratio",
            ratio,
            prev,
            2,
            false,
        );
        card.is_good = ratio > 1.0;
        cards.push(card);
    }

    if let Some(net) = latest.value(Metric::NetNew52WeekHighsPct) {
        let prev = previous.value(Metric::NetNew52WeekHighsPct).unwrap_or(net);
        let mut card = KpiCard::new(
            Metric::NetNew52WeekHighsPct,
            "Net New Highs (as %)",
            net,
            prev,
            2,
            true,
        );
        card.is_good = net > 0.0;
        cards.push(card);
    }

    cards
}
