//! Dashboard facade.
//!
//! Holds the loaded rows and derives every presentation value as a pure
//! function of `(rows, ViewState)`. Nothing is cached between calls.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::debug;

use super::series::ChartSeries;
use super::table::HeatmapTable;
use crate::breadth::constant::{DisplayMode, ViewKind};
use crate::breadth::filter::{derive_defaults_with, filter_rows, RangeConfig};
use crate::breadth::kpi::{compute_kpis, KpiCard};
use crate::breadth::object::{BreadthRow, RangeDefaults, ViewState};
use crate::breadth::setting::Settings;

/// Everything rendered for one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub view: ViewState,
    pub kpis: Vec<KpiCard>,
    pub table: HeatmapTable,
    pub charts: Vec<ChartSeries>,
}

/// Read-only row set plus the configuration used to derive views.
#[derive(Debug, Clone)]
pub struct Dashboard {
    rows: Vec<BreadthRow>,
    config: RangeConfig,
    today: NaiveDate,
}

impl Dashboard {
    /// Dashboard with the default range configuration
    pub fn new(rows: Vec<BreadthRow>) -> Self {
        Self::with_config(rows, RangeConfig::default(), Local::now().date_naive())
    }

    /// Dashboard with an explicit configuration and "today"
    pub fn with_config(rows: Vec<BreadthRow>, config: RangeConfig, today: NaiveDate) -> Self {
        Self { rows, config, today }
    }

    /// Dashboard configured from `view.*` settings
    pub fn from_settings(rows: Vec<BreadthRow>, settings: &Settings) -> Self {
        Self::with_config(
            rows,
            RangeConfig::from_settings(settings),
            Local::now().date_naive(),
        )
    }

    pub fn rows(&self) -> &[BreadthRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn defaults(&self, kind: ViewKind) -> RangeDefaults {
        derive_defaults_with(&self.rows, kind, &self.config, self.today)
    }

    /// Starting view of a page
    pub fn initial_view(&self, kind: ViewKind, mode: DisplayMode) -> ViewState {
        ViewState::new(&self.defaults(kind), mode)
    }

    /// Rows inside the view range
    pub fn visible_rows(&self, view: &ViewState) -> Vec<BreadthRow> {
        filter_rows(&self.rows, view.range.start, view.range.end)
    }

    pub fn table(&self, view: &ViewState) -> HeatmapTable {
        HeatmapTable::build(&self.visible_rows(view), view)
    }

    /// One chart per visible metric, in registry order
    pub fn charts(&self, view: &ViewState) -> Vec<ChartSeries> {
        let visible = self.visible_rows(view);
        view.visible
            .iter()
            .map(|metric| ChartSeries::build(&visible, *metric, view.mode))
            .collect()
    }

    pub fn kpis(&self, view: &ViewState) -> Vec<KpiCard> {
        compute_kpis(&self.visible_rows(view))
    }

    /// KPIs, table and charts for a view from a single filter pass
    pub fn snapshot(&self, view: &ViewState) -> DashboardSnapshot {
        let visible = self.visible_rows(view);
        debug!("rendering {} rows for {}", visible.len(), view.range);
        DashboardSnapshot {
            view: view.clone(),
            kpis: compute_kpis(&visible),
            table: HeatmapTable::build(&visible, view),
            charts: view
                .visible
                .iter()
                .map(|metric| ChartSeries::build(&visible, *metric, view.mode))
                .collect(),
        }
    }
}

/// Display mode selected by `display.percent_of_total`
pub fn display_mode_from_settings(settings: &Settings) -> DisplayMode {
    if settings.get_bool("display.percent_of_total").unwrap_or(false) {
        DisplayMode::PercentOfTotal
    } else {
        DisplayMode::Raw
    }
}
