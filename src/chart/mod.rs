//! Chart module - the presentation side of the dashboard.
//!
//! This module provides:
//! - `ColorScale` - Per-metric heatmap coloring
//! - `HeatmapTable` - Sorted, formatted and colored table cells
//! - `ChartSeries` - Chronological line series with bands and gradient split
//! - `Dashboard` - Facade deriving all of the above from `(rows, ViewState)`
//!
//! # Example
//!
//! ```no_run
//! use market_breadth::breadth::{load_rows_or_empty, DisplayMode, ViewKind};
//! use market_breadth::chart::Dashboard;
//!
//! let dashboard = Dashboard::new(load_rows_or_empty("market_breadth.json"));
//! let view = dashboard.initial_view(ViewKind::Summary, DisplayMode::PercentOfTotal);
//! println!("{}", dashboard.table(&view));
//! ```

mod base;
mod dashboard;
mod scale;
mod series;
mod table;

pub use base::*;
pub use dashboard::{display_mode_from_settings, Dashboard, DashboardSnapshot};
pub use scale::{build_scales, value_extent, ColorScale, FALLBACK_DOMAIN};
pub use series::{
    bands_for, classify, gradient_split, project, Band, BandKind, ChartSeries, SeriesPoint,
    PERCENT_HIGH_BAND, PERCENT_LOW_BAND, RATIO_HIGH_THRESHOLD, RATIO_LOW_BAND,
};
pub use table::{HeatmapCell, HeatmapColumn, HeatmapRow, HeatmapTable};
