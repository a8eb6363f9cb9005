//! Market Breadth - the data layer of a market breadth dashboard
//!
//! This crate turns a daily snapshot of breadth indicators into everything a
//! dashboard draws:
//!
//! - Date-range filtering with derived default ranges
//! - Raw or percent-of-total value normalization
//! - Per-metric heatmap color scales
//! - Table sorting and KPI cards
//! - Chronological chart series with extreme bands and gradient split
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use market_breadth::breadth::{load_rows_or_empty, DisplayMode, ViewKind};
//! use market_breadth::chart::Dashboard;
//!
//! let dashboard = Dashboard::new(load_rows_or_empty("market_breadth.json"));
//! let view = dashboard.initial_view(ViewKind::Summary, DisplayMode::Raw);
//! for card in dashboard.kpis(&view) {
//!     println!("{card}");
//! }
//! println!("{}", dashboard.table(&view));
//! ```

pub mod breadth;
pub mod chart;

// Re-export commonly used types
pub use breadth::{
    // Constants
    DisplayMode, MetricFormat, Polarity, SortDirection, ViewKind,
    // Data objects
    BreadthRow, DateRange, Metric, RangeDefaults, SortKey, SortState, ViewState,
    // Errors
    BreadthError, Result,
};
pub use chart::{ChartSeries, ColorScale, Dashboard, HeatmapTable};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
