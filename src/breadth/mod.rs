//! Breadth module - the data side of the dashboard.
//!
//! This module provides:
//!
//! - **constant**: Polarity, MetricFormat, DisplayMode, SortDirection, etc.
//! - **registry**: The static metric registry
//! - **object**: BreadthRow, DateRange, SortState and ViewState
//! - **filter**: Date-range filtering and default range derivation
//! - **normalize**: Raw / percent-of-total value normalization
//! - **sort**: Table ordering
//! - **kpi**: Headline KPI cards
//! - **loader**: JSON snapshot loading
//! - **setting**: Global settings management
//! - **logger**: Logging setup
//! - **utility**: Paths and number formatting helpers
//! - **error**: Error type

pub mod constant;
pub mod error;
pub mod filter;
pub mod kpi;
pub mod loader;
pub mod logger;
pub mod normalize;
pub mod object;
pub mod registry;
pub mod setting;
pub mod sort;
pub mod utility;

// Re-exports for convenience
pub use constant::{BandPolicy, DisplayMode, MetricFormat, Polarity, SortDirection, ViewKind};
pub use error::{BreadthError, Result};
pub use filter::{date_extent, derive_defaults, derive_defaults_with, filter_rows, RangeConfig};
pub use kpi::{compute_kpis, KpiCard, Trend};
pub use loader::{load_rows, load_rows_or_empty, parse_rows, resolve_data_path};
pub use logger::{init_logger, CRITICAL, DEBUG, ERROR, INFO, WARNING};
pub use normalize::{normalize, normalize_cell, scale_value, ScaledValue, ValueUnit, MISSING};
pub use object::{BreadthRow, DateRange, RangeDefaults, SortKey, SortState, ViewState};
pub use registry::{Metric, MetricDescriptor, METRICS, METRIC_COUNT};
pub use setting::{SettingValue, Settings, SETTINGS};
pub use sort::{sort_by_state, sort_rows};
pub use utility::{get_file_path, get_folder_path, TEMP_DIR};
