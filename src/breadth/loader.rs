//! Loading breadth snapshots from JSON.
//!
//! A snapshot is a JSON array of flat row objects, as written by the
//! indicator pipeline. Loading happens once; the returned rows are never
//! mutated afterwards.

use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::error::Result;
use super::object::BreadthRow;
use super::utility::get_file_path;

/// Parse a snapshot from JSON text.
///
/// Rows with an unreadable date or a non-object shape are skipped with a
/// warning; on duplicate dates the first row wins. The result is ordered
/// newest first.
pub fn parse_rows(content: &str) -> Result<Vec<BreadthRow>> {
    let values: Vec<Value> = serde_json::from_str(content)?;
    let total = values.len();

    let mut seen = HashSet::with_capacity(total);
    let mut rows = Vec::with_capacity(total);
    for (ix, value) in values.into_iter().enumerate() {
        let Value::Object(obj) = value else {
            warn!("skipping row {}: not an object", ix);
            continue;
        };
        match BreadthRow::from_json(&obj) {
            Ok(row) => {
                if seen.insert(row.date) {
                    rows.push(row);
                } else {
                    warn!("skipping row {}: duplicate date {}", ix, row.date);
                }
            }
            Err(e) => warn!("skipping row {}: {}", ix, e),
        }
    }

    rows.sort_by(|a, b| b.date.cmp(&a.date));
    debug!("parsed {} of {} rows", rows.len(), total);
    Ok(rows)
}

/// Read and parse a snapshot file
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<BreadthRow>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let rows = parse_rows(&content)?;
    info!("loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read a snapshot file, degrading to an empty set on any failure
pub fn load_rows_or_empty(path: impl AsRef<Path>) -> Vec<BreadthRow> {
    let path = path.as_ref();
    load_rows(path).unwrap_or_else(|e| {
        warn!("failed to load {}: {}, continuing with no data", path.display(), e);
        Vec::new()
    })
}

/// Resolve a configured data path: absolute or existing paths as given,
/// otherwise relative to the app temp directory
pub fn resolve_data_path(configured: &str) -> PathBuf {
    let path = PathBuf::from(configured);
    if path.is_absolute() || path.exists() {
        path
    } else {
        get_file_path(configured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breadth::error::BreadthError;
    use crate::breadth::registry::Metric;
    use chrono::NaiveDate;

    const SNAPSHOT: &str = r#"[
        {"Date": "2024-01-02", "Net New Highs": 4, "TotalTraded": 2100},
        {"Date": "2024-01-03T00:00:00.000", "Net New Highs": -1, "TotalTraded": 2050},
        {"Date": "not a date", "Net New Highs": 9},
        {"Net New Highs": 9},
        17,
        {"Date": "2024-01-02", "Net New Highs": 100}
    ]"#;

    #[test]
    fn test_parse_rows_skips_bad_rows() {
        let rows = parse_rows(SNAPSHOT).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(rows[1].value(Metric::NetNewHighs), Some(4.0));
    }

    #[test]
    fn test_parse_rows_rejects_non_array() {
        assert!(matches!(parse_rows(r#"{"Date": "2024-01-02"}"#), Err(BreadthError::Json(_))));
        assert!(parse_rows("[]").unwrap().is_empty());
    }

    #[test]
    fn test_load_rows_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("market_breadth.json");
        fs::write(&path, SNAPSHOT).unwrap();
        assert_eq!(load_rows(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_load_rows_or_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_rows(dir.path().join("missing.json")),
            Err(BreadthError::Io(_))
        ));
        assert!(load_rows_or_empty(dir.path().join("missing.json")).is_empty());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "[{").unwrap();
        assert!(load_rows_or_empty(&broken).is_empty());
    }

    #[test]
    fn test_resolve_data_path() {
        let dir = tempfile::tempdir().unwrap();
        let absolute = dir.path().join("data.json");
        let absolute_str = absolute.to_string_lossy().to_string();
        assert_eq!(resolve_data_path(&absolute_str), absolute);
        assert_eq!(
            resolve_data_path("no_such_breadth_file.json"),
            get_file_path("no_such_breadth_file.json")
        );
    }
}
