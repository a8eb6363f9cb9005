use chrono::NaiveDate;
use std::fs;

use market_breadth::breadth::{
    filter_rows, load_rows, load_rows_or_empty, normalize, parse_rows, sort_rows, RangeConfig,
    METRICS,
};
use market_breadth::chart::{
    build_scales, classify, gradient_split, project, value_extent, BandKind, ChartSeries,
    Dashboard,
};
use market_breadth::{DisplayMode, Metric, SortDirection, SortKey, ViewKind};

const SNAPSHOT: &str = r#"[
    {
        "Date": "2024-01-02",
        "No. of stocks up 4.5%+ in the current day": 40,
        "No of stocks above 200 day SMA": 1200,
        "No of stocks which are positive": 50,
        "No of stocks which are negative": 150,
        "Advance/Decline Ratio": 0.1,
        "Net New Highs": -5,
        "Net New 52-Week Highs as % of Total Stocks": -0.25,
        "TotalTraded": 200
    },
    {
        "Date": "2024-01-03",
        "No. of stocks up 4.5%+ in the current day": 12,
        "No of stocks above 200 day SMA": 1300,
        "No of stocks which are positive": 100,
        "No of stocks which are negative": 100,
        "Advance/Decline Ratio": 4.5,
        "Net New Highs": 10,
        "Net New 52-Week Highs as % of Total Stocks": 0.5,
        "TotalTraded": 200
    },
    {
        "Date": "2024-01-04",
        "No of stocks above 200 day SMA": null,
        "No of stocks which are positive": 70,
        "Advance/Decline Ratio": 1.0,
        "Net New Highs": -2,
        "TotalTraded": 0
    }
]"#;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dashboard() -> Dashboard {
    let rows = parse_rows(SNAPSHOT).unwrap();
    Dashboard::with_config(rows, RangeConfig::default(), date("2030-01-01"))
}

#[test]
fn percent_of_total_scenario() {
    let rows = parse_rows(SNAPSHOT).unwrap();
    let ordered = sort_rows(&rows, &SortKey::Date, SortDirection::Ascending);
    let values: Vec<String> = ordered[..2]
        .iter()
        .map(|row| {
            normalize(
                row.value(Metric::Positive),
                row.total_traded,
                Metric::Positive,
                DisplayMode::PercentOfTotal,
            )
        })
        .collect();
    assert_eq!(values, vec!["25.0%", "50.0%"]);
}

#[test]
fn ratio_banding_scenario() {
    let dash = dashboard();
    let view = dash.initial_view(ViewKind::TimeSeries, DisplayMode::PercentOfTotal);
    let chart = ChartSeries::build(dash.rows(), Metric::AdvanceDeclineRatio, view.mode);
    let values: Vec<f64> = chart.points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![0.1, 4.5, 1.0]);
    assert_eq!(
        chart.point_bands(),
        vec![Some(BandKind::Unfavourable), Some(BandKind::Favourable), None]
    );
    assert_eq!(classify(0.25, &chart.bands), Some(BandKind::Unfavourable));
}

#[test]
fn gradient_split_scenario() {
    let rows = parse_rows(SNAPSHOT).unwrap();
    let points = project(&rows, Metric::NetNewHighs, DisplayMode::Raw);
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![-5.0, 10.0, -2.0]);
    let split = gradient_split(&points).unwrap();
    assert!((split - 0.6667).abs() < 1e-4);

    let chart = ChartSeries::build(&rows, Metric::NetNewHighs, DisplayMode::Raw);
    assert_eq!(chart.gradient_split, Some(split));
}

#[test]
fn filter_is_bound_order_independent_and_identity_at_extent() {
    let rows = parse_rows(SNAPSHOT).unwrap();
    assert_eq!(
        filter_rows(&rows, date("2024-01-02"), date("2024-01-03")),
        filter_rows(&rows, date("2024-01-03"), date("2024-01-02"))
    );
    let defaults = dashboard().defaults(ViewKind::TimeSeries);
    assert_eq!(filter_rows(&rows, defaults.min_date, defaults.max_date), rows);
}

#[test]
fn scale_endpoints_are_exact() {
    let rows = parse_rows(SNAPSHOT).unwrap();
    let scales = build_scales(&rows);
    for desc in &METRICS {
        let scale = &scales[&desc.metric];
        let (min, max) = value_extent(&rows, desc.metric).unwrap_or((0.0, 100.0));
        assert_eq!(scale.color(min), scale.range()[0], "{}", desc.name);
        assert_eq!(scale.color(max), *scale.range().last().unwrap(), "{}", desc.name);
    }
}

#[test]
fn sort_descending_reverses_ascending() {
    let rows = parse_rows(SNAPSHOT).unwrap();
    let key = SortKey::Metric(Metric::NetNewHighs);
    let asc = sort_rows(&rows, &key, SortDirection::Ascending);
    let mut desc = sort_rows(&asc, &key, SortDirection::Descending);
    desc.reverse();
    assert_eq!(asc, desc);
}

#[test]
fn zero_total_never_leaks_non_finite_values() {
    let dash = dashboard();
    let view = dash.initial_view(ViewKind::TimeSeries, DisplayMode::PercentOfTotal);
    for chart in dash.charts(&view) {
        assert!(chart.points.iter().all(|p| p.value.is_finite()), "{}", chart.title);
    }
    let table = dash.table(&view);
    let newest = &table.rows[0];
    assert_eq!(newest.date, date("2024-01-04"));
    assert_eq!(newest.cells[Metric::Positive as usize].display, "0.0%");
    assert_eq!(newest.cells[Metric::Above200Sma as usize].display, "-");
}

#[test]
fn view_reset_restores_derived_defaults() {
    let dash = dashboard();
    let defaults = dash.defaults(ViewKind::Summary);
    let initial = dash.initial_view(ViewKind::Summary, DisplayMode::Raw);
    let changed = initial
        .with_range(date("2024-01-03"), date("2024-01-03"), &defaults)
        .toggle_column(Metric::NetNewHighs);
    assert_eq!(dash.table(&changed).record_count, 1);

    let reset = changed.reset(&defaults);
    assert_eq!(reset, initial);
    assert_eq!(dash.table(&reset).record_count, 3);
}

#[test]
fn empty_row_set_degrades_quietly() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("market_breadth.json");
    assert!(load_rows(&missing).is_err());
    let rows = load_rows_or_empty(&missing);
    assert!(rows.is_empty());

    let today = date("2025-06-30");
    let dash = Dashboard::with_config(rows, RangeConfig::default(), today);
    let defaults = dash.defaults(ViewKind::Summary);
    assert_eq!(defaults.max_date, today);
    assert_eq!(defaults.min_date, date("2022-01-01"));

    let view = dash.initial_view(ViewKind::Summary, DisplayMode::Raw);
    let snapshot = dash.snapshot(&view);
    assert!(snapshot.table.is_empty());
    assert!(snapshot.kpis.is_empty());
    assert!(snapshot.charts.iter().all(|c| c.points.is_empty() && c.gradient_split.is_none()));
}

#[test]
fn load_rows_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("market_breadth.json");
    fs::write(&path, SNAPSHOT).unwrap();
    let rows = load_rows(&path).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].date, date("2024-01-04"));
}
