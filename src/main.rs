//! Market Breadth - report entry point
//!
//! Loads a breadth snapshot and prints the KPI strip, the heatmap table and
//! a summary of each chart, or the whole dashboard as JSON.

use chrono::NaiveDate;
use std::error::Error;
use tracing::{info, warn};

use market_breadth::breadth::{
    init_logger, load_rows_or_empty, resolve_data_path, DisplayMode, ViewKind, SETTINGS,
};
use market_breadth::chart::{display_mode_from_settings, Dashboard, DashboardSnapshot};

/// Command line options
#[derive(Debug, Default)]
struct Options {
    data: Option<String>,
    kind: ViewKind,
    percent: Option<bool>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    json: bool,
}

fn usage() -> String {
    [
        "breadth_report usage:",
        "  breadth_report [--data <path>] [--view summary|timeseries]",
        "      [--start YYYY-MM-DD] [--end YYYY-MM-DD] [--percent|--raw] [--json]",
    ]
    .join("\n")
}

fn parse_date(flag: &str, value: Option<&String>) -> Result<NaiveDate, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a date"))?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("{flag} {value}: {e}"))
}

fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--data" => {
                let path = iter.next().ok_or("--data needs a path")?;
                options.data = Some(path.clone());
            }
            "--view" => match iter.next().map(String::as_str) {
                Some("summary") => options.kind = ViewKind::Summary,
                Some("timeseries") => options.kind = ViewKind::TimeSeries,
                other => return Err(format!("unknown view {other:?}\n\n{}", usage())),
            },
            "--start" => options.start = Some(parse_date("--start", iter.next())?),
            "--end" => options.end = Some(parse_date("--end", iter.next())?),
            "--percent" => options.percent = Some(true),
            "--raw" => options.percent = Some(false),
            "--json" => options.json = true,
            "help" | "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument '{other}'\n\n{}", usage())),
        }
    }
    Ok(Some(options))
}

fn print_report(snapshot: &DashboardSnapshot) {
    println!("Range: {} ({})", snapshot.view.range, snapshot.view.mode);
    println!();

    for card in &snapshot.kpis {
        println!("{card}");
    }
    if !snapshot.kpis.is_empty() {
        println!();
    }

    println!("{}", snapshot.table);
    println!();

    for chart in &snapshot.charts {
        let latest = chart
            .points
            .last()
            .map(|point| chart.tooltip(point))
            .unwrap_or_else(|| "no data".to_string());
        let split = chart
            .gradient_split
            .map(|g| format!(", split {g:.4}"))
            .unwrap_or_default();
        let extremes = chart.point_bands().iter().filter(|b| b.is_some()).count();
        println!(
            "{}: {} points, latest {}, {} in extreme bands{}",
            chart.title,
            chart.points.len(),
            latest,
            extremes,
            split
        );
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args)? {
        Some(options) => options,
        None => {
            println!("{}", usage());
            return Ok(());
        }
    };

    if let Err(e) = init_logger(&SETTINGS) {
        eprintln!("logging disabled: {e}");
    }
    info!("breadth_report {}", market_breadth::VERSION);

    let data = options
        .data
        .clone()
        .or_else(|| SETTINGS.get_string("data.path"))
        .unwrap_or_else(|| "market_breadth.json".to_string());
    let rows = load_rows_or_empty(resolve_data_path(&data));
    if rows.is_empty() {
        warn!("no rows loaded from {}", data);
    }

    let dashboard = Dashboard::from_settings(rows, &SETTINGS);
    let mode = match options.percent {
        Some(true) => DisplayMode::PercentOfTotal,
        Some(false) => DisplayMode::Raw,
        None => display_mode_from_settings(&SETTINGS),
    };

    let defaults = dashboard.defaults(options.kind);
    let mut view = dashboard.initial_view(options.kind, mode);
    if options.start.is_some() || options.end.is_some() {
        let start = options.start.unwrap_or(view.range.start);
        let end = options.end.unwrap_or(view.range.end);
        view = view.with_range(start, end, &defaults);
    }

    let snapshot = dashboard.snapshot(&view);
    if options.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_report(&snapshot);
    }

    Ok(())
}
