//! Logging setup for the breadth dashboard.

use chrono::Local;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::error::{BreadthError, Result};
use super::setting::Settings;
use super::utility::get_folder_path;

/// Log level constants (compatible with Python logging module)
pub const DEBUG: i32 = 10;
pub const INFO: i32 = 20;
pub const WARNING: i32 = 30;
pub const ERROR: i32 = 40;
pub const CRITICAL: i32 = 50;

/// Convert integer log level to tracing Level
pub fn level_from_int(level: i32) -> Level {
    match level {
        i32::MIN..=10 => Level::DEBUG,
        11..=20 => Level::INFO,
        21..=30 => Level::WARN,
        _ => Level::ERROR,
    }
}

/// Convert integer log level to string
pub fn level_to_string(level: i32) -> &'static str {
    match level {
        i32::MIN..=10 => "DEBUG",
        11..=20 => "INFO",
        21..=30 => "WARNING",
        31..=40 => "ERROR",
        _ => "CRITICAL",
    }
}

/// Initialize the global subscriber from `log.*` settings.
///
/// Console output is plain text unless `log.json` is set; the file layer
/// writes to a daily file under the app log folder.
pub fn init_logger(settings: &Settings) -> Result<()> {
    if !settings.get_bool("log.active").unwrap_or(true) {
        return Ok(());
    }

    let log_level = settings.get_int("log.level").unwrap_or(INFO as i64);
    let log_console = settings.get_bool("log.console").unwrap_or(true);
    let log_file = settings.get_bool("log.file").unwrap_or(false);
    let log_json = settings.get_bool("log.json").unwrap_or(false);

    let log_level = i32::try_from(log_level).unwrap_or(INFO);
    let level = level_from_int(log_level);
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let console_layer = (log_console && !log_json).then(|| {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_ansi(true)
    });
    let json_layer = (log_console && log_json).then(|| fmt::layer().json().with_target(true));

    let file_layer = if log_file {
        let log_path = get_log_file_path();
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;
        Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| BreadthError::Logger(e.to_string()))?;

    debug!("logging at {}", level_to_string(log_level));
    Ok(())
}

/// Get the log file path for today
fn get_log_file_path() -> PathBuf {
    let log_folder = get_folder_path("log");
    let today = Local::now().format("%Y%m%d").to_string();
    log_folder.join(format!("breadth_{}.log", today))
}
