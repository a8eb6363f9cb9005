//! General utility functions.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Name of the application folder
const APP_FOLDER: &str = ".breadth";

/// Get the application temp directory: `.breadth` in the working directory
/// if present, else in the home directory
fn get_app_dir(temp_name: &str) -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let temp_path = cwd.join(temp_name);

    // If .breadth folder exists in current working directory, use it
    if temp_path.exists() {
        return temp_path;
    }

    // Otherwise use home path
    let home_path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let temp_path = home_path.join(temp_name);

    if !temp_path.exists() {
        let _ = fs::create_dir_all(&temp_path);
    }

    temp_path
}

/// Temp directory holding settings and logs
pub static TEMP_DIR: LazyLock<PathBuf> = LazyLock::new(|| get_app_dir(APP_FOLDER));

/// Get path for temp file with filename
pub fn get_file_path(filename: &str) -> PathBuf {
    TEMP_DIR.join(filename)
}

/// Get path for temp folder with folder name
pub fn get_folder_path(folder_name: &str) -> PathBuf {
    let folder_path = TEMP_DIR.join(folder_name);
    if !folder_path.exists() {
        let _ = fs::create_dir_all(&folder_path);
    }
    folder_path
}

/// Round to `dp` decimals, halves away from zero
pub fn round_dp(value: f64, dp: u32) -> f64 {
    match Decimal::from_f64(value) {
        Some(d) => d
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(value),
        None => value,
    }
}

/// Fixed-point text with `dp` decimals, halves away from zero
pub fn format_fixed(value: f64, dp: u32) -> String {
    let rounded = round_dp(value, dp);
    // Avoid "-0.0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.prec$}", rounded, prec = dp as usize)
}

/// Insert `,` between groups of three digits of an integer
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (ix, ch) in digits.chars().enumerate() {
        if ix > 0 && (digits.len() - ix) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
