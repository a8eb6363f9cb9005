//! Base constants and utility functions for the chart module.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::breadth::utility::{format_fixed, group_thousands};

/// An opaque RGB colour, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Component-wise linear blend; `t` is clamped to [0, 1]
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| -> u8 {
            let value = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            to_int(value).clamp(0, 255) as u8
        };
        Rgb::from_rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// Heatmap scale colors
pub const DARK_GREEN: Rgb = Rgb::from_rgb(0x05, 0x2e, 0x16);
pub const BRIGHT_GREEN: Rgb = Rgb::from_rgb(0x22, 0xc5, 0x5e);
pub const BRIGHT_RED: Rgb = Rgb::from_rgb(0xef, 0x44, 0x44);
pub const SLATE: Rgb = Rgb::from_rgb(0x1e, 0x29, 0x3b);

// Line and band colors
pub const FAVOURABLE_COLOR: Rgb = BRIGHT_GREEN;
pub const UNFAVOURABLE_COLOR: Rgb = BRIGHT_RED;
pub const REFERENCE_LINE_COLOR: Rgb = Rgb::from_rgb(0x37, 0x41, 0x51);

// Chart dimensions
pub const BAND_OPACITY: f32 = 0.1;
pub const MAX_AXIS_TICKS: usize = 5;

/// Upper edge drawn for the open-ended favourable ratio band
pub const RATIO_BAND_DRAW_LIMIT: f64 = 50.0;

/// Convert a float value to integer with rounding
#[inline]
pub fn to_int(value: f64) -> i64 {
    value.round() as i64
}

/// Y-axis tick label
pub fn format_axis_value(value: f64, percent: bool, decimals: u32) -> String {
    if percent {
        format!("{}%", format_fixed(value, 1))
    } else if decimals == 0 {
        group_thousands(to_int(value))
    } else {
        format_fixed(value, decimals)
    }
}

/// Tooltip value text, always two decimals
pub fn format_tooltip(value: f64, percent: bool) -> String {
    let suffix = if percent { "%" } else { "" };
    format!("{}{}", format_fixed(value, 2), suffix)
}

/// Table row date label, e.g. `05 Jan 24`
pub fn table_date_label(date: NaiveDate) -> String {
    date.format("%d %b %y").to_string()
}

/// Chart x-axis date label, e.g. `Jan 5`
pub fn axis_date_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Calculate nice axis tick values
pub fn calculate_axis_ticks(min_val: f64, max_val: f64, max_ticks: usize) -> Vec<f64> {
    calculate_axis_ticks_with_min_step(min_val, max_val, max_ticks, 0.0)
}

/// Calculate nice axis tick values spaced at least `min_step` apart
pub fn calculate_axis_ticks_with_min_step(
    min_val: f64,
    max_val: f64,
    max_ticks: usize,
    min_step: f64,
) -> Vec<f64> {
    if !min_val.is_finite() || !max_val.is_finite() {
        return Vec::new();
    }
    if min_val >= max_val || max_ticks == 0 {
        return vec![min_val];
    }

    let range = max_val - min_val;
    let rough_step = range / max_ticks as f64;
    if !range.is_finite() || !(rough_step.is_finite() && rough_step > 0.0) {
        return vec![min_val, max_val];
    }

    // Find the magnitude of the step
    let magnitude = 10.0_f64.powf(rough_step.log10().floor());
    let residual = rough_step / magnitude;

    // Choose a nice step value
    let nice_step = if residual <= 1.5 {
        magnitude
    } else if residual <= 3.0 {
        2.0 * magnitude
    } else if residual <= 7.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    };
    let nice_step = nice_step.max(min_step);
    if !(nice_step.is_finite() && nice_step > 0.0) {
        return vec![min_val, max_val];
    }

    // Step by index so ticks do not accumulate float error
    let first = (min_val / nice_step).ceil();
    let mut ticks = Vec::new();
    for ix in 0..(2 * max_ticks + 2) {
        let value = (first + ix as f64) * nice_step;
        if !value.is_finite() || value > max_val + nice_step * 1e-9 {
            break;
        }
        ticks.push(value);
    }

    ticks
}
