//! Global settings of the breadth dashboard.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{LazyLock, RwLock};

use super::error::{BreadthError, Result};
use super::utility::get_file_path;

/// Default settings
fn default_settings() -> HashMap<String, SettingValue> {
    let mut settings = HashMap::new();

    // Log settings
    settings.insert("log.active".to_string(), SettingValue::Bool(true));
    settings.insert("log.level".to_string(), SettingValue::Int(20)); // INFO level
    settings.insert("log.console".to_string(), SettingValue::Bool(true));
    settings.insert("log.file".to_string(), SettingValue::Bool(false));
    settings.insert("log.json".to_string(), SettingValue::Bool(false));

    // Data settings
    settings.insert(
        "data.path".to_string(),
        SettingValue::String("market_breadth.json".to_string()),
    );

    // View settings
    settings.insert("view.lookback_days".to_string(), SettingValue::Int(60));
    settings.insert(
        "view.fallback_min_date".to_string(),
        SettingValue::String("2022-01-01".to_string()),
    );

    // Display settings
    settings.insert("display.percent_of_total".to_string(), SettingValue::Bool(false));

    settings
}

/// Setting value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl SettingValue {
    /// Get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            SettingValue::Float(f) => Some(*f),
            SettingValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Global settings container
pub struct Settings {
    settings: RwLock<HashMap<String, SettingValue>>,
}

impl Settings {
    /// Create new Settings with defaults, overlaid by the settings file if present
    pub fn new() -> Self {
        let settings = Self::with_defaults();
        let filepath = get_file_path(SETTING_FILENAME);
        if filepath.exists() {
            if let Err(e) = settings.load_file(&filepath) {
                tracing::warn!("ignoring settings file {}: {}", filepath.display(), e);
            }
        }
        settings
    }

    /// Settings holding only the built-in defaults
    pub fn with_defaults() -> Self {
        Self {
            settings: RwLock::new(default_settings()),
        }
    }

    /// Overlay values from a JSON settings file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = fs::read_to_string(path)?;
        let file_settings: HashMap<String, SettingValue> = serde_json::from_str(&content)?;
        self.update(file_settings);
        Ok(())
    }

    /// Get a setting value
    pub fn get(&self, key: &str) -> Option<SettingValue> {
        self.settings.read().ok()?.get(key).cloned()
    }

    /// Get a string setting
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| v.as_str().map(|s| s.to_string()))
    }

    /// Get an integer setting
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.as_int())
    }

    /// Get a float setting
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.as_float())
    }

    /// Get a bool setting
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    /// Get an integer setting that must be present and non-negative
    pub fn require_non_negative(&self, key: &str) -> Result<u64> {
        let value = self.get_int(key).ok_or_else(|| BreadthError::Setting {
            key: key.to_string(),
            reason: "missing or not an integer".to_string(),
        })?;
        u64::try_from(value).map_err(|_| BreadthError::Setting {
            key: key.to_string(),
            reason: format!("{value} is negative"),
        })
    }

    /// Set a setting value
    pub fn set(&self, key: impl Into<String>, value: SettingValue) {
        if let Ok(mut settings) = self.settings.write() {
            settings.insert(key.into(), value);
        }
    }

    /// Update settings from a map
    pub fn update(&self, new_settings: HashMap<String, SettingValue>) {
        if let Ok(mut settings) = self.settings.write() {
            for (key, value) in new_settings {
                settings.insert(key, value);
            }
        }
    }

    /// Get all settings as HashMap
    pub fn get_all(&self) -> HashMap<String, SettingValue> {
        self.settings
            .read()
            .map(|settings| settings.clone())
            .unwrap_or_default()
    }

    /// Save settings to the settings file
    pub fn save(&self) -> Result<()> {
        self.save_to(get_file_path(SETTING_FILENAME))
    }

    /// Save settings to a given path
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.get_all())?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

/// Setting filename
const SETTING_FILENAME: &str = "breadth_setting.json";

/// Global settings instance
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::new);
