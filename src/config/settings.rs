//! User settings for habit-cli
//!
//! Manages user preferences: where the habits file lives, how dates are
//! displayed, and the cadence given to new habits.

use std::fmt::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::HabitPaths;
use crate::error::HabitError;
use crate::models::Habit;
use crate::storage::file_io::write_text_atomic;

/// User settings for habit-cli
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version of the settings file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Custom location of the habits file (relative paths resolve against the base dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habits_file: Option<PathBuf>,

    /// Date format used for display (strftime format); the habits file always uses YYYY-MM-DD
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Frequency given to habits added without one
    #[serde(default = "default_frequency")]
    pub default_frequency: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_frequency() -> String {
    "daily".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            habits_file: None,
            date_format: default_date_format(),
            default_frequency: default_frequency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &HabitPaths) -> Result<Self, HabitError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| HabitError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| HabitError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &HabitPaths) -> Result<(), HabitError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| HabitError::Config(format!("Failed to serialize settings: {}", e)))?;

        write_text_atomic(paths.settings_file(), &contents)
    }

    /// Check the settings for values that would fail at use time
    ///
    /// The date format must render a bare calendar date, so time and
    /// timezone specifiers are refused along with unknown ones.
    pub fn validate(&self) -> Result<(), HabitError> {
        let sample = NaiveDate::default();
        let mut rendered = String::new();
        if write!(rendered, "{}", sample.format(&self.date_format)).is_err() {
            return Err(HabitError::Config(format!(
                "Invalid date format: {}",
                self.date_format
            )));
        }

        // New habits take this value as their frequency
        Habit::new("default", self.default_frequency.as_str())
            .validate()
            .map_err(|e| HabitError::Config(format!("Invalid default frequency: {}", e)))?;

        Ok(())
    }

    /// Resolve the habits file location
    pub fn store_path(&self, paths: &HabitPaths) -> PathBuf {
        match &self.habits_file {
            Some(file) if file.is_absolute() => file.clone(),
            Some(file) => paths.base_dir().join(file),
            None => paths.habits_file(),
        }
    }
}
