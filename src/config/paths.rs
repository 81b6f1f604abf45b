//! Path management for habit-cli
//!
//! Provides XDG-compliant path resolution for configuration and the habits file.
//!
//! ## Path Resolution Order
//!
//! 1. `HABIT_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/habit-cli` or `~/.config/habit-cli`
//! 3. Windows: `%APPDATA%\habit-cli`

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::HabitError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "HABIT_CLI_DATA_DIR";

/// Manages all paths used by habit-cli
#[derive(Debug, Clone)]
pub struct HabitPaths {
    /// Base directory for all habit-cli data
    base_dir: PathBuf,
}

impl HabitPaths {
    /// Create a new HabitPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, HabitError> {
        Self::from_override(std::env::var_os(DATA_DIR_ENV))
    }

    /// Resolve paths from an explicit base directory override
    ///
    /// `None` or an empty value falls back to the platform default.
    pub fn from_override(custom: Option<OsString>) -> Result<Self, HabitError> {
        let base_dir = match custom {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create HabitPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/habit-cli/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the default path to the habits file
    pub fn habits_file(&self) -> PathBuf {
        self.base_dir.join("habits.txt")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), HabitError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| HabitError::Io(format!("Failed to create base directory: {}", e)))
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, HabitError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME")
                .map_err(|_| HabitError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("habit-cli"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, HabitError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| HabitError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("habit-cli"))
}
