//! Config CLI command
//!
//! Shows the resolved paths and settings, and persists changes to them.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::{HabitPaths, Settings};
use crate::error::HabitResult;

/// Settings that can be changed from the command line
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Set the display date format (strftime, e.g. "%d/%m/%Y")
    #[arg(long)]
    pub date_format: Option<String>,

    /// Set the frequency given to habits added without one
    #[arg(long)]
    pub default_frequency: Option<String>,

    /// Set the habits file location (relative paths resolve against the config directory)
    #[arg(long)]
    pub habits_file: Option<PathBuf>,
}

impl ConfigArgs {
    /// Whether any setting was given
    pub fn has_changes(&self) -> bool {
        self.date_format.is_some() || self.default_frequency.is_some() || self.habits_file.is_some()
    }
}

/// Handle the config command
///
/// With no flags, prints the configuration. Otherwise applies and saves the
/// changes first.
pub fn handle_config_command(
    paths: &HabitPaths,
    settings: &mut Settings,
    args: ConfigArgs,
    file: Option<&Path>,
) -> HabitResult<()> {
    if args.has_changes() {
        update_settings(paths, settings, args)?;
        println!("Settings saved to {}", paths.settings_file().display());
        println!();
    }

    print!("{}", format_config(paths, settings, file));
    Ok(())
}

/// Apply the given changes and save them
///
/// Nothing is written, and `settings` is left as it was, when the changed
/// settings do not validate.
pub fn update_settings(
    paths: &HabitPaths,
    settings: &mut Settings,
    args: ConfigArgs,
) -> HabitResult<()> {
    let mut updated = settings.clone();
    if let Some(date_format) = args.date_format {
        updated.date_format = date_format;
    }
    if let Some(frequency) = args.default_frequency {
        updated.default_frequency = frequency.trim().to_string();
    }
    if let Some(habits_file) = args.habits_file {
        updated.habits_file = Some(habits_file);
    }

    updated.validate()?;
    updated.save(paths)?;
    tracing::debug!(path = %paths.settings_file().display(), "settings saved");

    *settings = updated;
    Ok(())
}

/// Render the configuration summary
pub fn format_config(paths: &HabitPaths, settings: &Settings, file: Option<&Path>) -> String {
    let store_path = file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| settings.store_path(paths));

    let mut output = String::new();
    output.push_str("habit-cli Configuration\n");
    output.push_str("=======================\n");
    output.push_str(&format!("Config directory: {}\n", paths.base_dir().display()));
    output.push_str(&format!("Settings file:    {}\n", paths.settings_file().display()));
    output.push_str(&format!("Habits file:      {}\n", store_path.display()));
    output.push('\n');
    output.push_str("Settings:\n");
    output.push_str(&format!("  Date format:       {}\n", settings.date_format));
    output.push_str(&format!("  Default frequency: {}\n", settings.default_frequency));
    output
}
