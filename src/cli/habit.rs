//! Habit CLI commands
//!
//! Implements the one-shot CLI commands for habit management. The actions
//! return their user-facing message so the interactive menu can share them.

use chrono::{Duration, NaiveDate};
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{
    format_completion, format_habit_details, format_habit_list, format_habit_records,
};
use crate::error::{HabitError, HabitResult};
use crate::models::habit::DATE_FORMAT;
use crate::storage::HabitStore;

/// Habit subcommands
#[derive(Subcommand, Debug)]
pub enum HabitCommands {
    /// Add a new habit
    Add {
        /// Habit name
        name: String,
        /// Intended cadence (e.g. "daily", "weekly")
        #[arg(short, long)]
        frequency: Option<String>,
    },

    /// Show all habits, one record line each
    #[command(alias = "show")]
    List {
        /// Show a table with a done-today column instead
        #[arg(long)]
        table: bool,
    },

    /// Show one habit's details
    Info {
        /// Habit name
        name: String,
    },

    /// Mark a habit as complete
    #[command(alias = "complete")]
    Done {
        /// Habit name
        name: String,
        /// Completion date (YYYY-MM-DD, "today" or "yesterday")
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Reset a habit's streak to zero
    Reset {
        /// Habit name
        name: String,
    },

    /// Remove a habit
    #[command(alias = "rm")]
    Remove {
        /// Habit name
        name: String,
    },
}

/// Handle a habit command
pub fn handle_habit_command(
    store: &mut HabitStore,
    settings: &Settings,
    cmd: HabitCommands,
    today: NaiveDate,
) -> HabitResult<()> {
    let message = match cmd {
        HabitCommands::Add { name, frequency } => {
            let frequency = frequency.unwrap_or_else(|| settings.default_frequency.clone());
            add_habit(store, &name, &frequency)?
        }
        HabitCommands::List { table: false } => list_habits(store),
        HabitCommands::List { table: true } => list_habits_table(store, settings, today),
        HabitCommands::Info { name } => {
            let habit = store
                .find(&name)
                .ok_or_else(|| HabitError::habit_not_found(name.trim()))?;
            format_habit_details(habit, &settings.date_format)
        }
        HabitCommands::Done { name, date } => {
            let date = match date {
                Some(raw) => parse_date(&raw, today)?,
                None => today,
            };
            complete_habit(store, &name, date)?
        }
        HabitCommands::Reset { name } => reset_habit(store, &name)?,
        HabitCommands::Remove { name } => remove_habit(store, &name)?,
    };

    println!("{}", message.trim_end());
    Ok(())
}

/// Add a habit, returning the confirmation message
pub fn add_habit(store: &mut HabitStore, name: &str, frequency: &str) -> HabitResult<String> {
    let habit = store.add(name, frequency)?;
    Ok(format!("Added habit: '{}' ({})", habit.name, habit.frequency))
}

/// Render every habit as its record line
pub fn list_habits(store: &HabitStore) -> String {
    format_habit_records(store.list_all())
}

/// Render every habit as a table
pub fn list_habits_table(store: &HabitStore, settings: &Settings, today: NaiveDate) -> String {
    format_habit_list(store.list_all(), today, &settings.date_format)
}

/// Mark a habit complete on `date`, returning the outcome message
pub fn complete_habit(store: &mut HabitStore, name: &str, date: NaiveDate) -> HabitResult<String> {
    let outcome = store.mark_complete(name, date)?;
    let habit = store
        .find(name)
        .ok_or_else(|| HabitError::habit_not_found(name.trim()))?;
    Ok(format_completion(&habit.name, outcome, habit.streak))
}

/// Reset a habit's streak, returning the confirmation message
pub fn reset_habit(store: &mut HabitStore, name: &str) -> HabitResult<String> {
    let habit = store.reset_streak(name)?;
    Ok(format!("Reset streak for '{}'", habit.name))
}

/// Remove a habit, returning the confirmation message
pub fn remove_habit(store: &mut HabitStore, name: &str) -> HabitResult<String> {
    let habit = store.remove(name)?;
    Ok(format!("Removed habit: '{}'", habit.name))
}

/// Parse a completion date relative to `today`
pub fn parse_date(raw: &str, today: NaiveDate) -> HabitResult<NaiveDate> {
    match raw.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        other => NaiveDate::parse_from_str(other, DATE_FORMAT).map_err(|_| {
            HabitError::Validation(format!(
                "Invalid date '{}': expected YYYY-MM-DD, today or yesterday",
                raw.trim()
            ))
        }),
    }
}
