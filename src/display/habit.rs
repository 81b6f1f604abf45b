//! Habit display formatting
//!
//! Formats habits for terminal output in table and detail views.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::habit::DATE_FORMAT;
use crate::models::{CompletionOutcome, Habit};

/// Message shown when there is nothing to list
pub const NO_HABITS_MESSAGE: &str = "No habits added yet!";

/// Format a date, falling back to `YYYY-MM-DD` when `date_format` cannot render one
pub fn format_date(date: NaiveDate, date_format: &str) -> String {
    let mut output = String::new();
    if write!(output, "{}", date.format(date_format)).is_err() {
        output.clear();
        let _ = write!(output, "{}", date.format(DATE_FORMAT));
    }
    output
}

fn format_last_completed(habit: &Habit, date_format: &str) -> String {
    habit
        .last_completed
        .map(|d| format_date(d, date_format))
        .unwrap_or_else(|| "Never".to_string())
}

/// Format habits one record line each, in store order
pub fn format_habit_records(habits: &[Habit]) -> String {
    if habits.is_empty() {
        return NO_HABITS_MESSAGE.to_string();
    }

    let mut output = String::new();
    for habit in habits {
        output.push_str(&habit.render());
        output.push('\n');
    }
    output
}

/// Format a list of habits as a table
pub fn format_habit_list(habits: &[Habit], today: NaiveDate, date_format: &str) -> String {
    if habits.is_empty() {
        return NO_HABITS_MESSAGE.to_string();
    }

    let name_width = habits
        .iter()
        .map(|h| h.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let freq_width = habits
        .iter()
        .map(|h| h.frequency.chars().count())
        .max()
        .unwrap_or(9)
        .max(9);

    let date_width = habits
        .iter()
        .map(|h| format_last_completed(h, date_format).chars().count())
        .max()
        .unwrap_or(14)
        .max(14);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<freq_width$}  {:>6}  {:<date_width$}  {}\n",
        "Name",
        "Frequency",
        "Streak",
        "Last Completed",
        "Status",
    ));

    output.push_str(&format!(
        "{:-<name_width$}  {:-<freq_width$}  {:->6}  {:-<date_width$}  {:-<10}\n",
        "", "", "", "", "",
    ));

    for habit in habits {
        let status = if habit.is_completed_on(today) {
            "Done today"
        } else {
            ""
        };

        let row = format!(
            "{:<name_width$}  {:<freq_width$}  {:>6}  {:<date_width$}  {}",
            habit.name,
            habit.frequency,
            habit.streak,
            format_last_completed(habit, date_format),
            status,
        );
        output.push_str(row.trim_end());
        output.push('\n');
    }

    let done_today = habits.iter().filter(|h| h.is_completed_on(today)).count();
    output.push_str(&format!(
        "\n{} habits, {} done today\n",
        habits.len(),
        done_today
    ));

    output
}

/// Format a single habit's details
pub fn format_habit_details(habit: &Habit, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Habit: {}\n", habit.name));
    output.push_str(&format!("  Frequency:      {}\n", habit.frequency));
    output.push_str(&format!("  Streak:         {}\n", habit.streak));
    output.push_str(&format!(
        "  Last Completed: {}\n",
        format_last_completed(habit, date_format)
    ));

    output
}

/// Message for the outcome of a completion
pub fn format_completion(name: &str, outcome: CompletionOutcome, streak: u32) -> String {
    match outcome {
        CompletionOutcome::Completed => {
            format!("Marked '{}' as complete! Current streak: {}", name, streak)
        }
        CompletionOutcome::AlreadyCompletedToday => {
            format!("'{}' was already completed today. Streak: {}", name, streak)
        }
    }
}
