//! Habit model
//!
//! A tracked recurring activity with a free-form cadence, a running streak
//! and the calendar date it was last completed.

use chrono::NaiveDate;
use std::fmt;

/// Separator between the labelled fields of a rendered habit
pub const FIELD_SEPARATOR: &str = " | ";

/// Character reserved for the field separator
const SEPARATOR_CHAR: char = '|';

/// Label prefixes, in field order
pub const NAME_LABEL: &str = "Habit: ";
pub const FREQUENCY_LABEL: &str = "Frequency: ";
pub const STREAK_LABEL: &str = "Streak: ";
pub const LAST_COMPLETED_LABEL: &str = "Last Completed: ";

/// Token written in place of a date for habits never completed
pub const NEVER_COMPLETED: &str = "None";

/// Calendar date format used for rendering and persistence
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MAX_NAME_LEN: usize = 100;

/// Result of a completion event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Streak was incremented and the date recorded
    Completed,
    /// The habit was already completed on this date; nothing changed
    AlreadyCompletedToday,
}

impl CompletionOutcome {
    /// Whether the habit was mutated
    pub fn changed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// A tracked habit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Habit {
    /// Habit name, unique within a store (case-insensitive)
    pub name: String,

    /// Intended cadence (e.g. "daily"); descriptive only
    pub frequency: String,

    /// Number of completions, at most one per calendar date
    pub streak: u32,

    /// Date of the most recent completion
    pub last_completed: Option<NaiveDate>,
}

impl Habit {
    /// Create a new habit with no completions
    pub fn new(name: impl Into<String>, frequency: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            frequency: frequency.into().trim().to_string(),
            streak: 0,
            last_completed: None,
        }
    }

    /// Record a completion on `today`
    ///
    /// The streak grows at most once per calendar date: a second completion
    /// on the same date leaves the habit untouched.
    pub fn mark_complete(&mut self, today: NaiveDate) -> CompletionOutcome {
        if self.last_completed == Some(today) {
            return CompletionOutcome::AlreadyCompletedToday;
        }

        self.streak = self.streak.saturating_add(1);
        self.last_completed = Some(today);
        CompletionOutcome::Completed
    }

    /// Reset the streak counter, keeping the last completion date
    pub fn reset_streak(&mut self) {
        self.streak = 0;
    }

    /// Whether the habit was completed on the given date
    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.last_completed == Some(date)
    }

    /// Render the canonical single-line form
    ///
    /// `Habit: <name> | Frequency: <frequency> | Streak: <n> | Last Completed: <date|None>`
    pub fn render(&self) -> String {
        let last = self
            .last_completed
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| NEVER_COMPLETED.to_string());

        [
            format!("{}{}", NAME_LABEL, self.name),
            format!("{}{}", FREQUENCY_LABEL, self.frequency),
            format!("{}{}", STREAK_LABEL, self.streak),
            format!("{}{}", LAST_COMPLETED_LABEL, last),
        ]
        .join(FIELD_SEPARATOR)
    }

    /// Validate the habit
    pub fn validate(&self) -> Result<(), HabitValidationError> {
        if self.name.trim().is_empty() {
            return Err(HabitValidationError::EmptyName);
        }

        let len = self.name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(HabitValidationError::NameTooLong(len));
        }

        if has_reserved_sequence(&self.name) {
            return Err(HabitValidationError::ReservedSequence { field: "name" });
        }
        if has_reserved_sequence(&self.frequency) {
            return Err(HabitValidationError::ReservedSequence { field: "frequency" });
        }

        Ok(())
    }

    /// Normalize a habit name for matching
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Check if this habit matches a name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        Self::normalize_name(&self.name) == Self::normalize_name(name)
    }
}

/// Any `|` can fuse with a neighbouring label into an extra field separator
fn has_reserved_sequence(value: &str) -> bool {
    value.contains(|c: char| c == SEPARATOR_CHAR || c == '\n' || c == '\r')
}

impl fmt::Display for Habit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Validation errors for habits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitValidationError {
    EmptyName,
    NameTooLong(usize),
    ReservedSequence { field: &'static str },
}

impl fmt::Display for HabitValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Habit name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Habit name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
            Self::ReservedSequence { field } => write!(
                f,
                "Habit {} cannot contain line breaks or '{}'",
                field, SEPARATOR_CHAR
            ),
        }
    }
}

impl std::error::Error for HabitValidationError {}
