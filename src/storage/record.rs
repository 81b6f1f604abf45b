//! Line codec for the habits file
//!
//! Each habit is stored on its own line:
//!
//! ```text
//! Habit: <name> | Frequency: <frequency> | Streak: <n> | Last Completed: <YYYY-MM-DD|None>
//! ```
//!
//! Parsing is strict per field and lenient per line: a line that fails any
//! field check is reported as a [`MalformedLine`] and skipped, while the
//! remaining lines still load.

use chrono::NaiveDate;
use thiserror::Error;

use crate::error::HabitError;
use crate::models::habit::{
    DATE_FORMAT, FIELD_SEPARATOR, FREQUENCY_LABEL, LAST_COMPLETED_LABEL, NAME_LABEL,
    NEVER_COMPLETED, STREAK_LABEL,
};
use crate::models::Habit;

const FIELD_COUNT: usize = 4;

/// Why a single line could not be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),

    #[error("field {position} should start with '{label}'")]
    MissingLabel {
        position: usize,
        label: &'static str,
    },

    #[error("habit name is empty")]
    EmptyName,

    #[error("invalid streak '{0}'")]
    InvalidStreak(String),

    #[error("invalid date '{0}' (expected YYYY-MM-DD or None)")]
    InvalidDate(String),

    #[error("line is not valid UTF-8 (bad byte at column {0})")]
    InvalidEncoding(usize),
}

/// A line skipped while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number in the source text
    pub line_number: usize,
    /// The raw line content
    pub content: String,
    /// What was wrong with it
    pub error: RecordError,
}

impl MalformedLine {
    /// Convert into the crate-level error for reporting
    pub fn to_error(&self) -> HabitError {
        HabitError::MalformedRecord {
            line: self.line_number,
            reason: self.error.to_string(),
        }
    }
}

/// Outcome of decoding a whole file
#[derive(Debug, Clone, Default)]
pub struct ParsedRecords {
    pub habits: Vec<Habit>,
    pub malformed: Vec<MalformedLine>,
}

/// Encode one habit as a line (without trailing newline)
pub fn encode_habit(habit: &Habit) -> String {
    habit.render()
}

/// Encode habits, one per line, each terminated by `\n`
pub fn encode_habits(habits: &[Habit]) -> String {
    habits
        .iter()
        .map(|h| format!("{}\n", encode_habit(h)))
        .collect()
}

/// Decode a single line into a habit
pub fn decode_habit(line: &str) -> Result<Habit, RecordError> {
    let line = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != FIELD_COUNT {
        return Err(RecordError::FieldCount(fields.len()));
    }

    let name = strip_label(fields[0], 1, NAME_LABEL)?.trim();
    if name.is_empty() {
        return Err(RecordError::EmptyName);
    }

    let frequency = strip_label(fields[1], 2, FREQUENCY_LABEL)?.trim();

    let streak_raw = strip_label(fields[2], 3, STREAK_LABEL)?.trim();
    let streak = streak_raw
        .parse::<u32>()
        .map_err(|_| RecordError::InvalidStreak(streak_raw.to_string()))?;

    let date_raw = strip_label(fields[3], 4, LAST_COMPLETED_LABEL)?.trim();
    let last_completed = if date_raw == NEVER_COMPLETED {
        None
    } else {
        Some(
            NaiveDate::parse_from_str(date_raw, DATE_FORMAT)
                .map_err(|_| RecordError::InvalidDate(date_raw.to_string()))?,
        )
    };

    Ok(Habit {
        name: name.to_string(),
        frequency: frequency.to_string(),
        streak,
        last_completed,
    })
}

/// Decode every non-blank line, collecting failures instead of aborting
///
/// Lines are decoded as UTF-8 one at a time, so a badly encoded line is
/// reported like any other malformed line.
pub fn decode_habits(bytes: &[u8]) -> ParsedRecords {
    let mut parsed = ParsedRecords::default();

    for (idx, raw) in bytes.split(|&b| b == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let line_number = idx + 1;

        let line = match std::str::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                parsed.malformed.push(MalformedLine {
                    line_number,
                    content: String::from_utf8_lossy(raw).into_owned(),
                    error: RecordError::InvalidEncoding(e.valid_up_to() + 1),
                });
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match decode_habit(line) {
            Ok(habit) => parsed.habits.push(habit),
            Err(error) => parsed.malformed.push(MalformedLine {
                line_number,
                content: line.to_string(),
                error,
            }),
        }
    }

    parsed
}

/// Strip a field label; an empty value may have lost the label's trailing space
fn strip_label<'a>(
    field: &'a str,
    position: usize,
    label: &'static str,
) -> Result<&'a str, RecordError> {
    if let Some(value) = field.strip_prefix(label) {
        return Ok(value);
    }
    if field == label.trim_end() {
        return Ok("");
    }
    Err(RecordError::MissingLabel { position, label })
}
