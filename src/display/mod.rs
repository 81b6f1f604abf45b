//! Display formatting for terminal output
//!
//! Provides utilities for formatting habits for terminal display.

pub mod habit;

pub use habit::{
    format_completion, format_date, format_habit_details, format_habit_list, format_habit_records,
    NO_HABITS_MESSAGE,
};
