//! Core data models for habit-cli

pub mod habit;

pub use habit::{CompletionOutcome, Habit, HabitValidationError};
