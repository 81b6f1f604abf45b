//! Custom error types for habit-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for habit-cli operations
#[derive(Error, Debug)]
pub enum HabitError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A persisted line that does not follow the record grammar
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Storage errors (the habits file could not be read or written)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl HabitError {
    /// Create a "not found" error for habits
    pub fn habit_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Habit",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for habits
    pub fn duplicate_habit(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Habit",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a duplicate error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for HabitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for habit-cli operations
pub type HabitResult<T> = Result<T, HabitError>;
