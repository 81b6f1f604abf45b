//! habit-cli - Terminal-based personal habit tracker
//!
//! This library provides the core functionality for the habit-cli
//! application: habits with a free-form cadence, a streak that grows at most
//! once per calendar day, and a flat text file that survives hand edits.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: The habit record and its completion rules
//! - `storage`: Flat-file habit store with atomic writes
//! - `display`: Terminal formatting
//! - `cli`: Command handlers and the interactive menu
//!
//! # Example
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use habits::storage::HabitStore;
//!
//! let mut store = HabitStore::new("habits.txt");
//! let report = store.load()?;
//! for warning in report.warnings() {
//!     eprintln!("Warning: {}", warning);
//! }
//!
//! store.add("Exercise", "daily")?;
//! let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! store.mark_complete("exercise", today)?;
//! # Ok::<(), habits::HabitError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod storage;

pub use error::{HabitError, HabitResult};
pub use models::{CompletionOutcome, Habit};
pub use storage::{HabitStore, LoadReport};
