//! Storage layer for habit-cli
//!
//! Provides the flat-file habit store, its line codec, and atomic file writes.

pub mod file_io;
pub mod habits;
pub mod record;

pub use file_io::{read_bytes, write_text_atomic};
pub use habits::{HabitStore, LoadReport};
pub use record::{decode_habit, decode_habits, encode_habit, encode_habits, MalformedLine, RecordError};

use crate::config::paths::HabitPaths;
use crate::config::settings::Settings;
use crate::error::HabitError;

/// Open and load the habit store configured for these paths and settings
///
/// An explicit `file` overrides the configured location.
pub fn open_store(
    paths: &HabitPaths,
    settings: &Settings,
    file: Option<std::path::PathBuf>,
) -> Result<(HabitStore, LoadReport), HabitError> {
    let path = file.unwrap_or_else(|| settings.store_path(paths));
    let mut store = HabitStore::new(path);
    let report = store.load()?;
    Ok((store, report))
}
