//! Habit store backed by a flat text file
//!
//! Owns the ordered list of habits and rewrites the whole file after every
//! mutation.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{HabitError, HabitResult};
use crate::models::{CompletionOutcome, Habit};

use super::file_io::{read_bytes, write_text_atomic};
use super::record::{decode_habits, encode_habits, MalformedLine};

/// Summary of a load
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Number of habits loaded
    pub loaded: usize,
    /// Lines that were skipped because they could not be decoded
    pub skipped: Vec<MalformedLine>,
    /// Whether the store file was missing (treated as empty)
    pub missing: bool,
}

impl LoadReport {
    /// Whether any lines were skipped
    pub fn has_warnings(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Human-readable warnings, one per skipped line
    pub fn warnings(&self) -> Vec<String> {
        self.skipped
            .iter()
            .map(|m| format!("{} (skipped: {:?})", m.to_error(), m.content))
            .collect()
    }
}

/// In-memory habit collection bound to its backing file
#[derive(Debug)]
pub struct HabitStore {
    path: PathBuf,
    habits: Vec<Habit>,
}

impl HabitStore {
    /// Create an empty store for the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            habits: Vec::new(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load habits from disk, replacing the in-memory list
    ///
    /// A missing file yields an empty store. Malformed lines are skipped and
    /// reported; only an unreadable file is an error.
    pub fn load(&mut self) -> HabitResult<LoadReport> {
        match read_bytes(&self.path)? {
            Some(bytes) => Ok(self.load_from_bytes(&bytes)),
            None => {
                tracing::debug!(path = %self.path.display(), "habits file missing, starting empty");
                self.habits.clear();
                Ok(LoadReport {
                    missing: true,
                    ..LoadReport::default()
                })
            }
        }
    }

    /// Replace the in-memory list with habits decoded from `text`
    pub fn load_from_str(&mut self, text: &str) -> LoadReport {
        self.load_from_bytes(text.as_bytes())
    }

    /// Replace the in-memory list with habits decoded from raw file bytes
    pub fn load_from_bytes(&mut self, bytes: &[u8]) -> LoadReport {
        let parsed = decode_habits(bytes);

        for bad in &parsed.malformed {
            tracing::warn!(
                path = %self.path.display(),
                line = bad.line_number,
                reason = %bad.error,
                "skipping malformed habit record"
            );
        }

        self.habits = parsed.habits;
        tracing::debug!(count = self.habits.len(), "habits loaded");

        LoadReport {
            loaded: self.habits.len(),
            skipped: parsed.malformed,
            missing: false,
        }
    }

    /// Serialized form of the store, as written by [`HabitStore::save`]
    pub fn to_text(&self) -> String {
        encode_habits(&self.habits)
    }

    /// Write every habit to disk, one per line, replacing the file atomically
    pub fn save(&self) -> HabitResult<()> {
        write_text_atomic(&self.path, &self.to_text())?;
        tracing::debug!(path = %self.path.display(), count = self.habits.len(), "habits saved");
        Ok(())
    }

    /// All habits in insertion order
    pub fn list_all(&self) -> &[Habit] {
        &self.habits
    }

    /// Number of habits
    pub fn len(&self) -> usize {
        self.habits.len()
    }

    /// Whether the store has no habits
    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    /// Find a habit by name (case-insensitive); first match wins
    pub fn find(&self, name: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.matches_name(name))
    }

    fn position(&self, name: &str) -> HabitResult<usize> {
        self.habits
            .iter()
            .position(|h| h.matches_name(name))
            .ok_or_else(|| HabitError::habit_not_found(name.trim()))
    }

    /// Add a new habit and persist the store
    pub fn add(&mut self, name: &str, frequency: &str) -> HabitResult<Habit> {
        let habit = Habit::new(name, frequency);
        habit
            .validate()
            .map_err(|e| HabitError::Validation(e.to_string()))?;

        if self.find(&habit.name).is_some() {
            return Err(HabitError::duplicate_habit(habit.name));
        }

        self.habits.push(habit.clone());
        self.save()?;

        Ok(habit)
    }

    /// Mark a habit complete on `today` and persist if anything changed
    pub fn mark_complete(&mut self, name: &str, today: NaiveDate) -> HabitResult<CompletionOutcome> {
        let idx = self.position(name)?;
        let outcome = self.habits[idx].mark_complete(today);

        if outcome.changed() {
            self.save()?;
        }

        Ok(outcome)
    }

    /// Reset a habit's streak to zero and persist
    pub fn reset_streak(&mut self, name: &str) -> HabitResult<Habit> {
        let idx = self.position(name)?;
        self.habits[idx].reset_streak();
        self.save()?;

        Ok(self.habits[idx].clone())
    }

    /// Remove a habit and persist, returning the removed record
    pub fn remove(&mut self, name: &str) -> HabitResult<Habit> {
        let idx = self.position(name)?;
        let removed = self.habits.remove(idx);
        self.save()?;

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_store() -> (TempDir, HabitStore) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("habits.txt");
        let store = HabitStore::new(path);
        (temp_dir, store)
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_temp_dir, mut store) = create_test_store();
        let report = store.load().unwrap();

        assert!(report.missing);
        assert_eq!(report.loaded, 0);
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_add_persists() {
        let (_temp_dir, mut store) = create_test_store();

        let habit = store.add("Exercise", "daily").unwrap();
        assert_eq!(habit.streak, 0);
        assert_eq!(store.len(), 1);

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            contents,
            "Habit: Exercise | Frequency: daily | Streak: 0 | Last Completed: None\n"
        );
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let (_temp_dir, mut store) = create_test_store();
        store.add("Exercise", "daily").unwrap();

        let err = store.add("  EXERCISE", "weekly").unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(store.len(), 1);
        assert_eq!(store.list_all()[0].frequency, "daily");
    }

    #[test]
    fn test_add_invalid_rejected() {
        let (_temp_dir, mut store) = create_test_store();

        assert!(store.add("   ", "daily").unwrap_err().is_validation());
        assert!(store.add("A | B", "daily").unwrap_err().is_validation());
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_find_case_insensitive() {
        let (_temp_dir, mut store) = create_test_store();
        store.add("Morning Run", "daily").unwrap();

        assert_eq!(store.find("morning run").unwrap().name, "Morning Run");
        assert!(store.find("evening run").is_none());
    }

    #[test]
    fn test_find_first_match_with_legacy_duplicates() {
        let (_temp_dir, mut store) = create_test_store();
        store.load_from_str(
            "Habit: Read | Frequency: daily | Streak: 1 | Last Completed: None\n\
             Habit: read | Frequency: weekly | Streak: 9 | Last Completed: None\n",
        );

        assert_eq!(store.len(), 2);
        assert_eq!(store.find("READ").unwrap().frequency, "daily");

        store.remove("read").unwrap();
        assert_eq!(store.find("read").unwrap().frequency, "weekly");
    }

    #[test]
    fn test_completion_scenario() {
        let (_temp_dir, mut store) = create_test_store();
        store.add("Exercise", "daily").unwrap();

        let outcome = store.mark_complete("Exercise", date(2024, 1, 1)).unwrap();
        assert_eq!(outcome, CompletionOutcome::Completed);
        let habit = store.find("Exercise").unwrap();
        assert_eq!(habit.streak, 1);
        assert_eq!(habit.last_completed, Some(date(2024, 1, 1)));

        let outcome = store.mark_complete("exercise", date(2024, 1, 1)).unwrap();
        assert_eq!(outcome, CompletionOutcome::AlreadyCompletedToday);
        assert_eq!(store.find("Exercise").unwrap().streak, 1);

        store.mark_complete("Exercise", date(2024, 1, 2)).unwrap();
        assert_eq!(store.find("Exercise").unwrap().streak, 2);

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            contents,
            "Habit: Exercise | Frequency: daily | Streak: 2 | Last Completed: 2024-01-02\n"
        );
    }

    #[test]
    fn test_mark_complete_not_found_leaves_file_untouched() {
        let (_temp_dir, mut store) = create_test_store();

        let err = store.mark_complete("Ghost", date(2024, 1, 1)).unwrap_err();
        assert!(err.is_not_found());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_already_completed_does_not_save() {
        let (_temp_dir, mut store) = create_test_store();
        store.add("Exercise", "daily").unwrap();
        store.mark_complete("Exercise", date(2024, 1, 1)).unwrap();

        // Replace the file behind the store's back; a no-op completion must not rewrite it
        fs::write(store.path(), "sentinel\n").unwrap();
        store.mark_complete("Exercise", date(2024, 1, 1)).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "sentinel\n");
    }

    #[test]
    fn test_reset_streak() {
        let (_temp_dir, mut store) = create_test_store();
        store.add("Exercise", "daily").unwrap();
        store.mark_complete("Exercise", date(2024, 1, 1)).unwrap();
        store.mark_complete("Exercise", date(2024, 1, 2)).unwrap();

        let habit = store.reset_streak("exercise").unwrap();
        assert_eq!(habit.streak, 0);
        assert_eq!(habit.last_completed, Some(date(2024, 1, 2)));

        let mut reloaded = HabitStore::new(store.path());
        reloaded.load().unwrap();
        assert_eq!(reloaded.find("Exercise").unwrap().streak, 0);

        assert!(store.reset_streak("Ghost").unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove() {
        let (_temp_dir, mut store) = create_test_store();
        store.add("Exercise", "daily").unwrap();
        store.add("Read", "weekly").unwrap();

        let removed = store.remove("EXERCISE").unwrap();
        assert_eq!(removed.name, "Exercise");
        assert!(store.find("Exercise").is_none());
        assert_eq!(store.len(), 1);

        let err = store.remove("Exercise").unwrap_err();
        assert!(err.is_not_found());

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            contents,
            "Habit: Read | Frequency: weekly | Streak: 0 | Last Completed: None\n"
        );
    }

    #[test]
    fn test_remove_last_writes_empty_file() {
        let (_temp_dir, mut store) = create_test_store();
        store.add("Exercise", "daily").unwrap();
        store.remove("Exercise").unwrap();

        assert!(store.path().exists());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
    }

    #[test]
    fn test_save_and_reload_preserves_order() {
        let (_temp_dir, mut store) = create_test_store();
        store.add("Walk", "daily").unwrap();
        store.add("Read", "weekly").unwrap();
        store.add("Journal", "").unwrap();
        store.mark_complete("Read", date(2023, 12, 31)).unwrap();
        store.mark_complete("Walk", date(2024, 1, 1)).unwrap();
        store.mark_complete("Walk", date(2024, 1, 2)).unwrap();

        let mut reloaded = HabitStore::new(store.path());
        let report = reloaded.load().unwrap();

        assert_eq!(report.loaded, 3);
        assert!(!report.has_warnings());
        assert_eq!(reloaded.list_all(), store.list_all());
    }

    #[test]
    fn test_load_skips_malformed_line() {
        let (_temp_dir, mut store) = create_test_store();
        fs::write(
            store.path(),
            "Habit: Exercise | Frequency: daily | Streak: 4 | Last Completed: 2024-01-01\n\
             Habit: Broken | Frequency: daily | Streak: many | Last Completed: None\n\
             Habit: Read | Frequency: weekly | Streak: 3 | Last Completed: None\n",
        )
        .unwrap();

        let report = store.load().unwrap();
        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line_number, 2);
        assert!(report.has_warnings());
        assert_eq!(report.warnings().len(), 1);
        assert!(report.warnings()[0].contains("line 2"));

        let names: Vec<_> = store.list_all().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Exercise", "Read"]);
    }

    #[test]
    fn test_load_replaces_state() {
        let (_temp_dir, mut store) = create_test_store();
        store.add("Exercise", "daily").unwrap();

        store.load_from_str("Habit: Read | Frequency: weekly | Streak: 3 | Last Completed: None\n");
        assert_eq!(store.len(), 1);
        assert!(store.find("Exercise").is_none());
    }

    #[test]
    fn test_read_line_round_trips_byte_identical() {
        let (_temp_dir, mut store) = create_test_store();
        let line = "Habit: Read | Frequency: weekly | Streak: 3 | Last Completed: None\n";
        fs::write(store.path(), line).unwrap();

        store.load().unwrap();
        let habit = store.find("Read").unwrap();
        assert_eq!(habit.streak, 3);
        assert!(habit.last_completed.is_none());

        store.save().unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), line);
    }

    #[test]
    fn test_save_failure_keeps_mutation() {
        let temp_dir = TempDir::new().unwrap();
        let blocked = temp_dir.path().join("blocked");
        fs::write(&blocked, "not a directory").unwrap();

        // Parent path is a regular file, so the write cannot succeed
        let mut store = HabitStore::new(blocked.join("habits.txt"));
        let err = store.add("Exercise", "daily").unwrap_err();

        assert!(matches!(err, HabitError::Storage(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_separator_like_values_never_reach_disk() {
        let (_temp_dir, mut store) = create_test_store();

        assert!(store.add("| Yoga", "daily").unwrap_err().is_validation());
        assert!(store.add("Yoga |", "daily").unwrap_err().is_validation());
        assert!(store.add("Read", "weekly |").unwrap_err().is_validation());
        assert!(store.add("Read", "| weekly").unwrap_err().is_validation());

        store.add("Yoga", "mon/wed/fri").unwrap();
        store.add("Read", "weekly - sundays").unwrap();

        let mut reloaded = HabitStore::new(store.path());
        let report = reloaded.load().unwrap();
        assert!(!report.has_warnings());
        assert_eq!(reloaded.list_all(), store.list_all());
    }

    #[test]
    fn test_load_skips_invalid_utf8_line() {
        let (_temp_dir, mut store) = create_test_store();
        let mut bytes =
            b"Habit: Read | Frequency: weekly | Streak: 3 | Last Completed: None\n".to_vec();
        bytes.extend_from_slice(
            b"Habit: \xff\xfe | Frequency: daily | Streak: 1 | Last Completed: None\n",
        );
        fs::write(store.path(), &bytes).unwrap();

        let report = store.load().unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line_number, 2);
        assert!(report.warnings()[0].contains("not valid UTF-8"));
        assert_eq!(store.find("Read").unwrap().streak, 3);
    }

    fn create_unwritable_store(contents: &str) -> (TempDir, HabitStore) {
        let temp_dir = TempDir::new().unwrap();
        let blocked = temp_dir.path().join("blocked");
        fs::write(&blocked, "not a directory").unwrap();

        let mut store = HabitStore::new(blocked.join("habits.txt"));
        store.load_from_str(contents);
        (temp_dir, store)
    }

    #[test]
    fn test_mark_complete_save_failure_keeps_mutation() {
        let (_temp_dir, mut store) = create_unwritable_store(
            "Habit: Exercise | Frequency: daily | Streak: 1 | Last Completed: 2024-01-01\n",
        );

        let err = store.mark_complete("Exercise", date(2024, 1, 2)).unwrap_err();
        assert!(matches!(err, HabitError::Storage(_)));

        let habit = store.find("Exercise").unwrap();
        assert_eq!(habit.streak, 2);
        assert_eq!(habit.last_completed, Some(date(2024, 1, 2)));

        // Same day again is a no-op, so there is nothing to save and no error
        assert_eq!(
            store.mark_complete("Exercise", date(2024, 1, 2)).unwrap(),
            CompletionOutcome::AlreadyCompletedToday
        );
    }

    #[test]
    fn test_remove_and_reset_save_failure_keeps_mutation() {
        let (_temp_dir, mut store) = create_unwritable_store(
            "Habit: Exercise | Frequency: daily | Streak: 5 | Last Completed: 2024-01-01\n\
             Habit: Read | Frequency: weekly | Streak: 3 | Last Completed: None\n",
        );

        let err = store.reset_streak("Exercise").unwrap_err();
        assert!(matches!(err, HabitError::Storage(_)));
        assert_eq!(store.find("Exercise").unwrap().streak, 0);

        let err = store.remove("Read").unwrap_err();
        assert!(matches!(err, HabitError::Storage(_)));
        assert!(store.find("Read").is_none());
        assert_eq!(store.len(), 1);
    }
}
