//! Interactive menu
//!
//! A numbered prompt loop over one [`HabitStore`]. Reads choices from any
//! `BufRead` and writes to any `Write`, so it runs the same against a
//! terminal or a test buffer. End of input behaves like choosing Exit.

use std::io::{BufRead, Write};

use chrono::NaiveDate;

use super::habit::{add_habit, complete_habit, list_habits, remove_habit, reset_habit};
use crate::config::Settings;
use crate::error::HabitResult;
use crate::storage::HabitStore;

const MENU: &str = "\
Habit Tracker
1. Add habit
2. Show habits
3. Mark habit complete
4. Remove habit
5. Reset streak
6. Exit";

/// Run the menu until the user exits or input ends
///
/// `today` is consulted on every completion so a session left open past
/// midnight records the new date.
pub fn run_menu<R, W, F>(
    store: &mut HabitStore,
    settings: &Settings,
    mut input: R,
    mut out: W,
    today: F,
) -> HabitResult<()>
where
    R: BufRead,
    W: Write,
    F: Fn() -> NaiveDate,
{
    loop {
        writeln!(out, "\n{}", MENU)?;
        let Some(choice) = prompt(&mut input, &mut out, "Choose an option: ")? else {
            break;
        };

        let result = match choice.as_str() {
            "1" => {
                let Some(name) = prompt(&mut input, &mut out, "Habit name: ")? else {
                    break;
                };
                if name.is_empty() {
                    writeln!(out, "Habit name cannot be empty.")?;
                    continue;
                }
                let Some(frequency) = prompt(
                    &mut input,
                    &mut out,
                    &format!("Frequency [{}]: ", settings.default_frequency),
                )?
                else {
                    break;
                };
                let frequency = if frequency.is_empty() {
                    settings.default_frequency.clone()
                } else {
                    frequency
                };
                add_habit(store, &name, &frequency)
            }
            "2" => Ok(list_habits(store)),
            "3" => {
                let Some(name) = prompt(&mut input, &mut out, "Habit to mark complete: ")? else {
                    break;
                };
                complete_habit(store, &name, today())
            }
            "4" => {
                let Some(name) = prompt(&mut input, &mut out, "Habit to remove: ")? else {
                    break;
                };
                remove_habit(store, &name)
            }
            "5" => {
                let Some(name) = prompt(&mut input, &mut out, "Habit to reset: ")? else {
                    break;
                };
                reset_habit(store, &name)
            }
            "6" => break,
            other => Ok(format!("Invalid option '{}'. Choose 1-6.", other)),
        };

        match result {
            Ok(message) => writeln!(out, "{}", message.trim_end())?,
            Err(e) => {
                tracing::debug!(error = %e, "menu action failed");
                writeln!(out, "Error: {}", e)?;
            }
        }
    }

    store.save()?;
    writeln!(out, "Habits saved. Goodbye!")?;
    Ok(())
}

/// Print a prompt and read one trimmed line; `None` at end of input
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> HabitResult<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
