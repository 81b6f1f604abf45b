//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the habit store.

pub mod config;
pub mod habit;
pub mod menu;

pub use config::{handle_config_command, ConfigArgs};
pub use habit::{handle_habit_command, HabitCommands};
pub use menu::run_menu;
