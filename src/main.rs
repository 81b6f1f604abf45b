use std::io;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use habits::cli::{handle_config_command, handle_habit_command, run_menu, ConfigArgs, HabitCommands};
use habits::config::{paths::HabitPaths, settings::Settings};
use habits::storage::{open_store, HabitStore};

#[derive(Parser)]
#[command(
    name = "habit",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based personal habit tracker",
    long_about = "habit-cli tracks recurring habits and their streaks from the command \
                  line. Complete a habit once per day to grow its streak; everything \
                  is kept in a plain text file you can read and edit."
)]
struct Cli {
    /// Use this habits file instead of the configured one
    #[arg(long, global = true, env = "HABIT_CLI_FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Habit(HabitCommands),

    /// Launch the interactive menu
    Menu,

    /// Show current configuration and paths, or change settings
    Config(ConfigArgs),
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "error".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Open the habit store, printing a warning for each skipped line
fn load_store(paths: &HabitPaths, settings: &Settings, file: Option<PathBuf>) -> Result<HabitStore> {
    let (store, report) = open_store(paths, settings, file)?;
    for warning in report.warnings() {
        eprintln!("Warning: {}", warning);
    }
    Ok(store)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = HabitPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let today = || Local::now().date_naive();

    match cli.command {
        Some(Commands::Habit(cmd)) => {
            let mut store = load_store(&paths, &settings, cli.file)?;
            if let Err(e) = handle_habit_command(&mut store, &settings, cmd, today()) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Menu) | None => {
            let mut store = load_store(&paths, &settings, cli.file)?;
            let stdin = io::stdin();
            run_menu(&mut store, &settings, stdin.lock(), io::stdout(), today)?;
        }
        Some(Commands::Config(args)) => {
            handle_config_command(&paths, &mut settings, args, cli.file.as_deref())?;
        }
    }

    Ok(())
}
