use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rust-taskgrid", version, about = "Month-grid task planner")]
pub struct Cli {
    /// Settings file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// SQLite database, overriding the settings file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
    /// Show desktop notifications for changes
    #[arg(long, global = true)]
    pub notify: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the month grid with task bars
    Show {
        /// Month to show, as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
        /// Only show these categories (repeatable)
        #[arg(long = "category", short = 'c')]
        categories: Vec<String>,
        /// Only show tasks within this many weeks from today
        #[arg(long)]
        weeks: Option<u32>,
        /// Only show tasks whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// List every stored task
    List,
    /// Add a task
    Add {
        /// Task name
        name: String,
        /// First day, YYYY-MM-DD
        #[arg(long)]
        start: NaiveDate,
        /// Last day, YYYY-MM-DD (defaults to the start date)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// To Do, In Progress, Review or Completed
        #[arg(long, default_value = "To Do")]
        category: String,
    },
    /// Shift a task by whole days
    Move {
        /// Task id
        id: String,
        /// Days to shift; negative moves earlier
        #[arg(long, allow_hyphen_values = true)]
        days: i64,
    },
    /// Delete a task
    Remove {
        /// Task id
        id: String,
    },
    /// Write all tasks to a JSON file
    Export { path: PathBuf },
    /// Load tasks from a JSON file, replacing tasks with the same id
    Import { path: PathBuf },
}
