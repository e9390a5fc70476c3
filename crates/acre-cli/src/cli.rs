//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Acre - Track farm activities and see what's coming next
#[derive(Parser)]
#[command(name = "acre")]
#[command(about = "Farm activity tracker with recurrence forecasts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "acre.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set ACRE_DB_KEY environment variable with your passphrase.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// Prediction engine config file (TOML)
    ///
    /// Defaults to ~/.local/share/acre/config/predictions.toml when present,
    /// otherwise the built-in settings.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Show database status (encryption, modules, event counts)
    Status,

    /// List modules that have tracking events
    Modules,

    /// Manage tracking events (list, add, remove)
    Events {
        #[command(subcommand)]
        action: EventsAction,
    },

    /// Forecast the next occurrence of each activity type in a module
    Predict {
        /// Module name (e.g., "Beginning Farming")
        #[arg(short, long)]
        module: String,

        /// Print predictions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export a module's events
    Export {
        /// Module name
        #[arg(short, long)]
        module: String,

        /// Output format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import events from a JSON backup into a module
    Import {
        /// Module name
        #[arg(short, long)]
        module: String,

        /// JSON file produced by `acre export --format json`
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum EventsAction {
    /// List events in a module
    List {
        /// Module name
        #[arg(short, long)]
        module: String,
    },

    /// Log a new event
    Add {
        /// Module name
        #[arg(short, long)]
        module: String,

        /// Short label for the event
        #[arg(short, long)]
        title: String,

        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,

        /// Temporal bucket: past, present, future
        #[arg(short, long, default_value = "present")]
        category: String,

        /// Event type: activity, learning, goal, note, milestone
        #[arg(long = "type")]
        event_type: Option<String>,

        /// Progress percentage (learning and goal events)
        #[arg(short, long)]
        progress: Option<u8>,
    },

    /// Remove an event by id
    Remove {
        /// Module name
        #[arg(short, long)]
        module: String,

        /// Event id
        id: String,
    },
}
