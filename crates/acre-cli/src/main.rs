//! Acre CLI - Farm activity tracker and forecaster
//!
//! Usage:
//!   acre init                                 Initialize database
//!   acre events add -m MODULE -t TITLE -d DATE --type activity
//!   acre predict -m MODULE                    Forecast next occurrences
//!   acre export -m MODULE --format json       Back up a module

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use acre_core::PredictionConfig;
use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Status => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_status(&db)
        }
        Commands::Modules => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_modules(&db)
        }
        Commands::Events { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                EventsAction::List { module } => commands::cmd_events_list(&db, &module),
                EventsAction::Add {
                    module,
                    title,
                    date,
                    notes,
                    category,
                    event_type,
                    progress,
                } => commands::cmd_events_add(
                    &db,
                    &module,
                    commands::EventArgs {
                        title: &title,
                        date: &date,
                        notes: notes.as_deref(),
                        category: &category,
                        event_type: event_type.as_deref(),
                        progress,
                    },
                ),
                EventsAction::Remove { module, id } => {
                    commands::cmd_events_remove(&db, &module, &id)
                }
            }
        }
        Commands::Predict { module, json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let config = PredictionConfig::load(cli.config.as_deref())
                .context("Failed to load prediction config")?;
            commands::cmd_predict(&db, &module, &config, json)
        }
        Commands::Export {
            module,
            format,
            output,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_export(&db, &module, &format, output.as_deref())
        }
        Commands::Import { module, file } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_import(&db, &module, &file)
        }
    }
}
