//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Database status
//! - `cmd_modules` - Module overview

use std::path::Path;

use acre_core::db::Database;
use anyhow::{Context, Result};

use super::truncate;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path, no_encrypt)?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Log events: acre events add -m \"Beginning Farming\" -t \"Pasture walk\" -d 2024-03-01 -c past --type activity");
    println!("  2. See forecasts: acre predict -m \"Beginning Farming\"");

    Ok(())
}

pub fn cmd_status(db: &Database) -> Result<()> {
    let encrypted = db.is_encrypted()?;
    let total = db.count_events()?;
    let modules = db.list_modules()?;

    println!();
    println!("📊 Acre Status");
    println!("   ─────────────────────────────────────────────");
    println!("   Database:   {}", db.path());
    println!(
        "   Encryption: {}",
        if encrypted { "🔒 enabled" } else { "⚠️  disabled" }
    );
    println!("   Modules:    {}", modules.len());
    println!("   Events:     {}", total);

    Ok(())
}

pub fn cmd_modules(db: &Database) -> Result<()> {
    let modules = db.list_modules()?;

    if modules.is_empty() {
        println!("No events logged yet. Run:");
        println!("  acre events add --module <MODULE> --title <TITLE> --date YYYY-MM-DD");
        return Ok(());
    }

    println!();
    println!("📁 Modules");
    println!("   ─────────────────────────────────────────────────────────────");

    for module in modules {
        let span = match (module.first_date, module.last_date) {
            (Some(first), Some(last)) => format!("{} → {}", first, last),
            _ => "-".to_string(),
        };
        println!(
            "   {:28} │ {:>4} events │ {}",
            truncate(&module.name, 28),
            module.event_count,
            span
        );
    }

    Ok(())
}
