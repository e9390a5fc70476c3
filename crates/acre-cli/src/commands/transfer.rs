//! Export/import command implementations

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use acre_core::db::Database;
use acre_core::export::{export_events, import_events_json, ExportFormat};
use anyhow::{Context, Result};

pub fn cmd_export(db: &Database, module: &str, format: &str, output: Option<&Path>) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let events = db.list_events(module)?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            export_events(&events, format, BufWriter::new(file))?;
            // Status goes to stderr so stdout stays clean for piping
            eprintln!(
                "✅ Exported {} events from {} to {}",
                events.len(),
                module,
                path.display()
            );
        }
        None => {
            export_events(&events, format, std::io::stdout().lock())?;
        }
    }

    Ok(())
}

pub fn cmd_import(db: &Database, module: &str, file: &Path) -> Result<()> {
    let reader = BufReader::new(
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?,
    );

    let stats = import_events_json(db, module, reader)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    println!("✅ Import into {} complete", module);
    println!("   Imported: {}", stats.imported);
    println!("   Skipped (already present): {}", stats.skipped);
    if stats.invalid > 0 {
        println!("   ⚠️  Invalid: {}", stats.invalid);
    }

    Ok(())
}
