//! Tracking event command implementations

use acre_core::db::Database;
use acre_core::models::{EventCategory, EventType, NewTrackingEvent};
use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::truncate;

/// Raw `events add` arguments as typed on the command line
pub struct EventArgs<'a> {
    pub title: &'a str,
    pub date: &'a str,
    pub notes: Option<&'a str>,
    pub category: &'a str,
    pub event_type: Option<&'a str>,
    pub progress: Option<u8>,
}

impl EventArgs<'_> {
    /// Parse into a new event, reporting which argument was wrong
    pub fn parse(&self) -> Result<NewTrackingEvent> {
        let date = NaiveDate::parse_from_str(self.date, "%Y-%m-%d")
            .context("Invalid --date format (use YYYY-MM-DD)")?;

        let category: EventCategory = self
            .category
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;

        let mut event = NewTrackingEvent::new(self.title, date).with_category(category);

        if let Some(t) = self.event_type {
            let event_type: EventType = t.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            event = event.with_type(event_type);
        }
        if let Some(notes) = self.notes {
            event = event.with_notes(notes);
        }
        if let Some(progress) = self.progress {
            event = event.with_progress(progress);
        }

        Ok(event)
    }
}

pub fn cmd_events_list(db: &Database, module: &str) -> Result<()> {
    let events = db.list_events(module)?;

    if events.is_empty() {
        println!("No events in {}.", module);
        return Ok(());
    }

    println!();
    println!("🗒️  {} ({} events)", module, events.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for event in events {
        let type_str = event.event_type.map(|t| t.as_str()).unwrap_or("-");
        let progress_str = event
            .progress
            .map(|p| format!(" {:>3}%", p))
            .unwrap_or_default();
        println!(
            "   {} │ {:7} │ {:9} │ {:30}{} │ {}",
            event.date,
            event.category.as_str(),
            type_str,
            truncate(&event.title, 30),
            progress_str,
            event.id
        );
    }

    Ok(())
}

pub fn cmd_events_add(db: &Database, module: &str, args: EventArgs<'_>) -> Result<()> {
    let new_event = args.parse()?;
    let event = db
        .add_event(module, new_event)
        .context("Failed to add event")?;

    println!(
        "✅ Logged \"{}\" on {} in {} (ID: {})",
        event.title, event.date, module, event.id
    );

    Ok(())
}

pub fn cmd_events_remove(db: &Database, module: &str, id: &str) -> Result<()> {
    if !db.remove_event(module, id)? {
        anyhow::bail!("Event not found in {}: {}", module, id);
    }

    println!("✅ Removed event {} from {}", id, module);
    Ok(())
}
