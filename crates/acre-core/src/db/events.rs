//! Tracking event operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::Database;
use crate::error::Result;
use crate::events::{EventLog, EventSource};
use crate::models::{EventCategory, EventType, ModuleSummary, NewTrackingEvent, TrackingEvent};

const EVENT_COLUMNS: &str = "id, title, date, notes, category, event_type, progress";

fn parse_date(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn invalid_text(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Text,
        message.into(),
    )
}

impl Database {
    /// Validate a new event, assign its id and store it under `module`
    pub fn add_event(&self, module: &str, event: NewTrackingEvent) -> Result<TrackingEvent> {
        let event = event.into_event()?;
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO tracking_events (module, id, title, date, notes, category, event_type, progress)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                module,
                event.id,
                event.title,
                event.date.to_string(),
                event.notes,
                event.category.as_str(),
                event.event_type.map(|t| t.as_str()),
                event.progress,
            ],
        )?;

        debug!(module, id = %event.id, "Tracking event added");
        Ok(event)
    }

    /// Store an already-built event (import path), keeping its id
    ///
    /// Returns false if an event with the same id already exists in the module.
    pub fn insert_event(&self, module: &str, event: &TrackingEvent) -> Result<bool> {
        let event = event.clone().normalized()?;

        let conn = self.conn()?;
        let inserted = conn.execute(
            r#"
            INSERT OR IGNORE INTO tracking_events (module, id, title, date, notes, category, event_type, progress)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                module,
                event.id,
                event.title,
                event.date.to_string(),
                event.notes,
                event.category.as_str(),
                event.event_type.map(|t| t.as_str()),
                event.progress,
            ],
        )?;

        Ok(inserted > 0)
    }

    /// Remove an event by id; returns false if it did not exist
    pub fn remove_event(&self, module: &str, id: &str) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM tracking_events WHERE module = ? AND id = ?",
            params![module, id],
        )?;
        Ok(deleted > 0)
    }

    /// Get a single event by id
    pub fn get_event(&self, module: &str, id: &str) -> Result<Option<TrackingEvent>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM tracking_events WHERE module = ? AND id = ?",
            EVENT_COLUMNS
        );
        let event = conn
            .query_row(&sql, params![module, id], Self::row_to_event)
            .optional()?;
        Ok(event)
    }

    /// List a module's events, oldest first
    pub fn list_events(&self, module: &str) -> Result<Vec<TrackingEvent>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM tracking_events WHERE module = ? ORDER BY date, created_at, id",
            EVENT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![module], Self::row_to_event)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// List modules that have events, with counts and date span
    pub fn list_modules(&self) -> Result<Vec<ModuleSummary>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT module, COUNT(*), MIN(date), MAX(date)
            FROM tracking_events
            GROUP BY module
            ORDER BY module
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            let first: Option<String> = row.get(2)?;
            let last: Option<String> = row.get(3)?;
            Ok(ModuleSummary {
                name: row.get(0)?,
                event_count: row.get(1)?,
                first_date: first.map(|s| parse_date(2, &s)).transpose()?,
                last_date: last.map(|s| parse_date(3, &s)).transpose()?,
            })
        })?;

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Delete every event in a module, returning how many were removed
    pub fn clear_module(&self, module: &str) -> Result<usize> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM tracking_events WHERE module = ?",
            params![module],
        )?;
        debug!(module, deleted, "Module cleared");
        Ok(deleted)
    }

    /// Total number of stored events across all modules
    pub fn count_events(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM tracking_events", [], |row| row.get(0))?;
        Ok(count)
    }

    fn row_to_event(row: &rusqlite::Row) -> rusqlite::Result<TrackingEvent> {
        let date_str: String = row.get(2)?;
        let category_str: String = row.get(4)?;
        let type_str: Option<String> = row.get(5)?;
        let progress: Option<i64> = row.get(6)?;

        Ok(TrackingEvent {
            id: row.get(0)?,
            title: row.get(1)?,
            date: parse_date(2, &date_str)?,
            notes: row.get(3)?,
            category: category_str
                .parse::<EventCategory>()
                .map_err(|e| invalid_text(4, e))?,
            event_type: type_str
                .map(|s| s.parse::<EventType>().map_err(|e| invalid_text(5, e)))
                .transpose()?,
            progress: progress
                .map(|p| match u8::try_from(p) {
                    Ok(p) if p <= 100 => Ok(p),
                    _ => Err(rusqlite::Error::FromSqlConversionFailure(
                        6,
                        rusqlite::types::Type::Integer,
                        format!("progress out of range: {}", p).into(),
                    )),
                })
                .transpose()?,
        })
    }
}

impl EventSource for Database {
    fn list(&self, module: &str) -> Result<Vec<TrackingEvent>> {
        self.list_events(module)
    }
}

impl EventLog for Database {
    fn add(&self, module: &str, event: NewTrackingEvent) -> Result<TrackingEvent> {
        self.add_event(module, event)
    }

    fn remove(&self, module: &str, id: &str) -> Result<bool> {
        self.remove_event(module, id)
    }
}
