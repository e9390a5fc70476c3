//! Export and import of tracking events and predictions
//!
//! Supports:
//! - Event CSV export (spreadsheet-friendly, one row per event)
//! - Event JSON export/import (full fidelity backup of a module)
//! - Prediction JSON export

use std::io::{Read, Write};

use serde::Serialize;
use tracing::{info, warn};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{Prediction, TrackingEvent};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {} (use csv or json)", s)),
        }
    }
}

/// Import statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub imported: usize,
    /// Already present (same id) in the module
    pub skipped: usize,
    /// Rejected by validation
    pub invalid: usize,
}

/// Flat CSV row for one event
#[derive(Debug, Serialize)]
struct EventCsvRow<'a> {
    id: &'a str,
    title: &'a str,
    date: String,
    category: &'static str,
    #[serde(rename = "type")]
    event_type: &'static str,
    progress: Option<u8>,
    notes: &'a str,
}

/// Write events in the requested format
pub fn export_events<W: Write>(
    events: &[TrackingEvent],
    format: ExportFormat,
    writer: W,
) -> Result<()> {
    match format {
        ExportFormat::Csv => export_events_csv(events, writer),
        ExportFormat::Json => export_events_json(events, writer),
    }
}

/// Write events as CSV with a header row
pub fn export_events_csv<W: Write>(events: &[TrackingEvent], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for event in events {
        wtr.serialize(EventCsvRow {
            id: &event.id,
            title: &event.title,
            date: event.date.format("%Y-%m-%d").to_string(),
            category: event.category.as_str(),
            event_type: event.event_type.map(|t| t.as_str()).unwrap_or(""),
            progress: event.progress,
            notes: &event.notes,
        })?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write events as a pretty-printed JSON array
pub fn export_events_json<W: Write>(events: &[TrackingEvent], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, events)?;
    writer.flush()?;
    Ok(())
}

/// Write predictions as a pretty-printed JSON array
pub fn export_predictions_json<W: Write>(predictions: &[Prediction], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, predictions)?;
    writer.flush()?;
    Ok(())
}

/// Read a JSON array of events
pub fn read_events_json<R: Read>(reader: R) -> Result<Vec<TrackingEvent>> {
    let events: Vec<TrackingEvent> = serde_json::from_reader(reader)
        .map_err(|e| Error::InvalidData(format!("Invalid event backup: {}", e)))?;
    Ok(events)
}

/// Import a JSON array of events into a module, keeping their ids
///
/// Events that fail validation are counted and skipped rather than aborting
/// the whole import.
pub fn import_events_json<R: Read>(db: &Database, module: &str, reader: R) -> Result<ImportStats> {
    let events = read_events_json(reader)?;
    let mut stats = ImportStats::default();

    for event in &events {
        match db.insert_event(module, event) {
            Ok(true) => stats.imported += 1,
            Ok(false) => stats.skipped += 1,
            Err(Error::InvalidData(msg)) => {
                warn!(module, id = %event.id, error = %msg, "Skipping invalid event");
                stats.invalid += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        module,
        imported = stats.imported,
        skipped = stats.skipped,
        invalid = stats.invalid,
        "Event import complete"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventCategory, EventType};
    use crate::predict::generate_predictions;
    use crate::test_utils::{event, observed, series};
    use std::str::FromStr;

    #[test]
    fn test_export_format_parse() {
        assert_eq!(ExportFormat::from_str("CSV").unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_str("json").unwrap(), ExportFormat::Json);
        assert!(ExportFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_csv_export() {
        let mut goal = observed("Fence the, north field", "2024-02-01", EventType::Goal);
        goal.progress = Some(30);
        let events = vec![
            goal,
            event("Rain", "2024-02-03", EventCategory::Present, None),
        ];

        let mut buf = Vec::new();
        export_events_csv(&events, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "id,title,date,category,type,progress,notes");
        assert!(lines[1].contains("\"Fence the, north field\",2024-02-01,past,goal,30,"));
        assert!(lines[2].contains(",Rain,2024-02-03,present,,,"));
    }

    #[test]
    fn test_json_backup_and_import() {
        let events = series(
            EventType::Activity,
            "Move hens",
            &["2024-01-01", "2024-01-04", "2024-01-07"],
        );

        let mut buf = Vec::new();
        export_events(&events, ExportFormat::Json, &mut buf).unwrap();

        let db = Database::in_memory().unwrap();
        let stats = import_events_json(&db, "Poultry", buf.as_slice()).unwrap();
        assert_eq!(
            stats,
            ImportStats {
                imported: 3,
                skipped: 0,
                invalid: 0
            }
        );

        // Second import is a no-op
        let stats = import_events_json(&db, "Poultry", buf.as_slice()).unwrap();
        assert_eq!(stats.skipped, 3);
        assert_eq!(stats.imported, 0);

        let stored = db.list_events("Poultry").unwrap();
        assert_eq!(stored, events);
    }

    #[test]
    fn test_import_counts_invalid_events() {
        let json = r#"[
            {"id":"a","title":"Good","date":"2024-01-01","category":"past","type":"note"},
            {"id":"b","title":"","date":"2024-01-02","category":"past","type":"note"}
        ]"#;

        let db = Database::in_memory().unwrap();
        let stats = import_events_json(&db, "M", json.as_bytes()).unwrap();
        assert_eq!(stats.imported, 1);
        assert_eq!(stats.invalid, 1);
    }

    #[test]
    fn test_import_normalizes_events() {
        let json = r#"[
            {"id":"s1","title":"  Spray  ","date":"2024-05-01","category":"past","type":"activity","progress":40},
            {"id":"s2","title":"Pruning class","date":"2024-05-02","category":"past","type":"learning","progress":40}
        ]"#;

        let db = Database::in_memory().unwrap();
        let stats = import_events_json(&db, "Orchard", json.as_bytes()).unwrap();
        assert_eq!(stats.imported, 2);

        let spray = db.get_event("Orchard", "s1").unwrap().unwrap();
        assert_eq!(spray.title, "Spray");
        assert_eq!(spray.progress, None);

        let class = db.get_event("Orchard", "s2").unwrap().unwrap();
        assert_eq!(class.progress, Some(40));
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        let db = Database::in_memory().unwrap();
        let result = import_events_json(&db, "M", "{not json".as_bytes());
        assert!(matches!(result, Err(Error::InvalidData(_))));

        let bad_date = r#"[{"id":"a","title":"X","date":"2024-13-45","category":"past"}]"#;
        assert!(import_events_json(&db, "M", bad_date.as_bytes()).is_err());
    }

    #[test]
    fn test_predictions_json() {
        let events = series(
            EventType::Learning,
            "Webinar",
            &["2024-01-01", "2024-01-15", "2024-01-29"],
        );
        let predictions = generate_predictions(&events, "Beginning Farming");

        let mut buf = Vec::new();
        export_predictions_json(&predictions, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["predictedDate"], "2024-02-12");
        assert_eq!(value[0]["confidence"], 75);
        assert_eq!(value[0]["basedOn"].as_array().unwrap().len(), 3);
    }
}
