//! Database tests

use super::*;
use crate::events::{EventLog, EventSource};
use crate::models::*;
use crate::test_utils::{date, observed};

#[test]
fn test_in_memory_db() {
    let db = Database::in_memory().unwrap();
    assert!(db.list_events("Beginning Farming").unwrap().is_empty());
    assert!(db.list_modules().unwrap().is_empty());
    assert_eq!(db.count_events().unwrap(), 0);
}

#[test]
fn test_tracking_events_schema_exists() {
    let db = Database::in_memory().unwrap();
    let conn = db.conn().unwrap();

    let result: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('tracking_events') WHERE name IN ('module', 'id', 'title', 'date', 'notes', 'category', 'event_type', 'progress', 'created_at')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(result, 9, "tracking_events should have 9 expected columns");
}

#[test]
fn test_add_and_list_events() {
    let db = Database::in_memory().unwrap();

    let added = db
        .add_event(
            "Beginning Farming",
            NewTrackingEvent::new("Soil test", date("2024-04-02"))
                .with_category(EventCategory::Past)
                .with_type(EventType::Learning)
                .with_progress(40)
                .with_notes("pH 6.4"),
        )
        .unwrap();

    let events = db.list_events("Beginning Farming").unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0], added);
    assert_eq!(events[0].progress, Some(40));
    assert_eq!(events[0].notes, "pH 6.4");

    let fetched = db.get_event("Beginning Farming", &added.id).unwrap();
    assert_eq!(fetched, Some(added));
}

#[test]
fn test_list_events_is_module_scoped_and_date_ordered() {
    let db = Database::in_memory().unwrap();

    db.add_event("A", NewTrackingEvent::new("Later", date("2024-05-10")))
        .unwrap();
    db.add_event("A", NewTrackingEvent::new("Earlier", date("2024-05-01")))
        .unwrap();
    db.add_event("B", NewTrackingEvent::new("Other", date("2024-05-05")))
        .unwrap();

    let titles: Vec<String> = db
        .list_events("A")
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["Earlier", "Later"]);
}

#[test]
fn test_add_event_rejects_empty_title() {
    let db = Database::in_memory().unwrap();
    let result = db.add_event("A", NewTrackingEvent::new("  ", date("2024-05-10")));
    assert!(matches!(result, Err(Error::InvalidData(_))));
    assert_eq!(db.count_events().unwrap(), 0);
}

#[test]
fn test_untyped_event_round_trips() {
    let db = Database::in_memory().unwrap();
    let added = db
        .add_event("A", NewTrackingEvent::new("Note to self", date("2024-05-10")))
        .unwrap();
    let events = db.list_events("A").unwrap();
    assert_eq!(events[0].event_type, None);
    assert_eq!(events[0].category, EventCategory::Present);
    assert_eq!(events[0].id, added.id);
}

#[test]
fn test_remove_event() {
    let db = Database::in_memory().unwrap();
    let event = db
        .add_event("A", NewTrackingEvent::new("Mow", date("2024-05-10")))
        .unwrap();

    // Wrong module does not remove
    assert!(!db.remove_event("B", &event.id).unwrap());
    assert!(db.remove_event("A", &event.id).unwrap());
    assert!(!db.remove_event("A", &event.id).unwrap());
    assert!(db.get_event("A", &event.id).unwrap().is_none());
}

#[test]
fn test_insert_event_preserves_id_and_skips_duplicates() {
    let db = Database::in_memory().unwrap();
    let event = observed("Shearing", "2024-03-15", EventType::Activity);

    assert!(db.insert_event("A", &event).unwrap());
    assert!(!db.insert_event("A", &event).unwrap());
    // Same id is allowed in a different module
    assert!(db.insert_event("B", &event).unwrap());

    let stored = db.list_events("A").unwrap();
    assert_eq!(stored, vec![event]);
}

#[test]
fn test_insert_event_validates() {
    let db = Database::in_memory().unwrap();
    let mut event = observed("Shearing", "2024-03-15", EventType::Goal);
    event.progress = Some(150);
    assert!(db.insert_event("A", &event).is_err());

    event.progress = Some(20);
    event.title = String::new();
    assert!(db.insert_event("A", &event).is_err());
}

#[test]
fn test_insert_event_normalizes_like_add() {
    let db = Database::in_memory().unwrap();
    let mut event = observed("  Spray  ", "2024-03-15", EventType::Activity);
    event.progress = Some(40);

    assert!(db.insert_event("A", &event).unwrap());

    let stored = db.get_event("A", &event.id).unwrap().unwrap();
    assert_eq!(stored.title, "Spray");
    assert_eq!(stored.progress, None);
}

#[test]
fn test_out_of_range_stored_progress_is_an_error() {
    let db = Database::in_memory().unwrap();
    db.conn()
        .unwrap()
        .execute(
            "INSERT INTO tracking_events (module, id, title, date, category, event_type, progress)
             VALUES ('A', 'bad', 'Course', '2024-03-01', 'past', 'learning', 300)",
            [],
        )
        .unwrap();

    let result = db.list_events("A");
    assert!(matches!(result, Err(crate::error::Error::Database(_))));
}

#[test]
fn test_list_modules_and_clear() {
    let db = Database::in_memory().unwrap();
    db.add_event("Economics", NewTrackingEvent::new("Sold lambs", date("2024-06-01")))
        .unwrap();
    db.add_event("Economics", NewTrackingEvent::new("Bought feed", date("2024-02-01")))
        .unwrap();
    db.add_event("Health Insights", NewTrackingEvent::new("Vet", date("2024-03-01")))
        .unwrap();

    let modules = db.list_modules().unwrap();
    assert_eq!(modules.len(), 2);
    assert_eq!(modules[0].name, "Economics");
    assert_eq!(modules[0].event_count, 2);
    assert_eq!(modules[0].first_date, Some(date("2024-02-01")));
    assert_eq!(modules[0].last_date, Some(date("2024-06-01")));

    assert_eq!(db.clear_module("Economics").unwrap(), 2);
    assert_eq!(db.list_modules().unwrap().len(), 1);
    assert_eq!(db.count_events().unwrap(), 1);
}

#[test]
fn test_database_implements_event_log() {
    let db = Database::in_memory().unwrap();
    let log: &dyn EventLog = &db;

    let event = log
        .add(
            "A",
            NewTrackingEvent::new("Irrigation check", date("2024-07-01"))
                .with_type(EventType::Activity),
        )
        .unwrap();
    assert_eq!(log.list("A").unwrap().len(), 1);
    assert!(log.remove("A", &event.id).unwrap());
    assert!(log.list("A").unwrap().is_empty());
}

#[test]
fn test_in_memory_db_cleans_up_on_drop() {
    let db = Database::in_memory().unwrap();
    let path = std::path::PathBuf::from(db.path());
    let copy = db.clone();
    assert!(path.exists());

    drop(db);
    assert!(path.exists());
    drop(copy);
    assert!(!path.exists());
}

#[test]
fn test_unencrypted_db_reports_not_encrypted() {
    let db = Database::in_memory().unwrap();
    assert!(!db.is_encrypted().unwrap());
}

#[test]
fn test_encrypted_db_reopens_with_same_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("acre.db");
    let path = path.to_str().unwrap();

    {
        let db = Database::new_with_key(path, Some("correct horse")).unwrap();
        db.add_event("A", NewTrackingEvent::new("Seeded", date("2024-01-01")))
            .unwrap();
        assert!(db.is_encrypted().unwrap());
    }

    let db = Database::new_with_key(path, Some("correct horse")).unwrap();
    assert_eq!(db.list_events("A").unwrap().len(), 1);
}

#[test]
fn test_derive_key_is_stable() {
    let a = derive_key("passphrase").unwrap();
    let b = derive_key("passphrase").unwrap();
    let c = derive_key("other").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}
