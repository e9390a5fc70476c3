//! Test utilities for acre-core
//!
//! Fixture builders for tracking events so engine and storage tests can
//! describe history as plain dates instead of hand-built structs.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;

use crate::models::{EventCategory, EventType, TrackingEvent};

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_id() -> String {
    format!("evt-{}", COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Parse a `YYYY-MM-DD` date, panicking on bad input
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .unwrap_or_else(|e| panic!("bad fixture date {}: {}", s, e))
}

/// Build an event with every field spelled out
pub fn event(
    title: &str,
    on: &str,
    category: EventCategory,
    event_type: Option<EventType>,
) -> TrackingEvent {
    TrackingEvent {
        id: next_id(),
        title: title.to_string(),
        date: date(on),
        notes: String::new(),
        category,
        event_type,
        progress: None,
    }
}

/// An observed (`past`) event of the given type
pub fn observed(title: &str, on: &str, event_type: EventType) -> TrackingEvent {
    event(title, on, EventCategory::Past, Some(event_type))
}

/// A planned (`future`) event of the given type
pub fn planned(title: &str, on: &str, event_type: EventType) -> TrackingEvent {
    event(title, on, EventCategory::Future, Some(event_type))
}

/// An observed event without a type
pub fn untyped(title: &str, on: &str) -> TrackingEvent {
    event(title, on, EventCategory::Past, None)
}

/// Observed events of one type on each date, titled "<prefix> 1", "<prefix> 2", ...
pub fn series(event_type: EventType, prefix: &str, dates: &[&str]) -> Vec<TrackingEvent> {
    dates
        .iter()
        .enumerate()
        .map(|(i, on)| observed(&format!("{} {}", prefix, i + 1), on, event_type))
        .collect()
}
