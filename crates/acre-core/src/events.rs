//! Event log contract and in-memory store
//!
//! The prediction engine only ever reads through [`EventSource`]. Writers go
//! through [`EventLog`], which validates new events and assigns their ids.
//! Both the SQLite [`Database`](crate::db::Database) and [`MemoryEventLog`]
//! implement the pair.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::error::{Error, Result};
use crate::models::{NewTrackingEvent, TrackingEvent};

/// Read access to per-module tracking events
///
/// Events come back in no guaranteed order.
pub trait EventSource {
    fn list(&self, module: &str) -> Result<Vec<TrackingEvent>>;
}

/// Append/remove access to per-module tracking events
pub trait EventLog: EventSource {
    /// Validate and store a new event, returning it with its assigned id
    fn add(&self, module: &str, event: NewTrackingEvent) -> Result<TrackingEvent>;

    /// Remove an event by id; returns false if no such event exists
    fn remove(&self, module: &str, id: &str) -> Result<bool>;
}

/// Event log held in process memory
#[derive(Debug, Default)]
pub struct MemoryEventLog {
    modules: RwLock<HashMap<String, Vec<TrackingEvent>>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a module with already-built events (fixtures, imports)
    ///
    /// Events are normalized like any other write. Repeated ids are rejected.
    pub fn with_events(module: &str, events: Vec<TrackingEvent>) -> Result<Self> {
        let mut seen = HashSet::new();
        let events = events
            .into_iter()
            .map(|event| {
                if !seen.insert(event.id.clone()) {
                    return Err(Error::InvalidData(format!(
                        "Duplicate event id in {}: {}",
                        module, event.id
                    )));
                }
                event.normalized()
            })
            .collect::<Result<Vec<_>>>()?;

        let log = Self::new();
        log.modules
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(module.to_string(), events);
        Ok(log)
    }

    /// Module names with at least one event, sorted
    pub fn modules(&self) -> Vec<String> {
        let modules = self.modules.read().unwrap_or_else(|e| e.into_inner());
        let mut names: Vec<String> = modules
            .iter()
            .filter(|(_, events)| !events.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }
}

impl EventSource for MemoryEventLog {
    fn list(&self, module: &str) -> Result<Vec<TrackingEvent>> {
        let modules = self.modules.read().unwrap_or_else(|e| e.into_inner());
        Ok(modules.get(module).cloned().unwrap_or_default())
    }
}

impl EventLog for MemoryEventLog {
    fn add(&self, module: &str, event: NewTrackingEvent) -> Result<TrackingEvent> {
        let event = event.into_event()?;
        self.modules
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(module.to_string())
            .or_default()
            .push(event.clone());
        Ok(event)
    }

    fn remove(&self, module: &str, id: &str) -> Result<bool> {
        let mut modules = self.modules.write().unwrap_or_else(|e| e.into_inner());
        let Some(events) = modules.get_mut(module) else {
            return Ok(false);
        };
        let before = events.len();
        events.retain(|e| e.id != id);
        Ok(events.len() != before)
    }
}
