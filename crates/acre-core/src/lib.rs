//! Acre Core Library
//!
//! Shared functionality for the Acre farm activity tracker:
//! - Tracking event models and the per-module event log
//! - SQLite storage with optional encryption at rest
//! - Predictive insights engine (recurrence detection and forecasting)
//! - Prediction engine configuration
//! - Event import/export

pub mod db;
pub mod error;
pub mod events;
pub mod export;
pub mod models;
pub mod predict;

/// Test utilities including event fixture builders
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use db::Database;
pub use error::{Error, Result};
pub use events::{EventLog, EventSource, MemoryEventLog};
pub use export::{ExportFormat, ImportStats};
pub use models::{
    ConfidenceBand, EventCategory, EventType, NewTrackingEvent, Prediction, TrackingEvent,
};
pub use predict::{
    generate_predictions, predict_module, IntervalStats, PredictionConfig, PredictionEngine,
};
