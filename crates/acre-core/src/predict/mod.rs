//! Predictive Insights - recurrence detection and next-occurrence forecasts
//!
//! Given the tracking events logged for a module, the engine groups observed
//! (`past`/`present`) events by type, measures the day gaps between them and
//! extrapolates the next expected date for each type. Each prediction carries
//! a confidence score and the titles of the events it was derived from.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use acre_core::predict::{generate_predictions, predict_module, PredictionConfig};
//!
//! let predictions = generate_predictions(&events, "Beginning Farming");
//! let predictions = predict_module(&db, "Beginning Farming", &PredictionConfig::default())?;
//! ```

pub mod config;
pub mod engine;
pub mod stats;

pub use config::{default_config_path, PredictionConfig};
pub use engine::{generate_predictions, predict_module, PredictionEngine};
pub use stats::IntervalStats;
