//! Prediction Engine - forecasts the next occurrence of each event type

use std::collections::BTreeMap;

use chrono::Days;

use crate::error::Result;
use crate::events::EventSource;
use crate::models::{EventType, Prediction, TrackingEvent};

use super::config::PredictionConfig;
use super::stats::IntervalStats;

/// Turns a module's event history into forward-looking predictions
///
/// Holds only configuration, checked once at construction. Every call
/// recomputes from the events given, so one engine can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct PredictionEngine {
    config: PredictionConfig,
}

impl PredictionEngine {
    /// Build an engine, rejecting configs the scorer cannot honor
    pub fn new(config: PredictionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PredictionConfig {
        &self.config
    }

    /// Generate predictions for one module's events
    ///
    /// Never fails: empty, future-only or untyped input yields an empty list.
    /// Output is ordered by confidence (highest first), then predicted date.
    pub fn generate(&self, events: &[TrackingEvent], module: &str) -> Vec<Prediction> {
        let mut groups: BTreeMap<EventType, Vec<&TrackingEvent>> = BTreeMap::new();
        let mut untyped = 0usize;

        for event in events.iter().filter(|e| e.category.is_observed()) {
            match event.event_type {
                Some(t) => groups.entry(t).or_default().push(event),
                None => untyped += 1,
            }
        }

        if untyped > 0 {
            tracing::debug!(module, untyped, "Ignoring untyped events");
        }

        let mut predictions: Vec<Prediction> = groups
            .into_iter()
            .filter_map(|(event_type, group)| self.predict_group(event_type, group, module))
            .collect();

        predictions.sort_by(|a, b| {
            b.confidence
                .cmp(&a.confidence)
                .then_with(|| a.predicted_date.cmp(&b.predicted_date))
                .then_with(|| a.event_type.cmp(&b.event_type))
        });

        tracing::debug!(
            module,
            input = events.len(),
            count = predictions.len(),
            "Prediction generation complete"
        );

        predictions
    }

    fn predict_group(
        &self,
        event_type: EventType,
        mut group: Vec<&TrackingEvent>,
        module: &str,
    ) -> Option<Prediction> {
        if group.len() < self.config.min_events {
            tracing::debug!(
                module,
                event_type = event_type.as_str(),
                count = group.len(),
                "Not enough observed events for a pattern"
            );
            return None;
        }

        // Title and id break date ties so the order never depends on input order
        group.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.title.cmp(&b.title))
                .then_with(|| a.id.cmp(&b.id))
        });

        let dates: Vec<_> = group.iter().map(|e| e.date).collect();
        let stats = IntervalStats::from_sorted_dates(&dates)?;
        let last = *dates.last()?;

        let step = (stats.mean.round() as i64).max(self.config.min_interval_days);
        let Some(predicted_date) = last.checked_add_days(Days::new(step as u64)) else {
            tracing::debug!(
                module,
                event_type = event_type.as_str(),
                "Predicted date out of range"
            );
            return None;
        };

        let confidence = self.score(stats.sample_count(), stats.coefficient_of_variation);

        tracing::debug!(
            module,
            event_type = event_type.as_str(),
            samples = stats.sample_count(),
            mean_interval = stats.mean,
            cov = stats.coefficient_of_variation,
            confidence,
            "Pattern detected"
        );

        Some(Prediction {
            title: format!("Next {}", event_type.noun()),
            description: describe(event_type, module, stats.sample_count(), step, predicted_date),
            predicted_date,
            confidence,
            based_on: group.iter().map(|e| e.title.clone()).collect(),
            event_type,
            interval_days: stats.mean,
        })
    }

    /// Blend sample sufficiency and interval regularity into a clamped score
    fn score(&self, samples: usize, coefficient_of_variation: f64) -> u8 {
        let saturation = self.config.sample_saturation.saturating_sub(1).max(1) as f64;
        let sample_score = ((samples.saturating_sub(1)) as f64 / saturation).min(1.0);
        let regularity_score = (1.0 - coefficient_of_variation).clamp(0.0, 1.0);

        let total_weight = self.config.sample_weight + self.config.regularity_weight;
        let blended = (self.config.sample_weight * sample_score
            + self.config.regularity_weight * regularity_score)
            / total_weight;

        let raw = (100.0 * blended).round() as i64;
        raw.clamp(
            self.config.confidence_floor as i64,
            self.config.confidence_ceiling as i64,
        ) as u8
    }
}

fn describe(
    event_type: EventType,
    module: &str,
    samples: usize,
    step_days: i64,
    predicted_date: chrono::NaiveDate,
) -> String {
    let cadence = if step_days == 1 {
        "every day".to_string()
    } else {
        format!("every {} days", step_days)
    };

    format!(
        "Based on {} prior {} entries in {}, roughly {}. Next expected around {}.",
        samples,
        event_type.as_str(),
        module,
        cadence,
        predicted_date.format("%Y-%m-%d")
    )
}

/// Generate predictions with the default configuration
pub fn generate_predictions(events: &[TrackingEvent], module: &str) -> Vec<Prediction> {
    PredictionEngine::default().generate(events, module)
}

/// Read a module's events from a source and run the engine over them
pub fn predict_module<S: EventSource + ?Sized>(
    source: &S,
    module: &str,
    config: &PredictionConfig,
) -> Result<Vec<Prediction>> {
    let events = source.list(module)?;
    Ok(PredictionEngine::new(config.clone())?.generate(&events, module))
}
