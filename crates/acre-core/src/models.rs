//! Domain models for Acre

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Temporal bucket the user placed an event in
///
/// Independent of the event's actual date relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Past,
    #[default]
    Present,
    Future,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Past => "past",
            Self::Present => "present",
            Self::Future => "future",
        }
    }

    /// Whether events in this bucket describe observed behavior
    ///
    /// Future entries are plans and never count as evidence of a pattern.
    pub fn is_observed(&self) -> bool {
        matches!(self, Self::Past | Self::Present)
    }
}

impl std::str::FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "past" => Ok(Self::Past),
            "present" => Ok(Self::Present),
            "future" => Ok(Self::Future),
            _ => Err(format!("Unknown event category: {}", s)),
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of tracking entry
///
/// Ordering is used to give grouped output a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Activity,
    Learning,
    Goal,
    Note,
    Milestone,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Learning => "learning",
            Self::Goal => "goal",
            Self::Note => "note",
            Self::Milestone => "milestone",
        }
    }

    /// Noun used when describing the next occurrence of this type
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Learning => "learning session",
            Self::Goal => "goal check-in",
            Self::Note => "note",
            Self::Milestone => "milestone",
        }
    }

    /// Only learning and goal entries carry a progress percentage
    pub fn tracks_progress(&self) -> bool {
        matches!(self, Self::Learning | Self::Goal)
    }

    pub fn all() -> &'static [EventType] {
        &[
            Self::Activity,
            Self::Learning,
            Self::Goal,
            Self::Note,
            Self::Milestone,
        ]
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "activity" => Ok(Self::Activity),
            "learning" => Ok(Self::Learning),
            "goal" => Ok(Self::Goal),
            "note" => Ok(Self::Note),
            "milestone" => Ok(Self::Milestone),
            _ => Err(format!("Unknown event type: {}", s)),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One user-logged occurrence within a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    /// Opaque identifier, unique within a module
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    pub category: EventCategory,
    /// Absent for untyped entries
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    /// Percentage complete (learning and goal entries only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}

impl TrackingEvent {
    /// Apply the write-side rules every stored event must satisfy
    ///
    /// Rejects empty titles and progress above 100, trims the title and
    /// drops progress on types that do not track it.
    pub fn normalized(mut self) -> Result<Self> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::InvalidData(format!(
                "Event {} has an empty title",
                self.id
            )));
        }
        if let Some(p) = self.progress.filter(|p| *p > 100) {
            return Err(Error::InvalidData(format!(
                "Progress must be between 0 and 100, got {}",
                p
            )));
        }
        self.title = title.to_string();

        if self.progress.is_some() && !self.event_type.is_some_and(|t| t.tracks_progress()) {
            tracing::debug!(
                id = %self.id,
                event_type = ?self.event_type,
                "Dropping progress for event type without progress tracking"
            );
            self.progress = None;
        }

        Ok(self)
    }
}

/// Input for creating a tracking event through the event log
#[derive(Debug, Clone)]
pub struct NewTrackingEvent {
    pub title: String,
    pub date: NaiveDate,
    pub notes: String,
    pub category: EventCategory,
    pub event_type: Option<EventType>,
    pub progress: Option<u8>,
}

impl NewTrackingEvent {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            date,
            notes: String::new(),
            category: EventCategory::default(),
            event_type: None,
            progress: None,
        }
    }

    pub fn with_category(mut self, category: EventCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_type(mut self, event_type: EventType) -> Self {
        self.event_type = Some(event_type);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Validate and turn into a stored event with a fresh id
    pub fn into_event(self) -> Result<TrackingEvent> {
        TrackingEvent {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            date: self.date,
            notes: self.notes,
            category: self.category,
            event_type: self.event_type,
            progress: self.progress,
        }
        .normalized()
    }
}

/// Per-module overview of the event log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSummary {
    pub name: String,
    pub event_count: i64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// One forecast record produced by the prediction engine
///
/// Output only. Recomputed on every call and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub title: String,
    pub description: String,
    pub predicted_date: NaiveDate,
    /// Score in [0, 100]; sample sufficiency blended with interval regularity
    pub confidence: u8,
    /// Titles of the evidence events, oldest first
    pub based_on: Vec<String>,
    /// Event type the forecast was derived from
    pub event_type: EventType,
    /// Mean gap between the evidence events, in days
    pub interval_days: f64,
}

impl Prediction {
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }
}

/// Display tier for a confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    /// Above 70
    High,
    /// Above 40
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: u8) -> Self {
        if confidence > 70 {
            Self::High
        } else if confidence > 40 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
