//! Event history models

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One timestamped, categorized record in the event history.
///
/// Serialized as `{time, type, message}` so the browser dashboard can read
/// the persisted array directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "time")]
    pub timestamp: String,
    #[serde(rename = "type")]
    pub category: String,
    pub message: String,
}

impl HistoryEntry {
    pub fn new(
        timestamp: impl Into<String>,
        category: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            category: category.into(),
            message: message.into(),
        }
    }

    /// The known category of this entry, if it is one
    pub fn known_category(&self) -> Option<EventCategory> {
        self.category.parse().ok()
    }

    /// Header line shown above the message, e.g. `[sos] 1/12/2026, 1:35:43 PM`
    pub fn headline(&self) -> String {
        format!("[{}] {}", self.category, self.timestamp)
    }
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.headline(), self.message)
    }
}

/// Categories the front-end records. Entries may carry other free-form tags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Weather,
    System,
    Ai,
    Route,
    Report,
    Sos,
    News,
    Feedback,
    MapClick,
}

impl EventCategory {
    pub const ALL: [EventCategory; 9] = [
        EventCategory::Weather,
        EventCategory::System,
        EventCategory::Ai,
        EventCategory::Route,
        EventCategory::Report,
        EventCategory::Sos,
        EventCategory::News,
        EventCategory::Feedback,
        EventCategory::MapClick,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Weather => "weather",
            EventCategory::System => "system",
            EventCategory::Ai => "ai",
            EventCategory::Route => "route",
            EventCategory::Report => "report",
            EventCategory::Sos => "sos",
            EventCategory::News => "news",
            EventCategory::Feedback => "feedback",
            EventCategory::MapClick => "map_click",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a tag is not one of the known categories
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown event category: {0}")]
pub struct UnknownCategory(pub String);

impl std::str::FromStr for EventCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl From<EventCategory> for String {
    fn from(category: EventCategory) -> Self {
        category.as_str().to_string()
    }
}
