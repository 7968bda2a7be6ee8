//! Urban event models

use serde::{Deserialize, Serialize};

/// A named geographic subdivision of the city.
///
/// Zones are the shared reference key across all four backends; the
/// orchestrator passes them by identifier only and never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Lifecycle status of an urban event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Pending,
    InProgress,
    Resolved,
    Cancelled,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventStatus::Pending => "PENDING",
            EventStatus::InProgress => "IN_PROGRESS",
            EventStatus::Resolved => "RESOLVED",
            EventStatus::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// A city event (roadworks, demonstration, festival) that can impact mobility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrbanEvent {
    /// Unique event identifier
    pub event_id: String,
    /// Event name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Priority label as declared by the events backend
    pub priority: String,
    /// Lifecycle status
    pub status: EventStatus,
    /// Zone display name, "N/A" when the backend omitted it
    pub zone: String,
    /// Event date as reported by the backend
    pub date: String,
}
