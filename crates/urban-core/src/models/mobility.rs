//! Mobility models (traffic lines and vehicle availability)

use serde::{Deserialize, Serialize};

/// Traffic state of a transit line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficState {
    #[default]
    Normal,
    Slowed,
    Disrupted,
    Interrupted,
}

impl TrafficState {
    /// Whether the line is effectively unusable for routing purposes.
    pub fn is_degraded(&self) -> bool {
        matches!(self, TrafficState::Disrupted | TrafficState::Interrupted)
    }

    /// Decode a wire value from the mobility backend.
    ///
    /// The legacy service reports states in French; both spellings are
    /// accepted alongside the canonical names.
    pub fn parse_wire(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(TrafficState::Normal),
            "slowed" | "ralenti" => Some(TrafficState::Slowed),
            "disrupted" | "perturbé" | "perturbe" => Some(TrafficState::Disrupted),
            "interrupted" | "interrompu" => Some(TrafficState::Interrupted),
            _ => None,
        }
    }
}

impl std::fmt::Display for TrafficState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TrafficState::Normal => "normal",
            TrafficState::Slowed => "slowed",
            TrafficState::Disrupted => "disrupted",
            TrafficState::Interrupted => "interrupted",
        };
        f.write_str(s)
    }
}

/// A transit line and its current traffic state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficLine {
    /// Line identifier/name (e.g., "Metro Line 1")
    pub line: String,
    /// Current traffic state
    pub state: TrafficState,
    /// Upcoming passage times (HH:MM), possibly empty
    #[serde(default)]
    pub upcoming_passages: Vec<String>,
}

impl TrafficLine {
    /// Transport mode of this line, derived from the leading word of its
    /// name ("Metro Line 1" -> "Metro").
    pub fn mode(&self) -> &str {
        self.line.split_whitespace().next().unwrap_or(&self.line)
    }
}

/// Availability rate for one transport mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleAvailability {
    /// Transport mode (e.g., "metro", "bus")
    pub mode: String,
    /// Availability rate in percent (0-100)
    pub availability_rate: f64,
}
