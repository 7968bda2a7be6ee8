//! Trip-planning workflow models
//!
//! `TripSnapshot` is the orchestrator-owned merge of the four backends'
//! signals for one request; `TripAnalysis` is the recommendation engine's
//! output. Both are request-scoped and never persisted.

use serde::{Deserialize, Serialize};

use super::{AirQualitySample, AlertPriority, AlertRecord, TrafficState, UrbanEvent};

fn default_preferred_modes() -> Vec<String> {
    vec!["metro".to_string(), "bus".to_string()]
}

/// Inbound trip-planning request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanTripRequest {
    /// Departure zone identifier
    pub departure_zone: String,
    /// Arrival zone identifier
    pub arrival_zone: String,
    /// Requested departure time, "HH:MM"
    pub departure_time: String,
    /// Preferred transport modes, matched as case-insensitive substrings
    /// against line names
    #[serde(default = "default_preferred_modes")]
    pub preferred_modes: Vec<String>,
}

/// A transport option retained for the caller: a preferred-mode line joined
/// with its availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportOption {
    /// Line identifier/name
    pub line: String,
    /// Transport mode (leading word of the line name)
    pub mode: String,
    /// Current traffic state
    pub traffic_state: TrafficState,
    /// Availability, e.g. "85%", or "Unknown" when no rate matched
    pub availability: String,
    /// Upcoming passage times (HH:MM)
    pub upcoming_passages: Vec<String>,
}

/// All signals gathered for one trip request, merged across the four
/// backends for the departure/arrival zone pair.
///
/// Built exactly once per request and immutable once assembled; the
/// recommendation engine only reads it.
#[derive(Debug, Clone)]
pub struct TripSnapshot {
    pub departure_zone: String,
    pub arrival_zone: String,
    /// Requested departure time, "HH:MM"
    pub requested_time: String,
    pub departure_air: AirQualitySample,
    pub arrival_air: AirQualitySample,
    /// Preferred-mode lines, in backend order
    pub transports: Vec<TransportOption>,
    /// Active alerts for both zones, departure first, in backend order
    pub alerts: Vec<AlertRecord>,
    /// Active events for both zones, departure first, in backend order
    pub events: Vec<UrbanEvent>,
    /// One warning per degraded backend
    pub warnings: Vec<String>,
}

/// Air quality view for one endpoint of the trip: the sample plus the
/// breakpoint-keyed advisory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualityReport {
    pub zone: String,
    pub aqi: u16,
    pub category: String,
    pub description: String,
    pub timestamp: String,
    pub advisory: String,
}

/// Kind of a route recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Direct,
    Alternative,
    Eco,
    Fast,
}

/// A recommended route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRecommendation {
    pub kind: RouteKind,
    pub description: String,
    pub reasoning: String,
    /// Suggested line names; falls back to walking/bike-share when no line
    /// qualifies
    pub suggested_lines: Vec<String>,
    pub estimated_duration: String,
}

/// Four-bucket comfort category derived from the comfort score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComfortLevel {
    Excellent,
    Good,
    Moderate,
    Difficult,
}

impl std::fmt::Display for ComfortLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ComfortLevel::Excellent => "excellent",
            ComfortLevel::Good => "good",
            ComfortLevel::Moderate => "moderate",
            ComfortLevel::Difficult => "difficult",
        };
        f.write_str(s)
    }
}

/// Complete trip analysis returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripAnalysis {
    pub departure_zone: String,
    pub arrival_zone: String,
    pub requested_time: String,

    pub departure_air: AirQualityReport,
    pub arrival_air: AirQualityReport,
    pub air_comparison: String,

    pub transport_options: Vec<TransportOption>,

    pub active_alerts: Vec<AlertRecord>,
    pub global_alert_level: AlertPriority,

    pub impacting_events: Vec<UrbanEvent>,

    pub primary_recommendation: RouteRecommendation,
    pub alternative_recommendations: Vec<RouteRecommendation>,

    pub advisory: String,
    pub comfort_score: f64,
    pub comfort_level: ComfortLevel,
    pub timestamp: String,
}

/// Top-level trip-planning response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlanResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<TripAnalysis>,
    pub warnings: Vec<String>,
    pub elapsed_ms: f64,
}

impl TripPlanResult {
    /// A failed top-level response (invalid request or internal fault).
    /// Backend degradation never produces one of these.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            analysis: None,
            warnings: Vec::new(),
            elapsed_ms: 0.0,
        }
    }
}
