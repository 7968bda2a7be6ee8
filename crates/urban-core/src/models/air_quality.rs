//! Air quality models

use serde::{Deserialize, Serialize};

/// A zone-scoped air quality reading, produced by the air quality backend.
///
/// Immutable snapshot; the orchestrator only reads it. AQI is the standard
/// 0-500 index, higher is worse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualitySample {
    /// Zone the reading was taken in
    pub zone: String,
    /// Air Quality Index (0-500)
    pub aqi: u16,
    /// Category label as reported by the backend
    pub category: String,
    /// Free-text description
    pub description: String,
    /// When the reading was taken (RFC 3339)
    pub timestamp: String,
}

impl AirQualitySample {
    /// Fallback sample substituted when the air quality backend is degraded.
    pub fn unavailable(zone: &str, timestamp: String) -> Self {
        Self {
            zone: zone.to_string(),
            aqi: 0,
            category: "Unknown".to_string(),
            description: "N/A".to_string(),
            timestamp,
        }
    }
}
