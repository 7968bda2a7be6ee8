//! Recommendation engine - pure `TripSnapshot -> TripAnalysis` function
//!
//! Total over any well-formed snapshot: every input has a fallback, so the
//! analysis never fails. Determinism is the contract here; the only
//! non-reproducible field is the output timestamp.

use chrono::Utc;

use urban_core::{
    AirQualityReport, AirQualitySample, AlertPriority, AlertRecord, ComfortLevel,
    RouteKind, RouteRecommendation, TripAnalysis, TripSnapshot,
};

/// Substituted when no retained line qualifies for a recommendation.
const FALLBACK_LINES: [&str; 2] = ["walking", "bike-share"];

/// AQI category label from the fixed breakpoint table.
pub fn aqi_category(aqi: u16) -> &'static str {
    match aqi {
        0..=50 => "Good",
        51..=100 => "Moderate",
        101..=150 => "Unhealthy for Sensitive Groups",
        151..=200 => "Unhealthy",
        201..=300 => "Very Unhealthy",
        _ => "Hazardous",
    }
}

/// Advisory sentence keyed off the same breakpoints as [`aqi_category`].
pub fn aqi_advisory(aqi: u16) -> &'static str {
    match aqi {
        0..=50 => "Air quality is good. Ideal conditions for outdoor travel.",
        51..=100 => "Air quality is acceptable for most travelers.",
        101..=150 => "Sensitive groups should limit prolonged outdoor exposure.",
        151..=200 => "Everyone may experience effects. Prefer enclosed transport.",
        201..=300 => "Health alert. Avoid outdoor activity along this route.",
        _ => "Hazardous air. Postpone the trip if at all possible.",
    }
}

/// Maximum priority across the merged alerts; LOW when none exist.
pub fn global_alert_level(alerts: &[AlertRecord]) -> AlertPriority {
    alerts
        .iter()
        .map(|a| a.priority)
        .max()
        .unwrap_or(AlertPriority::Low)
}

/// Comfort bucket from the (unclamped) comfort score.
pub fn comfort_level(score: f64) -> ComfortLevel {
    if score >= 80.0 {
        ComfortLevel::Excellent
    } else if score >= 60.0 {
        ComfortLevel::Good
    } else if score >= 40.0 {
        ComfortLevel::Moderate
    } else {
        ComfortLevel::Difficult
    }
}

fn comfort_advisory(level: ComfortLevel) -> &'static str {
    match level {
        ComfortLevel::Excellent => "Excellent conditions for your trip. Safe travels!",
        ComfortLevel::Good => "Good conditions for your trip. Enjoy the ride!",
        ComfortLevel::Moderate => "Acceptable conditions, but stay alert for disruptions.",
        ComfortLevel::Difficult => {
            "Difficult conditions. Consider postponing your trip if possible."
        }
    }
}

fn air_report(sample: &AirQualitySample) -> AirQualityReport {
    AirQualityReport {
        zone: sample.zone.clone(),
        aqi: sample.aqi,
        // The backend's own label survives here so a degraded sample keeps
        // reading "Unknown"; the breakpoint table only keys the advisory.
        category: sample.category.clone(),
        description: sample.description.clone(),
        timestamp: sample.timestamp.clone(),
        advisory: aqi_advisory(sample.aqi).to_string(),
    }
}

fn air_comparison(departure: &AirQualitySample, arrival: &AirQualitySample) -> String {
    let diff = i32::from(departure.aqi) - i32::from(arrival.aqi);
    if diff < 0 {
        format!(
            "Warning: air quality degrades toward {} (difference: {} AQI points)",
            arrival.zone,
            diff.abs()
        )
    } else if diff > 0 {
        format!(
            "Good news: air quality improves toward {} (difference: {} AQI points)",
            arrival.zone, diff
        )
    } else {
        "Air quality is similar in both zones".to_string()
    }
}

fn primary_recommendation(snapshot: &TripSnapshot, alert_level: AlertPriority) -> RouteRecommendation {
    let mut reasons = Vec::new();
    if snapshot.departure_air.aqi > 150 || snapshot.arrival_air.aqi > 150 {
        reasons.push("high pollution");
    }
    if alert_level >= AlertPriority::High {
        reasons.push("priority alerts");
    }
    if snapshot.transports.iter().any(|t| t.traffic_state.is_degraded()) {
        reasons.push("disrupted traffic");
    }

    let (kind, description, lines): (RouteKind, String, Vec<String>) = if reasons.is_empty() {
        let lines = snapshot
            .transports
            .iter()
            .take(2)
            .map(|t| t.line.clone())
            .collect();
        (
            RouteKind::Direct,
            "Direct route recommended - favorable conditions".to_string(),
            lines,
        )
    } else {
        let lines = snapshot
            .transports
            .iter()
            .filter(|t| !t.traffic_state.is_degraded())
            .take(2)
            .map(|t| t.line.clone())
            .collect();
        (
            RouteKind::Alternative,
            format!("Alternative route recommended due to: {}", reasons.join(", ")),
            lines,
        )
    };

    let suggested_lines = if lines.is_empty() {
        FALLBACK_LINES.iter().map(|s| s.to_string()).collect()
    } else {
        lines
    };

    let reasoning = if reasons.is_empty() {
        "no issues detected".to_string()
    } else {
        reasons.join(", ")
    };

    RouteRecommendation {
        kind,
        description,
        reasoning,
        suggested_lines,
        estimated_duration: "25-30 minutes".to_string(),
    }
}

fn alternative_recommendations() -> Vec<RouteRecommendation> {
    vec![
        RouteRecommendation {
            kind: RouteKind::Eco,
            description: "Eco-friendly route through low-pollution zones".to_string(),
            reasoning: "Minimizes pollution exposure".to_string(),
            suggested_lines: vec!["Express metro".to_string(), "Green tramway".to_string()],
            estimated_duration: "35-40 minutes".to_string(),
        },
        RouteRecommendation {
            kind: RouteKind::Fast,
            description: "Fastest route regardless of air quality".to_string(),
            reasoning: "Optimizes travel time".to_string(),
            suggested_lines: vec!["Express bus".to_string(), "Direct metro".to_string()],
            estimated_duration: "20-25 minutes".to_string(),
        },
    ]
}

/// Derive the full trip analysis from the snapshot.
pub fn analyze(snapshot: &TripSnapshot) -> TripAnalysis {
    let alert_level = global_alert_level(&snapshot.alerts);
    let primary = primary_recommendation(snapshot, alert_level);

    // Unclamped: heavy degradation may push the score negative, which
    // lands in the "difficult" bucket like any other sub-40 value.
    // Widen each reading before summing; the inputs are u16.
    let aqi_sum = f64::from(snapshot.departure_air.aqi) + f64::from(snapshot.arrival_air.aqi);
    let comfort_score = 100.0
        - aqi_sum / 10.0
        - 10.0 * snapshot.alerts.len() as f64
        - 5.0 * snapshot.events.len() as f64;
    let level = comfort_level(comfort_score);

    TripAnalysis {
        departure_zone: snapshot.departure_zone.clone(),
        arrival_zone: snapshot.arrival_zone.clone(),
        requested_time: snapshot.requested_time.clone(),
        departure_air: air_report(&snapshot.departure_air),
        arrival_air: air_report(&snapshot.arrival_air),
        air_comparison: air_comparison(&snapshot.departure_air, &snapshot.arrival_air),
        transport_options: snapshot.transports.clone(),
        active_alerts: snapshot.alerts.clone(),
        global_alert_level: alert_level,
        impacting_events: snapshot.events.clone(),
        primary_recommendation: primary,
        alternative_recommendations: alternative_recommendations(),
        advisory: comfort_advisory(level).to_string(),
        comfort_score,
        comfort_level: level,
        timestamp: Utc::now().to_rfc3339(),
    }
}
