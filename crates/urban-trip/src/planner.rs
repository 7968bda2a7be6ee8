//! Trip-planning orchestrator
//!
//! Sequences validation, parallel collection, aggregation, and the
//! recommendation engine for one request, then composes the final result
//! with accumulated warnings and the measured wall-clock duration.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveTime;
use thiserror::Error;
use tracing::{info, instrument};

use urban_core::backend;
use urban_core::{
    AirQualityPort, EmergencyPort, MobilityPort, PlanTripRequest, TripPlanResult,
    UrbanEventsPort,
};

use crate::aggregate::build_snapshot;
use crate::collector::collect_signals;
use crate::recommend::analyze;

/// Orchestrator-level failure. Backend degradation is absorbed into
/// warnings and never produces one of these.
#[derive(Debug, Error)]
pub enum TripError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Aggregate health of the four backends.
#[derive(Debug, Clone)]
pub struct BackendHealth {
    /// `true` only when every backend probe succeeded
    pub healthy: bool,
    /// Per-backend probe outcome, keyed by backend name
    pub services: BTreeMap<String, bool>,
}

impl BackendHealth {
    pub fn status(&self) -> &'static str {
        if self.healthy {
            "healthy"
        } else {
            "degraded"
        }
    }
}

/// The trip-planning orchestrator. Holds one handle per backend port;
/// cheap to clone and safe to share across concurrent requests.
#[derive(Clone)]
pub struct TripPlanner {
    mobility: Arc<dyn MobilityPort>,
    air_quality: Arc<dyn AirQualityPort>,
    emergency: Arc<dyn EmergencyPort>,
    urban_events: Arc<dyn UrbanEventsPort>,
}

impl TripPlanner {
    pub fn new(
        mobility: Arc<dyn MobilityPort>,
        air_quality: Arc<dyn AirQualityPort>,
        emergency: Arc<dyn EmergencyPort>,
        urban_events: Arc<dyn UrbanEventsPort>,
    ) -> Self {
        Self {
            mobility,
            air_quality,
            emergency,
            urban_events,
        }
    }

    fn validate(request: &PlanTripRequest) -> Result<(), TripError> {
        if request.departure_zone.trim().is_empty() {
            return Err(TripError::InvalidRequest(
                "departure_zone must not be empty".to_string(),
            ));
        }
        if request.arrival_zone.trim().is_empty() {
            return Err(TripError::InvalidRequest(
                "arrival_zone must not be empty".to_string(),
            ));
        }
        if NaiveTime::parse_from_str(&request.departure_time, "%H:%M").is_err() {
            return Err(TripError::InvalidRequest(format!(
                "departure_time '{}' is not a valid HH:MM time",
                request.departure_time
            )));
        }
        Ok(())
    }

    /// Plan a trip: collect signals from all four backends concurrently,
    /// aggregate them, and derive the recommendation.
    ///
    /// The whole pipeline runs on the caller's task, so dropping the
    /// returned future cancels every in-flight backend call.
    #[instrument(skip(self, request), fields(
        departure = %request.departure_zone,
        arrival = %request.arrival_zone,
    ))]
    pub async fn plan_trip(&self, request: &PlanTripRequest) -> Result<TripPlanResult, TripError> {
        Self::validate(request)?;

        let started = Instant::now();

        let signals = collect_signals(
            self.mobility.as_ref(),
            self.air_quality.as_ref(),
            self.emergency.as_ref(),
            self.urban_events.as_ref(),
            &request.departure_zone,
            &request.arrival_zone,
        )
        .await;

        let snapshot = build_snapshot(request, signals);
        let warnings = snapshot.warnings.clone();
        let analysis = analyze(&snapshot);

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        info!(
            elapsed_ms,
            warnings = warnings.len(),
            comfort = %analysis.comfort_level,
            "trip analysis complete"
        );

        Ok(TripPlanResult {
            success: true,
            message: "Trip analysis generated successfully".to_string(),
            analysis: Some(analysis),
            warnings,
            elapsed_ms,
        })
    }

    /// Probe all four backends concurrently.
    pub async fn check_all_backends(&self) -> BackendHealth {
        let (mobility, air_quality, emergency, urban_events) = tokio::join!(
            self.mobility.health_check(),
            self.air_quality.health_check(),
            self.emergency.health_check(),
            self.urban_events.health_check(),
        );

        let services: BTreeMap<String, bool> = [
            (backend::MOBILITY, mobility),
            (backend::AIR_QUALITY, air_quality),
            (backend::EMERGENCY, emergency),
            (backend::URBAN_EVENTS, urban_events),
        ]
        .into_iter()
        .map(|(name, up)| (name.to_string(), up))
        .collect();

        BackendHealth {
            healthy: services.values().all(|&up| up),
            services,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request(departure: &str, arrival: &str, time: &str) -> PlanTripRequest {
        PlanTripRequest {
            departure_zone: departure.to_string(),
            arrival_zone: arrival.to_string(),
            departure_time: time.to_string(),
            preferred_modes: vec!["metro".to_string()],
        }
    }

    #[test]
    fn validation_rejects_empty_zones() {
        let err = TripPlanner::validate(&request("", "industrial", "14:30")).unwrap_err();
        assert!(matches!(err, TripError::InvalidRequest(_)));
        assert_eq!(err.to_string(), "Invalid request: departure_zone must not be empty");

        let err = TripPlanner::validate(&request("downtown", "  ", "14:30")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid request: arrival_zone must not be empty");
    }

    #[test]
    fn validation_rejects_malformed_times() {
        for bad in ["25:00", "14h30", "", "9:99", "noon"] {
            assert!(
                TripPlanner::validate(&request("downtown", "industrial", bad)).is_err(),
                "accepted '{}'",
                bad
            );
        }
        assert!(TripPlanner::validate(&request("downtown", "industrial", "09:05")).is_ok());
        assert!(TripPlanner::validate(&request("downtown", "industrial", "23:59")).is_ok());
    }
}
