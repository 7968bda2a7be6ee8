//! Parallel collector - concurrent fan-out to the four backends
//!
//! The eight calls for a departure/arrival pair (air quality x2, traffic,
//! availability, alerts x2, events x2) run concurrently and are joined as
//! one barrier; a single slow backend delays collection by at most its own
//! deadline. Every failure is absorbed into the documented fallback value
//! plus one warning per degraded backend - partial failure never aborts
//! the batch. Because the futures stay on the caller's task, dropping the
//! request cancels every in-flight backend call with it.

use chrono::Utc;
use tracing::warn;

use urban_core::{
    AirQualityPort, AirQualitySample, AlertRecord, EmergencyPort, MobilityPort, TrafficLine,
    UpstreamError, UrbanEvent, UrbanEventsPort, VehicleAvailability,
};

/// Raw signals gathered for one departure/arrival zone pair.
#[derive(Debug, Clone)]
pub struct CollectedSignals {
    pub departure_air: AirQualitySample,
    pub arrival_air: AirQualitySample,
    pub traffic: Vec<TrafficLine>,
    pub availability: Vec<VehicleAvailability>,
    /// Departure-zone alerts first, then arrival-zone, each in backend order
    pub alerts: Vec<AlertRecord>,
    /// Departure-zone events first, then arrival-zone, each in backend order
    pub events: Vec<UrbanEvent>,
    /// One warning per degraded backend
    pub warnings: Vec<String>,
}

/// Record a degraded backend: log it and append its warning string.
fn degrade(warnings: &mut Vec<String>, what: &str, err: &UpstreamError) {
    warn!(backend = err.backend(), error = %err, "backend degraded during collection");
    warnings.push(format!("{} unavailable ({})", what, err));
}

/// Fan out all backend calls for one trip request and join the results.
///
/// Never fails for backend reasons. Panics if called with an empty zone
/// identifier - the orchestrator validates the request first.
pub async fn collect_signals(
    mobility: &dyn MobilityPort,
    air_quality: &dyn AirQualityPort,
    emergency: &dyn EmergencyPort,
    urban_events: &dyn UrbanEventsPort,
    departure_zone: &str,
    arrival_zone: &str,
) -> CollectedSignals {
    assert!(
        !departure_zone.is_empty() && !arrival_zone.is_empty(),
        "collect_signals requires non-empty zone identifiers"
    );

    let (
        departure_air,
        arrival_air,
        traffic,
        availability,
        departure_alerts,
        arrival_alerts,
        departure_events,
        arrival_events,
    ) = tokio::join!(
        air_quality.get_air_quality(departure_zone),
        air_quality.get_air_quality(arrival_zone),
        mobility.get_traffic(),
        mobility.get_availability(),
        emergency.get_active_alerts(departure_zone),
        emergency.get_active_alerts(arrival_zone),
        urban_events.get_active_events(departure_zone),
        urban_events.get_active_events(arrival_zone),
    );

    let mut warnings = Vec::new();
    let now = Utc::now().to_rfc3339();

    // Air quality: failed zone lookups fall back to AQI 0 / "Unknown"
    if let Some(err) = departure_air.as_ref().err().or(arrival_air.as_ref().err()) {
        degrade(&mut warnings, "Air quality data", err);
    }
    let departure_air = departure_air
        .unwrap_or_else(|_| AirQualitySample::unavailable(departure_zone, now.clone()));
    let arrival_air =
        arrival_air.unwrap_or_else(|_| AirQualitySample::unavailable(arrival_zone, now.clone()));

    // Mobility: failed calls fall back to empty lists
    if let Some(err) = traffic.as_ref().err().or(availability.as_ref().err()) {
        degrade(&mut warnings, "Mobility data", err);
    }
    let traffic = traffic.unwrap_or_default();
    let availability = availability.unwrap_or_default();

    // Alerts: merged departure-then-arrival, failed side contributes nothing
    if let Some(err) = departure_alerts
        .as_ref()
        .err()
        .or(arrival_alerts.as_ref().err())
    {
        degrade(&mut warnings, "Emergency alert data", err);
    }
    let mut alerts = departure_alerts.unwrap_or_default();
    alerts.extend(arrival_alerts.unwrap_or_default());

    // Events: same merge policy as alerts
    if let Some(err) = departure_events
        .as_ref()
        .err()
        .or(arrival_events.as_ref().err())
    {
        degrade(&mut warnings, "Urban event data", err);
    }
    let mut events = departure_events.unwrap_or_default();
    events.extend(arrival_events.unwrap_or_default());

    CollectedSignals {
        departure_air,
        arrival_air,
        traffic,
        availability,
        alerts,
        events,
        warnings,
    }
}
