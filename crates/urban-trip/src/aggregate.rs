//! Signal aggregator - pure merge of collected signals into a `TripSnapshot`
//!
//! Traffic lines are filtered to the caller's preferred transport modes
//! (case-insensitive substring match on the line name) and joined with the
//! matching availability rate. Alert and event lists arrive already merged
//! in backend order and pass through untouched.

use chrono::NaiveTime;

use urban_core::{PlanTripRequest, TransportOption, TripSnapshot};

use crate::collector::CollectedSignals;

/// Build the immutable per-request snapshot from collected signals.
pub fn build_snapshot(request: &PlanTripRequest, signals: CollectedSignals) -> TripSnapshot {
    let preferred: Vec<String> = request
        .preferred_modes
        .iter()
        .map(|m| m.to_lowercase())
        .collect();

    let transports = signals
        .traffic
        .into_iter()
        .filter(|line| {
            let name = line.line.to_lowercase();
            preferred.iter().any(|mode| name.contains(mode))
        })
        .map(|line| {
            let name = line.line.to_lowercase();
            let availability = signals
                .availability
                .iter()
                .find(|v| name.contains(&v.mode.to_lowercase()))
                .map(|v| format!("{}%", v.availability_rate))
                .unwrap_or_else(|| "Unknown".to_string());

            let upcoming_passages = if line.upcoming_passages.is_empty() {
                default_passages(&request.departure_time)
            } else {
                line.upcoming_passages.clone()
            };

            TransportOption {
                mode: line.mode().to_string(),
                line: line.line,
                traffic_state: line.state,
                availability,
                upcoming_passages,
            }
        })
        .collect();

    TripSnapshot {
        departure_zone: request.departure_zone.clone(),
        arrival_zone: request.arrival_zone.clone(),
        requested_time: request.departure_time.clone(),
        departure_air: signals.departure_air,
        arrival_air: signals.arrival_air,
        transports,
        alerts: signals.alerts,
        events: signals.events,
        warnings: signals.warnings,
    }
}

/// Passage times substituted when the backend supplies none: the requested
/// departure plus two quarter-hour slots.
fn default_passages(requested_time: &str) -> Vec<String> {
    match NaiveTime::parse_from_str(requested_time, "%H:%M") {
        Ok(t) => [0i64, 15, 30]
            .iter()
            .map(|&m| {
                t.overflowing_add_signed(chrono::Duration::minutes(m))
                    .0
                    .format("%H:%M")
                    .to_string()
            })
            .collect(),
        Err(_) => vec![requested_time.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use urban_core::{
        AirQualitySample, TrafficLine, TrafficState, VehicleAvailability,
    };

    fn request() -> PlanTripRequest {
        PlanTripRequest {
            departure_zone: "downtown".into(),
            arrival_zone: "industrial".into(),
            departure_time: "14:30".into(),
            preferred_modes: vec!["metro".into(), "bus".into()],
        }
    }

    fn signals() -> CollectedSignals {
        CollectedSignals {
            departure_air: AirQualitySample::unavailable("downtown", "t0".into()),
            arrival_air: AirQualitySample::unavailable("industrial", "t0".into()),
            traffic: vec![
                TrafficLine {
                    line: "Metro Line 1".into(),
                    state: TrafficState::Normal,
                    upcoming_passages: vec![],
                },
                TrafficLine {
                    line: "Bus 42".into(),
                    state: TrafficState::Disrupted,
                    upcoming_passages: vec!["14:40".into()],
                },
                TrafficLine {
                    line: "Tramway T3".into(),
                    state: TrafficState::Normal,
                    upcoming_passages: vec![],
                },
            ],
            availability: vec![VehicleAvailability {
                mode: "metro".into(),
                availability_rate: 85.0,
            }],
            alerts: vec![],
            events: vec![],
            warnings: vec![],
        }
    }

    #[test]
    fn filters_lines_by_preferred_mode_substring() {
        let snapshot = build_snapshot(&request(), signals());
        let lines: Vec<&str> = snapshot.transports.iter().map(|t| t.line.as_str()).collect();
        assert_eq!(lines, vec!["Metro Line 1", "Bus 42"]);
    }

    #[test]
    fn availability_joins_by_mode_substring() {
        let snapshot = build_snapshot(&request(), signals());
        assert_eq!(snapshot.transports[0].availability, "85%");
        assert_eq!(snapshot.transports[1].availability, "Unknown");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let mut req = request();
        req.preferred_modes = vec!["METRO".into()];
        let snapshot = build_snapshot(&req, signals());
        assert_eq!(snapshot.transports.len(), 1);
        assert_eq!(snapshot.transports[0].mode, "Metro");
    }

    #[test]
    fn missing_passages_derive_from_requested_time() {
        let snapshot = build_snapshot(&request(), signals());
        assert_eq!(
            snapshot.transports[0].upcoming_passages,
            vec!["14:30", "14:45", "15:00"]
        );
        // Backend-supplied times pass through
        assert_eq!(snapshot.transports[1].upcoming_passages, vec!["14:40"]);
    }

    #[test]
    fn derived_passages_wrap_past_midnight() {
        assert_eq!(default_passages("23:50"), vec!["23:50", "00:05", "00:20"]);
    }
}
