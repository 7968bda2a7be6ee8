//! Shared data model for the urban gateway
//!
//! These are the normalized shapes the orchestrator consumes; the protocol
//! adapters in `urban-clients` translate each backend's native wire format
//! into them.

mod air_quality;
mod emergency;
mod events;
mod mobility;
mod trip;

pub use air_quality::AirQualitySample;
pub use emergency::{AlertPriority, AlertRecord};
pub use events::{EventStatus, UrbanEvent, Zone};
pub use mobility::{TrafficLine, TrafficState, VehicleAvailability};
pub use trip::{
    AirQualityReport, ComfortLevel, PlanTripRequest, RouteKind, RouteRecommendation, TransportOption,
    TripAnalysis, TripPlanResult, TripSnapshot,
};
