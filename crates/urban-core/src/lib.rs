//! urban-core - Core types and backend port abstractions for the urban gateway
//!
//! This crate provides the shared data model and the four protocol-agnostic
//! port traits that the trip-planning orchestrator consumes. Protocol
//! adapters live in `urban-clients`; the workflow itself in `urban-trip`.

pub mod error;
pub mod models;
pub mod ports;

pub use error::{UpstreamError, UpstreamResult};
pub use models::*;
pub use ports::{AirQualityPort, EmergencyPort, MobilityPort, UrbanEventsPort};

/// Canonical backend names, used in normalized errors and degradation warnings.
pub mod backend {
    /// Traffic and vehicle availability service (HTTP/JSON)
    pub const MOBILITY: &str = "mobility";
    /// Air quality service (SOAP/XML RPC)
    pub const AIR_QUALITY: &str = "air-quality";
    /// Emergency alert service (binary RPC)
    pub const EMERGENCY: &str = "emergency";
    /// Urban events service (graph query API)
    pub const URBAN_EVENTS: &str = "urban-events";
}
