//! Backend port traits - one abstraction per upstream protocol family
//!
//! The orchestrator only ever talks to these traits; the concrete protocol
//! adapters (HTTP/JSON, SOAP/XML, binary RPC, graph query) live in
//! `urban-clients`. Implementations must be safe to call concurrently from
//! multiple in-flight requests: all methods take `&self` and each call owns
//! its transport lifecycle.
//!
//! `health_check` never errors - any internal failure collapses to `false`.

use async_trait::async_trait;

use crate::error::UpstreamResult;
use crate::models::{
    AirQualitySample, AlertRecord, TrafficLine, UrbanEvent, VehicleAvailability,
};

/// Traffic and vehicle availability (HTTP/JSON backend).
#[async_trait]
pub trait MobilityPort: Send + Sync {
    /// Current traffic state of all transit lines
    async fn get_traffic(&self) -> UpstreamResult<Vec<TrafficLine>>;

    /// Availability rate per transport mode
    async fn get_availability(&self) -> UpstreamResult<Vec<VehicleAvailability>>;

    /// Probe the backend; `false` on any failure
    async fn health_check(&self) -> bool;
}

/// Zone-scoped air quality lookup (SOAP/XML backend).
#[async_trait]
pub trait AirQualityPort: Send + Sync {
    /// Current AQI reading for a zone
    async fn get_air_quality(&self, zone: &str) -> UpstreamResult<AirQualitySample>;

    /// Probe the backend; `false` on any failure
    async fn health_check(&self) -> bool;
}

/// Zone-scoped active emergency alerts (binary RPC backend).
#[async_trait]
pub trait EmergencyPort: Send + Sync {
    /// Active alerts in a zone, in backend order
    async fn get_active_alerts(&self, zone: &str) -> UpstreamResult<Vec<AlertRecord>>;

    /// Probe the backend; `false` on any failure
    async fn health_check(&self) -> bool;
}

/// Zone-scoped active urban events (graph query backend).
#[async_trait]
pub trait UrbanEventsPort: Send + Sync {
    /// In-progress events in a zone, in backend order
    async fn get_active_events(&self, zone: &str) -> UpstreamResult<Vec<UrbanEvent>>;

    /// Probe the backend; `false` on any failure
    async fn health_check(&self) -> bool;
}
