//! urban-clients - Protocol adapters for the four upstream city services
//!
//! One adapter per protocol family, each implementing the matching port
//! trait from `urban-core`:
//!
//! - [`MobilityRestClient`] - traffic/availability over HTTP/JSON
//! - [`AirQualitySoapClient`] - zone AQI over a SOAP 1.1 style XML RPC
//! - [`EmergencyBinaryClient`] - active alerts over a length-prefixed
//!   binary RPC on TCP
//! - [`UrbanEventsGraphQlClient`] - active events over a graph query API
//!
//! Every adapter owns its transport lifecycle, enforces its per-call
//! deadline, and maps all native failures through [`normalize`] so that raw
//! transport errors never reach the orchestrator.

pub mod binary;
pub mod graphql;
pub mod normalize;
pub mod rest;
pub mod soap;

pub use binary::EmergencyBinaryClient;
pub use graphql::UrbanEventsGraphQlClient;
pub use rest::MobilityRestClient;
pub use soap::AirQualitySoapClient;

use std::time::Duration;

use thiserror::Error;

/// Per-call deadline for the JSON, binary and graph-query backends
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Per-call deadline for the SOAP backend (its legacy stack is slower)
pub const SOAP_TIMEOUT: Duration = Duration::from_secs(15);
/// Deadline for health probes, all backends
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
/// Connection establishment deadline for the HTTP-carried protocols
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors constructing an adapter (bad endpoint configuration).
///
/// Runtime call failures are normalized to `UpstreamError` instead.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
