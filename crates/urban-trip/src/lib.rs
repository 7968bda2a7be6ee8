//! urban-trip - The trip-planning workflow
//!
//! Pipeline for one request: validate, fan out to the four backend ports
//! concurrently ([`collector`]), merge the signals into an immutable
//! snapshot ([`aggregate`]), derive the recommendation
//! ([`recommend`]), and return the composed result with accumulated
//! warnings ([`planner::TripPlanner`]).
//!
//! Backend failures are absorbed into fallbacks and warnings; only an
//! invalid request or an internal defect fails a request.

pub mod aggregate;
pub mod collector;
pub mod planner;
pub mod recommend;

pub use collector::{collect_signals, CollectedSignals};
pub use planner::{BackendHealth, TripError, TripPlanner};
