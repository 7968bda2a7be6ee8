//! urban-api - HTTP API layer for the trip-planning gateway
//!
//! This crate provides the HTTP surface over the [`urban_trip::TripPlanner`]
//! orchestrator. It is transport-only: all domain rules live in `urban-trip`.
//!
//! # Usage
//!
//! ```ignore
//! use urban_api::{create_router, AppState};
//! use urban_trip::TripPlanner;
//!
//! let planner = TripPlanner::new(mobility, air_quality, emergency, urban_events);
//! let router = create_router(AppState::new(planner));
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the gateway router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Liveness probe for the gateway process itself
        .route("/health", get(|| async { "OK" }))
        // Trip-planning orchestrator
        .route("/smart-city/plan-trip", post(handlers::trip::plan_trip))
        // Aggregate backend health
        .route("/smart-city/health", get(handlers::trip::backend_health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
