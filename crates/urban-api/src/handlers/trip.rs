//! Trip-planning and backend-health handlers

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use urban_core::{PlanTripRequest, TripPlanResult};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct BackendHealthResponse {
    /// "healthy" when every backend probe succeeded, else "degraded"
    pub status: String,
    /// Per-backend probe outcome, keyed by backend name
    pub services: BTreeMap<String, bool>,
    pub timestamp: String,
    pub version: String,
}

/// POST /smart-city/plan-trip
pub async fn plan_trip(
    State(state): State<AppState>,
    Json(request): Json<PlanTripRequest>,
) -> Result<Json<TripPlanResult>, ApiError> {
    let result = state.planner.plan_trip(&request).await?;
    Ok(Json(result))
}

/// GET /smart-city/health
/// Aggregate health of the four backends
pub async fn backend_health(State(state): State<AppState>) -> Json<BackendHealthResponse> {
    let health = state.planner.check_all_backends().await;

    Json(BackendHealthResponse {
        status: health.status().to_string(),
        services: health.services,
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
