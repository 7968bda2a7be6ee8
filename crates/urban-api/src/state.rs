//! Application state for the trip-planning API

use std::sync::Arc;

use urban_trip::TripPlanner;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// The trip-planning orchestrator
    pub planner: Arc<TripPlanner>,
}

impl AppState {
    pub fn new(planner: TripPlanner) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }
}
