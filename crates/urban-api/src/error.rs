//! API error types and conversions

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use urban_core::TripPlanResult;
use urban_trip::TripError;

/// API error type that converts to HTTP responses.
///
/// Carries the same top-level body shape as a successful plan so callers
/// always decode one envelope: `success=false`, no analysis.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 500 Internal Server Error
    Internal(String),
}

impl From<TripError> for ApiError {
    fn from(err: TripError) -> Self {
        match err {
            TripError::InvalidRequest(_) => ApiError::BadRequest(err.to_string()),
            TripError::Internal(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!(%msg, "internal fault while planning trip");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(TripPlanResult::failure(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_errors_map_to_http_categories() {
        let bad: ApiError = TripError::InvalidRequest("bad time".to_string()).into();
        assert!(matches!(bad, ApiError::BadRequest(_)));

        let internal: ApiError = TripError::Internal("defect".to_string()).into();
        assert!(matches!(internal, ApiError::Internal(_)));
    }
}
