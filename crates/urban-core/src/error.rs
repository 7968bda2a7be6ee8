//! Normalized error taxonomy for upstream backend failures
//!
//! Every native failure a protocol adapter can hit (connect error, deadline,
//! remote-declared fault, undecodable payload) maps onto exactly one
//! `UpstreamError` variant. Raw transport errors never cross this boundary.

use thiserror::Error;

/// Result type for backend port operations
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// A backend failure, normalized across the four upstream protocols.
///
/// Each variant carries the origin backend name (see [`crate::backend`]) and
/// a human-readable message. `RemoteFault` additionally carries the generic
/// numeric severity the origin protocol's status/fault code was mapped to.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// Backend could not be reached (connection refused, DNS failure)
    #[error("{backend} is unreachable: {message}")]
    Unavailable {
        backend: &'static str,
        message: String,
    },

    /// Call deadline elapsed before the backend answered
    #[error("{backend} timed out")]
    Timeout { backend: &'static str },

    /// Backend explicitly rejected the call (unknown zone, validation fault)
    #[error("{backend} rejected the call ({status}): {message}")]
    RemoteFault {
        backend: &'static str,
        /// Generic HTTP-equivalent severity of the remote fault code
        status: u16,
        message: String,
    },

    /// Response arrived but could not be decoded
    #[error("{backend} returned a malformed response: {message}")]
    Malformed {
        backend: &'static str,
        message: String,
    },

    /// Anything that fits none of the above
    #[error("{backend} call failed: {message}")]
    Unknown {
        backend: &'static str,
        message: String,
    },
}

impl UpstreamError {
    /// Name of the backend this error originated from
    pub fn backend(&self) -> &'static str {
        match self {
            UpstreamError::Unavailable { backend, .. }
            | UpstreamError::Timeout { backend }
            | UpstreamError::RemoteFault { backend, .. }
            | UpstreamError::Malformed { backend, .. }
            | UpstreamError::Unknown { backend, .. } => backend,
        }
    }

    /// Generic HTTP-equivalent severity for this error
    pub fn status_code(&self) -> u16 {
        match self {
            UpstreamError::Unavailable { .. } => 503,
            UpstreamError::Timeout { .. } => 504,
            UpstreamError::RemoteFault { status, .. } => *status,
            UpstreamError::Malformed { .. } => 502,
            UpstreamError::Unknown { .. } => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_codes_follow_severity_table() {
        let unavailable = UpstreamError::Unavailable {
            backend: backend::MOBILITY,
            message: "connection refused".into(),
        };
        assert_eq!(unavailable.status_code(), 503);

        let timeout = UpstreamError::Timeout {
            backend: backend::AIR_QUALITY,
        };
        assert_eq!(timeout.status_code(), 504);

        let fault = UpstreamError::RemoteFault {
            backend: backend::EMERGENCY,
            status: 404,
            message: "unknown zone".into(),
        };
        assert_eq!(fault.status_code(), 404);

        let malformed = UpstreamError::Malformed {
            backend: backend::URBAN_EVENTS,
            message: "missing data field".into(),
        };
        assert_eq!(malformed.status_code(), 502);

        let unknown = UpstreamError::Unknown {
            backend: backend::MOBILITY,
            message: "broken pipe".into(),
        };
        assert_eq!(unknown.status_code(), 500);
    }

    #[test]
    fn backend_name_is_preserved() {
        let err = UpstreamError::Timeout {
            backend: backend::EMERGENCY,
        };
        assert_eq!(err.backend(), "emergency");
    }
}
