//! Error normalizer - maps native protocol failures onto `UpstreamError`
//!
//! The mapping is total: every failure an adapter can observe produces
//! exactly one normalized error carrying the origin backend name. Remote
//! fault codes are mapped onto generic HTTP-equivalent severities so the
//! orchestrator can reason about them uniformly.

use urban_core::UpstreamError;

/// Normalize a `reqwest` failure (shared by the three HTTP-carried protocols).
pub fn from_reqwest(backend: &'static str, err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout { backend }
    } else if err.is_connect() {
        UpstreamError::Unavailable {
            backend,
            message: err.to_string(),
        }
    } else if err.is_decode() {
        UpstreamError::Malformed {
            backend,
            message: err.to_string(),
        }
    } else {
        UpstreamError::Unknown {
            backend,
            message: err.to_string(),
        }
    }
}

/// Normalize a non-success HTTP status into a remote fault.
pub fn from_http_status(
    backend: &'static str,
    status: reqwest::StatusCode,
    body: &str,
) -> UpstreamError {
    UpstreamError::RemoteFault {
        backend,
        status: status.as_u16(),
        message: format!("HTTP {}: {}", status.as_u16(), body.trim()),
    }
}

/// Normalize a socket-level failure from the binary RPC transport.
pub fn from_io(backend: &'static str, err: std::io::Error) -> UpstreamError {
    use std::io::ErrorKind;

    match err.kind() {
        ErrorKind::ConnectionRefused | ErrorKind::NotFound | ErrorKind::AddrNotAvailable => {
            UpstreamError::Unavailable {
                backend,
                message: err.to_string(),
            }
        }
        ErrorKind::TimedOut => UpstreamError::Timeout { backend },
        ErrorKind::UnexpectedEof | ErrorKind::InvalidData => UpstreamError::Malformed {
            backend,
            message: err.to_string(),
        },
        _ => UpstreamError::Unknown {
            backend,
            message: err.to_string(),
        },
    }
}

/// Map a binary RPC fault code onto its generic HTTP-equivalent severity.
///
/// The emergency service uses gRPC-style status codes on the wire.
pub fn fault_code_status(code: u8) -> u16 {
    match code {
        0x01 => 404, // not found (unknown zone, unknown alert)
        0x02 => 400, // invalid argument
        0x03 => 503, // unavailable
        0x04 => 504, // deadline exceeded
        0x05 => 401, // unauthenticated
        0x06 => 403, // permission denied
        _ => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urban_core::backend;

    #[test]
    fn http_status_becomes_remote_fault() {
        let err = from_http_status(
            backend::MOBILITY,
            reqwest::StatusCode::NOT_FOUND,
            "no such line",
        );
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.backend(), "mobility");
    }

    #[test]
    fn io_errors_split_by_kind() {
        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert_eq!(from_io(backend::EMERGENCY, refused).status_code(), 503);

        let eof = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
        assert_eq!(from_io(backend::EMERGENCY, eof).status_code(), 502);

        let other = std::io::Error::other("broken pipe");
        assert_eq!(from_io(backend::EMERGENCY, other).status_code(), 500);
    }

    #[test]
    fn fault_codes_map_to_generic_severities() {
        assert_eq!(fault_code_status(0x01), 404);
        assert_eq!(fault_code_status(0x02), 400);
        assert_eq!(fault_code_status(0x03), 503);
        assert_eq!(fault_code_status(0x04), 504);
        assert_eq!(fault_code_status(0x05), 401);
        assert_eq!(fault_code_status(0x06), 403);
        assert_eq!(fault_code_status(0xEE), 500);
    }
}
