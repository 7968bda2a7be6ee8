//! Binary RPC adapter for the emergency alert service
//!
//! The emergency service speaks a length-prefixed frame protocol over TCP:
//!
//! ```text
//! request:  opcode (u8) | payload length (u32 BE) | JSON payload
//! response: status (u8) | payload length (u32 BE) | JSON payload
//! ```
//!
//! Status `0x00` is success; any other value is a fault code from the
//! service's gRPC-style table (see [`crate::normalize::fault_code_status`]).
//! Each call dials its own connection and runs under a deadline, so the
//! adapter is trivially safe for concurrent use.

use async_trait::async_trait;
use bytes::{BufMut, BytesMut};
use serde::Deserialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use urban_core::backend;
use urban_core::{AlertPriority, AlertRecord, EmergencyPort, UpstreamError, UpstreamResult};

use crate::normalize;
use crate::{HEALTH_TIMEOUT, REQUEST_TIMEOUT};

const OP_GET_ACTIVE_ALERTS: u8 = 0x01;
const OP_HEALTH_CHECK: u8 = 0x7F;
const STATUS_OK: u8 = 0x00;

/// Hard cap on response payloads; anything larger is a framing error.
const MAX_PAYLOAD: u32 = 4 * 1024 * 1024;

// Wire shapes keep the emergency service's message layout, including the
// nested location record.

#[derive(Deserialize)]
struct AlertsPayload {
    #[serde(default)]
    alerts: Vec<AlertWire>,
}

#[derive(Deserialize)]
struct AlertWire {
    alert_id: String,
    #[serde(rename = "type")]
    alert_type: String,
    #[serde(default)]
    description: String,
    priority: String,
    location: LocationWire,
    #[serde(default)]
    created_at: String,
}

#[derive(Deserialize)]
struct LocationWire {
    #[serde(default)]
    zone: String,
}

#[derive(Deserialize)]
struct FaultPayload {
    #[serde(default)]
    message: String,
}

/// Client for the emergency alert service.
#[derive(Debug, Clone)]
pub struct EmergencyBinaryClient {
    addr: String,
}

impl EmergencyBinaryClient {
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    /// One request/response exchange under a deadline.
    async fn call(
        &self,
        opcode: u8,
        payload: &[u8],
        deadline: std::time::Duration,
    ) -> UpstreamResult<(u8, Vec<u8>)> {
        let exchange = async {
            let mut stream = TcpStream::connect(&self.addr).await?;
            stream.write_all(&encode_frame(opcode, payload)).await?;
            stream.flush().await?;

            let mut header = [0u8; 5];
            stream.read_exact(&mut header).await?;
            let (status, len) = decode_header(&header)?;

            let mut body = vec![0u8; len as usize];
            stream.read_exact(&mut body).await?;
            Ok::<_, std::io::Error>((status, body))
        };

        match timeout(deadline, exchange).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => Err(normalize::from_io(backend::EMERGENCY, e)),
            Err(_) => Err(UpstreamError::Timeout {
                backend: backend::EMERGENCY,
            }),
        }
    }
}

fn encode_frame(opcode: u8, payload: &[u8]) -> BytesMut {
    let mut frame = BytesMut::with_capacity(5 + payload.len());
    frame.put_u8(opcode);
    frame.put_u32(payload.len() as u32);
    frame.put_slice(payload);
    frame
}

fn decode_header(header: &[u8; 5]) -> std::io::Result<(u8, u32)> {
    let status = header[0];
    let len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]);
    if len > MAX_PAYLOAD {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("response payload of {} bytes exceeds frame limit", len),
        ));
    }
    Ok((status, len))
}

fn fault_error(status: u8, body: &[u8]) -> UpstreamError {
    let message = serde_json::from_slice::<FaultPayload>(body)
        .map(|f| f.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("fault code 0x{:02X}", status));

    UpstreamError::RemoteFault {
        backend: backend::EMERGENCY,
        status: normalize::fault_code_status(status),
        message,
    }
}

#[async_trait]
impl EmergencyPort for EmergencyBinaryClient {
    async fn get_active_alerts(&self, zone: &str) -> UpstreamResult<Vec<AlertRecord>> {
        debug!(zone, addr = %self.addr, "emergency request: get_active_alerts");

        let payload = serde_json::json!({ "zone": zone }).to_string();
        let (status, body) = self
            .call(OP_GET_ACTIVE_ALERTS, payload.as_bytes(), REQUEST_TIMEOUT)
            .await?;

        if status != STATUS_OK {
            return Err(fault_error(status, &body));
        }

        let payload: AlertsPayload =
            serde_json::from_slice(&body).map_err(|e| UpstreamError::Malformed {
                backend: backend::EMERGENCY,
                message: format!("undecodable alerts payload: {}", e),
            })?;

        payload
            .alerts
            .into_iter()
            .map(|wire| {
                let priority: AlertPriority =
                    wire.priority
                        .parse()
                        .map_err(|e: String| UpstreamError::Malformed {
                            backend: backend::EMERGENCY,
                            message: e,
                        })?;
                Ok(AlertRecord {
                    alert_id: wire.alert_id,
                    alert_type: wire.alert_type,
                    description: wire.description,
                    priority,
                    zone: wire.location.zone,
                    created_at: wire.created_at,
                })
            })
            .collect()
    }

    async fn health_check(&self) -> bool {
        match self.call(OP_HEALTH_CHECK, b"{}", HEALTH_TIMEOUT).await {
            Ok((status, _)) => status == STATUS_OK,
            Err(e) => {
                debug!(error = %e, "emergency health probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn frame_layout_is_opcode_length_payload() {
        let frame = encode_frame(OP_GET_ACTIVE_ALERTS, b"{\"zone\":\"downtown\"}");
        assert_eq!(frame[0], 0x01);
        assert_eq!(u32::from_be_bytes([frame[1], frame[2], frame[3], frame[4]]), 19);
        assert_eq!(&frame[5..], b"{\"zone\":\"downtown\"}");
    }

    #[test]
    fn header_decodes_status_and_length() {
        let (status, len) = decode_header(&[0x00, 0x00, 0x00, 0x01, 0x02]).unwrap();
        assert_eq!(status, STATUS_OK);
        assert_eq!(len, 0x0102);
    }

    #[test]
    fn oversized_frames_are_rejected() {
        let huge = (MAX_PAYLOAD + 1).to_be_bytes();
        let header = [0x00, huge[0], huge[1], huge[2], huge[3]];
        assert!(decode_header(&header).is_err());
    }

    #[test]
    fn fault_frames_carry_remote_message() {
        let err = fault_error(0x01, br#"{"message": "unknown zone: atlantis"}"#);
        assert_eq!(err.status_code(), 404);
        assert!(err.to_string().contains("unknown zone"));
    }

    #[test]
    fn fault_without_message_names_the_code() {
        let err = fault_error(0x03, b"");
        assert_eq!(err.status_code(), 503);
        assert!(err.to_string().contains("0x03"));
    }

    #[test]
    fn alert_wire_decodes_nested_location() {
        let body = br#"{"alerts": [{
            "alert_id": "a-1",
            "type": "FIRE",
            "description": "warehouse fire",
            "priority": "CRITICAL",
            "location": {"zone": "downtown"},
            "created_at": "2024-05-01T14:00:00Z"
        }]}"#;
        let payload: AlertsPayload = serde_json::from_slice(body).unwrap();
        assert_eq!(payload.alerts.len(), 1);
        assert_eq!(payload.alerts[0].location.zone, "downtown");
        assert_eq!(
            payload.alerts[0].priority.parse::<AlertPriority>().unwrap(),
            AlertPriority::Critical
        );
    }
}
