//! HTTP/JSON adapter for the mobility service

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use urban_core::backend;
use urban_core::{
    MobilityPort, TrafficLine, TrafficState, UpstreamResult, VehicleAvailability,
};

use crate::normalize;
use crate::{ClientError, CONNECT_TIMEOUT, HEALTH_TIMEOUT, REQUEST_TIMEOUT};

// Wire shapes keep the legacy mobility service's field names.

#[derive(Deserialize)]
struct TrafficResponse {
    #[serde(default)]
    lignes: Vec<TrafficLineWire>,
}

#[derive(Deserialize)]
struct TrafficLineWire {
    ligne: String,
    #[serde(default)]
    etat: String,
    #[serde(default)]
    prochains_passages: Vec<String>,
}

#[derive(Deserialize)]
struct AvailabilityResponse {
    #[serde(default)]
    vehicules: Vec<VehicleWire>,
}

#[derive(Deserialize)]
struct VehicleWire {
    type_transport: String,
    #[serde(default)]
    taux_disponibilite: f64,
}

/// Client for the mobility service (traffic state and vehicle availability).
#[derive(Debug, Clone)]
pub struct MobilityRestClient {
    client: Client,
    base_url: Url,
}

impl MobilityRestClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> UpstreamResult<T> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| urban_core::UpstreamError::Unknown {
                backend: backend::MOBILITY,
                message: format!("bad request path '{}': {}", path, e),
            })?;
        debug!(%url, "mobility request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| normalize::from_reqwest(backend::MOBILITY, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(normalize::from_http_status(backend::MOBILITY, status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| normalize::from_reqwest(backend::MOBILITY, e))
    }
}

#[async_trait]
impl MobilityPort for MobilityRestClient {
    async fn get_traffic(&self) -> UpstreamResult<Vec<TrafficLine>> {
        let response: TrafficResponse = self.get_json("trafic").await?;

        let lines = response
            .lignes
            .into_iter()
            .map(|wire| {
                let state = TrafficState::parse_wire(&wire.etat).unwrap_or_else(|| {
                    warn!(line = %wire.ligne, state = %wire.etat, "unknown traffic state, assuming normal");
                    TrafficState::Normal
                });
                TrafficLine {
                    line: wire.ligne,
                    state,
                    upcoming_passages: wire.prochains_passages,
                }
            })
            .collect();

        Ok(lines)
    }

    async fn get_availability(&self) -> UpstreamResult<Vec<VehicleAvailability>> {
        let response: AvailabilityResponse = self.get_json("disponibilite").await?;

        Ok(response
            .vehicules
            .into_iter()
            .map(|wire| VehicleAvailability {
                mode: wire.type_transport,
                availability_rate: wire.taux_disponibilite,
            })
            .collect())
    }

    async fn health_check(&self) -> bool {
        let Ok(url) = self.base_url.join("health") else {
            return false;
        };
        match self.client.get(url).timeout(HEALTH_TIMEOUT).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "mobility health probe failed");
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
    fn traffic_wire_decodes_legacy_fields() {
        let body = r#"{
            "lignes": [
                {"ligne": "Metro Line 1", "etat": "normal"},
                {"ligne": "Bus 42", "etat": "perturbé", "prochains_passages": ["14:45"]}
            ]
        }"#;
        let parsed: TrafficResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.lignes.len(), 2);
        assert_eq!(parsed.lignes[1].ligne, "Bus 42");
        assert_eq!(parsed.lignes[1].prochains_passages, vec!["14:45"]);
        assert_eq!(
            TrafficState::parse_wire(&parsed.lignes[1].etat),
            Some(TrafficState::Disrupted)
        );
    }

    #[test]
    fn availability_wire_decodes() {
        let body = r#"{"vehicules": [{"type_transport": "metro", "taux_disponibilite": 85.0}]}"#;
        let parsed: AvailabilityResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.vehicules[0].type_transport, "metro");
        assert_eq!(parsed.vehicules[0].taux_disponibilite, 85.0);
    }

    #[test]
    fn empty_bodies_default_to_empty_lists() {
        let parsed: TrafficResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.lignes.is_empty());
    }
}
