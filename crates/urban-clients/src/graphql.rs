//! Graph-query adapter for the urban events service

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;

use urban_core::backend;
use urban_core::{EventStatus, UpstreamError, UpstreamResult, UrbanEvent, UrbanEventsPort, Zone};

use crate::normalize;
use crate::{ClientError, CONNECT_TIMEOUT, HEALTH_TIMEOUT, REQUEST_TIMEOUT};

const EVENTS_QUERY: &str = r#"
query ActiveEvents($zoneId: String, $status: String) {
  events(zoneId: $zoneId, status: $status) {
    id
    name
    description
    priority
    status
    zone { id name description }
    date
  }
}"#;

const ZONES_PROBE_QUERY: &str = "{ zones { id } }";

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct EventsData {
    #[serde(default)]
    events: Vec<EventWire>,
}

#[derive(Deserialize)]
struct EventWire {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    priority: String,
    status: EventStatus,
    zone: Option<Zone>,
    #[serde(default)]
    date: String,
}

/// Client for the urban events service.
#[derive(Debug, Clone)]
pub struct UrbanEventsGraphQlClient {
    client: Client,
    endpoint: Url,
}

impl UrbanEventsGraphQlClient {
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        let endpoint = Url::parse(endpoint)?;

        Ok(Self { client, endpoint })
    }

    async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> UpstreamResult<T> {
        debug!(endpoint = %self.endpoint, "graphql request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| normalize::from_reqwest(backend::URBAN_EVENTS, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(normalize::from_http_status(
                backend::URBAN_EVENTS,
                status,
                &body,
            ));
        }

        let envelope: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| normalize::from_reqwest(backend::URBAN_EVENTS, e))?;

        if let Some(first) = envelope.errors.first() {
            // The graph API reports application faults in-band with HTTP 200
            return Err(UpstreamError::RemoteFault {
                backend: backend::URBAN_EVENTS,
                status: 500,
                message: first.message.clone(),
            });
        }

        envelope.data.ok_or_else(|| UpstreamError::Malformed {
            backend: backend::URBAN_EVENTS,
            message: "response carried neither data nor errors".to_string(),
        })
    }
}

#[async_trait]
impl UrbanEventsPort for UrbanEventsGraphQlClient {
    async fn get_active_events(&self, zone: &str) -> UpstreamResult<Vec<UrbanEvent>> {
        let variables = json!({ "zoneId": zone, "status": EventStatus::InProgress.to_string() });
        let data: EventsData = self.execute(EVENTS_QUERY, variables).await?;

        Ok(data
            .events
            .into_iter()
            .map(|wire| UrbanEvent {
                event_id: wire.id,
                name: wire.name,
                description: wire.description,
                priority: wire.priority,
                status: wire.status,
                zone: wire
                    .zone
                    .map(|z| z.name)
                    .unwrap_or_else(|| "N/A".to_string()),
                date: wire.date,
            })
            .collect())
    }

    async fn health_check(&self) -> bool {
        // No native health probe; a trivial zones query stands in
        let request = self
            .client
            .post(self.endpoint.clone())
            .json(&json!({ "query": ZONES_PROBE_QUERY }))
            .timeout(HEALTH_TIMEOUT);

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<GraphQlResponse<serde_json::Value>>().await {
                    Ok(envelope) => envelope.errors.is_empty() && envelope.data.is_some(),
                    Err(_) => false,
                }
            }
            Ok(_) => false,
            Err(e) => {
                debug!(error = %e, "urban events health probe failed");
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
    fn events_wire_decodes_with_optional_zone() {
        let body = r#"{
            "data": {
                "events": [
                    {
                        "id": "ev-1",
                        "name": "Street festival",
                        "description": "Main avenue closed",
                        "priority": "HIGH",
                        "status": "IN_PROGRESS",
                        "zone": {"id": "z-1", "name": "Downtown"},
                        "date": "2024-05-01"
                    },
                    {
                        "id": "ev-2",
                        "name": "Roadworks",
                        "status": "IN_PROGRESS",
                        "zone": null
                    }
                ]
            }
        }"#;
        let envelope: GraphQlResponse<EventsData> = serde_json::from_str(body).unwrap();
        let data = envelope.data.unwrap();
        assert_eq!(data.events.len(), 2);

        let zone = data.events[0].zone.as_ref().unwrap();
        assert_eq!(zone.id, "z-1");
        assert_eq!(zone.name, "Downtown");
        assert_eq!(zone.description, None);

        assert!(data.events[1].zone.is_none());
        assert_eq!(data.events[1].status, EventStatus::InProgress);
    }

    #[test]
    fn in_band_errors_are_detected() {
        let body = r#"{"data": null, "errors": [{"message": "Unknown zone"}]}"#;
        let envelope: GraphQlResponse<EventsData> = serde_json::from_str(body).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors[0].message, "Unknown zone");
    }
}
