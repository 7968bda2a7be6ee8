//! SOAP/XML adapter for the air quality service
//!
//! The air quality service speaks a SOAP 1.1 style RPC with a small, fixed
//! vocabulary (`GetAQI`, `HealthCheck`). The envelope is built by hand and
//! the response is read by scanning the known leaf tags - the payload is
//! flat, so no XML tree is needed.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use urban_core::backend;
use urban_core::{AirQualityPort, AirQualitySample, UpstreamError, UpstreamResult};

use crate::normalize;
use crate::{ClientError, CONNECT_TIMEOUT, HEALTH_TIMEOUT, SOAP_TIMEOUT};

const SOAP_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const SERVICE_NS: &str = "urn:airquality";

/// Client for the air quality service.
#[derive(Debug, Clone)]
pub struct AirQualitySoapClient {
    client: Client,
    endpoint: Url,
}

impl AirQualitySoapClient {
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(SOAP_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        let endpoint = Url::parse(endpoint)?;

        Ok(Self { client, endpoint })
    }

    fn envelope(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?><soap:Envelope xmlns:soap="{SOAP_NS}"><soap:Body>{body}</soap:Body></soap:Envelope>"#
        )
    }

    async fn call(&self, action: &str, body: String) -> UpstreamResult<String> {
        debug!(action, endpoint = %self.endpoint, "soap request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", format!("\"{SERVICE_NS}#{action}\""))
            .body(Self::envelope(&body))
            .send()
            .await
            .map_err(|e| normalize::from_reqwest(backend::AIR_QUALITY, e))?;

        // SOAP 1.1 faults arrive as HTTP 500 with a Fault element; read the
        // body before judging the status so the fault detail is kept.
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| normalize::from_reqwest(backend::AIR_QUALITY, e))?;

        if let Some(fault) = parse_fault(&text) {
            return Err(fault);
        }
        if !status.is_success() {
            return Err(normalize::from_http_status(
                backend::AIR_QUALITY,
                status,
                &text,
            ));
        }

        Ok(text)
    }
}

#[async_trait]
impl AirQualityPort for AirQualitySoapClient {
    async fn get_air_quality(&self, zone: &str) -> UpstreamResult<AirQualitySample> {
        let body = format!(
            r#"<GetAQI xmlns="{SERVICE_NS}"><zone>{}</zone></GetAQI>"#,
            xml_escape(zone)
        );
        let text = self.call("GetAQI", body).await?;

        parse_aqi_response(zone, &text)
    }

    async fn health_check(&self) -> bool {
        let body = format!(r#"<HealthCheck xmlns="{SERVICE_NS}"/>"#);
        let request = self
            .client
            .post(self.endpoint.clone())
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", format!("\"{SERVICE_NS}#HealthCheck\""))
            .timeout(HEALTH_TIMEOUT)
            .body(Self::envelope(&body));

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                let text = response.text().await.unwrap_or_default();
                parse_fault(&text).is_none()
            }
            Ok(_) | Err(_) => false,
        }
    }
}

/// Extract the text of a leaf element, tolerating namespace prefixes
/// (`<aqi>`, `<tns:aqi>`). Returns `None` if the tag is absent.
fn extract_tag<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
    let plain = format!("<{}>", tag);
    let prefixed = format!(":{}>", tag);

    let start = if let Some(i) = xml.find(&plain) {
        i + plain.len()
    } else {
        let i = xml.find(&prefixed)?;
        // Skip if the first occurrence is the closing tag
        let open = xml[..i].rfind('<')?;
        if xml[open..].starts_with("</") {
            return None;
        }
        i + prefixed.len()
    };

    let len = xml[start..].find('<')?;
    Some(&xml[start..start + len])
}

/// Detect a SOAP fault and map it onto a remote fault error.
fn parse_fault(xml: &str) -> Option<UpstreamError> {
    if !(xml.contains(":Fault>") || xml.contains("<Fault>")) {
        return None;
    }

    let message = extract_tag(xml, "faultstring")
        .unwrap_or("SOAP fault")
        .to_string();
    // "Client" fault codes are caller errors (unknown zone etc.)
    let status = match extract_tag(xml, "faultcode") {
        Some(code) if code.contains("Client") => 400,
        _ => 500,
    };

    Some(UpstreamError::RemoteFault {
        backend: backend::AIR_QUALITY,
        status,
        message,
    })
}

fn parse_aqi_response(requested_zone: &str, xml: &str) -> UpstreamResult<AirQualitySample> {
    let malformed = |what: &str| UpstreamError::Malformed {
        backend: backend::AIR_QUALITY,
        message: format!("missing or invalid <{}> in GetAQI response", what),
    };

    let aqi: u16 = extract_tag(xml, "aqi")
        .ok_or_else(|| malformed("aqi"))?
        .trim()
        .parse()
        .map_err(|_| malformed("aqi"))?;
    // AQI is a 0-500 index; anything beyond that is a broken reading
    if aqi > 500 {
        return Err(UpstreamError::Malformed {
            backend: backend::AIR_QUALITY,
            message: format!("AQI value {} outside the 0-500 index range", aqi),
        });
    }

    Ok(AirQualitySample {
        zone: extract_tag(xml, "zone")
            .unwrap_or(requested_zone)
            .to_string(),
        aqi,
        category: extract_tag(xml, "category").unwrap_or("Unknown").to_string(),
        description: extract_tag(xml, "description").unwrap_or("").to_string(),
        timestamp: extract_tag(xml, "timestamp").unwrap_or("").to_string(),
    })
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const OK_RESPONSE: &str = r#"<?xml version="1.0"?>
        <soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
          <soap:Body>
            <tns:GetAQIResponse xmlns:tns="urn:airquality">
              <tns:zone>downtown</tns:zone>
              <tns:aqi>180</tns:aqi>
              <tns:category>Unhealthy</tns:category>
              <tns:description>High particulate levels</tns:description>
              <tns:timestamp>2024-05-01T14:30:00</tns:timestamp>
            </tns:GetAQIResponse>
          </soap:Body>
        </soap:Envelope>"#;

    const FAULT_RESPONSE: &str = r#"<?xml version="1.0"?>
        <soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
          <soap:Body>
            <soap:Fault>
              <faultcode>soap:Client</faultcode>
              <faultstring>Unknown zone: atlantis</faultstring>
            </soap:Fault>
          </soap:Body>
        </soap:Envelope>"#;

    #[test]
    fn parses_successful_response() {
        let sample = parse_aqi_response("downtown", OK_RESPONSE).unwrap();
        assert_eq!(sample.zone, "downtown");
        assert_eq!(sample.aqi, 180);
        assert_eq!(sample.category, "Unhealthy");
        assert_eq!(sample.description, "High particulate levels");
    }

    #[test]
    fn client_fault_maps_to_caller_error() {
        let err = parse_fault(FAULT_RESPONSE).expect("fault should be detected");
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("Unknown zone"));
    }

    #[test]
    fn no_fault_in_normal_response() {
        assert!(parse_fault(OK_RESPONSE).is_none());
    }

    #[test]
    fn missing_aqi_is_malformed() {
        let xml = "<Envelope><Body><GetAQIResponse/></Body></Envelope>";
        let err = parse_aqi_response("downtown", xml).unwrap_err();
        assert_eq!(err.status_code(), 502);
    }

    #[test]
    fn out_of_range_aqi_is_malformed() {
        let xml = "<Envelope><Body><GetAQIResponse><aqi>40000</aqi></GetAQIResponse></Body></Envelope>";
        let err = parse_aqi_response("downtown", xml).unwrap_err();
        assert_eq!(err.status_code(), 502);
        assert!(err.to_string().contains("0-500"));

        let boundary = "<Envelope><Body><GetAQIResponse><aqi>500</aqi></GetAQIResponse></Body></Envelope>";
        assert_eq!(parse_aqi_response("downtown", boundary).unwrap().aqi, 500);
    }

    #[test]
    fn extract_tag_handles_plain_and_prefixed() {
        assert_eq!(extract_tag("<aqi>42</aqi>", "aqi"), Some("42"));
        assert_eq!(extract_tag("<tns:aqi>42</tns:aqi>", "aqi"), Some("42"));
        assert_eq!(extract_tag("<other>42</other>", "aqi"), None);
    }

    #[test]
    fn zone_input_is_escaped() {
        assert_eq!(xml_escape("a<b&c"), "a&lt;b&amp;c");
    }
}
