//! Gateway configuration (TOML)

use serde::Deserialize;

fn default_listen_port() -> u16 {
    8080
}

fn default_mobility_url() -> String {
    "http://127.0.0.1:8001".to_string()
}

fn default_air_quality_url() -> String {
    "http://127.0.0.1:8002/soap".to_string()
}

fn default_emergency_addr() -> String {
    "127.0.0.1:50051".to_string()
}

fn default_urban_events_url() -> String {
    "http://127.0.0.1:8004/graphql".to_string()
}

/// Gateway configuration. Every field has a default so an empty file (or no
/// file at all) yields a runnable local setup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Port the gateway listens on
    pub listen_port: u16,
    /// Base URL of the mobility (HTTP/JSON) backend
    pub mobility_url: String,
    /// Endpoint URL of the air quality (SOAP/XML) backend
    pub air_quality_url: String,
    /// host:port of the emergency (binary RPC) backend
    pub emergency_addr: String,
    /// Endpoint URL of the urban events (graph query) backend
    pub urban_events_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_port: default_listen_port(),
            mobility_url: default_mobility_url(),
            air_quality_url: default_air_quality_url(),
            emergency_addr: default_emergency_addr(),
            urban_events_url: default_urban_events_url(),
        }
    }
}

impl GatewayConfig {
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_yields_defaults() {
        let config = GatewayConfig::from_toml("").unwrap();
        assert_eq!(config.listen_port, 8080);
        assert_eq!(config.emergency_addr, "127.0.0.1:50051");
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config = GatewayConfig::from_toml(
            r#"
            listen_port = 9000
            mobility_url = "http://mobility.internal:8001"
            "#,
        )
        .unwrap();
        assert_eq!(config.listen_port, 9000);
        assert_eq!(config.mobility_url, "http://mobility.internal:8001");
        assert_eq!(config.urban_events_url, "http://127.0.0.1:8004/graphql");
    }
}
