//! urbangwd - Smart-City Gateway Daemon
//!
//! Fronts the four city backends (mobility HTTP/JSON, air quality SOAP/XML,
//! emergency binary RPC, urban events graph query) and exposes the
//! trip-planning orchestrator over HTTP.
//!
//! Usage:
//!   urbangwd [config.toml]
//!
//! Without a config file, default local backend endpoints are used.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use urban_api::{create_router, AppState};
use urban_clients::{
    AirQualitySoapClient, EmergencyBinaryClient, MobilityRestClient, UrbanEventsGraphQlClient,
};
use urban_trip::TripPlanner;

use crate::config::GatewayConfig;

fn print_help() {
    eprintln!(
        r#"urbangwd - Smart-City Gateway Daemon

Usage: urbangwd [OPTIONS] [config.toml]

Options:
  -h, --help  Print this help message

Without a config file, default local backend endpoints are used.
"#
    );
}

fn parse_args() -> Option<String> {
    let mut config_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            a if !a.starts_with('-') => config_path = Some(a.to_string()),
            _ => tracing::warn!("Unknown argument: {}", arg),
        }
    }
    config_path
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "urbangwd=info,urban_api=info,urban_trip=info,urban_clients=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting urbangwd (Smart-City Gateway Daemon)");

    let config = match parse_args() {
        Some(path) => {
            tracing::info!("Loading config from: {}", path);
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {}", path))?;
            GatewayConfig::from_toml(&contents)
                .with_context(|| format!("failed to parse config file {}", path))?
        }
        None => {
            tracing::info!("No config file provided, using default backend endpoints");
            GatewayConfig::default()
        }
    };

    let mobility = MobilityRestClient::new(&config.mobility_url)
        .context("invalid mobility backend URL")?;
    let air_quality = AirQualitySoapClient::new(&config.air_quality_url)
        .context("invalid air quality backend URL")?;
    let emergency = EmergencyBinaryClient::new(config.emergency_addr.as_str());
    let urban_events = UrbanEventsGraphQlClient::new(&config.urban_events_url)
        .context("invalid urban events backend URL")?;

    let planner = TripPlanner::new(
        Arc::new(mobility),
        Arc::new(air_quality),
        Arc::new(emergency),
        Arc::new(urban_events),
    );

    let app = create_router(AppState::new(planner));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
