use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use transit_server::config::ServerConfig;
use transit_server::emt::{EmtClient, EmtConfig};
use transit_server::geocode::{GeocoderConfig, GoogleGeocoder};
use transit_server::tools::{BikeShareTools, IncidentTools, ToolRegistry};
use transit_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Credentials are checked before anything is constructed
    let config = ServerConfig::from_env()?;
    tracing::info!(credentials = config.auth.kind(), "using EMT API credentials");

    let mut emt_config = EmtConfig::new(config.auth.clone());
    if let Some(base_url) = &config.emt_base_url {
        emt_config = emt_config.with_base_url(base_url);
    }
    let emt = Arc::new(EmtClient::connect(emt_config).await?);

    let geocoder = Arc::new(GoogleGeocoder::new(GeocoderConfig::new(
        &config.google_maps_api_key,
    ))?);

    let registry = ToolRegistry::new(
        BikeShareTools::new(geocoder, emt.clone()),
        IncidentTools::new(emt),
    );
    let app = create_router(AppState::new(registry));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "EMT Madrid tool server listening");
    tracing::info!("  GET  /health  - Health check");
    tracing::info!("  POST /mcp     - JSON-RPC tool endpoint");

    axum::serve(listener, app).await?;
    Ok(())
}
