//! Georisk Telemetry Platform - Backend Server

use std::net::SocketAddr;

use georisk_backend::{create_app, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "georisk_server=debug,georisk_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Georisk Telemetry Server");
    tracing::info!("Environment: {}", config.environment);
    if config.weather.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
        tracing::warn!("GEORISK_WEATHER__API_KEY not set, atmospheric source disabled");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let alert_interval = config.alerts.interval();

    // Create application state
    let state = AppState::from_config(config);

    // Warm the snapshot cache for the default location
    let telemetry = state.telemetry.clone();
    tokio::spawn(async move {
        if let Err(e) = telemetry.refresh_default().await {
            tracing::error!("Initial telemetry refresh failed: {}", e);
        }
    });

    let ticker = state.alerts.spawn(alert_interval);
    tracing::info!("Alert broadcaster running every {:?}", alert_interval);

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    ticker.abort();
    Ok(())
}
