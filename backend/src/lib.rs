//! Georisk Telemetry Platform - Backend
//!
//! Fetches weather, soil and seismic signals for a coordinate, reduces them
//! to a risk score and category, caches the latest snapshot for polling
//! clients and pushes generated alerts to live subscribers.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use crate::config::Config;

use services::{AlertBroadcaster, LocalSensorStore, TelemetryService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub telemetry: TelemetryService,
    pub alerts: AlertBroadcaster,
    pub sensors: LocalSensorStore,
}

impl AppState {
    /// Build every service from configuration
    pub fn from_config(config: Config) -> Self {
        Self {
            telemetry: TelemetryService::new(&config),
            alerts: AlertBroadcaster::new(config.alerts.channel_capacity),
            sensors: LocalSensorStore::new(),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .route("/ping", get(handlers::ping))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Georisk Telemetry Platform API v1.0"
}
