//! Route definitions for the Georisk Telemetry Platform

use axum::{
    routing::get,
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/telemetry", telemetry_routes())
        .nest("/risk", risk_routes())
        .nest("/alerts", alert_routes())
        .nest("/sensors", sensor_routes())
}

/// Snapshot routes
fn telemetry_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_snapshot))
        .route("/current", get(handlers::get_current_snapshot))
}

/// Views over the cached snapshot
fn risk_routes() -> Router<AppState> {
    Router::new()
        .route("/timeline", get(handlers::get_risk_timeline))
        .route("/factors", get(handlers::get_risk_factors))
}

/// Alert list and live stream
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_alerts))
        .route("/stream", get(handlers::stream_alerts))
}

/// Local instrument routes
fn sensor_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::get_sensors).post(handlers::update_sensors))
}
