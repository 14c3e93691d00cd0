//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub snapshot_cached: bool,
    pub alert_subscribers: usize,
}

#[derive(Serialize)]
pub struct PingResponse {
    pub message: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        snapshot_cached: state.telemetry.current().await.is_some(),
        alert_subscribers: state.alerts.subscriber_count().await,
    })
}

/// Liveness probe
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "Backend is running!".to_string(),
    })
}
