//! HTTP handlers for local instrument readings

use axum::{extract::State, Json};
use shared::{LocalSensors, SensorPayload};

use crate::AppState;

/// Merge a partial instrument payload
pub async fn update_sensors(
    State(state): State<AppState>,
    Json(payload): Json<SensorPayload>,
) -> Json<LocalSensors> {
    Json(state.sensors.update(&payload).await)
}

/// Latest instrument readings
pub async fn get_sensors(State(state): State<AppState>) -> Json<LocalSensors> {
    Json(state.sensors.snapshot().await)
}
