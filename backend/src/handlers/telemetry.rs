//! HTTP handlers for telemetry and risk endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{
    risk_factors, Coordinate, NormalizedSignals, RiskFactors, RiskTimelinePoint,
    TelemetrySnapshot, RISK_WEIGHTS,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Query parameters for a location. Missing components fall back to the
/// configured default coordinate.
#[derive(Debug, Deserialize, Validate)]
pub struct CoordinateQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: Option<f64>,
}

fn no_snapshot() -> AppError {
    AppError::NotFound("Telemetry snapshot".to_string())
}

/// Fetch fresh telemetry for a coordinate
pub async fn get_snapshot(
    State(state): State<AppState>,
    Query(query): Query<CoordinateQuery>,
) -> AppResult<Json<TelemetrySnapshot>> {
    query.validate()?;
    let coordinate =
        Coordinate::or_fallback(query.lat, query.lon, state.telemetry.default_coordinate());

    let snapshot = state.telemetry.refresh(coordinate).await?;
    Ok(Json(snapshot.as_ref().clone()))
}

/// Serve the last computed snapshot without fetching
pub async fn get_current_snapshot(
    State(state): State<AppState>,
) -> AppResult<Json<TelemetrySnapshot>> {
    let snapshot = state.telemetry.current().await.ok_or_else(no_snapshot)?;
    Ok(Json(snapshot.as_ref().clone()))
}

/// Risk timeline of the last computed snapshot
pub async fn get_risk_timeline(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RiskTimelinePoint>>> {
    let snapshot = state.telemetry.current().await.ok_or_else(no_snapshot)?;
    Ok(Json(snapshot.timeline.clone()))
}

/// Weighted breakdown of the last computed score
pub async fn get_risk_factors(State(state): State<AppState>) -> AppResult<Json<RiskFactors>> {
    let snapshot = state.telemetry.current().await.ok_or_else(no_snapshot)?;
    let signals = NormalizedSignals::from_readings(
        snapshot.atmospheric.as_ref(),
        snapshot.soil.as_ref(),
        snapshot.seismic.as_ref(),
    );
    Ok(Json(risk_factors(&signals, &RISK_WEIGHTS)))
}
