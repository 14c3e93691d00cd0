//! HTTP handlers for alerts

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use shared::AlertEvent;
use tokio_stream::{Stream, StreamExt};

use crate::services::derive_risk_alerts;
use crate::AppState;

/// Alerts derived from the cached snapshot's risk level
pub async fn list_alerts(State(state): State<AppState>) -> Json<Vec<AlertEvent>> {
    let snapshot = state.telemetry.current().await;
    Json(derive_risk_alerts(snapshot.as_deref()))
}

/// Server-sent event stream of broadcast alerts. Closing the connection drops
/// the subscription.
pub async fn stream_alerts(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let subscription = state.alerts.subscribe().await;
    let id = subscription.id();
    tracing::info!(subscription = id, "alert stream opened");

    let stream = subscription.into_stream().filter_map(|alert| {
        match Event::default().event("alert").json_data(&alert) {
            Ok(event) => Some(Ok(event)),
            Err(e) => {
                tracing::warn!(alert = %alert.id, error = %e, "failed to encode alert");
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
