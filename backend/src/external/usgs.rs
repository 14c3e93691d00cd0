//! Seismic client for the USGS FDSN event service
//!
//! Queries GeoJSON events within a radius of the coordinate over a trailing
//! window and reduces them to the strongest magnitude, the event count and
//! the most recent event.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use shared::{Coordinate, SeismicEvent, SeismicReading, SourceKind};

use crate::config::SeismicConfig;
use crate::error::{AppError, AppResult};
use crate::external::{get_json, http_client, settle};

/// Seismic activity client
#[derive(Clone)]
pub struct SeismicClient {
    client: Client,
    base_url: String,
    enabled: bool,
    radius_km: f64,
    window: chrono::Duration,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Properties {
    mag: Option<f64>,
    place: Option<String>,
    /// Origin time, milliseconds since epoch
    time: Option<i64>,
}

impl SeismicClient {
    pub fn new(config: &SeismicConfig) -> Self {
        let mut client = Self::with_base_url(
            config.api_endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        );
        client.enabled = config.enabled;
        client.radius_km = config.radius_km;
        client.window = chrono::Duration::hours(config.window_hours.max(1));
        client
    }

    /// Create an enabled client against a custom base URL (for testing)
    pub fn with_base_url(base_url: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
            enabled: true,
            radius_km: 100.0,
            window: chrono::Duration::hours(24),
            timeout,
        }
    }

    /// Fetch the seismic reading, or `None` when the source is unavailable
    pub async fn fetch(&self, coordinate: Coordinate) -> Option<SeismicReading> {
        settle(SourceKind::Seismic, self.timeout, self.get_recent_activity(coordinate)).await
    }

    pub async fn get_recent_activity(&self, coordinate: Coordinate) -> AppResult<SeismicReading> {
        if !self.enabled {
            return Err(AppError::SourceDisabled(SourceKind::Seismic));
        }

        let start = Utc::now() - self.window;
        let url = format!("{}/query", self.base_url);
        let query = [
            ("format", "geojson".to_string()),
            ("latitude", coordinate.latitude.to_string()),
            ("longitude", coordinate.longitude.to_string()),
            ("maxradiuskm", self.radius_km.to_string()),
            ("starttime", start.format("%Y-%m-%dT%H:%M:%S").to_string()),
        ];

        let data: FeatureCollection =
            get_json(&self.client, SourceKind::Seismic, &url, &query).await?;

        Ok(summarize_events(&data.features))
    }
}

fn summarize_events(features: &[Feature]) -> SeismicReading {
    let strongest_magnitude = features
        .iter()
        .filter_map(|f| f.properties.mag)
        .filter(|m| m.is_finite())
        .fold(0.0_f64, f64::max);

    let last_event = features
        .iter()
        .filter_map(|f| {
            let time = DateTime::<Utc>::from_timestamp_millis(f.properties.time?)?;
            Some((time, &f.properties))
        })
        .max_by_key(|(time, _)| *time)
        .map(|(time, props)| SeismicEvent {
            magnitude: props.mag.unwrap_or(0.0),
            place: props.place.clone().unwrap_or_default(),
            time,
        });

    SeismicReading {
        strongest_magnitude,
        event_count: features.len() as u32,
        last_event,
    }
}
