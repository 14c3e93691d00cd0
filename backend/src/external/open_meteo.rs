//! Precipitation and soil moisture client (Open-Meteo forecast API)
//!
//! Requests yesterday and today at hourly resolution, then reduces the series
//! to a trailing 24-hour precipitation sum and the latest soil moisture sample.

use std::time::Duration;

use chrono::{NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use shared::{Coordinate, SoilReading, SourceKind};

use crate::config::SoilConfig;
use crate::error::{AppError, AppResult};
use crate::external::{get_json, http_client, settle};

/// Number of hourly slots summed for precipitation
pub const PRECIPITATION_WINDOW_HOURS: usize = 24;

const HOURLY_VARIABLES: &str = "precipitation,soil_moisture_0_to_1cm";
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Soil and precipitation client
#[derive(Clone)]
pub struct SoilClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlySeries>,
}

#[derive(Debug, Default, Deserialize)]
struct HourlySeries {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
    #[serde(default)]
    soil_moisture_0_to_1cm: Vec<Option<f64>>,
}

impl SoilClient {
    pub fn new(config: &SoilConfig) -> Self {
        Self::with_base_url(
            config.api_key.clone(),
            config.api_endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(api_key: Option<String>, base_url: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Fetch the soil reading, or `None` when the source is unavailable
    pub async fn fetch(&self, coordinate: Coordinate) -> Option<SoilReading> {
        settle(SourceKind::Soil, self.timeout, self.get_soil_conditions(coordinate)).await
    }

    pub async fn get_soil_conditions(&self, coordinate: Coordinate) -> AppResult<SoilReading> {
        let url = format!("{}/forecast", self.base_url);
        let mut query = vec![
            ("latitude", coordinate.latitude.to_string()),
            ("longitude", coordinate.longitude.to_string()),
            ("hourly", HOURLY_VARIABLES.to_string()),
            ("past_days", "1".to_string()),
            ("forecast_days", "1".to_string()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("apikey", key.clone()));
        }

        let data: ForecastResponse =
            get_json(&self.client, SourceKind::Soil, &url, &query).await?;

        let hourly = data.hourly.ok_or_else(|| {
            AppError::unavailable(SourceKind::Soil, "response has no hourly series")
        })?;
        Ok(summarize_hourly(&hourly, Utc::now().naive_utc()))
    }
}

/// Index of the last slot at or before `now`. Series without parseable
/// timestamps are used whole.
fn current_slot(times: &[String], len: usize, now: NaiveDateTime) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let parsed: Vec<_> = times
        .iter()
        .map(|t| NaiveDateTime::parse_from_str(t, TIME_FORMAT).ok())
        .collect();
    if parsed.len() < len || parsed.iter().any(Option::is_none) {
        return Some(len - 1);
    }
    parsed
        .iter()
        .take(len)
        .rposition(|t| t.map(|t| t <= now).unwrap_or(false))
}

fn summarize_hourly(hourly: &HourlySeries, now: NaiveDateTime) -> SoilReading {
    let precipitation_24h_mm = current_slot(&hourly.time, hourly.precipitation.len(), now)
        .and_then(|end| {
            let start = (end + 1).saturating_sub(PRECIPITATION_WINDOW_HOURS);
            let values: Vec<f64> = hourly.precipitation[start..=end]
                .iter()
                .flatten()
                .copied()
                .collect();
            if values.is_empty() {
                None
            } else {
                Some(values.iter().sum())
            }
        });

    let soil_moisture_pct = current_slot(&hourly.time, hourly.soil_moisture_0_to_1cm.len(), now)
        .and_then(|end| {
            hourly.soil_moisture_0_to_1cm[..=end]
                .iter()
                .rev()
                .flatten()
                .next()
                .map(|m| m * 100.0)
        });

    SoilReading {
        precipitation_24h_mm,
        soil_moisture_pct,
    }
}
