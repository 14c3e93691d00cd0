//! Atmospheric client for current conditions
//!
//! Integrates with the OpenWeatherMap current weather API. Every field in the
//! response is treated as optional.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shared::{AtmosphericReading, Coordinate, SourceKind};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};
use crate::external::{get_json, http_client, settle};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    main: Option<OWMMain>,
    wind: Option<OWMWind>,
    rain: Option<OWMRain>,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> Self {
        Self::with_base_url(
            config.api_key.clone(),
            config.api_endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: Option<String>, base_url: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch current conditions, or `None` when the source is unavailable
    pub async fn fetch(&self, coordinate: Coordinate) -> Option<AtmosphericReading> {
        settle(
            SourceKind::Atmospheric,
            self.timeout,
            self.get_current_conditions(coordinate),
        )
        .await
    }

    /// Fetch current weather conditions by coordinate
    pub async fn get_current_conditions(
        &self,
        coordinate: Coordinate,
    ) -> AppResult<AtmosphericReading> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AppError::SourceDisabled(SourceKind::Atmospheric))?;

        let url = format!("{}/weather", self.base_url);
        let query = [
            ("lat", coordinate.latitude.to_string()),
            ("lon", coordinate.longitude.to_string()),
            ("appid", api_key.to_string()),
            ("units", "metric".to_string()),
        ];

        let data: OWMCurrentResponse =
            get_json(&self.client, SourceKind::Atmospheric, &url, &query).await?;

        Ok(convert_current_response(data))
    }
}

/// Convert OpenWeatherMap current response to our format
fn convert_current_response(data: OWMCurrentResponse) -> AtmosphericReading {
    AtmosphericReading {
        temperature_c: data.main.as_ref().and_then(|m| m.temp),
        humidity_pct: data.main.as_ref().and_then(|m| m.humidity),
        wind_speed_ms: data.wind.and_then(|w| w.speed),
        rain_1h_mm: data.rain.as_ref().and_then(|r| r.one_hour),
        rain_3h_mm: data.rain.as_ref().and_then(|r| r.three_hour),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_full_response() {
        let body = r#"{
            "coord": {"lon": 85.32, "lat": 27.71},
            "main": {"temp": 21.4, "feels_like": 21.0, "pressure": 1012, "humidity": 78},
            "wind": {"speed": 4.6, "deg": 250},
            "rain": {"1h": 1.2},
            "name": "Kathmandu"
        }"#;
        let data: OWMCurrentResponse = serde_json::from_str(body).unwrap();
        let reading = convert_current_response(data);

        assert_eq!(reading.temperature_c, Some(21.4));
        assert_eq!(reading.humidity_pct, Some(78.0));
        assert_eq!(reading.wind_speed_ms, Some(4.6));
        assert_eq!(reading.rain_1h_mm, Some(1.2));
        assert_eq!(reading.rain_3h_mm, None);
    }

    #[test]
    fn test_convert_sparse_response() {
        let data: OWMCurrentResponse = serde_json::from_str(r#"{"name": "nowhere"}"#).unwrap();
        assert_eq!(convert_current_response(data), AtmosphericReading::default());
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        // Unroutable endpoint: the call must not be attempted at all.
        let client = WeatherClient::with_base_url(
            Some("   ".to_string()),
            "http://192.0.2.1".to_string(),
            Duration::from_secs(8),
        );
        assert!(!client.is_enabled());

        let err = client
            .get_current_conditions(Coordinate::new(0.0, 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SourceDisabled(SourceKind::Atmospheric)));
        assert!(client.fetch(Coordinate::new(0.0, 0.0)).await.is_none());
    }
}
