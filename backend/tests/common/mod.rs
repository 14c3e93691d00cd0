//! Shared helpers for integration tests: in-process mock upstreams and a
//! ready-to-use application state.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::{Duration as ChronoDuration, Utc};
use georisk_backend::{
    config::{
        AlertsConfig, Config, SeismicConfig, ServerConfig, SoilConfig, TelemetryConfig,
        WeatherConfig,
    },
    external::{SeismicClient, SoilClient, WeatherClient},
    services::{AlertBroadcaster, LocalSensorStore, TelemetryService},
    AppState,
};
use serde_json::{json, Value};
use shared::Coordinate;

/// How a mock upstream answers
#[derive(Clone)]
pub enum Upstream {
    Json(Value),
    Delayed(Duration, Value),
    Status(StatusCode),
    Malformed,
    Hang,
}

async fn respond(upstream: Upstream) -> axum::response::Response {
    match upstream {
        Upstream::Json(body) => Json(body).into_response(),
        Upstream::Delayed(delay, body) => {
            tokio::time::sleep(delay).await;
            Json(body).into_response()
        }
        Upstream::Status(status) => (status, "upstream failure").into_response(),
        Upstream::Malformed => (
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            "{not json",
        )
            .into_response(),
        Upstream::Hang => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            StatusCode::OK.into_response()
        }
    }
}

/// Serve `path` on an ephemeral port and return the base URL
pub async fn spawn_upstream(path: &'static str, upstream: Upstream) -> String {
    let app = Router::new().route(
        path,
        get(move || {
            let upstream = upstream.clone();
            async move { respond(upstream).await }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn weather_body(temp: f64, humidity: f64, wind: f64) -> Value {
    json!({
        "coord": {"lon": 85.32, "lat": 27.71},
        "weather": [{"main": "Rain", "description": "light rain", "icon": "10d"}],
        "main": {"temp": temp, "feels_like": temp, "pressure": 1010, "humidity": humidity},
        "wind": {"speed": wind, "deg": 180},
        "rain": {"1h": 0.8},
        "name": "Test Site"
    })
}

/// 48 hourly slots covering yesterday and today (UTC)
pub fn soil_body(precipitation: f64, moisture: f64) -> Value {
    let start = (Utc::now().date_naive() - ChronoDuration::days(1))
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let time: Vec<String> = (0..48)
        .map(|h| (start + ChronoDuration::hours(h)).format("%Y-%m-%dT%H:%M").to_string())
        .collect();
    json!({
        "latitude": 27.7,
        "longitude": 85.3,
        "hourly_units": {"precipitation": "mm", "soil_moisture_0_to_1cm": "m³/m³"},
        "hourly": {
            "time": time,
            "precipitation": vec![precipitation; 48],
            "soil_moisture_0_to_1cm": vec![moisture; 48],
        }
    })
}

pub fn seismic_body(magnitudes: &[f64]) -> Value {
    let now = Utc::now().timestamp_millis();
    let features: Vec<Value> = magnitudes
        .iter()
        .enumerate()
        .map(|(i, mag)| {
            json!({
                "type": "Feature",
                "id": format!("us{}", i),
                "properties": {
                    "mag": mag,
                    "place": format!("{} km N of Test Site", 10 + i),
                    "time": now - (i as i64) * 60_000,
                },
                "geometry": {"type": "Point", "coordinates": [85.3, 27.7, 10.0]}
            })
        })
        .collect();
    json!({"type": "FeatureCollection", "features": features})
}

pub struct Upstreams {
    pub weather: Upstream,
    pub soil: Upstream,
    pub seismic: Upstream,
}

pub struct Timeouts {
    pub weather: Duration,
    pub soil: Duration,
    pub seismic: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            weather: Duration::from_secs(8),
            soil: Duration::from_secs(10),
            seismic: Duration::from_secs(10),
        }
    }
}

pub fn default_coordinate() -> Coordinate {
    Coordinate::new(27.7172, 85.3240)
}

/// Telemetry service wired to freshly spawned mock upstreams
pub async fn telemetry_service(upstreams: Upstreams, timeouts: Timeouts) -> TelemetryService {
    let weather_url = spawn_upstream("/weather", upstreams.weather).await;
    let soil_url = spawn_upstream("/forecast", upstreams.soil).await;
    let seismic_url = spawn_upstream("/query", upstreams.seismic).await;

    TelemetryService::from_clients(
        WeatherClient::with_base_url(Some("test-key".to_string()), weather_url, timeouts.weather),
        SoilClient::with_base_url(None, soil_url, timeouts.soil),
        SeismicClient::with_base_url(seismic_url, timeouts.seismic),
        default_coordinate(),
    )
    .with_seed(42)
}

pub fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        telemetry: TelemetryConfig {
            default_latitude: 27.7172,
            default_longitude: 85.3240,
        },
        weather: WeatherConfig {
            api_endpoint: "http://127.0.0.1:9".to_string(),
            api_key: Some("test-key".to_string()),
            timeout_secs: 8,
        },
        soil: SoilConfig {
            api_endpoint: "http://127.0.0.1:9".to_string(),
            api_key: None,
            timeout_secs: 10,
        },
        seismic: SeismicConfig {
            api_endpoint: "http://127.0.0.1:9".to_string(),
            enabled: true,
            radius_km: 100.0,
            window_hours: 24,
            timeout_secs: 10,
        },
        alerts: AlertsConfig {
            interval_secs: 30,
            channel_capacity: 16,
        },
    }
}

pub fn app_state(telemetry: TelemetryService) -> AppState {
    AppState {
        config: Arc::new(test_config()),
        telemetry,
        alerts: AlertBroadcaster::with_seed(16, 9),
        sensors: LocalSensorStore::new(),
    }
}
