//! Configuration management for the Georisk Telemetry Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with GEORISK_ prefix
//!
//! Loaded once at startup. There is no hot reload.

use std::time::Duration;

use config::{Environment, File};
use serde::Deserialize;
use shared::{validate_coordinate, Coordinate};

use crate::error::{AppError, AppResult};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Default location used when a request carries no coordinate
    pub telemetry: TelemetryConfig,

    /// Atmospheric provider (OpenWeatherMap)
    pub weather: WeatherConfig,

    /// Precipitation and soil provider (Open-Meteo)
    pub soil: SoilConfig,

    /// Seismic provider (USGS FDSN event service)
    pub seismic: SeismicConfig,

    /// Live alert broadcaster
    pub alerts: AlertsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    pub default_latitude: f64,
    pub default_longitude: f64,
}

impl TelemetryConfig {
    pub fn default_coordinate(&self) -> Coordinate {
        Coordinate::new(self.default_latitude, self.default_longitude)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key. The source is disabled when absent.
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SoilConfig {
    /// Forecast API endpoint
    pub api_endpoint: String,

    /// Optional key for the commercial tier
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeismicConfig {
    /// FDSN event service endpoint
    pub api_endpoint: String,

    /// The provider is keyless; this flag disables it instead
    pub enabled: bool,

    /// Search radius around the coordinate
    pub radius_km: f64,

    /// Trailing window of events considered
    pub window_hours: i64,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertsConfig {
    /// Seconds between broadcast ticks
    pub interval_secs: u64,

    /// Per-subscriber queue depth
    pub channel_capacity: usize,
}

impl AlertsConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> AppResult<Self> {
        let environment =
            std::env::var("GEORISK_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("telemetry.default_latitude", 27.7172)?
            .set_default("telemetry.default_longitude", 85.3240)?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.timeout_secs", 8)?
            .set_default("soil.api_endpoint", "https://api.open-meteo.com/v1")?
            .set_default("soil.timeout_secs", 10)?
            .set_default("seismic.api_endpoint", "https://earthquake.usgs.gov/fdsnws/event/1")?
            .set_default("seismic.enabled", true)?
            .set_default("seismic.radius_km", 100.0)?
            .set_default("seismic.window_hours", 24)?
            .set_default("seismic.timeout_secs", 10)?
            .set_default("alerts.interval_secs", 30)?
            .set_default("alerts.channel_capacity", 16)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (GEORISK_ prefix)
            .add_source(
                Environment::with_prefix("GEORISK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject a default coordinate outside the valid ranges
    pub fn validate(&self) -> AppResult<()> {
        validate_coordinate(&self.telemetry.default_coordinate()).map_err(|e| {
            AppError::Configuration(format!("telemetry default coordinate: {}", e))
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            telemetry: TelemetryConfig {
                default_latitude: 27.7172,
                default_longitude: 85.3240,
            },
            weather: WeatherConfig {
                api_endpoint: "http://127.0.0.1:1".to_string(),
                api_key: None,
                timeout_secs: 8,
            },
            soil: SoilConfig {
                api_endpoint: "http://127.0.0.1:1".to_string(),
                api_key: None,
                timeout_secs: 10,
            },
            seismic: SeismicConfig {
                api_endpoint: "http://127.0.0.1:1".to_string(),
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

    #[test]
    fn test_validate_accepts_default_coordinate() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_default_coordinate() {
        let mut config = sample_config();
        config.telemetry.default_latitude = 120.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("telemetry default coordinate"));
    }

    #[test]
    fn test_alert_interval_never_zero() {
        let mut config = sample_config();
        config.alerts.interval_secs = 0;
        assert_eq!(config.alerts.interval(), Duration::from_secs(1));
    }
}
