//! Mapping of raw physical measurements onto a dimensionless [0, 1] scale
//!
//! Each signal saturates at a fixed bound. An absent measurement normalizes
//! to 0, i.e. it contributes nothing to the composite score.

use serde::{Deserialize, Serialize};

use crate::models::{AtmosphericReading, SeismicReading, SoilReading};

/// Wind speed saturation (m/s)
pub const WIND_SATURATION_MS: f64 = 20.0;
/// Relative humidity saturation (%)
pub const HUMIDITY_SATURATION_PCT: f64 = 100.0;
/// Temperature mapped to 0
pub const TEMPERATURE_FLOOR_C: f64 = -10.0;
/// Temperature mapped to 1
pub const TEMPERATURE_CEILING_C: f64 = 40.0;
/// 24h precipitation saturation (mm)
pub const PRECIPITATION_24H_SATURATION_MM: f64 = 40.0;
/// Soil moisture saturation (%)
pub const SOIL_MOISTURE_SATURATION_PCT: f64 = 100.0;
/// Seismic magnitude saturation
pub const SEISMIC_MAGNITUDE_SATURATION: f64 = 6.0;

/// `clamp(value / saturation_bound, 0, 1)`. Non-finite input or a
/// non-positive bound yields 0.
pub fn normalize(value: f64, saturation_bound: f64) -> f64 {
    if !value.is_finite() || !(saturation_bound > 0.0) {
        return 0.0;
    }
    (value / saturation_bound).clamp(0.0, 1.0)
}

/// Same as [`normalize`], with absent input mapped to 0
pub fn normalize_optional(value: Option<f64>, saturation_bound: f64) -> f64 {
    value.map(|v| normalize(v, saturation_bound)).unwrap_or(0.0)
}

/// Temperature shifted so that the floor maps to 0 and the ceiling to 1
pub fn normalize_temperature(temperature_c: Option<f64>) -> f64 {
    normalize_optional(
        temperature_c.map(|t| t - TEMPERATURE_FLOOR_C),
        TEMPERATURE_CEILING_C - TEMPERATURE_FLOOR_C,
    )
}

/// All six normalized signals feeding the risk score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSignals {
    pub seismic: f64,
    pub rain: f64,
    pub soil: f64,
    pub wind: f64,
    pub humidity: f64,
    pub temperature: f64,
}

impl NormalizedSignals {
    pub fn from_readings(
        atmospheric: Option<&AtmosphericReading>,
        soil: Option<&SoilReading>,
        seismic: Option<&SeismicReading>,
    ) -> Self {
        Self {
            seismic: normalize_optional(
                seismic.map(|s| s.strongest_magnitude),
                SEISMIC_MAGNITUDE_SATURATION,
            ),
            rain: normalize_optional(
                soil.and_then(|s| s.precipitation_24h_mm),
                PRECIPITATION_24H_SATURATION_MM,
            ),
            soil: normalize_optional(
                soil.and_then(|s| s.soil_moisture_pct),
                SOIL_MOISTURE_SATURATION_PCT,
            ),
            wind: normalize_optional(
                atmospheric.and_then(|a| a.wind_speed_ms),
                WIND_SATURATION_MS,
            ),
            humidity: normalize_optional(
                atmospheric.and_then(|a| a.humidity_pct),
                HUMIDITY_SATURATION_PCT,
            ),
            temperature: normalize_temperature(atmospheric.and_then(|a| a.temperature_c)),
        }
    }
}
