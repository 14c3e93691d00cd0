//! On-site instrument readings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest values reported by the local instrument array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalSensors {
    pub tiltmeter: f64,
    pub piezometer: f64,
    pub vibration: f64,
    pub crackmeter: f64,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl LocalSensors {
    /// Baseline values used until the first payload arrives
    pub fn baseline(timestamp: DateTime<Utc>) -> Self {
        Self {
            tiltmeter: 15.0,
            piezometer: 12.0,
            vibration: 8.0,
            crackmeter: 18.0,
            status: "online".to_string(),
            timestamp,
        }
    }

    /// Merge a partial payload. Missing keys keep their previous value.
    pub fn merge(&mut self, payload: &SensorPayload, timestamp: DateTime<Utc>) {
        if let Some(v) = payload.tiltmeter {
            self.tiltmeter = v;
        }
        if let Some(v) = payload.piezometer {
            self.piezometer = v;
        }
        if let Some(v) = payload.vibration {
            self.vibration = v;
        }
        if let Some(v) = payload.crackmeter {
            self.crackmeter = v;
        }
        if let Some(status) = &payload.status {
            self.status = status.clone();
        }
        self.timestamp = timestamp;
    }
}

/// Partial instrument update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorPayload {
    pub tiltmeter: Option<f64>,
    pub piezometer: Option<f64>,
    pub vibration: Option<f64>,
    pub crackmeter: Option<f64>,
    pub status: Option<String>,
}
