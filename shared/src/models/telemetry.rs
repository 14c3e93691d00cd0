//! Upstream readings and the aggregated telemetry snapshot

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{RiskAssessment, RiskTimelinePoint};
use crate::scoring::assess;
use crate::timeline::project_timeline;
use crate::types::Coordinate;

/// Current atmospheric conditions. Every field is optional because the
/// provider omits keys it has no observation for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtmosphericReading {
    pub temperature_c: Option<f64>,
    pub wind_speed_ms: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub rain_1h_mm: Option<f64>,
    pub rain_3h_mm: Option<f64>,
}

/// Precipitation and soil state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoilReading {
    /// Sum of the trailing 24 hourly precipitation values
    pub precipitation_24h_mm: Option<f64>,
    /// Latest volumetric soil moisture sample, scaled to percent
    pub soil_moisture_pct: Option<f64>,
}

/// Most recent earthquake inside the search window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicEvent {
    pub magnitude: f64,
    pub place: String,
    pub time: DateTime<Utc>,
}

/// Seismic activity aggregated over the trailing window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeismicReading {
    pub strongest_magnitude: f64,
    pub event_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event: Option<SeismicEvent>,
}

/// Which sources contributed a reading to a snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCoverage {
    pub atmospheric: bool,
    pub soil: bool,
    pub seismic: bool,
    /// Number of sources that returned a reading (0-3)
    pub available: u8,
}

impl SourceCoverage {
    pub fn new(atmospheric: bool, soil: bool, seismic: bool) -> Self {
        Self {
            atmospheric,
            soil,
            seismic,
            available: [atmospheric, soil, seismic].iter().filter(|a| **a).count() as u8,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.available == 3
    }
}

/// One complete aggregation result for a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub timestamp: DateTime<Utc>,
    pub coordinate: Coordinate,
    pub atmospheric: Option<AtmosphericReading>,
    pub soil: Option<SoilReading>,
    pub seismic: Option<SeismicReading>,
    pub risk: RiskAssessment,
    pub timeline: Vec<RiskTimelinePoint>,
    pub coverage: SourceCoverage,
}

impl TelemetrySnapshot {
    /// Score the readings and project a timeline from the resulting score.
    pub fn assemble<R: Rng + ?Sized>(
        coordinate: Coordinate,
        atmospheric: Option<AtmosphericReading>,
        soil: Option<SoilReading>,
        seismic: Option<SeismicReading>,
        timestamp: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let risk = assess(atmospheric.as_ref(), soil.as_ref(), seismic.as_ref());
        let timeline = project_timeline(risk.score, rng);
        let coverage =
            SourceCoverage::new(atmospheric.is_some(), soil.is_some(), seismic.is_some());

        Self {
            timestamp,
            coordinate,
            atmospheric,
            soil,
            seismic,
            risk,
            timeline,
            coverage,
        }
    }

    /// Recompute the risk from this snapshot's own readings
    pub fn derived_risk(&self) -> RiskAssessment {
        assess(
            self.atmospheric.as_ref(),
            self.soil.as_ref(),
            self.seismic.as_ref(),
        )
    }
}
