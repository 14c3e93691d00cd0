//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a coordinate from optional request parameters, filling any
    /// missing component from `fallback`.
    pub fn or_fallback(latitude: Option<f64>, longitude: Option<f64>, fallback: Coordinate) -> Self {
        Self {
            latitude: latitude.unwrap_or(fallback.latitude),
            longitude: longitude.unwrap_or(fallback.longitude),
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// Upstream signal family
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Atmospheric,
    Soil,
    Seismic,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Atmospheric => "atmospheric",
            SourceKind::Soil => "soil",
            SourceKind::Seismic => "seismic",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_fallback_fills_missing_components() {
        let fallback = Coordinate::new(27.7, 85.3);
        assert_eq!(Coordinate::or_fallback(None, None, fallback), fallback);
        assert_eq!(
            Coordinate::or_fallback(Some(10.0), None, fallback),
            Coordinate::new(10.0, 85.3)
        );
        assert_eq!(
            Coordinate::or_fallback(Some(10.0), Some(20.0), fallback),
            Coordinate::new(10.0, 20.0)
        );
    }

    #[test]
    fn test_source_kind_serializes_snake_case() {
        let json = serde_json::to_string(&SourceKind::Atmospheric).unwrap();
        assert_eq!(json, "\"atmospheric\"");
    }
}
