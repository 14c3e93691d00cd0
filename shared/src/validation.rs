//! Validation utilities for the Georisk Telemetry Platform

use thiserror::Error;

use crate::types::Coordinate;

/// Reasons a coordinate is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::LatitudeOutOfRange(_) => "lat",
            ValidationError::LongitudeOutOfRange(_) => "lon",
        }
    }
}

/// Validate latitude is a finite value in [-90, 90]
pub fn validate_latitude(latitude: f64) -> Result<(), ValidationError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::LatitudeOutOfRange(latitude));
    }
    Ok(())
}

/// Validate longitude is a finite value in [-180, 180]
pub fn validate_longitude(longitude: f64) -> Result<(), ValidationError> {
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::LongitudeOutOfRange(longitude));
    }
    Ok(())
}

/// Validate both components of a coordinate
pub fn validate_coordinate(coordinate: &Coordinate) -> Result<(), ValidationError> {
    validate_latitude(coordinate.latitude)?;
    validate_longitude(coordinate.longitude)?;
    Ok(())
}
