//! Risk assessment models

use serde::{Deserialize, Serialize};

/// Three-level risk category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Composite score in [0, 100] with its category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RiskAssessment {
    pub score: f64,
    pub level: RiskLevel,
}

/// One step of the projected risk timeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskTimelinePoint {
    /// Offset from now, formatted as `HH:00`
    pub offset_label: String,
    pub value: f64,
}

/// Contribution of one signal to the composite score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskFactor {
    pub signal: String,
    /// Normalized value in [0, 1]
    pub normalized: f64,
    pub weight: f64,
    /// `normalized * weight`
    pub contribution: f64,
}

/// Breakdown of a score into its weighted factors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskFactors {
    pub factors: Vec<RiskFactor>,
    pub score: f64,
    pub level: RiskLevel,
}
