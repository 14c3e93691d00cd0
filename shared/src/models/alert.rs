//! Alert events pushed to live subscribers

use chrono::{DateTime, Utc};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::RiskLevel;

/// Alert severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub const ALL: [AlertSeverity; 3] = [
        AlertSeverity::Info,
        AlertSeverity::Warning,
        AlertSeverity::Critical,
    ];
}

/// Handling state of an alert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AlertStatus {
    Active,
    InProgress,
    Resolved,
}

impl AlertStatus {
    pub const ALL: [AlertStatus; 3] = [
        AlertStatus::Active,
        AlertStatus::InProgress,
        AlertStatus::Resolved,
    ];
}

/// An ephemeral alert. Not linked to the reading that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertEvent {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub sector: String,
    pub severity: AlertSeverity,
    pub status: AlertStatus,
    pub actions: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Site sectors alerts are attributed to
pub const SECTORS: [&str; 5] = [
    "North Pit",
    "East Wall",
    "South Bench",
    "West Haul Road",
    "Tailings Dam",
];

fn title_for(severity: AlertSeverity) -> &'static str {
    match severity {
        AlertSeverity::Info => "Routine telemetry check",
        AlertSeverity::Warning => "Elevated slope instability risk",
        AlertSeverity::Critical => "Ground failure precursor detected",
    }
}

fn description_for(severity: AlertSeverity, sector: &str) -> String {
    match severity {
        AlertSeverity::Info => format!("Sensor readings in {} are within normal bounds.", sector),
        AlertSeverity::Warning => format!(
            "Saturation and vibration levels in {} are trending upward.",
            sector
        ),
        AlertSeverity::Critical => format!(
            "Combined seismic and rainfall signals in {} exceed the safe envelope.",
            sector
        ),
    }
}

fn actions_for(severity: AlertSeverity, sector: &str) -> Vec<String> {
    match severity {
        AlertSeverity::Info => vec!["Log reading".to_string(), "Continue monitoring".to_string()],
        AlertSeverity::Warning => vec![
            "Increase inspection frequency".to_string(),
            format!("Restrict access below {}", sector),
            "Check drainage outlets".to_string(),
        ],
        AlertSeverity::Critical => vec![
            format!("Evacuate personnel from {}", sector),
            "Halt heavy machinery".to_string(),
            "Notify site safety officer".to_string(),
        ],
    }
}

fn uuid_from<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Build an alert with severity, status and sector drawn uniformly from `rng`.
pub fn random_alert<R: Rng + ?Sized>(rng: &mut R, timestamp: DateTime<Utc>) -> AlertEvent {
    let severity = *AlertSeverity::ALL.choose(rng).unwrap_or(&AlertSeverity::Info);
    let status = *AlertStatus::ALL.choose(rng).unwrap_or(&AlertStatus::Active);
    let sector = *SECTORS.choose(rng).unwrap_or(&SECTORS[0]);

    AlertEvent {
        id: uuid_from(rng),
        title: title_for(severity).to_string(),
        description: description_for(severity, sector),
        sector: sector.to_string(),
        severity,
        status,
        actions: actions_for(severity, sector),
        timestamp,
    }
}

/// Alert raised when a risk level crosses into MEDIUM or HIGH. LOW yields none.
pub fn risk_level_alert(level: RiskLevel, score: f64, timestamp: DateTime<Utc>) -> Option<AlertEvent> {
    let severity = match level {
        RiskLevel::Low => return None,
        RiskLevel::Medium => AlertSeverity::Warning,
        RiskLevel::High => AlertSeverity::Critical,
    };
    let sector = "Monitored site";

    Some(AlertEvent {
        id: Uuid::new_v4(),
        title: format!("Risk level {}", level),
        description: format!("Composite risk score is {:.1}/100.", score),
        sector: sector.to_string(),
        severity,
        status: AlertStatus::Active,
        actions: actions_for(severity, sector),
        timestamp,
    })
}
