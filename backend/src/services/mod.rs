//! Business logic services for the Georisk Telemetry Platform

pub mod alerts;
pub mod sensors;
pub mod snapshot_cache;
pub mod telemetry;

pub use alerts::{derive_risk_alerts, AlertBroadcaster, BroadcastReport, Subscription, SubscriptionId};
pub use sensors::LocalSensorStore;
pub use snapshot_cache::SnapshotCache;
pub use telemetry::TelemetryService;
