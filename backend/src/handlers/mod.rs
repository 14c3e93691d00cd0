//! HTTP handlers

pub mod alerts;
pub mod health;
pub mod sensors;
pub mod telemetry;

pub use alerts::*;
pub use health::*;
pub use sensors::*;
pub use telemetry::*;
