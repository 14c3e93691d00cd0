//! Domain models for the Georisk Telemetry Platform

mod alert;
mod risk;
mod sensors;
mod telemetry;

pub use alert::*;
pub use risk::*;
pub use sensors::*;
pub use telemetry::*;
