//! Shared types and pure risk logic for the Georisk Telemetry Platform
//!
//! This crate contains the data model and every deterministic transformation
//! applied to it (normalization, scoring, classification) plus the seeded
//! generators for the risk timeline and alert events. Nothing here performs
//! I/O, so the same code serves the backend and any offline consumer.

pub mod models;
pub mod normalize;
pub mod scoring;
pub mod timeline;
pub mod types;
pub mod validation;

pub use models::*;
pub use normalize::*;
pub use scoring::*;
pub use timeline::*;
pub use types::*;
pub use validation::*;
