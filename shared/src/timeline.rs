//! Synthetic short-horizon risk projection
//!
//! A bounded random walk seeded by the current score. It is illustrative,
//! not a forecast: successive calls with an unseeded source differ.

use rand::Rng;

use crate::models::RiskTimelinePoint;

/// Hours between consecutive points
pub const TIMELINE_STEP_HOURS: u32 = 4;
/// Horizon covered, inclusive of both ends
pub const TIMELINE_HORIZON_HOURS: u32 = 24;
/// Number of points produced
pub const TIMELINE_POINTS: usize = (TIMELINE_HORIZON_HOURS / TIMELINE_STEP_HOURS) as usize + 1;
/// Maximum per-step drift as a fraction of the base score
pub const TIMELINE_PERTURBATION: f64 = 0.10;

fn offset_label(hours: u32) -> String {
    format!("{:02}:00", hours)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Project `TIMELINE_POINTS` values starting at `base`. Each step adds a
/// uniform perturbation in `±TIMELINE_PERTURBATION * base` to the previous
/// value and re-clamps into [0, 100].
pub fn project_timeline<R: Rng + ?Sized>(base: f64, rng: &mut R) -> Vec<RiskTimelinePoint> {
    let base = if base.is_finite() {
        base.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let span = TIMELINE_PERTURBATION * base;

    let mut value = base;
    let mut points = Vec::with_capacity(TIMELINE_POINTS);
    for step in 0..TIMELINE_POINTS as u32 {
        if step > 0 && span > 0.0 {
            value = (value + rng.gen_range(-span..=span)).clamp(0.0, 100.0);
        }
        points.push(RiskTimelinePoint {
            offset_label: offset_label(step * TIMELINE_STEP_HOURS),
            value: round_to_tenth(value),
        });
    }
    points
}
