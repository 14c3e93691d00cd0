//! Composite risk scoring
//!
//! The weighting policy is a fixed set of named constants so it can be
//! audited and tested apart from the aggregation pipeline.

use serde::{Deserialize, Serialize};

use crate::models::{
    AtmosphericReading, RiskAssessment, RiskFactor, RiskFactors, RiskLevel, SeismicReading,
    SoilReading,
};
use crate::normalize::NormalizedSignals;

/// Per-signal weights. They sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    pub seismic: f64,
    pub rain: f64,
    pub soil: f64,
    pub wind: f64,
    pub humidity: f64,
    pub temperature: f64,
}

impl RiskWeights {
    pub fn total(&self) -> f64 {
        self.seismic + self.rain + self.soil + self.wind + self.humidity + self.temperature
    }
}

/// Seismic dominates: ground-failure precursors outrank weather.
pub const RISK_WEIGHTS: RiskWeights = RiskWeights {
    seismic: 0.40,
    rain: 0.25,
    soil: 0.15,
    wind: 0.10,
    humidity: 0.05,
    temperature: 0.05,
};

/// Scores strictly above this are HIGH
pub const HIGH_RISK_THRESHOLD: f64 = 70.0;
/// Scores strictly above this (and not HIGH) are MEDIUM
pub const MEDIUM_RISK_THRESHOLD: f64 = 45.0;

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Weighted sum of normalized signals, scaled to [0, 100] and rounded to one
/// decimal place.
pub fn score(signals: &NormalizedSignals, weights: &RiskWeights) -> f64 {
    let weighted = weights.seismic * signals.seismic
        + weights.rain * signals.rain
        + weights.soil * signals.soil
        + weights.wind * signals.wind
        + weights.humidity * signals.humidity
        + weights.temperature * signals.temperature;

    let clamped = if weighted.is_finite() {
        weighted.clamp(0.0, 1.0)
    } else {
        0.0
    };
    round_to_tenth(100.0 * clamped)
}

/// Threshold classification. Total over every score.
pub fn classify(score: f64) -> RiskLevel {
    if score > HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if score > MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Score and classify a set of (possibly absent) readings
pub fn assess(
    atmospheric: Option<&AtmosphericReading>,
    soil: Option<&SoilReading>,
    seismic: Option<&SeismicReading>,
) -> RiskAssessment {
    let signals = NormalizedSignals::from_readings(atmospheric, soil, seismic);
    let score = score(&signals, &RISK_WEIGHTS);
    RiskAssessment {
        score,
        level: classify(score),
    }
}

/// Per-signal breakdown of the score
pub fn risk_factors(signals: &NormalizedSignals, weights: &RiskWeights) -> RiskFactors {
    let entries = [
        ("seismic", signals.seismic, weights.seismic),
        ("rain", signals.rain, weights.rain),
        ("soil_moisture", signals.soil, weights.soil),
        ("wind", signals.wind, weights.wind),
        ("humidity", signals.humidity, weights.humidity),
        ("temperature", signals.temperature, weights.temperature),
    ];

    let factors = entries
        .into_iter()
        .map(|(signal, normalized, weight)| RiskFactor {
            signal: signal.to_string(),
            normalized,
            weight,
            contribution: normalized * weight,
        })
        .collect();

    let score = score(signals, weights);
    RiskFactors {
        factors,
        score,
        level: classify(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_weights_sum_to_one() {
        assert!((RISK_WEIGHTS.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_maximal_inputs_score_100() {
        let atmospheric = AtmosphericReading {
            temperature_c: Some(40.0),
            wind_speed_ms: Some(20.0),
            humidity_pct: Some(100.0),
            rain_1h_mm: None,
            rain_3h_mm: None,
        };
        let soil = SoilReading {
            precipitation_24h_mm: Some(40.0),
            soil_moisture_pct: Some(100.0),
        };
        let seismic = SeismicReading {
            strongest_magnitude: 6.0,
            event_count: 1,
            last_event: None,
        };

        let signals =
            NormalizedSignals::from_readings(Some(&atmospheric), Some(&soil), Some(&seismic));
        assert_eq!(signals.seismic, 1.0);
        assert_eq!(signals.rain, 1.0);
        assert_eq!(signals.soil, 1.0);
        assert_eq!(signals.wind, 1.0);
        assert_eq!(signals.humidity, 1.0);
        assert_eq!(signals.temperature, 1.0);

        let assessment = assess(Some(&atmospheric), Some(&soil), Some(&seismic));
        assert_eq!(assessment.score, 100.0);
        assert_eq!(assessment.level, RiskLevel::High);
    }

    #[test]
    fn test_no_data_scores_zero_low() {
        let assessment = assess(None, None, None);
        assert_eq!(assessment.score, 0.0);
        assert_eq!(assessment.level, RiskLevel::Low);
    }

    #[test]
    fn test_seismic_only() {
        let seismic = SeismicReading {
            strongest_magnitude: 3.0,
            event_count: 2,
            last_event: None,
        };
        // 0.40 * 0.5
        assert_eq!(assess(None, None, Some(&seismic)).score, 20.0);
    }

    #[test]
    fn test_score_rounds_to_one_decimal() {
        let signals = NormalizedSignals {
            wind: 0.333,
            ..Default::default()
        };
        // 0.10 * 0.333 * 100 = 3.33
        assert_eq!(score(&signals, &RISK_WEIGHTS), 3.3);
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(classify(70.0), RiskLevel::Medium);
        assert_eq!(classify(70.1), RiskLevel::High);
        assert_eq!(classify(45.0), RiskLevel::Low);
        assert_eq!(classify(45.1), RiskLevel::Medium);
        assert_eq!(classify(0.0), RiskLevel::Low);
        assert_eq!(classify(100.0), RiskLevel::High);
    }

    #[test]
    fn test_risk_factors_sum_to_score() {
        let signals = NormalizedSignals {
            seismic: 0.5,
            rain: 0.8,
            soil: 0.4,
            wind: 0.1,
            humidity: 0.9,
            temperature: 0.6,
        };
        let breakdown = risk_factors(&signals, &RISK_WEIGHTS);
        let sum: f64 = breakdown.factors.iter().map(|f| f.contribution).sum();

        assert_eq!(breakdown.factors.len(), 6);
        assert!((sum * 100.0 - breakdown.score).abs() < 0.05);
        assert_eq!(breakdown.level, classify(breakdown.score));
    }

    fn arb_signals() -> impl Strategy<Value = NormalizedSignals> {
        (
            0.0f64..=1.0,
            0.0f64..=1.0,
            0.0f64..=1.0,
            0.0f64..=1.0,
            0.0f64..=1.0,
            0.0f64..=1.0,
        )
            .prop_map(|(seismic, rain, soil, wind, humidity, temperature)| {
                NormalizedSignals {
                    seismic,
                    rain,
                    soil,
                    wind,
                    humidity,
                    temperature,
                }
            })
    }

    proptest! {
        #[test]
        fn prop_score_in_range(signals in arb_signals()) {
            let s = score(&signals, &RISK_WEIGHTS);
            prop_assert!((0.0..=100.0).contains(&s));
        }

        #[test]
        fn prop_score_is_deterministic(signals in arb_signals()) {
            prop_assert_eq!(score(&signals, &RISK_WEIGHTS), score(&signals, &RISK_WEIGHTS));
        }

        #[test]
        fn prop_classification_is_total(s in -1.0e3f64..1.0e3) {
            let level = classify(s);
            let expected = if s > 70.0 {
                RiskLevel::High
            } else if s > 45.0 {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            };
            prop_assert_eq!(level, expected);
        }

        #[test]
        fn prop_assess_bounded_for_raw_readings(
            wind in -50.0f64..200.0,
            humidity in -10.0f64..150.0,
            temperature in -60.0f64..80.0,
            rain in -5.0f64..500.0,
            moisture in -5.0f64..150.0,
            magnitude in -2.0f64..10.0,
        ) {
            let atmospheric = AtmosphericReading {
                temperature_c: Some(temperature),
                wind_speed_ms: Some(wind),
                humidity_pct: Some(humidity),
                rain_1h_mm: None,
                rain_3h_mm: None,
            };
            let soil = SoilReading {
                precipitation_24h_mm: Some(rain),
                soil_moisture_pct: Some(moisture),
            };
            let seismic = SeismicReading {
                strongest_magnitude: magnitude,
                event_count: 0,
                last_event: None,
            };
            let assessment = assess(Some(&atmospheric), Some(&soil), Some(&seismic));
            prop_assert!((0.0..=100.0).contains(&assessment.score));
            prop_assert_eq!(assessment.level, classify(assessment.score));
        }
    }
}
