/// Classifier property tests
///
/// These tests sweep the classifier across wide input ranges to check the
/// properties every consumer relies on:
/// 1. Totality: every finite value maps to exactly one tier
/// 2. Monotonicity: a hotter reading is never classified as less severe
/// 3. Boundary exactness at 27 / 33 / 42 / 52 °C
/// 4. Idempotence: the same input always yields the same record
/// 5. Non-finite input is rejected

use std::collections::HashSet;

use heatmon_service::alert::thresholds::tier_for;
use heatmon_service::{classify, Classification, HeatIndexTier, HeatmonError};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

/// -60.00 °C to 80.00 °C in 0.01 steps, computed from integers so every
/// threshold value is hit exactly.
fn sweep() -> impl Iterator<Item = f64> {
    (-6000..=8000).map(|i| i as f64 / 100.0)
}

fn rank(t: f64) -> u8 {
    classify(t)
        .unwrap_or_else(|e| panic!("classify({}) failed: {}", t, e))
        .severity_rank
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn test_every_finite_value_maps_to_one_of_five_tiers() {
    for t in sweep() {
        let c = classify(t).expect("finite input must classify");
        assert!(c.severity_rank <= 4, "rank out of range for {}", t);
        assert_eq!(HeatIndexTier::from_rank(c.severity_rank), Some(c.tier));
    }
}

#[test]
fn test_severity_never_decreases_as_temperature_rises() {
    let mut previous = (f64::MIN, rank(f64::MIN));
    for t in sweep() {
        let current = rank(t);
        assert!(
            current >= previous.1,
            "classify({}) = {} is less severe than classify({}) = {}",
            t,
            current,
            previous.0,
            previous.1
        );
        previous = (t, current);
    }
}

#[test]
fn test_reading_at_or_above_lower_bound_lands_in_tier_or_higher() {
    for t in sweep() {
        let c = classify(t).unwrap();
        if let Some(lower) = c.lower_bound_celsius {
            assert!(t >= lower, "{} is below its tier's lower bound {}", t, lower);
        }
        if let Some(next) = HeatIndexTier::from_rank(c.severity_rank + 1) {
            let next_lower = next.lower_bound_celsius().unwrap();
            assert!(t < next_lower, "{} should have reached tier {:?}", t, next);
        }
    }
}

#[test]
fn test_boundary_exactness() {
    let cases = [
        (52.0, 4),
        (51.999, 3),
        (42.0, 3),
        (41.999, 2),
        (33.0, 2),
        (32.999, 1),
        (27.0, 1),
        (26.999, 0),
    ];
    for (t, expected) in cases {
        assert_eq!(rank(t), expected, "classify({})", t);
    }
}

#[test]
fn test_repeated_calls_return_identical_records() {
    for t in [-5.0, 26.5, 27.0, 38.25, 42.0, 60.0] {
        let first: Classification = classify(t).unwrap();
        let second = classify(t).unwrap();
        assert_eq!(first, second, "classify({}) is not idempotent", t);
    }
}

#[test]
fn test_non_finite_input_is_rejected() {
    for t in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        match classify(t) {
            Err(HeatmonError::InvalidInput(_)) => {}
            other => panic!("classify({}) should be InvalidInput, got {:?}", t, other),
        }
        assert!(tier_for(t).is_err());
    }
}

// ---------------------------------------------------------------------------
// End-to-end scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_45_is_danger() {
    let c = classify(45.0).unwrap();
    assert_eq!((c.label, c.severity_rank, c.color), ("Danger", 3, "#DC143C"));
}

#[test]
fn test_scenario_25_is_not_hazardous() {
    let c = classify(25.0).unwrap();
    assert_eq!((c.label, c.severity_rank, c.color), ("Not Hazardous", 0, "#FFD700"));
}

#[test]
fn test_scenario_lower_bounds_are_inclusive() {
    assert_eq!(rank(27.0), 1);
    assert_eq!(rank(52.0), 4);
}

#[test]
fn test_each_tier_has_distinct_color_and_label() {
    let colors: HashSet<_> = HeatIndexTier::ALL.iter().map(|t| t.color()).collect();
    let labels: HashSet<_> = HeatIndexTier::ALL.iter().map(|t| t.label()).collect();
    assert_eq!(colors.len(), 5);
    assert_eq!(labels.len(), 5);
}
