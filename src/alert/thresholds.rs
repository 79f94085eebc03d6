//! Heat index threshold classification.
//!
//! A descending ladder of inclusive lower bounds, highest tier first. The
//! first rung the reading reaches wins, so every finite value maps to
//! exactly one tier and exact boundary values land in the higher tier
//! (42.0 is Danger, not Extreme Caution).

use crate::model::{Classification, HeatIndexTier, HeatmonError, StationReading};

/// Inclusive lower thresholds in °C, evaluated top to bottom. Anything
/// below the last rung is `NotHazardous`.
const TIER_LADDER: [(f64, HeatIndexTier); 4] = [
    (52.0, HeatIndexTier::ExtremeDanger),
    (42.0, HeatIndexTier::Danger),
    (33.0, HeatIndexTier::ExtremeCaution),
    (27.0, HeatIndexTier::Caution),
];

/// Maps a heat index value to its tier.
///
/// Returns `InvalidInput` for NaN and ±∞ rather than silently placing them
/// in a tier.
pub fn tier_for(heat_index_c: f64) -> Result<HeatIndexTier, HeatmonError> {
    if !heat_index_c.is_finite() {
        return Err(HeatmonError::InvalidInput(heat_index_c));
    }
    Ok(TIER_LADDER
        .iter()
        .find(|(lower, _)| heat_index_c >= *lower)
        .map(|(_, tier)| *tier)
        .unwrap_or(HeatIndexTier::NotHazardous))
}

/// Classifies a heat index value into its full display record.
pub fn classify(heat_index_c: f64) -> Result<Classification, HeatmonError> {
    tier_for(heat_index_c).map(Classification::from)
}

/// Classifies a station's current heat index.
pub fn classify_reading(reading: &StationReading) -> Result<Classification, HeatmonError> {
    classify(reading.temperature)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
