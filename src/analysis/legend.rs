//! Classification legend rows.

use serde::Serialize;

use crate::model::HeatIndexTier;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendRow {
    pub tier: HeatIndexTier,
    pub label: &'static str,
    /// Human-readable range, e.g. `"27 - 32°C"`.
    pub range: String,
    pub color: &'static str,
}

/// Range text for a tier. Readings are whole degrees on the dashboard, so
/// the upper end shown is one below the next tier's threshold.
pub fn range_text(tier: HeatIndexTier) -> String {
    let next_lower = HeatIndexTier::from_rank(tier.severity_rank() + 1)
        .and_then(HeatIndexTier::lower_bound_celsius);
    match (tier.lower_bound_celsius(), next_lower) {
        (None, Some(upper)) => format!("< {}°C", upper),
        (Some(lower), Some(upper)) => format!("{} - {}°C", lower, upper - 1.0),
        (Some(lower), None) => format!("≥ {}°C", lower),
        (None, None) => "all values".to_string(),
    }
}

/// One row per tier, most severe first.
pub fn legend_rows() -> Vec<LegendRow> {
    HeatIndexTier::ALL
        .iter()
        .rev()
        .map(|&tier| LegendRow {
            tier,
            label: tier.label(),
            range: range_text(tier),
            color: tier.color(),
        })
        .collect()
}
