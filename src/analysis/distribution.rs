//! Station distribution across heat index tiers.

use serde::Serialize;

use crate::alert::thresholds::tier_for;
use crate::logging::{self, Source};
use crate::model::{HeatIndexTier, StationReading};

/// Number of stations in one tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierCount {
    pub tier: HeatIndexTier,
    pub label: &'static str,
    pub color: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierDistribution {
    /// Always one entry per tier, lowest severity first.
    pub counts: Vec<TierCount>,
    /// Readings whose temperature could not be classified.
    pub unclassified: usize,
}

impl TierDistribution {
    pub fn count_for(&self, tier: HeatIndexTier) -> usize {
        self.counts
            .iter()
            .find(|c| c.tier == tier)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    pub fn classified_total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }
}

/// Groups readings by tier. Non-finite temperatures are skipped, logged,
/// and counted as `unclassified`.
pub fn tier_distribution(readings: &[StationReading]) -> TierDistribution {
    let mut buckets = [0usize; 5];
    let mut unclassified = 0;

    for reading in readings {
        match tier_for(reading.temperature) {
            Ok(tier) => buckets[tier.severity_rank() as usize] += 1,
            Err(e) => {
                unclassified += 1;
                logging::log_failure(
                    Source::Classifier,
                    Some(reading.name.as_str()),
                    "distribution",
                    &e,
                );
            }
        }
    }

    let counts = HeatIndexTier::ALL
        .iter()
        .zip(buckets)
        .map(|(tier, count)| TierCount {
            tier: *tier,
            label: tier.label(),
            color: tier.color(),
            count,
        })
        .collect();

    TierDistribution { counts, unclassified }
}

/// Returns the readings ordered most severe first, hottest first within a
/// tier. Readings that cannot be classified sort last. The sort is stable,
/// so equal readings keep their input order.
pub fn sort_by_severity(readings: &[StationReading]) -> Vec<&StationReading> {
    let mut sorted: Vec<&StationReading> = readings.iter().collect();
    sorted.sort_by(|a, b| {
        let rank_a = tier_for(a.temperature).ok();
        let rank_b = tier_for(b.temperature).ok();
        rank_b
            .cmp(&rank_a)
            .then_with(|| match (rank_a, rank_b) {
                (Some(_), Some(_)) => b.temperature.total_cmp(&a.temperature),
                _ => std::cmp::Ordering::Equal,
            })
    });
    sorted
}
