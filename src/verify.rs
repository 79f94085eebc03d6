//! Station Data Verification Module
//!
//! Checks a station list record by record and reports which stations are
//! fully usable, which are usable but missing forecasts, and which are
//! invalid. Unlike `stations::validate_station_list`, this never stops at
//! the first bad record.
//!
//! Use this before switching the dashboard to a new station file.

use std::collections::HashSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::alert::thresholds::tier_for;
use crate::logging::{self, Source};
use crate::model::{HeatIndexTier, HeatmonError, StationReading};

// ============================================================================
// Verification Results
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// RFC 3339 time the report was produced.
    pub timestamp: String,
    pub results: Vec<StationVerification>,
    pub summary: VerificationSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub complete: usize,
    pub partial: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationVerification {
    pub name: String,
    pub status: VerificationStatus,
    pub tier: Option<HeatIndexTier>,
    pub has_daily_forecast: bool,
    pub has_weekly_forecast: bool,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum VerificationStatus {
    /// Valid record with both forecasts.
    Success,
    /// Valid record missing at least one forecast.
    PartialSuccess,
    Failed,
}

impl VerificationReport {
    pub fn to_json(&self) -> Result<String, HeatmonError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| HeatmonError::Config(format!("failed to serialize report: {}", e)))
    }
}

// ============================================================================
// Verification
// ============================================================================

pub fn verify_reading(reading: &StationReading) -> StationVerification {
    let mut result = StationVerification {
        name: reading.name.clone(),
        status: VerificationStatus::Failed,
        tier: None,
        has_daily_forecast: reading.daily_forecast.is_some(),
        has_weekly_forecast: reading.weekly_forecast.is_some(),
        error_message: None,
    };

    match reading.validate().and_then(|_| tier_for(reading.temperature)) {
        Ok(tier) => {
            result.tier = Some(tier);
            result.status = if result.has_daily_forecast && result.has_weekly_forecast {
                VerificationStatus::Success
            } else {
                VerificationStatus::PartialSuccess
            };
        }
        Err(e) => {
            logging::log_failure(Source::Stations, Some(reading.name.as_str()), "verify", &e);
            result.error_message = Some(e.to_string());
        }
    }

    result
}

/// Verifies every reading. A repeated name fails every occurrence after
/// the first.
pub fn verify_readings(readings: &[StationReading]) -> VerificationReport {
    let mut seen = HashSet::new();
    let results: Vec<StationVerification> = readings
        .iter()
        .map(|reading| {
            let mut result = verify_reading(reading);
            if !seen.insert(reading.name.as_str()) && result.status != VerificationStatus::Failed {
                let err = HeatmonError::DuplicateStation(reading.name.clone());
                logging::log_failure(Source::Stations, Some(reading.name.as_str()), "verify", &err);
                result.status = VerificationStatus::Failed;
                result.error_message = Some(err.to_string());
            }
            result
        })
        .collect();

    let count = |status: VerificationStatus| results.iter().filter(|r| r.status == status).count();
    let summary = VerificationSummary {
        total: results.len(),
        complete: count(VerificationStatus::Success),
        partial: count(VerificationStatus::PartialSuccess),
        failed: count(VerificationStatus::Failed),
    };

    logging::log_summary(
        Source::Stations,
        "Verification",
        summary.total,
        summary.complete + summary.partial,
        summary.failed,
    );

    VerificationReport {
        timestamp: Utc::now().to_rfc3339(),
        results,
        summary,
    }
}
