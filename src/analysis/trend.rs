//! Monthly heat index trend.
//!
//! Input is a `(month, heat_index)` series with months 1-12. Points come
//! back ordered by month, each with its classification, so a chart can
//! color the line or individual points by tier.

use serde::Serialize;

use crate::alert::thresholds::classify;
use crate::model::{Classification, HeatmonError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// 1 = January.
    pub month: u8,
    pub heat_index: f64,
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    points: Vec<TrendPoint>,
    #[serde(skip)]
    peak_index: usize,
}

impl TrendSeries {
    /// Points ordered by month, never empty, no month repeated.
    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    /// Hottest point. The earliest month wins a tie.
    pub fn peak(&self) -> &TrendPoint {
        &self.points[self.peak_index]
    }

    /// Point with the highest month number.
    pub fn latest(&self) -> &TrendPoint {
        &self.points[self.points.len() - 1]
    }
}

/// Classifies every point of a monthly series.
///
/// Fails on an empty series, a month outside 1-12, a repeated month, or a
/// non-finite heat index.
pub fn monthly_trend(series: &[(u8, f64)]) -> Result<TrendSeries, HeatmonError> {
    if series.is_empty() {
        return Err(HeatmonError::InsufficientData("empty trend series".to_string()));
    }

    let mut points = Vec::with_capacity(series.len());
    for &(month, heat_index) in series {
        if !(1..=12).contains(&month) {
            return Err(HeatmonError::InvalidTrendPoint {
                month,
                reason: "month must be between 1 and 12".to_string(),
            });
        }
        points.push(TrendPoint {
            month,
            heat_index,
            classification: classify(heat_index)?,
        });
    }

    points.sort_by_key(|p| p.month);
    if let Some(pair) = points.windows(2).find(|w| w[0].month == w[1].month) {
        return Err(HeatmonError::InvalidTrendPoint {
            month: pair[0].month,
            reason: "month appears more than once".to_string(),
        });
    }

    let mut peak_index = 0;
    for (i, p) in points.iter().enumerate() {
        if p.heat_index > points[peak_index].heat_index {
            peak_index = i;
        }
    }

    Ok(TrendSeries { points, peak_index })
}
