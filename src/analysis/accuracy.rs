//! Forecast accuracy metrics.
//!
//! All metrics compare a forecast against the observed heat index for the
//! same station. Errors are `forecast - observed`, so a positive bias means
//! forecasts run hot.

use serde::Serialize;

use crate::model::{HeatmonError, StationReading};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyMetrics {
    /// Number of (observed, forecast) pairs the metrics were computed from.
    pub samples: usize,
    pub rmse: f64,
    pub mae: f64,
    /// Coefficient of determination. `None` when every observed value is
    /// identical, since R² is undefined with zero observed variance.
    pub r_squared: Option<f64>,
    pub bias: f64,
}

/// Computes RMSE, MAE, R² and bias over `(observed, forecast)` pairs.
pub fn forecast_accuracy(pairs: &[(f64, f64)]) -> Result<AccuracyMetrics, HeatmonError> {
    if pairs.is_empty() {
        return Err(HeatmonError::InsufficientData(
            "no observed/forecast pairs".to_string(),
        ));
    }
    if let Some(&(o, f)) = pairs.iter().find(|(o, f)| !o.is_finite() || !f.is_finite()) {
        return Err(HeatmonError::InvalidInput(if o.is_finite() { f } else { o }));
    }

    let n = pairs.len() as f64;
    let mean_observed = pairs.iter().map(|(o, _)| o).sum::<f64>() / n;

    let mut sum_err = 0.0;
    let mut sum_abs = 0.0;
    let mut sum_sq = 0.0;
    let mut sum_tot = 0.0;
    for &(observed, forecast) in pairs {
        let err = forecast - observed;
        sum_err += err;
        sum_abs += err.abs();
        sum_sq += err * err;
        sum_tot += (observed - mean_observed).powi(2);
    }

    let r_squared = if sum_tot > 0.0 {
        Some(1.0 - sum_sq / sum_tot)
    } else {
        None
    };

    Ok(AccuracyMetrics {
        samples: pairs.len(),
        rmse: (sum_sq / n).sqrt(),
        mae: sum_abs / n,
        r_squared,
        bias: sum_err / n,
    })
}

/// Accuracy of the daily forecast against the current reading, over the
/// readings that carry a daily forecast.
pub fn daily_forecast_accuracy(
    readings: &[StationReading],
) -> Result<AccuracyMetrics, HeatmonError> {
    let pairs: Vec<(f64, f64)> = readings
        .iter()
        .filter_map(|r| r.daily_forecast.map(|f| (r.temperature, f)))
        .collect();
    forecast_accuracy(&pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_perfect_forecast_has_zero_error() {
        let m = forecast_accuracy(&[(30.0, 30.0), (35.0, 35.0), (40.0, 40.0)]).unwrap();
        assert_eq!(m.samples, 3);
        assert!(approx(m.rmse, 0.0));
        assert!(approx(m.mae, 0.0));
        assert!(approx(m.bias, 0.0));
        assert!(approx(m.r_squared.unwrap(), 1.0));
    }

    #[test]
    fn test_metrics_on_known_values() {
        // errors: +2, -2, +2, +2
        let pairs = [(30.0, 32.0), (34.0, 32.0), (38.0, 40.0), (42.0, 44.0)];
        let m = forecast_accuracy(&pairs).unwrap();
        assert!(approx(m.rmse, 2.0));
        assert!(approx(m.mae, 2.0));
        assert!(approx(m.bias, 1.0));
        // mean observed 36, SS_tot = 36+4+4+36 = 80, SS_res = 16
        assert!(approx(m.r_squared.unwrap(), 0.8));
    }

    #[test]
    fn test_r_squared_undefined_for_constant_observations() {
        let m = forecast_accuracy(&[(36.0, 35.0), (36.0, 37.0)]).unwrap();
        assert_eq!(m.r_squared, None);
        assert!(approx(m.rmse, 1.0));
        assert!(approx(m.bias, 0.0));
    }

    #[test]
    fn test_empty_input_is_insufficient_data() {
        assert!(matches!(
            forecast_accuracy(&[]),
            Err(HeatmonError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        assert!(matches!(
            forecast_accuracy(&[(30.0, f64::NAN)]),
            Err(HeatmonError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_daily_accuracy_ignores_readings_without_forecast() {
        let readings = vec![
            StationReading::new("a", 14.0, 121.0, 40.0).with_forecasts(Some(41.0), None),
            StationReading::new("b", 14.0, 121.0, 30.0),
            StationReading::new("c", 14.0, 121.0, 42.0).with_forecasts(Some(43.0), Some(42.0)),
        ];
        let m = daily_forecast_accuracy(&readings).unwrap();
        assert_eq!(m.samples, 2);
        assert!(approx(m.bias, 1.0));
    }
}
