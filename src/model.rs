/// StationReading, HeatIndexTier, Classification, HeatmonError
/// core data structures and error handling
///
/// Core data types for the Philippine heat index monitoring service.
///
/// This module defines the shared domain model imported by all other modules.
/// The only logic here is record validation and the per-tier lookup tables;
/// the threshold ladder itself lives in `alert::thresholds`.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Reading types
// ---------------------------------------------------------------------------

/// One weather station's current heat index and optional forecasts.
///
/// Readings are values: a new observation is a new record, never a mutation
/// of an existing one. `name` is the lookup key used by the dashboard and
/// must be unique within any list (see `stations::validate_station_list`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationReading {
    pub name: String,
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
    /// Heat index in degrees Celsius.
    #[serde(alias = "temp")]
    pub temperature: f64,
    #[serde(default, alias = "dailyForecast", skip_serializing_if = "Option::is_none")]
    pub daily_forecast: Option<f64>,
    #[serde(default, alias = "weeklyForecast", skip_serializing_if = "Option::is_none")]
    pub weekly_forecast: Option<f64>,
}

impl StationReading {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, temperature: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            temperature,
            daily_forecast: None,
            weekly_forecast: None,
        }
    }

    /// Returns a copy of this reading carrying the given forecasts.
    pub fn with_forecasts(mut self, daily: Option<f64>, weekly: Option<f64>) -> Self {
        self.daily_forecast = daily;
        self.weekly_forecast = weekly;
        self
    }

    /// Checks the per-record invariants: non-empty name, WGS84 coordinate
    /// ranges, and finite temperature and forecast values.
    ///
    /// Uniqueness of `name` is a property of a list, not a record, and is
    /// checked by `stations::validate_station_list`.
    pub fn validate(&self) -> Result<(), HeatmonError> {
        let invalid = |reason: String| HeatmonError::InvalidStation {
            name: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty".to_string()));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(invalid(format!("latitude {} outside [-90, 90]", self.latitude)));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(invalid(format!("longitude {} outside [-180, 180]", self.longitude)));
        }
        if !self.temperature.is_finite() {
            return Err(invalid(format!("temperature {} is not finite", self.temperature)));
        }
        for (label, value) in [
            ("daily forecast", self.daily_forecast),
            ("weekly forecast", self.weekly_forecast),
        ] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(invalid(format!("{} {} is not finite", label, v)));
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Classification types
// ---------------------------------------------------------------------------

/// Heat index classification tiers, in ascending order of severity.
///
/// Wording follows the PAGASA heat index advisory scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeatIndexTier {
    NotHazardous,
    Caution,
    ExtremeCaution,
    Danger,
    ExtremeDanger,
}

impl HeatIndexTier {
    /// All tiers, lowest severity first.
    pub const ALL: [HeatIndexTier; 5] = [
        HeatIndexTier::NotHazardous,
        HeatIndexTier::Caution,
        HeatIndexTier::ExtremeCaution,
        HeatIndexTier::Danger,
        HeatIndexTier::ExtremeDanger,
    ];

    /// Ordinal 0 (lowest) to 4 (highest).
    pub fn severity_rank(self) -> u8 {
        match self {
            HeatIndexTier::NotHazardous => 0,
            HeatIndexTier::Caution => 1,
            HeatIndexTier::ExtremeCaution => 2,
            HeatIndexTier::Danger => 3,
            HeatIndexTier::ExtremeDanger => 4,
        }
    }

    pub fn from_rank(rank: u8) -> Option<HeatIndexTier> {
        HeatIndexTier::ALL.get(rank as usize).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            HeatIndexTier::NotHazardous => "Not Hazardous",
            HeatIndexTier::Caution => "Caution",
            HeatIndexTier::ExtremeCaution => "Extreme Caution",
            HeatIndexTier::Danger => "Danger",
            HeatIndexTier::ExtremeDanger => "Extreme Danger",
        }
    }

    /// Marker and legend color as a `#RRGGBB` hex string.
    pub fn color(self) -> &'static str {
        match self {
            HeatIndexTier::NotHazardous => "#FFD700",
            HeatIndexTier::Caution => "#FFA500",
            HeatIndexTier::ExtremeCaution => "#FF4500",
            HeatIndexTier::Danger => "#DC143C",
            HeatIndexTier::ExtremeDanger => "#8B0000",
        }
    }

    /// Inclusive lower threshold in °C. The lowest tier is unbounded below.
    pub fn lower_bound_celsius(self) -> Option<f64> {
        match self {
            HeatIndexTier::NotHazardous => None,
            HeatIndexTier::Caution => Some(27.0),
            HeatIndexTier::ExtremeCaution => Some(33.0),
            HeatIndexTier::Danger => Some(42.0),
            HeatIndexTier::ExtremeDanger => Some(52.0),
        }
    }

    pub fn health_effects(self) -> &'static str {
        match self {
            HeatIndexTier::NotHazardous => "No significant health effects expected.",
            HeatIndexTier::Caution => {
                "Fatigue is possible with prolonged exposure and activity. \
                 Continuing activity could result in heat cramps."
            }
            HeatIndexTier::ExtremeCaution => {
                "Heat cramps and heat exhaustion are possible. \
                 Continuing activity could result in heat stroke."
            }
            HeatIndexTier::Danger => {
                "Heat cramps and heat exhaustion are likely; \
                 heat stroke is probable with continued activity."
            }
            HeatIndexTier::ExtremeDanger => {
                "Heat stroke is imminent. Avoid prolonged exposure to heat."
            }
        }
    }

    pub fn recommended_action(self) -> &'static str {
        match self {
            HeatIndexTier::NotHazardous => "Enjoy outdoor activities with normal precautions.",
            HeatIndexTier::Caution => {
                "Stay hydrated during outdoor activities. Take breaks when needed."
            }
            HeatIndexTier::ExtremeCaution => {
                "Take precautions when working outdoors. Drink water regularly. \
                 Wear light-colored clothing."
            }
            HeatIndexTier::Danger => {
                "Limit outdoor activities. Stay hydrated. \
                 Take frequent breaks in shaded or air-conditioned areas."
            }
            HeatIndexTier::ExtremeDanger => {
                "Stay indoors in air-conditioned areas. Drink plenty of water. \
                 Avoid strenuous activities."
            }
        }
    }
}

impl std::fmt::Display for HeatIndexTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Display data derived from a heat index value. Computed on demand by
/// `alert::thresholds::classify`; never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub tier: HeatIndexTier,
    pub label: &'static str,
    pub severity_rank: u8,
    pub color: &'static str,
    pub lower_bound_celsius: Option<f64>,
    pub health_effects: &'static str,
    pub recommended_action: &'static str,
}

impl From<HeatIndexTier> for Classification {
    fn from(tier: HeatIndexTier) -> Self {
        Classification {
            tier,
            label: tier.label(),
            severity_rank: tier.severity_rank(),
            color: tier.color(),
            lower_bound_celsius: tier.lower_bound_celsius(),
            health_effects: tier.health_effects(),
            recommended_action: tier.recommended_action(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised while classifying, loading or querying station data.
#[derive(Debug, thiserror::Error)]
pub enum HeatmonError {
    /// The classifier received NaN or an infinite value.
    #[error("Invalid input: heat index {0} is not a finite number")]
    InvalidInput(f64),

    #[error("Invalid station '{name}': {reason}")]
    InvalidStation { name: String, reason: String },

    #[error("Duplicate station name: {0}")]
    DuplicateStation(String),

    #[error("Station list is empty")]
    EmptyStationList,

    #[error("Unknown station: {0}")]
    UnknownStation(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid trend point for month {month}: {reason}")]
    InvalidTrendPoint { month: u8, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> StationReading {
        StationReading::new("Science Garden, Pasay City", 14.645072, 121.044282, 36.0)
    }

    #[test]
    fn test_valid_reading_passes_validation() {
        assert!(reading().validate().is_ok());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut r = reading();
        r.name = "   ".to_string();
        assert!(matches!(r.validate(), Err(HeatmonError::InvalidStation { .. })));
    }

    #[test]
    fn test_out_of_range_coordinates_are_rejected() {
        let mut r = reading();
        r.latitude = 90.5;
        assert!(r.validate().is_err(), "latitude above 90 must be rejected");

        let mut r = reading();
        r.longitude = -180.01;
        assert!(r.validate().is_err(), "longitude below -180 must be rejected");
    }

    #[test]
    fn test_coordinate_extremes_are_accepted() {
        let r = StationReading::new("Pole", -90.0, 180.0, 10.0);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_non_finite_forecast_is_rejected() {
        let r = reading().with_forecasts(Some(f64::NAN), None);
        let err = r.validate().unwrap_err();
        assert!(err.to_string().contains("daily forecast"), "got: {}", err);
    }

    #[test]
    fn test_tier_ranks_follow_declaration_order() {
        for (i, tier) in HeatIndexTier::ALL.iter().enumerate() {
            assert_eq!(tier.severity_rank() as usize, i);
            assert_eq!(HeatIndexTier::from_rank(i as u8), Some(*tier));
        }
        assert_eq!(HeatIndexTier::from_rank(5), None);
        assert!(HeatIndexTier::Caution < HeatIndexTier::ExtremeDanger);
    }

    #[test]
    fn test_lower_bounds_are_strictly_ascending() {
        let bounds: Vec<f64> = HeatIndexTier::ALL
            .iter()
            .filter_map(|t| t.lower_bound_celsius())
            .collect();
        assert_eq!(bounds, vec![27.0, 33.0, 42.0, 52.0]);
    }

    #[test]
    fn test_reading_deserializes_from_dashboard_field_names() {
        let json = r#"{"name":"Baler, Aurora","temp":42,"dailyForecast":42,
                       "weeklyForecast":41,"lat":15.7592,"lng":121.5605}"#;
        let r: StationReading = serde_json::from_str(json).expect("aliases should be accepted");
        assert_eq!(r.temperature, 42.0);
        assert_eq!(r.daily_forecast, Some(42.0));
        assert_eq!(r.weekly_forecast, Some(41.0));
        assert_eq!(r.longitude, 121.5605);
    }
}
