/// Dashboard controller state.
///
/// Owns the station list and the user's current selections (station and
/// date). View code borrows from a `DashboardState` to build map markers
/// and the current-station summary; nothing here renders.

use chrono::NaiveDate;
use serde::Serialize;

use crate::alert::thresholds::classify;
use crate::logging::{self, Source};
use crate::model::{Classification, HeatmonError, StationReading};
use crate::stations::{self, validate_station_list};

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// Styling data for one station marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView<'a> {
    pub name: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    pub color: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Everything the current-station card shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSummary<'a> {
    pub date: NaiveDate,
    pub reading: &'a StationReading,
    pub classification: Classification,
    /// Classification of the daily forecast, when one exists and is finite.
    pub daily_forecast: Option<Classification>,
    pub weekly_forecast: Option<Classification>,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DashboardState {
    readings: Vec<StationReading>,
    selected: usize,
    date: NaiveDate,
}

impl DashboardState {
    /// Validates the list and selects its first station.
    pub fn new(readings: Vec<StationReading>, date: NaiveDate) -> Result<Self, HeatmonError> {
        validate_station_list(&readings)?;
        Ok(Self {
            readings,
            selected: 0,
            date,
        })
    }

    /// The built-in registry, opened on `stations::DEFAULT_STATION`.
    pub fn from_registry(date: NaiveDate) -> Result<Self, HeatmonError> {
        let mut state = Self::new(stations::sample_readings(), date)?;
        state.select_station(stations::DEFAULT_STATION)?;
        Ok(state)
    }

    pub fn readings(&self) -> &[StationReading] {
        &self.readings
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.date
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Parses a `YYYY-MM-DD` date as produced by an HTML date input.
    pub fn select_date_str(&mut self, text: &str) -> Result<(), HeatmonError> {
        let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map_err(|_| HeatmonError::InvalidDate(text.to_string()))?;
        self.select_date(date);
        Ok(())
    }

    /// Selects a station by exact name. The previous selection is kept on
    /// error.
    pub fn select_station(&mut self, name: &str) -> Result<&StationReading, HeatmonError> {
        let index = self
            .readings
            .iter()
            .position(|r| r.name == name)
            .ok_or_else(|| HeatmonError::UnknownStation(name.to_string()))?;
        self.selected = index;
        logging::debug(Source::Dashboard, Some(name), "station selected");
        Ok(&self.readings[index])
    }

    pub fn current_reading(&self) -> &StationReading {
        &self.readings[self.selected]
    }

    pub fn current_summary(&self) -> Result<StationSummary<'_>, HeatmonError> {
        let reading = self.current_reading();
        let forecast = |value: Option<f64>| value.and_then(|v| classify(v).ok());
        Ok(StationSummary {
            date: self.date,
            reading,
            classification: classify(reading.temperature)?,
            daily_forecast: forecast(reading.daily_forecast),
            weekly_forecast: forecast(reading.weekly_forecast),
        })
    }

    /// One marker per station, in list order. `new` has already rejected
    /// non-finite temperatures, so no station is left without a marker.
    pub fn markers(&self) -> Vec<MarkerView<'_>> {
        let current = &self.current_reading().name;
        self.readings
            .iter()
            .filter_map(|reading| {
                let c = classify(reading.temperature).ok()?;
                Some(MarkerView {
                    name: &reading.name,
                    latitude: reading.latitude,
                    longitude: reading.longitude,
                    temperature: reading.temperature,
                    color: c.color,
                    label: c.label,
                    selected: &reading.name == current,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeatIndexTier;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
    }

    fn readings() -> Vec<StationReading> {
        vec![
            StationReading::new("Ambulong, Batangas", 14.09, 121.05, 40.0)
                .with_forecasts(Some(41.0), Some(39.0)),
            StationReading::new("Baguio City, Benguet", 16.40, 120.60, 42.0),
            StationReading::new("Calapan City, Oriental Mindoro", 13.41, 121.19, 30.0),
        ]
    }

    #[test]
    fn test_new_selects_first_station() {
        let state = DashboardState::new(readings(), date()).unwrap();
        assert_eq!(state.current_reading().name, "Ambulong, Batangas");
        assert_eq!(state.selected_date(), date());
    }

    #[test]
    fn test_registry_opens_on_default_station() {
        let state = DashboardState::from_registry(date()).unwrap();
        assert_eq!(state.current_reading().name, "Science Garden, Pasay City");
        let markers = state.markers();
        assert_eq!(markers.len(), state.readings().len());
        let selected: Vec<_> = markers.iter().filter(|m| m.selected).map(|m| m.name).collect();
        assert_eq!(selected, vec!["Science Garden, Pasay City"]);
    }

    #[test]
    fn test_new_rejects_non_finite_temperature() {
        let mut list = readings();
        list.push(StationReading::new("Broken", 14.0, 121.0, f64::NAN));
        assert!(matches!(
            DashboardState::new(list, date()),
            Err(HeatmonError::InvalidStation { .. })
        ));
    }

    #[test]
    fn test_new_rejects_empty_list() {
        assert!(matches!(
            DashboardState::new(Vec::new(), date()),
            Err(HeatmonError::EmptyStationList)
        ));
    }

    #[test]
    fn test_select_unknown_station_keeps_previous_selection() {
        let mut state = DashboardState::new(readings(), date()).unwrap();
        state.select_station("Baguio City, Benguet").unwrap();
        let err = state.select_station("Atlantis").unwrap_err();
        assert!(matches!(err, HeatmonError::UnknownStation(_)));
        assert_eq!(state.current_reading().name, "Baguio City, Benguet");
    }

    #[test]
    fn test_select_date_str_parses_iso_dates() {
        let mut state = DashboardState::new(readings(), date()).unwrap();
        state.select_date_str("2026-04-15").unwrap();
        assert_eq!(state.selected_date(), NaiveDate::from_ymd_opt(2026, 4, 15).unwrap());

        assert!(matches!(
            state.select_date_str("15/04/2026"),
            Err(HeatmonError::InvalidDate(_))
        ));
        assert_eq!(state.selected_date(), NaiveDate::from_ymd_opt(2026, 4, 15).unwrap());
    }

    #[test]
    fn test_summary_classifies_reading_and_forecasts() {
        let state = DashboardState::new(readings(), date()).unwrap();
        let summary = state.current_summary().unwrap();
        assert_eq!(summary.classification.tier, HeatIndexTier::ExtremeCaution);
        assert_eq!(summary.daily_forecast.map(|c| c.tier), Some(HeatIndexTier::ExtremeCaution));
        assert_eq!(summary.weekly_forecast.map(|c| c.severity_rank), Some(2));
    }

    #[test]
    fn test_markers_follow_selection() {
        let mut state = DashboardState::new(readings(), date()).unwrap();
        state.select_station("Calapan City, Oriental Mindoro").unwrap();
        let markers = state.markers();
        assert_eq!(markers.len(), 3);
        let selected: Vec<_> = markers.iter().filter(|m| m.selected).map(|m| m.name).collect();
        assert_eq!(selected, vec!["Calapan City, Oriental Mindoro"]);
        assert_eq!(markers[1].color, "#DC143C");
        assert_eq!(markers[2].label, "Caution");
    }
}
