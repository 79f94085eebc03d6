/// Station registry, the "unique name" and coordinate tests live here.
///
/// Station registry for the Philippine heat index monitoring service.
///
/// Defines the canonical list of PAGASA synoptic stations shown on the
/// dashboard, along with placeholder heat index values used until a real
/// data feed is wired in. Station lists can also be loaded from a TOML file;
/// every list, built-in or loaded, goes through `validate_station_list`.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::logging::{self, Source};
use crate::model::{HeatmonError, StationReading};

// ---------------------------------------------------------------------------
// Station metadata
// ---------------------------------------------------------------------------

/// Metadata for a single synoptic station.
pub struct Station {
    /// Station name as published by PAGASA; unique within the registry.
    pub name: &'static str,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    /// Placeholder current heat index, °C.
    pub sample_heat_index: f64,
    /// Placeholder (daily, weekly) forecast, where the dashboard showed one.
    pub sample_forecast: Option<(f64, f64)>,
}

impl Station {
    /// The station's placeholder data as a reading value.
    pub fn sample_reading(&self) -> StationReading {
        StationReading::new(self.name, self.latitude, self.longitude, self.sample_heat_index)
            .with_forecasts(
                self.sample_forecast.map(|(daily, _)| daily),
                self.sample_forecast.map(|(_, weekly)| weekly),
            )
    }
}

/// PAGASA synoptic stations on Luzon and nearby islands, alphabetical.
pub static STATION_REGISTRY: &[Station] = &[
    Station { name: "Ambulong, Batangas", latitude: 14.09008056, longitude: 121.0552444, sample_heat_index: 40.0, sample_forecast: Some((41.0, 39.0)) },
    Station { name: "Aparri, Cagayan", latitude: 18.360059, longitude: 121.630454, sample_heat_index: 38.0, sample_forecast: None },
    Station { name: "Baguio City, Benguet", latitude: 16.403992, longitude: 120.60147, sample_heat_index: 42.0, sample_forecast: Some((43.0, 42.0)) },
    Station { name: "Baler, Aurora", latitude: 15.748809, longitude: 121.632028, sample_heat_index: 32.0, sample_forecast: Some((42.0, 41.0)) },
    Station { name: "Basco, Batanes", latitude: 20.427284, longitude: 121.970536, sample_heat_index: 38.0, sample_forecast: Some((39.0, 38.0)) },
    Station { name: "Calapan City, Oriental Mindoro", latitude: 13.409775, longitude: 121.1896667, sample_heat_index: 30.0, sample_forecast: None },
    Station { name: "Clark Airport, Pampanga", latitude: 15.1717, longitude: 120.5600, sample_heat_index: 33.0, sample_forecast: Some((47.0, 45.0)) },
    Station { name: "Daet, Camarines Norte", latitude: 14.128689, longitude: 122.982559, sample_heat_index: 31.0, sample_forecast: Some((45.0, 44.0)) },
    Station { name: "Dagupan City, Pangasinan", latitude: 16.086784, longitude: 120.352045, sample_heat_index: 38.0, sample_forecast: Some((49.0, 47.0)) },
    Station { name: "Iba, Zambales", latitude: 15.328408, longitude: 119.965661, sample_heat_index: 32.0, sample_forecast: Some((43.0, 42.0)) },
    Station { name: "Infanta, Quezon", latitude: 14.74663611, longitude: 121.6490333, sample_heat_index: 39.0, sample_forecast: Some((41.0, 40.0)) },
    Station { name: "Laoag City, Ilocos Norte", latitude: 18.183016, longitude: 120.534723, sample_heat_index: 40.0, sample_forecast: None },
    Station { name: "Legazpi City, Albay", latitude: 13.150937, longitude: 123.728605, sample_heat_index: 32.0, sample_forecast: None },
    Station { name: "NAIA - Pasay City, Metro Manila", latitude: 14.5047, longitude: 121.004751, sample_heat_index: 33.0, sample_forecast: None },
    Station { name: "Port Area, Manila", latitude: 14.58841, longitude: 120.967866, sample_heat_index: 35.0, sample_forecast: None },
    Station { name: "Puerto Princesa City, Palawan", latitude: 9.740134, longitude: 118.758613, sample_heat_index: 36.0, sample_forecast: None },
    Station { name: "San Jose, Occidental Mindoro", latitude: 12.359602, longitude: 121.04788, sample_heat_index: 34.0, sample_forecast: None },
    Station { name: "Sangley Point, Cavite City", latitude: 14.494953, longitude: 120.906838, sample_heat_index: 37.0, sample_forecast: None },
    Station { name: "Science Garden, Pasay City", latitude: 14.645072, longitude: 121.044282, sample_heat_index: 36.0, sample_forecast: Some((45.0, 45.0)) },
    Station { name: "Sinait, Ilocos Sur", latitude: 17.89019, longitude: 120.459762, sample_heat_index: 32.0, sample_forecast: None },
    Station { name: "Tanay, Rizal", latitude: 14.581167, longitude: 121.36927, sample_heat_index: 33.0, sample_forecast: None },
    Station { name: "Tayabas City, Quezon", latitude: 14.018428, longitude: 121.596575, sample_heat_index: 35.0, sample_forecast: None },
    Station { name: "Tuguegarao City, Cagayan", latitude: 17.647678, longitude: 121.758469, sample_heat_index: 30.0, sample_forecast: None },
    Station { name: "Virac, Catanduanes", latitude: 13.576558, longitude: 124.209834, sample_heat_index: 38.0, sample_forecast: None },
];

/// Station the dashboard opens on when the built-in registry is used.
pub const DEFAULT_STATION: &str = "Science Garden, Pasay City";

/// Placeholder monthly heat index trend, (month, °C), January first.
pub static SAMPLE_MONTHLY_TREND: [(u8, f64); 12] = [
    (1, 38.0), (2, 32.0), (3, 41.0), (4, 45.0), (5, 40.0), (6, 35.0),
    (7, 37.0), (8, 39.0), (9, 40.0), (10, 39.0), (11, 37.0), (12, 36.0),
];

/// Returns the names of all registry stations, in registry order.
pub fn all_station_names() -> Vec<&'static str> {
    STATION_REGISTRY.iter().map(|s| s.name).collect()
}

/// Looks up a station by exact name. Returns `None` if not found.
pub fn find_station(name: &str) -> Option<&'static Station> {
    STATION_REGISTRY.iter().find(|s| s.name == name)
}

/// The registry's placeholder data as reading values, one per station.
pub fn sample_readings() -> Vec<StationReading> {
    STATION_REGISTRY.iter().map(Station::sample_reading).collect()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Checks every record's invariants plus name uniqueness across the list.
///
/// An empty list is rejected: the dashboard always needs a default station.
pub fn validate_station_list(readings: &[StationReading]) -> Result<(), HeatmonError> {
    if readings.is_empty() {
        return Err(HeatmonError::EmptyStationList);
    }
    let mut seen = HashSet::new();
    for reading in readings {
        reading.validate()?;
        if !seen.insert(reading.name.as_str()) {
            return Err(HeatmonError::DuplicateStation(reading.name.clone()));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// TOML loading
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct StationFile {
    #[serde(default, rename = "station")]
    stations: Vec<StationReading>,
}

/// Parses `[[station]]` tables from a TOML document and validates the list.
///
/// ```toml
/// [[station]]
/// name = "Baler, Aurora"
/// latitude = 15.748809
/// longitude = 121.632028
/// temperature = 32.0
/// daily_forecast = 42.0
/// ```
pub fn parse_stations(toml_str: &str) -> Result<Vec<StationReading>, HeatmonError> {
    let file: StationFile = toml::from_str(toml_str)
        .map_err(|e| HeatmonError::Config(format!("invalid station file: {}", e)))?;
    validate_station_list(&file.stations)?;
    Ok(file.stations)
}

/// Reads and parses a station file from disk.
pub fn load_stations(path: &Path) -> Result<Vec<StationReading>, HeatmonError> {
    let contents = std::fs::read_to_string(path)?;
    let stations = parse_stations(&contents)?;
    logging::info(
        Source::Stations,
        None,
        &format!("Loaded {} stations from {}", stations.len(), path.display()),
    );
    Ok(stations)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
