//! Heat index classification and station data for the Philippine heat
//! index dashboard.
//!
//! The core is `alert::thresholds::classify`, a total function from a heat
//! index in °C to one of five PAGASA advisory tiers. Everything else builds
//! on it: the station registry, dashboard state, distribution and accuracy
//! views, and station file verification.

pub mod alert;
pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod model;
pub mod stations;
pub mod verify;

pub use alert::thresholds::{classify, classify_reading};
pub use model::{Classification, HeatIndexTier, HeatmonError, StationReading};
