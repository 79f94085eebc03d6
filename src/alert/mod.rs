pub mod thresholds;

pub use thresholds::{classify, classify_reading, tier_for};
