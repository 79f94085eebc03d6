/// Derived views over a station list.
///
/// - `distribution`: station counts per tier and severity ordering
/// - `accuracy`: forecast error metrics (RMSE, MAE, R², bias)
/// - `legend`: classification legend rows
/// - `trend`: classified monthly heat index series

pub mod accuracy;
pub mod distribution;
pub mod legend;
pub mod trend;
