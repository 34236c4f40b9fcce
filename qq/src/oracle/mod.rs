//! Wait-time oracle
//!
//! Answers "how long will the queue be at this attraction at this moment".
//! A fresh live snapshot is trusted first; otherwise a feature vector is
//! scored by the loaded regression model, and without a model a fixed
//! heuristic applies. Every answer carries its source so callers can tell
//! posted figures from guesses.

mod calendar;
mod config;
mod estimate;
mod estimator;
mod features;
mod forecast;
mod heuristic;
pub mod scan;
mod weather;

pub use calendar::{CrowdCalendar, HolidayCalendar};
pub use config::OracleConfig;
pub use estimate::{UNAVAILABLE_WAIT, WaitEstimate, WaitOracle, WaitSource};
pub use estimator::{EstimatorError, LinearEstimator, WaitEstimator, round_to_bucket};
pub use features::FeatureVector;
pub use forecast::{DEFAULT_FRESHNESS_MINUTES, ForecastOracle};
pub use heuristic::HeuristicConfig;
pub use weather::{SkyCondition, WeatherOverride};
