//! Deterministic wait estimate used when no model is loaded

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use venuecatalog::Attraction;

use super::estimator::round_to_bucket;
use super::weather::WeatherOverride;

/// Heuristic wait constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HeuristicConfig {
    pub base_minutes: f64,

    /// Added inside the midday peak window
    pub peak_bonus_minutes: f64,

    /// Peak window as [start, end) hours
    pub peak_start_hour: u32,
    pub peak_end_hour: u32,

    /// Multiplier on crowd-risk days
    pub crowd_factor: f64,

    /// Precipitation at which outdoor queues thin out
    pub heavy_rain_mm: f64,
    pub rain_factor: f64,

    /// Temperature at which every queue thins out
    pub heat_threshold_c: f64,
    pub heat_factor: f64,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            base_minutes: 20.0,
            peak_bonus_minutes: 15.0,
            peak_start_hour: 12,
            peak_end_hour: 16,
            crowd_factor: 1.5,
            heavy_rain_mm: 5.0,
            rain_factor: 0.5,
            heat_threshold_c: 30.0,
            heat_factor: 0.7,
        }
    }
}

impl HeuristicConfig {
    pub fn is_peak(&self, instant: NaiveDateTime) -> bool {
        (self.peak_start_hour..self.peak_end_hour).contains(&instant.hour())
    }

    /// Heuristic wait in minutes, rounded to a 5-minute bucket
    ///
    /// Weather only adjusts the figure when an explicit override is given.
    pub fn estimate(
        &self,
        attraction: &Attraction,
        instant: NaiveDateTime,
        crowd_risk: bool,
        weather: Option<&WeatherOverride>,
    ) -> u32 {
        let mut minutes = self.base_minutes;
        if self.is_peak(instant) {
            minutes += self.peak_bonus_minutes;
        }
        if crowd_risk {
            minutes *= self.crowd_factor;
        }
        if let Some(weather) = weather {
            if weather.precipitation_mm >= self.heavy_rain_mm && !attraction.indoor {
                minutes *= self.rain_factor;
            }
            if weather.temperature_c >= self.heat_threshold_c {
                minutes *= self.heat_factor;
            }
        }
        round_to_bucket(minutes)
    }
}
