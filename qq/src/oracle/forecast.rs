//! Live-first wait oracle with model and heuristic fallbacks

use chrono::{Duration, NaiveDateTime};
use std::sync::Arc;
use tracing::debug;
use venuecatalog::{Attraction, Venue};

use super::calendar::{CrowdCalendar, HolidayCalendar};
use super::config::OracleConfig;
use super::estimate::{WaitEstimate, WaitOracle};
use super::estimator::{LinearEstimator, WaitEstimator, round_to_bucket};
use super::features::FeatureVector;
use super::heuristic::HeuristicConfig;
use super::weather::WeatherOverride;
use crate::live::LiveSnapshot;

/// Default span after a fetch during which live figures are trusted
pub const DEFAULT_FRESHNESS_MINUTES: i64 = 30;

/// The standard [`WaitOracle`]
///
/// Resolution order for a prediction:
/// 1. a fresh live snapshot; a closed status always wins, an open one
///    only when the caller does not override the weather;
/// 2. the regression estimator, if one is loaded;
/// 3. the deterministic heuristic.
pub struct ForecastOracle {
    estimator: Option<Arc<dyn WaitEstimator>>,
    calendar: Arc<dyn CrowdCalendar>,
    heuristic: HeuristicConfig,
    default_weather: WeatherOverride,
    freshness: Duration,
}

impl Default for ForecastOracle {
    fn default() -> Self {
        Self::new(Arc::new(HolidayCalendar::default()))
    }
}

impl ForecastOracle {
    /// Heuristic-only oracle over the given calendar
    pub fn new(calendar: Arc<dyn CrowdCalendar>) -> Self {
        Self {
            estimator: None,
            calendar,
            heuristic: HeuristicConfig::default(),
            default_weather: WeatherOverride::default(),
            freshness: Duration::minutes(DEFAULT_FRESHNESS_MINUTES),
        }
    }

    /// Build from configuration, loading the model file if one is set
    pub fn from_config(config: &OracleConfig) -> Self {
        debug!(model_path = ?config.model_path, "ForecastOracle::from_config: called");
        let calendar = Arc::new(HolidayCalendar::new(config.holidays.iter().copied()));
        let mut oracle = Self::new(calendar)
            .with_heuristic(config.heuristic.clone())
            .with_default_weather(config.default_weather);
        if let Some(model) = LinearEstimator::load_optional(config.model_path.as_deref()) {
            oracle = oracle.with_estimator(Arc::new(model));
        }
        oracle
    }

    pub fn with_estimator(mut self, estimator: Arc<dyn WaitEstimator>) -> Self {
        self.estimator = Some(estimator);
        self
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicConfig) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_default_weather(mut self, weather: WeatherOverride) -> Self {
        self.default_weather = weather;
        self
    }

    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    pub fn has_estimator(&self) -> bool {
        self.estimator.is_some()
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    fn live_estimate(&self, venue: &Venue, attraction: &Attraction, instant: NaiveDateTime, live: &LiveSnapshot) -> Option<WaitEstimate> {
        if !live.venue.eq_ignore_ascii_case(&venue.id) || !live.is_fresh_for(instant, self.freshness) {
            return None;
        }
        let status = live.status(&attraction.name)?;
        Some(if status.is_open {
            WaitEstimate::live(status.wait_minutes)
        } else {
            WaitEstimate::Closed
        })
    }
}

impl WaitOracle for ForecastOracle {
    fn predict_wait(
        &self,
        venue: &Venue,
        attraction: &Attraction,
        instant: NaiveDateTime,
        live: Option<&LiveSnapshot>,
        weather: Option<&WeatherOverride>,
    ) -> WaitEstimate {
        if attraction.venue != venue.id {
            debug!(attraction = %attraction.name, venue = %venue.id, "ForecastOracle::predict_wait: attraction from another venue");
            return WaitEstimate::Closed;
        }

        let live_estimate = live.and_then(|snapshot| self.live_estimate(venue, attraction, instant, snapshot));
        match live_estimate {
            Some(WaitEstimate::Closed) => return WaitEstimate::Closed,
            Some(estimate) if weather.is_none() => return estimate,
            _ => {}
        }

        let crowd_risk = self.calendar.is_high_risk(instant.date());

        if let Some(estimator) = &self.estimator {
            let ambient = weather.unwrap_or(&self.default_weather);
            let features = FeatureVector::build(attraction, instant, crowd_risk, ambient);
            if let Some(raw) = estimator.predict(&features) {
                return WaitEstimate::forecast(round_to_bucket(raw));
            }
            debug!(attraction = %attraction.name, "ForecastOracle::predict_wait: estimator gave no value");
        }

        WaitEstimate::heuristic(self.heuristic.estimate(attraction, instant, crowd_risk, weather))
    }
}
