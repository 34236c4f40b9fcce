//! Forecast inside the horizon, climate normals beyond it

use chrono::{Datelike, NaiveDate};
use std::sync::Arc;
use tracing::{debug, warn};
use venuecatalog::Venue;

use super::source::WeatherSource;
use crate::oracle::WeatherOverride;

/// Resolves the weather for a planning day, never failing
pub struct WeatherOutlook {
    source: Arc<dyn WeatherSource>,
    horizon_days: i64,
}

impl WeatherOutlook {
    pub fn new(source: Arc<dyn WeatherSource>, horizon_days: i64) -> Self {
        Self { source, horizon_days }
    }

    /// Weather for `date` as seen from `today`
    ///
    /// Days in `[today, today + horizon]` come from the source; any other day
    /// gets the month's climate average. A source failure degrades to the
    /// default weather.
    pub async fn for_day(&self, venue: &Venue, date: NaiveDate, today: NaiveDate) -> WeatherOverride {
        let ahead = (date - today).num_days();
        debug!(venue = %venue.id, %date, ahead, "WeatherOutlook::for_day: called");
        if !(0..=self.horizon_days).contains(&ahead) {
            return WeatherOverride::climate_average(date.month());
        }
        match self.source.daily(venue, date).await {
            Ok(weather) => weather,
            Err(e) => {
                warn!(venue = %venue.id, %date, error = %e, "WeatherOutlook::for_day: forecast unavailable, using default weather");
                WeatherOverride::default()
            }
        }
    }
}
