//! Planning service: live data plus planner behind one async call

use chrono::{Datelike, Duration as ChronoDuration, NaiveDate, NaiveDateTime, Timelike};
use eyre::{Context, Result};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use venuecatalog::{Attraction, Catalog, Venue};

use crate::config::Config;
use crate::domain::{Itinerary, Location, PacingProfile, PlanRequest};
use crate::live::{CachedGateway, HttpLiveGateway, LiveGateway, LiveSnapshot};
use crate::oracle::scan::{self, ScanContext, WaitSlot};
use crate::oracle::{ForecastOracle, WaitEstimate, WaitOracle, WeatherOverride};
use crate::planner::{Comparison, PlanError, Planner};
use crate::transit::{TransitModel, WalkingModel};
use crate::weather::{HttpWeatherSource, WeatherOutlook, WeatherSource};

/// Owns the catalog, models and live cache shared by all planning calls
pub struct PlanningService {
    planner: Planner,
    live: Option<CachedGateway>,
    weather: Option<WeatherOutlook>,
}

impl PlanningService {
    pub fn new(planner: Planner, live: Option<CachedGateway>) -> Self {
        Self {
            planner,
            live,
            weather: None,
        }
    }

    pub fn with_weather_outlook(mut self, outlook: WeatherOutlook) -> Self {
        self.weather = Some(outlook);
        self
    }

    /// Wire up the standard components from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        debug!("PlanningService::from_config: called");
        let catalog = Catalog::load_or_builtin(config.catalog.path.as_deref()).context("Failed to load venue catalog")?;
        let transit: Arc<dyn TransitModel> = Arc::new(WalkingModel::new(config.transit.clone()));
        let oracle: Arc<dyn WaitOracle> = Arc::new(
            ForecastOracle::from_config(&config.oracle)
                .with_freshness(ChronoDuration::minutes(config.live.freshness_minutes)),
        );
        let planner = Planner::new(Arc::new(catalog), transit, oracle).with_config(config.planner.clone());

        let live = if config.live.enabled {
            let gateway: Arc<dyn LiveGateway> =
                Arc::new(HttpLiveGateway::new(config.live.clone()).context("Failed to build live feed client")?);
            Some(CachedGateway::new(gateway, Duration::from_secs(config.live.ttl_secs)))
        } else {
            None
        };

        let mut service = Self::new(planner, live);
        if config.weather.enabled {
            let source: Arc<dyn WeatherSource> =
                Arc::new(HttpWeatherSource::new(config.weather.clone()).context("Failed to build weather client")?);
            service = service.with_weather_outlook(WeatherOutlook::new(source, config.weather.horizon_days));
        }
        Ok(service)
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    pub fn catalog(&self) -> &Catalog {
        self.planner.catalog()
    }

    /// Current live snapshot for a venue, or None in forecast-only mode
    pub async fn snapshot(&self, venue: &Venue) -> Option<Arc<LiveSnapshot>> {
        match &self.live {
            Some(live) => live.snapshot(venue).await,
            None => None,
        }
    }

    async fn snapshot_for(&self, request: &PlanRequest) -> Option<Arc<LiveSnapshot>> {
        let venue = self.catalog().venue(&request.venue)?;
        self.snapshot(venue).await
    }

    /// Plan a request, fetching live data at most once
    pub async fn plan(&self, request: &PlanRequest) -> Result<Itinerary, PlanError> {
        debug!(venue = %request.venue, mode = %request.mode, "PlanningService::plan: called");
        let snapshot = self.snapshot_for(request).await;
        self.planner.plan(request, snapshot.as_deref())
    }

    /// Baseline and planned itineraries over the same snapshot
    pub async fn compare(&self, request: &PlanRequest) -> Result<Comparison, PlanError> {
        debug!(venue = %request.venue, "PlanningService::compare: called");
        let snapshot = self.snapshot_for(request).await;
        self.planner.compare(request, snapshot.as_deref())
    }

    fn venue(&self, id: &str) -> Result<&Venue, PlanError> {
        self.catalog().venue(id).ok_or_else(|| PlanError::UnknownVenue(id.to_string()))
    }

    fn attraction<'v>(&self, venue: &'v Venue, name: &str) -> Result<&'v Attraction, PlanError> {
        venue.resolve(name).ok_or_else(|| PlanError::UnknownAttraction {
            venue: venue.id.clone(),
            name: name.to_string(),
        })
    }

    /// Expected weather for a day at a venue
    ///
    /// Without a forecast service every day gets its month's climate average.
    pub async fn weather_for(&self, venue: &str, date: NaiveDate) -> Result<WeatherOverride, PlanError> {
        debug!(%venue, %date, "PlanningService::weather_for: called");
        let venue = self.venue(venue)?;
        Ok(match &self.weather {
            Some(outlook) => outlook.for_day(venue, date, venue.now().date()).await,
            None => WeatherOverride::climate_average(date.month()),
        })
    }

    /// Wait for one attraction at one instant
    ///
    /// A weather override replaces a live open wait with a forecast; a live
    /// closure still stands.
    pub async fn predict_wait(
        &self,
        venue: &str,
        attraction: &str,
        at: NaiveDateTime,
        weather: Option<&WeatherOverride>,
    ) -> Result<WaitEstimate, PlanError> {
        debug!(%venue, %attraction, %at, "PlanningService::predict_wait: called");
        let venue = self.venue(venue)?;
        let attraction = self.attraction(venue, attraction)?;
        let snapshot = self.snapshot(venue).await;
        Ok(self
            .planner
            .oracle()
            .predict_wait(venue, attraction, at, snapshot.as_deref(), weather))
    }

    /// Hourly forecast profile for one attraction and its quietest hour
    ///
    /// Hours default to the venue's opening hours.
    pub fn best_times(
        &self,
        venue: &str,
        attraction: &str,
        date: NaiveDate,
        from_hour: Option<u32>,
        to_hour: Option<u32>,
    ) -> Result<(Vec<WaitSlot>, Option<WaitSlot>), PlanError> {
        debug!(%venue, %attraction, %date, "PlanningService::best_times: called");
        let venue = self.venue(venue)?;
        let attraction = self.attraction(venue, attraction)?;
        let from_hour = from_hour.unwrap_or(venue.opens.hour());
        let to_hour = to_hour.unwrap_or(venue.closes.hour());

        let ctx = ScanContext::new(self.planner.oracle(), venue);
        let profile = scan::hourly_profile(&ctx, attraction, date, from_hour, to_hour);
        let best = scan::lowest(&profile);
        Ok((profile, best))
    }

    /// Quietest half-hour slot from `from` until the venue closes that day
    ///
    /// The last slot still leaves the ride's duration before closing. Uses
    /// live data where it is fresh. None when closed for the whole span.
    pub async fn best_future_wait(
        &self,
        venue: &str,
        attraction: &str,
        from: NaiveDateTime,
        weather: Option<&WeatherOverride>,
    ) -> Result<Option<WaitSlot>, PlanError> {
        debug!(%venue, %attraction, %from, "PlanningService::best_future_wait: called");
        let venue = self.venue(venue)?;
        let attraction = self.attraction(venue, attraction)?;
        let snapshot = self.snapshot(venue).await;
        let last_arrival = from.date().and_time(venue.closes) - ChronoDuration::minutes(attraction.duration_minutes as i64);

        let ctx = ScanContext::new(self.planner.oracle(), venue)
            .with_live(snapshot.as_deref())
            .with_weather(weather);
        Ok(scan::best_future_wait(&ctx, attraction, from, last_arrival))
    }

    /// Walking minutes between two named locations ("entrance" or an attraction)
    pub fn transit_minutes(&self, venue: &str, from: &str, to: &str, pace: PacingProfile) -> Result<u32, PlanError> {
        debug!(%venue, %from, %to, "PlanningService::transit_minutes: called");
        let venue = self.venue(venue)?;
        if !pace.is_valid() {
            return Err(PlanError::InvalidPace(pace.factor()));
        }
        let origin = self.location(venue, from)?;
        let destination = self.location(venue, to)?;
        Ok(self.planner.transit().transit_minutes(venue, &origin, &destination, pace))
    }

    fn location(&self, venue: &Venue, raw: &str) -> Result<Location, PlanError> {
        match raw.parse::<Location>() {
            Ok(Location::Entrance) => Ok(Location::Entrance),
            Ok(Location::Attraction(name)) => Ok(Location::attraction(self.attraction(venue, &name)?.name.clone())),
            Err(_) => Err(PlanError::UnknownAttraction {
                venue: venue.id.clone(),
                name: raw.to_string(),
            }),
        }
    }

    /// Refresh every venue that has a live feed, concurrently
    ///
    /// Returns the venues that could not be refreshed.
    pub async fn refresh_all(&self) -> Vec<String> {
        let Some(live) = &self.live else {
            return Vec::new();
        };
        let venues: Vec<&Venue> = self
            .catalog()
            .venues()
            .iter()
            .filter(|v| v.live_feed_id.is_some())
            .collect();
        debug!(count = venues.len(), "PlanningService::refresh_all: called");

        let results = join_all(venues.iter().map(|venue| live.refresh(venue))).await;
        venues
            .iter()
            .zip(results)
            .filter_map(|(venue, result)| match result {
                Ok(_) => None,
                Err(e) => {
                    warn!(venue = %venue.id, error = %e, "Failed to refresh live data");
                    Some(venue.id.clone())
                }
            })
            .collect()
    }
}
