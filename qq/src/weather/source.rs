//! Daily forecast client

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use venuecatalog::Venue;

use super::config::WeatherConfig;
use super::error::WeatherError;
use crate::oracle::{SkyCondition, WeatherOverride};

/// Precipitation at which a day without a weather code counts as rainy
const RAINY_DAY_MM: f64 = 1.0;

/// Source of day forecasts for a venue
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Expected weather for one calendar day at the venue
    async fn daily(&self, venue: &Venue, date: NaiveDate) -> Result<WeatherOverride, WeatherError>;
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    daily: DailySeries,
}

#[derive(Debug, Deserialize)]
struct DailySeries {
    time: Vec<NaiveDate>,
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    weather_code: Vec<Option<u32>>,
}

/// Sky condition for a WMO weather code
pub fn sky_for_code(code: u32) -> SkyCondition {
    match code {
        0 | 1 => SkyCondition::Sunny,
        51..=67 | 80..=82 | 95..=99 => SkyCondition::Rain,
        _ => SkyCondition::Cloudy,
    }
}

/// Pick one day out of a daily forecast payload
pub fn parse_daily(body: &str, date: NaiveDate) -> Result<WeatherOverride, WeatherError> {
    debug!(%date, body_len = body.len(), "parse_daily: called");
    let payload: ForecastPayload = serde_json::from_str(body)?;
    let daily = payload.daily;

    let idx = daily
        .time
        .iter()
        .position(|d| *d == date)
        .ok_or(WeatherError::MissingDay(date))?;
    let temperature_c = daily
        .temperature_2m_max
        .get(idx)
        .copied()
        .flatten()
        .ok_or(WeatherError::MissingDay(date))?;
    let precipitation_mm = daily.precipitation_sum.get(idx).copied().flatten().unwrap_or(0.0).max(0.0);
    let sky = match daily.weather_code.get(idx).copied().flatten() {
        Some(code) => sky_for_code(code),
        None if precipitation_mm >= RAINY_DAY_MM => SkyCondition::Rain,
        None => SkyCondition::Cloudy,
    };
    Ok(WeatherOverride::new(temperature_c, precipitation_mm, sky))
}

/// [`WeatherSource`] backed by an Open-Meteo style HTTP endpoint
pub struct HttpWeatherSource {
    http: Client,
    config: WeatherConfig,
}

impl HttpWeatherSource {
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "HttpWeatherSource::new: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(concat!("QueueQuest/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl WeatherSource for HttpWeatherSource {
    async fn daily(&self, venue: &Venue, date: NaiveDate) -> Result<WeatherOverride, WeatherError> {
        debug!(venue = %venue.id, %date, "HttpWeatherSource::daily: called");
        if !self.config.enabled {
            return Err(WeatherError::Disabled);
        }
        let day = date.to_string();
        let response = self
            .http
            .get(&self.config.base_url)
            .query(&[
                ("latitude", venue.entrance.lat.to_string()),
                ("longitude", venue.entrance.lon.to_string()),
                ("daily", "temperature_2m_max,precipitation_sum,weather_code".to_string()),
                ("timezone", "auto".to_string()),
                ("start_date", day.clone()),
                ("end_date", day),
            ])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status { status: status.as_u16() });
        }
        parse_daily(&response.text().await?, date)
    }
}
