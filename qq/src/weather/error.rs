//! Weather source error types

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while fetching a weather forecast
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Weather service returned HTTP {status}")]
    Status { status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid weather payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No forecast for {0}")]
    MissingDay(NaiveDate),

    #[error("Weather forecasts are disabled")]
    Disabled,
}
