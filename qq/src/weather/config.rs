//! Weather forecast configuration

use serde::{Deserialize, Serialize};

/// Forecast service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WeatherConfig {
    /// Query the forecast service at all; when false climate normals are used
    pub enabled: bool,

    /// Daily forecast endpoint (Open-Meteo compatible)
    pub base_url: String,

    /// Per-request HTTP timeout
    pub timeout_ms: u64,

    /// Furthest day ahead the service is asked about
    pub horizon_days: i64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            timeout_ms: 2000,
            horizon_days: 14,
        }
    }
}
