//! Live feed configuration

use serde::{Deserialize, Serialize};

/// Live queue feed settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LiveConfig {
    /// Fetch live data at all; when false every plan is forecast-only
    pub enabled: bool,

    /// Feed URL; `{feed}` is replaced by the venue's feed id
    pub base_url: String,

    /// How long a fetched snapshot is reused before refetching
    pub ttl_secs: u64,

    /// Per-request HTTP timeout
    pub timeout_ms: u64,

    /// How far past the fetch time posted waits are trusted
    pub freshness_minutes: i64,

    /// Below this share of open attractions the venue is treated as closed
    pub closed_venue_threshold: f64,

    /// Extra attempts after a retryable failure
    pub max_retries: u32,

    /// Initial backoff, doubled per retry
    pub retry_backoff_ms: u64,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://queue-times.com/parks/{feed}/queue_times.json".to_string(),
            ttl_secs: 300,
            timeout_ms: 5000,
            freshness_minutes: 30,
            closed_venue_threshold: 0.2,
            max_retries: 1,
            retry_backoff_ms: 500,
        }
    }
}

impl LiveConfig {
    /// Feed URL for one venue
    pub fn feed_url(&self, feed_id: u32) -> String {
        self.base_url.replace("{feed}", &feed_id.to_string())
    }
}
