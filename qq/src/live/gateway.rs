//! Live queue feed client

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};
use venuecatalog::Venue;

use super::config::LiveConfig;
use super::error::GatewayError;
use super::snapshot::{LiveSnapshot, LiveStatus};

/// Source of live queue snapshots
#[async_trait]
pub trait LiveGateway: Send + Sync {
    /// Fetch the current status of every attraction the feed reports for a venue
    async fn fetch(&self, venue: &Venue) -> Result<LiveSnapshot, GatewayError>;
}

#[derive(Debug, Deserialize)]
struct FeedPayload {
    #[serde(default)]
    lands: Vec<FeedLand>,
    #[serde(default)]
    rides: Vec<FeedRide>,
}

#[derive(Debug, Deserialize)]
struct FeedLand {
    #[serde(default)]
    rides: Vec<FeedRide>,
}

#[derive(Debug, Deserialize)]
struct FeedRide {
    name: String,
    #[serde(default)]
    is_open: bool,
    #[serde(default)]
    wait_time: Option<i64>,
}

/// Turn a feed payload into a snapshot keyed by catalog names
///
/// Feed names are resolved through the venue's alias index and unknown names
/// are dropped. When fewer than `closed_venue_threshold` of the resolved
/// attractions are open the venue is assumed closed and the snapshot comes
/// back empty.
pub fn parse_feed(
    venue: &Venue,
    body: &str,
    fetched_at: NaiveDateTime,
    closed_venue_threshold: f64,
) -> Result<LiveSnapshot, GatewayError> {
    debug!(venue = %venue.id, body_len = body.len(), "parse_feed: called");
    let payload: FeedPayload = serde_json::from_str(body)?;

    let rides = payload.lands.into_iter().flat_map(|land| land.rides).chain(payload.rides);

    let mut snapshot = LiveSnapshot::new(venue.id.clone(), fetched_at);
    let mut dropped = 0usize;
    for ride in rides {
        let Some(attraction) = venue.resolve(&ride.name) else {
            debug!(name = %ride.name, "parse_feed: unknown attraction, dropping");
            dropped += 1;
            continue;
        };
        let status = if ride.is_open {
            LiveStatus::open(ride.wait_time.unwrap_or(0).clamp(0, u32::MAX as i64) as u32)
        } else {
            LiveStatus::closed()
        };
        snapshot.statuses.insert(attraction.name.clone(), status);
    }

    if !snapshot.is_empty() && snapshot.open_fraction() < closed_venue_threshold {
        info!(
            venue = %venue.id,
            open = snapshot.open_count(),
            total = snapshot.len(),
            "Venue looks closed, ignoring live data"
        );
        snapshot.statuses.clear();
    }

    debug!(resolved = snapshot.len(), dropped, "parse_feed: done");
    Ok(snapshot)
}

/// HTTP client for a queue-times style JSON feed
pub struct HttpLiveGateway {
    http: Client,
    config: LiveConfig,
}

impl HttpLiveGateway {
    pub fn new(config: LiveConfig) -> Result<Self, GatewayError> {
        debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "HttpLiveGateway::new: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(concat!("QueueQuest/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    async fn fetch_body(&self, url: &str) -> Result<String, GatewayError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status { status: status.as_u16() });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl LiveGateway for HttpLiveGateway {
    async fn fetch(&self, venue: &Venue) -> Result<LiveSnapshot, GatewayError> {
        debug!(venue = %venue.id, "HttpLiveGateway::fetch: called");
        if !self.config.enabled {
            return Err(GatewayError::Disabled);
        }
        let feed_id = venue.live_feed_id.ok_or_else(|| GatewayError::NoFeed(venue.id.clone()))?;
        let url = self.config.feed_url(feed_id);

        let mut attempt = 0;
        let body = loop {
            match self.fetch_body(&url).await {
                Ok(body) => break body,
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let backoff = self.config.retry_backoff_ms * 2u64.pow(attempt - 1);
                    warn!(attempt, backoff_ms = backoff, error = %e, "HttpLiveGateway::fetch: retrying");
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                }
                Err(e) => return Err(e),
            }
        };

        // Stamped in venue wall-clock time, the same clock plan instants use
        parse_feed(venue, &body, venue.now(), self.config.closed_venue_threshold)
    }
}
