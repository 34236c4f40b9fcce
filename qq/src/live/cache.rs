//! Per-venue snapshot cache with a time-to-live

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use venuecatalog::Venue;

use super::error::GatewayError;
use super::gateway::LiveGateway;
use super::snapshot::LiveSnapshot;

struct CacheEntry {
    snapshot: Arc<LiveSnapshot>,
    stored_at: Instant,
}

/// Shared snapshots keyed by venue id
///
/// Readers get a cloned `Arc`, so a snapshot handed out stays unchanged even
/// if a refresh replaces the entry afterwards.
pub struct SnapshotCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached snapshot for a venue if it has not expired
    pub async fn get(&self, venue: &str) -> Option<Arc<LiveSnapshot>> {
        let entries = self.entries.read().await;
        entries
            .get(venue)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| Arc::clone(&entry.snapshot))
    }

    pub async fn put(&self, snapshot: LiveSnapshot) -> Arc<LiveSnapshot> {
        let snapshot = Arc::new(snapshot);
        let mut entries = self.entries.write().await;
        entries.insert(
            snapshot.venue.clone(),
            CacheEntry {
                snapshot: Arc::clone(&snapshot),
                stored_at: Instant::now(),
            },
        );
        snapshot
    }

    pub async fn invalidate(&self, venue: &str) {
        self.entries.write().await.remove(venue);
    }

    /// Number of entries, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// A gateway fronted by a [`SnapshotCache`]
pub struct CachedGateway {
    gateway: Arc<dyn LiveGateway>,
    cache: SnapshotCache,
}

impl CachedGateway {
    pub fn new(gateway: Arc<dyn LiveGateway>, ttl: Duration) -> Self {
        Self {
            gateway,
            cache: SnapshotCache::new(ttl),
        }
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// Fetch bypassing the cache and store the result
    pub async fn refresh(&self, venue: &Venue) -> Result<Arc<LiveSnapshot>, GatewayError> {
        debug!(venue = %venue.id, "CachedGateway::refresh: called");
        let snapshot = self.gateway.fetch(venue).await?;
        Ok(self.cache.put(snapshot).await)
    }

    /// Cached snapshot, refetched once the TTL has passed
    ///
    /// Fetch failures are logged and yield None; callers plan forecast-only.
    pub async fn snapshot(&self, venue: &Venue) -> Option<Arc<LiveSnapshot>> {
        if let Some(snapshot) = self.cache.get(&venue.id).await {
            debug!(venue = %venue.id, "CachedGateway::snapshot: cache hit");
            return Some(snapshot);
        }
        match self.refresh(venue).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(venue = %venue.id, error = %e, "Live data unavailable, planning from forecasts");
                None
            }
        }
    }
}
