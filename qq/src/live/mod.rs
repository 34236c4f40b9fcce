//! Live queue status
//!
//! Fetches posted waits and open/closed flags from an HTTP feed, maps feed
//! names onto catalog names and keeps one shared snapshot per venue for a
//! short time-to-live.

mod cache;
mod config;
mod error;
mod gateway;
mod snapshot;

pub use cache::{CachedGateway, SnapshotCache};
pub use config::LiveConfig;
pub use error::GatewayError;
pub use gateway::{HttpLiveGateway, LiveGateway, parse_feed};
pub use snapshot::{LiveSnapshot, LiveStatus};
