//! Transit cost model

use tracing::debug;
use venuecatalog::{GeoPoint, Venue};

use super::config::TransitConfig;
use super::geo::haversine_meters;
use crate::domain::{Location, PacingProfile};

/// Converts an (origin, destination) pair into walking minutes
pub trait TransitModel: Send + Sync {
    /// Walking minutes, already scaled by the pace. Never fails: locations
    /// that cannot be resolved get a fixed fallback.
    fn transit_minutes(&self, venue: &Venue, origin: &Location, destination: &Location, pace: PacingProfile) -> u32;
}

/// Resolved end of a walk
struct Endpoint<'a> {
    zone: Option<&'a str>,
    point: Option<GeoPoint>,
}

/// Zone-aware walking model: adjacency tables when the venue has them,
/// great-circle distance with a detour factor otherwise
#[derive(Debug, Clone, Default)]
pub struct WalkingModel {
    config: TransitConfig,
}

impl WalkingModel {
    pub fn new(config: TransitConfig) -> Self {
        debug!(?config, "WalkingModel::new: called");
        Self { config }
    }

    pub fn config(&self) -> &TransitConfig {
        &self.config
    }

    fn endpoint<'a>(venue: &'a Venue, location: &Location) -> Option<Endpoint<'a>> {
        match location {
            Location::Entrance => Some(Endpoint {
                zone: None,
                point: Some(venue.entrance),
            }),
            Location::Attraction(name) => venue.attraction(name).map(|a| Endpoint {
                zone: Some(a.zone.as_str()),
                point: venue.locate(a),
            }),
        }
    }

    /// Unscaled walking minutes
    fn base_minutes(&self, venue: &Venue, origin: &Location, destination: &Location) -> u32 {
        let (Some(from), Some(to)) = (Self::endpoint(venue, origin), Self::endpoint(venue, destination)) else {
            debug!(%origin, %destination, "WalkingModel::base_minutes: unresolved location, using fallback");
            return self.config.fallback_minutes;
        };

        if let (Some(a), Some(b)) = (from.zone, to.zone) {
            if a == b {
                return self.config.zone_local_minutes;
            }
            if venue.has_zone_links() {
                return venue.zone_minutes(a, b).unwrap_or(self.config.missing_pair_minutes);
            }
        }

        match (from.point, to.point) {
            (Some(a), Some(b)) => {
                let path_m = haversine_meters(a, b) * self.config.detour_factor;
                (path_m / self.config.meters_per_minute()).ceil() as u32
            }
            _ => self.config.fallback_minutes,
        }
    }
}

impl TransitModel for WalkingModel {
    fn transit_minutes(&self, venue: &Venue, origin: &Location, destination: &Location, pace: PacingProfile) -> u32 {
        if origin == destination {
            return 0;
        }
        let base = self.base_minutes(venue, origin, destination);
        (base as f64 * pace.factor()).round().max(0.0) as u32
    }
}
