//! Walking-time estimates between locations inside a venue

mod config;
mod geo;
mod model;

pub use config::TransitConfig;
pub use geo::{EARTH_RADIUS_M, haversine_meters};
pub use model::{TransitModel, WalkingModel};
