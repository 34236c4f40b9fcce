//! Transit model configuration

use serde::{Deserialize, Serialize};

/// Walking model constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TransitConfig {
    /// Assumed walking speed
    pub walking_speed_kmh: f64,

    /// Ratio of real path length to straight-line distance
    pub detour_factor: f64,

    /// Walk between two attractions in the same zone
    pub zone_local_minutes: u32,

    /// Zone pair missing from an adjacency matrix
    pub missing_pair_minutes: u32,

    /// Locations that cannot be resolved at all
    pub fallback_minutes: u32,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            walking_speed_kmh: 4.5,
            detour_factor: 1.3,
            zone_local_minutes: 3,
            missing_pair_minutes: 15,
            fallback_minutes: 10,
        }
    }
}

impl TransitConfig {
    /// Walking speed in meters per minute
    pub fn meters_per_minute(&self) -> f64 {
        self.walking_speed_kmh * 1000.0 / 60.0
    }
}
