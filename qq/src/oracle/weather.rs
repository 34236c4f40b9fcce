//! Ambient weather inputs

use serde::{Deserialize, Serialize};

/// Coarse sky description, as used by the estimator's label encoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkyCondition {
    Sunny,
    #[default]
    Cloudy,
    Rain,
}

impl std::fmt::Display for SkyCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sunny => write!(f, "Sunny"),
            Self::Cloudy => write!(f, "Cloudy"),
            Self::Rain => write!(f, "Rain"),
        }
    }
}

impl std::str::FromStr for SkyCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sunny" | "clear" => Ok(Self::Sunny),
            "cloudy" => Ok(Self::Cloudy),
            "rain" | "rainy" => Ok(Self::Rain),
            _ => Err(format!("Unknown sky condition: {}", s)),
        }
    }
}

/// Monthly climate normals: (max temperature C, precipitation chance %)
const CLIMATE_AVERAGES: [(f64, u32); 12] = [
    (6.0, 40),
    (7.0, 35),
    (10.0, 30),
    (14.0, 25),
    (18.0, 20),
    (21.0, 20),
    (23.0, 20),
    (23.0, 20),
    (19.0, 25),
    (15.0, 30),
    (10.0, 40),
    (7.0, 45),
];

/// Rain chance at which a climate average counts as a wet day
const WET_DAY_CHANCE: u32 = 30;

/// Precipitation assumed for a wet climate-average day
const WET_DAY_MM: f64 = 2.0;

/// Weather for a planning day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WeatherOverride {
    pub temperature_c: f64,
    pub precipitation_mm: f64,
    pub sky: SkyCondition,
}

impl Default for WeatherOverride {
    fn default() -> Self {
        Self {
            temperature_c: 15.0,
            precipitation_mm: 0.0,
            sky: SkyCondition::Cloudy,
        }
    }
}

impl WeatherOverride {
    pub fn new(temperature_c: f64, precipitation_mm: f64, sky: SkyCondition) -> Self {
        Self {
            temperature_c,
            precipitation_mm,
            sky,
        }
    }

    /// Typical weather for a calendar month (1-12), for days too far out to forecast
    ///
    /// Months outside 1-12 yield the default weather.
    pub fn climate_average(month: u32) -> Self {
        let Some(&(temperature_c, rain_chance)) = CLIMATE_AVERAGES.get(month.wrapping_sub(1) as usize) else {
            return Self::default();
        };
        if rain_chance >= WET_DAY_CHANCE {
            Self::new(temperature_c, WET_DAY_MM, SkyCondition::Rain)
        } else {
            Self::new(temperature_c, 0.0, SkyCondition::Cloudy)
        }
    }
}
