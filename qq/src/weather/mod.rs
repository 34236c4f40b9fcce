//! Daily weather outlook
//!
//! Looks up the expected weather for a planning day at a venue: a forecast
//! service inside its horizon, monthly climate normals beyond it, and the
//! mild default when the service cannot be reached.

mod config;
mod error;
mod outlook;
mod source;

pub use config::WeatherConfig;
pub use error::WeatherError;
pub use outlook::WeatherOutlook;
pub use source::{HttpWeatherSource, WeatherSource, parse_daily, sky_for_code};
