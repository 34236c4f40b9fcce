//! Feature vector fed to the wait estimator

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;
use std::f64::consts::PI;
use venuecatalog::Attraction;

use super::weather::{SkyCondition, WeatherOverride};

/// Inputs describing one (attraction, instant) prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    pub venue: String,
    pub attraction: String,
    pub category: String,
    pub zone: String,
    pub capacity: u32,
    pub indoor: bool,
    /// ISO weekday, Monday = 1
    pub day_of_week: u32,
    pub hour_of_day: u32,
    pub hour_sin: f64,
    pub hour_cos: f64,
    pub day_sin: f64,
    pub day_cos: f64,
    pub crowd_risk: bool,
    pub temperature_c: f64,
    pub precipitation_mm: f64,
    pub sky: SkyCondition,
}

impl FeatureVector {
    pub fn build(attraction: &Attraction, instant: NaiveDateTime, crowd_risk: bool, weather: &WeatherOverride) -> Self {
        let day_of_week = instant.weekday().number_from_monday();
        let hour_of_day = instant.hour();
        let hour_angle = 2.0 * PI * hour_of_day as f64 / 24.0;
        let day_angle = 2.0 * PI * day_of_week as f64 / 7.0;

        Self {
            venue: attraction.venue.clone(),
            attraction: attraction.name.clone(),
            category: attraction.category.clone(),
            zone: attraction.zone.clone(),
            capacity: attraction.capacity,
            indoor: attraction.indoor,
            day_of_week,
            hour_of_day,
            hour_sin: hour_angle.sin(),
            hour_cos: hour_angle.cos(),
            day_sin: day_angle.sin(),
            day_cos: day_angle.cos(),
            crowd_risk,
            temperature_c: weather.temperature_c,
            precipitation_mm: weather.precipitation_mm,
            sky: weather.sky,
        }
    }

    /// Numeric feature by column name; None for labels and unknown names
    pub fn numeric(&self, name: &str) -> Option<f64> {
        let value = match name {
            "capacity" => self.capacity as f64,
            "is_indoor" => bool_feature(self.indoor),
            "day_of_week" => self.day_of_week as f64,
            "hour_of_day" => self.hour_of_day as f64,
            "hour_sin" => self.hour_sin,
            "hour_cos" => self.hour_cos,
            "day_sin" => self.day_sin,
            "day_cos" => self.day_cos,
            "is_holiday" => bool_feature(self.crowd_risk),
            "temp_c" => self.temperature_c,
            "precip_mm" => self.precipitation_mm,
            _ => return None,
        };
        Some(value)
    }

    /// Categorical feature by encoder name
    pub fn label(&self, encoder: &str) -> Option<String> {
        match encoder {
            "park" => Some(self.venue.clone()),
            "ride" => Some(self.attraction.clone()),
            "type" => Some(self.category.clone()),
            "zone" => Some(self.zone.clone()),
            "weather" => Some(self.sky.to_string()),
            _ => None,
        }
    }
}

fn bool_feature(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use venuecatalog::Catalog;

    #[test]
    fn test_build_from_catalog() {
        let catalog = Catalog::builtin().unwrap();
        let symbolica = catalog.attraction("EFTELING", "Symbolica").unwrap();
        // Sunday 2025-06-01, 18:00
        let instant = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(18, 0, 0).unwrap();

        let features = FeatureVector::build(symbolica, instant, true, &WeatherOverride::default());
        assert_eq!(features.venue, "EFTELING");
        assert_eq!(features.day_of_week, 7);
        assert_eq!(features.hour_of_day, 18);
        assert!(features.indoor);
        // 18h is three quarters round the clock
        assert!((features.hour_sin + 1.0).abs() < 1e-9);
        assert!(features.hour_cos.abs() < 1e-9);
        // Day 7 of 7 is a full turn
        assert!(features.day_sin.abs() < 1e-9);
        assert!((features.day_cos - 1.0).abs() < 1e-9);
        assert_eq!(features.numeric("is_holiday"), Some(1.0));
        assert_eq!(features.numeric("is_indoor"), Some(1.0));
        assert_eq!(features.label("weather").as_deref(), Some("Cloudy"));
        assert_eq!(features.numeric("nonsense"), None);
    }
}
