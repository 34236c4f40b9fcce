//! Planning request

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Location, LunchConfig, PacingProfile, Wishlist};
use crate::oracle::WeatherOverride;

/// Which scoring policy drives the planner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanMode {
    /// Wishlist-driven, cost = transit + wait with priority adjustments
    #[default]
    Priority,
    /// Ignore the wishlist, maximise quality per minute
    MaxValue,
    /// Walk to the closest wishlist entry, ignoring queues
    Nearest,
}

impl std::fmt::Display for PlanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Priority => write!(f, "priority"),
            Self::MaxValue => write!(f, "max-value"),
            Self::Nearest => write!(f, "nearest"),
        }
    }
}

/// Everything the planner needs from the caller for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlanRequest {
    pub venue: String,
    #[serde(default)]
    pub wishlist: Wishlist,
    pub start: NaiveDateTime,
    /// Deadline; nothing may be planned to end after it
    pub end: NaiveDateTime,
    #[serde(default)]
    pub start_location: Location,
    #[serde(default)]
    pub lunch: Option<LunchConfig>,
    #[serde(default)]
    pub pace: PacingProfile,
    #[serde(default)]
    pub mode: PlanMode,
    /// Known weather for the day; replaces live wait figures but not live closures
    #[serde(default)]
    pub weather: Option<WeatherOverride>,
}

impl PlanRequest {
    /// Request with an empty wishlist, starting at the entrance at normal pace
    pub fn new(venue: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            venue: venue.into(),
            wishlist: Wishlist::default(),
            start,
            end,
            start_location: Location::Entrance,
            lunch: None,
            pace: PacingProfile::NORMAL,
            mode: PlanMode::Priority,
            weather: None,
        }
    }

    pub fn with_wishlist(mut self, wishlist: Wishlist) -> Self {
        self.wishlist = wishlist;
        self
    }

    pub fn with_start_location(mut self, location: Location) -> Self {
        self.start_location = location;
        self
    }

    pub fn with_lunch(mut self, lunch: LunchConfig) -> Self {
        self.lunch = Some(lunch);
        self
    }

    pub fn with_pace(mut self, pace: PacingProfile) -> Self {
        self.pace = pace;
        self
    }

    pub fn with_mode(mut self, mode: PlanMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_weather(mut self, weather: WeatherOverride) -> Self {
        self.weather = Some(weather);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_request_from_json_uses_defaults() {
        let json = r#"{
            "venue": "EFTELING",
            "start": "2025-06-03T10:00:00",
            "end": "2025-06-03T18:00:00",
            "wishlist": { "must-have": ["Python"] }
        }"#;
        let request: PlanRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.mode, PlanMode::Priority);
        assert_eq!(request.pace, PacingProfile::NORMAL);
        assert_eq!(request.start_location, Location::Entrance);
        assert_eq!(request.wishlist.must_have, vec!["Python".to_string()]);
        assert!(request.lunch.is_none());
        assert!(request.weather.is_none());
    }

    #[test]
    fn test_builder() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        let request = PlanRequest::new(
            "EFTELING",
            day.and_hms_opt(10, 0, 0).unwrap(),
            day.and_hms_opt(18, 0, 0).unwrap(),
        )
        .with_mode(PlanMode::MaxValue)
        .with_pace(PacingProfile::FAST);

        assert_eq!(request.mode, PlanMode::MaxValue);
        assert_eq!(request.pace, PacingProfile::FAST);
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::to_string(&PlanMode::MaxValue).unwrap(), "\"max-value\"");
    }
}
