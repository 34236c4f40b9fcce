//! CLI command definitions and subcommands

use chrono::{Datelike, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use venuecatalog::Venue;

use crate::domain::{Location, LunchConfig, PacingProfile, PlanMode, PlanRequest, Wishlist};
use crate::oracle::{SkyCondition, WeatherOverride};
use crate::planner::{PlanError, parse_clock};

/// QueueQuest - theme park itinerary planner
#[derive(Parser)]
#[command(
    name = "qq",
    about = "Plan a theme park day around queues, walking and priorities",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Never contact the live feed
    #[arg(long, global = true)]
    pub offline: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Day, window and pacing shared by every planning command
#[derive(Debug, Clone, Args)]
pub struct DayArgs {
    /// Venue id (EFTELING, PHANTASIALAND, WALIBI_BELGIUM, ...)
    pub venue: String,

    /// Visit date, YYYY-MM-DD (default: today)
    #[arg(short, long)]
    pub date: Option<chrono::NaiveDate>,

    /// Start time HH:MM (default: venue opening)
    #[arg(long)]
    pub start: Option<String>,

    /// End time HH:MM (default: venue closing)
    #[arg(long)]
    pub end: Option<String>,

    /// Start location: "entrance" or an attraction name
    #[arg(long, default_value = "entrance")]
    pub from: String,

    /// Walking pace: fast, normal, relaxed or a multiplier
    #[arg(long, default_value = "normal")]
    pub pace: PacingProfile,

    /// Attractions already done today
    #[arg(long, value_delimiter = ',')]
    pub done: Vec<String>,

    #[command(flatten)]
    pub weather: WeatherArgs,
}

/// Explicit weather; replaces live wait figures, live closures still apply
#[derive(Debug, Clone, Default, Args)]
pub struct WeatherArgs {
    /// Expected max temperature in Celsius
    #[arg(long)]
    pub temp: Option<f64>,

    /// Expected precipitation in mm
    #[arg(long)]
    pub rain: Option<f64>,

    /// Sky condition: sunny, cloudy, rain
    #[arg(long)]
    pub sky: Option<SkyCondition>,

    /// Use the month's climate average
    #[arg(long, conflicts_with_all = ["temp", "rain", "sky"])]
    pub climate: bool,

    /// Look the day up in the weather forecast (climate average beyond its horizon)
    #[arg(long, conflicts_with_all = ["temp", "rain", "sky", "climate"])]
    pub auto_weather: bool,
}

impl WeatherArgs {
    pub fn is_set(&self) -> bool {
        self.climate || self.temp.is_some() || self.rain.is_some() || self.sky.is_some()
    }

    /// Weather override for a date from the explicit flags, if any was given
    ///
    /// Unset fields fall back to the mild default. `--auto-weather` needs a
    /// forecast lookup and is resolved by the caller.
    pub fn resolve(&self, date: NaiveDate) -> Option<WeatherOverride> {
        if self.climate {
            return Some(WeatherOverride::climate_average(date.month()));
        }
        if !self.is_set() {
            return None;
        }
        let base = WeatherOverride::default();
        Some(WeatherOverride::new(
            self.temp.unwrap_or(base.temperature_c),
            self.rain.unwrap_or(base.precipitation_mm),
            self.sky.unwrap_or(base.sky),
        ))
    }
}

impl DayArgs {
    /// Planning request for this day with an empty wishlist
    pub fn request(&self, venue: &Venue, today: NaiveDate, mode: PlanMode) -> Result<PlanRequest, PlanError> {
        debug!(venue = %venue.id, %mode, "DayArgs::request: called");
        let date = self.date.unwrap_or(today);
        let start = match &self.start {
            Some(raw) => parse_clock(date, raw)?,
            None => date.and_time(venue.opens),
        };
        let end = match &self.end {
            Some(raw) => parse_clock(date, raw)?,
            None => date.and_time(venue.closes),
        };
        let start_location = self.from.parse::<Location>().map_err(|_| PlanError::UnknownAttraction {
            venue: venue.id.clone(),
            name: self.from.clone(),
        })?;

        let mut wishlist = Wishlist::default();
        wishlist.completed = self.done.iter().cloned().collect();

        let mut request = PlanRequest::new(venue.id.clone(), start, end)
            .with_wishlist(wishlist)
            .with_start_location(start_location)
            .with_pace(self.pace)
            .with_mode(mode);
        if let Some(weather) = self.weather.resolve(date) {
            request = request.with_weather(weather);
        }
        Ok(request)
    }
}

impl WishlistArgs {
    /// Add the wishlist tiers and lunch break to a request
    pub fn apply(&self, request: PlanRequest) -> Result<PlanRequest, PlanError> {
        debug!(must = self.must.len(), should = self.should.len(), "WishlistArgs::apply: called");
        let mut wishlist = Wishlist::new(self.must.iter().cloned(), self.should.iter().cloned());
        wishlist.completed = request.wishlist.completed.clone();
        let date = request.start.date();
        let mut request = request.with_wishlist(wishlist);

        if let (Some(at), Some(destination)) = (&self.lunch, &self.lunch_at) {
            request = request.with_lunch(LunchConfig {
                at: parse_clock(date, at)?,
                duration_minutes: self.lunch_minutes,
                destination: destination.clone(),
            });
        }
        Ok(request)
    }
}

/// Two-tier wishlist and lunch break
#[derive(Debug, Clone, Args)]
pub struct WishlistArgs {
    /// Must-have attractions, in priority order
    #[arg(short, long, value_delimiter = ',')]
    pub must: Vec<String>,

    /// Should-have attractions, in priority order
    #[arg(short, long, value_delimiter = ',')]
    pub should: Vec<String>,

    /// Lunch trigger time HH:MM
    #[arg(long, requires = "lunch_at")]
    pub lunch: Option<String>,

    /// Restaurant or snack bar for lunch
    #[arg(long, requires = "lunch")]
    pub lunch_at: Option<String>,

    /// Lunch duration in minutes
    #[arg(long, default_value = "45")]
    pub lunch_minutes: u32,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plan a wishlist-driven itinerary
    Plan {
        #[command(flatten)]
        day: DayArgs,

        #[command(flatten)]
        wishlist: WishlistArgs,
    },

    /// Plan the highest quality-per-minute day, ignoring any wishlist
    MaxValue {
        #[command(flatten)]
        day: DayArgs,
    },

    /// Compare a queue-blind nearest-first plan with the planned itinerary
    Compare {
        #[command(flatten)]
        day: DayArgs,

        #[command(flatten)]
        wishlist: WishlistArgs,
    },

    /// Predict the wait for one attraction
    Wait {
        /// Venue id
        venue: String,

        /// Attraction name or alias
        attraction: String,

        /// Visit date, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<chrono::NaiveDate>,

        /// Time HH:MM (default: now)
        #[arg(long)]
        at: Option<String>,

        #[command(flatten)]
        weather: WeatherArgs,
    },

    /// Find the quietest hour for one attraction
    BestTimes {
        /// Venue id
        venue: String,

        /// Attraction name or alias
        attraction: String,

        /// Visit date, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<chrono::NaiveDate>,

        /// First hour to scan (default: venue opening)
        #[arg(long)]
        from_hour: Option<u32>,

        /// Hour to stop before (default: venue closing)
        #[arg(long)]
        to_hour: Option<u32>,

        /// Also find the quietest half-hour from this time until closing (HH:MM or "now")
        #[arg(long)]
        after: Option<String>,
    },

    /// Show the live feed for a venue
    Live {
        /// Venue id
        venue: String,
    },

    /// Walking minutes between two locations
    Transit {
        /// Venue id
        venue: String,

        /// "entrance" or an attraction name
        from: String,

        /// "entrance" or an attraction name
        to: String,

        /// Walking pace: fast, normal, relaxed or a multiplier
        #[arg(long, default_value = "normal")]
        pace: PacingProfile,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use text or json", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_plan() {
        let cli = Cli::try_parse_from([
            "qq", "plan", "EFTELING", "--must", "Baron 1898,Python", "--should", "Symbolica", "--date", "2025-06-03",
            "--start", "10:00", "--lunch", "12:30", "--lunch-at", "Kashba", "--pace", "relaxed",
        ])
        .unwrap();

        match cli.command {
            Command::Plan { day, wishlist } => {
                assert_eq!(day.venue, "EFTELING");
                assert_eq!(day.pace, PacingProfile::RELAXED);
                assert_eq!(wishlist.must, vec!["Baron 1898", "Python"]);
                assert_eq!(wishlist.should, vec!["Symbolica"]);
                assert_eq!(wishlist.lunch_minutes, 45);
                assert!(!day.weather.is_set());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_lunch_requires_destination() {
        assert!(Cli::try_parse_from(["qq", "plan", "EFTELING", "--lunch", "12:30"]).is_err());
    }

    fn efteling() -> Venue {
        venuecatalog::Catalog::builtin().unwrap().venue("EFTELING").unwrap().clone()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
    }

    #[test]
    fn test_request_defaults_to_venue_hours() {
        let cli = Cli::try_parse_from(["qq", "max-value", "EFTELING", "--done", "Python"]).unwrap();
        let Command::MaxValue { day } = cli.command else {
            panic!("expected max-value");
        };
        let venue = efteling();
        let request = day.request(&venue, today(), PlanMode::MaxValue).unwrap();

        assert_eq!(request.start, today().and_time(venue.opens));
        assert_eq!(request.end, today().and_time(venue.closes));
        assert_eq!(request.start_location, Location::Entrance);
        assert_eq!(request.mode, PlanMode::MaxValue);
        assert!(request.wishlist.is_done("Python"));
        assert!(request.weather.is_none());
    }

    #[test]
    fn test_request_with_wishlist_and_lunch() {
        let cli = Cli::try_parse_from([
            "qq", "plan", "EFTELING", "--must", "Baron 1898", "--start", "10:00", "--end", "17:00", "--lunch", "12:30",
            "--lunch-at", "Kashba", "--lunch-minutes", "30", "--temp", "32",
        ])
        .unwrap();
        let Command::Plan { day, wishlist } = cli.command else {
            panic!("expected plan");
        };
        let request = wishlist
            .apply(day.request(&efteling(), today(), PlanMode::Priority).unwrap())
            .unwrap();

        assert_eq!(request.start, today().and_hms_opt(10, 0, 0).unwrap());
        assert_eq!(request.wishlist.must_have, vec!["Baron 1898"]);
        let lunch = request.lunch.unwrap();
        assert_eq!(lunch.at, today().and_hms_opt(12, 30, 0).unwrap());
        assert_eq!(lunch.duration_minutes, 30);
        assert_eq!(lunch.destination, "Kashba");
        let weather = request.weather.unwrap();
        assert_eq!(weather.temperature_c, 32.0);
        assert_eq!(weather.precipitation_mm, 0.0);
    }

    #[test]
    fn test_request_rejects_bad_clock() {
        let cli = Cli::try_parse_from(["qq", "plan", "EFTELING", "--start", "25:00"]).unwrap();
        let Command::Plan { day, .. } = cli.command else {
            panic!("expected plan");
        };
        assert_eq!(
            day.request(&efteling(), today(), PlanMode::Priority).unwrap_err(),
            PlanError::InvalidClock("25:00".to_string())
        );
    }

    #[test]
    fn test_climate_weather() {
        let args = WeatherArgs {
            climate: true,
            ..Default::default()
        };
        assert_eq!(args.resolve(today()), Some(WeatherOverride::climate_average(6)));
        assert_eq!(WeatherArgs::default().resolve(today()), None);
    }

    #[test]
    fn test_auto_weather_excludes_explicit_flags() {
        let cli = Cli::try_parse_from(["qq", "wait", "EFTELING", "Python", "--auto-weather"]).unwrap();
        let Command::Wait { weather, .. } = cli.command else {
            panic!("expected wait");
        };
        assert!(weather.auto_weather);
        assert_eq!(weather.resolve(today()), None);

        assert!(Cli::try_parse_from(["qq", "plan", "EFTELING", "--auto-weather", "--temp", "25"]).is_err());
        assert!(Cli::try_parse_from(["qq", "plan", "EFTELING", "--auto-weather", "--climate"]).is_err());
    }

    #[test]
    fn test_best_times_after() {
        let cli = Cli::try_parse_from(["qq", "best-times", "EFTELING", "Python", "--after", "now"]).unwrap();
        let Command::BestTimes { after, from_hour, .. } = cli.command else {
            panic!("expected best-times");
        };
        assert_eq!(after.as_deref(), Some("now"));
        assert!(from_hour.is_none());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
