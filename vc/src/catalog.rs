//! Venue catalog types, loading and lookup

use chrono::{DateTime, Local, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::CatalogError;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.yml");

/// Categories that identify a food-service location rather than a ride
const FOOD_CATEGORIES: &[&str] = &["Restaurant", "Snack"];

/// A WGS84 coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// A named zone ("land") inside a venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub location: GeoPoint,
}

/// Walking time between two zones, valid in both directions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneLink {
    pub from: String,
    pub to: String,
    pub minutes: u32,
}

/// A ride, show or food-service location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Attraction {
    /// Unique within the venue
    pub name: String,

    /// Ride class ("Coaster", "DarkRide", ...) or food service ("Restaurant", "Snack")
    pub category: String,

    pub zone: String,

    #[serde(default)]
    pub indoor: bool,

    /// Nominal ride or experience length
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,

    /// Theoretical riders per hour
    #[serde(default)]
    pub capacity: u32,

    /// Quality score, 0-10
    #[serde(default)]
    pub score: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,

    /// Alternative spellings used by live feeds
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Owning venue id, filled in when the catalog is indexed
    #[serde(skip)]
    pub venue: String,
}

fn default_duration_minutes() -> u32 {
    5
}

impl Attraction {
    /// True for restaurants and snack bars
    pub fn is_food_service(&self) -> bool {
        FOOD_CATEGORIES.iter().any(|c| c.eq_ignore_ascii_case(&self.category))
    }
}

/// A theme park instance with its own attractions, zones and hours
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Venue {
    pub id: String,
    pub name: String,

    /// Identifier of this venue on the live queue feed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_feed_id: Option<u32>,

    #[serde(with = "hhmm", default = "default_opens")]
    pub opens: NaiveTime,

    #[serde(with = "hhmm", default = "default_closes")]
    pub closes: NaiveTime,

    /// IANA zone the opening hours are expressed in; the host's zone when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<Tz>,

    pub entrance: GeoPoint,

    #[serde(default)]
    pub zones: Vec<Zone>,

    /// Explicit zone adjacency; when present it replaces geographic estimates
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zone_links: Vec<ZoneLink>,

    pub attractions: Vec<Attraction>,

    #[serde(skip)]
    by_name: HashMap<String, usize>,

    #[serde(skip)]
    by_alias: HashMap<String, usize>,
}

fn default_opens() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn default_closes() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN)
}

impl Venue {
    /// Venue wall-clock time for a UTC instant
    pub fn local_time(&self, utc: DateTime<Utc>) -> NaiveDateTime {
        match self.timezone {
            Some(tz) => utc.with_timezone(&tz).naive_local(),
            None => utc.with_timezone(&Local).naive_local(),
        }
    }

    /// Current venue wall-clock time
    pub fn now(&self) -> NaiveDateTime {
        self.local_time(Utc::now())
    }

    /// Look up an attraction by its exact catalog name
    pub fn attraction(&self, name: &str) -> Option<&Attraction> {
        self.by_name.get(name).map(|&i| &self.attractions[i])
    }

    /// Resolve a name as spelled by an outside source (live feed, user input)
    pub fn resolve(&self, raw: &str) -> Option<&Attraction> {
        if let Some(attraction) = self.attraction(raw) {
            return Some(attraction);
        }
        self.by_alias.get(&normalize_name(raw)).map(|&i| &self.attractions[i])
    }

    /// Rides, shows and everything else that is not food service
    pub fn rides(&self) -> impl Iterator<Item = &Attraction> {
        self.attractions.iter().filter(|a| !a.is_food_service())
    }

    pub fn food_services(&self) -> impl Iterator<Item = &Attraction> {
        self.attractions.iter().filter(|a| a.is_food_service())
    }

    pub fn zone_location(&self, zone: &str) -> Option<GeoPoint> {
        self.zones.iter().find(|z| z.name == zone).map(|z| z.location)
    }

    pub fn has_zone_links(&self) -> bool {
        !self.zone_links.is_empty()
    }

    /// Adjacency lookup between two zones in either direction
    pub fn zone_minutes(&self, a: &str, b: &str) -> Option<u32> {
        self.zone_links
            .iter()
            .find(|l| (l.from == a && l.to == b) || (l.from == b && l.to == a))
            .map(|l| l.minutes)
    }

    /// Best known coordinate for an attraction: its own, else its zone's
    pub fn locate(&self, attraction: &Attraction) -> Option<GeoPoint> {
        attraction.location.or_else(|| self.zone_location(&attraction.zone))
    }

    fn index(&mut self) -> Result<(), CatalogError> {
        debug!(venue = %self.id, "Venue::index: called");
        if self.closes <= self.opens {
            return Err(CatalogError::InvalidHours {
                venue: self.id.clone(),
                opens: self.opens.format("%H:%M").to_string(),
                closes: self.closes.format("%H:%M").to_string(),
            });
        }

        self.by_name.clear();
        self.by_alias.clear();

        for (i, attraction) in self.attractions.iter_mut().enumerate() {
            attraction.venue = self.id.clone();

            if !(0.0..=10.0).contains(&attraction.score) {
                return Err(CatalogError::ScoreOutOfRange {
                    venue: self.id.clone(),
                    name: attraction.name.clone(),
                    score: attraction.score,
                });
            }

            if self.by_name.insert(attraction.name.clone(), i).is_some() {
                return Err(CatalogError::DuplicateAttraction {
                    venue: self.id.clone(),
                    name: attraction.name.clone(),
                });
            }
        }

        for (i, attraction) in self.attractions.iter().enumerate() {
            let keys = std::iter::once(&attraction.name).chain(attraction.aliases.iter());
            for key in keys {
                let normalized = normalize_name(key);
                if let Some(&other) = self.by_alias.get(&normalized)
                    && other != i
                {
                    return Err(CatalogError::AmbiguousAlias {
                        venue: self.id.clone(),
                        alias: key.clone(),
                        first: self.attractions[other].name.clone(),
                        second: attraction.name.clone(),
                    });
                }
                self.by_alias.insert(normalized, i);
            }
        }

        for link in &self.zone_links {
            let known = |zone: &str| self.attractions.iter().any(|a| a.zone == zone);
            if !known(&link.from) || !known(&link.to) {
                return Err(CatalogError::UnknownZone {
                    venue: self.id.clone(),
                    from: link.from.clone(),
                    to: link.to.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Normalize an attraction name for alias matching
///
/// Lowercases and keeps only alphanumeric runs, joined by single spaces, so
/// "F.L.Y." and "fly" or "Joris  en de Draak!" and "joris en de draak" meet.
pub fn normalize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_space = true;
        }
    }
    out
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    venues: Vec<Venue>,
}

/// Read-only table of venues and their attractions
#[derive(Debug, Clone)]
pub struct Catalog {
    venues: Vec<Venue>,
}

impl Catalog {
    /// Catalog embedded in the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    /// Load a catalog file; `.json` is parsed as JSON, anything else as YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        debug!(?path, "Catalog::load: called");
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            _ => Self::from_yaml_str(&content)?,
        };
        info!("Loaded catalog from {} ({} venues)", path.display(), catalog.venues.len());
        Ok(catalog)
    }

    /// Load from a path when given, otherwise fall back to the built-in catalog
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(p) => Self::load(p),
            None => Self::builtin(),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Self::from_venues(file.venues)
    }

    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::from_venues(file.venues)
    }

    /// Build and index a catalog from already-parsed venues
    pub fn from_venues(mut venues: Vec<Venue>) -> Result<Self, CatalogError> {
        let mut seen: Vec<&str> = Vec::new();
        for venue in &venues {
            if seen.iter().any(|id| id.eq_ignore_ascii_case(&venue.id)) {
                return Err(CatalogError::DuplicateVenue { venue: venue.id.clone() });
            }
            seen.push(&venue.id);
        }

        for venue in &mut venues {
            venue.index()?;
        }
        Ok(Self { venues })
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    /// Find a venue by id, ignoring ASCII case
    pub fn venue(&self, id: &str) -> Option<&Venue> {
        self.venues.iter().find(|v| v.id.eq_ignore_ascii_case(id))
    }

    pub fn attraction(&self, venue: &str, name: &str) -> Option<&Attraction> {
        self.venue(venue).and_then(|v| v.attraction(name))
    }

    /// Total number of attractions across all venues
    pub fn len(&self) -> usize {
        self.venues.iter().map(|v| v.attractions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, "%H:%M").map_err(serde::de::Error::custom)
    }
}
