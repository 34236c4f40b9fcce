//! Catalog error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Venue {venue} is defined more than once")]
    DuplicateVenue { venue: String },

    #[error("Attraction '{name}' appears more than once in venue {venue}")]
    DuplicateAttraction { venue: String, name: String },

    #[error("Alias '{alias}' in venue {venue} is claimed by both '{first}' and '{second}'")]
    AmbiguousAlias {
        venue: String,
        alias: String,
        first: String,
        second: String,
    },

    #[error("Zone link {from} -> {to} in venue {venue} references a zone no attraction uses")]
    UnknownZone { venue: String, from: String, to: String },

    #[error("Attraction '{name}' in venue {venue} has score {score} outside 0-10")]
    ScoreOutOfRange { venue: String, name: String, score: f64 },

    #[error("Venue {venue} closes ({closes}) before it opens ({opens})")]
    InvalidHours {
        venue: String,
        opens: String,
        closes: String,
    },
}
