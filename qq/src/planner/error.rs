//! Planning request errors

use chrono::NaiveDateTime;
use thiserror::Error;

/// Structurally invalid planning input, rejected before the planner runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("Invalid clock time '{0}', expected HH:MM")]
    InvalidClock(String),

    #[error("Unknown venue: {0}")]
    UnknownVenue(String),

    #[error("Unknown attraction '{name}' in venue {venue}")]
    UnknownAttraction { venue: String, name: String },

    #[error("Attraction '{0}' is listed more than once")]
    DuplicateAttraction(String),

    #[error("Start {start} is not before end {end}")]
    InvalidWindow { start: NaiveDateTime, end: NaiveDateTime },

    #[error("Pace must be a positive number, got {0}")]
    InvalidPace(f64),

    #[error("Lunch destination '{0}' is not a food service")]
    NotFoodService(String),

    #[error("Lunch duration must be at least one minute")]
    ZeroLunchDuration,
}
