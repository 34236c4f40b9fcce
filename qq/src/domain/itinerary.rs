//! Planner output

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::StepKind;

/// Where a step's wait figure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Posted wait from a fresh live snapshot
    Live,
    /// Regression estimator forecast
    Forecast,
    /// Deterministic fallback when no estimator is loaded
    Heuristic,
    /// No queue involved (meal break)
    Fixed,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Forecast => write!(f, "forecast"),
            Self::Heuristic => write!(f, "heuristic"),
            Self::Fixed => write!(f, "fixed"),
        }
    }
}

/// One stop of the itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Step {
    pub attraction: String,
    pub kind: StepKind,
    pub transit_minutes: u32,
    pub wait_minutes: u32,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub wait_start: NaiveDateTime,
    pub ride_start: NaiveDateTime,
    pub ride_end: NaiveDateTime,
    pub provenance: Provenance,
    /// Short human-readable remark
    pub note: String,
}

impl Step {
    /// The step's clock times in chronological order
    pub fn times(&self) -> [NaiveDateTime; 5] {
        [
            self.departure,
            self.arrival,
            self.wait_start,
            self.ride_start,
            self.ride_end,
        ]
    }
}

/// Ordered plan plus what could not be planned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Itinerary {
    pub steps: Vec<Step>,

    /// Reported closed while planning; never scheduled
    pub closed: Vec<String>,

    /// Open but could not fit before the deadline
    pub skipped: Vec<String>,

    /// A lunch break was requested but could not fit before closing
    #[serde(default)]
    pub lunch_dropped: bool,
}

impl Itinerary {
    pub fn total_wait_minutes(&self) -> u32 {
        self.steps.iter().map(|s| s.wait_minutes).sum()
    }

    pub fn total_transit_minutes(&self) -> u32 {
        self.steps.iter().map(|s| s.transit_minutes).sum()
    }

    /// Number of ride steps (meal breaks excluded)
    pub fn ride_count(&self) -> usize {
        self.steps.iter().filter(|s| s.kind != StepKind::Lunch).count()
    }

    pub fn lunch_step(&self) -> Option<&Step> {
        self.steps.iter().find(|s| s.kind == StepKind::Lunch)
    }

    /// Every clock time across all steps is non-decreasing
    pub fn is_chronological(&self) -> bool {
        let times: Vec<NaiveDateTime> = self.steps.iter().flat_map(|s| s.times()).collect();
        times.windows(2).all(|w| w[0] <= w[1])
    }

    /// Latest ride end, if any step was planned
    pub fn finishes_at(&self) -> Option<NaiveDateTime> {
        self.steps.last().map(|s| s.ride_end)
    }
}
