//! Step kinds for itinerary entries

use serde::{Deserialize, Serialize};

/// Why a step is in the itinerary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepKind {
    /// High-priority wishlist entry
    Must,
    /// Filler wishlist entry
    Should,
    /// Configured meal break
    Lunch,
    /// Chosen by the max-value planner
    Score,
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Must => write!(f, "MUST"),
            Self::Should => write!(f, "SHOULD"),
            Self::Lunch => write!(f, "LUNCH"),
            Self::Score => write!(f, "SCORE"),
        }
    }
}

impl std::str::FromStr for StepKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "must" => Ok(Self::Must),
            "should" => Ok(Self::Should),
            "lunch" => Ok(Self::Lunch),
            "score" => Ok(Self::Score),
            _ => Err(format!("Unknown step kind: {}", s)),
        }
    }
}
