//! Wait estimate result and the oracle contract

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use venuecatalog::{Attraction, Venue};

use super::weather::WeatherOverride;
use crate::domain::Provenance;
use crate::live::LiveSnapshot;

/// Wait reported for closed attractions by callers that need a plain number
pub const UNAVAILABLE_WAIT: u32 = 999;

/// Which path produced a wait figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitSource {
    Live,
    Forecast,
    Heuristic,
}

impl std::fmt::Display for WaitSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Forecast => write!(f, "forecast"),
            Self::Heuristic => write!(f, "heuristic"),
        }
    }
}

impl From<WaitSource> for Provenance {
    fn from(source: WaitSource) -> Self {
        match source {
            WaitSource::Live => Provenance::Live,
            WaitSource::Forecast => Provenance::Forecast,
            WaitSource::Heuristic => Provenance::Heuristic,
        }
    }
}

/// Expected queue for one attraction at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WaitEstimate {
    Available { minutes: u32, source: WaitSource },
    Closed,
}

impl WaitEstimate {
    pub fn live(minutes: u32) -> Self {
        Self::Available {
            minutes,
            source: WaitSource::Live,
        }
    }

    pub fn forecast(minutes: u32) -> Self {
        Self::Available {
            minutes,
            source: WaitSource::Forecast,
        }
    }

    pub fn heuristic(minutes: u32) -> Self {
        Self::Available {
            minutes,
            source: WaitSource::Heuristic,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    pub fn minutes(&self) -> Option<u32> {
        match self {
            Self::Available { minutes, .. } => Some(*minutes),
            Self::Closed => None,
        }
    }

    pub fn source(&self) -> Option<WaitSource> {
        match self {
            Self::Available { source, .. } => Some(*source),
            Self::Closed => None,
        }
    }

    /// Minutes, or [`UNAVAILABLE_WAIT`] when closed
    pub fn as_minutes(&self) -> u32 {
        self.minutes().unwrap_or(UNAVAILABLE_WAIT)
    }
}

impl std::fmt::Display for WaitEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available { minutes, source } => write!(f, "{} min ({})", minutes, source),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Predicts the queue an attraction will have at a given instant
pub trait WaitOracle: Send + Sync {
    fn predict_wait(
        &self,
        venue: &Venue,
        attraction: &Attraction,
        instant: NaiveDateTime,
        live: Option<&LiveSnapshot>,
        weather: Option<&WeatherOverride>,
    ) -> WaitEstimate;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_sentinel() {
        assert_eq!(WaitEstimate::Closed.as_minutes(), UNAVAILABLE_WAIT);
        assert!(WaitEstimate::Closed.minutes().is_none());
        assert_eq!(WaitEstimate::live(25).as_minutes(), 25);
    }

    #[test]
    fn test_provenance_mapping() {
        assert_eq!(Provenance::from(WaitSource::Live), Provenance::Live);
        assert_eq!(
            WaitEstimate::heuristic(20).source().map(Provenance::from),
            Some(Provenance::Heuristic)
        );
        assert_eq!(WaitEstimate::Closed.source(), None);
    }

    #[test]
    fn test_estimate_serde() {
        let json = serde_json::to_string(&WaitEstimate::forecast(15)).unwrap();
        assert_eq!(json, r#"{"status":"available","minutes":15,"source":"forecast"}"#);
        let closed: WaitEstimate = serde_json::from_str(r#"{"status":"closed"}"#).unwrap();
        assert!(closed.is_closed());
    }
}
