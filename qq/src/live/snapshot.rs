//! Point-in-time live queue status for one venue

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Posted status of one attraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LiveStatus {
    pub is_open: bool,
    pub wait_minutes: u32,
}

impl LiveStatus {
    pub fn open(wait_minutes: u32) -> Self {
        Self {
            is_open: true,
            wait_minutes,
        }
    }

    pub fn closed() -> Self {
        Self {
            is_open: false,
            wait_minutes: 0,
        }
    }
}

/// Live statuses keyed by catalog attraction name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LiveSnapshot {
    pub venue: String,
    pub fetched_at: NaiveDateTime,
    pub statuses: BTreeMap<String, LiveStatus>,
}

impl LiveSnapshot {
    pub fn new(venue: impl Into<String>, fetched_at: NaiveDateTime) -> Self {
        Self {
            venue: venue.into(),
            fetched_at,
            statuses: BTreeMap::new(),
        }
    }

    pub fn with_status(mut self, attraction: impl Into<String>, status: LiveStatus) -> Self {
        self.statuses.insert(attraction.into(), status);
        self
    }

    pub fn status(&self, attraction: &str) -> Option<LiveStatus> {
        self.statuses.get(attraction).copied()
    }

    /// Whether the posted figures still describe `instant`
    ///
    /// Fresh when `0 <= instant - fetched_at < window`. Instants before the
    /// fetch or beyond the window are forecast instead.
    pub fn is_fresh_for(&self, instant: NaiveDateTime, window: Duration) -> bool {
        let age = instant - self.fetched_at;
        age >= Duration::zero() && age < window
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn open_count(&self) -> usize {
        self.statuses.values().filter(|s| s.is_open).count()
    }

    /// Share of listed attractions that are open; 0 for an empty snapshot
    pub fn open_fraction(&self) -> f64 {
        if self.statuses.is_empty() {
            return 0.0;
        }
        self.open_count() as f64 / self.statuses.len() as f64
    }

    /// Names the feed reports as closed, in name order
    pub fn closed_attractions(&self) -> impl Iterator<Item = &str> {
        self.statuses
            .iter()
            .filter(|(_, s)| !s.is_open)
            .map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 3).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_freshness_window() {
        let snapshot = LiveSnapshot::new("EFTELING", at(10, 0));
        let window = Duration::minutes(30);

        assert!(snapshot.is_fresh_for(at(10, 0), window));
        assert!(snapshot.is_fresh_for(at(10, 29), window));
        assert!(!snapshot.is_fresh_for(at(10, 30), window));
        assert!(!snapshot.is_fresh_for(at(9, 59), window));
    }

    #[test]
    fn test_open_fraction() {
        let snapshot = LiveSnapshot::new("EFTELING", at(10, 0))
            .with_status("Python", LiveStatus::open(15))
            .with_status("Baron 1898", LiveStatus::closed())
            .with_status("Symbolica", LiveStatus::open(40))
            .with_status("Droomvlucht", LiveStatus::closed());

        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot.open_count(), 2);
        assert!((snapshot.open_fraction() - 0.5).abs() < 1e-9);
        assert_eq!(
            snapshot.closed_attractions().collect::<Vec<_>>(),
            vec!["Baron 1898", "Droomvlucht"]
        );
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = LiveSnapshot::new("EFTELING", at(10, 0));
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.open_fraction(), 0.0);
        assert!(snapshot.status("Python").is_none());
    }
}
