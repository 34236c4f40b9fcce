//! Wishlist, lunch break and walking pace inputs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::StepKind;

/// Two-tier list of attractions a guest wants to do, plus what is already done
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Wishlist {
    /// High priority, in the order the guest listed them
    #[serde(default)]
    pub must_have: Vec<String>,

    /// Filler, in the order the guest listed them
    #[serde(default)]
    pub should_have: Vec<String>,

    /// Excluded from every future plan
    #[serde(default)]
    pub completed: BTreeSet<String>,
}

impl Wishlist {
    pub fn new<M, S>(must_have: M, should_have: S) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            must_have: must_have.into_iter().map(Into::into).collect(),
            should_have: should_have.into_iter().map(Into::into).collect(),
            completed: BTreeSet::new(),
        }
    }

    /// Wishlist with the attraction removed from both tiers and marked done
    pub fn mark_done(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.must_have.retain(|n| n != name);
        next.should_have.retain(|n| n != name);
        next.completed.insert(name.to_string());
        next
    }

    pub fn is_done(&self, name: &str) -> bool {
        self.completed.contains(name)
    }

    /// Entries still to plan, must-haves first, each in listed order
    pub fn pending(&self) -> impl Iterator<Item = (&str, StepKind)> {
        let must = self.must_have.iter().map(|n| (n.as_str(), StepKind::Must));
        let should = self.should_have.iter().map(|n| (n.as_str(), StepKind::Should));
        must.chain(should).filter(|(n, _)| !self.is_done(n))
    }

    pub fn is_empty(&self) -> bool {
        self.pending().next().is_none()
    }
}

/// A fixed meal break
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LunchConfig {
    /// Earliest moment the break may start
    pub at: NaiveDateTime,
    pub duration_minutes: u32,
    /// Food-service attraction to eat at
    pub destination: String,
}

/// Multiplier applied to every walking time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PacingProfile(pub f64);

impl PacingProfile {
    pub const FAST: Self = Self(0.7);
    pub const NORMAL: Self = Self(1.0);
    pub const RELAXED: Self = Self(1.4);

    pub fn factor(&self) -> f64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl Default for PacingProfile {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl std::fmt::Display for PacingProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PacingProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::FAST),
            "normal" => Ok(Self::NORMAL),
            "relaxed" => Ok(Self::RELAXED),
            other => other
                .parse::<f64>()
                .map(Self)
                .map_err(|_| format!("Unknown pace: {} (use fast, normal, relaxed or a number)", s)),
        }
    }
}
