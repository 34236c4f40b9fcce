//! Where a guest currently is

use serde::{Deserialize, Serialize};

/// A point inside a venue the planner can walk from or to
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// The venue's main gate
    #[default]
    Entrance,
    /// An attraction, by catalog name
    Attraction(String),
}

impl Location {
    pub fn attraction(name: impl Into<String>) -> Self {
        Self::Attraction(name.into())
    }

    /// Attraction name, or None for the entrance
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Entrance => None,
            Self::Attraction(name) => Some(name),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entrance => write!(f, "entrance"),
            Self::Attraction(name) => write!(f, "{}", name),
        }
    }
}

impl std::str::FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Location must not be empty".to_string());
        }
        if trimmed.eq_ignore_ascii_case("entrance") {
            return Ok(Self::Entrance);
        }
        Ok(Self::Attraction(trimmed.to_string()))
    }
}
