//! Planner tuning

use serde::{Deserialize, Serialize};

/// Cost-function weights and thresholds
///
/// None of these are derived from first principles; they are starting points
/// meant to be tuned per venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlannerConfig {
    /// Cost multiplier for should-have entries
    pub should_have_multiplier: f64,

    /// Cost multiplier for a must-have whose queue is short right now
    pub quiet_headliner_discount: f64,

    /// Waits at or under this count as short (discount uses strictly under)
    pub short_wait_threshold: u32,

    /// How far ahead the regret check looks
    pub regret_lookahead_minutes: i64,

    /// Wait change (minutes) that counts as material
    pub regret_threshold: u32,

    /// Bonus per minute a queue is expected to grow
    pub urgency_weight: f64,

    /// Penalty per minute a queue is expected to shrink
    pub deferral_weight: f64,

    /// Quality above which back-to-back repeats are tolerated
    pub high_quality_threshold: f64,

    pub repeat_penalty_high: f64,
    pub repeat_penalty_low_quality: f64,

    /// Per-visit ROI decay in max-value planning
    pub repeat_decay: f64,

    /// Hard cap on steps in one itinerary
    pub max_steps: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            should_have_multiplier: 1.5,
            quiet_headliner_discount: 0.5,
            short_wait_threshold: 15,
            regret_lookahead_minutes: 120,
            regret_threshold: 10,
            urgency_weight: 1.0,
            deferral_weight: 2.5,
            high_quality_threshold: 8.0,
            repeat_penalty_high: 5.0,
            repeat_penalty_low_quality: 1000.0,
            repeat_decay: 0.5,
            max_steps: 200,
        }
    }
}
