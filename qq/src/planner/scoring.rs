//! Scoring policies for the greedy planner
//!
//! The planner loop is shared; a policy decides which attractions are
//! candidates, which of them are feasible at a given moment and how much
//! each one costs. Lowest cost wins.

use chrono::{Duration, NaiveDateTime};
use venuecatalog::{Attraction, Venue};

use super::config::PlannerConfig;
use crate::domain::{PlanMode, PlanRequest, Provenance, StepKind};
use crate::oracle::WaitEstimate;

/// One attraction evaluated from the current position and clock
#[derive(Debug, Clone)]
pub struct Candidate<'v> {
    pub attraction: &'v Attraction,
    pub kind: StepKind,
    pub transit_minutes: u32,
    pub wait_minutes: u32,
    pub arrival: NaiveDateTime,
    pub ride_end: NaiveDateTime,
    /// Visits already planned in this run
    pub visits: u32,
    /// Same attraction as the step just before
    pub repeats_previous: bool,
    /// Where the wait figure came from
    pub provenance: Provenance,
}

/// What a policy may consult while costing a candidate
pub struct CostContext<'c> {
    pub config: &'c PlannerConfig,
    pub close: NaiveDateTime,
    /// Wait prediction for any attraction at any instant
    pub forecast: &'c dyn Fn(&Attraction, NaiveDateTime) -> WaitEstimate,
}

/// Strategy plugged into the planner loop
pub trait ScoringPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Candidate attractions in tie-break order
    fn candidates<'v>(&self, venue: &'v Venue, request: &PlanRequest) -> Vec<(&'v Attraction, StepKind)>;

    /// Whether an attraction stays a candidate after being visited
    fn allows_repeats(&self) -> bool {
        false
    }

    /// Whether the request's lunch break is honoured
    fn schedules_lunch(&self) -> bool {
        true
    }

    fn is_feasible(&self, candidate: &Candidate<'_>, ctx: &CostContext<'_>) -> bool;

    fn cost(&self, candidate: &Candidate<'_>, ctx: &CostContext<'_>) -> f64;
}

/// Policy for a planning mode
pub fn policy_for(mode: PlanMode) -> Box<dyn ScoringPolicy> {
    match mode {
        PlanMode::Priority => Box::new(PriorityPolicy),
        PlanMode::MaxValue => Box::new(MaxValuePolicy),
        PlanMode::Nearest => Box::new(NearestPolicy),
    }
}

fn wishlist_candidates<'v>(venue: &'v Venue, request: &PlanRequest) -> Vec<(&'v Attraction, StepKind)> {
    request
        .wishlist
        .pending()
        .filter_map(|(name, kind)| venue.attraction(name).map(|a| (a, kind)))
        .collect()
}

/// Regret/urgency correction for doing an attraction now versus later
///
/// Negative when the queue is expected to grow materially (go now), positive
/// when it is expected to shrink materially (defer).
pub fn regret_adjustment(candidate: &Candidate<'_>, ctx: &CostContext<'_>) -> f64 {
    let config = ctx.config;
    let later_at = candidate.arrival + Duration::minutes(config.regret_lookahead_minutes);
    if later_at >= ctx.close {
        return 0.0;
    }
    let Some(later) = (ctx.forecast)(candidate.attraction, later_at).minutes() else {
        return 0.0;
    };
    let delta = later as f64 - candidate.wait_minutes as f64;
    let threshold = config.regret_threshold as f64;
    if delta > threshold {
        -config.urgency_weight * delta
    } else if delta < -threshold {
        config.deferral_weight * delta.abs()
    } else {
        0.0
    }
}

/// Penalty for doing the same attraction twice in a row
pub fn repeat_penalty(candidate: &Candidate<'_>, config: &PlannerConfig) -> f64 {
    if !candidate.repeats_previous {
        0.0
    } else if candidate.attraction.score > config.high_quality_threshold {
        config.repeat_penalty_high
    } else {
        config.repeat_penalty_low_quality
    }
}

/// Wishlist-driven planning: walk plus queue, weighted by tier
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityPolicy;

impl ScoringPolicy for PriorityPolicy {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn candidates<'v>(&self, venue: &'v Venue, request: &PlanRequest) -> Vec<(&'v Attraction, StepKind)> {
        wishlist_candidates(venue, request)
    }

    fn is_feasible(&self, candidate: &Candidate<'_>, ctx: &CostContext<'_>) -> bool {
        candidate.ride_end <= ctx.close
    }

    fn cost(&self, candidate: &Candidate<'_>, ctx: &CostContext<'_>) -> f64 {
        let config = ctx.config;
        let tier_factor = match candidate.kind {
            StepKind::Should => config.should_have_multiplier,
            _ => 1.0,
        };
        let quiet_discount = if candidate.kind == StepKind::Must && candidate.wait_minutes < config.short_wait_threshold {
            config.quiet_headliner_discount
        } else {
            1.0
        };
        let base = (candidate.transit_minutes + candidate.wait_minutes) as f64;
        base * tier_factor * quiet_discount + regret_adjustment(candidate, ctx) + repeat_penalty(candidate, config)
    }
}

/// Wishlist-agnostic planning: best quality per minute spent
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxValuePolicy;

impl MaxValuePolicy {
    /// Quality per minute, decayed per prior visit
    pub fn roi(candidate: &Candidate<'_>, config: &PlannerConfig) -> f64 {
        let decay = config.repeat_decay.powi(candidate.visits as i32);
        let minutes = candidate.transit_minutes + candidate.wait_minutes + candidate.attraction.duration_minutes;
        candidate.attraction.score * decay / minutes.max(1) as f64
    }
}

impl ScoringPolicy for MaxValuePolicy {
    fn name(&self) -> &'static str {
        "max-value"
    }

    fn candidates<'v>(&self, venue: &'v Venue, request: &PlanRequest) -> Vec<(&'v Attraction, StepKind)> {
        venue
            .rides()
            .filter(|a| !request.wishlist.is_done(&a.name))
            .map(|a| (a, StepKind::Score))
            .collect()
    }

    fn allows_repeats(&self) -> bool {
        true
    }

    fn schedules_lunch(&self) -> bool {
        false
    }

    fn is_feasible(&self, candidate: &Candidate<'_>, ctx: &CostContext<'_>) -> bool {
        if candidate.arrival >= ctx.close {
            return false;
        }
        !(candidate.repeats_previous && candidate.attraction.score <= ctx.config.high_quality_threshold)
    }

    fn cost(&self, candidate: &Candidate<'_>, ctx: &CostContext<'_>) -> f64 {
        -Self::roi(candidate, ctx.config)
    }
}

/// Naive baseline: always walk to the closest wishlist entry
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestPolicy;

impl ScoringPolicy for NearestPolicy {
    fn name(&self) -> &'static str {
        "nearest"
    }

    fn candidates<'v>(&self, venue: &'v Venue, request: &PlanRequest) -> Vec<(&'v Attraction, StepKind)> {
        wishlist_candidates(venue, request)
    }

    fn is_feasible(&self, candidate: &Candidate<'_>, ctx: &CostContext<'_>) -> bool {
        candidate.ride_end <= ctx.close
    }

    fn cost(&self, candidate: &Candidate<'_>, _ctx: &CostContext<'_>) -> f64 {
        candidate.transit_minutes as f64
    }
}
