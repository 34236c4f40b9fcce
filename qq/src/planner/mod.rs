//! Itinerary planner
//!
//! A greedy loop over a simulated clock. At each step every remaining
//! candidate is costed from the current position and time, and the cheapest
//! feasible one is scheduled. What "cheapest" and "feasible" mean comes from
//! a [`ScoringPolicy`] selected by the request's planning mode.

mod config;
mod engine;
mod error;
pub mod scoring;
mod validate;

pub use config::PlannerConfig;
pub use engine::{Comparison, Planner};
pub use error::PlanError;
pub use scoring::{MaxValuePolicy, NearestPolicy, PriorityPolicy, ScoringPolicy, policy_for};
pub use validate::{parse_clock, validate};
