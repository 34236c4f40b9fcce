//! QueueQuest - theme park itinerary planner
//!
//! Turns a guest's wishlist into a timed walk-queue-ride itinerary for one
//! venue, using live posted waits when fresh and wait-time forecasts otherwise.
//!
//! # Modules
//!
//! - [`domain`] - Requests, wishlists, itineraries
//! - [`transit`] - Walking time between locations
//! - [`live`] - Live queue feed, parsing and caching
//! - [`oracle`] - Wait predictions (live, forecast, heuristic)
//! - [`planner`] - Validation, scoring policies and the greedy planner
//! - [`weather`] - Daily weather outlook for a venue
//! - [`service`] - Async facade wiring live data into the planner
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod live;
pub mod oracle;
pub mod planner;
pub mod service;
pub mod transit;
pub mod weather;

pub use domain::{Itinerary, Location, LunchConfig, PacingProfile, PlanMode, PlanRequest, Provenance, Step, StepKind, Wishlist};
pub use oracle::{WaitEstimate, WaitOracle};
pub use planner::{Comparison, PlanError, Planner};
pub use service::PlanningService;
pub use transit::TransitModel;
