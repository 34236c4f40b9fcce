//! Domain types for QueueQuest
//!
//! Inputs to a planning call (request, wishlist, lunch, pace, start location)
//! and its output (itinerary of steps). All of them are plain values owned by
//! the caller; nothing here is shared between planning calls.

mod itinerary;
mod location;
mod request;
mod step_kind;
mod wishlist;

pub use itinerary::{Itinerary, Provenance, Step};
pub use location::Location;
pub use request::{PlanMode, PlanRequest};
pub use step_kind::StepKind;
pub use wishlist::{LunchConfig, PacingProfile, Wishlist};
