//! VenueCatalog - static reference data for theme park planning
//!
//! Holds venues (zones, entrance, opening hours, optional zone adjacency) and
//! their attractions (category, zone, duration, capacity, quality score).
//! Loaded once and shared read-only by the planner.
//!
//! # Example
//!
//! ```ignore
//! use venuecatalog::Catalog;
//!
//! let catalog = Catalog::builtin()?;
//! let efteling = catalog.venue("EFTELING").unwrap();
//! let baron = efteling.resolve("baron 1898").unwrap();
//! assert_eq!(baron.zone, "Ruigrijk");
//! ```

pub mod cli;
pub mod config;
mod catalog;
mod error;

pub use catalog::{Attraction, Catalog, GeoPoint, Venue, Zone, ZoneLink, normalize_name};
pub use error::CatalogError;
