//! Request validation at the planning boundary

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::HashSet;
use tracing::debug;
use venuecatalog::{Catalog, Venue};

use super::error::PlanError;
use crate::domain::{Location, PlanRequest};

/// Parse an "HH:MM" wall-clock time on the given date
pub fn parse_clock(date: NaiveDate, raw: &str) -> Result<NaiveDateTime, PlanError> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .map(|time| date.and_time(time))
        .map_err(|_| PlanError::InvalidClock(raw.to_string()))
}

fn canonical(venue: &Venue, raw: &str) -> Result<String, PlanError> {
    venue
        .resolve(raw)
        .map(|a| a.name.clone())
        .ok_or_else(|| PlanError::UnknownAttraction {
            venue: venue.id.clone(),
            name: raw.to_string(),
        })
}

/// Check a request against the catalog
///
/// Returns the venue and a copy of the request with every attraction name
/// replaced by its catalog spelling, so feed aliases and loose user input
/// ("fly", "baron-1898") are accepted.
pub fn validate<'c>(catalog: &'c Catalog, request: &PlanRequest) -> Result<(&'c Venue, PlanRequest), PlanError> {
    debug!(venue = %request.venue, mode = %request.mode, "validate: called");
    let venue = catalog
        .venue(&request.venue)
        .ok_or_else(|| PlanError::UnknownVenue(request.venue.clone()))?;

    if request.start >= request.end {
        return Err(PlanError::InvalidWindow {
            start: request.start,
            end: request.end,
        });
    }
    if !request.pace.is_valid() {
        return Err(PlanError::InvalidPace(request.pace.factor()));
    }

    let mut normalized = request.clone();
    normalized.venue = venue.id.clone();

    let mut seen = HashSet::new();
    normalized.wishlist.must_have = Vec::with_capacity(request.wishlist.must_have.len());
    normalized.wishlist.should_have = Vec::with_capacity(request.wishlist.should_have.len());
    for raw in &request.wishlist.must_have {
        let name = canonical(venue, raw)?;
        if !seen.insert(name.clone()) {
            return Err(PlanError::DuplicateAttraction(name));
        }
        normalized.wishlist.must_have.push(name);
    }
    for raw in &request.wishlist.should_have {
        let name = canonical(venue, raw)?;
        if !seen.insert(name.clone()) {
            return Err(PlanError::DuplicateAttraction(name));
        }
        normalized.wishlist.should_have.push(name);
    }
    normalized.wishlist.completed = request
        .wishlist
        .completed
        .iter()
        .map(|raw| canonical(venue, raw))
        .collect::<Result<_, _>>()?;

    if let Location::Attraction(raw) = &request.start_location {
        normalized.start_location = Location::Attraction(canonical(venue, raw)?);
    }

    if let Some(lunch) = &mut normalized.lunch {
        let name = canonical(venue, &lunch.destination)?;
        let is_food = venue.attraction(&name).is_some_and(|a| a.is_food_service());
        if !is_food {
            return Err(PlanError::NotFoodService(name));
        }
        if lunch.duration_minutes == 0 {
            return Err(PlanError::ZeroLunchDuration);
        }
        lunch.destination = name;
    }

    Ok((venue, normalized))
}
