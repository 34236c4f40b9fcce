//! Planner behaviour against the built-in catalog with stub models

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use queuequest::domain::{Location, LunchConfig, PacingProfile, PlanMode, PlanRequest, Provenance, StepKind, Wishlist};
use queuequest::live::{LiveSnapshot, LiveStatus};
use queuequest::oracle::{ForecastOracle, SkyCondition, WaitEstimate, WaitOracle, WeatherOverride};
use queuequest::planner::scoring::Candidate;
use queuequest::planner::{MaxValuePolicy, PlanError, Planner, PlannerConfig};
use queuequest::transit::{TransitModel, WalkingModel};
use venuecatalog::{Attraction, Catalog, Venue};

/// Fixed walk between any two distinct locations
struct FixedTransit(u32);

impl TransitModel for FixedTransit {
    fn transit_minutes(&self, _venue: &Venue, origin: &Location, destination: &Location, _pace: PacingProfile) -> u32 {
        if origin == destination { 0 } else { self.0 }
    }
}

/// Same wait everywhere, except attractions listed as closed
struct FixedOracle {
    wait: u32,
    closed: HashSet<String>,
}

impl FixedOracle {
    fn new(wait: u32) -> Self {
        Self {
            wait,
            closed: HashSet::new(),
        }
    }
}

impl WaitOracle for FixedOracle {
    fn predict_wait(
        &self,
        _venue: &Venue,
        attraction: &Attraction,
        _instant: NaiveDateTime,
        _live: Option<&LiveSnapshot>,
        _weather: Option<&WeatherOverride>,
    ) -> WaitEstimate {
        if self.closed.contains(&attraction.name) {
            WaitEstimate::Closed
        } else {
            WaitEstimate::heuristic(self.wait)
        }
    }
}

/// Wait varies with the attraction and hour, so costs differ between steps
struct VaryingOracle;

impl WaitOracle for VaryingOracle {
    fn predict_wait(
        &self,
        _venue: &Venue,
        attraction: &Attraction,
        instant: NaiveDateTime,
        _live: Option<&LiveSnapshot>,
        _weather: Option<&WeatherOverride>,
    ) -> WaitEstimate {
        let minutes = (attraction.name.len() as u32 * 7 + instant.hour() * 3) % 45;
        WaitEstimate::forecast(minutes)
    }
}

/// Walk time set per destination, `default` for anything unlisted
struct DestinationTransit {
    minutes: HashMap<String, u32>,
    default: u32,
}

impl DestinationTransit {
    fn new(default: u32, minutes: &[(&str, u32)]) -> Self {
        Self {
            minutes: minutes.iter().map(|(name, m)| (name.to_string(), *m)).collect(),
            default,
        }
    }
}

impl TransitModel for DestinationTransit {
    fn transit_minutes(&self, _venue: &Venue, origin: &Location, destination: &Location, _pace: PacingProfile) -> u32 {
        if origin == destination {
            return 0;
        }
        match destination {
            Location::Attraction(name) => self.minutes.get(name).copied().unwrap_or(self.default),
            Location::Entrance => self.default,
        }
    }
}

/// Per-attraction queue that steps to a new length at given times
struct ProfileOracle {
    profiles: HashMap<String, Vec<(NaiveDateTime, u32)>>,
    default: u32,
}

impl ProfileOracle {
    fn new(default: u32) -> Self {
        Self {
            profiles: HashMap::new(),
            default,
        }
    }

    /// Wait from each listed instant onwards; `steps` must be in time order
    fn with_profile(mut self, name: &str, steps: &[(NaiveDateTime, u32)]) -> Self {
        self.profiles.insert(name.to_string(), steps.to_vec());
        self
    }
}

impl WaitOracle for ProfileOracle {
    fn predict_wait(
        &self,
        _venue: &Venue,
        attraction: &Attraction,
        instant: NaiveDateTime,
        _live: Option<&LiveSnapshot>,
        _weather: Option<&WeatherOverride>,
    ) -> WaitEstimate {
        let minutes = self
            .profiles
            .get(&attraction.name)
            .and_then(|steps| steps.iter().rev().find(|(from, _)| *from <= instant))
            .map_or(self.default, |(_, wait)| *wait);
        WaitEstimate::forecast(minutes)
    }
}

fn day() -> NaiveDate {
    // A Tuesday outside the holiday list
    NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
}

fn at(h: u32, m: u32) -> NaiveDateTime {
    day().and_hms_opt(h, m, 0).unwrap()
}

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::builtin().unwrap())
}

fn planner(oracle: impl WaitOracle + 'static) -> Planner {
    Planner::new(catalog(), Arc::new(FixedTransit(5)), Arc::new(oracle))
}

fn request(must: &[&str], should: &[&str]) -> PlanRequest {
    PlanRequest::new("EFTELING", at(10, 0), at(18, 0)).with_wishlist(Wishlist::new(must.iter().copied(), should.iter().copied()))
}

#[test]
fn test_single_must_have_scheduled_immediately() {
    let itinerary = planner(FixedOracle::new(10)).plan(&request(&["Baron 1898"], &[]), None).unwrap();

    assert_eq!(itinerary.steps.len(), 1);
    let step = &itinerary.steps[0];
    assert_eq!(step.attraction, "Baron 1898");
    assert_eq!(step.kind, StepKind::Must);
    assert_eq!(step.departure, at(10, 0));
    assert_eq!(step.arrival, at(10, 5));
    assert_eq!(step.ride_start, at(10, 15));
    assert_eq!(step.ride_end, at(10, 20));
    assert_eq!(step.provenance, Provenance::Heuristic);
    assert!(itinerary.closed.is_empty());
    assert!(itinerary.skipped.is_empty());
}

#[test]
fn test_closed_in_live_feed_is_reported_not_planned() {
    let planner = Planner::new(catalog(), Arc::new(FixedTransit(5)), Arc::new(ForecastOracle::default()));
    let snapshot = LiveSnapshot::new("EFTELING", at(10, 0))
        .with_status("Python", LiveStatus::closed())
        .with_status("Baron 1898", LiveStatus::open(20));

    let itinerary = planner
        .plan(&request(&["Python", "Baron 1898"], &[]), Some(&snapshot))
        .unwrap();

    assert_eq!(itinerary.closed, vec!["Python".to_string()]);
    assert_eq!(itinerary.steps.len(), 1);
    assert_eq!(itinerary.steps[0].attraction, "Baron 1898");
    assert_eq!(itinerary.steps[0].wait_minutes, 20);
    assert_eq!(itinerary.steps[0].provenance, Provenance::Live);
    assert!(itinerary.skipped.is_empty());
}

#[test]
fn test_live_closure_holds_under_weather_override() {
    let planner = Planner::new(catalog(), Arc::new(FixedTransit(5)), Arc::new(ForecastOracle::default()));
    let snapshot = LiveSnapshot::new("EFTELING", at(10, 0))
        .with_status("Python", LiveStatus::closed())
        .with_status("Baron 1898", LiveStatus::open(20));
    let req = request(&["Python", "Baron 1898"], &[]).with_weather(WeatherOverride::new(20.0, 0.0, SkyCondition::Sunny));

    let itinerary = planner.plan(&req, Some(&snapshot)).unwrap();

    assert_eq!(itinerary.closed, vec!["Python".to_string()]);
    assert!(itinerary.steps.iter().all(|s| s.attraction != "Python"));
    assert_eq!(itinerary.steps.len(), 1);
    // The override still replaces the posted wait of open attractions
    assert_eq!(itinerary.steps[0].attraction, "Baron 1898");
    assert_eq!(itinerary.steps[0].provenance, Provenance::Heuristic);
}

#[test]
fn test_growing_queue_is_ridden_first() {
    // Equal waits now; Python's queue triples from noon
    let oracle = ProfileOracle::new(20).with_profile("Python", &[(at(10, 0), 20), (at(12, 0), 60)]);
    let req = request(&["Baron 1898", "Python"], &[]);

    let itinerary = planner(oracle).plan(&req, None).unwrap();
    let order: Vec<_> = itinerary.steps.iter().map(|s| s.attraction.as_str()).collect();
    assert_eq!(order, vec!["Python", "Baron 1898"]);

    // Without the urgency term the tie goes to request order
    let flat = PlannerConfig {
        urgency_weight: 0.0,
        ..Default::default()
    };
    let oracle = ProfileOracle::new(20).with_profile("Python", &[(at(10, 0), 20), (at(12, 0), 60)]);
    let itinerary = planner(oracle).with_config(flat).plan(&req, None).unwrap();
    let order: Vec<_> = itinerary.steps.iter().map(|s| s.attraction.as_str()).collect();
    assert_eq!(order, vec!["Baron 1898", "Python"]);
}

#[test]
fn test_quiet_must_have_beats_nearer_busy_one() {
    // Symbolica: 20 min walk, 5 min queue. Baron 1898: 2 min walk, 15 min queue.
    let transit = DestinationTransit::new(5, &[("Symbolica", 20), ("Baron 1898", 2)]);
    let oracle = ProfileOracle::new(15).with_profile("Symbolica", &[(at(10, 0), 5)]);
    let planner = Planner::new(catalog(), Arc::new(transit), Arc::new(oracle));
    let req = request(&["Baron 1898", "Symbolica"], &[]);

    let itinerary = planner.plan(&req, None).unwrap();
    assert_eq!(itinerary.steps[0].attraction, "Symbolica");
    assert_eq!(itinerary.steps[0].transit_minutes, 20);
    assert_eq!(itinerary.steps[0].wait_minutes, 5);
    assert_eq!(itinerary.steps[1].attraction, "Baron 1898");

    // As a should-have the quiet one gets no discount and the near one wins
    let transit = DestinationTransit::new(5, &[("Symbolica", 20), ("Baron 1898", 2)]);
    let oracle = ProfileOracle::new(15).with_profile("Symbolica", &[(at(10, 0), 5)]);
    let planner = Planner::new(catalog(), Arc::new(transit), Arc::new(oracle));
    let itinerary = planner.plan(&request(&["Baron 1898"], &["Symbolica"]), None).unwrap();
    assert_eq!(itinerary.steps[0].attraction, "Baron 1898");
}

#[test]
fn test_closed_attraction_is_never_scheduled() {
    let mut oracle = FixedOracle::new(10);
    oracle.closed.insert("Symbolica".to_string());

    let itinerary = planner(oracle)
        .plan(&request(&["Baron 1898"], &["Symbolica"]), None)
        .unwrap();

    assert_eq!(itinerary.closed, vec!["Symbolica".to_string()]);
    assert!(itinerary.steps.iter().all(|s| s.attraction != "Symbolica"));
    assert!(itinerary.skipped.is_empty());
}

#[test]
fn test_window_too_short_skips_everything() {
    let req = PlanRequest::new("EFTELING", at(10, 0), at(10, 10))
        .with_wishlist(Wishlist::new(["Baron 1898", "Python"], Vec::<String>::new()));

    let itinerary = planner(FixedOracle::new(10)).plan(&req, None).unwrap();

    assert!(itinerary.steps.is_empty());
    assert_eq!(itinerary.skipped, vec!["Baron 1898".to_string(), "Python".to_string()]);
}

#[test]
fn test_planning_is_deterministic() {
    let planner = planner(VaryingOracle);
    let req = request(&["Baron 1898", "Python", "Symbolica"], &["Droomvlucht", "Vogel Rok"]);

    let first = planner.plan(&req, None).unwrap();
    let second = planner.plan(&req, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_planning_is_deterministic_with_live_snapshot() {
    let planner = Planner::new(catalog(), Arc::new(WalkingModel::default()), Arc::new(ForecastOracle::default()));
    let snapshot = LiveSnapshot::new("EFTELING", at(10, 0))
        .with_status("Baron 1898", LiveStatus::open(35))
        .with_status("Python", LiveStatus::open(10))
        .with_status("Vogel Rok", LiveStatus::closed());
    let req = request(&["Baron 1898", "Python", "Symbolica"], &["Droomvlucht", "Vogel Rok"]);

    let first = planner.plan(&req, Some(&snapshot)).unwrap();
    let second = planner.plan(&req, Some(&snapshot)).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.closed, vec!["Vogel Rok".to_string()]);
    assert!(first.steps.iter().any(|s| s.provenance == Provenance::Live));
}

#[test]
fn test_must_only_wishlist_yields_must_steps() {
    let itinerary = planner(VaryingOracle)
        .plan(&request(&["Baron 1898", "Python", "Symbolica"], &[]), None)
        .unwrap();

    assert_eq!(itinerary.steps.len(), 3);
    assert!(itinerary.steps.iter().all(|s| s.kind == StepKind::Must));
    assert!(itinerary.is_chronological());
}

#[test]
fn test_must_have_preferred_over_should_have_at_equal_cost() {
    let itinerary = planner(FixedOracle::new(20))
        .plan(&request(&["Python"], &["Baron 1898"]), None)
        .unwrap();

    let order: Vec<&str> = itinerary.steps.iter().map(|s| s.attraction.as_str()).collect();
    assert_eq!(order, vec!["Python", "Baron 1898"]);
    assert_eq!(itinerary.steps[1].kind, StepKind::Should);
}

#[test]
fn test_aliases_resolve_to_catalog_names() {
    let itinerary = planner(FixedOracle::new(10))
        .plan(&request(&["baron 1898"], &[]), None)
        .unwrap();
    assert_eq!(itinerary.steps[0].attraction, "Baron 1898");
}

#[test]
fn test_exactly_one_lunch_after_trigger() {
    let req = request(&["Baron 1898", "Python", "Symbolica", "Droomvlucht"], &[]).with_lunch(LunchConfig {
        at: at(10, 30),
        duration_minutes: 45,
        destination: "Kashba".to_string(),
    });

    let itinerary = planner(FixedOracle::new(10)).plan(&req, None).unwrap();

    let lunches: Vec<_> = itinerary.steps.iter().filter(|s| s.kind == StepKind::Lunch).collect();
    assert_eq!(lunches.len(), 1);
    let lunch = lunches[0];
    assert_eq!(lunch.attraction, "Kashba");
    assert!(lunch.arrival >= at(10, 30));
    assert_eq!(lunch.ride_end - lunch.ride_start, chrono::Duration::minutes(45));
    assert_eq!(lunch.provenance, Provenance::Fixed);
    assert!(!itinerary.lunch_dropped);
    assert_eq!(itinerary.ride_count(), 4);
    assert!(itinerary.is_chronological());
}

#[test]
fn test_lunch_after_closing_is_dropped() {
    let req = PlanRequest::new("EFTELING", at(17, 0), at(18, 0))
        .with_wishlist(Wishlist::new(["Baron 1898"], Vec::<String>::new()))
        .with_lunch(LunchConfig {
            at: at(17, 30),
            duration_minutes: 60,
            destination: "Kashba".to_string(),
        });

    let itinerary = planner(FixedOracle::new(10)).plan(&req, None).unwrap();

    assert!(itinerary.lunch_step().is_none());
    assert!(itinerary.lunch_dropped);
    assert_eq!(itinerary.ride_count(), 1);
}

#[test]
fn test_completed_attractions_are_excluded() {
    let wishlist = Wishlist::new(["Baron 1898", "Python"], Vec::<String>::new()).mark_done("Baron 1898");
    let req = PlanRequest::new("EFTELING", at(10, 0), at(18, 0)).with_wishlist(wishlist);

    let itinerary = planner(FixedOracle::new(10)).plan(&req, None).unwrap();

    assert!(itinerary.steps.iter().all(|s| s.attraction != "Baron 1898"));
    assert_eq!(itinerary.steps.len(), 1);
}

#[test]
fn test_max_value_never_repeats_low_quality_back_to_back() {
    let planner = planner(VaryingOracle);
    let req = PlanRequest::new("EFTELING", at(10, 0), at(18, 0)).with_mode(PlanMode::MaxValue);

    let itinerary = planner.plan(&req, None).unwrap();
    let venue = planner.catalog().venue("EFTELING").unwrap();
    let threshold = planner.config().high_quality_threshold;

    assert!(!itinerary.steps.is_empty());
    assert!(itinerary.steps.iter().all(|s| s.kind == StepKind::Score));
    for pair in itinerary.steps.windows(2) {
        if pair[0].attraction == pair[1].attraction {
            let score = venue.attraction(&pair[1].attraction).unwrap().score;
            assert!(score > threshold, "{} repeated back to back", pair[1].attraction);
        }
    }
    assert!(itinerary.steps.iter().all(|s| s.arrival < at(18, 0)));
}

#[test]
fn test_max_value_ignores_lunch() {
    let req = PlanRequest::new("EFTELING", at(10, 0), at(14, 0))
        .with_mode(PlanMode::MaxValue)
        .with_lunch(LunchConfig {
            at: at(12, 0),
            duration_minutes: 45,
            destination: "Kashba".to_string(),
        });

    let itinerary = planner(FixedOracle::new(10)).plan(&req, None).unwrap();
    assert!(itinerary.lunch_step().is_none());
}

#[test]
fn test_roi_decays_per_visit() {
    let catalog = Catalog::builtin().unwrap();
    let baron = catalog.attraction("EFTELING", "Baron 1898").unwrap();
    let config = PlannerConfig::default();
    let fresh = Candidate {
        attraction: baron,
        kind: StepKind::Score,
        transit_minutes: 5,
        wait_minutes: 10,
        arrival: at(10, 5),
        ride_end: at(10, 20),
        visits: 0,
        repeats_previous: false,
        provenance: Provenance::Forecast,
    };
    let repeat = Candidate {
        visits: 1,
        ..fresh.clone()
    };

    let first = MaxValuePolicy::roi(&fresh, &config);
    assert!((first - baron.score / 20.0).abs() < 1e-9);
    assert!((MaxValuePolicy::roi(&repeat, &config) - first * config.repeat_decay).abs() < 1e-9);
}

#[test]
fn test_compare_runs_both_policies() {
    let comparison = planner(FixedOracle::new(10))
        .compare(&request(&["Baron 1898", "Symbolica"], &[]), None)
        .unwrap();

    assert_eq!(comparison.baseline.ride_count(), 2);
    assert_eq!(comparison.planned.ride_count(), 2);
    assert_eq!(comparison.wait_saved_minutes(), 0);
    assert_eq!(comparison.extra_rides(), 0);
}

#[test]
fn test_invalid_requests_are_rejected() {
    let planner = planner(FixedOracle::new(10));

    let unknown_venue = PlanRequest::new("DISNEYLAND", at(10, 0), at(18, 0));
    assert_eq!(
        planner.plan(&unknown_venue, None).unwrap_err(),
        PlanError::UnknownVenue("DISNEYLAND".to_string())
    );

    let backwards = PlanRequest::new("EFTELING", at(18, 0), at(10, 0));
    assert!(matches!(
        planner.plan(&backwards, None).unwrap_err(),
        PlanError::InvalidWindow { .. }
    ));

    let lunch_on_ride = request(&["Python"], &[]).with_lunch(LunchConfig {
        at: at(12, 0),
        duration_minutes: 30,
        destination: "Baron 1898".to_string(),
    });
    assert_eq!(
        planner.plan(&lunch_on_ride, None).unwrap_err(),
        PlanError::NotFoodService("Baron 1898".to_string())
    );
}

const EFTELING_RIDES: &[&str] = &["Baron 1898", "Python", "Symbolica", "Droomvlucht", "Vogel Rok"];

proptest! {
    #[test]
    fn prop_itinerary_is_chronological_and_within_window(
        picks in proptest::sample::subsequence(EFTELING_RIDES.to_vec(), 1..=EFTELING_RIDES.len()),
        split in 0usize..=5,
        start_hour in 10u32..16,
        hours in 1u32..=8,
    ) {
        let end_hour = (start_hour + hours).min(18);
        prop_assume!(end_hour > start_hour);
        let split = split.min(picks.len());
        let (must, should) = picks.split_at(split);
        let req = PlanRequest::new("EFTELING", at(start_hour, 0), at(end_hour, 0))
            .with_wishlist(Wishlist::new(must.iter().copied(), should.iter().copied()));

        let itinerary = planner(VaryingOracle).plan(&req, None).unwrap();

        prop_assert!(itinerary.is_chronological());
        prop_assert!(itinerary.steps.iter().all(|s| s.ride_end <= at(end_hour, 0)));
        let mut seen = HashSet::new();
        prop_assert!(itinerary.steps.iter().all(|s| seen.insert(s.attraction.clone())));
        prop_assert_eq!(itinerary.steps.len() + itinerary.skipped.len(), picks.len());
    }
}
