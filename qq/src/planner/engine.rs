//! Greedy itinerary planner over a simulated clock

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use venuecatalog::{Attraction, Catalog, Venue};

use super::config::PlannerConfig;
use super::error::PlanError;
use super::scoring::{Candidate, CostContext, ScoringPolicy, policy_for};
use super::validate::validate;
use crate::domain::{Itinerary, Location, LunchConfig, PlanMode, PlanRequest, Provenance, Step, StepKind};
use crate::live::LiveSnapshot;
use crate::oracle::{WaitEstimate, WaitOracle};
use crate::transit::TransitModel;

const NOTE_OPTIMAL: &str = "optimal time";
const NOTE_BUSY: &str = "busy, best option";
const NOTE_LUNCH: &str = "lunch break";

/// Builds itineraries from requests
///
/// Holds only read-only collaborators, so one planner can serve any number
/// of concurrent requests.
pub struct Planner {
    catalog: Arc<Catalog>,
    transit: Arc<dyn TransitModel>,
    oracle: Arc<dyn WaitOracle>,
    config: PlannerConfig,
}

/// Mutable state of one planning run
struct Run<'v> {
    venue: &'v Venue,
    close: NaiveDateTime,
    clock: NaiveDateTime,
    location: Location,
    pending: Vec<(&'v Attraction, StepKind)>,
    visits: HashMap<&'v str, u32>,
    lunch: Option<LunchConfig>,
    itinerary: Itinerary,
}

impl<'v> Run<'v> {
    fn previous(&self) -> Option<&str> {
        self.itinerary.steps.last().map(|s| s.attraction.as_str())
    }

    fn mark_closed(&mut self, name: &str) {
        if !self.itinerary.closed.iter().any(|c| c == name) {
            self.itinerary.closed.push(name.to_string());
        }
    }
}

impl Planner {
    pub fn new(catalog: Arc<Catalog>, transit: Arc<dyn TransitModel>, oracle: Arc<dyn WaitOracle>) -> Self {
        Self {
            catalog,
            transit,
            oracle,
            config: PlannerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn oracle(&self) -> &dyn WaitOracle {
        self.oracle.as_ref()
    }

    pub fn transit(&self) -> &dyn TransitModel {
        self.transit.as_ref()
    }

    /// Plan a request with the policy its mode selects
    pub fn plan(&self, request: &PlanRequest, live: Option<&LiveSnapshot>) -> Result<Itinerary, PlanError> {
        let policy = policy_for(request.mode);
        self.plan_with(request, live, policy.as_ref())
    }

    /// Plan a request with an explicit scoring policy
    pub fn plan_with(
        &self,
        request: &PlanRequest,
        live: Option<&LiveSnapshot>,
        policy: &dyn ScoringPolicy,
    ) -> Result<Itinerary, PlanError> {
        debug!(venue = %request.venue, policy = policy.name(), has_live = live.is_some(), "Planner::plan_with: called");
        let (venue, request) = validate(&self.catalog, request)?;
        let itinerary = self.run(venue, &request, live, policy);
        info!(
            venue = %venue.id,
            policy = policy.name(),
            steps = itinerary.steps.len(),
            closed = itinerary.closed.len(),
            skipped = itinerary.skipped.len(),
            "Planned itinerary"
        );
        Ok(itinerary)
    }

    /// Naive nearest-neighbour plan and priority plan for the same request
    pub fn compare(&self, request: &PlanRequest, live: Option<&LiveSnapshot>) -> Result<Comparison, PlanError> {
        debug!(venue = %request.venue, "Planner::compare: called");
        let baseline = self.plan_with(request, live, policy_for(PlanMode::Nearest).as_ref())?;
        let planned = self.plan_with(request, live, policy_for(PlanMode::Priority).as_ref())?;
        Ok(Comparison { baseline, planned })
    }

    fn run<'v>(
        &self,
        venue: &'v Venue,
        request: &PlanRequest,
        live: Option<&LiveSnapshot>,
        policy: &dyn ScoringPolicy,
    ) -> Itinerary {
        let weather = request.weather.as_ref();
        let forecast = |attraction: &Attraction, at: NaiveDateTime| {
            self.oracle.predict_wait(venue, attraction, at, live, weather)
        };

        let venue_close = request.start.date().and_time(venue.closes);
        let mut run = Run {
            venue,
            close: request.end.min(venue_close),
            clock: request.start,
            location: request.start_location.clone(),
            pending: policy.candidates(venue, request),
            visits: HashMap::new(),
            lunch: if policy.schedules_lunch() {
                request.lunch.clone()
            } else {
                None
            },
            itinerary: Itinerary::default(),
        };

        // Closed at the start of the run: report and never consider
        let start = run.clock;
        let (closed, open): (Vec<_>, Vec<_>) = run
            .pending
            .drain(..)
            .partition(|(a, _)| forecast(*a, start).is_closed());
        run.pending = open;
        for (attraction, _) in closed {
            run.mark_closed(&attraction.name);
        }

        while run.itinerary.steps.len() < self.config.max_steps {
            if let Some(lunch) = run.lunch.take_if(|l| run.clock >= l.at) {
                self.insert_lunch(&mut run, lunch, request);
                continue;
            }
            if run.clock >= run.close {
                break;
            }

            match self.select(&mut run, request, policy, &forecast) {
                Some(candidate) => self.emit(&mut run, candidate, policy),
                None => match run.lunch.take() {
                    Some(lunch) => {
                        debug!(trigger = %lunch.at, "Planner::run: nothing feasible, advancing to lunch");
                        run.clock = run.clock.max(lunch.at);
                        self.insert_lunch(&mut run, lunch, request);
                    }
                    None => break,
                },
            }
        }

        if run.lunch.is_some() {
            run.itinerary.lunch_dropped = true;
        }
        let Run {
            pending,
            visits,
            mut itinerary,
            ..
        } = run;
        itinerary.skipped = pending
            .into_iter()
            .filter(|(a, _)| !visits.contains_key(a.name.as_str()))
            .map(|(a, _)| a.name.clone())
            .collect();
        itinerary
    }

    /// Cheapest feasible candidate; closed ones leave the candidate set
    fn select<'v>(
        &self,
        run: &mut Run<'v>,
        request: &PlanRequest,
        policy: &dyn ScoringPolicy,
        forecast: &dyn Fn(&Attraction, NaiveDateTime) -> WaitEstimate,
    ) -> Option<Candidate<'v>> {
        let ctx = CostContext {
            config: &self.config,
            close: run.close,
            forecast,
        };
        let previous = run.previous().map(str::to_string);

        let mut best: Option<(f64, Candidate<'v>)> = None;
        let mut newly_closed = Vec::new();
        for &(attraction, kind) in &run.pending {
            let destination = Location::attraction(attraction.name.clone());
            let transit_minutes = self
                .transit
                .transit_minutes(run.venue, &run.location, &destination, request.pace);
            let arrival = run.clock + Duration::minutes(transit_minutes as i64);

            let estimate = forecast(attraction, arrival);
            let WaitEstimate::Available { minutes: wait_minutes, source } = estimate else {
                newly_closed.push(attraction.name.as_str());
                continue;
            };
            let ride_end = arrival + Duration::minutes((wait_minutes + attraction.duration_minutes) as i64);

            let candidate = Candidate {
                attraction,
                kind,
                transit_minutes,
                wait_minutes,
                arrival,
                ride_end,
                visits: run.visits.get(attraction.name.as_str()).copied().unwrap_or(0),
                repeats_previous: previous.as_deref() == Some(attraction.name.as_str()),
                provenance: Provenance::from(source),
            };
            if !policy.is_feasible(&candidate, &ctx) {
                continue;
            }
            let cost = policy.cost(&candidate, &ctx);
            // Strict comparison keeps the earliest candidate on ties
            if best.as_ref().is_none_or(|(best_cost, _)| cost < *best_cost) {
                best = Some((cost, candidate));
            }
        }

        if !newly_closed.is_empty() {
            debug!(?newly_closed, "Planner::select: attractions closed");
            for name in &newly_closed {
                run.mark_closed(name);
            }
            run.pending.retain(|(a, _)| !newly_closed.contains(&a.name.as_str()));
        }
        best.map(|(_, candidate)| candidate)
    }

    fn emit<'v>(&self, run: &mut Run<'v>, candidate: Candidate<'v>, policy: &dyn ScoringPolicy) {
        let attraction = candidate.attraction;
        let ride_start = candidate.arrival + Duration::minutes(candidate.wait_minutes as i64);
        let note = if candidate.wait_minutes <= self.config.short_wait_threshold {
            NOTE_OPTIMAL
        } else {
            NOTE_BUSY
        };
        let step = Step {
            attraction: attraction.name.clone(),
            kind: candidate.kind,
            transit_minutes: candidate.transit_minutes,
            wait_minutes: candidate.wait_minutes,
            departure: run.clock,
            arrival: candidate.arrival,
            wait_start: candidate.arrival,
            ride_start,
            ride_end: candidate.ride_end,
            provenance: candidate.provenance,
            note: note.to_string(),
        };
        debug!(attraction = %step.attraction, ride_end = %step.ride_end, "Planner::emit: step");

        run.clock = candidate.ride_end;
        run.location = Location::attraction(attraction.name.clone());
        *run.visits.entry(attraction.name.as_str()).or_insert(0) += 1;
        if !policy.allows_repeats() {
            run.pending.retain(|(a, _)| a.name != attraction.name);
        }
        run.itinerary.steps.push(step);
    }

    fn insert_lunch(&self, run: &mut Run<'_>, lunch: LunchConfig, request: &PlanRequest) {
        let destination = Location::attraction(lunch.destination.clone());
        let transit_minutes = self
            .transit
            .transit_minutes(run.venue, &run.location, &destination, request.pace);
        let arrival = run.clock + Duration::minutes(transit_minutes as i64);
        let end = arrival + Duration::minutes(lunch.duration_minutes as i64);

        if end > run.close {
            debug!(%end, close = %run.close, "Planner::insert_lunch: does not fit, dropping");
            run.itinerary.lunch_dropped = true;
            return;
        }

        run.itinerary.steps.push(Step {
            attraction: lunch.destination.clone(),
            kind: StepKind::Lunch,
            transit_minutes,
            wait_minutes: 0,
            departure: run.clock,
            arrival,
            wait_start: arrival,
            ride_start: arrival,
            ride_end: end,
            provenance: Provenance::Fixed,
            note: NOTE_LUNCH.to_string(),
        });
        run.clock = end;
        run.location = destination;
    }
}

/// Baseline and planned itineraries for the same request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Comparison {
    /// Nearest-neighbour, queue-blind
    pub baseline: Itinerary,
    /// Priority policy
    pub planned: Itinerary,
}

impl Comparison {
    /// Queue minutes saved by the planned itinerary (negative if it waits longer)
    pub fn wait_saved_minutes(&self) -> i64 {
        self.baseline.total_wait_minutes() as i64 - self.planned.total_wait_minutes() as i64
    }

    /// Extra rides the planned itinerary fits in
    pub fn extra_rides(&self) -> i64 {
        self.planned.ride_count() as i64 - self.baseline.ride_count() as i64
    }
}
