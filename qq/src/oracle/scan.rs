//! Scan a day for the quietest moment to visit an attraction

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use venuecatalog::{Attraction, Venue};

use super::estimate::{WaitEstimate, WaitOracle};
use super::weather::WeatherOverride;
use crate::live::LiveSnapshot;

/// Step between slots for [`best_future_wait`]
const FUTURE_SLOT_MINUTES: i64 = 30;

/// Predicted wait at one moment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct WaitSlot {
    pub at: NaiveDateTime,
    pub estimate: WaitEstimate,
}

/// Oracle inputs shared by every slot of a scan
pub struct ScanContext<'a> {
    pub oracle: &'a dyn WaitOracle,
    pub venue: &'a Venue,
    pub live: Option<&'a LiveSnapshot>,
    pub weather: Option<&'a WeatherOverride>,
}

impl<'a> ScanContext<'a> {
    pub fn new(oracle: &'a dyn WaitOracle, venue: &'a Venue) -> Self {
        Self {
            oracle,
            venue,
            live: None,
            weather: None,
        }
    }

    pub fn with_live(mut self, live: Option<&'a LiveSnapshot>) -> Self {
        self.live = live;
        self
    }

    pub fn with_weather(mut self, weather: Option<&'a WeatherOverride>) -> Self {
        self.weather = weather;
        self
    }

    fn slot(&self, attraction: &Attraction, at: NaiveDateTime) -> WaitSlot {
        let estimate = self.oracle.predict_wait(self.venue, attraction, at, self.live, self.weather);
        WaitSlot { at, estimate }
    }
}

/// Prediction on the hour for each hour in `[from_hour, to_hour)`
pub fn hourly_profile(
    ctx: &ScanContext<'_>,
    attraction: &Attraction,
    date: NaiveDate,
    from_hour: u32,
    to_hour: u32,
) -> Vec<WaitSlot> {
    (from_hour..to_hour.min(24))
        .filter_map(|h| NaiveTime::from_hms_opt(h, 0, 0))
        .map(|time| ctx.slot(attraction, date.and_time(time)))
        .collect()
}

/// Lowest open wait in a profile; ties go to the earliest slot
pub fn lowest(slots: &[WaitSlot]) -> Option<WaitSlot> {
    slots
        .iter()
        .filter(|s| !s.estimate.is_closed())
        .fold(None, |best: Option<WaitSlot>, slot| match best {
            Some(b) if b.estimate.as_minutes() <= slot.estimate.as_minutes() => Some(b),
            _ => Some(*slot),
        })
}

/// Hour in `[from_hour, to_hour)` with the lowest predicted wait
pub fn best_times(
    ctx: &ScanContext<'_>,
    attraction: &Attraction,
    date: NaiveDate,
    from_hour: u32,
    to_hour: u32,
) -> Option<WaitSlot> {
    lowest(&hourly_profile(ctx, attraction, date, from_hour, to_hour))
}

/// Lowest predicted wait in half-hour steps from `from` up to `deadline`
pub fn best_future_wait(
    ctx: &ScanContext<'_>,
    attraction: &Attraction,
    from: NaiveDateTime,
    deadline: NaiveDateTime,
) -> Option<WaitSlot> {
    let step = Duration::minutes(FUTURE_SLOT_MINUTES);
    let slots: Vec<WaitSlot> = std::iter::successors(Some(from), |t| Some(*t + step))
        .take_while(|t| *t <= deadline)
        .map(|t| ctx.slot(attraction, t))
        .collect();
    lowest(&slots)
}
