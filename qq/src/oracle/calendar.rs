//! Crowd-risk calendar

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;

/// Tells whether a date is likely to be crowded
pub trait CrowdCalendar: Send + Sync {
    fn is_high_risk(&self, date: NaiveDate) -> bool;
}

/// Weekends plus an explicit list of public and school holidays
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    holidays: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    pub fn new(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }
}

impl CrowdCalendar for HolidayCalendar {
    fn is_high_risk(&self, date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun) || self.is_holiday(date)
    }
}
