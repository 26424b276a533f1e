use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::Granularity;

/// Inclusive instant range produced by resolving a reference date.
///
/// `end` is always 23:59:59 of the last day in the window, so a transaction at
/// the following midnight belongs to the next period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PeriodWindow {
    pub granularity: Granularity,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub label: String,
}

impl PeriodWindow {
    /// Returns true when `instant` lies within `[start, end]`.
    ///
    /// Sub-second precision is dropped first, so 23:59:59.750 on the last day
    /// is still inside the window.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        let truncated = instant.with_nanosecond(0).unwrap_or(instant);
        truncated >= self.start && truncated <= self.end
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start.date() && date <= self.end.date()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end.date()
    }

    /// Number of calendar days covered by the window.
    pub fn day_count(&self) -> i64 {
        (self.last_day() - self.first_day()).num_days() + 1
    }

    /// Classifies the window relative to `now`.
    pub fn scope(&self, now: NaiveDateTime) -> PeriodScope {
        if self.contains(now) {
            PeriodScope::Current
        } else if self.end < now {
            PeriodScope::Past
        } else {
            PeriodScope::Future
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Identifies how a window relates to the present moment.
pub enum PeriodScope {
    Past,
    Current,
    Future,
}
