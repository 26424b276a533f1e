//! Stepping between periods and the caller-held navigation session.

use std::{fmt, str::FromStr, sync::Arc};

use chrono::NaiveDateTime;

use crate::domain::Transaction;
use crate::errors::{BudgetError, Result};
use crate::time::Clock;

use super::calendar::{shift_days_at, shift_month_at};
use super::{aggregate, resolve_with_style, Granularity, LabelStyle, PeriodAggregate, PeriodWindow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    fn sign(self) -> i32 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Previous => "prev",
            Direction::Next => "next",
        };
        f.write_str(label)
    }
}

impl FromStr for Direction {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "prev" | "previous" | "back" => Ok(Direction::Previous),
            "next" | "forward" => Ok(Direction::Next),
            other => Err(BudgetError::InvalidInput(format!(
                "unknown direction `{}` (use prev or next)",
                other
            ))),
        }
    }
}

/// Moves `current` one period in `direction`, keeping the time of day.
///
/// Month and year steps clamp the day of month (Jan 31 -> Feb 29 in 2024), so
/// stepping forward then back from a late day can land on an earlier day of
/// the same month.
pub fn step(current: NaiveDateTime, granularity: Granularity, direction: Direction) -> NaiveDateTime {
    let sign = direction.sign();
    match granularity {
        Granularity::Day => shift_days_at(current, i64::from(sign)),
        Granularity::Week => shift_days_at(current, i64::from(sign) * 7),
        Granularity::Month => shift_month_at(current, sign),
        Granularity::Year => shift_month_at(current, sign * 12),
    }
}

/// Session state for a period view: the reference instant and granularity.
///
/// The clock is read only on construction and by [`PeriodNavigator::go_to_today`].
pub struct PeriodNavigator {
    reference: NaiveDateTime,
    granularity: Granularity,
    label_style: LabelStyle,
    clock: Arc<dyn Clock>,
}

impl PeriodNavigator {
    pub fn new(clock: Arc<dyn Clock>, granularity: Granularity) -> Self {
        let reference = clock.now();
        Self {
            reference,
            granularity,
            label_style: LabelStyle::Full,
            clock,
        }
    }

    pub fn with_label_style(mut self, style: LabelStyle) -> Self {
        self.label_style = style;
        self
    }

    pub fn reference(&self) -> NaiveDateTime {
        self.reference
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn label_style(&self) -> LabelStyle {
        self.label_style
    }

    pub fn set_label_style(&mut self, style: LabelStyle) {
        self.label_style = style;
    }

    /// Changes the granularity; the reference stays where it is.
    pub fn set_granularity(&mut self, granularity: Granularity) {
        tracing::info!(from = %self.granularity, to = %granularity, "granularity changed");
        self.granularity = granularity;
    }

    pub fn set_reference(&mut self, reference: NaiveDateTime) {
        self.reference = reference;
    }

    pub fn step(&mut self, direction: Direction) -> PeriodWindow {
        self.reference = step(self.reference, self.granularity, direction);
        tracing::debug!(%direction, reference = %self.reference, "stepped period");
        self.window()
    }

    pub fn previous(&mut self) -> PeriodWindow {
        self.step(Direction::Previous)
    }

    pub fn next(&mut self) -> PeriodWindow {
        self.step(Direction::Next)
    }

    /// Resets the reference to the clock's current time.
    pub fn go_to_today(&mut self) -> PeriodWindow {
        self.reference = self.clock.now();
        self.window()
    }

    pub fn window(&self) -> PeriodWindow {
        resolve_with_style(self.reference, self.granularity, self.label_style)
    }

    pub fn summarize<'a>(&self, transactions: &'a [Transaction]) -> Result<PeriodAggregate<'a>> {
        aggregate(transactions, &self.window())
    }

    /// Whether the current window contains the clock's present moment.
    pub fn is_showing_today(&self) -> bool {
        self.window().contains(self.clock.now())
    }
}

impl fmt::Debug for PeriodNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeriodNavigator")
            .field("reference", &self.reference)
            .field("granularity", &self.granularity)
            .field("label_style", &self.label_style)
            .finish()
    }
}
