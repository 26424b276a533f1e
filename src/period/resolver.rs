//! Turns a reference instant and a granularity into a labelled window.
//!
//! All arithmetic happens on local wall-clock values. The resolver never reads
//! the clock and never converts between zones.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::calendar::{first_of_month, last_of_month, shift_days};
use super::{Granularity, LabelStyle, PeriodWindow};

const LAST_SECOND_OF_DAY: i64 = 24 * 60 * 60 - 1;

/// Resolves the window containing `reference`, labelled in the full style.
pub fn resolve(reference: NaiveDateTime, granularity: Granularity) -> PeriodWindow {
    resolve_with_style(reference, granularity, LabelStyle::Full)
}

pub fn resolve_with_style(
    reference: NaiveDateTime,
    granularity: Granularity,
    style: LabelStyle,
) -> PeriodWindow {
    let (first, last) = day_bounds(reference.date(), granularity);
    let window = PeriodWindow {
        granularity,
        start: start_of_day(first),
        end: end_of_day(last),
        label: format_label(granularity, first, last, style),
    };
    tracing::trace!(
        %granularity,
        start = %window.start,
        end = %window.end,
        "resolved period window"
    );
    window
}

/// First and last calendar day of the period containing `date`.
pub fn day_bounds(date: NaiveDate, granularity: Granularity) -> (NaiveDate, NaiveDate) {
    match granularity {
        Granularity::Day => (date, date),
        Granularity::Week => {
            // Monday = 0 .. Sunday = 6
            let offset = i64::from(date.weekday().num_days_from_monday());
            let monday = shift_days(date, -offset);
            (monday, shift_days(monday, 6))
        }
        Granularity::Month => (first_of_month(date), last_of_month(date)),
        Granularity::Year => {
            let january = date.with_ordinal(1).unwrap_or(date);
            let december = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
            (january, december)
        }
    }
}

/// Renders the label for a period spanning `first..=last`.
pub fn format_label(
    granularity: Granularity,
    first: NaiveDate,
    last: NaiveDate,
    style: LabelStyle,
) -> String {
    match (granularity, style) {
        (Granularity::Day, LabelStyle::Full) => first.format("%A, %-d %B %Y").to_string(),
        (Granularity::Day, LabelStyle::Abbreviated) => {
            first.format("%a, %-d %b %Y").to_string().to_uppercase()
        }
        (Granularity::Week, _) => format!(
            "Week of {} - {}",
            first.format("%b %-d"),
            last.format("%b %-d")
        ),
        (Granularity::Month, LabelStyle::Full) => first.format("%B %Y").to_string(),
        (Granularity::Month, LabelStyle::Abbreviated) => {
            first.format("%b %Y").to_string().to_uppercase()
        }
        (Granularity::Year, _) => first.format("%Y").to_string(),
    }
}

/// Full-style label for the period containing `reference`.
pub fn full_label(reference: NaiveDateTime, granularity: Granularity) -> String {
    let (first, last) = day_bounds(reference.date(), granularity);
    format_label(granularity, first, last, LabelStyle::Full)
}

/// Abbreviated label for the period containing `reference`.
pub fn abbreviated_label(reference: NaiveDateTime, granularity: Granularity) -> String {
    let (first, last) = day_bounds(reference.date(), granularity);
    format_label(granularity, first, last, LabelStyle::Abbreviated)
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::seconds(LAST_SECOND_OF_DAY)
}
