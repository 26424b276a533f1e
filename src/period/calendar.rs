//! Calendar arithmetic shared by period resolution, navigation, and installments.
//!
//! Month and year shifts clamp the day of month to the last valid day of the
//! target month: Jan 31 + 1 month is Feb 28/29, Feb 29 + 1 year is Feb 28.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};

/// Shifts `date` by a signed number of calendar months, clamping the day.
///
/// Saturates to `date` when the result would leave chrono's representable range.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let magnitude = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    };
    shifted.unwrap_or(date)
}

/// Shifts `date` by a signed number of calendar years, clamping Feb 29.
pub fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    shift_month(date, years.saturating_mul(12))
}

/// Shifts `date` by a signed number of days.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    };
    shifted.unwrap_or(date)
}

/// Applies [`shift_month`] to the date part, keeping the time of day.
pub fn shift_month_at(instant: NaiveDateTime, months: i32) -> NaiveDateTime {
    shift_month(instant.date(), months).and_time(instant.time())
}

/// Applies [`shift_days`] to the date part, keeping the time of day.
pub fn shift_days_at(instant: NaiveDateTime, days: i64) -> NaiveDateTime {
    shift_days(instant.date(), days).and_time(instant.time())
}

/// Number of days in `month` of `year`, found as the day before the first of
/// the following month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_next| first_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(days_in_month(date.year(), date.month()))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_shift_clamps_to_short_months() {
        assert_eq!(shift_month(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(shift_month(date(2023, 1, 31), 1), date(2023, 2, 28));
        assert_eq!(shift_month(date(2024, 3, 31), -1), date(2024, 2, 29));
        assert_eq!(shift_month(date(2024, 12, 15), 1), date(2025, 1, 15));
        assert_eq!(shift_month(date(2024, 1, 15), -13), date(2022, 12, 15));
    }

    #[test]
    fn year_shift_clamps_leap_day() {
        assert_eq!(shift_year(date(2024, 2, 29), 1), date(2025, 2, 28));
        assert_eq!(shift_year(date(2024, 2, 29), 4), date(2028, 2, 29));
        assert_eq!(shift_year(date(2025, 6, 1), -1), date(2024, 6, 1));
    }

    #[test]
    fn days_in_month_handles_leap_years_and_december() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn month_bounds() {
        assert_eq!(first_of_month(date(2024, 2, 17)), date(2024, 2, 1));
        assert_eq!(last_of_month(date(2024, 2, 17)), date(2024, 2, 29));
        assert_eq!(shift_days(date(2024, 3, 1), -1), date(2024, 2, 29));
    }
}
