// Date utility functions
// Calendar-day arithmetic shared by the grid, planner and gestures

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Shift a date by a signed number of days, saturating at chrono's range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let limit = if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX };
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(limit)
}

/// Inclusive number of calendar days in `[start, end]`.
/// Returns 0 when `end` is before `start`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    let days = (end - start).num_days() + 1;
    days.max(0)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Latest date on or before `date` that falls on `week_start`.
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (date.weekday().num_days_from_sunday() + 7
        - week_start.num_days_from_sunday())
        % 7;
    add_days(date, -(offset as i64))
}

/// Earliest date on or after `date` that ends a week starting on `week_start`.
pub fn end_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    add_days(start_of_week(date, week_start), 6)
}

/// Same day of month in an adjacent month, clamped to that month's length.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date);
    let day = date.day().min(last_of_month(first).day());
    first.with_day(day).unwrap_or(first)
}

/// Map a settings value (0 = Sunday .. 6 = Saturday) to a weekday.
pub fn weekday_from_index(index: u8) -> Weekday {
    match index % 7 {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}
