//! Proleptic Gregorian calendar arithmetic.
//!
//! Every function here is a pure integer computation. Nothing consults the
//! host operating system's calendar or time zone database, so results are
//! identical on every platform.
//!
//! # Functions
//!
//! - [`is_leap_year`], [`days_in_month`], [`days_in_year`]
//! - [`day_of_week`], [`day_of_year`], [`iso_week_date`] and friends
//! - [`days_from_civil`] / [`civil_from_days`] — day counts relative to 1970-01-01
//! - [`month_name`], [`month_abbreviation`], [`day_name`], [`day_abbreviation`]
//! - [`approximate_total_seconds`] — rough magnitude of a calendar span

use serde::Serialize;

use crate::error::{CalendarError, Result};

/// Average Gregorian year (365.25 days) in seconds.
pub const SECONDS_PER_YEAR: i64 = 31_557_600;
/// One twelfth of [`SECONDS_PER_YEAR`].
pub const SECONDS_PER_MONTH: i64 = SECONDS_PER_YEAR / 12;
pub const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Days in one full 400-year Gregorian cycle.
pub(crate) const DAYS_PER_400_YEARS: i64 = 146_097;

/// Days from 0000-03-01 to 1970-01-01.
const UNIX_EPOCH_DAYS: i64 = 719_468;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

// ── Week numbering ──────────────────────────────────────────────────────────

/// Which day begins a week when numbering weekdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WeekStartDay {
    /// ISO 8601: Monday = 1 through Sunday = 7.
    #[default]
    Monday,
    /// US convention: Sunday = 0 through Saturday = 6.
    Sunday,
}

// ── Leap years and month lengths ────────────────────────────────────────────

/// Returns whether `year` is a Gregorian leap year.
///
/// ```
/// use datetime_engine::calendar::is_leap_year;
///
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1900));
/// ```
pub fn is_leap_year(year: i64) -> bool {
    if year % 400 == 0 {
        true
    } else if year % 100 == 0 {
        false
    } else {
        year % 4 == 0
    }
}

/// Returns the number of days in `month` of `year`.
///
/// # Errors
///
/// Returns [`CalendarError::Domain`] if `month` is outside `1..=12`.
pub fn days_in_month(year: i64, month: u8) -> Result<u8> {
    check_month(month)?;
    Ok(month_length(year, month))
}

/// Month length for a month already known to lie in `1..=12`.
pub(crate) fn month_length(year: i64, month: u8) -> u8 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Returns 366 for leap years, 365 otherwise.
pub fn days_in_year(year: i64) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

// ── Day counts ──────────────────────────────────────────────────────────────

/// Number of days from 1970-01-01 to the given civil date (negative before).
///
/// The inputs are not validated; callers pass normalized fields.
pub fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let month = i64::from(month);
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = if month > 2 { month - 3 } else { month + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_PER_400_YEARS + doe - UNIX_EPOCH_DAYS
}

/// Inverse of [`days_from_civil`].
pub fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + UNIX_EPOCH_DAYS;
    let era = z.div_euclid(DAYS_PER_400_YEARS);
    let doe = z - era * DAYS_PER_400_YEARS;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

// ── Weekdays and ordinals ───────────────────────────────────────────────────

/// Returns the weekday number of a date.
///
/// With [`WeekStartDay::Monday`] the result is ISO numbering, 1 (Monday)
/// through 7 (Sunday). With [`WeekStartDay::Sunday`] it is 0 (Sunday)
/// through 6 (Saturday).
///
/// # Errors
///
/// Returns [`CalendarError::Domain`] if the month or day is out of range.
///
/// ```
/// use datetime_engine::calendar::{day_of_week, WeekStartDay};
///
/// // 2013-01-01 was a Tuesday.
/// assert_eq!(day_of_week(2013, 1, 1, WeekStartDay::Monday).unwrap(), 2);
/// assert_eq!(day_of_week(2013, 1, 1, WeekStartDay::Sunday).unwrap(), 2);
/// assert_eq!(day_of_week(2013, 1, 6, WeekStartDay::Sunday).unwrap(), 0);
/// ```
pub fn day_of_week(year: i64, month: u8, day: u8, week_start: WeekStartDay) -> Result<u8> {
    check_date(year, month, day)?;
    Ok(weekday_from_days(days_from_civil(year, month, day), week_start))
}

/// Weekday of a day count relative to 1970-01-01, which was a Thursday.
pub(crate) fn weekday_from_days(days: i64, week_start: WeekStartDay) -> u8 {
    match week_start {
        WeekStartDay::Monday => ((days + 3).rem_euclid(7) + 1) as u8,
        WeekStartDay::Sunday => (days + 4).rem_euclid(7) as u8,
    }
}

/// Returns the 1-based ordinal day of the date within its year.
///
/// # Errors
///
/// Returns [`CalendarError::Domain`] if the month or day is out of range.
pub fn day_of_year(year: i64, month: u8, day: u8) -> Result<u16> {
    check_date(year, month, day)?;
    Ok(ordinal(year, month, day))
}

/// Day of year for a date already known to be valid.
pub(crate) fn ordinal(year: i64, month: u8, day: u8) -> u16 {
    (days_from_civil(year, month, day) - days_from_civil(year, 1, 1) + 1) as u16
}

/// Number of ISO weeks (52 or 53) in an ISO week-numbering year.
pub fn iso_weeks_in_year(year: i64) -> u8 {
    let dec31 = weekday_from_days(days_from_civil(year, 12, 31), WeekStartDay::Monday);
    if dec31 == 4 || (is_leap_year(year) && dec31 == 5) {
        53
    } else {
        52
    }
}

/// Returns the ISO-8601 week date `(iso_year, week, weekday)` of a date.
///
/// Week 1 is the week containing the year's first Thursday, so the first
/// and last few days of a Gregorian year may belong to a neighbouring ISO
/// year.
///
/// # Errors
///
/// Returns [`CalendarError::Domain`] if the month or day is out of range.
///
/// ```
/// use datetime_engine::calendar::iso_week_date;
///
/// assert_eq!(iso_week_date(2008, 12, 29).unwrap(), (2009, 1, 1));
/// assert_eq!(iso_week_date(2010, 1, 1).unwrap(), (2009, 53, 5));
/// ```
pub fn iso_week_date(year: i64, month: u8, day: u8) -> Result<(i64, u8, u8)> {
    check_date(year, month, day)?;
    Ok(iso_week_date_of(year, month, day))
}

/// ISO week date for a date already known to be valid.
pub(crate) fn iso_week_date_of(year: i64, month: u8, day: u8) -> (i64, u8, u8) {
    let day_number = i64::from(ordinal(year, month, day));
    let weekday = weekday_from_days(days_from_civil(year, month, day), WeekStartDay::Monday);
    let week = (day_number - i64::from(weekday) + 10) / 7;
    if week < 1 {
        (year - 1, iso_weeks_in_year(year - 1), weekday)
    } else if week > i64::from(iso_weeks_in_year(year)) {
        (year + 1, 1, weekday)
    } else {
        (year, week as u8, weekday)
    }
}

/// ISO week number (1..=53) of a date.
pub fn iso_week_number(year: i64, month: u8, day: u8) -> Result<u8> {
    iso_week_date(year, month, day).map(|(_, week, _)| week)
}

/// ISO week-numbering year of a date.
pub fn iso_year_number(year: i64, month: u8, day: u8) -> Result<i64> {
    iso_week_date(year, month, day).map(|(iso_year, _, _)| iso_year)
}

// ── Names ───────────────────────────────────────────────────────────────────

/// English month name, `1` = January.
pub fn month_name(month: u8) -> Result<&'static str> {
    check_month(month)?;
    Ok(MONTH_NAMES[usize::from(month - 1)])
}

/// Three-letter English month abbreviation, `1` = Jan.
pub fn month_abbreviation(month: u8) -> Result<&'static str> {
    month_name(month).map(|name| &name[..3])
}

/// English day name, `1` = Monday through `7` = Sunday.
pub fn day_name(weekday: u8) -> Result<&'static str> {
    if !(1..=7).contains(&weekday) {
        return Err(CalendarError::Domain(format!(
            "invalid weekday: {weekday} (must be 1..=7)"
        )));
    }
    Ok(DAY_NAMES[usize::from(weekday - 1)])
}

/// Three-letter English day abbreviation, `1` = Mon.
pub fn day_abbreviation(weekday: u8) -> Result<&'static str> {
    day_name(weekday).map(|name| &name[..3])
}

// ── Approximation ───────────────────────────────────────────────────────────

/// Rough length in seconds of a calendar span, using a 365.25-day year and
/// a month of one twelfth of that.
///
/// Only meaningful for comparing magnitudes. Resolving a span against an
/// actual date is the job of [`crate::TimeSpan`].
pub fn approximate_total_seconds(
    years: i64,
    months: i64,
    weeks: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
) -> i64 {
    years * SECONDS_PER_YEAR
        + months * SECONDS_PER_MONTH
        + weeks * SECONDS_PER_WEEK
        + days * SECONDS_PER_DAY
        + hours * SECONDS_PER_HOUR
        + minutes * SECONDS_PER_MINUTE
        + seconds
}

// ── Validation helpers ──────────────────────────────────────────────────────

fn check_month(month: u8) -> Result<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(CalendarError::Domain(format!(
            "invalid month: {month} (must be 1..=12)"
        )))
    }
}

pub(crate) fn check_date(year: i64, month: u8, day: u8) -> Result<()> {
    let max_day = days_in_month(year, month)?;
    if day == 0 || day > max_day {
        return Err(CalendarError::Domain(format!(
            "invalid day: {day} for {year:04}-{month:02} (max {max_day})"
        )));
    }
    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────────────
