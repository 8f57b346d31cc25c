//! Calendar dates.

use std::fmt;
use std::str::FromStr;

use crate::calendar::{
    civil_from_days, days_from_civil, is_leap_year, iso_week_date_of, month_length, ordinal,
    weekday_from_days, WeekStartDay, SECONDS_PER_DAY,
};
use crate::datetime::DateTime;
use crate::error::{CalendarError, Result};
use crate::iso8601::{self, FormatOptions};
use crate::normalize::{normalize_date, normalize_date_time};
use crate::period::Period;
use crate::point::{add_field, check_year, impl_instant_ordering, impl_span_ops, TimePoint};
use crate::zone::TimeZone;

/// A proleptic Gregorian date in a fixed-offset zone.
///
/// As a point in time a date is its midnight in `zone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    year: u16,
    month: u8,
    day: u8,
    zone: TimeZone,
}

impl Date {
    /// Creates a date, normalizing out-of-range months and days.
    ///
    /// ```
    /// use datetime_engine::{Date, TimeZone};
    ///
    /// let date = Date::new(2012, 13, 0, TimeZone::UTC).unwrap();
    /// assert_eq!(date.to_string(), "2012-12-31Z");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Construction`] if the normalized year is
    /// outside `0..=9999`.
    pub fn new(year: i64, month: i64, day: i64, zone: TimeZone) -> Result<Date> {
        let (year, month, day) = normalize_date(year, month, day);
        Ok(Date {
            year: check_year(year)?,
            month: month as u8,
            day: day as u8,
            zone,
        })
    }

    /// Fields must already be normalized and in range.
    pub(crate) const fn from_normalized(year: u16, month: u8, day: u8, zone: TimeZone) -> Date {
        Date {
            year,
            month,
            day,
            zone,
        }
    }

    pub fn utc(year: i64, month: i64, day: i64) -> Result<Date> {
        Date::new(year, month, day, TimeZone::UTC)
    }

    /// The date in `zone` containing the instant `seconds` after the epoch.
    pub fn from_unix_time(seconds: i64, zone: TimeZone) -> Result<Date> {
        let local = add_field(seconds, i64::from(zone.offset()))?;
        let (year, month, day) = civil_from_days(local.div_euclid(SECONDS_PER_DAY));
        Ok(Date {
            year: check_year(year)?,
            month,
            day,
            zone,
        })
    }

    /// Seconds from the epoch to midnight of this date in its zone.
    pub fn unix_time(&self) -> i64 {
        self.instant()
    }

    pub fn year(&self) -> i64 {
        i64::from(self.year)
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn zone(&self) -> TimeZone {
        self.zone
    }

    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year())
    }

    pub fn days_in_month(&self) -> u8 {
        month_length(self.year(), self.month)
    }

    pub fn day_of_week(&self, week_start: WeekStartDay) -> u8 {
        weekday_from_days(self.days_since_epoch(), week_start)
    }

    /// 1-based ordinal day within the year.
    pub fn day_of_year(&self) -> u16 {
        ordinal(self.year(), self.month, self.day)
    }

    /// `(iso_year, week, weekday)` with weekday 1 = Monday.
    pub fn iso_week_date(&self) -> (i64, u8, u8) {
        iso_week_date_of(self.year(), self.month, self.day)
    }

    /// This date at the given wall-clock time, normalized.
    pub fn with_time(&self, hour: i64, minute: i64, second: i64) -> Result<DateTime> {
        DateTime::new(
            self.year(),
            i64::from(self.month),
            i64::from(self.day),
            hour,
            minute,
            second,
            self.zone,
        )
    }

    /// Parses `YYYY-MM-DD[tz]` or `YYYYMMDD[tz]`. A missing offset is UTC.
    pub fn parse(text: &str) -> Result<Date> {
        let fields = iso8601::parse_date(text)?;
        Date::new(
            fields.year,
            i64::from(fields.month),
            i64::from(fields.day),
            TimeZone::from_parsed(fields.offset),
        )
    }

    pub fn format_with(&self, options: &FormatOptions) -> String {
        let mut out = iso8601::format_date(self.year(), self.month, self.day, options);
        out.push_str(&self.zone.format_with(options));
        out
    }

    fn days_since_epoch(&self) -> i64 {
        days_from_civil(self.year(), self.month, self.day)
    }
}

impl TimePoint for Date {
    fn instant(&self) -> i64 {
        self.days_since_epoch() * SECONDS_PER_DAY - i64::from(self.zone.offset())
    }

    fn time_zone(&self) -> TimeZone {
        self.zone
    }

    fn shifted(&self, delta: &Period, zone: TimeZone) -> Result<Date> {
        let (year, month, day, ..) = normalize_date_time(
            add_field(self.year(), delta.years())?,
            add_field(i64::from(self.month), delta.months())?,
            add_field(i64::from(self.day), delta.days())?,
            delta.hours(),
            delta.minutes(),
            delta.seconds(),
        );
        Ok(Date {
            year: check_year(year)?,
            month: month as u8,
            day: day as u8,
            zone,
        })
    }
}

impl_instant_ordering!(Date);
impl_span_ops!(Date);

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(&FormatOptions::default()))
    }
}

impl FromStr for Date {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        Date::parse(s)
    }
}

impl From<DateTime> for Date {
    fn from(value: DateTime) -> Date {
        value.date()
    }
}

crate::point::impl_iso_serde!(Date, "an ISO-8601 date");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Duration;

    #[test]
    fn test_construction_normalizes() {
        let date = Date::utc(2012, 6, 31).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2012, 7, 1));
        let date = Date::utc(2012, 0, 0).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2011, 11, 30));
    }

    #[test]
    fn test_year_range() {
        assert!(Date::utc(9_999, 12, 31).is_ok());
        assert!(matches!(Date::utc(9_999, 12, 32), Err(CalendarError::Construction(_))));
        assert!(matches!(Date::utc(0, 1, 0), Err(CalendarError::Construction(_))));
    }

    #[test]
    fn test_calendar_accessors() {
        let date = Date::utc(2010, 1, 1).unwrap();
        assert_eq!(date.day_of_week(WeekStartDay::Monday), 5);
        assert_eq!(date.day_of_week(WeekStartDay::Sunday), 5);
        assert_eq!(date.iso_week_date(), (2009, 53, 5));
        assert_eq!(Date::utc(2012, 12, 31).unwrap().day_of_year(), 366);
        assert_eq!(Date::utc(2012, 2, 1).unwrap().days_in_month(), 29);
    }

    #[test]
    fn test_unix_time_round_trip() {
        let zone = TimeZone::from_hours_minutes(-5, 0);
        let date = Date::new(2013, 3, 10, zone).unwrap();
        assert_eq!(date.unix_time(), 1_362_891_600);
        assert_eq!(Date::from_unix_time(date.unix_time(), zone).unwrap(), date);
        assert_eq!(Date::utc(1970, 1, 1).unwrap().unix_time(), 0);
    }

    #[test]
    fn test_from_unix_time_uses_local_day() {
        // 1970-01-01T23:00:00Z is already the 2nd at +02:00.
        let plus_two = TimeZone::from_hours_minutes(2, 0);
        let date = Date::from_unix_time(82_800, plus_two).unwrap();
        assert_eq!(date, Date::new(1970, 1, 2, plus_two).unwrap());
    }

    #[test]
    fn test_time_of_day_remainder_is_dropped() {
        let date = Date::utc(2013, 1, 1).unwrap();
        assert_eq!(date + Duration::from_hours(23), date);
        assert_eq!(date + Duration::from_hours(25), Date::utc(2013, 1, 2).unwrap());
        assert_eq!(date - Duration::new(1), Date::utc(2012, 12, 31).unwrap());
    }

    #[test]
    fn test_parse_and_format() {
        let date = Date::parse("2013-02-28+01:00").unwrap();
        assert_eq!(date.zone().offset(), 3_600);
        assert_eq!(date.to_string(), "2013-02-28+01:00");
        assert_eq!(date.format_with(&FormatOptions::basic()), "20130228+0100");
        assert_eq!(Date::parse("20130228").unwrap().to_string(), "2013-02-28Z");
        assert!(Date::parse("2013-02-29").is_err());
    }

    #[test]
    fn test_with_time() {
        let date = Date::utc(2013, 1, 31).unwrap();
        let dt = date.with_time(24, 0, 0).unwrap();
        assert_eq!(dt, DateTime::utc(2013, 2, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_serde() {
        let date = Date::utc(2013, 1, 2).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2013-01-02Z\"");
        assert_eq!(serde_json::from_str::<Date>(&json).unwrap(), date);
    }
}
