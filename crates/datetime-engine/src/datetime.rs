//! Combined date and time of day.

use std::fmt;
use std::str::FromStr;

use crate::calendar::{
    civil_from_days, days_from_civil, iso_week_date_of, ordinal, weekday_from_days, WeekStartDay,
    SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
use crate::date::Date;
use crate::error::{CalendarError, Result};
use crate::iso8601::{self, FormatOptions};
use crate::normalize::normalize_date_time;
use crate::period::Period;
use crate::point::{add_field, check_year, impl_instant_ordering, impl_span_ops, TimePoint};
use crate::time::TimeOfDay;
use crate::zone::TimeZone;

/// A wall-clock date and time in a fixed-offset zone.
///
/// ```
/// use datetime_engine::{DateTime, Period, TimePoint};
///
/// let start: DateTime = "2013-01-31T10:00:00+01:00".parse().unwrap();
/// let next = start.checked_add(Period::from_months(1)).unwrap();
/// assert_eq!(next.to_string(), "2013-03-03T10:00:00+01:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTime {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    zone: TimeZone,
}

impl DateTime {
    /// Creates a date-time from six possibly out-of-range fields.
    ///
    /// Time fields are normalized first and their day carry is added to
    /// `day` before the date is normalized.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Construction`] if the normalized year is
    /// outside `0..=9999`.
    pub fn new(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        zone: TimeZone,
    ) -> Result<DateTime> {
        let (year, month, day, hour, minute, second) =
            normalize_date_time(year, month, day, hour, minute, second);
        Ok(DateTime {
            year: check_year(year)?,
            month: month as u8,
            day: day as u8,
            hour: hour as u8,
            minute: minute as u8,
            second: second as u8,
            zone,
        })
    }

    pub fn utc(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
    ) -> Result<DateTime> {
        DateTime::new(year, month, day, hour, minute, second, TimeZone::UTC)
    }

    /// The wall-clock fields in `zone` for the instant `seconds` after
    /// 1970-01-01T00:00:00Z.
    ///
    /// ```
    /// use datetime_engine::{DateTime, TimeZone};
    ///
    /// let zone = TimeZone::from_hours_minutes(9, 0);
    /// let dt = DateTime::from_unix_time(0, zone).unwrap();
    /// assert_eq!(dt.to_string(), "1970-01-01T09:00:00+09:00");
    /// assert_eq!(dt.unix_time(), 0);
    /// ```
    pub fn from_unix_time(seconds: i64, zone: TimeZone) -> Result<DateTime> {
        let local = add_field(seconds, i64::from(zone.offset()))?;
        let (year, month, day) = civil_from_days(local.div_euclid(SECONDS_PER_DAY));
        let rest = local.rem_euclid(SECONDS_PER_DAY);
        Ok(DateTime {
            year: check_year(year)?,
            month,
            day,
            hour: (rest / SECONDS_PER_HOUR) as u8,
            minute: (rest % SECONDS_PER_HOUR / SECONDS_PER_MINUTE) as u8,
            second: (rest % SECONDS_PER_MINUTE) as u8,
            zone,
        })
    }

    pub fn unix_time(&self) -> i64 {
        self.instant()
    }

    /// Epoch seconds and zone, the interop triple with the dst flag inside
    /// the zone.
    pub fn to_unix_parts(&self) -> (i64, TimeZone) {
        (self.unix_time(), self.zone)
    }

    /// The date part, in the same zone.
    pub fn date(&self) -> Date {
        Date::from_normalized(self.year, self.month, self.day, self.zone)
    }

    /// The time-of-day part, in the same zone.
    pub fn time(&self) -> TimeOfDay {
        TimeOfDay::new(
            i64::from(self.hour),
            i64::from(self.minute),
            i64::from(self.second),
            self.zone,
        )
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

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn zone(&self) -> TimeZone {
        self.zone
    }

    pub fn day_of_week(&self, week_start: WeekStartDay) -> u8 {
        weekday_from_days(self.days_since_epoch(), week_start)
    }

    pub fn day_of_year(&self) -> u16 {
        ordinal(self.year(), self.month, self.day)
    }

    pub fn iso_week_date(&self) -> (i64, u8, u8) {
        iso_week_date_of(self.year(), self.month, self.day)
    }

    /// Parses a date and a time joined by `T` or a space. Fractional
    /// seconds are discarded and a missing offset is UTC.
    pub fn parse(text: &str) -> Result<DateTime> {
        let fields = iso8601::parse_date_time(text)?;
        let (date, time) = (fields.date, fields.time);
        DateTime::new(
            date.year,
            i64::from(date.month),
            i64::from(date.day),
            i64::from(time.hour),
            i64::from(time.minute),
            i64::from(time.second),
            TimeZone::from_parsed(time.offset),
        )
    }

    pub fn format_with(&self, options: &FormatOptions) -> String {
        let mut out = iso8601::format_date_time(
            (self.year(), self.month, self.day),
            (self.hour, self.minute, self.second),
            options,
        );
        out.push_str(&self.zone.format_with(options));
        out
    }

    fn days_since_epoch(&self) -> i64 {
        days_from_civil(self.year(), self.month, self.day)
    }
}

impl TimePoint for DateTime {
    fn instant(&self) -> i64 {
        self.days_since_epoch() * SECONDS_PER_DAY + self.time().seconds_since_midnight()
            - i64::from(self.zone.offset())
    }

    fn time_zone(&self) -> TimeZone {
        self.zone
    }

    fn shifted(&self, delta: &Period, zone: TimeZone) -> Result<DateTime> {
        DateTime::new(
            add_field(self.year(), delta.years())?,
            add_field(i64::from(self.month), delta.months())?,
            add_field(i64::from(self.day), delta.days())?,
            add_field(i64::from(self.hour), delta.hours())?,
            add_field(i64::from(self.minute), delta.minutes())?,
            add_field(i64::from(self.second), delta.seconds())?,
            zone,
        )
    }
}

impl_instant_ordering!(DateTime);
impl_span_ops!(DateTime);

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(&FormatOptions::default()))
    }
}

impl FromStr for DateTime {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        DateTime::parse(s)
    }
}

impl From<Date> for DateTime {
    /// Midnight of `date`.
    fn from(date: Date) -> DateTime {
        DateTime {
            year: date.year() as u16,
            month: date.month(),
            day: date.day(),
            hour: 0,
            minute: 0,
            second: 0,
            zone: date.zone(),
        }
    }
}

crate::point::impl_iso_serde!(DateTime, "an ISO-8601 date-time");

#[cfg(feature = "chrono")]
impl TryFrom<DateTime> for chrono::DateTime<chrono::FixedOffset> {
    type Error = CalendarError;

    fn try_from(value: DateTime) -> Result<Self> {
        let out_of_range = || CalendarError::Construction(format!("{value} out of chrono's range"));
        let offset =
            chrono::FixedOffset::east_opt(value.zone.offset()).ok_or_else(out_of_range)?;
        let utc = chrono::DateTime::from_timestamp(value.unix_time(), 0).ok_or_else(out_of_range)?;
        Ok(utc.with_timezone(&offset))
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<chrono::DateTime<chrono::FixedOffset>> for DateTime {
    type Error = CalendarError;

    /// Sub-second precision is dropped and the zone is never dst.
    fn try_from(value: chrono::DateTime<chrono::FixedOffset>) -> Result<Self> {
        let zone = TimeZone::new(i64::from(value.offset().local_minus_utc()), false);
        DateTime::from_unix_time(value.timestamp(), zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Duration;

    #[test]
    fn test_time_normalizes_before_date() {
        let dt = DateTime::utc(2012, 12, 31, 23, 59, 60).unwrap();
        assert_eq!(dt, DateTime::utc(2013, 1, 1, 0, 0, 0).unwrap());
        let dt = DateTime::utc(2013, 3, 1, 0, 0, -1).unwrap();
        assert_eq!(dt.to_string(), "2013-02-28T23:59:59Z");
    }

    #[test]
    fn test_unix_round_trip() {
        let zone = TimeZone::from_hours_minutes(5, 30);
        let dt = DateTime::new(2013, 7, 4, 12, 34, 56, zone).unwrap();
        let (seconds, parts_zone) = dt.to_unix_parts();
        assert_eq!(seconds, 1_372_921_496);
        assert_eq!(DateTime::from_unix_time(seconds, parts_zone).unwrap(), dt);
        assert_eq!(DateTime::from_unix_time(-1, TimeZone::UTC).unwrap().to_string(), "1969-12-31T23:59:59Z");
    }

    #[test]
    fn test_zone_conversion_keeps_instant() {
        let dt = DateTime::utc(2013, 1, 1, 1, 0, 0).unwrap();
        let west = dt.to_time_zone(TimeZone::from_hours_minutes(-3, 0)).unwrap();
        assert_eq!(west.to_string(), "2012-12-31T22:00:00-03:00");
        assert_eq!(west.instant(), dt.instant());
        assert_eq!(west.to_utc().unwrap(), dt);
    }

    #[test]
    fn test_dst_flag_survives_arithmetic() {
        let zone = TimeZone::new(7_200, true);
        let dt = DateTime::new(2013, 6, 1, 0, 0, 0, zone).unwrap();
        assert!((dt + Duration::from_days(1)).zone().is_dst());
    }

    #[test]
    fn test_parts() {
        let dt = DateTime::utc(2013, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(dt.date(), Date::utc(2013, 5, 6).unwrap());
        assert_eq!(dt.time(), TimeOfDay::new(7, 8, 9, TimeZone::UTC));
        assert_eq!(DateTime::from(dt.date()), DateTime::utc(2013, 5, 6, 0, 0, 0).unwrap());
        assert_eq!(dt.day_of_week(WeekStartDay::Monday), 1);
        assert_eq!(dt.day_of_year(), 126);
        assert_eq!(dt.iso_week_date(), (2013, 19, 1));
    }

    #[test]
    fn test_parse_layouts() {
        let expected = DateTime::new(2013, 1, 31, 10, 20, 30, TimeZone::from_hours_minutes(2, 0)).unwrap();
        for text in [
            "2013-01-31T10:20:30+02:00",
            "20130131T102030+0200",
            "2013-01-31 10:20:30+02",
            "2013-01-31T102030.5+0200",
        ] {
            assert_eq!(DateTime::parse(text).unwrap(), expected, "{text}");
        }
        assert!(DateTime::parse("2013-01-31").is_err());
        assert!(DateTime::parse("2013-01-31T25:00:00").is_err());
    }

    #[test]
    fn test_format_options() {
        let dt = DateTime::utc(2013, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(dt.format_with(&FormatOptions::basic()), "20130102T030405Z");
        let options = FormatOptions {
            date_time_separator: ' ',
            utc_as_z: false,
            ..FormatOptions::default()
        };
        assert_eq!(dt.format_with(&options), "2013-01-02 03:04:05+00:00");
    }

    #[test]
    fn test_serde() {
        let dt = DateTime::utc(2013, 1, 2, 3, 4, 5).unwrap();
        let json = serde_json::to_string(&dt).unwrap();
        assert_eq!(json, "\"2013-01-02T03:04:05Z\"");
        assert_eq!(serde_json::from_str::<DateTime>(&json).unwrap(), dt);
        assert!(serde_json::from_str::<DateTime>("\"2013-13-01T00:00:00Z\"").is_err());
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn test_chrono_conversion() {
        let dt = DateTime::new(2013, 7, 4, 12, 34, 56, TimeZone::from_hours_minutes(-7, 0)).unwrap();
        let native = chrono::DateTime::<chrono::FixedOffset>::try_from(dt).unwrap();
        assert_eq!(native.to_rfc3339(), "2013-07-04T12:34:56-07:00");
        assert_eq!(DateTime::try_from(native).unwrap(), dt);
    }
}
