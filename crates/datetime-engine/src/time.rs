//! Times of day.

use std::fmt;
use std::str::FromStr;

use crate::calendar::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use crate::error::{CalendarError, Result};
use crate::iso8601::{self, FormatOptions};
use crate::normalize::normalize_time;
use crate::period::Period;
use crate::point::{add_field, impl_instant_ordering, impl_span_ops, TimePoint};
use crate::zone::TimeZone;

/// A wall-clock time with no date, in a fixed-offset zone.
///
/// Arithmetic wraps around midnight: any carry into the day is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    second: u8,
    zone: TimeZone,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay {
        hour: 0,
        minute: 0,
        second: 0,
        zone: TimeZone::UTC,
    };

    /// Creates a time, normalizing out-of-range fields.
    ///
    /// ```
    /// use datetime_engine::{TimeOfDay, TimeZone};
    ///
    /// let t = TimeOfDay::new(-10, 25, 13, TimeZone::UTC);
    /// assert_eq!((t.hour(), t.minute(), t.second()), (14, 25, 13));
    /// ```
    pub fn new(hour: i64, minute: i64, second: i64, zone: TimeZone) -> TimeOfDay {
        let (hour, minute, second, _) = normalize_time(hour, minute, second, 0);
        TimeOfDay {
            hour: hour as u8,
            minute: minute as u8,
            second: second as u8,
            zone,
        }
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

    /// Wall-clock seconds since midnight in this time's zone.
    pub fn seconds_since_midnight(&self) -> i64 {
        i64::from(self.hour) * SECONDS_PER_HOUR
            + i64::from(self.minute) * SECONDS_PER_MINUTE
            + i64::from(self.second)
    }

    /// Parses `hh:mm:ss[.frac][tz]` or `hhmmss[.frac][tz]`. Fractional
    /// seconds are discarded and a missing offset is UTC.
    pub fn parse(text: &str) -> Result<TimeOfDay> {
        let fields = iso8601::parse_time(text)?;
        Ok(TimeOfDay::new(
            i64::from(fields.hour),
            i64::from(fields.minute),
            i64::from(fields.second),
            TimeZone::from_parsed(fields.offset),
        ))
    }

    pub fn format_with(&self, options: &FormatOptions) -> String {
        let mut out = iso8601::format_time(self.hour, self.minute, self.second, options);
        out.push_str(&self.zone.format_with(options));
        out
    }
}

impl TimePoint for TimeOfDay {
    fn instant(&self) -> i64 {
        self.seconds_since_midnight() - i64::from(self.zone.offset())
    }

    fn time_zone(&self) -> TimeZone {
        self.zone
    }

    fn shifted(&self, delta: &Period, zone: TimeZone) -> Result<TimeOfDay> {
        Ok(TimeOfDay::new(
            add_field(i64::from(self.hour), delta.hours())?,
            add_field(i64::from(self.minute), delta.minutes())?,
            add_field(i64::from(self.second), delta.seconds())?,
            zone,
        ))
    }
}

impl_instant_ordering!(TimeOfDay);
impl_span_ops!(TimeOfDay);

impl Default for TimeOfDay {
    fn default() -> Self {
        TimeOfDay::MIDNIGHT
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(&FormatOptions::default()))
    }
}

impl FromStr for TimeOfDay {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        TimeOfDay::parse(s)
    }
}

crate::point::impl_iso_serde!(TimeOfDay, "an ISO-8601 time of day");
