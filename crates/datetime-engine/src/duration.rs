//! Exact spans measured in seconds.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use crate::calendar::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, SECONDS_PER_WEEK};
use crate::error::{CalendarError, Construct, Result};
use crate::iso8601;

/// A signed number of seconds with no calendar meaning.
///
/// Adding a duration to a time point is unambiguous: it always moves the
/// instant by exactly [`total_seconds`](Duration::total_seconds).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    seconds: i64,
}

impl Duration {
    pub const ZERO: Duration = Duration { seconds: 0 };

    pub const fn new(seconds: i64) -> Duration {
        Duration { seconds }
    }

    pub const fn from_weeks(weeks: i64) -> Duration {
        Duration::new(weeks * SECONDS_PER_WEEK)
    }

    pub const fn from_days(days: i64) -> Duration {
        Duration::new(days * SECONDS_PER_DAY)
    }

    pub const fn from_hours(hours: i64) -> Duration {
        Duration::new(hours * SECONDS_PER_HOUR)
    }

    pub const fn from_minutes(minutes: i64) -> Duration {
        Duration::new(minutes * SECONDS_PER_MINUTE)
    }

    pub const fn from_seconds(seconds: i64) -> Duration {
        Duration::new(seconds)
    }

    pub const fn total_seconds(&self) -> i64 {
        self.seconds
    }

    // The component accessors below decompose the duration into whole
    // weeks, then the remaining days, hours, minutes and seconds. Every
    // component carries the sign of the duration.

    /// ```
    /// use datetime_engine::Duration;
    ///
    /// let d = Duration::new(90_061);
    /// assert_eq!((d.weeks(), d.days(), d.hours(), d.minutes(), d.seconds()), (0, 1, 1, 1, 1));
    /// ```
    pub const fn weeks(&self) -> i64 {
        self.seconds / SECONDS_PER_WEEK
    }

    pub const fn days(&self) -> i64 {
        self.seconds % SECONDS_PER_WEEK / SECONDS_PER_DAY
    }

    pub const fn hours(&self) -> i64 {
        self.seconds % SECONDS_PER_DAY / SECONDS_PER_HOUR
    }

    pub const fn minutes(&self) -> i64 {
        self.seconds % SECONDS_PER_HOUR / SECONDS_PER_MINUTE
    }

    pub const fn seconds(&self) -> i64 {
        self.seconds % SECONDS_PER_MINUTE
    }

    pub const fn is_zero(&self) -> bool {
        self.seconds == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.seconds < 0
    }

    pub fn abs(self) -> Duration {
        Duration::new(self.seconds.saturating_abs())
    }

    /// `-self`, or `None` for `i64::MIN` seconds.
    pub const fn checked_neg(self) -> Option<Duration> {
        match self.seconds.checked_neg() {
            Some(seconds) => Some(Duration::new(seconds)),
            None => None,
        }
    }

    /// Parses an ISO-8601 duration.
    ///
    /// Weeks, days, hours, minutes and seconds are summed exactly.
    /// Fractional seconds are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Parse`] for malformed text, and for year or
    /// month components, which have no fixed length in seconds (parse
    /// those as a [`Period`](crate::Period)).
    pub fn parse(text: &str) -> Result<Duration> {
        let fields = iso8601::parse_duration(text)?;
        if fields.years != 0 || fields.months != 0 {
            return Err(CalendarError::parse(
                Construct::Duration,
                text,
                "years and months have no fixed length; parse as a period",
            ));
        }
        let too_large = || CalendarError::parse(Construct::Duration, text, "duration too large");
        let parts = [
            (fields.weeks, SECONDS_PER_WEEK),
            (fields.days, SECONDS_PER_DAY),
            (fields.hours, SECONDS_PER_HOUR),
            (fields.minutes, SECONDS_PER_MINUTE),
            (fields.seconds, 1),
        ];
        let mut total: i64 = 0;
        for (value, unit) in parts {
            total = value
                .checked_mul(unit)
                .and_then(|seconds| total.checked_add(seconds))
                .ok_or_else(too_large)?;
        }
        Ok(Duration::new(fields.signed(total)))
    }

    /// Formats as `PnDTnHnMnS`, never using weeks. A zero duration is
    /// `PT0S`.
    pub fn to_iso8601(&self) -> String {
        iso8601::format_seconds_duration(self.seconds)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl FromStr for Duration {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        Duration::parse(s)
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        Duration::new(-self.seconds)
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration::new(self.seconds + rhs.seconds)
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        Duration::new(self.seconds - rhs.seconds)
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Duration {
        iter.fold(Duration::ZERO, Add::add)
    }
}

impl From<i64> for Duration {
    fn from(seconds: i64) -> Duration {
        Duration::new(seconds)
    }
}

crate::point::impl_iso_serde!(Duration, "an ISO-8601 duration");
