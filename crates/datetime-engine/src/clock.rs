//! Sources of "now".
//!
//! Nothing in this crate reads the system time on its own. Code that needs
//! the current time takes a [`Clock`], so tests can pin it with a
//! [`FixedClock`].

use crate::datetime::DateTime;
use crate::error::Result;
use crate::point::TimePoint;
use crate::zone::TimeZone;

pub trait Clock {
    /// The current date-time expressed in `zone`.
    fn now(&self, zone: TimeZone) -> Result<DateTime>;
}

/// A clock that always reports the same instant.
///
/// ```
/// use datetime_engine::{Clock, DateTime, FixedClock, TimeZone};
///
/// let clock = FixedClock::new(DateTime::utc(2013, 1, 1, 12, 0, 0).unwrap());
/// let tokyo = clock.now(TimeZone::from_hours_minutes(9, 0)).unwrap();
/// assert_eq!(tokyo.to_string(), "2013-01-01T21:00:00+09:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    anchor: DateTime,
}

impl FixedClock {
    pub fn new(anchor: DateTime) -> FixedClock {
        FixedClock { anchor }
    }
}

impl Clock for FixedClock {
    fn now(&self, zone: TimeZone) -> Result<DateTime> {
        self.anchor.to_time_zone(zone)
    }
}

/// The operating system clock, read through `chrono`. Sub-second precision
/// is dropped.
#[cfg(feature = "chrono")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(feature = "chrono")]
impl Clock for SystemClock {
    fn now(&self, zone: TimeZone) -> Result<DateTime> {
        DateTime::from_unix_time(chrono::Utc::now().timestamp(), zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_keeps_instant_across_zones() {
        let anchor = DateTime::utc(2013, 6, 30, 23, 0, 0).unwrap();
        let clock = FixedClock::new(anchor);
        let east = clock.now(TimeZone::from_hours_minutes(2, 0)).unwrap();
        assert_eq!(east.to_string(), "2013-07-01T01:00:00+02:00");
        assert_eq!(east.instant(), anchor.instant());
        assert_eq!(clock.now(TimeZone::UTC).unwrap(), anchor);
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn test_system_clock_is_after_2020() {
        let now = SystemClock.now(TimeZone::UTC).unwrap();
        assert!(now.year() >= 2020);
    }
}
