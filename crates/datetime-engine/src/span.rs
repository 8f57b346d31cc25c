//! Resolution of spans against anchor points.
//!
//! A span only becomes an exact length once it is applied to a specific
//! point. Resolution works on wall-clock fields: the span's components are
//! added to the anchor's fields and the result is normalized once. For a
//! [`Period`] this means day overflow is resolved *after* the month has
//! moved, so 2013-01-31 plus one month is 2013-03-03, not 2013-02-28.

use crate::duration::Duration;
use crate::error::{CalendarError, Result};
use crate::interval::Interval;
use crate::period::Period;
use crate::point::TimePoint;

/// A span of time that can be projected onto a [`TimePoint`].
///
/// Implemented for [`Duration`], [`Period`] and plain `i64` seconds.
pub trait TimeSpan: Copy {
    /// The point reached by applying this span to `anchor`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Construction`](crate::CalendarError::Construction)
    /// if the result leaves the supported year range.
    fn resolve<T: TimePoint>(&self, anchor: T) -> Result<T>;

    /// The same span pointing the other way.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Construction`] if a component is `i64::MIN`
    /// and has no positive counterpart.
    fn negated(&self) -> Result<Self>;

    /// Exact signed length of this span when applied at `anchor`.
    ///
    /// Computed as the distance from `anchor` to the resolved point, so it
    /// always agrees with [`resolve`](TimeSpan::resolve), including across
    /// month-length and leap-year boundaries.
    ///
    /// ```
    /// use datetime_engine::{Date, Period, TimeSpan};
    ///
    /// let jan = Date::utc(2013, 1, 1).unwrap();
    /// let feb = Date::utc(2013, 2, 1).unwrap();
    /// assert_eq!(Period::from_months(1).to_seconds(jan).unwrap(), 31 * 86_400);
    /// assert_eq!(Period::from_months(1).to_seconds(feb).unwrap(), 28 * 86_400);
    /// ```
    fn to_seconds<T: TimePoint>(&self, anchor: T) -> Result<i64> {
        let resolved = self.resolve(anchor)?;
        Ok(resolved.instant() - anchor.instant())
    }

    /// The interval between `anchor` and the resolved point, ordered so
    /// that its start never follows its end.
    fn to_interval<T: TimePoint>(&self, anchor: T) -> Result<Interval<T>> {
        let resolved = self.resolve(anchor)?;
        if resolved < anchor {
            Interval::new(resolved, anchor)
        } else {
            Interval::new(anchor, resolved)
        }
    }
}

impl TimeSpan for Period {
    fn resolve<T: TimePoint>(&self, anchor: T) -> Result<T> {
        anchor.shifted(self, anchor.time_zone())
    }

    fn negated(&self) -> Result<Self> {
        self.checked_neg().ok_or_else(|| negation_overflow(self))
    }
}

impl TimeSpan for Duration {
    fn resolve<T: TimePoint>(&self, anchor: T) -> Result<T> {
        Period::from_seconds(self.total_seconds()).resolve(anchor)
    }

    fn negated(&self) -> Result<Self> {
        self.checked_neg().ok_or_else(|| negation_overflow(self))
    }
}

/// Whole seconds.
impl TimeSpan for i64 {
    fn resolve<T: TimePoint>(&self, anchor: T) -> Result<T> {
        Duration::new(*self).resolve(anchor)
    }

    fn negated(&self) -> Result<Self> {
        self.checked_neg().ok_or_else(|| negation_overflow(self))
    }
}

fn negation_overflow(span: &dyn std::fmt::Display) -> CalendarError {
    CalendarError::Construction(format!("cannot negate {span}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Date, DateTime, TimeOfDay, TimeZone};

    fn dt(y: i64, mo: i64, d: i64, h: i64, mi: i64, s: i64) -> DateTime {
        DateTime::utc(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_period_month_end_overflows_forward() {
        let jan31 = Date::utc(2013, 1, 31).unwrap();
        let resolved = Period::from_months(1).resolve(jan31).unwrap();
        assert_eq!(resolved, Date::utc(2013, 3, 3).unwrap());

        let leap = Date::utc(2012, 1, 31).unwrap();
        assert_eq!(
            Period::from_months(1).resolve(leap).unwrap(),
            Date::utc(2012, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_period_applies_all_fields_before_normalizing() {
        let anchor = dt(2013, 12, 31, 23, 0, 0);
        let period = Period::new(0, 2, 0, 1, 0, 0);
        // Month 14, hour 24 -> 2014-02-32T00:00:00 -> 2014-03-04.
        assert_eq!(period.resolve(anchor).unwrap(), dt(2014, 3, 4, 0, 0, 0));
    }

    #[test]
    fn test_duration_carries_through_all_fields() {
        let anchor = dt(2012, 12, 31, 23, 59, 59);
        assert_eq!(
            Duration::new(1).resolve(anchor).unwrap(),
            dt(2013, 1, 1, 0, 0, 0)
        );
        assert_eq!(
            Duration::from_days(-366).resolve(anchor).unwrap(),
            dt(2011, 12, 31, 23, 59, 59)
        );
    }

    #[test]
    fn test_integer_seconds() {
        let anchor = dt(2013, 1, 1, 0, 0, 0);
        assert_eq!(90i64.resolve(anchor).unwrap(), dt(2013, 1, 1, 0, 1, 30));
        assert_eq!((-1i64).resolve(anchor).unwrap(), dt(2012, 12, 31, 23, 59, 59));
    }

    #[test]
    fn test_to_seconds_depends_on_anchor() {
        let period = Period::from_years(1);
        assert_eq!(period.to_seconds(Date::utc(2012, 1, 1).unwrap()).unwrap(), 366 * 86_400);
        assert_eq!(period.to_seconds(Date::utc(2013, 1, 1).unwrap()).unwrap(), 365 * 86_400);
        assert_eq!(
            Duration::new(-42).to_seconds(dt(2013, 1, 1, 0, 0, 0)).unwrap(),
            -42
        );
    }

    #[test]
    fn test_to_interval_is_ordered() {
        let anchor = dt(2013, 6, 1, 12, 0, 0);
        let forward = Duration::from_hours(2).to_interval(anchor).unwrap();
        assert_eq!(forward.start(), anchor);
        assert_eq!(forward.end(), dt(2013, 6, 1, 14, 0, 0));

        let backward = Period::from_days(-1).to_interval(anchor).unwrap();
        assert_eq!(backward.start(), dt(2013, 5, 31, 12, 0, 0));
        assert_eq!(backward.end(), anchor);
    }

    #[test]
    fn test_time_of_day_wraps() {
        let late = TimeOfDay::new(23, 30, 0, TimeZone::UTC);
        assert_eq!(
            Duration::from_hours(1).resolve(late).unwrap(),
            TimeOfDay::new(0, 30, 0, TimeZone::UTC)
        );
    }

    #[test]
    fn test_negated() {
        assert_eq!(Period::from_months(1).negated().unwrap(), Period::from_months(-1));
        assert_eq!(Duration::new(5).negated().unwrap(), Duration::new(-5));
        assert_eq!(7i64.negated().unwrap(), -7);
    }

    #[test]
    fn test_negating_minimum_is_an_error() {
        assert!(matches!(
            Duration::new(i64::MIN).negated(),
            Err(CalendarError::Construction(_))
        ));
        assert!(matches!(
            Period::from_days(i64::MIN).negated(),
            Err(CalendarError::Construction(_))
        ));
        assert!(matches!(i64::MIN.negated(), Err(CalendarError::Construction(_))));
    }
}
