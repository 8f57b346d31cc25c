//! Half-open ranges of time points and per-unit iteration over them.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::duration::Duration;
use crate::error::{CalendarError, Construct, Result};
use crate::iso8601::{self, IntervalParts};
use crate::period::Period;
use crate::point::TimePoint;
use crate::span::TimeSpan;

/// A range `[start, end)` of time points.
///
/// # Invariants
///
/// `start` never follows `end` (compared by instant). Every constructor
/// enforces this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    start: T,
    end: T,
}

/// Step size for [`Interval::iter_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Unit {
    /// One unit as a span. Hours and shorter are exact seconds.
    fn step(self) -> Period {
        match self {
            Unit::Year => Period::from_years(1),
            Unit::Month => Period::from_months(1),
            Unit::Day => Period::from_days(1),
            Unit::Hour => Duration::from_hours(1).into(),
            Unit::Minute => Duration::from_minutes(1).into(),
            Unit::Second => Duration::new(1).into(),
        }
    }
}

impl FromStr for Unit {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Unit> {
        match s {
            "year" | "years" => Ok(Unit::Year),
            "month" | "months" => Ok(Unit::Month),
            "day" | "days" => Ok(Unit::Day),
            "hour" | "hours" => Ok(Unit::Hour),
            "minute" | "minutes" => Ok(Unit::Minute),
            "second" | "seconds" => Ok(Unit::Second),
            _ => Err(CalendarError::Domain(format!("unknown unit {s:?}"))),
        }
    }
}

impl<T: TimePoint> Interval<T> {
    /// # Errors
    ///
    /// Returns [`CalendarError::Construction`] if `start` follows `end`.
    pub fn new(start: T, end: T) -> Result<Interval<T>> {
        if start.instant() > end.instant() {
            debug!(%start, %end, "interval start follows its end");
            return Err(CalendarError::Construction(format!(
                "interval start {start} follows end {end}"
            )));
        }
        Ok(Interval { start, end })
    }

    /// The interval covered by applying `span` at `anchor`.
    ///
    /// ```
    /// use datetime_engine::{Date, Interval, Period};
    ///
    /// let anchor = Date::utc(2013, 3, 1).unwrap();
    /// let back = Interval::from_span(Period::from_months(-1), anchor).unwrap();
    /// assert_eq!(back.to_string(), "2013-02-01Z/2013-03-01Z");
    /// ```
    pub fn from_span<S: TimeSpan>(span: S, anchor: T) -> Result<Interval<T>> {
        span.to_interval(anchor)
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn end(&self) -> T {
        self.end
    }

    /// Exact length from start to end.
    pub fn duration(&self) -> Duration {
        Duration::new(self.end.instant() - self.start.instant())
    }

    pub fn is_empty(&self) -> bool {
        self.start.instant() == self.end.instant()
    }

    /// `start <= point < end`.
    pub fn contains(&self, point: &T) -> bool {
        self.start.instant() <= point.instant() && point.instant() < self.end.instant()
    }

    /// Whether `other` lies entirely inside this interval.
    pub fn encompasses(&self, other: &Interval<T>) -> bool {
        self.start.instant() <= other.start.instant() && self.end.instant() >= other.end.instant()
    }

    /// Whether the two intervals overlap. Touching end points do not count.
    pub fn intersects(&self, other: &Interval<T>) -> bool {
        self.start.instant() < other.end.instant() && self.end.instant() > other.start.instant()
    }

    /// A fresh iterator stepping from `start` by one `unit` until `end`.
    pub fn iter_by(&self, unit: Unit) -> IntervalIter<T> {
        IntervalIter {
            current: Some(self.start),
            end: self.end,
            step: unit.step(),
        }
    }

    pub fn by_year(&self) -> IntervalIter<T> {
        self.iter_by(Unit::Year)
    }

    pub fn by_month(&self) -> IntervalIter<T> {
        self.iter_by(Unit::Month)
    }

    /// ```
    /// use datetime_engine::{Date, Interval};
    ///
    /// let week = Interval::new(Date::utc(2013, 1, 1).unwrap(), Date::utc(2013, 1, 8).unwrap()).unwrap();
    /// assert_eq!(week.by_day().count(), 7);
    /// ```
    pub fn by_day(&self) -> IntervalIter<T> {
        self.iter_by(Unit::Day)
    }

    pub fn by_hour(&self) -> IntervalIter<T> {
        self.iter_by(Unit::Hour)
    }

    pub fn by_minute(&self) -> IntervalIter<T> {
        self.iter_by(Unit::Minute)
    }

    pub fn by_second(&self) -> IntervalIter<T> {
        self.iter_by(Unit::Second)
    }
}

impl<T> Interval<T>
where
    T: TimePoint + FromStr<Err = CalendarError>,
{
    /// Parses `<start>/<end>`, `<start>/<duration>` or `<duration>/<end>`.
    ///
    /// A duration half is resolved as a period against the point half.
    pub fn parse(text: &str) -> Result<Interval<T>> {
        match iso8601::parse_interval(text)? {
            IntervalParts::Range(start, end) => Interval::new(start.parse()?, end.parse()?),
            IntervalParts::StartDuration(start, fields) => {
                let span = Period::from_fields(&fields, Construct::Interval, text)?;
                Interval::from_span(span, start.parse()?)
            }
            IntervalParts::DurationEnd(fields, end) => {
                let span = Period::from_fields(&fields, Construct::Interval, text)?;
                Interval::from_span(span.negated()?, end.parse()?)
            }
        }
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start, self.end)
    }
}

impl<T> FromStr for Interval<T>
where
    T: TimePoint + FromStr<Err = CalendarError>,
{
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        Interval::parse(s)
    }
}

impl<T: fmt::Display> serde::Serialize for Interval<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T> serde::Deserialize<'de> for Interval<T>
where
    T: TimePoint + FromStr<Err = CalendarError>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct IntervalVisitor<T>(PhantomData<T>);

        impl<'a, T> serde::de::Visitor<'a> for IntervalVisitor<T>
        where
            T: TimePoint + FromStr<Err = CalendarError>,
        {
            type Value = Interval<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an ISO-8601 interval")
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> std::result::Result<Interval<T>, E> {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(IntervalVisitor(PhantomData))
    }
}

/// Lazy sequence of points produced by [`Interval::iter_by`].
///
/// Yields `start`, then each point one unit later, stopping before the
/// first point at or past `end`. A step that fails or does not move the
/// instant forward ends the sequence, so it is always finite.
#[derive(Debug, Clone)]
pub struct IntervalIter<T> {
    current: Option<T>,
    end: T,
    step: Period,
}

impl<T: TimePoint> Iterator for IntervalIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.current.take()?;
        if current.instant() >= self.end.instant() {
            return None;
        }
        match self.step.resolve(current) {
            Ok(next) if next.instant() > current.instant() => self.current = Some(next),
            Ok(next) => trace!(%current, %next, "interval step did not advance; stopping"),
            Err(err) => trace!(%current, %err, "interval step failed; stopping"),
        }
        Some(current)
    }
}

impl<T: TimePoint> FusedIterator for IntervalIter<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Date, DateTime, TimeOfDay, TimeZone};

    fn dt(y: i64, mo: i64, d: i64, h: i64, mi: i64, s: i64) -> DateTime {
        DateTime::utc(y, mo, d, h, mi, s).unwrap()
    }

    fn span(a: DateTime, b: DateTime) -> Interval<DateTime> {
        Interval::new(a, b).unwrap()
    }

    #[test]
    fn test_new_rejects_reversed_bounds() {
        let a = dt(2013, 1, 2, 0, 0, 0);
        let b = dt(2013, 1, 1, 0, 0, 0);
        assert!(matches!(Interval::new(a, b), Err(CalendarError::Construction(_))));
        assert!(Interval::new(a, a).unwrap().is_empty());
    }

    #[test]
    fn test_predicates() {
        let outer = span(dt(2013, 1, 1, 0, 0, 0), dt(2013, 1, 10, 0, 0, 0));
        let inner = span(dt(2013, 1, 2, 0, 0, 0), dt(2013, 1, 3, 0, 0, 0));
        let touching = span(dt(2013, 1, 10, 0, 0, 0), dt(2013, 1, 11, 0, 0, 0));

        assert!(outer.contains(&outer.start()));
        assert!(!outer.contains(&outer.end()));
        assert!(outer.encompasses(&inner));
        assert!(outer.encompasses(&outer));
        assert!(!inner.encompasses(&outer));
        assert!(outer.intersects(&inner));
        assert!(!outer.intersects(&touching));
    }

    #[test]
    fn test_by_day_stops_before_end() {
        let interval = span(dt(2013, 1, 1, 12, 0, 0), dt(2013, 1, 5, 0, 0, 0));
        let days: Vec<_> = interval.by_day().collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days[3], dt(2013, 1, 4, 12, 0, 0));
        assert!(days.iter().all(|d| *d < interval.end()));
    }

    #[test]
    fn test_by_month_overflows_like_periods() {
        let interval = span(dt(2013, 1, 31, 0, 0, 0), dt(2013, 6, 1, 0, 0, 0));
        let months: Vec<_> = interval.by_month().map(|d| d.to_string()).collect();
        assert_eq!(
            months,
            [
                "2013-01-31T00:00:00Z",
                "2013-03-03T00:00:00Z",
                "2013-04-03T00:00:00Z",
                "2013-05-03T00:00:00Z",
            ]
        );
    }

    #[test]
    fn test_each_call_is_a_fresh_sequence() {
        let interval = span(dt(2013, 1, 1, 0, 0, 0), dt(2013, 1, 1, 0, 0, 3));
        let mut first = interval.by_second();
        first.next();
        assert_eq!(interval.by_second().count(), 3);
        assert_eq!(first.count(), 2);
    }

    #[test]
    fn test_non_advancing_step_ends_iteration() {
        let dates = Interval::new(Date::utc(2013, 1, 1).unwrap(), Date::utc(2013, 1, 3).unwrap()).unwrap();
        // One hour never moves a date forward.
        assert_eq!(dates.by_hour().count(), 1);

        let times = Interval::new(
            TimeOfDay::new(22, 0, 0, TimeZone::UTC),
            TimeOfDay::new(23, 30, 0, TimeZone::UTC),
        )
        .unwrap();
        assert_eq!(times.by_hour().count(), 2);
        // A day wraps a time of day back onto itself.
        assert_eq!(times.by_day().count(), 1);
    }

    #[test]
    fn test_empty_interval_yields_nothing() {
        let a = dt(2013, 1, 1, 0, 0, 0);
        assert_eq!(span(a, a).by_second().count(), 0);
    }

    #[test]
    fn test_parse_forms() {
        let range: Interval<DateTime> =
            "2013-01-01T00:00:00Z/2013-01-02T00:00:00Z".parse().unwrap();
        assert_eq!(range.duration(), Duration::from_days(1));

        let forward: Interval<Date> = "2013-01-31/P1M".parse().unwrap();
        assert_eq!(forward.end(), Date::utc(2013, 3, 3).unwrap());

        let backward: Interval<Date> = "P1W/2013-01-08".parse().unwrap();
        assert_eq!(backward.start(), Date::utc(2013, 1, 1).unwrap());
        assert_eq!(backward.to_string(), "2013-01-01Z/2013-01-08Z");

        assert!(Interval::<Date>::parse("2013-01-02/2013-01-01").is_err());
        assert!(Interval::<Date>::parse("P1D").is_err());
        assert!(Interval::<Date>::parse("P1D/P2D").is_err());
        assert!(Interval::<Date>::parse("/").is_err());
    }

    #[test]
    fn test_serde() {
        let interval = Interval::new(Date::utc(2013, 1, 1).unwrap(), Date::utc(2013, 2, 1).unwrap()).unwrap();
        let json = serde_json::to_string(&interval).unwrap();
        assert_eq!(json, "\"2013-01-01Z/2013-02-01Z\"");
        assert_eq!(serde_json::from_str::<Interval<Date>>(&json).unwrap(), interval);
    }

    #[test]
    fn test_unit_names() {
        assert_eq!("days".parse::<Unit>().unwrap(), Unit::Day);
        assert!("fortnight".parse::<Unit>().is_err());
    }
}
