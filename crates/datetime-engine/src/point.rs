//! The capability shared by [`Date`](crate::Date),
//! [`TimeOfDay`](crate::TimeOfDay) and [`DateTime`](crate::DateTime).
//!
//! # Ordering
//!
//! Every time point orders by its absolute instant. When two points denote
//! the same instant, the zone offset and then the dst flag break the tie,
//! which keeps `Ord` consistent with field-wise equality. Points in
//! different zones are therefore never compared by their raw wall-clock
//! fields: `10:00+02:00` sorts *before* `09:30Z`.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{CalendarError, Result};
use crate::period::Period;
use crate::span::TimeSpan;
use crate::zone::TimeZone;

/// Smallest year a time point may hold.
pub const MIN_YEAR: i64 = 0;
/// Largest year a time point may hold (the four-digit ISO-8601 range).
pub const MAX_YEAR: i64 = 9_999;

/// A point in time with wall-clock fields and a fixed-offset zone.
pub trait TimePoint: Copy + Ord + fmt::Debug + fmt::Display {
    /// Seconds from 1970-01-01T00:00:00Z to this point's instant.
    ///
    /// A [`TimeOfDay`](crate::TimeOfDay) has no date and counts from
    /// midnight UTC of an unspecified day instead.
    fn instant(&self) -> i64;

    fn time_zone(&self) -> TimeZone;

    /// Adds each component of `delta` to the matching wall-clock field,
    /// tags the result with `zone`, and normalizes once.
    ///
    /// Fields the type does not carry are dropped: a date ignores the time
    /// of day left over after carrying whole days, a time of day ignores
    /// any date change.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Construction`] if the normalized year falls
    /// outside `MIN_YEAR..=MAX_YEAR` or the field sums overflow.
    fn shifted(&self, delta: &Period, zone: TimeZone) -> Result<Self>;

    /// The same point re-expressed in `zone`.
    ///
    /// The offset difference is added to the seconds field and the fields
    /// are normalized; the instant is preserved for types that carry a
    /// full date and time.
    fn to_time_zone(&self, zone: TimeZone) -> Result<Self> {
        let delta = i64::from(zone.offset()) - i64::from(self.time_zone().offset());
        self.shifted(&Period::from_seconds(delta), zone)
    }

    fn to_utc(&self) -> Result<Self> {
        self.to_time_zone(TimeZone::UTC)
    }

    /// Applies `span` (seconds, a [`Duration`](crate::Duration) or a
    /// [`Period`]) to this point.
    fn checked_add<S: TimeSpan>(&self, span: S) -> Result<Self> {
        span.resolve(*self)
    }

    fn checked_sub<S: TimeSpan>(&self, span: S) -> Result<Self> {
        span.negated()?.resolve(*self)
    }

    /// Signed seconds from `other` to `self`.
    fn difference_in_seconds<P: TimePoint>(&self, other: &P) -> i64 {
        self.instant() - other.instant()
    }
}

/// Compares two points of possibly different types by instant alone.
///
/// ```
/// use std::cmp::Ordering;
/// use datetime_engine::{compare, Date, DateTime};
///
/// let midnight = Date::utc(2013, 1, 1).unwrap();
/// let morning = DateTime::utc(2013, 1, 1, 9, 0, 0).unwrap();
/// assert_eq!(compare(&midnight, &morning), Ordering::Less);
/// ```
pub fn compare<A: TimePoint, B: TimePoint>(a: &A, b: &B) -> Ordering {
    a.instant().cmp(&b.instant())
}

/// Ordering key shared by all point types.
pub(crate) fn ordering_key<P: TimePoint>(point: &P) -> (i64, i32, bool) {
    let zone = point.time_zone();
    (point.instant(), zone.offset(), zone.is_dst())
}

pub(crate) fn check_year(year: i64) -> Result<u16> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year as u16)
    } else {
        Err(CalendarError::Construction(format!(
            "year {year} out of range {MIN_YEAR}..={MAX_YEAR}"
        )))
    }
}

/// Adds a field delta, reporting overflow as a construction error.
pub(crate) fn add_field(value: i64, delta: i64) -> Result<i64> {
    value
        .checked_add(delta)
        .ok_or_else(|| CalendarError::Construction("field arithmetic overflowed".into()))
}

/// `Ord` by instant, then zone.
macro_rules! impl_instant_ordering {
    ($ty:ty) => {
        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                $crate::point::ordering_key(self).cmp(&$crate::point::ordering_key(other))
            }
        }
    };
}
pub(crate) use impl_instant_ordering;

/// `+`/`-` with [`Duration`](crate::Duration) and [`Period`], and `-`
/// between two points.
///
/// The operators panic when the result leaves the supported year range;
/// use [`TimePoint::checked_add`] and [`TimePoint::checked_sub`] to handle
/// that case.
macro_rules! impl_span_ops {
    ($ty:ty) => {
        impl std::ops::Add<$crate::Duration> for $ty {
            type Output = $ty;

            fn add(self, rhs: $crate::Duration) -> $ty {
                $crate::point::TimePoint::checked_add(&self, rhs)
                    .expect("adding duration to time point out of range")
            }
        }

        impl std::ops::Sub<$crate::Duration> for $ty {
            type Output = $ty;

            fn sub(self, rhs: $crate::Duration) -> $ty {
                $crate::point::TimePoint::checked_sub(&self, rhs)
                    .expect("subtracting duration from time point out of range")
            }
        }

        impl std::ops::Add<$crate::Period> for $ty {
            type Output = $ty;

            fn add(self, rhs: $crate::Period) -> $ty {
                $crate::point::TimePoint::checked_add(&self, rhs)
                    .expect("adding period to time point out of range")
            }
        }

        impl std::ops::Sub<$crate::Period> for $ty {
            type Output = $ty;

            fn sub(self, rhs: $crate::Period) -> $ty {
                $crate::point::TimePoint::checked_sub(&self, rhs)
                    .expect("subtracting period from time point out of range")
            }
        }

        impl std::ops::Sub for $ty {
            type Output = $crate::Duration;

            fn sub(self, rhs: $ty) -> $crate::Duration {
                $crate::Duration::new($crate::point::TimePoint::difference_in_seconds(
                    &self, &rhs,
                ))
            }
        }
    };
}
pub(crate) use impl_span_ops;

/// Serde support through the ISO-8601 string form.
macro_rules! impl_iso_serde {
    ($ty:ty, $expecting:literal) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<$ty, D::Error> {
                struct IsoVisitor;

                impl<'a> serde::de::Visitor<'a> for IsoVisitor {
                    type Value = $ty;

                    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                        f.write_str($expecting)
                    }

                    fn visit_str<E: serde::de::Error>(
                        self,
                        value: &str,
                    ) -> std::result::Result<$ty, E> {
                        value.parse().map_err(E::custom)
                    }
                }

                deserializer.deserialize_str(IsoVisitor)
            }
        }
    };
}
pub(crate) use impl_iso_serde;
