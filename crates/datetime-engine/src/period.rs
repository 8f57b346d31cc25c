//! Calendar-relative spans.

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use crate::calendar::approximate_total_seconds;
use crate::duration::Duration;
use crate::error::{CalendarError, Construct, Result};
use crate::iso8601::{self, DurationFields};

/// A span expressed in calendar fields.
///
/// A period has no fixed length: "one month" is 28 to 31 days depending on
/// where it is applied. It only becomes exact when resolved against an
/// anchor with [`TimeSpan`](crate::TimeSpan).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Period {
    years: i64,
    months: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
}

impl Period {
    pub const ZERO: Period = Period::new(0, 0, 0, 0, 0, 0);

    pub const fn new(
        years: i64,
        months: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    ) -> Period {
        Period {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    pub const fn from_years(years: i64) -> Period {
        Period::new(years, 0, 0, 0, 0, 0)
    }

    pub const fn from_months(months: i64) -> Period {
        Period::new(0, months, 0, 0, 0, 0)
    }

    pub const fn from_weeks(weeks: i64) -> Period {
        Period::new(0, 0, weeks * 7, 0, 0, 0)
    }

    pub const fn from_days(days: i64) -> Period {
        Period::new(0, 0, days, 0, 0, 0)
    }

    pub const fn from_hours(hours: i64) -> Period {
        Period::new(0, 0, 0, hours, 0, 0)
    }

    pub const fn from_minutes(minutes: i64) -> Period {
        Period::new(0, 0, 0, 0, minutes, 0)
    }

    pub const fn from_seconds(seconds: i64) -> Period {
        Period::new(0, 0, 0, 0, 0, seconds)
    }

    pub const fn years(&self) -> i64 {
        self.years
    }

    pub const fn months(&self) -> i64 {
        self.months
    }

    pub const fn days(&self) -> i64 {
        self.days
    }

    pub const fn hours(&self) -> i64 {
        self.hours
    }

    pub const fn minutes(&self) -> i64 {
        self.minutes
    }

    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn is_zero(&self) -> bool {
        *self == Period::ZERO
    }

    /// Every field negated, or `None` if any field is `i64::MIN`.
    pub fn checked_neg(self) -> Option<Period> {
        Some(Period::new(
            self.years.checked_neg()?,
            self.months.checked_neg()?,
            self.days.checked_neg()?,
            self.hours.checked_neg()?,
            self.minutes.checked_neg()?,
            self.seconds.checked_neg()?,
        ))
    }

    /// Rough length in seconds using average year and month lengths.
    ///
    /// Good for ordering periods by magnitude; use
    /// [`TimeSpan::to_seconds`](crate::TimeSpan::to_seconds) for the exact
    /// length at a given anchor.
    pub fn approximate_seconds(&self) -> i64 {
        approximate_total_seconds(
            self.years,
            self.months,
            0,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
        )
    }

    /// Parses an ISO-8601 duration as calendar fields. Weeks become seven
    /// days each; fractional seconds are discarded.
    pub fn parse(text: &str) -> Result<Period> {
        let fields = iso8601::parse_duration(text).map_err(|err| match err {
            CalendarError::Parse { input, reason, .. } => CalendarError::Parse {
                construct: Construct::Period,
                input,
                reason,
            },
            other => other,
        })?;
        Period::from_fields(&fields, Construct::Period, text)
    }

    /// Builds a period from parsed duration fields, folding weeks into
    /// days and applying the leading sign.
    pub(crate) fn from_fields(
        fields: &DurationFields,
        construct: Construct,
        text: &str,
    ) -> Result<Period> {
        let days = fields
            .weeks
            .checked_mul(7)
            .and_then(|week_days| week_days.checked_add(fields.days))
            .ok_or_else(|| CalendarError::parse(construct, text, "day count too large"))?;
        Ok(Period::new(
            fields.signed(fields.years),
            fields.signed(fields.months),
            fields.signed(days),
            fields.signed(fields.hours),
            fields.signed(fields.minutes),
            fields.signed(fields.seconds),
        ))
    }

    /// Formats in designated form; a zero period is `PT0S`.
    pub fn to_iso8601(&self) -> String {
        iso8601::format_duration([
            self.years,
            self.months,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
        ])
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl FromStr for Period {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        Period::parse(s)
    }
}

impl Neg for Period {
    type Output = Period;

    fn neg(self) -> Period {
        Period::new(
            -self.years,
            -self.months,
            -self.days,
            -self.hours,
            -self.minutes,
            -self.seconds,
        )
    }
}

impl From<Duration> for Period {
    fn from(duration: Duration) -> Period {
        Period::from_seconds(duration.total_seconds())
    }
}

crate::point::impl_iso_serde!(Period, "an ISO-8601 duration");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fields() {
        let p = Period::parse("P1Y2M3DT4H5M6S").unwrap();
        assert_eq!(p, Period::new(1, 2, 3, 4, 5, 6));
        assert_eq!(Period::parse("P2W").unwrap(), Period::from_days(14));
        assert_eq!(Period::parse("-P1M").unwrap(), Period::from_months(-1));
    }

    #[test]
    fn test_parse_failure_names_period() {
        let err = Period::parse("P1Y1MT").unwrap_err();
        assert!(matches!(
            err,
            CalendarError::Parse {
                construct: Construct::Period,
                ..
            }
        ));
    }

    #[test]
    fn test_display_round_trip() {
        let periods = [
            Period::ZERO,
            Period::from_months(1),
            Period::from_minutes(1),
            Period::new(1, -2, 0, 0, 0, 3),
            -Period::new(0, 0, 1, 2, 0, 0),
        ];
        for p in periods {
            assert_eq!(p.to_string().parse::<Period>().unwrap(), p);
        }
        assert_eq!(Period::ZERO.to_string(), "PT0S");
        assert_eq!(Period::new(0, 0, -1, -2, 0, 0).to_string(), "-P1DT2H");
    }

    #[test]
    fn test_approximate_seconds() {
        assert_eq!(Period::from_years(1).approximate_seconds(), 31_557_600);
        assert!(Period::from_months(1).approximate_seconds() > Period::from_days(30).approximate_seconds());
    }

    #[test]
    fn test_from_duration() {
        assert_eq!(Period::from(Duration::new(61)), Period::from_seconds(61));
    }
}
