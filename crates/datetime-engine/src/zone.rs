//! Fixed-offset time zones.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calendar::SECONDS_PER_DAY;
use crate::error::Result;
use crate::iso8601::{self, FormatOptions};

/// A fixed UTC offset with a daylight-saving flag.
///
/// The offset is rounded to whole minutes (ties toward positive infinity)
/// and wrapped into `(-86400, 86400)` at construction. Two zones are equal
/// when both the offset and the flag match; equal offsets with different
/// flags are different zones even though they name the same instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "ZoneFields")]
pub struct TimeZone {
    offset: i32,
    is_dst: bool,
}

/// Serialized shape of a [`TimeZone`]; deserialized values go through
/// [`TimeZone::new`] so the offset is rounded and wrapped.
#[derive(Deserialize)]
struct ZoneFields {
    offset: i64,
    is_dst: bool,
}

impl From<ZoneFields> for TimeZone {
    fn from(fields: ZoneFields) -> TimeZone {
        TimeZone::new(fields.offset, fields.is_dst)
    }
}

impl TimeZone {
    pub const UTC: TimeZone = TimeZone {
        offset: 0,
        is_dst: false,
    };

    /// Creates a zone from an offset east of UTC in seconds.
    ///
    /// ```
    /// use datetime_engine::TimeZone;
    ///
    /// assert_eq!(TimeZone::new(3_629, false).offset(), 3_600);
    /// assert_eq!(TimeZone::new(90, false).offset(), 120);
    /// assert_eq!(TimeZone::new(-90, false).offset(), -60);
    /// assert_eq!(TimeZone::new(90_000, false).offset(), 3_600);
    /// ```
    pub fn new(offset_seconds: i64, is_dst: bool) -> TimeZone {
        // A day is a whole number of minutes, so wrapping first leaves the
        // rounding unchanged and keeps the arithmetic in range.
        let rounded = (offset_seconds % SECONDS_PER_DAY + 30).div_euclid(60) * 60;
        let wrapped = rounded % SECONDS_PER_DAY;
        TimeZone {
            offset: wrapped as i32,
            is_dst,
        }
    }

    /// Creates a standard-time zone from signed hours and minutes.
    ///
    /// Both parts take the sign of the offset: `from_hours_minutes(-5, -30)`
    /// is `-05:30`.
    pub fn from_hours_minutes(hours: i64, minutes: i64) -> TimeZone {
        TimeZone::new(hours * 3_600 + minutes * 60, false)
    }

    /// Offset east of UTC in seconds.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn is_dst(&self) -> bool {
        self.is_dst
    }

    /// Whether the offset is zero, regardless of the dst flag.
    pub fn is_utc(&self) -> bool {
        self.offset == 0
    }

    /// The same offset with a different dst flag.
    pub fn with_dst(self, is_dst: bool) -> TimeZone {
        TimeZone { is_dst, ..self }
    }

    /// Parses `Z`, `±hh`, `±hh:mm` or `±hhmm`. Parsed zones are never dst.
    pub fn parse(text: &str) -> Result<TimeZone> {
        iso8601::parse_offset(text).map(|offset| TimeZone::new(i64::from(offset), false))
    }

    /// Zone for a parsed offset; text without an offset is read as UTC.
    pub(crate) fn from_parsed(offset: Option<i32>) -> TimeZone {
        offset.map_or(TimeZone::UTC, |seconds| TimeZone::new(i64::from(seconds), false))
    }

    pub fn format_with(&self, options: &FormatOptions) -> String {
        iso8601::format_offset(self.offset, options)
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(&FormatOptions::default()))
    }
}

impl FromStr for TimeZone {
    type Err = crate::CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        TimeZone::parse(s)
    }
}
