//! ISO-8601 text codec.
//!
//! Parsing turns text into plain field records ([`DateFields`],
//! [`TimeFields`], [`DurationFields`], ...) which the value types then
//! normalize. Each construct accepts an extended layout (with `-` and `:`
//! separators) and a basic layout (without); the extended layout is always
//! tried first.
//!
//! Formatting is the inverse and is driven by an explicit [`FormatOptions`]
//! value passed per call.

mod format;
mod parse;

use serde::Serialize;

pub use format::{
    format_date, format_date_time, format_duration, format_offset, format_seconds_duration,
    format_time, format_year, format_year_month,
};
pub use parse::{
    parse_date, parse_date_time, parse_duration, parse_interval, parse_offset, parse_time,
    parse_year, parse_year_month,
};

/// Number of fractional-second digits retained by the parser (microseconds).
pub const FRACTION_DIGITS: usize = 6;

// ── Parsed field records ────────────────────────────────────────────────────

/// A parsed calendar date with an optional UTC offset in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateFields {
    pub year: i64,
    pub month: u8,
    pub day: u8,
    pub offset: Option<i32>,
}

/// A parsed time of day with an optional UTC offset in seconds.
///
/// `microsecond` holds the fractional seconds, right-padded or truncated
/// to [`FRACTION_DIGITS`] digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeFields {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub microsecond: u32,
    pub offset: Option<i32>,
}

/// A parsed date-time. The offset, if any, is carried on `time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateTimeFields {
    pub date: DateFields,
    pub time: TimeFields,
}

/// A parsed duration.
///
/// Weeks are kept separate from days here; callers fold them in as
/// `days + 7 * weeks`. `negative` records a leading `-`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DurationFields {
    pub negative: bool,
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub microsecond: u32,
}

impl DurationFields {
    /// Applies the leading sign to a component.
    pub fn signed(&self, value: i64) -> i64 {
        if self.negative {
            -value
        } else {
            value
        }
    }
}

/// The two halves of an interval expression.
///
/// Points are returned as raw text so the caller can parse them as
/// whatever point type the interval holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalParts<'a> {
    /// `<start>/<end>`
    Range(&'a str, &'a str),
    /// `<start>/<duration>`
    StartDuration(&'a str, DurationFields),
    /// `<duration>/<end>`
    DurationEnd(DurationFields, &'a str),
}

// ── Formatting configuration ────────────────────────────────────────────────

/// Separator style used when formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Layout {
    /// `2013-01-31T10:20:30+02:00`
    #[default]
    Extended,
    /// `20130131T102030+0200`
    Basic,
}

/// Options controlling ISO-8601 output.
///
/// Passed explicitly to every `format_with` call; `Display` impls use
/// [`FormatOptions::default()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatOptions {
    pub layout: Layout,
    /// Character between the date and time of a date-time, `'T'` or `' '`.
    pub date_time_separator: char,
    /// Write a zero offset as `Z` rather than `+00:00`.
    pub utc_as_z: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            layout: Layout::Extended,
            date_time_separator: 'T',
            utc_as_z: true,
        }
    }
}

impl FormatOptions {
    /// Basic layout with the other options at their defaults.
    pub fn basic() -> Self {
        FormatOptions {
            layout: Layout::Basic,
            ..FormatOptions::default()
        }
    }
}
