//! # datetime-engine
//!
//! Calendar-correct date and time values with fixed-offset zones.
//!
//! Out-of-range fields are never rejected: `2013-01-32` is 2013-02-01 and
//! `10:25:70` is 10:26:10. Every value is normalized once at construction
//! by carrying overflow into the next larger unit, and arithmetic is done
//! on wall-clock fields followed by the same normalization. That is why
//! adding one month to January 31st lands on March 3rd (or 2nd in a leap
//! year) instead of being clamped to the end of February.
//!
//! ## Modules
//!
//! - [`normalize`] — Carry/borrow resolution for date and time fields
//! - [`calendar`] — Leap years, month lengths, weekdays, ISO weeks, English names
//! - [`iso8601`] — ISO-8601 parsing and formatting (basic and extended layouts)
//! - [`Date`], [`TimeOfDay`], [`DateTime`] — Time points, ordered by instant
//! - [`TimeZone`] — Fixed UTC offset with a dst flag
//! - [`Duration`], [`Period`] — Exact and calendar-relative spans
//! - [`TimeSpan`] — Resolving a span against an anchor point
//! - [`Interval`] — Half-open ranges with per-unit iteration
//! - [`Clock`] — Injectable source of the current time
//! - [`error`] — Error types
//!
//! ## Features
//!
//! - `chrono` — `SystemClock`, and conversions between [`DateTime`] and
//!   `chrono::DateTime<FixedOffset>`.

pub mod calendar;
pub mod error;
pub mod iso8601;
pub mod normalize;

mod clock;
mod date;
mod datetime;
mod duration;
mod interval;
mod period;
mod point;
mod span;
mod time;
mod zone;

pub use calendar::WeekStartDay;
#[cfg(feature = "chrono")]
pub use clock::SystemClock;
pub use clock::{Clock, FixedClock};
pub use date::Date;
pub use datetime::DateTime;
pub use duration::Duration;
pub use error::{CalendarError, Construct, Result};
pub use interval::{Interval, IntervalIter, Unit};
pub use iso8601::{FormatOptions, Layout};
pub use period::Period;
pub use point::{compare, TimePoint, MAX_YEAR, MIN_YEAR};
pub use span::TimeSpan;
pub use time::TimeOfDay;
pub use zone::TimeZone;
