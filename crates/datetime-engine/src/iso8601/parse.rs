//! Fixed-format ISO-8601 grammars.

use tracing::trace;

use super::{
    DateFields, DateTimeFields, DurationFields, IntervalParts, TimeFields, FRACTION_DIGITS,
};
use crate::calendar::month_length;
use crate::error::{CalendarError, Construct, Result};

const DATE_DESIGNATORS: [u8; 4] = [b'Y', b'M', b'W', b'D'];
const TIME_DESIGNATORS: [u8; 3] = [b'H', b'M', b'S'];

// ── Public entry points ─────────────────────────────────────────────────────

/// Parses a four-digit year, `YYYY`.
pub fn parse_year(text: &str) -> Result<i64> {
    let mut s = Scanner::new(text);
    let year = s
        .digits(4)
        .ok_or_else(|| fail(Construct::Year, text, "expected YYYY"))?;
    s.expect_end(Construct::Year, text)?;
    Ok(year)
}

/// Parses a year and month, `YYYY-MM` or `YYYYMM`.
pub fn parse_year_month(text: &str) -> Result<(i64, u8)> {
    let construct = Construct::YearMonth;
    let mut s = Scanner::new(text);
    let (year, month) = s
        .attempt(|t| {
            let year = t.digits(4)?;
            t.eat(b'-').then_some(())?;
            Some((year, t.digits(2)?))
        })
        .or_else(|| s.attempt(|t| Some((t.digits(4)?, t.digits(2)?))))
        .ok_or_else(|| fail(construct, text, "expected YYYY-MM or YYYYMM"))?;
    s.expect_end(construct, text)?;
    let (month, _) = check_date(construct, text, year, month, 1)?;
    Ok((year, month))
}

/// Parses a calendar date with an optional offset, `YYYY-MM-DD[tz]` or
/// `YYYYMMDD[tz]`.
///
/// ```
/// use datetime_engine::iso8601::parse_date;
///
/// let fields = parse_date("2013-01-31+02:00").unwrap();
/// assert_eq!((fields.year, fields.month, fields.day), (2013, 1, 31));
/// assert_eq!(fields.offset, Some(7200));
/// assert_eq!(parse_date("20130131").unwrap().offset, None);
/// ```
pub fn parse_date(text: &str) -> Result<DateFields> {
    let construct = Construct::Date;
    let mut s = Scanner::new(text);
    let (year, month, day) = s
        .scan_date()
        .ok_or_else(|| fail(construct, text, "expected YYYY-MM-DD or YYYYMMDD"))?;
    let offset = s.scan_offset(construct, text)?;
    s.expect_end(construct, text)?;
    let (month, day) = check_date(construct, text, year, month, day)?;
    Ok(DateFields {
        year,
        month,
        day,
        offset,
    })
}

/// Parses a time of day, `hh:mm:ss[.frac][tz]` or `hhmmss[.frac][tz]`.
pub fn parse_time(text: &str) -> Result<TimeFields> {
    let construct = Construct::Time;
    let mut s = Scanner::new(text);
    let time = s.scan_full_time(construct, text)?;
    s.expect_end(construct, text)?;
    Ok(time)
}

/// Parses a date-time: a date, `T` or a space, then a time.
pub fn parse_date_time(text: &str) -> Result<DateTimeFields> {
    let construct = Construct::DateTime;
    let mut s = Scanner::new(text);
    let (year, month, day) = s
        .scan_date()
        .ok_or_else(|| fail(construct, text, "expected YYYY-MM-DD or YYYYMMDD"))?;
    if !(s.eat(b'T') || s.eat(b' ')) {
        return Err(fail(
            construct,
            text,
            "expected 'T' or ' ' between date and time",
        ));
    }
    let time = s.scan_full_time(construct, text)?;
    s.expect_end(construct, text)?;
    let (month, day) = check_date(construct, text, year, month, day)?;
    Ok(DateTimeFields {
        date: DateFields {
            year,
            month,
            day,
            offset: None,
        },
        time,
    })
}

/// Parses a UTC offset, returning signed seconds.
///
/// Accepts `Z`, `±hh`, `±hh:mm` and `±hhmm`. A negative zero offset
/// (`-00`, `-00:00`) is accepted as UTC.
///
/// ```
/// use datetime_engine::iso8601::parse_offset;
///
/// assert_eq!(parse_offset("Z").unwrap(), 0);
/// assert_eq!(parse_offset("-05:30").unwrap(), -19_800);
/// assert_eq!(parse_offset("-00").unwrap(), 0);
/// ```
pub fn parse_offset(text: &str) -> Result<i32> {
    let construct = Construct::TimeZone;
    let mut s = Scanner::new(text);
    let offset = s
        .scan_offset(construct, text)?
        .ok_or_else(|| fail(construct, text, "expected 'Z' or ±hh[[:]mm]"))?;
    s.expect_end(construct, text)?;
    Ok(offset)
}

/// Parses a duration.
///
/// Three forms are accepted:
///
/// - designated, `PnYnMnDTnHnMnS`, with any subset of components;
/// - weeks, `PnW`;
/// - date-time-like, `PYYYY-MM-DDThh:mm:ss` or `PYYYYMMDDThhmmss`, whose
///   fields are range-checked.
///
/// `P`, `PT` and a trailing `T` with no time components are rejected. A
/// leading `-` negates the whole duration.
///
/// ```
/// use datetime_engine::iso8601::parse_duration;
///
/// let fields = parse_duration("P1Y2M3DT4H5M6S").unwrap();
/// assert_eq!((fields.years, fields.months, fields.days), (1, 2, 3));
/// assert_eq!(parse_duration("P2W").unwrap().weeks, 2);
/// assert!(parse_duration("P1Y1MT").is_err());
/// ```
pub fn parse_duration(text: &str) -> Result<DurationFields> {
    let construct = Construct::Duration;
    let mut s = Scanner::new(text);
    let negative = s.eat(b'-');
    if !s.eat(b'P') {
        return Err(fail(construct, text, "expected leading 'P'"));
    }
    if s.is_done() {
        return Err(fail(construct, text, "no components after 'P'"));
    }
    let mut fields = if s.is_alternative_duration() {
        s.scan_alternative_duration(text)?
    } else {
        s.scan_designated_duration(text)?
    };
    fields.negative = negative;
    Ok(fields)
}

/// Splits an interval expression into its two halves.
///
/// A half beginning with `P` is parsed as a duration; the point halves are
/// returned unparsed.
pub fn parse_interval(text: &str) -> Result<IntervalParts<'_>> {
    let construct = Construct::Interval;
    if text.is_empty() {
        return Err(fail(construct, text, "empty input"));
    }
    let Some((first, second)) = text.split_once('/') else {
        let reason = if text.starts_with('P') {
            "a duration alone is not an interval"
        } else {
            "expected '/' between start and end"
        };
        return Err(fail(construct, text, reason));
    };
    if first.is_empty() || second.is_empty() {
        return Err(fail(construct, text, "both sides of '/' are required"));
    }
    if second.contains('/') {
        return Err(fail(construct, text, "more than one '/'"));
    }
    match (first.starts_with('P'), second.starts_with('P')) {
        (true, true) => Err(fail(construct, text, "both sides are durations")),
        (true, false) => Ok(IntervalParts::DurationEnd(parse_duration(first)?, second)),
        (false, true) => Ok(IntervalParts::StartDuration(first, parse_duration(second)?)),
        (false, false) => Ok(IntervalParts::Range(first, second)),
    }
}

// ── Scanner ─────────────────────────────────────────────────────────────────

/// A cursor over ASCII input. Only ever advances over ASCII bytes, so
/// `pos` always lies on a char boundary.
#[derive(Debug, Clone, Copy)]
struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Scanner { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn is_done(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Runs `f` on a copy of the scanner and commits its position only if
    /// it succeeds.
    fn attempt<T>(&mut self, f: impl FnOnce(&mut Scanner<'a>) -> Option<T>) -> Option<T> {
        let mut trial = *self;
        let value = f(&mut trial)?;
        *self = trial;
        Some(value)
    }

    /// Exactly `n` ASCII digits.
    fn digits(&mut self, n: usize) -> Option<i64> {
        let bytes = self.text.as_bytes().get(self.pos..self.pos + n)?;
        if !bytes.iter().all(u8::is_ascii_digit) {
            return None;
        }
        self.pos += n;
        Some(bytes.iter().fold(0, |acc, b| acc * 10 + i64::from(b - b'0')))
    }

    /// One or more ASCII digits, as text.
    fn digit_run(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        &self.text[start..self.pos]
    }

    fn expect_end(&self, construct: Construct, text: &str) -> Result<()> {
        if self.is_done() {
            Ok(())
        } else {
            Err(fail(
                construct,
                text,
                format!("unexpected trailing text {:?}", self.rest()),
            ))
        }
    }

    // ── Dates and times ──

    fn scan_date(&mut self) -> Option<(i64, i64, i64)> {
        self.attempt(|t| {
            let year = t.digits(4)?;
            t.eat(b'-').then_some(())?;
            let month = t.digits(2)?;
            t.eat(b'-').then_some(())?;
            Some((year, month, t.digits(2)?))
        })
        .or_else(|| {
            trace!(input = self.text, "extended date layout did not match, trying basic");
            self.attempt(|t| Some((t.digits(4)?, t.digits(2)?, t.digits(2)?)))
        })
    }

    fn scan_time(&mut self) -> Option<(i64, i64, i64)> {
        self.attempt(|t| {
            let hour = t.digits(2)?;
            t.eat(b':').then_some(())?;
            let minute = t.digits(2)?;
            t.eat(b':').then_some(())?;
            Some((hour, minute, t.digits(2)?))
        })
        .or_else(|| {
            trace!(input = self.text, "extended time layout did not match, trying basic");
            self.attempt(|t| Some((t.digits(2)?, t.digits(2)?, t.digits(2)?)))
        })
    }

    /// A `.` or `,` followed by digits, padded or truncated to microseconds.
    fn scan_fraction(&mut self) -> Option<u32> {
        self.attempt(|t| {
            if !(t.eat(b'.') || t.eat(b',')) {
                return None;
            }
            let digits = t.digit_run();
            if digits.is_empty() {
                return None;
            }
            let micros = digits
                .bytes()
                .chain(std::iter::repeat(b'0'))
                .take(FRACTION_DIGITS)
                .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
            Some(micros)
        })
    }

    /// Time, optional fraction and optional offset, validated.
    fn scan_full_time(&mut self, construct: Construct, text: &str) -> Result<TimeFields> {
        let (hour, minute, second) = self
            .scan_time()
            .ok_or_else(|| fail(construct, text, "expected hh:mm:ss or hhmmss"))?;
        let microsecond = self.scan_fraction().unwrap_or(0);
        let offset = self.scan_offset(construct, text)?;
        let (hour, minute, second) = check_time(construct, text, hour, minute, second)?;
        Ok(TimeFields {
            hour,
            minute,
            second,
            microsecond,
            offset,
        })
    }

    /// An optional `Z` or `±hh[[:]mm]` suffix.
    fn scan_offset(&mut self, construct: Construct, text: &str) -> Result<Option<i32>> {
        let negative = match self.peek() {
            Some(b'Z') => {
                self.pos += 1;
                return Ok(Some(0));
            }
            Some(b'+') => false,
            Some(b'-') => true,
            _ => return Ok(None),
        };
        self.pos += 1;
        let hours = self
            .digits(2)
            .ok_or_else(|| fail(construct, text, "expected two-digit offset hours"))?;
        let minutes = if self.eat(b':') {
            self.digits(2)
                .ok_or_else(|| fail(construct, text, "expected two-digit offset minutes"))?
        } else {
            self.digits(2).unwrap_or(0)
        };
        if hours > 23 || minutes > 59 {
            return Err(fail(
                construct,
                text,
                format!("offset {hours:02}:{minutes:02} out of range"),
            ));
        }
        let magnitude = (hours * 3_600 + minutes * 60) as i32;
        Ok(Some(if negative { -magnitude } else { magnitude }))
    }

    // ── Durations ──

    /// `P` followed by `YYYY-` or by exactly eight digits and then `T` or
    /// the end of input.
    fn is_alternative_duration(&self) -> bool {
        let rest = self.rest().as_bytes();
        let run = rest.iter().take_while(|b| b.is_ascii_digit()).count();
        match rest.get(run) {
            Some(b'-') => run == 4,
            None | Some(b'T') => run == 8,
            _ => false,
        }
    }

    fn scan_alternative_duration(&mut self, text: &str) -> Result<DurationFields> {
        let construct = Construct::Duration;
        let (years, months, days) = self.scan_date().ok_or_else(|| {
            fail(construct, text, "expected YYYY-MM-DD or YYYYMMDD after 'P'")
        })?;
        let mut fields = DurationFields {
            years,
            months,
            days,
            ..DurationFields::default()
        };
        if self.eat(b'T') {
            if self.is_done() {
                return Err(fail(construct, text, "trailing 'T' without time fields"));
            }
            (fields.hours, fields.minutes, fields.seconds) = self
                .scan_time()
                .ok_or_else(|| fail(construct, text, "expected hh:mm:ss or hhmmss after 'T'"))?;
            fields.microsecond = self.scan_fraction().unwrap_or(0);
        }
        self.expect_end(construct, text)?;

        let limits = [
            ("months", fields.months, 12),
            ("days", fields.days, 31),
            ("hours", fields.hours, 24),
            ("minutes", fields.minutes, 59),
            ("seconds", fields.seconds, 59),
        ];
        for (name, value, max) in limits {
            if value > max {
                return Err(fail(
                    construct,
                    text,
                    format!("{name} value {value} exceeds {max}"),
                ));
            }
        }
        Ok(fields)
    }

    fn scan_designated_duration(&mut self, text: &str) -> Result<DurationFields> {
        let construct = Construct::Duration;
        let mut fields = DurationFields::default();
        let mut components = 0;
        let mut next_allowed = 0;
        let mut in_time = false;
        let mut saw_fraction = false;
        let mut saw_weeks = false;

        while !self.is_done() {
            if self.eat(b'T') {
                if in_time {
                    return Err(fail(construct, text, "repeated 'T'"));
                }
                if self.is_done() {
                    return Err(fail(construct, text, "trailing 'T' without time fields"));
                }
                in_time = true;
                next_allowed = 0;
                continue;
            }
            if saw_fraction {
                return Err(fail(
                    construct,
                    text,
                    "only the last component may have a fraction",
                ));
            }

            let value = self.scan_signed_number(text)?;
            let fraction = self.scan_fraction();
            let designator = self
                .peek()
                .ok_or_else(|| fail(construct, text, "missing designator after number"))?;
            let table: &[u8] = if in_time {
                &TIME_DESIGNATORS
            } else {
                &DATE_DESIGNATORS
            };
            let index = table
                .iter()
                .position(|d| *d == designator)
                .ok_or_else(|| {
                    fail(
                        construct,
                        text,
                        format!("unexpected designator {:?}", char::from(designator)),
                    )
                })?;
            if index < next_allowed {
                return Err(fail(construct, text, "designators out of order"));
            }
            self.pos += 1;
            next_allowed = index + 1;

            if let Some(micros) = fraction {
                if !(in_time && designator == b'S') {
                    return Err(fail(
                        construct,
                        text,
                        "fractions are only supported on seconds",
                    ));
                }
                fields.microsecond = micros;
                saw_fraction = true;
            }
            match (in_time, designator) {
                (false, b'Y') => fields.years = value,
                (false, b'M') => fields.months = value,
                (false, b'W') => {
                    fields.weeks = value;
                    saw_weeks = true;
                }
                (false, _) => fields.days = value,
                (true, b'H') => fields.hours = value,
                (true, b'M') => fields.minutes = value,
                (true, _) => fields.seconds = value,
            }
            components += 1;
        }

        if components == 0 {
            return Err(fail(construct, text, "no duration components"));
        }
        if saw_weeks && components > 1 {
            return Err(fail(
                construct,
                text,
                "weeks cannot be combined with other components",
            ));
        }
        Ok(fields)
    }

    /// An optionally negative integer of at least one digit.
    fn scan_signed_number(&mut self, text: &str) -> Result<i64> {
        let negative = self.eat(b'-');
        let digits = self.digit_run();
        if digits.is_empty() {
            return Err(fail(Construct::Duration, text, "expected a number"));
        }
        let value: i64 = digits.parse().map_err(|_| {
            fail(
                Construct::Duration,
                text,
                format!("number {digits} is too large"),
            )
        })?;
        Ok(if negative { -value } else { value })
    }
}

// ── Validation ──────────────────────────────────────────────────────────────

fn check_date(
    construct: Construct,
    text: &str,
    year: i64,
    month: i64,
    day: i64,
) -> Result<(u8, u8)> {
    if !(1..=12).contains(&month) {
        return Err(fail(
            construct,
            text,
            format!("month {month} out of range 1..=12"),
        ));
    }
    let max_day = month_length(year, month as u8);
    if !(1..=i64::from(max_day)).contains(&day) {
        return Err(fail(
            construct,
            text,
            format!("day {day} out of range 1..={max_day} for {year:04}-{month:02}"),
        ));
    }
    Ok((month as u8, day as u8))
}

fn check_time(
    construct: Construct,
    text: &str,
    hour: i64,
    minute: i64,
    second: i64,
) -> Result<(u8, u8, u8)> {
    if hour > 23 || minute > 59 || second > 59 {
        return Err(fail(
            construct,
            text,
            format!("time {hour:02}:{minute:02}:{second:02} out of range"),
        ));
    }
    Ok((hour as u8, minute as u8, second as u8))
}

fn fail(construct: Construct, text: &str, reason: impl Into<String>) -> CalendarError {
    let err = CalendarError::parse(construct, text, reason);
    trace!(%err, "ISO-8601 parse failed");
    err
}

// ── Tests ───────────────────────────────────────────────────────────────────
