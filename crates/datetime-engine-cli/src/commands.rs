//! Subcommand implementations. Each returns the text to print.

use anyhow::{Context, Result};
use datetime_engine::calendar::day_name;
use datetime_engine::iso8601::{self, FormatOptions, Layout};
use datetime_engine::{
    Clock, Date, DateTime, Duration, Interval, Period, SystemClock, TimeOfDay, TimePoint,
    TimeZone, Unit,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{
    ConvertArgs, DiffArgs, IterArgs, Kind, NowArgs, ParseArgs, SpanArgs, WeekArgs,
};

/// JSON shape for a parsed interval.
#[derive(Serialize)]
struct IntervalDump {
    start: String,
    end: String,
    seconds: i64,
}

/// JSON shape for `week`.
#[derive(Serialize)]
struct WeekDump {
    iso_year: i64,
    week: u8,
    weekday: u8,
    day_name: &'static str,
}

pub fn parse(args: &ParseArgs, options: &FormatOptions) -> Result<String> {
    let text = args.text.as_str();
    debug!(kind = ?args.kind, text, json = args.json, "parsing");
    if args.json {
        return parse_json(args.kind, text);
    }
    let out = match args.kind {
        Kind::Year => iso8601::format_year(iso8601::parse_year(text)?),
        Kind::YearMonth => {
            let (year, month) = iso8601::parse_year_month(text)?;
            iso8601::format_year_month(year, month, options)
        }
        Kind::Date => Date::parse(text)?.format_with(options),
        Kind::Time => TimeOfDay::parse(text)?.format_with(options),
        Kind::DateTime => DateTime::parse(text)?.format_with(options),
        Kind::TimeZone => TimeZone::parse(text)?.format_with(options),
        Kind::Duration => Duration::parse(text)?.to_iso8601(),
        Kind::Period => Period::parse(text)?.to_iso8601(),
        Kind::Interval => match parse_interval(text)? {
            AnyInterval::DateTimes(i) => {
                format!("{}/{}", i.start().format_with(options), i.end().format_with(options))
            }
            AnyInterval::Dates(i) => {
                format!("{}/{}", i.start().format_with(options), i.end().format_with(options))
            }
        },
    };
    Ok(out)
}

fn parse_json(kind: Kind, text: &str) -> Result<String> {
    let value = match kind {
        Kind::Year => serde_json::json!({ "year": iso8601::parse_year(text)? }),
        Kind::YearMonth => {
            let (year, month) = iso8601::parse_year_month(text)?;
            serde_json::json!({ "year": year, "month": month })
        }
        Kind::Date => serde_json::to_value(iso8601::parse_date(text)?)?,
        Kind::Time => serde_json::to_value(iso8601::parse_time(text)?)?,
        Kind::DateTime => serde_json::to_value(iso8601::parse_date_time(text)?)?,
        Kind::TimeZone => serde_json::json!({ "offset": iso8601::parse_offset(text)? }),
        Kind::Duration => {
            // Same designator rules as the text form: no years or months.
            Duration::parse(text)?;
            serde_json::to_value(iso8601::parse_duration(text)?)?
        }
        Kind::Period => serde_json::to_value(iso8601::parse_duration(text)?)?,
        Kind::Interval => {
            let dump = match parse_interval(text)? {
                AnyInterval::DateTimes(i) => IntervalDump {
                    start: i.start().to_string(),
                    end: i.end().to_string(),
                    seconds: i.duration().total_seconds(),
                },
                AnyInterval::Dates(i) => IntervalDump {
                    start: i.start().to_string(),
                    end: i.end().to_string(),
                    seconds: i.duration().total_seconds(),
                },
            };
            serde_json::to_value(dump)?
        }
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn add(args: &SpanArgs, options: &FormatOptions) -> Result<String> {
    let (dt, span) = parse_span_args(args)?;
    let result = dt
        .checked_add(span)
        .with_context(|| format!("cannot add {span} to {dt}"))?;
    Ok(result.format_with(options))
}

pub fn sub(args: &SpanArgs, options: &FormatOptions) -> Result<String> {
    let (dt, span) = parse_span_args(args)?;
    let result = dt
        .checked_sub(span)
        .with_context(|| format!("cannot subtract {span} from {dt}"))?;
    Ok(result.format_with(options))
}

fn parse_span_args(args: &SpanArgs) -> Result<(DateTime, Period)> {
    let dt = DateTime::parse(&args.date_time).context("invalid date-time")?;
    let span = Period::parse(&args.span).context("invalid duration")?;
    Ok((dt, span))
}

pub fn diff(args: &DiffArgs) -> Result<String> {
    let from = DateTime::parse(&args.from).context("invalid start date-time")?;
    let to = DateTime::parse(&args.to).context("invalid end date-time")?;
    Ok(to.difference_in_seconds(&from).to_string())
}

pub fn iter(args: &IterArgs, options: &FormatOptions) -> Result<String> {
    let limit = args.limit.unwrap_or(usize::MAX);
    let lines: Vec<String> = match parse_interval(&args.interval)? {
        AnyInterval::DateTimes(i) => step(i, args.by, limit, options),
        AnyInterval::Dates(i) => step(i, args.by, limit, options),
    };
    info!(count = lines.len(), unit = ?args.by, "iterated interval");
    Ok(lines.join("\n"))
}

fn step<T: TimePoint + Formattable>(
    interval: Interval<T>,
    unit: Unit,
    limit: usize,
    options: &FormatOptions,
) -> Vec<String> {
    interval
        .iter_by(unit)
        .take(limit)
        .map(|point| point.format(options))
        .collect()
}

pub fn week(args: &WeekArgs, options: &FormatOptions) -> Result<String> {
    let date = Date::parse(&args.date).context("invalid date")?;
    let (iso_year, week, weekday) = date.iso_week_date();
    let name = day_name(weekday)?;
    if args.json {
        let dump = WeekDump {
            iso_year,
            week,
            weekday,
            day_name: name,
        };
        return Ok(serde_json::to_string_pretty(&dump)?);
    }
    let week_date = match options.layout {
        Layout::Extended => format!("{iso_year:04}-W{week:02}-{weekday}"),
        Layout::Basic => format!("{iso_year:04}W{week:02}{weekday}"),
    };
    Ok(format!("{week_date} {name}"))
}

pub fn convert(args: &ConvertArgs, options: &FormatOptions) -> Result<String> {
    let dt = DateTime::parse(&args.date_time).context("invalid date-time")?;
    let zone = TimeZone::parse(&args.zone).context("invalid zone")?;
    Ok(dt.to_time_zone(zone)?.format_with(options))
}

pub fn now(args: &NowArgs, options: &FormatOptions) -> Result<String> {
    let zone = match &args.zone {
        Some(text) => TimeZone::parse(text).context("invalid zone")?,
        None => TimeZone::UTC,
    };
    Ok(SystemClock.now(zone)?.format_with(options))
}

/// An interval whose end points are either date-times or plain dates.
enum AnyInterval {
    DateTimes(Interval<DateTime>),
    Dates(Interval<Date>),
}

/// Reads end points as date-times when they have a time part, otherwise
/// as dates.
fn parse_interval(text: &str) -> Result<AnyInterval> {
    let has_time = text
        .split('/')
        .any(|half| !half.starts_with('P') && (half.contains('T') || half.contains(' ')));
    let parsed = if has_time {
        Interval::parse(text).map(AnyInterval::DateTimes)
    } else {
        Interval::parse(text).map(AnyInterval::Dates)
    };
    parsed.with_context(|| format!("invalid interval {text:?}"))
}

/// Uniform `format_with` over the point types.
trait Formattable {
    fn format(&self, options: &FormatOptions) -> String;
}

impl Formattable for DateTime {
    fn format(&self, options: &FormatOptions) -> String {
        self.format_with(options)
    }
}

impl Formattable for Date {
    fn format(&self, options: &FormatOptions) -> String {
        self.format_with(options)
    }
}
