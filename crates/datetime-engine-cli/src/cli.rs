use clap::{Parser, Subcommand, ValueEnum};
use datetime_engine::Unit;

/// Parse, normalize and do arithmetic on ISO-8601 dates and times.
#[derive(Parser)]
#[command(name = "dte", version, about = "ISO-8601 date/time engine")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write output in the basic layout (no `-` or `:` separators).
    #[arg(long, global = true)]
    pub basic: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a value and print its normalized ISO-8601 form.
    Parse(ParseArgs),
    /// Add a duration or period to a date-time.
    Add(SpanArgs),
    /// Subtract a duration or period from a date-time.
    Sub(SpanArgs),
    /// Signed seconds from the first date-time to the second.
    Diff(DiffArgs),
    /// List the points of an interval, one per line.
    Iter(IterArgs),
    /// ISO week date and weekday name of a date.
    Week(WeekArgs),
    /// Express a date-time in another UTC offset.
    Convert(ConvertArgs),
    /// Current date-time from the system clock.
    Now(NowArgs),
}

/// What `parse` should read its input as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Year,
    YearMonth,
    Date,
    Time,
    DateTime,
    TimeZone,
    Duration,
    Period,
    Interval,
}

#[derive(clap::Args)]
pub struct ParseArgs {
    #[arg(value_enum)]
    pub kind: Kind,

    pub text: String,

    /// Dump the parsed fields as JSON instead.
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct SpanArgs {
    pub date_time: String,

    /// ISO-8601 duration, e.g. `P1M` or `PT90S`.
    #[arg(allow_hyphen_values = true)]
    pub span: String,
}

#[derive(clap::Args)]
pub struct DiffArgs {
    pub from: String,
    pub to: String,
}

#[derive(clap::Args)]
pub struct IterArgs {
    /// `<start>/<end>`, `<start>/<duration>` or `<duration>/<end>`.
    pub interval: String,

    /// Step unit: year, month, day, hour, minute or second.
    #[arg(long, default_value = "day", value_parser = parse_unit)]
    pub by: Unit,

    /// Stop after this many points.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(clap::Args)]
pub struct WeekArgs {
    pub date: String,

    /// Print the week date fields as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct ConvertArgs {
    pub date_time: String,

    /// Target offset: `Z`, `±hh`, `±hh:mm` or `±hhmm`.
    #[arg(allow_hyphen_values = true)]
    pub zone: String,
}

#[derive(clap::Args)]
pub struct NowArgs {
    /// Offset to report the time in; defaults to UTC.
    #[arg(long, allow_hyphen_values = true)]
    pub zone: Option<String>,
}

fn parse_unit(s: &str) -> Result<Unit, String> {
    s.parse().map_err(|e: datetime_engine::CalendarError| e.to_string())
}
