//! Error types for datetime-engine operations.

use std::fmt;

use thiserror::Error;

/// The ISO-8601 construct a parse was attempting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
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

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Construct::Year => "year",
            Construct::YearMonth => "year-month",
            Construct::Date => "date",
            Construct::Time => "time",
            Construct::DateTime => "date-time",
            Construct::TimeZone => "time zone",
            Construct::Duration => "duration",
            Construct::Period => "period",
            Construct::Interval => "interval",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// A value that is structurally impossible, e.g. month 13 or day name 0.
    #[error("Domain error: {0}")]
    Domain(String),

    /// Malformed ISO-8601 text.
    #[error("Invalid ISO-8601 {construct} {input:?}: {reason}")]
    Parse {
        construct: Construct,
        input: String,
        reason: String,
    },

    /// A value rejected before it could be constructed, e.g. an interval
    /// whose start lies after its end.
    #[error("Construction error: {0}")]
    Construction(String),
}

impl CalendarError {
    pub(crate) fn parse(construct: Construct, input: &str, reason: impl Into<String>) -> Self {
        CalendarError::Parse {
            construct,
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalendarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_construct_and_input() {
        let err = CalendarError::parse(Construct::Duration, "P1Y1MT", "trailing 'T'");
        assert_eq!(
            err.to_string(),
            "Invalid ISO-8601 duration \"P1Y1MT\": trailing 'T'"
        );
    }

    #[test]
    fn domain_error_message() {
        let err = CalendarError::Domain("invalid month: 13 (must be 1..=12)".into());
        assert_eq!(
            err.to_string(),
            "Domain error: invalid month: 13 (must be 1..=12)"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CalendarError>();
    }
}
