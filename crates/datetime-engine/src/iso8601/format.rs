//! Fixed-width ISO-8601 output.

use super::{FormatOptions, Layout};
use crate::calendar::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// `YYYY`
pub fn format_year(year: i64) -> String {
    format!("{year:04}")
}

/// `YYYY-MM` or `YYYYMM`.
pub fn format_year_month(year: i64, month: u8, options: &FormatOptions) -> String {
    match options.layout {
        Layout::Extended => format!("{year:04}-{month:02}"),
        Layout::Basic => format!("{year:04}{month:02}"),
    }
}

/// `YYYY-MM-DD` or `YYYYMMDD`.
pub fn format_date(year: i64, month: u8, day: u8, options: &FormatOptions) -> String {
    match options.layout {
        Layout::Extended => format!("{year:04}-{month:02}-{day:02}"),
        Layout::Basic => format!("{year:04}{month:02}{day:02}"),
    }
}

/// `hh:mm:ss` or `hhmmss`.
pub fn format_time(hour: u8, minute: u8, second: u8, options: &FormatOptions) -> String {
    match options.layout {
        Layout::Extended => format!("{hour:02}:{minute:02}:{second:02}"),
        Layout::Basic => format!("{hour:02}{minute:02}{second:02}"),
    }
}

/// Date and time joined by the configured separator.
pub fn format_date_time(
    (year, month, day): (i64, u8, u8),
    (hour, minute, second): (u8, u8, u8),
    options: &FormatOptions,
) -> String {
    format!(
        "{}{}{}",
        format_date(year, month, day, options),
        options.date_time_separator,
        format_time(hour, minute, second, options)
    )
}

/// `Z`, `±hh:mm` or `±hhmm`.
///
/// ```
/// use datetime_engine::iso8601::{format_offset, FormatOptions};
///
/// let options = FormatOptions::default();
/// assert_eq!(format_offset(0, &options), "Z");
/// assert_eq!(format_offset(-19_800, &options), "-05:30");
/// assert_eq!(format_offset(3_600, &FormatOptions::basic()), "+0100");
/// ```
pub fn format_offset(offset: i32, options: &FormatOptions) -> String {
    if offset == 0 && options.utc_as_z {
        return "Z".to_string();
    }
    let sign = if offset < 0 { '-' } else { '+' };
    let magnitude = offset.unsigned_abs();
    let hours = magnitude / 3_600;
    let minutes = magnitude % 3_600 / 60;
    match options.layout {
        Layout::Extended => format!("{sign}{hours:02}:{minutes:02}"),
        Layout::Basic => format!("{sign}{hours:02}{minutes:02}"),
    }
}

/// Formats calendar span components in designated form.
///
/// Zero components are omitted; an all-zero span is written `PT0S`. When
/// no component is positive the span is written with a single leading
/// `-`; mixed signs are written per component.
///
/// ```
/// use datetime_engine::iso8601::format_duration;
///
/// assert_eq!(format_duration([1, 2, 3, 4, 5, 6]), "P1Y2M3DT4H5M6S");
/// assert_eq!(format_duration([0, 0, 0, 0, 0, 0]), "PT0S");
/// assert_eq!(format_duration([0, -1, 0, 0, 0, 0]), "-P1M");
/// ```
pub fn format_duration(components: [i64; 6]) -> String {
    if components.iter().all(|c| *c == 0) {
        return "PT0S".to_string();
    }
    let negative = components.iter().all(|c| *c <= 0);
    let show = |value: i64| {
        if negative {
            value.unsigned_abs().to_string()
        } else {
            value.to_string()
        }
    };

    let [years, months, days, hours, minutes, seconds] = components;
    let mut out = String::from(if negative { "-P" } else { "P" });
    for (value, designator) in [(years, 'Y'), (months, 'M'), (days, 'D')] {
        if value != 0 {
            out.push_str(&show(value));
            out.push(designator);
        }
    }
    if hours != 0 || minutes != 0 || seconds != 0 {
        out.push('T');
        for (value, designator) in [(hours, 'H'), (minutes, 'M'), (seconds, 'S')] {
            if value != 0 {
                out.push_str(&show(value));
                out.push(designator);
            }
        }
    }
    out
}

/// Formats an exact number of seconds as days, hours, minutes and seconds.
pub fn format_seconds_duration(total: i64) -> String {
    let sign = if total < 0 { -1 } else { 1 };
    let magnitude = total.unsigned_abs();
    let day = SECONDS_PER_DAY as u64;
    let hour = SECONDS_PER_HOUR as u64;
    let minute = SECONDS_PER_MINUTE as u64;
    let days = (magnitude / day) as i64;
    let hours = (magnitude % day / hour) as i64;
    let minutes = (magnitude % hour / minute) as i64;
    let seconds = (magnitude % minute) as i64;
    format_duration([
        0,
        0,
        sign * days,
        sign * hours,
        sign * minutes,
        sign * seconds,
    ])
}
