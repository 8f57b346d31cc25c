//! Carry/borrow resolution for out-of-range date and time fields.
//!
//! Fields are folded into the next larger unit with floor division, so
//! negative inputs borrow correctly: `second = -10` becomes one minute less
//! and `second = 50`.

use crate::calendar::{month_length, DAYS_PER_400_YEARS};

/// Folds `value` into `[min, min + range)`, returning the folded value and
/// the number of whole ranges carried out of it.
///
/// Works in `i128` so that carrying out of an extreme `i64` field cannot
/// overflow.
fn fold(value: i128, min: i128, range: i128) -> (i128, i128) {
    let shifted = value - min;
    (shifted.rem_euclid(range) + min, shifted.div_euclid(range))
}

/// Narrows an unbounded result (a year or a day carry) back to `i64`,
/// saturating at the bounds.
fn saturate(value: i128) -> i64 {
    value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Normalizes a time of day, carrying overflow into `day`.
///
/// Returns `(hour, minute, second, day)` with hour in `0..24` and minute and
/// second in `0..60`. A day carry beyond the `i64` range saturates.
///
/// ```
/// use datetime_engine::normalize::normalize_time;
///
/// assert_eq!(normalize_time(10, 25, 70, 0), (10, 26, 10, 0));
/// assert_eq!(normalize_time(-10, 25, 13, 0), (14, 25, 13, -1));
/// ```
pub fn normalize_time(hour: i64, minute: i64, second: i64, day: i64) -> (i64, i64, i64, i64) {
    let (hour, minute, second, day) = fold_time(hour, minute, second, day);
    (hour as i64, minute as i64, second as i64, saturate(day))
}

/// Normalizes a calendar date.
///
/// Months are folded into years first. Days are then borrowed from or
/// carried into neighbouring months one month at a time, re-reading the
/// month length after every step since it changes across February and leap
/// years. A year beyond the `i64` range saturates.
///
/// ```
/// use datetime_engine::normalize::normalize_date;
///
/// assert_eq!(normalize_date(2012, 6, 31), (2012, 7, 1));
/// assert_eq!(normalize_date(2012, 0, 0), (2011, 11, 30));
/// ```
pub fn normalize_date(year: i64, month: i64, day: i64) -> (i64, i64, i64) {
    let (year, month, day) = fold_date(year.into(), month.into(), day.into());
    (saturate(year), month as i64, day as i64)
}

/// Normalizes all six fields of a date-time.
///
/// Time fields are resolved first and their day carry is added to `day`
/// before the date is normalized.
pub fn normalize_date_time(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
) -> (i64, i64, i64, i64, i64, i64) {
    let (hour, minute, second, day) = fold_time(hour, minute, second, day);
    let (year, month, day) = fold_date(year.into(), month.into(), day);
    (
        saturate(year),
        month as i64,
        day as i64,
        hour as i64,
        minute as i64,
        second as i64,
    )
}

fn fold_time(hour: i64, minute: i64, second: i64, day: i64) -> (i128, i128, i128, i128) {
    let (second, carry) = fold(second.into(), 0, 60);
    let (minute, carry) = fold(i128::from(minute) + carry, 0, 60);
    let (hour, carry) = fold(i128::from(hour) + carry, 0, 24);
    (hour, minute, second, i128::from(day) + carry)
}

fn fold_date(year: i128, month: i128, day: i128) -> (i128, i128, i128) {
    let (mut month, carry) = fold(month, 1, 12);
    let mut year = year + carry;
    let mut day = day;

    // Every 400-year span starting from the same month has the same length.
    let days_per_cycle = i128::from(DAYS_PER_400_YEARS);
    let cycles = (day - 1) / days_per_cycle;
    if cycles != 0 {
        day -= cycles * days_per_cycle;
        year += cycles * 400;
    }

    while day < 1 {
        let (m, carry) = fold(month - 1, 1, 12);
        month = m;
        year += carry;
        day += length_of(year, month);
    }
    loop {
        let length = length_of(year, month);
        if day <= length {
            break;
        }
        day -= length;
        let (m, carry) = fold(month + 1, 1, 12);
        month = m;
        year += carry;
    }

    (year, month, day)
}

/// Month length for a widened year; leap years repeat every 400 years.
fn length_of(year: i128, month: i128) -> i128 {
    i128::from(month_length(year.rem_euclid(400) as i64, month as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_carry() {
        assert_eq!(normalize_time(10, 25, 70, 0), (10, 26, 10, 0));
        assert_eq!(normalize_time(25, 0, 0, 0), (1, 0, 0, 1));
        assert_eq!(normalize_time(-10, 25, 13, 0), (14, 25, 13, -1));
    }

    #[test]
    fn test_time_borrow_uses_floor_division() {
        assert_eq!(normalize_time(10, 0, -10, 0), (9, 59, 50, 0));
        assert_eq!(normalize_time(0, 0, -1, 5), (23, 59, 59, 4));
        assert_eq!(normalize_time(0, -61, 0, 0), (22, 59, 0, -1));
    }

    #[test]
    fn test_time_large_values() {
        assert_eq!(normalize_time(0, 0, 86_400 * 3 + 61, 0), (0, 1, 1, 3));
        assert_eq!(normalize_time(48, 0, 0, 1), (0, 0, 0, 3));
    }

    #[test]
    fn test_date_overflow() {
        assert_eq!(normalize_date(2012, 6, 31), (2012, 7, 1));
        assert_eq!(normalize_date(2012, 13, 1), (2013, 1, 1));
        assert_eq!(normalize_date(2012, 0, 0), (2011, 11, 30));
    }

    #[test]
    fn test_date_february_boundaries() {
        assert_eq!(normalize_date(2013, 1, 60), (2013, 3, 1));
        assert_eq!(normalize_date(2012, 1, 60), (2012, 2, 29));
        assert_eq!(normalize_date(2013, 3, 0), (2013, 2, 28));
        assert_eq!(normalize_date(2012, 3, 0), (2012, 2, 29));
    }

    #[test]
    fn test_date_negative_months() {
        assert_eq!(normalize_date(2013, -1, 1), (2012, 11, 1));
        assert_eq!(normalize_date(2013, -12, 1), (2011, 12, 1));
        assert_eq!(normalize_date(2013, 25, 1), (2015, 1, 1));
    }

    #[test]
    fn test_date_large_day_counts() {
        // 146_097 days is exactly 400 years.
        assert_eq!(normalize_date(2000, 1, 1 + 146_097), (2400, 1, 1));
        assert_eq!(normalize_date(2000, 1, 1 - 146_097), (1600, 1, 1));
        assert_eq!(normalize_date(2000, 1, 366), (2000, 12, 31));
        assert_eq!(normalize_date(2000, 1, 367), (2001, 1, 1));
    }

    #[test]
    fn test_date_idempotent_on_valid_input() {
        assert_eq!(normalize_date(2013, 2, 28), (2013, 2, 28));
        assert_eq!(normalize_date(2012, 12, 31), (2012, 12, 31));
    }

    #[test]
    fn test_extreme_fields_do_not_overflow() {
        assert_eq!(normalize_date(i64::MAX, 13, 1), (i64::MAX, 1, 1));
        assert_eq!(normalize_date(i64::MAX - 9_999, 12, 32), (i64::MAX - 9_998, 1, 1));
        assert_eq!(normalize_date(0, i64::MIN, 1).1, 4);
        assert!(normalize_date(2000, 1, i64::MIN).0 < 0);
        assert!(normalize_time(i64::MAX, i64::MAX, i64::MAX, 0).3 > 0);
        assert_eq!(normalize_time(0, 0, -1, i64::MIN), (23, 59, 59, i64::MIN));
        let (year, ..) = normalize_date_time(9_999, 12, i64::MAX, 23, 59, i64::MAX);
        assert!(year > 9_999);
    }

    #[test]
    fn test_date_time_carries_time_into_date() {
        assert_eq!(
            normalize_date_time(2012, 12, 31, 23, 59, 60),
            (2013, 1, 1, 0, 0, 0)
        );
        assert_eq!(
            normalize_date_time(2013, 3, 1, 0, 0, -1),
            (2013, 2, 28, 23, 59, 59)
        );
    }
}
