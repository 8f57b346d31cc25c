//! Property tests: normalization laws, ISO round trips, and agreement with
//! `chrono` on weekdays, ISO weeks and epoch seconds.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use datetime_engine::calendar::{day_of_week, days_in_month, iso_week_date};
use datetime_engine::normalize::{normalize_date, normalize_date_time, normalize_time};
use datetime_engine::{
    Date, DateTime, Duration, FormatOptions, Period, TimePoint, TimeSpan, TimeZone, WeekStartDay,
};

fn valid_date() -> impl Strategy<Value = (i64, u8, u8)> {
    (1i64..=9_998, 1u8..=12).prop_flat_map(|(y, m)| {
        let days = days_in_month(y, m).unwrap_or(28);
        (Just(y), Just(m), 1u8..=days)
    })
}

fn zone() -> impl Strategy<Value = TimeZone> {
    (-1_439i64..=1_439, any::<bool>()).prop_map(|(minutes, dst)| TimeZone::new(minutes * 60, dst))
}

fn date_time() -> impl Strategy<Value = DateTime> {
    (valid_date(), 0i64..24, 0i64..60, 0i64..60, zone()).prop_map(|((y, mo, d), h, mi, s, z)| {
        DateTime::new(y, i64::from(mo), i64::from(d), h, mi, s, z).unwrap()
    })
}

proptest! {
    #[test]
    fn normalize_time_is_idempotent(h in -1_000i64..1_000, m in -1_000i64..1_000, s in -100_000i64..100_000) {
        let (h1, m1, s1, d1) = normalize_time(h, m, s, 0);
        prop_assert!((0..24).contains(&h1) && (0..60).contains(&m1) && (0..60).contains(&s1));
        prop_assert_eq!(normalize_time(h1, m1, s1, d1), (h1, m1, s1, d1));
        // The total number of seconds is preserved.
        prop_assert_eq!(d1 * 86_400 + h1 * 3_600 + m1 * 60 + s1, h * 3_600 + m * 60 + s);
    }

    #[test]
    fn normalize_date_is_idempotent(y in 1i64..9_000, m in -500i64..500, d in -200_000i64..200_000) {
        let (y1, m1, d1) = normalize_date(y, m, d);
        prop_assert!((1..=12).contains(&m1));
        prop_assert!(d1 >= 1 && d1 <= i64::from(days_in_month(y1, m1 as u8).unwrap()));
        prop_assert_eq!(normalize_date(y1, m1, d1), (y1, m1, d1));
    }

    #[test]
    fn normalize_date_matches_day_arithmetic(((y, m, d), offset) in (valid_date(), -100_000i64..100_000)) {
        let expected = NaiveDate::from_ymd_opt(y as i32, u32::from(m), u32::from(d)).unwrap()
            + chrono::Duration::days(offset);
        let (y1, m1, d1) = normalize_date(y, i64::from(m), i64::from(d) + offset);
        prop_assert_eq!((y1, m1, d1), (i64::from(expected.year()), i64::from(expected.month()), i64::from(expected.day())));
    }

    #[test]
    fn normalize_date_time_carries_once(y in 1i64..9_000, mo in 1i64..=12, d in 1i64..=28, s in -10_000_000i64..10_000_000) {
        let (y1, mo1, d1, h1, mi1, s1) = normalize_date_time(y, mo, d, 0, 0, s);
        prop_assert_eq!(normalize_date_time(y1, mo1, d1, h1, mi1, s1), (y1, mo1, d1, h1, mi1, s1));
    }

    #[test]
    fn day_of_week_agrees_with_chrono((y, m, d) in valid_date()) {
        let native = NaiveDate::from_ymd_opt(y as i32, u32::from(m), u32::from(d)).unwrap();
        prop_assert_eq!(
            u32::from(day_of_week(y, m, d, WeekStartDay::Monday).unwrap()),
            native.weekday().number_from_monday()
        );
        prop_assert_eq!(
            u32::from(day_of_week(y, m, d, WeekStartDay::Sunday).unwrap()),
            native.weekday().num_days_from_sunday()
        );
    }

    #[test]
    fn iso_week_agrees_with_chrono((y, m, d) in valid_date()) {
        let native = NaiveDate::from_ymd_opt(y as i32, u32::from(m), u32::from(d)).unwrap();
        let week = native.iso_week();
        let (iso_year, iso_week, weekday) = iso_week_date(y, m, d).unwrap();
        prop_assert_eq!(iso_year, i64::from(week.year()));
        prop_assert_eq!(u32::from(iso_week), week.week());
        prop_assert_eq!(u32::from(weekday), native.weekday().number_from_monday());
    }

    #[test]
    fn unix_time_agrees_with_chrono(dt in date_time()) {
        let native = NaiveDate::from_ymd_opt(dt.year() as i32, u32::from(dt.month()), u32::from(dt.day()))
            .unwrap()
            .and_hms_opt(u32::from(dt.hour()), u32::from(dt.minute()), u32::from(dt.second()))
            .unwrap();
        let expected = native.and_utc().timestamp() - i64::from(dt.zone().offset());
        prop_assert_eq!(dt.unix_time(), expected);
        prop_assert_eq!(DateTime::from_unix_time(dt.unix_time(), dt.zone()).unwrap(), dt);
    }

    #[test]
    fn date_time_text_round_trips(dt in date_time()) {
        // Parsed zones never carry the dst flag.
        let dt = DateTime::new(
            dt.year(), i64::from(dt.month()), i64::from(dt.day()),
            i64::from(dt.hour()), i64::from(dt.minute()), i64::from(dt.second()),
            dt.zone().with_dst(false),
        ).unwrap();
        prop_assert_eq!(dt.to_string().parse::<DateTime>().unwrap(), dt);
        prop_assert_eq!(DateTime::parse(&dt.format_with(&FormatOptions::basic())).unwrap(), dt);
        let date = dt.date();
        prop_assert_eq!(date.to_string().parse::<Date>().unwrap(), date);
    }

    #[test]
    fn duration_text_round_trips(seconds in -1_000_000_000i64..1_000_000_000) {
        let d = Duration::new(seconds);
        prop_assert_eq!(d.to_string().parse::<Duration>().unwrap(), d);
    }

    #[test]
    fn period_text_round_trips(fields in proptest::array::uniform6(-500i64..500)) {
        let [y, mo, d, h, mi, s] = fields;
        let p = Period::new(y, mo, d, h, mi, s);
        prop_assert_eq!(p.to_string().parse::<Period>().unwrap(), p);
    }

    #[test]
    fn duration_moves_instant_exactly(dt in date_time(), seconds in -100_000_000i64..100_000_000) {
        if let Ok(moved) = dt.checked_add(seconds) {
            prop_assert_eq!(moved.instant() - dt.instant(), seconds);
            prop_assert_eq!(Duration::new(seconds).to_seconds(dt).unwrap(), seconds);
        }
    }

    #[test]
    fn zone_conversion_preserves_instant(dt in date_time(), target in zone()) {
        if let Ok(converted) = dt.to_time_zone(target) {
            prop_assert_eq!(converted.instant(), dt.instant());
            prop_assert_eq!(converted.zone(), target);
        }
    }
}
