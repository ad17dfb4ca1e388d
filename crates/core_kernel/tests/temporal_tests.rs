//! Comprehensive unit tests for the Temporal module
//!
//! Tests cover date parsing, whole-year age truncation,
//! and Timezone functionality.

use chrono::{Datelike, NaiveDate};
use core_kernel::{calculate_age, parse_date, TemporalError, Timezone};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod age_calculation {
    use super::*;

    #[test]
    fn test_reference_scenario_age() {
        assert_eq!(calculate_age(date(1990, 5, 15), date(2025, 5, 16)).unwrap(), 35);
    }

    #[test]
    fn test_birthday_later_in_year_not_counted() {
        assert_eq!(calculate_age(date(1985, 12, 31), date(2025, 12, 30)).unwrap(), 39);
    }

    #[test]
    fn test_new_year_boundary() {
        assert_eq!(calculate_age(date(2000, 1, 1), date(2024, 12, 31)).unwrap(), 24);
        assert_eq!(calculate_age(date(2000, 1, 1), date(2025, 1, 1)).unwrap(), 25);
    }

    #[test]
    fn test_future_birth_date_is_an_error() {
        let err = calculate_age(date(2026, 1, 2), date(2026, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            TemporalError::BirthDateInFuture {
                birth_date: date(2026, 1, 2),
                as_of: date(2026, 1, 1),
            }
        );
    }

    proptest! {
        #[test]
        fn age_matches_whole_year_difference(
            birth_days in 0i64..30_000,
            gap_days in 0i64..40_000,
        ) {
            let birth = date(1920, 1, 1) + chrono::Duration::days(birth_days);
            let as_of = birth + chrono::Duration::days(gap_days);

            let mut expected = as_of.year() - birth.year();
            if (as_of.month(), as_of.day()) < (birth.month(), birth.day()) {
                expected -= 1;
            }

            prop_assert_eq!(calculate_age(birth, as_of).unwrap() as i32, expected);
        }

        #[test]
        fn age_never_decreases_over_time(
            birth_days in 0i64..30_000,
            gap_days in 0i64..20_000,
            step in 1i64..400,
        ) {
            let birth = date(1920, 1, 1) + chrono::Duration::days(birth_days);
            let earlier = birth + chrono::Duration::days(gap_days);
            let later = earlier + chrono::Duration::days(step);

            prop_assert!(calculate_age(birth, earlier).unwrap() <= calculate_age(birth, later).unwrap());
        }
    }
}

mod parsing {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_date(" 1990-05-15 ").unwrap(), date(1990, 5, 15));
    }

    #[test]
    fn test_parse_rejects_wrong_format() {
        let err = parse_date("05/15/1990").unwrap_err();
        assert!(matches!(err, TemporalError::InvalidDate { .. }));
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_parse_rejects_impossible_date() {
        assert!(parse_date("2023-02-29").is_err());
    }
}

mod timezone {
    use super::*;

    #[test]
    fn test_default_is_rome() {
        assert_eq!(Timezone::default().name(), "Europe/Rome");
    }

    #[test]
    fn test_from_str_valid() {
        let tz: Timezone = "America/New_York".parse().unwrap();
        assert_eq!(tz.name(), "America/New_York");
    }

    #[test]
    fn test_from_str_invalid() {
        let err = "Mars/Olympus".parse::<Timezone>().unwrap_err();
        assert!(matches!(err, TemporalError::InvalidTimezone(ref name) if name == "Mars/Olympus"));
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn test_serde_round_trip_by_name() {
        let tz = Timezone::default();
        let json = serde_json::to_string(&tz).unwrap();
        assert_eq!(json, "\"Europe/Rome\"");
        let back: Timezone = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tz);
    }

    #[test]
    fn test_serde_rejects_unknown_zone() {
        let err = serde_json::from_str::<Timezone>("\"Nowhere/Town\"").unwrap_err();
        assert!(err.to_string().contains("Nowhere/Town"));
    }

    #[test]
    fn test_today_is_close_to_utc_today() {
        let utc_today = chrono::Utc::now().date_naive();
        let local_today = Timezone::default().today();
        assert!((local_today - utc_today).num_days().abs() <= 1);
    }
}
