//! ISO-8601 week arithmetic.
//!
//! Week 1 is the week containing the year's first Thursday, so the last days
//! of December can fall in week 1 of the next year and the first days of
//! January in week 52/53 of the previous one.

use chrono::{Datelike, Duration, NaiveDate};

/// ISO weekday, Monday = 1 .. Sunday = 7.
pub fn iso_weekday(date: NaiveDate) -> u32 {
    date.weekday().number_from_monday()
}

/// ISO week number (1..=53) of `date`.
///
/// Moves to the Thursday of the same ISO week; the week number is then the
/// count of 7-day blocks from January 1 of that Thursday's year.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    let thursday = date + Duration::days(4 - i64::from(iso_weekday(date)));
    // ordinal0() is the day distance from January 1 of the shifted year.
    // ceil((d + 1) / 7) == d / 7 + 1 for d >= 0.
    thursday.ordinal0() / 7 + 1
}

/// Number of days in the given month, leap years included.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from((next - first).num_days()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekday_numbering_starts_on_monday() {
        assert_eq!(iso_weekday(date(2024, 1, 1)), 1); // Monday
        assert_eq!(iso_weekday(date(2024, 1, 7)), 7); // Sunday
        assert_eq!(iso_weekday(date(2024, 5, 11)), 6); // Saturday
    }

    #[test]
    fn year_boundaries() {
        assert_eq!(iso_week_number(date(2024, 1, 1)), 1);
        assert_eq!(iso_week_number(date(2023, 12, 31)), 52);
        // Monday 2024-12-30 belongs to week 1 of 2025.
        assert_eq!(iso_week_number(date(2024, 12, 30)), 1);
        // Friday 2021-01-01 belongs to week 53 of 2020.
        assert_eq!(iso_week_number(date(2021, 1, 1)), 53);
        assert_eq!(iso_week_number(date(2020, 12, 31)), 53);
        // Sunday 2023-01-01 belongs to week 52 of 2022.
        assert_eq!(iso_week_number(date(2023, 1, 1)), 52);
    }

    #[test]
    fn agrees_with_chrono_over_three_decades() {
        let mut d = date(2000, 1, 1);
        let end = date(2030, 12, 31);
        while d <= end {
            assert_eq!(
                iso_week_number(d),
                d.iso_week().week(),
                "week number mismatch on {d}"
            );
            d += Duration::days(1);
        }
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
    }
}
