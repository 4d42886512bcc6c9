//! The two-bucket nighttime capture window.
//!
//! A composite for date D covers the evening of D-1 (hours 20-23) and
//! the early morning of D (hours 0-4). The window is defined by its end
//! date; hours outside it never contribute.

use chrono::{Days, NaiveDate};
use std::ops::RangeInclusive;

/// Hours scanned in the evening bucket (day before the end date).
pub const EVENING_HOURS: RangeInclusive<u32> = 20..=23;
/// Hours scanned in the morning bucket (the end date itself).
pub const MORNING_HOURS: RangeInclusive<u32> = 0..=4;

/// One calendar day of the window with its admissible hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    /// Position in the window: 0 = evening day, 1 = morning day.
    pub index: u8,
    /// The calendar date of this bucket.
    pub date: NaiveDate,
    /// Hours scanned within this date, ascending.
    pub hours: RangeInclusive<u32>,
}

/// The nighttime window spanning two calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightWindow {
    end_date: NaiveDate,
}

impl NightWindow {
    /// Creates the window ending on the given date.
    pub fn ending_on(end_date: NaiveDate) -> Self {
        Self { end_date }
    }

    /// Returns the window's end date (the morning-side day).
    #[inline]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns the two day buckets in scan order.
    pub fn buckets(&self) -> [DayBucket; 2] {
        // NaiveDate covers a far wider range than any camera archive;
        // the subtraction cannot leave it.
        let evening = self
            .end_date
            .checked_sub_days(Days::new(1))
            .unwrap_or(self.end_date);

        [
            DayBucket {
                index: 0,
                date: evening,
                hours: EVENING_HOURS,
            },
            DayBucket {
                index: 1,
                date: self.end_date,
                hours: MORNING_HOURS,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_buckets_split_across_midnight() {
        let window = NightWindow::ending_on(date(2021, 6, 15));
        let [evening, morning] = window.buckets();

        assert_eq!(evening.date, date(2021, 6, 14));
        assert_eq!(evening.hours, 20..=23);
        assert_eq!(morning.date, date(2021, 6, 15));
        assert_eq!(morning.hours, 0..=4);
    }

    #[test]
    fn test_window_rolls_over_month_boundary() {
        let window = NightWindow::ending_on(date(2021, 3, 1));
        let [evening, _] = window.buckets();
        assert_eq!(evening.date, date(2021, 2, 28));
    }

    #[test]
    fn test_window_rolls_over_year_boundary() {
        let window = NightWindow::ending_on(date(2022, 1, 1));
        let [evening, morning] = window.buckets();
        assert_eq!(evening.date, date(2021, 12, 31));
        assert_eq!(morning.date, date(2022, 1, 1));
    }

    #[test]
    fn test_hour_counts() {
        assert_eq!(EVENING_HOURS.count(), 4);
        assert_eq!(MORNING_HOURS.count(), 5);
    }
}
