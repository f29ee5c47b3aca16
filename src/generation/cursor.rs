//! Calendar-date arithmetic.
//!
//! All dates are local calendar dates; there is no timezone handling.
//! Arithmetic is checked: stepping past chrono's supported range yields
//! `None` rather than panicking.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::models::Recurrence;

/// A movable position on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCursor {
    date: NaiveDate,
}

impl DateCursor {
    /// Creates a cursor at `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Current position.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Moves forward by `days` days.
    pub fn advance_days(&mut self, days: u32) -> Option<NaiveDate> {
        self.date = self.date.checked_add_days(Days::new(u64::from(days)))?;
        Some(self.date)
    }

    /// Moves forward by `months` calendar months, clamping to month end.
    pub fn advance_months(&mut self, months: u32) -> Option<NaiveDate> {
        self.date = self.date.checked_add_months(Months::new(months))?;
        Some(self.date)
    }

    /// Moves forward by one recurrence step.
    pub fn advance_by(&mut self, recurrence: Recurrence) -> Option<NaiveDate> {
        match recurrence.interval_days() {
            Some(days) => self.advance_days(days),
            None => self.advance_months(1),
        }
    }

    /// Moves forward one day at a time until `accept` holds.
    ///
    /// The current date is tested first. At most `max_days` dates are
    /// tested; if none qualifies the cursor is left where it was.
    pub fn seek(&mut self, max_days: u32, accept: impl Fn(NaiveDate) -> bool) -> Option<NaiveDate> {
        let mut candidate = self.date;
        for _ in 0..max_days {
            if accept(candidate) {
                self.date = candidate;
                return Some(candidate);
            }
            candidate = candidate.succ_opt()?;
        }
        None
    }
}

/// Saturday or Sunday.
#[inline]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Number of calendar days in `[start, end]`, counting both ends.
///
/// Returns 0 for a reversed range.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> u64 {
    let span = (end - start).num_days();
    if span < 0 {
        0
    } else {
        span as u64 + 1
    }
}

/// First and last day of a month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_advance_days() {
        let mut c = DateCursor::new(date(2024, 2, 27));
        assert_eq!(c.advance_days(3), Some(date(2024, 3, 1)));
        assert_eq!(c.date(), date(2024, 3, 1));
    }

    #[test]
    fn test_advance_month_clamps_to_month_end() {
        let mut c = DateCursor::new(date(2024, 1, 31));
        assert_eq!(c.advance_by(Recurrence::Monthly), Some(date(2024, 2, 29)));
        assert_eq!(c.advance_by(Recurrence::Monthly), Some(date(2024, 3, 29)));
    }

    #[test]
    fn test_advance_by_fixed_recurrence() {
        let mut c = DateCursor::new(date(2024, 6, 3));
        assert_eq!(c.advance_by(Recurrence::Weekly), Some(date(2024, 6, 10)));
        assert_eq!(c.advance_by(Recurrence::Biweekly), Some(date(2024, 6, 24)));
        assert_eq!(c.advance_by(Recurrence::Custom(1)), Some(date(2024, 6, 25)));
    }

    #[test]
    fn test_seek_tests_current_date_first() {
        // 2024-06-03 is a Monday
        let mut c = DateCursor::new(date(2024, 6, 3));
        assert_eq!(
            c.seek(60, |d| d.weekday() == Weekday::Mon),
            Some(date(2024, 6, 3))
        );
        assert_eq!(
            c.seek(60, |d| d.weekday() == Weekday::Thu),
            Some(date(2024, 6, 6))
        );
    }

    #[test]
    fn test_seek_is_bounded() {
        let mut c = DateCursor::new(date(2024, 6, 3));
        assert_eq!(c.seek(60, |_| false), None);
        assert_eq!(c.date(), date(2024, 6, 3));

        // Thursday is the fourth date tested
        assert_eq!(c.seek(3, |d| d.weekday() == Weekday::Thu), None);
        assert!(c.seek(4, |d| d.weekday() == Weekday::Thu).is_some());
    }

    #[test]
    fn test_weekend() {
        assert!(is_weekend(date(2024, 6, 8)));
        assert!(is_weekend(date(2024, 6, 9)));
        assert!(!is_weekend(date(2024, 6, 10)));
    }

    #[test]
    fn test_days_inclusive() {
        assert_eq!(days_inclusive(date(2024, 6, 1), date(2024, 6, 30)), 30);
        assert_eq!(days_inclusive(date(2024, 6, 1), date(2024, 6, 1)), 1);
        assert_eq!(days_inclusive(date(2024, 6, 2), date(2024, 6, 1)), 0);
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(2024, 2),
            Some((date(2024, 2, 1), date(2024, 2, 29)))
        );
        assert_eq!(
            month_bounds(2023, 12),
            Some((date(2023, 12, 1), date(2023, 12, 31)))
        );
        assert_eq!(month_bounds(2024, 13), None);
    }
}
