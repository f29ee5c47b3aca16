//! Recurrence-pattern date generation.
//!
//! # Algorithm
//!
//! 1. Place a cursor on the start date.
//! 2. For each visit, move the cursor forward one day at a time until the
//!    date is a preferred weekday (and not a weekend, when weekends are
//!    skipped). Record that date.
//! 3. Jump the cursor forward by the recurrence: 7, 14 or `n` days, or one
//!    calendar month.
//!
//! The scan in step 2 is bounded by [`MAX_SCAN_DAYS`]. A configuration
//! whose weekday filters admit no date (e.g. only Saturday preferred while
//! weekends are skipped) fails with
//! [`ScheduleError::ScheduleUnsatisfiable`] instead of looping.
//!
//! # Complexity
//! O(n * s) where n = visits, s = scan bound.

use chrono::{Datelike, NaiveDate, Weekday};

use super::cursor::{is_weekend, DateCursor};
use crate::error::ScheduleError;
use crate::models::Recurrence;

/// Maximum dates tested when looking for one visit.
pub const MAX_SCAN_DAYS: u32 = 60;

/// Generates visit dates from a recurrence rule.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use u_service_schedule::generation::PatternGenerator;
/// use u_service_schedule::models::Recurrence;
///
/// let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let dates = PatternGenerator::new(Recurrence::Weekly, vec![Weekday::Mon])
///     .generate(start, 3)
///     .unwrap();
/// assert_eq!(dates[2], NaiveDate::from_ymd_opt(2024, 6, 17).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct PatternGenerator {
    recurrence: Recurrence,
    preferred_weekdays: Vec<Weekday>,
    skip_weekends: bool,
    max_scan_days: u32,
}

impl PatternGenerator {
    /// Creates a generator. An empty weekday list accepts every day.
    pub fn new(recurrence: Recurrence, preferred_weekdays: Vec<Weekday>) -> Self {
        Self {
            recurrence,
            preferred_weekdays,
            skip_weekends: false,
            max_scan_days: MAX_SCAN_DAYS,
        }
    }

    /// Sets whether Saturday and Sunday are excluded.
    pub fn with_skip_weekends(mut self, skip: bool) -> Self {
        self.skip_weekends = skip;
        self
    }

    /// Overrides the per-visit scan bound.
    pub fn with_max_scan_days(mut self, days: u32) -> Self {
        self.max_scan_days = days.max(1);
        self
    }

    /// Whether a visit may land on `date`.
    pub fn qualifies(&self, date: NaiveDate) -> bool {
        if self.skip_weekends && is_weekend(date) {
            return false;
        }
        self.preferred_weekdays.is_empty() || self.preferred_weekdays.contains(&date.weekday())
    }

    /// Generates `total_visits` dates starting the search at `start`.
    ///
    /// Fails wholesale: no partial sequence is returned.
    pub fn generate(&self, start: NaiveDate, total_visits: u32) -> Result<Vec<NaiveDate>, ScheduleError> {
        let mut dates = Vec::with_capacity(total_visits as usize);
        let mut cursor = DateCursor::new(start);

        for visit_index in 0..total_visits {
            let unsatisfiable = || ScheduleError::ScheduleUnsatisfiable {
                visit_index,
                scanned_days: self.max_scan_days,
            };

            let date = cursor
                .seek(self.max_scan_days, |d| self.qualifies(d))
                .ok_or_else(unsatisfiable)?;
            dates.push(date);

            if visit_index + 1 < total_visits {
                cursor.advance_by(self.recurrence).ok_or_else(unsatisfiable)?;
            }
        }

        Ok(dates)
    }
}
