//! Even distribution of visits across an explicit date range.
//!
//! # Algorithm
//!
//! ```text
//! total_days = end - start + 1
//! interval   = max(1, total_days / total_visits)
//! date(i)    = start + i * interval
//! ```
//!
//! When `total_visits` does not divide `total_days`, the last visit lands
//! before `end`; the slack is left in place. When there are more visits than
//! days the interval bottoms out at one day and the overflow visits are held
//! on `end`, so every date stays inside the range.

use chrono::{Days, NaiveDate};

use super::cursor::days_inclusive;
use crate::error::ScheduleError;

/// Spreads a fixed visit count over `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkDistributor {
    start: NaiveDate,
    end: NaiveDate,
}

impl BulkDistributor {
    /// Creates a distributor over the inclusive range `[start, end]`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Days between consecutive visits.
    pub fn interval_days(&self, total_visits: u32) -> u64 {
        if total_visits == 0 {
            return 1;
        }
        (days_inclusive(self.start, self.end) / u64::from(total_visits)).max(1)
    }

    /// Produces `total_visits` dates.
    ///
    /// Fails with [`ScheduleError::InvalidRange`] for a zero count or a
    /// reversed range; no partial output is produced.
    pub fn distribute(&self, total_visits: u32) -> Result<Vec<NaiveDate>, ScheduleError> {
        if total_visits == 0 || self.end < self.start {
            return Err(self.invalid(total_visits));
        }

        let interval = self.interval_days(total_visits);
        (0..u64::from(total_visits))
            .map(|i| {
                self.start
                    .checked_add_days(Days::new(i * interval))
                    .map(|d| d.min(self.end))
                    .ok_or_else(|| self.invalid(total_visits))
            })
            .collect()
    }

    fn invalid(&self, total_visits: u32) -> ScheduleError {
        ScheduleError::InvalidRange {
            start: self.start,
            end: self.end,
            total_visits,
        }
    }
}
