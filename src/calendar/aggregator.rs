//! Day-grouped month views over a flat event list.
//!
//! # Contract
//!
//! - Events are grouped by calendar day; time of day never splits a day.
//! - `Pending` matches every status except Completed; `Completed` matches
//!   only Completed.
//! - Search is a case-insensitive substring match over customer name,
//!   phone and area. A missing or blank term matches everything.
//! - A day holding more than `overflow_threshold` filtered events shows the
//!   first `overflow_threshold` plus a count of the rest; the rest remain
//!   available through [`CalendarAggregator::expand_day`].
//!
//! Aggregation is read-only: the same events and filter always give the
//! same view.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::config::{CalendarConfig, DEFAULT_OVERFLOW_THRESHOLD};
use crate::models::{EventStatus, ScheduleEvent};

/// Status filter of the calendar view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    /// Every event.
    #[default]
    All,
    /// Everything not yet completed.
    Pending,
    /// Completed events only.
    Completed,
}

impl StatusFilter {
    /// Whether an event with `status` passes the filter.
    pub fn matches(&self, status: EventStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status != EventStatus::Completed,
            StatusFilter::Completed => status == EventStatus::Completed,
        }
    }
}

/// Status and free-text filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFilter {
    /// Status filter.
    pub status: StatusFilter,
    /// Search term; `None` or blank matches everything.
    pub search: Option<String>,
}

impl CalendarFilter {
    /// Creates a filter matching every event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status filter.
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Sets the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Whether `event` passes both filters.
    pub fn matches(&self, event: &ScheduleEvent) -> bool {
        if !self.status.matches(event.status) {
            return false;
        }
        let term = match self.search.as_deref().map(str::trim) {
            None | Some("") => return true,
            Some(term) => term.to_lowercase(),
        };
        [
            &event.customer.name,
            &event.customer.phone,
            &event.customer.area,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Splits `items` into the first `k` and the count of the rest.
pub fn first_n<T>(items: &[T], k: usize) -> (&[T], usize) {
    let visible = k.min(items.len());
    (&items[..visible], items.len() - visible)
}

/// One calendar day in a month view.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    /// The day.
    pub date: NaiveDate,
    /// Events shown for the day, ordered by time.
    pub visible: Vec<ScheduleEvent>,
    /// Filtered events beyond the threshold.
    pub overflow_count: usize,
}

impl DayBucket {
    /// Filtered events on the day, shown or not.
    pub fn total(&self) -> usize {
        self.visible.len() + self.overflow_count
    }

    /// Whether some events are folded away.
    pub fn has_overflow(&self) -> bool {
        self.overflow_count > 0
    }
}

/// Filtered events of one month, grouped by day.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthView {
    /// Year of the month.
    pub year: i32,
    /// Month number (1..=12).
    pub month: u32,
    /// Days with at least one filtered event.
    pub days: BTreeMap<NaiveDate, DayBucket>,
}

impl MonthView {
    /// Bucket for `date`, if any event falls on it.
    pub fn day(&self, date: NaiveDate) -> Option<&DayBucket> {
        self.days.get(&date)
    }

    /// Filtered events across the month.
    pub fn total_events(&self) -> usize {
        self.days.values().map(DayBucket::total).sum()
    }

    /// Whether no event passed the filter.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Groups events into [`MonthView`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarAggregator {
    overflow_threshold: usize,
}

impl Default for CalendarAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_OVERFLOW_THRESHOLD)
    }
}

impl CalendarAggregator {
    /// Creates an aggregator showing at most `overflow_threshold` events per day.
    pub fn new(overflow_threshold: usize) -> Self {
        Self { overflow_threshold }
    }

    /// Creates an aggregator from calendar settings.
    pub fn from_config(config: &CalendarConfig) -> Self {
        Self::new(config.overflow_threshold)
    }

    /// Per-day display limit.
    pub fn overflow_threshold(&self) -> usize {
        self.overflow_threshold
    }

    /// Groups the events of `year`-`month` that pass `filter`.
    ///
    /// Events outside the month are ignored.
    pub fn group(
        &self,
        events: &[ScheduleEvent],
        year: i32,
        month: u32,
        filter: &CalendarFilter,
    ) -> MonthView {
        let mut by_day: BTreeMap<NaiveDate, Vec<&ScheduleEvent>> = BTreeMap::new();
        for event in events {
            if event.date.year() == year && event.date.month() == month && filter.matches(event) {
                by_day.entry(event.date).or_default().push(event);
            }
        }

        let days = by_day
            .into_iter()
            .map(|(date, mut day_events)| {
                sort_within_day(&mut day_events);
                let (visible, overflow_count) = first_n(&day_events, self.overflow_threshold);
                let bucket = DayBucket {
                    date,
                    visible: visible.iter().map(|e| (*e).clone()).collect(),
                    overflow_count,
                };
                (date, bucket)
            })
            .collect();

        MonthView { year, month, days }
    }

    /// Every filtered event on `date`, with no overflow cut.
    pub fn expand_day(
        &self,
        events: &[ScheduleEvent],
        date: NaiveDate,
        filter: &CalendarFilter,
    ) -> Vec<ScheduleEvent> {
        let mut day_events: Vec<&ScheduleEvent> = events
            .iter()
            .filter(|e| e.date == date && filter.matches(e))
            .collect();
        sort_within_day(&mut day_events);
        day_events.into_iter().cloned().collect()
    }
}

fn sort_within_day(events: &mut [&ScheduleEvent]) {
    events.sort_by(|a, b| {
        a.time_slot
            .cmp(&b.time_slot)
            .then_with(|| a.subscription_id.cmp(&b.subscription_id))
            .then_with(|| a.sequence_index.cmp(&b.sequence_index))
    });
}
