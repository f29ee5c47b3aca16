//! Background refresh of the calendar's event collection.
//!
//! # Behavior
//!
//! - A periodic tick (default 30 s) and focus events re-fetch the current
//!   month from the store.
//! - Each fetch takes a ticket from a monotonically increasing counter. A
//!   result is applied only if its ticket is still the newest one, so a
//!   newer refresh, a month change or a local edit supersedes any fetch
//!   already in flight. Superseded results are dropped on arrival.
//! - Fetch failures are logged and swallowed by the periodic loop; the last
//!   good events stay in place.
//! - After cancellation every arriving result is dropped.
//!
//! Refreshes replace the stored collection wholesale. Callers holding an
//! event copy for an open edit are unaffected.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::aggregator::{CalendarAggregator, CalendarFilter, MonthView};
use super::config::{CalendarConfig, RefreshConfig};
use crate::error::{ConfigError, ScheduleError};
use crate::generation::cursor::month_bounds;
use crate::models::ScheduleEvent;
use crate::store::ScheduleStore;

/// Result of one refresh attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetched events replaced the collection.
    Applied { events: usize },
    /// A newer refresh, month change or edit superseded this one.
    Discarded { ticket: u64 },
    /// Focus refresh is disabled.
    Skipped,
}

#[derive(Debug)]
struct CalendarState {
    year: i32,
    month: u32,
    start: NaiveDate,
    end: NaiveDate,
    events: Vec<ScheduleEvent>,
    applied_ticket: Option<u64>,
}

/// Keeps the current month's events fresh for the calendar view.
pub struct CalendarRefresher<S: ScheduleStore + ?Sized> {
    store: Arc<S>,
    aggregator: CalendarAggregator,
    config: RefreshConfig,
    state: RwLock<CalendarState>,
    ticket: AtomicU64,
    cancellation: CancellationToken,
}

impl<S: ScheduleStore + ?Sized> CalendarRefresher<S> {
    /// Creates a refresher showing `year`-`month`. Nothing is fetched yet.
    pub fn new(
        store: Arc<S>,
        config: &CalendarConfig,
        year: i32,
        month: u32,
    ) -> Result<Self, ScheduleError> {
        config.validate()?;
        let (start, end) = bounds(year, month)?;
        Ok(Self {
            store,
            aggregator: CalendarAggregator::from_config(config),
            config: config.refresh.clone(),
            state: RwLock::new(CalendarState {
                year,
                month,
                start,
                end,
                events: Vec::new(),
                applied_ticket: None,
            }),
            ticket: AtomicU64::new(0),
            cancellation: CancellationToken::new(),
        })
    }

    /// Token that stops [`run`](Self::run) and drops later results.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Stops the refresher.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Currently displayed month.
    pub async fn month(&self) -> (i32, u32) {
        let state = self.state.read().await;
        (state.year, state.month)
    }

    /// Whether a fetch has been applied for the current month.
    pub async fn is_loaded(&self) -> bool {
        self.state.read().await.applied_ticket.is_some()
    }

    /// Copy of the current events.
    pub async fn events(&self) -> Vec<ScheduleEvent> {
        self.state.read().await.events.clone()
    }

    /// Day-grouped view of the current events.
    pub async fn view(&self, filter: &CalendarFilter) -> MonthView {
        let state = self.state.read().await;
        self.aggregator
            .group(&state.events, state.year, state.month, filter)
    }

    /// Every filtered event on `date`, including those past the overflow cut.
    pub async fn expand_day(&self, date: NaiveDate, filter: &CalendarFilter) -> Vec<ScheduleEvent> {
        let state = self.state.read().await;
        self.aggregator.expand_day(&state.events, date, filter)
    }

    /// Switches to another month and loads it.
    ///
    /// Any fetch still in flight for the previous month is dropped on arrival.
    pub async fn set_month(&self, year: i32, month: u32) -> Result<RefreshOutcome, ScheduleError> {
        let (start, end) = bounds(year, month)?;
        {
            let mut state = self.state.write().await;
            self.ticket.fetch_add(1, Ordering::SeqCst);
            state.year = year;
            state.month = month;
            state.start = start;
            state.end = end;
            state.events.clear();
            state.applied_ticket = None;
        }
        tracing::debug!(year, month, "calendar month changed");
        self.refresh_now().await
    }

    /// Refresh triggered by the view regaining focus.
    pub async fn focus(&self) -> Result<RefreshOutcome, ScheduleError> {
        if !self.config.refresh_on_focus {
            return Ok(RefreshOutcome::Skipped);
        }
        self.refresh_now().await
    }

    /// Fetches the current month and applies it unless superseded.
    ///
    /// Store failures are returned; the previous events are kept.
    pub async fn refresh_now(&self) -> Result<RefreshOutcome, ScheduleError> {
        let (ticket, start, end) = self.begin().await;
        let events = self.store.fetch_events(start, end).await?;

        match self.complete(ticket, events).await {
            Ok(count) => Ok(RefreshOutcome::Applied { events: count }),
            Err(ScheduleError::StaleFetchDiscarded { ticket }) => {
                tracing::debug!(ticket, "dropping superseded calendar fetch");
                Ok(RefreshOutcome::Discarded { ticket })
            }
            Err(e) => Err(e),
        }
    }

    /// Replaces one event after a successful edit.
    ///
    /// The event is removed if it no longer falls in the current month.
    /// In-flight fetches started before the edit are superseded so they
    /// cannot bring back the old values.
    pub async fn apply_edit(&self, event: ScheduleEvent) {
        let mut state = self.state.write().await;
        self.ticket.fetch_add(1, Ordering::SeqCst);

        let in_month = event.date >= state.start && event.date <= state.end;
        let position = state.events.iter().position(|e| e.id == event.id);
        match (position, in_month) {
            (Some(i), true) => state.events[i] = event,
            (Some(i), false) => {
                state.events.remove(i);
            }
            (None, true) => state.events.push(event),
            (None, false) => {}
        }
    }

    /// Periodic refresh loop. Returns once cancelled.
    pub async fn run(&self) {
        let mut interval = tokio::time::interval(Duration::from_secs(self.config.interval_secs));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            interval_secs = self.config.interval_secs,
            "calendar refresher started"
        );
        loop {
            tokio::select! {
                _ = self.cancellation.cancelled() => {
                    tracing::info!("calendar refresher shutting down");
                    break;
                }
                _ = interval.tick() => {
                    self.tick().await;
                }
            }
        }
    }

    pub(crate) async fn tick(&self) {
        if let Err(e) = self.refresh_now().await {
            tracing::warn!(error = %e, "calendar refresh failed, keeping last good events");
        }
    }

    async fn begin(&self) -> (u64, NaiveDate, NaiveDate) {
        let state = self.state.read().await;
        let ticket = self.ticket.fetch_add(1, Ordering::SeqCst) + 1;
        (ticket, state.start, state.end)
    }

    async fn complete(&self, ticket: u64, events: Vec<ScheduleEvent>) -> Result<usize, ScheduleError> {
        let mut state = self.state.write().await;
        if self.cancellation.is_cancelled() || self.ticket.load(Ordering::SeqCst) != ticket {
            return Err(ScheduleError::StaleFetchDiscarded { ticket });
        }
        let count = events.len();
        state.events = events;
        state.applied_ticket = Some(ticket);
        Ok(count)
    }
}

fn bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), ConfigError> {
    month_bounds(year, month).ok_or(ConfigError::InvalidMonth { year, month })
}
