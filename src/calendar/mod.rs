//! Calendar views over scheduled visits.
//!
//! # Components
//!
//! - [`CalendarAggregator`]: groups a month's events by day with status and
//!   search filters and per-day overflow
//! - [`CalendarRefresher`]: keeps the current month's events fresh,
//!   dropping superseded fetches
//! - [`CalendarConfig`]: overflow threshold and refresh settings

mod aggregator;
mod config;
mod refresh;

pub use aggregator::{first_n, CalendarAggregator, CalendarFilter, DayBucket, MonthView, StatusFilter};
pub use config::{
    CalendarConfig, RefreshConfig, DEFAULT_OVERFLOW_THRESHOLD, DEFAULT_REFRESH_INTERVAL_SECS,
};
pub use refresh::{CalendarRefresher, RefreshOutcome};
