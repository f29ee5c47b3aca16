//! Visit schedule generation.
//!
//! Turns a [`ScheduleConfig`](crate::models::ScheduleConfig) into a dated,
//! categorised, resource-assigned visit sequence.
//!
//! # Components
//!
//! - [`DateCursor`]: checked calendar-date stepping
//! - [`PatternGenerator`]: recurrence rule + preferred weekdays
//! - [`BulkDistributor`]: even spread across an explicit range
//! - [`QuotaAllocator`]: spreads a secondary-category quota
//! - [`ResourceRotator`]: round-robin resource assignment
//! - [`ScheduleGenerator`]: the full pipeline
//! - [`ScheduleSummary`]: status, category and resource counts
//!
//! All components are pure and synchronous; calling them repeatedly
//! needs no coordination.

mod bulk;
pub mod cursor;
mod generator;
mod pattern;
mod quota;
mod rotation;
mod summary;

pub use bulk::BulkDistributor;
pub use cursor::DateCursor;
pub use generator::ScheduleGenerator;
pub use pattern::{PatternGenerator, MAX_SCAN_DAYS};
pub use quota::QuotaAllocator;
pub use rotation::{pick_cyclic, ResourceRotator};
pub use summary::ScheduleSummary;
