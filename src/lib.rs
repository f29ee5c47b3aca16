//! Recurring service schedule generation and calendar tracking.
//!
//! Turns a subscription's configuration into a concrete visit sequence
//! (dates, service categories, resources, time slots), and keeps a
//! month-by-month calendar view of persisted visits in sync while staff
//! edit individual visits.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ScheduleConfig`, `ScheduleEvent`,
//!   `EventPatch`, `Subscription`, `Resource`, `Worker`
//! - **`validation`**: Configuration checks, collecting every problem at once
//! - **`generation`**: Pattern and bulk date generation, quota allocation,
//!   resource rotation, schedule summaries
//! - **`calendar`**: Day-grouped month views and background refresh
//! - **`mutation`**: Single-event edits with status transition rules
//! - **`store`**: The persistence boundary and an in-memory store
//! - **`service`**: Create-and-persist entry point
//!
//! # Architecture
//!
//! Generation is pure and synchronous. Everything that touches persisted
//! events goes through the async [`store::ScheduleStore`] trait; the crate
//! owns no storage of its own and never reads the wall clock.

pub mod calendar;
pub mod error;
pub mod generation;
pub mod models;
pub mod mutation;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{ConfigError, ScheduleError, StoreError};
