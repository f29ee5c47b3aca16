//! Persistence boundary.
//!
//! The crate does not own storage. Everything it reads or writes goes
//! through [`ScheduleStore`], a narrow request/response interface that a
//! database, HTTP API or test double implements. [`InMemoryStore`] is a
//! complete in-process implementation.

mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::StoreError;
use crate::models::{EventPatch, Resource, ScheduleEvent, Subscription, Worker};

pub use memory::InMemoryStore;

/// Request/response interface to the external persistence layer.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Events whose date lies in `[start, end]`, ordered by date and time.
    async fn fetch_events(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduleEvent>, StoreError>;

    /// Persists a newly generated subscription and its events.
    async fn save_subscription(&self, subscription: &Subscription) -> Result<(), StoreError>;

    /// Loads one event.
    async fn get_event(&self, event_id: &str) -> Result<ScheduleEvent, StoreError>;

    /// Writes the set fields of `patch` and returns the stored event.
    async fn update_event(
        &self,
        event_id: &str,
        patch: &EventPatch,
    ) -> Result<ScheduleEvent, StoreError>;

    /// Resource directory.
    async fn list_resource_pool(&self) -> Result<Vec<Resource>, StoreError>;

    /// Worker directory.
    async fn list_workers(&self) -> Result<Vec<Worker>, StoreError>;
}
