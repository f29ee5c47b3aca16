//! Targeted edits to persisted events.
//!
//! # Contract
//!
//! An edit touches exactly one event. Changing a date does not regenerate
//! the sequence and nothing is rebalanced: later dates may end up earlier,
//! quota counts and rotation may drift. Edits are corrections, not
//! regenerations.
//!
//! # Status transitions
//!
//! ```text
//! Scheduled --complete--> Completed
//! Scheduled --miss------> Missed
//! Scheduled --cancel----> Cancelled
//! Completed --revert----> Scheduled
//! ```
//!
//! Missed and Cancelled are terminal. Setting the current status again is
//! accepted and changes nothing.
//!
//! A rejected edit never reaches the store, so the persisted event is left
//! as it was.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::ScheduleError;
use crate::models::{EventPatch, EventStatus, ScheduleEvent, ServiceCategory};
use crate::store::ScheduleStore;

/// Applies validated patches to single events through a [`ScheduleStore`].
pub struct ScheduleMutator<S: ScheduleStore + ?Sized> {
    store: Arc<S>,
}

impl<S: ScheduleStore + ?Sized> ScheduleMutator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Applies `patch` to the event and returns the stored result.
    ///
    /// The status transition is checked against the current stored status,
    /// a new resource must be in the resource pool and a new worker must be
    /// an active worker.
    pub async fn apply(&self, event_id: &str, patch: &EventPatch) -> Result<ScheduleEvent, ScheduleError> {
        let current = self.store.get_event(event_id).await?;
        if patch.is_empty() {
            return Ok(current);
        }

        if let Err(e) = patch.check(&current) {
            tracing::warn!(event_id, error = %e, "edit rejected");
            return Err(e);
        }

        let mut patch = patch.clone();
        if let Some(resource_id) = &patch.resource {
            let pool = self.store.list_resource_pool().await?;
            let Some(resource) = pool.iter().find(|r| &r.id == resource_id) else {
                tracing::warn!(event_id, resource_id = %resource_id, "edit names unknown resource");
                return Err(ScheduleError::UnknownResource {
                    resource_id: resource_id.clone(),
                });
            };
            patch.resource_label = Some(resource.label().to_string());
        }
        if let Some(Some(worker_id)) = &patch.assigned_worker {
            let workers = self.store.list_workers().await?;
            if !workers.iter().any(|w| w.active && &w.id == worker_id) {
                tracing::warn!(event_id, worker_id = %worker_id, "edit names unknown worker");
                return Err(ScheduleError::UnknownWorker {
                    worker_id: worker_id.clone(),
                });
            }
        }

        let updated = self.store.update_event(event_id, &patch).await?;
        tracing::info!(
            event_id,
            status = %updated.status,
            date = %updated.date,
            "event updated"
        );
        Ok(updated)
    }

    /// Marks the visit as carried out.
    pub async fn complete(&self, event_id: &str) -> Result<ScheduleEvent, ScheduleError> {
        self.set_status(event_id, EventStatus::Completed).await
    }

    /// Marks the visit as not carried out.
    pub async fn miss(&self, event_id: &str) -> Result<ScheduleEvent, ScheduleError> {
        self.set_status(event_id, EventStatus::Missed).await
    }

    pub async fn cancel(&self, event_id: &str) -> Result<ScheduleEvent, ScheduleError> {
        self.set_status(event_id, EventStatus::Cancelled).await
    }

    /// Undoes a completion.
    pub async fn revert(&self, event_id: &str) -> Result<ScheduleEvent, ScheduleError> {
        self.set_status(event_id, EventStatus::Scheduled).await
    }

    pub async fn reschedule(&self, event_id: &str, date: NaiveDate) -> Result<ScheduleEvent, ScheduleError> {
        self.apply(event_id, &EventPatch::new().with_date(date)).await
    }

    pub async fn set_category(
        &self,
        event_id: &str,
        category: ServiceCategory,
    ) -> Result<ScheduleEvent, ScheduleError> {
        self.apply(event_id, &EventPatch::new().with_category(category))
            .await
    }

    pub async fn reassign_resource(
        &self,
        event_id: &str,
        resource_id: &str,
    ) -> Result<ScheduleEvent, ScheduleError> {
        self.apply(event_id, &EventPatch::new().with_resource(resource_id))
            .await
    }

    /// Assigns a worker, or clears the assignment with `None`.
    pub async fn assign_worker(
        &self,
        event_id: &str,
        worker_id: Option<&str>,
    ) -> Result<ScheduleEvent, ScheduleError> {
        let patch = match worker_id {
            Some(id) => EventPatch::new().with_worker(id),
            None => EventPatch::new().without_worker(),
        };
        self.apply(event_id, &patch).await
    }

    async fn set_status(&self, event_id: &str, status: EventStatus) -> Result<ScheduleEvent, ScheduleError> {
        self.apply(event_id, &EventPatch::new().with_status(status))
            .await
    }
}
