//! Schedule event model and its lifecycle.
//!
//! # State Machine
//!
//! ```text
//! Scheduled --complete--> Completed
//! Scheduled --miss------> Missed
//! Scheduled --cancel----> Cancelled
//! Completed --revert----> Scheduled
//! ```
//!
//! Missed and Cancelled are terminal. Setting a status to its current value
//! is accepted as a no-op.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::CustomerInfo;
use crate::error::ScheduleError;

/// Service classification of a visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceCategory {
    /// Default service (exterior wash).
    #[default]
    Primary,
    /// Quota-allocated alternate service (interior clean).
    Secondary,
}

/// Lifecycle status of a visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    /// Planned, not yet carried out.
    #[default]
    Scheduled,
    /// Carried out.
    Completed,
    /// Not carried out on its date.
    Missed,
    /// Called off.
    Cancelled,
}

impl EventStatus {
    /// Whether a direct transition from `self` to `to` is defined.
    pub fn can_transition_to(self, to: EventStatus) -> bool {
        use EventStatus::*;
        matches!(
            (self, to),
            (Scheduled, Completed) | (Scheduled, Missed) | (Scheduled, Cancelled) | (Completed, Scheduled)
        ) || self == to
    }

    /// Whether no transition leaves this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, EventStatus::Missed | EventStatus::Cancelled)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventStatus::Scheduled => "scheduled",
            EventStatus::Completed => "completed",
            EventStatus::Missed => "missed",
            EventStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// One generated or persisted visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    /// Unique event id (`"{subscription_id}-{sequence_index}"`).
    pub id: String,
    /// Owning subscription.
    pub subscription_id: String,
    /// 0-based position within the generation run.
    pub sequence_index: u32,
    /// Visit date.
    pub date: NaiveDate,
    /// Visit time of day.
    pub time_slot: NaiveTime,
    /// Service classification.
    pub service_category: ServiceCategory,
    /// Assigned resource id.
    pub resource: String,
    /// Display label of the assigned resource.
    pub resource_label: String,
    /// Lifecycle status.
    pub status: EventStatus,
    /// Assigned worker id, if any.
    pub assigned_worker: Option<String>,
    /// Customer display fields.
    pub customer: CustomerInfo,
}

impl ScheduleEvent {
    /// Date and time of the visit.
    #[inline]
    pub fn scheduled_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time_slot)
    }

    /// Whether the visit still counts as outstanding (anything but Completed).
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status != EventStatus::Completed
    }
}

/// A targeted edit to one event.
///
/// Every field is optional; only the set fields are written.
/// `assigned_worker` uses `Some(None)` to clear the assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPatch {
    /// New visit date.
    pub date: Option<NaiveDate>,
    /// New service category.
    pub service_category: Option<ServiceCategory>,
    /// New resource id.
    pub resource: Option<String>,
    /// Display label for the new resource (defaults to the id).
    pub resource_label: Option<String>,
    /// New lifecycle status.
    pub status: Option<EventStatus>,
    /// New worker assignment.
    pub assigned_worker: Option<Option<String>>,
}

impl EventPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the visit to another date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Changes the service category.
    pub fn with_category(mut self, category: ServiceCategory) -> Self {
        self.service_category = Some(category);
        self
    }

    /// Reassigns the resource.
    pub fn with_resource(mut self, resource_id: impl Into<String>) -> Self {
        self.resource = Some(resource_id.into());
        self
    }

    /// Sets the lifecycle status.
    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Assigns a worker.
    pub fn with_worker(mut self, worker_id: impl Into<String>) -> Self {
        self.assigned_worker = Some(Some(worker_id.into()));
        self
    }

    /// Clears the worker assignment.
    pub fn without_worker(mut self) -> Self {
        self.assigned_worker = Some(None);
        self
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.service_category.is_none()
            && self.resource.is_none()
            && self.status.is_none()
            && self.assigned_worker.is_none()
    }

    /// Checks the status transition without touching the event.
    pub fn check(&self, event: &ScheduleEvent) -> Result<(), ScheduleError> {
        match self.status {
            Some(to) if !event.status.can_transition_to(to) => {
                Err(ScheduleError::InvalidTransition {
                    event_id: event.id.clone(),
                    from: event.status,
                    to,
                })
            }
            _ => Ok(()),
        }
    }

    /// Writes the set fields onto `event`.
    ///
    /// Nothing else is re-derived: dates are not re-sorted, quotas and
    /// rotation are not rebalanced. On error the event is left unchanged.
    pub fn apply_to(&self, event: &mut ScheduleEvent) -> Result<(), ScheduleError> {
        self.check(event)?;
        self.write_to(event);
        Ok(())
    }

    /// Writes the set fields without checking the status transition.
    ///
    /// Stores use this: transition rules are enforced before the write
    /// reaches them.
    pub fn write_to(&self, event: &mut ScheduleEvent) {
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(category) = self.service_category {
            event.service_category = category;
        }
        if let Some(resource) = &self.resource {
            event.resource = resource.clone();
            event.resource_label = self
                .resource_label
                .clone()
                .unwrap_or_else(|| resource.clone());
        }
        if let Some(status) = self.status {
            event.status = status;
        }
        if let Some(worker) = &self.assigned_worker {
            event.assigned_worker = worker.clone();
        }
    }
}
