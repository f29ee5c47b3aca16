//! Subscription (aggregate container) model.
//!
//! A subscription owns the ordered visit sequence of one package purchase.
//! Persistence is external; this type is what generation hands to the store.

use serde::{Deserialize, Serialize};

use super::{EventStatus, ScheduleEvent, ServiceCategory};

/// A package purchase and its visit sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription identifier.
    pub id: String,
    /// Package label.
    pub package_type: String,
    /// Visits requested at creation.
    pub total_visits: u32,
    /// Visits ordered by `sequence_index`.
    pub events: Vec<ScheduleEvent>,
}

impl Subscription {
    /// Creates an empty subscription.
    pub fn new(id: impl Into<String>, package_type: impl Into<String>, total_visits: u32) -> Self {
        Self {
            id: id.into(),
            package_type: package_type.into(),
            total_visits,
            events: Vec::new(),
        }
    }

    /// Visits with status Completed.
    pub fn completed_visits(&self) -> usize {
        self.count_status(EventStatus::Completed)
    }

    /// Visits with the given status.
    pub fn count_status(&self, status: EventStatus) -> usize {
        self.events.iter().filter(|e| e.status == status).count()
    }

    /// Visits marked with the given category.
    pub fn count_category(&self, category: ServiceCategory) -> usize {
        self.events
            .iter()
            .filter(|e| e.service_category == category)
            .count()
    }

    /// Finds a visit by its sequence index.
    pub fn event_at(&self, sequence_index: u32) -> Option<&ScheduleEvent> {
        self.events
            .iter()
            .find(|e| e.sequence_index == sequence_index)
    }

    /// Finds a visit by id.
    pub fn event(&self, event_id: &str) -> Option<&ScheduleEvent> {
        self.events.iter().find(|e| e.id == event_id)
    }

    /// Mutable lookup by id.
    pub fn event_mut(&mut self, event_id: &str) -> Option<&mut ScheduleEvent> {
        self.events.iter_mut().find(|e| e.id == event_id)
    }

    /// Number of visits.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}
