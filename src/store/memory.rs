use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::ScheduleStore;
use crate::error::StoreError;
use crate::models::{EventPatch, Resource, ScheduleEvent, Subscription, Worker};

#[derive(Debug, Default)]
struct StoreState {
    events: HashMap<String, ScheduleEvent>,
    subscriptions: HashMap<String, Subscription>,
    resources: Vec<Resource>,
    workers: Vec<Worker>,
}

/// In-process [`ScheduleStore`].
///
/// Writes are last-write-wins; there is no version check.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with the given directories.
    pub fn with_directories(resources: Vec<Resource>, workers: Vec<Worker>) -> Self {
        Self {
            state: RwLock::new(StoreState {
                resources,
                workers,
                ..StoreState::default()
            }),
        }
    }

    /// Stored subscription with its current events.
    pub async fn subscription(&self, subscription_id: &str) -> Option<Subscription> {
        let state = self.state.read().await;
        let mut subscription = state.subscriptions.get(subscription_id)?.clone();
        let mut events: Vec<ScheduleEvent> = state
            .events
            .values()
            .filter(|e| e.subscription_id == subscription_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.sequence_index);
        subscription.events = events;
        Some(subscription)
    }

    /// Number of stored events.
    pub async fn event_count(&self) -> usize {
        self.state.read().await.events.len()
    }
}

#[async_trait]
impl ScheduleStore for InMemoryStore {
    async fn fetch_events(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduleEvent>, StoreError> {
        let state = self.state.read().await;
        let mut events: Vec<ScheduleEvent> = state
            .events
            .values()
            .filter(|e| e.date >= start && e.date <= end)
            .cloned()
            .collect();
        events.sort_by(|a, b| {
            a.scheduled_at()
                .cmp(&b.scheduled_at())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(events)
    }

    async fn save_subscription(&self, subscription: &Subscription) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if state.subscriptions.contains_key(&subscription.id) {
            return Err(StoreError::Conflict {
                message: format!("subscription `{}` already exists", subscription.id),
            });
        }
        for event in &subscription.events {
            state.events.insert(event.id.clone(), event.clone());
        }
        let mut header = subscription.clone();
        header.events.clear();
        state.subscriptions.insert(subscription.id.clone(), header);
        Ok(())
    }

    async fn get_event(&self, event_id: &str) -> Result<ScheduleEvent, StoreError> {
        self.state
            .read()
            .await
            .events
            .get(event_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                event_id: event_id.to_string(),
            })
    }

    async fn update_event(
        &self,
        event_id: &str,
        patch: &EventPatch,
    ) -> Result<ScheduleEvent, StoreError> {
        let mut state = self.state.write().await;
        let event = state
            .events
            .get_mut(event_id)
            .ok_or_else(|| StoreError::NotFound {
                event_id: event_id.to_string(),
            })?;
        patch.write_to(event);
        Ok(event.clone())
    }

    async fn list_resource_pool(&self) -> Result<Vec<Resource>, StoreError> {
        Ok(self.state.read().await.resources.clone())
    }

    async fn list_workers(&self) -> Result<Vec<Worker>, StoreError> {
        Ok(self.state.read().await.workers.clone())
    }
}
