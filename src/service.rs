//! Entry points wired to a [`ScheduleStore`].

use std::sync::Arc;

use crate::calendar::{CalendarConfig, CalendarRefresher};
use crate::error::{ConfigError, ScheduleError};
use crate::generation::cursor::month_bounds;
use crate::generation::ScheduleGenerator;
use crate::models::{ScheduleConfig, ScheduleEvent, Subscription};
use crate::mutation::ScheduleMutator;
use crate::store::ScheduleStore;

/// Creates schedules and hands out editors and calendar views over one store.
pub struct ScheduleService<S: ScheduleStore + ?Sized> {
    store: Arc<S>,
}

impl<S: ScheduleStore + ?Sized> ScheduleService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Generates a subscription's schedule and persists it.
    ///
    /// A config without resources rotates over the store's resource pool.
    /// Nothing is persisted when generation fails.
    pub async fn create_schedule(&self, config: ScheduleConfig) -> Result<Subscription, ScheduleError> {
        let mut config = config;
        if config.resource_pool.is_empty() {
            config.resource_pool = self.store.list_resource_pool().await?;
        }

        let subscription = ScheduleGenerator::generate(&config)?;
        self.store.save_subscription(&subscription).await?;

        tracing::info!(
            subscription_id = %subscription.id,
            visits = subscription.event_count(),
            "schedule created"
        );
        Ok(subscription)
    }

    /// Every event of one calendar month.
    pub async fn fetch_month(&self, year: i32, month: u32) -> Result<Vec<ScheduleEvent>, ScheduleError> {
        let (start, end) =
            month_bounds(year, month).ok_or(ConfigError::InvalidMonth { year, month })?;
        Ok(self.store.fetch_events(start, end).await?)
    }

    pub fn mutator(&self) -> ScheduleMutator<S> {
        ScheduleMutator::new(self.store.clone())
    }

    /// Calendar refresher for `year`-`month`, not yet loaded.
    pub fn calendar(
        &self,
        config: &CalendarConfig,
        year: i32,
        month: u32,
    ) -> Result<CalendarRefresher<S>, ScheduleError> {
        CalendarRefresher::new(self.store.clone(), config, year, month)
    }
}
