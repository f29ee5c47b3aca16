//! Visit sequence indicators.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completed / Missed / Cancelled / Scheduled | Visits per status |
//! | Secondary | Visits marked with the secondary category |
//! | Completion rate | Completed / total |
//! | Visits by resource | Visit count per resource id |
//! | First / last date | Date span of the sequence |

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::models::{EventStatus, ScheduleEvent, ServiceCategory};

/// Counts and spans over a set of visits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleSummary {
    /// Number of visits.
    pub total: usize,
    /// Visits still scheduled.
    pub scheduled: usize,
    /// Completed visits.
    pub completed: usize,
    /// Missed visits.
    pub missed: usize,
    /// Cancelled visits.
    pub cancelled: usize,
    /// Visits marked secondary.
    pub secondary: usize,
    /// Fraction completed (0.0..1.0).
    pub completion_rate: f64,
    /// Visit count per resource id.
    pub visits_by_resource: HashMap<String, usize>,
    /// Earliest visit date.
    pub first_date: Option<NaiveDate>,
    /// Latest visit date.
    pub last_date: Option<NaiveDate>,
}

impl ScheduleSummary {
    /// Computes the summary of `events`.
    pub fn calculate(events: &[ScheduleEvent]) -> Self {
        let mut summary = Self {
            total: events.len(),
            ..Self::default()
        };

        for event in events {
            match event.status {
                EventStatus::Scheduled => summary.scheduled += 1,
                EventStatus::Completed => summary.completed += 1,
                EventStatus::Missed => summary.missed += 1,
                EventStatus::Cancelled => summary.cancelled += 1,
            }
            if event.service_category == ServiceCategory::Secondary {
                summary.secondary += 1;
            }
            *summary
                .visits_by_resource
                .entry(event.resource.clone())
                .or_insert(0) += 1;
        }

        summary.first_date = events.iter().map(|e| e.date).min();
        summary.last_date = events.iter().map(|e| e.date).max();
        if summary.total > 0 {
            summary.completion_rate = summary.completed as f64 / summary.total as f64;
        }
        summary
    }

    /// Visits not yet completed.
    pub fn remaining(&self) -> usize {
        self.total - self.completed
    }
}
