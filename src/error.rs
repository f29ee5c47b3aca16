//! Error taxonomy.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::EventStatus;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Errors raised by generation, editing and refresh.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid schedule configuration: {}", join_messages(.errors))]
    InvalidConfig { errors: Vec<ValidationError> },
    #[error("secondary quota {quota} exceeds total visits {total_visits}")]
    QuotaOutOfRange { quota: u32, total_visits: u32 },
    #[error("cannot distribute {total_visits} visit(s) over {start}..={end}")]
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
        total_visits: u32,
    },
    #[error("no qualifying date for visit {visit_index} within {scanned_days} days")]
    ScheduleUnsatisfiable {
        visit_index: u32,
        scanned_days: u32,
    },
    #[error("event `{event_id}` cannot move from {from} to {to}")]
    InvalidTransition {
        event_id: String,
        from: EventStatus,
        to: EventStatus,
    },
    #[error("resource `{resource_id}` is not in the resource pool")]
    UnknownResource { resource_id: String },
    #[error("worker `{worker_id}` is not an active worker")]
    UnknownWorker { worker_id: String },
    #[error("superseded refresh {ticket} discarded")]
    StaleFetchDiscarded { ticket: u64 },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by a [`ScheduleStore`](crate::store::ScheduleStore).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("event `{event_id}` not found")]
    NotFound { event_id: String },
    #[error("store transport failed: {message}")]
    Transport { message: String },
    #[error("store rejected write: {message}")]
    Conflict { message: String },
}

/// Errors raised while validating calendar and refresh settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("overflow threshold must be at least 1, got {value}")]
    InvalidOverflowThreshold { value: usize },
    #[error("refresh interval must be at least 1 second, got {value}")]
    InvalidRefreshInterval { value: u64 },
    #[error("{year}-{month} is not a calendar month")]
    InvalidMonth { year: i32, month: u32 },
}

impl From<Vec<ValidationError>> for ScheduleError {
    /// A lone quota problem is reported as [`ScheduleError::QuotaOutOfRange`];
    /// anything else carries the full list.
    fn from(errors: Vec<ValidationError>) -> Self {
        if let [only] = errors.as_slice() {
            if let ValidationErrorKind::QuotaOutOfRange { quota, total_visits } = only.kind {
                return ScheduleError::QuotaOutOfRange {
                    quota,
                    total_visits,
                };
            }
        }
        ScheduleError::InvalidConfig { errors }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
