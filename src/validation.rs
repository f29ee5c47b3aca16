//! Input validation for schedule configurations.
//!
//! Checks structural integrity of a [`ScheduleConfig`] before any
//! generation runs. Detects:
//! - Non-positive visit counts
//! - Empty or duplicated resource pools
//! - Reversed date ranges
//! - Secondary quotas above the visit count
//! - Empty time slot lists and zero-day custom intervals
//!
//! Every problem is reported at once so the caller can correct the
//! configuration in a single pass. No partial schedule is ever produced
//! from an invalid configuration.

use std::collections::HashSet;

use crate::models::{GenerationMode, Recurrence, ScheduleConfig};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// `total_visits` is zero.
    NonPositiveVisits,
    /// The resource pool has no entries.
    EmptyResourcePool,
    /// Two resources share the same ID.
    DuplicateResourceId,
    /// `end_date` precedes `start_date`.
    InvalidRange,
    /// `secondary_quota` exceeds `total_visits`.
    QuotaOutOfRange { quota: u32, total_visits: u32 },
    /// No time slot to assign.
    EmptyTimeSlots,
    /// A custom recurrence of zero days.
    InvalidInterval,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a schedule configuration.
///
/// Checks:
/// 1. At least one visit is requested
/// 2. The resource pool is non-empty with unique IDs
/// 3. Bulk ranges are not reversed
/// 4. Custom recurrences advance at least one day
/// 5. The secondary quota does not exceed the visit count
/// 6. At least one time slot is configured
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &ScheduleConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.total_visits == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveVisits,
            "total visits must be greater than zero",
        ));
    }

    if config.resource_pool.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyResourcePool,
            "resource pool is empty",
        ));
    }

    let mut resource_ids = HashSet::new();
    for r in &config.resource_pool {
        if !resource_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateResourceId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }
    }

    match &config.mode {
        GenerationMode::BulkRange { end_date } => {
            if *end_date < config.start_date {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidRange,
                    format!(
                        "end date {end_date} is before start date {}",
                        config.start_date
                    ),
                ));
            }
        }
        GenerationMode::Pattern { recurrence, .. } => {
            if *recurrence == Recurrence::Custom(0) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidInterval,
                    "custom recurrence must advance at least one day",
                ));
            }
        }
    }

    if config.secondary_quota > config.total_visits {
        errors.push(ValidationError::new(
            ValidationErrorKind::QuotaOutOfRange {
                quota: config.secondary_quota,
                total_visits: config.total_visits,
            },
            format!(
                "secondary quota {} exceeds total visits {}",
                config.secondary_quota, config.total_visits
            ),
        ));
    }

    if config.time_slots.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyTimeSlots,
            "at least one time slot is required",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
