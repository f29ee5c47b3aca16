//! Generation input: the schedule configuration.
//!
//! A [`ScheduleConfig`] fully determines a generated schedule. There is no
//! hidden input: the start date is a field, not the current clock, so the
//! same configuration always produces the same visits.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::Resource;

/// How visit dates are produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GenerationMode {
    /// Recurrence-rule based: advance a cursor to preferred weekdays.
    Pattern {
        /// Gap between a visit and the next search start.
        recurrence: Recurrence,
        /// Weekdays a visit may land on. Empty = every day qualifies.
        preferred_weekdays: Vec<Weekday>,
    },
    /// Even distribution of the visits across `[start_date, end_date]`.
    BulkRange {
        /// Last date of the range (inclusive).
        end_date: NaiveDate,
    },
}

/// Recurrence interval for pattern generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recurrence {
    /// Every 7 days.
    Weekly,
    /// Every 14 days.
    Biweekly,
    /// Every calendar month (same day-of-month, clamped to month end).
    Monthly,
    /// Every `n` days, `n >= 1`.
    Custom(u32),
}

impl Recurrence {
    /// Fixed day interval, or `None` for calendar-month recurrence.
    pub fn interval_days(&self) -> Option<u32> {
        match self {
            Recurrence::Weekly => Some(7),
            Recurrence::Biweekly => Some(14),
            Recurrence::Monthly => None,
            Recurrence::Custom(n) => Some(*n),
        }
    }
}

/// Customer display fields copied onto each generated visit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Customer name.
    pub name: String,
    /// Contact phone.
    pub phone: String,
    /// Service area / locality.
    pub area: String,
}

impl CustomerInfo {
    /// Creates customer display info.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        area: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            area: area.into(),
        }
    }
}

/// Input to schedule generation.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use u_service_schedule::models::{Recurrence, Resource, ScheduleConfig};
///
/// let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let config = ScheduleConfig::pattern("SUB-1", 5, start, Recurrence::Weekly)
///     .with_preferred_weekdays(vec![Weekday::Mon])
///     .with_resource(Resource::vehicle("CarA"));
/// assert_eq!(config.total_visits, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Owning subscription identifier; prefixes every event id.
    pub subscription_id: String,
    /// Package label (e.g. "Monthly Premium").
    pub package_type: String,
    /// Number of visits to generate.
    pub total_visits: u32,
    /// First date visits may be placed on.
    pub start_date: NaiveDate,
    /// Generation mode and its mode-specific parameters.
    pub mode: GenerationMode,
    /// Exclude Saturday and Sunday (pattern mode).
    pub skip_weekends: bool,
    /// Time slots rotated across visits. Must be non-empty.
    pub time_slots: Vec<NaiveTime>,
    /// Number of visits to mark [`ServiceCategory::Secondary`](super::ServiceCategory).
    pub secondary_quota: u32,
    /// Resources rotated across visits. Must be non-empty.
    pub resource_pool: Vec<Resource>,
    /// Customer display fields.
    pub customer: CustomerInfo,
}

fn default_time_slot() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
}

impl ScheduleConfig {
    fn new(
        subscription_id: impl Into<String>,
        total_visits: u32,
        start_date: NaiveDate,
        mode: GenerationMode,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            package_type: String::new(),
            total_visits,
            start_date,
            mode,
            skip_weekends: false,
            time_slots: vec![default_time_slot()],
            secondary_quota: 0,
            resource_pool: Vec::new(),
            customer: CustomerInfo::default(),
        }
    }

    /// Creates a pattern-mode configuration.
    ///
    /// Preferred weekdays default to the start date's weekday.
    pub fn pattern(
        subscription_id: impl Into<String>,
        total_visits: u32,
        start_date: NaiveDate,
        recurrence: Recurrence,
    ) -> Self {
        let mode = GenerationMode::Pattern {
            recurrence,
            preferred_weekdays: vec![start_date.weekday()],
        };
        Self::new(subscription_id, total_visits, start_date, mode)
    }

    /// Creates a bulk-range configuration over `[start_date, end_date]`.
    pub fn bulk_range(
        subscription_id: impl Into<String>,
        total_visits: u32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self::new(
            subscription_id,
            total_visits,
            start_date,
            GenerationMode::BulkRange { end_date },
        )
    }

    /// Replaces the preferred weekdays (pattern mode only; ignored otherwise).
    pub fn with_preferred_weekdays(mut self, weekdays: Vec<Weekday>) -> Self {
        if let GenerationMode::Pattern {
            preferred_weekdays, ..
        } = &mut self.mode
        {
            *preferred_weekdays = weekdays;
        }
        self
    }

    /// Sets whether weekends are skipped.
    pub fn with_skip_weekends(mut self, skip: bool) -> Self {
        self.skip_weekends = skip;
        self
    }

    /// Uses a single time slot for every visit.
    pub fn with_time_slot(mut self, slot: NaiveTime) -> Self {
        self.time_slots = vec![slot];
        self
    }

    /// Rotates the given time slots across visits.
    pub fn with_time_slots(mut self, slots: Vec<NaiveTime>) -> Self {
        self.time_slots = slots;
        self
    }

    /// Sets the secondary-category quota.
    pub fn with_secondary_quota(mut self, quota: u32) -> Self {
        self.secondary_quota = quota;
        self
    }

    /// Appends a resource to the rotation pool.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resource_pool.push(resource);
        self
    }

    /// Replaces the rotation pool.
    pub fn with_resources(mut self, resources: Vec<Resource>) -> Self {
        self.resource_pool = resources;
        self
    }

    /// Sets customer display fields.
    pub fn with_customer(mut self, customer: CustomerInfo) -> Self {
        self.customer = customer;
        self
    }

    /// Sets the package label.
    pub fn with_package_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = package_type.into();
        self
    }

    /// End of the requested range, for bulk-range configurations.
    pub fn end_date(&self) -> Option<NaiveDate> {
        match self.mode {
            GenerationMode::BulkRange { end_date } => Some(end_date),
            GenerationMode::Pattern { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_pattern_defaults_to_start_weekday() {
        // 2024-06-05 is a Wednesday
        let config = ScheduleConfig::pattern("S1", 4, date(2024, 6, 5), Recurrence::Weekly);
        match &config.mode {
            GenerationMode::Pattern {
                preferred_weekdays, ..
            } => assert_eq!(preferred_weekdays, &vec![Weekday::Wed]),
            other => panic!("unexpected mode {other:?}"),
        }
        assert_eq!(config.time_slots.len(), 1);
        assert_eq!(config.end_date(), None);
    }

    #[test]
    fn test_preferred_weekdays_ignored_for_bulk() {
        let config = ScheduleConfig::bulk_range("S1", 4, date(2024, 6, 1), date(2024, 6, 30))
            .with_preferred_weekdays(vec![Weekday::Fri]);
        assert_eq!(
            config.mode,
            GenerationMode::BulkRange {
                end_date: date(2024, 6, 30)
            }
        );
        assert_eq!(config.end_date(), Some(date(2024, 6, 30)));
    }

    #[test]
    fn test_recurrence_interval_days() {
        assert_eq!(Recurrence::Weekly.interval_days(), Some(7));
        assert_eq!(Recurrence::Biweekly.interval_days(), Some(14));
        assert_eq!(Recurrence::Monthly.interval_days(), None);
        assert_eq!(Recurrence::Custom(3).interval_days(), Some(3));
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = ScheduleConfig::pattern("S1", 3, date(2024, 6, 3), Recurrence::Custom(10))
            .with_skip_weekends(true)
            .with_secondary_quota(1)
            .with_resource(Resource::vehicle("CarA"))
            .with_customer(CustomerInfo::new("Asha", "98450", "Indiranagar"));

        let json = serde_json::to_string(&config).unwrap();
        let back: ScheduleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
