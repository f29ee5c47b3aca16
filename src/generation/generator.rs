//! Schedule generation entry point.
//!
//! # Pipeline
//!
//! ```text
//! ScheduleConfig
//!   -> validate_config
//!   -> PatternGenerator | BulkDistributor   (dates)
//!   -> QuotaAllocator                       (categories)
//!   -> ResourceRotator + time slot rotation (resources, slots)
//!   -> Subscription { events }
//! ```
//!
//! Generation is a pure function of the configuration. It is run on an
//! explicit request, never as a side effect of editing the configuration,
//! and it reads no clock.

use crate::error::ScheduleError;
use crate::models::{
    EventStatus, GenerationMode, ScheduleConfig, ScheduleEvent, ServiceCategory, Subscription,
};
use crate::validation::validate_config;

use super::bulk::BulkDistributor;
use super::pattern::PatternGenerator;
use super::quota::QuotaAllocator;
use super::rotation::{pick_cyclic, ResourceRotator};

/// Builds the visit sequence for a configuration.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_service_schedule::generation::ScheduleGenerator;
/// use u_service_schedule::models::{Resource, ScheduleConfig};
///
/// let config = ScheduleConfig::bulk_range(
///     "SUB-1",
///     4,
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
/// )
/// .with_resource(Resource::vehicle("CarA"));
///
/// let subscription = ScheduleGenerator::generate(&config).unwrap();
/// assert_eq!(subscription.event_count(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleGenerator;

impl ScheduleGenerator {
    /// Validates `config` and generates its subscription.
    ///
    /// Fails wholesale; a truncated schedule is never returned.
    pub fn generate(config: &ScheduleConfig) -> Result<Subscription, ScheduleError> {
        validate_config(config)?;

        let dates = match &config.mode {
            GenerationMode::Pattern {
                recurrence,
                preferred_weekdays,
            } => PatternGenerator::new(*recurrence, preferred_weekdays.clone())
                .with_skip_weekends(config.skip_weekends)
                .generate(config.start_date, config.total_visits)?,
            GenerationMode::BulkRange { end_date } => {
                BulkDistributor::new(config.start_date, *end_date)
                    .distribute(config.total_visits)?
            }
        };

        let total = dates.len();
        let categories = QuotaAllocator::new(config.secondary_quota as usize).allocate(total);
        let resources = ResourceRotator::new(&config.resource_pool).assign(total);

        let events = dates
            .into_iter()
            .zip(categories)
            .zip(resources)
            .enumerate()
            .filter_map(|(i, ((date, category), resource))| {
                let time_slot = *pick_cyclic(&config.time_slots, i)?;
                Some(ScheduleEvent {
                    id: format!("{}-{}", config.subscription_id, i),
                    subscription_id: config.subscription_id.clone(),
                    sequence_index: i as u32,
                    date,
                    time_slot,
                    service_category: category,
                    resource: resource.id.clone(),
                    resource_label: resource.label().to_string(),
                    status: EventStatus::Scheduled,
                    assigned_worker: None,
                    customer: config.customer.clone(),
                })
            })
            .collect::<Vec<_>>();

        let mut subscription = Subscription::new(
            &config.subscription_id,
            &config.package_type,
            config.total_visits,
        );
        subscription.events = events;

        tracing::debug!(
            subscription_id = %subscription.id,
            visits = subscription.event_count(),
            secondary = subscription.count_category(ServiceCategory::Secondary),
            "generated schedule"
        );

        Ok(subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomerInfo, Recurrence, Resource};
    use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn cars() -> Vec<Resource> {
        vec![
            Resource::vehicle("CarA").with_name("Van A"),
            Resource::vehicle("CarB"),
        ]
    }

    #[test]
    fn test_weekly_pattern_schedule() {
        let config = ScheduleConfig::pattern("S1", 5, date(2024, 6, 3), Recurrence::Weekly)
            .with_preferred_weekdays(vec![Weekday::Mon])
            .with_secondary_quota(2)
            .with_resources(cars())
            .with_time_slots(vec![time(9, 0), time(14, 30)])
            .with_customer(CustomerInfo::new("Asha", "98450", "Indiranagar"))
            .with_package_type("Monthly Premium");

        let sub = ScheduleGenerator::generate(&config).unwrap();

        assert_eq!(sub.id, "S1");
        assert_eq!(sub.package_type, "Monthly Premium");
        assert_eq!(sub.event_count(), 5);
        assert_eq!(sub.completed_visits(), 0);

        let dates: Vec<NaiveDate> = sub.events.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 6, 3),
                date(2024, 6, 10),
                date(2024, 6, 17),
                date(2024, 6, 24),
                date(2024, 7, 1),
            ]
        );

        let resources: Vec<&str> = sub.events.iter().map(|e| e.resource.as_str()).collect();
        assert_eq!(resources, vec!["CarA", "CarB", "CarA", "CarB", "CarA"]);
        assert_eq!(sub.events[0].resource_label, "Van A");
        assert_eq!(sub.events[1].resource_label, "CarB");

        assert_eq!(sub.events[0].time_slot, time(9, 0));
        assert_eq!(sub.events[1].time_slot, time(14, 30));
        assert_eq!(sub.events[2].time_slot, time(9, 0));

        assert_eq!(sub.events[3].id, "S1-3");
        assert_eq!(sub.events[3].sequence_index, 3);
        assert_eq!(sub.events[4].customer.area, "Indiranagar");
        assert!(sub
            .events
            .iter()
            .all(|e| e.status == EventStatus::Scheduled && e.assigned_worker.is_none()));
        assert_eq!(sub.count_category(ServiceCategory::Secondary), 2);
    }

    #[test]
    fn test_bulk_range_schedule() {
        let config = ScheduleConfig::bulk_range("S2", 4, date(2024, 6, 1), date(2024, 6, 30))
            .with_resources(cars())
            .with_secondary_quota(1);

        let sub = ScheduleGenerator::generate(&config).unwrap();
        let dates: Vec<NaiveDate> = sub.events.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 6, 1),
                date(2024, 6, 8),
                date(2024, 6, 15),
                date(2024, 6, 22),
            ]
        );
        assert_eq!(sub.events[0].service_category, ServiceCategory::Secondary);
        assert_eq!(sub.count_category(ServiceCategory::Secondary), 1);
    }

    #[test]
    fn test_invalid_config_produces_nothing() {
        let config = ScheduleConfig::pattern("S3", 4, date(2024, 6, 3), Recurrence::Weekly);
        let err = ScheduleGenerator::generate(&config).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidConfig { .. }));
    }

    #[test]
    fn test_quota_above_total_rejected() {
        let config = ScheduleConfig::pattern("S3", 4, date(2024, 6, 3), Recurrence::Weekly)
            .with_resources(cars())
            .with_secondary_quota(5);
        let err = ScheduleGenerator::generate(&config).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::QuotaOutOfRange {
                quota: 5,
                total_visits: 4
            }
        ));
    }

    #[test]
    fn test_unsatisfiable_pattern_aborts() {
        let config = ScheduleConfig::pattern("S4", 4, date(2024, 6, 3), Recurrence::Weekly)
            .with_preferred_weekdays(vec![Weekday::Sun])
            .with_skip_weekends(true)
            .with_resources(cars());
        let err = ScheduleGenerator::generate(&config).unwrap_err();
        assert!(matches!(err, ScheduleError::ScheduleUnsatisfiable { .. }));
    }

    /// Count conservation, ordering, membership, rotation and quota over
    /// many seeded random configurations.
    #[test]
    fn test_generation_invariants_randomized() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0001);
        let weekdays = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];

        for run in 0..300 {
            let total: u32 = rng.random_range(1..=40);
            let quota: u32 = rng.random_range(0..=total);
            let start = date(2024, 1, 1) + chrono::Days::new(rng.random_range(0..365));
            let pool_size = rng.random_range(1..=4);
            let pool: Vec<Resource> = (0..pool_size)
                .map(|i| Resource::vehicle(format!("V{i}")))
                .collect();

            let config = (if rng.random_bool(0.5) {
                let recurrence = match rng.random_range(0..4) {
                    0 => Recurrence::Weekly,
                    1 => Recurrence::Biweekly,
                    2 => Recurrence::Monthly,
                    _ => Recurrence::Custom(rng.random_range(1..=10)),
                };
                // at least one weekday so skip_weekends stays satisfiable
                let mut preferred = vec![weekdays[rng.random_range(0..5)]];
                if rng.random_bool(0.5) {
                    preferred.push(weekdays[rng.random_range(0..7)]);
                }
                ScheduleConfig::pattern(format!("R{run}"), total, start, recurrence)
                    .with_preferred_weekdays(preferred)
                    .with_skip_weekends(rng.random_bool(0.5))
            } else {
                let end = start + chrono::Days::new(rng.random_range(0..120));
                ScheduleConfig::bulk_range(format!("R{run}"), total, start, end)
            })
            .with_secondary_quota(quota)
            .with_resources(pool.clone());

            let sub = ScheduleGenerator::generate(&config).unwrap();

            assert_eq!(sub.event_count(), total as usize, "run {run}");
            assert!(sub.events.windows(2).all(|w| w[0].date <= w[1].date));
            assert_eq!(sub.count_category(ServiceCategory::Secondary), quota as usize);

            for (i, event) in sub.events.iter().enumerate() {
                assert_eq!(event.resource, pool[i % pool.len()].id);
            }

            match &config.mode {
                GenerationMode::Pattern {
                    preferred_weekdays, ..
                } => {
                    assert!(sub.events.windows(2).all(|w| w[0].date < w[1].date));
                    for e in &sub.events {
                        assert!(preferred_weekdays.contains(&e.date.weekday()));
                        if config.skip_weekends {
                            assert!(!matches!(e.date.weekday(), Weekday::Sat | Weekday::Sun));
                        }
                    }
                }
                GenerationMode::BulkRange { end_date } => {
                    assert_eq!(sub.events[0].date, config.start_date);
                    assert!(sub
                        .events
                        .iter()
                        .all(|e| e.date >= config.start_date && e.date <= *end_date));
                }
            }
        }
    }
}
