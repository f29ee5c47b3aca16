//! Service schedule domain models.
//!
//! Provides the data types for describing a recurring visit schedule
//! (input configuration) and the visits it produces.
//!
//! # Domain Mappings
//!
//! | u-service-schedule | Car wash | Pest control | Home nursing |
//! |--------------------|----------|--------------|--------------|
//! | ScheduleEvent | Wash visit | Treatment | Home visit |
//! | ServiceCategory | Exterior / Interior | Routine / Deep | Check-up / Procedure |
//! | Resource | Wash van | Spray rig | Vehicle |
//! | Subscription | Wash package | Annual contract | Care plan |

mod config;
mod event;
mod resource;
mod subscription;

pub use config::{CustomerInfo, GenerationMode, Recurrence, ScheduleConfig};
pub use event::{EventPatch, EventStatus, ScheduleEvent, ServiceCategory};
pub use resource::{Resource, ResourceType, Worker};
pub use subscription::Subscription;
