//! Resource and worker directory models.
//!
//! Resources are the assets rotated across visits: wash vans, trucks,
//! portable rigs. Workers are the people a visit may be assigned to.
//! Neither is owned by this crate; both are read from the directory
//! endpoints of a [`ScheduleStore`](crate::store::ScheduleStore).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A resource that can be rotated across visits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Human-readable name. Empty if unnamed.
    pub name: String,
    /// Resource classification.
    pub resource_type: ResourceType,
    /// Domain-specific metadata (plate number, depot, ...).
    pub attributes: HashMap<String, String>,
}

/// Resource type classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    /// A service vehicle.
    Vehicle,
    /// Portable equipment that travels with a crew.
    Equipment,
    /// Domain-specific type.
    Custom(String),
}

/// A worker that may be assigned to a visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique worker identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the worker currently takes assignments.
    pub active: bool,
}

impl Resource {
    /// Creates a new resource.
    pub fn new(id: impl Into<String>, resource_type: ResourceType) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            resource_type,
            attributes: HashMap::new(),
        }
    }

    /// Creates a vehicle resource.
    pub fn vehicle(id: impl Into<String>) -> Self {
        Self::new(id, ResourceType::Vehicle)
    }

    /// Creates an equipment resource.
    pub fn equipment(id: impl Into<String>) -> Self {
        Self::new(id, ResourceType::Equipment)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Label shown on calendar entries: the name, or the id if unnamed.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

impl Worker {
    /// Creates an active worker.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            active: true,
        }
    }

    /// Marks the worker inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_builder() {
        let r = Resource::vehicle("V1")
            .with_name("Van North")
            .with_attribute("plate", "KA-01-1234");

        assert_eq!(r.id, "V1");
        assert_eq!(r.name, "Van North");
        assert_eq!(r.resource_type, ResourceType::Vehicle);
        assert_eq!(r.attributes["plate"], "KA-01-1234");
    }

    #[test]
    fn test_resource_label_falls_back_to_id() {
        assert_eq!(Resource::vehicle("V1").label(), "V1");
        assert_eq!(Resource::vehicle("V1").with_name("Van").label(), "Van");
        assert_eq!(
            Resource::equipment("P1").resource_type,
            ResourceType::Equipment
        );
    }

    #[test]
    fn test_worker_active_flag() {
        let w = Worker::new("W1", "Ravi");
        assert!(w.active);
        assert!(!w.inactive().active);
    }
}
