//! Cyclic resource rotation.
//!
//! Visit `i` receives `pool[i mod K]`. Pure, stateless, order-preserving.

use crate::models::Resource;

/// Picks `items[index mod len]`, or `None` for an empty slice.
#[inline]
pub fn pick_cyclic<T>(items: &[T], index: usize) -> Option<&T> {
    if items.is_empty() {
        None
    } else {
        items.get(index % items.len())
    }
}

/// Assigns resources from a pool in round-robin order.
#[derive(Debug, Clone, Copy)]
pub struct ResourceRotator<'a> {
    pool: &'a [Resource],
}

impl<'a> ResourceRotator<'a> {
    /// Creates a rotator over `pool`.
    pub fn new(pool: &'a [Resource]) -> Self {
        Self { pool }
    }

    /// Rotation period.
    pub fn period(&self) -> usize {
        self.pool.len()
    }

    /// Resource for visit `index`; `None` only for an empty pool.
    pub fn resource_for(&self, index: usize) -> Option<&'a Resource> {
        pick_cyclic(self.pool, index)
    }

    /// Resources for visits `0..total`, in order.
    pub fn assign(&self, total: usize) -> Vec<&'a Resource> {
        (0..total).filter_map(|i| self.resource_for(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_cars_five_visits() {
        let pool = vec![Resource::vehicle("CarA"), Resource::vehicle("CarB")];
        let ids: Vec<&str> = ResourceRotator::new(&pool)
            .assign(5)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["CarA", "CarB", "CarA", "CarB", "CarA"]);
    }

    #[test]
    fn test_rotation_period() {
        let pool = vec![
            Resource::vehicle("V1"),
            Resource::vehicle("V2"),
            Resource::vehicle("V3"),
        ];
        let rotator = ResourceRotator::new(&pool);
        assert_eq!(rotator.period(), 3);
        for i in 0..30 {
            assert_eq!(
                rotator.resource_for(i).map(|r| &r.id),
                rotator.resource_for(i % 3).map(|r| &r.id)
            );
        }
    }

    #[test]
    fn test_empty_pool() {
        let rotator = ResourceRotator::new(&[]);
        assert!(rotator.resource_for(0).is_none());
        assert!(rotator.assign(3).is_empty());
        assert_eq!(pick_cyclic::<u8>(&[], 4), None);
    }
}
