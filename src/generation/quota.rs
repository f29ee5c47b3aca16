//! Secondary-category quota allocation.
//!
//! # Algorithm
//!
//! ```text
//! spacing = total / quota
//! mark i as Secondary while marked < quota and
//!     i % spacing == 0  or  i % spacing == spacing / 2
//! ```
//!
//! Each spacing window offers up to two candidate slots, which spreads the
//! marks through the sequence instead of clustering them at the start. The
//! quota is a hard cap: once it is reached every later index is Primary.
//! If `spacing` comes out as zero the first `quota` indices are marked.
//!
//! The scheme is best-effort. It never exceeds the quota, and for
//! `quota <= total` every spacing window holds at least one candidate, so
//! the quota is met exactly.

use crate::models::ServiceCategory;

/// Marks a quota of visits as [`ServiceCategory::Secondary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaAllocator {
    quota: usize,
}

impl QuotaAllocator {
    /// Creates an allocator for `quota` secondary visits.
    pub fn new(quota: usize) -> Self {
        Self { quota }
    }

    /// Window length between secondary marks, or `None` when nothing is marked.
    pub fn spacing(&self, total: usize) -> Option<usize> {
        if self.quota == 0 {
            None
        } else {
            Some(total / self.quota)
        }
    }

    /// Category for each of `total` visits, in index order.
    pub fn allocate(&self, total: usize) -> Vec<ServiceCategory> {
        let mut categories = vec![ServiceCategory::Primary; total];
        let Some(spacing) = self.spacing(total) else {
            return categories;
        };

        if spacing == 0 {
            for category in categories.iter_mut().take(self.quota) {
                *category = ServiceCategory::Secondary;
            }
            return categories;
        }

        let half = spacing / 2;
        let mut marked = 0;
        for (i, category) in categories.iter_mut().enumerate() {
            if marked == self.quota {
                break;
            }
            let offset = i % spacing;
            if offset == 0 || offset == half {
                *category = ServiceCategory::Secondary;
                marked += 1;
            }
        }
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secondary_indices(categories: &[ServiceCategory]) -> Vec<usize> {
        categories
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == ServiceCategory::Secondary)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_ten_visits_quota_three() {
        let alloc = QuotaAllocator::new(3);
        assert_eq!(alloc.spacing(10), Some(3));

        let categories = alloc.allocate(10);
        // spacing 3, half 1: offsets 0 and 1 qualify
        assert_eq!(secondary_indices(&categories), vec![0, 1, 3]);
        assert_eq!(
            categories
                .iter()
                .filter(|c| **c == ServiceCategory::Primary)
                .count(),
            7
        );
    }

    #[test]
    fn test_zero_quota_all_primary() {
        let categories = QuotaAllocator::new(0).allocate(6);
        assert!(categories.iter().all(|c| *c == ServiceCategory::Primary));
        assert_eq!(QuotaAllocator::new(0).spacing(6), None);
    }

    #[test]
    fn test_quota_equal_to_total() {
        let categories = QuotaAllocator::new(4).allocate(4);
        assert!(categories.iter().all(|c| *c == ServiceCategory::Secondary));
    }

    #[test]
    fn test_zero_spacing_falls_back_to_prefix() {
        // quota > total gives spacing 0
        let categories = QuotaAllocator::new(5).allocate(3);
        assert_eq!(secondary_indices(&categories), vec![0, 1, 2]);
    }

    #[test]
    fn test_wide_spacing_spreads_marks() {
        // spacing 6, half 3: 0, 3, 6, 9
        let categories = QuotaAllocator::new(4).allocate(24);
        assert_eq!(secondary_indices(&categories), vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_quota_met_for_all_small_pairs() {
        for total in 1..=40usize {
            for quota in 0..=total {
                let count = QuotaAllocator::new(quota)
                    .allocate(total)
                    .iter()
                    .filter(|c| **c == ServiceCategory::Secondary)
                    .count();
                assert_eq!(count, quota, "total={total} quota={quota}");
            }
        }
    }
}
