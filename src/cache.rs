//! Memoized daily selections.
//!
//! [`RotationSchedule::images_for`](crate::schedule::RotationSchedule::images_for)
//! is cheap and pure, so caching it never changes what is shown; it only
//! saves recomputing the same bucket on every render of a long-lived
//! process. Entries are keyed by `(catalog version, date)`: a new day or a
//! changed catalog is simply a different key.
//!
//! Only the most recent few keys are kept. A render loop asks for "today"
//! over and over, so a tiny cache gets essentially every hit.

use crate::catalog::Catalog;
use crate::schedule::{DailyImageSet, RotationSchedule, ScheduleError};
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::fmt;
use tracing::trace;

/// Number of `(version, date)` entries retained.
const CAPACITY: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    catalog_version: String,
    date: NaiveDate,
}

/// Summary of cache performance.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub misses: u32,
}

impl CacheStats {
    pub fn total(&self) -> u32 {
        self.hits + self.misses
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} computed ({} total)",
                self.hits,
                self.misses,
                self.total()
            )
        } else {
            write!(f, "{} computed", self.misses)
        }
    }
}

/// Small LRU of daily selections for one [`RotationSchedule`].
#[derive(Debug)]
pub struct DailyCache {
    schedule: RotationSchedule,
    entries: VecDeque<(CacheKey, DailyImageSet)>,
    stats: CacheStats,
}

impl DailyCache {
    pub fn new(schedule: RotationSchedule) -> Self {
        Self {
            schedule,
            entries: VecDeque::with_capacity(CAPACITY),
            stats: CacheStats::default(),
        }
    }

    /// Same result as `schedule.images_for(catalog, date)`, computed at most
    /// once per `(catalog version, date)` while the entry stays cached.
    pub fn images_for(
        &mut self,
        catalog: &Catalog,
        date: NaiveDate,
    ) -> Result<DailyImageSet, ScheduleError> {
        let key = CacheKey {
            catalog_version: catalog.version().to_string(),
            date,
        };

        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            self.stats.hits += 1;
            trace!(%date, "daily selection cache hit");
            // Move to the back so the most recently used entry survives eviction
            let entry = self.entries.remove(pos).map(|(_, set)| set);
            if let Some(set) = entry {
                self.entries.push_back((key, set.clone()));
                return Ok(set);
            }
        }

        self.stats.misses += 1;
        let set = self.schedule.images_for(catalog, date)?;
        if self.entries.len() == CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back((key, set.clone()));
        Ok(set)
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{catalog_of, date};

    fn cache() -> DailyCache {
        DailyCache::new(RotationSchedule::new(11, date("2025-01-01"), 0).unwrap())
    }

    #[test]
    fn second_lookup_same_day_is_a_hit() {
        let catalog = catalog_of(26);
        let mut c = cache();
        let first = c.images_for(&catalog, date("2025-01-02")).unwrap();
        let second = c.images_for(&catalog, date("2025-01-02")).unwrap();
        assert_eq!(first, second);
        assert_eq!(c.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn cached_result_matches_direct_computation() {
        let catalog = catalog_of(26);
        let schedule = RotationSchedule::new(11, date("2025-01-01"), 0).unwrap();
        let mut c = DailyCache::new(schedule);
        for d in date("2025-01-01").iter_days().take(10) {
            assert_eq!(
                c.images_for(&catalog, d).unwrap(),
                schedule.images_for(&catalog, d).unwrap()
            );
        }
    }

    #[test]
    fn catalog_change_is_a_miss() {
        let mut c = cache();
        c.images_for(&catalog_of(26), date("2025-01-02")).unwrap();
        let grown = c.images_for(&catalog_of(50), date("2025-01-02")).unwrap();
        assert_eq!(grown.total_days, 5);
        assert_eq!(c.stats().misses, 2);
    }

    #[test]
    fn capacity_is_bounded() {
        let catalog = catalog_of(26);
        let mut c = cache();
        for d in date("2025-01-01").iter_days().take(10) {
            c.images_for(&catalog, d).unwrap();
        }
        assert_eq!(c.len(), CAPACITY);
    }

    #[test]
    fn errors_are_not_cached() {
        let mut c = cache();
        assert!(c.images_for(&catalog_of(0), date("2025-01-01")).is_err());
        assert!(c.is_empty());
    }

    #[test]
    fn stats_display() {
        let stats = CacheStats { hits: 3, misses: 1 };
        assert_eq!(stats.to_string(), "3 cached, 1 computed (4 total)");
        let cold = CacheStats { hits: 0, misses: 2 };
        assert_eq!(cold.to_string(), "2 computed");
    }
}
