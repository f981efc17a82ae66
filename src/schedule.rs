//! Deterministic daily hero image rotation.
//!
//! The catalog is cut into consecutive buckets of `images_per_day` images.
//! Each calendar day shows one bucket, cycling through all of them:
//!
//! ```text
//! total_days  = ceil(N / K)
//! day_index   = (days_since(reference_date) + day_offset) mod total_days
//! selection   = catalog[(day_index * K + i) mod N]  for i in 0..K
//! ```
//!
//! The last bucket of a catalog whose size is not a multiple of `K` wraps
//! around to the start of the catalog instead of coming up short, so every
//! day shows exactly `K` images.
//!
//! Nothing is stored: the cycle length follows the catalog size, so adding
//! photos lengthens the rotation without recalibration. The current date is
//! always passed in, never read from the clock here.

use crate::catalog::Catalog;
use crate::config::RotationConfig;
use crate::imaging::LayoutHint;
use crate::types::ImageRef;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Catalog is empty: the daily rotation needs at least one image")]
    EmptyCatalog,
    #[error("images_per_day must be at least 1")]
    ZeroImagesPerDay,
    #[error("Day index {index} is out of range for a {total_days}-day rotation")]
    DayIndexOutOfRange { index: usize, total_days: usize },
}

/// One selected image with its crop hints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyImage {
    pub image: ImageRef,
    pub layout: LayoutHint,
}

/// The images shown on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyImageSet {
    pub day_index: usize,
    pub total_days: usize,
    pub images: Vec<DailyImage>,
}

impl DailyImageSet {
    pub fn ids(&self) -> Vec<u32> {
        self.images.iter().map(|d| d.image.id).collect()
    }
}

/// Rotation parameters. Cheap to copy; holds no catalog state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationSchedule {
    images_per_day: usize,
    reference_date: NaiveDate,
    day_offset: i64,
}

impl RotationSchedule {
    pub fn new(
        images_per_day: usize,
        reference_date: NaiveDate,
        day_offset: i64,
    ) -> Result<Self, ScheduleError> {
        if images_per_day == 0 {
            return Err(ScheduleError::ZeroImagesPerDay);
        }
        Ok(Self {
            images_per_day,
            reference_date,
            day_offset,
        })
    }

    pub fn from_config(config: &RotationConfig) -> Result<Self, ScheduleError> {
        Self::new(
            config.images_per_day,
            config.reference_date,
            config.day_offset,
        )
    }

    pub fn images_per_day(&self) -> usize {
        self.images_per_day
    }

    /// Number of days in one full rotation: `ceil(N / K)`.
    pub fn total_days(&self, catalog_len: usize) -> Result<usize, ScheduleError> {
        if catalog_len == 0 {
            return Err(ScheduleError::EmptyCatalog);
        }
        Ok(catalog_len.div_ceil(self.images_per_day))
    }

    /// Bucket index shown on `today`.
    ///
    /// Uses Euclidean modulo so dates before the reference date still land
    /// in `0..total_days`.
    pub fn day_index(&self, today: NaiveDate, catalog_len: usize) -> Result<usize, ScheduleError> {
        let total_days = self.total_days(catalog_len)?;
        let days_since = today.signed_duration_since(self.reference_date).num_days();
        let t = total_days as i64;
        // Reduce each term first so an extreme offset cannot overflow
        let shifted = days_since.rem_euclid(t) + self.day_offset.rem_euclid(t);
        Ok(shifted.rem_euclid(t) as usize)
    }

    /// Select bucket `day_index` of `catalog`.
    pub fn select_bucket(
        &self,
        catalog: &Catalog,
        day_index: usize,
    ) -> Result<DailyImageSet, ScheduleError> {
        let images = catalog.images();
        let total_days = self.total_days(images.len())?;
        if day_index >= total_days {
            return Err(ScheduleError::DayIndexOutOfRange {
                index: day_index,
                total_days,
            });
        }

        let start = day_index * self.images_per_day;
        let selected = (0..self.images_per_day)
            .map(|i| {
                let image = images[(start + i) % images.len()].clone();
                let layout = LayoutHint::for_dimensions(image.dimensions);
                DailyImage { image, layout }
            })
            .collect();

        Ok(DailyImageSet {
            day_index,
            total_days,
            images: selected,
        })
    }

    /// The images to show on `today`. Pure: same catalog and date, same output.
    pub fn images_for(
        &self,
        catalog: &Catalog,
        today: NaiveDate,
    ) -> Result<DailyImageSet, ScheduleError> {
        let day_index = self.day_index(today, catalog.len())?;
        debug!(%today, day_index, catalog = catalog.len(), "selecting daily hero images");
        self.select_bucket(catalog, day_index)
    }

    /// Selections for `days` consecutive dates starting at `from`.
    pub fn calendar(
        &self,
        catalog: &Catalog,
        from: NaiveDate,
        days: usize,
    ) -> Result<Vec<(NaiveDate, DailyImageSet)>, ScheduleError> {
        from.iter_days()
            .take(days)
            .map(|date| Ok((date, self.images_for(catalog, date)?)))
            .collect()
    }

    /// Ids of catalog images that never appear in any bucket of a full
    /// cycle. Always empty for a valid schedule; `check` reports it.
    pub fn unshown_images(&self, catalog: &Catalog) -> Result<Vec<u32>, ScheduleError> {
        let total_days = self.total_days(catalog.len())?;
        let mut shown = BTreeSet::new();
        for day_index in 0..total_days {
            shown.extend(self.select_bucket(catalog, day_index)?.ids());
        }
        Ok(catalog
            .images()
            .iter()
            .map(|i| i.id)
            .filter(|id| !shown.contains(id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{Dimensions, Orientation};
    use crate::test_helpers::{catalog_of, date};

    fn schedule() -> RotationSchedule {
        RotationSchedule::new(11, date("2025-01-01"), 0).unwrap()
    }

    // =========================================================================
    // Cycle length
    // =========================================================================

    #[test]
    fn total_days_rounds_up() {
        assert_eq!(schedule().total_days(26), Ok(3));
        assert_eq!(schedule().total_days(22), Ok(2));
        assert_eq!(schedule().total_days(1), Ok(1));
    }

    #[test]
    fn total_days_grows_with_catalog() {
        assert_eq!(schedule().total_days(26), Ok(3));
        assert_eq!(schedule().total_days(50), Ok(5));
    }

    #[test]
    fn empty_catalog_is_error() {
        let result = schedule().images_for(&catalog_of(0), date("2025-03-01"));
        assert_eq!(result, Err(ScheduleError::EmptyCatalog));
    }

    #[test]
    fn zero_images_per_day_rejected() {
        assert_eq!(
            RotationSchedule::new(0, date("2025-01-01"), 0),
            Err(ScheduleError::ZeroImagesPerDay)
        );
    }

    // =========================================================================
    // Day index
    // =========================================================================

    #[test]
    fn reference_date_is_bucket_zero() {
        assert_eq!(schedule().day_index(date("2025-01-01"), 26), Ok(0));
    }

    #[test]
    fn consecutive_days_walk_buckets_and_wrap() {
        let s = schedule();
        let indices: Vec<usize> = date("2025-01-01")
            .iter_days()
            .take(7)
            .map(|d| s.day_index(d, 26).unwrap())
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn offset_pins_a_date_to_a_bucket() {
        let s = RotationSchedule::new(11, date("2025-01-01"), 2).unwrap();
        assert_eq!(s.day_index(date("2025-01-01"), 26), Ok(2));
        assert_eq!(s.day_index(date("2025-01-02"), 26), Ok(0));
    }

    #[test]
    fn dates_before_reference_stay_in_range() {
        let s = schedule();
        // One day before reference: -1 mod 3 == 2
        assert_eq!(s.day_index(date("2024-12-31"), 26), Ok(2));
        assert_eq!(s.day_index(date("2024-12-29"), 26), Ok(0));
    }

    #[test]
    fn extreme_offsets_do_not_overflow() {
        // 2^63 - 1 == 1 (mod 3), and -2^63 == 1 (mod 3)
        let max = RotationSchedule::new(11, date("2025-01-01"), i64::MAX).unwrap();
        assert_eq!(max.day_index(date("2025-01-02"), 26), Ok(2));
        let set = max.images_for(&catalog_of(26), date("2025-01-02")).unwrap();
        assert_eq!(set.day_index, 2);

        let min = RotationSchedule::new(11, date("2025-01-01"), i64::MIN).unwrap();
        assert_eq!(min.day_index(date("2025-01-01"), 26), Ok(1));
        assert_eq!(min.day_index(date("2024-12-31"), 26), Ok(0));
    }

    #[test]
    fn growth_keeps_existing_indices_in_range() {
        let s = schedule();
        for d in date("2025-01-01").iter_days().take(30) {
            let small = s.day_index(d, 26).unwrap();
            let large = s.day_index(d, 50).unwrap();
            assert!(small < 3);
            assert!(large < 5);
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    #[test]
    fn day_one_selects_positions_eleven_to_twenty_one() {
        let catalog = catalog_of(26);
        let set = schedule().images_for(&catalog, date("2025-01-02")).unwrap();
        assert_eq!(set.day_index, 1);
        // catalog_of numbers ids from 1, so position p has id p + 1
        assert_eq!(set.ids(), (12..=22).collect::<Vec<u32>>());
    }

    #[test]
    fn last_bucket_wraps_to_catalog_start() {
        let catalog = catalog_of(26);
        let set = schedule().select_bucket(&catalog, 2).unwrap();
        assert_eq!(set.images.len(), 11);
        assert_eq!(
            set.ids(),
            vec![23, 24, 25, 26, 1, 2, 3, 4, 5, 6, 7]
        );
    }

    #[test]
    fn small_catalog_repeats_to_fill_the_day() {
        let catalog = catalog_of(4);
        let set = schedule().images_for(&catalog, date("2025-06-01")).unwrap();
        assert_eq!(set.total_days, 1);
        assert_eq!(set.ids(), vec![1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3]);
    }

    #[test]
    fn selection_is_deterministic() {
        let catalog = catalog_of(26);
        let day = date("2025-04-17");
        assert_eq!(
            schedule().images_for(&catalog, day),
            schedule().images_for(&catalog, day)
        );
    }

    #[test]
    fn out_of_range_bucket_rejected() {
        let result = schedule().select_bucket(&catalog_of(26), 3);
        assert_eq!(
            result,
            Err(ScheduleError::DayIndexOutOfRange {
                index: 3,
                total_days: 3
            })
        );
    }

    #[test]
    fn full_cycle_covers_catalog() {
        let catalog = catalog_of(26);
        let s = schedule();
        let mut seen = BTreeSet::new();
        for day_index in 0..3 {
            seen.extend(s.select_bucket(&catalog, day_index).unwrap().ids());
        }
        assert_eq!(seen.len(), 26);
        assert_eq!(s.unshown_images(&catalog), Ok(vec![]));
    }

    #[test]
    fn selected_images_carry_layout_hints() {
        let mut images = catalog_of(2).images().to_vec();
        images[0].dimensions = Some(Dimensions::new(3024, 4032));
        images[1].dimensions = None;
        let catalog = Catalog::new(images).unwrap();

        let s = RotationSchedule::new(2, date("2025-01-01"), 0).unwrap();
        let set = s.images_for(&catalog, date("2025-01-01")).unwrap();
        assert_eq!(
            set.images[0].layout.orientation,
            Some(Orientation::Portrait)
        );
        assert_eq!(set.images[1].layout.orientation, None);
    }

    #[test]
    fn calendar_lists_consecutive_days() {
        let catalog = catalog_of(26);
        let days = schedule()
            .calendar(&catalog, date("2025-01-01"), 4)
            .unwrap();
        let summary: Vec<(String, usize)> = days
            .iter()
            .map(|(d, set)| (d.to_string(), set.day_index))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("2025-01-01".to_string(), 0),
                ("2025-01-02".to_string(), 1),
                ("2025-01-03".to_string(), 2),
                ("2025-01-04".to_string(), 0),
            ]
        );
    }
}
