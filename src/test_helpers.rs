//! Shared test utilities.
//!
//! Synthetic catalogs for rotation tests, date parsing shorthand, and
//! filesystem helpers for directory-scan tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let catalog = catalog_of(26);
//! let set = schedule.images_for(&catalog, date("2025-01-02")).unwrap();
//! assert_eq!(set.ids()[0], 12);
//! ```

use chrono::NaiveDate;
use std::path::Path;

use crate::catalog::Catalog;
use crate::types::ImageRef;

// =========================================================================
// Catalogs
// =========================================================================

/// A catalog of `n` images with ids `1..=n`.
///
/// The first half (rounded up) is filed under "Campus", the rest under
/// "Events". Urls are `photos/NNN.jpg`, alt text is `Photo N`. No
/// dimensions, so every image gets the centered crop.
pub fn catalog_of(n: u32) -> Catalog {
    let split = n.div_ceil(2);
    let images = (1..=n)
        .map(|id| ImageRef {
            id,
            url: format!("photos/{:0>3}.jpg", id),
            category: if id <= split { "Campus" } else { "Events" }.to_string(),
            alt_text: format!("Photo {}", id),
            dimensions: None,
        })
        .collect();
    Catalog::new(images).unwrap()
}

/// Parse a `YYYY-MM-DD` literal.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// =========================================================================
// Filesystem
// =========================================================================

/// Create an empty file, making parent directories as needed.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"").unwrap();
}

/// Write a black `width`x`height` PNG.
pub fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    image::RgbImage::new(width, height).save(path).unwrap();
}
