//! Shared types used by the catalog, the scheduler, and the viewer.

use crate::imaging::Dimensions;
use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// One entry of the image catalog.
///
/// Immutable once the catalog is loaded. `dimensions` is filled in when the
/// pixel size is known (always for directory catalogs, optionally for TOML
/// catalogs) and drives orientation detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: u32,
    pub url: String,
    pub category: String,
    #[serde(rename = "alt")]
    pub alt_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
}

/// A 2D point or displacement in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}
