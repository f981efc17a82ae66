//! Pure layout calculations for responsive hero crops.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;
use serde::Serialize;

/// Aspect ratios within 1/50 (2%) of 1.0 count as square.
const SQUARE_TOLERANCE_DIVISOR: u64 = 50;

/// Shape of an image, derived from its decoded pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
    Square,
}

impl Orientation {
    /// Classify by aspect ratio (width / height).
    ///
    /// # Examples
    /// ```
    /// # use daylight_gal::imaging::{Dimensions, Orientation};
    /// assert_eq!(Orientation::from_dimensions(Dimensions::new(3024, 4032)), Orientation::Portrait);
    /// assert_eq!(Orientation::from_dimensions(Dimensions::new(1600, 900)), Orientation::Landscape);
    /// assert_eq!(Orientation::from_dimensions(Dimensions::new(1000, 990)), Orientation::Square);
    /// ```
    pub fn from_dimensions(dims: Dimensions) -> Self {
        if dims.height == 0 {
            return Orientation::Landscape;
        }
        // |w/h - 1| <= 1/50, kept in integers so the boundary is exact
        let diff = u64::from(dims.width.abs_diff(dims.height));
        if SQUARE_TOLERANCE_DIVISOR * diff <= u64::from(dims.height) {
            Orientation::Square
        } else if dims.width < dims.height {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Crop hints for one hero image: CSS `object-position` values for narrow
/// (mobile) and wide (desktop) viewports.
///
/// Portrait shots are cropped into a landscape hero frame, so their focal
/// point sits in the upper third where faces usually are. Everything else
/// crops around the centre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutHint {
    /// `None` when the image dimensions are unknown.
    pub orientation: Option<Orientation>,
    pub mobile_position: &'static str,
    pub desktop_position: &'static str,
}

impl LayoutHint {
    pub fn for_dimensions(dims: Option<Dimensions>) -> Self {
        let orientation = dims.map(Orientation::from_dimensions);
        let (mobile_position, desktop_position) = match orientation {
            Some(Orientation::Portrait) => ("center 20%", "center 30%"),
            _ => ("center", "center"),
        };
        Self {
            orientation,
            mobile_position,
            desktop_position,
        }
    }

    /// CSS class name used by the hero template.
    pub fn css_class(&self) -> &'static str {
        match self.orientation {
            Some(Orientation::Portrait) => "hero-portrait",
            Some(Orientation::Square) => "hero-square",
            Some(Orientation::Landscape) => "hero-landscape",
            None => "hero-unknown",
        }
    }
}
