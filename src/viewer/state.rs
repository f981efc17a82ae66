//! Zoom and pan state of one open viewer.
//!
//! All coordinates are screen pixels. The offset is stored in screen terms
//! and divided by the scale only when building the render [`Transform`].

use crate::config::ViewerConfig;
use crate::types::Point;
use serde::Serialize;

/// Scales this close to 1.0 are snapped to exactly 1.0. Repeated ±0.2 steps
/// accumulate float error and would otherwise never land on identity.
const SNAP_EPSILON: f64 = 1e-9;

/// The transform applied to the image: `scale(S) translate(X/S, Y/S)`.
///
/// The translation is divided by the scale because it is applied after
/// scaling; this keeps a drag of N screen pixels moving the image N screen
/// pixels at every zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub scale: f64,
    pub translate: Point,
}

impl Transform {
    pub fn to_css(&self) -> String {
        format!(
            "scale({}) translate({}px, {}px)",
            self.scale, self.translate.x, self.translate.y
        )
    }
}

/// Pointer cursor to show over the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cursor {
    Grabbing,
    Grab,
    ZoomIn,
}

impl Cursor {
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Grabbing => "grabbing",
            Cursor::Grab => "grab",
            Cursor::ZoomIn => "zoom-in",
        }
    }
}

/// Zoom/pan state, created at identity when the viewer opens.
///
/// Invariants:
/// - `scale` stays within `[min_scale, max_scale]`
/// - `offset` is `(0, 0)` whenever `scale <= 1`
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    tuning: ViewerConfig,
    scale: f64,
    offset: Point,
    drag_anchor: Option<Point>,
    is_dragging: bool,
    last_pinch_distance: Option<f64>,
    /// Contact count seen by the last touch start.
    touch_contacts: usize,
}

impl ViewerState {
    pub fn new(tuning: ViewerConfig) -> Self {
        Self {
            tuning,
            scale: 1.0,
            offset: Point::ORIGIN,
            drag_anchor: None,
            is_dragging: false,
            last_pinch_distance: None,
            touch_contacts: 0,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn drag_anchor(&self) -> Option<Point> {
        self.drag_anchor
    }

    pub fn last_pinch_distance(&self) -> Option<f64> {
        self.last_pinch_distance
    }

    fn is_zoomed(&self) -> bool {
        self.scale > 1.0
    }

    // =========================================================================
    // Zoom
    // =========================================================================

    /// Add `delta` to the scale, clamped to the configured range.
    pub fn zoom_by(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        let mut next = (self.scale + delta).clamp(self.tuning.min_scale, self.tuning.max_scale);
        if (next - 1.0).abs() < SNAP_EPSILON {
            next = 1.0;
        }
        self.scale = next;
        if !self.is_zoomed() {
            self.offset = Point::ORIGIN;
        }
    }

    /// One wheel notch: scrolling down/toward zooms out, anything else
    /// (including a purely horizontal scroll with `delta_y == 0`) zooms in.
    pub fn wheel(&mut self, delta_y: f64) {
        if delta_y > 0.0 {
            self.zoom_by(-self.tuning.wheel_step);
        } else {
            self.zoom_by(self.tuning.wheel_step);
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(self.tuning.button_step);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(-self.tuning.button_step);
    }

    /// Back to identity, whatever the current state.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.offset = Point::ORIGIN;
    }

    // =========================================================================
    // Drag
    // =========================================================================

    /// Arm a drag at `pointer`. Ignored unless zoomed in.
    ///
    /// The anchor is stored as `pointer - offset` so each move computes an
    /// absolute offset rather than accumulating deltas.
    pub fn drag_start(&mut self, pointer: Point) {
        if self.is_zoomed() {
            self.is_dragging = true;
            self.drag_anchor = Some(pointer - self.offset);
        }
    }

    /// Move the image with the pointer. No bounds: the image can be panned
    /// arbitrarily far.
    pub fn drag_move(&mut self, pointer: Point) {
        if self.is_dragging
            && self.is_zoomed()
            && let Some(anchor) = self.drag_anchor
        {
            self.offset = pointer - anchor;
        }
    }

    /// Stop dragging. The anchor is left in place; it is only read while dragging.
    pub fn drag_end(&mut self) {
        self.is_dragging = false;
    }

    // =========================================================================
    // Touch
    // =========================================================================

    /// New touch contact set. Two contacts start a pinch; one contact on a
    /// zoomed image starts a pan.
    pub fn touch_start(&mut self, contacts: &[Point]) {
        self.touch_contacts = contacts.len();
        match contacts {
            [a, b] => self.last_pinch_distance = Some(a.distance_to(*b)),
            [p] => self.drag_start(*p),
            _ => {}
        }
    }

    /// Contacts moved.
    ///
    /// Pinch zoom follows the change since the previous move, not since the
    /// gesture began, so a dropped frame cannot cause a jump.
    pub fn touch_move(&mut self, contacts: &[Point]) {
        match contacts {
            [a, b] if self.touch_contacts == 2 => {
                let distance = a.distance_to(*b);
                if let Some(last) = self.last_pinch_distance {
                    self.zoom_by((distance - last) * self.tuning.pinch_sensitivity);
                }
                self.last_pinch_distance = Some(distance);
            }
            [p] => self.drag_move(*p),
            _ => {}
        }
    }

    /// All contacts lifted (or the gesture was cancelled).
    pub fn touch_end(&mut self) {
        self.touch_contacts = 0;
        self.last_pinch_distance = None;
        self.is_dragging = false;
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    pub fn transform(&self) -> Transform {
        Transform {
            scale: self.scale,
            translate: Point::new(self.offset.x / self.scale, self.offset.y / self.scale),
        }
    }

    pub fn cursor(&self) -> Cursor {
        if self.is_dragging {
            Cursor::Grabbing
        } else if self.is_zoomed() {
            Cursor::Grab
        } else {
            Cursor::ZoomIn
        }
    }
}
