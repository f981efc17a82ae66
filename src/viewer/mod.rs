//! Full-screen image viewer with zoom and pan.
//!
//! A headless state machine: the embedding UI forwards input events and
//! renders whatever [`Viewer::transform`] and [`Viewer::cursor`] say.
//!
//! ```text
//! Closed ──open()──▶ Open { scale = 1, offset = (0,0) }
//!                      │  wheel / pinch / buttons / drag / reset
//!                      ▼
//!                    Open { scale ∈ [0.5, 5] }
//!                      │  close button, backdrop click, Escape
//!                      ▼
//!                    Closed   (state discarded)
//! ```
//!
//! Every open starts from identity; nothing carries over between sessions.
//! Input that arrives while closed is ignored.
//!
//! | Input | Effect |
//! |---|---|
//! | wheel | ±0.2 zoom by scroll direction |
//! | zoom buttons | ±0.2 zoom |
//! | mouse drag / one-finger drag | pan, only while zoomed in |
//! | two-finger pinch | zoom by change in finger distance × 0.01 |
//! | reset button | back to identity |
//! | Escape, backdrop, close button | close |
//!
//! Image loading is tracked separately in [`LoadState`] and never affects
//! zoom or pan.

pub mod host;
mod state;

pub use host::{TracingHost, ViewerHost};
pub use state::{Cursor, Transform, ViewerState};

use crate::config::ViewerConfig;
use crate::types::{ImageRef, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What the viewer shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerImage {
    pub url: String,
    pub alt: String,
    pub category: String,
}

impl From<&ImageRef> for ViewerImage {
    fn from(image: &ImageRef) -> Self {
        Self {
            url: image.url.clone(),
            alt: image.alt_text.clone(),
            category: image.category.clone(),
        }
    }
}

/// Network load progress of the displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Loading,
    Loaded,
    Failed,
}

/// An input event, in the shape a host page would report it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewerEvent {
    Open { image: ViewerImage },
    Close,
    BackdropClick,
    Key { key: String },
    Wheel { delta_y: f64 },
    ZoomIn,
    ZoomOut,
    Reset,
    MouseDown { x: f64, y: f64 },
    MouseMove { x: f64, y: f64 },
    MouseUp,
    MouseLeave,
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    TouchEnd,
    ImageLoaded,
    ImageFailed,
}

#[derive(Debug)]
struct Session {
    image: ViewerImage,
    state: ViewerState,
    load: LoadState,
}

/// One viewer instance. Owns its state exclusively.
#[derive(Debug)]
pub struct Viewer<H: ViewerHost> {
    host: H,
    tuning: ViewerConfig,
    session: Option<Session>,
}

impl<H: ViewerHost> Viewer<H> {
    pub fn new(host: H, tuning: ViewerConfig) -> Self {
        Self {
            host,
            tuning,
            session: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Show `image` from identity. Opening while already open swaps the
    /// image and resets zoom without re-registering listeners.
    pub fn open(&mut self, image: ViewerImage) {
        info!(url = %image.url, "viewer opened");
        let was_open = self.session.is_some();
        self.session = Some(Session {
            image,
            state: ViewerState::new(self.tuning.clone()),
            load: LoadState::Loading,
        });
        if !was_open {
            self.host.attach_escape_listener();
            self.host.lock_scroll();
        }
    }

    /// Tear down: detach the key listener, restore scrolling, drop state,
    /// then notify the owner. A no-op when already closed.
    pub fn close(&mut self) {
        if self.session.take().is_none() {
            return;
        }
        self.host.detach_escape_listener();
        self.host.restore_scroll();
        self.host.on_close();
    }

    /// Key press routed by the host's listener. Only Escape does anything.
    pub fn key_down(&mut self, key: &str) {
        if key == "Escape" {
            self.close();
        }
    }

    pub fn backdrop_click(&mut self) {
        self.close();
    }

    pub fn image_loaded(&mut self) {
        if let Some(session) = &mut self.session {
            session.load = LoadState::Loaded;
        }
    }

    pub fn image_failed(&mut self) {
        if let Some(session) = &mut self.session {
            debug!(url = %session.image.url, "viewer image failed to load");
            session.load = LoadState::Failed;
        }
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    fn with_state(&mut self, f: impl FnOnce(&mut ViewerState)) {
        if let Some(session) = &mut self.session {
            f(&mut session.state);
        }
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.with_state(|s| s.zoom_by(delta));
    }

    pub fn wheel(&mut self, delta_y: f64) {
        self.with_state(|s| s.wheel(delta_y));
    }

    pub fn zoom_in(&mut self) {
        self.with_state(ViewerState::zoom_in);
    }

    pub fn zoom_out(&mut self) {
        self.with_state(ViewerState::zoom_out);
    }

    pub fn reset(&mut self) {
        self.with_state(ViewerState::reset);
    }

    pub fn drag_start(&mut self, pointer: Point) {
        self.with_state(|s| s.drag_start(pointer));
    }

    pub fn drag_move(&mut self, pointer: Point) {
        self.with_state(|s| s.drag_move(pointer));
    }

    pub fn drag_end(&mut self) {
        self.with_state(ViewerState::drag_end);
    }

    pub fn touch_start(&mut self, contacts: &[Point]) {
        self.with_state(|s| s.touch_start(contacts));
    }

    pub fn touch_move(&mut self, contacts: &[Point]) {
        self.with_state(|s| s.touch_move(contacts));
    }

    pub fn touch_end(&mut self) {
        self.with_state(ViewerState::touch_end);
    }

    /// Route one event to the matching operation.
    pub fn dispatch(&mut self, event: &ViewerEvent) {
        match event {
            ViewerEvent::Open { image } => self.open(image.clone()),
            ViewerEvent::Close => self.close(),
            ViewerEvent::BackdropClick => self.backdrop_click(),
            ViewerEvent::Key { key } => self.key_down(key),
            ViewerEvent::Wheel { delta_y } => self.wheel(*delta_y),
            ViewerEvent::ZoomIn => self.zoom_in(),
            ViewerEvent::ZoomOut => self.zoom_out(),
            ViewerEvent::Reset => self.reset(),
            ViewerEvent::MouseDown { x, y } => self.drag_start(Point::new(*x, *y)),
            ViewerEvent::MouseMove { x, y } => self.drag_move(Point::new(*x, *y)),
            ViewerEvent::MouseUp | ViewerEvent::MouseLeave => self.drag_end(),
            ViewerEvent::TouchStart { touches } => self.touch_start(touches),
            ViewerEvent::TouchMove { touches } => self.touch_move(touches),
            ViewerEvent::TouchEnd => self.touch_end(),
            ViewerEvent::ImageLoaded => self.image_loaded(),
            ViewerEvent::ImageFailed => self.image_failed(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn image(&self) -> Option<&ViewerImage> {
        self.session.as_ref().map(|s| &s.image)
    }

    pub fn state(&self) -> Option<&ViewerState> {
        self.session.as_ref().map(|s| &s.state)
    }

    pub fn load_state(&self) -> Option<LoadState> {
        self.session.as_ref().map(|s| s.load)
    }

    pub fn transform(&self) -> Option<Transform> {
        self.state().map(ViewerState::transform)
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.state().map(ViewerState::cursor)
    }
}
