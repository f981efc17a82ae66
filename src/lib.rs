//! # Daylight Gal
//!
//! The logic behind a school photo site's hero carousel and image viewer.
//! The site itself is static; the two pieces with real behavior live here:
//!
//! - a **daily rotation scheduler** that picks which images the hero shows
//!   today, deterministically, so every visitor sees the same set and the
//!   whole catalog is covered once per cycle, and
//! - a **gesture-driven image viewer**, modelled as a headless state
//!   machine: zoom, pan, pinch, and the close semantics, producing the
//!   render transform a page applies.
//!
//! # Rotation
//!
//! ```text
//! catalog (N images)  →  buckets of K  →  bucket (days since reference) mod ⌈N/K⌉
//! ```
//!
//! The date is always injected. Nothing in the library reads the clock
//! except the CLI, which passes in the local date.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Loads the ordered image list from a TOML file or an image directory |
//! | [`schedule`] | Day index and bucket selection for a given date |
//! | [`cache`] | Small memo of daily selections keyed by catalog version and date |
//! | [`viewer`] | Headless viewer state machine plus the host side-effect seam |
//! | [`slideshow`] | Hero auto-advance timing driven by the host's clock |
//! | [`generate`] | Static hero preview page rendered with Maud |
//! | [`config`] | `config.toml` loading, validation, and stock defaults |
//! | [`imaging`] | Dimension probing and orientation-based crop hints |
//! | [`naming`] | `NNN-name` filename convention parser for directory catalogs |
//! | [`types`] | Shared value types (`ImageRef`, `Point`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Orientation From Pixels
//!
//! Portrait photos need a higher focal point when cropped into a wide hero.
//! Orientation comes from the decoded image size, never from the file name
//! or extension. Images with unknown size get a centered crop.
//!
//! ## Viewer Without A DOM
//!
//! The viewer owns no listeners and no page. Escape handling, scroll
//! locking, and the close callback go through [`viewer::ViewerHost`], so the
//! same state machine runs under a browser shim, the CLI `replay` command,
//! and unit tests.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod generate;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod schedule;
pub mod slideshow;
pub mod types;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_helpers;
