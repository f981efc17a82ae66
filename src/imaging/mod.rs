//! Image probing and layout hints, in pure Rust.
//!
//! | Concern | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` (header only) |
//! | **Orientation** | aspect ratio of the decoded dimensions |
//! | **Focal hints** | fixed `object-position` values per orientation |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for orientation and crop hints (unit testable)
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{LayoutHint, Orientation};
pub use rust_backend::{RustBackend, is_supported_image, supported_input_extensions};
