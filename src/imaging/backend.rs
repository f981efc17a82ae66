//! Image probing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between catalog scanning and the
//! actual decoders. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests use a recording
//! mock so scanning logic runs without real image files.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to probe {path}: {reason}")]
    ProbeFailed { path: String, reason: String },
}

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Reads image dimensions from disk.
///
/// `Sync` so scans can probe files from rayon workers.
pub trait ImageBackend: Sync {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock backend answering from a filename → dimensions table.
    /// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
    #[derive(Default)]
    pub struct MockBackend {
        pub dimensions: HashMap<String, Dimensions>,
        pub probed: Mutex<Vec<String>>,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, file_name: &str, width: u32, height: u32) -> Self {
            self.dimensions
                .insert(file_name.to_string(), Dimensions::new(width, height));
            self
        }

        pub fn probed(&self) -> Vec<String> {
            let mut probed = self.probed.lock().unwrap().clone();
            probed.sort();
            probed
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            self.probed.lock().unwrap().push(name.clone());
            self.dimensions
                .get(&name)
                .copied()
                .ok_or_else(|| BackendError::ProbeFailed {
                    path: path.display().to_string(),
                    reason: "no mock dimensions".to_string(),
                })
        }
    }

    #[test]
    fn mock_answers_known_file() {
        let backend = MockBackend::new().with("001-hall.jpg", 800, 600);
        let dims = backend.identify(Path::new("/x/001-hall.jpg")).unwrap();
        assert_eq!(dims, Dimensions::new(800, 600));
        assert_eq!(backend.probed(), vec!["001-hall.jpg".to_string()]);
    }

    #[test]
    fn mock_fails_unknown_file() {
        let backend = MockBackend::new();
        let err = backend.identify(Path::new("/x/missing.jpg")).unwrap_err();
        assert!(matches!(err, BackendError::ProbeFailed { .. }));
    }
}
