//! Image catalog loading.
//!
//! The catalog is the ordered, read-only list of images the hero rotation
//! draws from. It can come from two places:
//!
//! ## Catalog file
//!
//! A TOML file with one `[[images]]` table per entry. Order in the file is
//! catalog order.
//!
//! ```toml
//! [[images]]
//! id = 1
//! url = "https://cdn.example.org/school/assembly.jpg"
//! category = "Events"
//! alt = "Morning assembly"
//! width = 4032     # optional, enables orientation hints
//! height = 3024
//! ```
//!
//! ## Image directory
//!
//! ```text
//! photos/
//! ├── config.toml             # Site configuration (optional)
//! ├── 010-Campus/
//! │   ├── 001-Main-Hall.jpg   # id 1, alt "Main Hall", category "Campus"
//! │   └── 002-Library.jpg
//! └── 020-Sports-Day/
//!     ├── 010-Relay.jpg
//!     └── IMG_7124.jpg        # unnumbered: id assigned after the highest number
//! ```
//!
//! Categories are ordered by their directory prefix, images within a
//! category by their file prefix. Urls are paths relative to the root.
//! Dimensions are probed for every file, in parallel.
//!
//! ## Validation
//!
//! - Ids must be unique.
//! - An empty catalog loads fine here; the scheduler rejects it.

use crate::imaging::{Dimensions, ImageBackend, is_supported_image};
use crate::naming::{self, ParsedName};
use crate::types::ImageRef;
use rayon::prelude::*;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Image probing failed: {0}")]
    Backend(#[from] crate::imaging::BackendError),
    #[error("Duplicate image id {0} in catalog")]
    DuplicateId(u32),
    #[error("Image {id}: width and height must be given together")]
    PartialDimensions { id: u32 },
}

/// Ordered, immutable image catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    images: Vec<ImageRef>,
    /// Fingerprint of `images`, fixed at construction.
    version: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    images: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogEntry {
    id: u32,
    url: String,
    category: String,
    alt: String,
    width: Option<u32>,
    height: Option<u32>,
}

impl CatalogEntry {
    fn into_image(self) -> Result<ImageRef, CatalogError> {
        let dimensions = match (self.width, self.height) {
            (Some(w), Some(h)) => Some(Dimensions::new(w, h)),
            (None, None) => None,
            _ => return Err(CatalogError::PartialDimensions { id: self.id }),
        };
        Ok(ImageRef {
            id: self.id,
            url: self.url,
            category: self.category,
            alt_text: self.alt,
            dimensions,
        })
    }
}

impl Catalog {
    /// Build a catalog from images already in order. Ids must be unique.
    pub fn new(images: Vec<ImageRef>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for image in &images {
            if !seen.insert(image.id) {
                return Err(CatalogError::DuplicateId(image.id));
            }
        }
        let version = content_version(&images);
        Ok(Self { images, version })
    }

    /// Parse a TOML catalog document.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        let images = file
            .images
            .into_iter()
            .map(CatalogEntry::into_image)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(images)
    }

    /// Load a TOML catalog file.
    pub fn from_toml_file(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        info!(path = %path.display(), images = catalog.len(), "loaded catalog file");
        Ok(catalog)
    }

    /// Walk an image directory and build a catalog from its files.
    pub fn scan_dir(root: &Path, backend: &impl ImageBackend) -> Result<Self, CatalogError> {
        let mut found = Vec::new();
        for entry in WalkDir::new(root).min_depth(1) {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type().is_file() && is_supported_image(path) {
                found.push(path.to_path_buf());
            }
        }
        debug!(root = %root.display(), files = found.len(), "discovered catalog images");

        let probed: Vec<(PathBuf, Dimensions)> = found
            .into_par_iter()
            .map(|path| -> Result<(PathBuf, Dimensions), CatalogError> {
                let dims = backend.identify(&path)?;
                Ok((path, dims))
            })
            .collect::<Result<_, CatalogError>>()?;

        let mut pending: Vec<PendingImage> = probed
            .into_iter()
            .map(|(path, dims)| PendingImage::new(root, path, dims))
            .collect();
        pending.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let catalog = Self::new(assign_ids(pending))?;
        info!(root = %root.display(), images = catalog.len(), "scanned image directory");
        Ok(catalog)
    }

    /// Load from either a catalog file or an image directory.
    pub fn load(path: &Path, backend: &impl ImageBackend) -> Result<Self, CatalogError> {
        if path.is_dir() {
            Self::scan_dir(path, backend)
        } else {
            Self::from_toml_file(path)
        }
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Stable content fingerprint: SHA-256 over every id and url, in order.
    ///
    /// Changes whenever an image is added, removed, reordered or re-pointed,
    /// which is exactly when a cached daily selection goes stale. Hashed
    /// once in [`Catalog::new`].
    pub fn version(&self) -> &str {
        &self.version
    }
}

fn content_version(images: &[ImageRef]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"catalog\0");
    for image in images {
        hasher.update(image.id.to_le_bytes());
        hasher.update(image.url.as_bytes());
        hasher.update(b"\0");
    }
    format!("{:x}", hasher.finalize())
}

/// A discovered file waiting for its id.
struct PendingImage {
    category_number: u32,
    category: String,
    name: ParsedName,
    file_name: String,
    url: String,
    dims: Dimensions,
}

impl PendingImage {
    fn new(root: &Path, path: PathBuf, dims: Dimensions) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(&path);
        let url = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join("/");
        let parent = relative
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| naming::parse_name(&n.to_string_lossy()));
        let (category_number, category) = match parent {
            Some(p) if !p.display.is_empty() => (p.number.unwrap_or(u32::MAX), p.display),
            Some(p) => (p.number.unwrap_or(u32::MAX), "Gallery".to_string()),
            None => (0, "Gallery".to_string()),
        };
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            category_number,
            category,
            name: naming::parse_name(&stem),
            file_name,
            url,
            dims,
        }
    }

    fn sort_key(&self) -> (u32, String, u32, String) {
        (
            self.category_number,
            self.category.clone(),
            self.name.number.unwrap_or(u32::MAX),
            self.file_name.clone(),
        )
    }
}

/// Numbered files keep their prefix as id; unnumbered ones (and numbered
/// ones whose prefix is already taken in another category) get ids after
/// the highest number seen.
fn assign_ids(pending: Vec<PendingImage>) -> Vec<ImageRef> {
    let mut next_free = pending
        .iter()
        .filter_map(|p| p.name.number)
        .max()
        .map_or(1, |n| n + 1);
    let mut used = HashSet::new();

    pending
        .into_iter()
        .map(|p| {
            let id = match p.name.number {
                Some(n) if used.insert(n) => n,
                _ => {
                    let id = next_free;
                    next_free += 1;
                    used.insert(id);
                    id
                }
            };
            ImageRef {
                id,
                alt_text: naming::alt_text(&p.name, &p.category, id),
                url: p.url,
                category: p.category,
                dimensions: Some(p.dims),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::test_helpers::{catalog_of, touch};
    use tempfile::TempDir;

    // =========================================================================
    // TOML catalogs
    // =========================================================================

    #[test]
    fn parse_toml_catalog_in_order() {
        let catalog = Catalog::from_toml_str(
            r#"
[[images]]
id = 7
url = "https://cdn.example.org/assembly.jpg"
category = "Events"
alt = "Morning assembly"

[[images]]
id = 2
url = "https://cdn.example.org/lab.jpg"
category = "Academics"
alt = "Science lab"
width = 3024
height = 4032
"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.images()[0].id, 7);
        assert_eq!(catalog.images()[0].dimensions, None);
        assert_eq!(catalog.images()[1].alt_text, "Science lab");
        assert_eq!(
            catalog.images()[1].dimensions,
            Some(Dimensions::new(3024, 4032))
        );
    }

    #[test]
    fn empty_toml_catalog_loads() {
        let catalog = Catalog::from_toml_str("").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = Catalog::from_toml_str(
            r#"
[[images]]
id = 1
url = "a.jpg"
category = "Events"
alt = "A"

[[images]]
id = 1
url = "b.jpg"
category = "Events"
alt = "B"
"#,
        );
        assert!(matches!(result, Err(CatalogError::DuplicateId(1))));
    }

    #[test]
    fn width_without_height_rejected() {
        let result = Catalog::from_toml_str(
            r#"
[[images]]
id = 1
url = "a.jpg"
category = "Events"
alt = "A"
width = 100
"#,
        );
        assert!(matches!(
            result,
            Err(CatalogError::PartialDimensions { id: 1 })
        ));
    }

    #[test]
    fn unknown_entry_key_rejected() {
        let result = Catalog::from_toml_str(
            r#"
[[images]]
id = 1
url = "a.jpg"
category = "Events"
alt = "A"
caption = "typo"
"#,
        );
        assert!(matches!(result, Err(CatalogError::Toml(_))));
    }

    #[test]
    fn from_toml_file_reads_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.toml");
        fs::write(
            &path,
            "[[images]]\nid = 1\nurl = \"a.jpg\"\ncategory = \"Campus\"\nalt = \"Gate\"\n",
        )
        .unwrap();
        let catalog = Catalog::from_toml_file(&path).unwrap();
        assert_eq!(catalog.images()[0].category, "Campus");
    }

    // =========================================================================
    // Directory scans
    // =========================================================================

    #[test]
    fn scan_dir_orders_by_category_then_number() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("020-Sports-Day/010-Relay.jpg"));
        touch(&tmp.path().join("010-Campus/002-Library.jpg"));
        touch(&tmp.path().join("010-Campus/001-Main-Hall.jpg"));
        touch(&tmp.path().join("010-Campus/notes.txt"));

        let backend = MockBackend::new()
            .with("010-Relay.jpg", 1600, 900)
            .with("002-Library.jpg", 900, 1600)
            .with("001-Main-Hall.jpg", 1200, 800);

        let catalog = Catalog::scan_dir(tmp.path(), &backend).unwrap();
        let urls: Vec<&str> = catalog.images().iter().map(|i| i.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "010-Campus/001-Main-Hall.jpg",
                "010-Campus/002-Library.jpg",
                "020-Sports-Day/010-Relay.jpg",
            ]
        );

        let hall = &catalog.images()[0];
        assert_eq!(hall.id, 1);
        assert_eq!(hall.alt_text, "Main Hall");
        assert_eq!(hall.category, "Campus");
        assert_eq!(hall.dimensions, Some(Dimensions::new(1200, 800)));

        assert_eq!(catalog.images()[2].category, "Sports Day");
        // notes.txt is never probed
        assert_eq!(backend.probed().len(), 3);
    }

    #[test]
    fn scan_dir_assigns_ids_to_unnumbered_files() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("010-Events/005-Choir.jpg"));
        touch(&tmp.path().join("010-Events/IMG_7124.jpg"));

        let backend = MockBackend::new()
            .with("005-Choir.jpg", 100, 100)
            .with("IMG_7124.jpg", 100, 100);

        let catalog = Catalog::scan_dir(tmp.path(), &backend).unwrap();
        assert_eq!(catalog.images()[0].id, 5);
        assert_eq!(catalog.images()[1].id, 6);
        assert_eq!(catalog.images()[1].alt_text, "IMG 7124");
    }

    #[test]
    fn scan_dir_reassigns_colliding_numbers() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("010-Campus/001-Gate.jpg"));
        touch(&tmp.path().join("020-Events/001-Choir.jpg"));

        let backend = MockBackend::new()
            .with("001-Gate.jpg", 100, 100)
            .with("001-Choir.jpg", 100, 100);

        let catalog = Catalog::scan_dir(tmp.path(), &backend).unwrap();
        let ids: Vec<u32> = catalog.images().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn scan_dir_number_only_file_gets_category_alt() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("030-Graduation/004.jpg"));
        let backend = MockBackend::new().with("004.jpg", 100, 100);

        let catalog = Catalog::scan_dir(tmp.path(), &backend).unwrap();
        assert_eq!(catalog.images()[0].alt_text, "Graduation photo 4");
    }

    #[test]
    fn scan_dir_probe_failure_is_error() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("010-Campus/001-Gate.jpg"));
        let result = Catalog::scan_dir(tmp.path(), &MockBackend::new());
        assert!(matches!(result, Err(CatalogError::Backend(_))));
    }

    #[test]
    fn load_dispatches_on_path_kind() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("001-Gate.jpg"));
        let backend = MockBackend::new().with("001-Gate.jpg", 10, 20);
        let catalog = Catalog::load(tmp.path(), &backend).unwrap();
        assert_eq!(catalog.images()[0].category, "Gallery");
    }

    // =========================================================================
    // Versioning
    // =========================================================================

    #[test]
    fn version_is_stable_for_same_content() {
        assert_eq!(catalog_of(26).version(), catalog_of(26).version());
        assert_eq!(catalog_of(26).version().len(), 64);
    }

    #[test]
    fn version_changes_when_catalog_grows() {
        assert_ne!(catalog_of(26).version(), catalog_of(27).version());
    }

    #[test]
    fn version_is_hashed_once_at_construction() {
        let catalog = catalog_of(26);
        // Repeated reads hand back the same stored string, not a fresh hash
        assert!(std::ptr::eq(catalog.version(), catalog.version()));
        assert_eq!(catalog.version(), content_version(catalog.images()));
    }
}
