//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by a user config file placed next to the catalog (or given
//! explicitly with `--config`).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [rotation]
//! images_per_day = 11          # Hero images shown per calendar day
//! reference_date = "2025-01-01" # Day zero of the rotation
//! day_offset = 0               # Shifts which bucket a given day shows
//!
//! [viewer]
//! min_scale = 0.5
//! max_scale = 5.0
//! wheel_step = 0.2             # Zoom change per wheel notch
//! button_step = 0.2            # Zoom change per +/- button press
//! pinch_sensitivity = 0.01     # Zoom change per pixel of pinch distance
//!
//! [slideshow]
//! interval_ms = 4000           # Hero auto-advance interval
//!
//! [processing]
//! max_processes = 4            # Max parallel probes (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [rotation]
//! images_per_day = 8
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Daily hero rotation settings.
    pub rotation: RotationConfig,
    /// Zoom/pan limits and gesture sensitivity of the image viewer.
    pub viewer: ViewerConfig,
    /// Hero slideshow timing.
    pub slideshow: SlideshowConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rotation.images_per_day == 0 {
            return Err(ConfigError::Validation(
                "rotation.images_per_day must be at least 1".into(),
            ));
        }
        let v = &self.viewer;
        if !(v.min_scale > 0.0 && v.min_scale <= 1.0 && v.max_scale >= 1.0) {
            return Err(ConfigError::Validation(
                "viewer scale range must satisfy 0 < min_scale <= 1 <= max_scale".into(),
            ));
        }
        if v.wheel_step <= 0.0 || v.button_step <= 0.0 || v.pinch_sensitivity <= 0.0 {
            return Err(ConfigError::Validation(
                "viewer steps and pinch_sensitivity must be positive".into(),
            ));
        }
        if self.slideshow.interval_ms == 0 || self.slideshow.interval_ms > MAX_INTERVAL_MS {
            return Err(ConfigError::Validation(format!(
                "slideshow.interval_ms must be between 1 and {MAX_INTERVAL_MS}"
            )));
        }
        Ok(())
    }
}

/// Daily hero rotation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RotationConfig {
    /// Number of images in each day's bucket.
    pub images_per_day: usize,
    /// Fixed epoch the day count is measured from.
    pub reference_date: NaiveDate,
    /// Constant added to the day count before taking the modulo. Lets a
    /// known date be pinned to a known bucket without moving the epoch.
    pub day_offset: i64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            images_per_day: 11,
            reference_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
            day_offset: 0,
        }
    }
}

/// Image viewer tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub wheel_step: f64,
    pub button_step: f64,
    pub pinch_sensitivity: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 5.0,
            wheel_step: 0.2,
            button_step: 0.2,
            pinch_sensitivity: 0.01,
        }
    }
}

/// Longest accepted slideshow interval (one hour).
pub const MAX_INTERVAL_MS: u64 = 60 * 60 * 1000;

/// Hero slideshow timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlideshowConfig {
    pub interval_ms: u64,
}

impl SlideshowConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self { interval_ms: 4000 }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel probe workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value. `Ok(None)` if it doesn't exist.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `config.toml` from the given directory, falling back to defaults
/// when the file is absent.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(&dir.join("config.toml"))?;
    resolve_config(overlay)
}

/// Load an explicitly named config file. Unlike [`load_config`], a missing
/// file is an error.
pub fn load_config_file(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(overlay))
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# daylight-gal configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Daily hero rotation
# ---------------------------------------------------------------------------
[rotation]
# How many catalog images make up one day's hero set.
images_per_day = 11
# Day zero of the rotation. The bucket shown on a date is
#   (days since reference_date + day_offset) mod ceil(catalog size / images_per_day)
reference_date = "2025-01-01"
# Shift applied to the day count; use it to pin a known date to a known bucket.
day_offset = 0

# ---------------------------------------------------------------------------
# Image viewer
# ---------------------------------------------------------------------------
[viewer]
# Zoom is clamped to [min_scale, max_scale]. min_scale must be <= 1 <= max_scale.
min_scale = 0.5
max_scale = 5.0
# Zoom change per mouse wheel notch.
wheel_step = 0.2
# Zoom change per zoom-in / zoom-out button press.
button_step = 0.2
# Zoom change per pixel the two pinch contacts move apart (or together).
pinch_sensitivity = 0.01

# ---------------------------------------------------------------------------
# Hero slideshow
# ---------------------------------------------------------------------------
[slideshow]
# Milliseconds between automatic slide advances (1 to 3600000).
interval_ms = 4000

# ---------------------------------------------------------------------------
# Parallel processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers when probing image dimensions.
# Omit to use all CPU cores. Larger values are clamped to the core count.
# max_processes = 4
"##
}
