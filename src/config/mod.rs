// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[book]` - Page file range and base directory
//! - `[layout]` - Single/double breakpoint and swipe threshold
//! - `[animation]` - Turn settle delay and zoom scale
//! - `[audio]` - Page-turn cue
//! - `[preload]` - Startup gate, prefetch window, decoded page cache
//!
//! Every field is optional; missing or out-of-range values resolve to the
//! constants in [`defaults`] through the accessor methods.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` CLI argument
//! 3. Set `ICED_FLIPBOOK_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_flipbook::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.book.start_page = Some(1);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::book::{Breakpoint, ControllerOptions, PageRange};
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Enums (shared between sections)
// =============================================================================

/// Which pages must finish loading before the first view is shown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StartupPolicy {
    /// Show the book immediately; pages pop in as they decode.
    #[default]
    None,
    /// Wait for every page.
    All,
    /// Wait for the first `startup_count` pages.
    First,
}

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "es").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default, deserialize_with = "deserialize_theme_mode")]
    pub theme_mode: ThemeMode,
}

/// Page file range: `{path_prefix}{n}{extension}` for `n` in
/// `start_page..=end_page`, relative to `base_dir`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_page: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_page: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    /// Directory page identifiers are resolved against. Defaults to the
    /// working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            path_prefix: Some(DEFAULT_PATH_PREFIX.to_string()),
            start_page: Some(DEFAULT_START_PAGE),
            end_page: Some(DEFAULT_END_PAGE),
            extension: Some(DEFAULT_EXTENSION.to_string()),
            base_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    /// Viewport width below which a single page is shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakpoint_width: Option<f32>,

    /// Minimum finger travel, in logical pixels, for a swipe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swipe_threshold: Option<f32>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            breakpoint_width: Some(DEFAULT_BREAKPOINT_WIDTH),
            swipe_threshold: Some(DEFAULT_SWIPE_THRESHOLD),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_delay_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_scale: Option<f32>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: Some(DEFAULT_SETTLE_DELAY_MS),
            zoom_scale: Some(DEFAULT_ZOOM_SCALE),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Cue volume (0.0 to 1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: Some(true),
            volume: Some(DEFAULT_VOLUME),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreloadConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup: Option<StartupPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_count: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefetch_views: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_max_images: Option<usize>,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            startup: Some(StartupPolicy::default()),
            startup_count: Some(DEFAULT_STARTUP_COUNT),
            prefetch_views: Some(DEFAULT_PREFETCH_VIEWS),
            cache_max_images: Some(DEFAULT_CACHE_MAX_IMAGES),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub book: BookConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub animation: AnimationConfig,

    #[serde(default)]
    pub audio: AudioConfig,

    #[serde(default)]
    pub preload: PreloadConfig,
}

// =============================================================================
// Resolved Values
// =============================================================================

impl Config {
    /// The page range, with defaults filled in.
    #[must_use]
    pub fn page_range(&self) -> PageRange {
        PageRange::new(
            self.book
                .path_prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_PATH_PREFIX.to_string()),
            self.book.start_page.unwrap_or(DEFAULT_START_PAGE),
            self.book.end_page.unwrap_or(DEFAULT_END_PAGE),
            self.book
                .extension
                .clone()
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
        )
    }

    #[must_use]
    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::new(
            self.layout
                .breakpoint_width
                .unwrap_or(DEFAULT_BREAKPOINT_WIDTH),
        )
    }

    #[must_use]
    pub fn swipe_threshold(&self) -> f32 {
        match self.layout.swipe_threshold {
            Some(value) if value.is_finite() => value.clamp(0.0, MAX_SWIPE_THRESHOLD),
            _ => DEFAULT_SWIPE_THRESHOLD,
        }
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        let ms = self
            .animation
            .settle_delay_ms
            .unwrap_or(DEFAULT_SETTLE_DELAY_MS)
            .min(MAX_SETTLE_DELAY_MS);
        Duration::from_millis(ms)
    }

    #[must_use]
    pub fn zoom_scale(&self) -> f32 {
        match self.animation.zoom_scale {
            Some(value) if value.is_finite() => value.clamp(MIN_ZOOM_SCALE, MAX_ZOOM_SCALE),
            _ => DEFAULT_ZOOM_SCALE,
        }
    }

    #[must_use]
    pub fn audio_enabled(&self) -> bool {
        self.audio.enabled.unwrap_or(true)
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        match self.audio.volume {
            Some(value) if value.is_finite() => value.clamp(MIN_VOLUME, MAX_VOLUME),
            _ => DEFAULT_VOLUME,
        }
    }

    #[must_use]
    pub fn startup_policy(&self) -> StartupPolicy {
        self.preload.startup.unwrap_or_default()
    }

    #[must_use]
    pub fn startup_count(&self) -> usize {
        self.preload.startup_count.unwrap_or(DEFAULT_STARTUP_COUNT)
    }

    #[must_use]
    pub fn prefetch_views(&self) -> usize {
        self.preload
            .prefetch_views
            .unwrap_or(DEFAULT_PREFETCH_VIEWS)
            .min(MAX_PREFETCH_VIEWS)
    }

    /// Cache capacity in pages, never smaller than the prefetch window.
    #[must_use]
    pub fn cache_max_images(&self) -> usize {
        self.preload
            .cache_max_images
            .unwrap_or(DEFAULT_CACHE_MAX_IMAGES)
            .clamp(MIN_CACHE_MAX_IMAGES, MAX_CACHE_MAX_IMAGES)
            .max(min_cache_for_prefetch(self.prefetch_views()))
    }

    /// Options for a [`crate::book::FlipbookController`] built from this
    /// configuration, with the default label policy.
    #[must_use]
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            breakpoint: self.breakpoint(),
            settle_delay: self.settle_delay(),
            ..ControllerOptions::default()
        }
    }
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with an i18n key describing the problem.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("ignoring {}: {}", path.display(), err);
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    match get_config_path_with_override(base_dir) {
        Some(path) => save_to_path(config, &path),
        None => Err(Error::Config(
            "no configuration directory available".to_string(),
        )),
    }
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
