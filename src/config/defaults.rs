// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Book**: Page range of the bundled magazine
//! - **Layout**: Single/double breakpoint and swipe threshold
//! - **Animation**: Turn settle delay and zoom scale
//! - **Volume**: Page-turn cue volume
//! - **Preload**: Startup gate and prefetch window

// ==========================================================================
// Book Defaults
// ==========================================================================

pub const DEFAULT_PATH_PREFIX: &str = "pages/a-";
pub const DEFAULT_START_PAGE: u32 = 24;
pub const DEFAULT_END_PAGE: u32 = 67;
pub const DEFAULT_EXTENSION: &str = ".png";

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Viewport width (logical pixels) below which one page is shown per view.
pub const DEFAULT_BREAKPOINT_WIDTH: f32 = 768.0;
pub const MIN_BREAKPOINT_WIDTH: f32 = 200.0;
pub const MAX_BREAKPOINT_WIDTH: f32 = 4096.0;

/// Minimum horizontal finger travel for a swipe.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;
pub const MAX_SWIPE_THRESHOLD: f32 = 1000.0;

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Delay between a navigation request and the new view being committed.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 150;
pub const MAX_SETTLE_DELAY_MS: u64 = 2000;

/// Scale factor of the zoomed presentation.
pub const DEFAULT_ZOOM_SCALE: f32 = 1.6;
pub const MIN_ZOOM_SCALE: f32 = 1.1;
pub const MAX_ZOOM_SCALE: f32 = 4.0;

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default cue volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 0.8;
pub const MIN_VOLUME: f32 = 0.0;
pub const MAX_VOLUME: f32 = 1.0;

// ==========================================================================
// Preload Defaults
// ==========================================================================

/// Pages awaited by the `first` startup policy.
pub const DEFAULT_STARTUP_COUNT: usize = 4;

/// Views on each side of the cursor whose pages are prefetched.
pub const DEFAULT_PREFETCH_VIEWS: usize = 2;
pub const MAX_PREFETCH_VIEWS: usize = 16;

/// Decoded pages kept in memory.
pub const DEFAULT_CACHE_MAX_IMAGES: usize = 24;
pub const MIN_CACHE_MAX_IMAGES: usize = 4;
pub const MAX_CACHE_MAX_IMAGES: usize = 512;

/// Smallest cache that holds the prefetch window (two slots per view)
/// plus the outgoing view of a turn in flight.
#[must_use]
pub const fn min_cache_for_prefetch(prefetch_views: usize) -> usize {
    (2 * prefetch_views + 1) * 2 + 2
}

/// Decoded bytes kept in memory.
pub const DEFAULT_CACHE_MAX_BYTES: usize = 512 * 1024 * 1024;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_START_PAGE <= DEFAULT_END_PAGE);

    assert!(MIN_BREAKPOINT_WIDTH > 0.0);
    assert!(DEFAULT_BREAKPOINT_WIDTH >= MIN_BREAKPOINT_WIDTH);
    assert!(DEFAULT_BREAKPOINT_WIDTH <= MAX_BREAKPOINT_WIDTH);

    assert!(DEFAULT_SWIPE_THRESHOLD > 0.0);
    assert!(DEFAULT_SWIPE_THRESHOLD <= MAX_SWIPE_THRESHOLD);

    assert!(DEFAULT_SETTLE_DELAY_MS <= MAX_SETTLE_DELAY_MS);

    assert!(MIN_ZOOM_SCALE > 1.0);
    assert!(DEFAULT_ZOOM_SCALE >= MIN_ZOOM_SCALE);
    assert!(DEFAULT_ZOOM_SCALE <= MAX_ZOOM_SCALE);

    assert!(DEFAULT_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);

    assert!(DEFAULT_PREFETCH_VIEWS <= MAX_PREFETCH_VIEWS);
    assert!(DEFAULT_CACHE_MAX_IMAGES >= MIN_CACHE_MAX_IMAGES);
    assert!(DEFAULT_CACHE_MAX_IMAGES <= MAX_CACHE_MAX_IMAGES);
    // The cache must hold at least one double view on each side.
    assert!(MIN_CACHE_MAX_IMAGES >= 4);
    assert!(DEFAULT_CACHE_MAX_IMAGES >= min_cache_for_prefetch(DEFAULT_PREFETCH_VIEWS));
};
