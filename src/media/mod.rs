// SPDX-License-Identifier: MPL-2.0
//! Page image source: decoding, caching and load bookkeeping.

pub mod image;
pub mod library;
pub mod prefetch;

pub use image::{load_page_image, PageImage};
pub use library::{PageLibrary, PageStatus, StartupGate};
pub use prefetch::{load_page, CacheLimits, CacheStats, PageCache};
