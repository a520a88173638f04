// SPDX-License-Identifier: MPL-2.0
//! Decoded page cache for faster page turns.
//!
//! # Design
//!
//! - **LRU eviction**: Least recently used pages are evicted first
//! - **Memory-bounded**: Limited both by decoded bytes and by page count
//! - **Id-keyed**: Pages indexed by their [`PageId`]
//! - **Async loading**: Decoding runs on the blocking pool, off the UI thread

use super::image::{load_page_image, PageImage};
use crate::book::PageId;
use crate::config::{DEFAULT_CACHE_MAX_BYTES, DEFAULT_CACHE_MAX_IMAGES, MIN_CACHE_MAX_IMAGES};
use crate::error::{Error, Result};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Limits of the page cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheLimits {
    /// Maximum decoded bytes held.
    pub max_bytes: usize,
    /// Maximum number of pages held.
    pub max_images: usize,
}

impl Default for CacheLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_CACHE_MAX_BYTES,
            max_images: DEFAULT_CACHE_MAX_IMAGES,
        }
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub image_count: usize,
    pub total_bytes: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub insertions: u64,
}

impl CacheStats {
    /// Returns the cache hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// LRU cache of decoded pages.
pub struct PageCache {
    cache: LruCache<PageId, PageImage>,
    limits: CacheLimits,
    current_bytes: usize,
    stats: CacheStats,
}

impl PageCache {
    #[must_use]
    pub fn new(limits: CacheLimits) -> Self {
        let capacity = NonZeroUsize::new(limits.max_images.max(MIN_CACHE_MAX_IMAGES))
            .unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: LruCache::new(capacity),
            limits,
            current_bytes: 0,
            stats: CacheStats::default(),
        }
    }

    /// Inserts a decoded page.
    ///
    /// Returns `false` when the page alone exceeds half the byte budget and
    /// is therefore not cached.
    pub fn insert(&mut self, id: PageId, image: PageImage) -> bool {
        let image_size = image.size_bytes();
        if image_size > self.limits.max_bytes / 2 {
            log::debug!("page {id} too large to cache ({image_size} bytes)");
            return false;
        }

        if let Some(existing) = self.cache.pop(&id) {
            self.current_bytes = self.current_bytes.saturating_sub(existing.size_bytes());
        }

        while self.current_bytes + image_size > self.limits.max_bytes {
            let Some((_, evicted)) = self.cache.pop_lru() else {
                break;
            };
            self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes());
            self.stats.evictions += 1;
        }

        // `push` hands back whatever the count limit pushed out.
        if let Some((_, evicted)) = self.cache.push(id, image) {
            self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes());
            self.stats.evictions += 1;
        }

        self.current_bytes += image_size;
        self.stats.insertions += 1;
        self.stats.image_count = self.cache.len();
        self.stats.total_bytes = self.current_bytes;
        true
    }

    /// Gets a page and marks it as recently used.
    pub fn get(&mut self, id: &PageId) -> Option<&PageImage> {
        if let Some(image) = self.cache.get(id) {
            self.stats.hits += 1;
            Some(image)
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Gets a page without touching LRU order or statistics.
    #[must_use]
    pub fn peek(&self, id: &PageId) -> Option<&PageImage> {
        self.cache.peek(id)
    }

    #[must_use]
    pub fn contains(&self, id: &PageId) -> bool {
        self.cache.contains(id)
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.current_bytes
    }
}

impl std::fmt::Debug for PageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageCache")
            .field("image_count", &self.cache.len())
            .field("memory_usage", &self.current_bytes)
            .field("limits", &self.limits)
            .field("stats", &self.stats)
            .finish()
    }
}

/// Decodes one page on the blocking pool.
pub async fn load_page(id: PageId, path: PathBuf) -> (PageId, Result<PageImage>) {
    let result = tokio::task::spawn_blocking(move || load_page_image(&path))
        .await
        .unwrap_or_else(|e| Err(Error::Io(format!("Page load task failed: {e}"))));

    (id, result)
}
