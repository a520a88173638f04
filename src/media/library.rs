// SPDX-License-Identifier: MPL-2.0
//! Bookkeeping of page loads: what is cached, in flight or failed, and
//! whether the startup gate is open.
//!
//! The library never performs I/O itself. [`PageLibrary::request`] returns
//! the pages the caller must load (as [`load_page`](super::prefetch::load_page)
//! tasks) and [`PageLibrary::complete`] records each outcome.

use super::image::PageImage;
use super::prefetch::{CacheLimits, CacheStats, PageCache};
use crate::book::layout::DEFAULT_PAGE_ASPECT;
use crate::book::{PageId, PageSequence};
use crate::config::StartupPolicy;
use crate::error::Error;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Load state of a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// Never requested, or evicted since.
    Missing,
    Loading,
    Ready,
    /// Decoding failed, or the page cannot fit the cache. The slot shows
    /// an "unavailable" placeholder.
    Failed,
}

#[derive(Debug)]
pub struct PageLibrary {
    base_dir: Option<PathBuf>,
    cache: PageCache,
    in_flight: HashSet<PageId>,
    failed: HashSet<PageId>,
    /// Pages whose load finished at least once, successfully or not.
    settled: HashSet<PageId>,
    page_aspect: Option<f32>,
}

impl PageLibrary {
    #[must_use]
    pub fn new(base_dir: Option<PathBuf>, limits: CacheLimits) -> Self {
        Self {
            base_dir,
            cache: PageCache::new(limits),
            in_flight: HashSet::new(),
            failed: HashSet::new(),
            settled: HashSet::new(),
            page_aspect: None,
        }
    }

    #[must_use]
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Filesystem path of a page.
    #[must_use]
    pub fn path_of(&self, id: &PageId) -> PathBuf {
        id.resolve(self.base_dir())
    }

    #[must_use]
    pub fn status(&self, id: &PageId) -> PageStatus {
        if self.cache.contains(id) {
            PageStatus::Ready
        } else if self.in_flight.contains(id) {
            PageStatus::Loading
        } else if self.failed.contains(id) {
            PageStatus::Failed
        } else {
            PageStatus::Missing
        }
    }

    /// Picks the pages among `ids` that need loading and marks them in
    /// flight. Cached, loading and failed pages are skipped.
    pub fn request<'a>(&mut self, ids: impl IntoIterator<Item = &'a PageId>) -> Vec<PageId> {
        let mut wanted = Vec::new();
        for id in ids {
            if self.status(id) == PageStatus::Missing && self.in_flight.insert(id.clone()) {
                wanted.push(id.clone());
            }
        }
        wanted
    }

    /// Records the outcome of a page load.
    pub fn complete(&mut self, id: PageId, result: Result<PageImage, Error>) {
        self.in_flight.remove(&id);
        self.settled.insert(id.clone());

        match result {
            Ok(image) => {
                if self.page_aspect.is_none() {
                    self.page_aspect = image.aspect_ratio();
                }
                if self.cache.insert(id.clone(), image) {
                    self.failed.remove(&id);
                } else {
                    // Reloading could never cache it either.
                    log::warn!("page {id} is too large for the page cache");
                    self.failed.insert(id);
                }
            }
            Err(err) => {
                log::warn!("failed to load page {}: {}", self.path_of(&id).display(), err);
                self.failed.insert(id);
            }
        }
    }

    /// Decoded page for drawing. Does not touch recency.
    #[must_use]
    pub fn image(&self, id: &PageId) -> Option<&PageImage> {
        self.cache.peek(id)
    }

    /// Marks pages as recently used so the visible ones survive eviction.
    pub fn touch<'a>(&mut self, ids: impl IntoIterator<Item = &'a PageId>) {
        for id in ids {
            let _ = self.cache.get(id);
        }
    }

    /// Width / height of a page, from the first decoded page.
    #[must_use]
    pub fn page_aspect(&self) -> f32 {
        self.page_aspect.unwrap_or(DEFAULT_PAGE_ASPECT)
    }

    #[must_use]
    pub fn is_settled(&self, id: &PageId) -> bool {
        self.settled.contains(id)
    }

    #[must_use]
    pub fn loading_count(&self) -> usize {
        self.in_flight.len()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

/// Startup policy applied to a concrete page sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupGate {
    required: Vec<PageId>,
}

impl StartupGate {
    #[must_use]
    pub fn new(policy: StartupPolicy, pages: &PageSequence, count: usize) -> Self {
        let required = match policy {
            StartupPolicy::None => Vec::new(),
            StartupPolicy::All => pages.iter().cloned().collect(),
            StartupPolicy::First => pages.iter().take(count).cloned().collect(),
        };
        Self { required }
    }

    /// Pages that must settle before the first render.
    #[must_use]
    pub fn required(&self) -> &[PageId] {
        &self.required
    }

    /// `(settled, required)` page counts.
    #[must_use]
    pub fn progress(&self, library: &PageLibrary) -> (usize, usize) {
        let settled = self
            .required
            .iter()
            .filter(|id| library.is_settled(id))
            .count();
        (settled, self.required.len())
    }

    /// Whether every required page has loaded or failed.
    #[must_use]
    pub fn is_open(&self, library: &PageLibrary) -> bool {
        let (settled, required) = self.progress(library);
        settled == required
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::PageRange;

    fn pages(n: u32) -> PageSequence {
        PageSequence::from_range(&PageRange::new("p", 1, n, ".png")).expect("non-empty")
    }

    fn library() -> PageLibrary {
        PageLibrary::new(Some(PathBuf::from("/book")), CacheLimits::default())
    }

    fn image(width: u32, height: u32) -> PageImage {
        PageImage::from_rgba(width, height, vec![0; (width * height * 4) as usize])
    }

    #[test]
    fn request_marks_pages_in_flight_once() {
        let mut library = library();
        let ids = [PageId::new("a"), PageId::new("b"), PageId::new("a")];
        let wanted = library.request(ids.iter());
        assert_eq!(wanted, vec![PageId::new("a"), PageId::new("b")]);
        assert_eq!(library.status(&PageId::new("a")), PageStatus::Loading);
        assert!(library.request(ids.iter()).is_empty());
    }

    #[test]
    fn complete_caches_success_and_records_aspect() {
        let mut library = library();
        let id = PageId::new("a");
        library.request([&id]);
        library.complete(id.clone(), Ok(image(50, 100)));
        assert_eq!(library.status(&id), PageStatus::Ready);
        assert_eq!(library.page_aspect(), 0.5);
        assert!(library.image(&id).is_some());
        assert_eq!(library.loading_count(), 0);
    }

    #[test]
    fn failed_page_is_not_requested_again() {
        let mut library = library();
        let id = PageId::new("broken");
        library.request([&id]);
        library.complete(id.clone(), Err(Error::Image("truncated".into())));
        assert_eq!(library.status(&id), PageStatus::Failed);
        assert!(library.image(&id).is_none());
        assert!(library.request([&id]).is_empty());
        assert!(library.is_settled(&id));
    }

    #[test]
    fn oversized_page_settles_as_failed() {
        let mut library = PageLibrary::new(
            None,
            CacheLimits {
                max_bytes: 64,
                max_images: 8,
            },
        );
        let id = PageId::new("poster");
        library.request([&id]);
        library.complete(id.clone(), Ok(image(8, 8)));
        assert_eq!(library.status(&id), PageStatus::Failed);
        assert!(library.request([&id]).is_empty());
    }

    #[test]
    fn touched_pages_survive_later_completions() {
        let mut library = PageLibrary::new(
            None,
            CacheLimits {
                max_images: 4,
                ..CacheLimits::default()
            },
        );
        let cover = PageId::new("cover");
        library.complete(cover.clone(), Ok(image(1, 1)));
        for n in 0..10 {
            library.complete(PageId::new(format!("p{n}")), Ok(image(1, 1)));
            library.touch([&cover]);
        }
        assert_eq!(library.status(&cover), PageStatus::Ready);
        assert_eq!(library.status(&PageId::new("p0")), PageStatus::Missing);
    }

    #[test]
    fn aspect_defaults_until_a_page_decodes() {
        assert_eq!(library().page_aspect(), DEFAULT_PAGE_ASPECT);
    }

    #[test]
    fn paths_resolve_against_base_dir() {
        assert_eq!(
            library().path_of(&PageId::new("pages/a-24.png")),
            PathBuf::from("/book/pages/a-24.png")
        );
    }

    #[test]
    fn gate_none_is_open_immediately() {
        let gate = StartupGate::new(StartupPolicy::None, &pages(10), 4);
        assert!(gate.is_open(&library()));
        assert!(gate.required().is_empty());
    }

    #[test]
    fn gate_first_waits_for_leading_pages() {
        let seq = pages(10);
        let gate = StartupGate::new(StartupPolicy::First, &seq, 2);
        let mut library = library();
        assert!(!gate.is_open(&library));

        let first = seq.get(0).expect("page").clone();
        let second = seq.get(1).expect("page").clone();
        library.complete(first, Ok(image(2, 2)));
        assert_eq!(gate.progress(&library), (1, 2));

        // A failure counts as settled.
        library.complete(second, Err(Error::Io("gone".into())));
        assert!(gate.is_open(&library));
    }

    #[test]
    fn gate_all_requires_every_page() {
        let seq = pages(3);
        let gate = StartupGate::new(StartupPolicy::All, &seq, 0);
        assert_eq!(gate.required().len(), 3);
    }

    #[test]
    fn gate_first_count_is_capped_by_length() {
        let gate = StartupGate::new(StartupPolicy::First, &pages(2), 10);
        assert_eq!(gate.required().len(), 2);
    }
}
