// SPDX-License-Identifier: MPL-2.0
//! Page identifiers and the immutable page sequence.
//!
//! A book is an ordered list of image identifiers generated once at startup
//! from a contiguous numeric range (`pages/a-24.png` .. `pages/a-67.png`).
//! The sequence is never mutated afterwards; navigation only moves a cursor
//! over it.

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Longest book accepted from a numeric range.
pub const MAX_PAGE_COUNT: usize = 10_000;

/// Identifier of a single page image (a path, relative to the book directory
/// or absolute).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(Arc<str>);

impl PageId {
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves the identifier against an optional base directory.
    ///
    /// Absolute identifiers are returned unchanged.
    #[must_use]
    pub fn resolve(&self, base_dir: Option<&Path>) -> PathBuf {
        let path = Path::new(self.as_str());
        match base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A contiguous numeric range of page files: `{prefix}{n}{extension}` for
/// every `n` in `start..=end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    pub prefix: String,
    pub start: u32,
    pub end: u32,
    pub extension: String,
}

impl PageRange {
    #[must_use]
    pub fn new(prefix: impl Into<String>, start: u32, end: u32, extension: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            start,
            end,
            extension: extension.into(),
        }
    }

    /// Number of pages in the range; zero when `end < start`.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            usize::try_from(self.end - self.start).map_or(usize::MAX, |n| n.saturating_add(1))
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identifier of the page numbered `number`.
    #[must_use]
    pub fn page_id(&self, number: u32) -> PageId {
        PageId::new(format!("{}{}{}", self.prefix, number, self.extension))
    }

    /// All identifiers of the range in order.
    #[must_use]
    pub fn ids(&self) -> Vec<PageId> {
        if self.is_empty() {
            return Vec::new();
        }
        (self.start..=self.end).map(|n| self.page_id(n)).collect()
    }
}

/// Ordered, immutable, non-empty list of page identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSequence {
    pages: Arc<[PageId]>,
    /// Printed number of the page at index 0.
    first_number: u32,
}

impl PageSequence {
    /// Builds a sequence from explicit identifiers, numbered from 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPageSequence`] when `pages` is empty.
    pub fn new(pages: Vec<PageId>) -> Result<Self> {
        Self::numbered(pages, 1)
    }

    /// Builds a sequence whose first page carries the printed number
    /// `first_number`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPageSequence`] when `pages` is empty.
    pub fn numbered(pages: Vec<PageId>, first_number: u32) -> Result<Self> {
        if pages.is_empty() {
            return Err(Error::EmptyPageSequence);
        }
        Ok(Self {
            pages: pages.into(),
            first_number,
        })
    }

    /// Builds a sequence from a numeric file range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPageSequence`] when the range is inverted, and
    /// [`Error::TooManyPages`] when it holds more than [`MAX_PAGE_COUNT`].
    pub fn from_range(range: &PageRange) -> Result<Self> {
        let count = range.len();
        if count > MAX_PAGE_COUNT {
            return Err(Error::TooManyPages(count));
        }
        Self::numbered(range.ids(), range.start)
    }

    /// Number of pages (N).
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false; kept for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page at `index`, or `None` outside `0..N`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PageId> {
        self.pages.get(index)
    }

    /// Same as [`get`](Self::get) for a signed index; negative indices are
    /// out of range.
    #[must_use]
    pub fn get_signed(&self, index: isize) -> Option<&PageId> {
        usize::try_from(index).ok().and_then(|i| self.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageId> {
        self.pages.iter()
    }

    /// Index of `id` within the sequence.
    #[must_use]
    pub fn position(&self, id: &PageId) -> Option<usize> {
        self.pages.iter().position(|p| p == id)
    }

    /// Printed page number of the page at `index`.
    #[must_use]
    pub fn number_of(&self, index: usize) -> u64 {
        u64::from(self.first_number) + index as u64
    }

    #[must_use]
    pub fn first_number(&self) -> u32 {
        self.first_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn magazine_range() -> PageRange {
        PageRange::new("pages/a-", 24, 67, ".png")
    }

    #[test]
    fn range_generates_contiguous_ids() {
        let range = magazine_range();
        let ids = range.ids();
        assert_eq!(ids.len(), 44);
        assert_eq!(ids[0].as_str(), "pages/a-24.png");
        assert_eq!(ids[43].as_str(), "pages/a-67.png");
    }

    #[test]
    fn inverted_range_is_empty() {
        let range = PageRange::new("p", 10, 9, ".jpg");
        assert!(range.is_empty());
        assert!(range.ids().is_empty());
        assert_eq!(
            PageSequence::from_range(&range),
            Err(Error::EmptyPageSequence)
        );
    }

    #[test]
    fn huge_range_is_rejected_before_allocating() {
        let range = PageRange::new("p", 0, u32::MAX, ".png");
        let err = PageSequence::from_range(&range).unwrap_err();
        assert!(matches!(err, Error::TooManyPages(_)));
        assert!(err.is_fatal());

        let longest = PageRange::new("p", 1, MAX_PAGE_COUNT as u32, ".png");
        assert_eq!(
            PageSequence::from_range(&longest).map(|seq| seq.len()),
            Ok(MAX_PAGE_COUNT)
        );
    }

    #[test]
    fn single_page_range() {
        let range = PageRange::new("p", 7, 7, ".jpg");
        let seq = PageSequence::from_range(&range).expect("one page");
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.number_of(0), 7);
    }

    #[test]
    fn empty_sequence_is_a_configuration_error() {
        let err = PageSequence::new(Vec::new()).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn numbering_follows_range_start() {
        let seq = PageSequence::from_range(&magazine_range()).expect("non-empty");
        assert_eq!(seq.first_number(), 24);
        assert_eq!(seq.number_of(1), 25);
        assert_eq!(seq.number_of(43), 67);
    }

    #[test]
    fn signed_lookup_treats_negative_as_missing() {
        let seq = PageSequence::new(vec![PageId::new("a"), PageId::new("b")]).expect("non-empty");
        assert_eq!(seq.get_signed(-1), None);
        assert_eq!(seq.get_signed(1).map(PageId::as_str), Some("b"));
        assert_eq!(seq.get_signed(2), None);
    }

    #[test]
    fn resolve_joins_relative_ids_only() {
        let base = Path::new("/srv/magazine");
        assert_eq!(
            PageId::new("pages/a-24.png").resolve(Some(base)),
            PathBuf::from("/srv/magazine/pages/a-24.png")
        );
        assert_eq!(
            PageId::new("pages/a-24.png").resolve(None),
            PathBuf::from("pages/a-24.png")
        );
    }
}
