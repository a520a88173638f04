// SPDX-License-Identifier: MPL-2.0
//! Layout mode and aspect-preserving book sizing.
//!
//! The layout mode is never set directly: it is derived from the viewport
//! width against a breakpoint (768 logical pixels by default). Narrow
//! viewports show one page per view, wide ones show a cover, two-page
//! spreads and a back cover.

use crate::config::{DEFAULT_BREAKPOINT_WIDTH, MAX_BREAKPOINT_WIDTH, MIN_BREAKPOINT_WIDTH};
use iced::Size;

/// Portrait page ratio (width / height) used until a page has been decoded.
pub const DEFAULT_PAGE_ASPECT: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Viewport width below which the book switches to single-page mode,
/// guaranteed to be within 200–4096 logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint(f32);

impl Breakpoint {
    /// Creates a new breakpoint, clamping the value to the valid range.
    /// Non-finite values fall back to the default.
    #[must_use]
    pub fn new(width: f32) -> Self {
        if width.is_finite() {
            Self(width.clamp(MIN_BREAKPOINT_WIDTH, MAX_BREAKPOINT_WIDTH))
        } else {
            Self::default()
        }
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self(DEFAULT_BREAKPOINT_WIDTH)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    /// One page per view.
    Single,
    /// Cover, two-page spreads, back cover.
    Double,
}

impl LayoutMode {
    /// Derives the mode for a viewport width.
    #[must_use]
    pub fn from_width(width: f32, breakpoint: Breakpoint) -> Self {
        if width < breakpoint.value() {
            LayoutMode::Single
        } else {
            LayoutMode::Double
        }
    }

    /// Number of navigable views for a book of `page_count` pages.
    ///
    /// Double mode counts the cover, the spreads and a back cover:
    /// `ceil(N / 2) + 1`.
    #[must_use]
    pub fn total_views(self, page_count: usize) -> usize {
        match self {
            LayoutMode::Single => page_count,
            LayoutMode::Double => page_count.div_ceil(2) + 1,
        }
    }

    /// Number of page slots drawn side by side.
    #[must_use]
    pub fn slots_per_view(self) -> usize {
        match self {
            LayoutMode::Single => 1,
            LayoutMode::Double => 2,
        }
    }
}

/// Largest book size that fits `available` without distorting the pages.
///
/// `page_aspect` is the width / height ratio of a single page; in double mode
/// two pages sit side by side. Degenerate inputs yield [`Size::ZERO`].
#[must_use]
pub fn fit_book_size(available: Size, page_aspect: f32, mode: LayoutMode) -> Size {
    if !(available.width > 0.0 && available.height > 0.0)
        || !(page_aspect.is_finite() && page_aspect > 0.0)
    {
        return Size::ZERO;
    }

    #[allow(clippy::cast_precision_loss)]
    let book_aspect = page_aspect * mode.slots_per_view() as f32;

    if available.width / available.height > book_aspect {
        // Height-bound
        Size::new(available.height * book_aspect, available.height)
    } else {
        // Width-bound
        Size::new(available.width, available.width / book_aspect)
    }
}

/// Size of a single page slot inside a fitted book.
#[must_use]
pub fn page_slot_size(book: Size, mode: LayoutMode) -> Size {
    #[allow(clippy::cast_precision_loss)]
    let slots = mode.slots_per_view() as f32;
    Size::new(book.width / slots, book.height)
}
