// SPDX-License-Identifier: MPL-2.0
//! Resolution of a view cursor into the page slots to draw.
//!
//! [`resolve_view`] is the single canonical spread policy:
//!
//! | mode   | cursor                       | left          | right         | label      |
//! |--------|------------------------------|---------------|---------------|------------|
//! | single | k                            | -             | page k        | page k     |
//! | double | 0                            | empty         | page 0        | cover      |
//! | double | last view, N even            | page 2k-1     | empty         | back cover |
//! | double | otherwise                    | page 2k-1     | page 2k       | 2k-1 - 2k  |
//!
//! Any index outside `0..N` yields an empty slot. With an odd page count the
//! last double view therefore has no occupied slot at all.
//!
//! The label is produced by a replaceable [`LabelFn`] so the page-numbering
//! policy can change without touching slot resolution.

use super::layout::LayoutMode;
use super::pages::{PageId, PageSequence};

/// An occupied page slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlot {
    /// Index into the page sequence.
    pub index: usize,
    pub id: PageId,
}

/// Slots of one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewSlots {
    Single(Option<PageSlot>),
    Spread {
        left: Option<PageSlot>,
        right: Option<PageSlot>,
    },
}

/// Label of a view, as data. Turning it into text is the rendering
/// surface's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewLabel {
    /// Single-page position.
    Page { index: usize },
    Cover,
    BackCover,
    /// Spread of two page indices (either may be past the end on the last
    /// spread of an odd book).
    Spread { left: usize, right: usize },
}

/// Inputs of a label computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelInput {
    pub cursor: usize,
    pub mode: LayoutMode,
    pub total_views: usize,
    pub page_count: usize,
}

/// Replaceable label policy.
pub type LabelFn = fn(&LabelInput) -> ViewLabel;

/// Default label policy.
#[must_use]
pub fn default_label(input: &LabelInput) -> ViewLabel {
    match input.mode {
        LayoutMode::Single => ViewLabel::Page {
            index: input.cursor,
        },
        LayoutMode::Double => {
            if input.cursor == 0 {
                ViewLabel::Cover
            } else if is_back_cover(input.cursor, input.total_views, input.page_count) {
                ViewLabel::BackCover
            } else {
                ViewLabel::Spread {
                    left: input.cursor * 2 - 1,
                    right: input.cursor * 2,
                }
            }
        }
    }
}

fn is_back_cover(cursor: usize, total_views: usize, page_count: usize) -> bool {
    cursor + 1 == total_views && page_count % 2 == 0
}

/// Everything the rendering surface needs to draw one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDescriptor {
    pub cursor: usize,
    pub mode: LayoutMode,
    pub slots: ViewSlots,
    pub label: ViewLabel,
}

impl ViewDescriptor {
    /// Slots in drawing order (left to right).
    #[must_use]
    pub fn slots(&self) -> Vec<Option<&PageSlot>> {
        match &self.slots {
            ViewSlots::Single(slot) => vec![slot.as_ref()],
            ViewSlots::Spread { left, right } => vec![left.as_ref(), right.as_ref()],
        }
    }

    /// Identifiers of the occupied slots, left to right.
    #[must_use]
    pub fn images(&self) -> Vec<&PageId> {
        self.slots().into_iter().flatten().map(|s| &s.id).collect()
    }

    #[must_use]
    pub fn left(&self) -> Option<&PageSlot> {
        match &self.slots {
            ViewSlots::Single(_) => None,
            ViewSlots::Spread { left, .. } => left.as_ref(),
        }
    }

    #[must_use]
    pub fn right(&self) -> Option<&PageSlot> {
        match &self.slots {
            ViewSlots::Single(slot) => slot.as_ref(),
            ViewSlots::Spread { right, .. } => right.as_ref(),
        }
    }
}

fn slot_at(pages: &PageSequence, index: isize) -> Option<PageSlot> {
    pages.get_signed(index).map(|id| PageSlot {
        // `get_signed` only succeeds for non-negative indices.
        index: index.unsigned_abs(),
        id: id.clone(),
    })
}

/// Resolves the slots and label of view `cursor` in `mode`. Pure.
#[must_use]
pub fn resolve_view(
    pages: &PageSequence,
    cursor: usize,
    mode: LayoutMode,
    label_fn: LabelFn,
) -> ViewDescriptor {
    let page_count = pages.len();
    let total_views = mode.total_views(page_count);
    let label = label_fn(&LabelInput {
        cursor,
        mode,
        total_views,
        page_count,
    });

    #[allow(clippy::cast_possible_wrap)]
    let k = cursor as isize;
    let slots = match mode {
        LayoutMode::Single => ViewSlots::Single(slot_at(pages, k)),
        LayoutMode::Double => {
            if cursor == 0 {
                ViewSlots::Spread {
                    left: None,
                    right: slot_at(pages, 0),
                }
            } else if is_back_cover(cursor, total_views, page_count) {
                ViewSlots::Spread {
                    left: slot_at(pages, k * 2 - 1),
                    right: None,
                }
            } else {
                ViewSlots::Spread {
                    left: slot_at(pages, k * 2 - 1),
                    right: slot_at(pages, k * 2),
                }
            }
        }
    };

    ViewDescriptor {
        cursor,
        mode,
        slots,
        label,
    }
}

/// Page indices shown by views `first..=last`, deduplicated, in view order.
/// Used to pick pages for prefetching.
#[must_use]
pub fn pages_of_views(
    pages: &PageSequence,
    mode: LayoutMode,
    views: impl IntoIterator<Item = usize>,
) -> Vec<PageId> {
    let mut ids: Vec<PageId> = Vec::new();
    for cursor in views {
        let view = resolve_view(pages, cursor, mode, default_label);
        for id in view.images() {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
    }
    ids
}
