// SPDX-License-Identifier: MPL-2.0
//! The book model: page sequence, layout, view resolution and the view
//! controller. Nothing in here touches the screen, audio or the filesystem.

pub mod controller;
pub mod input;
pub mod layout;
pub mod pages;
pub mod view;

pub use controller::{
    ControlState, ControllerOptions, Direction, Effect, FlipbookController, TurnPhase, ZoomState,
};
pub use input::{dispatch, InputEvent, Operation, SwipeDirection, SwipeTracker};
pub use layout::{fit_book_size, Breakpoint, LayoutMode};
pub use pages::{PageId, PageRange, PageSequence};
pub use view::{resolve_view, LabelFn, LabelInput, PageSlot, ViewDescriptor, ViewLabel, ViewSlots};
