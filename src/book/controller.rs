// SPDX-License-Identifier: MPL-2.0
//! The flipbook view controller.
//!
//! [`FlipbookController`] owns the whole view state of one book: the page
//! sequence, the view cursor, the layout mode, the zoom flag and the
//! animation lock. All mutation goes through its operations, each of which
//! returns an [`Effect`] for the caller (the Iced application) to execute.
//!
//! # Navigation cycle
//!
//! ```text
//! Idle --navigate/restart--> Turning { from } --finish_turn--> Idle
//! ```
//!
//! While turning, further navigation requests are dropped (not queued) and
//! [`presented_view`](FlipbookController::presented_view) keeps returning the
//! outgoing view. The cursor itself already points at the target view.

use super::input::Operation;
use super::layout::{Breakpoint, LayoutMode};
use super::pages::{PageId, PageSequence};
use super::view::{default_label, resolve_view, LabelFn, ViewDescriptor};
use crate::audio::AudioCue;
use crate::config::DEFAULT_SETTLE_DELAY_MS;
use crate::error::Result;
use iced::Size;
use std::time::Duration;

/// Direction of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Presentation scale toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomState {
    #[default]
    Normal,
    Zoomed,
}

impl ZoomState {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ZoomState::Normal => ZoomState::Zoomed,
            ZoomState::Zoomed => ZoomState::Normal,
        }
    }

    #[must_use]
    pub fn is_zoomed(self) -> bool {
        self == ZoomState::Zoomed
    }

    /// Scale factor to apply for the given zoomed scale.
    #[must_use]
    pub fn factor(self, zoomed_scale: f32) -> f32 {
        match self {
            ZoomState::Normal => 1.0,
            ZoomState::Zoomed => zoomed_scale,
        }
    }
}

/// Animation lock, as a phase of the navigation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPhase {
    #[default]
    Idle,
    /// A turn is in flight; `from` is the view still on screen.
    Turning { from: usize },
}

/// Side effects requested by a controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing changed.
    None,
    /// Presentation changed; redraw.
    Render,
    /// A turn started: play `cue`, then call
    /// [`finish_turn`](FlipbookController::finish_turn) after `settle`.
    TurnStarted { cue: AudioCue, settle: Duration },
    /// Fullscreen is owned by the window, not the controller.
    ToggleFullscreen,
}

/// Enabled/disabled affordances for the control bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub can_restart: bool,
    pub is_turning: bool,
    pub zoomed: bool,
}

/// Construction options.
#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    pub breakpoint: Breakpoint,
    /// Presentation delay between a navigation request and its commit.
    pub settle_delay: Duration,
    pub label_fn: LabelFn,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            breakpoint: Breakpoint::default(),
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
            label_fn: default_label,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FlipbookController {
    pages: PageSequence,
    cursor: usize,
    mode: LayoutMode,
    total_views: usize,
    zoom: ZoomState,
    phase: TurnPhase,
    viewport: Size,
    breakpoint: Breakpoint,
    settle_delay: Duration,
    label_fn: LabelFn,
}

impl FlipbookController {
    /// Validates `pages` and builds a controller for a viewport of
    /// `viewport_width` logical pixels.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::EmptyPageSequence`] when `pages` is
    /// empty.
    pub fn initialize(
        pages: Vec<PageId>,
        viewport_width: f32,
        options: ControllerOptions,
    ) -> Result<Self> {
        let sequence = PageSequence::new(pages)?;
        Ok(Self::new(sequence, viewport_width, options))
    }

    /// Builds a controller over an already validated sequence. The cursor
    /// starts on the first view.
    #[must_use]
    pub fn new(pages: PageSequence, viewport_width: f32, options: ControllerOptions) -> Self {
        let mode = LayoutMode::from_width(viewport_width, options.breakpoint);
        let total_views = mode.total_views(pages.len());
        log::debug!(
            "flipbook initialized: {} pages, {:?} layout, {} views",
            pages.len(),
            mode,
            total_views
        );
        Self {
            pages,
            cursor: 0,
            mode,
            total_views,
            zoom: ZoomState::Normal,
            phase: TurnPhase::Idle,
            viewport: Size::new(viewport_width, 0.0),
            breakpoint: options.breakpoint,
            settle_delay: options.settle_delay,
            label_fn: options.label_fn,
        }
    }

    /// Replaces the label policy.
    #[must_use]
    pub fn with_label_fn(mut self, label_fn: LabelFn) -> Self {
        self.label_fn = label_fn;
        self
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    #[must_use]
    pub fn pages(&self) -> &PageSequence {
        &self.pages
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn total_views(&self) -> usize {
        self.total_views
    }

    #[must_use]
    pub fn layout_mode(&self) -> LayoutMode {
        self.mode
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomState {
        self.zoom
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Whether the animation lock is held.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self.phase, TurnPhase::Turning { .. })
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    #[must_use]
    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    /// Resolves any view without touching state.
    #[must_use]
    pub fn resolve_view(&self, cursor: usize, mode: LayoutMode) -> ViewDescriptor {
        resolve_view(&self.pages, cursor, mode, self.label_fn)
    }

    /// The view at the cursor.
    #[must_use]
    pub fn current_view(&self) -> ViewDescriptor {
        self.resolve_view(self.cursor, self.mode)
    }

    /// The view to draw right now: the outgoing view while a turn settles,
    /// the cursor view otherwise.
    #[must_use]
    pub fn presented_view(&self) -> ViewDescriptor {
        match self.phase {
            TurnPhase::Idle => self.current_view(),
            TurnPhase::Turning { from } => self.resolve_view(from, self.mode),
        }
    }

    #[must_use]
    pub fn controls(&self) -> ControlState {
        ControlState {
            can_go_back: self.cursor > 0,
            can_go_forward: self.cursor + 1 < self.total_views,
            can_restart: self.cursor > 0,
            is_turning: self.is_locked(),
            zoomed: self.zoom.is_zoomed(),
        }
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Applies one dispatched operation.
    pub fn apply(&mut self, operation: Operation) -> Effect {
        match operation {
            Operation::Navigate(direction) => self.navigate(direction),
            Operation::Restart => self.restart(),
            Operation::ToggleZoom => self.toggle_zoom(),
            Operation::ToggleFullscreen => Effect::ToggleFullscreen,
            Operation::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Moves one view forward or backward.
    ///
    /// Dropped while a turn is in flight; a no-op at either end of the book.
    pub fn navigate(&mut self, direction: Direction) -> Effect {
        if self.is_locked() {
            log::debug!("navigation {direction:?} dropped: turn in flight");
            return Effect::None;
        }

        let target = match direction {
            Direction::Forward if self.cursor + 1 < self.total_views => self.cursor + 1,
            Direction::Backward if self.cursor > 0 => self.cursor - 1,
            _ => return Effect::None,
        };

        self.begin_turn(target, AudioCue::Flip)
    }

    /// Returns to the first view as a single turn.
    pub fn restart(&mut self) -> Effect {
        if self.is_locked() {
            log::debug!("restart dropped: turn in flight");
            return Effect::None;
        }
        if self.cursor == 0 {
            return Effect::None;
        }
        self.begin_turn(0, AudioCue::Restart)
    }

    fn begin_turn(&mut self, target: usize, cue: AudioCue) -> Effect {
        self.phase = TurnPhase::Turning { from: self.cursor };
        self.cursor = target;
        log::debug!("turning to view {}/{}", target + 1, self.total_views);
        Effect::TurnStarted {
            cue,
            settle: self.settle_delay,
        }
    }

    /// Commits the turn in flight and releases the lock.
    pub fn finish_turn(&mut self) -> Effect {
        match self.phase {
            TurnPhase::Idle => Effect::None,
            TurnPhase::Turning { .. } => {
                self.phase = TurnPhase::Idle;
                Effect::Render
            }
        }
    }

    /// Switches layout mode, recomputing the view count. A cursor that no
    /// longer fits is reset to the first view rather than mapped to the
    /// nearest page.
    pub fn set_layout_mode(&mut self, mode: LayoutMode) -> Effect {
        if mode == self.mode {
            return Effect::None;
        }

        self.mode = mode;
        self.total_views = mode.total_views(self.pages.len());
        if self.cursor >= self.total_views {
            self.cursor = 0;
        }
        if let TurnPhase::Turning { from } = self.phase {
            if from >= self.total_views {
                self.phase = TurnPhase::Turning { from: 0 };
            }
        }
        log::debug!(
            "layout switched to {:?}: {} views, cursor {}",
            mode,
            self.total_views,
            self.cursor
        );
        Effect::Render
    }

    /// Records a new viewport size and re-derives the layout mode.
    pub fn resize(&mut self, width: f32, height: f32) -> Effect {
        let previous = self.viewport;
        self.viewport = Size::new(width, height);

        let mode = LayoutMode::from_width(width, self.breakpoint);
        match self.set_layout_mode(mode) {
            Effect::None if previous != self.viewport => Effect::Render,
            effect => effect,
        }
    }

    /// Flips the presentation scale. Cursor and layout are untouched.
    pub fn toggle_zoom(&mut self) -> Effect {
        self.zoom = self.zoom.toggled();
        Effect::Render
    }
}
