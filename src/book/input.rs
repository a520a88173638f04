// SPDX-License-Identifier: MPL-2.0
//! Abstract input events and their dispatch table.
//!
//! Every user gesture (button, key, swipe, window resize) is first turned
//! into an [`InputEvent`], then mapped 1:1 to a controller [`Operation`] by
//! [`dispatch`]. Keeping the table explicit means the controller never sees
//! raw Iced events.

use super::controller::Direction;
use crate::config::DEFAULT_SWIPE_THRESHOLD;
use iced::keyboard::{self, key::Named};

/// Horizontal direction the finger travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PrevRequested,
    NextRequested,
    RestartRequested,
    ZoomToggleRequested,
    FullscreenToggleRequested,
    Swipe(SwipeDirection),
    Resize { width: f32, height: f32 },
}

/// Controller operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    Navigate(Direction),
    Restart,
    ToggleZoom,
    ToggleFullscreen,
    Resize { width: f32, height: f32 },
}

/// The dispatch table.
#[must_use]
pub fn dispatch(event: InputEvent) -> Operation {
    match event {
        InputEvent::PrevRequested => Operation::Navigate(Direction::Backward),
        InputEvent::NextRequested => Operation::Navigate(Direction::Forward),
        InputEvent::RestartRequested => Operation::Restart,
        InputEvent::ZoomToggleRequested => Operation::ToggleZoom,
        InputEvent::FullscreenToggleRequested => Operation::ToggleFullscreen,
        // Dragging the page to the left reveals the next one.
        InputEvent::Swipe(SwipeDirection::Left) => Operation::Navigate(Direction::Forward),
        InputEvent::Swipe(SwipeDirection::Right) => Operation::Navigate(Direction::Backward),
        InputEvent::Resize { width, height } => Operation::Resize { width, height },
    }
}

/// Maps a pressed key to an input event.
///
/// `Escape` only means something while fullscreen, where it leaves
/// fullscreen.
#[must_use]
pub fn map_key(key: &keyboard::Key, fullscreen: bool) -> Option<InputEvent> {
    match key {
        keyboard::Key::Named(Named::ArrowRight | Named::PageDown | Named::Space) => {
            Some(InputEvent::NextRequested)
        }
        keyboard::Key::Named(Named::ArrowLeft | Named::PageUp) => Some(InputEvent::PrevRequested),
        keyboard::Key::Named(Named::Home) => Some(InputEvent::RestartRequested),
        keyboard::Key::Named(Named::F11) => Some(InputEvent::FullscreenToggleRequested),
        keyboard::Key::Named(Named::Escape) if fullscreen => {
            Some(InputEvent::FullscreenToggleRequested)
        }
        keyboard::Key::Character(c) => match c.as_str() {
            "z" | "Z" | "+" | "-" | "=" => Some(InputEvent::ZoomToggleRequested),
            "f" | "F" => Some(InputEvent::FullscreenToggleRequested),
            _ => None,
        },
        _ => None,
    }
}

/// Turns a touch start/end pair into a swipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    start_x: Option<f32>,
    threshold: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl SwipeTracker {
    /// Creates a tracker; non-finite or negative thresholds fall back to the
    /// default.
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        let threshold = if threshold.is_finite() && threshold >= 0.0 {
            threshold
        } else {
            DEFAULT_SWIPE_THRESHOLD
        };
        Self {
            start_x: None,
            threshold,
        }
    }

    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Records where the finger went down.
    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Records where the finger lifted and returns the swipe, if any.
    ///
    /// Travel of exactly the threshold is not a swipe.
    pub fn end(&mut self, x: f32) -> Option<SwipeDirection> {
        let start = self.start_x.take()?;
        let travel = start - x;
        if travel > self.threshold {
            Some(SwipeDirection::Left)
        } else if travel < -self.threshold {
            Some(SwipeDirection::Right)
        } else {
            None
        }
    }

    /// Forgets a gesture in progress (finger lost).
    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_table_is_one_to_one() {
        assert_eq!(
            dispatch(InputEvent::NextRequested),
            Operation::Navigate(Direction::Forward)
        );
        assert_eq!(
            dispatch(InputEvent::PrevRequested),
            Operation::Navigate(Direction::Backward)
        );
        assert_eq!(dispatch(InputEvent::RestartRequested), Operation::Restart);
        assert_eq!(dispatch(InputEvent::ZoomToggleRequested), Operation::ToggleZoom);
        assert_eq!(
            dispatch(InputEvent::FullscreenToggleRequested),
            Operation::ToggleFullscreen
        );
        assert_eq!(
            dispatch(InputEvent::Resize {
                width: 800.0,
                height: 600.0
            }),
            Operation::Resize {
                width: 800.0,
                height: 600.0
            }
        );
    }

    #[test]
    fn swipe_left_goes_forward() {
        assert_eq!(
            dispatch(InputEvent::Swipe(SwipeDirection::Left)),
            Operation::Navigate(Direction::Forward)
        );
        assert_eq!(
            dispatch(InputEvent::Swipe(SwipeDirection::Right)),
            Operation::Navigate(Direction::Backward)
        );
    }

    #[test]
    fn tracker_requires_travel_beyond_threshold() {
        let mut tracker = SwipeTracker::default();
        tracker.begin(300.0);
        assert_eq!(tracker.end(250.0), None);

        tracker.begin(300.0);
        assert_eq!(tracker.end(249.0), Some(SwipeDirection::Left));

        tracker.begin(100.0);
        assert_eq!(tracker.end(151.0), Some(SwipeDirection::Right));
    }

    #[test]
    fn tracker_ignores_end_without_begin() {
        let mut tracker = SwipeTracker::new(10.0);
        assert_eq!(tracker.end(500.0), None);

        tracker.begin(0.0);
        tracker.cancel();
        assert_eq!(tracker.end(500.0), None);
    }

    #[test]
    fn tracker_rejects_invalid_threshold() {
        assert_eq!(SwipeTracker::new(f32::NAN).threshold(), DEFAULT_SWIPE_THRESHOLD);
        assert_eq!(SwipeTracker::new(-5.0).threshold(), DEFAULT_SWIPE_THRESHOLD);
    }

    #[test]
    fn arrow_keys_navigate() {
        assert_eq!(
            map_key(&keyboard::Key::Named(Named::ArrowRight), false),
            Some(InputEvent::NextRequested)
        );
        assert_eq!(
            map_key(&keyboard::Key::Named(Named::ArrowLeft), false),
            Some(InputEvent::PrevRequested)
        );
        assert_eq!(
            map_key(&keyboard::Key::Named(Named::Home), false),
            Some(InputEvent::RestartRequested)
        );
    }

    #[test]
    fn character_keys_toggle_zoom_and_fullscreen() {
        assert_eq!(
            map_key(&keyboard::Key::Character("z".into()), false),
            Some(InputEvent::ZoomToggleRequested)
        );
        assert_eq!(
            map_key(&keyboard::Key::Character("f".into()), false),
            Some(InputEvent::FullscreenToggleRequested)
        );
        assert_eq!(map_key(&keyboard::Key::Character("q".into()), false), None);
    }

    #[test]
    fn escape_only_acts_in_fullscreen() {
        let escape = keyboard::Key::Named(Named::Escape);
        assert_eq!(map_key(&escape, false), None);
        assert_eq!(
            map_key(&escape, true),
            Some(InputEvent::FullscreenToggleRequested)
        );
    }
}
