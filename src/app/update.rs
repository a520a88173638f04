// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Raw Iced events are translated into [`InputEvent`]s here, dispatched to
//! the controller, and the resulting [`Effect`] is turned into tasks.

use super::Message;
use crate::audio::{self, CuePlayer};
use crate::book::view::pages_of_views;
use crate::book::{dispatch, input, Effect, FlipbookController, InputEvent, PageId, SwipeTracker};
use crate::error::Error;
use crate::media::{self, PageImage, PageLibrary};
use iced::{event, keyboard, touch, window, Task};

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub controller: &'a mut FlipbookController,
    pub library: &'a mut PageLibrary,
    pub player: &'a dyn CuePlayer,
    pub swipe: &'a mut SwipeTracker,
    pub fullscreen: &'a mut bool,
    pub window_id: &'a mut Option<window::Id>,
    /// Views on each side of the cursor to keep decoded.
    pub prefetch_views: usize,
}

/// Translates a native event into an input, if it is one we handle.
pub fn handle_raw_event(
    ctx: &mut UpdateContext<'_>,
    window: window::Id,
    event: &event::Event,
) -> Task<Message> {
    *ctx.window_id = Some(window);

    let input = match event {
        event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
            input::map_key(key, *ctx.fullscreen)
        }
        event::Event::Window(window::Event::Opened { size, .. })
        | event::Event::Window(window::Event::Resized(size)) => Some(InputEvent::Resize {
            width: size.width,
            height: size.height,
        }),
        event::Event::Touch(touch::Event::FingerPressed { position, .. }) => {
            ctx.swipe.begin(position.x);
            None
        }
        event::Event::Touch(touch::Event::FingerLifted { position, .. }) => {
            ctx.swipe.end(position.x).map(InputEvent::Swipe)
        }
        event::Event::Touch(touch::Event::FingerLost { .. }) => {
            ctx.swipe.cancel();
            None
        }
        _ => None,
    };

    let task = match input {
        Some(input) => handle_input(ctx, input),
        None => Task::none(),
    };

    // The window manager can leave fullscreen on its own; every such change
    // resizes the window.
    if matches!(event, event::Event::Window(window::Event::Resized(_))) {
        Task::batch([task, window::mode(window).map(Message::WindowModeChanged)])
    } else {
        task
    }
}

/// Re-syncs the fullscreen flag with the mode the window actually has.
pub fn handle_window_mode(ctx: &mut UpdateContext<'_>, mode: window::Mode) -> Task<Message> {
    let fullscreen = mode == window::Mode::Fullscreen;
    if *ctx.fullscreen != fullscreen {
        log::debug!("window mode is now {mode:?}");
        *ctx.fullscreen = fullscreen;
    }
    Task::none()
}

/// Dispatches one input to the controller and carries out its effect.
pub fn handle_input(ctx: &mut UpdateContext<'_>, input: InputEvent) -> Task<Message> {
    let operation = dispatch(input);
    let effect = ctx.controller.apply(operation);
    let task = apply_effect(ctx, effect);

    if effect == Effect::None {
        task
    } else {
        Task::batch([task, prefetch(ctx)])
    }
}

/// Commits the turn in flight once its presentation delay has elapsed.
pub fn handle_turn_settled(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    match ctx.controller.finish_turn() {
        Effect::None => Task::none(),
        _ => prefetch(ctx),
    }
}

pub fn handle_page_loaded(
    ctx: &mut UpdateContext<'_>,
    id: PageId,
    result: Result<PageImage, Error>,
) -> Task<Message> {
    ctx.library.complete(id, result);

    // A completion may have evicted a page on screen; bring it back. The
    // rest of the window is refilled on the next turn.
    let window = window_pages(ctx.controller, ctx.prefetch_views);
    let visible = visible_pages(ctx.controller);
    keep_warm(ctx.library, &window, &visible);
    load_pages(ctx.library, &visible)
}

fn apply_effect(ctx: &mut UpdateContext<'_>, effect: Effect) -> Task<Message> {
    match effect {
        // Iced redraws after every update.
        Effect::None | Effect::Render => Task::none(),
        Effect::TurnStarted { cue, settle } => {
            audio::play_cue(ctx.player, cue);
            Task::perform(
                async move { tokio::time::sleep(settle).await },
                |()| Message::TurnSettled,
            )
        }
        Effect::ToggleFullscreen => toggle_fullscreen(ctx.fullscreen, ctx.window_id.as_ref()),
    }
}

/// Toggles fullscreen mode. Ignored until a window id is known.
fn toggle_fullscreen(fullscreen: &mut bool, window_id: Option<&window::Id>) -> Task<Message> {
    let Some(window_id) = window_id else {
        log::debug!("fullscreen toggle ignored: no window yet");
        return Task::none();
    };

    *fullscreen = !*fullscreen;
    let mode = if *fullscreen {
        window::Mode::Fullscreen
    } else {
        window::Mode::Windowed
    };
    window::set_mode(*window_id, mode)
}

/// View cursors around `cursor`, nearest first.
fn nearby_views(cursor: usize, total_views: usize, radius: usize) -> Vec<usize> {
    let mut views = vec![cursor];
    for distance in 1..=radius {
        if cursor + distance < total_views {
            views.push(cursor + distance);
        }
        if let Some(previous) = cursor.checked_sub(distance) {
            views.push(previous);
        }
    }
    views
}

/// Page ids of the views around the cursor, nearest first.
fn window_pages(controller: &FlipbookController, radius: usize) -> Vec<PageId> {
    let views = nearby_views(controller.cursor(), controller.total_views(), radius);
    pages_of_views(controller.pages(), controller.layout_mode(), views)
}

/// Pages on screen: the current view, plus the outgoing one during a turn.
fn visible_pages(controller: &FlipbookController) -> Vec<PageId> {
    let mut ids: Vec<PageId> = controller.current_view().images().into_iter().cloned().collect();
    for id in controller.presented_view().images() {
        if !ids.contains(id) {
            ids.push(id.clone());
        }
    }
    ids
}

/// Refreshes recency so that eviction takes pages outside the window first,
/// and visible pages last.
fn keep_warm(library: &mut PageLibrary, window: &[PageId], visible: &[PageId]) {
    library.touch(window.iter().rev());
    library.touch(visible);
}

/// Keeps the window around the cursor warm in the cache and requests
/// whatever part of it is missing.
pub fn prefetch(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let window = window_pages(ctx.controller, ctx.prefetch_views);
    let visible = visible_pages(ctx.controller);
    keep_warm(ctx.library, &window, &visible);

    let mut ids = visible;
    ids.extend(window);
    load_pages(ctx.library, &ids)
}

/// Starts decoding every page in `ids` that is neither cached, in flight
/// nor failed.
pub fn load_pages(library: &mut PageLibrary, ids: &[PageId]) -> Task<Message> {
    let wanted = library.request(ids);
    if wanted.is_empty() {
        return Task::none();
    }
    log::debug!(
        "loading {} page(s), {} in flight, cache hit rate {:.0}%",
        wanted.len(),
        library.loading_count(),
        library.stats().hit_rate()
    );

    Task::batch(wanted.into_iter().map(|id| {
        let path = library.path_of(&id);
        Task::perform(media::load_page(id, path), |(id, result)| {
            Message::PageLoaded { id, result }
        })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_views_are_ordered_by_distance() {
        assert_eq!(nearby_views(5, 23, 2), vec![5, 6, 4, 7, 3]);
    }

    #[test]
    fn nearby_views_stay_inside_the_book() {
        assert_eq!(nearby_views(0, 23, 2), vec![0, 1, 2]);
        assert_eq!(nearby_views(22, 23, 2), vec![22, 21, 20]);
        assert_eq!(nearby_views(0, 1, 3), vec![0]);
    }

    #[test]
    fn zero_radius_keeps_only_the_current_view() {
        assert_eq!(nearby_views(7, 23, 0), vec![7]);
    }
}
