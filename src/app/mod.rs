// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the flipbook controller,
//! the page library and the side effects it requests.
//!
//! The `App` struct owns one [`FlipbookController`] and translates its
//! [`crate::book::Effect`]s into Iced tasks: the settle timer, audio cues,
//! window mode changes and page decoding.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::audio::{self, CuePlayer, Volume};
use crate::book::{FlipbookController, PageSequence, SwipeTracker};
use crate::config::Config;
use crate::i18n::fluent::I18n;
use crate::media::{CacheLimits, PageLibrary, StartupGate};
use crate::ui::controls;
use crate::ui::theming::ColorScheme;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    controller: FlipbookController,
    library: PageLibrary,
    gate: StartupGate,
    player: Box<dyn CuePlayer>,
    swipe: SwipeTracker,
    /// Resolved once at boot; `System` is not re-detected per frame.
    theme: Theme,
    colors: ColorScheme,
    zoom_scale: f32,
    prefetch_views: usize,
    fullscreen: bool,
    window_id: Option<window::Id>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("cursor", &self.controller.cursor())
            .field("mode", &self.controller.layout_mode())
            .field("fullscreen", &self.fullscreen)
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_WIDTH: u32 = 1280;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 860;
pub const MIN_WINDOW_WIDTH: u32 = 320;
pub const MIN_WINDOW_HEIGHT: u32 = 480;

/// Builds the window settings.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    // iced 0.14 requires a `Fn` boot; it is only called once.
    let boot = move || App::new(flags.clone());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Builds the application state and kicks off loading of the pages the
    /// startup policy waits for, plus the first prefetch window.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let Flags {
            lang,
            config,
            pages,
        } = flags;

        let player = audio::open_player(config.audio_enabled(), Volume::new(config.volume()));
        let mut app = Self::with_player(lang, &config, pages, player);
        let task = app.boot_task();
        (app, task)
    }

    fn with_player(
        lang: Option<String>,
        config: &Config,
        pages: PageSequence,
        player: Box<dyn CuePlayer>,
    ) -> Self {
        let i18n = I18n::new(lang, config);
        let theme_mode = config.general.theme_mode;

        let gate = StartupGate::new(config.startup_policy(), &pages, config.startup_count());
        let library = PageLibrary::new(
            config.book.base_dir.clone(),
            CacheLimits {
                max_images: config.cache_max_images(),
                ..CacheLimits::default()
            },
        );

        #[allow(clippy::cast_precision_loss)]
        let controller = FlipbookController::new(
            pages,
            WINDOW_DEFAULT_WIDTH as f32,
            config.controller_options(),
        );

        log::info!(
            "opened book: {} pages, {} views in {:?} layout",
            controller.pages().len(),
            controller.total_views(),
            controller.layout_mode()
        );

        Self {
            i18n,
            controller,
            library,
            gate,
            player,
            swipe: SwipeTracker::new(config.swipe_threshold()),
            theme: theme_mode.iced_theme(),
            colors: theme_mode.colors(),
            zoom_scale: config.zoom_scale(),
            prefetch_views: config.prefetch_views(),
            fullscreen: false,
            window_id: None,
        }
    }

    fn boot_task(&mut self) -> Task<Message> {
        // Required pages first, so the gate opens as early as possible.
        let required = update::load_pages(&mut self.library, self.gate.required());
        let nearby = update::prefetch(&mut self.update_context());
        Task::batch([required, nearby])
    }

    fn update_context(&mut self) -> update::UpdateContext<'_> {
        update::UpdateContext {
            controller: &mut self.controller,
            library: &mut self.library,
            player: self.player.as_ref(),
            swipe: &mut self.swipe,
            fullscreen: &mut self.fullscreen,
            window_id: &mut self.window_id,
            prefetch_views: self.prefetch_views,
        }
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        let label = controls::label_text(
            self.controller.presented_view().label,
            self.controller.pages(),
            &self.i18n,
        );
        format!("{label} - {app_name}")
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_event_subscription()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = self.update_context();

        match message {
            Message::Input(event) => update::handle_input(&mut ctx, event),
            Message::RawEvent { window, event } => {
                update::handle_raw_event(&mut ctx, window, &event)
            }
            Message::TurnSettled => update::handle_turn_settled(&mut ctx),
            Message::WindowModeChanged(mode) => update::handle_window_mode(&mut ctx, mode),
            Message::PageLoaded { id, result } => {
                update::handle_page_loaded(&mut ctx, id, result)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            controller: &self.controller,
            library: &self.library,
            gate: &self.gate,
            colors: &self.colors,
            zoom_scale: self.zoom_scale,
            fullscreen: self.fullscreen,
        })
    }
}
