// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::book::{InputEvent, PageId, PageSequence};
use crate::config::Config;
use crate::error::Error;
use crate::media::PageImage;
use iced::{event, window};

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// An abstract input, from the control bar or a translated raw event.
    Input(InputEvent),
    /// A native event still to be translated.
    RawEvent {
        window: window::Id,
        event: event::Event,
    },
    /// The presentation delay of the turn in flight has elapsed.
    TurnSettled,
    /// The window manager reported the window's current mode.
    WindowModeChanged(window::Mode),
    /// A page finished decoding (or failed to).
    PageLoaded {
        id: PageId,
        result: Result<PageImage, Error>,
    },
}

/// Runtime flags passed from `main.rs` to the application.
///
/// The configuration is already loaded and merged with the command line,
/// and the page sequence already validated, so nothing here can fail.
#[derive(Debug, Clone)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `es`, `en-US`).
    pub lang: Option<String>,
    pub config: Config,
    pub pages: PageSequence,
}
