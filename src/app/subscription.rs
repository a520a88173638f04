// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Routes the native events the flipbook reacts to (keyboard, window size,
//! touch) to `App::update` as [`Message::RawEvent`].

use super::Message;
use iced::{event, keyboard, touch, window, Subscription};

/// Creates the native event subscription.
///
/// Keyboard events already captured by a widget are dropped so a focused
/// button does not also turn the page.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| {
        let forward = match &event {
            event::Event::Keyboard(keyboard::Event::KeyPressed { .. }) => {
                status == event::Status::Ignored
            }
            event::Event::Window(window::Event::Opened { .. } | window::Event::Resized(_)) => {
                true
            }
            event::Event::Touch(
                touch::Event::FingerPressed { .. }
                | touch::Event::FingerLifted { .. }
                | touch::Event::FingerLost { .. },
            ) => true,
            _ => false,
        };

        forward.then(|| Message::RawEvent {
            window: window_id,
            event,
        })
    })
}
