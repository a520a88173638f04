// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{radius, shadow};
use crate::ui::theming::ColorScheme;
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Backdrop behind the book.
pub fn stage(colors: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let stage = colors.stage;
    let text = colors.text_primary;
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(stage)),
        text_color: Some(text),
        ..Default::default()
    }
}

/// An empty page slot.
pub fn blank_page(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(color)),
        ..Default::default()
    }
}

/// Frame around the pages of the open book.
pub fn book(_theme: &Theme) -> container::Style {
    container::Style {
        shadow: shadow::BOOK,
        border: Border {
            radius: radius::NONE.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Translucent strip holding the controls.
pub fn control_bar(colors: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let background = colors.overlay_background;
    let text = colors.text_primary;
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(background)),
        text_color: Some(text),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
