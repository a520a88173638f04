// SPDX-License-Identifier: MPL-2.0
//! Control bar: previous/next, the view label, restart, zoom and fullscreen.
//!
//! Buttons whose action is currently impossible (first/last view, a turn in
//! flight) are rendered without a press handler, which iced draws disabled.

use crate::book::{ControlState, InputEvent, PageSequence, ViewLabel};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ColorScheme;
use iced::widget::{button, Container, Row, Space, Text};
use iced::{alignment, Element, Length, Theme};

#[derive(Clone)]
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub colors: &'a ColorScheme,
}

/// Localized text of a view label.
#[must_use]
pub fn label_text(label: ViewLabel, pages: &PageSequence, i18n: &I18n) -> String {
    match label {
        ViewLabel::Cover => i18n.tr("book-label-cover"),
        ViewLabel::BackCover => i18n.tr("book-label-back-cover"),
        ViewLabel::Page { index } => {
            let current = (index + 1).to_string();
            let total = pages.len().to_string();
            i18n.tr_with_args("book-label-page", &[("current", &current), ("total", &total)])
        }
        ViewLabel::Spread { left, right } => {
            let first = pages.number_of(left).to_string();
            let last = pages.number_of(right).to_string();
            i18n.tr_with_args("book-label-spread", &[("first", &first), ("last", &last)])
        }
    }
}

fn control_button<'a>(
    label: String,
    on_press: Option<InputEvent>,
    toggled: bool,
) -> iced::widget::Button<'a, InputEvent> {
    let content = Text::new(label)
        .size(typography::BODY)
        .align_x(alignment::Horizontal::Center);
    let style: fn(&Theme, button::Status) -> button::Style = if toggled {
        styles::button::toggled
    } else {
        styles::button::control
    };
    button(content)
        .padding([spacing::XS, spacing::SM])
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(style)
        .on_press_maybe(on_press)
}

pub fn view<'a>(
    ctx: ViewContext<'a>,
    state: ControlState,
    label: String,
    fullscreen: bool,
) -> Element<'a, InputEvent> {
    let i18n = ctx.i18n;

    let previous = control_button(
        i18n.tr("controls-previous"),
        (state.can_go_back && !state.is_turning).then_some(InputEvent::PrevRequested),
        false,
    );
    let next = control_button(
        i18n.tr("controls-next"),
        (state.can_go_forward && !state.is_turning).then_some(InputEvent::NextRequested),
        false,
    );
    let restart = control_button(
        i18n.tr("controls-restart"),
        (state.can_restart && !state.is_turning).then_some(InputEvent::RestartRequested),
        false,
    );

    let zoom_key = if state.zoomed {
        "controls-zoom-out"
    } else {
        "controls-zoom-in"
    };
    let zoom = control_button(
        i18n.tr(zoom_key),
        Some(InputEvent::ZoomToggleRequested),
        state.zoomed,
    );

    let fullscreen_key = if fullscreen {
        "controls-exit-fullscreen"
    } else {
        "controls-fullscreen"
    };
    let fullscreen_button = control_button(
        i18n.tr(fullscreen_key),
        Some(InputEvent::FullscreenToggleRequested),
        fullscreen,
    );

    let label = Text::new(label)
        .size(typography::BODY)
        .color(ctx.colors.text_secondary)
        .width(Length::Fixed(sizing::LABEL_WIDTH))
        .align_x(alignment::Horizontal::Center);

    let row = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(previous)
        .push(label)
        .push(next)
        .push(Space::new().width(Length::Fixed(spacing::MD)))
        .push(restart)
        .push(zoom)
        .push(fullscreen_button);

    Container::new(
        Container::new(row)
            .padding([spacing::XXS, spacing::SM])
            .style(styles::container::control_bar(ctx.colors)),
    )
    .width(Length::Fill)
    .height(Length::Fixed(sizing::CONTROL_BAR_HEIGHT))
    .align_x(alignment::Horizontal::Center)
    .align_y(alignment::Vertical::Center)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::PageRange;
    use crate::config::Config;

    fn magazine() -> PageSequence {
        PageSequence::from_range(&PageRange::new("pages/a-", 24, 67, ".png")).expect("non-empty")
    }

    fn english() -> I18n {
        I18n::new(Some("en-US".to_string()), &Config::default())
    }

    #[test]
    fn spread_label_uses_printed_numbers() {
        let text = label_text(ViewLabel::Spread { left: 1, right: 2 }, &magazine(), &english());
        assert_eq!(text, "Pages 25-26");
    }

    #[test]
    fn single_label_counts_from_one() {
        let text = label_text(ViewLabel::Page { index: 0 }, &magazine(), &english());
        assert_eq!(text, "1 / 44");
        let text = label_text(ViewLabel::Page { index: 43 }, &magazine(), &english());
        assert_eq!(text, "44 / 44");
    }

    #[test]
    fn cover_labels_are_localized() {
        let en = english();
        assert_eq!(label_text(ViewLabel::Cover, &magazine(), &en), "Cover");
        assert_eq!(label_text(ViewLabel::BackCover, &magazine(), &en), "Back cover");

        let es = I18n::new(Some("es".to_string()), &Config::default());
        assert_eq!(label_text(ViewLabel::Cover, &magazine(), &es), "Portada");
    }

    #[test]
    fn controls_view_renders() {
        let i18n = english();
        let colors = ColorScheme::dark();
        let state = ControlState {
            can_go_back: false,
            can_go_forward: true,
            can_restart: false,
            is_turning: false,
            zoomed: true,
        };
        let _element = view(
            ViewContext {
                i18n: &i18n,
                colors: &colors,
            },
            state,
            "Cover".to_string(),
            false,
        );
    }
}
