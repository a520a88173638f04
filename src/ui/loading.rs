// SPDX-License-Identifier: MPL-2.0
//! Screen shown while the startup policy waits for pages to decode.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::theming::ColorScheme;
use iced::widget::{progress_bar, Column, Container, Text};
use iced::{alignment, Element, Length};

/// Width of the progress bar.
const BAR_WIDTH: f32 = 240.0;

pub fn view<'a, Message: 'a>(
    i18n: &I18n,
    colors: &ColorScheme,
    done: usize,
    total: usize,
) -> Element<'a, Message> {
    let title = Text::new(i18n.tr("window-title"))
        .size(typography::TITLE_MD)
        .color(colors.text_primary);

    let status = Text::new(i18n.tr_with_args(
        "loading-pages",
        &[("done", &done.to_string()), ("total", &total.to_string())],
    ))
    .size(typography::CAPTION)
    .color(colors.text_secondary);

    #[allow(clippy::cast_precision_loss)]
    let bar = progress_bar(0.0..=total.max(1) as f32, done as f32)
        .length(Length::Fixed(BAR_WIDTH))
        .girth(Length::Fixed(spacing::XS));

    let content = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(title)
        .push(bar)
        .push(status);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn loading_view_renders() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        let _element: Element<'_, ()> = view(&i18n, &ColorScheme::light(), 3, 44);
    }

    #[test]
    fn progress_text_shows_counts() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        let text = i18n.tr_with_args("loading-pages", &[("done", "3"), ("total", "44")]);
        assert_eq!(text, "Loading pages… 3 / 44");
    }
}
