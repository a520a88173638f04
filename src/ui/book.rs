// SPDX-License-Identifier: MPL-2.0
//! The open book: one page or a two-page spread, fitted to the window.
//!
//! Pages keep their aspect ratio. While zoomed the book is scaled up and
//! placed in a scrollable that pans in both directions. A turn in flight
//! shows the outgoing view slightly shrunk and faded.

use crate::book::layout::{fit_book_size, page_slot_size};
use crate::book::{LayoutMode, ViewDescriptor};
use crate::media::{PageLibrary, PageStatus};
use crate::ui::design_tokens::{palette, spacing, turn, typography};
use crate::ui::styles;
use crate::ui::theming::ColorScheme;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{container, image, responsive, text, Container, Row, Scrollable};
use iced::{Element, Length, Size};

/// Everything needed to draw the book.
pub struct BookModel<'a> {
    pub view: ViewDescriptor,
    pub library: &'a PageLibrary,
    pub colors: ColorScheme,
    /// Scale applied on top of the fitted size (1.0 when not zoomed).
    pub zoom_factor: f32,
    pub is_turning: bool,
    /// Caption of slots whose page failed to load.
    pub unavailable_label: String,
}

/// On-screen size of the book for the given area and presentation state.
#[must_use]
pub fn presented_size(
    available: Size,
    page_aspect: f32,
    mode: LayoutMode,
    zoom_factor: f32,
    is_turning: bool,
) -> Size {
    let fitted = fit_book_size(available, page_aspect, mode);
    let scale = zoom_factor * if is_turning { turn::SCALE } else { 1.0 };
    Size::new(fitted.width * scale, fitted.height * scale)
}

pub fn view<'a, Message: 'a>(model: BookModel<'a>) -> Element<'a, Message> {
    responsive(move |available: Size| view_inner(&model, available)).into()
}

fn view_inner<'a, Message: 'a>(model: &BookModel<'a>, available: Size) -> Element<'a, Message> {
    let inner = Size::new(
        (available.width - 2.0 * spacing::MD).max(0.0),
        (available.height - 2.0 * spacing::MD).max(0.0),
    );
    let book_size = presented_size(
        inner,
        model.library.page_aspect(),
        model.view.mode,
        model.zoom_factor,
        model.is_turning,
    );
    let slot = page_slot_size(book_size, model.view.mode);
    let page_opacity = if model.is_turning { turn::OPACITY } else { 1.0 };

    let mut pages = Row::new();
    for page in model.view.slots() {
        let decoded = page.and_then(|p| model.library.image(&p.id));
        let failed = page.is_some_and(|p| model.library.status(&p.id) == PageStatus::Failed);
        let slot_element: Element<'a, Message> = match decoded {
            Some(decoded) => image(decoded.handle.clone())
                .width(Length::Fixed(slot.width))
                .height(Length::Fixed(slot.height))
                .content_fit(iced::ContentFit::Fill)
                .opacity(page_opacity)
                .into(),
            None => {
                let caption = if failed {
                    model.unavailable_label.clone()
                } else {
                    String::new()
                };
                // Missing and loading pages render blank.
                container(
                    text(caption)
                        .size(typography::CAPTION)
                        .color(palette::GRAY_700),
                )
                .width(Length::Fixed(slot.width))
                .height(Length::Fixed(slot.height))
                .center_x(Length::Fixed(slot.width))
                .center_y(Length::Fixed(slot.height))
                .style(styles::container::blank_page(blank_color(model, page.is_some())))
                .into()
            }
        };
        pages = pages.push(slot_element);
    }

    let book = Container::new(pages).style(styles::container::book);

    let zoomed = model.zoom_factor > 1.0;
    let content: Element<'a, Message> = if zoomed {
        Scrollable::new(Container::new(book).padding(spacing::MD))
            .width(Length::Fill)
            .height(Length::Fill)
            .direction(Direction::Both {
                vertical: Scrollbar::default(),
                horizontal: Scrollbar::default(),
            })
            .into()
    } else {
        book.into()
    };

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

/// Slots past either end of the book stay transparent so the cover sits
/// alone on the right; slots of real pages get a paper fill until decoded.
fn blank_color(model: &BookModel<'_>, occupied: bool) -> iced::Color {
    if occupied {
        model.colors.blank_page
    } else {
        iced::Color::TRANSPARENT
    }
}
