// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Shows the loading screen until the startup gate opens, then the book on
//! its stage with the control bar underneath.

use super::Message;
use crate::book::FlipbookController;
use crate::i18n::fluent::I18n;
use crate::media::{PageLibrary, StartupGate};
use crate::ui::book::{self, BookModel};
use crate::ui::controls::{self, ViewContext as ControlsViewContext};
use crate::ui::loading;
use crate::ui::styles;
use crate::ui::theming::ColorScheme;
use iced::widget::{Column, Container};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub controller: &'a FlipbookController,
    pub library: &'a PageLibrary,
    pub gate: &'a StartupGate,
    pub colors: &'a ColorScheme,
    pub zoom_scale: f32,
    pub fullscreen: bool,
}

/// Renders the whole window.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let content: Element<'_, Message> = if ctx.gate.is_open(ctx.library) {
        view_book(&ctx)
    } else {
        let (done, total) = ctx.gate.progress(ctx.library);
        loading::view(ctx.i18n, ctx.colors, done, total)
    };

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::stage(ctx.colors))
        .into()
}

fn view_book<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let controller = ctx.controller;
    let presented = controller.presented_view();
    let label = controls::label_text(presented.label, controller.pages(), ctx.i18n);

    let book = book::view(BookModel {
        view: presented,
        library: ctx.library,
        colors: ctx.colors.clone(),
        zoom_factor: controller.zoom().factor(ctx.zoom_scale),
        is_turning: controller.is_locked(),
        unavailable_label: ctx.i18n.tr("page-unavailable"),
    });

    let controls = controls::view(
        ControlsViewContext {
            i18n: ctx.i18n,
            colors: ctx.colors,
        },
        controller.controls(),
        label,
        ctx.fullscreen,
    )
    .map(Message::Input);

    Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(Container::new(book).width(Length::Fill).height(Length::Fill))
        .push(controls)
        .into()
}
