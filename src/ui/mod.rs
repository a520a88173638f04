// SPDX-License-Identifier: MPL-2.0
//! User interface of the flipbook.
//!
//! Widgets here only draw state they are handed and emit
//! [`crate::book::InputEvent`]s; all decisions live in the controller.
//!
//! - [`book`] - The open book (page or spread), zoom and turn presentation
//! - [`controls`] - Control bar and view label text
//! - [`loading`] - Startup screen while required pages decode
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod book;
pub mod controls;
pub mod design_tokens;
pub mod loading;
pub mod styles;
pub mod theming;
