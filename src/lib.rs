// SPDX-License-Identifier: MPL-2.0
//! `iced_flipbook` presents a numbered series of page images as a magazine,
//! built with the Iced GUI framework.
//!
//! Narrow windows show one page at a time; wide windows show the cover on
//! its own, then two-page spreads, then the back cover. The book model in
//! [`book`] is independent of the UI and can be driven headless.

#![doc(html_root_url = "https://docs.rs/iced_flipbook/0.1.0")]

pub mod app;
pub mod audio;
pub mod book;
pub mod config;
pub mod error;
pub mod i18n;
pub mod media;
pub mod ui;
