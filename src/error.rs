// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Only the page range errors are fatal: [`Error::EmptyPageSequence`] and
//! [`Error::TooManyPages`] mean the configured range cannot be displayed, and
//! are reported before the first render.
//! Every other variant is recovered locally (blank slot, silent cue, default
//! config) and merely logged.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    /// The page range resolved to zero pages.
    #[error("Config Error: the page sequence is empty, nothing to display")]
    EmptyPageSequence,

    /// The page range is longer than the viewer accepts.
    #[error("Config Error: the page range spans {0} pages, at most {max} are supported", max = crate::book::pages::MAX_PAGE_COUNT)]
    TooManyPages(usize),

    #[error("Image Error: {0}")]
    Image(String),

    #[error("Audio Error: {0}")]
    Audio(String),
}

impl Error {
    /// Returns true for errors the viewer cannot start with.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::EmptyPageSequence | Error::TooManyPages(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
