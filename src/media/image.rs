// SPDX-License-Identifier: MPL-2.0
//! Page image decoding (PNG, JPEG, WebP).

use crate::error::Result;
use iced::widget::image;
use image_rs::GenericImageView;
use std::fs;
use std::path::Path;

/// A decoded page, ready to hand to an Iced image widget.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl PageImage {
    /// Creates a new `PageImage` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }

    /// Width / height ratio, or `None` for a degenerate image.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }

    /// Decoded size in bytes (RGBA).
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Loads and decodes the page image at `path`.
///
/// # Errors
///
/// Returns [`crate::error::Error::Io`] when the file cannot be read and
/// [`crate::error::Error::Image`] when it cannot be decoded.
pub fn load_page_image<P: AsRef<Path>>(path: P) -> Result<PageImage> {
    let bytes = fs::read(path.as_ref())?;
    let img = image_rs::load_from_memory(&bytes)?;
    let (width, height) = img.dimensions();
    let pixels = img.to_rgba8().into_vec();
    Ok(PageImage::from_rgba(width, height, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image_rs::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn load_png_image_returns_expected_dimensions() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let image_path = temp_dir.path().join("a-24.png");

        let image = RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 255]));
        image
            .save(&image_path)
            .expect("failed to write temporary png");

        let data = load_page_image(&image_path).expect("png should load successfully");
        assert_eq!(data.width, 4);
        assert_eq!(data.height, 2);
        assert_eq!(data.aspect_ratio(), Some(2.0));
        assert_eq!(data.size_bytes(), 32);
    }

    #[test]
    fn load_missing_image_returns_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let missing_path = temp_dir.path().join("does_not_exist.png");

        match load_page_image(&missing_path) {
            Err(Error::Io(_)) => {}
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn load_invalid_png_bytes_returns_image_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let bad_path = temp_dir.path().join("invalid.png");
        std::fs::write(&bad_path, b"not a png").expect("failed to write invalid data");

        match load_page_image(&bad_path) {
            Err(Error::Image(message)) => assert!(!message.is_empty()),
            other => panic!("expected Image error for invalid png, got {other:?}"),
        }
    }

    #[test]
    fn zero_sized_image_has_no_aspect() {
        let image = PageImage::from_rgba(0, 10, Vec::new());
        assert_eq!(image.aspect_ratio(), None);
    }
}
