// SPDX-License-Identifier: MPL-2.0
//! Light/dark theming of the reading stage.

use crate::ui::design_tokens::{opacity, palette};
use iced::{Color, Theme};
use serde::{Deserialize, Serialize};

/// Color palette for a theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    /// Backdrop behind the book.
    pub stage: Color,
    /// Fill of an empty page slot.
    pub blank_page: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub brand_primary: Color,
    pub overlay_background: Color,
}

impl ColorScheme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            stage: palette::GRAY_100,
            blank_page: palette::PAPER,
            text_primary: palette::GRAY_900,
            text_secondary: palette::GRAY_700,
            brand_primary: palette::PRIMARY_500,
            overlay_background: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::WHITE
            },
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            stage: palette::GRAY_900,
            blank_page: palette::GRAY_800,
            text_primary: palette::WHITE,
            text_secondary: palette::GRAY_200,
            brand_primary: palette::PRIMARY_400,
            overlay_background: Color {
                a: opacity::OVERLAY_STRONG,
                ..palette::BLACK
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Returns true if the effective theme is dark.
    /// For System mode, detects the actual system theme.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => {
                // Detect system theme; default to dark on detection error
                !matches!(dark_light::detect(), Ok(dark_light::Mode::Light))
            }
        }
    }

    #[must_use]
    pub fn colors(self) -> ColorScheme {
        if self.is_dark() {
            ColorScheme::dark()
        } else {
            ColorScheme::light()
        }
    }

    /// The Iced theme matching this mode.
    #[must_use]
    pub fn iced_theme(self) -> Theme {
        if self.is_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_stage_is_lighter_than_dark_stage() {
        assert!(ColorScheme::light().stage.r > ColorScheme::dark().stage.r);
    }

    #[test]
    fn theme_mode_is_dark_returns_correct_values() {
        assert!(!ThemeMode::Light.is_dark());
        assert!(ThemeMode::Dark.is_dark());
        // System mode depends on the desktop, only check it doesn't panic
        let _ = ThemeMode::System.is_dark();
    }

    #[test]
    fn explicit_modes_map_to_iced_themes() {
        assert_eq!(ThemeMode::Light.iced_theme(), Theme::Light);
        assert_eq!(ThemeMode::Dark.iced_theme(), Theme::Dark);
        assert_eq!(ThemeMode::Dark.colors(), ColorScheme::dark());
    }
}
