//! Palette and screen geometry
//!
//! Every panel is drawn in the instrument's accent colour on black. Panels
//! keep their own copy of the [`Palette`] and are re-themed through
//! [`Themed::refresh_colour`] when the accent colour changes.

use iced::Color;
use moniq_core::config::{SystemColour, DEFAULT_DIM_INTENSITY};

/// Physical LCD size
pub const LCD_WIDTH: f32 = 854.0;
pub const LCD_HEIGHT: f32 = 480.0;

/// Area of the LCD visible through the front panel bezel
pub const VISIBLE_LCD_MARGIN_LEFT: f32 = 9.0;
pub const VISIBLE_LCD_MARGIN_TOP: f32 = 5.0;
pub const VISIBLE_LCD_WIDTH: f32 = 844.0;
pub const VISIBLE_LCD_HEIGHT: f32 = 470.0;

pub const STATUS_BAR_HEIGHT: f32 = 60.0;
pub const MULTI_STATUS_BAR_HEIGHT: f32 = 46.0;
pub const MAIN_AREA_HEIGHT: f32 = 338.0;
pub const BOTTOM_BAR_HEIGHT: f32 = VISIBLE_LCD_HEIGHT - STATUS_BAR_HEIGHT - MAIN_AREA_HEIGHT;

pub const LIST_WIDTH: f32 = VISIBLE_LCD_WIDTH;
pub const LIST_ROW_HEIGHT: f32 = 48.0;
/// Rows of a list visible at once
pub const LIST_VISIBLE_ROWS: usize = 6;
pub const PARAM_LIST_WIDTH: f32 = VISIBLE_LCD_WIDTH / 2.0;
pub const PARAM_VALUE_WIDTH: f32 = 402.0;
pub const WT_LIST_WIDTH: f32 = VISIBLE_LCD_WIDTH / 2.0;

/// Horizontal padding inside a list row
pub const LIST_ITEM_MARGIN: f32 = 30.0;

/// Left and right padding of the status, multi status and value bars
pub const BAR_PADDING: f32 = 12.0;
/// Gap between the items of the status bar
pub const STATUS_ITEM_SPACING: f32 = 16.0;

pub const LIST_FONT_SIZE: f32 = 30.0;
pub const STATUS_FONT_SIZE: f32 = 30.0;
pub const PARAM_VALUE_NUM_FONT_SIZE: f32 = 80.0;
pub const PARAM_VALUE_TXT_FONT_SIZE: f32 = 36.0;
pub const PARAM_VALUE_TAG_FONT_SIZE: f32 = 30.0;
pub const EDIT_NAME_FONT_SIZE: f32 = 32.0;
pub const MSG_LINE_1_FONT_SIZE: f32 = 36.0;
pub const MSG_LINE_2_FONT_SIZE: f32 = 30.0;

/// Colours derived from the accent colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Foreground text, borders and selection background
    pub accent: Color,
    /// Disabled entries and not-yet-edited characters
    pub dimmed: Color,
    /// Screen background and text on a selection
    pub background: Color,
}

impl Palette {
    pub fn from_system_colour(colour: &SystemColour) -> Self {
        Self {
            accent: rgb8(colour.rgb()),
            dimmed: rgb8(colour.dimmed(DEFAULT_DIM_INTENSITY)),
            background: Color::BLACK,
        }
    }

    /// Accent at the given alpha, for scopes and chart fills
    pub fn accent_alpha(&self, alpha: f32) -> Color {
        Color { a: alpha, ..self.accent }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_system_colour(&SystemColour::default())
    }
}

fn rgb8([r, g, b]: [u8; 3]) -> Color {
    Color::from_rgb8(r, g, b)
}

/// A panel that draws in the accent colour
pub trait Themed {
    /// Re-style the panel for a new accent colour
    fn refresh_colour(&mut self, palette: &Palette);

    /// Palette the panel currently draws with
    fn palette(&self) -> &Palette;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_from_colour() {
        let palette = Palette::from_system_colour(&SystemColour::parse("FF8000").unwrap());
        assert_eq!(palette.accent, Color::from_rgb8(0xFF, 0x80, 0x00));
        assert_eq!(palette.dimmed, Color::from_rgb8(127, 64, 0));
        assert_eq!(palette.background, Color::BLACK);
        assert_eq!(palette.accent_alpha(0.5).a, 0.5);
    }

    #[test]
    fn test_default_is_white() {
        assert_eq!(Palette::default().accent, Color::WHITE);
    }
}
