//! Full-screen backdrops: the logo screen and the start-up warning

use iced::widget::{column, container, text};
use iced::{Background as Fill, Element, Font, Length};

use crate::theme::{Palette, Themed, VISIBLE_LCD_HEIGHT, VISIBLE_LCD_WIDTH};

const LOGO_TEXT: &str = "MONIQUE";
const LOGO_FONT_SIZE: f32 = 96.0;
const WARNING_LINES: [&str; 2] = ["STARTING UP", "DO NOT POWER OFF"];
const WARNING_FONT_SIZE: f32 = 40.0;

/// What a backdrop shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackdropKind {
    Logo,
    BootWarning,
}

#[derive(Debug, Clone)]
pub struct Backdrop {
    kind: BackdropKind,
    visible: bool,
    palette: Palette,
}

impl Backdrop {
    pub fn new(kind: BackdropKind, visible: bool) -> Self {
        Self {
            kind,
            visible,
            palette: Palette::default(),
        }
    }

    pub fn kind(&self) -> BackdropKind {
        self.kind
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Themed for Backdrop {
    fn refresh_colour(&mut self, palette: &Palette) {
        self.palette = *palette;
    }

    fn palette(&self) -> &Palette {
        &self.palette
    }
}

pub fn backdrop_view<'a, Message: 'a>(backdrop: &'a Backdrop) -> Element<'a, Message> {
    let palette = backdrop.palette;
    let content: Element<'a, Message> = match backdrop.kind {
        BackdropKind::Logo => text(LOGO_TEXT)
            .size(LOGO_FONT_SIZE)
            .font(Font::MONOSPACE)
            .color(palette.accent)
            .into(),
        BackdropKind::BootWarning => column(WARNING_LINES.iter().map(|line| -> Element<'a, Message> {
            text(*line)
                .size(WARNING_FONT_SIZE)
                .font(Font::MONOSPACE)
                .color(palette.accent)
                .into()
        }))
        .spacing(16)
        .align_x(iced::Center)
        .into(),
    };

    container(content)
        .center_x(Length::Fixed(VISIBLE_LCD_WIDTH))
        .center_y(Length::Fixed(VISIBLE_LCD_HEIGHT))
        .style(move |_| container::Style {
            background: Some(Fill::Color(palette.background)),
            ..Default::default()
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_and_theme() {
        let mut backdrop = Backdrop::new(BackdropKind::BootWarning, true);
        assert!(backdrop.is_visible());
        backdrop.set_visible(false);
        assert!(!backdrop.is_visible());

        let palette = Palette {
            accent: iced::Color::from_rgb8(0, 255, 0),
            ..Palette::default()
        };
        backdrop.refresh_colour(&palette);
        assert_eq!(backdrop.palette().accent, palette.accent);
    }
}
