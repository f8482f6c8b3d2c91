//! Soft button labels along the bottom edge

use iced::widget::{container, row, text};
use iced::{Background, Color, Element, Font, Length};
use moniq_core::protocol::SoftButtonState;

use crate::theme::{Palette, Themed, BOTTOM_BAR_HEIGHT, STATUS_FONT_SIZE, VISIBLE_LCD_WIDTH};

/// Label drawn for a soft button without a function
pub const EMPTY_LABEL: &str = "----";

#[derive(Debug, Clone, Default)]
pub struct BottomBar {
    labels: [String; 2],
    pressed: [bool; 2],
    visible: bool,
    palette: Palette,
}

impl BottomBar {
    /// Set both labels; two empty labels hide the bar
    pub fn set_text(&mut self, button1: &str, button2: &str) {
        if button1.is_empty() && button2.is_empty() {
            self.visible = false;
            return;
        }
        for (label, text) in self.labels.iter_mut().zip([button1, button2]) {
            *label = if text.is_empty() { EMPTY_LABEL.to_string() } else { text.to_string() };
        }
        self.visible = true;
    }

    pub fn set_state(&mut self, button1: SoftButtonState, button2: SoftButtonState) {
        for (pressed, state) in self.pressed.iter_mut().zip([button1, button2]) {
            match state {
                SoftButtonState::Pressed => *pressed = true,
                SoftButtonState::Unpressed => *pressed = false,
                SoftButtonState::Unchanged => {}
            }
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn label(&self, button: usize) -> Option<&str> {
        self.labels.get(button).map(String::as_str)
    }

    pub fn is_pressed(&self, button: usize) -> bool {
        self.pressed.get(button).copied().unwrap_or(false)
    }
}

impl Themed for BottomBar {
    fn refresh_colour(&mut self, palette: &Palette) {
        self.palette = *palette;
    }

    fn palette(&self) -> &Palette {
        &self.palette
    }
}

pub fn bottom_bar_view<'a, Message: 'a>(bar: &'a BottomBar) -> Element<'a, Message> {
    let palette = bar.palette;
    let button = |i: usize| -> Element<'a, Message> {
        let (fg, bg) = if bar.pressed[i] {
            (palette.background, palette.accent)
        } else {
            (palette.accent, Color::TRANSPARENT)
        };
        container(text(&bar.labels[i]).size(STATUS_FONT_SIZE).font(Font::MONOSPACE).color(fg))
            .width(Length::FillPortion(1))
            .height(Length::Fill)
            .center(Length::Fill)
            .style(move |_| container::Style {
                background: Some(Background::Color(bg)),
                border: iced::Border {
                    color: palette.accent,
                    width: 2.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    };

    container(row![button(0), button(1)].spacing(4))
        .width(Length::Fixed(VISIBLE_LCD_WIDTH))
        .height(Length::Fixed(BOTTOM_BAR_HEIGHT))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_labels_hide_bar() {
        let mut bar = BottomBar::default();
        bar.set_text("SAVE", "");
        assert!(bar.is_visible());
        assert_eq!(bar.label(0), Some("SAVE"));
        assert_eq!(bar.label(1), Some(EMPTY_LABEL));

        bar.set_text("", "");
        assert!(!bar.is_visible());
        // Labels survive a hide
        assert_eq!(bar.label(0), Some("SAVE"));
    }

    #[test]
    fn test_unchanged_state_is_kept() {
        let mut bar = BottomBar::default();
        bar.set_state(SoftButtonState::Pressed, SoftButtonState::Pressed);
        bar.set_state(SoftButtonState::Unchanged, SoftButtonState::Unpressed);
        assert!(bar.is_pressed(0));
        assert!(!bar.is_pressed(1));
        assert!(!bar.is_pressed(2));
    }
}
