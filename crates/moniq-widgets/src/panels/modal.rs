//! Modal popup and message box
//!
//! Both sit above every other panel. The popup dismisses itself a fixed
//! time after the most recent show; the message box stays until the sound
//! engine hides it and can carry an animated busy indicator.

use std::time::{Duration, Instant};

use iced::widget::{column, container, text};
use iced::{Background, Border, Element, Font, Length};
use moniq_core::protocol::MsgBox;
use moniq_core::text::fit_to_width;

use crate::canvas::{busy_view, BUSY_FRAMES};
use crate::metrics::MonospaceMetrics;
use crate::theme::{Palette, Themed, MSG_LINE_1_FONT_SIZE, MSG_LINE_2_FONT_SIZE, VISIBLE_LCD_WIDTH};

/// Time a popup stays up after the most recent show
pub const POPUP_TIMEOUT: Duration = Duration::from_millis(1000);

/// Busy indicator frame period
pub const BUSY_FRAME_INTERVAL: Duration = Duration::from_millis(40);

const MODAL_WIDTH: f32 = VISIBLE_LCD_WIDTH - 80.0;
const MODAL_BORDER: f32 = 10.0;
const LINE_MARGIN: f32 = 30.0;
const BUSY_SIZE: f32 = 64.0;

fn line_font_size(line: usize) -> f32 {
    if line == 0 {
        MSG_LINE_1_FONT_SIZE
    } else {
        MSG_LINE_2_FONT_SIZE
    }
}

fn fit_line(line: usize, s: &str) -> String {
    let width = MODAL_WIDTH - 2.0 * (MODAL_BORDER + LINE_MARGIN);
    fit_to_width(s, width, &MonospaceMetrics::for_size(line_font_size(line)))
}

#[derive(Debug, Clone, Default)]
pub struct Popup {
    lines: [String; 2],
    dismiss_at: Option<Instant>,
    palette: Palette,
}

impl Popup {
    /// Show two lines, restarting the dismiss timer
    pub fn show(&mut self, lines: &[String; 2], now: Instant) {
        for (i, (dst, src)) in self.lines.iter_mut().zip(lines).enumerate() {
            *dst = fit_line(i, src);
        }
        self.dismiss_at = Some(now + POPUP_TIMEOUT);
    }

    /// Hide the popup once its timer has run out; returns true on dismiss
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.dismiss_at {
            Some(at) if now >= at => {
                self.dismiss_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.dismiss_at.is_some()
    }

    pub fn lines(&self) -> &[String; 2] {
        &self.lines
    }
}

impl Themed for Popup {
    fn refresh_colour(&mut self, palette: &Palette) {
        self.palette = *palette;
    }

    fn palette(&self) -> &Palette {
        &self.palette
    }
}

#[derive(Debug, Clone, Default)]
pub struct MessageBox {
    lines: [String; 3],
    busy: bool,
    busy_frame: usize,
    visible: bool,
    palette: Palette,
}

impl MessageBox {
    /// Apply a show/hide request from the sound engine
    pub fn apply(&mut self, msg: &MsgBox) {
        if !msg.show {
            self.hide();
            return;
        }
        for (i, (dst, src)) in self.lines.iter_mut().zip(&msg.lines).enumerate() {
            *dst = fit_line(i, src);
        }
        if msg.busy && !self.busy {
            self.busy_frame = 0;
        }
        self.busy = msg.busy;
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.busy = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the busy indicator is animating
    pub fn is_busy(&self) -> bool {
        self.visible && self.busy
    }

    /// Advance the busy indicator one frame
    pub fn tick_busy(&mut self) {
        if self.is_busy() {
            self.busy_frame = (self.busy_frame + 1) % BUSY_FRAMES;
        }
    }

    pub fn busy_frame(&self) -> usize {
        self.busy_frame
    }

    /// Lines drawn, empty second and third lines are skipped
    pub fn visible_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(i, line)| *i == 0 || !line.is_empty())
            .map(|(i, line)| (i, line.as_str()))
    }
}

impl Themed for MessageBox {
    fn refresh_colour(&mut self, palette: &Palette) {
        self.palette = *palette;
    }

    fn palette(&self) -> &Palette {
        &self.palette
    }
}

fn modal_frame<'a, Message: 'a>(
    content: impl Into<Element<'a, Message>>,
    palette: Palette,
) -> Element<'a, Message> {
    container(content)
        .width(Length::Fixed(MODAL_WIDTH))
        .padding(MODAL_BORDER + LINE_MARGIN / 2.0)
        .style(move |_| container::Style {
            background: Some(Background::Color(palette.background)),
            border: Border {
                color: palette.accent,
                width: MODAL_BORDER,
                radius: 0.0.into(),
            },
            ..Default::default()
        })
        .into()
}

fn line_text<'a, Message: 'a>(line: usize, s: &'a str, palette: &Palette) -> Element<'a, Message> {
    text(s)
        .size(line_font_size(line))
        .font(Font::MONOSPACE)
        .color(palette.accent)
        .into()
}

pub fn popup_view<'a, Message: 'a>(popup: &'a Popup) -> Element<'a, Message> {
    let content = column(
        popup
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| line_text(i, line, &popup.palette)),
    )
    .spacing(12)
    .align_x(iced::Center);
    modal_frame(content, popup.palette)
}

pub fn message_box_view<'a, Message: 'a>(msg_box: &'a MessageBox) -> Element<'a, Message> {
    let palette = msg_box.palette;
    let mut content = column(
        msg_box
            .visible_lines()
            .map(|(i, line)| line_text(i, line, &palette)),
    )
    .spacing(12)
    .align_x(iced::Center);
    if msg_box.is_busy() {
        content = content.push(busy_view(msg_box.busy_frame, palette.accent, palette.dimmed, BUSY_SIZE));
    }
    modal_frame(content, palette)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(show: bool, lines: [&str; 3], busy: bool) -> MsgBox {
        MsgBox {
            show,
            lines: lines.map(String::from),
            busy,
        }
    }

    #[test]
    fn test_popup_dismisses_after_timeout() {
        let start = Instant::now();
        let mut popup = Popup::default();
        popup.show(&["SAVED".to_string(), "PRESET 12".to_string()], start);
        assert!(popup.is_visible());
        assert!(!popup.expire(start + Duration::from_millis(999)));
        assert!(popup.expire(start + POPUP_TIMEOUT));
        assert!(!popup.is_visible());
        assert!(!popup.expire(start + Duration::from_secs(5)));
    }

    #[test]
    fn test_popup_restarts_timer() {
        let start = Instant::now();
        let mut popup = Popup::default();
        popup.show(&["A".to_string(), String::new()], start);
        popup.show(&["B".to_string(), String::new()], start + Duration::from_millis(800));
        assert!(!popup.expire(start + Duration::from_millis(1200)));
        assert!(popup.expire(start + Duration::from_millis(1800)));
        assert_eq!(popup.lines()[0], "B");
    }

    #[test]
    fn test_message_box_hides_empty_lines() {
        let mut msg_box = MessageBox::default();
        msg_box.apply(&msg(true, ["SAVING", "", "PLEASE WAIT"], false));
        let lines: Vec<_> = msg_box.visible_lines().collect();
        assert_eq!(lines, vec![(0, "SAVING"), (2, "PLEASE WAIT")]);
    }

    #[test]
    fn test_busy_indicator_runs_while_shown() {
        let mut msg_box = MessageBox::default();
        msg_box.apply(&msg(true, ["LOADING", "", ""], true));
        assert!(msg_box.is_busy());
        for _ in 0..BUSY_FRAMES + 2 {
            msg_box.tick_busy();
        }
        assert_eq!(msg_box.busy_frame(), 2);

        msg_box.apply(&msg(false, ["", "", ""], true));
        assert!(!msg_box.is_visible());
        assert!(!msg_box.is_busy());
        msg_box.tick_busy();
        assert_eq!(msg_box.busy_frame(), 2);
    }
}
