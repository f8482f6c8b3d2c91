//! Parameter value displays
//!
//! [`ParamValueBar`] is the one-line bar under the status bar used when a
//! parameter has no related list. [`ValuePanel`] is the large value shown
//! beside the parameter list, with an optional units tag underneath.

use iced::widget::{column, container, row, text, Space};
use iced::{Background, Element, Font, Length, Padding};
use moniq_core::protocol::ParamValue;
use moniq_core::text::fit_to_width;

use crate::metrics::MonospaceMetrics;
use crate::theme::{
    Palette, Themed, BAR_PADDING, MULTI_STATUS_BAR_HEIGHT, PARAM_VALUE_NUM_FONT_SIZE,
    PARAM_VALUE_TAG_FONT_SIZE, PARAM_VALUE_TXT_FONT_SIZE, PARAM_VALUE_WIDTH, STATUS_FONT_SIZE,
    VISIBLE_LCD_WIDTH,
};

#[derive(Debug, Clone, Default)]
pub struct ParamValueBar {
    name: String,
    value: String,
    visible: bool,
    palette: Palette,
}

impl ParamValueBar {
    /// Widest name or value: each gets half the bar
    pub const MAX_TEXT_WIDTH: f32 = VISIBLE_LCD_WIDTH / 2.0 - 2.0 * BAR_PADDING;

    pub fn show_value(&mut self, value: &ParamValue) {
        let metrics = MonospaceMetrics::for_size(STATUS_FONT_SIZE);
        self.name = fit_to_width(&value.name, Self::MAX_TEXT_WIDTH, &metrics);
        self.value = fit_to_width(&value.bar_text(), Self::MAX_TEXT_WIDTH, &metrics);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Themed for ParamValueBar {
    fn refresh_colour(&mut self, palette: &Palette) {
        self.palette = *palette;
    }

    fn palette(&self) -> &Palette {
        &self.palette
    }
}

pub fn value_bar_view<'a, Message: 'a>(bar: &'a ParamValueBar) -> Element<'a, Message> {
    let palette = bar.palette;
    let line = |s: &'a str| text(s).size(STATUS_FONT_SIZE).font(Font::MONOSPACE).color(palette.accent);

    container(
        row![line(&bar.name), Space::new().width(Length::Fill), line(&bar.value)]
            .align_y(iced::Center),
    )
    .width(Length::Fixed(VISIBLE_LCD_WIDTH))
    .height(Length::Fixed(MULTI_STATUS_BAR_HEIGHT))
    .padding(Padding::new(0.0).left(BAR_PADDING).right(BAR_PADDING))
    .center_y(Length::Fixed(MULTI_STATUS_BAR_HEIGHT))
    .style(move |_| container::Style {
        background: Some(Background::Color(palette.background)),
        border: iced::Border {
            color: palette.accent,
            width: 2.0,
            radius: 0.0.into(),
        },
        ..Default::default()
    })
    .into()
}

/// Large value with units tag
#[derive(Debug, Clone)]
pub struct ValuePanel {
    value: String,
    text_font: bool,
    tag: Option<String>,
    width: f32,
    palette: Palette,
}

impl Default for ValuePanel {
    fn default() -> Self {
        Self {
            value: String::new(),
            text_font: false,
            tag: None,
            width: PARAM_VALUE_WIDTH,
            palette: Palette::default(),
        }
    }
}

impl ValuePanel {
    /// Fit the value and tag of `param` to the panel width
    ///
    /// Text values are drawn with the smaller text font. With `show_tag`
    /// false (charts) the tag is hidden and the numeric font is always used.
    pub fn set_value(&mut self, param: &ParamValue, show_tag: bool) {
        self.text_font = show_tag && param.is_text();
        let size = if self.text_font {
            PARAM_VALUE_TXT_FONT_SIZE
        } else {
            PARAM_VALUE_NUM_FONT_SIZE
        };
        let value = if show_tag { param.value_text() } else { &param.value_string };
        self.value = fit_to_width(value, self.width, &MonospaceMetrics::for_size(size));

        self.tag = (show_tag && !param.value_tag.is_empty()).then(|| {
            fit_to_width(
                &param.value_tag,
                self.width,
                &MonospaceMetrics::for_size(PARAM_VALUE_TAG_FONT_SIZE),
            )
        });
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn uses_text_font(&self) -> bool {
        self.text_font
    }
}

impl Themed for ValuePanel {
    fn refresh_colour(&mut self, palette: &Palette) {
        self.palette = *palette;
    }

    fn palette(&self) -> &Palette {
        &self.palette
    }
}

pub fn value_panel_view<'a, Message: 'a>(panel: &'a ValuePanel) -> Element<'a, Message> {
    let colour = panel.palette.accent;
    let size = if panel.text_font {
        PARAM_VALUE_TXT_FONT_SIZE
    } else {
        PARAM_VALUE_NUM_FONT_SIZE
    };

    let mut content = column![text(&panel.value).size(size).font(Font::MONOSPACE).color(colour)]
        .spacing(8)
        .align_x(iced::Center);
    if let Some(tag) = &panel.tag {
        content = content.push(
            text(tag)
                .size(PARAM_VALUE_TAG_FONT_SIZE)
                .font(Font::MONOSPACE)
                .color(colour),
        );
    }

    container(content)
        .width(Length::Fixed(panel.width))
        .height(Length::Fill)
        .center(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use moniq_core::text::TextMeasure;

    fn param(display: &str, value: &str, tag: &str) -> ParamValue {
        ParamValue {
            name: "CUTOFF".to_string(),
            display_string: display.to_string(),
            value_string: value.to_string(),
            value_tag: tag.to_string(),
        }
    }

    #[test]
    fn test_value_bar_text() {
        let mut bar = ParamValueBar::default();
        bar.show_value(&param("", "440", "Hz"));
        assert!(bar.is_visible());
        assert_eq!(bar.name(), "CUTOFF");
        assert_eq!(bar.value(), "440 Hz");
        bar.hide();
        assert!(!bar.is_visible());
    }

    #[test]
    fn test_value_bar_fits_each_half() {
        let mut bar = ParamValueBar::default();
        let long = "X".repeat(200);
        bar.show_value(&ParamValue {
            name: long.clone(),
            display_string: long.clone(),
            value_string: long,
            value_tag: String::new(),
        });

        // 398px at 18px per char: 21 chars plus the marker
        let metrics = MonospaceMetrics::for_size(STATUS_FONT_SIZE);
        assert_eq!(bar.name(), format!("{}~", "X".repeat(21)));
        assert_eq!(bar.value(), bar.name());
        assert!(metrics.width(bar.name()) <= ParamValueBar::MAX_TEXT_WIDTH);
    }

    #[test]
    fn test_numeric_value_and_tag() {
        let mut panel = ValuePanel::default();
        panel.set_value(&param("", "12.5", "dB"), true);
        assert_eq!(panel.value(), "12.5");
        assert_eq!(panel.tag(), Some("dB"));
        assert!(!panel.uses_text_font());
    }

    #[test]
    fn test_text_value_is_fitted() {
        let mut panel = ValuePanel::default();
        // 402px at 21.6px per char: 18 chars
        panel.set_value(&param("SAWTOOTH WITH EXTRA HARMONICS", "3", ""), true);
        assert!(panel.uses_text_font());
        assert_eq!(panel.value(), "SAWTOOTH WITH EXT~");
        assert_eq!(panel.tag(), None);
    }

    #[test]
    fn test_long_number_truncated() {
        let mut panel = ValuePanel::default();
        // 48px per char: 8 chars
        panel.set_value(&param("", "-123456789.0", ""), true);
        assert_eq!(panel.value(), "-123456~");
    }

    #[test]
    fn test_chart_value_hides_tag() {
        let mut panel = ValuePanel::default();
        panel.set_value(&param("", "250", "ms"), false);
        assert_eq!(panel.value(), "250");
        assert_eq!(panel.tag(), None);
    }
}
