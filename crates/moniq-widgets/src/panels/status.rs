//! Status bars along the top of the screen

use iced::widget::{container, row, text, Space};
use iced::{Background, Color, Element, Font, Length, Padding};
use moniq_core::protocol::{Layer, LayerStatus, MAX_LAYER_VOICES};
use moniq_core::text::{fit_to_width, TextMeasure};

use crate::metrics::MonospaceMetrics;
use crate::theme::{
    Palette, Themed, BAR_PADDING, MULTI_STATUS_BAR_HEIGHT, STATUS_BAR_HEIGHT, STATUS_FONT_SIZE,
    STATUS_ITEM_SPACING, VISIBLE_LCD_WIDTH,
};

const VOICE_ON: char = '■';
const VOICE_OFF: char = '□';
const MODIFIED_MARKER: &str = "*";
const TWELVE_VOICE_TEXT: &str = "12V";

fn status_metrics() -> MonospaceMetrics {
    MonospaceMetrics::for_size(STATUS_FONT_SIZE)
}

/// Preset / parameter name, layer indicator and tempo
#[derive(Debug, Clone, Default)]
pub struct StatusBar {
    left_text: String,
    modified: bool,
    layers: LayerStatus,
    tempo: String,
    palette: Palette,
}

impl StatusBar {
    pub fn set_left_status(&mut self, text: &str, modified: bool) {
        self.left_text = text.to_string();
        self.modified = modified;
    }

    pub fn set_layer_status(&mut self, layers: LayerStatus) {
        self.layers = layers;
    }

    pub fn set_tempo(&mut self, tempo: &str) {
        self.tempo = tempo.to_string();
    }

    /// Left text as drawn, `*` marks unsaved changes
    ///
    /// Fitted against the space the layer and tempo items currently leave,
    /// so a later tempo or layer change can't push it off the bar.
    pub fn left_text(&self) -> String {
        let fitted = fit_to_width(&self.left_text, self.left_max_width(), &status_metrics());
        if self.modified {
            fitted + MODIFIED_MARKER
        } else {
            fitted
        }
    }

    /// Width available to the left text, excluding the modified marker
    pub fn left_max_width(&self) -> f32 {
        let metrics = status_metrics();
        let right = self.right_items();
        let items: f32 = right.iter().map(|item| metrics.width(item)).sum();
        let gaps = (right.len() + 1) as f32 * STATUS_ITEM_SPACING;
        let marker = if self.modified {
            metrics.width(MODIFIED_MARKER)
        } else {
            0.0
        };
        (VISIBLE_LCD_WIDTH - 2.0 * BAR_PADDING - gaps - items - marker).max(0.0)
    }

    /// Texts drawn right of the left status, in order
    fn right_items(&self) -> Vec<String> {
        let mut items = if self.layers.twelve_voice {
            vec![TWELVE_VOICE_TEXT.to_string()]
        } else {
            vec![self.layer_text(Layer::L1), self.layer_text(Layer::L2)]
        };
        items.push(self.tempo.clone());
        items
    }

    pub fn tempo(&self) -> &str {
        &self.tempo
    }

    pub fn layers(&self) -> &LayerStatus {
        &self.layers
    }

    /// Voice meter for one layer, e.g. `L1 ■■■□□□`
    pub fn layer_text(&self, layer: Layer) -> String {
        let (label, voices) = match layer {
            Layer::L1 => ("L1", self.layers.l1_voices),
            Layer::L2 => ("L2", self.layers.l2_voices),
        };
        let max = usize::from(MAX_LAYER_VOICES);
        let voices = usize::from(voices).min(max);
        let mut meter = String::with_capacity(label.len() + 1 + max * 3);
        meter.push_str(label);
        meter.push(' ');
        meter.extend(std::iter::repeat_n(VOICE_ON, voices));
        meter.extend(std::iter::repeat_n(VOICE_OFF, max - voices));
        meter
    }
}

impl Themed for StatusBar {
    fn refresh_colour(&mut self, palette: &Palette) {
        self.palette = *palette;
    }

    fn palette(&self) -> &Palette {
        &self.palette
    }
}

fn bar_text<'a, Message: 'a>(content: String, colour: Color) -> Element<'a, Message> {
    text(content)
        .size(STATUS_FONT_SIZE)
        .font(Font::MONOSPACE)
        .color(colour)
        .into()
}

pub fn status_bar_view<'a, Message: 'a>(bar: &'a StatusBar) -> Element<'a, Message> {
    let palette = bar.palette;
    let fg = palette.background;
    // The inactive layer is drawn with the dimmed accent on the bar
    let layer_colour = |layer: Layer| {
        if bar.layers.active == layer {
            fg
        } else {
            palette.dimmed
        }
    };

    let mut content = row![bar_text(bar.left_text(), fg), Space::new().width(Length::Fill)]
        .spacing(STATUS_ITEM_SPACING)
        .align_y(iced::Center);
    if bar.layers.twelve_voice {
        content = content.push(bar_text(TWELVE_VOICE_TEXT.to_string(), fg));
    } else {
        content = content
            .push(bar_text(bar.layer_text(Layer::L1), layer_colour(Layer::L1)))
            .push(bar_text(bar.layer_text(Layer::L2), layer_colour(Layer::L2)));
    }
    content = content.push(bar_text(bar.tempo.clone(), fg));

    container(content)
        .width(Length::Fixed(VISIBLE_LCD_WIDTH))
        .height(Length::Fixed(STATUS_BAR_HEIGHT))
        .padding(Padding::new(0.0).left(BAR_PADDING).right(BAR_PADDING))
        .center_y(Length::Fixed(STATUS_BAR_HEIGHT))
        .style(move |_| container::Style {
            background: Some(Background::Color(palette.accent)),
            ..Default::default()
        })
        .into()
}

/// Sound names of both layers, shown for multi-timbral parameters
#[derive(Debug, Clone, Default)]
pub struct MultiStatusBar {
    l1: String,
    l2: String,
    selected: Layer,
    visible: bool,
    palette: Palette,
}

impl MultiStatusBar {
    /// Show both names; hides the bar if either is empty
    pub fn set_sound_names(&mut self, l1: &str, l2: &str) {
        self.visible = !l1.is_empty() && !l2.is_empty();
        if self.visible {
            let metrics = status_metrics();
            self.l1 = fit_to_width(l1, Self::name_max_width(), &metrics);
            self.l2 = fit_to_width(l2, Self::name_max_width(), &metrics);
        }
    }

    /// Width of a name within its half of the bar, after the layer label
    pub fn name_max_width() -> f32 {
        let label = status_metrics().width(&cell_prefix(Layer::L1));
        VISIBLE_LCD_WIDTH / 2.0 - 2.0 * BAR_PADDING - label
    }

    pub fn select_layer(&mut self, layer: Layer) {
        self.selected = layer;
    }

    pub fn selected(&self) -> Layer {
        self.selected
    }

    pub fn names(&self) -> (&str, &str) {
        (&self.l1, &self.l2)
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Themed for MultiStatusBar {
    fn refresh_colour(&mut self, palette: &Palette) {
        self.palette = *palette;
    }

    fn palette(&self) -> &Palette {
        &self.palette
    }
}

pub fn multi_status_bar_view<'a, Message: 'a>(bar: &'a MultiStatusBar) -> Element<'a, Message> {
    let palette = bar.palette;
    let cell = |name: &'a str, layer: Layer| -> Element<'a, Message> {
        let selected = bar.selected == layer;
        let (fg, bg) = if selected {
            (palette.background, palette.accent)
        } else {
            (palette.accent, Color::TRANSPARENT)
        };
        container(
            text(format!("{}{}", cell_prefix(layer), name))
                .size(STATUS_FONT_SIZE)
                .font(Font::MONOSPACE)
                .color(fg),
        )
        .width(Length::FillPortion(1))
        .height(Length::Fill)
        .padding(Padding::new(0.0).left(BAR_PADDING))
        .center_y(Length::Fill)
        .style(move |_| container::Style {
            background: Some(Background::Color(bg)),
            ..Default::default()
        })
        .into()
    };

    container(row![cell(&bar.l1, Layer::L1), cell(&bar.l2, Layer::L2)])
        .width(Length::Fixed(VISIBLE_LCD_WIDTH))
        .height(Length::Fixed(MULTI_STATUS_BAR_HEIGHT))
        .into()
}

fn cell_prefix(layer: Layer) -> String {
    let label = match layer {
        Layer::L1 => "L1",
        Layer::L2 => "L2",
    };
    format!("{}: ", label)
}
