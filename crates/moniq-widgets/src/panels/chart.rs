//! Envelope and filter cutoff chart panels

use iced::widget::container;
use iced::{Element, Length};
use moniq_core::chart::{cutoff_curve, envelope_curve, Adsr, FilterCutoff, Point};

use crate::canvas::chart_view;
use crate::theme::{Palette, Themed, PARAM_VALUE_WIDTH, VISIBLE_LCD_WIDTH};

/// Which curve the chart plots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Envelope,
    Cutoff,
}

#[derive(Debug, Clone)]
pub struct ChartPanel {
    kind: ChartKind,
    points: Vec<Point>,
    standalone: bool,
    palette: Palette,
}

impl ChartPanel {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            points: Vec::new(),
            standalone: false,
            palette: Palette::default(),
        }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn set_envelope(&mut self, adsr: &Adsr) {
        self.points = envelope_curve(adsr);
    }

    pub fn set_cutoff(&mut self, cutoff: &FilterCutoff) {
        self.points = cutoff_curve(cutoff).to_vec();
    }

    /// Standalone charts fill the main area instead of sitting beside a list
    pub fn set_standalone(&mut self, standalone: bool) {
        self.standalone = standalone;
    }

    pub fn is_standalone(&self) -> bool {
        self.standalone
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl Themed for ChartPanel {
    fn refresh_colour(&mut self, palette: &Palette) {
        self.palette = *palette;
    }

    fn palette(&self) -> &Palette {
        &self.palette
    }
}

pub fn chart_panel_view<'a, Message: 'a>(chart: &'a ChartPanel) -> Element<'a, Message> {
    let width = if chart.standalone {
        VISIBLE_LCD_WIDTH
    } else {
        PARAM_VALUE_WIDTH
    };
    container(chart_view(
        &chart.points,
        chart.palette.accent,
        Length::Fill,
        Length::Fill,
    ))
    .width(Length::Fixed(width))
    .height(Length::Fill)
    .padding(16)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use moniq_core::chart::ENVELOPE_POINTS;

    #[test]
    fn test_curves_replace_points() {
        let mut chart = ChartPanel::new(ChartKind::Envelope);
        chart.set_envelope(&Adsr {
            attack: 0.5,
            decay: 0.5,
            sustain: 0.5,
            release: 0.5,
            level: 1.0,
        });
        assert_eq!(chart.points().len(), ENVELOPE_POINTS);

        let mut chart = ChartPanel::new(ChartKind::Cutoff);
        chart.set_cutoff(&FilterCutoff { high_pass: 0.0, low_pass: 1.0 });
        assert_eq!(chart.points().len(), 4);
    }
}
