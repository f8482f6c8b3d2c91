//! Font metrics used for text fitting
//!
//! The display fonts are monospaced, so a string's rendered width is its
//! character count times the per-character advance of the font size.

use moniq_core::text::TextMeasure;

/// Advance width as a fraction of the font size
const MONOSPACE_ADVANCE_RATIO: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    advance: f32,
}

impl MonospaceMetrics {
    /// Metrics for the display font at `size` pixels
    pub fn for_size(size: f32) -> Self {
        Self { advance: size * MONOSPACE_ADVANCE_RATIO }
    }

    pub fn advance(&self) -> f32 {
        self.advance
    }
}

impl TextMeasure for MonospaceMetrics {
    fn width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }
}
