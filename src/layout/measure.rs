use crate::style::FontDescriptor;
use crate::units::Pt;
use crate::RowsError;

/// The extents of a run of text as drawn in a particular font
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct TextMetrics {
    /// Horizontal advance of the whole run
    pub width: Pt,
    /// Distance from the baseline to the top of the tallest glyph's ink
    pub ascent: Pt,
    /// Distance from the baseline to the bottom of the lowest glyph's ink.
    /// Unlike font-level descenders, this is non-negative
    pub descent: Pt,
}

impl TextMetrics {
    /// Ink height of the run: ascent + descent
    pub fn glyph_height(&self) -> Pt {
        self.ascent + self.descent
    }
}

/// Measures text. The layout engine depends on nothing else from the host, so
/// any drawing surface (or a fake) that can answer this question can drive it.
pub trait TextMeasure {
    fn measure(&self, font: &FontDescriptor, text: &str) -> Result<TextMetrics, RowsError>;
}

impl<M: TextMeasure + ?Sized> TextMeasure for &M {
    fn measure(&self, font: &FontDescriptor, text: &str) -> Result<TextMetrics, RowsError> {
        (**self).measure(font, text)
    }
}

impl<M: TextMeasure + ?Sized> TextMeasure for &mut M {
    fn measure(&self, font: &FontDescriptor, text: &str) -> Result<TextMetrics, RowsError> {
        (**self).measure(font, text)
    }
}

/// A deterministic measurer where every character has the same advance and
/// every run the same ink extents, all proportional to the font size. Useful
/// for testing layouts without loading fonts.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedWidthMeasure {
    pub advance_ratio: f32,
    pub ascent_ratio: f32,
    pub descent_ratio: f32,
}

impl Default for FixedWidthMeasure {
    fn default() -> Self {
        FixedWidthMeasure {
            advance_ratio: 1.0,
            ascent_ratio: 0.75,
            descent_ratio: 0.25,
        }
    }
}

impl TextMeasure for FixedWidthMeasure {
    fn measure(&self, font: &FontDescriptor, text: &str) -> Result<TextMetrics, RowsError> {
        let chars = text.chars().filter(|ch| *ch != '\n').count();
        if chars == 0 {
            return Ok(TextMetrics::default());
        }
        Ok(TextMetrics {
            width: font.size * (self.advance_ratio * chars as f32),
            ascent: font.size * self.ascent_ratio,
            descent: font.size * self.descent_ratio,
        })
    }
}
