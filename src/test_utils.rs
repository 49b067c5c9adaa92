use crate::colour::Colour;
use crate::editor::Container;
use crate::layout::{FixedWidthMeasure, PageGeometry, TextMeasure, TextMetrics};
use crate::render::Surface;
use crate::style::FontDescriptor;
use crate::units::Pt;
use crate::RowsError;

/// A single recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Save,
    Restore,
    StrokeColour(Colour),
    FillColour(Colour),
    LineWidth(Pt),
    MoveTo(Pt, Pt),
    LineTo(Pt, Pt),
    Stroke,
    FillRect(Pt, Pt, Pt, Pt),
    Font(String),
    Text(String, Pt, Pt),
}

/// A surface that records every call made to it, measuring text with a
/// [`FixedWidthMeasure`]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: Pt,
    pub height: Pt,
    pub ops: Vec<Op>,
    pub clears: usize,
    /// Make every `set_font` call fail as if no font were available
    pub fail_fonts: bool,
}

impl RecordingSurface {
    pub fn new(width: Pt, height: Pt) -> RecordingSurface {
        RecordingSurface {
            width,
            height,
            ..Default::default()
        }
    }

    /// Every drawn text with its baseline origin
    pub fn texts(&self) -> Vec<(String, Pt, Pt)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(text, x, y) => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (Pt, Pt) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.clears += 1;
    }

    fn save(&mut self) {
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }

    fn set_stroke_colour(&mut self, colour: Colour) {
        self.ops.push(Op::StrokeColour(colour));
    }

    fn set_fill_colour(&mut self, colour: Colour) {
        self.ops.push(Op::FillColour(colour));
    }

    fn set_line_width(&mut self, width: Pt) {
        self.ops.push(Op::LineWidth(width));
    }

    fn move_to(&mut self, x: Pt, y: Pt) {
        self.ops.push(Op::MoveTo(x, y));
    }

    fn line_to(&mut self, x: Pt, y: Pt) {
        self.ops.push(Op::LineTo(x, y));
    }

    fn stroke(&mut self) {
        self.ops.push(Op::Stroke);
    }

    fn fill_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt) {
        self.ops.push(Op::FillRect(x, y, width, height));
    }

    fn set_font(&mut self, font: &FontDescriptor) -> Result<(), RowsError> {
        if self.fail_fonts {
            return Err(RowsError::NoFont {
                descriptor: font.to_string(),
            });
        }
        self.ops.push(Op::Font(font.to_string()));
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: Pt, y: Pt) -> Result<(), RowsError> {
        self.ops.push(Op::Text(text.to_string(), x, y));
        Ok(())
    }
}

impl TextMeasure for RecordingSurface {
    fn measure(&self, font: &FontDescriptor, text: &str) -> Result<TextMetrics, RowsError> {
        if self.fail_fonts {
            return Err(RowsError::NoFont {
                descriptor: font.to_string(),
            });
        }
        FixedWidthMeasure::default().measure(font, text)
    }
}

/// A container of recording surfaces, indexed by mount order
#[derive(Debug, Default)]
pub struct RecordingContainer {
    pub surfaces: Vec<Option<RecordingSurface>>,
    /// Surfaces mounted from now on fail to find fonts
    pub fail_fonts: bool,
}

impl RecordingContainer {
    pub fn mounted(&self) -> usize {
        self.surfaces.iter().filter(|s| s.is_some()).count()
    }

    pub fn surface(&self, handle: usize) -> Option<&RecordingSurface> {
        self.surfaces.get(handle).and_then(Option::as_ref)
    }
}

impl Container for RecordingContainer {
    type Handle = usize;
    type Canvas<'a>
        = &'a mut RecordingSurface
    where
        Self: 'a;

    fn mount(&mut self, geometry: &PageGeometry) -> usize {
        let mut surface = RecordingSurface::new(geometry.page_width, geometry.page_height);
        surface.fail_fonts = self.fail_fonts;
        self.surfaces.push(Some(surface));
        self.surfaces.len() - 1
    }

    fn canvas(&mut self, handle: usize) -> Option<Self::Canvas<'_>> {
        self.surfaces.get_mut(handle).and_then(Option::as_mut)
    }

    fn unmount(&mut self, handle: usize) -> bool {
        self.surfaces
            .get_mut(handle)
            .and_then(Option::take)
            .is_some()
    }
}
