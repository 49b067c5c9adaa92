//! Drawing laid out rows onto a surface.
//!
//! Surfaces use a top-left origin with `y` growing downwards, the way the
//! host page is described: padding is measured in from each edge and rows
//! stack downwards from the top padding. A [`Surface`] implementation is
//! responsible for mapping that onto its own coordinate system (the PDF
//! [`PdfCanvas`](crate::PdfCanvas) flips it onto PDF's bottom-left origin).

mod indicators;
mod rows;

pub use indicators::*;
pub use rows::*;

use crate::colour::Colour;
use crate::style::FontDescriptor;
use crate::units::Pt;
use crate::RowsError;

/// A 2D drawing target with a path API and a text API
pub trait Surface {
    /// Width and height of the surface
    fn size(&self) -> (Pt, Pt);

    /// Erase everything drawn so far
    fn clear(&mut self);

    /// Push the current graphics state (colours, line width, font)
    fn save(&mut self);

    /// Pop the graphics state pushed by the matching [`Surface::save`]
    fn restore(&mut self);

    fn set_stroke_colour(&mut self, colour: Colour);

    fn set_fill_colour(&mut self, colour: Colour);

    fn set_line_width(&mut self, width: Pt);

    /// Begin a new sub-path at `(x, y)`
    fn move_to(&mut self, x: Pt, y: Pt);

    fn line_to(&mut self, x: Pt, y: Pt);

    /// Stroke and end the current path
    fn stroke(&mut self);

    /// Fill a rectangle whose top-left corner is `(x, y)` with the fill colour
    fn fill_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt);

    /// Select the font used by subsequent [`Surface::fill_text`] calls
    fn set_font(&mut self, font: &FontDescriptor) -> Result<(), RowsError>;

    /// Draw text in the fill colour with its baseline starting at `(x, y)`
    fn fill_text(&mut self, text: &str, x: Pt, y: Pt) -> Result<(), RowsError>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn size(&self) -> (Pt, Pt) {
        (**self).size()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn save(&mut self) {
        (**self).save()
    }

    fn restore(&mut self) {
        (**self).restore()
    }

    fn set_stroke_colour(&mut self, colour: Colour) {
        (**self).set_stroke_colour(colour)
    }

    fn set_fill_colour(&mut self, colour: Colour) {
        (**self).set_fill_colour(colour)
    }

    fn set_line_width(&mut self, width: Pt) {
        (**self).set_line_width(width)
    }

    fn move_to(&mut self, x: Pt, y: Pt) {
        (**self).move_to(x, y)
    }

    fn line_to(&mut self, x: Pt, y: Pt) {
        (**self).line_to(x, y)
    }

    fn stroke(&mut self) {
        (**self).stroke()
    }

    fn fill_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt) {
        (**self).fill_rect(x, y, width, height)
    }

    fn set_font(&mut self, font: &FontDescriptor) -> Result<(), RowsError> {
        (**self).set_font(font)
    }

    fn fill_text(&mut self, text: &str, x: Pt, y: Pt) -> Result<(), RowsError> {
        (**self).fill_text(text, x, y)
    }
}
