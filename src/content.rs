//! Drawing onto PDF pages.

use crate::colour::{colours, Colour};
use crate::font_book::{FontBook, FontSelection};
use crate::layout::{TextMeasure, TextMetrics};
use crate::page::Page;
use crate::render::Surface;
use crate::style::FontDescriptor;
use crate::units::Pt;
use crate::RowsError;
use log::trace;
use pdf_writer::types::TextRenderingMode;
use pdf_writer::{Content, Name, Str};

/// Horizontal shear applied to fake an italic face
const SYNTHETIC_SLANT: f32 = 0.2;
/// Outline width, as a fraction of the font size, used to fake a bold face
const SYNTHETIC_EMBOLDEN: f32 = 1.0 / 30.0;

#[derive(Debug, Clone)]
struct ActiveFont {
    selection: FontSelection,
    size: Pt,
}

#[derive(Debug, Clone)]
struct GraphicsState {
    fill: Colour,
    font: Option<ActiveFont>,
}

impl Default for GraphicsState {
    fn default() -> Self {
        GraphicsState {
            fill: colours::BLACK,
            font: None,
        }
    }
}

/// A [`Surface`] that draws onto a [`Page`], using the fonts of a [`FontBook`]
/// both to measure and to draw text.
///
/// Coordinates are given from the top-left corner of the page, with `y`
/// growing downwards, and are flipped onto PDF's bottom-left origin. Operators
/// are buffered and appended to the page's content stream when the canvas is
/// dropped; any state still saved at that point is restored first.
pub struct PdfCanvas<'a> {
    page: &'a mut Page,
    fonts: &'a FontBook,
    content: Content,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
}

impl<'a> PdfCanvas<'a> {
    pub fn new(page: &'a mut Page, fonts: &'a FontBook) -> PdfCanvas<'a> {
        PdfCanvas {
            page,
            fonts,
            content: Content::new(),
            state: GraphicsState::default(),
            saved: Vec::new(),
        }
    }

    fn flip(&self, y: Pt) -> f32 {
        (self.page.height() - y).0
    }

    fn flush(&mut self) {
        for _ in self.saved.drain(..) {
            self.content.restore_state();
        }
        let content = std::mem::replace(&mut self.content, Content::new());
        self.page.content.extend_from_slice(&content.finish());
    }
}

impl Drop for PdfCanvas<'_> {
    fn drop(&mut self) {
        self.flush();
    }
}

fn set_fill(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_fill_rgb(r, g, b),
        Colour::CMYK { c, m, y, k } => content.set_fill_cmyk(c, m, y, k),
        Colour::Grey { g } => content.set_fill_gray(g),
    };
}

fn set_stroke(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_stroke_rgb(r, g, b),
        Colour::CMYK { c, m, y, k } => content.set_stroke_cmyk(c, m, y, k),
        Colour::Grey { g } => content.set_stroke_gray(g),
    };
}

impl Surface for PdfCanvas<'_> {
    fn size(&self) -> (Pt, Pt) {
        (self.page.width(), self.page.height())
    }

    fn clear(&mut self) {
        self.content = Content::new();
        self.state = GraphicsState::default();
        self.saved.clear();
        self.page.clear();
    }

    fn save(&mut self) {
        self.content.save_state();
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.content.restore_state();
            self.state = state;
        }
    }

    fn set_stroke_colour(&mut self, colour: Colour) {
        set_stroke(&mut self.content, colour);
    }

    fn set_fill_colour(&mut self, colour: Colour) {
        set_fill(&mut self.content, colour);
        self.state.fill = colour;
    }

    fn set_line_width(&mut self, width: Pt) {
        self.content.set_line_width(width.0);
    }

    fn move_to(&mut self, x: Pt, y: Pt) {
        let y = self.flip(y);
        self.content.move_to(x.0, y);
    }

    fn line_to(&mut self, x: Pt, y: Pt) {
        let y = self.flip(y);
        self.content.line_to(x.0, y);
    }

    fn stroke(&mut self) {
        self.content.stroke();
    }

    fn fill_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt) {
        let bottom = self.flip(y + height);
        self.content.rect(x.0, bottom, width.0, height.0);
        self.content.fill_nonzero();
    }

    fn set_font(&mut self, font: &FontDescriptor) -> Result<(), RowsError> {
        let selection = self.fonts.select(font)?;
        self.page.use_font(selection.id);
        self.state.font = Some(ActiveFont {
            selection,
            size: font.size,
        });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: Pt, y: Pt) -> Result<(), RowsError> {
        let ActiveFont { selection, size } =
            self.state.font.clone().ok_or_else(|| RowsError::NoFont {
                descriptor: "no font selected".to_string(),
            })?;
        let font = &self.fonts[selection.id];
        let glyphs: Vec<u8> = text
            .chars()
            .filter(|ch| !ch.is_control())
            .flat_map(|ch| font.glyph_or_replacement(ch).to_be_bytes())
            .collect();
        trace!("text `{text}` as {} glyphs in F{}", glyphs.len() / 2, selection.id.index());

        let y = self.flip(y);
        let slant = if selection.synthetic_italic {
            SYNTHETIC_SLANT
        } else {
            0.0
        };

        self.content.save_state();
        if selection.synthetic_bold {
            set_stroke(&mut self.content, self.state.fill);
            self.content.set_line_width(size.0 * SYNTHETIC_EMBOLDEN);
        }
        self.content.begin_text();
        self.content
            .set_font(Name(format!("F{}", selection.id.index()).as_bytes()), size.0);
        if selection.synthetic_bold {
            self.content
                .set_text_rendering_mode(TextRenderingMode::FillStroke);
        }
        self.content.set_text_matrix([1.0, 0.0, slant, 1.0, x.0, y]);
        self.content.show(Str(&glyphs));
        self.content.end_text();
        self.content.restore_state();

        Ok(())
    }
}

impl TextMeasure for PdfCanvas<'_> {
    fn measure(&self, font: &FontDescriptor, text: &str) -> Result<TextMetrics, RowsError> {
        self.fonts.measure(font, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Margins, PageGeometry};

    fn page() -> Page {
        Page::new(
            &PageGeometry::default()
                .with_page_size(Pt(100.0), Pt(200.0))
                .with_padding(Margins::all(Pt(10.0))),
        )
    }

    fn content_of(page: &Page) -> String {
        String::from_utf8_lossy(page.content()).into_owned()
    }

    #[test]
    fn paths_are_flipped_onto_pdf_coordinates() {
        let mut page = page();
        let fonts = FontBook::default();
        {
            let mut canvas = PdfCanvas::new(&mut page, &fonts);
            canvas.move_to(Pt(10.0), Pt(0.0));
            canvas.line_to(Pt(10.0), Pt(50.0));
            canvas.stroke();
            canvas.fill_rect(Pt(0.0), Pt(0.0), Pt(20.0), Pt(30.0));
        }

        let content = content_of(&page);
        assert!(content.contains("10 200 m"));
        assert!(content.contains("10 150 l"));
        assert!(content.contains("0 170 20 30 re"));
    }

    #[test]
    fn canvas_is_the_size_of_its_page() {
        let mut page = page();
        let fonts = FontBook::default();
        let canvas = PdfCanvas::new(&mut page, &fonts);
        assert_eq!(canvas.size(), (Pt(100.0), Pt(200.0)));
    }

    #[test]
    fn unbalanced_saves_are_restored_on_drop() {
        let mut page = page();
        let fonts = FontBook::default();
        {
            let mut canvas = PdfCanvas::new(&mut page, &fonts);
            canvas.save();
            canvas.save();
            canvas.restore();
        }

        let content = content_of(&page);
        assert_eq!(content.matches('q').count(), 2);
        assert_eq!(content.matches('Q').count(), 2);
    }

    #[test]
    fn clear_erases_earlier_drawing() {
        let mut page = page();
        let fonts = FontBook::default();
        {
            let mut canvas = PdfCanvas::new(&mut page, &fonts);
            canvas.move_to(Pt(1.0), Pt(1.0));
            canvas.stroke();
        }
        assert!(!page.is_blank());

        {
            let mut canvas = PdfCanvas::new(&mut page, &fonts);
            canvas.clear();
        }
        assert!(page.is_blank());
    }

    fn dejavu(faces: &[&[u8]]) -> FontBook {
        let mut fonts = FontBook::default();
        for face in faces {
            fonts.load(face.to_vec()).unwrap();
        }
        fonts
    }

    fn draw_text(fonts: &FontBook, bold: bool, italic: bool) -> String {
        let mut page = page();
        {
            let mut canvas = PdfCanvas::new(&mut page, fonts);
            let descriptor = FontDescriptor {
                italic,
                bold,
                size: Pt(12.0),
                family: "DejaVu Sans".into(),
            };
            canvas.set_font(&descriptor).unwrap();
            canvas.fill_text("Hi", Pt(10.0), Pt(20.0)).unwrap();
        }
        assert_eq!(page.fonts.len(), 1);
        content_of(&page)
    }

    const REGULAR: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
    const BOLD: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

    #[test]
    fn missing_styles_are_synthesized() {
        let fonts = dejavu(&[REGULAR]);
        let content = draw_text(&fonts, true, true);
        let lines: Vec<&str> = content.lines().collect();

        // fill and stroke the glyph outlines to embolden them
        assert!(lines.contains(&"2 Tr"));
        // shear the text matrix to slant it; y is flipped from the top
        assert!(lines.contains(&"1 0 0.2 1 10 180 Tm"));
        assert!(lines.contains(&"/F0 12 Tf"));
    }

    #[test]
    fn real_faces_are_drawn_unmodified() {
        let fonts = dejavu(&[REGULAR, BOLD]);

        let content = draw_text(&fonts, true, false);
        let lines: Vec<&str> = content.lines().collect();
        assert!(!lines.iter().any(|line| line.ends_with("Tr")));
        assert!(lines.contains(&"1 0 0 1 10 180 Tm"));
        assert!(lines.contains(&"/F1 12 Tf"));

        let content = draw_text(&fonts, false, false);
        assert!(content.lines().any(|line| line == "/F0 12 Tf"));
    }

    #[test]
    fn text_is_written_as_glyph_ids() {
        let fonts = dejavu(&[REGULAR]);
        let font = &fonts[fonts.iter().next().unwrap().0];
        let content = draw_text(&fonts, false, false);

        let glyphs: Vec<u8> = "Hi"
            .chars()
            .flat_map(|ch| font.glyph_or_replacement(ch).to_be_bytes())
            .collect();
        assert!(glyphs.iter().any(|b| *b != 0));
        let mut shown = Content::new();
        shown.show(Str(&glyphs));
        let shown = String::from_utf8_lossy(&shown.finish()).into_owned();
        assert!(content.lines().any(|line| line == shown));
    }

    #[test]
    fn text_needs_a_font() {
        let mut page = page();
        let fonts = FontBook::default();
        let mut canvas = PdfCanvas::new(&mut page, &fonts);
        let descriptor = FontDescriptor {
            italic: false,
            bold: false,
            size: Pt(12.0),
            family: "Serif".into(),
        };

        assert!(matches!(
            canvas.set_font(&descriptor),
            Err(RowsError::NoFont { .. })
        ));
        assert!(matches!(
            canvas.fill_text("hi", Pt(0.0), Pt(0.0)),
            Err(RowsError::NoFont { .. })
        ));
        assert!(canvas.measure(&descriptor, "hi").is_err());
    }
}
