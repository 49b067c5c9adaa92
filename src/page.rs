use crate::font::Font;
use crate::layout::PageGeometry;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use id_arena::Id;
use pdf_writer::{Finish, Name, Pdf, Ref};
use std::collections::BTreeSet;

/// A single page of a document and the content stream drawn on it. Pages are
/// drawn on through a [`PdfCanvas`](crate::PdfCanvas).
#[derive(Debug, Clone)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the padding
    pub content_box: Rect,
    /// Content stream operators drawn so far
    pub(crate) content: Vec<u8>,
    /// Indices of the fonts the content stream refers to
    pub(crate) fonts: BTreeSet<usize>,
}

impl Page {
    /// Create a blank page sized to the geometry, with its content box inset by
    /// the page padding
    pub fn new(geometry: &PageGeometry) -> Page {
        let media_box = Rect::page(geometry.page_width, geometry.page_height);
        Page {
            content_box: media_box.inset(&geometry.page_padding),
            media_box,
            content: Vec::new(),
            fonts: BTreeSet::new(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    /// Whether nothing has been drawn on the page
    pub fn is_blank(&self) -> bool {
        self.content.is_empty()
    }

    /// The raw content stream of the page
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Erase everything drawn on the page
    pub fn clear(&mut self) {
        self.content.clear();
        self.fonts.clear();
    }

    pub(crate) fn use_font(&mut self, font: Id<Font>) {
        self.fonts.insert(font.index());
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        page_tree: Ref,
        writer: &mut Pdf,
    ) {
        let Some(id) = refs.get(RefType::Page(page_index)) else {
            return;
        };
        let content_id = refs.allocate(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        for &index in self.fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(index)) {
                fonts.pair(Name(format!("F{index}").as_bytes()), font_ref);
            }
        }
        fonts.finish();
        resources.finish();
        page.finish();

        writer.stream(content_id, &self.content);
    }
}
