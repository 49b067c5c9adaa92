use crate::content::PdfCanvas;
use crate::editor::Container;
use crate::font::Font;
use crate::font_book::FontBook;
use crate::layout::PageGeometry;
use crate::page::Page;
use crate::refs::{ObjectReferences, RefType};
use crate::RowsError;
use id_arena::{Arena, Id};
use log::debug;
use pdf_writer::{Finish, Pdf, Ref};
use std::collections::BTreeSet;
use std::io::Write;

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub fonts: FontBook,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
}

impl Document {
    /// Add a font to the document structure. Note that fonts are stored "globally" within
    /// the document, such that any page can refer to it. Only fonts that some page
    /// actually draws with are embedded when the document is written.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.add(font)
    }

    /// Parse a font from raw bytes and add it to the document
    pub fn load_font(&mut self, bytes: Vec<u8>) -> Result<Id<Font>, RowsError> {
        self.fonts.load(bytes)
    }

    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Take a page out of the document. The page is erased and will not be
    /// written; its id can no longer be drawn on. Returns whether the page was
    /// part of the document.
    pub fn remove_page(&mut self, id: Id<Page>) -> bool {
        let Some(index) = self.index_of_page(id) else {
            return false;
        };
        self.page_order.remove(index);
        if let Some(page) = self.pages.get_mut(id) {
            page.clear();
        }
        true
    }

    /// Get the 0-based index of a page given its ID. Note that changing the page order
    /// after this call _will_ invalidate the returned page index
    pub fn index_of_page(&self, page: Id<Page>) -> Option<usize> {
        self.page_order.iter().position(|p| *p == page)
    }

    /// The page behind `id`, if it is still part of the document
    pub fn page(&self, id: Id<Page>) -> Option<&Page> {
        self.index_of_page(id)?;
        self.pages.get(id)
    }

    /// A canvas to draw on the page behind `id`, measuring and drawing text with
    /// the document's fonts
    pub fn canvas(&mut self, id: Id<Page>) -> Option<PdfCanvas<'_>> {
        self.index_of_page(id)?;
        let Document { fonts, pages, .. } = self;
        pages.get_mut(id).map(|page| PdfCanvas::new(page, fonts))
    }

    /// Write the entire document to the writer. Note: although this can write to
    /// arbitrary streams, the entire document is "rendered" in memory first. If you
    /// have a very large document, this could allocate a significant amount of memory.
    pub fn write<W: Write>(&self, mut w: W) -> Result<(), RowsError> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.allocate(RefType::Catalog);
        let page_tree_id = refs.allocate(RefType::PageTree);

        let mut writer = Pdf::new();

        let page_refs: Vec<Ref> = (0..self.page_order.len())
            .map(|i| refs.allocate(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        let pages: Vec<&Page> = self
            .page_order
            .iter()
            .filter_map(|id| self.pages.get(*id))
            .collect();

        let used_fonts: BTreeSet<usize> = pages
            .iter()
            .flat_map(|page| page.fonts.iter().copied())
            .collect();
        for (id, font) in self.fonts.iter() {
            if used_fonts.contains(&id.index()) {
                font.write(&mut refs, id.index(), &mut writer);
            }
        }

        for (page_index, page) in pages.into_iter().enumerate() {
            page.write(&mut refs, page_index, page_tree_id, &mut writer);
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        debug!(
            "writing {} pages with {} embedded fonts",
            self.page_order.len(),
            used_fonts.len()
        );
        w.write_all(writer.finish().as_slice())?;
        Ok(())
    }
}

impl Container for Document {
    type Handle = Id<Page>;
    type Canvas<'a>
        = PdfCanvas<'a>
    where
        Self: 'a;

    fn mount(&mut self, geometry: &PageGeometry) -> Id<Page> {
        self.add_page(Page::new(geometry))
    }

    fn canvas(&mut self, handle: Id<Page>) -> Option<PdfCanvas<'_>> {
        Document::canvas(self, handle)
    }

    fn unmount(&mut self, handle: Id<Page>) -> bool {
        self.remove_page(handle)
    }
}
