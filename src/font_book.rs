use crate::font::Font;
use crate::layout::{TextMeasure, TextMetrics};
use crate::style::FontDescriptor;
use crate::RowsError;
use id_arena::{Arena, Id};
use log::debug;
use std::ops::Index;

const REGULAR_TARGET_WEIGHT: u16 = 400;
const BOLD_TARGET_WEIGHT: u16 = 700;

/// The face chosen for a [`FontDescriptor`], and which styles the chosen face
/// lacks and must be synthesized when drawing
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FontSelection {
    pub id: Id<Font>,
    pub synthetic_bold: bool,
    pub synthetic_italic: bool,
}

/// The fonts available to a document. Fonts are stored "globally" so that any
/// page can refer to them by id; ids remain valid for the life of the book.
#[derive(Default)]
pub struct FontBook {
    fonts: Arena<Font>,
}

impl FontBook {
    pub fn add(&mut self, font: Font) -> Id<Font> {
        debug!(
            "registering font `{}` (family `{}`, weight {}, italic: {})",
            font.name(),
            font.family(),
            font.weight(),
            font.is_italic()
        );
        self.fonts.alloc(font)
    }

    /// Parse a font from raw bytes and add it
    pub fn load(&mut self, bytes: Vec<u8>) -> Result<Id<Font>, RowsError> {
        Ok(self.add(Font::load(bytes)?))
    }

    pub fn get(&self, id: Id<Font>) -> Option<&Font> {
        self.fonts.get(id)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id<Font>, &Font)> {
        self.fonts.iter()
    }

    /// Pick the face that best matches `descriptor`. Faces of the requested
    /// family are preferred: those matching the requested boldness and slant
    /// first, then the one closest to the regular (400) or bold (700) weight.
    /// When no face of that family exists, the first registered font stands in.
    /// Only an empty book has nothing to offer.
    pub fn select(&self, descriptor: &FontDescriptor) -> Result<FontSelection, RowsError> {
        let target_weight = if descriptor.bold {
            BOLD_TARGET_WEIGHT
        } else {
            REGULAR_TARGET_WEIGHT
        };
        let rank = |font: &Font| {
            let mismatches = (font.is_bold() != descriptor.bold) as u8
                + (font.is_italic() != descriptor.italic) as u8;
            (mismatches, font.weight().abs_diff(target_weight))
        };

        let in_family = self
            .fonts
            .iter()
            .filter(|(_, font)| font.family().eq_ignore_ascii_case(&descriptor.family))
            .min_by_key(|(_, font)| rank(font));

        let (id, font) = match in_family {
            Some(found) => found,
            None => {
                let fallback = self.fonts.iter().next().ok_or_else(|| RowsError::NoFont {
                    descriptor: descriptor.to_string(),
                })?;
                debug!(
                    "no `{}` font registered, using `{}` for `{descriptor}`",
                    descriptor.family,
                    fallback.1.family()
                );
                fallback
            }
        };

        Ok(FontSelection {
            id,
            synthetic_bold: descriptor.bold && !font.is_bold(),
            synthetic_italic: descriptor.italic && !font.is_italic(),
        })
    }
}

impl Index<Id<Font>> for FontBook {
    type Output = Font;

    fn index(&self, id: Id<Font>) -> &Font {
        &self.fonts[id]
    }
}

impl TextMeasure for FontBook {
    fn measure(&self, font: &FontDescriptor, text: &str) -> Result<TextMetrics, RowsError> {
        let selection = self.select(font)?;
        Ok(self[selection.id].measure(text, font.size))
    }
}
