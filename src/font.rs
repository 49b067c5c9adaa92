use crate::layout::TextMetrics;
use crate::refs::{ObjectReferences, RefType};
use crate::{RowsError, Pt};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;

/// Weight at and above which a face counts as bold
const BOLD_WEIGHT: u16 = 600;

/// A parsed font object. Fonts can be TTF or OTF fonts, and will be embedded in their
/// entirety in the generated PDF, so large fonts may dramatically increase the size of
/// the generated PDF.
///
/// Fonts are registered in a [`FontBook`](crate::FontBook), which picks the face to
/// use for each [`FontDescriptor`](crate::FontDescriptor) by family, weight and slant.
pub struct Font {
    pub face: OwnedFace,
    family: String,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, RowsError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        let family = name_of(face.as_face_ref(), owned_ttf_parser::name_id::TYPOGRAPHIC_FAMILY)
            .or_else(|| name_of(face.as_face_ref(), owned_ttf_parser::name_id::FAMILY))
            .unwrap_or_default();

        Ok(Font { face, family })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    /// The full name of the font, falling back to the family name
    pub fn name(&self) -> String {
        name_of(self.face(), owned_ttf_parser::name_id::FULL_NAME)
            .unwrap_or_else(|| self.family.clone())
    }

    /// The family name of the font. Empty if the font doesn't declare one
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Obtain the weight of the font. Numerical values generally map as follows:
    ///
    /// * 100: Thin (Hairline)
    /// * 400: Normal
    /// * 700: Bold
    /// * 900: Black (Heavy)
    pub fn weight(&self) -> u16 {
        self.face().weight().to_number()
    }

    pub fn is_bold(&self) -> bool {
        self.face().is_bold() || self.weight() >= BOLD_WEIGHT
    }

    pub fn is_italic(&self) -> bool {
        self.face().is_italic() || self.face().is_oblique()
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph to draw for `ch`: its own glyph, else the replacement character,
    /// else `?`, else `.notdef`
    pub fn glyph_or_replacement(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Measure a run of text at the given size. The width is the sum of glyph
    /// advances; ascent and descent are the ink extents of the glyphs above and
    /// below the baseline. Control characters are skipped.
    pub fn measure(&self, text: &str, size: Pt) -> TextMetrics {
        let face = self.face();
        let scaling: Pt = size / face.units_per_em() as f32;

        let mut advance: u32 = 0;
        let mut top: i16 = 0;
        let mut bottom: i16 = 0;
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let gid = GlyphId(self.glyph_or_replacement(ch));
            advance += face.glyph_hor_advance(gid).unwrap_or_default() as u32;
            if let Some(bbox) = face.glyph_bounding_box(gid) {
                top = top.max(bbox.y_max);
                bottom = bottom.min(bbox.y_min);
            }
        }

        TextMetrics {
            width: scaling * advance as f32,
            ascent: scaling * top as f32,
            descent: scaling * -(bottom as f32),
        }
    }

    /// Every glyph reachable from a unicode codepoint, with the first codepoint
    /// that maps to it
    fn glyph_chars(&self) -> BTreeMap<u16, char> {
        let mut map: BTreeMap<u16, char> = BTreeMap::new();
        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                let Ok(ch) = char::try_from(codepoint) else {
                    return;
                };
                if let Some(gid) = subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0) {
                    map.entry(gid.0).or_insert(ch);
                }
            });
        }

        map
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let font_id = refs.allocate(RefType::Font(font_index));
        let glyphs = self.glyph_chars();
        let cid_font_id = self.write_cid(refs, font_index, &glyphs, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, &glyphs, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let descriptor_id = self.write_descriptor(refs, font_index, glyphs, writer);
        let id = refs.allocate(RefType::CidFont(font_index));
        let face = self.face();
        let scaling = 1000.0 / face.units_per_em() as f32;

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(1000.0);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        // group glyph widths into runs of consecutive ids
        let mut runs: Vec<(u16, Vec<f32>)> = Vec::new();
        for &gid in glyphs.keys() {
            let width = face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32 * scaling;
            match runs.last_mut() {
                Some((start, run)) if *start as usize + run.len() == gid as usize => run.push(width),
                _ => runs.push((gid, vec![width])),
            }
        }

        let mut widths = cid_font.widths();
        for (start, run) in runs {
            widths.consecutive(start, run);
        }
        widths.finish();

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let data_id = refs.allocate(RefType::FontData(font_index));
        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let face = self.face();
        let scaling = 1000.0 / face.units_per_em() as f32;
        let advances: Vec<f32> = glyphs
            .keys()
            .map(|&gid| face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32)
            .collect();
        let max_width = advances.iter().copied().fold(0.0, f32::max);
        let avg_width = if advances.is_empty() {
            0.0
        } else {
            advances.iter().sum::<f32>() / advances.len() as f32
        };

        let id = refs.allocate(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(self.name().as_bytes()));
        descriptor.family(Str(self.family.as_bytes()));
        descriptor.weight(self.weight());

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if self.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        descriptor.flags(flags);

        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        let cap_height = face.capital_height().unwrap_or(face.ascender());
        descriptor.cap_height(cap_height as f32 * scaling);
        descriptor.x_height(face.x_height().unwrap_or(cap_height) as f32 * scaling);
        // not recorded in TrueType tables; 80 is the customary regular-weight stem
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width * scaling);
        descriptor.missing_width(max_width * scaling);
        descriptor.font_file2(data_id);

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.allocate(RefType::ToUnicode(font_index));

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries
        let entries: Vec<(u16, char)> = glyphs.iter().map(|(&gid, &ch)| (gid, ch)).collect();
        for block in entries.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", block.len()));
            for &(gid, ch) in block {
                let mut units = [0u16; 2];
                let hex: String = ch
                    .encode_utf16(&mut units)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04x}> <{hex}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        id
    }
}

fn name_of(face: &Face<'_>, name_id: u16) -> Option<String> {
    face.names()
        .into_iter()
        .find(|name| name.name_id == name_id && name.is_unicode())
        .and_then(|name| name.to_string())
}
