//! Fragments and their style resolution.
//!
//! A [`Fragment`] carries optional style overrides. Resolving it against a
//! [`PageGeometry`] yields a [`ResolvedStyle`] in which every value is concrete:
//! each field is the fragment's override if present, and the page default
//! otherwise. Following the host data format, zero sizes, zero line-heights and
//! empty family names count as "not overridden".

use crate::colour::Colour;
use crate::layout::PageGeometry;
use crate::units::Pt;
use crate::RowsError;
use serde::Deserialize;
use std::fmt;

/// The value of a fragment that forces a row break
pub const LINE_BREAK: &str = "\n";

/// An atomic run of styled text. A fragment is never split across rows: it
/// either fits on the current row or starts a new one.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Fragment {
    pub value: String,
    #[serde(rename = "color")]
    pub colour: Option<Colour>,
    pub size: Option<Pt>,
    #[serde(rename = "fontfamily")]
    pub font_family: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    #[serde(rename = "linethrough")]
    pub strikethrough: bool,
    pub background: Option<Colour>,
    #[serde(rename = "lineheight")]
    pub line_height: Option<f32>,
}

impl Fragment {
    pub fn new<S: ToString>(value: S) -> Fragment {
        Fragment {
            value: value.to_string(),
            ..Default::default()
        }
    }

    /// A fragment that terminates the current row
    pub fn line_break() -> Fragment {
        Fragment::new(LINE_BREAK)
    }

    /// Read a list of fragments from its JSON form, an array of objects such as
    /// `{"value": "Hi", "color": "#000", "size": 16, "bold": true}`
    pub fn list_from_json(json: &str) -> Result<Vec<Fragment>, RowsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_line_break(&self) -> bool {
        self.value == LINE_BREAK
    }

    pub fn colour(mut self, colour: Colour) -> Self {
        self.colour = Some(colour);
        self
    }

    pub fn size(mut self, size: Pt) -> Self {
        self.size = Some(size);
        self
    }

    pub fn font_family<S: ToString>(mut self, family: S) -> Self {
        self.font_family = Some(family.to_string());
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    pub fn background(mut self, colour: Colour) -> Self {
        self.background = Some(colour);
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    /// Resolve every style value of this fragment against the page defaults
    pub fn resolve_style(&self, geometry: &PageGeometry) -> ResolvedStyle {
        let size = self
            .size
            .filter(|size| *size > Pt::ZERO)
            .unwrap_or(geometry.font_size);
        let family = self
            .font_family
            .as_deref()
            .filter(|family| !family.is_empty())
            .unwrap_or(&geometry.font_family);
        let line_height = self
            .line_height
            .filter(|lh| *lh > 0.0)
            .unwrap_or(geometry.line_height);

        ResolvedStyle {
            font: FontDescriptor {
                italic: self.italic,
                bold: self.bold,
                size,
                family: family.to_string(),
            },
            colour: self.colour.unwrap_or(geometry.colour),
            line_height,
            underline: self.underline,
            strikethrough: self.strikethrough,
            background: self.background,
        }
    }
}

/// A complete font request. The same descriptor is used to measure a fragment
/// and to draw it, so both always agree on the face and size.
///
/// Its [`Display`](fmt::Display) form is the canonical descriptor string, e.g.
/// `italic bold 16px Yahei`.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    pub italic: bool,
    pub bold: bool,
    pub size: Pt,
    pub family: String,
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.italic {
            f.write_str("italic ")?;
        }
        if self.bold {
            f.write_str("bold ")?;
        }
        write!(f, "{}px {}", self.size.0, self.family)
    }
}

/// A fragment style with every override applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub font: FontDescriptor,
    pub colour: Colour,
    pub line_height: f32,
    pub underline: bool,
    pub strikethrough: bool,
    pub background: Option<Colour>,
}
