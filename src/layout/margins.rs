use crate::units::Pt;
use serde::Deserialize;

/// Padding around the content area of a page. There is no control preventing
/// objects from overflowing the margins; rows are laid out against the content
/// width the margins leave, and the margins are applied to [`Page`](crate::Page)s
/// to determine the `ArtBox` attribute of each page in the generated PDF
///
/// Deserializes from a `[top, right, bottom, left]` array, in the same order as
/// CSS padding.
#[derive(Debug, Default, Copy, Clone, PartialEq, Deserialize)]
#[serde(from = "[f32; 4]")]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric(vertical: Pt, horizontal: Pt) -> Margins {
        Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Total horizontal padding (left + right)
    pub fn horizontal(&self) -> Pt {
        self.left + self.right
    }

    /// Total vertical padding (top + bottom)
    pub fn vertical(&self) -> Pt {
        self.top + self.bottom
    }
}

impl From<[f32; 4]> for Margins {
    fn from([top, right, bottom, left]: [f32; 4]) -> Self {
        Margins::trbl(Pt(top), Pt(right), Pt(bottom), Pt(left))
    }
}
