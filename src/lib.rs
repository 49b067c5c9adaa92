//! Lay out runs of styled text into rows on a fixed-size page, and draw them
//! into a PDF.
//!
//! A page is described by a [`PageGeometry`]: its size, its padding and the
//! default text style. Text arrives as a list of [`Fragment`]s, each carrying
//! its own optional overrides. [`layout::compute_rows`] packs the fragments
//! into rows that fit between the left and right padding, and
//! [`render::render_rows`] draws those rows, together with guides marking the
//! padding corners, onto any [`render::Surface`].
//!
//! An [`Editor`] ties the two together: it mounts a page in a [`Container`]
//! (usually a [`Document`]), keeps the fragments laid out and drawn on it, and
//! removes the page again when destroyed.

mod colour;
pub use colour::*;

mod content;
pub use content::*;

mod document;
pub use document::*;

mod editor;
pub use editor::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod font_book;
pub use font_book::*;

/// Packing fragments into rows
pub mod layout;
pub use layout::PageGeometry;

mod page;
pub use page::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

/// Drawing rows onto surfaces
pub mod render;

mod style;
pub use style::*;

mod units;
pub use units::*;

#[cfg(test)]
mod test_utils;

/// Re-export PDF-writer functionality, mostly for inspecting generated content
pub use pdf_writer;
