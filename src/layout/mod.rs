//! Row layout: packing styled fragments into rows that fit a page.
//!
//! [`compute_rows`] walks the fragments in order, resolving each one's style
//! against the [`PageGeometry`] defaults and measuring it with a
//! [`TextMeasure`]. Fragments are never split; one that doesn't fit starts a
//! new row, and a line-break fragment ends the current row outright.
//!
//! # Example
//!
//! ```
//! use pdf_rows::{Fragment, PageGeometry, Pt};
//! use pdf_rows::layout::{compute_rows, FixedWidthMeasure};
//!
//! let geometry = PageGeometry::default();
//! let fragments = vec![
//!     Fragment::new("Hello, "),
//!     Fragment::new("world!").bold(),
//!     Fragment::line_break(),
//!     Fragment::new("Second row").size(Pt(24.0)),
//! ];
//!
//! let rows = compute_rows(&fragments, &geometry, &FixedWidthMeasure::default())
//!     .expect("geometry is valid");
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[1].height, Pt(24.0));
//! ```

mod geometry;
mod margins;
mod measure;
mod rows;

pub use geometry::*;
pub use margins::*;
pub use measure::*;
pub use rows::*;
