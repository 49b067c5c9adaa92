use super::{PageGeometry, TextMeasure, TextMetrics};
use crate::style::{Fragment, ResolvedStyle};
use crate::units::Pt;
use crate::RowsError;
use log::{debug, trace};

/// A fragment with its style resolved against the page defaults and its text
/// measured in the resolved font
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFragment {
    pub text: String,
    pub style: ResolvedStyle,
    pub metrics: TextMetrics,
}

impl ResolvedFragment {
    /// Resolve and measure a fragment. Row breaks aren't drawn, so they are
    /// never measured and always report zero extents
    pub fn resolve<M: TextMeasure + ?Sized>(
        fragment: &Fragment,
        geometry: &PageGeometry,
        measure: &M,
    ) -> Result<ResolvedFragment, RowsError> {
        let style = fragment.resolve_style(geometry);
        let metrics = if fragment.is_line_break() {
            TextMetrics::default()
        } else {
            measure.measure(&style.font, &fragment.value)?
        };

        Ok(ResolvedFragment {
            text: fragment.value.clone(),
            style,
            metrics,
        })
    }

    pub fn is_line_break(&self) -> bool {
        self.text == crate::style::LINE_BREAK
    }

    pub fn width(&self) -> Pt {
        self.metrics.width
    }

    /// The height this fragment asks of its row: glyph height scaled by the
    /// line-height multiplier
    pub fn row_height(&self) -> Pt {
        self.metrics.glyph_height() * self.style.line_height
    }
}

/// A horizontal band of fragments. `width` is the sum of the fragment advances
/// and `height` the largest [`ResolvedFragment::row_height`] among them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    pub width: Pt,
    pub height: Pt,
    pub fragments: Vec<ResolvedFragment>,
}

impl Row {
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Whether `fragment` can join this row without the row exceeding
    /// `max_width`. The bound is inclusive
    pub fn fits(&self, fragment: &ResolvedFragment, max_width: Pt) -> bool {
        self.width + fragment.width() <= max_width
    }

    /// Append a fragment, growing the row to accommodate it
    pub fn push(mut self, fragment: ResolvedFragment) -> Row {
        self.width += fragment.width();
        self.height = self.height.max(fragment.row_height());
        self.fragments.push(fragment);
        self
    }
}

/// Packs fragments into rows no wider than the page's content width.
///
/// Fragments are placed in order. A fragment that doesn't fit on the current
/// row starts a new one; a fragment wider than the content width is placed on
/// a row of its own and overflows it. A [line break](Fragment::line_break)
/// closes the current row and contributes nothing to any row.
///
/// The row being filled is always part of the output, so an empty input
/// yields a single empty row and an input ending in a line break yields a
/// trailing empty row.
pub fn compute_rows<M: TextMeasure + ?Sized>(
    fragments: &[Fragment],
    geometry: &PageGeometry,
    measure: &M,
) -> Result<Vec<Row>, RowsError> {
    geometry.validate()?;
    let content_width = geometry.content_width();

    let (mut rows, current) = fragments.iter().try_fold(
        (Vec::new(), Row::default()),
        |(mut rows, current), fragment| {
            let resolved = ResolvedFragment::resolve(fragment, geometry, measure)?;

            if resolved.is_line_break() {
                trace!("row {} closed by line break", rows.len());
                rows.push(current);
                return Ok::<_, RowsError>((rows, Row::default()));
            }

            if current.is_empty() || current.fits(&resolved, content_width) {
                return Ok((rows, current.push(resolved)));
            }

            trace!(
                "row {} full at {} wrapping `{}` ({})",
                rows.len(),
                current.width,
                resolved.text,
                resolved.width()
            );
            rows.push(current);
            Ok((rows, Row::default().push(resolved)))
        },
    )?;
    rows.push(current);

    debug!(
        "laid out {} fragments into {} rows (content width {})",
        fragments.len(),
        rows.len(),
        content_width
    );
    Ok(rows)
}
