use super::{render_padding_indicators, Surface};
use crate::layout::{PageGeometry, ResolvedFragment, Row};
use crate::units::Pt;
use crate::RowsError;
use log::{debug, trace};

/// Underline offset below the baseline, as a fraction of the font size
const UNDERLINE_OFFSET: f32 = 0.1;
/// Strikethrough offset above the baseline, as a fraction of the font size
const STRIKETHROUGH_OFFSET: f32 = 0.3;

/// Draws the padding guides, then every row, stacking rows downwards from the
/// top padding. Rows past the bottom of the page are drawn regardless.
pub fn render_rows<S: Surface + ?Sized>(
    surface: &mut S,
    rows: &[Row],
    geometry: &PageGeometry,
) -> Result<(), RowsError> {
    render_padding_indicators(surface, geometry);

    let mut rendered_height = Pt::ZERO;
    for row in rows {
        render_row(surface, rendered_height, row, geometry)?;
        rendered_height += row.height;
    }

    let (_, surface_height) = surface.size();
    let bottom = geometry.page_padding.top + rendered_height;
    if bottom > surface_height {
        debug!(
            "rendered {} rows running {} past the bottom of the surface",
            rows.len(),
            bottom - surface_height
        );
    } else {
        debug!("rendered {} rows, {} tall", rows.len(), rendered_height);
    }
    Ok(())
}

/// Draws a single row whose top edge is `vertical_offset` below the top
/// padding. Every fragment in the row shares the row's bottom edge as its
/// baseline, so shorter fragments sit at the bottom of a tall row.
pub fn render_row<S: Surface + ?Sized>(
    surface: &mut S,
    vertical_offset: Pt,
    row: &Row,
    geometry: &PageGeometry,
) -> Result<(), RowsError> {
    let top = geometry.page_padding.top + vertical_offset;
    let baseline = top + row.height;

    let mut x = geometry.page_padding.left;
    for fragment in row.fragments.iter().filter(|f| !f.is_line_break()) {
        trace!("drawing `{}` at ({}, {})", fragment.text, x, baseline);
        surface.save();
        let drawn = render_fragment(surface, fragment, x, top, row.height);
        surface.restore();
        drawn?;
        x += fragment.width();
    }

    Ok(())
}

fn render_fragment<S: Surface + ?Sized>(
    surface: &mut S,
    fragment: &ResolvedFragment,
    x: Pt,
    top: Pt,
    row_height: Pt,
) -> Result<(), RowsError> {
    let style = &fragment.style;
    let width = fragment.width();
    let baseline = top + row_height;

    if let Some(background) = style.background {
        surface.set_fill_colour(background);
        surface.fill_rect(x, top, width, row_height);
    }

    surface.set_font(&style.font)?;
    surface.set_fill_colour(style.colour);
    surface.fill_text(&fragment.text, x, baseline)?;

    if style.underline || style.strikethrough {
        let size = style.font.size;
        surface.set_stroke_colour(style.colour);
        surface.set_line_width((size / 16.0).max(Pt(1.0)));
        if style.underline {
            let y = baseline + size * UNDERLINE_OFFSET;
            surface.move_to(x, y);
            surface.line_to(x + width, y);
            surface.stroke();
        }
        if style.strikethrough {
            let y = baseline - size * STRIKETHROUGH_OFFSET;
            surface.move_to(x, y);
            surface.line_to(x + width, y);
            surface.stroke();
        }
    }

    Ok(())
}
