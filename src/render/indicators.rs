use super::Surface;
use crate::layout::PageGeometry;
use crate::units::Pt;

/// The three points of each corner guide, in the order top-left, top-right,
/// bottom-left, bottom-right. The middle point is the corner of the content
/// area; the outer points extend away from it, outwards into the padding.
pub fn padding_indicator_paths(geometry: &PageGeometry) -> [[(Pt, Pt); 3]; 4] {
    let padding = &geometry.page_padding;
    let size = geometry.page_padding_indicator_size;

    let left = padding.left;
    let right = geometry.page_width - padding.right;
    let top = padding.top;
    let bottom = geometry.page_height - padding.bottom;

    [
        [(left, top - size), (left, top), (left - size, top)],
        [(right, top - size), (right, top), (right + size, top)],
        [(left, bottom + size), (left, bottom), (left - size, bottom)],
        [(right, bottom + size), (right, bottom), (right + size, bottom)],
    ]
}

/// Draws an L-shaped guide at each corner of the content area. Drawing the
/// guides leaves the surface's graphics state untouched, so this can be called
/// again at any time, e.g. after clearing the surface.
pub fn render_padding_indicators<S: Surface + ?Sized>(surface: &mut S, geometry: &PageGeometry) {
    surface.save();
    surface.set_stroke_colour(geometry.page_padding_indicator_colour);
    for path in padding_indicator_paths(geometry) {
        let [(x, y), rest @ ..] = path;
        surface.move_to(x, y);
        for (x, y) in rest {
            surface.line_to(x, y);
        }
        surface.stroke();
    }
    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Margins;
    use crate::test_utils::{Op, RecordingSurface};

    fn geometry() -> PageGeometry {
        PageGeometry::default()
            .with_page_size(Pt(200.0), Pt(300.0))
            .with_padding(Margins::trbl(Pt(10.0), Pt(20.0), Pt(30.0), Pt(40.0)))
            .with_indicator(Pt(5.0), crate::colours::RED)
    }

    #[test]
    fn corners_sit_where_padding_meets() {
        let paths = padding_indicator_paths(&geometry());
        assert_eq!(paths[0][1], (Pt(40.0), Pt(10.0)));
        assert_eq!(paths[1][1], (Pt(180.0), Pt(10.0)));
        assert_eq!(paths[2][1], (Pt(40.0), Pt(270.0)));
        assert_eq!(paths[3][1], (Pt(180.0), Pt(270.0)));

        // arms point outwards, away from the content area
        assert_eq!(paths[0][0], (Pt(40.0), Pt(5.0)));
        assert_eq!(paths[0][2], (Pt(35.0), Pt(10.0)));
        assert_eq!(paths[3][0], (Pt(180.0), Pt(275.0)));
        assert_eq!(paths[3][2], (Pt(185.0), Pt(270.0)));
    }

    #[test]
    fn strokes_four_guides_inside_saved_state() {
        let mut surface = RecordingSurface::new(Pt(200.0), Pt(300.0));
        render_padding_indicators(&mut surface, &geometry());

        let ops = &surface.ops;
        assert_eq!(ops.first(), Some(&Op::Save));
        assert_eq!(ops.get(1), Some(&Op::StrokeColour(crate::colours::RED)));
        assert_eq!(ops.last(), Some(&Op::Restore));
        assert_eq!(ops.iter().filter(|op| **op == Op::Stroke).count(), 4);
        assert_eq!(ops.iter().filter(|op| matches!(op, Op::MoveTo(..))).count(), 4);
        assert_eq!(ops.iter().filter(|op| matches!(op, Op::LineTo(..))).count(), 8);
    }

    #[test]
    fn redrawing_is_idempotent() {
        let mut once = RecordingSurface::new(Pt(200.0), Pt(300.0));
        render_padding_indicators(&mut once, &geometry());

        let mut twice = RecordingSurface::new(Pt(200.0), Pt(300.0));
        render_padding_indicators(&mut twice, &geometry());
        twice.clear();
        render_padding_indicators(&mut twice, &geometry());

        assert_eq!(once.ops, twice.ops);
    }
}
