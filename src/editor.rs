use crate::layout::{compute_rows, PageGeometry, Row, TextMeasure};
use crate::render::{render_rows, Surface};
use crate::style::Fragment;
use crate::RowsError;
use log::debug;
use std::fmt;

/// Somewhere drawing surfaces can be mounted, such as a [`Document`](crate::Document)
/// holding pages. Each mounted surface is addressed by a handle until it is
/// unmounted again.
pub trait Container {
    type Handle: Copy + fmt::Debug;

    /// A borrowed view of a mounted surface that can be drawn on and that can
    /// measure text in the fonts it draws with
    type Canvas<'a>: Surface + TextMeasure
    where
        Self: 'a;

    /// Create a new blank surface sized to the page
    fn mount(&mut self, geometry: &PageGeometry) -> Self::Handle;

    /// The surface behind `handle`, or [None] if it has been unmounted
    fn canvas(&mut self, handle: Self::Handle) -> Option<Self::Canvas<'_>>;

    /// Remove the surface from the container, returning whether it was mounted
    fn unmount(&mut self, handle: Self::Handle) -> bool;
}

/// Lays out a list of fragments and keeps them drawn on a surface mounted in a
/// [`Container`].
///
/// The editor owns its fragments and the rows computed from them. Every change
/// re-runs the whole layout and redraws the whole surface; there is no
/// incremental path.
///
/// # Example
///
/// ```
/// use pdf_rows::{Document, Editor, Fragment, PageGeometry};
///
/// let mut doc = Document::default();
/// // an empty fragment list needs no fonts to lay out
/// let editor = Editor::new(Some(&mut doc), Vec::new(), PageGeometry::default())
///     .expect("can create editor");
/// assert_eq!(editor.rows().len(), 1);
///
/// let mut pdf: Vec<u8> = Vec::new();
/// doc.write(&mut pdf).expect("can write PDF");
/// assert!(pdf.starts_with(b"%PDF"));
/// ```
pub struct Editor<C: Container> {
    handle: C::Handle,
    fragments: Vec<Fragment>,
    geometry: PageGeometry,
    rows: Vec<Row>,
}

impl<C: Container> Editor<C> {
    /// Mount a surface for the page in `container`, lay out `fragments` and draw
    /// them. Fails if there is no container, if the geometry leaves no room for
    /// content, or if the fragments can't be measured or drawn. Nothing is left
    /// mounted on failure.
    pub fn new(
        container: Option<&mut C>,
        fragments: Vec<Fragment>,
        geometry: PageGeometry,
    ) -> Result<Editor<C>, RowsError> {
        let container = container.ok_or(RowsError::MissingContainer)?;
        geometry.validate()?;

        let handle = container.mount(&geometry);
        debug!("mounted editor surface {handle:?}");

        let mut editor = Editor {
            handle,
            fragments,
            geometry,
            rows: Vec::new(),
        };
        if let Err(e) = editor.relayout(container) {
            container.unmount(handle);
            return Err(e);
        }
        Ok(editor)
    }

    /// The handle of the surface this editor draws on
    pub fn handle(&self) -> C::Handle {
        self.handle
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// The rows from the most recent layout
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Replace the fragments, then lay out and redraw everything. On failure
    /// the previous rows are kept, but the surface may be partially drawn
    pub fn update(&mut self, container: &mut C, fragments: Vec<Fragment>) -> Result<(), RowsError> {
        self.fragments = fragments;
        self.relayout(container)
    }

    /// Redraw the current rows from scratch
    pub fn render(&self, container: &mut C) -> Result<(), RowsError> {
        let mut canvas = container
            .canvas(self.handle)
            .ok_or(RowsError::SurfaceMissing)?;
        canvas.clear();
        render_rows(&mut canvas, &self.rows, &self.geometry)
    }

    /// Remove the surface from its container
    pub fn destroy(self, container: &mut C) {
        if container.unmount(self.handle) {
            debug!("unmounted editor surface {:?}", self.handle);
        }
    }

    fn relayout(&mut self, container: &mut C) -> Result<(), RowsError> {
        let mut canvas = container
            .canvas(self.handle)
            .ok_or(RowsError::SurfaceMissing)?;
        let rows = compute_rows(&self.fragments, &self.geometry, &canvas)?;

        canvas.clear();
        render_rows(&mut canvas, &rows, &self.geometry)?;
        self.rows = rows;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Margins;
    use crate::test_utils::{Op, RecordingContainer};
    use crate::units::Pt;

    fn geometry() -> PageGeometry {
        PageGeometry::default()
            .with_page_size(Pt(140.0), Pt(300.0))
            .with_padding(Margins::trbl(Pt(10.0), Pt(20.0), Pt(10.0), Pt(20.0)))
            .with_font("Mono", Pt(10.0))
    }

    fn sample() -> Vec<Fragment> {
        vec![
            Fragment::new("ab"),
            Fragment::new("cd").bold(),
            Fragment::line_break(),
            Fragment::new("ef").italic(),
        ]
    }

    #[test]
    fn missing_container_is_an_error() {
        let result = Editor::<RecordingContainer>::new(None, sample(), geometry());
        assert!(matches!(result, Err(RowsError::MissingContainer)));
    }

    #[test]
    fn construction_lays_out_and_draws() {
        let mut container = RecordingContainer::default();
        let editor = Editor::new(Some(&mut container), sample(), geometry()).unwrap();

        assert_eq!(editor.rows().len(), 2);
        let surface = container.surface(editor.handle()).unwrap();
        assert_eq!(surface.width, Pt(140.0));
        let texts: Vec<String> = surface.texts().into_iter().map(|(t, _, _)| t).collect();
        assert_eq!(texts, vec!["ab", "cd", "ef"]);
        assert_eq!(surface.ops.iter().filter(|op| **op == Op::Stroke).count(), 4);
    }

    #[test]
    fn invalid_geometry_mounts_nothing() {
        let mut container = RecordingContainer::default();
        let geometry = geometry().with_padding(Margins::all(Pt(200.0)));
        let result = Editor::new(Some(&mut container), sample(), geometry);
        assert!(matches!(result, Err(RowsError::InvalidGeometry { .. })));
        assert_eq!(container.mounted(), 0);
    }

    #[test]
    fn measurement_failure_unmounts_the_surface() {
        let mut container = RecordingContainer {
            fail_fonts: true,
            ..Default::default()
        };
        let result = Editor::new(Some(&mut container), sample(), geometry());
        assert!(matches!(result, Err(RowsError::NoFont { .. })));
        assert_eq!(container.mounted(), 0);
    }

    #[test]
    fn update_relayouts_and_redraws() {
        let mut container = RecordingContainer::default();
        let mut editor = Editor::new(Some(&mut container), sample(), geometry()).unwrap();

        editor
            .update(&mut container, vec![Fragment::new("xyz")])
            .unwrap();
        assert_eq!(editor.rows().len(), 1);
        assert_eq!(editor.fragments().len(), 1);

        let surface = container.surface(editor.handle()).unwrap();
        assert_eq!(surface.clears, 2);
        assert_eq!(
            surface.texts(),
            vec![("xyz".to_string(), Pt(20.0), Pt(20.0))]
        );
    }

    #[test]
    fn render_redraws_identically() {
        let mut container = RecordingContainer::default();
        let editor = Editor::new(Some(&mut container), sample(), geometry()).unwrap();
        let first = container.surface(editor.handle()).unwrap().ops.clone();

        editor.render(&mut container).unwrap();
        assert_eq!(container.surface(editor.handle()).unwrap().ops, first);
    }

    #[test]
    fn destroy_unmounts_the_surface() {
        let mut container = RecordingContainer::default();
        let editor = Editor::new(Some(&mut container), sample(), geometry()).unwrap();
        let handle = editor.handle();
        assert_eq!(container.mounted(), 1);

        editor.destroy(&mut container);
        assert_eq!(container.mounted(), 0);
        assert!(container.surface(handle).is_none());
    }

    #[test]
    fn drawing_on_an_unmounted_surface_fails() {
        let mut container = RecordingContainer::default();
        let editor = Editor::new(Some(&mut container), sample(), geometry()).unwrap();
        container.unmount(editor.handle());
        assert!(matches!(
            editor.render(&mut container),
            Err(RowsError::SurfaceMissing)
        ));
    }
}
