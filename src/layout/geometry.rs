use super::Margins;
use crate::colour::{colours, Colour};
use crate::units::Pt;
use crate::RowsError;
use serde::Deserialize;

/// Page configuration: the page size, the padding that bounds the content area,
/// the corner guides drawn where the padding meets, and the default text style
/// applied to any [`Fragment`](crate::Fragment) that doesn't override it.
///
/// Field names follow the host configuration format, so a geometry can be read
/// straight from JSON such as:
///
/// ```json
/// {
///   "pageWidth": 794, "pageHeight": 1122,
///   "pagePadding": [100, 120, 100, 120],
///   "pageMargin": 20,
///   "pagePaddingIndicatorSize": 35,
///   "pagePaddingIndicatorColor": "#BABABA",
///   "color": "#333", "fontSize": 16, "fontFamily": "Yahei", "lineHeight": 1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageGeometry {
    pub page_width: Pt,
    pub page_height: Pt,
    pub page_padding: Margins,
    /// Gap left between consecutive pages when a host stacks them
    pub page_margin: Pt,
    /// Length of each arm of the corner guides
    pub page_padding_indicator_size: Pt,
    #[serde(rename = "pagePaddingIndicatorColor")]
    pub page_padding_indicator_colour: Colour,
    #[serde(rename = "color")]
    pub colour: Colour,
    pub font_size: Pt,
    pub font_family: String,
    /// Line-height multiplier applied to the glyph height of each fragment
    pub line_height: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry {
            page_width: Pt(794.0),
            page_height: Pt(1122.0),
            page_padding: Margins::trbl(Pt(100.0), Pt(120.0), Pt(100.0), Pt(120.0)),
            page_margin: Pt(20.0),
            page_padding_indicator_size: Pt(35.0),
            page_padding_indicator_colour: colours::SILVER,
            colour: colours::CHARCOAL,
            font_size: Pt(16.0),
            font_family: "Yahei".to_string(),
            line_height: 1.0,
        }
    }
}

impl PageGeometry {
    /// Read a geometry from its JSON form. Missing fields take their default values
    pub fn from_json(json: &str) -> Result<PageGeometry, RowsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_page_size(mut self, width: Pt, height: Pt) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    pub fn with_padding(mut self, padding: Margins) -> Self {
        self.page_padding = padding;
        self
    }

    pub fn with_indicator(mut self, size: Pt, colour: Colour) -> Self {
        self.page_padding_indicator_size = size;
        self.page_padding_indicator_colour = colour;
        self
    }

    pub fn with_colour(mut self, colour: Colour) -> Self {
        self.colour = colour;
        self
    }

    pub fn with_font<S: ToString>(mut self, family: S, size: Pt) -> Self {
        self.font_family = family.to_string();
        self.font_size = size;
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Width available to rows: the page width less the left and right padding
    pub fn content_width(&self) -> Pt {
        self.page_width - self.page_padding.horizontal()
    }

    /// Height inside the padding. Rows are not clipped to it
    pub fn content_height(&self) -> Pt {
        self.page_height - self.page_padding.vertical()
    }

    /// Ensure the padding leaves a non-empty content area. Without one, every
    /// fragment would overflow onto a row of its own
    pub fn validate(&self) -> Result<(), RowsError> {
        let content_width = self.content_width();
        let content_height = self.content_height();
        if content_width <= Pt::ZERO || content_height <= Pt::ZERO {
            return Err(RowsError::InvalidGeometry {
                content_width,
                content_height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_area_subtracts_padding() {
        let geometry = PageGeometry::default();
        assert_eq!(geometry.content_width(), Pt(554.0));
        assert_eq!(geometry.content_height(), Pt(922.0));
        assert!(geometry.validate().is_ok());
    }

    #[test]
    fn padding_wider_than_page_is_rejected() {
        let geometry = PageGeometry::default()
            .with_page_size(Pt(200.0), Pt(400.0))
            .with_padding(Margins::symmetric(Pt(10.0), Pt(100.0)));
        match geometry.validate() {
            Err(RowsError::InvalidGeometry { content_width, .. }) => {
                assert_eq!(content_width, Pt(0.0))
            }
            other => panic!("expected invalid geometry, got {other:?}"),
        }
    }

    #[test]
    fn reads_host_configuration() {
        let geometry = PageGeometry::from_json(
            r##"{
                "pageWidth": 600,
                "pageHeight": 800,
                "pagePadding": [10, 20, 30, 40],
                "pageMargin": 20,
                "pagePaddingIndicatorSize": 12,
                "pagePaddingIndicatorColor": "#BABABA",
                "color": "#000",
                "fontSize": 14,
                "fontFamily": "Serif",
                "lineHeight": 1.5
            }"##,
        )
        .unwrap();

        assert_eq!(geometry.page_width, Pt(600.0));
        assert_eq!(
            geometry.page_padding,
            Margins::trbl(Pt(10.0), Pt(20.0), Pt(30.0), Pt(40.0))
        );
        assert_eq!(geometry.page_padding_indicator_colour, colours::SILVER);
        assert_eq!(geometry.font_family, "Serif");
        assert_eq!(geometry.line_height, 1.5);
        assert_eq!(geometry.content_width(), Pt(540.0));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let geometry = PageGeometry::from_json(r#"{ "fontSize": 20 }"#).unwrap();
        assert_eq!(geometry.font_size, Pt(20.0));
        assert_eq!(geometry.page_width, PageGeometry::default().page_width);
    }
}
