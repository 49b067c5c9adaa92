use crate::units::Pt;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum RowsError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// Fragments or page geometry could not be read from JSON
    Json(#[from] serde_json::Error),

    #[error("container is missing")]
    /// An editor was constructed without a container to mount its surface in
    MissingContainer,

    #[error("page leaves no room for content ({content_width} wide, {content_height} tall)")]
    /// The page padding consumes the entire page width or height
    InvalidGeometry { content_width: Pt, content_height: Pt },

    #[error("no font available for `{descriptor}`")]
    /// Text could not be measured or drawn because no font face is available
    NoFont { descriptor: String },

    #[error("invalid colour `{0}`")]
    /// A colour string could not be parsed
    InvalidColour(String),

    #[error("surface is no longer mounted in its container")]
    /// The surface handle does not refer to a mounted surface
    SurfaceMissing,
}
