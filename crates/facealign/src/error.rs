use facealign_image::ImageError;

/// An error type for the alignment module.
#[derive(thiserror::Error, Debug)]
pub enum AlignError {
    /// Error when the landmark set does not hold exactly five points.
    #[error("Expected exactly 5 landmarks, got {0}")]
    InvalidLandmarkCount(usize),

    /// Error when the alignment method name is not recognized.
    #[error("Unsupported alignment method: {0}")]
    UnsupportedMethod(String),

    /// Error when the image channel count is not 1 or 3.
    #[error("Unsupported channel count: {0}")]
    UnsupportedChannelCount(usize),

    /// Error when the landmark configuration is collinear or coincident.
    #[error("Degenerate landmark configuration")]
    DegenerateLandmarks,

    /// Error when the transform matrix cannot be inverted.
    #[error("Transform matrix is singular")]
    SingularTransform,

    /// Error from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),
}
