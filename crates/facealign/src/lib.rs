#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the alignment module.
pub mod error;

/// transform estimation from landmark correspondences.
pub mod estimate;

/// utilities for bilinear interpolation with a constant border.
pub mod interpolation;

/// 2x2 singular value decomposition.
pub mod svd;

/// the canonical five-point face template.
pub mod template;

/// image warping into the canonical frame.
pub mod warp;

pub use crate::error::AlignError;
pub use crate::estimate::{estimate, AlignMethod};
pub use crate::warp::warp_to_canonical;

use facealign_image::Image;

/// Aligns a face image into the canonical frame.
///
/// Estimates the transform that maps the five detected landmarks onto the
/// canonical template and resamples the image through it. The landmarks
/// must be given in source-image pixel coordinates, ordered as
/// {left eye, right eye, nose, left mouth corner, right mouth corner}.
///
/// # Arguments
///
/// * `method` - The estimation model to use.
/// * `src` - The source image, greyscale or RGB.
/// * `landmarks` - The five landmark coordinates, as (x, y) pairs.
///
/// # Returns
///
/// The aligned image, always 96x112 with the same channel count as the input.
///
/// # Example
///
/// ```
/// use facealign::{align, AlignMethod};
/// use facealign_image::{Image, ImageSize};
///
/// let src = Image::<f32, 1>::from_size_val(
///     ImageSize {
///         width: 128,
///         height: 128,
///     },
///     0.0,
/// ).unwrap();
///
/// let landmarks = [
///     [38.0, 52.0],
///     [86.0, 52.0],
///     [62.0, 78.0],
///     [42.0, 104.0],
///     [82.0, 104.0],
/// ];
///
/// let aligned = align(AlignMethod::Similarity, &src, &landmarks).unwrap();
/// assert_eq!(aligned.size().width, 96);
/// assert_eq!(aligned.size().height, 112);
/// ```
pub fn align<const C: usize>(
    method: AlignMethod,
    src: &Image<f32, C>,
    landmarks: &[[f32; 2]],
) -> Result<Image<f32, C>, AlignError> {
    let m = estimate(method, landmarks)?;
    warp_to_canonical(src, &m)
}
