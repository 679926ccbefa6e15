use rayon::prelude::*;

use facealign_image::Image;

use crate::error::AlignError;
use crate::interpolation::bilinear_border;
use crate::template::canonical_size;

/// Determinant magnitude below which a transform is treated as singular.
const DET_TOL: f32 = 1e-6;

/// Inverts a 2x3 affine transformation matrix.
///
/// # Arguments
///
/// * `m` - The 2x3 affine transformation matrix, row-major.
///
/// # Errors
///
/// Fails with [`AlignError::SingularTransform`] when the linear part is
/// singular or near-singular; inverse mapping through such a matrix would
/// divide by near-zero.
pub fn invert_affine_transform(m: &[f32; 6]) -> Result<[f32; 6], AlignError> {
    let (a, b, c, d, e, f) = (m[0], m[1], m[2], m[3], m[4], m[5]);

    let determinant = a * e - b * d;
    if !determinant.is_finite() || determinant.abs() <= DET_TOL {
        return Err(AlignError::SingularTransform);
    }
    let inv_determinant = 1.0 / determinant;

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    Ok([new_a, new_b, new_c, new_d, new_e, new_f])
}

/// Applies an affine transformation to a point.
pub fn transform_point(x: f32, y: f32, m: &[f32; 6]) -> (f32, f32) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Applies an affine transformation to an image by inverse mapping.
///
/// For every destination pixel the inverted matrix locates the
/// corresponding source coordinate, which is sampled bilinearly; source
/// coordinates outside the input bounds produce the constant border
/// value 0. Rows of the destination are processed in parallel.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, C).
/// * `dst` - The output image with shape (height, width, C).
/// * `m` - The 2x3 affine transformation matrix from source to destination
///   coordinates, row-major.
///
/// # Errors
///
/// Fails with [`AlignError::UnsupportedChannelCount`] unless `C` is 1 or 3,
/// and with [`AlignError::SingularTransform`] when `m` cannot be inverted.
pub fn warp_affine<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    m: &[f32; 6],
) -> Result<(), AlignError> {
    if C != 1 && C != 3 {
        return Err(AlignError::UnsupportedChannelCount(C));
    }

    // invert the transform to find corresponding positions in src from dst
    let m_inv = invert_affine_transform(m)?;

    let (src_cols, src_rows) = (src.cols() as f32, src.rows() as f32);
    let dst_cols = dst.cols();

    dst.as_slice_mut()
        .par_chunks_exact_mut(C * dst_cols)
        .enumerate()
        .for_each(|(y, dst_row)| {
            for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
                let (u, v) = transform_point(x as f32, y as f32, &m_inv);
                // positions outside the source bounds keep the border value
                if u >= 0.0 && u < src_cols && v >= 0.0 && v < src_rows {
                    dst_pixel.copy_from_slice(&bilinear_border(src, u, v));
                } else {
                    dst_pixel.fill(0.0);
                }
            }
        });

    Ok(())
}

/// Warps an image into the fixed 96x112 canonical frame.
///
/// # Arguments
///
/// * `src` - The input image, greyscale or RGB, of any size.
/// * `m` - The 2x3 transform from source to canonical coordinates, as
///   returned by [`crate::estimate::estimate`].
///
/// # Returns
///
/// The warped image, always 96x112 with the same channel count as the
/// input.
///
/// # Example
///
/// ```
/// use facealign::warp::warp_to_canonical;
/// use facealign_image::{Image, ImageSize};
///
/// let src = Image::<f32, 3>::from_size_val(
///     ImageSize {
///         width: 64,
///         height: 48,
///     },
///     1.0,
/// ).unwrap();
///
/// let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// let dst = warp_to_canonical(&src, &m).unwrap();
///
/// assert_eq!(dst.size().width, 96);
/// assert_eq!(dst.size().height, 112);
/// ```
pub fn warp_to_canonical<const C: usize>(
    src: &Image<f32, C>,
    m: &[f32; 6],
) -> Result<Image<f32, C>, AlignError> {
    let mut dst = Image::from_size_val(canonical_size(), 0.0)?;
    warp_affine(src, &mut dst, m)?;
    Ok(dst)
}
