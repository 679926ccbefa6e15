use facealign_image::Image;

/// Kernel for bilinear interpolation with a constant zero border.
///
/// Samples the four integer-coordinate neighbors of `(u, v)`; any tap
/// falling outside the source bounds contributes the border value 0 for
/// every channel. The border is constant by contract, never clamped,
/// wrapped or reflected.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel values.
pub fn bilinear_border<const C: usize>(src: &Image<f32, C>, u: f32, v: f32) -> [f32; C] {
    let (rows, cols) = (src.rows() as i64, src.cols() as i64);

    let u0 = u.floor();
    let v0 = v.floor();
    let frac_u = u - u0;
    let frac_v = v - v0;
    let (iu0, iv0) = (u0 as i64, v0 as i64);

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let w00 = frac_uu * frac_vv;
    let w01 = frac_u * frac_vv;
    let w10 = frac_uu * frac_v;
    let w11 = frac_u * frac_v;

    let data = src.as_slice();
    let mut pixel = [0.0f32; C];

    let mut accumulate = |iu: i64, iv: i64, w: f32| {
        if w == 0.0 || iu < 0 || iv < 0 || iu >= cols || iv >= rows {
            return;
        }
        let base = ((iv * cols + iu) as usize) * C;
        for (k, value) in pixel.iter_mut().enumerate() {
            *value += w * data[base + k];
        }
    };

    accumulate(iu0, iv0, w00);
    accumulate(iu0 + 1, iv0, w01);
    accumulate(iu0, iv0 + 1, w10);
    accumulate(iu0 + 1, iv0 + 1, w11);

    pixel
}
