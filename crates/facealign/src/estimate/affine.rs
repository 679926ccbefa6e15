//! Linear least-squares affine estimation (full and partial models).

use glam::{DMat3, DMat4, DVec2, DVec3, DVec4};

use super::{canonical_points, check_rank};
use crate::error::AlignError;
use crate::template::LANDMARK_COUNT;

/// Estimates the unconstrained 6-DOF affine transform mapping the
/// landmarks onto the canonical template.
///
/// The ten scalar equations split into two independent 3-unknown least
/// squares sharing the Gram matrix of the `[x, y, 1]` rows, solved via the
/// normal equations. Shear and anisotropic scale are allowed.
///
/// Rank deficiency is intentionally not detected here: collinear input
/// yields a matrix with unbounded condition number, and callers that care
/// are expected to sanity-check the output magnitude.
pub fn full_affine(src: &[DVec2; LANDMARK_COUNT]) -> [f32; 6] {
    let dst = canonical_points();

    let mut gram = DMat3::ZERO;
    let mut rhs_u = DVec3::ZERO;
    let mut rhs_v = DVec3::ZERO;
    for (s, d) in src.iter().zip(dst.iter()) {
        let row = DVec3::new(s.x, s.y, 1.0);
        gram += DMat3::from_cols(row * row.x, row * row.y, row * row.z);
        rhs_u += d.x * row;
        rhs_v += d.y * row;
    }

    let gram_inv = gram.inverse();
    let row_u = gram_inv * rhs_u;
    let row_v = gram_inv * rhs_v;

    [
        row_u.x as f32,
        row_u.y as f32,
        row_u.z as f32,
        row_v.x as f32,
        row_v.y as f32,
        row_v.z as f32,
    ]
}

/// Estimates the 4-DOF partial affine transform (uniform scale, rotation,
/// translation) as a direct linear least-squares fit.
///
/// The model is `A = [[a, -b], [b, a]]`, `t = [tx, ty]`; each landmark
/// contributes the two rows `[x, -y, 1, 0] -> u` and `[y, x, 0, 1] -> v`
/// to an overdetermined system in `{a, b, tx, ty}`, solved via 4×4 normal
/// equations. This shares the constrained model with the similarity
/// solver but reaches the solution through a separate numerical path.
///
/// # Errors
///
/// Fails with [`AlignError::DegenerateLandmarks`] when the landmarks are
/// collinear or coincident.
pub fn partial_affine(src: &[DVec2; LANDMARK_COUNT]) -> Result<[f32; 6], AlignError> {
    check_rank(src)?;

    let dst = canonical_points();

    let mut normal = DMat4::ZERO;
    let mut rhs = DVec4::ZERO;
    for (s, d) in src.iter().zip(dst.iter()) {
        let row_u = DVec4::new(s.x, -s.y, 1.0, 0.0);
        let row_v = DVec4::new(s.y, s.x, 0.0, 1.0);
        normal += DMat4::from_cols(
            row_u * row_u.x + row_v * row_v.x,
            row_u * row_u.y + row_v * row_v.y,
            row_u * row_u.z + row_v * row_v.z,
            row_u * row_u.w + row_v * row_v.w,
        );
        rhs += d.x * row_u + d.y * row_v;
    }

    if normal.determinant().abs() <= f64::EPSILON {
        return Err(AlignError::DegenerateLandmarks);
    }

    let x = normal.inverse() * rhs;
    let (a, b, tx, ty) = (x.x, x.y, x.z, x.w);

    Ok([
        a as f32,
        -b as f32,
        tx as f32,
        b as f32,
        a as f32,
        ty as f32,
    ])
}
