//! Closed-form similarity estimation (Umeyama).

use glam::{DMat2, DVec2};

use super::{canonical_points, check_rank, pack_transform};
use crate::error::AlignError;
use crate::svd::svd2;
use crate::template::LANDMARK_COUNT;

/// Estimates the 4-DOF similarity transform (uniform scale, rotation,
/// translation) mapping the landmarks onto the canonical template.
///
/// Closed-form least squares: the 2×2 cross-covariance of the centered
/// point sets is decomposed with [`svd2`], the aligning rotation is
/// `R = U D Vᵀ` with the reflection correction `D`, the scale is
/// `trace(S·D)` over the landmark variance, and the translation follows
/// from the centroids. The result is deterministic and never contains a
/// reflection.
///
/// # Errors
///
/// Fails with [`AlignError::DegenerateLandmarks`] when the landmarks are
/// collinear or coincident.
pub fn similarity(src: &[DVec2; LANDMARK_COUNT]) -> Result<[f32; 6], AlignError> {
    check_rank(src)?;

    let dst = canonical_points();
    let n = LANDMARK_COUNT as f64;

    let mu_src = src.iter().fold(DVec2::ZERO, |acc, p| acc + *p) / n;
    let mu_dst = dst.iter().fold(DVec2::ZERO, |acc, p| acc + *p) / n;

    // cross-covariance H = sum((d - mu_d) * (s - mu_s)^T) / n and the
    // variance of the centered landmarks
    let mut h = DMat2::ZERO;
    let mut src_var = 0.0f64;
    for (s, d) in src.iter().zip(dst.iter()) {
        let sc = *s - mu_src;
        let dc = *d - mu_dst;
        h += DMat2::from_cols(dc * sc.x, dc * sc.y);
        src_var += sc.length_squared();
    }
    h *= 1.0 / n;
    src_var /= n;

    let svd = svd2(&h);
    let correction = reflection_correction(svd.u(), svd.v());

    let rotation = *svd.u() * DMat2::from_diagonal(correction) * svd.v().transpose();
    let scale = svd.s().dot(correction) / src_var;
    let translation = mu_dst - scale * (rotation * mu_src);

    Ok(pack_transform(scale * rotation, translation))
}

/// Sign correction that keeps the recovered rotation proper.
///
/// When `det(U)·det(V) < 0` the plain product `U·Vᵀ` would be a reflection;
/// flipping the sign of the smaller singular value's column restores
/// `det(R) = +1`. Mirrored alignments are not physically meaningful for
/// faces.
pub(crate) fn reflection_correction(u: &DMat2, v: &DMat2) -> DVec2 {
    if u.determinant() * v.determinant() < 0.0 {
        DVec2::new(1.0, -1.0)
    } else {
        DVec2::ONE
    }
}
