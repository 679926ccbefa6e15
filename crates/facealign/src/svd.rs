//! Closed-form 2×2 Singular Value Decomposition (SVD).
//!
//! For any matrix A ∈ ℝ²ˣ² the SVD decomposes it into
//!
//! ```text
//! A = U Σ Vᵀ
//! ```
//!
//! where U and V are orthogonal and Σ is diagonal with σ₁ ≥ σ₂ ≥ 0.
//! In two dimensions the decomposition has an analytic solution: both
//! orthogonal factors are plane rotations (up to a column sign), whose
//! angles follow directly from the four matrix entries. This is the
//! workhorse of the similarity-transform solver, where the 2×2
//! cross-covariance of two centered point sets is decomposed to recover
//! the aligning rotation.
//!
//! We compute in f64 for precision; the caller casts back to f32 at the
//! boundary.

use glam::{DMat2, DVec2};

/// Result set of a 2×2 singular value decomposition.
#[derive(Debug, Clone)]
pub struct Svd2Set {
    /// The matrix of left singular vectors.
    u: DMat2,

    /// The singular values, non-negative and in descending order.
    s: DVec2,

    /// The matrix of right singular vectors.
    v: DMat2,
}

impl Svd2Set {
    /// Get the left singular vectors matrix.
    #[inline]
    pub fn u(&self) -> &DMat2 {
        &self.u
    }

    /// Get the singular values.
    #[inline]
    pub fn s(&self) -> &DVec2 {
        &self.s
    }

    /// Get the right singular vectors matrix.
    #[inline]
    pub fn v(&self) -> &DMat2 {
        &self.v
    }
}

/// Computes the singular value decomposition of a 2×2 matrix.
///
/// Writing A = [[a, b], [c, d]], the rotation angles of U and V come from
/// the polar components of (E, H) and (F, G) where E = (a+d)/2,
/// F = (a-d)/2, G = (c+b)/2, H = (c-b)/2; the singular values are
/// Q ± R with Q = |(E, H)| and R = |(F, G)|. The smaller value Q - R may
/// come out negative, in which case its sign is pushed into the second
/// column of V so that Σ stays non-negative.
pub fn svd2(m: &DMat2) -> Svd2Set {
    // glam matrices are column-major: element (row r, col c) is col(c)[r]
    let a = m.x_axis.x;
    let b = m.y_axis.x;
    let c = m.x_axis.y;
    let d = m.y_axis.y;

    let e = 0.5 * (a + d);
    let f = 0.5 * (a - d);
    let g = 0.5 * (c + b);
    let h = 0.5 * (c - b);

    let q = (e * e + h * h).sqrt();
    let r = (f * f + g * g).sqrt();

    let s1 = q + r;
    let s2 = q - r;

    // angle sums/differences of the two rotations
    let a1 = g.atan2(f); // phi + theta
    let a2 = h.atan2(e); // phi - theta

    let phi = 0.5 * (a1 + a2);
    let theta = 0.5 * (a1 - a2);

    let u = DMat2::from_angle(phi);
    let mut v = DMat2::from_angle(theta);

    if s2 < 0.0 {
        v.y_axis = -v.y_axis;
    }

    Svd2Set {
        u,
        s: DVec2::new(s1, s2.abs()),
        v,
    }
}
