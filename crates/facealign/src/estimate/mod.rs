//! Estimation of the 2×3 transform aligning five facial landmarks to the
//! canonical template.
//!
//! Three models are available, selected with [`AlignMethod`]:
//!
//! - [`AlignMethod::Similarity`]: uniform scale + rotation + translation,
//!   solved in closed form (Umeyama) via a 2×2 SVD. The default.
//! - [`AlignMethod::FullAffine`]: unconstrained 6-DOF least squares; may
//!   introduce shear and anisotropic scale.
//! - [`AlignMethod::PartialAffine`]: the 4-DOF scale/rotation/translation
//!   model solved as a direct linear least-squares fit. Numerically close
//!   to the similarity solution but reached through a different route;
//!   the two are deliberately kept as independent paths.

use glam::{DMat2, DVec2};

use crate::error::AlignError;
use crate::template::{CANONICAL_LANDMARKS, LANDMARK_COUNT};

mod affine;
mod similarity;

pub use affine::{full_affine, partial_affine};
pub use similarity::similarity;

/// Ratio between the smallest and largest eigenvalue of the landmark
/// scatter matrix below which the configuration is treated as degenerate.
pub(crate) const RANK_TOL: f64 = 1e-8;

/// The transform model used to align landmarks to the canonical template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignMethod {
    /// Uniform scale, rotation and translation, solved in closed form.
    #[default]
    Similarity,
    /// Unconstrained 6-DOF affine least squares.
    FullAffine,
    /// 4-DOF scale/rotation/translation linear least squares.
    PartialAffine,
}

impl std::str::FromStr for AlignMethod {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "similarity" => Ok(Self::Similarity),
            "full_affine" => Ok(Self::FullAffine),
            "partial_affine" => Ok(Self::PartialAffine),
            _ => Err(AlignError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for AlignMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Self::Similarity => "similarity",
            Self::FullAffine => "full_affine",
            Self::PartialAffine => "partial_affine",
        };
        write!(f, "{}", name)
    }
}

/// Estimates the 2×3 transform mapping the landmarks onto the canonical
/// template.
///
/// The matrix is returned row-major as `[a, b, tx, d, e, ty]` so that
/// `x' = a*x + b*y + tx` and `y' = d*x + e*y + ty`.
///
/// # Arguments
///
/// * `method` - The transform model to fit.
/// * `landmarks` - The five landmark coordinates in source-image pixel
///   space, ordered as {left eye, right eye, nose, left mouth corner,
///   right mouth corner}.
///
/// # Errors
///
/// Fails with [`AlignError::InvalidLandmarkCount`] unless exactly five
/// points are given, and with [`AlignError::DegenerateLandmarks`] when the
/// points are collinear or coincident (similarity and partial affine only).
///
/// # Example
///
/// ```
/// use facealign::estimate::{estimate, AlignMethod};
///
/// // the canonical template shifted by (100, 100)
/// let landmarks = [
///     [130.2946, 151.6963],
///     [165.5318, 151.5014],
///     [148.0252, 171.7366],
///     [133.5493, 192.3655],
///     [162.7299, 192.2041],
/// ];
///
/// let m = estimate(AlignMethod::Similarity, &landmarks).unwrap();
/// assert!((m[2] + 100.0).abs() < 1e-3);
/// assert!((m[0] - 1.0).abs() < 1e-5);
/// ```
pub fn estimate(method: AlignMethod, landmarks: &[[f32; 2]]) -> Result<[f32; 6], AlignError> {
    let src = validate_landmarks(landmarks)?;
    match method {
        AlignMethod::Similarity => similarity(&src),
        AlignMethod::FullAffine => Ok(full_affine(&src)),
        AlignMethod::PartialAffine => partial_affine(&src),
    }
}

/// Checks the landmark count and lifts the coordinates to f64.
pub(crate) fn validate_landmarks(
    landmarks: &[[f32; 2]],
) -> Result<[DVec2; LANDMARK_COUNT], AlignError> {
    if landmarks.len() != LANDMARK_COUNT {
        return Err(AlignError::InvalidLandmarkCount(landmarks.len()));
    }

    let mut points = [DVec2::ZERO; LANDMARK_COUNT];
    for (point, landmark) in points.iter_mut().zip(landmarks.iter()) {
        *point = DVec2::new(landmark[0] as f64, landmark[1] as f64);
    }

    Ok(points)
}

/// The canonical template as f64 vectors.
pub(crate) fn canonical_points() -> [DVec2; LANDMARK_COUNT] {
    let mut points = [DVec2::ZERO; LANDMARK_COUNT];
    for (point, landmark) in points.iter_mut().zip(CANONICAL_LANDMARKS.iter()) {
        *point = DVec2::new(landmark[0], landmark[1]);
    }
    points
}

/// Fails when the scatter matrix of the points is rank deficient, i.e. the
/// landmarks are collinear or coincident and cannot pin down a 2D transform.
pub(crate) fn check_rank(points: &[DVec2; LANDMARK_COUNT]) -> Result<(), AlignError> {
    let n = LANDMARK_COUNT as f64;
    let centroid = points.iter().fold(DVec2::ZERO, |acc, p| acc + *p) / n;

    let (mut s_xx, mut s_xy, mut s_yy) = (0.0f64, 0.0f64, 0.0f64);
    for point in points.iter() {
        let c = *point - centroid;
        s_xx += c.x * c.x;
        s_xy += c.x * c.y;
        s_yy += c.y * c.y;
    }

    // eigenvalues of the symmetric 2x2 scatter matrix
    let trace = s_xx + s_yy;
    let det = s_xx * s_yy - s_xy * s_xy;
    let disc = (0.25 * trace * trace - det).max(0.0).sqrt();
    let lambda_max = 0.5 * trace + disc;
    let lambda_min = 0.5 * trace - disc;

    if lambda_max <= 0.0 || lambda_min <= RANK_TOL * lambda_max {
        return Err(AlignError::DegenerateLandmarks);
    }

    Ok(())
}

/// Packs a linear part and a translation into the row-major 2×3 layout.
pub(crate) fn pack_transform(a: DMat2, t: DVec2) -> [f32; 6] {
    [
        a.x_axis.x as f32,
        a.y_axis.x as f32,
        t.x as f32,
        a.x_axis.y as f32,
        a.y_axis.y as f32,
        t.y as f32,
    ]
}
