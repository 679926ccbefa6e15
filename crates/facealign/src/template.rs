use facealign_image::ImageSize;

/// Width of the canonical output frame in pixels.
pub const CANONICAL_WIDTH: usize = 96;

/// Height of the canonical output frame in pixels.
pub const CANONICAL_HEIGHT: usize = 112;

/// Number of facial landmarks in a landmark set.
pub const LANDMARK_COUNT: usize = 5;

/// The canonical landmark positions in the coordinate space of the
/// 96x112 output frame, ordered as {left eye, right eye, nose,
/// left mouth corner, right mouth corner}.
pub const CANONICAL_LANDMARKS: [[f64; 2]; LANDMARK_COUNT] = [
    [30.2946, 51.6963],
    [65.5318, 51.5014],
    [48.0252, 71.7366],
    [33.5493, 92.3655],
    [62.7299, 92.2041],
];

/// The size of the canonical output frame.
pub fn canonical_size() -> ImageSize {
    ImageSize {
        width: CANONICAL_WIDTH,
        height: CANONICAL_HEIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_within_frame() {
        for p in CANONICAL_LANDMARKS.iter() {
            assert!(p[0] > 0.0 && p[0] < CANONICAL_WIDTH as f64);
            assert!(p[1] > 0.0 && p[1] < CANONICAL_HEIGHT as f64);
        }
    }

    #[test]
    fn template_ordering() {
        // eyes above nose, nose above mouth, left of right
        assert!(CANONICAL_LANDMARKS[0][1] < CANONICAL_LANDMARKS[2][1]);
        assert!(CANONICAL_LANDMARKS[1][1] < CANONICAL_LANDMARKS[2][1]);
        assert!(CANONICAL_LANDMARKS[2][1] < CANONICAL_LANDMARKS[3][1]);
        assert!(CANONICAL_LANDMARKS[0][0] < CANONICAL_LANDMARKS[1][0]);
        assert!(CANONICAL_LANDMARKS[3][0] < CANONICAL_LANDMARKS[4][0]);
    }
}
