use facealign::template::{CANONICAL_HEIGHT, CANONICAL_LANDMARKS, CANONICAL_WIDTH};
use facealign::warp::transform_point;
use facealign::{align, estimate, AlignError, AlignMethod};
use facealign_image::{Image, ImageSize};

const METHODS: [AlignMethod; 3] = [
    AlignMethod::Similarity,
    AlignMethod::FullAffine,
    AlignMethod::PartialAffine,
];

/// The template pushed through a known similarity into a 250x250 source frame.
fn synthetic_landmarks() -> Vec<[f32; 2]> {
    let angle = 12.0f64.to_radians();
    let (sin, cos) = angle.sin_cos();
    let s = 1.8;
    CANONICAL_LANDMARKS
        .iter()
        .map(|p| {
            [
                (s * cos * p[0] - s * sin * p[1] + 60.0) as f32,
                (s * sin * p[0] + s * cos * p[1] + 40.0) as f32,
            ]
        })
        .collect()
}

/// A horizontal+vertical gradient so every pixel value encodes its position.
fn gradient_image(width: usize, height: usize) -> Image<f32, 1> {
    let data = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x + y) as f32))
        .collect();
    Image::new(ImageSize { width, height }, data).unwrap()
}

#[test]
fn align_output_is_canonical_size() -> Result<(), AlignError> {
    let src = gradient_image(250, 250);
    let landmarks = synthetic_landmarks();

    for method in METHODS {
        let aligned = align(method, &src, &landmarks)?;
        assert_eq!(aligned.size().width, CANONICAL_WIDTH);
        assert_eq!(aligned.size().height, CANONICAL_HEIGHT);
        assert_eq!(aligned.num_channels(), 1);
    }
    Ok(())
}

#[test]
fn align_rgb_preserves_channels() -> Result<(), AlignError> {
    let src = Image::<f32, 3>::from_size_val(
        ImageSize {
            width: 250,
            height: 250,
        },
        0.5,
    )?;
    let aligned = align(AlignMethod::Similarity, &src, &synthetic_landmarks())?;
    assert_eq!(aligned.num_channels(), 3);
    assert_eq!(aligned.size().width, CANONICAL_WIDTH);
    Ok(())
}

#[test]
fn estimated_transform_lands_landmarks_on_template() -> Result<(), AlignError> {
    let landmarks = synthetic_landmarks();

    for method in METHODS {
        let m = estimate(method, &landmarks)?;
        for (l, t) in landmarks.iter().zip(CANONICAL_LANDMARKS.iter()) {
            let (u, v) = transform_point(l[0], l[1], &m);
            let dist = ((u - t[0] as f32).powi(2) + (v - t[1] as f32).powi(2)).sqrt();
            assert!(dist < 2.0, "{method}: landmark off by {dist} px");
        }
    }
    Ok(())
}

#[test]
fn aligned_content_matches_source() -> Result<(), AlignError> {
    let src = gradient_image(250, 250);
    let landmarks = synthetic_landmarks();

    let m = estimate(AlignMethod::Similarity, &landmarks)?;
    let aligned = align(AlignMethod::Similarity, &src, &landmarks)?;

    // the output nose pixel must hold the source value at the nose landmark
    let m_inv = facealign::warp::invert_affine_transform(&m)?;
    let (nx, ny) = (
        CANONICAL_LANDMARKS[2][0] as f32,
        CANONICAL_LANDMARKS[2][1] as f32,
    );
    let got = aligned.get_pixel(nx.round() as usize, ny.round() as usize, 0)?;

    // bilinear sampling of a linear gradient is exact, so the output pixel
    // equals the gradient at the inverse-mapped source position
    let (sx, sy) = transform_point(nx.round(), ny.round(), &m_inv);
    let expected = sx + sy;
    assert!(
        (got - expected).abs() < 1e-2,
        "got {got}, expected near {expected}"
    );
    Ok(())
}

#[test]
fn align_fills_uncovered_output_with_border() -> Result<(), AlignError> {
    // a tiny bright source cannot cover the whole canonical frame
    let src = Image::<f32, 1>::from_size_val(
        ImageSize {
            width: 40,
            height: 40,
        },
        255.0,
    )?;
    let landmarks = [
        [12.0f32, 15.0],
        [28.0, 15.0],
        [20.0, 24.0],
        [14.0, 32.0],
        [26.0, 32.0],
    ];

    let aligned = align(AlignMethod::Similarity, &src, &landmarks)?;

    // face region covered, the top-left corner maps outside the source
    let nose = aligned.get_pixel(48, 72, 0)?;
    assert!(nose > 0.0);
    assert_eq!(aligned.get_pixel(0, 0, 0)?, 0.0);
    Ok(())
}

#[test]
fn align_rejects_wrong_landmark_count() -> Result<(), AlignError> {
    let src = gradient_image(64, 64);
    let landmarks = [[10.0f32, 10.0], [20.0, 10.0], [15.0, 20.0]];
    assert!(matches!(
        align(AlignMethod::Similarity, &src, &landmarks),
        Err(AlignError::InvalidLandmarkCount(3))
    ));
    Ok(())
}

#[test]
fn align_from_u8_source() -> Result<(), AlignError> {
    // decoded images arrive as u8; cast to the f32 working type first
    let src_u8 = Image::<u8, 1>::from_size_val(
        ImageSize {
            width: 250,
            height: 250,
        },
        128,
    )?;
    let src = src_u8.cast::<f32>()?;

    let aligned = align(AlignMethod::PartialAffine, &src, &synthetic_landmarks())?;
    assert_eq!(aligned.size().width, CANONICAL_WIDTH);
    assert_eq!(aligned.size().height, CANONICAL_HEIGHT);

    // interior of a constant image stays constant up to weight rounding
    assert!((aligned.get_pixel(48, 72, 0)? - 128.0).abs() < 1e-3);
    Ok(())
}
