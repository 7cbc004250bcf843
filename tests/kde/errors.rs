use gridkde::{Error, Extents, KdeConfig, estimate_density};

#[test]
fn test_mismatched_lengths() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0];
    let y = [0.0, 1.0, 2.0];
    let result = estimate_density(&x, &y, None, &KdeConfig::default());
    assert!(matches!(
        result,
        Err(Error::ShapeMismatch {
            what: "y",
            expected: 5,
            got: 3
        })
    ));
}

#[test]
fn test_mismatched_weights() {
    let x = [0.0, 1.0, 2.0];
    let y = [0.0, 2.0, 1.0];
    let w = [1.0, 1.0];
    let result = estimate_density(&x, &y, Some(&w), &KdeConfig::default());
    assert!(matches!(
        result,
        Err(Error::ShapeMismatch {
            what: "weights",
            expected: 3,
            got: 2
        })
    ));
}

#[test]
fn test_zero_extent_domain() {
    assert!(matches!(
        Extents::new(0.0, 0.0, 0.0, 10.0),
        Err(Error::DegenerateExtent { axis: 'x', .. })
    ));

    // A hand-assembled config bypasses the constructor but not the estimator.
    let config = KdeConfig {
        domain_extents: Some(Extents {
            xmin: 0.0,
            xmax: 0.0,
            ymin: 0.0,
            ymax: 10.0,
        }),
        ..KdeConfig::default()
    };
    let x = [0.0, 1.0, 2.0];
    let y = [0.0, 2.0, 1.0];
    let result = estimate_density(&x, &y, None, &config);
    assert!(matches!(result, Err(Error::DegenerateExtent { .. })));
}

#[test]
fn test_single_point_is_singular() {
    let result = estimate_density(&[0.5], &[0.5], None, &KdeConfig::default());
    assert!(matches!(result, Err(Error::SingularCovariance { .. })));
}

#[test]
fn test_identical_points_are_singular() {
    let x = [1.0; 20];
    let y = [2.0; 20];

    // Bounding box of the data.
    let result = estimate_density(&x, &y, None, &KdeConfig::default());
    assert!(matches!(result, Err(Error::SingularCovariance { .. })));

    // Explicit domain: every point lands in the same bin.
    let config = KdeConfig::builder()
        .grid_size(50, 50)
        .domain_extents(Extents::new(0.0, 3.0, 0.0, 3.0).unwrap())
        .build()
        .unwrap();
    let result = estimate_density(&x, &y, None, &config);
    assert!(matches!(result, Err(Error::SingularCovariance { .. })));
}

#[test]
fn test_flat_axis_in_data_extents_is_degenerate() {
    let x = [0.0, 1.0, 2.0, 3.0];
    let y = [5.0, 5.0, 5.0, 5.0];
    let result = estimate_density(&x, &y, None, &KdeConfig::default());
    assert!(matches!(
        result,
        Err(Error::DegenerateExtent { axis: 'y', .. })
    ));
}

#[test]
fn test_collinear_points_are_singular() {
    let x: Vec<f64> = (0..50).map(f64::from).collect();
    let y = x.clone();
    let config = KdeConfig::builder().grid_size(64, 64).build().unwrap();
    let result = estimate_density(&x, &y, None, &config);
    assert!(matches!(result, Err(Error::SingularCovariance { .. })));
}

#[test]
fn test_kernel_smaller_than_a_bin() {
    let x = [0.0, 1.0, 2.0, 0.5, 1.5];
    let y = [0.0, 2.0, 1.0, 1.5, 0.3];
    let config = KdeConfig::builder()
        .grid_size(21, 21)
        .domain_extents(Extents::new(0.0, 2.0, 0.0, 2.0).unwrap())
        // dx = 0.1, so 0.04 rounds to zero bins.
        .kernel_extent(0.04, 0.5)
        .build()
        .unwrap();
    let result = estimate_density(&x, &y, None, &config);
    assert!(matches!(
        result,
        Err(Error::DegenerateKernel { nx: 0, ny: 5 })
    ));
}

#[test]
fn test_invalid_inputs_rejected() {
    let config = KdeConfig::default();

    let result = estimate_density(&[0.0, f64::INFINITY], &[0.0, 1.0], None, &config);
    assert!(matches!(result, Err(Error::NonFiniteSample { index: 1 })));

    let result = estimate_density(&[0.0, 1.0], &[0.0, 1.0], Some(&[1.0, f64::NAN]), &config);
    assert!(matches!(result, Err(Error::InvalidWeight { index: 1, .. })));

    let tiny = KdeConfig {
        grid_size: (1, 100),
        ..KdeConfig::default()
    };
    let result = estimate_density(&[0.0, 1.0], &[0.0, 1.0], None, &tiny);
    assert!(matches!(result, Err(Error::InvalidGridSize { nx: 1, ny: 100 })));
}

#[test]
fn test_error_messages_name_the_problem() {
    let err = Error::ShapeMismatch {
        what: "y",
        expected: 5,
        got: 3,
    };
    assert_eq!(err.to_string(), "shape mismatch: y has length 3, expected 5");

    let err = Error::DegenerateExtent {
        axis: 'x',
        low: 0.0,
        high: 0.0,
    };
    assert!(err.to_string().contains("x axis"));
}
