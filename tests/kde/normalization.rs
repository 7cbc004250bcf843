use gridkde::{Error, Extents, KdeConfig, estimate_density, scott_factor};

use crate::{normal_lattice, random_normal};

fn config(normalize: bool, exact_pdf: bool) -> KdeConfig {
    KdeConfig::builder()
        .grid_size(100, 100)
        .domain_extents(Extents::new(-4.0, 4.0, -4.0, 4.0).unwrap())
        .normalize(normalize)
        .exact_pdf(exact_pdf)
        .build()
        .unwrap()
}

#[test]
fn test_normalized_grid_integrates_to_one() {
    let (x, y) = normal_lattice();
    let grid = estimate_density(&x, &y, None, &config(true, false)).unwrap();
    let mass = grid.cell_mass();
    assert!((mass - 1.0).abs() < 1e-2, "mass {mass}");
}

#[test]
fn test_normalized_random_sample_integrates_to_one() {
    let (x, y) = random_normal(5000, 29);
    let grid = estimate_density(&x, &y, None, &config(true, false)).unwrap();
    let mass = grid.cell_mass();
    assert!((mass - 1.0).abs() < 1e-2, "mass {mass}");
}

#[test]
fn test_kernel_only_mode_differs_by_n_dx_dy() {
    let (x, y) = random_normal(1000, 31);
    let dense = estimate_density(&x, &y, None, &config(true, false)).unwrap();
    let raw = estimate_density(&x, &y, None, &config(false, false)).unwrap();

    let factor = 1000.0 * dense.dx() * dense.dy();
    for (d, r) in dense.values().iter().zip(raw.values()) {
        assert!((r - d * factor).abs() <= 1e-9 * r.abs().max(1e-12));
    }
    // Kernel-only scaling leaves the histogram mass in place: the grid sums
    // to roughly the number of samples.
    let total: f64 = raw.values().iter().sum();
    assert!((total / 1000.0 - 1.0).abs() < 2e-2, "total {total}");
}

#[test]
fn test_exact_pdf_trapezoid_mass_is_one() {
    let (x, y) = random_normal(1500, 37);
    for normalize in [true, false] {
        let grid = estimate_density(&x, &y, None, &config(normalize, true)).unwrap();
        let mass = grid.trapezoid_mass();
        assert!((mass - 1.0).abs() < 1e-9, "mass {mass}");
    }
}

#[test]
fn test_exact_pdf_close_to_analytic_density() {
    let (x, y) = normal_lattice();
    let exact = estimate_density(&x, &y, None, &config(true, true)).unwrap();
    let analytic = estimate_density(&x, &y, None, &config(true, false)).unwrap();
    let rel = (exact.max_value() - analytic.max_value()).abs() / analytic.max_value();
    assert!(rel < 2e-2, "relative peak difference {rel}");
}

#[test]
fn test_weighted_mass_scales_with_mean_weight() {
    let (x, y) = random_normal(2000, 41);
    let w = vec![3.0; x.len()];
    let grid = estimate_density(&x, &y, Some(&w), &config(true, false)).unwrap();
    let mass = grid.cell_mass();
    assert!((mass - 3.0).abs() < 3e-2, "mass {mass}");
}

#[test]
fn test_peak_matches_standard_normal() {
    // The bandwidth adds variance h² = scott² per axis, so the smoothed peak
    // is 1 / (2π (1 + h²)).
    let (x, y) = normal_lattice();
    let grid = estimate_density(&x, &y, None, &config(true, false)).unwrap();
    let h2 = scott_factor(x.len()).powi(2);
    let expected = 1.0 / (2.0 * core::f64::consts::PI * (1.0 + h2));
    let rel = (grid.max_value() - expected).abs() / expected;
    assert!(rel < 0.05, "peak {} vs {expected}", grid.max_value());
}

#[test]
fn test_zero_total_weight() {
    let (x, y) = random_normal(400, 41);
    let w = vec![0.0; x.len()];

    let result = estimate_density(&x, &y, Some(&w), &config(true, true));
    assert!(matches!(result, Err(Error::ZeroIntegral)));

    // Without exact normalization the divisor comes from the kernel, so an
    // empty histogram just yields an empty grid.
    let grid = estimate_density(&x, &y, Some(&w), &config(true, false)).unwrap();
    assert_eq!(grid.shape(), (100, 100));
    assert!(grid.values().iter().all(|&v| v == 0.0));
}
