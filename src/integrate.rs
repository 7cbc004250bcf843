//! Quadrature over sampled grids.

/// Composite trapezoidal integral of an x-major `nx × ny` grid of samples
/// with node spacing `dx`, `dy`.
///
/// Node `(ix, iy)` lives at `values[ix * ny + iy]`. Edge nodes carry half
/// weight along their axis, corner nodes a quarter.
///
/// # Panics
///
/// Panics if `values.len() != nx * ny`.
///
/// # Examples
///
/// ```
/// use gridkde::trapezoid_2d;
///
/// // Constant 2.0 over a 3x3 grid of unit spacing spans a 2x2 square.
/// let values = vec![2.0; 9];
/// assert!((trapezoid_2d(&values, 3, 3, 1.0, 1.0) - 8.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn trapezoid_2d(values: &[f64], nx: usize, ny: usize, dx: f64, dy: f64) -> f64 {
    assert_eq!(
        values.len(),
        nx * ny,
        "grid has {} values, expected {nx}x{ny}",
        values.len()
    );

    let weight = |i: usize, n: usize| if i == 0 || i + 1 == n { 0.5 } else { 1.0 };

    let mut total = 0.0;
    for ix in 0..nx {
        let wx = weight(ix, nx);
        let column: f64 = values[ix * ny..(ix + 1) * ny]
            .iter()
            .enumerate()
            .map(|(iy, &v)| weight(iy, ny) * v)
            .sum();
        total += wx * column;
    }
    total * dx * dy
}
