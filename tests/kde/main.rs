#![allow(
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation
)]

mod errors;
mod normalization;

use core::f64::consts::PI;

/// 10,000 deterministic points from a standard bivariate normal: 100 radii
/// (stratified in `u`, `r = sqrt(-2 ln u)`) times 100 evenly spaced angles.
///
/// The cloud is mirror-symmetric about both axes, which keeps assertions on
/// the mode location free of sampling noise.
pub(crate) fn normal_lattice() -> (Vec<f64>, Vec<f64>) {
    let m = 100;
    let mut x = Vec::with_capacity(m * m);
    let mut y = Vec::with_capacity(m * m);
    for i in 0..m {
        let u = (i as f64 + 0.5) / m as f64;
        let r = (-2.0 * u.ln()).sqrt();
        for k in 0..m {
            let theta = 2.0 * PI * (k as f64 + 0.5) / m as f64;
            x.push(r * theta.cos());
            y.push(r * theta.sin());
        }
    }
    (x, y)
}

/// `n` pseudo-random standard normal pairs via Box-Muller.
pub(crate) fn random_normal(n: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for _ in 0..n {
        let u1 = 1.0 - rng.f64();
        let u2 = rng.f64();
        let r = (-2.0 * u1.ln()).sqrt();
        x.push(r * (2.0 * PI * u2).cos());
        y.push(r * (2.0 * PI * u2).sin());
    }
    (x, y)
}
