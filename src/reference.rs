//! Direct Gaussian KDE evaluated at every grid node.
//!
//! This is the `O(n · nx · ny)` computation the binned estimator
//! approximates. It is kept for validating the fast path and for benchmarks.

use core::f64::consts::PI;

use crate::config::KdeConfig;
use crate::error::{Error, Result};
use crate::estimator::DensityGrid;
use crate::extents::Extents;
use crate::kernel::{SampleCovariance, scott_factor};
use crate::sample::SampleSet;

/// Evaluates a weighted Gaussian KDE directly on the grid described by
/// `config`.
///
/// The bandwidth is the sample covariance (ddof = 1) of the raw coordinates
/// scaled by Scott's factor, with the off-diagonal zeroed when
/// `ignore_correlation` is set. Weights are normalized to sum to one, so the
/// result is a probability density. `kernel_extent`, `normalize` and
/// `exact_pdf` do not apply and are ignored.
///
/// # Errors
///
/// Same validation errors as [`estimate_density`](crate::estimate_density),
/// plus `Error::ZeroIntegral` if every weight is zero.
///
/// # Examples
///
/// ```
/// use gridkde::{Extents, KdeConfig, direct_density};
///
/// let x = [0.0, 1.0, 0.5, -0.5];
/// let y = [0.0, 0.5, 1.0, 0.2];
/// let config = KdeConfig::builder()
///     .grid_size(16, 16)
///     .domain_extents(Extents::new(-3.0, 3.0, -3.0, 3.0).unwrap())
///     .build()
///     .unwrap();
///
/// let grid = direct_density(&x, &y, None, &config).unwrap();
/// assert_eq!(grid.shape(), (16, 16));
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn direct_density(
    x: &[f64],
    y: &[f64],
    weights: Option<&[f64]>,
    config: &KdeConfig,
) -> Result<DensityGrid> {
    config.validate()?;
    let samples = SampleSet::new(x, y, weights)?;
    let n = samples.len();
    if n < 2 {
        return Err(Error::SingularCovariance {
            determinant: f64::NAN,
        });
    }
    let total_weight = samples.total_weight();
    if total_weight <= 0.0 {
        return Err(Error::ZeroIntegral);
    }

    let extents = match config.domain_extents {
        Some(e) => e,
        None => Extents::from_samples(&samples)?,
    };
    let (nx, ny) = config.grid_size;
    trace_debug!(n, nx, ny, "evaluating direct density");

    let points: Vec<(f64, f64)> = samples.iter().map(|(sx, sy, _)| (sx, sy)).collect();
    let mut covariance = SampleCovariance::from_points(&points)?;
    if config.ignore_correlation {
        covariance = covariance.without_correlation();
    }
    let bandwidth = covariance.bandwidth(scott_factor(n))?;
    let prefactor = 1.0 / (bandwidth.normalization() * total_weight);

    let (dx, dy) = extents.bin_widths(nx, ny);
    let xs: Vec<f64> = (0..nx).map(|c| extents.xmin + c as f64 * dx).collect();
    let ys: Vec<f64> = (0..ny).map(|r| extents.ymin + r as f64 * dy).collect();

    let mut values = Vec::with_capacity(nx * ny);
    for &gy in &ys {
        for &gx in &xs {
            let sum: f64 = samples
                .iter()
                .map(|(sx, sy, w)| {
                    w * (-0.5 * bandwidth.mahalanobis_sq(gx - sx, gy - sy)).exp()
                })
                .sum();
            values.push(sum * prefactor);
        }
    }

    Ok(DensityGrid::from_rows(nx, ny, extents, values))
}

/// Density at `(x, y)` of a bivariate normal with the given `mean` and
/// covariance entries `(var_x, cov_xy, var_y)`.
///
/// Useful as ground truth when checking estimates against known
/// distributions.
#[must_use]
pub fn bivariate_normal_pdf(x: f64, y: f64, mean: (f64, f64), cov: (f64, f64, f64)) -> f64 {
    let (vx, cxy, vy) = cov;
    let det = vx * vy - cxy * cxy;
    let (dx, dy) = (x - mean.0, y - mean.1);
    let q = (vy * dx * dx - 2.0 * cxy * dx * dy + vx * dy * dy) / det;
    (-0.5 * q).exp() / (2.0 * PI * det.sqrt())
}
