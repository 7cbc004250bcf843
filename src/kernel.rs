//! Bandwidth selection and the discretized Gaussian kernel.
//!
//! The bandwidth is estimated in pixel space: the covariance of the floored
//! bin coordinates, scaled by Scott's factor `n^(-1/6)`. The kernel is the
//! unnormalized Gaussian `exp(-0.5 * oᵀ Σ⁻¹ o)` evaluated at integer pixel
//! offsets `o`; the normalization constant is applied after convolution.

use core::f64::consts::PI;

use nalgebra::{Matrix2, Vector2};

use crate::error::{Error, Result};

/// Determinants below this fraction of the product of the variances are
/// treated as zero.
const SINGULAR_RTOL: f64 = 1e-12;

/// Scott's rule bandwidth factor for two dimensions: `n^(-1/(d+4))` with `d = 2`.
///
/// # Examples
///
/// ```
/// let f = gridkde::scott_factor(64);
/// assert!((f - 0.5).abs() < 1e-12);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn scott_factor(n: usize) -> f64 {
    (n as f64).powf(-1.0 / 6.0)
}

/// 2×2 sample covariance (ddof = 1) of a set of 2D points.
///
/// The estimator feeds it floored pixel coordinates; the direct reference
/// evaluation feeds it raw data coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleCovariance {
    matrix: Matrix2<f64>,
}

impl SampleCovariance {
    /// Estimates the unweighted sample covariance of `points`.
    ///
    /// Weights do not enter the covariance; they only scale histogram mass.
    ///
    /// # Errors
    ///
    /// Returns `Error::SingularCovariance` if fewer than two points are given.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::SingularCovariance {
                determinant: f64::NAN,
            });
        }

        let n = points.len() as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(ax, ay), &(x, y)| (ax + x, ay + y));
        let (mx, my) = (sx / n, sy / n);

        let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
        for &(x, y) in points {
            let (cx, cy) = (x - mx, y - my);
            sxx += cx * cx;
            sxy += cx * cy;
            syy += cy * cy;
        }

        let ddof = n - 1.0;
        Ok(Self {
            matrix: Matrix2::new(sxx / ddof, sxy / ddof, sxy / ddof, syy / ddof),
        })
    }

    /// Builds a covariance directly from its entries.
    #[must_use]
    pub fn from_entries(var_x: f64, cov_xy: f64, var_y: f64) -> Self {
        Self {
            matrix: Matrix2::new(var_x, cov_xy, cov_xy, var_y),
        }
    }

    /// Zeroes the off-diagonal terms, treating the axes as independent.
    #[must_use]
    pub fn without_correlation(mut self) -> Self {
        self.matrix[(0, 1)] = 0.0;
        self.matrix[(1, 0)] = 0.0;
        self
    }

    /// The covariance matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix2<f64> {
        &self.matrix
    }

    /// Per-axis standard deviations (square roots of the diagonal).
    #[must_use]
    pub fn std_devs(&self) -> (f64, f64) {
        (self.matrix[(0, 0)].sqrt(), self.matrix[(1, 1)].sqrt())
    }

    /// Scales the covariance by `scott²` and inverts it.
    ///
    /// # Errors
    ///
    /// Returns `Error::SingularCovariance` if the scaled matrix is not
    /// invertible: a zero variance, or a determinant that vanishes relative
    /// to the variances (collinear points).
    pub fn bandwidth(&self, scott: f64) -> Result<Bandwidth> {
        let scaled = self.matrix * (scott * scott);
        let det = scaled.determinant();
        let (a, d) = (scaled[(0, 0)], scaled[(1, 1)]);

        if !det.is_finite() || a <= 0.0 || d <= 0.0 || det <= SINGULAR_RTOL * a * d {
            return Err(Error::SingularCovariance { determinant: det });
        }
        let inverse = scaled
            .try_inverse()
            .ok_or(Error::SingularCovariance { determinant: det })?;

        Ok(Bandwidth {
            covariance: scaled,
            inverse,
        })
    }
}

/// Scott-scaled kernel covariance together with its inverse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bandwidth {
    covariance: Matrix2<f64>,
    inverse: Matrix2<f64>,
}

impl Bandwidth {
    /// The scaled kernel covariance `cov * scott²`.
    #[must_use]
    pub fn covariance(&self) -> &Matrix2<f64> {
        &self.covariance
    }

    /// The inverse of the scaled kernel covariance.
    #[must_use]
    pub fn inverse(&self) -> &Matrix2<f64> {
        &self.inverse
    }

    /// Analytic integral of the unnormalized kernel over the plane:
    /// `sqrt(det(2π · cov · scott²))`.
    #[must_use]
    pub fn normalization(&self) -> f64 {
        (self.covariance * (2.0 * PI)).determinant().sqrt()
    }

    /// Quadratic form `oᵀ Σ⁻¹ o`.
    #[must_use]
    pub fn mahalanobis_sq(&self, ox: f64, oy: f64) -> f64 {
        let o = Vector2::new(ox, oy);
        o.dot(&(self.inverse * o))
    }
}

/// Kernel size in bins along each axis.
///
/// With no explicit extent the size is `round(scott * 2π * σ)` per axis,
/// using the pixel-space standard deviation σ. An explicit extent in data
/// units is converted with `round(extent / bin_width)`. Rounding is half to
/// even.
///
/// # Errors
///
/// Returns `Error::DegenerateKernel` if either size is not positive.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn kernel_size(
    covariance: &SampleCovariance,
    scott: f64,
    explicit: Option<(f64, f64)>,
    bin_widths: (f64, f64),
) -> Result<(usize, usize)> {
    let (kx, ky) = match explicit {
        Some((ex, ey)) => (ex / bin_widths.0, ey / bin_widths.1),
        None => {
            let (sx, sy) = covariance.std_devs();
            (scott * 2.0 * PI * sx, scott * 2.0 * PI * sy)
        }
    };
    let (kx, ky) = (kx.round_ties_even(), ky.round_ties_even());

    if kx.is_nan() || ky.is_nan() || kx < 1.0 || ky < 1.0 {
        return Err(Error::DegenerateKernel {
            nx: if kx.is_finite() { kx as i64 } else { 0 },
            ny: if ky.is_finite() { ky as i64 } else { 0 },
        });
    }
    Ok((kx as usize, ky as usize))
}

/// Caps a kernel size at `2 * n - 1` bins per axis for an `n`-bin grid.
///
/// Under a same-size convolution, cells more than `n - 1` bins from the
/// center never land on the grid, so the capped kernel gives the same output.
pub(crate) fn clamp_to_grid(size: (usize, usize), grid_size: (usize, usize)) -> (usize, usize) {
    (
        size.0.min(2 * grid_size.0 - 1),
        size.1.min(2 * grid_size.1 - 1),
    )
}

/// Gaussian kernel sampled on an `nx × ny` grid of pixel offsets, x-major.
///
/// Cell `(jx, jy)` holds the kernel at offset `(jx - cx, jy - cy)` where
/// `cx = (nx - 1) / 2` and `cy = (ny - 1) / 2` (integer division). Odd sizes
/// are exactly centered; even sizes carry one extra tail cell on the positive
/// side.
#[derive(Clone, Debug)]
pub struct GaussianKernel {
    nx: usize,
    ny: usize,
    values: Vec<f64>,
}

impl GaussianKernel {
    /// Evaluates the unnormalized Gaussian of `bandwidth` on a kernel grid of
    /// `size` bins.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn build(bandwidth: &Bandwidth, size: (usize, usize)) -> Self {
        let (nx, ny) = size;
        let (cx, cy) = (Self::center_of(nx), Self::center_of(ny));

        let mut values = Vec::with_capacity(nx * ny);
        for jx in 0..nx {
            let ox = jx as f64 - cx as f64;
            for jy in 0..ny {
                let oy = jy as f64 - cy as f64;
                values.push((-0.5 * bandwidth.mahalanobis_sq(ox, oy)).exp());
            }
        }

        Self { nx, ny, values }
    }

    fn center_of(n: usize) -> usize {
        (n - 1) / 2
    }

    /// Width in bins.
    #[must_use]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Height in bins.
    #[must_use]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Index of the zero-offset cell along each axis.
    #[must_use]
    pub fn center(&self) -> (usize, usize) {
        (Self::center_of(self.nx), Self::center_of(self.ny))
    }

    /// Kernel weight at cell `(jx, jy)`.
    #[must_use]
    pub fn get(&self, jx: usize, jy: usize) -> f64 {
        self.values[jx * self.ny + jy]
    }

    /// Sum of all kernel weights.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }
}
