//! The fast bivariate KDE pipeline and its output grid.
//!
//! # Algorithm
//!
//! 1. Validate the samples and configuration
//! 2. Bin the samples into an `nx × ny` weighted histogram over the extents
//! 3. Estimate the pixel-space covariance and build a Gaussian kernel sized
//!    by Scott's rule (or by an explicit kernel extent)
//! 4. Convolve the histogram with the kernel and divide by the selected
//!    normalization constant
//!
//! The cost is `O(n + occupied_bins · kernel_area)` instead of the
//! `O(n · nx · ny)` of evaluating every kernel at every grid node; see
//! [`direct_density`](crate::direct_density) for the latter.

use nalgebra::DMatrix;

use crate::config::{KdeConfig, Normalization};
use crate::convolve::convolve_same;
use crate::error::{Error, Result};
use crate::extents::Extents;
use crate::histogram::Histogram2d;
use crate::integrate::trapezoid_2d;
use crate::kernel::{
    GaussianKernel, SampleCovariance, clamp_to_grid, kernel_size, scott_factor,
};
use crate::sample::SampleSet;

/// A density estimate sampled on a regular grid.
///
/// Values are stored row-major with `ny` rows and `nx` columns: row `r`
/// corresponds to `y = ymin + r * dy`, column `c` to `x = xmin + c * dx`.
/// This matches image orientation, so the values can be handed straight to
/// a heatmap renderer.
///
/// With the `serde` feature, deserialization checks the grid size, the
/// extents and the number of values; `dx` and `dy` are recomputed from the
/// extents.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawDensityGrid")
)]
pub struct DensityGrid {
    nx: usize,
    ny: usize,
    extents: Extents,
    dx: f64,
    dy: f64,
    values: Vec<f64>,
}

/// Unchecked wire form of a [`DensityGrid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDensityGrid {
    nx: usize,
    ny: usize,
    extents: Extents,
    values: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDensityGrid> for DensityGrid {
    type Error = Error;

    fn try_from(raw: RawDensityGrid) -> Result<Self> {
        if raw.nx < 2 || raw.ny < 2 {
            return Err(Error::InvalidGridSize {
                nx: raw.nx,
                ny: raw.ny,
            });
        }
        let e = raw.extents;
        let extents = Extents::new(e.xmin, e.xmax, e.ymin, e.ymax)?;
        let expected = raw.nx.checked_mul(raw.ny).ok_or(Error::InvalidGridSize {
            nx: raw.nx,
            ny: raw.ny,
        })?;
        if raw.values.len() != expected {
            return Err(Error::ShapeMismatch {
                what: "values",
                expected,
                got: raw.values.len(),
            });
        }
        Ok(Self::from_rows(raw.nx, raw.ny, extents, raw.values))
    }
}

impl DensityGrid {
    /// Builds a grid from row-major values.
    pub(crate) fn from_rows(nx: usize, ny: usize, extents: Extents, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), nx * ny);
        let (dx, dy) = extents.bin_widths(nx, ny);
        Self {
            nx,
            ny,
            extents,
            dx,
            dy,
            values,
        }
    }

    /// Builds a grid from x-major values (`values[ix * ny + iy]`), transposing
    /// into row-major order.
    fn from_columns(nx: usize, ny: usize, extents: Extents, columns: &[f64]) -> Self {
        let mut values = Vec::with_capacity(nx * ny);
        for iy in 0..ny {
            values.extend((0..nx).map(|ix| columns[ix * ny + iy]));
        }
        Self::from_rows(nx, ny, extents, values)
    }

    /// `(rows, cols)`, i.e. `(ny, nx)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.ny, self.nx)
    }

    /// Density at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(
            row < self.ny && col < self.nx,
            "cell ({row}, {col}) out of range for {}x{} grid",
            self.ny,
            self.nx
        );
        self.values[row * self.nx + col]
    }

    /// One row of the grid (constant y).
    ///
    /// # Panics
    ///
    /// Panics if `row >= ny`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.nx..(row + 1) * self.nx]
    }

    /// All values, row-major.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the grid, returning the row-major values.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Domain the grid spans.
    #[must_use]
    pub fn extents(&self) -> &Extents {
        &self.extents
    }

    /// Node spacing along x.
    #[must_use]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Node spacing along y.
    #[must_use]
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Data-space x coordinate of every column.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn x_coords(&self) -> Vec<f64> {
        (0..self.nx)
            .map(|c| self.extents.xmin + c as f64 * self.dx)
            .collect()
    }

    /// Data-space y coordinate of every row.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn y_coords(&self) -> Vec<f64> {
        (0..self.ny)
            .map(|r| self.extents.ymin + r as f64 * self.dy)
            .collect()
    }

    /// Riemann-sum mass `Σ values · dx · dy`.
    #[must_use]
    pub fn cell_mass(&self) -> f64 {
        self.values.iter().sum::<f64>() * self.dx * self.dy
    }

    /// Trapezoidal integral over the extents.
    #[must_use]
    pub fn trapezoid_mass(&self) -> f64 {
        // Row-major with ny rows is x-major with the axes swapped.
        trapezoid_2d(&self.values, self.ny, self.nx, self.dy, self.dx)
    }

    /// `(row, col)` of the largest value; the first one on ties.
    #[must_use]
    pub fn argmax(&self) -> (usize, usize) {
        let idx = self
            .values
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, &v)| {
                if v > bv { (i, v) } else { (bi, bv) }
            })
            .0;
        (idx / self.nx, idx % self.nx)
    }

    /// Largest value in the grid.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Copies the grid into an `ny × nx` matrix.
    #[must_use]
    pub fn to_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.ny, self.nx, &self.values)
    }
}

/// Estimates the density of weighted 2D samples on a regular grid.
///
/// `weights` defaults to one per sample. The returned grid has
/// `config.grid_size.1` rows and `config.grid_size.0` columns. Inputs are
/// only read; pixel coordinates are computed into fresh buffers.
///
/// # Errors
///
/// Returns `Error::InvalidGridSize`, `Error::InvalidKernelExtent` or
/// `Error::DegenerateExtent` for an invalid configuration.
/// Returns `Error::ShapeMismatch`, `Error::NonFiniteSample` or
/// `Error::InvalidWeight` for invalid samples.
/// Returns `Error::SingularCovariance` if there are fewer than two samples,
/// or the pixel-space covariance cannot be inverted (identical or collinear
/// points, unless `ignore_correlation` removes the collinearity).
/// Returns `Error::DegenerateKernel` if the kernel rounds to zero bins.
/// Returns `Error::ZeroIntegral` if `exact_pdf` is set and the grid
/// integrates to zero.
///
/// # Examples
///
/// ```
/// use gridkde::{Extents, KdeConfig, estimate_density};
///
/// let x = [0.1, 0.4, -0.3, 0.8, -0.6, 0.2, 0.0, -0.1];
/// let y = [0.2, -0.5, 0.3, 0.1, -0.2, 0.6, -0.4, 0.0];
/// let config = KdeConfig::builder()
///     .grid_size(64, 48)
///     .domain_extents(Extents::new(-2.0, 2.0, -2.0, 2.0).unwrap())
///     .build()
///     .unwrap();
///
/// let grid = estimate_density(&x, &y, None, &config).unwrap();
/// assert_eq!(grid.shape(), (48, 64));
/// assert!(grid.values().iter().all(|&v| v >= 0.0));
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn estimate_density(
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

    let (nx, ny) = config.grid_size;
    trace_debug!(n, nx, ny, "estimating density");

    let extents = match config.domain_extents {
        Some(e) => e,
        None => Extents::from_samples(&samples)?,
    };
    let (dx, dy) = extents.bin_widths(nx, ny);

    let hist = Histogram2d::accumulate(&samples, &extents, config.grid_size);
    trace_debug!(total_weight = hist.total(), dx, dy, "samples binned");

    let mut covariance = SampleCovariance::from_points(hist.pixels())?;
    if config.ignore_correlation {
        covariance = covariance.without_correlation();
    }

    let scott = scott_factor(n);
    let bandwidth = covariance.bandwidth(scott)?;
    let size = clamp_to_grid(
        kernel_size(&covariance, scott, config.kernel_extent, (dx, dy))?,
        config.grid_size,
    );
    trace_debug!(kernel_nx = size.0, kernel_ny = size.1, scott, "kernel built");

    let kernel = GaussianKernel::build(&bandwidth, size);
    let mut density = convolve_same(&hist, &kernel);

    let norm = match config.normalization() {
        Normalization::Kernel => bandwidth.normalization(),
        Normalization::Density => bandwidth.normalization() * n as f64 * dx * dy,
        Normalization::ExactPdf => {
            let integral = trapezoid_2d(&density, nx, ny, dx, dy);
            if integral <= 0.0 {
                return Err(Error::ZeroIntegral);
            }
            integral
        }
    };
    trace_debug!(norm, "normalizing density grid");

    for v in &mut density {
        *v /= norm;
    }

    let grid = DensityGrid::from_columns(nx, ny, extents, &density);
    trace_info!(n, rows = ny, cols = nx, "density grid estimated");
    Ok(grid)
}
