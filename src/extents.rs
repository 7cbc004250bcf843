//! Spatial extents of the output grid and the affine map into pixel space.

use crate::error::{Error, Result};
use crate::sample::SampleSet;

/// Rectangular domain `[xmin, xmax] × [ymin, ymax]` covered by a density grid.
///
/// Grid node `i` along x sits at `xmin + i * dx` with
/// `dx = (xmax - xmin) / (nx - 1)`, so the first and last nodes land exactly
/// on the bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extents {
    /// Lower x bound.
    pub xmin: f64,
    /// Upper x bound.
    pub xmax: f64,
    /// Lower y bound.
    pub ymin: f64,
    /// Upper y bound.
    pub ymax: f64,
}

impl Extents {
    /// Creates extents from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns `Error::DegenerateExtent` if either axis has zero or negative
    /// width, or a bound is not finite.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self> {
        check_axis('x', xmin, xmax)?;
        check_axis('y', ymin, ymax)?;
        Ok(Self {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// Bounding box of a sample set.
    ///
    /// When every point coincides there is no spread at all and the
    /// covariance is singular; that case is reported as
    /// `Error::SingularCovariance` rather than as a degenerate extent.
    ///
    /// # Errors
    ///
    /// Returns `Error::SingularCovariance` if the samples are empty or all
    /// identical, and `Error::DegenerateExtent` if exactly one axis has zero
    /// range.
    pub fn from_samples(samples: &SampleSet<'_>) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::SingularCovariance {
                determinant: f64::NAN,
            });
        }
        let (xmin, xmax) = min_max(samples.x());
        let (ymin, ymax) = min_max(samples.y());
        if xmax <= xmin && ymax <= ymin {
            return Err(Error::SingularCovariance { determinant: 0.0 });
        }
        Self::new(xmin, xmax, ymin, ymax)
    }

    /// Width of the x axis.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Height of the y axis.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Distance between neighbouring grid nodes along each axis for a grid
    /// of `nx × ny` nodes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn bin_widths(&self, nx: usize, ny: usize) -> (f64, f64) {
        (
            self.width() / (nx - 1) as f64,
            self.height() / (ny - 1) as f64,
        )
    }

    /// Maps a data-space point to continuous pixel coordinates.
    #[must_use]
    pub fn to_pixel(&self, x: f64, y: f64, dx: f64, dy: f64) -> (f64, f64) {
        ((x - self.xmin) / dx, (y - self.ymin) / dy)
    }
}

fn check_axis(axis: char, low: f64, high: f64) -> Result<()> {
    if !low.is_finite() || !high.is_finite() || high <= low {
        return Err(Error::DegenerateExtent { axis, low, high });
    }
    Ok(())
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
