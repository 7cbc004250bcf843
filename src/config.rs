//! Estimator configuration.

use crate::error::{Error, Result};
use crate::extents::Extents;

/// Configuration for [`estimate_density`](crate::estimate_density).
///
/// Use [`Default::default()`] for a 500×500 normalized density over the
/// sample bounding box, or [`KdeConfig::builder()`] to customize and
/// validate in one step. Fields are public, so a config assembled by hand is
/// validated again when the estimator runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KdeConfig {
    /// Output resolution `(nx, ny)`; the grid has `ny` rows and `nx` columns
    /// (default: `(500, 500)`).
    pub grid_size: (usize, usize),
    /// Kernel size in data units along x and y. `None` derives it from the
    /// sample covariance with Scott's rule (default: `None`).
    pub kernel_extent: Option<(f64, f64)>,
    /// Domain covered by the grid. `None` uses the sample bounding box
    /// (default: `None`).
    pub domain_extents: Option<Extents>,
    /// Zero the off-diagonal covariance before inverting it. Only the
    /// bandwidth is affected, not the binning (default: `false`).
    pub ignore_correlation: bool,
    /// Scale the grid so that `sum * dx * dy` is the total weight over the
    /// sample count; with unit weights the grid integrates to 1. When
    /// `false` only the kernel's own constant is divided out
    /// (default: `true`).
    pub normalize: bool,
    /// Replace the analytic normalization with the trapezoidal integral of
    /// the convolved grid over the extents (default: `false`).
    pub exact_pdf: bool,
}

impl Default for KdeConfig {
    fn default() -> Self {
        Self {
            grid_size: (500, 500),
            kernel_extent: None,
            domain_extents: None,
            ignore_correlation: false,
            normalize: true,
            exact_pdf: false,
        }
    }
}

/// How the convolved grid is scaled before it is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Divide by the kernel integral only.
    Kernel,
    /// Divide by the kernel integral times `n * dx * dy`.
    Density,
    /// Divide by the numerical integral of the convolved grid.
    ExactPdf,
}

impl KdeConfig {
    /// Returns a builder initialized with the defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridkde::{Extents, KdeConfig};
    ///
    /// let config = KdeConfig::builder()
    ///     .grid_size(200, 100)
    ///     .domain_extents(Extents::new(-4.0, 4.0, -2.0, 2.0).unwrap())
    ///     .ignore_correlation(true)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(config.grid_size, (200, 100));
    /// assert!(config.normalize);
    /// ```
    #[must_use]
    pub fn builder() -> KdeConfigBuilder {
        KdeConfigBuilder::new()
    }

    /// Checks the grid size and kernel extent.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidGridSize` if either grid dimension is below 2.
    /// Returns `Error::InvalidKernelExtent` if an explicit kernel extent is
    /// not finite and positive.
    /// Returns `Error::DegenerateExtent` if explicit domain extents have no width.
    pub fn validate(&self) -> Result<()> {
        let (nx, ny) = self.grid_size;
        if nx < 2 || ny < 2 {
            return Err(Error::InvalidGridSize { nx, ny });
        }
        if let Some((kx, ky)) = self.kernel_extent
            && !(kx.is_finite() && ky.is_finite() && kx > 0.0 && ky > 0.0)
        {
            return Err(Error::InvalidKernelExtent { kx, ky });
        }
        if let Some(e) = self.domain_extents {
            Extents::new(e.xmin, e.xmax, e.ymin, e.ymax)?;
        }
        Ok(())
    }

    /// The normalization mode selected by `normalize` and `exact_pdf`.
    ///
    /// `exact_pdf` takes precedence.
    #[must_use]
    pub fn normalization(&self) -> Normalization {
        if self.exact_pdf {
            Normalization::ExactPdf
        } else if self.normalize {
            Normalization::Density
        } else {
            Normalization::Kernel
        }
    }
}

/// Builder for [`KdeConfig`].
#[derive(Debug, Clone, Default)]
pub struct KdeConfigBuilder {
    config: KdeConfig,
}

impl KdeConfigBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output resolution: `nx` columns by `ny` rows.
    #[must_use]
    pub fn grid_size(mut self, nx: usize, ny: usize) -> Self {
        self.config.grid_size = (nx, ny);
        self
    }

    /// Sets an explicit kernel size in data units, bypassing Scott's rule
    /// for the kernel extent.
    #[must_use]
    pub fn kernel_extent(mut self, kx: f64, ky: f64) -> Self {
        self.config.kernel_extent = Some((kx, ky));
        self
    }

    /// Sets the domain covered by the grid.
    #[must_use]
    pub fn domain_extents(mut self, extents: Extents) -> Self {
        self.config.domain_extents = Some(extents);
        self
    }

    /// Ignores the x/y correlation when computing the bandwidth.
    #[must_use]
    pub fn ignore_correlation(mut self, ignore: bool) -> Self {
        self.config.ignore_correlation = ignore;
        self
    }

    /// Enables or disables probability-density scaling.
    #[must_use]
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.config.normalize = normalize;
        self
    }

    /// Enables quadrature-based normalization.
    #[must_use]
    pub fn exact_pdf(mut self, exact: bool) -> Self {
        self.config.exact_pdf = exact;
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    ///
    /// See [`KdeConfig::validate`].
    pub fn build(self) -> Result<KdeConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
