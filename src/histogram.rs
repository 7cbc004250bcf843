//! Binning stage: weighted 2D histogram over the grid nodes.

use crate::extents::Extents;
use crate::sample::SampleSet;

/// Dense weighted histogram of shape `(nx, ny)`, stored x-major.
///
/// Alongside the counts it keeps the floored pixel coordinate of every
/// sample, since the bandwidth is estimated from those rather than from the
/// raw data.
#[derive(Clone, Debug)]
pub struct Histogram2d {
    nx: usize,
    ny: usize,
    counts: Vec<f64>,
    pixels: Vec<(f64, f64)>,
}

impl Histogram2d {
    /// Bins `samples` into an `nx × ny` grid spanning `extents`.
    ///
    /// Each sample maps to `floor((x - xmin) / dx)`, clamped into
    /// `[0, nx - 1]` (and likewise for y), so points on or beyond the upper
    /// bound land in the last bin. Samples outside an explicit domain are
    /// clamped into the border bins as well.
    ///
    /// Callers must pass `nx, ny >= 2`; the estimator validates this before
    /// binning.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridkde::{Extents, Histogram2d, SampleSet};
    ///
    /// let x = [0.0, 1.0, 1.0];
    /// let y = [0.0, 1.0, 1.0];
    /// let samples = SampleSet::new(&x, &y, None).unwrap();
    /// let extents = Extents::new(0.0, 1.0, 0.0, 1.0).unwrap();
    ///
    /// let hist = Histogram2d::accumulate(&samples, &extents, (2, 2));
    /// assert_eq!(hist.get(0, 0), 1.0);
    /// assert_eq!(hist.get(1, 1), 2.0);
    /// ```
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn accumulate(
        samples: &SampleSet<'_>,
        extents: &Extents,
        grid_size: (usize, usize),
    ) -> Self {
        let (nx, ny) = grid_size;
        let (dx, dy) = extents.bin_widths(nx, ny);
        let x_last = (nx - 1) as f64;
        let y_last = (ny - 1) as f64;

        let mut counts = vec![0.0; nx * ny];
        let mut pixels = Vec::with_capacity(samples.len());

        for (x, y, w) in samples.iter() {
            let (px, py) = extents.to_pixel(x, y, dx, dy);
            let px = px.floor().clamp(0.0, x_last);
            let py = py.floor().clamp(0.0, y_last);
            counts[px as usize * ny + py as usize] += w;
            pixels.push((px, py));
        }

        Self {
            nx,
            ny,
            counts,
            pixels,
        }
    }

    /// Number of bins along x.
    #[must_use]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of bins along y.
    #[must_use]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Accumulated weight in bin `(ix, iy)`.
    ///
    /// # Panics
    ///
    /// Panics if the bin is out of range.
    #[must_use]
    pub fn get(&self, ix: usize, iy: usize) -> f64 {
        assert!(ix < self.nx && iy < self.ny, "bin ({ix}, {iy}) out of range");
        self.counts[ix * self.ny + iy]
    }

    /// Raw counts, x-major (`counts[ix * ny + iy]`).
    #[must_use]
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Floored, clamped pixel coordinates of each sample, in input order.
    #[must_use]
    pub fn pixels(&self) -> &[(f64, f64)] {
        &self.pixels
    }

    /// Total weight binned.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }
}
