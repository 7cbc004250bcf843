//! "Same"-size 2D convolution with zero fill outside the grid.

use crate::histogram::Histogram2d;
use crate::kernel::GaussianKernel;

/// Convolves `hist` with `kernel`, returning a grid of the histogram's shape
/// in the same x-major layout.
///
/// Mass that the kernel spreads past the grid border is dropped, so density
/// near the domain edges is underestimated. Empty bins are skipped, which
/// keeps the cost proportional to the occupied bins times the kernel area.
#[must_use]
pub fn convolve_same(hist: &Histogram2d, kernel: &GaussianKernel) -> Vec<f64> {
    let (nx, ny) = (hist.nx(), hist.ny());
    let (kx, ky) = (kernel.nx(), kernel.ny());
    let (cx, cy) = kernel.center();
    let counts = hist.counts();

    let mut out = vec![0.0; nx * ny];

    // Scatter form: bin (ix, iy) adds w * k[jx][jy] to (ix + jx - cx, iy + jy - cy).
    for ix in 0..nx {
        for iy in 0..ny {
            let w = counts[ix * ny + iy];
            if w <= 0.0 {
                continue;
            }

            // Kernel columns whose target stays inside the grid.
            let jx_lo = cx.saturating_sub(ix);
            let jx_hi = kx.min(nx + cx - ix);
            let jy_lo = cy.saturating_sub(iy);
            let jy_hi = ky.min(ny + cy - iy);

            for jx in jx_lo..jx_hi {
                let tx = ix + jx - cx;
                let row = &mut out[tx * ny..(tx + 1) * ny];
                for jy in jy_lo..jy_hi {
                    row[iy + jy - cy] += w * kernel.get(jx, jy);
                }
            }
        }
    }

    out
}
