#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Fast bivariate Gaussian kernel density estimation on a regular grid.
//!
//! Instead of evaluating every kernel at every grid node (`O(n · nx · ny)`),
//! the samples are binned into a weighted 2D histogram and convolved with a
//! discretized Gaussian kernel whose covariance follows Scott's rule. The
//! kernel shrinks as `n^(-1/6)`, so the convolution cost stays roughly flat as
//! the sample count grows.
//!
//! # Getting Started
//!
//! ```
//! use gridkde::prelude::*;
//!
//! let x: Vec<f64> = (0..200).map(|i| (f64::from(i) * 0.37).sin() * 2.0).collect();
//! let y: Vec<f64> = (0..200).map(|i| (f64::from(i) * 0.91).cos()).collect();
//!
//! let config = KdeConfig::builder()
//!     .grid_size(120, 80)
//!     .domain_extents(Extents::new(-3.0, 3.0, -2.0, 2.0).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let grid = estimate_density(&x, &y, None, &config).unwrap();
//! assert_eq!(grid.shape(), (80, 120));
//! let (row, col) = grid.argmax();
//! println!("mode near x = {:.2}, y = {:.2}", grid.x_coords()[col], grid.y_coords()[row]);
//! ```
//!
//! # Pipeline
//!
//! | Stage | Type / function | Notes |
//! |-------|-----------------|-------|
//! | Validation | [`SampleSet`] | equal lengths, finite coordinates, non-negative weights |
//! | Binning | [`Extents`], [`Histogram2d`] | floored pixel indices, clamped to the grid |
//! | Kernel | [`SampleCovariance`], [`Bandwidth`], [`GaussianKernel`] | pixel-space covariance, Scott's factor |
//! | Smoothing | [`convolve_same`] | zero fill past the border |
//! | Normalization | [`KdeConfig::normalization`], [`trapezoid_2d`] | kernel only, density, or exact PDF |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on [`KdeConfig`], [`Extents`] and [`DensityGrid`] | off |
//! | `tracing` | Structured debug events via [`tracing`](https://docs.rs/tracing) at each pipeline stage | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod config;
mod convolve;
mod error;
mod estimator;
mod extents;
mod histogram;
mod integrate;
mod kernel;
mod reference;
mod sample;

pub use config::{KdeConfig, KdeConfigBuilder, Normalization};
pub use convolve::convolve_same;
pub use error::{Error, Result};
pub use estimator::{DensityGrid, estimate_density};
pub use extents::Extents;
pub use histogram::Histogram2d;
pub use integrate::trapezoid_2d;
pub use kernel::{Bandwidth, GaussianKernel, SampleCovariance, kernel_size, scott_factor};
pub use reference::{bivariate_normal_pdf, direct_density};
pub use sample::SampleSet;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use gridkde::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{KdeConfig, KdeConfigBuilder, Normalization};
    pub use crate::error::{Error, Result};
    pub use crate::estimator::{DensityGrid, estimate_density};
    pub use crate::extents::Extents;
    pub use crate::reference::direct_density;
}
