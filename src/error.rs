/// Errors returned by the density estimator.
///
/// Every variant is fatal for the call that produced it. None of them are
/// recovered internally: a wrong kernel would give a silently wrong grid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Returned when two input sequences that must be paired differ in length.
    #[error("shape mismatch: {what} has length {got}, expected {expected}")]
    ShapeMismatch {
        /// Which input was mismatched (`"y"`, `"weights"` or `"values"`).
        what: &'static str,
        /// The required length (the `x` length, or `nx * ny` for grid values).
        expected: usize,
        /// The length of the offending input.
        got: usize,
    },

    /// Returned when a domain axis has zero, negative or non-finite width.
    #[error("degenerate extent on {axis} axis: [{low}, {high}] has no width")]
    DegenerateExtent {
        /// The axis name (`'x'` or `'y'`).
        axis: char,
        /// Lower bound of the axis.
        low: f64,
        /// Upper bound of the axis.
        high: f64,
    },

    /// Returned when the kernel rounds to zero or fewer bins along an axis.
    #[error("degenerate kernel: size {nx}x{ny} bins must be positive on both axes")]
    DegenerateKernel {
        /// Kernel width in bins along x.
        nx: i64,
        /// Kernel height in bins along y.
        ny: i64,
    },

    /// Returned when the pixel-space covariance cannot be inverted.
    ///
    /// This covers fewer than two samples and point clouds without spread
    /// along some direction (identical or collinear points).
    #[error("singular covariance (determinant {determinant}): point cloud is degenerate")]
    SingularCovariance {
        /// Determinant of the covariance, `NaN` when it could not be estimated.
        determinant: f64,
    },

    /// Returned when an output grid dimension is smaller than 2.
    #[error("invalid grid size {nx}x{ny}: both dimensions must be at least 2")]
    InvalidGridSize {
        /// Requested number of columns.
        nx: usize,
        /// Requested number of rows.
        ny: usize,
    },

    /// Returned when a coordinate is NaN or infinite.
    #[error("non-finite sample coordinate at index {index}")]
    NonFiniteSample {
        /// Index of the offending sample.
        index: usize,
    },

    /// Returned when a weight is negative or not finite.
    #[error("invalid weight {value} at index {index}: weights must be finite and non-negative")]
    InvalidWeight {
        /// Index of the offending weight.
        index: usize,
        /// The weight value.
        value: f64,
    },

    /// Returned when an explicit kernel extent is not finite and positive.
    #[error("invalid kernel extent ({kx}, {ky}): both must be finite and positive")]
    InvalidKernelExtent {
        /// Kernel extent along x in data units.
        kx: f64,
        /// Kernel extent along y in data units.
        ky: f64,
    },

    /// Returned when exact-PDF normalization integrates to zero.
    #[error("density integrates to zero over the grid extents")]
    ZeroIntegral,
}

pub type Result<T> = core::result::Result<T, Error>;
