//! Validated sample sets.
//!
//! This is the first stage of the estimator: coordinates and weights are
//! checked once up front so later stages can index them freely.

use std::borrow::Cow;

use crate::error::{Error, Result};

/// A validated set of weighted 2D samples.
///
/// Coordinates are borrowed from the caller and never modified. Weights are
/// borrowed when supplied and materialized as all ones otherwise.
///
/// # Examples
///
/// ```
/// use gridkde::SampleSet;
///
/// let x = [0.0, 1.0, 2.0];
/// let y = [1.0, 0.5, 2.0];
/// let samples = SampleSet::new(&x, &y, None).unwrap();
///
/// assert_eq!(samples.len(), 3);
/// assert!((samples.total_weight() - 3.0).abs() < f64::EPSILON);
/// ```
#[derive(Clone, Debug)]
pub struct SampleSet<'a> {
    x: &'a [f64],
    y: &'a [f64],
    weights: Cow<'a, [f64]>,
}

impl<'a> SampleSet<'a> {
    /// Validates `x`, `y` and the optional `weights`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if `y` or `weights` differ in length from `x`.
    /// Returns `Error::NonFiniteSample` if any coordinate is NaN or infinite.
    /// Returns `Error::InvalidWeight` if any weight is negative or not finite.
    pub fn new(x: &'a [f64], y: &'a [f64], weights: Option<&'a [f64]>) -> Result<Self> {
        if y.len() != x.len() {
            return Err(Error::ShapeMismatch {
                what: "y",
                expected: x.len(),
                got: y.len(),
            });
        }

        let weights = match weights {
            Some(w) => {
                if w.len() != x.len() {
                    return Err(Error::ShapeMismatch {
                        what: "weights",
                        expected: x.len(),
                        got: w.len(),
                    });
                }
                if let Some((index, &value)) = w
                    .iter()
                    .enumerate()
                    .find(|&(_, &v)| !v.is_finite() || v < 0.0)
                {
                    return Err(Error::InvalidWeight { index, value });
                }
                Cow::Borrowed(w)
            }
            None => Cow::Owned(vec![1.0; x.len()]),
        };

        if let Some(index) = x
            .iter()
            .zip(y)
            .position(|(a, b)| !a.is_finite() || !b.is_finite())
        {
            return Err(Error::NonFiniteSample { index });
        }

        Ok(Self { x, y, weights })
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns `true` if the set holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The x coordinates.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        self.x
    }

    /// The y coordinates.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        self.y
    }

    /// Per-sample weights (all ones when none were supplied).
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Iterates over `(x, y, weight)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.x
            .iter()
            .zip(self.y)
            .zip(self.weights.iter())
            .map(|((&x, &y), &w)| (x, y, w))
    }
}
