//! Piecewise-constant and piecewise-linear interpolation on a uniform 1D grid.

use interpn::multilinear::regular;

use super::SplineDegree;
use crate::error::{GridError, Result};

/// Interpolant through equally spaced samples `values[k]` at `x0 + k * delta`.
///
/// Linear interpolation goes through [`interpn::multilinear::regular`] with a
/// single dimension. Outside `[x0, x1]` the interpolant continues naturally:
/// the boundary segment is extended for linear interpolation, the boundary
/// sample is repeated for constant interpolation.
#[derive(Clone, Debug, PartialEq)]
pub struct UnivariateSpline {
    x0: f64,
    delta: f64,
    values: Vec<f64>,
    degree: SplineDegree,
}

impl UnivariateSpline {
    /// Create a new interpolant.
    ///
    /// Needs at least two samples and a positive spacing.
    pub fn new(x0: f64, delta: f64, values: Vec<f64>, degree: SplineDegree) -> Result<Self> {
        if values.len() < 2 {
            return Err(GridError::value(format!(
                "univariate interpolation needs at least 2 samples, got {}",
                values.len()
            )));
        }
        if !delta.is_finite() || delta <= 0.0 {
            return Err(GridError::value(format!(
                "univariate interpolation needs a positive spacing, got {}",
                delta
            )));
        }
        Ok(Self {
            x0,
            delta,
            values,
            degree,
        })
    }

    /// First sample coordinate.
    #[inline]
    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// Last sample coordinate.
    #[inline]
    pub fn x1(&self) -> f64 {
        self.x0 + self.delta * (self.values.len() - 1) as f64
    }

    #[inline]
    pub fn degree(&self) -> SplineDegree {
        self.degree
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: at least two samples are required.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Evaluate at `x`.
    pub fn evaluate(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        match self.degree {
            SplineDegree::Constant => {
                let n = self.values.len();
                let f = (x - self.x0) / self.delta;
                Ok(self.values[(f.round().max(0.0) as usize).min(n - 1)])
            }
            SplineDegree::Linear => {
                let mut out = [0.0];
                regular::interpn(
                    &[self.values.len()],
                    &[self.x0],
                    &[self.delta],
                    &self.values,
                    &[&[x][..]],
                    &mut out,
                )
                .map_err(|e| GridError::value(format!("linear interpolation failed: {}", e)))?;
                Ok(out[0])
            }
        }
    }
}
