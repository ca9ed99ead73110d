//! Tensor-product linear interpolation on a uniform N-dimensional grid.

use interpn::multilinear::regular;
use ndarray::ArrayViewD;

use crate::error::{GridError, Result};

/// Multilinear interpolant over a uniform grid, backed by
/// [`interpn::multilinear::regular`].
///
/// Axes with a single node are not passed to the interpolator: they
/// contribute that node regardless of the query coordinate. Outside the
/// grid the boundary cells are extended linearly.
#[derive(Clone, Debug, PartialEq)]
pub struct RegularGridInterpolator {
    ndim: usize,
    /// Indices of the axes with more than one node
    axes: Vec<usize>,
    dims: Vec<usize>,
    starts: Vec<f64>,
    steps: Vec<f64>,
    /// Samples in row-major order
    values: Vec<f64>,
}

impl RegularGridInterpolator {
    /// Create a new interpolant from the grid origin, spacing and samples.
    pub fn new(x0: &[f64], delta: &[f64], values: ArrayViewD<'_, f64>) -> Result<Self> {
        let ndim = values.ndim();
        if x0.len() != ndim || delta.len() != ndim {
            return Err(GridError::value(format!(
                "interpolator axes ({} origins, {} spacings) do not match {}-dimensional values",
                x0.len(),
                delta.len(),
                ndim
            )));
        }

        let axes: Vec<usize> = (0..ndim).filter(|&i| values.shape()[i] > 1).collect();
        if let Some(&axis) = axes
            .iter()
            .find(|&&i| delta[i].is_nan() || delta[i] <= 0.0)
        {
            return Err(GridError::value(format!(
                "axis {} has several nodes but spacing {}",
                axis, delta[axis]
            )));
        }

        // Unit axes do not change the row-major order of the samples.
        Ok(Self {
            ndim,
            dims: axes.iter().map(|&i| values.shape()[i]).collect(),
            starts: axes.iter().map(|&i| x0[i]).collect(),
            steps: axes.iter().map(|&i| delta[i]).collect(),
            values: values.iter().copied().collect(),
            axes,
        })
    }

    #[inline]
    pub fn num_dimensions(&self) -> usize {
        self.ndim
    }

    /// Axes the interpolant varies along.
    #[inline]
    pub fn extended_axes(&self) -> &[usize] {
        &self.axes
    }

    /// Evaluate at `point`, which must have one coordinate per axis.
    pub fn evaluate(&self, point: &[f64]) -> Result<f64> {
        if point.len() != self.ndim {
            return Err(GridError::value(format!(
                "point has {} coordinates but the interpolant is {}-dimensional",
                point.len(),
                self.ndim
            )));
        }
        if point.iter().any(|p| p.is_nan()) {
            return Ok(f64::NAN);
        }
        // A single sample: every axis is flat.
        if self.axes.is_empty() {
            return Ok(self.values[0]);
        }

        let coords: Vec<[f64; 1]> = self.axes.iter().map(|&i| [point[i]]).collect();
        let obs: Vec<&[f64]> = coords.iter().map(|c| &c[..]).collect();
        let mut out = [0.0];
        regular::interpn(
            &self.dims,
            &self.starts,
            &self.steps,
            &self.values,
            &obs,
            &mut out,
        )
        .map_err(|e| GridError::value(format!("multilinear interpolation failed: {}", e)))?;
        Ok(out[0])
    }
}
