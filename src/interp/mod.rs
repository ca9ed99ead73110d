//! Continuous interpolants built from grid samples.
//!
//! Data with a single extended axis is interpolated with a
//! [`UnivariateSpline`] of degree 0 or 1 along that axis; everything else
//! uses a linear [`RegularGridInterpolator`] over all axes, whatever the
//! requested degree. Linear interpolation is delegated to `interpn`. [`Interpolant`] is the
//! tagged variant over the two, picked once when it is built.
//!
//! # Example
//!
//! ```
//! use cartgrid_rs::grid::UniformGrid;
//! use cartgrid_rs::interp::{Extrapolation, Interpolant, SplineDegree};
//! use ndarray::Array1;
//!
//! let grid = UniformGrid::from_bounds(vec![11], vec![0.0], vec![1.0]).unwrap();
//! let values = Array1::from_shape_fn(11, |k| 0.1 * k as f64).into_dyn();
//!
//! let interp = Interpolant::build(&grid, values.view(), SplineDegree::Linear).unwrap();
//! assert!((interp.evaluate(&[0.55], Extrapolation::Extrapolate).unwrap() - 0.55).abs() < 1e-12);
//! assert_eq!(interp.evaluate(&[2.0], Extrapolation::Fill).unwrap(), 0.0);
//! ```

mod regular_grid;
mod univariate;

use ndarray::ArrayViewD;
use tracing::trace;

use crate::error::{GridError, Result};
use crate::grid::UniformGrid;
use crate::types::BoundingBox;

pub use regular_grid::RegularGridInterpolator;
pub use univariate::UnivariateSpline;

/// Value returned by [`Extrapolation::Fill`] outside the grid.
pub const FILL_VALUE: f64 = 0.0;

/// Degree of the piecewise polynomial used between samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SplineDegree {
    /// Piecewise constant (nearest sample)
    Constant = 0,
    /// Piecewise linear
    #[default]
    Linear = 1,
}

impl TryFrom<usize> for SplineDegree {
    type Error = GridError;

    fn try_from(k: usize) -> Result<Self> {
        match k {
            0 => Ok(Self::Constant),
            1 => Ok(Self::Linear),
            _ => Err(GridError::value(format!(
                "spline degree must be 0 or 1, got {}",
                k
            ))),
        }
    }
}

/// What to return for query points outside the sampled region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Extrapolation {
    /// Continue the interpolant past the boundary (code 0).
    #[default]
    Extrapolate,
    /// Return [`FILL_VALUE`] (code 1).
    Fill,
}

impl Extrapolation {
    /// Parse an extrapolation code; only 0 and 1 are defined.
    pub fn from_code(code: i32) -> Result<Self> {
        Self::try_from(code)
    }

    /// Numeric code of this policy.
    pub fn code(&self) -> i32 {
        match self {
            Self::Extrapolate => 0,
            Self::Fill => 1,
        }
    }
}

impl TryFrom<i32> for Extrapolation {
    type Error = GridError;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::Extrapolate),
            1 => Ok(Self::Fill),
            _ => Err(GridError::value(format!(
                "extrapolation code must be 0 (extrapolate) or 1 (fill), got {}",
                code
            ))),
        }
    }
}

/// The two interpolation regimes.
#[derive(Clone, Debug, PartialEq)]
pub enum InterpolantKind {
    /// Along the single extended axis `axis`.
    Univariate {
        axis: usize,
        spline: UnivariateSpline,
    },
    /// Over every axis.
    RegularGrid(RegularGridInterpolator),
}

/// Real-valued interpolant over the domain of a grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Interpolant {
    domain: BoundingBox,
    kind: InterpolantKind,
}

impl Interpolant {
    /// Build an interpolant for `values` sampled on `grid`.
    ///
    /// `values` must have the grid's shape. `degree` only applies to the
    /// univariate regime.
    pub fn build(
        grid: &UniformGrid,
        values: ArrayViewD<'_, f64>,
        degree: SplineDegree,
    ) -> Result<Self> {
        if values.shape() != grid.shape() {
            return Err(GridError::value(format!(
                "values of shape {:?} do not match grid shape {:?}",
                values.shape(),
                grid.shape()
            )));
        }

        let extended: Vec<usize> = (0..grid.num_dimensions())
            .filter(|&i| grid.shape()[i] > 1)
            .collect();

        let kind = if let &[axis] = extended.as_slice() {
            trace!(axis, ?degree, "building univariate interpolant");
            let samples: Vec<f64> = values.iter().copied().collect();
            let spline =
                UnivariateSpline::new(grid.x0()[axis], grid.delta()[axis], samples, degree)?;
            InterpolantKind::Univariate { axis, spline }
        } else {
            trace!(ndim = grid.num_dimensions(), "building regular grid interpolant");
            InterpolantKind::RegularGrid(RegularGridInterpolator::new(
                grid.x0(),
                grid.delta(),
                values,
            )?)
        };

        Ok(Self {
            domain: grid.bounding_box(),
            kind,
        })
    }

    /// Region covered by the samples.
    pub fn domain(&self) -> &BoundingBox {
        &self.domain
    }

    pub fn kind(&self) -> &InterpolantKind {
        &self.kind
    }

    pub fn is_univariate(&self) -> bool {
        matches!(self.kind, InterpolantKind::Univariate { .. })
    }

    /// Degree in use; the regular grid regime is always linear.
    pub fn degree(&self) -> SplineDegree {
        match &self.kind {
            InterpolantKind::Univariate { spline, .. } => spline.degree(),
            InterpolantKind::RegularGrid(_) => SplineDegree::Linear,
        }
    }

    /// Evaluate at `point` (one coordinate per grid axis).
    ///
    /// A point with the wrong number of coordinates is a value error.
    pub fn evaluate(&self, point: &[f64], ext: Extrapolation) -> Result<f64> {
        if point.len() != self.domain.num_dimensions() {
            return Err(GridError::value(format!(
                "point has {} coordinates but the interpolant is {}-dimensional",
                point.len(),
                self.domain.num_dimensions()
            )));
        }
        if ext == Extrapolation::Fill && !self.domain.contains(point) {
            return Ok(FILL_VALUE);
        }
        match &self.kind {
            InterpolantKind::Univariate { axis, spline } => spline.evaluate(point[*axis]),
            InterpolantKind::RegularGrid(interp) => interp.evaluate(point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array2;

    #[test]
    fn test_degree_codes() {
        assert_eq!(SplineDegree::try_from(0_usize).unwrap(), SplineDegree::Constant);
        assert_eq!(SplineDegree::try_from(1_usize).unwrap(), SplineDegree::Linear);
        assert!(SplineDegree::try_from(3_usize).unwrap_err().is_value());
    }

    #[test]
    fn test_extrapolation_codes() {
        assert_eq!(Extrapolation::from_code(0).unwrap(), Extrapolation::Extrapolate);
        assert_eq!(Extrapolation::from_code(1).unwrap(), Extrapolation::Fill);
        assert!(Extrapolation::from_code(3).unwrap_err().is_value());
        assert!(Extrapolation::from_code(-1).is_err());
        assert_eq!(Extrapolation::Fill.code(), 1);
    }

    #[test]
    fn test_single_extended_axis_is_univariate() {
        let grid = UniformGrid::from_delta(vec![1, 5], vec![2.0, 0.0], vec![0.0, 1.0]).unwrap();
        let values = Array2::from_shape_fn((1, 5), |(_, j)| j as f64).into_dyn();
        let interp = Interpolant::build(&grid, values.view(), SplineDegree::Linear).unwrap();
        assert!(interp.is_univariate());
        assert_relative_eq!(
            interp.evaluate(&[2.0, 2.5], Extrapolation::Fill).unwrap(),
            2.5,
            epsilon = 1e-12
        );
        // Off the flat axis the point is outside the sampled region.
        assert_eq!(interp.evaluate(&[3.0, 2.5], Extrapolation::Fill).unwrap(), FILL_VALUE);
        assert_relative_eq!(
            interp.evaluate(&[3.0, 2.5], Extrapolation::Extrapolate).unwrap(),
            2.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_two_extended_axes_use_regular_grid() {
        let grid = UniformGrid::from_bounds(vec![4, 4], vec![0.0, 0.0], vec![3.0, 3.0]).unwrap();
        let values = Array2::from_shape_fn((4, 4), |(i, j)| (i + j) as f64).into_dyn();
        let interp = Interpolant::build(&grid, values.view(), SplineDegree::Linear).unwrap();
        assert!(!interp.is_univariate());
        assert_eq!(interp.degree(), SplineDegree::Linear);
        assert_relative_eq!(
            interp.evaluate(&[1.5, 1.0], Extrapolation::Fill).unwrap(),
            2.5,
            epsilon = 1e-12
        );
        assert_eq!(interp.evaluate(&[3.5, 1.0], Extrapolation::Fill).unwrap(), 0.0);
        assert_relative_eq!(
            interp.evaluate(&[3.5, 1.0], Extrapolation::Extrapolate).unwrap(),
            4.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_constant_degree_only_applies_to_one_axis() {
        let grid = UniformGrid::from_bounds(vec![3, 3], vec![0.0, 0.0], vec![2.0, 2.0]).unwrap();
        let values = Array2::from_shape_fn((3, 3), |(i, j)| (i * j) as f64).into_dyn();
        let interp = Interpolant::build(&grid, values.view(), SplineDegree::Constant).unwrap();
        assert_eq!(interp.degree(), SplineDegree::Linear);
        assert_relative_eq!(
            interp.evaluate(&[0.6, 1.4], Extrapolation::Extrapolate).unwrap(),
            0.84,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_wrong_point_arity() {
        let grid = UniformGrid::from_delta(vec![1, 5], vec![2.0, 0.0], vec![0.0, 1.0]).unwrap();
        let values = Array2::from_shape_fn((1, 5), |(_, j)| j as f64).into_dyn();
        let interp = Interpolant::build(&grid, values.view(), SplineDegree::Linear).unwrap();
        assert!(interp.evaluate(&[2.0], Extrapolation::Extrapolate).unwrap_err().is_value());
        assert!(interp
            .evaluate(&[2.0, 1.0, 0.0], Extrapolation::Fill)
            .unwrap_err()
            .is_value());
    }

    #[test]
    fn test_shape_mismatch() {
        let grid = UniformGrid::from_bounds(vec![4, 4], vec![0.0, 0.0], vec![3.0, 3.0]).unwrap();
        let values = Array2::<f64>::zeros((4, 3)).into_dyn();
        assert!(Interpolant::build(&grid, values.view(), SplineDegree::Linear).is_err());
    }
}
