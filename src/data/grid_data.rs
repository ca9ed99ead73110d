//! Grid function container.

use std::any::Any;

use ndarray::{ArrayD, IxDyn};
use tracing::debug;

use super::array::DataArray;
use crate::error::{GridError, Result};
use crate::grid::{CoordinateLayout, GridConfig, UniformGrid};
use crate::interp::Interpolant;

/// Values of a function sampled on every point of a [`UniformGrid`].
///
/// The container owns both its grid and its samples. Interpolants are built
/// on the first evaluation and dropped whenever the shape or the samples
/// change.
///
/// # Example
///
/// ```
/// use cartgrid_rs::data::UniformGridData;
/// use cartgrid_rs::grid::UniformGrid;
/// use ndarray::Array2;
///
/// let grid = UniformGrid::from_delta(vec![4, 3], vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
/// let data = UniformGridData::new(grid, Array2::<f64>::ones((4, 3))).unwrap();
/// assert_eq!(data.shape(), &[4, 3]);
/// assert!(!data.is_complex());
///
/// let grid = UniformGrid::from_delta(vec![4, 3], vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
/// assert!(UniformGridData::new(grid, Array2::<f64>::ones((3, 4))).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct UniformGridData {
    pub(super) grid: UniformGrid,
    pub(super) data: DataArray,
    pub(super) spline_real: Option<Interpolant>,
    pub(super) spline_imag: Option<Interpolant>,
    pub(super) invalid_spline: bool,
}

impl UniformGridData {
    /// Pair a grid with samples of the same shape.
    pub fn new(grid: UniformGrid, data: impl Into<DataArray>) -> Result<Self> {
        let data = data.into();
        if data.shape() != grid.shape() {
            return Err(GridError::value(format!(
                "data of shape {:?} does not match grid shape {:?}",
                data.shape(),
                grid.shape()
            )));
        }
        Ok(Self::from_parts_unchecked(grid, data))
    }

    /// Build the grid from `config` and attach `data`.
    ///
    /// An empty `config.shape` is filled in from the data.
    pub fn from_grid_structure(data: impl Into<DataArray>, mut config: GridConfig) -> Result<Self> {
        let data = data.into();
        if config.shape.is_empty() {
            config.shape = data.shape().to_vec();
        }
        Self::new(config.build()?, data)
    }

    pub(super) fn from_parts_unchecked(grid: UniformGrid, data: DataArray) -> Self {
        debug_assert_eq!(grid.shape(), data.shape());
        Self {
            grid,
            data,
            spline_real: None,
            spline_imag: None,
            invalid_spline: true,
        }
    }

    #[inline]
    pub fn grid(&self) -> &UniformGrid {
        &self.grid
    }

    #[inline]
    pub fn data(&self) -> &DataArray {
        &self.data
    }

    /// Real samples, `None` for complex data.
    pub fn data_real(&self) -> Option<&ArrayD<f64>> {
        self.data.as_real()
    }

    #[inline]
    pub fn is_complex(&self) -> bool {
        self.data.is_complex()
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.grid.shape()
    }

    #[inline]
    pub fn num_dimensions(&self) -> usize {
        self.grid.num_dimensions()
    }

    #[inline]
    pub fn num_extended_dimensions(&self) -> usize {
        self.grid.num_extended_dimensions()
    }

    /// Coordinates of the underlying grid.
    pub fn coordinates(&self, layout: CoordinateLayout) -> Vec<ArrayD<f64>> {
        self.grid.coordinates(layout)
    }

    /// Drop every axis with a single point, from the grid and from the data.
    pub fn flat_dimensions_remove(&mut self) {
        let flat: Vec<usize> = (0..self.num_dimensions())
            .filter(|&i| self.grid.shape()[i] == 1)
            .collect();
        self.grid.flat_dimensions_remove();
        let data = std::mem::replace(&mut self.data, DataArray::Real(ArrayD::zeros(IxDyn(&[0]))));
        self.data = data.remove_unit_axes(&flat);
        self.invalidate_spline();
    }

    /// Drop the ghost points from the grid and from the data.
    ///
    /// Flat axes keep their single sample.
    pub fn ghost_zones_remove(&mut self) -> Result<()> {
        let margin = self.grid.ghost_margin();
        self.grid.ghost_zones_remove()?;
        self.data = self.data.trim(&margin);
        self.invalidate_spline();
        Ok(())
    }

    /// Independent copy.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Take the grid and the samples out of the container.
    pub fn into_parts(self) -> (UniformGrid, DataArray) {
        (self.grid, self.data)
    }

    /// Compare against a value of any type; anything but grid data is unequal.
    pub fn eq_any(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<Self>().is_some_and(|o| self == o)
    }

    pub(super) fn invalidate_spline(&mut self) {
        if !self.invalid_spline {
            debug!("invalidating cached interpolants");
        }
        self.spline_real = None;
        self.spline_imag = None;
        self.invalid_spline = true;
    }
}

impl PartialEq for UniformGridData {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid && self.data == other.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3};
    use num_complex::Complex64;

    fn grid(shape: Vec<usize>) -> UniformGrid {
        let n = shape.len();
        UniformGrid::from_delta(shape, vec![0.0; n], vec![1.0; n]).unwrap()
    }

    #[test]
    fn test_shape_mismatch() {
        let err = UniformGridData::new(grid(vec![3, 3]), Array2::<f64>::zeros((3, 2)));
        assert!(err.unwrap_err().is_value());
    }

    #[test]
    fn test_from_grid_structure() {
        let data = Array2::<f64>::zeros((11, 15));
        let cfg = GridConfig::default()
            .with_x1(vec![11.0, 8.0])
            .with_num_ghost(vec![0, 0]);
        let cfg = GridConfig { x0: vec![1.0, 1.0], ..cfg };
        let d = UniformGridData::from_grid_structure(data, cfg).unwrap();
        assert_eq!(d.shape(), &[11, 15]);
        assert_eq!(d.grid().delta(), &[1.0, 0.5]);

        let bad = GridConfig::new(vec![11, 15], vec![1.0, 1.0]);
        assert!(UniformGridData::from_grid_structure(Array2::<f64>::zeros((11, 15)), bad).is_err());
    }

    #[test]
    fn test_flat_dimensions_remove() {
        let values = Array3::from_shape_fn((4, 1, 3), |(i, _, k)| (i * 3 + k) as f64);
        let mut d = UniformGridData::new(grid(vec![4, 1, 3]), values).unwrap();
        d.flat_dimensions_remove();
        assert_eq!(d.shape(), &[4, 3]);
        assert_eq!(d.data().shape(), &[4, 3]);
        assert_eq!(d.data_real().unwrap()[[2, 1]], 7.0);
        assert!(d.invalid_spline);
    }

    #[test]
    fn test_ghost_zones_remove() {
        let cfg = GridConfig::new(vec![6, 5], vec![0.0, 0.0])
            .with_delta(vec![1.0, 1.0])
            .with_num_ghost(vec![1, 2]);
        let values = Array2::from_shape_fn((6, 5), |(i, j)| (10 * i + j) as f64);
        let mut d = UniformGridData::from_grid_structure(values, cfg).unwrap();
        d.ghost_zones_remove().unwrap();
        assert_eq!(d.shape(), &[4, 1]);
        assert_eq!(d.data().shape(), &[4, 1]);
        assert_eq!(d.data_real().unwrap()[[0, 0]], 12.0);
        assert_eq!(d.grid().x0(), &[1.0, 2.0]);
    }

    #[test]
    fn test_ghost_zones_remove_with_flat_axis() {
        let cfg = GridConfig::new(vec![101, 101, 1], vec![0.0, 0.0, 0.0])
            .with_delta(vec![1.0, 1.0, 0.0])
            .with_num_ghost(vec![3, 3, 3]);
        let values = ndarray::Array3::from_shape_fn((101, 101, 1), |(i, j, _)| (i * j) as f64);
        let mut d = UniformGridData::from_grid_structure(values, cfg).unwrap();
        d.ghost_zones_remove().unwrap();
        assert_eq!(d.shape(), &[95, 95, 1]);
        assert_eq!(d.data().shape(), &[95, 95, 1]);
        assert_eq!(d.data_real().unwrap()[[0, 1, 0]], 12.0);
        assert_eq!(d.grid().num_ghost(), &[0, 0, 0]);
    }

    #[test]
    fn test_equality() {
        let a = UniformGridData::new(grid(vec![2]), ndarray::array![1.0, 2.0]).unwrap();
        let b = UniformGridData::new(
            grid(vec![2]),
            ndarray::array![Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)],
        )
        .unwrap();
        assert_eq!(a, b);
        assert!(a.eq_any(&b));
        assert!(!a.eq_any(&1.0_f64));
        assert!(!a.eq_any(&a.grid().clone()));

        let shifted = UniformGridData::new(
            UniformGrid::from_delta(vec![2], vec![1.0], vec![1.0]).unwrap(),
            ndarray::array![1.0, 2.0],
        )
        .unwrap();
        assert_ne!(a, shifted);
    }

    #[test]
    fn test_into_parts() {
        let d = UniformGridData::new(grid(vec![2]), ndarray::array![1.0, 2.0]).unwrap();
        let (g, data) = d.copy().into_parts();
        assert_eq!(&g, d.grid());
        assert_eq!(&data, d.data());
    }
}
