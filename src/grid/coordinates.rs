//! Coordinate arrays of a uniform grid.

use ndarray::{Array1, ArrayD, IxDyn};

use super::uniform_grid::UniformGrid;
use crate::error::{GridError, Result};

/// How [`UniformGrid::coordinates`] lays out the per-axis coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CoordinateLayout {
    /// One array per axis with shape `[1, .., shape[i], .., 1]`, ready to
    /// broadcast against data of the grid's shape.
    #[default]
    Broadcast,
    /// Dense arrays in Cartesian (`xy`) indexing: the first two axes are
    /// swapped with respect to the grid shape, as a plain `meshgrid(x, y)`
    /// would produce.
    Meshgrid,
    /// One 1-D array of length `shape[i]` per axis.
    Axes,
}

impl CoordinateLayout {
    /// Pick a layout from a pair of flags; setting both is an error.
    pub fn from_flags(as_meshgrid: bool, as_1d_arrays: bool) -> Result<Self> {
        match (as_meshgrid, as_1d_arrays) {
            (true, true) => Err(GridError::value(
                "cannot return coordinates both as meshgrid and as 1d arrays",
            )),
            (true, false) => Ok(Self::Meshgrid),
            (false, true) => Ok(Self::Axes),
            (false, false) => Ok(Self::Broadcast),
        }
    }
}

impl UniformGrid {
    /// Coordinate arrays, one per axis, in the requested layout.
    ///
    /// # Example
    ///
    /// ```
    /// use cartgrid_rs::grid::{CoordinateLayout, UniformGrid};
    ///
    /// let grid = UniformGrid::from_delta(vec![3, 2], vec![0.0, 1.0], vec![1.0, 0.5]).unwrap();
    /// let c = grid.coordinates(CoordinateLayout::Broadcast);
    /// assert_eq!(c[0].shape(), &[3, 1]);
    /// assert_eq!(c[1].shape(), &[1, 2]);
    /// assert_eq!(c[1][[0, 1]], 1.5);
    /// ```
    pub fn coordinates(&self, layout: CoordinateLayout) -> Vec<ArrayD<f64>> {
        match layout {
            CoordinateLayout::Broadcast => self.broadcast_coordinates(),
            CoordinateLayout::Meshgrid => self.meshgrid_coordinates(),
            CoordinateLayout::Axes => self
                .coordinates_1d()
                .into_iter()
                .map(|c| c.into_dyn())
                .collect(),
        }
    }

    /// Coordinates along each axis as plain 1-D arrays.
    pub fn coordinates_1d(&self) -> Vec<Array1<f64>> {
        (0..self.num_dimensions())
            .map(|axis| Array1::from_shape_fn(self.shape()[axis], |k| self.axis_coordinate(axis, k)))
            .collect()
    }

    fn broadcast_coordinates(&self) -> Vec<ArrayD<f64>> {
        let ndim = self.num_dimensions();
        (0..ndim)
            .map(|axis| {
                let mut shape = vec![1; ndim];
                shape[axis] = self.shape()[axis];
                ArrayD::from_shape_fn(IxDyn(&shape), |idx| self.axis_coordinate(axis, idx[axis]))
            })
            .collect()
    }

    fn meshgrid_coordinates(&self) -> Vec<ArrayD<f64>> {
        let ndim = self.num_dimensions();
        // Position of each grid axis inside the mesh arrays.
        let position = |axis: usize| match (ndim >= 2, axis) {
            (true, 0) => 1,
            (true, 1) => 0,
            _ => axis,
        };
        let mut mesh_shape = self.shape().to_vec();
        if ndim >= 2 {
            mesh_shape.swap(0, 1);
        }
        (0..ndim)
            .map(|axis| {
                let pos = position(axis);
                ArrayD::from_shape_fn(IxDyn(&mesh_shape), |idx| self.axis_coordinate(axis, idx[pos]))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> UniformGrid {
        UniformGrid::from_delta(vec![11, 15], vec![1.0, 1.0], vec![1.0, 0.5]).unwrap()
    }

    #[test]
    fn test_from_flags() {
        assert!(CoordinateLayout::from_flags(true, true).unwrap_err().is_value());
        assert_eq!(CoordinateLayout::from_flags(false, false).unwrap(), CoordinateLayout::Broadcast);
        assert_eq!(CoordinateLayout::from_flags(true, false).unwrap(), CoordinateLayout::Meshgrid);
        assert_eq!(CoordinateLayout::from_flags(false, true).unwrap(), CoordinateLayout::Axes);
    }

    #[test]
    fn test_meshgrid_uses_cartesian_indexing() {
        let c = grid().coordinates(CoordinateLayout::Meshgrid);
        assert_eq!(c[0].shape(), &[15, 11]);
        assert_eq!(c[1].shape(), &[15, 11]);
        // X varies along columns, Y along rows.
        assert_eq!(c[0][[0, 3]], 4.0);
        assert_eq!(c[0][[7, 3]], 4.0);
        assert_eq!(c[1][[2, 0]], 2.0);
        assert_eq!(c[1][[2, 9]], 2.0);
    }

    #[test]
    fn test_three_dimensional_meshgrid() {
        let g = UniformGrid::from_delta(vec![2, 3, 4], vec![0.0; 3], vec![1.0; 3]).unwrap();
        let c = g.coordinates(CoordinateLayout::Meshgrid);
        assert_eq!(c[2].shape(), &[3, 2, 4]);
        assert_eq!(c[0][[2, 1, 3]], 1.0);
        assert_eq!(c[1][[2, 1, 3]], 2.0);
        assert_eq!(c[2][[2, 1, 3]], 3.0);
    }

    #[test]
    fn test_axes_layout() {
        let c = grid().coordinates(CoordinateLayout::Axes);
        assert_eq!(c[0].ndim(), 1);
        assert_eq!(c[0].len(), 11);
        assert_eq!(c[1].len(), 15);
        assert_eq!(c[1][[14]], 8.0);
    }
}
