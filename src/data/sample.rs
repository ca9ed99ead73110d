//! Build grid data by evaluating a function on every grid point.

use ndarray::{indices, ArrayD, IxDyn};

#[cfg(feature = "parallel")]
use ndarray::Zip;

use super::array::GridScalar;
use super::grid_data::UniformGridData;
use crate::error::{GridError, Result};
use crate::grid::UniformGrid;

/// Sample `f` on the uniform grid with `shape` points from `x0` to `x1`.
///
/// `f` receives the coordinates of one point and returns a real or complex
/// value. Panics inside `f` propagate.
///
/// # Example
///
/// ```
/// use cartgrid_rs::data::sample_function;
///
/// let data = sample_function(|x: &[f64]| x[0].sin(), &[0.0], &[2.0 * std::f64::consts::PI], &[100])
///     .unwrap();
/// assert_eq!(data.shape(), &[100]);
/// assert!(data.max().unwrap() <= 1.0);
/// ```
pub fn sample_function<T, F>(f: F, x0: &[f64], x1: &[f64], shape: &[usize]) -> Result<UniformGridData>
where
    T: GridScalar,
    F: Fn(&[f64]) -> T,
{
    try_sample_function::<T, GridError, _>(|x| Ok(f(x)), x0, x1, shape)
}

/// Like [`sample_function`], for fallible functions.
///
/// Sampling stops at the first error, which is returned unchanged.
pub fn try_sample_function<T, E, F>(
    f: F,
    x0: &[f64],
    x1: &[f64],
    shape: &[usize],
) -> std::result::Result<UniformGridData, E>
where
    T: GridScalar,
    E: From<GridError>,
    F: Fn(&[f64]) -> std::result::Result<T, E>,
{
    let grid = UniformGrid::from_bounds(shape, x0, x1)?;
    let axes = grid.coordinates_1d();

    let mut point = vec![0.0; grid.num_dimensions()];
    let mut values = Vec::with_capacity(grid.num_points());
    for idx in indices(IxDyn(grid.shape())) {
        for (axis, p) in point.iter_mut().enumerate() {
            *p = axes[axis][idx[axis]];
        }
        values.push(f(&point)?);
    }

    let array = ArrayD::from_shape_vec(IxDyn(grid.shape()), values)
        .map_err(|e| GridError::value(format!("sampled values do not fit the grid: {}", e)))?;
    Ok(UniformGridData::new(grid, T::into_data(array))?)
}

/// Like [`sample_function`], evaluating `f` on all points in parallel.
#[cfg(feature = "parallel")]
pub fn sample_function_parallel<T, F>(
    f: F,
    x0: &[f64],
    x1: &[f64],
    shape: &[usize],
) -> Result<UniformGridData>
where
    T: GridScalar,
    F: Fn(&[f64]) -> T + Sync,
{
    let grid = UniformGrid::from_bounds(shape, x0, x1)?;
    let axes = grid.coordinates_1d();

    let mut array = ArrayD::from_elem(IxDyn(grid.shape()), T::zero());
    Zip::indexed(&mut array).par_for_each(|idx, value| {
        let point: Vec<f64> = (0..axes.len()).map(|axis| axes[axis][idx[axis]]).collect();
        *value = f(&point);
    });
    UniformGridData::new(grid, T::into_data(array))
}
