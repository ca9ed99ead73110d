//! Bounding box shared by several grids.

use super::uniform_grid::UniformGrid;
use crate::error::{GridError, Result};

/// Smallest box containing all the given grids.
///
/// Returns `(lower, upper)` with the element-wise minimum of the origins and
/// the element-wise maximum of the upper bounds. All grids must have the
/// same number of dimensions, and at least one grid is required.
///
/// # Example
///
/// ```
/// use cartgrid_rs::grid::{common_bounding_box, UniformGrid};
///
/// let a = UniformGrid::from_bounds(vec![11, 11], vec![0.0, 0.0], vec![5.0, 5.0]).unwrap();
/// let b = UniformGrid::from_bounds(vec![11, 11], vec![0.0, -2.0], vec![1.0, 5.0]).unwrap();
///
/// let (lower, upper) = common_bounding_box([&a, &b]).unwrap();
/// assert_eq!(lower, vec![0.0, -2.0]);
/// assert_eq!(upper, vec![5.0, 5.0]);
/// ```
pub fn common_bounding_box<'a, I>(grids: I) -> Result<(Vec<f64>, Vec<f64>)>
where
    I: IntoIterator<Item = &'a UniformGrid>,
{
    let mut grids = grids.into_iter();
    let first = grids
        .next()
        .ok_or_else(|| GridError::value("no grids given for the bounding box"))?;

    let mut bbox = first.bounding_box();
    for grid in grids {
        if grid.num_dimensions() != bbox.num_dimensions() {
            return Err(GridError::value(format!(
                "grids have different dimensions ({} and {})",
                bbox.num_dimensions(),
                grid.num_dimensions()
            )));
        }
        bbox = bbox.union(&grid.bounding_box())?;
    }
    Ok(bbox.into_corners())
}
