//! Geometry of a uniform Cartesian grid.
//!
//! A grid is described per axis by the number of points, the coordinate of
//! the first point and the spacing. Axes with a single point are *flat*:
//! their spacing is zero and they do not contribute to volumes.

use std::fmt;

use tracing::debug;

use super::config::GridConfig;
use crate::error::{GridError, Result};
use crate::types::BoundingBox;

/// Relative tolerance used when comparing grid coordinates.
pub const GRID_RTOL: f64 = 1e-5;
/// Absolute tolerance used when comparing grid coordinates.
pub const GRID_ATOL: f64 = 1e-8;

/// Whether `a` and `b` agree within [`GRID_RTOL`] / [`GRID_ATOL`].
///
/// The relative part scales with the larger magnitude, so the test is
/// symmetric in its arguments.
#[inline]
pub(crate) fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= GRID_ATOL + GRID_RTOL * a.abs().max(b.abs())
}

/// Element-wise [`is_close`] over two slices of equal length.
pub(crate) fn all_close(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| is_close(x, y))
}

/// Uniform Cartesian grid in any number of dimensions.
///
/// Points along axis `i` sit at `x0[i] + k * delta[i]` for
/// `k = 0..shape[i]`, ghost points included.
///
/// Equality compares shape, origin, spacing, ghost zones, time and
/// iteration. Refinement level and component are bookkeeping only and are
/// ignored.
///
/// # Example
///
/// ```
/// use cartgrid_rs::grid::UniformGrid;
///
/// let grid = UniformGrid::from_delta(vec![101, 101], vec![1.0, 1.0], vec![1.0, 0.5]).unwrap();
/// assert_eq!(grid.x1(), &[101.0, 51.0]);
/// assert!(grid.contains(&[50.0, 50.0]));
/// assert_eq!(grid.dv(), 0.5);
/// ```
#[derive(Clone, Debug)]
pub struct UniformGrid {
    shape: Vec<usize>,
    x0: Vec<f64>,
    x1: Vec<f64>,
    delta: Vec<f64>,
    num_ghost: Vec<usize>,
    time: Option<f64>,
    iteration: Option<i64>,
    ref_level: i32,
    component: i32,
}

impl UniformGrid {
    /// Build a grid from the spacing.
    pub fn from_delta(
        shape: impl Into<Vec<usize>>,
        x0: impl Into<Vec<f64>>,
        delta: impl Into<Vec<f64>>,
    ) -> Result<Self> {
        GridConfig::new(shape, x0).with_delta(delta).build()
    }

    /// Build a grid from the coordinates of the first and last points.
    pub fn from_bounds(
        shape: impl Into<Vec<usize>>,
        x0: impl Into<Vec<f64>>,
        x1: impl Into<Vec<f64>>,
    ) -> Result<Self> {
        GridConfig::new(shape, x0).with_x1(x1).build()
    }

    /// Validate a [`GridConfig`] and resolve spacing and upper bound.
    pub fn from_config(config: GridConfig) -> Result<Self> {
        let GridConfig {
            shape,
            x0,
            x1,
            delta,
            num_ghost,
            time,
            iteration,
            ref_level,
            component,
        } = config;

        let ndim = shape.len();
        check_len("x0", x0.len(), ndim)?;
        if let Some(axis) = shape.iter().position(|&n| n == 0) {
            return Err(GridError::value(format!(
                "shape must be positive, axis {} has no points",
                axis
            )));
        }

        let num_ghost = match num_ghost {
            Some(ng) => {
                check_len("num_ghost", ng.len(), ndim)?;
                ng
            }
            None => vec![0; ndim],
        };

        let (delta, x1) = match (delta, x1) {
            (None, None) => {
                return Err(GridError::value("either delta or x1 must be provided"));
            }
            (Some(delta), x1) => {
                check_len("delta", delta.len(), ndim)?;
                let delta = resolve_spacing(&shape, delta)?;
                let computed = upper_bound(&shape, &x0, &delta);
                match x1 {
                    Some(x1) => {
                        check_len("x1", x1.len(), ndim)?;
                        let compatible = (0..ndim)
                            .filter(|&i| shape[i] > 1)
                            .all(|i| is_close(x1[i], computed[i]));
                        if !compatible {
                            return Err(GridError::value(format!(
                                "x1 {:?} is incompatible with x0 {:?}, delta {:?} and shape {:?}",
                                x1, x0, delta, shape
                            )));
                        }
                        (delta, keep_extended(&shape, x1, computed))
                    }
                    None => (delta, computed),
                }
            }
            (None, Some(x1)) => {
                check_len("x1", x1.len(), ndim)?;
                let delta: Vec<f64> = (0..ndim)
                    .map(|i| {
                        if shape[i] > 1 {
                            (x1[i] - x0[i]) / (shape[i] - 1) as f64
                        } else {
                            0.0
                        }
                    })
                    .collect();
                let delta = resolve_spacing(&shape, delta)?;
                let computed = upper_bound(&shape, &x0, &delta);
                (delta, keep_extended(&shape, x1, computed))
            }
        };

        Ok(Self {
            shape,
            x0,
            x1,
            delta,
            num_ghost,
            time,
            iteration,
            ref_level,
            component,
        })
    }

    /// Number of points per axis.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Coordinate of the first point.
    #[inline]
    pub fn x0(&self) -> &[f64] {
        &self.x0
    }

    /// Alias for [`x0`](Self::x0).
    #[inline]
    pub fn origin(&self) -> &[f64] {
        &self.x0
    }

    /// Coordinate of the last point.
    #[inline]
    pub fn x1(&self) -> &[f64] {
        &self.x1
    }

    /// Spacing along each axis.
    #[inline]
    pub fn delta(&self) -> &[f64] {
        &self.delta
    }

    /// Alias for [`delta`](Self::delta).
    #[inline]
    pub fn dx(&self) -> &[f64] {
        &self.delta
    }

    /// Ghost points on each side of each axis.
    #[inline]
    pub fn num_ghost(&self) -> &[usize] {
        &self.num_ghost
    }

    #[inline]
    pub fn time(&self) -> Option<f64> {
        self.time
    }

    #[inline]
    pub fn iteration(&self) -> Option<i64> {
        self.iteration
    }

    /// Refinement level, `-1` if unknown.
    #[inline]
    pub fn ref_level(&self) -> i32 {
        self.ref_level
    }

    /// Component number, `-1` if unknown.
    #[inline]
    pub fn component(&self) -> i32 {
        self.component
    }

    #[inline]
    pub fn num_dimensions(&self) -> usize {
        self.shape.len()
    }

    /// Mask of the axes with more than one point.
    pub fn extended_dimensions(&self) -> Vec<bool> {
        self.shape.iter().map(|&n| n > 1).collect()
    }

    /// Number of axes with more than one point.
    pub fn num_extended_dimensions(&self) -> usize {
        self.shape.iter().filter(|&&n| n > 1).count()
    }

    /// Total number of points.
    pub fn num_points(&self) -> usize {
        self.shape.iter().product()
    }

    /// Volume of one cell, with flat axes contributing a factor one.
    pub fn dv(&self) -> f64 {
        self.shape
            .iter()
            .zip(&self.delta)
            .filter(|(&n, _)| n > 1)
            .map(|(_, &d)| d)
            .product()
    }

    /// Volume covered by the grid, counting one cell of size [`dv`](Self::dv)
    /// per point along the extended axes.
    pub fn volume(&self) -> f64 {
        let cells: f64 = self
            .shape
            .iter()
            .filter(|&&n| n > 1)
            .map(|&n| n as f64)
            .product();
        self.dv() * cells
    }

    /// Lower corner of the cell around the first point.
    pub fn lowest_vertex(&self) -> Vec<f64> {
        self.x0
            .iter()
            .zip(&self.delta)
            .map(|(x, d)| x - 0.5 * d)
            .collect()
    }

    /// Upper corner of the cell around the last point.
    pub fn highest_vertex(&self) -> Vec<f64> {
        self.x1
            .iter()
            .zip(&self.delta)
            .map(|(x, d)| x + 0.5 * d)
            .collect()
    }

    /// Box spanned by the first and last points.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new_unchecked(self.x0.clone(), self.x1.clone())
    }

    /// Check whether `point` lies within `[x0, x1]` on every axis.
    ///
    /// Points with the wrong number of coordinates are never contained.
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.num_dimensions()
            && point
                .iter()
                .zip(self.x0.iter().zip(&self.x1))
                .all(|(&p, (&lo, &hi))| p >= lo && p <= hi)
    }

    /// Coordinate of the point at `index` along `axis`.
    #[inline]
    pub fn axis_coordinate(&self, axis: usize, index: usize) -> f64 {
        self.x0[axis] + index as f64 * self.delta[axis]
    }

    /// Coordinates of the point with the given multi-index.
    pub fn point_at(&self, index: &[usize]) -> Result<Vec<f64>> {
        if index.len() != self.num_dimensions() {
            return Err(GridError::value(format!(
                "expected an index with {} components, got {}",
                self.num_dimensions(),
                index.len()
            )));
        }
        if let Some(axis) = (0..index.len()).find(|&i| index[i] >= self.shape[i]) {
            return Err(GridError::value(format!(
                "index {} out of range for axis {} with {} points",
                index[axis], axis, self.shape[axis]
            )));
        }
        Ok(index
            .iter()
            .enumerate()
            .map(|(axis, &k)| self.axis_coordinate(axis, k))
            .collect())
    }

    /// Drop every axis with a single point.
    pub fn flat_dimensions_remove(&mut self) {
        let keep = self.extended_dimensions();
        if keep.iter().all(|&k| k) {
            return;
        }
        debug!(shape = ?self.shape, "removing flat grid dimensions");
        retain_by_mask(&mut self.shape, &keep);
        retain_by_mask(&mut self.x0, &keep);
        retain_by_mask(&mut self.x1, &keep);
        retain_by_mask(&mut self.delta, &keep);
        retain_by_mask(&mut self.num_ghost, &keep);
    }

    /// Ghost points stripped per side by [`ghost_zones_remove`]: flat axes
    /// keep their single point.
    ///
    /// [`ghost_zones_remove`]: UniformGrid::ghost_zones_remove
    pub(crate) fn ghost_margin(&self) -> Vec<usize> {
        self.shape
            .iter()
            .zip(&self.num_ghost)
            .map(|(&n, &ng)| if n == 1 { 0 } else { ng })
            .collect()
    }

    /// Drop the ghost points, leaving only the interior.
    ///
    /// Flat axes are left as they are, with their ghost count reset to zero.
    /// Fails without modifying the grid if an extended axis has no interior
    /// point.
    pub fn ghost_zones_remove(&mut self) -> Result<()> {
        let margin = self.ghost_margin();
        if let Some(axis) = (0..self.num_dimensions()).find(|&i| {
            self.shape[i] > 1 && 2 * margin[i] >= self.shape[i]
        }) {
            return Err(GridError::value(format!(
                "axis {} has {} points, not enough for {} ghost points per side",
                axis, self.shape[axis], self.num_ghost[axis]
            )));
        }
        debug!(num_ghost = ?self.num_ghost, "removing ghost zones");
        for (i, &ng) in margin.iter().enumerate() {
            self.shape[i] -= 2 * ng;
            self.x0[i] += ng as f64 * self.delta[i];
            self.x1[i] -= ng as f64 * self.delta[i];
            if self.shape[i] == 1 {
                self.delta[i] = 0.0;
                self.x1[i] = self.x0[i];
            }
            self.num_ghost[i] = 0;
        }
        Ok(())
    }

    /// Independent copy of the grid.
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

impl PartialEq for UniformGrid {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
            && all_close(&self.x0, &other.x0)
            && all_close(&self.delta, &other.delta)
            && self.num_ghost == other.num_ghost
            && self.time == other.time
            && self.iteration == other.iteration
    }
}

impl fmt::Display for UniformGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shape            = {}", join(&self.shape))?;
        writeln!(f, "Num ghost zones  = {}", join(&self.num_ghost))?;
        writeln!(f, "Ref level        = {}", self.ref_level)?;
        writeln!(f, "Component        = {}", self.component)?;
        writeln!(f, "x0               = {}", join(&self.x0))?;
        writeln!(f, "x1               = {}", join(&self.x1))?;
        writeln!(f, "Volume           = {}", self.volume())?;
        writeln!(f, "Delta            = {}", join(&self.delta))?;
        match self.time {
            Some(t) => writeln!(f, "Time             = {}", t)?,
            None => writeln!(f, "Time             = None")?,
        }
        match self.iteration {
            Some(it) => write!(f, "Iteration        = {}", it),
            None => write!(f, "Iteration        = None"),
        }
    }
}

fn join<T: fmt::Display>(values: &[T]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(" "))
}

fn check_len(name: &str, len: usize, ndim: usize) -> Result<()> {
    if len != ndim {
        return Err(GridError::value(format!(
            "{} has {} entries but shape has {}",
            name, len, ndim
        )));
    }
    Ok(())
}

/// Zero the spacing of flat axes and reject negative or non-finite spacings.
fn resolve_spacing(shape: &[usize], mut delta: Vec<f64>) -> Result<Vec<f64>> {
    for (i, d) in delta.iter_mut().enumerate() {
        if shape[i] == 1 {
            *d = 0.0;
        } else if !d.is_finite() || *d < 0.0 {
            return Err(GridError::value(format!(
                "spacing along axis {} must be finite and non-negative, got {}",
                i, d
            )));
        }
    }
    Ok(delta)
}

fn upper_bound(shape: &[usize], x0: &[f64], delta: &[f64]) -> Vec<f64> {
    (0..shape.len())
        .map(|i| x0[i] + delta[i] * (shape[i] - 1) as f64)
        .collect()
}

/// Take the supplied bound on extended axes and the computed one on flat axes.
fn keep_extended(shape: &[usize], supplied: Vec<f64>, computed: Vec<f64>) -> Vec<f64> {
    supplied
        .into_iter()
        .zip(computed)
        .zip(shape)
        .map(|((s, c), &n)| if n > 1 { s } else { c })
        .collect()
}

fn retain_by_mask<T>(values: &mut Vec<T>, keep: &[bool]) {
    let mut mask = keep.iter();
    values.retain(|_| *mask.next().unwrap_or(&false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn geom4() -> UniformGrid {
        GridConfig::new(vec![101, 101], vec![1.0, 1.0])
            .with_delta(vec![1.0, 0.5])
            .with_num_ghost(vec![3, 3])
            .with_time(1.0)
            .with_iteration(1)
            .build()
            .unwrap()
    }

    #[test]
    fn test_requires_delta_or_x1() {
        let err = UniformGrid::from_config(GridConfig::new(vec![101, 101], vec![1.0, 1.0]));
        assert!(err.unwrap_err().is_value());
    }

    #[test]
    fn test_mismatched_lengths() {
        assert!(UniformGrid::from_delta(vec![100, 200], vec![1.0, 2.0, 3.0], vec![1.0, 1.0])
            .unwrap_err()
            .is_value());
        assert!(UniformGrid::from_delta(vec![100, 200], vec![1.0, 2.0], vec![1.0])
            .unwrap_err()
            .is_value());
        assert!(GridConfig::new(vec![10, 10], vec![0.0, 0.0])
            .with_delta(vec![1.0, 1.0])
            .with_num_ghost(vec![1])
            .build()
            .unwrap_err()
            .is_value());
    }

    #[test]
    fn test_delta_from_x1() {
        let g = UniformGrid::from_bounds(vec![101, 101], vec![1.0, 1.0], vec![101.0, 51.0]).unwrap();
        assert_relative_eq!(g.delta()[0], 1.0);
        assert_relative_eq!(g.delta()[1], 0.5);
        assert_eq!(g.dx(), g.delta());
        assert_eq!(g.num_ghost(), &[0, 0]);
    }

    #[test]
    fn test_incompatible_x1_and_delta() {
        let res = GridConfig::new(vec![101, 51], vec![1.0, 1.0])
            .with_x1(vec![4.0, 4.0])
            .with_delta(vec![1.0, 1.0])
            .build();
        assert!(res.unwrap_err().is_value());

        let ok = GridConfig::new(vec![101, 51], vec![1.0, 1.0])
            .with_x1(vec![101.0, 26.0])
            .with_delta(vec![1.0, 0.5])
            .build();
        assert!(ok.is_ok());
    }

    #[test]
    fn test_rejects_zero_shape_and_negative_spacing() {
        assert!(UniformGrid::from_delta(vec![0], vec![0.0], vec![1.0]).is_err());
        assert!(UniformGrid::from_delta(vec![3], vec![0.0], vec![-1.0]).is_err());
        assert!(UniformGrid::from_bounds(vec![3], vec![1.0], vec![0.0]).is_err());
    }

    #[test]
    fn test_metadata_defaults() {
        let g = geom4();
        assert_eq!(g.ref_level(), -1);
        assert_eq!(g.component(), -1);
        assert_eq!(g.time(), Some(1.0));
        assert_eq!(g.iteration(), Some(1));
        assert_eq!(g.num_ghost(), &[3, 3]);
    }

    #[test]
    fn test_volume_elements() {
        let g = geom4();
        assert_eq!(g.num_dimensions(), 2);
        assert_relative_eq!(g.dv(), 0.5);
        assert_relative_eq!(g.volume(), 0.5 * 101.0 * 101.0);
    }

    #[test]
    fn test_all_flat_volume_is_one() {
        let g = UniformGrid::from_delta(vec![1, 1], vec![0.0, 2.0], vec![0.0, 0.0]).unwrap();
        assert_eq!(g.num_extended_dimensions(), 0);
        assert_eq!(g.dv(), 1.0);
        assert_eq!(g.volume(), 1.0);
    }

    #[test]
    fn test_flat_axis_normalization() {
        let a = UniformGrid::from_delta(vec![101, 101, 1], vec![1.0, 1.0, 0.0], vec![1.0, 0.5, 0.0])
            .unwrap();
        let b = UniformGrid::from_bounds(vec![101, 101, 1], vec![1.0, 1.0, 0.0], vec![101.0, 51.0, 1.0])
            .unwrap();
        assert_eq!(a.extended_dimensions(), vec![true, true, false]);
        assert_eq!(a.num_extended_dimensions(), 2);
        assert_eq!(b.delta()[2], 0.0);
        assert_eq!(b.x1()[2], 0.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_point_at() {
        let g = UniformGrid::from_delta(vec![11, 15], vec![1.0, 1.0], vec![1.0, 0.5]).unwrap();
        assert!(g.point_at(&[1]).unwrap_err().is_value());
        assert!(g.point_at(&[11, 0]).unwrap_err().is_value());
        assert_eq!(g.point_at(&[1, 3]).unwrap(), vec![2.0, 2.5]);
    }

    #[test]
    fn test_vertices() {
        let g = UniformGrid::from_delta(vec![3, 5], vec![0.0, 0.0], vec![1.0, 0.5]).unwrap();
        assert_eq!(g.lowest_vertex(), vec![-0.5, -0.25]);
        assert_eq!(g.highest_vertex(), vec![2.5, 2.25]);
    }

    #[test]
    fn test_ghost_zones_remove() {
        let mut g = geom4();
        g.ghost_zones_remove().unwrap();
        let expected = GridConfig::new(vec![95, 95], vec![4.0, 2.5])
            .with_delta(vec![1.0, 0.5])
            .with_time(1.0)
            .with_iteration(1)
            .build()
            .unwrap();
        assert_eq!(g, expected);
        assert_relative_eq!(g.x1()[0], 98.0);
        assert_relative_eq!(g.x1()[1], 49.5);

        let mut tiny = GridConfig::new(vec![4], vec![0.0])
            .with_delta(vec![1.0])
            .with_num_ghost(vec![2])
            .build()
            .unwrap();
        let before = tiny.clone();
        assert!(tiny.ghost_zones_remove().is_err());
        assert_eq!(tiny, before);
    }

    #[test]
    fn test_ghost_zones_remove_keeps_flat_axes() {
        let mut g = GridConfig::new(vec![101, 101, 1], vec![0.0, 0.0, 0.0])
            .with_delta(vec![1.0, 1.0, 0.0])
            .with_num_ghost(vec![3, 3, 3])
            .build()
            .unwrap();
        assert_eq!(g.ghost_margin(), vec![3, 3, 0]);
        g.ghost_zones_remove().unwrap();
        assert_eq!(g.shape(), &[95, 95, 1]);
        assert_eq!(g.num_ghost(), &[0, 0, 0]);
        assert_eq!(g.x0(), &[3.0, 3.0, 0.0]);
        assert_eq!(g.delta()[2], 0.0);
    }

    #[test]
    fn test_display_lists_ghost_zones() {
        let s = geom4().to_string();
        assert!(s.contains("Num ghost zones  = [3 3]"));
        assert!(s.contains("Shape            = [101 101]"));
        assert!(s.contains("Time             = 1"));
    }

    #[test]
    fn test_is_close() {
        assert!(is_close(1.0, 1.0 + 1e-9));
        assert!(!is_close(1.0, 1.001));
        // Symmetric around the larger magnitude.
        let (a, b) = (1e6, 1e6 + 10.00005);
        assert_eq!(is_close(a, b), is_close(b, a));
        assert!(is_close(a, b));
        assert!(all_close(&[0.0, 1.0], &[1e-9, 1.0]));
        assert!(!all_close(&[0.0], &[0.0, 1.0]));
    }
}
