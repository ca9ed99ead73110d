//! Construction parameters for uniform grids.

use ndarray::{ArrayView, Dimension};

use super::uniform_grid::UniformGrid;
use crate::error::{GridError, Result};

/// Default refinement level / component id when none is known.
pub const UNSET_INDEX: i32 = -1;

/// Parameters describing a uniform grid before validation.
///
/// `shape` and `x0` are required, as is one of `delta` or `x1`; everything
/// else has a default. Nothing is checked until [`GridConfig::build`].
///
/// # Example
///
/// ```
/// use cartgrid_rs::grid::GridConfig;
///
/// let grid = GridConfig::new(vec![101, 101], vec![1.0, 1.0])
///     .with_x1(vec![101.0, 51.0])
///     .with_num_ghost(vec![3, 3])
///     .with_time(1.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(grid.delta(), &[1.0, 0.5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Number of points per axis, ghost zones included
    pub shape: Vec<usize>,
    /// Coordinate of the first point
    pub x0: Vec<f64>,
    /// Coordinate of the last point
    pub x1: Option<Vec<f64>>,
    /// Spacing between points
    pub delta: Option<Vec<f64>>,
    /// Ghost points per side (zeros if absent)
    pub num_ghost: Option<Vec<usize>>,
    /// Simulation time
    pub time: Option<f64>,
    /// Simulation iteration
    pub iteration: Option<i64>,
    /// Mesh refinement level
    pub ref_level: i32,
    /// Component (patch) number
    pub component: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            shape: Vec::new(),
            x0: Vec::new(),
            x1: None,
            delta: None,
            num_ghost: None,
            time: None,
            iteration: None,
            ref_level: UNSET_INDEX,
            component: UNSET_INDEX,
        }
    }
}

impl GridConfig {
    /// Start a configuration from the shape and the origin.
    pub fn new(shape: impl Into<Vec<usize>>, x0: impl Into<Vec<f64>>) -> Self {
        Self {
            shape: shape.into(),
            x0: x0.into(),
            ..Self::default()
        }
    }

    /// Start a configuration from raw arrays as handed over by file readers.
    ///
    /// Both arrays must be one-dimensional.
    pub fn from_arrays<D1, D2>(shape: ArrayView<usize, D1>, x0: ArrayView<f64, D2>) -> Result<Self>
    where
        D1: Dimension,
        D2: Dimension,
    {
        if shape.ndim() != 1 {
            return Err(GridError::value(format!(
                "shape must be a one-dimensional array, got {} dimensions",
                shape.ndim()
            )));
        }
        if x0.ndim() != 1 {
            return Err(GridError::value(format!(
                "x0 must be a one-dimensional array, got {} dimensions",
                x0.ndim()
            )));
        }
        Ok(Self::new(
            shape.iter().copied().collect::<Vec<_>>(),
            x0.iter().copied().collect::<Vec<_>>(),
        ))
    }

    /// Set the coordinate of the last point.
    pub fn with_x1(mut self, x1: impl Into<Vec<f64>>) -> Self {
        self.x1 = Some(x1.into());
        self
    }

    /// Set the spacing.
    pub fn with_delta(mut self, delta: impl Into<Vec<f64>>) -> Self {
        self.delta = Some(delta.into());
        self
    }

    /// Set the number of ghost points per side.
    pub fn with_num_ghost(mut self, num_ghost: impl Into<Vec<usize>>) -> Self {
        self.num_ghost = Some(num_ghost.into());
        self
    }

    /// Set the simulation time.
    pub fn with_time(mut self, time: f64) -> Self {
        self.time = Some(time);
        self
    }

    /// Set the simulation iteration.
    pub fn with_iteration(mut self, iteration: i64) -> Self {
        self.iteration = Some(iteration);
        self
    }

    /// Set the refinement level.
    pub fn with_ref_level(mut self, ref_level: i32) -> Self {
        self.ref_level = ref_level;
        self
    }

    /// Set the component number.
    pub fn with_component(mut self, component: i32) -> Self {
        self.component = component;
        self
    }

    /// Validate the parameters and build the grid.
    pub fn build(self) -> Result<UniformGrid> {
        UniformGrid::from_config(self)
    }
}
