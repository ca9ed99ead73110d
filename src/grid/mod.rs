//! Uniform grid geometry.
//!
//! - [`GridConfig`]: unvalidated construction parameters
//! - [`UniformGrid`]: validated geometry (shape, bounds, spacing, metadata)
//! - [`CoordinateLayout`]: layouts for coordinate arrays
//! - [`common_bounding_box`]: enclosing box of several grids

mod bounding_box;
mod config;
mod coordinates;
mod uniform_grid;

pub use bounding_box::common_bounding_box;
pub use config::{GridConfig, UNSET_INDEX};
pub use coordinates::CoordinateLayout;
pub use uniform_grid::{GRID_ATOL, GRID_RTOL, UniformGrid};
