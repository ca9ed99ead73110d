//! # cartgrid-rs
//!
//! Scalar fields sampled on uniform Cartesian grids.
//!
//! This crate provides:
//! - Grid geometry in any number of dimensions (shape, bounds, spacing,
//!   ghost zones, simulation metadata)
//! - Real and complex grid data with element-wise arithmetic and reductions
//! - Interpolation at arbitrary points (piecewise constant or linear along
//!   one axis, multilinear on N-D grids) with extrapolation control
//! - Sampling of closures onto a grid

pub mod data;
pub mod error;
pub mod grid;
pub mod interp;
pub mod types;

// Re-export main types for convenience
pub use data::{
    BinaryOp, DataArray, GridScalar, Operand, UnaryOp, UniformGridData, sample_function,
    try_sample_function,
};
#[cfg(feature = "parallel")]
pub use data::sample_function_parallel;
pub use error::{GridError, Result};
pub use grid::{CoordinateLayout, GridConfig, UniformGrid, common_bounding_box};
pub use interp::{Extrapolation, Interpolant, SplineDegree};
pub use types::{BoundingBox, Scalar};
