//! Functions sampled on a uniform grid.
//!
//! [`UniformGridData`] pairs a [`UniformGrid`](crate::grid::UniformGrid) with
//! a [`DataArray`] of the same shape. On top of that it provides:
//!
//! - element-wise arithmetic with other data, scalars and arrays
//!   ([`UnaryOp`], [`BinaryOp`], [`Operand`])
//! - reductions (`min`, `max`, `sum`, `mean`, `integral`, norms)
//! - interpolation at arbitrary points through a cached [`Interpolant`](crate::interp::Interpolant)
//! - [`sample_function`] to build data from a closure
//!
//! # Example
//!
//! ```
//! use cartgrid_rs::data::sample_function;
//! use cartgrid_rs::interp::Extrapolation;
//!
//! let mut data = sample_function(|x: &[f64]| x[0] * x[1], &[0.0, 0.0], &[3.0, 3.0], &[101, 101])
//!     .unwrap();
//! let value = data.evaluate_with_spline(&[2.0, 2.0], Extrapolation::Extrapolate).unwrap();
//! assert!((value.re() - 4.0).abs() < 1e-10);
//!
//! let doubled = data.mul(2.0).unwrap();
//! assert!((doubled.max().unwrap() - 18.0).abs() < 1e-10);
//! ```

mod arithmetic;
mod array;
mod grid_data;
mod reductions;
mod sample;
mod spline;

pub use arithmetic::{BinaryOp, Operand, UnaryOp};
pub use array::{DataArray, GridScalar};
pub use grid_data::UniformGridData;
pub use sample::{sample_function, try_sample_function};

#[cfg(feature = "parallel")]
pub use sample::sample_function_parallel;
