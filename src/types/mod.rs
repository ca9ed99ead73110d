//! Small value types shared by the grid and data modules.
//!
//! # Example
//!
//! ```
//! use cartgrid_rs::types::{BoundingBox, Scalar};
//!
//! let bbox = BoundingBox::new(vec![0.0, 0.0], vec![1.0, 2.0]).unwrap();
//! assert_eq!(bbox.extent(1), 2.0);
//!
//! let s = Scalar::Real(1.5);
//! assert_eq!(s.re(), 1.5);
//! ```

mod bounds;
mod scalar;

pub use bounds::BoundingBox;
pub use scalar::Scalar;
