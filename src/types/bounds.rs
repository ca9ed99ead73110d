//! Axis-aligned bounding boxes of arbitrary dimension.

use std::fmt;

use crate::error::{GridError, Result};

/// Axis-aligned box `[lower[i], upper[i]]` in N dimensions.
///
/// Degenerate extents (`lower[i] == upper[i]`) are allowed, since flat grid
/// axes produce them.
///
/// # Example
///
/// ```
/// use cartgrid_rs::types::BoundingBox;
///
/// let bbox = BoundingBox::new(vec![0.0, -2.0], vec![5.0, 5.0]).unwrap();
///
/// assert_eq!(bbox.num_dimensions(), 2);
/// assert_eq!(bbox.extent(1), 7.0);
/// assert!(bbox.contains(&[1.0, 0.0]));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl BoundingBox {
    /// Create a new bounding box.
    ///
    /// Fails if the corners have different lengths or if `upper[i] < lower[i]`
    /// on any axis.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(GridError::value(format!(
                "lower and upper corners have different dimensions ({} vs {})",
                lower.len(),
                upper.len()
            )));
        }
        if let Some(axis) = (0..lower.len()).find(|&i| upper[i] < lower[i]) {
            return Err(GridError::value(format!(
                "upper bound {} is below lower bound {} along axis {}",
                upper[axis], lower[axis], axis
            )));
        }
        Ok(Self { lower, upper })
    }

    /// Create a bounding box without checking the corners.
    ///
    /// Caller must ensure both corners have the same length.
    pub(crate) fn new_unchecked(lower: Vec<f64>, upper: Vec<f64>) -> Self {
        debug_assert_eq!(lower.len(), upper.len());
        Self { lower, upper }
    }

    /// Lower corner.
    #[inline]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper corner.
    #[inline]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Number of axes.
    #[inline]
    pub fn num_dimensions(&self) -> usize {
        self.lower.len()
    }

    /// Length of the box along `axis`.
    #[inline]
    pub fn extent(&self, axis: usize) -> f64 {
        self.upper[axis] - self.lower[axis]
    }

    /// Box center.
    pub fn center(&self) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(lo, hi)| (lo + hi) / 2.0)
            .collect()
    }

    /// Check if a point is inside the box (inclusive).
    ///
    /// Points of the wrong dimensionality are never inside.
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.lower.len()
            && point
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&p, (&lo, &hi))| p >= lo && p <= hi)
    }

    /// Smallest box enclosing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> Result<Self> {
        if self.num_dimensions() != other.num_dimensions() {
            return Err(GridError::value(format!(
                "cannot join boxes of dimension {} and {}",
                self.num_dimensions(),
                other.num_dimensions()
            )));
        }
        let lower = self
            .lower
            .iter()
            .zip(&other.lower)
            .map(|(a, b)| a.min(*b))
            .collect();
        let upper = self
            .upper
            .iter()
            .zip(&other.upper)
            .map(|(a, b)| a.max(*b))
            .collect();
        Ok(Self { lower, upper })
    }

    /// Return the corners as a tuple `(lower, upper)`.
    pub fn into_corners(self) -> (Vec<f64>, Vec<f64>) {
        (self.lower, self.upper)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (lo, hi)) in self.lower.iter().zip(&self.upper).enumerate() {
            if i > 0 {
                write!(f, " × ")?;
            }
            write!(f, "[{:.2}, {:.2}]", lo, hi)?;
        }
        Ok(())
    }
}
