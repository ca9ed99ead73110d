//! Dense real or complex sample arrays.

use std::borrow::Cow;

use ndarray::{Array, ArrayD, Axis, Dimension, IxDyn, Slice, Zip};
use num_complex::Complex64;

use crate::error::{GridError, Result};
use crate::types::Scalar;

/// Sample values of a grid function, real or complex.
///
/// The variant is the data type: [`DataArray::is_complex`] looks at it
/// rather than at a stored flag.
#[derive(Clone, Debug)]
pub enum DataArray {
    /// Real samples.
    Real(ArrayD<f64>),
    /// Complex samples.
    Complex(ArrayD<Complex64>),
}

impl DataArray {
    #[inline]
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Real(a) => a.shape(),
            Self::Complex(a) => a.shape(),
        }
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Real(a) => a.len(),
            Self::Complex(a) => a.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_complex(&self) -> bool {
        matches!(self, Self::Complex(_))
    }

    /// The real samples, if the data is real.
    pub fn as_real(&self) -> Option<&ArrayD<f64>> {
        match self {
            Self::Real(a) => Some(a),
            Self::Complex(_) => None,
        }
    }

    /// The complex samples, if the data is complex.
    pub fn as_complex(&self) -> Option<&ArrayD<Complex64>> {
        match self {
            Self::Real(_) => None,
            Self::Complex(a) => Some(a),
        }
    }

    /// Samples widened to complex numbers (borrowed when already complex).
    pub fn to_complex(&self) -> Cow<'_, ArrayD<Complex64>> {
        match self {
            Self::Real(a) => Cow::Owned(a.mapv(|x| Complex64::new(x, 0.0))),
            Self::Complex(a) => Cow::Borrowed(a),
        }
    }

    /// Real part of the samples (borrowed when already real).
    pub fn real_part(&self) -> Cow<'_, ArrayD<f64>> {
        match self {
            Self::Real(a) => Cow::Borrowed(a),
            Self::Complex(a) => Cow::Owned(a.mapv(|z| z.re)),
        }
    }

    /// Imaginary part of the samples, `None` for real data.
    pub fn imag_part(&self) -> Option<ArrayD<f64>> {
        self.as_complex().map(|a| a.mapv(|z| z.im))
    }

    /// Element at a multi-index.
    pub fn get(&self, index: &[usize]) -> Option<Scalar> {
        match self {
            Self::Real(a) => a.get(index).map(|&x| Scalar::Real(x)),
            Self::Complex(a) => a.get(index).map(|&z| Scalar::Complex(z)),
        }
    }

    /// Drop the given length-one axes.
    pub(crate) fn remove_unit_axes(self, axes: &[usize]) -> Self {
        fn strip<A>(mut array: ArrayD<A>, axes: &[usize]) -> ArrayD<A> {
            for &axis in axes.iter().rev() {
                array = array.remove_axis(Axis(axis));
            }
            array
        }
        match self {
            Self::Real(a) => Self::Real(strip(a, axes)),
            Self::Complex(a) => Self::Complex(strip(a, axes)),
        }
    }

    /// Keep `margin[i]..len - margin[i]` along every axis.
    pub(crate) fn trim(&self, margin: &[usize]) -> Self {
        fn cut<A: Clone>(array: &ArrayD<A>, margin: &[usize]) -> ArrayD<A> {
            array
                .slice_each_axis(|ax| {
                    let m = margin[ax.axis.index()];
                    Slice::from(m..ax.len - m)
                })
                .to_owned()
        }
        match self {
            Self::Real(a) => Self::Real(cut(a, margin)),
            Self::Complex(a) => Self::Complex(cut(a, margin)),
        }
    }
}

/// Element-wise equality; real samples equal complex ones with zero
/// imaginary part.
impl PartialEq for DataArray {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Real(a), Self::Real(b)) => a == b,
            (Self::Complex(a), Self::Complex(b)) => a == b,
            (a, b) => a.shape() == b.shape() && *a.to_complex() == *b.to_complex(),
        }
    }
}

impl<D: Dimension> From<Array<f64, D>> for DataArray {
    fn from(a: Array<f64, D>) -> Self {
        Self::Real(a.into_dyn())
    }
}

impl<D: Dimension> From<Array<Complex64, D>> for DataArray {
    fn from(a: Array<Complex64, D>) -> Self {
        Self::Complex(a.into_dyn())
    }
}

/// Element types a grid function can take.
pub trait GridScalar: Copy + Send + Sync + 'static {
    /// Additive identity.
    fn zero() -> Self;

    /// Wrap an array of this type.
    fn into_data(array: ArrayD<Self>) -> DataArray;
}

impl GridScalar for f64 {
    fn zero() -> Self {
        0.0
    }

    fn into_data(array: ArrayD<Self>) -> DataArray {
        DataArray::Real(array)
    }
}

impl GridScalar for Complex64 {
    fn zero() -> Self {
        Complex64::new(0.0, 0.0)
    }

    fn into_data(array: ArrayD<Self>) -> DataArray {
        DataArray::Complex(array)
    }
}

/// Apply `f(lhs, rhs)` element-wise, broadcasting `rhs` to the shape of `lhs`.
pub(crate) fn zip_broadcast<A, F>(lhs: &ArrayD<A>, rhs: &ArrayD<A>, f: F) -> Result<ArrayD<A>>
where
    A: Copy,
    F: Fn(A, A) -> A,
{
    let rhs = rhs.broadcast(lhs.raw_dim()).ok_or_else(|| {
        GridError::value(format!(
            "operand of shape {:?} cannot be broadcast to shape {:?}",
            rhs.shape(),
            lhs.shape()
        ))
    })?;
    let mut out = lhs.clone();
    Zip::from(&mut out).and(&rhs).for_each(|x, &y| *x = f(*x, y));
    Ok(out)
}

/// A zero-dimensional array holding `value`, which broadcasts to any shape.
pub(crate) fn scalar_array<A: Clone>(value: A) -> ArrayD<A> {
    ArrayD::from_elem(IxDyn(&[]), value)
}
