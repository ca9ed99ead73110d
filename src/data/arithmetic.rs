//! Element-wise arithmetic on grid data.
//!
//! Every operation returns a new container on a copy of the grid. Binary
//! operations accept another container on an equal grid, a scalar, or an
//! array that broadcasts to the data shape. Mixing real and complex operands
//! yields complex data.

use std::borrow::Cow;

use ndarray::{Array, ArrayD, Dimension};
use num_complex::Complex64;

use super::array::{scalar_array, zip_broadcast, DataArray};
use super::grid_data::UniformGridData;
use crate::error::{GridError, Result};
use crate::types::Scalar;

// ============================================================================
// Operators
// ============================================================================

/// Element-wise function of one argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    /// Absolute value; the modulus for complex data, which gives real data.
    Abs,
    Sqrt,
    Exp,
    /// Natural logarithm
    Ln,
    Log10,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    /// Complex conjugate (identity on real data)
    Conj,
    /// Real part
    Real,
    /// Imaginary part (zero on real data)
    Imag,
}

impl UnaryOp {
    /// Every operator, in declaration order.
    pub const ALL: [UnaryOp; 18] = [
        Self::Neg,
        Self::Abs,
        Self::Sqrt,
        Self::Exp,
        Self::Ln,
        Self::Log10,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Sinh,
        Self::Cosh,
        Self::Tanh,
        Self::Conj,
        Self::Real,
        Self::Imag,
    ];

    fn apply_real(self, x: f64) -> f64 {
        match self {
            Self::Neg => -x,
            Self::Abs => x.abs(),
            Self::Sqrt => x.sqrt(),
            Self::Exp => x.exp(),
            Self::Ln => x.ln(),
            Self::Log10 => x.log10(),
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Asin => x.asin(),
            Self::Acos => x.acos(),
            Self::Atan => x.atan(),
            Self::Sinh => x.sinh(),
            Self::Cosh => x.cosh(),
            Self::Tanh => x.tanh(),
            Self::Conj | Self::Real => x,
            Self::Imag => 0.0,
        }
    }

    /// `None` for the operators that map complex numbers to reals.
    fn apply_complex(self, z: Complex64) -> Option<Complex64> {
        let out = match self {
            Self::Neg => -z,
            Self::Sqrt => z.sqrt(),
            Self::Exp => z.exp(),
            Self::Ln => z.ln(),
            Self::Log10 => z.log10(),
            Self::Sin => z.sin(),
            Self::Cos => z.cos(),
            Self::Tan => z.tan(),
            Self::Asin => z.asin(),
            Self::Acos => z.acos(),
            Self::Atan => z.atan(),
            Self::Sinh => z.sinh(),
            Self::Cosh => z.cosh(),
            Self::Tanh => z.tanh(),
            Self::Conj => z.conj(),
            Self::Abs | Self::Real | Self::Imag => return None,
        };
        Some(out)
    }

    fn complex_to_real(self, z: Complex64) -> f64 {
        match self {
            Self::Abs => z.norm(),
            Self::Imag => z.im,
            _ => z.re,
        }
    }
}

/// Element-wise function of two arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    #[inline]
    fn apply_real(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::Pow => a.powf(b),
        }
    }

    #[inline]
    fn apply_complex(self, a: Complex64, b: Complex64) -> Complex64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::Pow => a.powc(b),
        }
    }
}

// ============================================================================
// Operands
// ============================================================================

/// Right-hand side of a binary operation.
#[derive(Clone, Debug)]
pub enum Operand<'a> {
    /// Data on a grid, which must equal the grid of the other side.
    Data(&'a UniformGridData),
    /// A number applied to every sample.
    Scalar(Scalar),
    /// An array broadcast against the samples.
    Array(DataArray),
}

impl<'a> From<&'a UniformGridData> for Operand<'a> {
    fn from(data: &'a UniformGridData) -> Self {
        Self::Data(data)
    }
}

impl From<Scalar> for Operand<'_> {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<f64> for Operand<'_> {
    fn from(x: f64) -> Self {
        Self::Scalar(Scalar::Real(x))
    }
}

impl From<Complex64> for Operand<'_> {
    fn from(z: Complex64) -> Self {
        Self::Scalar(Scalar::Complex(z))
    }
}

impl From<DataArray> for Operand<'_> {
    fn from(a: DataArray) -> Self {
        Self::Array(a)
    }
}

impl<D: Dimension> From<Array<f64, D>> for Operand<'_> {
    fn from(a: Array<f64, D>) -> Self {
        Self::Array(a.into())
    }
}

impl<D: Dimension> From<Array<Complex64, D>> for Operand<'_> {
    fn from(a: Array<Complex64, D>) -> Self {
        Self::Array(a.into())
    }
}

// ============================================================================
// Operations
// ============================================================================

impl UniformGridData {
    /// Apply `op` to every sample.
    pub fn apply_unary(&self, op: UnaryOp) -> Self {
        let data = match &self.data {
            DataArray::Real(a) => DataArray::Real(a.mapv(|x| op.apply_real(x))),
            DataArray::Complex(a) => match op {
                UnaryOp::Abs | UnaryOp::Real | UnaryOp::Imag => {
                    DataArray::Real(a.mapv(|z| op.complex_to_real(z)))
                }
                _ => DataArray::Complex(a.mapv(|z| op.apply_complex(z).unwrap_or(z))),
            },
        };
        Self::from_parts_unchecked(self.grid.clone(), data)
    }

    /// Apply a real function to every sample. Complex data is a type error.
    pub fn map<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(f64) -> f64,
    {
        match &self.data {
            DataArray::Real(a) => Ok(Self::from_parts_unchecked(
                self.grid.clone(),
                DataArray::Real(a.mapv(f)),
            )),
            DataArray::Complex(_) => Err(GridError::type_error(
                "cannot apply a real function to complex data",
            )),
        }
    }

    /// Apply a complex function to every sample, promoting real data.
    pub fn map_complex<F>(&self, f: F) -> Self
    where
        F: Fn(Complex64) -> Complex64,
    {
        let data = DataArray::Complex(self.data.to_complex().mapv(f));
        Self::from_parts_unchecked(self.grid.clone(), data)
    }

    /// Compute `self op other`.
    pub fn apply_binary<'a>(&self, other: impl Into<Operand<'a>>, op: BinaryOp) -> Result<Self> {
        self.combine(other.into(), op, false)
    }

    /// Compute `other op self`.
    pub fn apply_binary_reflected<'a>(
        &self,
        other: impl Into<Operand<'a>>,
        op: BinaryOp,
    ) -> Result<Self> {
        self.combine(other.into(), op, true)
    }

    fn combine(&self, other: Operand<'_>, op: BinaryOp, reflected: bool) -> Result<Self> {
        let rhs: Cow<'_, DataArray> = match other {
            Operand::Data(o) => {
                if self.grid != o.grid {
                    return Err(GridError::value(
                        "cannot combine data defined on different grids",
                    ));
                }
                Cow::Borrowed(&o.data)
            }
            Operand::Scalar(Scalar::Real(x)) => Cow::Owned(DataArray::Real(scalar_array(x))),
            Operand::Scalar(Scalar::Complex(z)) => Cow::Owned(DataArray::Complex(scalar_array(z))),
            Operand::Array(a) => Cow::Owned(a),
        };

        let data = match (&self.data, &*rhs) {
            (DataArray::Real(a), DataArray::Real(b)) => {
                DataArray::Real(apply_ordered(a, b, reflected, |x, y| op.apply_real(x, y))?)
            }
            (lhs, rhs) => DataArray::Complex(apply_ordered(
                &*lhs.to_complex(),
                &*rhs.to_complex(),
                reflected,
                |x, y| op.apply_complex(x, y),
            )?),
        };
        Ok(Self::from_parts_unchecked(self.grid.clone(), data))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        self.apply_binary(other, BinaryOp::Add)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn sub<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        self.apply_binary(other, BinaryOp::Sub)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn mul<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        self.apply_binary(other, BinaryOp::Mul)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn div<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        self.apply_binary(other, BinaryOp::Div)
    }

    pub fn pow<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        self.apply_binary(other, BinaryOp::Pow)
    }

    pub fn radd<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        self.apply_binary_reflected(other, BinaryOp::Add)
    }

    pub fn rsub<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        self.apply_binary_reflected(other, BinaryOp::Sub)
    }

    pub fn rmul<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        self.apply_binary_reflected(other, BinaryOp::Mul)
    }

    pub fn rdiv<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        self.apply_binary_reflected(other, BinaryOp::Div)
    }

    pub fn rpow<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Self> {
        self.apply_binary_reflected(other, BinaryOp::Pow)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn neg(&self) -> Self {
        self.apply_unary(UnaryOp::Neg)
    }

    pub fn abs(&self) -> Self {
        self.apply_unary(UnaryOp::Abs)
    }

    pub fn sqrt(&self) -> Self {
        self.apply_unary(UnaryOp::Sqrt)
    }

    pub fn exp(&self) -> Self {
        self.apply_unary(UnaryOp::Exp)
    }

    pub fn ln(&self) -> Self {
        self.apply_unary(UnaryOp::Ln)
    }

    pub fn conj(&self) -> Self {
        self.apply_unary(UnaryOp::Conj)
    }

    /// Real part of the samples.
    pub fn real(&self) -> Self {
        self.apply_unary(UnaryOp::Real)
    }

    /// Imaginary part of the samples.
    pub fn imag(&self) -> Self {
        self.apply_unary(UnaryOp::Imag)
    }
}

/// `f(samples, rhs)`, or `f(rhs, samples)` when `reflected`.
fn apply_ordered<A, F>(samples: &ArrayD<A>, rhs: &ArrayD<A>, reflected: bool, f: F) -> Result<ArrayD<A>>
where
    A: Copy,
    F: Fn(A, A) -> A,
{
    if reflected {
        zip_broadcast(samples, rhs, |x, y| f(y, x))
    } else {
        zip_broadcast(samples, rhs, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::UniformGrid;
    use approx::assert_relative_eq;
    use ndarray::{array, Array1, Array2};

    fn line(values: Array1<f64>) -> UniformGridData {
        let n = values.len();
        let grid = UniformGrid::from_bounds(vec![n], vec![0.0], vec![1.0]).unwrap();
        UniformGridData::new(grid, values).unwrap()
    }

    fn real_at(d: &UniformGridData, i: usize) -> f64 {
        d.data_real().unwrap()[[i]]
    }

    #[test]
    fn test_unary_real() {
        let d = line(array![1.0, 4.0, 9.0]);
        let s = d.sqrt();
        assert_eq!(s.data_real().unwrap(), &array![1.0, 2.0, 3.0].into_dyn());
        assert_eq!(real_at(&d.neg(), 1), -4.0);
        assert_eq!(real_at(&d.imag(), 2), 0.0);
        assert_eq!(s.grid(), d.grid());
        for op in UnaryOp::ALL {
            assert_eq!(d.apply_unary(op).shape(), d.shape());
        }
    }

    #[test]
    fn test_unary_complex() {
        let grid = UniformGrid::from_bounds(vec![2], vec![0.0], vec![1.0]).unwrap();
        let d = UniformGridData::new(grid, array![Complex64::new(3.0, 4.0), Complex64::new(0.0, -1.0)])
            .unwrap();
        let a = d.abs();
        assert!(!a.is_complex());
        assert_eq!(real_at(&a, 0), 5.0);
        assert_eq!(real_at(&d.imag(), 1), -1.0);
        assert_eq!(real_at(&d.real(), 0), 3.0);

        let c = d.conj();
        assert!(c.is_complex());
        assert_eq!(c.data().get(&[0]), Some(Scalar::Complex(Complex64::new(3.0, -4.0))));
    }

    #[test]
    fn test_map() {
        let d = line(array![1.0, 2.0]);
        let sq = d.map(|x| x * x).unwrap();
        assert_eq!(real_at(&sq, 1), 4.0);

        let c = d.map_complex(|z| z * Complex64::i());
        assert!(c.is_complex());
        assert!(c.map(|x| x).unwrap_err().is_type());
    }

    #[test]
    fn test_binary_with_data() {
        let a = line(array![1.0, 2.0, 3.0]);
        let b = line(array![2.0, 2.0, 2.0]);
        assert_eq!(real_at(&a.add(&b).unwrap(), 2), 5.0);
        assert_eq!(real_at(&a.sub(&b).unwrap(), 0), -1.0);
        assert_eq!(real_at(&a.rsub(&b).unwrap(), 0), 1.0);
        assert_eq!(real_at(&a.div(&b).unwrap(), 1), 1.0);
        assert_eq!(real_at(&a.pow(&b).unwrap(), 2), 9.0);
        assert_eq!(real_at(&a.rpow(&b).unwrap(), 2), 8.0);
    }

    #[test]
    fn test_binary_rejects_different_grids() {
        let a = line(array![1.0, 2.0, 3.0]);
        let grid = UniformGrid::from_bounds(vec![3], vec![0.0], vec![2.0]).unwrap();
        let b = UniformGridData::new(grid, array![1.0, 2.0, 3.0]).unwrap();
        assert!(a.add(&b).unwrap_err().is_value());
        // Grid mismatch is reported even when the shapes agree.
        assert!(a.apply_binary_reflected(&b, BinaryOp::Mul).unwrap_err().is_value());
    }

    #[test]
    fn test_binary_with_scalars() {
        let a = line(array![1.0, 2.0, 4.0]);
        assert_eq!(real_at(&a.mul(2.0).unwrap(), 2), 8.0);
        assert_eq!(real_at(&a.rdiv(8.0).unwrap(), 2), 2.0);
        assert_eq!(real_at(&a.radd(1.0).unwrap(), 0), 2.0);
        assert_eq!(real_at(&a.rmul(3.0).unwrap(), 1), 6.0);

        let c = a.add(Complex64::new(0.0, 1.0)).unwrap();
        assert!(c.is_complex());
        assert_eq!(c.data().get(&[1]), Some(Scalar::Complex(Complex64::new(2.0, 1.0))));
    }

    #[test]
    fn test_complex_power() {
        let a = line(array![-1.0, 4.0]);
        let r = a.map_complex(|z| z).pow(0.5).unwrap();
        let z = r.data().get(&[0]).unwrap().to_complex();
        assert_relative_eq!(z.re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(z.im, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_binary_with_arrays() {
        let grid = UniformGrid::from_bounds(vec![2, 3], vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
        let d = UniformGridData::new(grid, Array2::<f64>::ones((2, 3))).unwrap();

        let row = array![1.0, 2.0, 3.0];
        let out = d.add(row).unwrap();
        assert_eq!(out.data_real().unwrap()[[1, 2]], 4.0);

        let full = Array2::from_elem((2, 3), 2.0);
        assert_eq!(d.rsub(full).unwrap().data_real().unwrap()[[0, 0]], 1.0);

        assert!(d.add(array![1.0, 2.0]).unwrap_err().is_value());
        assert!(d.mul(Array2::<f64>::ones((3, 2))).unwrap_err().is_value());
    }
}
