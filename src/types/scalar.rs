//! Scalar values produced by reductions and interpolation.
//!
//! Grid data is either real or complex, and so are the numbers that come out
//! of it. [`Scalar`] carries that distinction instead of always widening to
//! a complex number.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_complex::Complex64;

/// A real or complex number.
///
/// # Example
///
/// ```
/// use cartgrid_rs::types::Scalar;
/// use num_complex::Complex64;
///
/// let a = Scalar::Real(2.0);
/// let b = Scalar::Complex(Complex64::new(1.0, 1.0));
///
/// assert_eq!(a + b, Scalar::Complex(Complex64::new(3.0, 1.0)));
/// assert_eq!(a.as_real(), Some(2.0));
/// assert_eq!(b.as_real(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar {
    /// Real value.
    Real(f64),
    /// Complex value.
    Complex(Complex64),
}

impl Scalar {
    /// Real zero.
    pub const ZERO: Self = Self::Real(0.0);

    /// Whether the value carries an imaginary part.
    #[inline]
    pub fn is_complex(&self) -> bool {
        matches!(self, Self::Complex(_))
    }

    /// Real part.
    #[inline]
    pub fn re(&self) -> f64 {
        match self {
            Self::Real(x) => *x,
            Self::Complex(z) => z.re,
        }
    }

    /// Imaginary part (zero for real values).
    #[inline]
    pub fn im(&self) -> f64 {
        match self {
            Self::Real(_) => 0.0,
            Self::Complex(z) => z.im,
        }
    }

    /// Absolute value (modulus for complex values).
    #[inline]
    pub fn abs(&self) -> f64 {
        match self {
            Self::Real(x) => x.abs(),
            Self::Complex(z) => z.norm(),
        }
    }

    /// The value if it is real.
    #[inline]
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(x) => Some(*x),
            Self::Complex(_) => None,
        }
    }

    /// Widen to a complex number.
    #[inline]
    pub fn to_complex(&self) -> Complex64 {
        match self {
            Self::Real(x) => Complex64::new(*x, 0.0),
            Self::Complex(z) => *z,
        }
    }

    fn combine(
        self,
        rhs: Self,
        real: impl Fn(f64, f64) -> f64,
        complex: impl Fn(Complex64, Complex64) -> Complex64,
    ) -> Self {
        match (self, rhs) {
            (Self::Real(a), Self::Real(b)) => Self::Real(real(a, b)),
            (a, b) => Self::Complex(complex(a.to_complex(), b.to_complex())),
        }
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(x) => write!(f, "{}", x),
            Self::Complex(z) => write!(f, "{}", z),
        }
    }
}

impl From<f64> for Scalar {
    #[inline]
    fn from(x: f64) -> Self {
        Self::Real(x)
    }
}

impl From<Complex64> for Scalar {
    #[inline]
    fn from(z: Complex64) -> Self {
        Self::Complex(z)
    }
}

impl From<Scalar> for Complex64 {
    #[inline]
    fn from(s: Scalar) -> Complex64 {
        s.to_complex()
    }
}

impl Add for Scalar {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.combine(rhs, |a, b| a + b, |a, b| a + b)
    }
}

impl Sub for Scalar {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.combine(rhs, |a, b| a - b, |a, b| a - b)
    }
}

impl Mul for Scalar {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.combine(rhs, |a, b| a * b, |a, b| a * b)
    }
}

impl Neg for Scalar {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        match self {
            Self::Real(x) => Self::Real(-x),
            Self::Complex(z) => Self::Complex(-z),
        }
    }
}
