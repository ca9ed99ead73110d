//! Reductions over all samples.

use super::array::DataArray;
use super::grid_data::UniformGridData;
use crate::error::{GridError, Result};
use crate::types::Scalar;

/// NaN-propagating fold of `values` with `pick`.
fn fold_nan<I, F>(values: I, pick: F) -> Option<f64>
where
    I: Iterator<Item = f64>,
    F: Fn(f64, f64) -> f64,
{
    values.reduce(|acc, x| {
        if acc.is_nan() || x.is_nan() {
            f64::NAN
        } else {
            pick(acc, x)
        }
    })
}

impl UniformGridData {
    /// Moduli of the samples.
    fn abs_values(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match &self.data {
            DataArray::Real(a) => Box::new(a.iter().map(|x| x.abs())),
            DataArray::Complex(a) => Box::new(a.iter().map(|z| z.norm())),
        }
    }

    fn real_samples(&self, what: &str) -> Result<impl Iterator<Item = f64> + '_> {
        match &self.data {
            DataArray::Real(a) => Ok(a.iter().copied()),
            DataArray::Complex(_) => Err(GridError::type_error(format!(
                "{} is not defined for complex data",
                what
            ))),
        }
    }

    /// Smallest sample. Complex data is a type error; NaN propagates.
    pub fn min(&self) -> Result<f64> {
        let values = self.real_samples("min")?;
        fold_nan(values, f64::min).ok_or_else(|| GridError::value("min of empty data"))
    }

    /// Largest sample. Complex data is a type error; NaN propagates.
    pub fn max(&self) -> Result<f64> {
        let values = self.real_samples("max")?;
        fold_nan(values, f64::max).ok_or_else(|| GridError::value("max of empty data"))
    }

    /// Smallest modulus.
    pub fn abs_min(&self) -> f64 {
        fold_nan(self.abs_values(), f64::min).unwrap_or(f64::NAN)
    }

    /// Largest modulus.
    pub fn abs_max(&self) -> f64 {
        fold_nan(self.abs_values(), f64::max).unwrap_or(f64::NAN)
    }

    /// Sum of the samples.
    pub fn sum(&self) -> Scalar {
        match &self.data {
            DataArray::Real(a) => Scalar::Real(a.sum()),
            DataArray::Complex(a) => Scalar::Complex(a.sum()),
        }
    }

    /// Arithmetic mean of the samples.
    pub fn mean(&self) -> Scalar {
        let n = self.data.len() as f64;
        self.sum() * Scalar::Real(1.0 / n)
    }

    /// Riemann sum `dv * Σ f`.
    pub fn integral(&self) -> Scalar {
        self.sum() * Scalar::Real(self.grid.dv())
    }

    /// `dv * Σ |f|`.
    pub fn norm1(&self) -> f64 {
        self.grid.dv() * self.abs_values().sum::<f64>()
    }

    /// `sqrt(dv * Σ |f|²)`.
    pub fn norm2(&self) -> f64 {
        let sq: f64 = self.abs_values().map(|x| x * x).sum();
        (self.grid.dv() * sq).sqrt()
    }
}
