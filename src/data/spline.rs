//! Interpolated evaluation of grid data.
//!
//! Interpolants are built lazily on the first evaluation, or explicitly with
//! [`UniformGridData::make_spline`], and reused until the samples change.
//! Complex data gets two real interpolants, one per part.

use num_complex::Complex64;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::array::DataArray;
use super::grid_data::UniformGridData;
use crate::error::{GridError, Result};
use crate::interp::{Extrapolation, Interpolant, SplineDegree};
use crate::types::Scalar;

impl UniformGridData {
    /// Build the interpolants with spline degree `k` (0 or 1).
    pub fn make_spline(&mut self, k: usize) -> Result<()> {
        let degree = SplineDegree::try_from(k)?;
        let (real, imag) = match &self.data {
            DataArray::Real(a) => (Interpolant::build(&self.grid, a.view(), degree)?, None),
            DataArray::Complex(a) => {
                let re = a.mapv(|z| z.re);
                let im = a.mapv(|z| z.im);
                (
                    Interpolant::build(&self.grid, re.view(), degree)?,
                    Some(Interpolant::build(&self.grid, im.view(), degree)?),
                )
            }
        };
        debug!(
            ?degree,
            univariate = real.is_univariate(),
            complex = imag.is_some(),
            "built interpolants"
        );
        self.spline_real = Some(real);
        self.spline_imag = imag;
        self.invalid_spline = false;
        Ok(())
    }

    /// Interpolant of the real part, if built.
    pub fn spline_real(&self) -> Option<&Interpolant> {
        self.spline_real.as_ref()
    }

    /// Interpolant of the imaginary part, if built and the data is complex.
    pub fn spline_imag(&self) -> Option<&Interpolant> {
        self.spline_imag.as_ref()
    }

    /// Whether the interpolants need to be rebuilt before the next evaluation.
    pub fn invalid_spline(&self) -> bool {
        self.invalid_spline
    }

    /// Interpolants ready for evaluation, built with degree 1 if missing.
    fn splines(&mut self) -> Result<(&Interpolant, Option<&Interpolant>)> {
        if self.invalid_spline {
            self.make_spline(1)?;
        }
        match &self.spline_real {
            Some(real) => Ok((real, self.spline_imag.as_ref())),
            None => Err(GridError::value("interpolant is missing after build")),
        }
    }

    fn check_point(&self, point: &[f64]) -> Result<()> {
        if point.len() != self.num_dimensions() {
            return Err(GridError::value(format!(
                "point has {} coordinates but the data is {}-dimensional",
                point.len(),
                self.num_dimensions()
            )));
        }
        Ok(())
    }

    /// Interpolate at `point`, building the interpolants if needed.
    ///
    /// With [`Extrapolation::Fill`], points outside the grid give zero.
    pub fn evaluate_with_spline(&mut self, point: &[f64], ext: Extrapolation) -> Result<Scalar> {
        self.check_point(point)?;
        let (real, imag) = self.splines()?;
        evaluate_pair(real, imag, point, ext)
    }

    /// Interpolate at several points, in order.
    pub fn evaluate_many<P>(&mut self, points: &[P], ext: Extrapolation) -> Result<Vec<Scalar>>
    where
        P: AsRef<[f64]>,
    {
        for p in points {
            self.check_point(p.as_ref())?;
        }
        let (real, imag) = self.splines()?;
        points
            .iter()
            .map(|p| evaluate_pair(real, imag, p.as_ref(), ext))
            .collect()
    }

    /// Interpolate at several points in parallel.
    #[cfg(feature = "parallel")]
    pub fn evaluate_many_parallel<P>(
        &mut self,
        points: &[P],
        ext: Extrapolation,
    ) -> Result<Vec<Scalar>>
    where
        P: AsRef<[f64]> + Sync,
    {
        for p in points {
            self.check_point(p.as_ref())?;
        }
        let (real, imag) = self.splines()?;
        points
            .par_iter()
            .map(|p| evaluate_pair(real, imag, p.as_ref(), ext))
            .collect()
    }
}

#[inline]
fn evaluate_pair(
    real: &Interpolant,
    imag: Option<&Interpolant>,
    point: &[f64],
    ext: Extrapolation,
) -> Result<Scalar> {
    let re = real.evaluate(point, ext)?;
    Ok(match imag {
        Some(imag) => Scalar::Complex(Complex64::new(re, imag.evaluate(point, ext)?)),
        None => Scalar::Real(re),
    })
}
