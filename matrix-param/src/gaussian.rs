use crate::cholesky::CholeskyScalar;
use crate::errors::*;
use crate::normal::*;
use matrix_util::ndarray_util::to_fortran;
use ndarray::prelude::*;
use std::ops::{AddAssign, SubAssign};

/// Moment parameters `(S, m)` of a multivariate normal
#[derive(Debug, Clone, PartialEq)]
pub struct MomentParams<T> {
    pub cov: Array2<T>,
    pub mean: Array1<T>,
}

/// Natural parameters `(Q, r) = (S⁻¹, S⁻¹ m)` of a multivariate normal
#[derive(Debug, Clone, PartialEq)]
pub struct NaturalParams<T> {
    pub precision: Array2<T>,
    pub shift: Array1<T>,
}

/// Invert `(mat, vec)` in place, returning the same buffers
fn invert_pair<T: CholeskyScalar>(
    mut mat: Array2<T>,
    mut vec: Array1<T>,
) -> LinalgResult<(Array2<T>, Array1<T>)> {
    invert_normal_params(
        Placement::InPlace(mat.view_mut()),
        Some(Placement::InPlace(vec.view_mut())),
        false,
    )?;
    Ok((mat, vec))
}

fn check_pair<T>(mat: &Array2<T>, vec: &Array1<T>) -> LinalgResult<()> {
    let (n, m) = mat.dim();
    if n != m || vec.len() != n {
        return Err(LinalgError::Shape(format!(
            "{}x{} matrix paired with a vector of length {}",
            n,
            m,
            vec.len()
        )));
    }
    Ok(())
}

impl<T: CholeskyScalar> MomentParams<T> {
    pub fn new(cov: Array2<T>, mean: Array1<T>) -> LinalgResult<Self> {
        check_pair(&cov, &mean)?;
        Ok(Self { cov, mean })
    }

    pub fn dim(&self) -> usize {
        self.mean.len()
    }

    /// `(Q, r)` in new column-major buffers
    pub fn to_natural(&self) -> LinalgResult<NaturalParams<T>> {
        let (precision, shift) = invert_pair(to_fortran(&self.cov), self.mean.clone())?;
        Ok(NaturalParams { precision, shift })
    }

    /// `(Q, r)` computed in the buffers of `self`
    pub fn into_natural(self) -> LinalgResult<NaturalParams<T>> {
        let (precision, shift) = invert_pair(self.cov, self.mean)?;
        Ok(NaturalParams { precision, shift })
    }
}

impl<T: CholeskyScalar> NaturalParams<T> {
    pub fn new(precision: Array2<T>, shift: Array1<T>) -> LinalgResult<Self> {
        check_pair(&precision, &shift)?;
        Ok(Self { precision, shift })
    }

    /// The flat (improper) element; the identity of site accumulation
    pub fn zeros(dim: usize) -> Self {
        Self {
            precision: Array2::zeros((dim, dim).f()),
            shift: Array1::zeros(dim),
        }
    }

    pub fn dim(&self) -> usize {
        self.shift.len()
    }

    /// `(S, m)` in new column-major buffers
    pub fn to_moment(&self) -> LinalgResult<MomentParams<T>> {
        let (cov, mean) = invert_pair(to_fortran(&self.precision), self.shift.clone())?;
        Ok(MomentParams { cov, mean })
    }

    /// `(S, m)` computed in the buffers of `self`
    pub fn into_moment(self) -> LinalgResult<MomentParams<T>> {
        let (cov, mean) = invert_pair(self.precision, self.shift)?;
        Ok(MomentParams { cov, mean })
    }

    /// `(s Q, s r)`, e.g., a damped site update
    pub fn scaled(&self, s: T) -> Self {
        Self {
            precision: self.precision.mapv(|x| x * s),
            shift: self.shift.mapv(|x| x * s),
        }
    }
}

impl<T: CholeskyScalar> AddAssign<&NaturalParams<T>> for NaturalParams<T> {
    fn add_assign(&mut self, other: &NaturalParams<T>) {
        self.precision.zip_mut_with(&other.precision, |x, &y| *x = *x + y);
        self.shift.zip_mut_with(&other.shift, |x, &y| *x = *x + y);
    }
}

impl<T: CholeskyScalar> SubAssign<&NaturalParams<T>> for NaturalParams<T> {
    fn sub_assign(&mut self, other: &NaturalParams<T>) {
        self.precision.zip_mut_with(&other.precision, |x, &y| *x = *x - y);
        self.shift.zip_mut_with(&other.shift, |x, &y| *x = *x - y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn moment_natural_moment() -> anyhow::Result<()> {
        let moments = MomentParams::new(array![[4.0, 2.0], [2.0, 3.0]], array![1.0, -2.0])?;

        let natural = moments.to_natural()?;
        let back = natural.clone().into_moment()?;

        assert_abs_diff_eq!(back.cov, moments.cov, epsilon = 1e-12);
        assert_abs_diff_eq!(back.mean, moments.mean, epsilon = 1e-12);

        let natural2 = moments.clone().into_natural()?;
        assert_abs_diff_eq!(natural2.precision, natural.precision, epsilon = 1e-12);
        assert_abs_diff_eq!(natural2.shift, natural.shift, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn site_arithmetic() -> anyhow::Result<()> {
        let site = NaturalParams::new(array![[2.0, 0.5], [0.5, 1.0]], array![1.0, 1.0])?;

        let mut global = NaturalParams::zeros(2);
        global += &site;
        global += &site.scaled(0.5);
        assert_abs_diff_eq!(global.precision, array![[3.0, 0.75], [0.75, 1.5]]);
        assert_abs_diff_eq!(global.shift, array![1.5, 1.5]);

        global -= &site;
        let half = site.scaled(0.5);
        assert_abs_diff_eq!(global.precision, half.precision);
        assert_abs_diff_eq!(global.shift, half.shift);
        Ok(())
    }

    #[test]
    fn copies_are_column_major() -> anyhow::Result<()> {
        let moments = MomentParams::new(array![[4.0, 2.0], [2.0, 3.0]], array![1.0, 1.0])?;
        assert!(moments.cov.is_standard_layout());

        let natural = moments.to_natural()?;
        assert!(natural.precision.t().is_standard_layout());
        assert_abs_diff_eq!(natural.shift, array![0.125, 0.25], epsilon = 1e-12);

        let back = natural.to_moment()?;
        assert!(back.cov.t().is_standard_layout());
        assert_abs_diff_eq!(back.mean, moments.mean, epsilon = 1e-12);

        // input untouched
        assert_eq!(moments.cov, array![[4.0, 2.0], [2.0, 3.0]]);
        Ok(())
    }

    #[test]
    fn mismatched_pair() {
        assert!(MomentParams::new(Array2::<f64>::eye(3), Array1::zeros(2)).is_err());
        assert!(NaturalParams::new(Array2::<f64>::zeros((2, 3)), Array1::zeros(2)).is_err());
    }
}
