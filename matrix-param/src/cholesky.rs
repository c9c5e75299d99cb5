//! Cholesky factorization, solve and inverse of symmetric
//! positive-definite matrices kept in the upper triangle of a buffer.
//!
//! The factor follows the LAPACK convention for `uplo = 'U'`, i.e.,
//! `A = Uᵀ U`. The numerical work is done by [`nalgebra::Cholesky`] on
//! the lower factor `L = Uᵀ`.

use crate::errors::*;
use nalgebra::{Cholesky, DMatrix, DVector, Dyn, RealField};
use ndarray::prelude::*;
use num_traits::Float;

/// Element types of the Cholesky routines (`f32` and `f64`)
pub trait CholeskyScalar: RealField + Float + Copy {}

impl<T: RealField + Float + Copy> CholeskyScalar for T {}

fn check_square<T>(a: &ArrayView2<T>) -> LinalgResult<usize> {
    let (n, m) = a.dim();
    if n != m {
        return Err(LinalgError::Shape(format!("expected a square matrix, got {}x{}", n, m)));
    }
    Ok(n)
}

fn check_output<T>(dst: &ArrayViewMut2<T>, n: usize) -> LinalgResult<()> {
    if dst.dim() != (n, n) {
        return Err(LinalgError::Shape(format!(
            "cannot write a {}x{} result into a {:?} buffer",
            n,
            n,
            dst.dim()
        )));
    }
    Ok(())
}

/// The upper triangle of `a`, transposed into the lower triangle
fn lower_from_upper<T: CholeskyScalar>(a: &ArrayView2<T>) -> DMatrix<T> {
    let n = a.nrows();
    DMatrix::from_fn(n, n, |i, j| if i >= j { a[(j, i)] } else { T::zero() })
}

/// Order of the first leading minor without a Cholesky factor.
///
/// Leading minors of a positive-definite matrix are positive definite,
/// so bisect between a minor that factorizes and one that does not.
fn first_failing_minor<T: CholeskyScalar>(lower: &DMatrix<T>) -> usize {
    let (mut lb, mut ub) = (0, lower.nrows());
    while ub - lb > 1 {
        let mid = lb + (ub - lb) / 2;
        let minor = lower.view((0, 0), (mid, mid)).clone_owned();
        if Cholesky::new(minor).is_some() {
            lb = mid;
        } else {
            ub = mid;
        }
    }
    ub
}

/// Cholesky factorization `A = Uᵀ U` of a symmetric positive-definite
/// matrix
pub struct UpperCholesky<T: CholeskyScalar> {
    chol: Cholesky<T, Dyn>,
}

impl<T: CholeskyScalar> UpperCholesky<T> {
    /// Factorize the matrix held in the upper triangle of `a` (`potrf`).
    ///
    /// Fails with the order of the first leading minor that is not
    /// positive definite. `a` itself is never modified.
    pub fn factorize(a: ArrayView2<T>) -> LinalgResult<Self> {
        check_square(&a)?;
        let lower = lower_from_upper(&a);
        match Cholesky::new(lower.clone()) {
            Some(chol) => Ok(Self { chol }),
            None => Err(LinalgError::NotPositiveDefinite {
                order: first_failing_minor(&lower),
            }),
        }
    }

    /// Take the upper triangle of `u` as the factor itself. Only the
    /// diagonal is checked: it must be strictly positive.
    pub fn from_upper_factor(u: ArrayView2<T>) -> LinalgResult<Self> {
        check_square(&u)?;
        // written to catch NaN as well
        if let Some(j) = u.diag().iter().position(|&ujj| !(ujj > T::zero())) {
            return Err(LinalgError::NotPositiveDefinite { order: j + 1 });
        }
        Ok(Self {
            chol: Cholesky::pack_dirty(lower_from_upper(&u)),
        })
    }

    pub fn dim(&self) -> usize {
        self.chol.l_dirty().nrows()
    }

    /// Write `U` into the upper triangle of `dst`; the strictly lower
    /// triangle is left as is
    pub fn write_upper(&self, mut dst: ArrayViewMut2<T>) -> LinalgResult<()> {
        let n = self.dim();
        check_output(&dst, n)?;
        let l = self.chol.l_dirty();
        for j in 0..n {
            for i in 0..=j {
                dst[(i, j)] = l[(j, i)];
            }
        }
        Ok(())
    }

    /// Solve `A x = b` in place (`potrs` with a single right-hand side)
    pub fn solve(&self, mut b: ArrayViewMut1<T>) -> LinalgResult<()> {
        let n = self.dim();
        if b.len() != n {
            return Err(LinalgError::Shape(format!(
                "cannot solve a {}x{} factor against a vector of length {}",
                n,
                n,
                b.len()
            )));
        }
        let mut x = DVector::from_iterator(n, b.iter().copied());
        self.chol.solve_mut(&mut x);
        b.iter_mut().zip(x.iter()).for_each(|(bi, &xi)| *bi = xi);
        Ok(())
    }

    /// Write `A⁻¹` into `dst` (`potri`). Both triangles are filled from
    /// the upper one, so the result is exactly symmetric.
    ///
    /// A non-finite diagonal in the inverse is reported with its
    /// 1-based position.
    pub fn write_inverse(&self, mut dst: ArrayViewMut2<T>) -> LinalgResult<()> {
        let n = self.dim();
        check_output(&dst, n)?;

        let inv = self.chol.inverse();

        if let Some(j) = (0..n).position(|j| !Float::is_finite(inv[(j, j)])) {
            return Err(LinalgError::InverseFailed { info: j + 1 });
        }

        for j in 0..n {
            for i in 0..=j {
                let x = inv[(i, j)];
                dst[(i, j)] = x;
                dst[(j, i)] = x;
            }
        }
        Ok(())
    }
}

/// Overwrite the upper triangle of `a` with its Cholesky factor `U`
pub fn factorize_upper<T: CholeskyScalar>(mut a: ArrayViewMut2<T>) -> LinalgResult<()> {
    let factor = UpperCholesky::factorize(a.view())?;
    factor.write_upper(a.view_mut())
}
