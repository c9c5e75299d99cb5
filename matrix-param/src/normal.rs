//! Switching between moment parameters `(S, m)` and natural parameters
//! `(Q, r)` of a multivariate normal, where `Q = S⁻¹` and `r = S⁻¹ m`.
//! The map is its own inverse, so the same routine serves both ways.

use crate::cholesky::*;
use crate::errors::*;
use log::debug;
use matrix_util::ndarray_util::{into_fortran_view_mut, is_fortran_layout, to_fortran};
use matrix_util::traits::SymmetricOps;
use ndarray::prelude::*;

/// Where an operand is read from and where its result is written
pub enum Placement<'a, T, D: Dimension> {
    /// Copy the input into a freshly allocated array
    Allocate(ArrayView<'a, T, D>),
    /// Copy the input into a caller-supplied buffer and overwrite it
    Overwrite {
        src: ArrayView<'a, T, D>,
        dst: ArrayViewMut<'a, T, D>,
    },
    /// Overwrite the input buffer itself
    InPlace(ArrayViewMut<'a, T, D>),
}

impl<'a, T, D: Dimension> Placement<'a, T, D> {
    fn src_shape(&self) -> &[usize] {
        match self {
            Placement::Allocate(src) => src.shape(),
            Placement::Overwrite { src, .. } => src.shape(),
            Placement::InPlace(buf) => buf.shape(),
        }
    }
}

/// A result living either in a new array or in a caller's buffer
#[derive(Debug)]
pub enum Placed<'a, T, D: Dimension> {
    Owned(Array<T, D>),
    Borrowed(ArrayViewMut<'a, T, D>),
}

impl<'a, T: Clone, D: Dimension> Placed<'a, T, D> {
    pub fn view(&self) -> ArrayView<'_, T, D> {
        match self {
            Placed::Owned(x) => x.view(),
            Placed::Borrowed(x) => x.view(),
        }
    }

    pub fn view_mut(&mut self) -> ArrayViewMut<'_, T, D> {
        match self {
            Placed::Owned(x) => x.view_mut(),
            Placed::Borrowed(x) => x.view_mut(),
        }
    }

    /// Take the result as an owned array, copying out of a borrowed
    /// buffer if needed
    pub fn into_owned(self) -> Array<T, D> {
        match self {
            Placed::Owned(x) => x,
            Placed::Borrowed(x) => x.to_owned(),
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Placed::Owned(_))
    }
}

/// Output of [`invert_normal_params`]: `(out_A, out_b)`
pub type InvertedParams<'a, 'b, T> = (Placed<'a, T, Ix2>, Option<Placed<'b, T, Ix1>>);

/// Column-major view of a caller's buffer, and whether it is read
/// through its transpose
fn fortran_buffer<T>(buf: ArrayViewMut2<'_, T>) -> LinalgResult<(Placed<'_, T, Ix2>, bool)> {
    let (rows, cols) = buf.dim();
    let was_fortran = is_fortran_layout(&buf);
    let buf = into_fortran_view_mut(buf).ok_or(LinalgError::Layout { rows, cols })?;
    Ok((Placed::Borrowed(buf), !was_fortran))
}

fn place_matrix<T>(a: Placement<'_, T, Ix2>) -> LinalgResult<(Placed<'_, T, Ix2>, bool)>
where
    T: CholeskyScalar,
{
    match a {
        Placement::Allocate(src) => Ok((Placed::Owned(to_fortran(&src)), false)),
        Placement::Overwrite { src, mut dst } => {
            if src.dim() != dst.dim() {
                return Err(LinalgError::Shape(format!(
                    "output buffer {:?} does not match input {:?}",
                    dst.dim(),
                    src.dim()
                )));
            }
            dst.assign(&src);
            fortran_buffer(dst)
        }
        Placement::InPlace(buf) => fortran_buffer(buf),
    }
}

fn place_vector<T>(b: Placement<'_, T, Ix1>) -> LinalgResult<Placed<'_, T, Ix1>>
where
    T: CholeskyScalar,
{
    match b {
        Placement::Allocate(src) => Ok(Placed::Owned(src.to_owned())),
        Placement::Overwrite { src, mut dst } => {
            if src.len() != dst.len() {
                return Err(LinalgError::Shape(format!(
                    "output vector of length {} does not match input of length {}",
                    dst.len(),
                    src.len()
                )));
            }
            dst.assign(&src);
            Ok(Placed::Borrowed(dst))
        }
        Placement::InPlace(buf) => Ok(Placed::Borrowed(buf)),
    }
}

/// Invert moment parameters into natural parameters or vice versa.
///
/// Providing `(S, m)` yields `(Q, r)` and providing `(Q, r)` yields
/// `(S, m)`.
///
/// * `a` - the symmetric positive-definite `S` or `Q` with its placement
/// * `b` - the paired `m` or `r`, if the vector output is wanted
/// * `cho_form` - `a` already holds the upper Cholesky factor of the
///   real `S` or `Q` in its upper triangle
///
/// Returns `(out_A, out_b)` where `out_A` is column-major, fully
/// symmetric, and `out_b` is `None` if `b` was not given. The vector is
/// solved against the factor of the original matrix, never multiplied
/// by the explicit inverse.
///
/// A row-major buffer given for `Overwrite` or `InPlace` is worked on
/// through its transpose; with `cho_form` the factor is still read from
/// the caller's upper triangle. Shapes are validated before any buffer is
/// touched. A failed factorization leaves an `InPlace` buffer as it was
/// and an `Overwrite` destination holding the copied input.
pub fn invert_normal_params<'a, 'b, T>(
    a: Placement<'a, T, Ix2>,
    b: Option<Placement<'b, T, Ix1>>,
    cho_form: bool,
) -> LinalgResult<InvertedParams<'a, 'b, T>>
where
    T: CholeskyScalar,
{
    let (nrows, ncols) = {
        let shape = a.src_shape();
        (shape[0], shape[1])
    };

    if nrows != ncols {
        return Err(LinalgError::Shape(format!(
            "expected a square matrix, got {}x{}",
            nrows, ncols
        )));
    }

    if let Some(b) = b.as_ref() {
        let blen = b.src_shape()[0];
        if blen != nrows {
            return Err(LinalgError::Shape(format!(
                "vector of length {} does not match a {}x{} matrix",
                blen, nrows, ncols
            )));
        }
    }

    let (mut out_a, transposed) = place_matrix(a)?;
    let mut out_b = b.map(place_vector).transpose()?;

    debug!(
        "inverting {}x{} normal parameters (cho_form: {}, vector: {})",
        nrows,
        ncols,
        cho_form,
        out_b.is_some()
    );

    let mut cho = out_a.view_mut();

    let factor = if cho_form {
        if transposed {
            // the caller's upper factor shows up in our lower triangle
            cho.copy_tril_to_triu();
        }
        UpperCholesky::from_upper_factor(cho.view())?
    } else {
        UpperCholesky::factorize(cho.view())?
    };

    if let Some(out_b) = out_b.as_mut() {
        factor.solve(out_b.view_mut())?;
    }

    // This should not fail once the factorization succeeded
    factor.write_inverse(cho)?;

    Ok((out_a, out_b))
}

/// Allocating shorthand of [`invert_normal_params`]
pub fn inverted_normal_params<T>(
    a: ArrayView2<'_, T>,
    b: Option<ArrayView1<'_, T>>,
) -> LinalgResult<(Array2<T>, Option<Array1<T>>)>
where
    T: CholeskyScalar,
{
    let (out_a, out_b) =
        invert_normal_params(Placement::Allocate(a), b.map(Placement::Allocate), false)?;
    Ok((out_a.into_owned(), out_b.map(Placed::into_owned)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn two_by_two_example() -> anyhow::Result<()> {
        let a = array![[4.0, 2.0], [2.0, 3.0]];
        let b = array![1.0, 1.0];

        let (out_a, out_b) = inverted_normal_params(a.view(), Some(b.view()))?;

        assert_abs_diff_eq!(out_a, array![[0.375, -0.25], [-0.25, 0.5]], epsilon = 1e-12);
        assert_abs_diff_eq!(out_b.unwrap(), array![0.125, 0.25], epsilon = 1e-12);
        assert!(is_fortran_layout(&out_a));

        // inputs untouched
        assert_eq!(a, array![[4.0, 2.0], [2.0, 3.0]]);
        assert_eq!(b, array![1.0, 1.0]);
        Ok(())
    }

    #[test]
    fn without_vector() -> anyhow::Result<()> {
        let a = array![[2.0]];
        let (out_a, out_b) = invert_normal_params(Placement::Allocate(a.view()), None, false)?;
        assert!(out_b.is_none());
        assert!(out_a.is_owned());
        assert_abs_diff_eq!(out_a.view()[(0, 0)], 0.5);
        Ok(())
    }

    #[test]
    fn shape_checks_happen_first() {
        let mut a = array![[4.0, 2.0], [2.0, 3.0]];
        let b = array![1.0, 1.0, 1.0];

        let ret = invert_normal_params(
            Placement::InPlace(a.view_mut()),
            Some(Placement::Allocate(b.view())),
            false,
        );
        assert!(matches!(ret, Err(LinalgError::Shape(_))));
        assert_eq!(a, array![[4.0, 2.0], [2.0, 3.0]]);

        let rect = Array2::<f64>::zeros((2, 3));
        let ret = invert_normal_params(Placement::Allocate(rect.view()), None, false);
        assert!(matches!(ret, Err(LinalgError::Shape(_))));

        let src = array![[1.0, 0.0], [0.0, 1.0]];
        let mut dst = Array2::<f64>::zeros((3, 3));
        let ret = invert_normal_params(
            Placement::Overwrite {
                src: src.view(),
                dst: dst.view_mut(),
            },
            None,
            false,
        );
        assert!(matches!(ret, Err(LinalgError::Shape(_))));
    }

    #[test]
    fn strided_buffer_is_a_layout_error() {
        let mut big = Array2::<f64>::eye(4);
        let strided = big.slice_mut(s![..;2, ..;2]);
        let ret = invert_normal_params(Placement::InPlace(strided), None, false);
        assert_eq!(ret.unwrap_err(), LinalgError::Layout { rows: 2, cols: 2 });
    }
}
