pub use ndarray::prelude::*;
pub use rand::Rng;
pub use rand_distr::StandardNormal;
pub use rayon::prelude::*;

use crate::traits::*;
use ndarray::{Data, DataMut, LinalgScalar};
use num_traits::Float;

/// Ridge added to the diagonal of `rspd` samples
const SPD_RIDGE: f64 = 1e-1;

impl<T> SampleOps for ndarray::Array2<T>
where
    T: Float + LinalgScalar + Send,
{
    type Mat = Self;
    type Scalar = T;

    fn runif(dd: usize, nn: usize) -> Self::Mat {
        let rvec: Vec<T> = (0..(dd * nn))
            .into_par_iter()
            .map_init(rand::rng, |rng, _| {
                let x: f64 = rng.random();
                T::from(x).unwrap_or_else(T::nan)
            })
            .collect();

        Array2::from_shape_fn((dd, nn).f(), |(i, j)| rvec[i + j * dd])
    }

    fn rnorm(dd: usize, nn: usize) -> Self::Mat {
        let rvec: Vec<T> = (0..(dd * nn))
            .into_par_iter()
            .map_init(rand::rng, |rng, _| {
                let x: f64 = rng.sample(StandardNormal);
                T::from(x).unwrap_or_else(T::nan)
            })
            .collect();

        Array2::from_shape_fn((dd, nn).f(), |(i, j)| rvec[i + j * dd])
    }

    fn rspd(dd: usize) -> Self::Mat {
        let nn = dd + 2;
        let gg = Self::rnorm(dd, nn);
        let denom = T::from(nn).unwrap_or_else(T::one);
        let ridge = T::from(SPD_RIDGE).unwrap_or_else(T::zero);

        let mut ret = Array2::<T>::zeros((dd, dd).f());
        ret.assign(&gg.dot(&gg.t()));
        ret.mapv_inplace(|x| x / denom);
        ret.diag_mut().mapv_inplace(|x| x + ridge);
        ret.copy_triu_to_tril();
        ret
    }
}

impl<S, T> SymmetricOps for ArrayBase<S, Ix2>
where
    S: DataMut<Elem = T>,
    T: Float,
{
    type Scalar = T;

    fn copy_triu_to_tril(&mut self) {
        let n = self.nrows().min(self.ncols());
        for j in 0..n {
            for i in (j + 1)..n {
                self[(i, j)] = self[(j, i)];
            }
        }
    }

    fn copy_tril_to_triu(&mut self) {
        let n = self.nrows().min(self.ncols());
        for j in 0..n {
            for i in (j + 1)..n {
                self[(j, i)] = self[(i, j)];
            }
        }
    }

    fn is_symmetric(&self, tol: T) -> bool {
        if self.nrows() != self.ncols() {
            return false;
        }
        let n = self.nrows();
        (0..n).all(|j| ((j + 1)..n).all(|i| (self[(i, j)] - self[(j, i)]).abs() <= tol))
    }
}

/// Is `a` contiguous in column-major (Fortran) order?
pub fn is_fortran_layout<S: Data>(a: &ArrayBase<S, Ix2>) -> bool {
    a.t().is_standard_layout()
}

/// Present a mutable view in column-major order.
///
/// A row-major buffer is re-read through its transpose, which leaves
/// the memory untouched and is only meaningful for symmetric content.
/// Returns `None` if neither orientation is contiguous.
pub fn into_fortran_view_mut<T>(a: ArrayViewMut2<'_, T>) -> Option<ArrayViewMut2<'_, T>> {
    if is_fortran_layout(&a) {
        return Some(a);
    }
    let at = a.reversed_axes();
    if is_fortran_layout(&at) {
        log::debug!("reading a {:?} row-major buffer through its transpose", at.dim());
        Some(at)
    } else {
        None
    }
}

/// Copy into a freshly allocated column-major array
pub fn to_fortran<S, T>(a: &ArrayBase<S, Ix2>) -> Array2<T>
where
    S: Data<Elem = T>,
    T: Clone + num_traits::Zero,
{
    let mut ret = Array2::zeros(a.raw_dim().f());
    ret.assign(a);
    ret
}
