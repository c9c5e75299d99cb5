pub use nalgebra::{DMatrix, DVector};
pub use rand::Rng;
pub use rand_distr::StandardNormal;
pub use rayon::prelude::*;

use crate::traits::SampleOps;
use ndarray::prelude::*;
use ndarray::Data;

impl SampleOps for DMatrix<f64> {
    type Mat = Self;
    type Scalar = f64;

    fn runif(dd: usize, nn: usize) -> Self::Mat {
        let rvec = (0..(dd * nn))
            .into_par_iter()
            .map_init(rand::rng, |rng, _| rng.random::<f64>())
            .collect();

        DMatrix::<f64>::from_vec(dd, nn, rvec)
    }

    fn rnorm(dd: usize, nn: usize) -> Self::Mat {
        let rvec = (0..(dd * nn))
            .into_par_iter()
            .map_init(rand::rng, |rng, _| rng.sample::<f64, _>(StandardNormal))
            .collect();

        DMatrix::<f64>::from_vec(dd, nn, rvec)
    }

    fn rspd(dd: usize) -> Self::Mat {
        let nn = dd + 2;
        let gg = Self::rnorm(dd, nn);
        let mut ret = &gg * gg.transpose() / (nn as f64);
        for i in 0..dd {
            ret[(i, i)] += 1e-1;
        }
        ret
    }
}

/// Copy an `ndarray` matrix into a (column-major) `DMatrix`
pub fn to_dmatrix<S>(xx: &ArrayBase<S, Ix2>) -> DMatrix<f64>
where
    S: Data<Elem = f64>,
{
    DMatrix::from_fn(xx.nrows(), xx.ncols(), |i, j| xx[(i, j)])
}

/// Copy an `ndarray` vector into a `DVector`
pub fn to_dvector<S>(xx: &ArrayBase<S, Ix1>) -> DVector<f64>
where
    S: Data<Elem = f64>,
{
    DVector::from_iterator(xx.len(), xx.iter().copied())
}

/// Copy a `DMatrix` into a column-major `ndarray` matrix
pub fn from_dmatrix(xx: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((xx.nrows(), xx.ncols()).f(), |(i, j)| xx[(i, j)])
}

/// Copy a `DVector` into an `ndarray` vector
pub fn from_dvector(xx: &DVector<f64>) -> Array1<f64> {
    xx.iter().copied().collect()
}
