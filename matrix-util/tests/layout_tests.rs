use approx::assert_abs_diff_eq;
use matrix_util::dmatrix_util::*;
use matrix_util::ndarray_util::{into_fortran_view_mut, is_fortran_layout, to_fortran};
use matrix_util::traits::{SampleOps, SymmetricOps};
use ndarray::prelude::*;

#[test]
fn copy_triangles() {
    let mut xx = array![[1.0, 2.0, 3.0], [0.0, 4.0, 5.0], [0.0, 0.0, 6.0]];
    xx.copy_triu_to_tril();
    assert_eq!(xx, array![[1.0, 2.0, 3.0], [2.0, 4.0, 5.0], [3.0, 5.0, 6.0]]);
    assert!(xx.is_symmetric(0.0));

    let mut yy = array![[1.0, 9.0], [7.0, 2.0]];
    yy.copy_tril_to_triu();
    assert_eq!(yy, array![[1.0, 7.0], [7.0, 2.0]]);
    assert!(yy.is_symmetric(0.0));

    let zz = array![[1.0, 7.0], [0.0, 2.0]];
    assert!(!zz.is_symmetric(1e-8));
}

#[test]
fn fortran_views() {
    let mut c_order = array![[4.0, 2.0], [2.0, 3.0]];
    assert!(!is_fortran_layout(&c_order));

    let view = into_fortran_view_mut(c_order.view_mut()).unwrap();
    assert!(is_fortran_layout(&view));
    assert_eq!(view, array![[4.0, 2.0], [2.0, 3.0]]);

    let f_order = to_fortran(&c_order);
    assert!(is_fortran_layout(&f_order));
    assert_eq!(f_order, c_order);

    let mut big = Array2::<f64>::zeros((6, 6));
    let strided = big.slice_mut(s![..;2, ..;2]);
    assert!(into_fortran_view_mut(strided).is_none());
}

#[test]
fn random_spd_is_factorizable() {
    let xx = Array2::<f64>::rspd(6);
    assert!(is_fortran_layout(&xx));
    assert!(xx.is_symmetric(1e-12));
    assert!(to_dmatrix(&xx).cholesky().is_some());

    let yy = DMatrix::<f64>::rspd(4);
    assert!(yy.clone().cholesky().is_some());
    assert_abs_diff_eq!(yy.clone(), yy.transpose(), epsilon = 1e-12);
}

#[test]
fn dmatrix_round_trip() {
    let xx = Array2::<f64>::rnorm(5, 3);
    let dm = to_dmatrix(&xx);
    assert_eq!(dm.shape(), (5, 3));
    assert_eq!(from_dmatrix(&dm), xx);

    let v = array![1.0, 2.0, 3.0];
    assert_eq!(from_dvector(&to_dvector(&v)), v);
}
