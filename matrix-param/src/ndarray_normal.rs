use crate::errors::*;
use crate::gaussian::*;
use crate::normal::*;
use crate::traits::*;
use log::{debug, warn};
use ndarray::prelude::*;

/// Global Gaussian approximation of distributed EP
///
/// Q = Q0 + Σ_k Q_k
/// r = r0 + Σ_k r_k
///
/// where `(Q0, r0)` is the prior and `(Q_k, r_k)` the site of group
/// `k`. Calibration turns `(Q, r)` into posterior mean, covariance
/// and marginal standard deviations.
pub struct NormalParam {
    dim: usize,
    //////////////////////
    // hyper parameters //
    //////////////////////
    prior: NaturalParams<f64>,
    ///////////////////////////
    // sufficient statistics //
    ///////////////////////////
    stat: NaturalParams<f64>,
    //////////////////////////
    // estimated parameters //
    //////////////////////////
    estimated_mean: Array1<f64>,
    estimated_cov: Array2<f64>,
    estimated_sd: Array1<f64>,
}

impl NormalParam {
    /// Start from the prior; statistics equal the prior until a site
    /// is added
    pub fn new(prior: NaturalParams<f64>) -> Self {
        let dim = prior.dim();
        Self {
            dim,
            stat: prior.clone(),
            prior,
            estimated_mean: Array1::zeros(dim),
            estimated_cov: Array2::zeros((dim, dim).f()),
            estimated_sd: Array1::zeros(dim),
        }
    }

    pub fn natural(&self) -> &NaturalParams<f64> {
        &self.stat
    }

    pub fn prior(&self) -> &NaturalParams<f64> {
        &self.prior
    }

    fn check_stat(&self, q: &Array2<f64>, r: &Array1<f64>) -> LinalgResult<()> {
        let dim = self.dim;
        if q.dim() != (dim, dim) || r.len() != dim {
            return Err(LinalgError::Shape(format!(
                "cannot add a {:?} matrix and a vector of length {} to a {}-dim normal",
                q.dim(),
                r.len(),
                dim
            )));
        }
        Ok(())
    }

    /// Cavity distribution `(Q - Q_k, r - r_k)` leaving out one site
    pub fn cavity(&self, site: &NaturalParams<f64>) -> NaturalParams<f64> {
        let mut ret = self.stat.clone();
        ret -= site;
        ret
    }
}

impl NaturalStatParam for NormalParam {
    type Mat = Array2<f64>;
    type DVec = Array1<f64>;
    type Scalar = f64;

    fn add_stat(&mut self, add_q: &Self::Mat, add_r: &Self::DVec) -> LinalgResult<()> {
        self.check_stat(add_q, add_r)?;
        self.stat.precision += add_q;
        self.stat.shift += add_r;
        Ok(())
    }

    fn update_stat(&mut self, update_q: &Self::Mat, update_r: &Self::DVec) -> LinalgResult<()> {
        self.check_stat(update_q, update_r)?;
        self.reset_stat();
        self.add_stat(update_q, update_r)
    }

    fn reset_stat(&mut self) {
        self.stat.precision.assign(&self.prior.precision);
        self.stat.shift.assign(&self.prior.shift);
    }

    fn calibrate(&mut self) -> LinalgResult<()> {
        let dim = self.dim;
        invert_normal_params(
            Placement::Overwrite {
                src: self.stat.precision.view(),
                dst: self.estimated_cov.view_mut(),
            },
            Some(Placement::Overwrite {
                src: self.stat.shift.view(),
                dst: self.estimated_mean.view_mut(),
            }),
            false,
        )
        .map_err(|err| {
            warn!("failed to calibrate a {}-dim normal: {}", dim, err);
            err
        })?;

        self.estimated_sd = self.estimated_cov.diag().mapv(|x| x.max(0.).sqrt());
        debug!("calibrated a {}-dim normal", dim);
        Ok(())
    }
}

impl Inference for NormalParam {
    type Mat = Array2<f64>;
    type DVec = Array1<f64>;

    fn posterior_mean(&self) -> &Self::DVec {
        &self.estimated_mean
    }

    fn posterior_cov(&self) -> &Self::Mat {
        &self.estimated_cov
    }

    fn posterior_sd(&self) -> &Self::DVec {
        &self.estimated_sd
    }

    fn dim(&self) -> usize {
        self.dim
    }
}
