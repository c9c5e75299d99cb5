//! Priors of the shared parameters `phi` of the simulated experiment
//! models. Each model keeps its hyper parameters in a plain struct;
//! `Default` gives the values used in the experiments.

use crate::gaussian::*;
use ndarray::prelude::*;

/// Name, shape and hierarchical axis of an inferred parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDefinition {
    pub name: Box<str>,
    pub shape: Vec<usize>,
    /// The axis indexing groups, if the parameter is local to groups
    pub hier: Option<usize>,
}

impl ParamDefinition {
    pub fn new(name: &str, shape: &[usize], hier: Option<usize>) -> Self {
        Self {
            name: name.into(),
            shape: shape.to_vec(),
            hier,
        }
    }
}

/// Independent normal prior over `phi`
pub trait ModelPrior {
    /// Number of shared parameters
    fn dphi(&self) -> usize;

    /// Prior means and variances of `phi`
    fn prior_diagonal(&self) -> (Array1<f64>, Array1<f64>);

    /// Local and global parameters sampled within each group
    fn param_definitions(&self) -> Vec<ParamDefinition>;

    /// `(S0, m0)` with `S0` in column-major order
    fn prior_moments(&self) -> MomentParams<f64> {
        let (mean, var) = self.prior_diagonal();
        let mut cov = Array2::zeros((self.dphi(), self.dphi()).f());
        cov.diag_mut().assign(&var);
        MomentParams { cov, mean }
    }

    /// `(Q0, r0)`, inverted elementwise since the prior is diagonal
    fn prior_natural(&self) -> NaturalParams<f64> {
        let (mean, var) = self.prior_diagonal();
        let mut precision = Array2::zeros((self.dphi(), self.dphi()).f());
        precision.diag_mut().assign(&var.mapv(|v| 1. / v));
        NaturalParams {
            precision,
            shift: &mean / &var,
        }
    }
}

/// Hierarchical logistic regression with a shared slope
///
/// ```text
/// y ~ bernoulli_logit(alpha_j + beta' x)
/// alpha_j ~ N(0, sigma_a), beta_d ~ N(0, sigma_b)
/// phi = [log(sigma_a), log(sigma_b)]
/// ```
#[derive(Debug, Clone)]
pub struct M2Prior {
    pub num_groups: usize,
    pub num_inputs: usize,
    /// prior of log(sigma_a)
    pub m0_a: f64,
    pub v0_a: f64,
    /// prior of log(sigma_b)
    pub m0_b: f64,
    pub v0_b: f64,
}

impl M2Prior {
    pub fn new(num_groups: usize, num_inputs: usize) -> Self {
        Self {
            num_groups,
            num_inputs,
            ..Self::default()
        }
    }
}

impl Default for M2Prior {
    fn default() -> Self {
        Self {
            num_groups: 1,
            num_inputs: 1,
            m0_a: 0.,
            v0_a: 1.,
            m0_b: 0.,
            v0_b: 1.,
        }
    }
}

impl ModelPrior for M2Prior {
    fn dphi(&self) -> usize {
        2
    }

    fn prior_diagonal(&self) -> (Array1<f64>, Array1<f64>) {
        (array![self.m0_a, self.m0_b], array![self.v0_a, self.v0_b])
    }

    fn param_definitions(&self) -> Vec<ParamDefinition> {
        vec![
            ParamDefinition::new("alpha", &[self.num_groups], Some(0)),
            ParamDefinition::new("beta", &[self.num_inputs], None),
        ]
    }
}

/// Hierarchical logistic regression with group-specific slopes
///
/// ```text
/// y ~ bernoulli_logit(alpha_j + beta_j' x)
/// alpha_j ~ N(mu_a, sigma_a), beta_jd ~ N(mu_b_d, sigma_b_d)
/// phi = [mu_a, log(sigma_a), mu_b, log(sigma_b)]
/// ```
#[derive(Debug, Clone)]
pub struct M4bPrior {
    pub num_groups: usize,
    pub num_inputs: usize,
    /// prior of mu_a
    pub m0_ma: f64,
    pub v0_ma: f64,
    /// prior of log(sigma_a)
    pub m0_sa: f64,
    pub v0_sa: f64,
    /// prior of each mu_b_d
    pub m0_mb: f64,
    pub v0_mb: f64,
    /// prior of each log(sigma_b_d)
    pub m0_sb: f64,
    pub v0_sb: f64,
}

impl M4bPrior {
    pub fn new(num_groups: usize, num_inputs: usize) -> Self {
        Self {
            num_groups,
            num_inputs,
            ..Self::default()
        }
    }
}

impl Default for M4bPrior {
    fn default() -> Self {
        let v0 = 1.5_f64.powi(2);
        Self {
            num_groups: 1,
            num_inputs: 1,
            m0_ma: 0.,
            v0_ma: v0,
            m0_sa: 0.,
            v0_sa: v0,
            m0_mb: 0.,
            v0_mb: v0,
            m0_sb: 0.,
            v0_sb: v0,
        }
    }
}

impl ModelPrior for M4bPrior {
    fn dphi(&self) -> usize {
        2 * self.num_inputs + 2
    }

    fn prior_diagonal(&self) -> (Array1<f64>, Array1<f64>) {
        let dd = self.num_inputs;
        let mut mean = Array1::zeros(self.dphi());
        let mut var = Array1::zeros(self.dphi());

        mean[0] = self.m0_ma;
        var[0] = self.v0_ma;
        mean[1] = self.m0_sa;
        var[1] = self.v0_sa;
        mean.slice_mut(s![2..2 + dd]).fill(self.m0_mb);
        var.slice_mut(s![2..2 + dd]).fill(self.v0_mb);
        mean.slice_mut(s![2 + dd..]).fill(self.m0_sb);
        var.slice_mut(s![2 + dd..]).fill(self.v0_sb);

        (mean, var)
    }

    fn param_definitions(&self) -> Vec<ParamDefinition> {
        vec![
            ParamDefinition::new("alpha", &[self.num_groups], Some(0)),
            ParamDefinition::new("beta", &[self.num_groups, self.num_inputs], Some(0)),
        ]
    }
}
