use crate::traits::SampleParam;
use ndarray::prelude::*;

/// Collected MCMC samples with log-likelihoods.
pub struct McmcChain<P: SampleParam> {
    pub samples: Vec<P>,
    pub log_likelihoods: Vec<f32>,
}

impl McmcChain<Vec<f32>> {
    /// Read one draw per row of `draws`; log-likelihoods are unknown
    pub fn from_rows(draws: ArrayView2<'_, f32>) -> Self {
        let samples: Vec<Vec<f32>> = draws.outer_iter().map(|row| row.to_vec()).collect();
        let log_likelihoods = vec![f32::NAN; samples.len()];
        Self {
            samples,
            log_likelihoods,
        }
    }
}

impl<P: SampleParam> McmcChain<P> {
    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    /// The final state, e.g., to initialize the next run of the chain
    pub fn last_sample(&self) -> Option<&P> {
        self.samples.last()
    }

    /// Element-wise posterior mean across samples.
    pub fn posterior_mean(&self) -> Array1<f64> {
        let n = self.n_samples();
        if n == 0 {
            return Array1::zeros(0);
        }
        let d = self.samples[0].dim();
        let mut mean = Array1::<f64>::zeros(d);
        for sample in &self.samples {
            for (m, &v) in mean.iter_mut().zip(sample.as_slice()) {
                *m += v as f64;
            }
        }
        mean /= n as f64;
        mean
    }

    /// Sample covariance across samples (column-major, `n - 1`
    /// denominator)
    pub fn posterior_cov(&self) -> Array2<f64> {
        let n = self.n_samples();
        let mean = self.posterior_mean();
        let d = mean.len();
        let mut cov = Array2::<f64>::zeros((d, d).f());
        if n < 2 {
            return cov;
        }

        for sample in &self.samples {
            let diff: Vec<f64> = sample
                .as_slice()
                .iter()
                .zip(mean.iter())
                .map(|(&v, &m)| v as f64 - m)
                .collect();
            for j in 0..d {
                for i in 0..=j {
                    cov[(i, j)] += diff[i] * diff[j];
                }
            }
        }

        let inv = 1.0 / (n - 1) as f64;
        for j in 0..d {
            for i in 0..=j {
                let x = cov[(i, j)] * inv;
                cov[(i, j)] = x;
                cov[(j, i)] = x;
            }
        }
        cov
    }
}

/// Last draws of every chain, in chain order
pub fn last_samples<P: SampleParam>(chains: &[McmcChain<P>]) -> Vec<Option<P>> {
    chains
        .iter()
        .map(|chain| chain.last_sample().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::DVector;

    #[test]
    fn moments_of_draws() {
        let draws = array![[1.0_f32, 0.0], [3.0, 2.0], [2.0, 4.0]];
        let chain = McmcChain::from_rows(draws.view());

        assert_eq!(chain.n_samples(), 3);
        assert_eq!(chain.last_sample(), Some(&vec![2.0, 4.0]));

        assert_abs_diff_eq!(chain.posterior_mean(), array![2.0, 2.0]);
        // var = (1 + 1 + 0) / 2, (4 + 0 + 4) / 2, cov = (2 + 0 + 0) / 2
        assert_abs_diff_eq!(chain.posterior_cov(), array![[1.0, 1.0], [1.0, 4.0]]);
    }

    #[test]
    fn last_samples_of_chains() {
        let chains = vec![
            McmcChain {
                samples: vec![DVector::from_vec(vec![0.0_f32]), DVector::from_vec(vec![1.0])],
                log_likelihoods: vec![-1.0, -0.5],
            },
            McmcChain {
                samples: vec![],
                log_likelihoods: vec![],
            },
        ];

        let last = last_samples(&chains);
        assert_eq!(last.len(), 2);
        assert_eq!(last[0].as_ref().map(|x| x[0]), Some(1.0));
        assert!(last[1].is_none());
        assert_eq!(chains[1].posterior_mean().len(), 0);
    }
}
