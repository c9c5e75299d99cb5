use crate::errors::LinalgResult;

/// Posterior summaries of a calibrated parameter
pub trait Inference {
    type Mat;
    type DVec;

    fn posterior_mean(&self) -> &Self::DVec;
    fn posterior_cov(&self) -> &Self::Mat;
    fn posterior_sd(&self) -> &Self::DVec;

    fn dim(&self) -> usize;
}

/// A parameter accumulating natural-parameter statistics on top of
/// prior hyper parameters `(Q0, r0)`
pub trait NaturalStatParam {
    type Mat;
    type DVec;
    type Scalar;

    /// `Q += add_q`, `r += add_r`; fails on mismatched shapes, leaving
    /// the statistics as they were
    fn add_stat(&mut self, add_q: &Self::Mat, add_r: &Self::DVec) -> LinalgResult<()>;

    /// `Q = Q0 + update_q`, `r = r0 + update_r`
    fn update_stat(&mut self, update_q: &Self::Mat, update_r: &Self::DVec) -> LinalgResult<()>;

    /// `Q = Q0`, `r = r0`
    fn reset_stat(&mut self);

    /// Refresh the moment estimates from the current statistics
    fn calibrate(&mut self) -> LinalgResult<()>;
}
