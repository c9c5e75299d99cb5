use crate::traits::*;
use log::info;
use matrix_util::common_io::mkdir;
use matrix_util::traits::IoOps;

/// Write posterior summaries next to each other
///
/// * `{header}.mean.tsv.gz`
/// * `{header}.cov.tsv.gz`
/// * `{header}.sd.tsv.gz`
pub trait ParamIo: Inference
where
    <Self as Inference>::Mat: IoOps,
    <Self as Inference>::DVec: IoOps,
{
    fn to_tsv(&self, header: &str) -> anyhow::Result<()> {
        mkdir(header)?;

        self.posterior_mean()
            .to_tsv(&(header.to_string() + ".mean.tsv.gz"))?;

        self.posterior_cov()
            .to_tsv(&(header.to_string() + ".cov.tsv.gz"))?;

        self.posterior_sd()
            .to_tsv(&(header.to_string() + ".sd.tsv.gz"))?;

        info!("wrote {}-dim posterior to {}.*.tsv.gz", self.dim(), header);
        Ok(())
    }
}

impl ParamIo for crate::ndarray_normal::NormalParam {}
