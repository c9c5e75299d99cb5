#![allow(unused)]

pub use matrix_util::common_io as io;
pub use matrix_util::traits::IoOps;

pub use matrix_param::prior::*;
pub use matrix_param::*;

pub use clap::{Args, Parser, Subcommand, ValueEnum};
pub use env_logger;

pub use log::info;
pub use ndarray::prelude::*;

#[derive(ValueEnum, Clone, Debug, PartialEq)]
#[clap(rename_all = "lowercase")]
pub enum ModelKind {
    /// shared slope, `phi = [log(sigma_a), log(sigma_b)]`
    M2,
    /// group-specific slopes, `phi = [mu_a, log(sigma_a), mu_b, log(sigma_b)]`
    M4b,
}

/// Model dimensions shared by the subcommands
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// experiment model
    #[arg(short, long, value_enum, default_value = "m2")]
    pub model: ModelKind,

    /// number of input variables
    #[arg(short = 'd', long, default_value_t = 1)]
    pub num_inputs: usize,

    /// number of groups within each site
    #[arg(short = 'j', long, default_value_t = 1)]
    pub num_groups: usize,
}

impl ModelArgs {
    pub fn prior(&self) -> Box<dyn ModelPrior> {
        match self.model {
            ModelKind::M2 => Box::new(M2Prior::new(self.num_groups, self.num_inputs)),
            ModelKind::M4b => Box::new(M4bPrior::new(self.num_groups, self.num_inputs)),
        }
    }
}

/// Write a pair of natural or moment parameters as
/// `{header}.{mat}.tsv.gz` and `{header}.{vec}.tsv.gz`
pub fn write_pair(
    header: &str,
    names: (&str, &str),
    mat: &Array2<f64>,
    vec: &Array1<f64>,
) -> anyhow::Result<()> {
    io::mkdir(header)?;
    mat.to_tsv(&format!("{}.{}.tsv.gz", header, names.0))?;
    vec.to_tsv(&format!("{}.{}.tsv.gz", header, names.1))?;
    Ok(())
}

pub fn read_pair(mat_file: &str, vec_file: &str) -> anyhow::Result<NaturalParams<f64>> {
    let mat = Array2::<f64>::from_tsv(mat_file, None)?;
    let vec = Array1::<f64>::from_tsv(vec_file, None)?;
    Ok(NaturalParams::new(mat, vec)?)
}
