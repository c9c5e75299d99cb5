use crate::common::*;
use matrix_param::io::ParamIo;
use matrix_param::ndarray_normal::NormalParam;
use matrix_param::traits::*;

#[derive(Args, Debug)]
pub struct CombineArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// site files in pairs of precision and shift: `q1,r1,q2,r2,...`
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub sites: Vec<Box<str>>,

    /// output header: `{out}.mean.tsv.gz`, `{out}.cov.tsv.gz`,
    /// `{out}.sd.tsv.gz`, and the global natural parameters
    /// `{out}.Q.tsv.gz`, `{out}.r.tsv.gz`
    #[arg(short, long, required = true)]
    pub out: Box<str>,
}

/// Combine the prior with all sites into the global approximation
pub fn run_combine(args: &CombineArgs) -> anyhow::Result<()> {
    if args.sites.len() % 2 != 0 {
        return Err(anyhow::anyhow!(
            "expected pairs of precision and shift files, got {} files",
            args.sites.len()
        ));
    }

    let prior = args.model.prior();
    let mut global = NormalParam::new(prior.prior_natural());

    for pair in args.sites.chunks(2) {
        let site = read_pair(&pair[0], &pair[1])?;
        global
            .add_stat(&site.precision, &site.shift)
            .map_err(|e| anyhow::anyhow!("site {}: {}", pair[0], e))?;
    }
    info!("combined {} sites", args.sites.len() / 2);

    global.calibrate()?;
    global.to_tsv(&args.out)?;

    let natural = global.natural();
    write_pair(&args.out, ("Q", "r"), &natural.precision, &natural.shift)?;
    Ok(())
}
