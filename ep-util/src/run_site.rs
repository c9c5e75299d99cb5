use crate::common::*;
use mcmc_util::{element_name, NamedDraws};

#[derive(Args, Debug)]
pub struct SiteArgs {
    /// sampler draws of one site: a header of element names, e.g.,
    /// `phi[0]`, `alpha[3]`, `beta[1,0]`, then one draw per line
    pub draws_file: Box<str>,

    #[command(flatten)]
    pub model: ModelArgs,

    /// cavity header, reading `{cavity}.Q.tsv.gz` and `{cavity}.r.tsv.gz`;
    /// the prior is used if missing
    #[arg(short, long)]
    pub cavity: Option<Box<str>>,

    /// name of the shared parameter vector in the draws
    #[arg(long, default_value = "phi")]
    pub phi: Box<str>,

    /// also write the last draw of every parameter to `{out}.init.tsv`
    #[arg(long, default_value_t = false)]
    pub init: bool,

    /// output header: `{out}.Q.tsv.gz` and `{out}.r.tsv.gz`
    #[arg(short, long, required = true)]
    pub out: Box<str>,
}

/// Turn the tilted distribution sampled at one site into a new site
/// approximation
///
/// (Q_k, r_k) = natural(tilted moments) - (Q_cavity, r_cavity)
pub fn run_site(args: &SiteArgs) -> anyhow::Result<()> {
    let prior = args.model.prior();
    let dphi = prior.dphi();

    let cavity = match args.cavity.as_deref() {
        Some(hdr) => read_pair(&format!("{}.Q.tsv.gz", hdr), &format!("{}.r.tsv.gz", hdr))?,
        None => prior.prior_natural(),
    };

    if cavity.dim() != dphi {
        return Err(anyhow::anyhow!(
            "cavity has {} dimensions, expected {}",
            cavity.dim(),
            dphi
        ));
    }

    let data = io::read_lines_of_types::<f32>(&args.draws_file, "\t", 0)?;
    let draws = NamedDraws::from_rows(&data.header, &data.lines)?;
    info!("read {} draws from {}", draws.n_draws(), args.draws_file);

    if draws.n_draws() < 2 {
        return Err(anyhow::anyhow!("need at least two draws"));
    }

    let phi_names: Vec<Box<str>> = (0..dphi).map(|i| element_name(&args.phi, &[i])).collect();
    let chain = draws.to_chain(&phi_names)?;

    let tilted = MomentParams::new(chain.posterior_cov(), chain.posterior_mean())?;
    let mut site = tilted.into_natural()?;
    site -= &cavity;

    write_pair(&args.out, ("Q", "r"), &site.precision, &site.shift)?;
    info!("wrote a {}-dim site to {}.{{Q,r}}.tsv.gz", dphi, args.out);

    if args.init {
        let mut defs: Vec<(Box<str>, Vec<usize>)> = prior
            .param_definitions()
            .into_iter()
            .map(|def| (def.name, def.shape))
            .collect();
        defs.push((args.phi.clone(), vec![dphi]));

        let defs: Vec<(&str, &[usize])> = defs
            .iter()
            .map(|(name, shape)| (name.as_ref(), shape.as_slice()))
            .collect();

        let last = draws.last_sample(&defs)?;

        let lines: Vec<Box<str>> = defs
            .iter()
            .filter_map(|(name, _)| last.get(*name).map(|x| (name, x)))
            .map(|(name, x)| {
                // column-major order
                let values = x
                    .t()
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                format!("{}\t{}", name, values).into_boxed_str()
            })
            .collect();

        io::write_lines(&lines, &format!("{}.init.tsv", args.out))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn site_from_draws() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = |name: &str| dir.path().join(name).to_string_lossy().into_owned();

        // m2 with two groups and one input
        let lines: Vec<Box<str>> = vec![
            "phi[0]\tphi[1]\talpha[0]\talpha[1]\tbeta[0]".into(),
            "1.0\t0.0\t0.1\t0.2\t0.3".into(),
            "3.0\t2.0\t0.4\t0.5\t0.6".into(),
            "2.0\t4.0\t0.7\t0.8\t0.9".into(),
        ];
        io::write_lines(&lines, &path("draws.tsv"))?;

        run_site(&SiteArgs {
            draws_file: path("draws.tsv").into(),
            model: ModelArgs {
                model: ModelKind::M2,
                num_inputs: 1,
                num_groups: 2,
            },
            cavity: None,
            phi: "phi".into(),
            init: true,
            out: path("site").into(),
        })?;

        // tilted covariance [[1, 1], [1, 4]] and mean (2, 2)
        let tilted = MomentParams::new(array![[1.0, 1.0], [1.0, 4.0]], array![2.0, 2.0])?;
        let expected = tilted.to_natural()?;

        let q = Array2::<f64>::from_tsv(&path("site.Q.tsv.gz"), None)?;
        let r = Array1::<f64>::from_tsv(&path("site.r.tsv.gz"), None)?;

        // the prior is the standard normal
        assert_abs_diff_eq!(q, &expected.precision - &Array2::<f64>::eye(2), epsilon = 1e-6);
        assert_abs_diff_eq!(r, expected.shift, epsilon = 1e-6);

        let init = io::read_lines_of_types::<String>(&path("site.init.tsv"), "\t", -1)?;
        assert_eq!(init.lines[0], vec!["alpha", "0.7,0.8"]);
        assert_eq!(init.lines[1], vec!["beta", "0.9"]);
        assert_eq!(init.lines[2], vec!["phi", "2,4"]);
        Ok(())
    }
}
