use crate::common::*;

#[derive(Args, Debug)]
pub struct PriorArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// output header
    #[arg(short, long, required = true)]
    pub out: Box<str>,
}

/// Write the prior of the shared parameters
///
/// * `{out}.S0.tsv.gz`, `{out}.m0.tsv.gz` - moment parameters
/// * `{out}.Q0.tsv.gz`, `{out}.r0.tsv.gz` - natural parameters
/// * `{out}.params.tsv` - sampled parameters: name, shape, group axis
pub fn run_prior(args: &PriorArgs) -> anyhow::Result<()> {
    let prior = args.model.prior();

    let moments = prior.prior_moments();
    write_pair(&args.out, ("S0", "m0"), &moments.cov, &moments.mean)?;

    let natural = prior.prior_natural();
    write_pair(&args.out, ("Q0", "r0"), &natural.precision, &natural.shift)?;

    let lines: Vec<Box<str>> = prior
        .param_definitions()
        .iter()
        .map(|def| {
            let shape = def
                .shape
                .iter()
                .map(|x| x.to_string())
                .collect::<Vec<_>>()
                .join(",");
            let hier = def.hier.map(|x| x.to_string()).unwrap_or("-".into());
            format!("{}\t{}\t{}", def.name, shape, hier).into_boxed_str()
        })
        .collect();
    io::write_lines(&lines, &format!("{}.params.tsv", args.out))?;

    info!(
        "wrote the {:?} prior over {} shared parameters to {}.*",
        args.model.model,
        prior.dphi(),
        args.out
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn m4b_prior_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("prior").to_string_lossy().into_owned();

        run_prior(&PriorArgs {
            model: ModelArgs {
                model: ModelKind::M4b,
                num_inputs: 2,
                num_groups: 5,
            },
            out: out.clone().into(),
        })?;

        let s0 = Array2::<f64>::from_tsv(&format!("{}.S0.tsv.gz", out), None)?;
        let q0 = Array2::<f64>::from_tsv(&format!("{}.Q0.tsv.gz", out), None)?;
        let r0 = Array1::<f64>::from_tsv(&format!("{}.r0.tsv.gz", out), None)?;
        assert_eq!(s0.dim(), (6, 6));
        assert_abs_diff_eq!(s0[(3, 3)], 2.25);
        assert_abs_diff_eq!(q0[(3, 3)], 1.0 / 2.25);
        assert_abs_diff_eq!(r0, Array1::zeros(6));

        let params = io::read_lines_of_types::<String>(&format!("{}.params.tsv", out), "\t", -1)?;
        assert_eq!(params.lines.len(), 2);
        assert_eq!(params.lines[1][0], "beta");
        assert_eq!(params.lines[1][1], "5,2");
        Ok(())
    }
}
