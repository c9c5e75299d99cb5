use crate::common::*;

#[derive(Args, Debug)]
pub struct InvertArgs {
    /// symmetric positive-definite matrix `S` or `Q` (`.tsv` or `.tsv.gz`)
    pub matrix_file: Box<str>,

    /// paired vector `m` or `r`, one value per line
    #[arg(short, long)]
    pub vector_file: Option<Box<str>>,

    /// the matrix file holds the upper Cholesky factor
    #[arg(long, default_value_t = false)]
    pub cholesky: bool,

    /// output header: `{out}.mat.tsv.gz` and `{out}.vec.tsv.gz`
    #[arg(short, long, required = true)]
    pub out: Box<str>,
}

/// Switch moment to natural parameters or back
pub fn run_invert(args: &InvertArgs) -> anyhow::Result<()> {
    let mut mat = Array2::<f64>::from_tsv(&args.matrix_file, None)?;
    let mut vec = args
        .vector_file
        .as_deref()
        .map(|file| Array1::<f64>::from_tsv(file, None))
        .transpose()?;

    info!(
        "read a {}x{} matrix from {}",
        mat.nrows(),
        mat.ncols(),
        args.matrix_file
    );

    // rows of the file land in a row-major buffer, worked on in place
    invert_normal_params(
        Placement::InPlace(mat.view_mut()),
        vec.as_mut().map(|v| Placement::InPlace(v.view_mut())),
        args.cholesky,
    )?;

    io::mkdir(&args.out)?;
    let mat_file = format!("{}.mat.tsv.gz", args.out);
    mat.to_tsv(&mat_file)?;
    info!("wrote {}", mat_file);

    if let Some(vec) = vec {
        let vec_file = format!("{}.vec.tsv.gz", args.out);
        vec.to_tsv(&vec_file)?;
        info!("wrote {}", vec_file);
    }
    Ok(())
}
