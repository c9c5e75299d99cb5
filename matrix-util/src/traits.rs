use crate::common_io::Delimiter;

/// Operations to sample random matrices, only works for
/// `nalgebra::DMatrix` and `ndarray::Array2`
pub trait SampleOps {
    type Mat;
    type Scalar;

    /// Sample a matrix from a uniform distribution `U(0,1)`
    fn runif(dd: usize, nn: usize) -> Self::Mat;

    /// Sample a matrix from a normal distribution `N(0,1)`
    fn rnorm(dd: usize, nn: usize) -> Self::Mat;

    /// Sample a `dd x dd` symmetric positive-definite matrix
    ///
    /// $$A = G G^\top / n + \epsilon I$$
    ///
    /// with `G` a `dd x (dd + 2)` matrix of `N(0,1)` entries, kept in
    /// column-major order.
    fn rspd(dd: usize) -> Self::Mat;
}

/// Operations on square matrices that are symmetric by construction
/// but where only one triangle is filled by a numerical routine
pub trait SymmetricOps {
    type Scalar;

    /// Copy the upper triangle into the strictly lower triangle
    fn copy_triu_to_tril(&mut self);

    /// Copy the lower triangle into the strictly upper triangle
    fn copy_tril_to_triu(&mut self);

    /// Check `|a[i,j] - a[j,i]| <= tol` for all pairs
    fn is_symmetric(&self, tol: Self::Scalar) -> bool;
}

/// Read and write matrices from and to files
pub trait IoOps {
    type Scalar;
    type Mat;

    fn read_file_delim(
        file: &str,
        delim: impl Into<Delimiter>,
        skip: Option<usize>,
    ) -> anyhow::Result<Self::Mat>;

    fn from_tsv(tsv_file: &str, skip: Option<usize>) -> anyhow::Result<Self::Mat> {
        Self::read_file_delim(tsv_file, "\t", skip)
    }

    fn write_file_delim(&self, file: &str, delim: &str) -> anyhow::Result<()>;

    fn to_tsv(&self, tsv_file: &str) -> anyhow::Result<()> {
        self.write_file_delim(tsv_file, "\t")
    }

    fn to_csv(&self, csv_file: &str) -> anyhow::Result<()> {
        self.write_file_delim(csv_file, ",")
    }
}
