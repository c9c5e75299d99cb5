use crate::common_io::{read_lines_of_types, write_lines, Delimiter};
use crate::traits::IoOps;
use ndarray::prelude::*;
use rayon::prelude::*;
use std::fmt::Display;
use std::str::FromStr;

fn hdr_line(skip: Option<usize>) -> i64 {
    match skip {
        Some(skip) => skip as i64,
        None => -1, // no skipping
    }
}

impl<T> IoOps for Array2<T>
where
    T: FromStr + Send + Sync + Display,
    <T as FromStr>::Err: Display,
{
    type Scalar = T;
    type Mat = Self;

    fn read_file_delim(
        file: &str,
        delim: impl Into<Delimiter>,
        skip: Option<usize>,
    ) -> anyhow::Result<Self::Mat> {
        let lines_of_types = read_lines_of_types::<T>(file, delim, hdr_line(skip))?.lines;

        if lines_of_types.is_empty() {
            return Err(anyhow::anyhow!("No data in file {}", file));
        }

        let nrows = lines_of_types.len();
        let ncols = lines_of_types[0].len();

        if let Some(bad) = lines_of_types.iter().position(|x| x.len() != ncols) {
            return Err(anyhow::anyhow!(
                "{}: line {} has {} columns, expected {}",
                file,
                bad + 1,
                lines_of_types[bad].len(),
                ncols
            ));
        }

        let data = lines_of_types.into_iter().flatten().collect::<Vec<_>>();

        Ok(Array2::from_shape_vec((nrows, ncols), data)?)
    }

    fn write_file_delim(&self, file: &str, delim: &str) -> anyhow::Result<()> {
        let lines: Vec<Box<str>> = self
            .outer_iter()
            .into_par_iter()
            .map(|row| {
                row.iter()
                    .map(|x| format!("{}", *x))
                    .collect::<Vec<String>>()
                    .join(delim)
                    .into_boxed_str()
            })
            .collect();
        write_lines(&lines, file)?;
        Ok(())
    }
}

/// A vector is stored one element per line, but a single row of
/// delimited values reads back the same way.
impl<T> IoOps for Array1<T>
where
    T: FromStr + Send + Sync + Display,
    <T as FromStr>::Err: Display,
{
    type Scalar = T;
    type Mat = Self;

    fn read_file_delim(
        file: &str,
        delim: impl Into<Delimiter>,
        skip: Option<usize>,
    ) -> anyhow::Result<Self::Mat> {
        let lines_of_types = read_lines_of_types::<T>(file, delim, hdr_line(skip))?.lines;

        if lines_of_types.is_empty() {
            return Err(anyhow::anyhow!("No data in file {}", file));
        }

        Ok(lines_of_types.into_iter().flatten().collect::<Array1<T>>())
    }

    fn write_file_delim(&self, file: &str, _delim: &str) -> anyhow::Result<()> {
        let lines: Vec<Box<str>> = self
            .iter()
            .map(|x| format!("{}", *x).into_boxed_str())
            .collect();
        write_lines(&lines, file)?;
        Ok(())
    }
}
