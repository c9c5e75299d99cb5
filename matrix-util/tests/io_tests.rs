use matrix_util::common_io::{create_temp_dir_file, read_lines_of_types};
use matrix_util::traits::{IoOps, SampleOps};
use ndarray::prelude::*;

#[test]
fn ndarray_io_test() -> anyhow::Result<()> {
    let xx = Array2::<f64>::runif(20, 7);

    let tsv_file = create_temp_dir_file("txt.gz")?;
    xx.to_tsv(tsv_file.to_str().unwrap())?;

    let yy = Array2::<f64>::read_file_delim(tsv_file.to_str().unwrap(), "\t", None)?;

    assert_eq!(yy.dim(), (20, 7));
    approx::assert_abs_diff_eq!(xx, yy, epsilon = 1e-12);

    Ok(())
}

#[test]
fn ndarray_vector_io_test() -> anyhow::Result<()> {
    let xx = array![0.125, -0.25, 3.5, 1e-8];

    let tsv_file = create_temp_dir_file("tsv")?;
    xx.to_tsv(tsv_file.to_str().unwrap())?;

    let yy = Array1::<f64>::from_tsv(tsv_file.to_str().unwrap(), None)?;
    approx::assert_abs_diff_eq!(xx, yy, epsilon = 1e-15);

    Ok(())
}

#[test]
fn csv_with_header_test() -> anyhow::Result<()> {
    let csv_file = create_temp_dir_file("csv")?;
    let csv_file = csv_file.to_str().unwrap();
    std::fs::write(csv_file, "a,b\n# comment\n4,2\n2,3\n")?;

    let yy = Array2::<f64>::read_file_delim(csv_file, ",", Some(0))?;
    assert_eq!(yy, array![[4.0, 2.0], [2.0, 3.0]]);

    Ok(())
}

#[test]
fn ragged_file_is_an_error() -> anyhow::Result<()> {
    let tsv_file = create_temp_dir_file("tsv")?;
    let tsv_file = tsv_file.to_str().unwrap();
    std::fs::write(tsv_file, "1\t2\n3\n")?;

    assert!(Array2::<f64>::from_tsv(tsv_file, None).is_err());

    std::fs::write(tsv_file, "1\tx\n")?;
    assert!(Array2::<f64>::from_tsv(tsv_file, None).is_err());

    Ok(())
}

#[test]
fn broken_line_fails_the_read() -> anyhow::Result<()> {
    let tsv_file = create_temp_dir_file("tsv")?;
    let tsv_file = tsv_file.to_str().unwrap();

    let mut bytes = b"phi[0]\tphi[1]\n1.0\t0.0\n3.0\t2.0\n".to_vec();
    bytes.extend_from_slice(b"\xff\xfe\t1.0\n2.0\t4.0\n5.0\t5.0\n");
    std::fs::write(tsv_file, &bytes)?;

    let ret = read_lines_of_types::<f32>(tsv_file, "\t", 0);
    assert!(ret.is_err());
    assert!(Array2::<f32>::from_tsv(tsv_file, Some(0)).is_err());

    Ok(())
}

#[test]
fn truncated_gzip_fails_the_read() -> anyhow::Result<()> {
    let gz_file = create_temp_dir_file("tsv.gz")?;
    let gz_file = gz_file.to_str().unwrap();

    let xx = Array2::<f64>::runif(200, 5);
    xx.to_tsv(gz_file)?;

    let bytes = std::fs::read(gz_file)?;
    std::fs::write(gz_file, &bytes[..bytes.len() / 2])?;

    assert!(Array2::<f64>::from_tsv(gz_file, None).is_err());

    Ok(())
}
