//! Tests for dense matrices

use super::error::LpBenchError;
use super::matrix::*;

#[test]
fn test_column_major_layout() {
    let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    assert_eq!(a.shape(), (2, 3));
    assert_eq!(a.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    assert_eq!(a.column(2), &[3.0, 6.0]);
}

#[test]
fn test_matmul() {
    let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
    let b = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]);
    let c = a.matmul(&b).unwrap();
    assert_eq!(c, Matrix::from_rows(&[[19.0, 22.0], [43.0, 50.0]]));
}

#[test]
fn test_matmul_rectangular() {
    let a = Matrix::from_rows(&[[1.0, 0.0, 2.0]]);
    let b = Matrix::from_rows(&[[1.0], [5.0], [3.0]]);
    let c = a.matmul(&b).unwrap();
    assert_eq!(c.shape(), (1, 1));
    assert_eq!(c.get(0, 0), 7.0);
}

#[test]
fn test_matmul_shape_mismatch() {
    let a = Matrix::zeros(2, 3);
    let b = Matrix::zeros(2, 3);
    assert!(matches!(a.matmul(&b), Err(LpBenchError::Dimension(_))));
}

#[test]
fn test_transpose_and_trace() {
    let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
    let t = a.transpose();
    assert_eq!(t.get(0, 1), 3.0);
    assert_eq!(a.trace().unwrap(), 5.0);
    assert!(Matrix::zeros(2, 3).trace().is_err());
}

#[test]
fn test_inner_equals_trace_of_product() {
    let c = Matrix::from_rows(&[[1.0, -2.0], [0.5, 3.0]]);
    let x = Matrix::from_rows(&[[2.0, 1.0], [4.0, -1.0]]);
    let via_trace = c.transpose().matmul(&x).unwrap().trace().unwrap();
    assert!((c.inner(&x).unwrap() - via_trace).abs() < 1e-12);
}

#[test]
fn test_abs_and_offset() {
    let a = Matrix::from_rows(&[[-1.0, 2.0]]).abs().add_scalar(0.5);
    assert_eq!(a.as_slice(), &[1.5, 2.5]);
    assert_eq!(a.min(), Some(1.5));
    assert_eq!(a.max(), Some(2.5));
}

#[test]
fn test_from_column_major_checks_length() {
    assert!(Matrix::from_column_major(2, 2, vec![0.0; 3]).is_err());
    let m = Matrix::from_column_major(2, 1, vec![1.0, 2.0]).unwrap();
    assert_eq!(m.get(1, 0), 2.0);
}

#[test]
fn test_max_abs_diff() {
    let a = Matrix::from_rows(&[[1.0, 2.0]]);
    let b = Matrix::from_rows(&[[1.5, 1.0]]);
    assert_eq!(a.max_abs_diff(&b).unwrap(), 1.0);
}

#[test]
fn test_wraps_nalgebra_storage() {
    let d = nalgebra::DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    let a = Matrix::from(d.clone());
    assert_eq!(a.as_dmatrix(), &d);
    assert_eq!(a.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
    assert_eq!(a.max(), Some(4.0));
    assert_eq!(Matrix::zeros(0, 3).max(), None);
}
