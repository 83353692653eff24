//! Operators backed by dense matrices.

use nalgebra::{DMatrix, DMatrixView, DMatrixViewMut};

use crate::error::{LpBenchError, Result};
use crate::matrix::Matrix;

use super::LinearOperator;

/// The identity map on `R^n`.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    len: usize,
}

impl Identity {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl LinearOperator for Identity {
    fn input_len(&self) -> usize {
        self.len
    }

    fn output_len(&self) -> usize {
        self.len
    }

    fn forward(&self, x: &[f64], y: &mut [f64]) {
        y.copy_from_slice(x);
    }

    fn adjoint(&self, y: &[f64], x: &mut [f64]) {
        x.copy_from_slice(y);
    }
}

/// `vec(X) -> vec(A·X)` for `X` with a fixed number of columns.
///
/// # Example
///
/// ```
/// use lpbench_core::{LeftMatMul, LinearOperator, Matrix};
///
/// let a = Matrix::from_rows(&[[1.0, 2.0]]);
/// let op = LeftMatMul::new(a, 1);
/// assert_eq!(op.apply(&[3.0, 4.0]), vec![11.0]);
/// ```
#[derive(Debug, Clone)]
pub struct LeftMatMul {
    a: Matrix,
    cols: usize,
}

impl LeftMatMul {
    /// `X` has shape `a.cols() x cols`; the output has shape `a.rows() x cols`.
    pub fn new(a: Matrix, cols: usize) -> Self {
        Self { a, cols }
    }

    pub fn matrix(&self) -> &Matrix {
        &self.a
    }

    /// Output shape `(rows, cols)`.
    pub fn output_shape(&self) -> (usize, usize) {
        (self.a.rows(), self.cols)
    }
}

impl LinearOperator for LeftMatMul {
    fn input_len(&self) -> usize {
        self.a.cols() * self.cols
    }

    fn output_len(&self) -> usize {
        self.a.rows() * self.cols
    }

    fn forward(&self, x: &[f64], y: &mut [f64]) {
        let (m, k) = self.a.shape();
        let x = DMatrixView::from_slice(x, k, self.cols);
        let mut y = DMatrixViewMut::from_slice(y, m, self.cols);
        y.gemm(1.0, self.a.as_dmatrix(), &x, 0.0);
    }

    fn adjoint(&self, y: &[f64], x: &mut [f64]) {
        let (m, k) = self.a.shape();
        let y = DMatrixView::from_slice(y, m, self.cols);
        let mut x = DMatrixViewMut::from_slice(x, k, self.cols);
        x.gemm_tr(1.0, self.a.as_dmatrix(), &y, 0.0);
    }
}

/// `vec(X) -> vec(X·B)` for `X` with a fixed number of rows.
#[derive(Debug, Clone)]
pub struct RightMatMul {
    b: Matrix,
    bt: DMatrix<f64>,
    rows: usize,
}

impl RightMatMul {
    /// `X` has shape `rows x b.rows()`; the output has shape `rows x b.cols()`.
    pub fn new(b: Matrix, rows: usize) -> Self {
        let bt = b.as_dmatrix().transpose();
        Self { b, bt, rows }
    }

    pub fn matrix(&self) -> &Matrix {
        &self.b
    }

    /// Output shape `(rows, cols)`.
    pub fn output_shape(&self) -> (usize, usize) {
        (self.rows, self.b.cols())
    }
}

impl LinearOperator for RightMatMul {
    fn input_len(&self) -> usize {
        self.rows * self.b.rows()
    }

    fn output_len(&self) -> usize {
        self.rows * self.b.cols()
    }

    fn forward(&self, x: &[f64], y: &mut [f64]) {
        let (k, n) = self.b.shape();
        let x = DMatrixView::from_slice(x, self.rows, k);
        let mut y = DMatrixViewMut::from_slice(y, self.rows, n);
        y.gemm(1.0, &x, self.b.as_dmatrix(), 0.0);
    }

    fn adjoint(&self, y: &[f64], x: &mut [f64]) {
        let (k, n) = self.b.shape();
        let y = DMatrixView::from_slice(y, self.rows, n);
        let mut x = DMatrixViewMut::from_slice(x, self.rows, k);
        // X = Y·Bᵀ
        x.gemm(1.0, &y, &self.bt, 0.0);
    }
}

/// `vec(X) -> <C, X>`, the scalar functional `trace(Cᵀ X)`.
#[derive(Debug, Clone)]
pub struct InnerProduct {
    c: Vec<f64>,
}

impl InnerProduct {
    pub fn new(c: &Matrix) -> Self {
        Self {
            c: c.as_slice().to_vec(),
        }
    }

    /// Builds the functional for an `X` of the given shape.
    ///
    /// # Errors
    ///
    /// Returns a dimension error when `c` and `X` differ in shape.
    pub fn for_shape(c: &Matrix, shape: (usize, usize)) -> Result<Self> {
        if c.shape() != shape {
            return Err(LpBenchError::shape_mismatch("trace(Cᵀ X)", c.shape(), shape));
        }
        Ok(Self::new(c))
    }
}

impl LinearOperator for InnerProduct {
    fn input_len(&self) -> usize {
        self.c.len()
    }

    fn output_len(&self) -> usize {
        1
    }

    fn forward(&self, x: &[f64], y: &mut [f64]) {
        y[0] = self.c.iter().zip(x).map(|(c, x)| c * x).sum();
    }

    fn adjoint(&self, y: &[f64], x: &mut [f64]) {
        for (xi, &ci) in x.iter_mut().zip(&self.c) {
            *xi = y[0] * ci;
        }
    }
}
