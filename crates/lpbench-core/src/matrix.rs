//! Dense column-major matrices.
//!
//! [`Matrix`] wraps a [`DMatrix<f64>`], whose column-major storage makes
//! `as_slice()` equal to `vec(X)`, the vectorization used by every
//! [`LinearOperator`](crate::LinearOperator).

use std::fmt;

use nalgebra::DMatrix;

use crate::error::{LpBenchError, Result};

/// A dense `rows x cols` matrix stored column by column.
///
/// # Example
///
/// ```
/// use lpbench_core::Matrix;
///
/// let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
/// assert_eq!(a.get(1, 0), 3.0);
/// // column-major: vec(A) = [1, 3, 2, 4]
/// assert_eq!(a.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
/// ```
#[derive(Clone, PartialEq)]
pub struct Matrix {
    inner: DMatrix<f64>,
}

impl Matrix {
    /// Creates a matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            inner: DMatrix::zeros(rows, cols),
        }
    }

    /// Creates a matrix filled with `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            inner: DMatrix::from_element(rows, cols, value),
        }
    }

    /// Creates a matrix from a function of `(row, col)`.
    ///
    /// Entries are produced in column-major order, which matters when `f`
    /// draws from a random generator.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for j in 0..cols {
            for i in 0..rows {
                data.push(f(i, j));
            }
        }
        Self {
            inner: DMatrix::from_vec(rows, cols, data),
        }
    }

    /// Creates a matrix from row literals.
    pub fn from_rows<const C: usize>(rows: &[[f64; C]]) -> Self {
        Self::from_fn(rows.len(), C, |i, j| rows[i][j])
    }

    /// Wraps a column-major buffer.
    ///
    /// # Errors
    ///
    /// Returns a dimension error if `data.len() != rows * cols`.
    pub fn from_column_major(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(LpBenchError::Dimension(format!(
                "buffer of length {} cannot hold a {}x{} matrix",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self {
            inner: DMatrix::from_vec(rows, cols, data),
        })
    }

    /// Borrows the underlying nalgebra matrix.
    pub fn as_dmatrix(&self) -> &DMatrix<f64> {
        &self.inner
    }

    pub fn rows(&self) -> usize {
        self.inner.nrows()
    }

    pub fn cols(&self) -> usize {
        self.inner.ncols()
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.inner[(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.inner[(row, col)] = value;
    }

    /// Column-major entries, i.e. `vec(self)`.
    pub fn as_slice(&self) -> &[f64] {
        self.inner.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        self.inner.as_mut_slice()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.inner.as_slice().to_vec()
    }

    /// Returns one column as a slice.
    pub fn column(&self, col: usize) -> &[f64] {
        let rows = self.rows();
        &self.as_slice()[col * rows..(col + 1) * rows]
    }

    /// Matrix product `self * other`.
    ///
    /// # Errors
    ///
    /// Returns a dimension error when `self.cols() != other.rows()`.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols() != other.rows() {
            return Err(LpBenchError::shape_mismatch(
                "matmul",
                self.shape(),
                other.shape(),
            ));
        }
        Ok(Self {
            inner: &self.inner * &other.inner,
        })
    }

    pub fn transpose(&self) -> Matrix {
        Self {
            inner: self.inner.transpose(),
        }
    }

    /// Sum of the diagonal entries.
    ///
    /// # Errors
    ///
    /// Returns a dimension error for non-square matrices.
    pub fn trace(&self) -> Result<f64> {
        if !self.inner.is_square() {
            return Err(LpBenchError::Dimension(format!(
                "trace of a non-square {}x{} matrix",
                self.rows(),
                self.cols()
            )));
        }
        Ok(self.inner.trace())
    }

    /// Frobenius inner product `<self, other> = trace(selfᵀ other)`.
    pub fn inner(&self, other: &Matrix) -> Result<f64> {
        if self.shape() != other.shape() {
            return Err(LpBenchError::shape_mismatch(
                "inner product",
                self.shape(),
                other.shape(),
            ));
        }
        Ok(self.inner.dot(&other.inner))
    }

    /// Applies `f` to every entry.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Matrix {
        Self {
            inner: self.inner.map(f),
        }
    }

    pub fn abs(&self) -> Matrix {
        Self {
            inner: self.inner.abs(),
        }
    }

    pub fn add_scalar(&self, value: f64) -> Matrix {
        Self {
            inner: self.inner.add_scalar(value),
        }
    }

    /// Largest entry, or `None` for an empty matrix.
    pub fn max(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.inner.max())
    }

    /// Smallest entry, or `None` for an empty matrix.
    pub fn min(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.inner.min())
    }

    pub fn frobenius_norm(&self) -> f64 {
        self.inner.norm()
    }

    /// Largest absolute entrywise difference between two equally shaped matrices.
    pub fn max_abs_diff(&self, other: &Matrix) -> Result<f64> {
        if self.shape() != other.shape() {
            return Err(LpBenchError::shape_mismatch(
                "difference",
                self.shape(),
                other.shape(),
            ));
        }
        Ok((&self.inner - &other.inner).amax())
    }
}

impl From<DMatrix<f64>> for Matrix {
    fn from(inner: DMatrix<f64>) -> Self {
        Self { inner }
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix {}x{} [", self.rows(), self.cols())?;
        for row in self.inner.row_iter() {
            write!(f, "  ")?;
            for v in row.iter() {
                write!(f, "{:>10.4} ", v)?;
            }
            writeln!(f)?;
        }
        write!(f, "]")
    }
}
