//! Compressed sparse column storage.

use sprs::{CsMat, TriMat};

use crate::error::{LpBenchError, Result};
use crate::matrix::Matrix;

use super::LinearOperator;

/// A sparse matrix in compressed sparse column (CSC) format.
///
/// Row indices within a column are kept in increasing order. This is the
/// layout conic solvers consume, so a stuffed problem hands these buffers
/// over without reshuffling.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    inner: CsMat<f64>,
}

impl SparseMatrix {
    /// Creates a CSC matrix from raw buffers.
    ///
    /// # Errors
    ///
    /// Returns a dimension error if the buffers are inconsistent.
    pub fn new(
        rows: usize,
        cols: usize,
        colptr: Vec<usize>,
        rowval: Vec<usize>,
        nzval: Vec<f64>,
    ) -> Result<Self> {
        let inner = CsMat::try_new_csc((rows, cols), colptr, rowval, nzval)
            .map_err(|(_, _, _, e)| LpBenchError::Dimension(format!("invalid CSC buffers: {}", e)))?;
        Ok(Self { inner })
    }

    /// Creates an all-zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            inner: TriMat::new((rows, cols)).to_csc(),
        }
    }

    /// Builds a matrix from `(row, col, value)` triplets.
    ///
    /// Duplicate entries are summed and zeros, including sums that cancel,
    /// are dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use lpbench_core::SparseMatrix;
    ///
    /// let m = SparseMatrix::from_triplets(2, 2, &[(1, 0, 2.0), (0, 1, 3.0), (1, 0, 1.0)]).unwrap();
    /// assert_eq!(m.nnz(), 2);
    /// assert_eq!(m.to_dense().get(1, 0), 3.0);
    /// ```
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        triplets: &[(usize, usize, f64)],
    ) -> Result<Self> {
        if let Some(&(i, j, _)) = triplets.iter().find(|&&(i, j, _)| i >= rows || j >= cols) {
            return Err(LpBenchError::Dimension(format!(
                "entry ({}, {}) outside a {}x{} matrix",
                i, j, rows, cols
            )));
        }
        Ok(Self::assemble(rows, cols, triplets.iter().copied()))
    }

    // Sums duplicates through `TriMat`, then drops entries that came out zero.
    pub(crate) fn assemble(
        rows: usize,
        cols: usize,
        triplets: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Self {
        let mut tri = TriMat::new((rows, cols));
        for (i, j, v) in triplets {
            if v != 0.0 {
                tri.add_triplet(i, j, v);
            }
        }
        let summed: CsMat<f64> = tri.to_csc();
        if summed.data().iter().all(|&v| v != 0.0) {
            return Self { inner: summed };
        }

        let mut kept = TriMat::new((rows, cols));
        for (&v, (i, j)) in summed.iter() {
            if v != 0.0 {
                kept.add_triplet(i, j, v);
            }
        }
        Self {
            inner: kept.to_csc(),
        }
    }

    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    pub fn cols(&self) -> usize {
        self.inner.cols()
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.inner.nnz()
    }

    /// Borrows the underlying sprs matrix.
    pub fn as_csmat(&self) -> &CsMat<f64> {
        &self.inner
    }

    /// Consumes the matrix, returning `(colptr, rowval, nzval)`.
    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>, Vec<f64>) {
        self.inner.into_raw_storage()
    }

    /// Iterates stored entries as `(row, col, value)` in column order.
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.inner.iter().map(|(&v, (i, j))| (i, j, v))
    }

    /// Stacks matrices with equal column counts on top of each other.
    ///
    /// # Errors
    ///
    /// Returns a dimension error when column counts differ.
    pub fn vstack(blocks: &[SparseMatrix]) -> Result<SparseMatrix> {
        let Some(first) = blocks.first() else {
            return Ok(SparseMatrix::zeros(0, 0));
        };
        let cols = first.cols();
        if let Some(bad) = blocks.iter().find(|b| b.cols() != cols) {
            return Err(LpBenchError::shape_mismatch(
                "vstack",
                (first.rows(), cols),
                (bad.rows(), bad.cols()),
            ));
        }

        let rows = blocks.iter().map(|b| b.rows()).sum();
        let mut tri = TriMat::new((rows, cols));
        let mut offset = 0;
        for block in blocks {
            for (&v, (i, j)) in block.inner.iter() {
                tri.add_triplet(offset + i, j, v);
            }
            offset += block.rows();
        }
        Ok(Self {
            inner: tri.to_csc(),
        })
    }

    /// Returns `diag(row) · self · diag(col)`.
    pub fn scaled(&self, row: &[f64], col: &[f64]) -> SparseMatrix {
        Self::assemble(
            self.rows(),
            self.cols(),
            self.triplets().map(|(i, j, v)| (i, j, row[i] * v * col[j])),
        )
    }

    /// Squared Euclidean norm of every row.
    pub fn row_norms_sq(&self) -> Vec<f64> {
        let mut norms = vec![0.0; self.rows()];
        for (&v, (i, _)) in self.inner.iter() {
            norms[i] += v * v;
        }
        norms
    }

    /// Squared Euclidean norm of every column.
    pub fn col_norms_sq(&self) -> Vec<f64> {
        self.inner
            .outer_iterator()
            .map(|col| col.iter().map(|(_, &v)| v * v).sum())
            .collect()
    }

    pub fn to_dense(&self) -> Matrix {
        let mut dense = Matrix::zeros(self.rows(), self.cols());
        for (i, j, v) in self.triplets() {
            dense.set(i, j, v);
        }
        dense
    }
}

impl LinearOperator for SparseMatrix {
    fn input_len(&self) -> usize {
        self.cols()
    }

    fn output_len(&self) -> usize {
        self.rows()
    }

    fn forward(&self, x: &[f64], y: &mut [f64]) {
        y.fill(0.0);
        for (col, &xj) in self.inner.outer_iterator().zip(x) {
            if xj == 0.0 {
                continue;
            }
            for (i, &v) in col.iter() {
                y[i] += v * xj;
            }
        }
    }

    fn adjoint(&self, y: &[f64], x: &mut [f64]) {
        for (xj, col) in x.iter_mut().zip(self.inner.outer_iterator()) {
            *xj = col.iter().map(|(i, &v)| v * y[i]).sum();
        }
    }

    fn to_sparse(&self) -> SparseMatrix {
        self.clone()
    }
}
