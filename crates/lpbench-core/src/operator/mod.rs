//! Linear operators with forward and adjoint evaluation.
//!
//! Problem data is only ever touched through these two products. A
//! constraint such as `A·X·B ≤ 1` is represented as a [`Chain`] of a
//! [`LeftMatMul`] and a [`RightMatMul`] acting on `vec(X)`, and its sparse
//! matrix `Bᵀ ⊗ A` exists only once [`LinearOperator::to_sparse`] is asked
//! for it.

mod chain;
mod dense;
mod sparse;

use std::fmt::Debug;

pub use chain::{Chain, Scaled};
pub use dense::{Identity, InnerProduct, LeftMatMul, RightMatMul};
pub use sparse::SparseMatrix;

/// A linear map `R^input_len -> R^output_len`.
///
/// Implementations overwrite their output buffer; callers size the buffers
/// with [`input_len`](Self::input_len) and [`output_len`](Self::output_len).
pub trait LinearOperator: Debug + Send + Sync {
    /// Length of the input vector.
    fn input_len(&self) -> usize;

    /// Length of the output vector.
    fn output_len(&self) -> usize;

    /// Evaluates `y = Op x`.
    fn forward(&self, x: &[f64], y: &mut [f64]);

    /// Evaluates `x = Opᵀ y`.
    fn adjoint(&self, y: &[f64], x: &mut [f64]);

    /// Allocating variant of [`forward`](Self::forward).
    fn apply(&self, x: &[f64]) -> Vec<f64> {
        let mut y = vec![0.0; self.output_len()];
        self.forward(x, &mut y);
        y
    }

    /// Allocating variant of [`adjoint`](Self::adjoint).
    fn apply_adjoint(&self, y: &[f64]) -> Vec<f64> {
        let mut x = vec![0.0; self.input_len()];
        self.adjoint(y, &mut x);
        x
    }

    /// Materializes the operator by probing it with unit vectors.
    ///
    /// Costs one forward product per input coordinate.
    fn to_sparse(&self) -> SparseMatrix {
        let n = self.input_len();
        let m = self.output_len();
        let mut triplets = Vec::new();
        let mut e = vec![0.0; n];
        let mut y = vec![0.0; m];
        for j in 0..n {
            e[j] = 1.0;
            self.forward(&e, &mut y);
            e[j] = 0.0;
            triplets.extend(y.iter().enumerate().map(|(i, &v)| (i, j, v)));
        }
        SparseMatrix::assemble(m, n, triplets)
    }
}
