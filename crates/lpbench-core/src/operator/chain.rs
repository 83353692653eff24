//! Composition and scaling of operators.

use std::sync::Arc;

use crate::error::{LpBenchError, Result};

use super::LinearOperator;

/// Composition `ops[k-1] ∘ … ∘ ops[0]`.
///
/// Forward evaluation runs the operators in order, adjoint evaluation runs
/// their adjoints in reverse order.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lpbench_core::{Chain, LeftMatMul, LinearOperator, Matrix, RightMatMul};
///
/// // vec(X) -> vec(A·X·B) with X 2x2
/// let a = Matrix::from_rows(&[[1.0, 0.0], [0.0, 2.0]]);
/// let b = Matrix::from_rows(&[[1.0], [1.0]]);
/// let chain = Chain::new(vec![
///     Arc::new(LeftMatMul::new(a, 2)),
///     Arc::new(RightMatMul::new(b, 2)),
/// ]).unwrap();
/// assert_eq!(chain.output_len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Chain {
    ops: Vec<Arc<dyn LinearOperator>>,
}

impl Chain {
    /// Creates a chain.
    ///
    /// # Errors
    ///
    /// Returns a dimension error if the chain is empty or if an operator's
    /// output length differs from the next operator's input length.
    pub fn new(ops: Vec<Arc<dyn LinearOperator>>) -> Result<Self> {
        if ops.is_empty() {
            return Err(LpBenchError::Dimension("empty operator chain".to_string()));
        }
        for (i, pair) in ops.windows(2).enumerate() {
            if pair[0].output_len() != pair[1].input_len() {
                return Err(LpBenchError::Dimension(format!(
                    "operator {} produces {} values but operator {} expects {}",
                    i,
                    pair[0].output_len(),
                    i + 1,
                    pair[1].input_len()
                )));
            }
        }
        Ok(Self { ops })
    }

    /// Appends `op` after the current chain.
    pub fn then(mut self, op: Arc<dyn LinearOperator>) -> Result<Self> {
        self.ops.push(op);
        Self::new(self.ops)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl LinearOperator for Chain {
    fn input_len(&self) -> usize {
        self.ops[0].input_len()
    }

    fn output_len(&self) -> usize {
        self.ops[self.ops.len() - 1].output_len()
    }

    fn forward(&self, x: &[f64], y: &mut [f64]) {
        let last = self.ops.len() - 1;
        let mut current = x.to_vec();
        for op in &self.ops[..last] {
            current = op.apply(&current);
        }
        self.ops[last].forward(&current, y);
    }

    fn adjoint(&self, y: &[f64], x: &mut [f64]) {
        let mut current = y.to_vec();
        for op in self.ops[1..].iter().rev() {
            current = op.apply_adjoint(&current);
        }
        self.ops[0].adjoint(&current, x);
    }
}

/// `alpha · Op`.
#[derive(Debug, Clone)]
pub struct Scaled {
    alpha: f64,
    inner: Arc<dyn LinearOperator>,
}

impl Scaled {
    pub fn new(alpha: f64, inner: Arc<dyn LinearOperator>) -> Self {
        Self { alpha, inner }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl LinearOperator for Scaled {
    fn input_len(&self) -> usize {
        self.inner.input_len()
    }

    fn output_len(&self) -> usize {
        self.inner.output_len()
    }

    fn forward(&self, x: &[f64], y: &mut [f64]) {
        self.inner.forward(x, y);
        for v in y.iter_mut() {
            *v *= self.alpha;
        }
    }

    fn adjoint(&self, y: &[f64], x: &mut [f64]) {
        self.inner.adjoint(y, x);
        for v in x.iter_mut() {
            *v *= self.alpha;
        }
    }
}
