//! Affine matrix expressions.
//!
//! An [`Expr`] is `Σ_k Op_k(vec(V_k)) + c`: a sum of linear operator terms,
//! each acting on one variable, plus a constant. Operators compose as
//! the expression is built, so `A·X·B` becomes one term whose operator is
//! the chain `X -> A·X -> A·X·B`.

use std::ops::Neg;
use std::sync::Arc;

use lpbench_core::{
    Chain, Identity, InnerProduct, LeftMatMul, LinearOperator, LpBenchError, Matrix, Result,
    RightMatMul, Scaled,
};

use crate::assignment::Assignment;
use crate::constraint::Constraint;
use crate::variable::Variable;

/// One operator acting on one variable.
#[derive(Debug, Clone)]
pub struct Term {
    pub(crate) var: Variable,
    pub(crate) op: Arc<dyn LinearOperator>,
}

impl Term {
    pub fn variable(&self) -> &Variable {
        &self.var
    }

    pub fn operator(&self) -> &Arc<dyn LinearOperator> {
        &self.op
    }

    fn then(self, next: Arc<dyn LinearOperator>) -> Result<Term> {
        let op: Arc<dyn LinearOperator> = Arc::new(Chain::new(vec![self.op, next])?);
        Ok(Term { var: self.var, op })
    }
}

/// An affine expression with a matrix shape.
///
/// # Example
///
/// ```
/// use lpbench_core::Matrix;
/// use lpbench_model::{Assignment, Expr, Variable};
///
/// let x = Variable::new("X", 2, 2);
/// let a = Matrix::from_rows(&[[1.0, 1.0]]);
/// let ax = Expr::var(&x).left_mul(&a).unwrap();
/// assert_eq!(ax.shape(), (1, 2));
///
/// let values = Assignment::new()
///     .with(&x, Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]))
///     .unwrap();
/// assert_eq!(ax.eval(&values).unwrap(), Matrix::from_rows(&[[4.0, 6.0]]));
/// ```
#[derive(Debug, Clone)]
pub struct Expr {
    rows: usize,
    cols: usize,
    terms: Vec<Term>,
    constant: Vec<f64>,
}

impl Expr {
    /// The variable itself.
    pub fn var(var: &Variable) -> Self {
        let (rows, cols) = var.shape();
        Self {
            rows,
            cols,
            terms: vec![Term {
                var: var.clone(),
                op: Arc::new(Identity::new(var.len())),
            }],
            constant: vec![0.0; rows * cols],
        }
    }

    /// A constant matrix.
    pub fn constant(value: &Matrix) -> Self {
        Self {
            rows: value.rows(),
            cols: value.cols(),
            terms: Vec::new(),
            constant: value.as_slice().to_vec(),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of scalar entries.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Constant part, column-major.
    pub fn constant_part(&self) -> &[f64] {
        &self.constant
    }

    /// `A · self`.
    ///
    /// # Errors
    ///
    /// Returns a dimension error when `a.cols()` differs from the expression's rows.
    pub fn left_mul(self, a: &Matrix) -> Result<Expr> {
        if a.cols() != self.rows {
            return Err(LpBenchError::shape_mismatch(
                "left multiplication",
                a.shape(),
                self.shape(),
            ));
        }
        let cols = self.cols;
        let op: Arc<dyn LinearOperator> = Arc::new(LeftMatMul::new(a.clone(), cols));
        self.map_linear(op, (a.rows(), cols))
    }

    /// `self · B`.
    ///
    /// # Errors
    ///
    /// Returns a dimension error when `b.rows()` differs from the expression's columns.
    pub fn right_mul(self, b: &Matrix) -> Result<Expr> {
        if b.rows() != self.cols {
            return Err(LpBenchError::shape_mismatch(
                "right multiplication",
                self.shape(),
                b.shape(),
            ));
        }
        let rows = self.rows;
        let op: Arc<dyn LinearOperator> = Arc::new(RightMatMul::new(b.clone(), rows));
        self.map_linear(op, (rows, b.cols()))
    }

    /// The scalar `trace(Cᵀ · self)`.
    pub fn inner(self, c: &Matrix) -> Result<Expr> {
        let op: Arc<dyn LinearOperator> = Arc::new(InnerProduct::for_shape(c, self.shape())?);
        self.map_linear(op, (1, 1))
    }

    /// `alpha · self`.
    pub fn scale(self, alpha: f64) -> Expr {
        let terms = self
            .terms
            .into_iter()
            .map(|t| {
                let op: Arc<dyn LinearOperator> = Arc::new(Scaled::new(alpha, t.op));
                Term { var: t.var, op }
            })
            .collect();
        Expr {
            rows: self.rows,
            cols: self.cols,
            terms,
            constant: self.constant.iter().map(|c| alpha * c).collect(),
        }
    }

    /// `self + other`.
    pub fn plus(mut self, other: Expr) -> Result<Expr> {
        if self.shape() != other.shape() {
            return Err(LpBenchError::shape_mismatch("addition", self.shape(), other.shape()));
        }
        self.terms.extend(other.terms);
        for (c, o) in self.constant.iter_mut().zip(other.constant) {
            *c += o;
        }
        Ok(self)
    }

    /// `self - other`.
    pub fn minus(self, other: Expr) -> Result<Expr> {
        self.plus(-other)
    }

    /// Adds `value` to every entry.
    pub fn plus_scalar(mut self, value: f64) -> Expr {
        for c in self.constant.iter_mut() {
            *c += value;
        }
        self
    }

    /// Elementwise `self ≥ value`.
    pub fn ge(self, value: f64) -> Constraint {
        Constraint::inequality((-self).plus_scalar(value))
    }

    /// Elementwise `self ≤ value`.
    pub fn le(self, value: f64) -> Constraint {
        Constraint::inequality(self.plus_scalar(-value))
    }

    /// `self == other`.
    pub fn equals(self, other: Expr) -> Result<Constraint> {
        Ok(Constraint::equality(self.minus(other)?))
    }

    /// Evaluates the expression at `values`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a variable has no value.
    pub fn eval(&self, values: &Assignment) -> Result<Matrix> {
        let mut out = self.constant.clone();
        let mut buf = vec![0.0; out.len()];
        for term in &self.terms {
            let value = values.value_by_id(term.var.id()).ok_or_else(|| {
                LpBenchError::Config(format!("variable {} has no value", term.var))
            })?;
            term.op.forward(value.as_slice(), &mut buf);
            for (o, b) in out.iter_mut().zip(&buf) {
                *o += b;
            }
        }
        Matrix::from_column_major(self.rows, self.cols, out)
    }

    /// Evaluates a scalar expression.
    pub fn eval_scalar(&self, values: &Assignment) -> Result<f64> {
        if self.shape() != (1, 1) {
            return Err(LpBenchError::Dimension(format!(
                "expected a scalar expression, got {}x{}",
                self.rows, self.cols
            )));
        }
        Ok(self.eval(values)?.get(0, 0))
    }

    fn map_linear(self, op: Arc<dyn LinearOperator>, shape: (usize, usize)) -> Result<Expr> {
        let constant = op.apply(&self.constant);
        let terms = self
            .terms
            .into_iter()
            .map(|t| t.then(Arc::clone(&op)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Expr {
            rows: shape.0,
            cols: shape.1,
            terms,
            constant,
        })
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        self.scale(-1.0)
    }
}
