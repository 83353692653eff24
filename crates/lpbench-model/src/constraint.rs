//! Constraints in the normalized forms `expr = 0` and `expr ≤ 0`.

use lpbench_core::Result;

use crate::assignment::Assignment;
use crate::expr::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// `expr = 0` elementwise.
    Equality,
    /// `expr ≤ 0` elementwise.
    Inequality,
}

/// A constraint on an affine expression.
#[derive(Debug, Clone)]
pub struct Constraint {
    kind: ConstraintKind,
    expr: Expr,
}

impl Constraint {
    pub fn equality(expr: Expr) -> Self {
        Self {
            kind: ConstraintKind::Equality,
            expr,
        }
    }

    pub fn inequality(expr: Expr) -> Self {
        Self {
            kind: ConstraintKind::Inequality,
            expr,
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Number of scalar rows.
    pub fn len(&self) -> usize {
        self.expr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expr.is_empty()
    }

    /// Largest violation at `values`: `max |expr|` for equalities,
    /// `max(expr, 0)` for inequalities.
    pub fn violation(&self, values: &Assignment) -> Result<f64> {
        let residual = self.expr.eval(values)?;
        let values = residual.as_slice().iter();
        let worst = match self.kind {
            ConstraintKind::Equality => values.fold(0.0, |m, v| f64::max(m, v.abs())),
            ConstraintKind::Inequality => values.fold(0.0, |m, &v| f64::max(m, v)),
        };
        Ok(worst)
    }
}
