//! Linear programs over matrix variables.

use std::collections::HashSet;

use lpbench_core::{LpBenchError, Result};

use crate::assignment::Assignment;
use crate::constraint::Constraint;
use crate::expr::Expr;
use crate::variable::Variable;

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

/// An objective and a list of constraints.
///
/// # Example
///
/// ```
/// use lpbench_core::Matrix;
/// use lpbench_model::{Expr, Problem, Variable};
///
/// let x = Variable::new("x", 2, 1);
/// let c = Matrix::from_rows(&[[1.0], [-1.0]]);
/// let problem = Problem::minimize(
///     Expr::var(&x).inner(&c).unwrap(),
///     vec![Expr::var(&x).ge(0.0), Expr::var(&x).le(1.0)],
/// ).unwrap();
///
/// assert_eq!(problem.variables().len(), 1);
/// assert_eq!(problem.num_constraint_rows(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    sense: Sense,
    objective: Expr,
    constraints: Vec<Constraint>,
    variables: Vec<Variable>,
}

impl Problem {
    /// Minimizes a scalar objective.
    ///
    /// # Errors
    ///
    /// Returns a dimension error when the objective is not `1x1`.
    pub fn minimize(objective: Expr, constraints: Vec<Constraint>) -> Result<Self> {
        Self::new(Sense::Minimize, objective, constraints)
    }

    /// Maximizes a scalar objective.
    pub fn maximize(objective: Expr, constraints: Vec<Constraint>) -> Result<Self> {
        Self::new(Sense::Maximize, objective, constraints)
    }

    fn new(sense: Sense, objective: Expr, constraints: Vec<Constraint>) -> Result<Self> {
        if objective.shape() != (1, 1) {
            let (r, c) = objective.shape();
            return Err(LpBenchError::Dimension(format!(
                "objective must be scalar, got {}x{}",
                r, c
            )));
        }
        let mut seen = HashSet::new();
        let mut variables = Vec::new();
        let exprs = std::iter::once(&objective).chain(constraints.iter().map(|c| c.expr()));
        for expr in exprs {
            for term in expr.terms() {
                if seen.insert(term.variable().id()) {
                    variables.push(term.variable().clone());
                }
            }
        }
        Ok(Self {
            sense,
            objective,
            constraints,
            variables,
        })
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn objective(&self) -> &Expr {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Variables in order of first appearance (objective first).
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Total number of scalar decision variables.
    pub fn num_scalar_variables(&self) -> usize {
        self.variables.iter().map(Variable::len).sum()
    }

    /// Total number of scalar constraint rows.
    pub fn num_constraint_rows(&self) -> usize {
        self.constraints.iter().map(Constraint::len).sum()
    }

    /// Objective value at `values`.
    pub fn objective_value(&self, values: &Assignment) -> Result<f64> {
        self.objective.eval_scalar(values)
    }

    /// Largest violation over all constraints at `values`.
    pub fn max_violation(&self, values: &Assignment) -> Result<f64> {
        self.constraints
            .iter()
            .try_fold(0.0, |worst, c| Ok(f64::max(worst, c.violation(values)?)))
    }
}
