//! Results of a solve call.

use std::fmt;
use std::time::Duration;

use lpbench_core::{Matrix, Result};
use lpbench_model::{Assignment, Expr, Variable};

/// How well the returned point satisfies the backend's tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Full tolerances met.
    Solved,
    /// Only the backend's reduced tolerances met.
    AlmostSolved,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Solved => write!(f, "solved"),
            SolveStatus::AlmostSolved => write!(f, "almost solved"),
        }
    }
}

/// Optimal value, variable values and solver statistics.
///
/// Variables are never mutated by a solve; read their values here.
#[derive(Debug, Clone)]
pub struct Solution {
    pub(crate) backend: &'static str,
    pub(crate) status: SolveStatus,
    pub(crate) objective: f64,
    pub(crate) values: Assignment,
    pub(crate) duals: Vec<Vec<f64>>,
    pub(crate) nnz: usize,
    pub(crate) iterations: u32,
    pub(crate) solve_time: Duration,
    pub(crate) max_violation: f64,
    pub(crate) primal_residual: f64,
    pub(crate) dual_residual: f64,
}

impl Solution {
    /// Name of the backend that produced this solution.
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Objective value in the problem's own sense, evaluated at the
    /// returned point in double precision.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    pub fn values(&self) -> &Assignment {
        &self.values
    }

    pub fn value(&self, var: &Variable) -> Option<&Matrix> {
        self.values.value(var)
    }

    /// Evaluates an expression at the returned point.
    pub fn eval(&self, expr: &Expr) -> Result<Matrix> {
        expr.eval(&self.values)
    }

    /// Evaluates a scalar expression at the returned point.
    pub fn eval_scalar(&self, expr: &Expr) -> Result<f64> {
        expr.eval_scalar(&self.values)
    }

    /// Stored nonzeros of the constraint matrix handed to the backend.
    pub fn nnz(&self) -> usize {
        self.nnz
    }

    /// Dual values of the `index`-th constraint, in the problem's order.
    pub fn dual(&self, index: usize) -> Option<&[f64]> {
        self.duals.get(index).map(Vec::as_slice)
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Wall time spent inside the backend.
    pub fn solve_time(&self) -> Duration {
        self.solve_time
    }

    /// Largest constraint violation at the returned point.
    pub fn max_violation(&self) -> f64 {
        self.max_violation
    }

    /// Backend-reported primal residual, in scaled coordinates when preconditioned.
    pub fn primal_residual(&self) -> f64 {
        self.primal_residual
    }

    pub fn dual_residual(&self) -> f64 {
        self.dual_residual
    }
}
