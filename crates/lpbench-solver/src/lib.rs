//! lpbench Solver - dispatching conic problems to solver backends
//!
//! This crate connects modeled problems to an external solver:
//! - [`ConeSolver`] is the seam a backend implements
//! - [`ClarabelBackend`] runs Clarabel in double or single precision
//! - [`Scaling`] is a matrix-free diagonal preconditioner
//! - [`solve`] canonicalizes, scales, dispatches and maps results back
//!
//! # Example
//!
//! ```
//! use lpbench_config::SolverOptions;
//! use lpbench_core::Matrix;
//! use lpbench_model::{Expr, Problem, Variable};
//!
//! // minimize x1 - x2 over the unit box
//! let x = Variable::new("x", 2, 1);
//! let c = Matrix::from_rows(&[[1.0], [-1.0]]);
//! let problem = Problem::minimize(
//!     Expr::var(&x).inner(&c).unwrap(),
//!     vec![Expr::var(&x).ge(0.0), Expr::var(&x).le(1.0)],
//! ).unwrap();
//!
//! let solution = lpbench_solver::solve(&problem, &SolverOptions::default(), 1).unwrap();
//! assert!((solution.objective() + 1.0).abs() < 1e-6);
//! assert!(solution.value(&x).unwrap().get(1, 0) > 0.999);
//! ```

pub mod backend;
pub mod scaling;
pub mod solution;
pub mod solve;

#[cfg(test)]
mod tests;

pub use backend::{backend_for, BackendSettings, ClarabelBackend, ConeSolver, ConicSolution};
pub use scaling::{col_norms_sq, row_norms_sq, NormEstimate, Scaling, MAX_SCALE, MIN_SCALE};
pub use solution::{Solution, SolveStatus};
pub use solve::{solve, solve_with};
