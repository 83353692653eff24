//! lpbench - Sylvester-LP solver-configuration experiments in Rust
//!
//! Formulates `min trace(Cᵀ X)` over `X ≥ 0` with a bilinear constraint on
//! `A·X·B`, solves it under several solver configurations and prints the
//! objective of each.
//!
//! # Example
//!
//! ```rust
//! use lpbench::prelude::*;
//!
//! let config = ExperimentConfig::default()
//!     .with_dimensions(3, 2)
//!     .with_runs(vec![RunConfig::new("direct", Formulation::Direct)]);
//!
//! let mut out = Vec::new();
//! let result = lpbench::run_experiment(&config, &mut out).unwrap();
//!
//! let printed = String::from_utf8(out).unwrap();
//! assert!(printed.starts_with("nnz = 36\n"));
//! assert_eq!(result.run_count(), 1);
//! ```

// Problem data and operators
pub use lpbench_core::{LinearOperator, LpBenchError, Matrix, Result};

// Modeling layer
pub use lpbench_model::{
    stuff, Assignment, ConicProblem, Constraint, Expr, Formulated, Problem, Sense,
    SylvesterInstance, Variable,
};

// Configuration
pub use lpbench_config::{
    Backend, ConfigError, ExperimentConfig, Formulation, Precision, RunConfig, SolverOptions,
};

// Solving
pub use lpbench_solver::{solve, Solution, SolveStatus};

// Experiments and reports
pub use lpbench_benchmark::{
    CsvExporter, Experiment, ExperimentError, ExperimentResult, MarkdownReport, RunRecord,
    TextSummary,
};

#[cfg(feature = "console")]
pub mod console;

mod experiment;
pub use experiment::run_experiment;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use super::{Expr, Matrix, Problem, Variable};
    pub use super::{ExperimentConfig, Formulation, Precision, RunConfig, SolverOptions};
    pub use super::{Experiment, ExperimentResult, Solution, TextSummary};
}
