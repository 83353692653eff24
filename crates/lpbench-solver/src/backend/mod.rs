//! Solver backends.
//!
//! A backend receives a [`ConicProblem`] and returns the raw primal and dual
//! vectors in the coordinates it was given. Mapping those back to variables
//! and undoing any preconditioning happens in [`solve`](crate::solve()).

mod clarabel;

use std::fmt::Debug;
use std::time::Duration;

use lpbench_config::{Backend, Precision, SolverOptions};
use lpbench_core::Result;
use lpbench_model::ConicProblem;

pub use self::clarabel::ClarabelBackend;
use crate::solution::SolveStatus;

/// Backend settings resolved from [`SolverOptions`].
///
/// # Example
///
/// ```
/// use lpbench_config::SolverOptions;
/// use lpbench_solver::BackendSettings;
///
/// let settings = BackendSettings::from_options(&SolverOptions::new().with_eps(1e-3));
/// assert_eq!(settings.abs_tol, 1e-3);
/// assert_eq!(settings.equilibrate, Some(10));
///
/// // the matrix-free preconditioner replaces the backend's own equilibration
/// let settings = BackendSettings::from_options(&SolverOptions::new().with_precond(true));
/// assert_eq!(settings.equilibrate, None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BackendSettings {
    pub max_iters: u32,
    pub verbose: bool,
    /// Absolute duality-gap tolerance.
    pub abs_tol: f64,
    /// Relative gap and feasibility tolerance.
    pub rel_tol: f64,
    /// Backend equilibration passes, `None` to disable it.
    pub equilibrate: Option<u32>,
    pub precision: Precision,
}

impl BackendSettings {
    pub fn from_options(options: &SolverOptions) -> Self {
        let equilibrate = if options.precond || options.equil_steps == 0 {
            None
        } else {
            Some(options.equil_steps)
        };
        Self {
            max_iters: options.max_iters,
            verbose: options.verbose,
            abs_tol: options.abs_tolerance(),
            rel_tol: options.rel_tolerance(),
            equilibrate,
            precision: options.precision,
        }
    }
}

/// Raw result of a successful backend run.
#[derive(Debug, Clone)]
pub struct ConicSolution {
    pub status: SolveStatus,
    /// Primal point.
    pub x: Vec<f64>,
    /// Slacks, `s = b - A x`.
    pub s: Vec<f64>,
    /// Duals of `A x + s = b`.
    pub z: Vec<f64>,
    pub iterations: u32,
    pub solve_time: Duration,
    pub primal_residual: f64,
    pub dual_residual: f64,
}

/// A conic solver for `min qᵀx s.t. A x + s = b, s ∈ K`.
///
/// Implementations map solver failures to
/// [`LpBenchError`](lpbench_core::LpBenchError) variants and only return
/// `Ok` for solved or almost solved problems.
pub trait ConeSolver: Debug + Send + Sync {
    /// Name used in logs and error messages.
    fn name(&self) -> &'static str;

    fn solve_conic(&self, problem: &ConicProblem, settings: &BackendSettings)
        -> Result<ConicSolution>;
}

/// Returns the backend selected by a solver-selection token.
pub fn backend_for(backend: Backend) -> Box<dyn ConeSolver> {
    match backend {
        Backend::Clarabel => Box::new(ClarabelBackend::new()),
    }
}
