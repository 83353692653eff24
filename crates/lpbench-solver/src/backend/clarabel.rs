//! Clarabel interior-point backend.

use std::time::Duration;

use ::clarabel::algebra::{CscMatrix, FloatT};
use ::clarabel::solver::{
    DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT,
};
use lpbench_config::Precision;
use lpbench_core::{LpBenchError, Result, SparseMatrix};
use lpbench_model::{Cone, ConicProblem};
use num_traits::{Float, NumCast};
use tracing::{debug, warn};

use super::{BackendSettings, ConeSolver, ConicSolution};
use crate::solution::SolveStatus;

const NAME: &str = "clarabel";

/// Runs [Clarabel](https://oxfordcontrol.github.io/ClarabelDocs/stable/).
///
/// The problem data is converted to the precision requested in
/// [`BackendSettings::precision`] and the results converted back to `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClarabelBackend;

impl ClarabelBackend {
    pub fn new() -> Self {
        Self
    }

    fn solve_in<T: FloatT>(
        &self,
        problem: &ConicProblem,
        settings: &BackendSettings,
    ) -> Result<ConicSolution> {
        let n = problem.num_vars();
        let p = CscMatrix::<T>::zeros((n, n));
        let q = cast_slice::<T>(&problem.q)?;
        let a = csc_matrix::<T>(&problem.a)?;
        let b = cast_slice::<T>(&problem.b)?;
        let cones = cones::<T>(&problem.cones);
        let clarabel_settings = build_settings::<T>(settings)?;

        let mut solver = DefaultSolver::new(&p, &q, &a, &b, &cones, clarabel_settings)
            .map_err(|e| LpBenchError::Backend(format!("{}: {}", NAME, e)))?;
        solver.solve();

        let solution = &solver.solution;
        debug!(
            solver = NAME,
            status = ?solution.status,
            iterations = solution.iterations,
            solve_time_ms = (solution.solve_time * 1000.0) as u64,
            "Backend finished"
        );

        let status = match solution.status {
            SolverStatus::Solved => SolveStatus::Solved,
            SolverStatus::AlmostSolved => {
                warn!(
                    solver = NAME,
                    iterations = solution.iterations,
                    "Solution only meets reduced tolerances"
                );
                SolveStatus::AlmostSolved
            }
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                return Err(LpBenchError::Infeasible {
                    solver: NAME.to_string(),
                })
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                return Err(LpBenchError::Unbounded {
                    solver: NAME.to_string(),
                })
            }
            SolverStatus::MaxIterations => {
                return Err(LpBenchError::IterationLimit {
                    solver: NAME.to_string(),
                    iterations: solution.iterations,
                })
            }
            ref other => {
                return Err(LpBenchError::Numerical {
                    solver: NAME.to_string(),
                    reason: format!("{:?}", other),
                })
            }
        };

        Ok(ConicSolution {
            status,
            x: uncast_slice(&solution.x),
            s: uncast_slice(&solution.s),
            z: uncast_slice(&solution.z),
            iterations: solution.iterations,
            solve_time: Duration::from_secs_f64(solution.solve_time.max(0.0)),
            primal_residual: uncast(solution.r_prim),
            dual_residual: uncast(solution.r_dual),
        })
    }
}

impl ConeSolver for ClarabelBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn solve_conic(
        &self,
        problem: &ConicProblem,
        settings: &BackendSettings,
    ) -> Result<ConicSolution> {
        match settings.precision {
            Precision::Double => self.solve_in::<f64>(problem, settings),
            Precision::Single => self.solve_in::<f32>(problem, settings),
        }
    }
}

fn build_settings<T: FloatT>(
    settings: &BackendSettings,
) -> Result<::clarabel::solver::DefaultSettings<T>> {
    let mut builder = DefaultSettingsBuilder::<T>::default();
    builder
        .max_iter(settings.max_iters)
        .verbose(settings.verbose)
        .tol_gap_abs(tolerance("abs_tol", settings.abs_tol)?)
        .tol_gap_rel(tolerance("rel_tol", settings.rel_tol)?)
        .tol_feas(tolerance("rel_tol", settings.rel_tol)?)
        .equilibrate_enable(settings.equilibrate.is_some());
    if let Some(passes) = settings.equilibrate {
        builder.equilibrate_max_iter(passes);
    }
    builder
        .build()
        .map_err(|e| LpBenchError::Backend(format!("{}: invalid settings: {}", NAME, e)))
}

fn cones<T: FloatT>(cones: &[Cone]) -> Vec<SupportedConeT<T>> {
    cones
        .iter()
        .map(|cone| match *cone {
            Cone::Zero(dim) => SupportedConeT::ZeroConeT(dim),
            Cone::Nonnegative(dim) => SupportedConeT::NonnegativeConeT(dim),
        })
        .collect()
}

fn csc_matrix<T: FloatT>(a: &SparseMatrix) -> Result<CscMatrix<T>> {
    let (rows, cols) = (a.rows(), a.cols());
    let (colptr, rowval, nzval) = a.clone().into_parts();
    Ok(CscMatrix::new(rows, cols, colptr, rowval, cast_slice(&nzval)?))
}

fn cast<T: NumCast>(value: f64) -> Result<T> {
    num_traits::cast(value).ok_or_else(|| {
        LpBenchError::Backend(format!("{} is not representable in backend precision", value))
    })
}

/// Casts a tolerance, rejecting values that underflow to zero.
fn tolerance<T: Float>(name: &str, value: f64) -> Result<T> {
    let converted: T = cast(value)?;
    if converted > T::zero() && converted.is_finite() {
        Ok(converted)
    } else {
        Err(LpBenchError::Config(format!(
            "{} = {:e} is not a positive number in backend precision",
            name, value
        )))
    }
}

fn cast_slice<T: NumCast>(values: &[f64]) -> Result<Vec<T>> {
    values.iter().map(|&v| cast(v)).collect()
}

fn uncast<T: NumCast>(value: T) -> f64 {
    num_traits::cast(value).unwrap_or(f64::NAN)
}

fn uncast_slice<T: NumCast + Copy>(values: &[T]) -> Vec<f64> {
    values.iter().map(|&v| uncast(v)).collect()
}
