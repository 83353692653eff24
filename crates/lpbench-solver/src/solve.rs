//! The solve call.

use std::time::Instant;

use lpbench_config::SolverOptions;
use lpbench_core::{seeded_rng, LpBenchError, Result};
use lpbench_model::{stuff, Problem};
use rand::Rng;
use tracing::{debug, info};

use crate::backend::{backend_for, BackendSettings, ConeSolver};
use crate::scaling::{NormEstimate, Scaling};
use crate::solution::Solution;

/// Solves `problem` with the backend named in `options`.
///
/// `seed` drives the random probes of the preconditioner unless
/// `options.rand_seed` asks for an OS-drawn seed. The problem is only read;
/// variable values are returned in the [`Solution`].
///
/// # Errors
///
/// Invalid options give a configuration error. Infeasible, unbounded,
/// iteration-capped and numerically failed solves give the matching
/// [`LpBenchError`] variant.
pub fn solve(problem: &Problem, options: &SolverOptions, seed: u64) -> Result<Solution> {
    let backend = backend_for(options.backend);
    solve_with(backend.as_ref(), problem, options, seed)
}

/// Like [`solve`], with an explicit backend.
pub fn solve_with(
    backend: &dyn ConeSolver,
    problem: &Problem,
    options: &SolverOptions,
    seed: u64,
) -> Result<Solution> {
    options
        .validate()
        .map_err(|e| LpBenchError::Config(e.to_string()))?;

    let started = Instant::now();
    let conic = stuff(problem)?;
    let settings = BackendSettings::from_options(options);

    info!(
        event = "solve_start",
        solver = backend.name(),
        variables = conic.num_vars(),
        rows = conic.num_rows(),
        nnz = conic.nnz(),
        precision = options.precision.name(),
        "Solve started"
    );

    let scaling = if options.precond {
        let probe_seed = if options.rand_seed {
            rand::rng().random()
        } else {
            seed
        };
        let estimate = NormEstimate::from_samples(options.samples);
        let scaling = Scaling::equilibrate(
            &conic.a,
            options.precond_passes(),
            estimate,
            &mut seeded_rng(probe_seed),
        );
        info!(
            event = "preconditioned",
            passes = options.precond_passes(),
            samples = options.samples,
            probe_seed,
            spread = scaling.spread(),
            "Preconditioned"
        );
        Some(scaling)
    } else {
        None
    };

    let raw = match &scaling {
        Some(scaling) => backend.solve_conic(&scaling.apply(&conic), &settings)?,
        None => backend.solve_conic(&conic, &settings)?,
    };
    let (x, z) = match &scaling {
        Some(scaling) => (scaling.unscale_x(&raw.x), scaling.unscale_z(&raw.z)),
        None => (raw.x, raw.z),
    };

    let values = conic.layout().unstack(&x)?;
    let objective = conic.source_objective(conic.objective_at(&x));
    let max_violation = problem.max_violation(&values)?;
    debug!(
        max_violation,
        primal_residual = raw.primal_residual,
        dual_residual = raw.dual_residual,
        "Solution recovered"
    );

    info!(
        event = "solve_end",
        solver = backend.name(),
        status = %raw.status,
        objective,
        iterations = raw.iterations,
        duration_ms = started.elapsed().as_millis() as u64,
        "Solve ended"
    );

    Ok(Solution {
        backend: backend.name(),
        status: raw.status,
        objective,
        values,
        duals: conic.split_duals(&z),
        nnz: conic.nnz(),
        iterations: raw.iterations,
        solve_time: raw.solve_time,
        max_violation,
        primal_residual: raw.primal_residual,
        dual_residual: raw.dual_residual,
    })
}
