//! Experiment result types.

use std::time::Duration;

use lpbench_config::{Formulation, Precision, RunConfig};
use lpbench_solver::{Solution, SolveStatus};

/// Result of a single solver run.
#[derive(Debug, Clone)]
pub struct RunRecord {
    /// Position among the enabled runs (0-based).
    pub run_index: usize,
    /// Configured run name.
    pub name: String,
    pub formulation: Formulation,
    /// Backend that produced the solution.
    pub backend: String,
    pub precision: Precision,
    pub status: SolveStatus,
    /// Optimal value reported by the solve.
    pub objective: f64,
    /// `trace(Cᵀ X)` re-evaluated at the returned `X`.
    pub cost: f64,
    /// Stored nonzeros of the constraint matrix the backend received.
    pub nnz: usize,
    pub iterations: u32,
    /// Time spent inside the backend.
    pub solve_time: Duration,
    /// Largest constraint violation at the returned point.
    pub max_violation: f64,
}

impl RunRecord {
    /// Creates a record from a finished solve.
    pub fn from_solution(run_index: usize, run: &RunConfig, solution: &Solution, cost: f64) -> Self {
        Self {
            run_index,
            name: run.name.clone(),
            formulation: run.formulation,
            backend: solution.backend().to_string(),
            precision: run.options.precision,
            status: solution.status(),
            objective: solution.objective(),
            cost,
            nnz: solution.nnz(),
            iterations: solution.iterations(),
            solve_time: solution.solve_time(),
            max_violation: solution.max_violation(),
        }
    }

    /// Returns iterations per second.
    ///
    /// # Example
    ///
    /// ```
    /// use lpbench_benchmark::RunRecord;
    /// use lpbench_config::{Formulation, Precision};
    /// use lpbench_solver::SolveStatus;
    /// use std::time::Duration;
    ///
    /// let run = RunRecord {
    ///     run_index: 0,
    ///     name: "direct_double".to_string(),
    ///     formulation: Formulation::Direct,
    ///     backend: "clarabel".to_string(),
    ///     precision: Precision::Double,
    ///     status: SolveStatus::Solved,
    ///     objective: -1.5,
    ///     cost: -1.5,
    ///     nnz: 10_100,
    ///     iterations: 20,
    ///     solve_time: Duration::from_millis(500),
    ///     max_violation: 0.0,
    /// };
    ///
    /// assert!((run.iterations_per_second() - 40.0).abs() < 1e-9);
    /// ```
    pub fn iterations_per_second(&self) -> f64 {
        if self.solve_time.is_zero() {
            0.0
        } else {
            f64::from(self.iterations) / self.solve_time.as_secs_f64()
        }
    }

    /// Absolute gap between the reported objective and the re-evaluated cost.
    pub fn cost_gap(&self) -> f64 {
        (self.objective - self.cost).abs()
    }
}

/// Results of every run of one experiment.
#[derive(Debug, Clone)]
pub struct ExperimentResult {
    /// Experiment name.
    pub name: String,
    /// Size of `X`.
    pub n: usize,
    /// Rows of `A`.
    pub m: usize,
    pub random_seed: u64,
    /// Entries of the dense direct-formulation operator, `(m·n)²`.
    pub dense_nnz: usize,
    /// Stored nonzeros of the direct formulation's constraint matrix, taken
    /// from the first direct run; `0` until one completes.
    pub stored_nnz: usize,
    /// Individual runs in execution order.
    pub runs: Vec<RunRecord>,
}

impl ExperimentResult {
    /// Creates an empty result.
    pub fn new(name: impl Into<String>, n: usize, m: usize, random_seed: u64) -> Self {
        Self {
            name: name.into(),
            n,
            m,
            random_seed,
            dense_nnz: (m * n).pow(2),
            stored_nnz: 0,
            runs: Vec::new(),
        }
    }

    /// Sets the stored nonzero count.
    pub fn with_stored_nnz(mut self, nnz: usize) -> Self {
        self.stored_nnz = nnz;
        self
    }

    /// Adds a run to the results.
    pub fn add_run(&mut self, run: RunRecord) {
        if self.stored_nnz == 0 && run.formulation == Formulation::Direct {
            self.stored_nnz = run.nnz;
        }
        self.runs.push(run);
    }

    /// Returns the number of runs.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Looks up a run by name.
    pub fn run(&self, name: &str) -> Option<&RunRecord> {
        self.runs.iter().find(|r| r.name == name)
    }

    /// Returns the run with the lowest objective.
    ///
    /// # Example
    ///
    /// ```
    /// use lpbench_benchmark::{ExperimentResult, RunRecord};
    /// use lpbench_config::{Formulation, Precision};
    /// use lpbench_solver::SolveStatus;
    /// use std::time::Duration;
    ///
    /// let record = |name: &str, objective: f64| RunRecord {
    ///     run_index: 0,
    ///     name: name.to_string(),
    ///     formulation: Formulation::Direct,
    ///     backend: "clarabel".to_string(),
    ///     precision: Precision::Double,
    ///     status: SolveStatus::Solved,
    ///     objective,
    ///     cost: objective,
    ///     nnz: 10_100,
    ///     iterations: 10,
    ///     solve_time: Duration::from_millis(10),
    ///     max_violation: 0.0,
    /// };
    ///
    /// let mut result = ExperimentResult::new("sylvester", 10, 10, 1);
    /// result.add_run(record("a", -2.0));
    /// result.add_run(record("b", -2.001));
    ///
    /// assert_eq!(result.best_run().unwrap().name, "b");
    /// assert_eq!(result.worst_run().unwrap().name, "a");
    /// assert!((result.objective_spread() - 0.001).abs() < 1e-12);
    /// assert!(result.agrees_within(1e-3));
    /// ```
    pub fn best_run(&self) -> Option<&RunRecord> {
        self.runs
            .iter()
            .min_by(|a, b| a.objective.total_cmp(&b.objective))
    }

    /// Returns the run with the highest objective.
    pub fn worst_run(&self) -> Option<&RunRecord> {
        self.runs
            .iter()
            .max_by(|a, b| a.objective.total_cmp(&b.objective))
    }

    /// Difference between the highest and lowest objective, `0` without runs.
    pub fn objective_spread(&self) -> f64 {
        match (self.best_run(), self.worst_run()) {
            (Some(best), Some(worst)) => worst.objective - best.objective,
            _ => 0.0,
        }
    }

    /// Whether all objectives agree to `tol` relative to the best magnitude.
    pub fn agrees_within(&self, tol: f64) -> bool {
        let scale = self
            .best_run()
            .map_or(1.0, |best| best.objective.abs().max(1.0));
        self.objective_spread() <= tol * scale
    }

    /// Returns the average solve time.
    pub fn avg_solve_time(&self) -> Duration {
        if self.runs.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.runs.iter().map(|r| r.solve_time).sum();
        total / self.runs.len() as u32
    }

    /// Returns the minimum solve time.
    pub fn min_solve_time(&self) -> Duration {
        self.runs
            .iter()
            .map(|r| r.solve_time)
            .min()
            .unwrap_or(Duration::ZERO)
    }

    /// Returns the maximum solve time.
    pub fn max_solve_time(&self) -> Duration {
        self.runs
            .iter()
            .map(|r| r.solve_time)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    /// Total backend iterations across runs.
    pub fn total_iterations(&self) -> u64 {
        self.runs.iter().map(|r| u64::from(r.iterations)).sum()
    }
}
