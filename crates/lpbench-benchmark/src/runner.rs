//! Experiment runner.

use std::collections::HashMap;
use std::time::Instant;

use lpbench_config::{ExperimentConfig, Formulation};
use lpbench_model::{Formulated, SylvesterInstance};
use tracing::{error, info};

use crate::error::{ExperimentError, Result};
use crate::result::{ExperimentResult, RunRecord};

/// Runs every enabled run of an [`ExperimentConfig`] against one instance.
///
/// The instance is generated once and each formulation is built once, then
/// shared by all runs that use it. Runs execute sequentially in
/// configuration order and the first failing run aborts the experiment.
///
/// # Example
///
/// ```
/// use lpbench_benchmark::Experiment;
/// use lpbench_config::{ExperimentConfig, Formulation, RunConfig};
///
/// let config = ExperimentConfig::default()
///     .with_dimensions(3, 2)
///     .with_runs(vec![
///         RunConfig::new("split", Formulation::Split),
///         RunConfig::new("direct", Formulation::Direct),
///     ]);
///
/// let result = Experiment::new(config).unwrap().run().unwrap();
/// assert_eq!(result.run_count(), 2);
/// assert!(result.agrees_within(1e-5));
/// ```
pub struct Experiment {
    config: ExperimentConfig,
    instance: SylvesterInstance,
}

impl Experiment {
    /// Validates the configuration and generates the instance.
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        config.validate()?;
        let instance = SylvesterInstance::from_config(&config);
        Ok(Self { config, instance })
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn instance(&self) -> &SylvesterInstance {
        &self.instance
    }

    /// Experiment name used in reports.
    pub fn name(&self) -> String {
        format!(
            "sylvester n={} m={} seed={}",
            self.instance.n(),
            self.instance.m(),
            self.config.random_seed
        )
    }

    /// Runs the experiment and returns aggregated results.
    pub fn run(&self) -> Result<ExperimentResult> {
        self.run_with(|_| {})
    }

    /// Runs the experiment, calling `on_run` after each successful run.
    pub fn run_with<F>(&self, mut on_run: F) -> Result<ExperimentResult>
    where
        F: FnMut(&RunRecord),
    {
        let started = Instant::now();
        let mut formulations: HashMap<Formulation, Formulated> = HashMap::new();

        let mut result = ExperimentResult::new(
            self.name(),
            self.instance.n(),
            self.instance.m(),
            self.config.random_seed,
        );

        info!(
            event = "experiment_start",
            n = self.instance.n(),
            m = self.instance.m(),
            seed = self.config.random_seed,
            dense_nnz = result.dense_nnz,
            runs = self.config.enabled_runs().count(),
            "Experiment started"
        );

        for (run_index, run) in self.config.enabled_runs().enumerate() {
            let formulated = self.formulation(&mut formulations, run.formulation)?;
            let solution = lpbench_solver::solve(
                &formulated.problem,
                &run.options,
                self.config.random_seed,
            )
            .map_err(|source| {
                error!(event = "run_failed", run = %run.name, error = %source, "Run failed");
                ExperimentError::Run {
                    run: run.name.clone(),
                    source,
                }
            })?;
            let cost = solution.eval_scalar(&formulated.cost)?;

            let record = RunRecord::from_solution(run_index, run, &solution, cost);
            info!(
                event = "run_end",
                run = %record.name,
                formulation = record.formulation.name(),
                objective = record.objective,
                cost = record.cost,
                nnz = record.nnz,
                iterations = record.iterations,
                "Run finished"
            );
            on_run(&record);
            result.add_run(record);
        }

        info!(
            event = "experiment_end",
            runs = result.run_count(),
            stored_nnz = result.stored_nnz,
            spread = result.objective_spread(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Experiment ended"
        );
        Ok(result)
    }

    fn formulation(
        &self,
        cache: &mut HashMap<Formulation, Formulated>,
        formulation: Formulation,
    ) -> Result<Formulated> {
        if let Some(formulated) = cache.get(&formulation) {
            return Ok(formulated.clone());
        }
        let formulated = self.instance.formulate(formulation)?;
        cache.insert(formulation, formulated.clone());
        Ok(formulated)
    }
}
