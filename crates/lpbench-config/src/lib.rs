//! Configuration system for lpbench.
//!
//! Load experiment configuration from TOML or YAML files to control problem
//! size, seeding and the list of solver runs without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use lpbench_config::{ExperimentConfig, Formulation, Precision};
//!
//! let config = ExperimentConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [dimensions]
//!     n = 6
//!     m = 4
//!
//!     [[runs]]
//!     name = "split"
//!     formulation = "split"
//!
//!     [[runs]]
//!     name = "direct_single"
//!     formulation = "direct"
//!     precision = "single"
//!     max_iters = 2500
//!     eps = 1e-3
//! "#).unwrap();
//!
//! assert_eq!(config.random_seed, 7);
//! assert_eq!(config.runs.len(), 2);
//! assert_eq!(config.runs[1].formulation, Formulation::Direct);
//! assert_eq!(config.runs[1].options.precision, Precision::Single);
//! assert_eq!(config.runs[1].options.abs_tolerance(), 1e-3);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use lpbench_config::ExperimentConfig;
//!
//! let config = ExperimentConfig::load("experiment.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! assert_eq!(config.dimensions.n, 10);
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main experiment configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExperimentConfig {
    /// Seed for problem data and deterministic operator probing.
    #[serde(default = "default_seed")]
    pub random_seed: u64,

    /// Problem dimensions.
    #[serde(default)]
    pub dimensions: DimensionsConfig,

    /// Offset added to the nonnegative data matrices.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Report destinations.
    #[serde(default)]
    pub output: OutputConfig,

    /// Solver runs, executed in order.
    #[serde(default = "default_runs")]
    pub runs: Vec<RunConfig>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            random_seed: default_seed(),
            dimensions: DimensionsConfig::default(),
            epsilon: default_epsilon(),
            output: OutputConfig::default(),
            runs: default_runs(),
        }
    }
}

impl ExperimentConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Sets the problem dimensions.
    pub fn with_dimensions(mut self, n: usize, m: usize) -> Self {
        self.dimensions = DimensionsConfig { n, m };
        self
    }

    /// Replaces the run list.
    pub fn with_runs(mut self, runs: Vec<RunConfig>) -> Self {
        self.runs = runs;
        self
    }

    /// Adds a run.
    pub fn with_run(mut self, run: RunConfig) -> Self {
        self.runs.push(run);
        self
    }

    /// Returns the runs that are enabled, in order.
    pub fn enabled_runs(&self) -> impl Iterator<Item = &RunConfig> {
        self.runs.iter().filter(|r| r.enabled)
    }

    /// Looks up a run by name.
    pub fn run(&self, name: &str) -> Option<&RunConfig> {
        self.runs.iter().find(|r| r.name == name)
    }

    /// Checks dimensions, offsets and every run's options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimensions.n == 0 || self.dimensions.m == 0 {
            return Err(ConfigError::Invalid(format!(
                "dimensions must be positive, got n = {}, m = {}",
                self.dimensions.n, self.dimensions.m
            )));
        }
        if !(self.epsilon >= 0.0 && self.epsilon.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "epsilon must be a finite nonnegative number, got {}",
                self.epsilon
            )));
        }
        let mut seen = HashSet::new();
        for run in &self.runs {
            if run.name.trim().is_empty() {
                return Err(ConfigError::Invalid("run name must not be empty".to_string()));
            }
            if !seen.insert(run.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate run name '{}'",
                    run.name
                )));
            }
            run.options
                .validate()
                .map_err(|e| ConfigError::Invalid(format!("run '{}': {}", run.name, e)))?;
        }
        Ok(())
    }
}

/// Problem dimensions: `X` is `n x n`, `A` is `m x n`, `B` is `n x m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DimensionsConfig {
    pub n: usize,
    pub m: usize,
}

impl Default for DimensionsConfig {
    fn default() -> Self {
        Self { n: 10, m: 10 }
    }
}

/// Report destinations.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OutputConfig {
    /// Path for CSV export.
    pub csv_path: Option<String>,

    /// Path for the Markdown report.
    pub markdown_path: Option<String>,
}

/// Which equivalent formulation a run solves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Formulation {
    /// `X ≥ 0, Z·B ≤ 1, A·X = Z`.
    Split,

    /// `X ≥ 0, A·X·B ≤ 1`.
    #[default]
    Direct,
}

impl Formulation {
    pub fn name(&self) -> &'static str {
        match self {
            Formulation::Split => "split",
            Formulation::Direct => "direct",
        }
    }
}

/// One solver run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RunConfig {
    /// Name printed next to the result.
    pub name: String,

    /// Disabled runs stay in the file but are skipped.
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub formulation: Formulation,

    /// Solver selection and options.
    #[serde(flatten)]
    pub options: SolverOptions,
}

impl RunConfig {
    /// Creates an enabled run with default options.
    pub fn new(name: impl Into<String>, formulation: Formulation) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            formulation,
            options: SolverOptions::default(),
        }
    }

    /// Replaces the solver options.
    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Enables or disables the run.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Solver-selection token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Clarabel interior-point conic solver.
    #[default]
    Clarabel,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Clarabel => "clarabel",
        }
    }
}

/// Floating-point precision the backend runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    #[default]
    Double,
    Single,
}

impl Precision {
    pub fn name(&self) -> &'static str {
        match self {
            Precision::Double => "double",
            Precision::Single => "single",
        }
    }
}

/// Options handed to the solver for one solve call.
///
/// # Example
///
/// ```
/// use lpbench_config::{Precision, SolverOptions};
///
/// let options = SolverOptions::new()
///     .with_max_iters(2500)
///     .with_eps(1e-3)
///     .with_precision(Precision::Single);
///
/// assert_eq!(options.max_iters, 2500);
/// assert_eq!(options.abs_tolerance(), 1e-3);
/// assert_eq!(options.rel_tolerance(), 1e-3);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverOptions {
    pub backend: Backend,

    /// Iteration cap.
    pub max_iters: u32,

    /// Let the backend print its own iteration log.
    pub verbose: bool,

    /// Sets both tolerances when present.
    pub eps: Option<f64>,

    /// Absolute duality-gap tolerance.
    pub abs_tol: f64,

    /// Relative gap and feasibility tolerance.
    pub rel_tol: f64,

    /// Random probes per norm estimate; 0 probes with unit vectors instead.
    pub samples: u32,

    /// Equilibration passes.
    pub equil_steps: u32,

    /// Scale the problem with the matrix-free preconditioner instead of the
    /// backend's own equilibration.
    pub precond: bool,

    pub precision: Precision,

    /// Seed probing from the OS instead of the experiment seed.
    pub rand_seed: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            backend: Backend::Clarabel,
            max_iters: 200,
            verbose: false,
            eps: None,
            abs_tol: 1e-8,
            rel_tol: 1e-8,
            samples: 0,
            equil_steps: 10,
            precond: false,
            precision: Precision::Double,
            rand_seed: false,
        }
    }
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective absolute tolerance.
    pub fn abs_tolerance(&self) -> f64 {
        self.eps.unwrap_or(self.abs_tol)
    }

    /// Effective relative tolerance.
    pub fn rel_tolerance(&self) -> f64 {
        self.eps.unwrap_or(self.rel_tol)
    }

    /// Number of preconditioning passes; zero when `precond` is off.
    pub fn precond_passes(&self) -> u32 {
        if self.precond {
            self.equil_steps.max(1)
        } else {
            0
        }
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_max_iters(mut self, max_iters: u32) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = Some(eps);
        self
    }

    pub fn with_tolerances(mut self, abs_tol: f64, rel_tol: f64) -> Self {
        self.eps = None;
        self.abs_tol = abs_tol;
        self.rel_tol = rel_tol;
        self
    }

    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_equil_steps(mut self, steps: u32) -> Self {
        self.equil_steps = steps;
        self
    }

    pub fn with_precond(mut self, precond: bool) -> Self {
        self.precond = precond;
        self
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_rand_seed(mut self, rand_seed: bool) -> Self {
        self.rand_seed = rand_seed;
        self
    }

    /// Checks iteration cap and tolerances.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iters == 0 {
            return Err(ConfigError::Invalid("max_iters must be positive".to_string()));
        }
        for (name, value) in [
            ("abs_tol", self.abs_tolerance()),
            ("rel_tol", self.rel_tolerance()),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a finite positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

fn default_seed() -> u64 {
    1
}

fn default_epsilon() -> f64 {
    1e-6
}

fn default_true() -> bool {
    true
}

/// The runs of the reference experiment.
pub fn default_runs() -> Vec<RunConfig> {
    let pogs_like = SolverOptions::new()
        .with_verbose(true)
        .with_max_iters(2500)
        .with_samples(200)
        .with_equil_steps(0)
        .with_tolerances(1e-3, 1e-3);

    vec![
        RunConfig::new("interior_point_split", Formulation::Split)
            .with_options(SolverOptions::new().with_verbose(true)),
        RunConfig::new("sampled_precond_direct", Formulation::Direct).with_options(
            SolverOptions::new()
                .with_max_iters(2500)
                .with_equil_steps(1)
                .with_samples(200)
                .with_precond(true)
                .with_eps(1e-3),
        ),
        RunConfig::new("direct_double", Formulation::Direct)
            .with_options(pogs_like.clone().with_precision(Precision::Double)),
        RunConfig::new("direct_single", Formulation::Direct)
            .with_options(pogs_like.with_precision(Precision::Single)),
    ]
}

#[cfg(test)]
mod tests;
