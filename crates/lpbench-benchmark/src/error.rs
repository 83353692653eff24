//! Experiment errors.

use lpbench_config::ConfigError;
use lpbench_core::LpBenchError;
use thiserror::Error;

/// Errors that abort an experiment.
#[derive(Debug, Error)]
pub enum ExperimentError {
    /// The configuration was rejected before any run started.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Building the instance or its formulations failed.
    #[error("formulation failed: {0}")]
    Model(#[from] LpBenchError),

    /// A run failed; later runs were not attempted.
    #[error("run '{run}' failed: {source}")]
    Run {
        run: String,
        #[source]
        source: LpBenchError,
    },

    /// Printing results or writing a report failed.
    #[error("failed to write results: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for experiments.
pub type Result<T> = std::result::Result<T, ExperimentError>;
