//! Experiment framework for lpbench.
//!
//! This crate runs a list of solver configurations against one seeded
//! problem instance, collects what each run returned, and exports the
//! results.
//!
//! # Overview
//!
//! The framework allows you to:
//! - Run several solver configurations against the same instance
//! - Stream the `obj` / `cost` lines of each run as it completes
//! - Compare objectives across runs (best, worst, spread, agreement)
//! - Export results to CSV and Markdown
//!
//! # Example
//!
//! ```
//! use lpbench_benchmark::{Experiment, TextSummary};
//! use lpbench_config::{ExperimentConfig, Formulation, RunConfig};
//!
//! let config = ExperimentConfig::default()
//!     .with_dimensions(2, 2)
//!     .with_runs(vec![RunConfig::new("direct", Formulation::Direct)]);
//!
//! let experiment = Experiment::new(config).unwrap();
//! let mut printed = Vec::new();
//! let result = experiment
//!     .run_with(|run| printed.extend(TextSummary::run_lines(run)))
//!     .unwrap();
//!
//! assert_eq!(result.run_count(), 1);
//! assert!(printed[0].starts_with("direct obj "));
//! assert!(printed[1].starts_with("direct cost "));
//! ```

mod error;
mod report;
mod result;
mod runner;

#[cfg(test)]
mod tests;

pub use error::{ExperimentError, Result};
pub use report::{CsvExporter, MarkdownReport, TextSummary};
pub use result::{ExperimentResult, RunRecord};
pub use runner::Experiment;
