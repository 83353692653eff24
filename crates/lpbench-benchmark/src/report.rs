//! Report generation for experiment results.

use std::fmt::{self, Write as _};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::result::{ExperimentResult, RunRecord};

/// CSV exporter for experiment results.
///
/// One row per run with its configuration, objective, cost and timing.
///
/// # Example
///
/// ```
/// use lpbench_benchmark::{CsvExporter, ExperimentResult};
///
/// let result = ExperimentResult::new("sylvester", 10, 10, 1);
/// let csv = CsvExporter::to_string(&result);
/// assert!(csv.starts_with("run_index,name,formulation"));
/// ```
pub struct CsvExporter;

impl CsvExporter {
    /// Exports an experiment result to a CSV string.
    pub fn to_string(result: &ExperimentResult) -> String {
        let mut output = String::new();
        // writing into a String cannot fail
        let _ = Self::render(result, &mut output);
        output
    }

    fn render(result: &ExperimentResult, output: &mut String) -> fmt::Result {
        writeln!(
            output,
            "run_index,name,formulation,backend,precision,status,objective,cost,iterations,solve_time_ms,max_violation"
        )?;
        for run in &result.runs {
            writeln!(
                output,
                "{},{},{},{},{},{},{:.9},{:.9},{},{:.3},{:.3e}",
                run.run_index,
                run.name,
                run.formulation.name(),
                run.backend,
                run.precision.name(),
                run.status,
                run.objective,
                run.cost,
                run.iterations,
                run.solve_time.as_secs_f64() * 1000.0,
                run.max_violation,
            )?;
        }
        Ok(())
    }

    /// Exports an experiment result to a CSV file.
    pub fn to_file(result: &ExperimentResult, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::to_string(result))
    }

    /// Writes an experiment result as CSV to a writer.
    pub fn write<W: Write>(result: &ExperimentResult, mut writer: W) -> io::Result<()> {
        writer.write_all(Self::to_string(result).as_bytes())
    }
}

/// Markdown report generator.
///
/// # Example
///
/// ```
/// use lpbench_benchmark::{ExperimentResult, MarkdownReport};
///
/// let result = ExperimentResult::new("sylvester", 10, 10, 1);
/// let md = MarkdownReport::to_string(&result);
/// assert!(md.contains("# Experiment: sylvester"));
/// assert!(md.contains("*No runs completed.*"));
/// ```
pub struct MarkdownReport;

impl MarkdownReport {
    /// Generates a Markdown report string.
    pub fn to_string(result: &ExperimentResult) -> String {
        let mut output = String::new();
        // writing into a String cannot fail
        let _ = Self::render(result, &mut output);
        output
    }

    fn render(result: &ExperimentResult, output: &mut String) -> fmt::Result {
        writeln!(output, "# Experiment: {}", result.name)?;
        writeln!(output)?;

        writeln!(output, "- **Dimensions**: n = {}, m = {}", result.n, result.m)?;
        writeln!(output, "- **Seed**: {}", result.random_seed)?;
        if result.stored_nnz > 0 {
            writeln!(
                output,
                "- **Nonzeros**: {} dense, {} stored",
                result.dense_nnz, result.stored_nnz
            )?;
        } else {
            writeln!(output, "- **Nonzeros**: {} dense", result.dense_nnz)?;
        }
        writeln!(output, "- **Runs**: {}", result.run_count())?;
        writeln!(output)?;

        writeln!(output, "## Summary")?;
        writeln!(output)?;
        match (result.best_run(), result.worst_run()) {
            (Some(best), Some(worst)) => {
                writeln!(output, "| Metric | Value |")?;
                writeln!(output, "|--------|-------|")?;
                writeln!(output, "| Best Objective | {:.6} ({}) |", best.objective, best.name)?;
                writeln!(
                    output,
                    "| Worst Objective | {:.6} ({}) |",
                    worst.objective, worst.name
                )?;
                writeln!(output, "| Spread | {:.3e} |", result.objective_spread())?;
                writeln!(
                    output,
                    "| Avg Time | {:.2} ms |",
                    result.avg_solve_time().as_secs_f64() * 1000.0
                )?;
                writeln!(
                    output,
                    "| Min Time | {:.2} ms |",
                    result.min_solve_time().as_secs_f64() * 1000.0
                )?;
                writeln!(
                    output,
                    "| Max Time | {:.2} ms |",
                    result.max_solve_time().as_secs_f64() * 1000.0
                )?;
                writeln!(output, "| Total Iterations | {} |", result.total_iterations())?;
            }
            _ => writeln!(output, "*No runs completed.*")?,
        }
        writeln!(output)?;

        if !result.runs.is_empty() {
            writeln!(output, "## Run Details")?;
            writeln!(output)?;
            writeln!(
                output,
                "| Run | Name | Formulation | Precision | Status | Objective | Cost | Iterations | Time (ms) |"
            )?;
            writeln!(
                output,
                "|-----|------|-------------|-----------|--------|-----------|------|------------|-----------|"
            )?;
            for run in &result.runs {
                writeln!(
                    output,
                    "| {} | {} | {} | {} | {} | {:.6} | {:.6} | {} | {:.2} |",
                    run.run_index,
                    run.name,
                    run.formulation.name(),
                    run.precision.name(),
                    run.status,
                    run.objective,
                    run.cost,
                    run.iterations,
                    run.solve_time.as_secs_f64() * 1000.0,
                )?;
            }
        }
        Ok(())
    }

    /// Writes a Markdown report to a file.
    pub fn to_file(result: &ExperimentResult, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::to_string(result))
    }

    /// Writes a Markdown report to a writer.
    pub fn write<W: Write>(result: &ExperimentResult, mut writer: W) -> io::Result<()> {
        writer.write_all(Self::to_string(result).as_bytes())
    }
}

/// Plain-text result lines.
///
/// # Example
///
/// ```
/// use lpbench_benchmark::TextSummary;
///
/// assert_eq!(TextSummary::nnz_line(10, 10), "nnz = 10000");
/// ```
pub struct TextSummary;

impl TextSummary {
    /// `nnz = (m·n)²`.
    pub fn nnz_line(n: usize, m: usize) -> String {
        format!("nnz = {}", (m * n).pow(2))
    }

    /// The `obj` and `cost` lines of one run.
    pub fn run_lines(run: &RunRecord) -> [String; 2] {
        [
            format!("{} obj {:.6}", run.name, run.objective),
            format!("{} cost {:.6}", run.name, run.cost),
        ]
    }

    /// Every line of an experiment, in print order.
    pub fn lines(result: &ExperimentResult) -> Vec<String> {
        let mut lines = vec![Self::nnz_line(result.n, result.m)];
        for run in &result.runs {
            lines.extend(Self::run_lines(run));
        }
        lines
    }
}
