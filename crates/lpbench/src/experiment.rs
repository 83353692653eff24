//! Experiment entry point that hides the wiring between crates.

use std::io::Write;

use lpbench_benchmark::{
    CsvExporter, Experiment, ExperimentError, ExperimentResult, MarkdownReport, TextSummary,
};
use lpbench_config::ExperimentConfig;
use tracing::info;

/// Runs every enabled run of `config` and prints the result lines to `out`.
///
/// The `nnz` line is printed before the first run, the `obj` and `cost` lines
/// of each run as soon as it finishes. Reports named in `config.output` are
/// written after the last run.
///
/// # Errors
///
/// Fails on an invalid configuration, on the first failing run, or when
/// printing or writing a report fails. Lines of runs that completed before a
/// failure have already been written to `out`.
pub fn run_experiment<W: Write>(
    config: &ExperimentConfig,
    mut out: W,
) -> Result<ExperimentResult, ExperimentError> {
    let experiment = Experiment::new(config.clone())?;
    let instance = experiment.instance();
    writeln!(out, "{}", TextSummary::nnz_line(instance.n(), instance.m()))?;

    let mut printed = Ok(());
    let result = experiment.run_with(|run| {
        if printed.is_ok() {
            printed = TextSummary::run_lines(run)
                .iter()
                .try_for_each(|line| writeln!(out, "{}", line));
        }
    });
    let result = result?;
    printed?;

    if let Some(path) = &config.output.csv_path {
        CsvExporter::to_file(&result, path)?;
        info!(event = "report_written", format = "csv", path = %path, "Report written");
    }
    if let Some(path) = &config.output.markdown_path {
        MarkdownReport::to_file(&result, path)?;
        info!(event = "report_written", format = "markdown", path = %path, "Report written");
    }
    Ok(result)
}
