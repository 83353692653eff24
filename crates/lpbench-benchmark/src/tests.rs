use std::time::Duration;

use lpbench_config::{ExperimentConfig, Formulation, Precision, RunConfig, SolverOptions};
use lpbench_core::LpBenchError;
use lpbench_solver::SolveStatus;
use lpbench_test::SmallInstance;

use super::*;

fn small_config() -> ExperimentConfig {
    let s = SmallInstance::tiny();
    ExperimentConfig::default()
        .with_random_seed(s.seed)
        .with_dimensions(s.n, s.m)
}

fn record(index: usize, name: &str, objective: f64, millis: u64) -> RunRecord {
    RunRecord {
        run_index: index,
        name: name.to_string(),
        formulation: Formulation::Direct,
        backend: "clarabel".to_string(),
        precision: Precision::Double,
        status: SolveStatus::Solved,
        objective,
        cost: objective + 1e-9,
        nnz: 160,
        iterations: 12,
        solve_time: Duration::from_millis(millis),
        max_violation: 0.0,
    }
}

#[test]
fn test_default_runs_agree_on_small_instance() {
    let config = small_config();
    let experiment = Experiment::new(config).unwrap();

    let mut streamed = Vec::new();
    let result = experiment
        .run_with(|run| streamed.push(run.name.clone()))
        .unwrap();

    let names: Vec<&str> = result.runs.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "interior_point_split",
            "sampled_precond_direct",
            "direct_double",
            "direct_single"
        ]
    );
    assert_eq!(streamed, names);
    assert_eq!(result.dense_nnz, 144);
    // -I over X plus the dense Bᵀ ⊗ A block
    assert_eq!(result.stored_nnz, 16 + 9 * 16);
    assert!(result.agrees_within(1e-2));
    for run in &result.runs {
        assert!(run.cost_gap() <= 1e-6 * (1.0 + run.objective.abs()));
        assert_eq!(run.backend, "clarabel");
    }
    assert_eq!(result.run("direct_single").unwrap().precision, Precision::Single);
    assert_eq!(
        result.run("interior_point_split").unwrap().formulation,
        Formulation::Split
    );
}

#[test]
fn test_disabled_runs_are_skipped() {
    let config = small_config().with_runs(vec![
        RunConfig::new("skipped", Formulation::Split).with_enabled(false),
        RunConfig::new("direct", Formulation::Direct),
    ]);
    let result = Experiment::new(config).unwrap().run().unwrap();
    assert_eq!(result.run_count(), 1);
    assert_eq!(result.runs[0].run_index, 0);
    assert_eq!(result.runs[0].name, "direct");
}

#[test]
fn test_stored_nnz_comes_from_direct_runs() {
    let config = small_config().with_runs(vec![RunConfig::new("split", Formulation::Split)]);
    let result = Experiment::new(config).unwrap().run().unwrap();
    assert_eq!(result.stored_nnz, 0);
    assert!(result.runs[0].nnz > 0);
    let md = MarkdownReport::to_string(&result);
    assert!(md.contains("- **Nonzeros**: 144 dense\n"));

    let mut result = ExperimentResult::new("mixed", 4, 3, 1);
    let mut split = record(0, "split", -1.0, 10);
    split.formulation = Formulation::Split;
    split.nnz = 999;
    result.add_run(split);
    assert_eq!(result.stored_nnz, 0);
    result.add_run(record(1, "direct", -1.0, 10));
    let mut later = record(2, "direct_again", -1.0, 10);
    later.nnz = 7;
    result.add_run(later);
    assert_eq!(result.stored_nnz, 160);
}

#[test]
fn test_first_failure_aborts() {
    let config = small_config().with_runs(vec![
        RunConfig::new("ok", Formulation::Direct),
        RunConfig::new("capped", Formulation::Direct)
            .with_options(SolverOptions::new().with_max_iters(1)),
        RunConfig::new("never", Formulation::Split),
    ]);

    let mut completed = Vec::new();
    let err = Experiment::new(config)
        .unwrap()
        .run_with(|run| completed.push(run.name.clone()))
        .unwrap_err();

    assert_eq!(completed, vec!["ok".to_string()]);
    match err {
        ExperimentError::Run { run, source } => {
            assert_eq!(run, "capped");
            assert!(matches!(source, LpBenchError::IterationLimit { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_config_is_rejected_up_front() {
    let config = small_config().with_runs(vec![
        RunConfig::new("dup", Formulation::Direct),
        RunConfig::new("dup", Formulation::Split),
    ]);
    assert!(matches!(
        Experiment::new(config),
        Err(ExperimentError::Config(_))
    ));
}

#[test]
fn test_experiment_name_and_instance() {
    let experiment = Experiment::new(small_config()).unwrap();
    assert_eq!(experiment.name(), "sylvester n=4 m=3 seed=1");
    assert_eq!(experiment.instance().a().shape(), (3, 4));
    assert_eq!(experiment.config().dimensions.n, 4);
}

#[test]
fn test_result_statistics() {
    let mut result = ExperimentResult::new("stats", 2, 2, 1);
    assert_eq!(result.objective_spread(), 0.0);
    assert!(result.best_run().is_none());
    assert_eq!(result.avg_solve_time(), Duration::ZERO);

    result.add_run(record(0, "a", -1.0, 100));
    result.add_run(record(1, "b", -1.5, 300));
    assert_eq!(result.best_run().unwrap().name, "b");
    assert_eq!(result.worst_run().unwrap().name, "a");
    assert_eq!(result.objective_spread(), 0.5);
    assert!(!result.agrees_within(1e-3));
    assert_eq!(result.avg_solve_time(), Duration::from_millis(200));
    assert_eq!(result.min_solve_time(), Duration::from_millis(100));
    assert_eq!(result.max_solve_time(), Duration::from_millis(300));
    assert_eq!(result.total_iterations(), 24);
}

#[test]
fn test_text_summary_lines() {
    let mut result = ExperimentResult::new("text", 10, 10, 1);
    result.add_run(record(0, "direct_double", -2.5, 10));
    assert_eq!(
        TextSummary::lines(&result),
        vec![
            "nnz = 10000".to_string(),
            "direct_double obj -2.500000".to_string(),
            "direct_double cost -2.500000".to_string(),
        ]
    );
}

#[test]
fn test_csv_and_markdown_reports() {
    let mut result = ExperimentResult::new("reports", 4, 3, 1).with_stored_nnz(160);
    result.add_run(record(0, "split", -1.25, 40));
    result.add_run(record(1, "direct", -1.25, 20));

    let csv = CsvExporter::to_string(&result);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("0,split,direct,clarabel,double,solved,-1.250000000,"));
    assert!(lines[2].contains(",20.000,"));

    let md = MarkdownReport::to_string(&result);
    assert!(md.contains("- **Nonzeros**: 144 dense, 160 stored"));
    assert!(md.contains("## Run Details"));
    assert!(md.contains("| 1 | direct | direct | double | solved | -1.250000 |"));

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("results.csv");
    let md_path = dir.path().join("report.md");
    CsvExporter::to_file(&result, &csv_path).unwrap();
    MarkdownReport::to_file(&result, &md_path).unwrap();
    assert_eq!(std::fs::read_to_string(&csv_path).unwrap(), csv);
    assert_eq!(std::fs::read_to_string(&md_path).unwrap(), md);

    let mut buffer = Vec::new();
    CsvExporter::write(&result, &mut buffer).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), csv);
}
