use lpbench_test::SmallInstance;

use super::*;

fn tiny_config() -> ExperimentConfig {
    let s = SmallInstance::tiny();
    ExperimentConfig::default()
        .with_random_seed(s.seed)
        .with_dimensions(s.n, s.m)
        .with_runs(vec![
            RunConfig::new("split", Formulation::Split),
            RunConfig::new("direct", Formulation::Direct),
        ])
}

#[test]
fn test_run_experiment_prints_lines_in_order() {
    let mut out = Vec::new();
    let result = run_experiment(&tiny_config(), &mut out).unwrap();

    let printed = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = printed.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "nnz = 144");
    assert!(lines[1].starts_with("split obj "));
    assert!(lines[2].starts_with("split cost "));
    assert!(lines[3].starts_with("direct obj "));
    assert!(lines[4].starts_with("direct cost "));
    assert_eq!(lines, TextSummary::lines(&result));
}

#[test]
fn test_run_experiment_keeps_lines_of_completed_runs() {
    let mut config = tiny_config();
    config.runs.push(
        RunConfig::new("capped", Formulation::Direct)
            .with_options(SolverOptions::new().with_max_iters(1)),
    );

    let mut out = Vec::new();
    let err = run_experiment(&config, &mut out).unwrap_err();
    assert!(matches!(err, ExperimentError::Run { ref run, .. } if run == "capped"));

    let printed = String::from_utf8(out).unwrap();
    assert_eq!(printed.lines().count(), 5);
    assert!(!printed.contains("capped"));
}

#[test]
fn test_run_experiment_writes_configured_reports() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("runs.csv");
    let md_path = dir.path().join("report.md");

    let mut config = tiny_config();
    config.output.csv_path = Some(csv_path.to_string_lossy().into_owned());
    config.output.markdown_path = Some(md_path.to_string_lossy().into_owned());

    let result = run_experiment(&config, std::io::sink()).unwrap();

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv, CsvExporter::to_string(&result));
    assert_eq!(csv.lines().count(), 3);

    let md = std::fs::read_to_string(&md_path).unwrap();
    assert!(md.starts_with("# Experiment: sylvester n=4 m=3 seed=1"));
}

#[test]
fn test_invalid_config_prints_nothing() {
    let config = tiny_config().with_dimensions(0, 3);
    let mut out = Vec::new();
    let err = run_experiment(&config, &mut out).unwrap_err();
    assert!(matches!(err, ExperimentError::Config(ConfigError::Invalid(_))));
    assert!(out.is_empty());
}

#[test]
fn test_prelude_builds_a_problem() {
    use crate::prelude::*;

    let x = Variable::new("x", 2, 1);
    let c = Matrix::from_rows(&[[1.0], [1.0]]);
    let problem = Problem::minimize(
        Expr::var(&x).inner(&c).unwrap(),
        vec![Expr::var(&x).ge(1.0)],
    )
    .unwrap();

    let solution = solve(&problem, &SolverOptions::default(), 1).unwrap();
    assert!((solution.objective() - 2.0).abs() < 1e-6);
}
