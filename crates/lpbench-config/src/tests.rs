//! Tests for experiment configuration.

use std::io::Write;

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        random_seed = 42
        epsilon = 1e-4

        [dimensions]
        n = 8
        m = 5

        [output]
        csv_path = "results.csv"

        [[runs]]
        name = "ipm"
        formulation = "split"
        verbose = true

        [[runs]]
        name = "precond"
        max_iters = 2500
        equil_steps = 1
        samples = 200
        precond = true
        eps = 1e-3
    "#;

    let config = ExperimentConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.random_seed, 42);
    assert_eq!(config.epsilon, 1e-4);
    assert_eq!(config.dimensions, DimensionsConfig { n: 8, m: 5 });
    assert_eq!(config.output.csv_path.as_deref(), Some("results.csv"));
    assert_eq!(config.runs.len(), 2);

    let ipm = config.run("ipm").unwrap();
    assert_eq!(ipm.formulation, Formulation::Split);
    assert!(ipm.options.verbose);
    assert_eq!(ipm.options.max_iters, 200);

    let precond = config.run("precond").unwrap();
    assert_eq!(precond.formulation, Formulation::Direct);
    assert_eq!(precond.options.precond_passes(), 1);
    assert_eq!(precond.options.samples, 200);
    assert_eq!(precond.options.rel_tolerance(), 1e-3);
    assert!(config.validate().is_ok());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        random_seed: 3
        dimensions:
          n: 4
          m: 4
        runs:
          - name: single
            precision: single
            abs_tol: 0.001
            rel_tol: 0.001
          - name: skipped
            enabled: false
    "#;

    let config = ExperimentConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.random_seed, 3);
    assert_eq!(config.runs[0].options.precision, Precision::Single);
    assert_eq!(config.runs[0].options.abs_tolerance(), 0.001);
    let enabled: Vec<_> = config.enabled_runs().map(|r| r.name.as_str()).collect();
    assert_eq!(enabled, vec!["single"]);
}

#[test]
fn test_missing_runs_fall_back_to_defaults() {
    let config = ExperimentConfig::from_toml_str("random_seed = 5").unwrap();
    assert_eq!(config.runs.len(), default_runs().len());
    assert_eq!(config.dimensions, DimensionsConfig::default());
}

#[test]
fn test_default_runs() {
    let config = ExperimentConfig::default();
    assert_eq!(config.random_seed, 1);
    assert_eq!(config.epsilon, 1e-6);
    let names: Vec<_> = config.runs.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "interior_point_split",
            "sampled_precond_direct",
            "direct_double",
            "direct_single"
        ]
    );
    assert_eq!(config.runs[0].formulation, Formulation::Split);
    assert_eq!(config.runs[3].options.precision, Precision::Single);
    assert_eq!(config.runs[2].options.equil_steps, 0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_builder() {
    let config = ExperimentConfig::new()
        .with_random_seed(123)
        .with_dimensions(3, 2)
        .with_runs(Vec::new())
        .with_run(RunConfig::new("a", Formulation::Split))
        .with_run(RunConfig::new("b", Formulation::Direct).with_enabled(false));

    assert_eq!(config.random_seed, 123);
    assert_eq!(config.dimensions.m, 2);
    assert_eq!(config.runs.len(), 2);
    assert_eq!(config.enabled_runs().count(), 1);
}

#[test]
fn test_validation_errors() {
    let zero = ExperimentConfig::new().with_dimensions(0, 3);
    assert!(matches!(zero.validate(), Err(ConfigError::Invalid(_))));

    let dup = ExperimentConfig::new().with_runs(vec![
        RunConfig::new("x", Formulation::Split),
        RunConfig::new("x", Formulation::Direct),
    ]);
    assert!(matches!(dup.validate(), Err(ConfigError::Invalid(_))));

    let bad_tol = ExperimentConfig::new().with_runs(vec![RunConfig::new("x", Formulation::Split)
        .with_options(SolverOptions::new().with_tolerances(0.0, 1e-3))]);
    assert!(bad_tol.validate().is_err());

    let no_iters = SolverOptions::new().with_max_iters(0);
    assert!(no_iters.validate().is_err());
}

#[test]
fn test_eps_overrides_tolerances() {
    let options = SolverOptions::new().with_tolerances(1e-6, 1e-5);
    assert_eq!(options.abs_tolerance(), 1e-6);
    assert_eq!(options.rel_tolerance(), 1e-5);
    let options = options.with_eps(1e-3);
    assert_eq!(options.abs_tolerance(), 1e-3);
    assert_eq!(options.rel_tolerance(), 1e-3);
}

#[test]
fn test_precond_passes() {
    assert_eq!(SolverOptions::new().precond_passes(), 0);
    let options = SolverOptions::new().with_precond(true).with_equil_steps(0);
    assert_eq!(options.precond_passes(), 1);
    assert_eq!(options.with_equil_steps(3).precond_passes(), 3);
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "random_seed = 9\n[dimensions]\nn = 2\nm = 3").unwrap();
    let config = ExperimentConfig::load(file.path()).unwrap();
    assert_eq!(config.random_seed, 9);
    assert_eq!(config.dimensions, DimensionsConfig { n: 2, m: 3 });
}

#[test]
fn test_load_missing_file() {
    let result = ExperimentConfig::load("/nonexistent/experiment.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_invalid_toml() {
    let result = ExperimentConfig::from_toml_str("random_seed = \"x\"");
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_serialize_round_trip_keeps_runs() {
    let config = ExperimentConfig::default();
    let text = serde_yaml::to_string(&config).unwrap();
    let parsed = ExperimentConfig::from_yaml_str(&text).unwrap();
    assert_eq!(parsed.runs.len(), config.runs.len());
    assert_eq!(parsed.runs[1].options, config.runs[1].options);
}

#[test]
fn test_demo_config_matches_default_runs() {
    let config =
        ExperimentConfig::from_toml_str(include_str!("../../../demos/sylvester-lp/experiment.toml"))
            .unwrap();
    assert!(config.validate().is_ok());

    let enabled: Vec<&RunConfig> = config.enabled_runs().collect();
    let defaults = default_runs();
    assert_eq!(enabled.len(), defaults.len());
    for (run, default) in enabled.iter().zip(&defaults) {
        assert_eq!(run.name, default.name);
        assert_eq!(run.formulation, default.formulation);
        assert_eq!(run.options, default.options);
    }
    assert!(!config.run("exact_precond_direct").unwrap().enabled);
}
