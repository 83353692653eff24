use std::sync::Mutex;

use lpbench_config::{Precision, SolverOptions};
use lpbench_core::{seeded_rng, LinearOperator, LpBenchError, Matrix, Result, SparseMatrix};
use lpbench_model::{stuff, ConicProblem, Expr, Problem, SylvesterInstance, Variable};
use lpbench_test::{assert_close, BoxLp, EqualityLp, SmallInstance};

use super::*;

fn tiny() -> SylvesterInstance {
    let s = SmallInstance::tiny();
    SylvesterInstance::generate(s.n, s.m, s.seed, s.epsilon)
}

fn box_problem(lp: &BoxLp) -> (Problem, Variable) {
    let x = Variable::new("x", lp.c.rows(), 1);
    let problem = Problem::minimize(
        Expr::var(&x).inner(&lp.c).unwrap(),
        vec![Expr::var(&x).ge(0.0), Expr::var(&x).le(lp.upper)],
    )
    .unwrap();
    (problem, x)
}

#[test]
fn test_box_lp_reaches_known_optimum() {
    let lp = BoxLp::new();
    let (problem, x) = box_problem(&lp);

    let solution = solve(&problem, &SolverOptions::default(), 1).unwrap();
    assert_eq!(solution.backend(), "clarabel");
    assert_close(solution.objective(), lp.optimum(), 1e-6);
    let value = solution.value(&x).unwrap();
    assert!(value.max_abs_diff(&lp.solution()).unwrap() < 1e-5);
    assert!(solution.max_violation() < 1e-6);
    assert!(solution.iterations() > 0);
}

#[test]
fn test_equality_lp_and_duals() {
    let lp = EqualityLp::new();
    let x = Variable::new("x", 2, 1);
    let rhs = Expr::constant(&Matrix::filled(1, 1, lp.rhs));
    let problem = Problem::minimize(
        Expr::var(&x).inner(&lp.c).unwrap(),
        vec![
            Expr::var(&x).ge(0.0),
            Expr::var(&x).left_mul(&lp.a).unwrap().equals(rhs).unwrap(),
        ],
    )
    .unwrap();

    let solution = solve(&problem, &SolverOptions::default(), 1).unwrap();
    assert_close(solution.objective(), lp.optimum(), 1e-6);
    assert!(
        solution
            .value(&x)
            .unwrap()
            .max_abs_diff(&lp.solution())
            .unwrap()
            < 1e-5
    );
    assert_eq!(solution.dual(0).unwrap().len(), 2);
    assert_eq!(solution.dual(1).unwrap().len(), 1);
    assert!(solution.dual(2).is_none());
    // the multiplier of x1 + x2 = 1 prices the cheaper variable
    assert_close(solution.dual(1).unwrap()[0].abs(), 1.0, 1e-5);
}

#[test]
fn test_maximize_reports_source_sense() {
    let lp = BoxLp::new();
    let x = Variable::new("x", lp.c.rows(), 1);
    let problem = Problem::maximize(
        Expr::var(&x).inner(&lp.c).unwrap(),
        vec![Expr::var(&x).ge(0.0), Expr::var(&x).le(lp.upper)],
    )
    .unwrap();

    let solution = solve(&problem, &SolverOptions::default(), 1).unwrap();
    // positive coefficients 1 and 0.5 go to the upper bound
    assert_close(solution.objective(), 1.5, 1e-6);
}

#[test]
fn test_infeasible_problem() {
    let x = Variable::new("x", 1, 1);
    let problem = Problem::minimize(
        Expr::var(&x).inner(&Matrix::filled(1, 1, 1.0)).unwrap(),
        vec![Expr::var(&x).ge(0.0), Expr::var(&x).le(-1.0)],
    )
    .unwrap();

    let err = solve(&problem, &SolverOptions::default(), 1).unwrap_err();
    assert!(matches!(err, LpBenchError::Infeasible { .. }), "{err}");
}

#[test]
fn test_unbounded_problem() {
    let x = Variable::new("x", 1, 1);
    let problem = Problem::minimize(
        Expr::var(&x).inner(&Matrix::filled(1, 1, -1.0)).unwrap(),
        vec![Expr::var(&x).ge(0.0)],
    )
    .unwrap();

    let err = solve(&problem, &SolverOptions::default(), 1).unwrap_err();
    assert!(matches!(err, LpBenchError::Unbounded { .. }), "{err}");
}

#[test]
fn test_iteration_limit() {
    let f = tiny().direct().unwrap();
    let options = SolverOptions::new().with_max_iters(1);
    let err = solve(&f.problem, &options, 1).unwrap_err();
    assert!(
        matches!(err, LpBenchError::IterationLimit { .. }),
        "{err}"
    );
}

#[test]
fn test_invalid_options_are_rejected() {
    let f = tiny().direct().unwrap();
    let options = SolverOptions::new().with_tolerances(0.0, 1e-3);
    let err = solve(&f.problem, &options, 1).unwrap_err();
    assert!(matches!(err, LpBenchError::Config(_)));
}

#[test]
fn test_tolerance_underflowing_single_precision_is_rejected() {
    let lp = BoxLp::new();
    let (problem, _) = box_problem(&lp);
    let options = SolverOptions::new()
        .with_tolerances(1e-50, 1e-3)
        .with_precision(Precision::Single);
    assert!(options.validate().is_ok());

    let err = solve(&problem, &options, 1).unwrap_err();
    assert!(matches!(err, LpBenchError::Config(ref msg) if msg.contains("abs_tol")), "{err}");

    // the same tolerance is representable in double precision
    let double = options.with_precision(Precision::Double);
    assert!(solve(&problem, &double, 1).is_ok());
}

#[test]
fn test_split_and_direct_agree() {
    let inst = tiny();
    let split = inst.split().unwrap();
    let direct = inst.direct().unwrap();
    let options = SolverOptions::default();

    let s = solve(&split.problem, &options, 1).unwrap();
    let d = solve(&direct.problem, &options, 1).unwrap();
    assert!(d.objective() < 0.0);
    assert_close(s.objective(), d.objective(), 1e-5);
    assert_eq!(d.nnz(), stuff(&direct.problem).unwrap().nnz());
    assert!(s.nnz() > 0);

    let s_cost = s.eval_scalar(&split.cost).unwrap();
    let d_cost = d.eval_scalar(&direct.cost).unwrap();
    assert_close(s_cost, s.objective(), 1e-9);
    assert_close(d_cost, d.objective(), 1e-9);
    assert_close(
        inst.cost_at(d.value(&direct.x).unwrap()).unwrap(),
        d_cost,
        1e-9,
    );
}

#[test]
fn test_tighter_tolerance_does_not_raise_objective() {
    let f = tiny().direct().unwrap();
    let loose_eps = 1e-3;
    let loose = solve(&f.problem, &SolverOptions::new().with_eps(loose_eps), 1).unwrap();
    let tight = solve(&f.problem, &SolverOptions::new().with_eps(1e-9), 1).unwrap();
    let slack = 10.0 * loose_eps * (1.0 + loose.objective().abs());
    assert!(tight.objective() <= loose.objective() + slack);
}

#[test]
fn test_single_precision_agrees_with_double() {
    let f = tiny().direct().unwrap();
    let double = solve(&f.problem, &SolverOptions::default(), 1).unwrap();
    let single_options = SolverOptions::new()
        .with_max_iters(500)
        .with_eps(1e-4)
        .with_precision(Precision::Single);
    let single = solve(&f.problem, &single_options, 1).unwrap();
    assert_close(single.objective(), double.objective(), 1e-2);
}

#[test]
fn test_preconditioning_keeps_optimum() {
    let f = tiny().direct().unwrap();
    let plain = solve(&f.problem, &SolverOptions::default(), 1).unwrap();

    for samples in [0, 200] {
        let options = SolverOptions::new()
            .with_precond(true)
            .with_equil_steps(3)
            .with_samples(samples);
        let scaled = solve(&f.problem, &options, 1).unwrap();
        assert_close(scaled.objective(), plain.objective(), 1e-5);
        assert!(scaled.max_violation() < 1e-5);
    }

    let os_seeded = SolverOptions::new()
        .with_precond(true)
        .with_samples(50)
        .with_rand_seed(true);
    let scaled = solve(&f.problem, &os_seeded, 1).unwrap();
    assert_close(scaled.objective(), plain.objective(), 1e-5);
}

#[test]
fn test_reference_runs_on_small_instance() {
    let f = tiny().direct().unwrap();
    let reference = solve(&f.problem, &SolverOptions::default(), 1).unwrap();
    for run in lpbench_config::default_runs() {
        let formulated = tiny().formulate(run.formulation).unwrap();
        let options = run.options.clone().with_verbose(false);
        let solution = solve(&formulated.problem, &options, 1).unwrap();
        assert_close(solution.objective(), reference.objective(), 1e-2);
    }
}

#[test]
fn test_backend_settings_mapping() {
    let settings = BackendSettings::from_options(&SolverOptions::default());
    assert_eq!(settings.max_iters, 200);
    assert_eq!(settings.abs_tol, 1e-8);
    assert_eq!(settings.equilibrate, Some(10));
    assert_eq!(settings.precision, Precision::Double);

    let off = BackendSettings::from_options(&SolverOptions::new().with_equil_steps(0));
    assert_eq!(off.equilibrate, None);

    let tolerances =
        BackendSettings::from_options(&SolverOptions::new().with_tolerances(1e-4, 1e-3));
    assert_eq!(tolerances.abs_tol, 1e-4);
    assert_eq!(tolerances.rel_tol, 1e-3);
}

#[derive(Debug, Default)]
struct RecordingBackend {
    seen: Mutex<Vec<(BackendSettings, ConicProblem)>>,
}

impl ConeSolver for RecordingBackend {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn solve_conic(
        &self,
        problem: &ConicProblem,
        settings: &BackendSettings,
    ) -> Result<ConicSolution> {
        self.seen
            .lock()
            .unwrap()
            .push((settings.clone(), problem.clone()));
        Err(LpBenchError::Numerical {
            solver: "recording".to_string(),
            reason: "stop".to_string(),
        })
    }
}

#[test]
fn test_precond_hands_scaled_problem_to_backend() {
    let f = tiny().direct().unwrap();
    let conic = stuff(&f.problem).unwrap();
    let backend = RecordingBackend::default();
    let options = SolverOptions::new().with_precond(true).with_equil_steps(2);

    let err = solve_with(&backend, &f.problem, &options, 7).unwrap_err();
    assert!(matches!(err, LpBenchError::Numerical { .. }));

    let seen = backend.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (settings, scaled) = &seen[0];
    assert_eq!(settings.equilibrate, None);
    assert_eq!(scaled.a.nnz(), conic.a.nnz());
    assert_eq!(scaled.cones, conic.cones);

    let expected = Scaling::equilibrate(
        &conic.a,
        2,
        NormEstimate::Exact,
        &mut seeded_rng(7),
    );
    assert_eq!(scaled.b, expected.apply(&conic).b);
    assert_ne!(scaled.q, conic.q);
}

#[test]
fn test_exact_norms_match_sparse_norms() {
    let conic = stuff(&tiny().direct().unwrap().problem).unwrap();
    let mut rng = seeded_rng(3);
    let rows = row_norms_sq(&conic.a, NormEstimate::Exact, &mut rng);
    let cols = col_norms_sq(&conic.a, NormEstimate::Exact, &mut rng);
    for (got, want) in rows.iter().zip(conic.a.row_norms_sq()) {
        assert_close(*got, want, 1e-12);
    }
    for (got, want) in cols.iter().zip(conic.a.col_norms_sq()) {
        assert_close(*got, want, 1e-12);
    }
}

#[test]
fn test_sampled_norms_are_exact_for_diagonal() {
    let diag = SparseMatrix::from_triplets(3, 3, &[(0, 0, 2.0), (1, 1, -3.0), (2, 2, 0.5)])
        .unwrap();
    let mut rng = seeded_rng(11);
    let rows = row_norms_sq(&diag, NormEstimate::Sampled(4), &mut rng);
    assert_eq!(rows, vec![4.0, 9.0, 0.25]);
}

#[test]
fn test_sampled_norms_estimate_dense_rows() {
    let conic = stuff(&tiny().direct().unwrap().problem).unwrap();
    let mut rng = seeded_rng(5);
    let rows = row_norms_sq(&conic.a, NormEstimate::Sampled(2000), &mut rng);
    let cols = col_norms_sq(&conic.a, NormEstimate::Sampled(2000), &mut rng);
    for (got, want) in rows.iter().zip(conic.a.row_norms_sq()) {
        assert!((got - want).abs() <= 0.2 * want, "{got} vs {want}");
    }
    for (got, want) in cols.iter().zip(conic.a.col_norms_sq()) {
        assert!((got - want).abs() <= 0.2 * want, "{got} vs {want}");
    }
}

#[test]
fn test_scaling_preserves_constraint_images() {
    let conic = stuff(&tiny().direct().unwrap().problem).unwrap();
    let scaling = Scaling::equilibrate(&conic.a, 4, NormEstimate::Exact, &mut seeded_rng(1));
    let scaled = scaling.apply(&conic);

    let x: Vec<f64> = (0..conic.num_vars()).map(|i| 0.01 * i as f64).collect();
    let x_scaled: Vec<f64> = x.iter().zip(scaling.col()).map(|(x, e)| x / e).collect();
    assert_eq!(scaling.unscale_x(&x_scaled).len(), x.len());

    let ax = conic.a.apply(&x);
    let dax = scaled.a.apply(&x_scaled);
    for ((d, ax), dax) in scaling.row().iter().zip(&ax).zip(&dax) {
        assert!((d * ax - dax).abs() < 1e-9);
    }

    // slack recovery inverts the row scaling
    let s = scaling.unscale_s(&scaled.b);
    for (s, b) in s.iter().zip(&conic.b) {
        assert!((s - b).abs() < 1e-12);
    }
    assert_close(
        scaled.q.iter().zip(&x_scaled).map(|(q, x)| q * x).sum::<f64>(),
        conic.q.iter().zip(&x).map(|(q, x)| q * x).sum::<f64>(),
        1e-9,
    );
}

#[test]
fn test_scale_factors_are_clamped() {
    let a = SparseMatrix::from_triplets(1, 1, &[(0, 0, 1e12)]).unwrap();
    let scaling = Scaling::equilibrate(&a, 10, NormEstimate::Exact, &mut seeded_rng(0));
    assert_eq!(scaling.row(), &[MIN_SCALE]);
    assert_eq!(scaling.col(), &[MIN_SCALE]);

    let identity = Scaling::identity(2, 3);
    assert_eq!(identity.spread(), 1.0);
    assert_eq!(identity.unscale_z(&[2.0, 3.0]), vec![2.0, 3.0]);
}
