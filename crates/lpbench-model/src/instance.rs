//! The seeded Sylvester-type LP used by the experiments.
//!
//! ```text
//! minimize    trace(Cᵀ X)
//! subject to  X ≥ 0,  A·X·B ≤ 1
//! ```
//!
//! with `A = |randn(m, n)| + ε`, `B = |randn(n, m)| + ε`, `C = randn(n, n)`
//! and an unused `D = |randn(m, m)| + ε` drawn last from the same stream.

use lpbench_config::{ExperimentConfig, Formulation};
use lpbench_core::{abs_randn, randn, seeded_rng, Matrix, Result};

use crate::expr::Expr;
use crate::problem::Problem;
use crate::variable::Variable;

/// Problem data for one seed.
///
/// # Example
///
/// ```
/// use lpbench_model::SylvesterInstance;
///
/// let inst = SylvesterInstance::generate(4, 3, 1, 1e-6);
/// assert_eq!(inst.a().shape(), (3, 4));
/// assert_eq!(inst.b().shape(), (4, 3));
/// assert_eq!(inst.c().shape(), (4, 4));
/// assert_eq!(inst.d().shape(), (3, 3));
/// assert!(inst.a().min().unwrap() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct SylvesterInstance {
    n: usize,
    m: usize,
    a: Matrix,
    b: Matrix,
    c: Matrix,
    d: Matrix,
}

/// A formulation ready to solve, with handles to read results back.
#[derive(Debug, Clone)]
pub struct Formulated {
    pub formulation: Formulation,
    pub problem: Problem,
    /// The `n x n` decision matrix.
    pub x: Variable,
    /// `trace(Cᵀ X)`.
    pub cost: Expr,
}

impl SylvesterInstance {
    /// Draws A, B, C and D, in that order, from one seeded stream.
    pub fn generate(n: usize, m: usize, seed: u64, epsilon: f64) -> Self {
        let mut rng = seeded_rng(seed);
        let a = abs_randn(&mut rng, m, n, epsilon);
        let b = abs_randn(&mut rng, n, m, epsilon);
        let c = randn(&mut rng, n, n);
        let d = abs_randn(&mut rng, m, m, epsilon);
        Self { n, m, a, b, c, d }
    }

    pub fn from_config(config: &ExperimentConfig) -> Self {
        Self::generate(
            config.dimensions.n,
            config.dimensions.m,
            config.random_seed,
            config.epsilon,
        )
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn m(&self) -> usize {
        self.m
    }

    pub fn a(&self) -> &Matrix {
        &self.a
    }

    pub fn b(&self) -> &Matrix {
        &self.b
    }

    pub fn c(&self) -> &Matrix {
        &self.c
    }

    pub fn d(&self) -> &Matrix {
        &self.d
    }

    /// Entries of the dense `Bᵀ ⊗ A` operator behind `A·X·B`, i.e. `(m·n)²`.
    pub fn dense_operator_size(&self) -> usize {
        (self.m * self.n).pow(2)
    }

    /// `trace(Cᵀ X)` for a given `X`.
    pub fn cost_at(&self, x: &Matrix) -> Result<f64> {
        self.c.inner(x)
    }

    pub fn formulate(&self, formulation: Formulation) -> Result<Formulated> {
        match formulation {
            Formulation::Split => self.split(),
            Formulation::Direct => self.direct(),
        }
    }

    /// `X ≥ 0, Z·B ≤ 1, A·X = Z`.
    pub fn split(&self) -> Result<Formulated> {
        let x = Variable::new("X", self.n, self.n);
        let z = Variable::new("Z", self.m, self.n);
        let cost = Expr::var(&x).inner(&self.c)?;
        let constraints = vec![
            Expr::var(&x).ge(0.0),
            Expr::var(&z).right_mul(&self.b)?.le(1.0),
            Expr::var(&x).left_mul(&self.a)?.equals(Expr::var(&z))?,
        ];
        let problem = Problem::minimize(cost.clone(), constraints)?;
        Ok(Formulated {
            formulation: Formulation::Split,
            problem,
            x,
            cost,
        })
    }

    /// `X ≥ 0, A·X·B ≤ 1`.
    pub fn direct(&self) -> Result<Formulated> {
        let x = Variable::new("X", self.n, self.n);
        let cost = Expr::var(&x).inner(&self.c)?;
        let constraints = vec![
            Expr::var(&x).ge(0.0),
            Expr::var(&x)
                .left_mul(&self.a)?
                .right_mul(&self.b)?
                .le(1.0),
        ];
        let problem = Problem::minimize(cost.clone(), constraints)?;
        Ok(Formulated {
            formulation: Formulation::Direct,
            problem,
            x,
            cost,
        })
    }
}
