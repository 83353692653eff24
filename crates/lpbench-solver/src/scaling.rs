//! Matrix-free diagonal preconditioning.
//!
//! The constraint operator `A` is replaced by `D A E` with positive diagonal
//! `D` (rows) and `E` (columns). Each pass measures the 2-norms of the rows
//! and columns of the current scaled operator and multiplies `D` and `E` by
//! the inverse square roots of those norms, as in Ruiz equilibration.
//!
//! Norms are measured through forward and adjoint products only. With
//! random sign vectors `w`, `E[(A w)_i²] = ‖A_i,:‖²` and
//! `E[(Aᵀ w)_j²] = ‖A_:,j‖²`, so a few probes estimate all row or column
//! norms at once.
//!
//! For `min qᵀx s.t. A x + s = b, s ∈ K` the scaled problem is
//! `min (E q)ᵀx̃ s.t. (D A E) x̃ + s̃ = D b`. Since `D` is positive and `K` is
//! a product of zero and nonnegative cones, `s̃ = D s` stays in `K`, and the
//! original point is recovered as `x = E x̃`, `s = D⁻¹ s̃`, `z = D z̃`.

use lpbench_core::{rademacher, LinearOperator};
use lpbench_model::ConicProblem;
use rand::Rng;

/// Smallest accumulated scale factor.
pub const MIN_SCALE: f64 = 1e-4;
/// Largest accumulated scale factor.
pub const MAX_SCALE: f64 = 1e4;

/// Norms at or below this are left unscaled.
const NORM_FLOOR: f64 = 1e-12;

/// How row and column norms are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormEstimate {
    /// One product per row or column with unit vectors.
    Exact,
    /// Averaging over this many random sign probes.
    Sampled(u32),
}

impl NormEstimate {
    /// `Exact` for zero samples, `Sampled` otherwise.
    pub fn from_samples(samples: u32) -> Self {
        if samples == 0 {
            NormEstimate::Exact
        } else {
            NormEstimate::Sampled(samples)
        }
    }
}

/// `D A E` without forming it.
#[derive(Debug)]
struct ScaledView<'a> {
    inner: &'a dyn LinearOperator,
    row: &'a [f64],
    col: &'a [f64],
}

impl LinearOperator for ScaledView<'_> {
    fn input_len(&self) -> usize {
        self.inner.input_len()
    }

    fn output_len(&self) -> usize {
        self.inner.output_len()
    }

    fn forward(&self, x: &[f64], y: &mut [f64]) {
        let ex: Vec<f64> = x.iter().zip(self.col).map(|(x, e)| x * e).collect();
        self.inner.forward(&ex, y);
        for (y, d) in y.iter_mut().zip(self.row) {
            *y *= d;
        }
    }

    fn adjoint(&self, y: &[f64], x: &mut [f64]) {
        let dy: Vec<f64> = y.iter().zip(self.row).map(|(y, d)| y * d).collect();
        self.inner.adjoint(&dy, x);
        for (x, e) in x.iter_mut().zip(self.col) {
            *x *= e;
        }
    }
}

/// Squared 2-norms of the rows of `op`.
pub fn row_norms_sq<R: Rng + ?Sized>(
    op: &dyn LinearOperator,
    estimate: NormEstimate,
    rng: &mut R,
) -> Vec<f64> {
    let mut norms = vec![0.0; op.output_len()];
    let mut probe = vec![0.0; op.input_len()];
    let mut image = vec![0.0; op.output_len()];
    match estimate {
        NormEstimate::Exact => {
            for j in 0..probe.len() {
                probe[j] = 1.0;
                op.forward(&probe, &mut image);
                probe[j] = 0.0;
                accumulate_squares(&mut norms, &image);
            }
        }
        NormEstimate::Sampled(samples) => {
            for _ in 0..samples {
                rademacher(rng, &mut probe);
                op.forward(&probe, &mut image);
                accumulate_squares(&mut norms, &image);
            }
            average(&mut norms, samples);
        }
    }
    norms
}

/// Squared 2-norms of the columns of `op`.
pub fn col_norms_sq<R: Rng + ?Sized>(
    op: &dyn LinearOperator,
    estimate: NormEstimate,
    rng: &mut R,
) -> Vec<f64> {
    let mut norms = vec![0.0; op.input_len()];
    let mut probe = vec![0.0; op.output_len()];
    let mut image = vec![0.0; op.input_len()];
    match estimate {
        NormEstimate::Exact => {
            for i in 0..probe.len() {
                probe[i] = 1.0;
                op.adjoint(&probe, &mut image);
                probe[i] = 0.0;
                accumulate_squares(&mut norms, &image);
            }
        }
        NormEstimate::Sampled(samples) => {
            for _ in 0..samples {
                rademacher(rng, &mut probe);
                op.adjoint(&probe, &mut image);
                accumulate_squares(&mut norms, &image);
            }
            average(&mut norms, samples);
        }
    }
    norms
}

fn accumulate_squares(norms: &mut [f64], image: &[f64]) {
    for (n, v) in norms.iter_mut().zip(image) {
        *n += v * v;
    }
}

fn average(norms: &mut [f64], samples: u32) {
    let inv = 1.0 / f64::from(samples);
    for n in norms.iter_mut() {
        *n *= inv;
    }
}

fn inverse_sqrt_norm(norm_sq: f64) -> f64 {
    let norm = norm_sq.sqrt();
    if norm > NORM_FLOOR {
        1.0 / norm.sqrt()
    } else {
        1.0
    }
}

/// Accumulated row and column scale factors.
///
/// # Example
///
/// ```
/// use lpbench_core::{seeded_rng, SparseMatrix};
/// use lpbench_solver::{NormEstimate, Scaling};
///
/// let a = SparseMatrix::from_triplets(2, 2, &[(0, 0, 100.0), (1, 1, 0.01)]).unwrap();
/// let scaling = Scaling::equilibrate(&a, 8, NormEstimate::Exact, &mut seeded_rng(0));
/// let scaled = a.scaled(scaling.row(), scaling.col());
/// for (_, _, v) in scaled.triplets() {
///     assert!((v - 1.0).abs() < 1e-2);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scaling {
    row: Vec<f64>,
    col: Vec<f64>,
}

impl Scaling {
    /// No scaling for an `rows x cols` operator.
    pub fn identity(rows: usize, cols: usize) -> Self {
        Self {
            row: vec![1.0; rows],
            col: vec![1.0; cols],
        }
    }

    /// Runs `passes` equilibration passes on `op`.
    ///
    /// Accumulated factors are clamped to [`MIN_SCALE`, `MAX_SCALE`].
    pub fn equilibrate<R: Rng + ?Sized>(
        op: &dyn LinearOperator,
        passes: u32,
        estimate: NormEstimate,
        rng: &mut R,
    ) -> Self {
        let mut scaling = Self::identity(op.output_len(), op.input_len());
        for _ in 0..passes {
            let (row_norms, col_norms) = {
                let view = ScaledView {
                    inner: op,
                    row: &scaling.row,
                    col: &scaling.col,
                };
                (
                    row_norms_sq(&view, estimate, rng),
                    col_norms_sq(&view, estimate, rng),
                )
            };
            for (d, n) in scaling.row.iter_mut().zip(row_norms) {
                *d = (*d * inverse_sqrt_norm(n)).clamp(MIN_SCALE, MAX_SCALE);
            }
            for (e, n) in scaling.col.iter_mut().zip(col_norms) {
                *e = (*e * inverse_sqrt_norm(n)).clamp(MIN_SCALE, MAX_SCALE);
            }
        }
        scaling
    }

    /// Row factors `D`.
    pub fn row(&self) -> &[f64] {
        &self.row
    }

    /// Column factors `E`.
    pub fn col(&self) -> &[f64] {
        &self.col
    }

    /// The problem with `A ← D A E`, `b ← D b`, `q ← E q`.
    pub fn apply(&self, problem: &ConicProblem) -> ConicProblem {
        let mut scaled = problem.clone();
        scaled.a = problem.a.scaled(&self.row, &self.col);
        scaled.b = mul(&problem.b, &self.row);
        scaled.q = mul(&problem.q, &self.col);
        scaled
    }

    /// `x = E x̃`.
    pub fn unscale_x(&self, x: &[f64]) -> Vec<f64> {
        mul(x, &self.col)
    }

    /// `s = D⁻¹ s̃`.
    pub fn unscale_s(&self, s: &[f64]) -> Vec<f64> {
        s.iter().zip(&self.row).map(|(s, d)| s / d).collect()
    }

    /// `z = D z̃`.
    pub fn unscale_z(&self, z: &[f64]) -> Vec<f64> {
        mul(z, &self.row)
    }

    /// Ratio of the largest to the smallest factor over rows and columns.
    pub fn spread(&self) -> f64 {
        let all = self.row.iter().chain(&self.col).copied();
        let (lo, hi) = all.fold((f64::INFINITY, 0.0_f64), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if lo.is_finite() && lo > 0.0 {
            hi / lo
        } else {
            1.0
        }
    }
}

fn mul(values: &[f64], factors: &[f64]) -> Vec<f64> {
    values.iter().zip(factors).map(|(v, f)| v * f).collect()
}
