//! Canonicalization into conic form.
//!
//! A [`Problem`] becomes
//!
//! ```text
//! minimize    qᵀx + c₀
//! subject to  A x + s = b
//!             s ∈ K = {0}^p × R₊^r
//! ```
//!
//! where `x` stacks `vec(V)` of every variable. Equality rows come first and
//! land in the zero cone, inequality rows follow in the nonnegative cone.

use std::ops::Range;

use lpbench_core::{LpBenchError, Matrix, Result, SparseMatrix};
use tracing::debug;

use crate::assignment::Assignment;
use crate::constraint::ConstraintKind;
use crate::problem::{Problem, Sense};
use crate::variable::{VarId, Variable};

/// A block of the cone product `K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cone {
    /// `{0}^dim`.
    Zero(usize),
    /// `R₊^dim`.
    Nonnegative(usize),
}

impl Cone {
    pub fn dim(&self) -> usize {
        match *self {
            Cone::Zero(d) | Cone::Nonnegative(d) => d,
        }
    }
}

/// Where each variable lives in the stacked vector `x`.
#[derive(Debug, Clone)]
pub struct VariableLayout {
    entries: Vec<(Variable, usize)>,
    len: usize,
}

impl VariableLayout {
    pub fn new(variables: &[Variable]) -> Self {
        let mut entries = Vec::with_capacity(variables.len());
        let mut offset = 0;
        for var in variables {
            entries.push((var.clone(), offset));
            offset += var.len();
        }
        Self {
            entries,
            len: offset,
        }
    }

    /// Length of the stacked vector.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn offset(&self, id: VarId) -> Option<usize> {
        self.entries
            .iter()
            .find(|(v, _)| v.id() == id)
            .map(|&(_, offset)| offset)
    }

    fn offset_of(&self, var: &Variable) -> Result<usize> {
        self.offset(var.id()).ok_or_else(|| {
            LpBenchError::Config(format!("variable {} is not part of the problem", var))
        })
    }

    /// Splits a stacked vector into per-variable values.
    pub fn unstack(&self, x: &[f64]) -> Result<Assignment> {
        if x.len() != self.len {
            return Err(LpBenchError::Dimension(format!(
                "stacked vector has length {}, layout expects {}",
                x.len(),
                self.len
            )));
        }
        let mut values = Assignment::new();
        for (var, offset) in &self.entries {
            let (rows, cols) = var.shape();
            let data = x[*offset..*offset + var.len()].to_vec();
            values.insert(var, Matrix::from_column_major(rows, cols, data)?)?;
        }
        Ok(values)
    }

    /// Stacks per-variable values into one vector.
    pub fn stack(&self, values: &Assignment) -> Result<Vec<f64>> {
        let mut x = vec![0.0; self.len];
        for (var, offset) in &self.entries {
            let value = values.value(var).ok_or_else(|| {
                LpBenchError::Config(format!("variable {} has no value", var))
            })?;
            x[*offset..*offset + var.len()].copy_from_slice(value.as_slice());
        }
        Ok(x)
    }
}

/// A problem in conic standard form.
#[derive(Debug, Clone)]
pub struct ConicProblem {
    /// Linear cost.
    pub q: Vec<f64>,
    /// Constant objective term.
    pub objective_offset: f64,
    /// Constraint matrix.
    pub a: SparseMatrix,
    /// Constraint right-hand side.
    pub b: Vec<f64>,
    /// Cone blocks partitioning the rows of `a`.
    pub cones: Vec<Cone>,
    sense: Sense,
    layout: VariableLayout,
    constraint_rows: Vec<Range<usize>>,
}

impl ConicProblem {
    pub fn num_vars(&self) -> usize {
        self.q.len()
    }

    pub fn num_rows(&self) -> usize {
        self.b.len()
    }

    pub fn nnz(&self) -> usize {
        self.a.nnz()
    }

    pub fn layout(&self) -> &VariableLayout {
        &self.layout
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Rows of `a` that belong to the `index`-th constraint of the source problem.
    pub fn constraint_rows(&self, index: usize) -> Option<Range<usize>> {
        self.constraint_rows.get(index).cloned()
    }

    /// Converts the conic objective `qᵀx + c₀` back to the source problem's sense.
    pub fn source_objective(&self, conic_value: f64) -> f64 {
        match self.sense {
            Sense::Minimize => conic_value,
            Sense::Maximize => -conic_value,
        }
    }

    /// Conic objective at a stacked point.
    pub fn objective_at(&self, x: &[f64]) -> f64 {
        self.q.iter().zip(x).map(|(q, x)| q * x).sum::<f64>() + self.objective_offset
    }

    /// Splits a dual vector into one slice per source constraint.
    pub fn split_duals(&self, z: &[f64]) -> Vec<Vec<f64>> {
        self.constraint_rows
            .iter()
            .map(|rows| z[rows.clone()].to_vec())
            .collect()
    }
}

/// Canonicalizes `problem` into conic form.
///
/// The objective gradient of each variable is one adjoint product of its
/// term's operator; constraint blocks are materialized by probing.
pub fn stuff(problem: &Problem) -> Result<ConicProblem> {
    let layout = VariableLayout::new(problem.variables());
    let n = layout.len();
    let sign = match problem.sense() {
        Sense::Minimize => 1.0,
        Sense::Maximize => -1.0,
    };

    let mut q = vec![0.0; n];
    let objective = problem.objective();
    for term in objective.terms() {
        let offset = layout.offset_of(term.variable())?;
        let gradient = term.operator().apply_adjoint(&[1.0]);
        for (k, g) in gradient.into_iter().enumerate() {
            q[offset + k] += sign * g;
        }
    }
    let objective_offset = sign * objective.constant_part()[0];

    let constraints = problem.constraints();
    let order = constraints
        .iter()
        .enumerate()
        .filter(|(_, c)| c.kind() == ConstraintKind::Equality)
        .chain(
            constraints
                .iter()
                .enumerate()
                .filter(|(_, c)| c.kind() == ConstraintKind::Inequality),
        );

    let mut triplets = Vec::new();
    let mut b = Vec::with_capacity(problem.num_constraint_rows());
    let mut constraint_rows = vec![0..0; constraints.len()];
    let mut zero_rows = 0;
    let mut nonneg_rows = 0;
    let mut row = 0;
    for (index, constraint) in order {
        for term in constraint.expr().terms() {
            let offset = layout.offset_of(term.variable())?;
            let block = term.operator().to_sparse();
            triplets.extend(block.triplets().map(|(i, j, v)| (row + i, offset + j, v)));
        }
        b.extend(constraint.expr().constant_part().iter().map(|c| -c));
        constraint_rows[index] = row..row + constraint.len();
        row += constraint.len();
        match constraint.kind() {
            ConstraintKind::Equality => zero_rows += constraint.len(),
            ConstraintKind::Inequality => nonneg_rows += constraint.len(),
        }
    }
    let a = SparseMatrix::from_triplets(row, n, &triplets)?;

    let mut cones = Vec::with_capacity(2);
    if zero_rows > 0 {
        cones.push(Cone::Zero(zero_rows));
    }
    if nonneg_rows > 0 {
        cones.push(Cone::Nonnegative(nonneg_rows));
    }

    debug!(
        variables = n,
        rows = row,
        nnz = a.nnz(),
        zero_rows,
        nonneg_rows,
        "Problem stuffed"
    );

    Ok(ConicProblem {
        q,
        objective_offset,
        a,
        b,
        cones,
        sense: problem.sense(),
        layout,
        constraint_rows,
    })
}
