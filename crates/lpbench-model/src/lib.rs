//! lpbench Model - problem formulation for solver experiments
//!
//! This crate turns matrix expressions into solver input:
//! - [`Variable`] and [`Expr`] build affine matrix expressions over
//!   [`LinearOperator`](lpbench_core::LinearOperator)s
//! - [`Constraint`] and [`Problem`] describe a linear program
//! - [`stuff`] canonicalizes a problem into [`ConicProblem`] form
//! - [`SylvesterInstance`] generates the seeded experiment data and its
//!   two equivalent formulations

pub mod assignment;
pub mod constraint;
pub mod expr;
pub mod instance;
pub mod problem;
pub mod stuffing;
pub mod variable;


pub use assignment::Assignment;
pub use constraint::{Constraint, ConstraintKind};
pub use expr::Expr;
pub use instance::{Formulated, SylvesterInstance};
pub use problem::{Problem, Sense};
pub use stuffing::{stuff, Cone, ConicProblem, VariableLayout};
pub use variable::{VarId, Variable};
