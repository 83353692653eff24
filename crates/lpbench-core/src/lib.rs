//! lpbench Core - numeric building blocks for solver experiments
//!
//! This crate provides the fundamental abstractions for lpbench:
//! - Dense column-major matrices for problem data
//! - Linear operators with forward and adjoint evaluation
//! - Compressed sparse column storage for materialized operators
//! - Seeded random data generation

pub mod error;
pub mod matrix;
pub mod operator;
pub mod random;

#[cfg(test)]
mod matrix_tests;
#[cfg(test)]
mod random_tests;

pub use error::{LpBenchError, Result};
pub use matrix::Matrix;
pub use operator::{
    Chain, Identity, InnerProduct, LeftMatMul, LinearOperator, RightMatMul, Scaled, SparseMatrix,
};
pub use random::{abs_randn, rademacher, randn, seeded_rng, DataRng};
