//! Shared test fixtures for lpbench crates.
//!
//! This crate provides problem data with known answers for testing.
//! It does NOT depend on `lpbench-model` to avoid circular dependencies;
//! fixtures are plain matrices and numbers that each test formulates itself.
//!
//! - [`lp`] - tiny linear programs with known optima or known failure modes
//! - [`sylvester`] - sizes and seeds for small Sylvester-type instances
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! lpbench-test = { workspace = true }
//! ```

pub mod lp;
pub mod sylvester;

pub use lp::{BoxLp, EqualityLp};
pub use sylvester::SmallInstance;

/// Asserts `|actual - expected| <= tol * max(1, |expected|)`.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tol * scale,
        "expected {} within {} (relative), got {}",
        expected,
        tol,
        actual
    );
}
