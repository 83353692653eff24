//! Error types for lpbench

use thiserror::Error;

/// Main error type for lpbench operations
#[derive(Debug, Error)]
pub enum LpBenchError {
    /// Operand shapes are not conformable
    #[error("Dimension mismatch: {0}")]
    Dimension(String),

    /// Invalid problem or options
    #[error("Configuration error: {0}")]
    Config(String),

    /// The solver certified primal infeasibility
    #[error("Problem is infeasible ({solver})")]
    Infeasible { solver: String },

    /// The solver certified dual infeasibility
    #[error("Problem is unbounded ({solver})")]
    Unbounded { solver: String },

    /// The solver stopped at its iteration cap
    #[error("{solver} reached the iteration limit after {iterations} iterations")]
    IterationLimit { solver: String, iterations: u32 },

    /// The solver gave up for numerical reasons
    #[error("{solver} numerical failure: {reason}")]
    Numerical { solver: String, reason: String },

    /// The backend rejected the problem data or settings
    #[error("Backend error: {0}")]
    Backend(String),
}

impl LpBenchError {
    /// Shorthand for a dimension mismatch between two described shapes.
    pub fn shape_mismatch(
        op: &str,
        left: (usize, usize),
        right: (usize, usize),
    ) -> Self {
        Self::Dimension(format!(
            "{}: {}x{} is not conformable with {}x{}",
            op, left.0, left.1, right.0, right.1
        ))
    }
}

/// Result type alias for lpbench operations
pub type Result<T> = std::result::Result<T, LpBenchError>;
