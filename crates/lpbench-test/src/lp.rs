//! Tiny linear programs.

use lpbench_core::Matrix;

/// `minimize cᵀx subject to 0 ≤ x ≤ upper`.
///
/// The optimum puts `x_i = upper` wherever `c_i < 0`.
#[derive(Debug, Clone)]
pub struct BoxLp {
    pub c: Matrix,
    pub upper: f64,
}

impl BoxLp {
    pub fn new() -> Self {
        Self {
            c: Matrix::from_rows(&[[1.0], [-2.0], [0.5], [-1.0]]),
            upper: 1.0,
        }
    }

    /// Optimal objective value.
    pub fn optimum(&self) -> f64 {
        self.c
            .as_slice()
            .iter()
            .map(|&c| c.min(0.0) * self.upper)
            .sum()
    }

    /// Optimal point.
    pub fn solution(&self) -> Matrix {
        self.c.map(|c| if c < 0.0 { self.upper } else { 0.0 })
    }
}

impl Default for BoxLp {
    fn default() -> Self {
        Self::new()
    }
}

/// `minimize cᵀx subject to a·x = rhs, x ≥ 0`.
#[derive(Debug, Clone)]
pub struct EqualityLp {
    pub a: Matrix,
    pub rhs: f64,
    pub c: Matrix,
}

impl EqualityLp {
    /// `minimize x1 + 2 x2 subject to x1 + x2 = 1, x ≥ 0`.
    pub fn new() -> Self {
        Self {
            a: Matrix::from_rows(&[[1.0, 1.0]]),
            rhs: 1.0,
            c: Matrix::from_rows(&[[1.0], [2.0]]),
        }
    }

    pub fn optimum(&self) -> f64 {
        1.0
    }

    pub fn solution(&self) -> Matrix {
        Matrix::from_rows(&[[1.0], [0.0]])
    }
}

impl Default for EqualityLp {
    fn default() -> Self {
        Self::new()
    }
}
