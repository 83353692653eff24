//! Small Sylvester-type instances.

/// Size, seed and offset for a fast instance.
#[derive(Debug, Clone, Copy)]
pub struct SmallInstance {
    pub n: usize,
    pub m: usize,
    pub seed: u64,
    pub epsilon: f64,
}

impl SmallInstance {
    /// A 4x4 decision matrix with 3x4 `A`.
    pub const fn tiny() -> Self {
        Self {
            n: 4,
            m: 3,
            seed: 1,
            epsilon: 1e-6,
        }
    }

    /// The reference size `n = m = 10`.
    pub const fn reference() -> Self {
        Self {
            n: 10,
            m: 10,
            seed: 1,
            epsilon: 1e-6,
        }
    }
}
