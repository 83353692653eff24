//! Decision variables.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Process-unique variable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A matrix-shaped decision variable.
///
/// Cloning a variable yields a handle to the same variable.
///
/// # Example
///
/// ```
/// use lpbench_model::Variable;
///
/// let x = Variable::new("X", 3, 2);
/// assert_eq!(x.shape(), (3, 2));
/// assert_eq!(x.len(), 6);
/// assert_ne!(x.id(), Variable::new("X", 3, 2).id());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    id: VarId,
    name: String,
    rows: usize,
    cols: usize,
}

impl Variable {
    pub fn new(name: impl Into<String>, rows: usize, cols: usize) -> Self {
        Self {
            id: VarId(NEXT_ID.fetch_add(1, Ordering::Relaxed)),
            name: name.into(),
            rows,
            cols,
        }
    }

    pub fn id(&self) -> VarId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of scalar entries.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}x{}]", self.name, self.rows, self.cols)
    }
}
