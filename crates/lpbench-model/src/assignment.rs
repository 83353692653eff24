//! Values held by variables after a solve.

use std::collections::HashMap;

use lpbench_core::{LpBenchError, Matrix, Result};

use crate::variable::{VarId, Variable};

/// A value for each of a set of variables.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    values: HashMap<VarId, Matrix>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of `var`.
    ///
    /// # Errors
    ///
    /// Returns a dimension error when `value` does not have the variable's shape.
    pub fn insert(&mut self, var: &Variable, value: Matrix) -> Result<()> {
        if value.shape() != var.shape() {
            return Err(LpBenchError::shape_mismatch(
                var.name(),
                var.shape(),
                value.shape(),
            ));
        }
        self.values.insert(var.id(), value);
        Ok(())
    }

    /// Builder variant of [`insert`](Self::insert).
    pub fn with(mut self, var: &Variable, value: Matrix) -> Result<Self> {
        self.insert(var, value)?;
        Ok(self)
    }

    pub fn value(&self, var: &Variable) -> Option<&Matrix> {
        self.values.get(&var.id())
    }

    pub(crate) fn value_by_id(&self, id: VarId) -> Option<&Matrix> {
        self.values.get(&id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
