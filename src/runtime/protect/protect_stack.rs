use tracing::warn;

use crate::{
    error::{RError, RResult},
    runtime::value::Value,
};

/// LIFO stack of values rooted by native code.
#[derive(Debug)]
pub struct ProtectStack {
    entries: Vec<Value>,
    limit: usize,
    underflows: usize,
    imbalances: usize,
}

impl ProtectStack {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
            underflows: 0,
            imbalances: 0,
        }
    }

    /// Pushes `value` and returns its slot index.
    pub fn push(&mut self, value: Value) -> RResult<usize> {
        if self.entries.len() >= self.limit {
            return Err(RError::error("protect(): protection stack overflow"));
        }
        self.entries.push(value);
        Ok(self.entries.len() - 1)
    }

    /// Pops `n` entries, stopping at the empty stack with a warning.
    pub fn pop(&mut self, n: usize) -> Vec<Value> {
        let available = self.entries.len();
        if n > available {
            warn!(
                requested = n,
                available, "unprotect(): only {} protected items", available
            );
            self.underflows += 1;
        }
        self.entries.split_off(available - n.min(available))
    }

    /// Removes the topmost entry identical to `value`.
    pub fn remove(&mut self, value: &Value) -> Option<Value> {
        let index = self.entries.iter().rposition(|entry| entry.ptr_eq(value))?;
        Some(self.entries.remove(index))
    }

    /// Replaces the value in slot `index`, returning the old one.
    pub fn replace(&mut self, index: usize, value: Value) -> RResult<Value> {
        let depth = self.entries.len();
        let slot = self.entries.get_mut(index).ok_or_else(|| {
            RError::error(format!("R_Reprotect: only {} protected items", depth))
        })?;
        Ok(std::mem::replace(slot, value))
    }

    /// Drops everything above `depth`.
    pub fn truncate(&mut self, depth: usize) -> Vec<Value> {
        self.entries.split_off(depth.min(self.entries.len()))
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    /// Number of over-unprotect events seen so far.
    pub fn underflow_count(&self) -> usize {
        self.underflows
    }

    pub(crate) fn note_imbalance(&mut self) {
        self.imbalances += 1;
    }

    /// Number of native calls that returned with an unbalanced stack.
    pub fn imbalance_count(&self) -> usize {
        self.imbalances
    }
}
