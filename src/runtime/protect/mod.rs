//! Native rooting: the protection stack, the precious list and the set of
//! values native code released since the last collection.
//!
//! Popped values are not dropped. They move to the native-reference set,
//! which is a collection root until the next collection ends, so a value
//! stays valid between `UNPROTECT` and the next allocation that may collect.
use tracing::warn;

use crate::{
    error::RResult,
    runtime::{context::RContext, value::Value},
};

pub mod precious_list;
pub mod protect_stack;

pub use precious_list::PreciousList;
pub use protect_stack::ProtectStack;


/// Slot returned by `R_ProtectWithIndex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectIndex(pub usize);

impl RContext {
    /// `PROTECT`: roots `value` and hands it back.
    pub fn protect(&mut self, value: Value) -> RResult<Value> {
        self.protect.push(value.clone())?;
        Ok(value)
    }

    /// `UNPROTECT`: pops `n` entries; over-popping warns and empties the
    /// stack.
    pub fn unprotect(&mut self, n: usize) {
        let popped = self.protect.pop(n);
        self.native_refs.extend(popped);
    }

    /// `UNPROTECT_PTR`: removes the topmost entry identical to `value`.
    pub fn unprotect_ptr(&mut self, value: &Value) {
        if let Some(removed) = self.protect.remove(value) {
            self.native_refs.push(removed);
        }
    }

    pub fn protect_with_index(&mut self, value: Value) -> RResult<(Value, ProtectIndex)> {
        let index = self.protect.push(value.clone())?;
        Ok((value, ProtectIndex(index)))
    }

    /// `R_Reprotect`.
    pub fn reprotect(&mut self, value: Value, index: ProtectIndex) -> RResult<()> {
        let old = self.protect.replace(index.0, value)?;
        self.native_refs.push(old);
        Ok(())
    }

    /// `R_PreserveObject`.
    pub fn preserve_object(&mut self, value: Value) {
        self.precious.preserve(value);
    }

    /// `R_ReleaseObject`; releasing an unpreserved value is a no-op.
    pub fn release_object(&mut self, value: &Value) {
        self.precious.release(value);
    }

    pub fn is_preserved(&self, value: &Value) -> bool {
        self.precious.contains(value)
    }

    pub fn protect_depth(&self) -> usize {
        self.protect.depth()
    }

    pub fn protect_stack(&self) -> &ProtectStack {
        &self.protect
    }

    /// Runs a native callback. With balance checking on, a callback that
    /// leaves extra entries is reported and the stack is cut back to its
    /// depth at entry.
    pub fn call_native<R>(&mut self, f: impl FnOnce(&mut RContext) -> R) -> R {
        let depth = self.protect.depth();
        let result = f(self);
        let after = self.protect.depth();
        if self.config().check_native_balance && after != depth {
            warn!(expected = depth, actual = after, "stack imbalance in native call");
            self.protect.note_imbalance();
            let released = self.protect.truncate(depth);
            self.native_refs.extend(released);
        }
        result
    }
}
