//! Per-execution-context bridge state.
//!
//! An `RContext` is confined to one thread and owns everything that GNU R
//! keeps in globals: the protection stack, the precious list, the heap
//! registry, the ALTREP class table and the global environment. Reentrant
//! native calls share the same context.
use tracing::trace;

use crate::{
    config::BridgeConfig,
    error::{RError, RResult},
    runtime::{
        altrep::{AltrepRegistry, compact::CompactClasses},
        closure::Promise,
        environment::Environment,
        gc::GcHeap,
        protect::{PreciousList, ProtectStack},
        type_of::TypeOfCache,
        value::Value,
    },
};

/// Host evaluator used to force promises during coercion.
pub trait Evaluator {
    fn force_promise(&mut self, promise: &Promise) -> RResult<Value>;
}

pub struct RContext {
    config: BridgeConfig,
    pub(crate) heap: GcHeap,
    pub(crate) protect: ProtectStack,
    pub(crate) precious: PreciousList,
    /// Values released by native code since the last collection.
    pub(crate) native_refs: Vec<Value>,
    pub(crate) altrep: AltrepRegistry,
    pub(crate) type_cache: TypeOfCache,
    pub(crate) compact: CompactClasses,
    global_env: Environment,
    evaluator: Option<Box<dyn Evaluator>>,
}

impl Default for RContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RContext {
    pub fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    pub fn with_config(config: BridgeConfig) -> Self {
        let mut heap = GcHeap::with_threshold(config.gc_threshold);
        heap.set_enabled(config.gc_enabled);
        let mut altrep = AltrepRegistry::default();
        let compact = CompactClasses::register(&mut altrep);
        Self {
            protect: ProtectStack::with_limit(config.protect_stack_size),
            precious: PreciousList::default(),
            native_refs: Vec::new(),
            altrep,
            type_cache: TypeOfCache::default(),
            compact,
            global_env: Environment::new(None),
            evaluator: None,
            heap,
            config,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn heap(&self) -> &GcHeap {
        &self.heap
    }

    pub fn global_env(&self) -> &Environment {
        &self.global_env
    }

    pub fn set_evaluator(&mut self, evaluator: Box<dyn Evaluator>) {
        self.evaluator = Some(evaluator);
    }

    /// Registers a freshly created value with the heap, collecting first if
    /// the allocation threshold was reached.
    pub fn alloc(&mut self, value: Value) -> Value {
        if self.heap.should_collect() {
            self.collect();
        }
        self.heap.alloc(value.clone());
        value
    }

    /// Runs a collection and ends the grace period of values released by
    /// native code.
    pub fn collect(&mut self) {
        let global = [Value::Environment(self.global_env.clone())];
        self.heap.collect(&[
            &global,
            self.protect.entries(),
            self.precious.entries(),
            &self.native_refs,
        ]);
        self.native_refs.clear();
    }

    /// Values kept alive only until the next collection.
    pub fn native_ref_count(&self) -> usize {
        self.native_refs.len()
    }

    /// Returns the promise's value, forcing it through the evaluator if
    /// needed.
    pub fn force_promise(&mut self, promise: &Promise) -> RResult<Value> {
        if let Some(value) = promise.value() {
            return Ok(value);
        }
        let evaluator = self
            .evaluator
            .as_mut()
            .ok_or_else(|| RError::error("no evaluator available to force promise"))?;
        let value = evaluator.force_promise(promise)?;
        promise.set_value(value.clone());
        Ok(value)
    }

    pub(crate) fn trace_upcall(&self, name: &str) {
        if self.config.trace_upcalls {
            trace!(upcall = name, "native upcall");
        }
    }
}
