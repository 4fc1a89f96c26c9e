use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::{
    config::DEFAULT_GC_THRESHOLD,
    runtime::{
        attributes::Attributes,
        gc::{gc_handle::GcHandle, heap_entry::HeapEntry},
        value::{Value, match_vector},
    },
};

const MIN_GC_THRESHOLD: usize = 1024;

/// Stop-the-world mark-and-sweep registry of heap-managed values.
///
/// Every object allocated through the context is registered here and the
/// heap holds one strong reference to it. A collection marks from the roots
/// the context supplies and releases the heap's reference to everything
/// unmarked; native code that still holds a handle keeps the object alive,
/// but it is no longer heap-managed.
pub struct GcHeap {
    entries: Vec<Option<HeapEntry>>,
    free_list: Vec<u32>,
    by_identity: HashMap<usize, GcHandle>,
    allocation_count: usize,
    gc_threshold: usize,
    gc_enabled: bool,
    total_collections: usize,
    total_allocations: usize,
}

impl Default for GcHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl GcHeap {
    /// Creates a new GC heap with default collection settings.
    ///
    /// Defaults:
    /// - threshold: `10_000` allocations
    /// - GC enabled: `true`
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_list: Vec::new(),
            by_identity: HashMap::new(),
            allocation_count: 0,
            gc_threshold: DEFAULT_GC_THRESHOLD,
            gc_enabled: true,
            total_collections: 0,
            total_allocations: 0,
        }
    }

    /// Creates a new heap with a custom GC allocation threshold.
    ///
    /// Unlike [`Self::set_threshold`], this does not clamp to `MIN_GC_THRESHOLD`.
    pub fn with_threshold(threshold: usize) -> Self {
        let mut heap = Self::new();
        heap.gc_threshold = threshold;
        heap
    }

    /// Enables or disables automatic collection checks.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.gc_enabled = enabled
    }

    /// Sets the allocation threshold that triggers collection.
    ///
    /// Values below `MIN_GC_THRESHOLD` are clamped upward.
    pub fn set_threshold(&mut self, threshold: usize) {
        self.gc_threshold = threshold.max(MIN_GC_THRESHOLD)
    }

    pub fn threshold(&self) -> usize {
        self.gc_threshold
    }

    /// Returns `true` when GC is enabled and the threshold was reached.
    pub fn should_collect(&self) -> bool {
        self.gc_enabled && self.allocation_count >= self.gc_threshold
    }

    /// Registers `value` and returns its slot.
    ///
    /// Values without identity (`NULL`, character cells) are not heap
    /// objects and yield `None`. Registering an object twice returns the
    /// existing slot.
    pub fn alloc(&mut self, value: Value) -> Option<GcHandle> {
        let identity = value.identity()?;
        if let Some(handle) = self.by_identity.get(&identity) {
            return Some(*handle);
        }
        self.allocation_count += 1;
        self.total_allocations += 1;

        let entry = HeapEntry {
            value,
            identity,
            marked: false,
        };

        let handle = if let Some(idx) = self.free_list.pop() {
            self.entries[idx as usize] = Some(entry);
            GcHandle(idx)
        } else {
            let idx = self.entries.len() as u32;
            self.entries.push(Some(entry));
            GcHandle(idx)
        };
        self.by_identity.insert(identity, handle);
        Some(handle)
    }

    /// Returns the live object in `handle`'s slot.
    pub fn get(&self, handle: GcHandle) -> Option<&Value> {
        self.entries
            .get(handle.0 as usize)?
            .as_ref()
            .map(|entry| &entry.value)
    }

    /// Whether `value` is currently heap-managed.
    pub fn contains(&self, value: &Value) -> bool {
        value
            .identity()
            .is_some_and(|identity| self.by_identity.contains_key(&identity))
    }

    /// Returns the number of currently live heap entries.
    pub fn live_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    /// Returns the total number of allocations performed by this heap.
    pub fn total_allocations(&self) -> usize {
        self.total_allocations
    }

    /// Returns the total number of completed GC cycles.
    pub fn total_collections(&self) -> usize {
        self.total_collections
    }

    /// Runs a full stop-the-world mark-and-sweep collection.
    ///
    /// `roots` is every root set the context owns: the global environment,
    /// the protection stack, the precious list and the values native code
    /// released since the previous collection.
    ///
    /// The context only collects at allocation points and on `R_gc`, where
    /// no object is borrowed.
    pub fn collect(&mut self, roots: &[&[Value]]) {
        let mut visited = HashSet::new();
        for set in roots {
            let mut i = 0;
            let len = set.len();
            while i < len {
                self.mark_value(&set[i], &mut visited);
                i += 1;
            }
        }

        let live_before = self.live_count();
        self.sweep();
        let live_after = self.live_count();
        let collected = live_before.saturating_sub(live_after);

        self.total_collections += 1;
        self.allocation_count = 0;
        debug!(live_before, live_after, "heap collection");

        self.adapt_threshold(collected, live_before);
    }

    fn mark_value(&mut self, root: &Value, visited: &mut HashSet<usize>) {
        let mut worklist = Vec::with_capacity(16);
        worklist.push(root.clone());

        while let Some(value) = worklist.pop() {
            if let Some(identity) = value.identity() {
                // Mark first so cycles/shared nodes are visited once.
                if !visited.insert(identity) {
                    continue;
                }
                if let Some(handle) = self.by_identity.get(&identity) {
                    if let Some(entry) = self.entries[handle.0 as usize].as_mut() {
                        entry.marked = true;
                    }
                }
            }
            push_children(&value, &mut worklist);
        }
    }

    fn sweep(&mut self) {
        let mut i = 0;
        let len = self.entries.len();
        while i < len {
            if let Some(entry) = &mut self.entries[i] {
                if entry.marked {
                    entry.marked = false;
                } else {
                    self.by_identity.remove(&entry.identity);
                    self.entries[i] = None;
                    self.free_list.push(i as u32);
                }
            }
            i += 1;
        }
    }

    fn adapt_threshold(&mut self, collected: usize, total_before: usize) {
        if total_before == 0 {
            return;
        }

        let ratio = collected as f64 / total_before as f64;
        if ratio < 0.25 {
            self.gc_threshold = (self.gc_threshold * 2).min(1_000_000);
        } else if ratio > 0.75 {
            self.gc_threshold = (self.gc_threshold / 2).max(MIN_GC_THRESHOLD)
        }
    }
}

/// Enqueues every value directly reachable from `value`.
///
/// Objects currently borrowed mutably are skipped; collection never runs
/// while a write through the same handle is in progress.
fn push_children(value: &Value, worklist: &mut Vec<Value>) {
    match value {
        Value::PairList(cell) => {
            let Some(node) = cell.try_borrow() else {
                return skip_borrowed(value);
            };
            for field in node.fields() {
                worklist.push(field.clone());
            }
            push_attributes(node.node_attributes(), worklist);
        }
        Value::List(list) | Value::Expression(list) => {
            let Ok(list) = list.try_borrow() else {
                return skip_borrowed(value);
            };
            worklist.extend(list.items().iter().cloned());
            push_attributes(list.attributes(), worklist);
        }
        Value::Dots(dots) => worklist.extend(dots.values().iter().cloned()),
        Value::Environment(env) => {
            worklist.extend(env.values());
            if let Some(parent) = env.parent() {
                worklist.push(Value::Environment(parent));
            }
        }
        Value::ExternalPtr(ptr) => {
            worklist.push(ptr.tag());
            worklist.push(ptr.protected());
            push_attributes(&ptr.attributes(), worklist);
        }
        Value::Closure(closure) => {
            worklist.push(closure.formals.clone());
            worklist.push(closure.body.clone());
            if let Some(env) = &closure.env {
                worklist.push(Value::Environment(env.clone()));
            }
        }
        Value::Promise(promise) => {
            worklist.push(promise.expr());
            if let Some(v) = promise.value() {
                worklist.push(v);
            }
            if let Some(env) = promise.env() {
                worklist.push(Value::Environment(env));
            }
        }
        Value::Null | Value::Symbol(_) | Value::Char(_) => {}
        other => match_vector!(other, v => {
            let Ok(vector) = v.try_borrow() else {
                return skip_borrowed(value);
            };
            if let Some(data) = vector.altrep_data() {
                worklist.push(data.data1());
                worklist.push(data.data2());
            }
            push_attributes(vector.attributes(), worklist);
        }, _ => {}),
    }
}

/// A mutably borrowed object's children go unmarked this cycle.
fn skip_borrowed(value: &Value) {
    warn!(kind = value.type_name(), "object borrowed during marking; children not traced");
}

fn push_attributes(attrs: &Attributes, worklist: &mut Vec<Value>) {
    for (_, v) in attrs.iter() {
        worklist.push(v.clone());
    }
}
