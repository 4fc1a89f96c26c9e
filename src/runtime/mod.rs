//! Runtime core: the value model and the operations native code performs
//! on it.
//!
//! # Ownership
//! Values are reference-counted handles. Mutable objects (cons cells,
//! vectors, lists, environments, external pointers) sit behind a
//! `RefCell`, so a mutation through one handle is visible through every
//! other, as it is for native code holding the same `SEXP`. Reachability
//! for collection purposes is tracked separately by the context's heap,
//! which marks from explicit roots.
//!
//! # Threading
//! An [`RContext`](context::RContext) and every value it hands out are
//! confined to one thread.
pub mod altrep;
pub mod attributes;
pub mod char_cell;
pub mod closure;
pub mod coerce;
pub mod context;
pub mod duplicate;
pub mod environment;
pub mod external_ptr;
pub mod format;
pub mod gc;
pub mod list;
pub mod list_access;
pub mod na;
pub mod pairlist;
pub mod protect;
pub mod sexp_type;
pub mod sharing;
pub mod symbol;
pub mod type_of;
pub mod value;
pub mod vector;
