//! Opaque callables, promises and `...` argument lists.
//!
//! The bridge never runs these; it only classifies, copies and traces them.
use std::{cell::RefCell, rc::Rc};

use crate::runtime::{attributes::Attributes, environment::Environment, value::Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Closure,
    Builtin,
    Special,
}

#[derive(Debug, Clone)]
pub struct Closure {
    pub formals: Value,
    pub body: Value,
    pub env: Option<Environment>,
    pub kind: FunctionKind,
    pub attributes: Attributes,
}

impl Closure {
    pub fn new(formals: Value, body: Value, env: Option<Environment>) -> Self {
        Self {
            formals,
            body,
            env,
            kind: FunctionKind::Closure,
            attributes: Attributes::new(),
        }
    }

    pub fn builtin() -> Self {
        Self {
            formals: Value::Null,
            body: Value::Null,
            env: None,
            kind: FunctionKind::Builtin,
            attributes: Attributes::new(),
        }
    }
}

#[derive(Debug)]
struct PromiseObj {
    expr: Value,
    env: Option<Environment>,
    value: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct Promise(Rc<RefCell<PromiseObj>>);

impl Promise {
    pub fn new(expr: Value, env: Option<Environment>) -> Self {
        Promise(Rc::new(RefCell::new(PromiseObj {
            expr,
            env,
            value: None,
        })))
    }

    /// An already-forced promise.
    pub fn forced(expr: Value, value: Value) -> Self {
        let promise = Promise::new(expr, None);
        promise.set_value(value);
        promise
    }

    pub fn expr(&self) -> Value {
        self.0.borrow().expr.clone()
    }

    pub fn env(&self) -> Option<Environment> {
        self.0.borrow().env.clone()
    }

    pub fn value(&self) -> Option<Value> {
        self.0.borrow().value.clone()
    }

    pub fn set_value(&self, value: Value) {
        let mut obj = self.0.borrow_mut();
        obj.value = Some(value);
        obj.env = None;
    }

    pub fn ptr_eq(&self, other: &Promise) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

/// A materialized `...` argument list (`DOTSXP`).
#[derive(Debug, Clone, Default)]
pub struct DotArgs {
    values: Vec<Value>,
    names: Vec<Option<Rc<str>>>,
}

impl DotArgs {
    pub fn new(entries: Vec<(Option<&str>, Value)>) -> Self {
        let mut args = DotArgs::default();
        for (name, value) in entries {
            args.names.push(name.map(Rc::from));
            args.values.push(value);
        }
        args
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index)?.as_deref()
    }
}
