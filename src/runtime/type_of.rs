//! `TYPEOF` with a per-context shape cache.
use std::{collections::HashMap, mem::Discriminant};

use crate::runtime::{context::RContext, sexp_type::SexpType, value::Value};

/// Variant plus the one flag that can change the type code within it: the
/// language bit of a cons cell, or the kind of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Shape(Discriminant<Value>, u8);

impl Shape {
    fn of(x: &Value) -> Self {
        let flag = match x {
            Value::PairList(cell) => cell.is_language() as u8,
            Value::Closure(f) => f.kind as u8,
            _ => 0,
        };
        Shape(std::mem::discriminant(x), flag)
    }
}

#[derive(Debug, Default)]
pub struct TypeOfCache {
    shapes: HashMap<Shape, SexpType>,
    hits: usize,
    misses: usize,
}

impl TypeOfCache {
    pub fn lookup(&mut self, x: &Value) -> SexpType {
        let shape = Shape::of(x);
        if let Some(ty) = self.shapes.get(&shape) {
            self.hits += 1;
            return *ty;
        }
        self.misses += 1;
        let ty = x.sexp_type();
        self.shapes.insert(shape, ty);
        ty
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Number of distinct shapes seen.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl RContext {
    /// `TYPEOF`.
    pub fn type_of(&mut self, x: &Value) -> SexpType {
        self.type_cache.lookup(x)
    }

    pub fn type_of_cache(&self) -> &TypeOfCache {
        &self.type_cache
    }
}
