//! Cons cells (`LISTSXP` / `LANGSXP`).
//!
//! Cells are shared and interior-mutable: a `SETCAR` through one handle is
//! visible through every other handle to the same cell.
use std::{cell::RefCell, rc::Rc};

use crate::runtime::{attributes::Attributes, sharing::Sharing, value::Value};

#[derive(Debug)]
pub struct PairNode {
    car: Value,
    cdr: Value,
    tag: Value,
    language: bool,
    attributes: Attributes,
    sharing: Sharing,
}

#[derive(Debug, Clone)]
pub struct PairList(Rc<RefCell<PairNode>>);

impl PairList {
    /// `Rf_cons`.
    pub fn cons(car: Value, cdr: Value) -> Self {
        Self::with_tag(car, cdr, Value::Null)
    }

    pub fn with_tag(car: Value, cdr: Value, tag: Value) -> Self {
        PairList(Rc::new(RefCell::new(PairNode {
            car,
            cdr,
            tag,
            language: false,
            attributes: Attributes::new(),
            sharing: Sharing::default(),
        })))
    }

    /// `Rf_lcons`: a cell flagged as a call form.
    pub fn lcons(car: Value, cdr: Value) -> Self {
        let cell = Self::cons(car, cdr);
        cell.set_language(true);
        cell
    }

    /// Builds a `LISTSXP` chain from `(tag, value)` pairs; `None` for an
    /// empty input.
    pub fn from_items(items: Vec<(Value, Value)>) -> Option<Self> {
        let mut head = Value::Null;
        for (tag, car) in items.into_iter().rev() {
            head = Value::PairList(Self::with_tag(car, head, tag));
        }
        match head {
            Value::PairList(cell) => Some(cell),
            _ => None,
        }
    }

    pub fn car(&self) -> Value {
        self.0.borrow().car.clone()
    }

    pub fn cdr(&self) -> Value {
        self.0.borrow().cdr.clone()
    }

    pub fn tag(&self) -> Value {
        self.0.borrow().tag.clone()
    }

    pub fn set_car(&self, value: Value) {
        self.0.borrow_mut().car = value;
    }

    pub fn set_cdr(&self, value: Value) {
        self.0.borrow_mut().cdr = value;
    }

    pub fn set_tag(&self, value: Value) {
        self.0.borrow_mut().tag = value;
    }

    pub fn is_language(&self) -> bool {
        self.0.borrow().language
    }

    pub fn set_language(&self, language: bool) {
        self.0.borrow_mut().language = language;
    }

    pub fn attributes(&self) -> std::cell::Ref<'_, Attributes> {
        std::cell::Ref::map(self.0.borrow(), |node| &node.attributes)
    }

    pub fn attributes_mut(&self) -> std::cell::RefMut<'_, Attributes> {
        std::cell::RefMut::map(self.0.borrow_mut(), |node| &mut node.attributes)
    }

    pub fn sharing(&self) -> Sharing {
        self.0.borrow().sharing
    }

    pub fn update_sharing(&self, f: impl FnOnce(&mut Sharing)) {
        f(&mut self.0.borrow_mut().sharing);
    }

    pub fn ptr_eq(&self, other: &PairList) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    /// Cells of the chain starting here, following `cdr` while it is a cell.
    pub fn cells(&self) -> Vec<PairList> {
        let mut out = vec![self.clone()];
        let mut next = self.cdr();
        while let Value::PairList(cell) = next {
            next = cell.cdr();
            out.push(cell);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.cells().len()
    }

    pub(crate) fn try_borrow(&self) -> Option<std::cell::Ref<'_, PairNode>> {
        self.0.try_borrow().ok()
    }
}

/// Unlinks the uniquely owned tail one cell at a time so long chains do not
/// recurse through `Drop`.
impl Drop for PairNode {
    fn drop(&mut self) {
        let mut next = std::mem::take(&mut self.cdr);
        while let Value::PairList(PairList(cell)) = next {
            match Rc::try_unwrap(cell) {
                Ok(node) => next = std::mem::take(&mut node.into_inner().cdr),
                Err(_) => break,
            }
        }
    }
}

impl PairNode {
    pub(crate) fn fields(&self) -> [&Value; 3] {
        [&self.car, &self.cdr, &self.tag]
    }

    pub(crate) fn node_attributes(&self) -> &Attributes {
        &self.attributes
    }
}
