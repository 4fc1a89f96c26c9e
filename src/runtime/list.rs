//! Generic vectors (`VECSXP`) and expression vectors (`EXPRSXP`).
use std::{cell::RefCell, rc::Rc};

use crate::runtime::{attributes::Attributes, sharing::Sharing, value::Value};

pub type ListRef = Rc<RefCell<ListObj>>;

#[derive(Debug, Clone, Default)]
pub struct ListObj {
    items: Vec<Value>,
    attributes: Attributes,
    sharing: Sharing,
}

impl ListObj {
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items,
            attributes: Attributes::new(),
            sharing: Sharing::default(),
        }
    }

    pub fn with_attributes(items: Vec<Value>, attributes: Attributes) -> Self {
        Self {
            items,
            attributes,
            sharing: Sharing::default(),
        }
    }

    pub fn into_ref(self) -> ListRef {
        Rc::new(RefCell::new(self))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// `SET_VECTOR_ELT`; returns `false` when out of range.
    pub fn set(&mut self, index: usize, value: Value) -> bool {
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn sharing(&self) -> Sharing {
        self.sharing
    }

    pub fn sharing_mut(&mut self) -> &mut Sharing {
        &mut self.sharing
    }
}
