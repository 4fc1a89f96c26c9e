//! Attribute store for attributable values.
//!
//! Attributes keep insertion order, like GNU R's attribute pairlist. The S4
//! object bit lives here as well since it travels with the attributes on
//! copy.
use std::rc::Rc;

use crate::runtime::value::Value;

pub const NAMES: &str = "names";
pub const DIM: &str = "dim";
pub const DIMNAMES: &str = "dimnames";
pub const CLASS: &str = "class";
pub const LEVELS: &str = "levels";

#[derive(Debug, Clone, Default)]
pub struct Attributes {
    entries: Vec<(Rc<str>, Value)>,
    s4: bool,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key.as_ref() == name)
            .map(|(_, value)| value)
    }

    /// Sets `name`; assigning `Null` removes the attribute.
    pub fn set(&mut self, name: &str, value: Value) {
        if value.is_null() {
            self.remove(name);
            return;
        }
        match self.entries.iter_mut().find(|(key, _)| key.as_ref() == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((Rc::from(name), value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let pos = self.entries.iter().position(|(key, _)| key.as_ref() == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_ref(), value))
    }

    pub fn is_s4(&self) -> bool {
        self.s4
    }

    pub fn set_s4(&mut self, s4: bool) {
        self.s4 = s4;
    }

    /// Whether the `class` attribute contains `class_name`.
    pub fn inherits(&self, class_name: &str) -> bool {
        match self.get(CLASS) {
            Some(Value::String(classes)) => classes
                .borrow()
                .as_slice()
                .is_some_and(|items| items.iter().any(|c| c.as_str() == Some(class_name))),
            _ => false,
        }
    }

    /// A store carrying only the `names` entry.
    pub fn names_only(&self) -> Attributes {
        let mut out = Attributes::new();
        if let Some(names) = self.get(NAMES) {
            out.set(NAMES, names.clone());
        }
        out
    }

    /// `copyMostAttrib`: everything except names, dim and dimnames.
    pub fn copy_most_from(&mut self, source: &Attributes) {
        for (key, value) in source.iter() {
            if key != NAMES && key != DIM && key != DIMNAMES {
                self.set(key, value.clone());
            }
        }
        self.s4 = source.s4;
    }
}
