//! Environments (`ENVSXP`) with whole-frame and per-binding locks.
use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::{
    error::{RError, RResult},
    runtime::value::Value,
};

struct Binding {
    value: Value,
    locked: bool,
}

#[derive(Default)]
struct Frame {
    bindings: HashMap<Rc<str>, Binding>,
    parent: Option<Environment>,
    locked: bool,
}

#[derive(Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    /// A new frame; `None` parent makes it an empty root.
    pub fn new(parent: Option<Environment>) -> Self {
        Environment(Rc::new(RefCell::new(Frame {
            parent,
            ..Frame::default()
        })))
    }

    pub fn parent(&self) -> Option<Environment> {
        self.0.borrow().parent.clone()
    }

    /// `Rf_defineVar`.
    pub fn define(&self, name: &str, value: Value) -> RResult<()> {
        let mut guard = self.0.borrow_mut();
        let frame = &mut *guard;
        let locked_env = frame.locked;
        match frame.bindings.get_mut(name) {
            Some(binding) if binding.locked => Err(RError::error(format!(
                "cannot change value of locked binding for '{}'",
                name
            ))),
            Some(binding) => {
                binding.value = value;
                Ok(())
            }
            None if locked_env => Err(RError::error(
                "cannot add bindings to a locked environment",
            )),
            None => {
                frame.bindings.insert(
                    Rc::from(name),
                    Binding {
                        value,
                        locked: false,
                    },
                );
                Ok(())
            }
        }
    }

    /// `Rf_findVarInFrame`: this frame only.
    pub fn get_in_frame(&self, name: &str) -> Option<Value> {
        self.0
            .borrow()
            .bindings
            .get(name)
            .map(|binding| binding.value.clone())
    }

    /// `Rf_findVar`: this frame, then each parent.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut current = Some(self.clone());
        while let Some(env) = current {
            if let Some(value) = env.get_in_frame(name) {
                return Some(value);
            }
            current = env.parent();
        }
        None
    }

    /// `R_lockEnvironment`; with `bindings` every existing binding is locked
    /// as well.
    pub fn lock(&self, bindings: bool) {
        let mut frame = self.0.borrow_mut();
        frame.locked = true;
        if bindings {
            for binding in frame.bindings.values_mut() {
                binding.locked = true;
            }
        }
    }

    pub fn is_locked(&self) -> bool {
        self.0.borrow().locked
    }

    pub fn lock_binding(&self, name: &str) -> RResult<()> {
        self.set_binding_lock(name, true)
    }

    pub fn unlock_binding(&self, name: &str) -> RResult<()> {
        self.set_binding_lock(name, false)
    }

    pub fn binding_is_locked(&self, name: &str) -> RResult<bool> {
        self.0
            .borrow()
            .bindings
            .get(name)
            .map(|binding| binding.locked)
            .ok_or_else(|| no_binding(name))
    }

    fn set_binding_lock(&self, name: &str, locked: bool) -> RResult<()> {
        let mut frame = self.0.borrow_mut();
        let binding = frame.bindings.get_mut(name).ok_or_else(|| no_binding(name))?;
        binding.locked = locked;
        Ok(())
    }

    pub fn names(&self) -> Vec<Rc<str>> {
        let mut names: Vec<Rc<str>> = self.0.borrow().bindings.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.0.borrow().bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bound values, for heap traversal. Empty if the frame is being mutated.
    pub(crate) fn values(&self) -> Vec<Value> {
        match self.0.try_borrow() {
            Ok(frame) => frame.bindings.values().map(|b| b.value.clone()).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

fn no_binding(name: &str) -> RError {
    RError::error(format!("no binding for \"{}\"", name))
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<environment {:#x}>", self.identity())
    }
}
