//! External pointers (`EXTPTRSXP`).
//!
//! The `protected` field is kept alive only through the pointer object; the
//! heap reaches it by tracing the pointer, never as a root of its own.
use std::{cell::RefCell, fmt, rc::Rc};

use crate::runtime::{attributes::Attributes, value::Value};

struct ExtPtrObj {
    addr: usize,
    tag: Value,
    protected: Value,
    attributes: Attributes,
}

#[derive(Clone)]
pub struct ExternalPtr(Rc<RefCell<ExtPtrObj>>);

impl ExternalPtr {
    /// `R_MakeExternalPtr`.
    pub fn new(addr: usize, tag: Value, protected: Value) -> Self {
        ExternalPtr(Rc::new(RefCell::new(ExtPtrObj {
            addr,
            tag,
            protected,
            attributes: Attributes::new(),
        })))
    }

    pub fn addr(&self) -> usize {
        self.0.borrow().addr
    }

    pub fn tag(&self) -> Value {
        self.0.borrow().tag.clone()
    }

    pub fn protected(&self) -> Value {
        self.0.borrow().protected.clone()
    }

    pub fn set_addr(&self, addr: usize) {
        self.0.borrow_mut().addr = addr;
    }

    pub fn set_tag(&self, tag: Value) {
        self.0.borrow_mut().tag = tag;
    }

    pub fn set_protected(&self, protected: Value) {
        self.0.borrow_mut().protected = protected;
    }

    /// `R_ClearExternalPtr`.
    pub fn clear(&self) {
        self.set_addr(0);
    }

    /// A new pointer object carrying copies of every field.
    pub fn shallow_copy(&self) -> ExternalPtr {
        let obj = self.0.borrow();
        let copy = ExternalPtr::new(obj.addr, obj.tag.clone(), obj.protected.clone());
        copy.0.borrow_mut().attributes = obj.attributes.clone();
        copy
    }

    pub fn attributes(&self) -> std::cell::Ref<'_, Attributes> {
        std::cell::Ref::map(self.0.borrow(), |obj| &obj.attributes)
    }

    pub fn attributes_mut(&self) -> std::cell::RefMut<'_, Attributes> {
        std::cell::RefMut::map(self.0.borrow_mut(), |obj| &mut obj.attributes)
    }

    pub fn ptr_eq(&self, other: &ExternalPtr) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for ExternalPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<pointer: {:#x}>", self.addr())
    }
}
