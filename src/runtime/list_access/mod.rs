//! Pairlist and list access.
//!
//! The composite accessors (`cadr`, `cddr`, ...) are plain compositions of
//! [`car`] and [`cdr`]; only the primitives look at the argument's type.
//! Setters accept nothing but cons cells and fail with an internal error
//! otherwise.
use crate::runtime::{context::RContext, pairlist::PairList, value::Value};

pub mod accessors;
pub mod conversion;

pub use accessors::{
    caar, cad4r, caddr, cadddr, cadr, car, cdar, cddr, cdddr, cdr, set_car, set_cdr, set_tag,
    setcad4r, setcadddr, setcaddr, setcadr, tag,
};
pub use conversion::{adjust_sharing, to_r_list, vector_to_pairlist};


impl RContext {
    /// `Rf_cons`.
    pub fn cons(&mut self, car: Value, cdr: Value) -> Value {
        self.alloc(Value::PairList(PairList::cons(car, cdr)))
    }

    /// `Rf_lcons`.
    pub fn lcons(&mut self, car: Value, cdr: Value) -> Value {
        self.alloc(Value::PairList(PairList::lcons(car, cdr)))
    }

    /// `Rf_list1` .. `Rf_list4` for any number of elements.
    pub fn list_of(&mut self, items: Vec<Value>) -> Value {
        let cells = items.into_iter().map(|item| (Value::Null, item)).collect();
        match PairList::from_items(cells) {
            Some(head) => self.alloc(Value::PairList(head)),
            None => Value::Null,
        }
    }
}
