//! Cons cells and list conversion.
use crate::{
    error::RResult,
    runtime::{context::RContext, list_access, value::Value},
};

macro_rules! reader {
    ($name:ident, $f:ident) => {
        pub fn $name(ctx: &mut RContext, x: &Value) -> RResult<Value> {
            ctx.trace_upcall(stringify!($name));
            list_access::$f(x)
        }
    };
}

macro_rules! writer {
    ($name:ident, $f:ident) => {
        /// Returns the stored value.
        pub fn $name(ctx: &mut RContext, x: &Value, y: Value) -> RResult<Value> {
            ctx.trace_upcall(stringify!($name));
            list_access::$f(x, y)
        }
    };
}

reader!(CAR, car);
reader!(CDR, cdr);
reader!(TAG, tag);
reader!(CAAR, caar);
reader!(CDAR, cdar);
reader!(CADR, cadr);
reader!(CDDR, cddr);
reader!(CADDR, caddr);
reader!(CDDDR, cdddr);
reader!(CADDDR, cadddr);
reader!(CAD4R, cad4r);

writer!(SETCAR, set_car);
writer!(SETCDR, set_cdr);
writer!(SET_TAG, set_tag);
writer!(SETCADR, setcadr);
writer!(SETCADDR, setcaddr);
writer!(SETCADDDR, setcadddr);
writer!(SETCAD4R, setcad4r);

pub fn Rf_cons(ctx: &mut RContext, car: Value, cdr: Value) -> Value {
    ctx.trace_upcall("Rf_cons");
    ctx.cons(car, cdr)
}

pub fn Rf_lcons(ctx: &mut RContext, car: Value, cdr: Value) -> Value {
    ctx.trace_upcall("Rf_lcons");
    ctx.lcons(car, cdr)
}

pub fn Rf_list1(ctx: &mut RContext, s: Value) -> Value {
    ctx.trace_upcall("Rf_list1");
    ctx.list_of(vec![s])
}

pub fn Rf_list2(ctx: &mut RContext, s: Value, t: Value) -> Value {
    ctx.trace_upcall("Rf_list2");
    ctx.list_of(vec![s, t])
}

pub fn Rf_list3(ctx: &mut RContext, s: Value, t: Value, u: Value) -> Value {
    ctx.trace_upcall("Rf_list3");
    ctx.list_of(vec![s, t, u])
}

pub fn Rf_list4(ctx: &mut RContext, s: Value, t: Value, u: Value, v: Value) -> Value {
    ctx.trace_upcall("Rf_list4");
    ctx.list_of(vec![s, t, u, v])
}

pub fn Rf_VectorToPairList(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    ctx.trace_upcall("Rf_VectorToPairList");
    list_access::vector_to_pairlist(ctx, x)
}

pub fn Rf_PairToVectorList(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    ctx.trace_upcall("Rf_PairToVectorList");
    list_access::to_r_list(ctx, x)
}
