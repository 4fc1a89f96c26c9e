//! Allocation, scalars, element access and copy-on-write state.
use tracing::warn;

use crate::{
    error::{RError, RResult},
    runtime::{
        altrep::dispatch::{self, elt, set_elt},
        char_cell::CharCell,
        context::RContext,
        duplicate,
        list::ListObj,
        sexp_type::SexpType,
        sharing::Sharing,
        value::Value,
        vector::{Complex, Element, Logical, Vector},
    },
};

fn zeroed<T: Element>(n: usize) -> Value {
    T::wrap(Vector::new(vec![T::zero(); n]).into_ref())
}

/// Numeric vectors are zero-filled, character vectors hold `""` and lists
/// hold `NULL`. Pairlist and language modes build a chain of `n` cells.
pub fn Rf_allocVector(ctx: &mut RContext, mode: i32, n: usize) -> RResult<Value> {
    ctx.trace_upcall("Rf_allocVector");
    let invalid = || {
        let name = SexpType::from_code(mode).map_or("unknown", SexpType::name);
        RError::error(format!("invalid type/length ({}/{}) in vector allocation", name, n))
    };
    let value = match SexpType::from_code(mode).ok_or_else(invalid)? {
        SexpType::Nil => return Ok(Value::Null),
        SexpType::Logical => zeroed::<Logical>(n),
        SexpType::Integer => zeroed::<i32>(n),
        SexpType::Real => zeroed::<f64>(n),
        SexpType::Complex => zeroed::<Complex>(n),
        SexpType::String => zeroed::<CharCell>(n),
        SexpType::Raw => zeroed::<u8>(n),
        SexpType::List => Value::list(vec![Value::Null; n]),
        SexpType::Expression => Value::Expression(ListObj::new(vec![Value::Null; n]).into_ref()),
        ty @ (SexpType::PairList | SexpType::Language) => {
            let chain = ctx.list_of(vec![Value::Null; n]);
            if let Value::PairList(head) = &chain {
                head.set_language(ty == SexpType::Language);
            }
            return Ok(chain);
        }
        _ => return Err(invalid()),
    };
    Ok(ctx.alloc(value))
}

pub fn Rf_ScalarInteger(ctx: &mut RContext, x: i32) -> Value {
    ctx.trace_upcall("Rf_ScalarInteger");
    ctx.alloc(Value::scalar_int(x))
}

pub fn Rf_ScalarReal(ctx: &mut RContext, x: f64) -> Value {
    ctx.trace_upcall("Rf_ScalarReal");
    ctx.alloc(Value::scalar_real(x))
}

/// `x` uses the C encoding: `NA_LOGICAL`, zero, or true.
pub fn Rf_ScalarLogical(ctx: &mut RContext, x: i32) -> Value {
    ctx.trace_upcall("Rf_ScalarLogical");
    ctx.alloc(Value::scalar_logical(Logical::from_r_int(x)))
}

/// `x` must be a character cell.
pub fn Rf_ScalarString(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    ctx.trace_upcall("Rf_ScalarString");
    let cell = char_arg(x, "Rf_ScalarString")?;
    Ok(ctx.alloc(Value::scalar_string(cell)))
}

pub fn Rf_ScalarComplex(ctx: &mut RContext, x: Complex) -> Value {
    ctx.trace_upcall("Rf_ScalarComplex");
    ctx.alloc(Value::complex_vec(vec![x]))
}

pub fn Rf_ScalarRaw(ctx: &mut RContext, x: u8) -> Value {
    ctx.trace_upcall("Rf_ScalarRaw");
    ctx.alloc(Value::raw_vec(vec![x]))
}

pub fn Rf_mkChar(ctx: &mut RContext, text: &str) -> Value {
    ctx.trace_upcall("Rf_mkChar");
    Value::char(text)
}

pub fn Rf_mkString(ctx: &mut RContext, text: &str) -> Value {
    ctx.trace_upcall("Rf_mkString");
    ctx.alloc(Value::strings(&[text]))
}

pub fn Rf_install(ctx: &mut RContext, name: &str) -> Value {
    ctx.trace_upcall("Rf_install");
    Value::symbol(name)
}

pub fn PRINTNAME(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    ctx.trace_upcall("PRINTNAME");
    match x {
        Value::Symbol(symbol) => Ok(Value::Char(symbol.printname())),
        other => Err(RError::unimplemented_type(other.type_name(), "PRINTNAME")),
    }
}

pub fn Rf_length(ctx: &mut RContext, x: &Value) -> RResult<usize> {
    ctx.trace_upcall("Rf_length");
    dispatch::length(ctx, x)
}

pub fn TYPEOF(ctx: &mut RContext, x: &Value) -> i32 {
    ctx.trace_upcall("TYPEOF");
    ctx.type_of(x).code()
}

pub(crate) fn char_arg(x: &Value, function: &str) -> RResult<CharCell> {
    match x {
        Value::Char(cell) => Ok(cell.clone()),
        other => Err(RError::error(format!(
            "Value of {}() must be a 'CHARSXP' not a '{}'",
            function,
            other.type_name()
        ))),
    }
}

pub fn INTEGER_ELT(ctx: &mut RContext, x: &Value, i: usize) -> RResult<i32> {
    ctx.trace_upcall("INTEGER_ELT");
    elt(ctx, x, i)
}

pub fn REAL_ELT(ctx: &mut RContext, x: &Value, i: usize) -> RResult<f64> {
    ctx.trace_upcall("REAL_ELT");
    elt(ctx, x, i)
}

/// Returns the C encoding of the element.
pub fn LOGICAL_ELT(ctx: &mut RContext, x: &Value, i: usize) -> RResult<i32> {
    ctx.trace_upcall("LOGICAL_ELT");
    elt::<Logical>(ctx, x, i).map(Logical::to_r_int)
}

pub fn COMPLEX_ELT(ctx: &mut RContext, x: &Value, i: usize) -> RResult<Complex> {
    ctx.trace_upcall("COMPLEX_ELT");
    elt(ctx, x, i)
}

pub fn RAW_ELT(ctx: &mut RContext, x: &Value, i: usize) -> RResult<u8> {
    ctx.trace_upcall("RAW_ELT");
    elt(ctx, x, i)
}

pub fn STRING_ELT(ctx: &mut RContext, x: &Value, i: usize) -> RResult<Value> {
    ctx.trace_upcall("STRING_ELT");
    elt::<CharCell>(ctx, x, i).map(Value::Char)
}

fn subscript_out_of_bounds() -> RError {
    RError::error("subscript out of bounds")
}

fn not_a_list(function: &str, x: &Value) -> RError {
    RError::error(format!(
        "{}() can only be applied to a 'list', not a '{}'",
        function,
        x.type_name()
    ))
}

pub fn VECTOR_ELT(ctx: &mut RContext, x: &Value, i: usize) -> RResult<Value> {
    ctx.trace_upcall("VECTOR_ELT");
    match x {
        Value::List(l) | Value::Expression(l) => {
            l.borrow().get(i).cloned().ok_or_else(subscript_out_of_bounds)
        }
        other => Err(not_a_list("VECTOR_ELT", other)),
    }
}

pub fn SET_INTEGER_ELT(ctx: &mut RContext, x: &Value, i: usize, v: i32) -> RResult<()> {
    ctx.trace_upcall("SET_INTEGER_ELT");
    set_elt(ctx, x, i, v)
}

pub fn SET_REAL_ELT(ctx: &mut RContext, x: &Value, i: usize, v: f64) -> RResult<()> {
    ctx.trace_upcall("SET_REAL_ELT");
    set_elt(ctx, x, i, v)
}

pub fn SET_LOGICAL_ELT(ctx: &mut RContext, x: &Value, i: usize, v: i32) -> RResult<()> {
    ctx.trace_upcall("SET_LOGICAL_ELT");
    set_elt(ctx, x, i, Logical::from_r_int(v))
}

pub fn SET_COMPLEX_ELT(ctx: &mut RContext, x: &Value, i: usize, v: Complex) -> RResult<()> {
    ctx.trace_upcall("SET_COMPLEX_ELT");
    set_elt(ctx, x, i, v)
}

pub fn SET_RAW_ELT(ctx: &mut RContext, x: &Value, i: usize, v: u8) -> RResult<()> {
    ctx.trace_upcall("SET_RAW_ELT");
    set_elt(ctx, x, i, v)
}

/// Storing the NA cell marks the vector incomplete.
pub fn SET_STRING_ELT(ctx: &mut RContext, x: &Value, i: usize, v: &Value) -> RResult<()> {
    ctx.trace_upcall("SET_STRING_ELT");
    let cell = char_arg(v, "SET_STRING_ELT")?;
    set_elt(ctx, x, i, cell)
}

/// Returns `v`.
pub fn SET_VECTOR_ELT(ctx: &mut RContext, x: &Value, i: usize, v: Value) -> RResult<Value> {
    ctx.trace_upcall("SET_VECTOR_ELT");
    match x {
        Value::List(l) | Value::Expression(l) => {
            if l.borrow_mut().set(i, v.clone()) {
                Ok(v)
            } else {
                Err(subscript_out_of_bounds())
            }
        }
        other => Err(not_a_list("SET_VECTOR_ELT", other)),
    }
}

/// Forces an ALTREP vector into ordinary storage.
pub fn DATAPTR(ctx: &mut RContext, x: &Value) -> RResult<()> {
    ctx.trace_upcall("DATAPTR");
    dispatch::materialize(ctx, x)
}

/// Values without copy-on-write state (symbols, environments, ...) report
/// the maximum level.
pub fn NAMED(ctx: &mut RContext, x: &Value) -> i32 {
    ctx.trace_upcall("NAMED");
    x.sharing().map_or(2, |s| s.named())
}

/// Raises the sharing level; requests to lower it are ignored.
pub fn SET_NAMED(ctx: &mut RContext, x: &Value, named: i32) {
    ctx.trace_upcall("SET_NAMED");
    let Some(current) = x.sharing().map(|s| s.named()) else {
        return;
    };
    if named < current {
        warn!(current, requested = named, "attempt to decrease NAMED ignored");
    } else if named >= 2 {
        x.update_sharing(Sharing::make_permanent);
    } else if named == 1 && current == 0 {
        x.update_sharing(Sharing::increment);
    }
}

pub fn MARK_NOT_MUTABLE(ctx: &mut RContext, x: &Value) {
    ctx.trace_upcall("MARK_NOT_MUTABLE");
    x.update_sharing(Sharing::make_permanent);
}

pub fn Rf_duplicate(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    ctx.trace_upcall("Rf_duplicate");
    duplicate::duplicate(ctx, x)
}

pub fn Rf_shallow_duplicate(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    ctx.trace_upcall("Rf_shallow_duplicate");
    duplicate::shallow_duplicate(ctx, x)
}
