//! `CAR`, `CDR`, `TAG` and their setters.
use crate::{
    error::{RError, RResult},
    runtime::{
        attributes::{Attributes, NAMES},
        external_ptr::ExternalPtr,
        list::ListObj,
        pairlist::PairList,
        symbol::install,
        value::Value,
        vector::Vector,
    },
};

fn name_at(names: &Value, index: usize) -> Option<String> {
    match names {
        Value::String(v) => v
            .borrow()
            .get(index)
            .and_then(|cell| cell.as_str().map(str::to_string)),
        _ => None,
    }
}

fn name_symbol(name: Option<&str>) -> Value {
    match name {
        Some(name) if !name.is_empty() => Value::Symbol(install(name)),
        _ => Value::Null,
    }
}

/// `CAR`.
pub fn car(x: &Value) -> RResult<Value> {
    match x {
        Value::PairList(cell) => Ok(cell.car()),
        Value::Null => Ok(Value::Null),
        Value::Dots(args) => Ok(args.values().first().cloned().unwrap_or_default()),
        Value::Symbol(_) => Ok(x.clone()),
        Value::List(list) => Ok(list.borrow().get(0).cloned().unwrap_or_default()),
        Value::ExternalPtr(ptr) => Ok(Value::ExternalPtr(ExternalPtr::new(
            ptr.addr(),
            Value::Null,
            Value::Null,
        ))),
        other => Err(RError::unimplemented(format!(
            "CAR only works on pair lists, language objects, argument lists, and symbols, not '{}'",
            other.type_name()
        ))),
    }
}

/// `CDR`. For argument lists and generic vectors the rest is a fresh copy.
pub fn cdr(x: &Value) -> RResult<Value> {
    match x {
        Value::PairList(cell) => Ok(cell.cdr()),
        Value::Null => Ok(Value::Null),
        Value::Dots(args) => {
            let rest = (1..args.len())
                .map(|i| (name_symbol(args.name(i)), args.values()[i].clone()))
                .collect();
            Ok(PairList::from_items(rest).map_or(Value::Null, Value::PairList))
        }
        Value::List(list) => {
            let list = list.borrow();
            if list.len() <= 1 {
                return Ok(Value::Null);
            }
            let rest_names = match list.attributes().get(NAMES) {
                Some(Value::String(names)) => {
                    let names = names.borrow();
                    names.as_slice().and_then(|n| n.get(1..)).map(<[_]>::to_vec)
                }
                _ => None,
            };
            let mut attributes = Attributes::new();
            if let Some(rest) = rest_names {
                attributes.set(NAMES, Value::String(Vector::new(rest).into_ref()));
            }
            Ok(Value::List(
                ListObj::with_attributes(list.items()[1..].to_vec(), attributes).into_ref(),
            ))
        }
        Value::ExternalPtr(ptr) => Ok(ptr.protected()),
        other => Err(RError::unimplemented(format!(
            "CDR only works on pair lists, language objects, and argument lists, not '{}'",
            other.type_name()
        ))),
    }
}

/// `TAG`. Argument lists and generic vectors report the first name as a
/// symbol.
pub fn tag(x: &Value) -> RResult<Value> {
    match x {
        Value::PairList(cell) => Ok(cell.tag()),
        Value::Null | Value::Symbol(_) => Ok(Value::Null),
        Value::Dots(args) => Ok(name_symbol(args.name(0))),
        Value::List(list) => {
            let names = list.borrow().attributes().get(NAMES).cloned();
            Ok(name_symbol(names.and_then(|n| name_at(&n, 0)).as_deref()))
        }
        Value::ExternalPtr(ptr) => Ok(ptr.tag()),
        other => Err(RError::unimplemented(format!(
            "TAG only works on pair lists, language objects, and argument lists, not '{}'",
            other.type_name()
        ))),
    }
}

fn cell_of<'a>(x: &'a Value, what: &str) -> RResult<&'a PairList> {
    match x {
        Value::PairList(cell) => Ok(cell),
        other => Err(RError::unimplemented(format!(
            "{} only works on pair lists or language objects, not '{}'",
            what,
            other.type_name()
        ))),
    }
}

/// `SETCAR`; returns `y`.
pub fn set_car(x: &Value, y: Value) -> RResult<Value> {
    cell_of(x, "SETCAR")?.set_car(y.clone());
    Ok(y)
}

/// `SETCDR`; returns `y`.
pub fn set_cdr(x: &Value, y: Value) -> RResult<Value> {
    cell_of(x, "SETCDR")?.set_cdr(y.clone());
    Ok(y)
}

/// `SET_TAG`; returns `y`. External pointers accept a new tag too.
pub fn set_tag(x: &Value, y: Value) -> RResult<Value> {
    if let Value::ExternalPtr(ptr) = x {
        ptr.set_tag(y.clone());
        return Ok(y);
    }
    cell_of(x, "SET_TAG")?.set_tag(y.clone());
    Ok(y)
}

pub fn caar(x: &Value) -> RResult<Value> {
    car(&car(x)?)
}

pub fn cdar(x: &Value) -> RResult<Value> {
    cdr(&car(x)?)
}

pub fn cadr(x: &Value) -> RResult<Value> {
    car(&cdr(x)?)
}

pub fn cddr(x: &Value) -> RResult<Value> {
    cdr(&cdr(x)?)
}

pub fn caddr(x: &Value) -> RResult<Value> {
    car(&cddr(x)?)
}

pub fn cdddr(x: &Value) -> RResult<Value> {
    cdr(&cddr(x)?)
}

pub fn cadddr(x: &Value) -> RResult<Value> {
    car(&cdddr(x)?)
}

pub fn cad4r(x: &Value) -> RResult<Value> {
    car(&cdr(&cdddr(x)?)?)
}

pub fn setcadr(x: &Value, y: Value) -> RResult<Value> {
    set_car(&cdr(x)?, y)
}

pub fn setcaddr(x: &Value, y: Value) -> RResult<Value> {
    set_car(&cddr(x)?, y)
}

pub fn setcadddr(x: &Value, y: Value) -> RResult<Value> {
    set_car(&cdddr(x)?, y)
}

pub fn setcad4r(x: &Value, y: Value) -> RResult<Value> {
    set_car(&cdr(&cdddr(x)?)?, y)
}
