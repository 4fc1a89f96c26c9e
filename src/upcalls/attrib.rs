//! Attribute access.
use crate::{
    error::{RError, RResult},
    runtime::{
        attributes::{Attributes, CLASS, NAMES},
        char_cell::CharCell,
        context::RContext,
        duplicate::duplicate,
        pairlist::PairList,
        symbol::install,
        value::Value,
    },
};

/// Attribute names may be given as a symbol, a character cell or a
/// character vector.
fn attribute_name(name: &Value) -> RResult<String> {
    let text = match name {
        Value::Symbol(symbol) => Some(symbol.name().to_string()),
        Value::Char(cell) => cell.as_str().map(str::to_string),
        Value::String(v) => v
            .borrow()
            .get(0)
            .and_then(|cell| cell.as_str().map(str::to_string)),
        _ => None,
    };
    text.ok_or_else(|| RError::error("'name' must be non-null character string"))
}

/// Tags of a pairlist read as a names vector; `NULL` when no cell is
/// tagged.
fn pairlist_names(head: &PairList) -> Value {
    let names: Vec<CharCell> = head
        .cells()
        .iter()
        .map(|cell| match cell.tag() {
            Value::Symbol(symbol) => symbol.printname(),
            _ => CharCell::new(""),
        })
        .collect();
    if names.iter().all(|n| n.as_str() == Some("")) {
        Value::Null
    } else {
        Value::string_vec(names)
    }
}

fn set_pairlist_names(head: &PairList, names: &Value) {
    let names = match names {
        Value::String(v) => v.borrow().as_slice().map(<[CharCell]>::to_vec).unwrap_or_default(),
        _ => Vec::new(),
    };
    for (i, cell) in head.cells().iter().enumerate() {
        let tag = match names.get(i).and_then(CharCell::as_str) {
            Some(name) if !name.is_empty() => Value::Symbol(install(name)),
            _ => Value::Null,
        };
        cell.set_tag(tag);
    }
}

/// The attribute store as a tagged pairlist.
pub fn ATTRIB(ctx: &mut RContext, x: &Value) -> Value {
    ctx.trace_upcall("ATTRIB");
    let cells = x
        .with_attributes(|attrs| {
            attrs
                .iter()
                .map(|(key, value)| (Value::Symbol(install(key)), value.clone()))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    match PairList::from_items(cells) {
        Some(head) => ctx.alloc(Value::PairList(head)),
        None => Value::Null,
    }
}

/// Names of a pairlist come from its tags.
pub fn Rf_getAttrib(ctx: &mut RContext, x: &Value, name: &Value) -> RResult<Value> {
    ctx.trace_upcall("Rf_getAttrib");
    let name = attribute_name(name)?;
    if let (Value::PairList(head), NAMES) = (x, name.as_str()) {
        return Ok(pairlist_names(head));
    }
    Ok(x.attribute(&name))
}

/// Setting `NULL` removes the attribute. Returns `value`.
pub fn Rf_setAttrib(ctx: &mut RContext, x: &Value, name: &Value, value: Value) -> RResult<Value> {
    ctx.trace_upcall("Rf_setAttrib");
    let name = attribute_name(name)?;
    if x.is_null() {
        return Err(RError::error("attempt to set an attribute on NULL"));
    }
    if let (Value::PairList(head), NAMES) = (x, name.as_str()) {
        set_pairlist_names(head, &value);
        return Ok(value);
    }
    x.with_attributes_mut(|attrs| attrs.set(&name, value.clone()))
        .ok_or_else(|| {
            RError::error(format!(
                "cannot set attribute '{}' on a '{}'",
                name,
                x.type_name()
            ))
        })?;
    Ok(value)
}

/// Returns `x`.
pub fn Rf_namesgets(ctx: &mut RContext, x: &Value, names: Value) -> RResult<Value> {
    ctx.trace_upcall("Rf_namesgets");
    Rf_setAttrib(ctx, x, &Value::symbol(NAMES), names)?;
    Ok(x.clone())
}

/// Returns `x`; the class must be a character vector or `NULL`.
pub fn Rf_classgets(ctx: &mut RContext, x: &Value, klass: Value) -> RResult<Value> {
    ctx.trace_upcall("Rf_classgets");
    if !matches!(klass, Value::Null | Value::String(_)) {
        return Err(RError::error("attempt to set invalid 'class' attribute"));
    }
    Rf_setAttrib(ctx, x, &Value::symbol(CLASS), klass)?;
    Ok(x.clone())
}

pub fn Rf_inherits(ctx: &mut RContext, x: &Value, name: &str) -> bool {
    ctx.trace_upcall("Rf_inherits");
    x.inherits(name)
}

fn replace_attributes(to: &Value, attributes: Attributes) {
    to.with_attributes_mut(|attrs| *attrs = attributes);
}

/// Replaces the attributes of `to` with deep copies of those of `from`,
/// S4 bit included.
pub fn DUPLICATE_ATTRIB(ctx: &mut RContext, to: &Value, from: &Value) -> RResult<()> {
    ctx.trace_upcall("DUPLICATE_ATTRIB");
    let source = from.with_attributes(Attributes::clone).unwrap_or_default();
    let mut copy = Attributes::new();
    for (key, value) in source.iter() {
        copy.set(key, duplicate(ctx, value)?);
    }
    copy.set_s4(source.is_s4());
    replace_attributes(to, copy);
    Ok(())
}

pub fn SHALLOW_DUPLICATE_ATTRIB(ctx: &mut RContext, to: &Value, from: &Value) {
    ctx.trace_upcall("SHALLOW_DUPLICATE_ATTRIB");
    let source = from.with_attributes(Attributes::clone).unwrap_or_default();
    replace_attributes(to, source);
}

/// Copies every attribute except names, dim and dimnames from `from`.
pub fn Rf_copyMostAttrib(ctx: &mut RContext, from: &Value, to: &Value) {
    ctx.trace_upcall("Rf_copyMostAttrib");
    let Some(source) = from.with_attributes(Attributes::clone) else {
        return;
    };
    to.with_attributes_mut(|attrs| attrs.copy_most_from(&source));
}

pub fn IS_S4_OBJECT(ctx: &mut RContext, x: &Value) -> bool {
    ctx.trace_upcall("IS_S4_OBJECT");
    x.is_s4()
}

pub fn SET_S4_OBJECT(ctx: &mut RContext, x: &Value) {
    ctx.trace_upcall("SET_S4_OBJECT");
    x.with_attributes_mut(|attrs| attrs.set_s4(true));
}

pub fn UNSET_S4_OBJECT(ctx: &mut RContext, x: &Value) {
    ctx.trace_upcall("UNSET_S4_OBJECT");
    x.with_attributes_mut(|attrs| attrs.set_s4(false));
}
