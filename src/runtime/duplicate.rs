//! `Rf_duplicate` and `Rf_shallow_duplicate`.
//!
//! Copies start out temporary. ALTREP vectors whose class has a Duplicate
//! method are copied by it unless it returns `NULL`; every other ALTREP
//! vector is materialized into a plain one.
use std::rc::Rc;

use crate::{
    error::RResult,
    runtime::{
        altrep::dispatch::{pending_class, vector_elements},
        attributes::Attributes,
        context::RContext,
        list::{ListObj, ListRef},
        pairlist::PairList,
        value::{Value, match_vector},
        vector::{Element, Vector, VectorRef},
    },
};

pub fn duplicate(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    copy_value(ctx, x, true)
}

pub fn shallow_duplicate(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    copy_value(ctx, x, false)
}

fn copy_value(ctx: &mut RContext, x: &Value, deep: bool) -> RResult<Value> {
    let copy = match x {
        Value::Null
        | Value::Symbol(_)
        | Value::Char(_)
        | Value::Environment(_)
        | Value::Promise(_)
        | Value::Dots(_) => return Ok(x.clone()),
        Value::ExternalPtr(ptr) => Value::ExternalPtr(ptr.shallow_copy()),
        Value::Closure(f) => Value::Closure(Rc::new((**f).clone())),
        Value::List(l) => Value::List(copy_list(ctx, l, deep)?),
        Value::Expression(l) => Value::Expression(copy_list(ctx, l, deep)?),
        Value::PairList(head) => copy_pairlist(ctx, head, deep)?,
        other => match_vector!(other, v => copy_vector(ctx, x, v, deep)?, _ => x.clone()),
    };
    Ok(ctx.alloc(copy))
}

fn copy_attributes(ctx: &mut RContext, source: &Attributes, deep: bool) -> RResult<Attributes> {
    let mut out = Attributes::new();
    for (key, value) in source.iter() {
        let value = if deep {
            copy_value(ctx, value, true)?
        } else {
            value.clone()
        };
        out.set(key, value);
    }
    out.set_s4(source.is_s4());
    Ok(out)
}

fn copy_vector<T: Element>(
    ctx: &mut RContext,
    x: &Value,
    v: &VectorRef<T>,
    deep: bool,
) -> RResult<Value> {
    if let Some(class) = pending_class(v) {
        if let Some(method) = ctx.altrep.descriptor(class)?.duplicate {
            let copy = ctx.call_native(|ctx| method(ctx, x, deep))?;
            if !copy.is_null() {
                return Ok(copy);
            }
        }
    }
    let items = vector_elements(ctx, x, v)?;
    let (attributes, complete) = {
        let vector = v.borrow();
        (vector.attributes().clone(), vector.cached_complete())
    };
    let mut copy = Vector::new(items);
    *copy.attributes_mut() = copy_attributes(ctx, &attributes, deep)?;
    if let Some(complete) = complete {
        copy.set_complete(complete);
    }
    Ok(T::wrap(copy.into_ref()))
}

fn copy_list(ctx: &mut RContext, l: &ListRef, deep: bool) -> RResult<ListRef> {
    let (items, attributes) = {
        let list = l.borrow();
        (list.items().to_vec(), list.attributes().clone())
    };
    let items = if deep {
        items
            .iter()
            .map(|item| copy_value(ctx, item, true))
            .collect::<RResult<Vec<_>>>()?
    } else {
        items
    };
    let attributes = copy_attributes(ctx, &attributes, deep)?;
    Ok(ListObj::with_attributes(items, attributes).into_ref())
}

/// Copies every cell of the chain; cars are copied only when `deep`.
fn copy_pairlist(ctx: &mut RContext, head: &PairList, deep: bool) -> RResult<Value> {
    let cells = head.cells();
    let mut copies = Vec::new();
    for cell in &cells {
        let car = if deep {
            copy_value(ctx, &cell.car(), true)?
        } else {
            cell.car()
        };
        let attributes = cell.attributes().clone();
        let attributes = copy_attributes(ctx, &attributes, deep)?;
        copies.push((car, cell.tag(), cell.is_language(), attributes));
    }
    let mut next = cells.last().map(PairList::cdr).unwrap_or_default();
    for (car, tag, language, attributes) in copies.into_iter().rev() {
        let copy = PairList::with_tag(car, next, tag);
        copy.set_language(language);
        *copy.attributes_mut() = attributes;
        next = Value::PairList(copy);
    }
    Ok(next)
}
