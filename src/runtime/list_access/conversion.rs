//! Vector to pairlist conversion and back.
use crate::{
    error::{RError, RResult},
    runtime::{
        attributes::{Attributes, NAMES},
        char_cell::CharCell,
        coerce::{Scalar, atomic_elements},
        context::RContext,
        list::ListObj,
        pairlist::PairList,
        sharing::Sharing,
        symbol::install,
        value::Value,
    },
};

/// Propagates the copy-on-write state of a container to an element pulled
/// out of it. A shared container makes the element permanently shared; a
/// singly referenced one gives a temporary element its first reference.
pub fn adjust_sharing(origin: &Value, element: &Value) {
    let Some(level) = origin.sharing() else {
        return;
    };
    if level.is_shared() {
        element.update_sharing(Sharing::make_permanent);
    } else if !level.is_temporary() && element.sharing().is_some_and(|s| s.is_temporary()) {
        element.update_sharing(Sharing::increment);
    }
}

fn all_but_names(source: &Attributes) -> Attributes {
    let mut out = Attributes::new();
    for (key, value) in source.iter() {
        if key != NAMES {
            out.set(key, value.clone());
        }
    }
    out.set_s4(source.is_s4());
    out
}

fn names_of(x: &Value) -> Vec<Option<String>> {
    match x.attribute(NAMES) {
        Value::String(names) => names
            .borrow()
            .as_slice()
            .map(|n| n.iter().map(|c| c.as_str().map(str::to_string)).collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn tag_for(name: Option<&Option<String>>) -> Value {
    match name {
        Some(Some(name)) if !name.is_empty() => Value::Symbol(install(name)),
        _ => Value::Null,
    }
}

/// `Rf_VectorToPairList`: one cell per element, tagged with the element's
/// name. Attributes other than names move to the head cell.
pub fn vector_to_pairlist(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    let items = match x {
        Value::Null | Value::PairList(_) => return Ok(x.clone()),
        Value::List(l) | Value::Expression(l) => l.borrow().items().to_vec(),
        other => match atomic_elements(ctx, other)? {
            Some(scalars) => scalars.into_iter().map(Scalar::into_value).collect(),
            None => {
                return Err(RError::unimplemented_type(other.type_name(), "coercePairList"));
            }
        },
    };
    let names = names_of(x);
    let cells: Vec<(Value, Value)> = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            adjust_sharing(x, &item);
            (tag_for(names.get(i)), item)
        })
        .collect();
    let Some(head) = PairList::from_items(cells) else {
        return Ok(Value::Null);
    };
    if let Some(attributes) = x.with_attributes(all_but_names) {
        *head.attributes_mut() = attributes;
    }
    Ok(ctx.alloc(Value::PairList(head)))
}

/// `toRList`: the inverse of [`vector_to_pairlist`]. Names are kept
/// positionally; untagged cells get an empty name when any cell is tagged.
pub fn to_r_list(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    let (items, names, attributes) = match x {
        Value::Null => (Vec::new(), Vec::new(), Attributes::new()),
        Value::PairList(head) => {
            let mut items = Vec::new();
            let mut names = Vec::new();
            for cell in head.cells() {
                let item = cell.car();
                adjust_sharing(x, &item);
                items.push(item);
                names.push(match cell.tag() {
                    Value::Symbol(symbol) => Some(symbol.printname()),
                    _ => None,
                });
            }
            (items, names, all_but_names(&head.attributes()))
        }
        Value::Dots(args) => {
            let names = (0..args.len())
                .map(|i| args.name(i).map(CharCell::new))
                .collect();
            (args.values().to_vec(), names, Attributes::new())
        }
        Value::List(_) => return Ok(x.clone()),
        other => {
            return Err(RError::unimplemented_type(other.type_name(), "toRList"));
        }
    };
    let mut attributes = attributes;
    if names.iter().any(Option::is_some) {
        let names = names
            .into_iter()
            .map(|n| n.unwrap_or_else(|| CharCell::new("")))
            .collect();
        attributes.set(NAMES, Value::string_vec(names));
    }
    let list = ListObj::with_attributes(items, attributes).into_ref();
    Ok(ctx.alloc(Value::List(list)))
}
