//! `Rf_coerceVector`.
use crate::{
    error::{RError, RResult},
    runtime::{
        altrep::dispatch::length,
        attributes::Attributes,
        char_cell::CharCell,
        context::RContext,
        list::ListObj,
        list_access::to_r_list,
        sexp_type::SexpType,
        symbol::install,
        value::Value,
        vector::{Complex, Logical},
    },
};

use super::{
    atomic_elements, build_vector,
    cast::{CoercionWarnings, FromScalar, Scalar},
    factor::as_character_factor,
    first_element,
};

fn cannot_coerce(x: &Value, target: SexpType) -> RError {
    RError::error(format!(
        "cannot coerce type '{}' to vector of type '{}'",
        x.type_name(),
        target.name()
    ))
}

fn cast_to(items: &[Scalar], target: SexpType) -> RResult<Value> {
    Ok(match target {
        SexpType::Logical => build_vector::<Logical>(items),
        SexpType::Integer => build_vector::<i32>(items),
        SexpType::Real => build_vector::<f64>(items),
        SexpType::Complex => build_vector::<Complex>(items),
        SexpType::String => build_vector::<CharCell>(items),
        SexpType::Raw => build_vector::<u8>(items),
        other => {
            return Err(RError::should_not_reach_here(format!(
                "'{}' is not an atomic vector type",
                other.name()
            )));
        }
    })
}

fn replace_attributes(value: &Value, attributes: Attributes) {
    value.with_attributes_mut(|attrs| *attrs = attributes);
}

/// Converts `x` to the type with code `mode`.
///
/// Atomic targets keep every attribute of an atomic source; list and
/// expression targets keep only names. S4 objects and pairlist or language
/// targets are not supported.
pub fn coerce_vector(ctx: &mut RContext, x: &Value, mode: i32) -> RResult<Value> {
    let target = SexpType::from_code(mode)
        .ok_or_else(|| RError::unimplemented(format!("coerceVector to type code {}", mode)))?;
    if let Value::Promise(promise) = x {
        let forced = ctx.force_promise(promise)?;
        return coerce_vector(ctx, &forced, mode);
    }
    if x.is_s4() {
        return Err(RError::unimplemented("coerceVector of an S4 object"));
    }
    if x.sexp_type() == target {
        return Ok(x.clone());
    }
    if matches!(x, Value::Environment(_)) {
        return Err(RError::error("environments cannot be coerced to other types"));
    }
    let result = match target {
        SexpType::PairList | SexpType::Language => {
            return Err(RError::unimplemented(format!(
                "coerceVector to '{}'",
                target.name()
            )));
        }
        SexpType::Environment => {
            return Err(RError::error("environments cannot be coerced to other types"));
        }
        SexpType::Nil => {
            return Err(match x {
                Value::List(_) => RError::unimplemented_type("list", "coerceVectorList"),
                _ => cannot_coerce(x, target),
            });
        }
        SexpType::Symbol => to_symbol(ctx, x)?,
        t if t.is_atomic_vector() => to_atomic(ctx, x, t)?,
        SexpType::List | SexpType::Expression => to_list(ctx, x, target)?,
        other => {
            return Err(RError::unimplemented(format!(
                "coerceVector to '{}'",
                other.name()
            )));
        }
    };
    Ok(ctx.alloc(result))
}

fn to_symbol(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    let name = match first_element(ctx, x) {
        Some(scalar) => CharCell::from_scalar(&scalar, &mut CoercionWarnings::default()),
        None => match x {
            Value::Char(cell) => cell.clone(),
            _ => return Err(cannot_coerce(x, SexpType::Symbol)),
        },
    };
    match name.as_str() {
        Some(text) if !text.is_empty() => Ok(Value::Symbol(install(text))),
        _ => Err(RError::error("invalid type/length (symbol/1) in vector allocation")),
    }
}

fn to_atomic(ctx: &mut RContext, x: &Value, target: SexpType) -> RResult<Value> {
    if target == SexpType::String && x.inherits("factor") {
        return as_character_factor(ctx, x);
    }
    if let Some(items) = atomic_elements(ctx, x)? {
        let result = cast_to(&items, target)?;
        if let Some(attributes) = x.with_attributes(Attributes::clone) {
            replace_attributes(&result, attributes);
        }
        return Ok(result);
    }
    match x {
        Value::Null => cast_to(&[], target),
        Value::Symbol(symbol) if target == SexpType::String => {
            Ok(Value::scalar_string(symbol.printname()))
        }
        Value::List(_) | Value::Expression(_) => list_to_atomic(ctx, x, target),
        Value::PairList(_) | Value::Dots(_) => {
            let list = to_r_list(ctx, x)?;
            list_to_atomic(ctx, &list, target)
        }
        _ => Err(cannot_coerce(x, target)),
    }
}

fn list_items(x: &Value) -> Vec<Value> {
    match x {
        Value::List(l) | Value::Expression(l) => l.borrow().items().to_vec(),
        _ => Vec::new(),
    }
}

fn names_of(x: &Value) -> Attributes {
    x.with_attributes(Attributes::names_only).unwrap_or_default()
}

/// Each element must be a length-one atomic vector, except that a string
/// target deparses anything else.
fn list_to_atomic(ctx: &mut RContext, x: &Value, target: SexpType) -> RResult<Value> {
    let mut items = Vec::new();
    for item in list_items(x) {
        let scalar = if item.is_atomic_vector() && length(ctx, &item)? == 1 {
            first_element(ctx, &item)
        } else {
            None
        };
        match scalar {
            Some(scalar) => items.push(scalar),
            None if target == SexpType::String => {
                items.push(Scalar::String(CharCell::new(&item.to_string())))
            }
            None => {
                return Err(RError::error(format!(
                    "(list) object cannot be coerced to type '{}'",
                    target.name()
                )));
            }
        }
    }
    let result = cast_to(&items, target)?;
    replace_attributes(&result, names_of(x));
    Ok(result)
}

fn to_list(ctx: &mut RContext, x: &Value, target: SexpType) -> RResult<Value> {
    let (items, attributes) = match x {
        Value::Null => (Vec::new(), Attributes::new()),
        Value::List(_) | Value::Expression(_) => (list_items(x), names_of(x)),
        Value::PairList(_) | Value::Dots(_) => {
            let list = to_r_list(ctx, x)?;
            (list_items(&list), names_of(&list))
        }
        Value::Symbol(_) | Value::Closure(_) | Value::ExternalPtr(_) => {
            (vec![x.clone()], Attributes::new())
        }
        other => match atomic_elements(ctx, other)? {
            Some(scalars) => (
                scalars.into_iter().map(Scalar::into_value).collect(),
                names_of(other),
            ),
            None => return Err(cannot_coerce(other, target)),
        },
    };
    let list = ListObj::with_attributes(items, attributes).into_ref();
    Ok(match target {
        SexpType::Expression => Value::Expression(list),
        _ => Value::List(list),
    })
}
