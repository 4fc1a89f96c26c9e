//! `asCharacterFactor`.
use crate::{
    error::{RError, RResult},
    runtime::{
        altrep::dispatch::elements,
        attributes::LEVELS,
        char_cell::CharCell,
        context::RContext,
        value::Value,
        vector::{Element, Vector},
    },
};

fn malformed() -> RError {
    RError::error("malformed factor")
}

/// Maps each factor code to its level. NA codes become the NA string and
/// leave the result marked incomplete.
pub fn as_character_factor(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    if !x.inherits("factor") {
        return Err(RError::error("attempting to coerce non-factor"));
    }
    let levels = x.attribute(LEVELS);
    if !matches!(x, Value::Integer(_)) || !matches!(levels, Value::String(_)) {
        return Err(malformed());
    }
    let levels = elements::<CharCell>(ctx, &levels)?;
    let codes = elements::<i32>(ctx, x)?;

    let mut out = Vec::with_capacity(codes.len());
    for code in codes {
        if code.is_na() {
            out.push(CharCell::na());
            continue;
        }
        let level = usize::try_from(code)
            .ok()
            .and_then(|code| code.checked_sub(1))
            .and_then(|index| levels.get(index))
            .ok_or_else(malformed)?;
        out.push(level.clone());
    }

    let complete = !out.iter().any(CharCell::is_na);
    let vector = Vector::new(out);
    vector.set_complete(complete);
    Ok(ctx.alloc(Value::String(vector.into_ref())))
}
