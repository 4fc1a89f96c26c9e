//! Coercion engine.
//!
//! The scalar coercions (`as_integer`, `as_real`, `as_logical`, `as_char`)
//! are permissive: anything they cannot convert becomes NA and they never
//! fail. `coerce_vector` and `as_character_factor` raise R errors for
//! illegal requests and internal errors for unsupported targets.
use crate::{
    error::RResult,
    runtime::{
        altrep::dispatch::{vector_elements, vector_elt, vector_length},
        context::RContext,
        value::Value,
        vector::{Element, Vector, VectorRef},
    },
};

pub mod as_scalar;
pub mod cast;
pub mod coerce_vector;
pub mod factor;

pub use as_scalar::{as_char, as_integer, as_logical, as_real};
pub use cast::{CoercionWarnings, FromScalar, Scalar};
pub use coerce_vector::coerce_vector;
pub use factor::as_character_factor;


fn first_of<T: Element>(
    ctx: &mut RContext,
    x: &Value,
    v: &VectorRef<T>,
    wrap: fn(T) -> Scalar,
) -> Option<Scalar> {
    if vector_length(ctx, x, v).ok()? == 0 {
        return None;
    }
    vector_elt(ctx, x, v, 0).ok().map(wrap)
}

/// First element of an atomic vector; `None` when empty, not atomic, or
/// when an ALTREP accessor fails.
pub(crate) fn first_element(ctx: &mut RContext, x: &Value) -> Option<Scalar> {
    match x {
        Value::Logical(v) => first_of(ctx, x, v, Scalar::Logical),
        Value::Integer(v) => first_of(ctx, x, v, Scalar::Integer),
        Value::Real(v) => first_of(ctx, x, v, Scalar::Real),
        Value::Complex(v) => first_of(ctx, x, v, Scalar::Complex),
        Value::String(v) => first_of(ctx, x, v, Scalar::String),
        Value::Raw(v) => first_of(ctx, x, v, Scalar::Raw),
        _ => None,
    }
}

fn all_of<T: Element>(
    ctx: &mut RContext,
    x: &Value,
    v: &VectorRef<T>,
    wrap: fn(T) -> Scalar,
) -> RResult<Vec<Scalar>> {
    Ok(vector_elements(ctx, x, v)?.into_iter().map(wrap).collect())
}

/// Every element of an atomic vector, through the ALTREP fallbacks.
pub(crate) fn atomic_elements(ctx: &mut RContext, x: &Value) -> RResult<Option<Vec<Scalar>>> {
    let items = match x {
        Value::Logical(v) => all_of(ctx, x, v, Scalar::Logical)?,
        Value::Integer(v) => all_of(ctx, x, v, Scalar::Integer)?,
        Value::Real(v) => all_of(ctx, x, v, Scalar::Real)?,
        Value::Complex(v) => all_of(ctx, x, v, Scalar::Complex)?,
        Value::String(v) => all_of(ctx, x, v, Scalar::String)?,
        Value::Raw(v) => all_of(ctx, x, v, Scalar::Raw)?,
        _ => return Ok(None),
    };
    Ok(Some(items))
}

/// Casts `items` into a fresh vector of `T`, reporting warnings once.
pub(crate) fn build_vector<T: FromScalar>(items: &[Scalar]) -> Value {
    let mut warnings = CoercionWarnings::default();
    let cast: Vec<T> = items.iter().map(|s| T::from_scalar(s, &mut warnings)).collect();
    warnings.emit();
    T::wrap(Vector::new(cast).into_ref())
}
