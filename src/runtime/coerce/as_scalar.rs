//! `Rf_asInteger`, `Rf_asReal`, `Rf_asLogical` and `Rf_asChar`.
use tracing::debug;

use crate::runtime::{
    char_cell::CharCell,
    context::RContext,
    na::{NA_INTEGER, NA_REAL},
    value::Value,
    vector::Logical,
};

use super::{
    cast::{CoercionWarnings, FromScalar, Scalar},
    first_element,
};

/// Resolves promises; `None` if forcing failed.
fn forced(ctx: &mut RContext, x: &Value) -> Option<Value> {
    match x {
        Value::Promise(promise) => match ctx.force_promise(promise) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(error = %err, "promise forcing failed during coercion");
                None
            }
        },
        other => Some(other.clone()),
    }
}

/// The scalar a permissive coercion starts from: the first element of an
/// atomic vector, or a character cell read as a string.
fn source_scalar(ctx: &mut RContext, x: &Value) -> Option<Scalar> {
    let x = forced(ctx, x)?;
    match &x {
        Value::Char(cell) => Some(Scalar::String(cell.clone())),
        other => first_element(ctx, other),
    }
}

fn cast_first<T: FromScalar>(ctx: &mut RContext, x: &Value) -> Option<T> {
    let scalar = source_scalar(ctx, x)?;
    let mut warnings = CoercionWarnings::default();
    let result = T::from_scalar(&scalar, &mut warnings);
    warnings.emit();
    Some(result)
}

/// `Rf_asInteger`. Never fails; uncoercible input yields `NA_INTEGER`.
pub fn as_integer(ctx: &mut RContext, x: &Value) -> i32 {
    cast_first(ctx, x).unwrap_or(NA_INTEGER)
}

/// `Rf_asReal`. Never fails; uncoercible input yields `NA_REAL`.
pub fn as_real(ctx: &mut RContext, x: &Value) -> f64 {
    cast_first(ctx, x).unwrap_or(NA_REAL)
}

/// `Rf_asLogical`. Never fails; uncoercible input yields NA.
pub fn as_logical(ctx: &mut RContext, x: &Value) -> Logical {
    cast_first(ctx, x).unwrap_or(Logical::Na)
}

/// `Rf_asChar`. Symbols give their print name. A double or complex NA
/// becomes the string `"NA"`, not the NA string.
pub fn as_char(ctx: &mut RContext, x: &Value) -> CharCell {
    let Some(x) = forced(ctx, x) else {
        return CharCell::na();
    };
    match &x {
        Value::Char(cell) => cell.clone(),
        Value::Symbol(symbol) => symbol.printname(),
        other => match first_element(ctx, other) {
            Some(scalar @ (Scalar::Real(_) | Scalar::Complex(_))) if scalar.is_na() => {
                CharCell::new("NA")
            }
            Some(scalar) => CharCell::from_scalar(&scalar, &mut CoercionWarnings::default()),
            None => CharCell::na(),
        },
    }
}
